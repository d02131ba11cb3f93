//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::{RoomSummaryDto, SessionDetailDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Categories, message count and joined sessions of the room
pub async fn get_room(State(state): State<Arc<AppState>>) -> Json<RoomSummaryDto> {
    let overview = state.get_room_state_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(RoomSummaryDto {
        categories: overview
            .categories
            .into_iter()
            .map(|c| c.into_string())
            .collect(),
        message_count: overview.message_count,
        sessions: overview
            .sessions
            .iter()
            .map(SessionDetailDto::from)
            .collect(),
    })
}
