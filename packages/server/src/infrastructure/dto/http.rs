//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// `GET /api/room`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub categories: Vec<String>,
    pub message_count: usize,
    pub sessions: Vec<SessionDetailDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetailDto {
    pub connection_id: String,
    pub nickname: String,
    /// RFC 3339 (UTC)
    pub joined_at: String,
}
