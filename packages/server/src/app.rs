//! Dependency wiring.

use std::{collections::HashMap, sync::Arc};

use axum::http::HeaderValue;
use roomcast_shared::time::Clock;
use tokio::sync::Mutex;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::{
    config::RelayConfig,
    domain::{CategoryName, Room},
    error::ServerError,
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomRepository, InMemorySessionRepository},
    },
    ui::{
        Server,
        state::{AppState, ConnectionLimits},
    },
    usecase::{
        ConnectClientUseCase, CreateCategoryUseCase, DisconnectClientUseCase,
        GetRoomStateUseCase, JoinRoomUseCase, RelaySequencer, SendMessageUseCase,
    },
};

/// Build a ready-to-run server from the relay configuration.
///
/// # Errors
///
/// Returns `ServerError` if a configured category name or origin is invalid,
/// or the outbound buffer is zero.
pub fn build_server(config: &RelayConfig, clock: Arc<dyn Clock>) -> Result<Server, ServerError> {
    let cors = cors_layer(&config.allowed_origins)?;
    Ok(Server::new(build_state(config, clock)?, cors))
}

/// Any origin when `origins` is empty, otherwise exactly the listed ones.
fn cors_layer(origins: &[String]) -> Result<CorsLayer, ServerError> {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins = origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin).map_err(|_| {
                    ServerError::InvalidConfig(format!("invalid CORS origin '{}'", origin))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };
    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// Wire repositories, pusher and use cases into the handler state.
///
/// Initialize dependencies in order:
/// 1. Repository
/// 2. MessagePusher
/// 3. UseCases
/// 4. AppState
pub(crate) fn build_state(
    config: &RelayConfig,
    clock: Arc<dyn Clock>,
) -> Result<AppState, ServerError> {
    if config.outbound_buffer == 0 {
        return Err(ServerError::InvalidConfig(
            "outbound buffer must be at least 1".to_string(),
        ));
    }

    // 1. Create Repository (in-memory database)
    let categories = config
        .initial_categories
        .iter()
        .cloned()
        .map(CategoryName::new)
        .collect::<Result<Vec<_>, _>>()?;
    let fallback = CategoryName::new(config.fallback_category.clone())?;
    let room = Room::new(categories, fallback);
    tracing::info!(
        "Room created with categories: {}",
        room.categories()
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    let repository = Arc::new(InMemoryRoomRepository::new(
        Arc::new(Mutex::new(room)),
        clock.clone(),
    ));
    let sessions = Arc::new(InMemorySessionRepository::new(clock.clone()));

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new(Arc::new(Mutex::new(
        HashMap::new(),
    ))));

    // 3. Create UseCases
    let sequencer = RelaySequencer::new();
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(message_pusher.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        repository.clone(),
        sessions.clone(),
        message_pusher.clone(),
        sequencer.clone(),
    ));
    let create_category_usecase = Arc::new(CreateCategoryUseCase::new(
        repository.clone(),
        sessions.clone(),
        message_pusher.clone(),
        sequencer.clone(),
        clock.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        repository.clone(),
        sessions.clone(),
        message_pusher.clone(),
        sequencer.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(
        sessions.clone(),
        message_pusher.clone(),
        sequencer,
        clock,
    ));
    let get_room_state_usecase = Arc::new(GetRoomStateUseCase::new(repository, sessions));

    // 4. Create AppState
    Ok(AppState {
        connect_client_usecase,
        join_room_usecase,
        create_category_usecase,
        send_message_usecase,
        disconnect_client_usecase,
        get_room_state_usecase,
        message_pusher,
        limits: ConnectionLimits {
            outbound_buffer: config.outbound_buffer,
            max_attachment_bytes: config.max_attachment_bytes,
            max_frame_bytes: config.max_frame_bytes(),
        },
    })
}
