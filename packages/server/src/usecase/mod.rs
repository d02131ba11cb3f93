//! UseCase 層: プロトコルの各操作を1つずつ実装する

mod connect_client;
mod create_category;
mod disconnect_client;
mod error;
mod get_room_state;
mod join_room;
mod send_message;
mod sequencer;

#[cfg(test)]
mod test_support;

pub use connect_client::ConnectClientUseCase;
pub use create_category::CreateCategoryUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{CreateCategoryError, JoinError, SendMessageError};
pub use get_room_state::{GetRoomStateUseCase, RoomOverview};
pub use join_room::JoinRoomUseCase;
pub use send_message::SendMessageUseCase;
pub use sequencer::RelaySequencer;

use crate::domain::{ConnectionId, MessagePusher, RoomEvent, SessionRecord};

/// Push to one connection; failures only affect that connection.
async fn push_or_warn(pusher: &dyn MessagePusher, target: &ConnectionId, event: &RoomEvent) {
    if let Err(e) = pusher.push_to(target, event).await {
        tracing::warn!(
            "Failed to push {} to '{}': {}",
            event.name(),
            target.as_str(),
            e
        );
    }
}

async fn broadcast_or_warn(pusher: &dyn MessagePusher, targets: Vec<ConnectionId>, event: &RoomEvent) {
    if let Err(e) = pusher.broadcast(targets, event).await {
        tracing::warn!("Failed to broadcast {}: {}", event.name(), e);
    }
}

fn connection_ids(sessions: &[SessionRecord]) -> Vec<ConnectionId> {
    sessions.iter().map(|s| s.connection_id.clone()).collect()
}
