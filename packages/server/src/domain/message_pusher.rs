//! MessagePusher trait: delivery of room events to connections.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, event::RoomEvent, value_object::ConnectionId};

/// Outbound queue of one connection (encoded frames)
pub type PusherChannel = mpsc::Sender<String>;

/// Delivers events to connected clients.
///
/// Implementations must never wait on a slow peer: a push either enqueues
/// immediately or fails for that peer alone.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// Send to one connection.
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;

    /// Send to every target. Per-target failures are logged, not returned.
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        event: &RoomEvent,
    ) -> Result<(), MessagePushError>;
}
