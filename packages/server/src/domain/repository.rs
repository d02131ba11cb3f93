//! Repository traits.
//!
//! The domain owns these interfaces; the infrastructure layer implements
//! them. Use cases depend on the traits only.

use async_trait::async_trait;

use super::{
    entity::{NewMessage, RoomSnapshot, SessionRecord, StoredMessage},
    error::RepositoryError,
    value_object::{CategoryName, ConnectionId, Nickname},
};

/// Room State Store: categories and message log
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Append a category unless it already exists. Returns whether it was added.
    async fn add_category(&self, name: CategoryName) -> bool;

    /// Stamp (id, sequence, timestamp, category) and append a message.
    async fn append_message(&self, message: NewMessage) -> StoredMessage;

    /// Current categories and full message log, in insertion order
    async fn snapshot(&self) -> RoomSnapshot;

    async fn categories(&self) -> Vec<CategoryName>;

    async fn message_count(&self) -> usize;
}

/// Session Registry: joined connections in join order
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Bind a nickname to a connection.
    ///
    /// Fails with `DuplicateConnection` when the connection already joined.
    async fn register(
        &self,
        connection_id: ConnectionId,
        nickname: Nickname,
    ) -> Result<SessionRecord, RepositoryError>;

    /// Remove a session. Unknown connections yield `None`.
    async fn unregister(&self, connection_id: &ConnectionId) -> Option<SessionRecord>;

    async fn get(&self, connection_id: &ConnectionId) -> Option<SessionRecord>;

    async fn list(&self) -> Vec<SessionRecord>;

    async fn connection_ids(&self) -> Vec<ConnectionId> {
        self.list()
            .await
            .into_iter()
            .map(|session| session.connection_id)
            .collect()
    }
}
