//! Identifier factories.

use uuid::Uuid;

use super::value_object::ConnectionId;

pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Random (v4) connection id
    pub fn generate() -> ConnectionId {
        ConnectionId::from_uuid(Uuid::new_v4())
    }
}
