//! Domain layer: the room, its sessions and the events it emits.

pub mod connection;
pub mod entity;
pub mod error;
pub mod event;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod room;
pub mod value_object;

pub use connection::{ConnectionState, TransitionError};
pub use entity::{
    Attachment, MAX_ATTACHMENTS_PER_MESSAGE, NewMessage, RoomSnapshot, SessionRecord,
    StoredMessage, encoded_limit,
};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use event::{NotificationKind, RoomEvent};
pub use factory::ConnectionIdFactory;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{RoomRepository, SessionRepository};
pub use room::Room;
pub use value_object::{
    CategoryName, ConnectionId, MessageId, MessageText, Nickname, Timestamp,
};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
