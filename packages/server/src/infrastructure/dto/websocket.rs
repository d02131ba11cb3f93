//! WebSocket event DTOs.
//!
//! Every frame is a JSON object with a camelCase `type` discriminator.

use serde::{Deserialize, Serialize};

/// Outbound event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageType {
    Snapshot,
    UserJoined,
    UserLeft,
    CategoryCreated,
    CategoryAck,
    NewMessage,
    SessionsUpdate,
    Notification,
}

/// Client-to-server events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum IncomingMessage {
    Join {
        nickname: String,
    },
    CreateCategory {
        name: String,
    },
    SendMessage {
        #[serde(default)]
        text: String,
        #[serde(default)]
        category: Option<String>,
        #[serde(default)]
        attachments: Vec<AttachmentDto>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentDto {
    pub name: String,
    #[serde(rename = "type", default)]
    pub media_type: String,
    pub size: u64,
    /// Inlined content, usually a data URL
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMessageDto {
    pub id: String,
    pub sequence: u64,
    pub author: String,
    pub text: String,
    pub timestamp: i64,
    pub category: String,
    pub attachments: Vec<AttachmentDto>,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub connection_id: String,
    pub nickname: String,
    pub joined_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMessage {
    pub r#type: MessageType,
    pub categories: Vec<String>,
    pub messages: Vec<StoredMessageDto>,
    pub sessions: Vec<SessionDto>,
}

/// `userJoined` and `userLeft`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPresenceMessage {
    pub r#type: MessageType,
    pub connection_id: String,
    pub nickname: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreatedMessage {
    pub r#type: MessageType,
    pub name: String,
    pub creator: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAckMessage {
    pub r#type: MessageType,
    pub name: String,
    pub created: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMessageMessage {
    pub r#type: MessageType,
    #[serde(flatten)]
    pub message: StoredMessageDto,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsUpdateMessage {
    pub r#type: MessageType,
    pub sessions: Vec<SessionDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKindDto {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationMessage {
    pub r#type: MessageType,
    pub message: String,
    pub kind: NotificationKindDto,
}
