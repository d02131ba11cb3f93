//! Conversion logic between DTOs and domain entities.

use roomcast_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    Attachment, NotificationKind, RoomEvent, SessionRecord, StoredMessage, ValueObjectError,
};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain Entity
// ========================================

impl dto::AttachmentDto {
    /// Validate against the per-file byte limit.
    pub fn into_domain(self, max_bytes: usize) -> Result<Attachment, ValueObjectError> {
        Attachment::new(self.name, self.media_type, self.size, self.data, max_bytes)
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&Attachment> for dto::AttachmentDto {
    fn from(model: &Attachment) -> Self {
        Self {
            name: model.filename.clone(),
            media_type: model.media_type.clone(),
            size: model.size,
            data: model.content.clone(),
        }
    }
}

impl From<&StoredMessage> for dto::StoredMessageDto {
    fn from(model: &StoredMessage) -> Self {
        Self {
            id: model.id.as_str().to_string(),
            sequence: model.sequence,
            author: model.author.as_str().to_string(),
            text: model.text.as_str().to_string(),
            timestamp: model.timestamp.value(),
            category: model.category.as_str().to_string(),
            attachments: model.attachments.iter().map(Into::into).collect(),
            read: model.read,
        }
    }
}

impl From<&SessionRecord> for dto::SessionDto {
    fn from(model: &SessionRecord) -> Self {
        Self {
            connection_id: model.connection_id.as_str().to_string(),
            nickname: model.nickname.as_str().to_string(),
            joined_at: model.joined_at.value(),
        }
    }
}

impl From<&SessionRecord> for http::SessionDetailDto {
    fn from(model: &SessionRecord) -> Self {
        Self {
            connection_id: model.connection_id.as_str().to_string(),
            nickname: model.nickname.as_str().to_string(),
            joined_at: timestamp_to_rfc3339(model.joined_at.value()),
        }
    }
}

impl From<NotificationKind> for dto::NotificationKindDto {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::Info => Self::Info,
            NotificationKind::Success => Self::Success,
            NotificationKind::Error => Self::Error,
        }
    }
}

fn sessions_to_dto(sessions: &[SessionRecord]) -> Vec<dto::SessionDto> {
    sessions.iter().map(Into::into).collect()
}

/// Encode a room event as one JSON text frame.
pub fn encode_event(event: &RoomEvent) -> Result<String, serde_json::Error> {
    match event {
        RoomEvent::Snapshot { snapshot, sessions } => serde_json::to_string(&dto::SnapshotMessage {
            r#type: dto::MessageType::Snapshot,
            categories: snapshot
                .categories
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
            messages: snapshot.messages.iter().map(Into::into).collect(),
            sessions: sessions_to_dto(sessions),
        }),
        RoomEvent::UserJoined(session) => serde_json::to_string(&dto::UserPresenceMessage {
            r#type: dto::MessageType::UserJoined,
            connection_id: session.connection_id.as_str().to_string(),
            nickname: session.nickname.as_str().to_string(),
            timestamp: session.joined_at.value(),
        }),
        RoomEvent::UserLeft { session, left_at } => {
            serde_json::to_string(&dto::UserPresenceMessage {
                r#type: dto::MessageType::UserLeft,
                connection_id: session.connection_id.as_str().to_string(),
                nickname: session.nickname.as_str().to_string(),
                timestamp: left_at.value(),
            })
        }
        RoomEvent::CategoryCreated {
            name,
            creator,
            timestamp,
        } => serde_json::to_string(&dto::CategoryCreatedMessage {
            r#type: dto::MessageType::CategoryCreated,
            name: name.as_str().to_string(),
            creator: creator.as_str().to_string(),
            timestamp: timestamp.value(),
        }),
        RoomEvent::CategoryAck { name, created } => {
            serde_json::to_string(&dto::CategoryAckMessage {
                r#type: dto::MessageType::CategoryAck,
                name: name.as_str().to_string(),
                created: *created,
            })
        }
        RoomEvent::NewMessage(message) => serde_json::to_string(&dto::NewMessageMessage {
            r#type: dto::MessageType::NewMessage,
            message: message.into(),
        }),
        RoomEvent::SessionsUpdate(sessions) => {
            serde_json::to_string(&dto::SessionsUpdateMessage {
                r#type: dto::MessageType::SessionsUpdate,
                sessions: sessions_to_dto(sessions),
            })
        }
        RoomEvent::Notification { message, kind } => {
            serde_json::to_string(&dto::NotificationMessage {
                r#type: dto::MessageType::Notification,
                message: message.clone(),
                kind: (*kind).into(),
            })
        }
    }
}
