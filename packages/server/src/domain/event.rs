//! Events the relay sends to clients.

use super::{
    entity::{RoomSnapshot, SessionRecord, StoredMessage},
    value_object::{CategoryName, Nickname, Timestamp},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// Full state replay for a client that just joined
    Snapshot {
        snapshot: RoomSnapshot,
        sessions: Vec<SessionRecord>,
    },
    UserJoined(SessionRecord),
    UserLeft {
        session: SessionRecord,
        left_at: Timestamp,
    },
    CategoryCreated {
        name: CategoryName,
        creator: Nickname,
        timestamp: Timestamp,
    },
    /// Reply to the creator when nothing was created
    CategoryAck {
        name: CategoryName,
        created: bool,
    },
    NewMessage(StoredMessage),
    SessionsUpdate(Vec<SessionRecord>),
    Notification {
        message: String,
        kind: NotificationKind,
    },
}

impl RoomEvent {
    pub fn info(message: impl Into<String>) -> Self {
        Self::Notification {
            message: message.into(),
            kind: NotificationKind::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Notification {
            message: message.into(),
            kind: NotificationKind::Error,
        }
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Snapshot { .. } => "snapshot",
            Self::UserJoined(_) => "userJoined",
            Self::UserLeft { .. } => "userLeft",
            Self::CategoryCreated { .. } => "categoryCreated",
            Self::CategoryAck { .. } => "categoryAck",
            Self::NewMessage(_) => "newMessage",
            Self::SessionsUpdate(_) => "sessionsUpdate",
            Self::Notification { .. } => "notification",
        }
    }
}
