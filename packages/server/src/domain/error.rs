//! Domain errors.

use thiserror::Error;

/// Validation failures raised while building value objects and entities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("connection id must not be empty")]
    EmptyConnectionId,

    #[error("nickname is required")]
    EmptyNickname,

    #[error("nickname must be at most {max} characters")]
    NicknameTooLong { max: usize },

    #[error("category name is required")]
    EmptyCategoryName,

    #[error("category name must be at most {max} characters")]
    CategoryNameTooLong { max: usize },

    #[error("message text must be at most {max} characters")]
    MessageTextTooLong { max: usize },

    #[error("message needs text or at least one attachment")]
    EmptyMessage,

    #[error("a message can carry at most {max} attachments")]
    TooManyAttachments { max: usize },

    #[error("attachment file name is required")]
    EmptyAttachmentName,

    #[error("attachment '{filename}' exceeds the limit of {max} bytes")]
    AttachmentTooLarge { filename: String, max: usize },
}

/// Repository errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("connection '{0}' already has a session")]
    DuplicateConnection(String),
}

/// Errors raised while pushing events to connected clients
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' is not connected")]
    ClientNotFound(String),

    #[error("outbound queue of client '{0}' is full")]
    QueueFull(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
