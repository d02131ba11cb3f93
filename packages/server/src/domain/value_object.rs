//! Value objects of the chat room.
//!
//! Every constructor validates its input, so a value that exists is a value
//! the relay accepts.

use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum nickname length in characters
pub const NICKNAME_MAX_CHARS: usize = 32;
/// Maximum category name length in characters
pub const CATEGORY_NAME_MAX_CHARS: usize = 64;
/// Maximum message body length in characters
pub const MESSAGE_TEXT_MAX_CHARS: usize = 10_000;

/// Identifier of one transport connection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(id: String) -> Result<Self, ValueObjectError> {
        if id.trim().is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(id))
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Display name chosen by a client when joining
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nickname(String);

impl Nickname {
    /// Surrounding whitespace is stripped before validation.
    pub fn new(nickname: String) -> Result<Self, ValueObjectError> {
        let trimmed = nickname.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyNickname);
        }
        if trimmed.chars().count() > NICKNAME_MAX_CHARS {
            return Err(ValueObjectError::NicknameTooLong {
                max: NICKNAME_MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Name of a category. Comparison is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyCategoryName);
        }
        if trimmed.chars().count() > CATEGORY_NAME_MAX_CHARS {
            return Err(ValueObjectError::CategoryNameTooLong {
                max: CATEGORY_NAME_MAX_CHARS,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Message body. May be empty when the message carries attachments.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(text: String) -> Result<Self, ValueObjectError> {
        if text.chars().count() > MESSAGE_TEXT_MAX_CHARS {
            return Err(ValueObjectError::MessageTextTooLong {
                max: MESSAGE_TEXT_MAX_CHARS,
            });
        }
        Ok(Self(text))
    }

    /// Whitespace-only text counts as empty.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Server-assigned message identifier: `<timestamp_ms>-<sequence>`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MessageId(String);

impl MessageId {
    pub fn compose(timestamp: Timestamp, sequence: u64) -> Self {
        Self(format!("{}-{}", timestamp.value(), sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Unix timestamp in milliseconds (UTC)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
