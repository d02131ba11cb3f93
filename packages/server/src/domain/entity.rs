//! Entities owned by the room.

use super::{
    error::ValueObjectError,
    value_object::{CategoryName, ConnectionId, MessageId, MessageText, Nickname, Timestamp},
};

/// Maximum number of attachments on one message
pub const MAX_ATTACHMENTS_PER_MESSAGE: usize = 10;

/// Room for the `data:<type>;base64,` prefix on inlined content
const DATA_URL_PREFIX_ALLOWANCE: usize = 256;

/// File carried inline inside a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub media_type: String,
    /// Declared size of the original file in bytes
    pub size: u64,
    /// Encoded payload (usually a data URL)
    pub content: String,
}

impl Attachment {
    /// Validate an attachment against the per-file byte limit.
    ///
    /// Both the declared size and the encoded content are checked; the
    /// content may exceed `max_bytes` by its base64 overhead only.
    pub fn new(
        filename: String,
        media_type: String,
        size: u64,
        content: String,
        max_bytes: usize,
    ) -> Result<Self, ValueObjectError> {
        let filename = filename.trim().to_string();
        if filename.is_empty() {
            return Err(ValueObjectError::EmptyAttachmentName);
        }
        let declared_too_large = usize::try_from(size).map_or(true, |size| size > max_bytes);
        if declared_too_large || content.len() > encoded_limit(max_bytes) {
            return Err(ValueObjectError::AttachmentTooLarge {
                filename,
                max: max_bytes,
            });
        }
        Ok(Self {
            filename,
            media_type,
            size,
            content,
        })
    }
}

/// Upper bound for the inlined (base64 data URL) form of a `max_bytes` file.
pub fn encoded_limit(max_bytes: usize) -> usize {
    max_bytes
        .div_ceil(3)
        .saturating_mul(4)
        .saturating_add(DATA_URL_PREFIX_ALLOWANCE)
}

/// A message as submitted by a joined session, before the store stamps it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub author: Nickname,
    pub text: MessageText,
    /// Category named by the client; substituted when it does not exist
    pub requested_category: Option<String>,
    pub attachments: Vec<Attachment>,
}

impl NewMessage {
    pub fn new(
        author: Nickname,
        text: MessageText,
        requested_category: Option<String>,
        attachments: Vec<Attachment>,
    ) -> Result<Self, ValueObjectError> {
        if text.is_blank() && attachments.is_empty() {
            return Err(ValueObjectError::EmptyMessage);
        }
        if attachments.len() > MAX_ATTACHMENTS_PER_MESSAGE {
            return Err(ValueObjectError::TooManyAttachments {
                max: MAX_ATTACHMENTS_PER_MESSAGE,
            });
        }
        Ok(Self {
            author,
            text,
            requested_category,
            attachments,
        })
    }
}

/// A message in the room log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub id: MessageId,
    /// Position in the log, starting at 1
    pub sequence: u64,
    pub author: Nickname,
    pub text: MessageText,
    pub timestamp: Timestamp,
    pub category: CategoryName,
    pub attachments: Vec<Attachment>,
    /// Shared per message, not tracked per recipient
    pub read: bool,
}

/// A joined connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub connection_id: ConnectionId,
    pub nickname: Nickname,
    pub joined_at: Timestamp,
}

impl SessionRecord {
    pub fn new(connection_id: ConnectionId, nickname: Nickname, joined_at: Timestamp) -> Self {
        Self {
            connection_id,
            nickname,
            joined_at,
        }
    }
}

/// Categories and message log in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RoomSnapshot {
    pub categories: Vec<CategoryName>,
    pub messages: Vec<StoredMessage>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nickname(name: &str) -> Nickname {
        Nickname::new(name.to_string()).unwrap()
    }

    fn text(body: &str) -> MessageText {
        MessageText::new(body.to_string()).unwrap()
    }

    fn attachment(name: &str) -> Attachment {
        Attachment::new(
            name.to_string(),
            "text/plain".to_string(),
            5,
            "data:text/plain;base64,aGVsbG8=".to_string(),
            1024,
        )
        .unwrap()
    }

    #[test]
    fn test_attachment_requires_file_name() {
        // テスト項目: ファイル名のない添付ファイルは拒否される
        // given (前提条件):
        let filename = "  ".to_string();

        // when (操作):
        let result = Attachment::new(
            filename,
            "image/png".to_string(),
            10,
            "data:".to_string(),
            1024,
        );

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyAttachmentName));
    }

    #[test]
    fn test_attachment_rejects_declared_size_over_limit() {
        // テスト項目: 宣言サイズが上限を超える添付ファイルは拒否される
        // given (前提条件):
        let max_bytes = 100;

        // when (操作):
        let result = Attachment::new(
            "big.bin".to_string(),
            "application/octet-stream".to_string(),
            101,
            String::new(),
            max_bytes,
        );

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ValueObjectError::AttachmentTooLarge { max: 100, .. })
        ));
    }

    #[test]
    fn test_attachment_rejects_oversized_content() {
        // テスト項目: 宣言サイズが小さくても、実データが大きすぎれば拒否される
        // given (前提条件):
        let max_bytes = 30;
        let content = "A".repeat(encoded_limit(max_bytes) + 1);

        // when (操作):
        let result = Attachment::new(
            "liar.txt".to_string(),
            "text/plain".to_string(),
            1,
            content,
            max_bytes,
        );

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(ValueObjectError::AttachmentTooLarge { .. })
        ));
    }

    #[test]
    fn test_new_message_requires_text_or_attachment() {
        // テスト項目: 本文も添付ファイルもないメッセージは拒否される
        // given (前提条件):
        let author = nickname("Alice");

        // when (操作):
        let result = NewMessage::new(author, text("   "), None, vec![]);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyMessage));
    }

    #[test]
    fn test_new_message_with_only_attachment_is_accepted() {
        // テスト項目: 本文が空でも添付ファイルがあれば受け付けられる
        // given (前提条件):
        let author = nickname("Alice");

        // when (操作):
        let result = NewMessage::new(author, text(""), None, vec![attachment("a.txt")]);

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[test]
    fn test_new_message_limits_attachment_count() {
        // テスト項目: 添付ファイル数が上限を超えると拒否される
        // given (前提条件):
        let attachments = (0..=MAX_ATTACHMENTS_PER_MESSAGE)
            .map(|i| attachment(&format!("{i}.txt")))
            .collect();

        // when (操作):
        let result = NewMessage::new(nickname("Alice"), text("hi"), None, attachments);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::TooManyAttachments {
                max: MAX_ATTACHMENTS_PER_MESSAGE
            })
        );
    }
}
