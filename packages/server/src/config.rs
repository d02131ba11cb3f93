//! Relay-level settings.

use crate::domain::{MAX_ATTACHMENTS_PER_MESSAGE, encoded_limit};

pub const DEFAULT_CATEGORIES: [&str; 3] = ["Ogólne", "Praca", "Rozrywka"];
pub const DEFAULT_FALLBACK_CATEGORY: &str = "general";
pub const DEFAULT_OUTBOUND_BUFFER: usize = 256;
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// Headroom for the JSON envelope and message text on top of the attachments.
const FRAME_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Categories present at startup. Empty means the fallback category alone.
    pub initial_categories: Vec<String>,
    /// Used when a message arrives and the room has no categories.
    pub fallback_category: String,
    /// Outbound queue capacity per connection. Must be at least 1.
    pub outbound_buffer: usize,
    /// Per-file limit for attachments.
    pub max_attachment_bytes: usize,
    /// Origins allowed by CORS. Empty means any origin.
    pub allowed_origins: Vec<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            initial_categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            fallback_category: DEFAULT_FALLBACK_CATEGORY.to_string(),
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
            max_attachment_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
            allowed_origins: Vec::new(),
        }
    }
}

impl RelayConfig {
    /// Largest inbound frame: a message carrying the maximum number of
    /// maximum-size attachments.
    pub fn max_frame_bytes(&self) -> usize {
        encoded_limit(self.max_attachment_bytes)
            .saturating_mul(MAX_ATTACHMENTS_PER_MESSAGE)
            .saturating_add(FRAME_OVERHEAD_BYTES)
    }
}
