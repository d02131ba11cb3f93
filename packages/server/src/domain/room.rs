//! Room aggregate: the category list and the message log.
//!
//! Both lists are append-only. The aggregate is pure; the caller supplies
//! the current time so that ordering rules can be tested without a clock.

use super::{
    entity::{NewMessage, RoomSnapshot, StoredMessage},
    value_object::{CategoryName, MessageId, Timestamp},
};

#[derive(Debug, Clone)]
pub struct Room {
    categories: Vec<CategoryName>,
    messages: Vec<StoredMessage>,
    /// Used when a message names no usable category and the list is empty
    fallback_category: CategoryName,
    next_sequence: u64,
    last_timestamp: Option<Timestamp>,
}

impl Room {
    /// Create a room seeded with `initial_categories`.
    ///
    /// Duplicates are dropped. An empty seed gets `fallback_category`, so the
    /// category list is never empty.
    pub fn new(initial_categories: Vec<CategoryName>, fallback_category: CategoryName) -> Self {
        let mut room = Self {
            categories: Vec::with_capacity(initial_categories.len()),
            messages: Vec::new(),
            fallback_category,
            next_sequence: 1,
            last_timestamp: None,
        };
        for name in initial_categories {
            room.add_category(name);
        }
        if room.categories.is_empty() {
            let fallback = room.fallback_category.clone();
            room.categories.push(fallback);
        }
        room
    }

    /// Append `name` unless an identical name exists. Returns whether it was added.
    pub fn add_category(&mut self, name: CategoryName) -> bool {
        if self.categories.contains(&name) {
            return false;
        }
        self.categories.push(name);
        true
    }

    /// Resolve a client-supplied category to one that exists.
    ///
    /// Unknown or missing names fall back to the first category.
    pub fn resolve_category(&self, requested: Option<&str>) -> CategoryName {
        requested
            .map(str::trim)
            .and_then(|name| self.categories.iter().find(|c| c.as_str() == name))
            .or_else(|| self.categories.first())
            .unwrap_or(&self.fallback_category)
            .clone()
    }

    /// Stamp and append a message.
    ///
    /// Timestamps never go backwards across the log, and the sequence makes
    /// ids unique even when several messages share a millisecond.
    pub fn append_message(&mut self, message: NewMessage, now: Timestamp) -> StoredMessage {
        let timestamp = match self.last_timestamp {
            Some(last) if last > now => last,
            _ => now,
        };
        let sequence = self.next_sequence;
        let category = self.resolve_category(message.requested_category.as_deref());

        let stored = StoredMessage {
            id: MessageId::compose(timestamp, sequence),
            sequence,
            author: message.author,
            text: message.text,
            timestamp,
            category,
            attachments: message.attachments,
            read: false,
        };

        self.next_sequence += 1;
        self.last_timestamp = Some(timestamp);
        self.messages.push(stored.clone());
        stored
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            categories: self.categories.clone(),
            messages: self.messages.clone(),
        }
    }

    pub fn categories(&self) -> &[CategoryName] {
        &self.categories
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}
