//! Normalized message model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Subject used when a message has none
pub const NO_SUBJECT: &str = "(No Subject)";

/// Sender name used when a message has none
pub const UNKNOWN_SENDER: &str = "Unknown";

/// Key that assigns a message to exactly one conversation
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ThreadKey(pub String);

impl ThreadKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ThreadKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ThreadKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for ThreadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A mail item with every field resolved to a usable value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMessage {
    /// Subject line, never empty
    pub subject: String,
    /// Conversation this message belongs to
    pub thread_key: ThreadKey,
    /// When the message was received; `None` sorts before every timestamp
    pub received_at: Option<DateTime<Utc>>,
    /// Sender display name, never empty
    pub sender_name: String,
    /// Sender email address, possibly empty
    pub sender_address: String,
    pub unread: bool,
    /// 1-based position of the record in the source enumeration
    pub ordinal: usize,
}

impl NormalizedMessage {
    /// Create a new message builder
    pub fn builder(thread_key: impl Into<ThreadKey>, ordinal: usize) -> MessageBuilder {
        MessageBuilder::new(thread_key.into(), ordinal)
    }
}

/// Builder for [`NormalizedMessage`], starting from the documented defaults
pub struct MessageBuilder {
    message: NormalizedMessage,
}

impl MessageBuilder {
    fn new(thread_key: ThreadKey, ordinal: usize) -> Self {
        Self {
            message: NormalizedMessage {
                subject: NO_SUBJECT.to_string(),
                thread_key,
                received_at: None,
                sender_name: UNKNOWN_SENDER.to_string(),
                sender_address: String::new(),
                unread: false,
                ordinal,
            },
        }
    }

    /// Set the subject; an empty subject keeps the placeholder
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        let subject = subject.into();
        if !subject.is_empty() {
            self.message.subject = subject;
        }
        self
    }

    pub fn received_at(mut self, received_at: Option<DateTime<Utc>>) -> Self {
        self.message.received_at = received_at;
        self
    }

    /// Set the sender name; an empty name keeps the placeholder
    pub fn sender_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.message.sender_name = name;
        }
        self
    }

    pub fn sender_address(mut self, address: impl Into<String>) -> Self {
        self.message.sender_address = address.into();
        self
    }

    pub fn unread(mut self, unread: bool) -> Self {
        self.message.unread = unread;
        self
    }

    pub fn build(self) -> NormalizedMessage {
        self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let msg = NormalizedMessage::builder("t1", 1).build();
        assert_eq!(msg.subject, NO_SUBJECT);
        assert_eq!(msg.sender_name, UNKNOWN_SENDER);
        assert_eq!(msg.sender_address, "");
        assert_eq!(msg.received_at, None);
        assert!(!msg.unread);
        assert_eq!(msg.thread_key.as_str(), "t1");
    }

    #[test]
    fn test_builder_ignores_empty_text() {
        let msg = NormalizedMessage::builder("t1", 1)
            .subject("")
            .sender_name("")
            .build();
        assert_eq!(msg.subject, NO_SUBJECT);
        assert_eq!(msg.sender_name, UNKNOWN_SENDER);
    }
}
