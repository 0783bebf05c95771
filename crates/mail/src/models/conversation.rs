//! Conversation model: one thread key and its messages

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{NormalizedMessage, ThreadKey};

/// Reason a bucket of messages could not become a conversation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GroupError {
    #[error("conversation `{0}` has no messages")]
    Empty(ThreadKey),
    #[error("conversation `{expected}` contains a message keyed `{found}`")]
    MixedKeys { expected: ThreadKey, found: ThreadKey },
}

/// A conversation: messages sharing a thread key plus their aggregate state
///
/// Fields are private so the aggregates always agree with `messages`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversationGroup {
    thread_key: ThreadKey,
    /// Chronological, oldest first; untimed messages first
    messages: Vec<NormalizedMessage>,
    message_count: usize,
    has_unread: bool,
    /// Subject of the first message in arrival order
    subject: String,
    latest_at: DateTime<Utc>,
}

impl ConversationGroup {
    /// `latest_at` of a conversation in which no message has a timestamp
    pub const NO_TIMESTAMP: DateTime<Utc> = DateTime::<Utc>::MIN_UTC;

    /// Build a conversation from messages in arrival order.
    pub fn from_bucket(
        thread_key: ThreadKey,
        mut messages: Vec<NormalizedMessage>,
    ) -> Result<Self, GroupError> {
        let Some(first) = messages.first() else {
            return Err(GroupError::Empty(thread_key));
        };

        if let Some(stray) = messages.iter().find(|m| m.thread_key != thread_key) {
            return Err(GroupError::MixedKeys {
                expected: thread_key,
                found: stray.thread_key.clone(),
            });
        }

        // Taken before sorting: the first arrival names the conversation
        let subject = first.subject.clone();

        // Stable; `None < Some(_)` puts untimed messages first
        messages.sort_by_key(|m| m.received_at);

        let latest_at = messages
            .iter()
            .filter_map(|m| m.received_at)
            .max()
            .unwrap_or(Self::NO_TIMESTAMP);
        let has_unread = messages.iter().any(|m| m.unread);

        Ok(Self {
            thread_key,
            message_count: messages.len(),
            messages,
            has_unread,
            subject,
            latest_at,
        })
    }

    pub fn thread_key(&self) -> &ThreadKey {
        &self.thread_key
    }

    /// Messages ordered oldest first
    pub fn messages(&self) -> &[NormalizedMessage] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.message_count
    }

    pub fn has_unread(&self) -> bool {
        self.has_unread
    }

    /// Representative subject
    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn latest_at(&self) -> DateTime<Utc> {
        self.latest_at
    }

    /// Whether any message in the conversation carries a timestamp
    pub fn has_timestamp(&self) -> bool {
        self.latest_at != Self::NO_TIMESTAMP
    }

    pub fn is_multi(&self) -> bool {
        self.message_count > 1
    }

    /// The `n` most recent messages, still oldest first
    pub fn recent(&self, n: usize) -> &[NormalizedMessage] {
        &self.messages[self.messages.len().saturating_sub(n)..]
    }

    /// Number of messages not included in [`recent`](Self::recent)`(n)`
    pub fn hidden_count(&self, n: usize) -> usize {
        self.message_count.saturating_sub(n)
    }
}
