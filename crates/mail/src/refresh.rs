//! Inbox refresh pipeline
//!
//! One refresh enumerates the mail store, normalizes every record, and groups
//! the resulting messages into conversations. The result is an immutable
//! [`Inbox`] snapshot that the UI searches without touching the store again.

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use std::borrow::Cow;
use std::sync::Arc;

use crate::conversations::{filter, group};
use crate::models::ConversationGroup;
use crate::normalize::{Skip, normalize};
use crate::source::{MailSource, SourceError};

/// Statistics from one refresh
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshStats {
    /// Number of records the store returned
    pub enumerated: usize,
    /// Number of mail messages that were normalized
    pub normalized: usize,
    /// Number of calendar entries, contacts and other non-mail items
    pub skipped_non_mail: usize,
    /// Number of records that could not be classified
    pub unreadable: usize,
    /// Number of conversations that could not be built
    pub dropped_groups: usize,
    /// Duration of the refresh
    pub duration_ms: u64,
}

/// Grouped snapshot of the inbox
#[derive(Debug, Clone)]
pub struct Inbox {
    /// Conversations, most recently active first
    pub conversations: Vec<ConversationGroup>,
    pub stats: RefreshStats,
    pub refreshed_at: DateTime<Utc>,
}

impl Inbox {
    /// Total number of messages across all conversations
    pub fn total_messages(&self) -> usize {
        self.conversations.iter().map(|c| c.message_count()).sum()
    }

    pub fn conversation_count(&self) -> usize {
        self.conversations.len()
    }

    /// Number of conversations with at least one unread message
    pub fn unread_conversations(&self) -> usize {
        self.conversations.iter().filter(|c| c.has_unread()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    /// Conversations matching `query`; see [`filter`]
    pub fn search(&self, query: &str) -> Cow<'_, [ConversationGroup]> {
        filter(&self.conversations, query)
    }
}

/// Enumerate, normalize and group the inbox of `source`.
///
/// Individual unreadable items are skipped and counted in [`RefreshStats`];
/// only a failure to enumerate the store is returned as an error, in which
/// case no partial inbox is produced.
pub fn refresh_inbox(source: &dyn MailSource) -> Result<Inbox, SourceError> {
    let start = std::time::Instant::now();
    info!("Refreshing inbox from {}", source.name());

    let records = source.enumerate().map_err(|e| {
        error!("Failed to enumerate {}: {}", source.name(), e);
        e
    })?;

    let mut stats = RefreshStats {
        enumerated: records.len(),
        ..RefreshStats::default()
    };
    debug!("Enumerated {} item(s)", stats.enumerated);

    let mut messages = Vec::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let ordinal = i + 1;
        match normalize(record.as_ref(), ordinal) {
            Ok(message) => messages.push(message),
            Err(Skip::NotMail(kind)) => {
                debug!("Item {}: skipping {} item", ordinal, kind);
                stats.skipped_non_mail += 1;
            }
            Err(Skip::Unreadable(e)) => {
                warn!("Item {}: skipping, {}", ordinal, e);
                stats.unreadable += 1;
            }
        }
    }
    stats.normalized = messages.len();
    info!(
        "Processed {}/{} item(s) as mail",
        stats.normalized, stats.enumerated
    );

    let grouping = group(messages);
    stats.dropped_groups = grouping.dropped;
    stats.duration_ms = start.elapsed().as_millis() as u64;

    info!(
        "Refresh complete: {} conversation(s), {} message(s) in {}ms",
        grouping.conversations.len(),
        grouping.total_messages(),
        stats.duration_ms
    );

    Ok(Inbox {
        conversations: grouping.conversations,
        stats,
        refreshed_at: Utc::now(),
    })
}

/// Latest successful inbox plus the outcome of the most recent refresh
#[derive(Debug, Clone, Default)]
pub struct InboxState {
    inbox: Option<Arc<Inbox>>,
    last_error: Option<String>,
}

impl InboxState {
    /// Record the outcome of a refresh.
    ///
    /// A failed refresh keeps the previous inbox so that a store that could
    /// not be read is never shown as an empty inbox.
    pub fn apply(&mut self, result: Result<Inbox, SourceError>) {
        match result {
            Ok(inbox) => {
                self.inbox = Some(Arc::new(inbox));
                self.last_error = None;
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn inbox(&self) -> Option<&Arc<Inbox>> {
        self.inbox.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// True once any refresh has succeeded
    pub fn has_loaded(&self) -> bool {
        self.inbox.is_some()
    }
}
