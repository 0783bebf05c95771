//! Conversation grouping

use log::{debug, info, warn};
use std::collections::HashMap;

use crate::models::{ConversationGroup, NormalizedMessage, ThreadKey};

/// Result of grouping a batch of messages
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    /// Conversations, most recently active first
    pub conversations: Vec<ConversationGroup>,
    /// Number of buckets that could not be turned into a conversation
    pub dropped: usize,
}

impl Grouping {
    /// Total number of messages across all conversations
    pub fn total_messages(&self) -> usize {
        self.conversations.iter().map(|c| c.message_count()).sum()
    }
}

/// Group messages into conversations.
///
/// Messages sharing a thread key form one conversation. Within a
/// conversation messages are ordered oldest first; conversations are ordered
/// by their latest message, newest first. Ties keep the order in which each
/// thread key first appeared in `messages`.
pub fn group(messages: Vec<NormalizedMessage>) -> Grouping {
    let buckets = partition(messages);
    debug!("Partitioned messages into {} bucket(s)", buckets.len());

    let mut grouping = Grouping::default();
    for (thread_key, bucket) in buckets {
        match ConversationGroup::from_bucket(thread_key, bucket) {
            Ok(conversation) => grouping.conversations.push(conversation),
            Err(e) => {
                warn!("Dropping conversation: {}", e);
                grouping.dropped += 1;
            }
        }
    }

    // Stable: equal timestamps keep bucket creation order
    grouping
        .conversations
        .sort_by(|a, b| b.latest_at().cmp(&a.latest_at()));

    info!(
        "Grouped {} message(s) into {} conversation(s) ({} dropped)",
        grouping.total_messages(),
        grouping.conversations.len(),
        grouping.dropped
    );

    grouping
}

/// Split messages by thread key, keeping first-appearance order of keys and
/// arrival order within each bucket
fn partition(messages: Vec<NormalizedMessage>) -> Vec<(ThreadKey, Vec<NormalizedMessage>)> {
    let mut index: HashMap<ThreadKey, usize> = HashMap::new();
    let mut buckets: Vec<(ThreadKey, Vec<NormalizedMessage>)> = Vec::new();

    for message in messages {
        match index.get(&message.thread_key) {
            Some(&slot) => buckets[slot].1.push(message),
            None => {
                index.insert(message.thread_key.clone(), buckets.len());
                buckets.push((message.thread_key.clone(), vec![message]));
            }
        }
    }

    buckets
}
