//! Substring search over grouped conversations

use log::debug;
use std::borrow::Cow;

use crate::models::ConversationGroup;

/// Filter conversations by subject or sender name.
///
/// Matching is a case-insensitive substring test against the representative
/// subject, then against each message's sender name. An empty or
/// whitespace-only query returns `groups` itself. Relative order is kept.
pub fn filter<'a>(groups: &'a [ConversationGroup], query: &str) -> Cow<'a, [ConversationGroup]> {
    let needle = query.trim();
    if needle.is_empty() {
        return Cow::Borrowed(groups);
    }

    let needle = needle.to_lowercase();
    let matched: Vec<ConversationGroup> = groups
        .iter()
        .filter(|group| is_match(group, &needle))
        .cloned()
        .collect();

    debug!(
        "Query '{}' matched {}/{} conversation(s)",
        needle,
        matched.len(),
        groups.len()
    );
    Cow::Owned(matched)
}

fn is_match(group: &ConversationGroup, needle: &str) -> bool {
    group.subject().to_lowercase().contains(needle)
        || group
            .messages()
            .iter()
            .any(|m| m.sender_name.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NormalizedMessage, ThreadKey};
    use chrono::{TimeZone, Utc};

    fn conversation(key: &str, subject: &str, senders: &[&str]) -> ConversationGroup {
        let messages = senders
            .iter()
            .enumerate()
            .map(|(i, sender)| {
                NormalizedMessage::builder(key, i + 1)
                    .subject(subject)
                    .sender_name(*sender)
                    .received_at(Some(Utc.with_ymd_and_hms(2024, 1, 1, i as u32, 0, 0).unwrap()))
                    .build()
            })
            .collect();
        ConversationGroup::from_bucket(ThreadKey::new(key), messages).unwrap()
    }

    fn sample() -> Vec<ConversationGroup> {
        vec![
            conversation("c1", "Re: ACME contract", &["Legal Team"]),
            conversation("c2", "Lunch on Friday", &["Alice", "Bob Acmeson"]),
            conversation("c3", "Server outage", &["Ops"]),
        ]
    }

    fn keys(groups: &[ConversationGroup]) -> Vec<&str> {
        groups.iter().map(|g| g.thread_key().as_str()).collect()
    }

    #[test]
    fn test_empty_query_is_identity() {
        let groups = sample();
        let result = filter(&groups, "");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(&*result, groups.as_slice());
    }

    #[test]
    fn test_whitespace_query_is_identity() {
        let groups = sample();
        let result = filter(&groups, "  \t ");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(keys(&result), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn test_subject_match_is_case_insensitive() {
        let groups = vec![conversation("c1", "Re: ACME contract", &["Legal Team"])];
        let result = filter(&groups, "acme");
        assert_eq!(keys(&result), vec!["c1"]);
    }

    #[test]
    fn test_sender_match() {
        let groups = sample();
        let result = filter(&groups, "bob");
        assert_eq!(keys(&result), vec!["c2"]);
    }

    #[test]
    fn test_subject_and_sender_matches_keep_order() {
        let groups = sample();
        // c1 matches by subject, c2 by a sender name
        let result = filter(&groups, "ACME");
        assert_eq!(keys(&result), vec!["c1", "c2"]);
    }

    #[test]
    fn test_query_is_trimmed() {
        let groups = sample();
        let result = filter(&groups, "  outage ");
        assert_eq!(keys(&result), vec!["c3"]);
    }

    #[test]
    fn test_no_match() {
        let groups = sample();
        assert!(filter(&groups, "invoice").is_empty());
    }

    #[test]
    fn test_sender_address_is_not_searched() {
        let message = NormalizedMessage::builder("c1", 1)
            .subject("Hello")
            .sender_name("Ada")
            .sender_address("ada@acme.example")
            .build();
        let groups =
            vec![ConversationGroup::from_bucket(ThreadKey::new("c1"), vec![message]).unwrap()];
        assert!(filter(&groups, "acme").is_empty());
    }
}
