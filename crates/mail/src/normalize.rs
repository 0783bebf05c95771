//! Raw record normalization
//!
//! Converts a [`RawMessage`] from any mail store adapter into a
//! [`NormalizedMessage`] with a safe default for every property.

use log::warn;

use crate::models::{FieldError, ItemKind, NormalizedMessage, RawMessage, ThreadKey};

/// Prefix of thread keys synthesized for messages without thread metadata
pub const FALLBACK_KEY_PREFIX: &str = "single_";

/// Why a raw record produced no message
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Skip {
    /// The record is not a mail item (calendar entry, contact, ...)
    #[error("not a mail item ({0})")]
    NotMail(ItemKind),
    /// The record could not be classified
    #[error("unreadable record: {0}")]
    Unreadable(FieldError),
}

/// Normalize one raw record.
///
/// `ordinal` is the 1-based position of the record in the enumeration and is
/// only used to synthesize a fallback thread key.
pub fn normalize(raw: &dyn RawMessage, ordinal: usize) -> Result<NormalizedMessage, Skip> {
    match raw.kind() {
        Ok(ItemKind::Mail) => {}
        Ok(kind) => return Err(Skip::NotMail(kind)),
        Err(e) => return Err(Skip::Unreadable(e)),
    }

    let subject = text_or_default(raw.subject(), ordinal);
    let sender_name = text_or_default(raw.sender_name(), ordinal);
    let sender_address = text_or_default(raw.sender_address(), ordinal);
    let received_at = or_default(raw.received_at(), ordinal);
    let unread = or_default(raw.unread(), ordinal).unwrap_or(false);

    let thread_key = resolve_thread_key(
        text_or_default(raw.thread_key(), ordinal),
        text_or_default(raw.stable_id(), ordinal),
        ordinal,
    );

    // The builder substitutes placeholders for empty subject and sender
    Ok(NormalizedMessage::builder(thread_key, ordinal)
        .subject(subject)
        .sender_name(sender_name)
        .sender_address(sender_address)
        .received_at(received_at)
        .unread(unread)
        .build())
}

/// Pick the native thread key, or synthesize one unique to this message
fn resolve_thread_key(native: String, stable_id: String, ordinal: usize) -> ThreadKey {
    if !native.is_empty() {
        ThreadKey::new(native)
    } else if !stable_id.is_empty() {
        ThreadKey::new(format!("{FALLBACK_KEY_PREFIX}{stable_id}"))
    } else {
        ThreadKey::new(format!("{FALLBACK_KEY_PREFIX}{ordinal}"))
    }
}

fn or_default<T>(value: Result<Option<T>, FieldError>, ordinal: usize) -> Option<T> {
    match value {
        Ok(value) => value,
        Err(e) => {
            warn!("Message {}: {}, using default", ordinal, e);
            None
        }
    }
}

fn text_or_default(value: Result<Option<String>, FieldError>, ordinal: usize) -> String {
    or_default(value, ordinal).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NO_SUBJECT, UNKNOWN_SENDER};
    use crate::source::MemoryRecord;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_normalize_complete_record() {
        let received = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap();
        let record = MemoryRecord::mail()
            .subject("Quarterly report")
            .thread_key("conv-1")
            .received_at(received)
            .sender("Grace Hopper", "grace@example.com")
            .unread(true)
            .stable_id("E1");

        let msg = normalize(&record, 1).unwrap();
        assert_eq!(msg.subject, "Quarterly report");
        assert_eq!(msg.thread_key.as_str(), "conv-1");
        assert_eq!(msg.received_at, Some(received));
        assert_eq!(msg.sender_name, "Grace Hopper");
        assert_eq!(msg.sender_address, "grace@example.com");
        assert!(msg.unread);
        assert_eq!(msg.ordinal, 1);
    }

    #[test]
    fn test_normalize_defaults() {
        let msg = normalize(&MemoryRecord::mail(), 7).unwrap();
        assert_eq!(msg.subject, NO_SUBJECT);
        assert_eq!(msg.sender_name, UNKNOWN_SENDER);
        assert_eq!(msg.sender_address, "");
        assert_eq!(msg.received_at, None);
        assert!(!msg.unread);
        assert_eq!(msg.thread_key.as_str(), "single_7");
    }

    #[test]
    fn test_empty_subject_uses_placeholder() {
        let msg = normalize(&MemoryRecord::mail().subject(""), 1).unwrap();
        assert_eq!(msg.subject, NO_SUBJECT);
    }

    #[test]
    fn test_fallback_key_uses_stable_id() {
        let msg = normalize(&MemoryRecord::mail().stable_id("X9"), 3).unwrap();
        assert_eq!(msg.thread_key.as_str(), "single_X9");
    }

    #[test]
    fn test_empty_thread_key_falls_back() {
        let msg = normalize(&MemoryRecord::mail().thread_key("").stable_id("X9"), 3).unwrap();
        assert_eq!(msg.thread_key.as_str(), "single_X9");

        let msg = normalize(&MemoryRecord::mail().thread_key("").stable_id(""), 3).unwrap();
        assert_eq!(msg.thread_key.as_str(), "single_3");
    }

    #[test]
    fn test_non_mail_is_skipped() {
        let record = MemoryRecord::of_kind(ItemKind::Calendar).subject("Standup");
        assert_eq!(normalize(&record, 1), Err(Skip::NotMail(ItemKind::Calendar)));
    }

    #[test]
    fn test_unclassifiable_record_is_skipped() {
        let record = MemoryRecord::mail().subject("Hello").broken("kind");
        assert!(matches!(normalize(&record, 1), Err(Skip::Unreadable(_))));
    }

    #[test]
    fn test_broken_fields_take_defaults() {
        let received = Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap();
        let record = MemoryRecord::mail()
            .subject("Still here")
            .thread_key("conv-1")
            .received_at(received)
            .sender("Grace Hopper", "grace@example.com")
            .unread(true)
            .broken("received_at")
            .broken("sender_name")
            .broken("unread");

        let msg = normalize(&record, 1).unwrap();
        assert_eq!(msg.subject, "Still here");
        assert_eq!(msg.thread_key.as_str(), "conv-1");
        assert_eq!(msg.received_at, None);
        assert_eq!(msg.sender_name, UNKNOWN_SENDER);
        assert_eq!(msg.sender_address, "grace@example.com");
        assert!(!msg.unread);
    }

    #[test]
    fn test_broken_stable_id_falls_back_to_ordinal() {
        let record = MemoryRecord::mail().stable_id("E1").broken("stable_id");
        let msg = normalize(&record, 4).unwrap();
        assert_eq!(msg.thread_key.as_str(), "single_4");
    }
}
