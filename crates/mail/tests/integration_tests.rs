//! Integration tests for the mail crate
//!
//! These tests verify the complete flow from enumerating a store to
//! searching the grouped inbox.

use chrono::{DateTime, TimeZone, Utc};
use mail::{
    ConversationGroup, InboxState, ItemKind, JsonExportSource, MailSource, MaildirSource,
    MemoryRecord, MemorySource, NO_SUBJECT, SourceError, UNKNOWN_SENDER, refresh_inbox,
};
use std::collections::HashSet;
use std::fs;
use tempfile::TempDir;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, hour, minute, 0).unwrap()
}

fn keys(conversations: &[ConversationGroup]) -> Vec<&str> {
    conversations.iter().map(|c| c.thread_key().as_str()).collect()
}

/// Two messages of one thread plus one message without thread metadata
fn three_message_store() -> MemorySource {
    MemorySource::new(vec![
        MemoryRecord::mail()
            .thread_key("T1")
            .subject("Project kickoff")
            .received_at(at(9, 0))
            .sender_name("Alice"),
        MemoryRecord::mail()
            .thread_key("T1")
            .subject("Re: Project kickoff")
            .received_at(at(8, 0))
            .sender_name("Bob"),
        MemoryRecord::mail()
            .stable_id("X9")
            .subject("Invoice")
            .received_at(at(7, 0)),
    ])
}

#[test]
fn test_three_message_scenario() {
    let inbox = refresh_inbox(&three_message_store()).unwrap();

    assert_eq!(keys(&inbox.conversations), vec!["T1", "single_X9"]);
    assert_eq!(inbox.total_messages(), 3);

    let thread = &inbox.conversations[0];
    assert_eq!(thread.subject(), "Project kickoff");
    assert_eq!(thread.latest_at(), at(9, 0));
    let senders: Vec<&str> = thread
        .messages()
        .iter()
        .map(|m| m.sender_name.as_str())
        .collect();
    assert_eq!(senders, vec!["Bob", "Alice"]);

    let single = &inbox.conversations[1];
    assert_eq!(single.message_count(), 1);
    assert_eq!(single.messages()[0].sender_name, UNKNOWN_SENDER);
}

#[test]
fn test_calendar_items_are_excluded() {
    let source = MemorySource::new(vec![
        MemoryRecord::of_kind(ItemKind::Calendar)
            .thread_key("T1")
            .subject("Standup")
            .received_at(at(12, 0)),
        MemoryRecord::mail()
            .thread_key("T1")
            .subject("Notes")
            .received_at(at(9, 0)),
        MemoryRecord::of_kind(ItemKind::Contact).subject("Alice"),
    ]);

    let inbox = refresh_inbox(&source).unwrap();
    assert_eq!(inbox.total_messages(), 1);
    assert_eq!(inbox.conversations[0].latest_at(), at(9, 0));
    assert_eq!(inbox.stats.skipped_non_mail, 2);
}

#[test]
fn test_fallback_keys_are_unique() {
    let source = MemorySource::new(vec![
        MemoryRecord::mail().subject("One"),
        MemoryRecord::mail().subject("Two"),
        MemoryRecord::mail().stable_id("E7"),
        MemoryRecord::mail().thread_key(""),
    ]);

    let inbox = refresh_inbox(&source).unwrap();
    assert_eq!(inbox.conversation_count(), 4);

    let unique: HashSet<&str> = keys(&inbox.conversations).into_iter().collect();
    assert_eq!(unique.len(), 4);
    assert!(unique.contains("single_E7"));
}

#[test]
fn test_group_invariants() {
    let source = MemorySource::new(vec![
        MemoryRecord::mail().thread_key("a").received_at(at(10, 0)),
        MemoryRecord::mail().thread_key("b").received_at(at(11, 30)),
        MemoryRecord::mail().thread_key("a").received_at(at(12, 0)).unread(true),
        MemoryRecord::mail().thread_key("c"),
        MemoryRecord::mail().thread_key("b").received_at(at(9, 0)),
        MemoryRecord::mail().thread_key("a"),
    ]);

    let inbox = refresh_inbox(&source).unwrap();
    assert_eq!(keys(&inbox.conversations), vec!["a", "b", "c"]);

    for conversation in &inbox.conversations {
        assert!(conversation.message_count() >= 1);
        assert!(
            conversation
                .messages()
                .iter()
                .all(|m| &m.thread_key == conversation.thread_key())
        );
        // Oldest first, untimed messages treated as the earliest instant
        let times: Vec<DateTime<Utc>> = conversation
            .messages()
            .iter()
            .map(|m| m.received_at.unwrap_or(ConversationGroup::NO_TIMESTAMP))
            .collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(conversation.latest_at(), *times.last().unwrap());
    }

    // Newest conversation first
    let latest: Vec<DateTime<Utc>> = inbox.conversations.iter().map(|c| c.latest_at()).collect();
    assert!(latest.windows(2).all(|w| w[0] >= w[1]));

    assert!(inbox.conversations[0].has_unread());
    assert!(!inbox.conversations[2].has_timestamp());
    assert_eq!(inbox.unread_conversations(), 1);
}

#[test]
fn test_search_over_inbox() {
    let inbox = refresh_inbox(&three_message_store()).unwrap();

    assert_eq!(keys(&inbox.search("KICKOFF")), vec!["T1"]);
    assert_eq!(keys(&inbox.search("bob")), vec!["T1"]);
    assert_eq!(keys(&inbox.search("   ")), vec!["T1", "single_X9"]);
    assert!(inbox.search("nothing like this").is_empty());
}

#[test]
fn test_enumeration_failure_keeps_previous_inbox() {
    let mut state = InboxState::default();
    state.apply(refresh_inbox(&three_message_store()));

    let result = refresh_inbox(&MemorySource::unreachable("client not running"));
    assert!(matches!(result, Err(SourceError::Unavailable(_))));
    state.apply(result);

    assert_eq!(state.inbox().map(|i| i.total_messages()), Some(3));
    assert!(state.last_error().is_some());
}

fn write_message(dir: &TempDir, sub: &str, name: &str, content: &str) {
    fs::write(dir.path().join(sub).join(name), content.replace('\n', "\r\n")).unwrap();
}

#[test]
fn test_maildir_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    for sub in ["new", "cur", "tmp"] {
        fs::create_dir(dir.path().join(sub)).unwrap();
    }

    write_message(
        &dir,
        "cur",
        "1.host:2,S",
        "Message-ID: <kickoff@example.com>
From: Alice <alice@example.com>
Subject: Kickoff
Date: Mon, 03 Jun 2024 08:00:00 +0000

Hi all.
",
    );
    write_message(
        &dir,
        "new",
        "2.host",
        "Message-ID: <reply@example.com>
References: <kickoff@example.com>
From: Bob <bob@example.com>
Subject: Re: Kickoff
Date: Mon, 03 Jun 2024 09:00:00 +0000

Sounds good.
",
    );
    write_message(
        &dir,
        "cur",
        "3.host:2,S",
        "Message-ID: <standup@example.com>
From: Calendar <calendar@example.com>
Subject: Standup
Content-Type: text/calendar

BEGIN:VCALENDAR
END:VCALENDAR
",
    );
    write_message(
        &dir,
        "cur",
        "4.host:2,S",
        "Message-ID: <late@example.com>
Date: Mon, 03 Jun 2024 10:00:00 +0000

No subject or sender.
",
    );

    let source = MaildirSource::open(dir.path()).unwrap();
    let inbox = refresh_inbox(&source).unwrap();

    assert_eq!(
        keys(&inbox.conversations),
        vec!["late@example.com", "kickoff@example.com"]
    );
    assert_eq!(inbox.conversations[0].subject(), NO_SUBJECT);

    let thread = &inbox.conversations[1];
    assert_eq!(thread.message_count(), 2);
    assert!(thread.has_unread());
    // Enumeration reads new/ first, so the reply arrives first
    assert_eq!(thread.subject(), "Re: Kickoff");
    assert_eq!(thread.messages()[0].sender_name, "Alice");

    assert_eq!(inbox.stats.skipped_non_mail, 1);
}

#[test]
fn test_json_export_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inbox.json");
    fs::write(
        &path,
        r#"[
            { "kind": 43, "id": "A", "thread_key": "T1", "subject": "Budget",
              "received_at": "2024-06-03T08:00:00Z", "sender_name": "Alice" },
            { "kind": "appointment", "id": "B", "subject": "Review" },
            { "kind": 43, "id": "C", "thread_key": "T1", "subject": "Re: Budget",
              "received_at": 1717405200000, "sender_name": "Bob", "unread": true },
            { "kind": 43, "id": "D", "subject": 7, "received_at": "soon" },
            "not an item"
        ]"#,
    )
    .unwrap();

    let source = JsonExportSource::open(&path).unwrap();
    assert_eq!(source.item_count().unwrap(), 5);

    let inbox = refresh_inbox(&source).unwrap();
    assert_eq!(keys(&inbox.conversations), vec!["T1", "single_D"]);
    assert_eq!(inbox.conversations[0].message_count(), 2);
    assert_eq!(inbox.conversations[0].latest_at(), at(9, 0));
    assert!(inbox.conversations[0].has_unread());

    // Wrong-typed fields fall back to defaults
    let broken = &inbox.conversations[1];
    assert_eq!(broken.subject(), NO_SUBJECT);
    assert!(!broken.has_timestamp());

    assert_eq!(inbox.stats.skipped_non_mail, 1);
    assert_eq!(inbox.stats.unreadable, 1);
}
