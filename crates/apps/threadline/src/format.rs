//! Display strings for the status line and conversation cards

use chrono::{DateTime, Local, Utc};
use mail::Inbox;

/// Format of a message's received time in a conversation card
const MESSAGE_TIME_FORMAT: &str = "%b %d, %Y %I:%M %p";

/// Received time in local time, or "Unknown date"
pub fn message_time(received_at: Option<DateTime<Utc>>) -> String {
    match received_at {
        Some(ts) => ts.with_timezone(&Local).format(MESSAGE_TIME_FORMAT).to_string(),
        None => "Unknown date".to_string(),
    }
}

/// Status after a successful refresh
pub fn loaded_status(inbox: &Inbox) -> String {
    if inbox.is_empty() {
        "No emails found in inbox".to_string()
    } else {
        format!(
            "Loaded {} conversation(s) with {} email(s)",
            inbox.conversation_count(),
            inbox.total_messages()
        )
    }
}

/// Status after the search query changed
pub fn search_status(query: &str, total: usize, matched: usize) -> String {
    if query.trim().is_empty() {
        format!("Showing all {} conversation(s)", total)
    } else {
        format!("Found {} conversation(s) matching '{}'", matched, query.trim())
    }
}

pub fn refresh_error_status(error: &str) -> String {
    format!("Error loading emails: {}", error)
}

/// Footer of a card whose older messages are not previewed
pub fn hidden_messages(count: usize) -> String {
    format!("... and {} more message(s)", count)
}

/// Format a timestamp as a relative time string (e.g., "5 minutes ago")
pub fn relative_time(ts: DateTime<Utc>) -> String {
    relative_time_from(ts, Utc::now())
}

fn relative_time_from(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(ts);

    if duration.num_seconds() < 60 {
        "Just now".to_string()
    } else if duration.num_minutes() < 60 {
        let mins = duration.num_minutes();
        if mins == 1 {
            "1 minute ago".to_string()
        } else {
            format!("{} minutes ago", mins)
        }
    } else if duration.num_hours() < 24 {
        let hours = duration.num_hours();
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else {
        // Show as local date/time
        let local: DateTime<Local> = ts.into();
        local.format("%b %d at %H:%M").to_string()
    }
}
