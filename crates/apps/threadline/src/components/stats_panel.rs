//! Inbox statistics shown in the sidebar

use gpui::prelude::*;
use gpui::*;
use gpui_component::ActiveTheme;
use mail::Inbox;

use crate::format;

#[derive(IntoElement)]
pub struct StatsPanel {
    conversations: usize,
    messages: usize,
    unread: usize,
    skipped: usize,
    dropped_groups: usize,
    updated: Option<String>,
}

impl StatsPanel {
    pub fn new(inbox: Option<&Inbox>) -> Self {
        match inbox {
            Some(inbox) => Self {
                conversations: inbox.conversation_count(),
                messages: inbox.total_messages(),
                unread: inbox.unread_conversations(),
                skipped: inbox.stats.skipped_non_mail + inbox.stats.unreadable,
                dropped_groups: inbox.stats.dropped_groups,
                updated: Some(format::relative_time(inbox.refreshed_at)),
            },
            None => Self {
                conversations: 0,
                messages: 0,
                unread: 0,
                skipped: 0,
                dropped_groups: 0,
                updated: None,
            },
        }
    }
}

impl RenderOnce for StatsPanel {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.theme();

        let row = |label: &'static str, value: usize| {
            div()
                .flex()
                .justify_between()
                .text_xs()
                .child(div().text_color(theme.muted_foreground).child(label))
                .child(
                    div()
                        .font_weight(FontWeight::MEDIUM)
                        .text_color(theme.foreground)
                        .child(value.to_string()),
                )
        };

        div()
            .flex()
            .flex_col()
            .gap_1()
            .px_3()
            .py_2()
            .child(row("Conversations", self.conversations))
            .child(row("Total emails", self.messages))
            .child(row("Unread", self.unread))
            .when(self.skipped > 0, |el| el.child(row("Skipped items", self.skipped)))
            .when(self.dropped_groups > 0, |el| {
                el.child(row("Dropped conversations", self.dropped_groups))
            })
            .child(
                div()
                    .pt_1()
                    .text_xs()
                    .text_color(theme.muted_foreground)
                    .child(
                        self.updated
                            .map(|ts| format!("Updated: {}", ts))
                            .unwrap_or_else(|| "Not loaded".to_string()),
                    ),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mail::{ItemKind, MemoryRecord, MemorySource, refresh_inbox};
    use std::prelude::rust_2024::test;

    #[test]
    fn test_counts_from_inbox() {
        let mut inbox = refresh_inbox(&MemorySource::new(vec![
            MemoryRecord::mail().thread_key("a").unread(true),
            MemoryRecord::mail().thread_key("a"),
            MemoryRecord::of_kind(ItemKind::Note),
        ]))
        .unwrap();
        inbox.stats.dropped_groups = 2;

        let panel = StatsPanel::new(Some(&inbox));
        assert_eq!(panel.conversations, 1);
        assert_eq!(panel.messages, 2);
        assert_eq!(panel.unread, 1);
        assert_eq!(panel.skipped, 1);
        assert_eq!(panel.dropped_groups, 2);
        assert!(panel.updated.is_some());
    }

    #[test]
    fn test_not_loaded() {
        let panel = StatsPanel::new(None);
        assert_eq!(panel.dropped_groups, 0);
        assert!(panel.updated.is_none());
    }
}
