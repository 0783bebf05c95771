//! Conversation card - displays one conversation with a preview of its latest messages

use gpui::prelude::*;
use gpui::*;
use gpui_component::ActiveTheme;
use mail::ConversationGroup;

use crate::format;

const CARD_PADDING: f32 = 24.0;
const SUBJECT_HEIGHT: f32 = 24.0;
const LINE_HEIGHT: f32 = 20.0;

/// Props for ConversationCard
#[derive(IntoElement)]
pub struct ConversationCard {
    conversation: ConversationGroup,
    preview_messages: usize,
}

impl ConversationCard {
    pub fn new(conversation: ConversationGroup, preview_messages: usize) -> Self {
        Self {
            conversation,
            preview_messages,
        }
    }

    /// Rendered height of a card, for the virtual list
    pub fn height(conversation: &ConversationGroup, preview_messages: usize) -> Pixels {
        let lines = conversation.recent(preview_messages).len()
            + usize::from(conversation.hidden_count(preview_messages) > 0);
        px(CARD_PADDING + SUBJECT_HEIGHT + LINE_HEIGHT * lines as f32)
    }
}

impl RenderOnce for ConversationCard {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.theme();
        let conversation = &self.conversation;

        let subject = conversation.subject().to_string();
        let has_unread = conversation.has_unread();
        let count_label = conversation
            .is_multi()
            .then(|| format!("({} messages)", conversation.message_count()));
        let hidden = conversation.hidden_count(self.preview_messages);

        let previews: Vec<(String, String, bool)> = conversation
            .recent(self.preview_messages)
            .iter()
            .map(|m| (m.sender_name.clone(), format::message_time(m.received_at), m.unread))
            .collect();

        div()
            .w_full()
            .px_4()
            .py_3()
            .bg(theme.list)
            .border_b_1()
            .border_color(theme.border)
            .hover(|style| style.bg(theme.list_hover))
            .flex()
            .flex_col()
            // Subject line with unread marker and message count
            .child(
                div()
                    .h(px(SUBJECT_HEIGHT))
                    .flex()
                    .items_center()
                    .gap_2()
                    .overflow_hidden()
                    .child(
                        div()
                            .size_2()
                            .flex_shrink_0()
                            .rounded_full()
                            .when(has_unread, |el| el.bg(theme.primary)),
                    )
                    .child(
                        div()
                            .text_sm()
                            .font_weight(if has_unread {
                                FontWeight::BOLD
                            } else {
                                FontWeight::MEDIUM
                            })
                            .text_color(theme.foreground)
                            .text_ellipsis()
                            .child(subject),
                    )
                    .when_some(count_label, |el, label| {
                        el.child(
                            div()
                                .flex_shrink_0()
                                .text_xs()
                                .text_color(theme.muted_foreground)
                                .child(label),
                        )
                    }),
            )
            // Latest messages, oldest first
            .children(previews.into_iter().map(|(sender, time, unread)| {
                div()
                    .h(px(LINE_HEIGHT))
                    .pl_4()
                    .flex()
                    .items_center()
                    .gap_1()
                    .text_xs()
                    .text_color(if unread {
                        theme.foreground
                    } else {
                        theme.muted_foreground
                    })
                    .overflow_hidden()
                    .child(div().text_ellipsis().child(sender))
                    .child("•")
                    .child(div().flex_shrink_0().child(time))
            }))
            .when(hidden > 0, |el| {
                el.child(
                    div()
                        .h(px(LINE_HEIGHT))
                        .pl_4()
                        .flex()
                        .items_center()
                        .text_xs()
                        .italic()
                        .text_color(theme.muted_foreground)
                        .child(format::hidden_messages(hidden)),
                )
            })
    }
}
