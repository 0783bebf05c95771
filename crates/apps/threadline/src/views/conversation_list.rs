//! Conversation list view - displays the grouped inbox, newest activity first

use gpui::prelude::*;
use gpui::*;
use gpui_component::scroll::Scrollbar;
use gpui_component::skeleton::Skeleton;
use gpui_component::{ActiveTheme, VirtualListScrollHandle, v_virtual_list};
use log::debug;
use mail::ConversationGroup;
use std::rc::Rc;

use crate::components::ConversationCard;

/// Height of a skeleton placeholder row
const SKELETON_ITEM_HEIGHT: f32 = 72.0;

/// List of conversation cards
pub struct ConversationListView {
    /// Conversations matching the current query
    conversations: Vec<ConversationGroup>,
    /// Number of conversations in the inbox
    total: usize,
    preview_messages: usize,
    is_loading: bool,
    error_message: Option<String>,
    scroll_handle: VirtualListScrollHandle,
    item_sizes: Rc<Vec<Size<Pixels>>>,
}

impl ConversationListView {
    pub fn new(preview_messages: usize) -> Self {
        Self {
            conversations: Vec::new(),
            total: 0,
            preview_messages,
            is_loading: true,
            error_message: None,
            scroll_handle: VirtualListScrollHandle::new(),
            item_sizes: Rc::new(Vec::new()),
        }
    }

    /// Show `conversations` out of `total` in the inbox
    pub fn set_conversations(
        &mut self,
        conversations: Vec<ConversationGroup>,
        total: usize,
        cx: &mut Context<Self>,
    ) {
        debug!("Showing {}/{} conversation(s)", conversations.len(), total);

        // Update item sizes for virtual list
        self.item_sizes = Rc::new(
            conversations
                .iter()
                .map(|c| size(px(10000.), ConversationCard::height(c, self.preview_messages)))
                .collect(),
        );
        self.conversations = conversations;
        self.total = total;
        self.is_loading = false;
        self.error_message = None;
        cx.notify();
    }

    pub fn set_loading(&mut self, is_loading: bool, cx: &mut Context<Self>) {
        self.is_loading = is_loading;
        cx.notify();
    }

    /// Show an error in place of the list
    pub fn set_error(&mut self, message: String, cx: &mut Context<Self>) {
        self.error_message = Some(message);
        self.is_loading = false;
        cx.notify();
    }

    fn render_header(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        let shown = self.conversations.len();
        let count_text = if shown == self.total {
            format!("{} conversations", self.total)
        } else {
            format!("{} of {} conversations", shown, self.total)
        };

        div()
            .w_full()
            .px_4()
            .py_3()
            .bg(theme.background)
            .border_b_1()
            .border_color(theme.border)
            .flex()
            .justify_between()
            .items_center()
            .child(
                div()
                    .text_lg()
                    .font_weight(FontWeight::BOLD)
                    .text_color(theme.foreground)
                    .child("Inbox"),
            )
            .child(
                div()
                    .text_sm()
                    .text_color(theme.muted_foreground)
                    .child(count_text),
            )
    }

    fn render_skeleton(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        div()
            .flex()
            .flex_col()
            .flex_1()
            .bg(theme.list)
            .children((0..8).map(|_| {
                div()
                    .h(px(SKELETON_ITEM_HEIGHT))
                    .w_full()
                    .px_4()
                    .py_3()
                    .flex()
                    .flex_col()
                    .gap_2()
                    .border_b_1()
                    .border_color(theme.border)
                    // Skeleton for subject line
                    .child(Skeleton::new().w(px(320.)).h(px(16.)))
                    // Skeleton for message previews
                    .child(
                        div()
                            .flex()
                            .gap_3()
                            .pl_4()
                            .child(Skeleton::new().w(px(120.)).h(px(12.)))
                            .child(Skeleton::new().w(px(160.)).h(px(12.))),
                    )
            }))
    }

    fn render_error(&self, message: &str, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        div()
            .flex()
            .flex_1()
            .justify_center()
            .items_center()
            .p_4()
            .child(
                div()
                    .p_4()
                    .bg(theme.danger)
                    .rounded_lg()
                    .border_1()
                    .border_color(theme.danger)
                    .child(
                        div()
                            .text_sm()
                            .text_color(theme.danger_foreground)
                            .child(message.to_string()),
                    ),
            )
    }

    fn render_empty(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let hint = if self.total > 0 {
            "Try a different search"
        } else {
            "Refresh to check for new mail"
        };

        div().flex().flex_1().justify_center().items_center().child(
            div()
                .flex()
                .flex_col()
                .items_center()
                .gap_2()
                .child(
                    div()
                        .text_sm()
                        .text_color(theme.muted_foreground)
                        .child("No conversations found"),
                )
                .child(div().text_xs().text_color(theme.muted_foreground).child(hint)),
        )
    }

    fn render_list(&self, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let preview_messages = self.preview_messages;

        div()
            .relative()
            .flex()
            .flex_col()
            .flex_1()
            .overflow_hidden()
            .bg(theme.list)
            .child(
                v_virtual_list(
                    cx.entity().clone(),
                    "conversation-list",
                    self.item_sizes.clone(),
                    move |view, visible_range, _window, _cx| {
                        visible_range
                            .map(|ix| {
                                let conversation = view.conversations[ix].clone();
                                let key = conversation.thread_key().as_str().to_string();

                                div()
                                    .id(ElementId::Name(key.into()))
                                    .w_full()
                                    .child(ConversationCard::new(conversation, preview_messages))
                            })
                            .collect()
                    },
                )
                .flex_1()
                .track_scroll(&self.scroll_handle),
            )
            .child(Scrollbar::vertical(&self.scroll_handle))
    }
}

impl Render for ConversationListView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();

        div()
            .key_context("ConversationListView")
            .flex()
            .flex_col()
            .size_full()
            .bg(theme.background)
            .child(self.render_header(cx))
            .child(if let Some(ref error) = self.error_message.clone() {
                self.render_error(error, cx).into_any_element()
            } else if self.is_loading {
                self.render_skeleton(cx).into_any_element()
            } else if self.conversations.is_empty() {
                self.render_empty(cx).into_any_element()
            } else {
                self.render_list(cx).into_any_element()
            })
    }
}
