//! Root application component for Threadline

use gpui::prelude::*;
use gpui::*;
use gpui_component::button::{Button, ButtonVariants};
use gpui_component::{ActiveTheme, Selectable, Sizable};
use log::{error, info};
use mail::{InboxState, MailSource, Settings, refresh_inbox};
use std::sync::Arc;
use std::time::Duration;

use crate::appearance::Appearance;
use crate::components::{SearchBox, SearchBoxEvent, StatsPanel};
use crate::format;
use crate::input::{FocusSearch, Refresh};
use crate::views::ConversationListView;

/// Root application state
pub struct ThreadlineApp {
    settings: Settings,
    /// Open mail store, once connected
    source: Option<Arc<dyn MailSource>>,
    source_name: Option<String>,
    folders: Vec<String>,
    appearance: Appearance,
    state: InboxState,
    is_connecting: bool,
    is_refreshing: bool,
    query: String,
    status: String,
    search_box: Entity<SearchBox>,
    conversation_list: Entity<ConversationListView>,
    _search_subscription: Subscription,
    _appearance_subscription: Subscription,
}

impl ThreadlineApp {
    pub fn new(settings: Settings, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let debounce = Duration::from_millis(settings.search_debounce_ms);
        let search_box = cx.new(|cx| SearchBox::new(debounce, window, cx));

        // Subscribe to search box events
        let search_subscription = cx.subscribe(&search_box, Self::handle_search_box_event);

        // Re-resolve the theme when the system appearance changes
        let appearance_subscription = cx.observe_window_appearance(window, |app, window, cx| {
            if app.appearance == Appearance::System {
                Appearance::System.apply(window, cx);
            }
        });

        let preview_messages = settings.preview_messages;
        let conversation_list = cx.new(|_| ConversationListView::new(preview_messages));

        Self {
            settings,
            source: None,
            source_name: None,
            folders: Vec::new(),
            appearance: Appearance::default(),
            state: InboxState::default(),
            is_connecting: false,
            is_refreshing: false,
            query: String::new(),
            status: String::new(),
            search_box,
            conversation_list,
            _search_subscription: search_subscription,
            _appearance_subscription: appearance_subscription,
        }
    }

    /// Open the configured mail store in the background, then load the inbox
    pub fn connect(&mut self, cx: &mut Context<Self>) {
        if self.is_connecting {
            return;
        }
        self.is_connecting = true;
        self.status = "Connecting...".to_string();
        cx.notify();

        let source_config = self.settings.source.clone();
        let background = cx.background_executor().clone();

        cx.spawn(async move |this, cx| {
            // Opening and listing folders touch the filesystem
            let result = background
                .spawn(async move {
                    let source = source_config.open()?;
                    let item_count = source.item_count()?;
                    let folders = source.folders()?;
                    anyhow::Ok((source, item_count, folders))
                })
                .await;

            cx.update(|cx| {
                this.update(cx, |app, cx| {
                    app.is_connecting = false;
                    match result {
                        Ok((source, item_count, folders)) => {
                            info!("Connected to {} ({} item(s))", source.name(), item_count);
                            app.source_name = Some(source.name().to_string());
                            app.source = Some(source);
                            app.folders = folders;
                            app.refresh(cx);
                        }
                        Err(e) => {
                            error!("Failed to connect to mail store: {:#}", e);
                            let message = format!("Could not open mail store: {:#}", e);
                            app.conversation_list.update(cx, |list, cx| {
                                list.set_error(message.clone(), cx);
                            });
                            app.status = message;
                        }
                    }
                    cx.notify();
                })
            })
            .ok();
        })
        .detach();
    }

    /// Reload the inbox from the store in the background
    pub fn refresh(&mut self, cx: &mut Context<Self>) {
        if self.is_refreshing {
            return;
        }
        let Some(source) = self.source.clone() else {
            // A failed connection is retried by the refresh control
            self.connect(cx);
            return;
        };

        self.is_refreshing = true;
        self.status = "Loading emails...".to_string();
        if !self.state.has_loaded() {
            self.conversation_list
                .update(cx, |list, cx| list.set_loading(true, cx));
        }
        cx.notify();

        let background = cx.background_executor().clone();
        cx.spawn(async move |this, cx| {
            // Enumeration is blocking I/O
            let result = background
                .spawn(async move { refresh_inbox(source.as_ref()) })
                .await;

            cx.update(|cx| {
                this.update(cx, |app, cx| {
                    app.is_refreshing = false;
                    app.state.apply(result);

                    if let Some(err) = app.state.last_error() {
                        app.status = format::refresh_error_status(err);
                        if !app.state.has_loaded() {
                            let message = app.status.clone();
                            app.conversation_list
                                .update(cx, |list, cx| list.set_error(message, cx));
                        }
                    } else if let Some(inbox) = app.state.inbox() {
                        app.status = format::loaded_status(inbox);
                    }

                    app.show_matches(cx);
                    cx.notify();
                })
            })
            .ok();
        })
        .detach();
    }

    /// Refresh requested by the user; clears the search first
    fn handle_refresh(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.search_box
            .update(cx, |search_box, cx| search_box.clear(window, cx));
        self.query.clear();
        self.refresh(cx);
    }

    /// Handle events from the search box
    fn handle_search_box_event(
        &mut self,
        _: Entity<SearchBox>,
        event: &SearchBoxEvent,
        cx: &mut Context<Self>,
    ) {
        match event {
            SearchBoxEvent::QueryChanged(query) => {
                self.query = query.clone();
            }
            SearchBoxEvent::Cleared => {
                self.query.clear();
            }
        }

        if let Some(inbox) = self.state.inbox() {
            let matched = inbox.search(&self.query).len();
            self.status = format::search_status(&self.query, inbox.conversation_count(), matched);
        }
        self.show_matches(cx);
        cx.notify();
    }

    /// Push conversations matching the current query to the list
    fn show_matches(&mut self, cx: &mut Context<Self>) {
        let Some(inbox) = self.state.inbox().cloned() else {
            return;
        };
        let matches = inbox.search(&self.query).into_owned();
        self.conversation_list.update(cx, |list, cx| {
            list.set_conversations(matches, inbox.conversation_count(), cx);
        });
    }

    fn set_appearance(
        &mut self,
        appearance: Appearance,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        info!("Appearance changed to {}", appearance.label());
        self.appearance = appearance;
        appearance.apply(window, cx);
        cx.notify();
    }

    fn focus_search(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.search_box
            .update(cx, |search_box, cx| search_box.focus(window, cx));
    }

    fn render_sidebar(&self, cx: &mut Context<Self>) -> impl IntoElement + use<> {
        let appearance = self.render_appearance(cx);
        let theme = cx.theme();
        let is_busy = self.is_refreshing || self.is_connecting;
        let folders = self.folders.clone();
        let source_name = self
            .source_name
            .clone()
            .unwrap_or_else(|| "Not connected".to_string());

        div()
            .flex()
            .flex_col()
            .h_full()
            // Sidebar header with app branding
            .child(
                div()
                    .pt_8() // Extra top padding for window controls
                    .pb_4()
                    .px_3()
                    .child(
                        div()
                            .flex()
                            .items_center()
                            .gap_2()
                            .child(
                                div()
                                    .text_lg()
                                    .font_weight(FontWeight::BOLD)
                                    .text_color(theme.foreground)
                                    .child("Threadline"),
                            )
                            .child(
                                div()
                                    .text_xs()
                                    .text_color(theme.muted_foreground)
                                    .child("Conversations"),
                            ),
                    ),
            )
            .child(div().px_3().pb_2().child(self.search_box.clone()))
            .child(
                div().px_3().pb_2().child(
                    Button::new("refresh-button")
                        .label(if is_busy { "Refreshing..." } else { "Refresh" })
                        .small()
                        .ghost()
                        .loading(is_busy)
                        .w_full()
                        .on_click(cx.listener(|app, _event, window, cx| {
                            app.handle_refresh(window, cx);
                        })),
                ),
            )
            .child(
                div()
                    .border_t_1()
                    .border_color(theme.border)
                    .child(StatsPanel::new(self.state.inbox().map(|inbox| inbox.as_ref()))),
            )
            // Other folders in the store - fills remaining space
            .child(
                div()
                    .flex()
                    .flex_col()
                    .flex_1()
                    .overflow_y_hidden()
                    .px_3()
                    .py_2()
                    .border_t_1()
                    .border_color(theme.border)
                    .gap_1()
                    .when(!folders.is_empty(), |el| {
                        el.child(
                            div()
                                .text_xs()
                                .font_weight(FontWeight::SEMIBOLD)
                                .text_color(theme.muted_foreground)
                                .child("Folders"),
                        )
                    })
                    .children(folders.into_iter().map(|folder| {
                        div()
                            .pl_2()
                            .text_sm()
                            .text_color(theme.foreground)
                            .text_ellipsis()
                            .child(folder)
                    })),
            )
            .child(appearance)
            // Sidebar footer with the store location
            .child(
                div()
                    .px_3()
                    .py_2()
                    .border_t_1()
                    .border_color(theme.border)
                    .text_xs()
                    .text_color(theme.muted_foreground)
                    .text_ellipsis()
                    .child(source_name),
            )
    }

    fn render_appearance(&self, cx: &mut Context<Self>) -> impl IntoElement + use<> {
        let theme = cx.theme();
        let current = self.appearance;

        div()
            .flex()
            .flex_col()
            .gap_1()
            .px_3()
            .py_2()
            .border_t_1()
            .border_color(theme.border)
            .child(
                div()
                    .text_xs()
                    .font_weight(FontWeight::SEMIBOLD)
                    .text_color(theme.muted_foreground)
                    .child("Appearance"),
            )
            .child(
                div()
                    .flex()
                    .gap_1()
                    .children(Appearance::ALL.into_iter().map(|appearance| {
                        Button::new(SharedString::from(format!("appearance-{:?}", appearance)))
                            .label(appearance.label())
                            .xsmall()
                            .ghost()
                            .selected(appearance == current)
                            .on_click(cx.listener(move |app, _event, window, cx| {
                                app.set_appearance(appearance, window, cx);
                            }))
                    })),
            )
    }

    fn render_status_bar(&self, cx: &mut Context<Self>) -> impl IntoElement + use<> {
        let theme = cx.theme();

        div()
            .w_full()
            .px_4()
            .py_1()
            .border_t_1()
            .border_color(theme.border)
            .bg(theme.secondary)
            .text_xs()
            .text_color(if self.state.last_error().is_some() {
                theme.danger
            } else {
                theme.muted_foreground
            })
            .text_ellipsis()
            .child(self.status.clone())
    }
}

impl ThreadlineApp {
    fn handle_refresh_action(&mut self, _: &Refresh, window: &mut Window, cx: &mut Context<Self>) {
        self.handle_refresh(window, cx);
    }

    fn handle_focus_search(
        &mut self,
        _: &FocusSearch,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.focus_search(window, cx);
    }
}

impl Render for ThreadlineApp {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        // Clone theme colors upfront to avoid borrow conflicts
        let bg = theme.background;
        let fg = theme.foreground;
        let secondary_bg = theme.secondary;
        let border = theme.border;

        let sidebar = self.render_sidebar(cx);
        let status_bar = self.render_status_bar(cx);

        div()
            .key_context("ThreadlineApp")
            .on_action(cx.listener(Self::handle_refresh_action))
            .on_action(cx.listener(Self::handle_focus_search))
            .flex()
            .flex_row()
            .size_full()
            .bg(bg)
            .text_color(fg)
            // Sidebar
            .child(
                div()
                    .w(px(260.))
                    .h_full()
                    .bg(secondary_bg)
                    .border_r_1()
                    .border_color(border)
                    .child(sidebar),
            )
            // Main content area with status line
            .child(
                div()
                    .flex()
                    .flex_col()
                    .flex_1()
                    .overflow_hidden()
                    .child(
                        div()
                            .flex()
                            .flex_1()
                            .overflow_hidden()
                            .child(self.conversation_list.clone()),
                    )
                    .child(status_bar),
            )
    }
}
