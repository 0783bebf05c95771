//! Search box component with debounced input

use gpui::prelude::*;
use gpui::*;
use gpui_component::input::{Input, InputEvent, InputState};
use gpui_component::{ActiveTheme, Icon, IconName, Sizable};
use std::time::Duration;

/// Events emitted by the SearchBox
pub enum SearchBoxEvent {
    /// Query changed (debounced)
    QueryChanged(String),
    /// Search cleared, by Escape or programmatically
    Cleared,
}

impl EventEmitter<SearchBoxEvent> for SearchBox {}

/// Search box component with debounced input
pub struct SearchBox {
    input_state: Entity<InputState>,
    focus_handle: FocusHandle,
    debounce: Duration,
    debounce_task: Option<Task<()>>,
    last_emitted_query: String,
    _input_subscription: Subscription,
}

impl SearchBox {
    pub fn new(debounce: Duration, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let input_state =
            cx.new(|cx| InputState::new(window, cx).placeholder("Search subject or sender..."));

        let input_subscription = cx.subscribe(&input_state, Self::on_input_event);

        Self {
            input_state,
            focus_handle: cx.focus_handle(),
            debounce,
            debounce_task: None,
            last_emitted_query: String::new(),
            _input_subscription: input_subscription,
        }
    }

    fn on_input_event(
        &mut self,
        _: Entity<InputState>,
        event: &InputEvent,
        cx: &mut Context<Self>,
    ) {
        match event {
            InputEvent::Change => {
                self.on_input_change(cx);
            }
            InputEvent::PressEnter { .. } => {
                // Apply immediately instead of waiting for the debounce
                self.debounce_task = None;
                let query = self.query(cx);
                self.last_emitted_query = query.clone();
                cx.emit(SearchBoxEvent::QueryChanged(query));
            }
            _ => {}
        }
    }

    /// Get the current query text
    pub fn query(&self, cx: &App) -> String {
        self.input_state.read(cx).text().to_string()
    }

    /// Clear the search box
    pub fn clear(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state.update(cx, |state, cx| {
            state.set_value("", window, cx);
        });
        self.last_emitted_query.clear();
        self.debounce_task = None;
        cx.emit(SearchBoxEvent::Cleared);
    }

    /// Focus the search box
    pub fn focus(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        self.input_state.update(cx, |state, cx| {
            state.focus(window, cx);
        });
    }

    /// Handle input changes with debouncing
    fn on_input_change(&mut self, cx: &mut Context<Self>) {
        let query = self.query(cx);

        // Nothing new to report
        if query == self.last_emitted_query {
            return;
        }

        // Dropping the pending task restarts the debounce
        self.debounce_task = None;

        let debounce = self.debounce;
        self.debounce_task = Some(cx.spawn(async move |this, cx| {
            cx.background_executor().timer(debounce).await;

            let _ = cx.update(|cx| {
                let _ = this.update(cx, |view, cx| {
                    view.last_emitted_query = query.clone();
                    cx.emit(SearchBoxEvent::QueryChanged(query));
                });
            });
        }));
    }
}

impl Render for SearchBox {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let has_text = !self.query(cx).is_empty();

        div()
            .track_focus(&self.focus_handle)
            .key_context("SearchBox")
            .on_action(cx.listener(Self::handle_escape))
            .flex()
            .items_center()
            .w_full()
            .gap_1()
            .px_2()
            .py_1()
            .rounded_md()
            .border_1()
            .border_color(theme.border)
            .bg(theme.background)
            .child(
                Icon::new(IconName::Search)
                    .small()
                    .text_color(theme.muted_foreground),
            )
            .child(
                Input::new(&self.input_state)
                    .appearance(false)
                    .cleanable(true)
                    .w_full(),
            )
            // "/" focuses search from anywhere in the app
            .when(!has_text, |el| {
                el.child(
                    div().px_1().py_px().rounded(px(4.)).bg(theme.border).child(
                        div()
                            .text_xs()
                            .text_color(theme.muted_foreground)
                            .child("/"),
                    ),
                )
            })
    }
}

actions!(search_box, [Escape]);

impl SearchBox {
    fn handle_escape(&mut self, _: &Escape, window: &mut Window, cx: &mut Context<Self>) {
        self.clear(window, cx);
    }
}
