//! Keyboard shortcut definitions

use gpui::KeyBinding;

use super::actions::*;
use crate::components::search_box;

/// Returns all keybindings to register with GPUI
pub fn bindings() -> Vec<KeyBinding> {
    vec![
        // ===== Global (ThreadlineApp context) =====
        KeyBinding::new("cmd-r", Refresh, Some("ThreadlineApp")),
        KeyBinding::new("f5", Refresh, Some("ThreadlineApp")),
        KeyBinding::new("/", FocusSearch, Some("ThreadlineApp")),
        KeyBinding::new("cmd-k", FocusSearch, Some("ThreadlineApp")),
        // ===== Search box =====
        KeyBinding::new("escape", search_box::Escape, Some("SearchBox")),
    ]
}
