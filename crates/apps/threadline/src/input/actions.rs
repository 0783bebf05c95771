//! GPUI action definitions for keyboard shortcuts

use gpui::actions;

actions!(
    threadline,
    [
        Refresh,     // Cmd-R or F5 - reload the inbox
        FocusSearch, // / or Cmd-K - focus the search box
    ]
);
