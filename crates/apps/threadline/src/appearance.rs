//! Appearance mode chosen in the sidebar

use gpui::{App, Window, WindowAppearance};
use gpui_component::{Theme, ThemeMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    #[default]
    Dark,
    Light,
    /// Follow the window's system appearance
    System,
}

impl Appearance {
    pub const ALL: [Appearance; 3] = [Appearance::Dark, Appearance::Light, Appearance::System];

    pub fn label(self) -> &'static str {
        match self {
            Appearance::Dark => "Dark",
            Appearance::Light => "Light",
            Appearance::System => "System",
        }
    }

    /// Theme mode for this appearance given the system's current one
    pub fn theme_mode(self, system: WindowAppearance) -> ThemeMode {
        match self {
            Appearance::Dark => ThemeMode::Dark,
            Appearance::Light => ThemeMode::Light,
            Appearance::System => match system {
                WindowAppearance::Dark | WindowAppearance::VibrantDark => ThemeMode::Dark,
                WindowAppearance::Light | WindowAppearance::VibrantLight => ThemeMode::Light,
            },
        }
    }

    pub fn apply(self, window: &mut Window, cx: &mut App) {
        let mode = self.theme_mode(window.appearance());
        Theme::change(mode, Some(window), cx);
    }
}
