//! Threadline - A conversation view of a local inbox
//!
//! This is the main entry point for the Threadline application.

use gpui::prelude::*;
use gpui::{Application, WindowOptions, px, size};
use gpui_component::{Theme, ThemeMode, TitleBar};
use log::{error, info, warn};
use mail::Settings;

mod app;
mod appearance;
mod components;
mod format;
mod input;
mod views;

use app::ThreadlineApp;

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    // Bootstrap config directory
    if let Err(e) = config::init() {
        error!("Failed to initialize config directory: {}", e);
    }

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Failed to load settings, using defaults: {:#}", e);
            if let Some(path) = Settings::default_settings_path() {
                warn!(
                    "To choose a mail store, either:\n\
                     1. Write settings to: {}\n\
                     2. Or set {} or {}",
                    path.display(),
                    mail::settings::MAILDIR_ENV,
                    mail::settings::JSON_EXPORT_ENV
                );
            }
            Settings::from_env()
        }
    };
    info!("Mail store: {}", settings.source.path().display());

    Application::new()
        .with_assets(gpui_component_assets::Assets)
        .run(move |cx| {
            // Initialize gpui-component and set dark mode
            gpui_component::init(cx);
            Theme::change(ThemeMode::Dark, None, cx);
            cx.bind_keys(input::bindings());

            let window_options = WindowOptions {
                window_bounds: Some(gpui::WindowBounds::Windowed(gpui::Bounds {
                    origin: gpui::Point::default(),
                    size: size(px(1200.), px(800.)),
                })),
                titlebar: Some(TitleBar::title_bar_options()),
                ..Default::default()
            };

            cx.open_window(window_options, |window, cx| {
                cx.new(|cx| {
                    let mut app = ThreadlineApp::new(settings, window, cx);
                    // Connect and load the inbox once the window is up
                    app.connect(cx);
                    app
                })
            })
            .expect("Failed to open window");

            info!("Threadline started successfully");
        });
}
