//! Settings loading for the mail source
//!
//! Settings are loaded from (in order of priority):
//! 1. `settings.json` in the Threadline config directory
//! 2. Environment variables (`THREADLINE_MAILDIR`, `THREADLINE_JSON_EXPORT`)
//! 3. The default Maildir at `~/Maildir`

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::source::{JsonExportSource, MailSource, MaildirSource};

/// Settings filename in the Threadline config directory
const SETTINGS_FILE: &str = "settings.json";

/// Environment variable naming a Maildir to read
pub const MAILDIR_ENV: &str = "THREADLINE_MAILDIR";

/// Environment variable naming a JSON export file to read
pub const JSON_EXPORT_ENV: &str = "THREADLINE_JSON_EXPORT";

const DEFAULT_MAILDIR: &str = "~/Maildir";

/// Which mail store to read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceConfig {
    Maildir { path: String },
    JsonExport { path: String },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::Maildir {
            path: DEFAULT_MAILDIR.to_string(),
        }
    }
}

impl SourceConfig {
    /// Store location with `~` expanded
    pub fn path(&self) -> PathBuf {
        match self {
            Self::Maildir { path } | Self::JsonExport { path } => config::expand_home(path),
        }
    }

    /// Open the configured store
    pub fn open(&self) -> Result<Arc<dyn MailSource>> {
        let path = self.path();
        let source: Arc<dyn MailSource> = match self {
            Self::Maildir { .. } => Arc::new(
                MaildirSource::open(&path)
                    .with_context(|| format!("Failed to open Maildir {}", path.display()))?,
            ),
            Self::JsonExport { .. } => Arc::new(
                JsonExportSource::open(&path)
                    .with_context(|| format!("Failed to open JSON export {}", path.display()))?,
            ),
        };
        Ok(source)
    }
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceConfig,
    /// Number of most recent messages previewed per conversation
    pub preview_messages: usize,
    /// Delay before a search query is applied
    pub search_debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            preview_messages: 3,
            search_debounce_ms: 150,
        }
    }
}

impl Settings {
    /// Load settings using the following priority:
    /// 1. JSON file (~/.config/threadline/settings.json)
    /// 2. Environment variables
    /// 3. Defaults
    pub fn load() -> Result<Self> {
        if config::config_exists(SETTINGS_FILE) {
            let settings: Settings = config::load_json(SETTINGS_FILE)?;
            info!("Loaded settings from {}", SETTINGS_FILE);
            return Ok(settings);
        }

        Ok(Self::from_env())
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse settings JSON")
    }

    /// Settings from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(MAILDIR_ENV).ok(),
            std::env::var(JSON_EXPORT_ENV).ok(),
        )
    }

    fn from_vars(maildir: Option<String>, json_export: Option<String>) -> Self {
        let maildir = maildir.filter(|p| !p.is_empty());
        let json_export = json_export.filter(|p| !p.is_empty());

        let source = match (maildir, json_export) {
            (Some(path), _) => SourceConfig::Maildir { path },
            (None, Some(path)) => SourceConfig::JsonExport { path },
            (None, None) => SourceConfig::default(),
        };

        Self {
            source,
            ..Self::default()
        }
    }

    /// Open the configured mail store
    pub fn open_source(&self) -> Result<Arc<dyn MailSource>> {
        self.source.open()
    }

    /// Get the settings file path (~/.config/threadline/settings.json)
    pub fn default_settings_path() -> Option<PathBuf> {
        config::config_path(SETTINGS_FILE)
    }
}
