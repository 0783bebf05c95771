//! Mail crate - Conversation grouping for a local inbox
//!
//! This crate provides platform-independent mail functionality including:
//! - Raw record capability interface and domain models
//! - Normalization of raw records with safe defaults
//! - Grouping into conversations and substring search
//! - Mail store adapters (Maildir, JSON export, in-memory)
//! - The refresh pipeline and settings for the desktop app
//!
//! This crate has zero UI dependencies.

pub mod conversations;
pub mod models;
pub mod normalize;
pub mod refresh;
pub mod settings;
pub mod source;

pub use conversations::{Grouping, filter, group};
pub use models::{
    ConversationGroup, Field, FieldError, GroupError, ItemKind, MessageBuilder, NO_SUBJECT,
    NormalizedMessage, RawMessage, ThreadKey, UNKNOWN_SENDER,
};
pub use normalize::{FALLBACK_KEY_PREFIX, Skip, normalize};
pub use refresh::{Inbox, InboxState, RefreshStats, refresh_inbox};
pub use settings::{Settings, SourceConfig};
pub use source::{
    JsonExportSource, MailSource, MaildirSource, MemoryRecord, MemorySource, RawRecords,
    SourceError,
};
