//! Raw mail records as exposed by a mail store adapter

use chrono::{DateTime, Utc};
use std::fmt;

/// Result of reading one optional property from a raw record.
///
/// `Ok(None)` means the property is absent; `Err` means reading it failed.
pub type Field<T> = Result<Option<T>, FieldError>;

/// Failure to read a single property of a raw record
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("field `{field}` is malformed: {reason}")]
    Malformed { field: &'static str, reason: String },
    #[error("field `{field}` is unavailable: {reason}")]
    Unavailable { field: &'static str, reason: String },
}

impl FieldError {
    pub fn malformed(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            field,
            reason: reason.into(),
        }
    }

    pub fn unavailable(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the property that could not be read
    pub fn field(&self) -> &'static str {
        match self {
            Self::Malformed { field, .. } | Self::Unavailable { field, .. } => field,
        }
    }
}

/// Kind of item found in a mail store folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Mail,
    Calendar,
    Contact,
    Task,
    Note,
    Other,
}

impl ItemKind {
    /// Parse a textual item tag such as `"mail"` or `"appointment"`.
    ///
    /// Unrecognised tags map to [`ItemKind::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "mail" | "email" | "message" | "ipm.note" => Self::Mail,
            "calendar" | "appointment" | "meeting" | "event" | "ipm.appointment" => {
                Self::Calendar
            }
            "contact" | "ipm.contact" => Self::Contact,
            "task" | "ipm.task" => Self::Task,
            "note" | "sticky" | "ipm.stickynote" => Self::Note,
            _ => Self::Other,
        }
    }

    /// Map a numeric desktop-client item class to a kind.
    ///
    /// 43 is a mail item; 26 and 53..=57 are appointments and meeting
    /// items; 40 contact; 48 task; 44 sticky note.
    pub fn from_class(class: i64) -> Self {
        match class {
            43 => Self::Mail,
            26 | 53..=57 => Self::Calendar,
            40 => Self::Contact,
            48 => Self::Task,
            44 => Self::Note,
            _ => Self::Other,
        }
    }

    pub fn is_mail(self) -> bool {
        self == Self::Mail
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Mail => "mail",
            Self::Calendar => "calendar",
            Self::Contact => "contact",
            Self::Task => "task",
            Self::Note => "note",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Capability interface over a raw, possibly incomplete mail record.
///
/// Every property is read independently so that one unreadable property
/// does not prevent reading the others.
pub trait RawMessage {
    /// Item kind. An error means the record cannot be classified at all.
    fn kind(&self) -> Result<ItemKind, FieldError>;

    fn subject(&self) -> Field<String>;

    /// Native conversation/thread identifier
    fn thread_key(&self) -> Field<String>;

    fn received_at(&self) -> Field<DateTime<Utc>>;

    fn sender_name(&self) -> Field<String>;

    fn sender_address(&self) -> Field<String>;

    fn unread(&self) -> Field<bool>;

    /// Store-assigned identifier, unique within the store
    fn stable_id(&self) -> Field<String>;
}
