//! Maildir mail source
//!
//! Reads the inbox of a Maildir (`new/` then `cur/`) and parses each file with
//! `mail-parser`. Conversations are keyed by the root of the `References`
//! chain, so a thread's replies land in the same conversation as the message
//! that started it.

use chrono::{DateTime, Utc};
use log::{debug, warn};
use mail_parser::{HeaderValue, Message, MessageParser, MimeHeaders};
use std::fs;
use std::path::{Path, PathBuf};

use super::{MailSource, RawRecords, SourceError};
use crate::models::{Field, FieldError, ItemKind, RawMessage};

/// Subdirectories holding messages, in enumeration order
const MAIL_DIRS: [&str; 2] = ["new", "cur"];

/// Marker of the info suffix in a Maildir file name (`unique:2,FLAGS`)
const INFO_SEPARATOR: &str = ":2,";

/// Mail source backed by a Maildir directory
#[derive(Debug, Clone)]
pub struct MaildirSource {
    root: PathBuf,
    name: String,
}

impl MaildirSource {
    /// Open a Maildir, checking that `cur/` and `new/` exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let root = path.into();
        if !root.exists() {
            return Err(SourceError::NotFound { path: root });
        }
        if !MAIL_DIRS.iter().all(|dir| root.join(dir).is_dir()) {
            return Err(SourceError::NotAMaildir { path: root });
        }

        let name = format!("Maildir {}", root.display());
        Ok(Self { root, name })
    }

    /// Message files of one subdirectory, sorted by file name
    fn message_files(&self, dir: &str) -> Result<Vec<(PathBuf, String)>, SourceError> {
        let dir_path = self.root.join(dir);
        let entries = fs::read_dir(&dir_path).map_err(|e| SourceError::io(&dir_path, e))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SourceError::io(&dir_path, e))?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            // Dotfiles are not messages
            if file_name.starts_with('.') || !entry.path().is_file() {
                continue;
            }
            files.push((entry.path(), file_name));
        }

        files.sort_by(|a, b| a.1.cmp(&b.1));
        Ok(files)
    }
}

impl MailSource for MaildirSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn enumerate(&self) -> Result<RawRecords, SourceError> {
        let parser = MessageParser::default();
        let mut records: RawRecords = Vec::new();

        for dir in MAIL_DIRS {
            let files = self.message_files(dir)?;
            debug!("{}/{}: {} file(s)", self.root.display(), dir, files.len());

            for (path, file_name) in files {
                let record = MaildirRecord::load(&parser, &path, &file_name, dir == "new");
                records.push(Box::new(record));
            }
        }

        Ok(records)
    }

    fn item_count(&self) -> Result<usize, SourceError> {
        let mut count = 0;
        for dir in MAIL_DIRS {
            count += self.message_files(dir)?.len();
        }
        Ok(count)
    }

    /// Maildir++ subfolders: `.Name` directories containing `cur/`
    fn folders(&self) -> Result<Vec<String>, SourceError> {
        let entries = fs::read_dir(&self.root).map_err(|e| SourceError::io(&self.root, e))?;

        let mut folders = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| SourceError::io(&self.root, e))?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            let Some(folder) = file_name.strip_prefix('.') else {
                continue;
            };
            if folder.is_empty() || folder == "." {
                continue;
            }
            if entry.path().join("cur").is_dir() {
                folders.push(folder.to_string());
            }
        }

        folders.sort();
        Ok(folders)
    }
}

/// Header snapshot of one parsed message
#[derive(Debug, Clone, Default)]
struct Envelope {
    calendar: bool,
    subject: Option<String>,
    thread_key: Option<String>,
    received_at: Option<DateTime<Utc>>,
    /// Set when the `Date` header parsed to an unrepresentable instant
    bad_date: Option<String>,
    sender_name: Option<String>,
    sender_address: Option<String>,
}

impl Envelope {
    fn from_message(message: &Message<'_>) -> Self {
        let (received_at, bad_date) = match message.date() {
            Some(date) => match DateTime::<Utc>::from_timestamp(date.to_timestamp(), 0) {
                Some(dt) => (Some(dt), None),
                None => (None, Some(date.to_rfc3339())),
            },
            None => (None, None),
        };

        let sender = message.from().and_then(|from| from.first());

        Self {
            calendar: is_calendar(message),
            subject: message.subject().map(str::to_string),
            thread_key: thread_root(message),
            received_at,
            bad_date,
            sender_name: sender.and_then(|a| a.name()).map(str::to_string),
            sender_address: sender.and_then(|a| a.address()).map(str::to_string),
        }
    }
}

/// One Maildir file
#[derive(Debug, Clone)]
struct MaildirRecord {
    unique: String,
    unread: bool,
    /// Parsed headers, or why the file could not be read
    envelope: Result<Envelope, String>,
}

impl MaildirRecord {
    fn load(parser: &MessageParser, path: &Path, file_name: &str, in_new: bool) -> Self {
        let (unique, flags) = match file_name.split_once(INFO_SEPARATOR) {
            Some((unique, flags)) => (unique, flags),
            None => (file_name, ""),
        };
        let unread = in_new || !flags.contains('S');

        let envelope = match fs::read(path) {
            Ok(bytes) => parser
                .parse(&bytes)
                .map(|message| Envelope::from_message(&message))
                .ok_or_else(|| "not a parseable message".to_string()),
            Err(e) => Err(e.to_string()),
        };
        if let Err(reason) = &envelope {
            warn!("Unreadable message file {}: {}", path.display(), reason);
        }

        Self {
            unique: unique.to_string(),
            unread,
            envelope,
        }
    }

    fn envelope(&self, field: &'static str) -> Result<&Envelope, FieldError> {
        self.envelope
            .as_ref()
            .map_err(|reason| FieldError::unavailable(field, reason.clone()))
    }
}

impl RawMessage for MaildirRecord {
    fn kind(&self) -> Result<ItemKind, FieldError> {
        let envelope = self.envelope("kind")?;
        Ok(if envelope.calendar {
            ItemKind::Calendar
        } else {
            ItemKind::Mail
        })
    }

    fn subject(&self) -> Field<String> {
        Ok(self.envelope("subject")?.subject.clone())
    }

    fn thread_key(&self) -> Field<String> {
        Ok(self.envelope("thread_key")?.thread_key.clone())
    }

    fn received_at(&self) -> Field<DateTime<Utc>> {
        let envelope = self.envelope("received_at")?;
        match &envelope.bad_date {
            Some(date) => Err(FieldError::malformed(
                "received_at",
                format!("date out of range: {}", date),
            )),
            None => Ok(envelope.received_at),
        }
    }

    fn sender_name(&self) -> Field<String> {
        Ok(self.envelope("sender_name")?.sender_name.clone())
    }

    fn sender_address(&self) -> Field<String> {
        Ok(self.envelope("sender_address")?.sender_address.clone())
    }

    fn unread(&self) -> Field<bool> {
        Ok(Some(self.unread))
    }

    fn stable_id(&self) -> Field<String> {
        Ok(Some(self.unique.clone()))
    }
}

/// Thread root: first `References` id, else `In-Reply-To`, else own `Message-ID`
fn thread_root(message: &Message<'_>) -> Option<String> {
    first_id(message.references())
        .or_else(|| first_id(message.in_reply_to()))
        .or_else(|| message.message_id().map(str::to_string))
        .filter(|id| !id.is_empty())
}

fn first_id(value: &HeaderValue<'_>) -> Option<String> {
    match value {
        HeaderValue::Text(id) => Some(id.to_string()),
        HeaderValue::TextList(ids) => ids.first().map(|id| id.to_string()),
        _ => None,
    }
}

/// Meeting requests carry a `text/calendar` part or a calendar content class
fn is_calendar(message: &Message<'_>) -> bool {
    if message
        .parts
        .iter()
        .any(|part| part.is_content_type("text", "calendar"))
    {
        return true;
    }

    message.headers().iter().any(|header| {
        header.name().eq_ignore_ascii_case("Content-Class")
            && header
                .value()
                .as_text()
                .is_some_and(|class| class.to_ascii_lowercase().contains("calendarmessage"))
    })
}
