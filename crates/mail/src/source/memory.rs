//! In-memory mail source (for testing)

use chrono::{DateTime, Utc};

use super::{MailSource, RawRecords, SourceError};
use crate::models::{Field, FieldError, ItemKind, RawMessage};

/// A raw record held in memory
///
/// Fields named with [`broken`](Self::broken) fail to read, which exercises
/// the normalizer's recovery paths.
#[derive(Debug, Clone)]
pub struct MemoryRecord {
    kind: ItemKind,
    subject: Option<String>,
    thread_key: Option<String>,
    received_at: Option<DateTime<Utc>>,
    sender_name: Option<String>,
    sender_address: Option<String>,
    unread: Option<bool>,
    stable_id: Option<String>,
    broken: Vec<&'static str>,
}

impl MemoryRecord {
    /// A mail item with every property absent
    pub fn mail() -> Self {
        Self::of_kind(ItemKind::Mail)
    }

    pub fn of_kind(kind: ItemKind) -> Self {
        Self {
            kind,
            subject: None,
            thread_key: None,
            received_at: None,
            sender_name: None,
            sender_address: None,
            unread: None,
            stable_id: None,
            broken: Vec::new(),
        }
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn thread_key(mut self, key: impl Into<String>) -> Self {
        self.thread_key = Some(key.into());
        self
    }

    pub fn received_at(mut self, received_at: DateTime<Utc>) -> Self {
        self.received_at = Some(received_at);
        self
    }

    pub fn sender(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self.sender_address = Some(address.into());
        self
    }

    pub fn sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }

    pub fn unread(mut self, unread: bool) -> Self {
        self.unread = Some(unread);
        self
    }

    pub fn stable_id(mut self, id: impl Into<String>) -> Self {
        self.stable_id = Some(id.into());
        self
    }

    /// Make reading `field` fail
    pub fn broken(mut self, field: &'static str) -> Self {
        self.broken.push(field);
        self
    }

    fn read<T: Clone>(&self, field: &'static str, value: &Option<T>) -> Field<T> {
        if self.broken.contains(&field) {
            return Err(FieldError::unavailable(field, "simulated read failure"));
        }
        Ok(value.clone())
    }
}

impl RawMessage for MemoryRecord {
    fn kind(&self) -> Result<ItemKind, FieldError> {
        if self.broken.contains(&"kind") {
            return Err(FieldError::unavailable("kind", "simulated read failure"));
        }
        Ok(self.kind)
    }

    fn subject(&self) -> Field<String> {
        self.read("subject", &self.subject)
    }

    fn thread_key(&self) -> Field<String> {
        self.read("thread_key", &self.thread_key)
    }

    fn received_at(&self) -> Field<DateTime<Utc>> {
        self.read("received_at", &self.received_at)
    }

    fn sender_name(&self) -> Field<String> {
        self.read("sender_name", &self.sender_name)
    }

    fn sender_address(&self) -> Field<String> {
        self.read("sender_address", &self.sender_address)
    }

    fn unread(&self) -> Field<bool> {
        self.read("unread", &self.unread)
    }

    fn stable_id(&self) -> Field<String> {
        self.read("stable_id", &self.stable_id)
    }
}

/// Mail source backed by a list of records
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<MemoryRecord>,
    folders: Vec<String>,
    /// When set, enumeration fails with this reason
    unavailable: Option<String>,
}

impl MemorySource {
    pub fn new(records: Vec<MemoryRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// A source whose enumeration always fails
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            unavailable: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn with_folders(mut self, folders: Vec<String>) -> Self {
        self.folders = folders;
        self
    }
}

impl MailSource for MemorySource {
    fn name(&self) -> &str {
        "memory"
    }

    fn enumerate(&self) -> Result<RawRecords, SourceError> {
        if let Some(reason) = &self.unavailable {
            return Err(SourceError::Unavailable(reason.clone()));
        }
        Ok(self
            .records
            .iter()
            .cloned()
            .map(|record| Box::new(record) as Box<dyn RawMessage>)
            .collect())
    }

    fn folders(&self) -> Result<Vec<String>, SourceError> {
        if let Some(reason) = &self.unavailable {
            return Err(SourceError::Unavailable(reason.clone()));
        }
        Ok(self.folders.clone())
    }
}
