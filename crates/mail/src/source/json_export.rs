//! Mail source reading a JSON export of an inbox
//!
//! The export is a JSON array with one object per item:
//!
//! ```json
//! [
//!   {
//!     "kind": "mail",
//!     "id": "00000000A1B2",
//!     "thread_key": "conv-42",
//!     "subject": "Re: ACME contract",
//!     "received_at": "2024-05-02T09:30:00Z",
//!     "sender_name": "Grace Hopper",
//!     "sender_address": "grace@example.com",
//!     "unread": true
//!   }
//! ]
//! ```
//!
//! Every key is optional. `kind` may be a tag (`"mail"`, `"appointment"`)
//! or a numeric item class (43 = mail) and defaults to mail when missing.
//! `received_at` is an RFC 3339 string or epoch milliseconds.

use chrono::{DateTime, Utc};
use log::debug;
use serde_json::{Map, Value};
use std::path::PathBuf;

use super::{MailSource, RawRecords, SourceError};
use crate::models::{Field, FieldError, ItemKind, RawMessage};

/// Mail source backed by a JSON export file
#[derive(Debug, Clone)]
pub struct JsonExportSource {
    path: PathBuf,
    name: String,
}

impl JsonExportSource {
    /// Open an export file, checking that it exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let path = path.into();
        if !path.is_file() {
            return Err(SourceError::NotFound { path });
        }
        let name = format!("JSON export {}", path.display());
        Ok(Self { path, name })
    }

    fn load(&self) -> Result<Vec<Value>, SourceError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| SourceError::io(&self.path, e))?;
        let value: Value = serde_json::from_str(&content).map_err(|e| SourceError::Format {
            path: self.path.clone(),
            message: e.to_string(),
        })?;

        match value {
            Value::Array(items) => Ok(items),
            other => Err(SourceError::Format {
                path: self.path.clone(),
                message: format!("expected an array of items, found {}", type_name(&other)),
            }),
        }
    }
}

impl MailSource for JsonExportSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn enumerate(&self) -> Result<RawRecords, SourceError> {
        let items = self.load()?;
        debug!("Loaded {} item(s) from {}", items.len(), self.path.display());
        Ok(items
            .into_iter()
            .map(|item| Box::new(JsonRecord(item)) as Box<dyn RawMessage>)
            .collect())
    }

    fn item_count(&self) -> Result<usize, SourceError> {
        self.load().map(|items| items.len())
    }
}

/// One element of the export array
#[derive(Debug, Clone)]
struct JsonRecord(Value);

impl JsonRecord {
    fn object(&self, field: &'static str) -> Result<&Map<String, Value>, FieldError> {
        self.0
            .as_object()
            .ok_or_else(|| FieldError::unavailable(field, "item is not a JSON object"))
    }

    /// Look up a key; `null` counts as absent
    fn get(&self, field: &'static str) -> Result<Option<&Value>, FieldError> {
        Ok(self.object(field)?.get(field).filter(|v| !v.is_null()))
    }

    fn text(&self, field: &'static str) -> Field<String> {
        match self.get(field)? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(unexpected(field, "a string", other)),
        }
    }
}

impl RawMessage for JsonRecord {
    fn kind(&self) -> Result<ItemKind, FieldError> {
        match self.get("kind")? {
            None => Ok(ItemKind::Mail),
            Some(Value::String(tag)) => Ok(ItemKind::from_tag(tag)),
            Some(Value::Number(n)) => n
                .as_i64()
                .map(ItemKind::from_class)
                .ok_or_else(|| FieldError::malformed("kind", format!("invalid item class {}", n))),
            Some(other) => Err(unexpected("kind", "a string or number", other)),
        }
    }

    fn subject(&self) -> Field<String> {
        self.text("subject")
    }

    fn thread_key(&self) -> Field<String> {
        self.text("thread_key")
    }

    fn received_at(&self) -> Field<DateTime<Utc>> {
        match self.get("received_at")? {
            None => Ok(None),
            Some(Value::String(s)) => DateTime::parse_from_rfc3339(s)
                .map(|dt| Some(dt.with_timezone(&Utc)))
                .map_err(|e| FieldError::malformed("received_at", format!("{}: {}", s, e))),
            Some(Value::Number(n)) => n
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(Some)
                .ok_or_else(|| {
                    FieldError::malformed("received_at", format!("timestamp {} out of range", n))
                }),
            Some(other) => Err(unexpected("received_at", "a string or number", other)),
        }
    }

    fn sender_name(&self) -> Field<String> {
        self.text("sender_name")
    }

    fn sender_address(&self) -> Field<String> {
        self.text("sender_address")
    }

    fn unread(&self) -> Field<bool> {
        match self.get("unread")? {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(unexpected("unread", "a boolean", other)),
        }
    }

    fn stable_id(&self) -> Field<String> {
        match self.get("id")? {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(unexpected("id", "a string or number", other)),
        }
    }
}

fn unexpected(field: &'static str, expected: &str, found: &Value) -> FieldError {
    FieldError::malformed(field, format!("expected {}, found {}", expected, type_name(found)))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_complete_record() {
        let record = JsonRecord(json!({
            "kind": 43,
            "id": "E1",
            "thread_key": "conv-1",
            "subject": "Hello",
            "received_at": "2024-05-02T09:30:00+02:00",
            "sender_name": "Grace",
            "sender_address": "grace@example.com",
            "unread": true
        }));

        assert_eq!(record.kind(), Ok(ItemKind::Mail));
        assert_eq!(record.stable_id(), Ok(Some("E1".to_string())));
        assert_eq!(record.thread_key(), Ok(Some("conv-1".to_string())));
        assert_eq!(record.subject(), Ok(Some("Hello".to_string())));
        assert_eq!(
            record.received_at(),
            Ok(Some(Utc.with_ymd_and_hms(2024, 5, 2, 7, 30, 0).unwrap()))
        );
        assert_eq!(record.sender_name(), Ok(Some("Grace".to_string())));
        assert_eq!(record.unread(), Ok(Some(true)));
    }

    #[test]
    fn test_missing_and_null_fields_are_absent() {
        let record = JsonRecord(json!({ "subject": null }));
        assert_eq!(record.kind(), Ok(ItemKind::Mail));
        assert_eq!(record.subject(), Ok(None));
        assert_eq!(record.received_at(), Ok(None));
        assert_eq!(record.unread(), Ok(None));
        assert_eq!(record.stable_id(), Ok(None));
    }

    #[test]
    fn test_epoch_millis_timestamp() {
        let record = JsonRecord(json!({ "received_at": 1_714_642_200_000_i64 }));
        assert_eq!(
            record.received_at(),
            Ok(Some(Utc.with_ymd_and_hms(2024, 5, 2, 9, 30, 0).unwrap()))
        );
    }

    #[test]
    fn test_wrong_types_are_field_errors() {
        let record = JsonRecord(json!({
            "subject": 12,
            "received_at": "yesterday",
            "unread": "yes",
            "sender_name": "Still readable"
        }));

        assert_eq!(record.subject().unwrap_err().field(), "subject");
        assert_eq!(record.received_at().unwrap_err().field(), "received_at");
        assert_eq!(record.unread().unwrap_err().field(), "unread");
        assert_eq!(record.sender_name(), Ok(Some("Still readable".to_string())));
    }

    #[test]
    fn test_calendar_kinds() {
        assert_eq!(
            JsonRecord(json!({ "kind": "appointment" })).kind(),
            Ok(ItemKind::Calendar)
        );
        assert_eq!(JsonRecord(json!({ "kind": 26 })).kind(), Ok(ItemKind::Calendar));
    }

    #[test]
    fn test_non_object_is_unclassifiable() {
        let record = JsonRecord(json!("just a string"));
        assert!(record.kind().is_err());
        assert!(record.subject().is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = JsonExportSource::open(dir.path().join("inbox.json"));
        assert!(matches!(result, Err(SourceError::NotFound { .. })));
    }

    #[test]
    fn test_top_level_must_be_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inbox.json");
        std::fs::write(&path, r#"{ "items": [] }"#).unwrap();

        let source = JsonExportSource::open(&path).unwrap();
        assert!(matches!(source.enumerate(), Err(SourceError::Format { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inbox.json");
        std::fs::write(&path, "[{").unwrap();

        let source = JsonExportSource::open(&path).unwrap();
        assert!(matches!(source.enumerate(), Err(SourceError::Format { .. })));
    }

    #[test]
    fn test_enumerate_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inbox.json");
        std::fs::write(
            &path,
            r#"[{ "subject": "one" }, { "subject": "two", "kind": "calendar" }]"#,
        )
        .unwrap();

        let source = JsonExportSource::open(&path).unwrap();
        let records = source.enumerate().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].kind(), Ok(ItemKind::Calendar));
        assert_eq!(source.item_count().unwrap(), 2);
    }
}
