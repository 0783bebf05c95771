//! Mail source trait definitions

use std::path::PathBuf;

use crate::models::RawMessage;

/// Raw records of one enumeration pass, in store order
pub type RawRecords = Vec<Box<dyn RawMessage>>;

/// Failure to reach or enumerate a mail store as a whole
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("mail store not found: {}", .path.display())]
    NotFound { path: PathBuf },
    #[error("not a Maildir (missing cur/ or new/): {}", .path.display())]
    NotAMaildir { path: PathBuf },
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid mail export {}: {message}", .path.display())]
    Format { path: PathBuf, message: String },
    #[error("mail store unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Trait for mail store adapters
///
/// Enumeration order is defined by the store and only needs to be stable
/// for the duration of one pass.
pub trait MailSource: Send + Sync {
    /// Human-readable description of the store
    fn name(&self) -> &str;

    /// Enumerate every item in the inbox.
    ///
    /// Unreadable individual items are returned as records whose
    /// [`RawMessage::kind`] fails; only a failure to read the store as a
    /// whole is an error.
    fn enumerate(&self) -> Result<RawRecords, SourceError>;

    /// Number of items in the inbox
    fn item_count(&self) -> Result<usize, SourceError> {
        self.enumerate().map(|records| records.len())
    }

    /// Names of other folders in the store
    fn folders(&self) -> Result<Vec<String>, SourceError> {
        Ok(Vec::new())
    }
}
