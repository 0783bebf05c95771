//! Mail store adapters
//!
//! Each adapter enumerates the raw records of one local mail store. The
//! adapter value is the connection handle: opening it checks that the store
//! is reachable, and enumeration reads a fresh snapshot every time.

mod json_export;
mod maildir;
mod memory;
mod traits;

pub use json_export::JsonExportSource;
pub use maildir::MaildirSource;
pub use memory::{MemoryRecord, MemorySource};
pub use traits::{MailSource, RawRecords, SourceError};
