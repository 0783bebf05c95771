//! Domain models for raw records, normalized messages and conversations

mod conversation;
mod message;
mod raw;

pub use conversation::{ConversationGroup, GroupError};
pub use message::{MessageBuilder, NO_SUBJECT, NormalizedMessage, ThreadKey, UNKNOWN_SENDER};
pub use raw::{Field, FieldError, ItemKind, RawMessage};
