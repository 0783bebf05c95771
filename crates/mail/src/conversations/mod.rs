//! Conversation API for UI consumption
//!
//! Groups normalized messages into ordered conversations and filters them
//! for display.

mod filter;
mod group;

pub use filter::filter;
pub use group::{Grouping, group};
