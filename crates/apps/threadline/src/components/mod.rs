//! Reusable UI components for Threadline

mod conversation_card;
pub mod search_box;
mod stats_panel;

pub use conversation_card::ConversationCard;
pub use search_box::{SearchBox, SearchBoxEvent};
pub use stats_panel::StatsPanel;
