//! GPUI views for Threadline

mod conversation_list;

pub use conversation_list::ConversationListView;
