/// Conversation state
/// Single source of truth for the message sequence and its derived
/// presentation flags.

pub mod store;
pub mod types;

pub use store::ConversationStore;
pub use types::{Message, MessageKind, MessageRole};
