//! Conversation domain: bounded multi-turn history and its registry.

pub mod conversation;
pub mod message;
pub mod store;

pub use conversation::{Conversation, MAX_CONTEXT_MESSAGES, SYSTEM_PREAMBLE};
pub use message::{Message, Role};
pub use store::{ConversationStore, SharedConversation, StoreStats};
