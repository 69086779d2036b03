//! Foundation types shared across the domain layer.

mod ids;
mod timestamp;

pub use ids::ConversationId;
pub use timestamp::Timestamp;
