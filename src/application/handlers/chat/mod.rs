//! Chat command handlers.

mod end_conversation;
mod send_message;

pub use end_conversation::{EndConversationError, EndConversationHandler};
pub use send_message::{
    SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageResult,
    MAX_MESSAGE_LENGTH,
};
