//! Application-layer command handlers.

pub mod chat;
