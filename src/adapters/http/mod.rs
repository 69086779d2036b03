//! HTTP boundary adapters (axum).

pub mod chat;
