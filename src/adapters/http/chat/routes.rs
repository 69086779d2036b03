//! Route definitions for chat endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{chat, end_conversation, health, ChatAppState};

/// Builds the chat router with all endpoints wired to the given state.
pub fn chat_routes(state: ChatAppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/conversations/:id/end", post(end_conversation))
        .route("/api/health", get(health))
        .with_state(state)
}
