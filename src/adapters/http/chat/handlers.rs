//! HTTP handlers for chat endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::chat::{
    EndConversationError, EndConversationHandler, SendMessageCommand, SendMessageError,
    SendMessageHandler,
};
use crate::domain::conversation::ConversationStore;
use crate::domain::foundation::ConversationId;
use crate::ports::CompletionService;

use super::dto::{
    ChatRequest, ChatResponse, ConversationStats, EndConversationResponse, ErrorResponse,
    HealthResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct ChatAppState {
    pub store: Arc<ConversationStore>,
    pub completion: Arc<dyn CompletionService>,
}

impl ChatAppState {
    pub fn new(store: Arc<ConversationStore>, completion: Arc<dyn CompletionService>) -> Self {
        Self { store, completion }
    }

    pub fn send_message_handler(&self) -> SendMessageHandler {
        SendMessageHandler::new(self.store.clone(), self.completion.clone())
    }

    pub fn end_conversation_handler(&self) -> EndConversationHandler {
        EndConversationHandler::new(self.store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════

/// Run one chat turn.
///
/// POST /api/chat
pub async fn chat(
    State(app_state): State<ChatAppState>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let cmd = SendMessageCommand {
        conversation_id: req.conversation_id.map(ConversationId::new),
        role: req.role,
        message: req.message,
    };

    let handler = app_state.send_message_handler();
    let result = handler.handle(cmd).await.map_err(|e| match e {
        SendMessageError::Validation(messages) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::validation(messages)),
        ),
        SendMessageError::ConversationEnded(id) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::conversation_ended(id.as_str())),
        ),
        SendMessageError::Completion(err) => {
            tracing::error!(error = %err, "completion service failure");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse::service_unavailable()),
            )
        }
    })?;

    let response = ChatResponse {
        response: result.reply,
        conversation_id: result.conversation_id.to_string(),
        crisis_detected: result.crisis_detected.then_some(true),
        crisis_severity: result.crisis_detected.then_some(result.crisis_severity),
    };

    Ok::<_, (StatusCode, Json<ErrorResponse>)>((StatusCode::OK, Json(response)))
}

/// End a conversation.
///
/// POST /api/conversations/{id}/end
pub async fn end_conversation(
    State(app_state): State<ChatAppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let handler = app_state.end_conversation_handler();
    handler
        .handle(ConversationId::new(id.clone()))
        .await
        .map_err(|e| match e {
            EndConversationError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found("Conversation", &id)),
            ),
        })?;

    let response = EndConversationResponse {
        message: format!("Conversation '{id}' ended"),
    };
    Ok::<_, (StatusCode, Json<ErrorResponse>)>((StatusCode::OK, Json(response)))
}

/// Health check with store occupancy.
///
/// GET /api/health
pub async fn health(State(app_state): State<ChatAppState>) -> impl IntoResponse {
    let stats = app_state.store.stats().await;

    let response = HealthResponse {
        status: "ok".to_string(),
        conversations: ConversationStats {
            total: stats.total,
            active: stats.active,
        },
    };
    (StatusCode::OK, Json(response))
}
