//! HTTP DTOs for chat endpoints.
//!
//! These types decouple the JSON API from domain types.

use serde::{Deserialize, Serialize};

use crate::domain::crisis::CrisisSeverity;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request for one chat turn.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Message text, 1-2000 characters after trimming.
    pub message: String,
    /// Existing conversation key; the server generates one when absent.
    pub conversation_id: Option<String>,
    /// One of `user` or `system`; defaults to `user`.
    pub role: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for a completed chat turn.
///
/// The crisis fields are present only when a crisis was detected.
#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_detected: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crisis_severity: Option<CrisisSeverity>,
}

/// Response for ending a conversation.
#[derive(Debug, Clone, Serialize)]
pub struct EndConversationResponse {
    pub message: String,
}

/// Health-check response with store occupancy.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub conversations: ConversationStats,
}

/// Store occupancy counts.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationStats {
    pub total: usize,
    pub active: usize,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Validation failure carrying the full list of violated constraints.
    pub fn validation(messages: Vec<String>) -> Self {
        Self {
            code: "VALIDATION_FAILED".to_string(),
            message: messages.join("; "),
            details: Some(serde_json::json!({ "errors": messages })),
        }
    }

    pub fn conversation_ended(id: &str) -> Self {
        Self {
            code: "CONVERSATION_ENDED".to_string(),
            message: format!("Conversation '{id}' has ended and no longer accepts messages"),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{resource_type} not found: {id}"),
            details: None,
        }
    }

    /// Generic service-unavailable error. Upstream provider detail is logged,
    /// never surfaced here.
    pub fn service_unavailable() -> Self {
        Self {
            code: "SERVICE_UNAVAILABLE".to_string(),
            message: "The assistant is temporarily unavailable. Please try again shortly."
                .to_string(),
            details: None,
        }
    }
}
