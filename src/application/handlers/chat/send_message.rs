//! SendMessageHandler - run one chat turn through the crisis pipeline.
//!
//! Composes the store, the crisis classifier, and the completion service:
//! validate input, classify, append the (possibly annotated) user message,
//! truncate the context window, call the provider, append the reply. The
//! per-conversation mutex is held for the whole sequence so turns on the
//! same key never interleave.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::conversation::{ConversationStore, Role};
use crate::domain::crisis::{classify, CrisisSeverity};
use crate::domain::foundation::ConversationId;
use crate::ports::{CompletionError, CompletionService};

/// Maximum accepted message length, in characters after trimming.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Command to run one chat turn.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// Existing conversation key; absent on the first turn.
    pub conversation_id: Option<ConversationId>,
    /// Raw role string from the client; absent defaults to `user`.
    pub role: Option<String>,
    /// Raw message text.
    pub message: String,
}

/// Result of a completed turn.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    /// Assistant reply text.
    pub reply: String,
    /// Resolved conversation key; clients must reuse it on later turns.
    pub conversation_id: ConversationId,
    /// Whether the crisis filter tripped on this message.
    pub crisis_detected: bool,
    /// Severity under the immediate-risk rule.
    pub crisis_severity: CrisisSeverity,
}

/// Error type for chat turns.
#[derive(Debug, Error)]
pub enum SendMessageError {
    /// Input failed validation; carries every violated constraint.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The conversation no longer accepts turns.
    #[error("conversation '{0}' has ended")]
    ConversationEnded(ConversationId),

    /// The completion service failed. By this point the user's message has
    /// already been appended; the turn is spent even though no reply arrived.
    #[error("completion service failed: {0}")]
    Completion(#[from] CompletionError),
}

/// Handler orchestrating one turn against a conversation.
pub struct SendMessageHandler {
    store: Arc<ConversationStore>,
    completion: Arc<dyn CompletionService>,
}

impl SendMessageHandler {
    pub fn new(store: Arc<ConversationStore>, completion: Arc<dyn CompletionService>) -> Self {
        Self { store, completion }
    }

    pub async fn handle(
        &self,
        cmd: SendMessageCommand,
    ) -> Result<SendMessageResult, SendMessageError> {
        // 1-2. Validate message and role, collecting every violation.
        let mut violations = Vec::new();

        let trimmed = cmd.message.trim();
        if trimmed.is_empty() {
            violations.push("message must not be empty".to_string());
        }
        let length = trimmed.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            violations.push(format!(
                "message must be at most {MAX_MESSAGE_LENGTH} characters, got {length}"
            ));
        }

        let role = match cmd.role.as_deref() {
            None | Some("user") => Role::User,
            Some("system") => Role::System,
            Some(other) => {
                violations.push(format!(
                    "role '{other}' is not allowed: expected 'user' or 'system'"
                ));
                Role::User
            }
        };

        if !violations.is_empty() {
            return Err(SendMessageError::Validation(violations));
        }

        // 3. Resolve the conversation, creating it on first reference.
        let (conversation, conversation_id) =
            self.store.get_or_create(cmd.conversation_id).await;

        // Serializes turns per key; held across the completion call.
        let mut conversation = conversation.lock().await;

        // 4. Reject ended conversations before any mutation.
        if !conversation.is_active() {
            return Err(SendMessageError::ConversationEnded(conversation_id));
        }

        // 5-6. Classify; on crisis, the annotation becomes part of the stored
        // message so future turns keep the injected context.
        let assessment = classify(trimmed);
        let stored_message = match assessment.annotation {
            Some(annotation) => {
                tracing::warn!(
                    conversation_id = %conversation_id,
                    severity = %assessment.severity,
                    "crisis signal detected in user message"
                );
                format!("{trimmed}{annotation}")
            }
            None => trimmed.to_string(),
        };

        // 7-8. Append and bound the context window.
        conversation.add_message(role, stored_message);
        conversation.truncate();

        // 9. One completion call, no retry. On failure the user's message
        // stays appended (accepted inconsistency).
        let reply = self.completion.complete(conversation.messages()).await?;

        // 10. Record the assistant reply.
        conversation.add_message(Role::Assistant, reply.clone());

        tracing::info!(
            conversation_id = %conversation_id,
            messages = conversation.messages().len(),
            crisis = assessment.is_crisis,
            "chat turn completed"
        );

        Ok(SendMessageResult {
            reply,
            conversation_id,
            crisis_detected: assessment.is_crisis,
            crisis_severity: assessment.severity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockCompletionService;
    use crate::domain::crisis::CRISIS_ANNOTATION;

    fn handler_with(
        store: Arc<ConversationStore>,
        mock: MockCompletionService,
    ) -> SendMessageHandler {
        SendMessageHandler::new(store, Arc::new(mock))
    }

    fn turn(message: &str) -> SendMessageCommand {
        SendMessageCommand {
            conversation_id: Some(ConversationId::new("c1")),
            role: None,
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn ordinary_turn_returns_reply_and_no_crisis() {
        let store = Arc::new(ConversationStore::new());
        let handler = handler_with(
            store.clone(),
            MockCompletionService::new().with_reply("I hear you"),
        );

        let result = handler
            .handle(turn("Hi, I'm stressed about exams"))
            .await
            .unwrap();

        assert_eq!(result.reply, "I hear you");
        assert_eq!(result.conversation_id, ConversationId::new("c1"));
        assert!(!result.crisis_detected);
        assert_eq!(result.crisis_severity, CrisisSeverity::None);

        // system + user + assistant
        let conv = store.get(&result.conversation_id).await.unwrap();
        assert_eq!(conv.lock().await.messages().len(), 3);
    }

    #[tokio::test]
    async fn crisis_turn_annotates_stored_message() {
        let store = Arc::new(ConversationStore::new());
        let handler = handler_with(
            store.clone(),
            MockCompletionService::new().with_reply("You matter, and help is available"),
        );

        let result = handler
            .handle(turn("I feel hopeless and don't want to live anymore"))
            .await
            .unwrap();

        assert!(result.crisis_detected);
        assert_eq!(result.crisis_severity, CrisisSeverity::Moderate);

        let conv = store.get(&result.conversation_id).await.unwrap();
        let conv = conv.lock().await;
        let user_message = &conv.messages()[1];
        assert!(user_message.content.starts_with("I feel hopeless"));
        assert!(user_message.content.ends_with(CRISIS_ANNOTATION));
    }

    #[tokio::test]
    async fn immediate_risk_language_reports_high_severity() {
        let store = Arc::new(ConversationStore::new());
        let handler = handler_with(store, MockCompletionService::new().with_reply("ok"));

        let result = handler.handle(turn("I want to kill myself")).await.unwrap();

        assert!(result.crisis_detected);
        assert_eq!(result.crisis_severity, CrisisSeverity::High);
    }

    #[tokio::test]
    async fn missing_conversation_id_generates_one() {
        let store = Arc::new(ConversationStore::new());
        let handler = handler_with(store.clone(), MockCompletionService::new());

        let cmd = SendMessageCommand {
            conversation_id: None,
            role: None,
            message: "hello".to_string(),
        };
        let result = handler.handle(cmd).await.unwrap();

        assert!(store.get(&result.conversation_id).await.is_some());
    }

    #[tokio::test]
    async fn validation_reports_every_violation() {
        let store = Arc::new(ConversationStore::new());
        let handler = handler_with(store, MockCompletionService::new());

        let cmd = SendMessageCommand {
            conversation_id: None,
            role: Some("bot".to_string()),
            message: "   ".to_string(),
        };

        match handler.handle(cmd).await {
            Err(SendMessageError::Validation(messages)) => {
                assert_eq!(messages.len(), 2);
                assert!(messages[0].contains("empty"));
                assert!(messages[1].contains("bot"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn overlong_message_is_rejected() {
        let store = Arc::new(ConversationStore::new());
        let handler = handler_with(store.clone(), MockCompletionService::new());

        let cmd = SendMessageCommand {
            conversation_id: None,
            role: None,
            message: "x".repeat(MAX_MESSAGE_LENGTH + 1),
        };

        assert!(matches!(
            handler.handle(cmd).await,
            Err(SendMessageError::Validation(_))
        ));
        // Rejected before any mutation: nothing was created.
        assert_eq!(store.stats().await.total, 0);
    }

    #[tokio::test]
    async fn system_role_is_accepted() {
        let store = Arc::new(ConversationStore::new());
        let handler = handler_with(store.clone(), MockCompletionService::new());

        let cmd = SendMessageCommand {
            conversation_id: Some(ConversationId::new("c1")),
            role: Some("system".to_string()),
            message: "context note".to_string(),
        };
        let result = handler.handle(cmd).await.unwrap();

        let conv = store.get(&result.conversation_id).await.unwrap();
        assert_eq!(conv.lock().await.messages()[1].role, Role::System);
    }

    #[tokio::test]
    async fn ended_conversation_rejects_turns_without_mutation() {
        let store = Arc::new(ConversationStore::new());
        let id = ConversationId::new("c1");
        let (conv, _) = store.get_or_create(Some(id.clone())).await;
        conv.lock().await.end();

        let handler = handler_with(store.clone(), MockCompletionService::new());
        let result = handler.handle(turn("hello")).await;

        assert!(matches!(
            result,
            Err(SendMessageError::ConversationEnded(ref ended)) if *ended == id
        ));
        assert_eq!(conv.lock().await.messages().len(), 1);
    }

    #[tokio::test]
    async fn completion_failure_leaves_user_message_appended() {
        let store = Arc::new(ConversationStore::new());
        let handler = handler_with(
            store.clone(),
            MockCompletionService::new()
                .with_error(CompletionError::unavailable("upstream 502")),
        );

        let result = handler.handle(turn("hello")).await;
        assert!(matches!(result, Err(SendMessageError::Completion(_))));

        // User message is spent; no assistant reply was appended.
        let conv = store.get(&ConversationId::new("c1")).await.unwrap();
        let conv = conv.lock().await;
        assert_eq!(conv.messages().len(), 2);
        assert_eq!(conv.messages()[1].role, Role::User);
    }

    #[tokio::test]
    async fn long_conversation_is_truncated_before_completion() {
        let store = Arc::new(ConversationStore::new());
        let mut mock = MockCompletionService::new();
        for _ in 0..30 {
            mock = mock.with_reply("ok");
        }
        let handler = handler_with(store.clone(), mock);

        for i in 0..30 {
            handler.handle(turn(&format!("message {i}"))).await.unwrap();
        }

        let conv = store.get(&ConversationId::new("c1")).await.unwrap();
        let conv = conv.lock().await;
        // Preamble + window, plus the assistant reply appended after truncation.
        assert!(conv.messages().len() <= crate::domain::conversation::MAX_CONTEXT_MESSAGES + 2);
        assert_eq!(conv.messages()[0].role, Role::System);
    }
}
