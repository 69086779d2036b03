//! EndConversationHandler - close a conversation to further turns.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::conversation::ConversationStore;
use crate::domain::foundation::ConversationId;

/// Error type for ending conversations.
#[derive(Debug, Clone, Error)]
pub enum EndConversationError {
    #[error("conversation '{0}' not found")]
    NotFound(ConversationId),
}

/// Handler that marks a conversation as ended.
///
/// Ending is irreversible: there is no reactivate operation. The entry stays
/// in the store until the expiry sweep reclaims it.
pub struct EndConversationHandler {
    store: Arc<ConversationStore>,
}

impl EndConversationHandler {
    pub fn new(store: Arc<ConversationStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, id: ConversationId) -> Result<(), EndConversationError> {
        let conversation = self
            .store
            .get(&id)
            .await
            .ok_or_else(|| EndConversationError::NotFound(id.clone()))?;

        conversation.lock().await.end();
        tracing::info!(conversation_id = %id, "conversation ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ends_an_existing_conversation() {
        let store = Arc::new(ConversationStore::new());
        let id = ConversationId::new("c1");
        let (conv, _) = store.get_or_create(Some(id.clone())).await;

        let handler = EndConversationHandler::new(store);
        handler.handle(id).await.unwrap();

        assert!(!conv.lock().await.is_active());
    }

    #[tokio::test]
    async fn unknown_conversation_is_not_found() {
        let store = Arc::new(ConversationStore::new());
        let handler = EndConversationHandler::new(store);

        let result = handler.handle(ConversationId::new("missing")).await;
        assert!(matches!(result, Err(EndConversationError::NotFound(_))));
    }
}
