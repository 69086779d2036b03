//! Mock completion service for testing.
//!
//! Configurable queue of replies and injected errors, plus call recording,
//! so tests run without calling the real completion API.
//!
//! # Example
//!
//! ```ignore
//! let service = MockCompletionService::new()
//!     .with_reply("I hear you")
//!     .with_error(CompletionError::unavailable("down"));
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::conversation::Message;
use crate::ports::{CompletionError, CompletionService, ProviderInfo};

/// Mock completion service with queued outcomes and call tracking.
#[derive(Debug, Clone, Default)]
pub struct MockCompletionService {
    /// Pre-configured outcomes, consumed in order.
    outcomes: Arc<Mutex<VecDeque<Result<String, CompletionError>>>>,
    /// Message lists from every call, for verification.
    calls: Arc<Mutex<Vec<Vec<Message>>>>,
}

impl MockCompletionService {
    /// Creates a mock with no queued outcomes.
    ///
    /// When the queue is exhausted the mock returns a default reply.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(reply.into()));
        self
    }

    /// Queues an error outcome.
    pub fn with_error(self, error: CompletionError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    /// Returns how many completions were requested.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns the message lists from every recorded call.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for MockCompletionService {
    async fn complete(&self, messages: &[Message]) -> Result<String, CompletionError> {
        self.calls.lock().unwrap().push(messages.to_vec());

        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Mock reply".to_string()))
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("mock", "mock-model-1")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::Role;

    fn history() -> Vec<Message> {
        vec![Message::system("preamble"), Message::user("hello")]
    }

    #[tokio::test]
    async fn returns_replies_in_order() {
        let service = MockCompletionService::new()
            .with_reply("first")
            .with_reply("second");

        assert_eq!(service.complete(&history()).await.unwrap(), "first");
        assert_eq!(service.complete(&history()).await.unwrap(), "second");
    }

    #[tokio::test]
    async fn returns_default_after_queue_exhausted() {
        let service = MockCompletionService::new().with_reply("only one");

        service.complete(&history()).await.unwrap();
        assert_eq!(service.complete(&history()).await.unwrap(), "Mock reply");
    }

    #[tokio::test]
    async fn returns_queued_errors() {
        let service = MockCompletionService::new()
            .with_error(CompletionError::unavailable("down"));

        let result = service.complete(&history()).await;
        assert!(matches!(result, Err(CompletionError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn records_every_call() {
        let service = MockCompletionService::new();
        assert_eq!(service.call_count(), 0);

        service.complete(&history()).await.unwrap();
        service.complete(&history()).await.unwrap();

        assert_eq!(service.call_count(), 2);
        let calls = service.calls();
        assert_eq!(calls[0][1].role, Role::User);
        assert_eq!(calls[0][1].content, "hello");
    }

    #[test]
    fn reports_mock_provider_info() {
        let info = MockCompletionService::new().provider_info();
        assert_eq!(info.name, "mock");
    }
}
