//! In-memory conversation store with creation-on-miss and expiry sweeping.
//!
//! The store owns every conversation. Each entry sits behind its own
//! `tokio::sync::Mutex` so at most one turn per conversation is in flight at
//! a time; the shared map itself is guarded by an `RwLock`. Constructed
//! explicitly and injected into handlers, so tests can use isolated stores.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use tokio::sync::{Mutex, RwLock};

use super::conversation::Conversation;
use crate::domain::foundation::{ConversationId, Timestamp};

/// Handle to a stored conversation. The mutex serializes turns per key.
pub type SharedConversation = Arc<Mutex<Conversation>>;

/// Read-only snapshot of store occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of conversations currently held.
    pub total: usize,
    /// Number of those still accepting turns.
    pub active: usize,
}

/// Keyed registry of conversations.
#[derive(Debug, Default)]
pub struct ConversationStore {
    conversations: RwLock<HashMap<ConversationId, SharedConversation>>,
}

impl ConversationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
        }
    }

    /// Resolves a conversation, creating it on first reference.
    ///
    /// When `id` is absent a fresh key is generated. Callers must use the
    /// returned key for all subsequent calls: an absent input key produces a
    /// new one.
    pub async fn get_or_create(
        &self,
        id: Option<ConversationId>,
    ) -> (SharedConversation, ConversationId) {
        let id = id.unwrap_or_else(ConversationId::generate);

        {
            let map = self.conversations.read().await;
            if let Some(existing) = map.get(&id) {
                return (existing.clone(), id);
            }
        }

        let mut map = self.conversations.write().await;
        // Another task may have inserted between the read and write lock.
        let entry = map
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(Conversation::new(id.clone()))))
            .clone();
        (entry, id)
    }

    /// Looks up an existing conversation without creating one.
    pub async fn get(&self, id: &ConversationId) -> Option<SharedConversation> {
        self.conversations.read().await.get(id).cloned()
    }

    /// Removes a conversation. Returns whether an entry was removed.
    pub async fn delete(&self, id: &ConversationId) -> bool {
        self.conversations.write().await.remove(id).is_some()
    }

    /// Removes every conversation inactive for longer than `ttl`.
    ///
    /// Conversations with a turn in flight hold their mutex and are skipped;
    /// an in-flight turn means recent activity anyway. Returns the number of
    /// entries removed, for logging.
    pub async fn sweep_expired(&self, ttl: Duration) -> usize {
        let cutoff = Timestamp::now().minus(ttl);

        let candidates: Vec<ConversationId> = {
            let map = self.conversations.read().await;
            map.iter()
                .filter_map(|(id, conv)| {
                    conv.try_lock()
                        .ok()
                        .filter(|guard| guard.last_activity_at().is_before(&cutoff))
                        .map(|_| id.clone())
                })
                .collect()
        };

        if candidates.is_empty() {
            return 0;
        }
        self.remove_expired(&candidates, &cutoff).await
    }

    /// Removes the candidates that are still expired.
    ///
    /// A turn may land between candidate collection and removal, so each
    /// entry is re-checked under the write lock: an entry that cannot be
    /// locked or whose activity has resumed is retained.
    async fn remove_expired(&self, candidates: &[ConversationId], cutoff: &Timestamp) -> usize {
        let mut map = self.conversations.write().await;
        let mut removed = 0;
        for id in candidates {
            let still_expired = map
                .get(id)
                .and_then(|conv| conv.try_lock().ok())
                .is_some_and(|guard| guard.last_activity_at().is_before(cutoff));
            if still_expired && map.remove(id).is_some() {
                removed += 1;
            }
        }
        removed
    }

    /// Returns occupancy counts. Read-only; does not mutate any entry.
    pub async fn stats(&self) -> StoreStats {
        let map = self.conversations.read().await;
        let total = map.len();
        let mut active = 0;
        for conv in map.values() {
            match conv.try_lock() {
                Ok(guard) => {
                    if guard.is_active() {
                        active += 1;
                    }
                }
                // A locked entry has a turn in flight, hence is active.
                Err(_) => active += 1,
            }
        }
        StoreStats { total, active }
    }
}
