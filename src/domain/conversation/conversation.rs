//! Conversation entity: ordered message history with a fixed system preamble.
//!
//! # Invariants
//!
//! - `messages[0]` is always the system preamble; it is never removed or
//!   reordered, across any sequence of appends and truncations.
//! - `last_activity_at` advances on every append.
//! - Once ended, a conversation never becomes active again.

use super::message::{Message, Role};
use crate::domain::foundation::{ConversationId, Timestamp};

/// Fixed system preamble seeded as the first message of every conversation.
pub const SYSTEM_PREAMBLE: &str = "You are a compassionate mental-health support assistant for students. \
Listen without judgement, validate feelings, and respond with warmth in plain language. \
Encourage healthy coping strategies and professional help where appropriate. \
You are not a therapist and must not diagnose conditions or prescribe treatment. \
If a message suggests the person may be in crisis or at risk of harming themselves, \
respond with empathy and encourage them to contact a crisis helpline or emergency services immediately.";

/// Maximum number of non-preamble messages retained after truncation.
///
/// Bounds the prompt sent to the completion service regardless of
/// conversation length, at the cost of discarding older turns.
pub const MAX_CONTEXT_MESSAGES: usize = 20;

/// A single multi-turn conversation, exclusively owned by the store.
#[derive(Debug, Clone)]
pub struct Conversation {
    id: ConversationId,
    messages: Vec<Message>,
    active: bool,
    created_at: Timestamp,
    last_activity_at: Timestamp,
}

impl Conversation {
    /// Creates an active conversation seeded with the system preamble.
    pub fn new(id: ConversationId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            messages: vec![Message::system(SYSTEM_PREAMBLE)],
            active: true,
            created_at: now,
            last_activity_at: now,
        }
    }

    /// Returns the conversation id.
    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    /// Appends a message and updates the activity timestamp.
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
        self.last_activity_at = Timestamp::now();
    }

    /// Returns the full history, preamble included, in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns true while the conversation accepts new turns.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Ends the conversation. Irreversible.
    pub fn end(&mut self) {
        self.active = false;
    }

    /// Drops history beyond the context window.
    ///
    /// Keeps the preamble plus the most recent [`MAX_CONTEXT_MESSAGES`]
    /// messages in their original order. No-op when already within bounds.
    pub fn truncate(&mut self) {
        if self.messages.len() <= MAX_CONTEXT_MESSAGES + 1 {
            return;
        }
        let tail_start = self.messages.len() - MAX_CONTEXT_MESSAGES;
        let mut retained = Vec::with_capacity(MAX_CONTEXT_MESSAGES + 1);
        retained.push(self.messages[0].clone());
        retained.extend_from_slice(&self.messages[tail_start..]);
        self.messages = retained;
    }

    /// Returns when the conversation was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns the time of the most recent append.
    pub fn last_activity_at(&self) -> &Timestamp {
        &self.last_activity_at
    }

    /// Test-only helper to backdate activity for expiry scenarios.
    #[cfg(test)]
    pub(crate) fn set_last_activity(&mut self, ts: Timestamp) {
        self.last_activity_at = ts;
    }
}
