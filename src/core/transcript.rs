use serde::{Deserialize, Serialize};

use crate::api::GenerateOutcome;
use crate::core::message::{ExchangeId, Message};

/// Where one exchange stands in its response cycle.
///
/// `Composing` lives in the input area and never reaches the transcript, so
/// it is not represented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangePhase {
    /// User message rendered; the typing indicator has not appeared yet.
    Sent,
    /// Typing indicator rendered, request in flight.
    Pending,
    /// Placeholder replaced by the reply.
    Resolved,
    /// Placeholder replaced by an error.
    Failed,
}

/// Ordered conversation history.
///
/// Records are only ever appended at the tail or replaced in place, and a
/// pending placeholder is always addressed by its exchange id, so responses
/// that complete out of order land in their own slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn push_user(&mut self, text: impl Into<String>, exchange: ExchangeId) {
        self.messages.push(Message::user(text, exchange));
    }

    /// Append a typing-indicator placeholder for `exchange`. Returns `false`
    /// when the exchange already has one.
    pub fn begin_pending(&mut self, exchange: ExchangeId) -> bool {
        if self.pending_index(exchange).is_some() {
            return false;
        }
        self.messages.push(Message::pending(exchange));
        true
    }

    /// Replace the placeholder of `exchange` with the outcome. Returns the
    /// index of the replaced record, or `None` when no placeholder exists
    /// (for example after the transcript was cleared).
    pub fn resolve(&mut self, exchange: ExchangeId, outcome: &GenerateOutcome) -> Option<usize> {
        let index = self.pending_index(exchange)?;
        self.messages[index] = Message::from_outcome(exchange, outcome);
        Some(index)
    }

    pub fn pending_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_pending()).count()
    }

    pub fn phase_of(&self, exchange: ExchangeId) -> Option<ExchangePhase> {
        let mut phase = None;
        for message in self
            .messages
            .iter()
            .filter(|m| m.exchange == Some(exchange))
        {
            phase = Some(if message.is_user() {
                ExchangePhase::Sent
            } else if message.is_pending() {
                ExchangePhase::Pending
            } else if message.is_error() {
                ExchangePhase::Failed
            } else {
                ExchangePhase::Resolved
            });
        }
        phase
    }

    /// Copy of the transcript without in-flight placeholders; this is what
    /// gets written to storage.
    pub fn settled(&self) -> Transcript {
        Transcript {
            messages: self
                .messages
                .iter()
                .filter(|m| !m.is_pending())
                .cloned()
                .collect(),
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    fn pending_index(&self, exchange: ExchangeId) -> Option<usize> {
        self.messages
            .iter()
            .position(|m| m.is_pending() && m.exchange == Some(exchange))
    }
}
