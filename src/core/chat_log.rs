//! Append-only message log and its transitions.
//!
//! Only the last message may change. Transitions are plain functions over the log so
//! they can be driven by the TUI, the prompt mode, or tests alike.

use chrono::{DateTime, Local};

use super::reveal::Reveal;

/// Monotonic message identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(u64);

impl MessageId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageState {
    /// Bot placeholder waiting for the answer.
    Pending,
    /// Bot answer being revealed.
    Revealing,
    /// Immutable.
    Done,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub text: String,
    pub state: MessageState,
    pub created_at: DateTime<Local>,
}

impl Message {
    pub fn is_pending(&self) -> bool {
        self.state == MessageState::Pending
    }

    pub fn is_revealing(&self) -> bool {
        self.state == MessageState::Revealing
    }
}

/// Outcome of applying one reveal tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One more character shown.
    Advanced,
    /// The full text is shown; the message is now immutable.
    Finished,
    /// Target is no longer the newest message; nothing was changed.
    Stale,
}

#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<Message>,
    next_id: u64,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    #[cfg(test)]
    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == id)
    }

    /// True if `id` names the newest message.
    pub fn is_last(&self, id: MessageId) -> bool {
        self.last().is_some_and(|m| m.id == id)
    }

    fn push(&mut self, role: Role, text: String, state: MessageState) -> MessageId {
        self.next_id += 1;
        let id = MessageId(self.next_id);
        self.messages.push(Message {
            id,
            role,
            text,
            state,
            created_at: Local::now(),
        });
        id
    }

    /// Append a user message. Blank input is rejected and leaves the log unchanged.
    ///
    /// Any bot message still revealing is frozen as-is: from now on it is stale.
    pub fn apply_user_message(&mut self, text: &str) -> Option<MessageId> {
        if text.trim().is_empty() {
            return None;
        }
        if let Some(last) = self.messages.last_mut()
            && last.state != MessageState::Done
        {
            last.state = MessageState::Done;
        }
        Some(self.push(Role::User, text.to_string(), MessageState::Done))
    }

    /// Append the "thinking" placeholder for a dispatched request.
    pub fn push_placeholder(&mut self) -> MessageId {
        self.push(Role::Bot, String::new(), MessageState::Pending)
    }

    /// Bind the final answer to its placeholder and start revealing it.
    ///
    /// Returns `None` when the placeholder is gone or no longer the newest message.
    pub fn apply_answer(&mut self, id: MessageId, answer: String) -> Option<Reveal> {
        let last = self.messages.last_mut()?;
        if last.id != id || !last.is_pending() {
            log::debug!("Dropping answer for stale placeholder {}", id.as_u64());
            return None;
        }
        last.text.clear();
        if answer.is_empty() {
            last.state = MessageState::Done;
        } else {
            last.state = MessageState::Revealing;
        }
        Some(Reveal::new(id, answer))
    }

    /// Apply one reveal frame to its target message.
    pub fn apply_tick(&mut self, reveal: &mut Reveal) -> TickOutcome {
        let target = reveal.target();
        let is_live = self
            .last()
            .is_some_and(|m| m.id == target && m.is_revealing());
        if !is_live {
            if !reveal.is_finished() {
                reveal.cancel();
            }
            return if reveal.is_cancelled() || !self.is_last(target) {
                TickOutcome::Stale
            } else {
                TickOutcome::Finished
            };
        }

        let Some(last) = self.messages.last_mut() else {
            return TickOutcome::Stale;
        };
        if let Some(prefix) = reveal.advance() {
            last.text.clear();
            last.text.push_str(prefix);
        }
        if reveal.is_finished() {
            last.state = MessageState::Done;
            TickOutcome::Finished
        } else {
            TickOutcome::Advanced
        }
    }

    /// Drop every message.
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
