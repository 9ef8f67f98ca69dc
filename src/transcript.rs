//! Client-side conversation transcript.
//!
//! The transcript is append-only: turns are never edited or removed, and the
//! whole of it is resent to the relay on every user submission.

use crate::api::WireMessage;
use crate::chat::ChatRole;
use crate::error::LLMError;

/// One entry of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    /// Text submitted by the user
    User(String),
    /// Reply produced by the assistant
    Assistant(String),
    /// A relay call that failed; carries the error shown in place of a reply
    AssistantError(String),
}

impl Turn {
    pub fn role(&self) -> ChatRole {
        match self {
            Turn::User(_) => ChatRole::User,
            Turn::Assistant(_) | Turn::AssistantError(_) => ChatRole::Assistant,
        }
    }

    /// Text content, absent for error turns.
    pub fn content(&self) -> Option<&str> {
        match self {
            Turn::User(text) | Turn::Assistant(text) => Some(text),
            Turn::AssistantError(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Turn::AssistantError(err) => Some(err),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Turn::AssistantError(_))
    }
}

/// Ordered, append-only list of turns for one session.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn to the end of the transcript.
    ///
    /// # Errors
    ///
    /// Returns `LLMError::InvalidRequest` for a user turn with blank text.
    pub fn append(&mut self, turn: Turn) -> Result<(), LLMError> {
        if let Turn::User(text) = &turn {
            if text.trim().is_empty() {
                return Err(LLMError::InvalidRequest(
                    "user message must not be empty".to_string(),
                ));
            }
        }
        self.turns.push(turn);
        Ok(())
    }

    /// Owned copy of every turn, oldest first.
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns.clone()
    }

    /// Relay payload for the current transcript.
    ///
    /// Error turns have no content and are not resent.
    pub fn to_wire(&self) -> Vec<WireMessage> {
        self.turns
            .iter()
            .filter_map(|turn| {
                turn.content().map(|content| WireMessage {
                    role: turn.role(),
                    content: content.to_string(),
                })
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
