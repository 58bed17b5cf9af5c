//! Sidebar chat loop against the grounded assistant.
//!
//! Independent of the call session: its history is append-only, lives for the
//! process/session lifetime, and clears only on explicit reset. Every turn is
//! answered statelessly against the document corpus (no cross-turn memory).

use crate::assistant::{strip_citation_markers, GroundedAssistant};
use crate::error::IntakeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatTurn {
    fn now(role: ChatRole, content: String) -> Self {
        Self {
            role,
            content,
            timestamp: Utc::now(),
        }
    }
}

/// Open-ended chat loop over the shared grounded assistant.
pub struct ChatLoop {
    assistant: Arc<GroundedAssistant>,
    history: Vec<ChatTurn>,
}

impl ChatLoop {
    pub fn new(assistant: Arc<GroundedAssistant>) -> Self {
        Self {
            assistant,
            history: Vec::new(),
        }
    }

    /// Send one user message and append both sides of the exchange.
    ///
    /// The user turn is recorded before the assistant is asked, so a failed
    /// call keeps the question in the history. Answers have citation markers
    /// stripped before they are stored or returned.
    pub async fn send(&mut self, message: &str) -> Result<String, IntakeError> {
        self.history
            .push(ChatTurn::now(ChatRole::User, message.to_string()));

        let raw = self.assistant.ask(message).await?;
        let reply = strip_citation_markers(&raw);

        self.history
            .push(ChatTurn::now(ChatRole::Assistant, reply.clone()));

        info!("Chat turn answered ({} turns in history)", self.history.len());

        Ok(reply)
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    pub fn reset(&mut self) {
        info!("Clearing chat history ({} turns)", self.history.len());
        self.history.clear();
    }
}
