use super::backend::{AssistantBackend, RunStatus};
use super::poll::PollStrategy;
use crate::error::IntakeError;
use std::sync::Arc;
use tracing::info;

/// Instruction policy the assistant is created with. Answers must come from
/// the attached documents only; anything not covered gets the fixed refusal.
pub const OPERATOR_INSTRUCTIONS: &str = "You are a 911 operator assistant. Answer questions \
using information only from the provided file. Your response must be in an informative, yet \
concise list format. If there is no information in the file that can answer a question, answer \
with \"Sorry, I am unable to answer this question, as it is not covered by protocol.\"";

/// Configuration for the persistent assistant profile.
#[derive(Debug, Clone)]
pub struct AssistantProfile {
    pub name: String,
    pub instructions: String,
    pub model: String,
}

impl AssistantProfile {
    pub fn operator(model: &str) -> Self {
        Self {
            name: "911 Operator Assistant".to_string(),
            instructions: OPERATOR_INSTRUCTIONS.to_string(),
            model: model.to_string(),
        }
    }
}

/// Wrapper around the grounded-answer backend.
///
/// Created once at startup with an attached corpus; the profile and corpus id
/// are read-only afterwards and safe to share across arbitrarily many calls,
/// because every `ask` opens an isolated conversation.
pub struct GroundedAssistant {
    backend: Arc<dyn AssistantBackend>,
    assistant_id: String,
    poll: PollStrategy,
}

impl GroundedAssistant {
    /// Create the assistant profile with the given corpus attached.
    pub async fn create(
        backend: Arc<dyn AssistantBackend>,
        profile: &AssistantProfile,
        corpus_id: &str,
        poll: PollStrategy,
    ) -> Result<Self, IntakeError> {
        let assistant_id = backend
            .create_assistant(
                &profile.name,
                &profile.instructions,
                &profile.model,
                corpus_id,
            )
            .await
            .map_err(|e| IntakeError::AssistantRun {
                reason: format!("assistant creation failed: {}", e),
            })?;

        info!(
            "Assistant created: {} ({}, corpus {})",
            assistant_id, profile.model, corpus_id
        );

        Ok(Self {
            backend,
            assistant_id,
            poll,
        })
    }

    /// Ask one question in a fresh, isolated conversation.
    ///
    /// Blocks until the run reaches a terminal state. Returns the first
    /// message's text unmodified; callers strip citation markers before
    /// showing it to a human. No conversation state persists across calls.
    pub async fn ask(&self, prompt: &str) -> Result<String, IntakeError> {
        let backend_err = |e: anyhow::Error| IntakeError::AssistantRun {
            reason: e.to_string(),
        };

        let thread_id = self.backend.create_thread(prompt).await.map_err(backend_err)?;
        let run_id = self
            .backend
            .start_run(&thread_id, &self.assistant_id)
            .await
            .map_err(backend_err)?;

        let mut status = RunStatus::Queued;
        for _ in 0..self.poll.max_attempts {
            status = self
                .backend
                .run_status(&thread_id, &run_id)
                .await
                .map_err(backend_err)?;

            if status.is_terminal() {
                break;
            }

            self.poll.wait().await;
        }

        match status {
            RunStatus::Completed => self
                .backend
                .first_message_text(&thread_id, &run_id)
                .await
                .map_err(backend_err),
            s if s.is_terminal() => Err(IntakeError::AssistantRun {
                reason: s.as_str().to_string(),
            }),
            s => Err(IntakeError::AssistantRun {
                reason: format!("run still '{}' after {} polls", s.as_str(), self.poll.max_attempts),
            }),
        }
    }
}
