use crate::assistant::{strip_citation_markers, GroundedAssistant};
use crate::error::IntakeError;
use std::sync::Arc;

/// Produces an operator action recommendation from a confirmed transcript.
pub struct RecommendationEngine {
    assistant: Arc<GroundedAssistant>,
}

impl RecommendationEngine {
    pub fn new(assistant: Arc<GroundedAssistant>) -> Self {
        Self { assistant }
    }

    /// Ask the grounded assistant for next steps and strip citation markers.
    /// Propagates `AssistantRun` failures; no local fallback.
    pub async fn recommend(&self, transcript: &str) -> Result<String, IntakeError> {
        let prompt = format!(
            "Based on this 911 call transcription: {}, recommend an immediate course of action \
             for the operator. List 2-3 key steps.",
            transcript
        );

        let raw = self.assistant.ask(&prompt).await?;
        Ok(strip_citation_markers(&raw))
    }
}
