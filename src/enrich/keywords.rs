use crate::assistant::CompletionBackend;
use crate::error::IntakeError;
use std::sync::Arc;

/// Extracts emergency-relevant keywords from a confirmed transcript.
pub struct KeywordExtractor {
    backend: Arc<dyn CompletionBackend>,
}

impl KeywordExtractor {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self { backend }
    }

    /// Single-shot extraction; returns a comma-separated keyword string.
    /// Regenerated per call, never incrementally updated. No retry.
    pub async fn extract(&self, transcript: &str) -> Result<String, IntakeError> {
        let prompt = format!(
            "You are a 911 operator assistant. Extract keywords from {} that would be important \
             for a 911 operator to use. Your response should be in a comma-separated list format. \
             Avoid filler and irrelevant information.",
            transcript
        );

        self.backend
            .complete(&prompt)
            .await
            .map_err(|e| IntakeError::KeywordExtraction {
                message: e.to_string(),
            })
    }
}
