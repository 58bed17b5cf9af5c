use anyhow::Result;

/// Speech-to-text backend trait
///
/// Implementations:
/// - HTTP: OpenAI-compatible transcription endpoint (production)
/// - Scripted fakes in tests
#[async_trait::async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe one WAV-encoded audio blob in the given language.
    ///
    /// Blocks the calling flow until the backend returns text or fails.
    async fn transcribe(&self, wav: &[u8], language: &str) -> Result<String>;

    /// Get backend name for logging
    fn name(&self) -> &str;
}
