//! Error types for dispatch-intake.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    // Startup-fatal corpus errors
    #[error("Failed to fetch corpus document {url}: {message}")]
    CorpusFetch { url: String, message: String },

    #[error("Corpus indexing did not complete: {message}")]
    CorpusIndex { message: String },

    // Transcription errors (session-level; partial transcript is retained)
    #[error("Transcription failed at chunk {chunk_index}: {message}")]
    Transcription { chunk_index: usize, message: String },

    // Assistant run errors (operation-level)
    #[error("Assistant run ended in '{reason}'")]
    AssistantRun { reason: String },

    #[error("Keyword extraction failed: {message}")]
    KeywordExtraction { message: String },

    // Input validation
    #[error("Invalid audio: {message}")]
    InvalidAudio { message: String },

    #[error("Invalid chunk duration: {message}")]
    InvalidChunkDuration { message: String },

    // Lifecycle actions rejected in the current session state
    #[error("Invalid session state: {message}")]
    SessionState { message: String },
}

pub type Result<T> = std::result::Result<T, IntakeError>;
