use super::state::CallState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Serializable view of a call session for the control surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Unique session identifier
    pub session_id: String,

    /// Current lifecycle state
    pub state: CallState,

    /// When the session started
    pub started_at: DateTime<Utc>,

    /// Transcript text (partial, edited, or confirmed depending on state)
    pub transcript: String,

    /// Number of transcript segments received so far
    pub segment_count: usize,

    /// Transcription failure, if the pipeline stopped early
    pub transcription_error: Option<String>,

    /// Comma-separated keywords, once confirmed and extracted
    pub keywords: Option<String>,
    pub keyword_error: Option<String>,

    /// Operator recommendation, once confirmed and generated
    pub recommendation: Option<String>,
    pub recommendation_error: Option<String>,
}
