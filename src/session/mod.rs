//! Call session management
//!
//! This module provides the `CallSession` state machine that coordinates one
//! call's lifecycle:
//! - Recording → chunked transcription (partial transcripts retained on failure)
//! - Human confirmation (free edits until the transcript freezes)
//! - Enrichment: keyword extraction + operator recommendation, run independently
//! - Explicit reset before a second clip is accepted

mod session;
mod snapshot;
mod state;

pub use session::CallSession;
pub use snapshot::SessionSnapshot;
pub use state::CallState;
