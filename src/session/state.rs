use serde::{Deserialize, Serialize};

/// Lifecycle state of a call session.
///
/// One clip per session: `Confirmed` is terminal for the clip, and a new
/// recording requires an explicit reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallState {
    Idle,
    Recording,
    Transcribing,
    AwaitingConfirmation,
    Confirmed,
}
