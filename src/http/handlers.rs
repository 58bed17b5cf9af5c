use super::state::AppState;
use crate::audio::AudioClip;
use crate::chat::ChatTurn;
use crate::error::IntakeError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SubmitAudioRequest {
    /// Base64-encoded WAV clip (16-bit PCM)
    pub audio_wav_base64: String,
}

#[derive(Debug, Deserialize)]
pub struct EditTranscriptRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_status(e: &IntakeError) -> StatusCode {
    match e {
        IntakeError::SessionState { .. } => StatusCode::CONFLICT,
        IntakeError::InvalidAudio { .. } | IntakeError::InvalidChunkDuration { .. } => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::BAD_GATEWAY,
    }
}

fn error_response(e: &IntakeError) -> axum::response::Response {
    (
        error_status(e),
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /call/audio
/// Submit a recorded clip and transcribe it chunk by chunk
pub async fn submit_audio(
    State(state): State<AppState>,
    Json(req): Json<SubmitAudioRequest>,
) -> impl IntoResponse {
    let bytes = match base64::engine::general_purpose::STANDARD.decode(&req.audio_wav_base64) {
        Ok(b) => b,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid base64 audio payload: {}", e),
                }),
            )
                .into_response();
        }
    };

    let clip = match AudioClip::from_wav_bytes(&bytes) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };

    let session = &state.session;

    if session.audio_processed() {
        return (
            StatusCode::CONFLICT,
            Json(ErrorResponse {
                error: "A clip was already processed; reset the session first".to_string(),
            }),
        )
            .into_response();
    }

    session.start_recording();

    // A transcription failure still leaves a usable partial transcript on the
    // session, so the snapshot (which carries the error) is returned either way.
    if let Err(e) = session.finish_recording(clip).await {
        error!("Transcription ended early: {}", e);
    }

    (StatusCode::OK, Json(session.snapshot())).into_response()
}

/// GET /call
/// Get the current session snapshot (readable mid-transcription, so the
/// partial transcript is visible as it grows)
pub async fn get_call(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.session.snapshot())).into_response()
}

/// PUT /call/transcript
/// Replace the transcript with the human's edit (pre-confirmation only)
pub async fn edit_transcript(
    State(state): State<AppState>,
    Json(req): Json<EditTranscriptRequest>,
) -> impl IntoResponse {
    match state.session.edit_transcript(&req.text) {
        Ok(()) => (StatusCode::OK, Json(state.session.snapshot())).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /call/confirm
/// Freeze the transcript and run keyword extraction + recommendation
pub async fn confirm(State(state): State<AppState>) -> impl IntoResponse {
    match state.session.confirm().await {
        Ok(()) => (StatusCode::OK, Json(state.session.snapshot())).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /call/reset
/// Reset the session (and chat history) so a new clip can be accepted
pub async fn reset(State(state): State<AppState>) -> impl IntoResponse {
    if let Err(e) = state.session.reset() {
        return error_response(&e);
    }

    let mut chat = state.chat.write().await;
    chat.reset();

    info!("Session and chat history reset");

    (StatusCode::OK, Json(state.session.snapshot())).into_response()
}

/// POST /chat
/// One chat turn against the grounded assistant
pub async fn chat_send(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> impl IntoResponse {
    let mut chat = state.chat.write().await;

    match chat.send(&req.message).await {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse { reply })).into_response(),
        Err(e) => {
            error!("Chat turn failed: {}", e);
            error_response(&e)
        }
    }
}

/// GET /chat
/// Full chat history, oldest first
pub async fn chat_history(State(state): State<AppState>) -> impl IntoResponse {
    let chat = state.chat.read().await;
    let history: Vec<ChatTurn> = chat.history().to_vec();
    (StatusCode::OK, Json(history)).into_response()
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
