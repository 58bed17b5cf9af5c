//! HTTP control surface for the call-intake core
//!
//! UI-agnostic event surface; rendering lives elsewhere:
//! - POST /call/audio - Submit a recorded clip (base64 WAV), transcribe it
//! - GET  /call - Session snapshot (state, transcript, keywords, ...)
//! - PUT  /call/transcript - Edit the transcript before confirmation
//! - POST /call/confirm - Freeze the transcript and run enrichment
//! - POST /call/reset - Reset session and chat history
//! - POST /chat - One chat turn against the grounded assistant
//! - GET  /chat - Chat history
//! - GET  /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
