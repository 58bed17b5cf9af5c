use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Call lifecycle
        .route("/call/audio", post(handlers::submit_audio))
        .route("/call", get(handlers::get_call))
        .route("/call/transcript", put(handlers::edit_transcript))
        .route("/call/confirm", post(handlers::confirm))
        .route("/call/reset", post(handlers::reset))
        // Sidebar chat
        .route("/chat", post(handlers::chat_send).get(handlers::chat_history))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
