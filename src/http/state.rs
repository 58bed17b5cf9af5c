use crate::chat::ChatLoop;
use crate::session::CallSession;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state for HTTP handlers
///
/// The call session manages its own interior locking, so snapshot reads stay
/// responsive while a transcription is in flight. The chat loop is driven by
/// one turn at a time through the lock.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<CallSession>,
    pub chat: Arc<RwLock<ChatLoop>>,
}

impl AppState {
    pub fn new(session: CallSession, chat: ChatLoop) -> Self {
        Self {
            session: Arc::new(session),
            chat: Arc::new(RwLock::new(chat)),
        }
    }
}
