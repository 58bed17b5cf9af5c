pub mod assistant;
pub mod audio;
pub mod chat;
pub mod config;
pub mod corpus;
pub mod enrich;
pub mod error;
pub mod http;
pub mod session;
pub mod transcribe;

pub use assistant::{
    strip_citation_markers, AssistantBackend, AssistantProfile, CompletionBackend, CorpusDocument,
    GroundedAssistant, IndexStatus, OpenAiClient, PollStrategy, RunStatus,
};
pub use audio::{chunk_clip, AudioChunk, AudioClip};
pub use chat::{ChatLoop, ChatRole, ChatTurn};
pub use config::Config;
pub use corpus::{fetch_documents, load_corpus};
pub use enrich::{KeywordExtractor, RecommendationEngine};
pub use error::IntakeError;
pub use http::{create_router, AppState};
pub use session::{CallSession, CallState, SessionSnapshot};
pub use transcribe::{HttpSpeechToText, SpeechToText, TranscriptSegment, TranscriptionPipeline};
