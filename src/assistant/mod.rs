//! Document-grounded assistant
//!
//! This module wraps the external grounded-answer backend:
//! - `AssistantBackend` / `CompletionBackend` traits over the remote API
//! - `OpenAiClient`: reqwest implementation for OpenAI-compatible services
//! - `GroundedAssistant`: one persistent assistant profile, stateless `ask`
//! - `PollStrategy`: injected poll-until-terminal pacing
//! - citation-marker stripping applied to every human-visible answer

mod backend;
mod citations;
mod grounded;
mod http;
mod poll;

pub use backend::{AssistantBackend, CompletionBackend, CorpusDocument, IndexStatus, RunStatus};
pub use citations::strip_citation_markers;
pub use grounded::{AssistantProfile, GroundedAssistant};
pub use http::OpenAiClient;
pub use poll::PollStrategy;
