//! Incremental transcription
//!
//! This module provides the chunked transcription pipeline:
//! - `SpeechToText` trait over the external speech-to-text backend
//! - HTTP implementation for OpenAI-compatible transcription endpoints
//! - `TranscriptionPipeline` that feeds chunks strictly in order and reports
//!   partial transcripts as they grow

mod backend;
mod http;
mod pipeline;

pub use backend::SpeechToText;
pub use http::HttpSpeechToText;
pub use pipeline::{TranscriptSegment, TranscriptionPipeline};
