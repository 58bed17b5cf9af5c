//! Transcript enrichment
//!
//! Runs once per confirmed transcript:
//! - `KeywordExtractor`: emergency-relevant keywords via the completion backend
//! - `RecommendationEngine`: operator next steps via the grounded assistant

mod keywords;
mod recommend;

pub use keywords::KeywordExtractor;
pub use recommend::RecommendationEngine;
