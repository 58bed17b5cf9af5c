use super::backend::SpeechToText;
use crate::audio::{chunk_clip, AudioClip};
use crate::error::IntakeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Text produced from one audio chunk.
///
/// Segment text is already right-padded with one trailing space; concatenating
/// segments in chunk order yields the transcript so far at any point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Index of the chunk this text came from
    pub chunk_index: usize,
    /// Trimmed text plus one trailing space as a word-boundary separator
    pub text: String,
    /// When this segment was produced
    pub timestamp: DateTime<Utc>,
}

/// Chunked, strictly sequential transcription pipeline.
///
/// Chunk N+1 is not submitted until chunk N's text is recorded, so observers
/// see the partial transcript grow monotonically in temporal order.
pub struct TranscriptionPipeline {
    stt: Arc<dyn SpeechToText>,
    chunk_duration: Duration,
    language: String,
}

impl TranscriptionPipeline {
    pub fn new(stt: Arc<dyn SpeechToText>, chunk_duration: Duration, language: &str) -> Self {
        Self {
            stt,
            chunk_duration,
            language: language.to_string(),
        }
    }

    /// Transcribe a clip chunk by chunk, invoking `on_segment` for each segment
    /// before the next chunk is submitted.
    ///
    /// Returns the full transcript, trimmed of surrounding whitespace (a
    /// silent chunk contributes only its separator space). On a chunk
    /// failure the pipeline stops with `Transcription { chunk_index, .. }`; the
    /// segments already delivered to the observer are the partial result (no
    /// retry, no rollback).
    pub async fn transcribe<F>(
        &self,
        clip: &AudioClip,
        mut on_segment: F,
    ) -> Result<String, IntakeError>
    where
        F: FnMut(&TranscriptSegment),
    {
        let chunks = chunk_clip(clip, self.chunk_duration)?;

        info!(
            "Transcribing clip: {:.1}s in {} chunks via {}",
            clip.duration().as_secs_f64(),
            chunks.len(),
            self.stt.name()
        );

        let mut transcript = String::new();

        for chunk in &chunks {
            let wav = chunk.to_wav_bytes()?;

            let text = self
                .stt
                .transcribe(&wav, &self.language)
                .await
                .map_err(|e| IntakeError::Transcription {
                    chunk_index: chunk.index,
                    message: e.to_string(),
                })?;

            let segment = TranscriptSegment {
                chunk_index: chunk.index,
                text: format!("{} ", text.trim()),
                timestamp: Utc::now(),
            };

            transcript.push_str(&segment.text);
            on_segment(&segment);

            info!(
                "Chunk {}/{} transcribed ({} chars so far)",
                chunk.index + 1,
                chunks.len(),
                transcript.len()
            );
        }

        Ok(transcript.trim().to_string())
    }
}
