use super::snapshot::SessionSnapshot;
use super::state::CallState;
use crate::audio::AudioClip;
use crate::enrich::{KeywordExtractor, RecommendationEngine};
use crate::error::IntakeError;
use crate::transcribe::{TranscriptSegment, TranscriptionPipeline};
use chrono::Utc;
use std::sync::{Arc, Mutex};
use tracing::{error, info, warn};

/// Mutable session state, guarded by one lock with short critical sections.
/// Never held across a backend call, so snapshots stay readable while the
/// pipeline or enrichment is in flight.
struct SessionInner {
    session_id: String,
    state: CallState,
    started_at: chrono::DateTime<chrono::Utc>,

    /// Whether a clip has already been processed this session
    audio_processed: bool,

    /// Accumulated transcript segments, in chunk order
    segments: Vec<TranscriptSegment>,

    /// Current transcript text, always stored trimmed; grows segment by
    /// segment during transcription, whole-value replaced by edits, frozen at
    /// confirmation
    transcript: String,

    transcription_error: Option<String>,
    keywords: Option<String>,
    keyword_error: Option<String>,
    recommendation: Option<String>,
    recommendation_error: Option<String>,
}

impl SessionInner {
    fn fresh() -> Self {
        Self {
            session_id: format!("call-{}", uuid::Uuid::new_v4()),
            state: CallState::Idle,
            started_at: Utc::now(),
            audio_processed: false,
            segments: Vec::new(),
            transcript: String::new(),
            transcription_error: None,
            keywords: None,
            keyword_error: None,
            recommendation: None,
            recommendation_error: None,
        }
    }

    fn partial_transcript(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<String>()
            .trim()
            .to_string()
    }
}

/// A call session coordinating recording, chunked transcription, human
/// confirmation and enrichment for exactly one clip.
///
/// Methods take `&self`; state lives behind an internal lock so observers can
/// read snapshots while a long transcription or enrichment call is running.
pub struct CallSession {
    pipeline: Arc<TranscriptionPipeline>,
    extractor: Arc<KeywordExtractor>,
    recommender: Arc<RecommendationEngine>,
    inner: Mutex<SessionInner>,
}

impl CallSession {
    pub fn new(
        pipeline: Arc<TranscriptionPipeline>,
        extractor: Arc<KeywordExtractor>,
        recommender: Arc<RecommendationEngine>,
    ) -> Self {
        let inner = SessionInner::fresh();
        info!("Creating call session: {}", inner.session_id);

        Self {
            pipeline,
            extractor,
            recommender,
            inner: Mutex::new(inner),
        }
    }

    pub fn state(&self) -> CallState {
        self.inner.lock().unwrap().state
    }

    /// Whether a clip has already been processed this session.
    pub fn audio_processed(&self) -> bool {
        self.inner.lock().unwrap().audio_processed
    }

    /// Transcript text so far: partial during transcription, edited or
    /// confirmed afterwards. Always trimmed of surrounding whitespace.
    pub fn transcript(&self) -> String {
        self.inner.lock().unwrap().transcript.clone()
    }

    /// Accumulated transcript segments, in chunk order.
    pub fn segments(&self) -> Vec<TranscriptSegment> {
        self.inner.lock().unwrap().segments.clone()
    }

    /// Mark the session as capturing audio.
    ///
    /// Ignored once a clip has been processed; the session must be reset
    /// before it accepts new audio.
    pub fn start_recording(&self) {
        let mut inner = self.inner.lock().unwrap();

        if inner.audio_processed {
            warn!(
                "Ignoring new recording for {}: a clip was already processed",
                inner.session_id
            );
            return;
        }

        if inner.state != CallState::Idle {
            warn!(
                "Ignoring start_recording for {} in state {:?}",
                inner.session_id, inner.state
            );
            return;
        }

        inner.state = CallState::Recording;
    }

    /// Accept the captured clip and run chunked transcription to completion.
    ///
    /// Segments are published to the session as they arrive, so readers see
    /// the partial transcript grow while this call is in flight. On success
    /// the session awaits confirmation with the full transcript editable. On
    /// a chunk failure the partial transcript is retained, still editable,
    /// and the error is recorded and returned. A second clip while one was
    /// already processed is ignored.
    pub async fn finish_recording(&self, clip: AudioClip) -> Result<(), IntakeError> {
        {
            let mut inner = self.inner.lock().unwrap();

            if inner.audio_processed {
                warn!(
                    "Ignoring clip for {}: a clip was already processed",
                    inner.session_id
                );
                return Ok(());
            }

            // A clip arriving while Idle counts as the capture event itself.
            if inner.state == CallState::Idle {
                inner.state = CallState::Recording;
            }

            if inner.state != CallState::Recording {
                return Err(IntakeError::SessionState {
                    message: format!("cannot accept a clip in state {:?}", inner.state),
                });
            }

            info!(
                "Transcribing clip for {} ({:.1}s)",
                inner.session_id,
                clip.duration().as_secs_f64()
            );

            inner.state = CallState::Transcribing;
        }

        let pipeline = Arc::clone(&self.pipeline);
        let result = pipeline
            .transcribe(&clip, |segment| {
                let mut inner = self.inner.lock().unwrap();
                inner.segments.push(segment.clone());
                inner.transcript = inner.partial_transcript();
            })
            .await;

        // The clip is dropped here; only derived text is retained.
        let mut inner = self.inner.lock().unwrap();
        inner.audio_processed = true;
        inner.state = CallState::AwaitingConfirmation;

        match result {
            Ok(transcript) => {
                inner.transcript = transcript;
                info!(
                    "Transcription complete for {} ({} segments)",
                    inner.session_id,
                    inner.segments.len()
                );
                Ok(())
            }
            Err(e) => {
                // The prefix published so far stays as the partial result.
                inner.transcription_error = Some(e.to_string());
                error!("Transcription failed for {}: {}", inner.session_id, e);
                Err(e)
            }
        }
    }

    /// Replace the transcript wholesale with the human's edit.
    ///
    /// Unrestricted until confirmation freezes the text.
    pub fn edit_transcript(&self, text: &str) -> Result<(), IntakeError> {
        let mut inner = self.inner.lock().unwrap();

        match inner.state {
            CallState::AwaitingConfirmation => {
                inner.transcript = text.trim().to_string();
                Ok(())
            }
            CallState::Confirmed => Err(IntakeError::SessionState {
                message: "transcript is read-only after confirmation".to_string(),
            }),
            state => Err(IntakeError::SessionState {
                message: format!("no transcript to edit in state {:?}", state),
            }),
        }
    }

    /// Confirm the transcript and run enrichment.
    ///
    /// Keyword extraction and the recommendation are independent calls: one
    /// failing does not block the other, and each outcome is recorded on the
    /// session. Idempotent once confirmed; rejected before the transcript is
    /// ready.
    pub async fn confirm(&self) -> Result<(), IntakeError> {
        let (session_id, transcript) = {
            let mut inner = self.inner.lock().unwrap();

            match inner.state {
                CallState::Confirmed => {
                    warn!("Session {} already confirmed", inner.session_id);
                    return Ok(());
                }
                CallState::AwaitingConfirmation => {}
                state => {
                    return Err(IntakeError::SessionState {
                        message: format!("nothing to confirm in state {:?}", state),
                    });
                }
            }

            inner.state = CallState::Confirmed;
            (inner.session_id.clone(), inner.transcript.clone())
        };

        info!("Transcript confirmed for {}", session_id);

        let keywords = self.extractor.extract(&transcript).await;
        let recommendation = self.recommender.recommend(&transcript).await;

        let mut inner = self.inner.lock().unwrap();

        match keywords {
            Ok(keywords) => inner.keywords = Some(keywords),
            Err(e) => {
                error!("Keyword extraction failed for {}: {}", session_id, e);
                inner.keyword_error = Some(e.to_string());
            }
        }

        match recommendation {
            Ok(recommendation) => inner.recommendation = Some(recommendation),
            Err(e) => {
                error!("Recommendation failed for {}: {}", session_id, e);
                inner.recommendation_error = Some(e.to_string());
            }
        }

        Ok(())
    }

    /// Reset to a fresh session so a new clip can be accepted.
    ///
    /// Rejected while a transcription is in flight; the pipeline must finish
    /// (or fail) before the session can be recycled.
    pub fn reset(&self) -> Result<(), IntakeError> {
        let mut inner = self.inner.lock().unwrap();

        if inner.state == CallState::Transcribing {
            return Err(IntakeError::SessionState {
                message: "cannot reset while transcription is in progress".to_string(),
            });
        }

        let fresh = SessionInner::fresh();
        info!("Resetting session {} -> {}", inner.session_id, fresh.session_id);
        *inner = fresh;

        Ok(())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.lock().unwrap();

        SessionSnapshot {
            session_id: inner.session_id.clone(),
            state: inner.state,
            started_at: inner.started_at,
            transcript: inner.transcript.clone(),
            segment_count: inner.segments.len(),
            transcription_error: inner.transcription_error.clone(),
            keywords: inner.keywords.clone(),
            keyword_error: inner.keyword_error.clone(),
            recommendation: inner.recommendation.clone(),
            recommendation_error: inner.recommendation_error.clone(),
        }
    }
}
