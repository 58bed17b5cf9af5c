use crate::error::IntakeError;
use hound::WavReader;
use std::io::Cursor;
use std::time::Duration;
use tracing::info;

/// A single recorded audio clip (16-bit PCM, interleaved).
///
/// Immutable once captured; the session discards it after transcription and
/// keeps only the derived text.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioClip {
    /// Decode a WAV byte blob into a clip.
    pub fn from_wav_bytes(bytes: &[u8]) -> Result<Self, IntakeError> {
        let reader = WavReader::new(Cursor::new(bytes)).map_err(|e| IntakeError::InvalidAudio {
            message: format!("failed to parse WAV: {}", e),
        })?;

        let spec = reader.spec();
        if spec.bits_per_sample != 16 || spec.sample_format != hound::SampleFormat::Int {
            return Err(IntakeError::InvalidAudio {
                message: format!(
                    "expected 16-bit integer PCM, got {}-bit {:?}",
                    spec.bits_per_sample, spec.sample_format
                ),
            });
        }

        let samples: Vec<i16> = reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| IntakeError::InvalidAudio {
                message: format!("failed to read samples: {}", e),
            })?;

        let clip = Self {
            samples,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
        };

        info!(
            "Audio clip decoded: {:.1}s, {}Hz, {} channels, {} samples",
            clip.duration().as_secs_f64(),
            clip.sample_rate,
            clip.channels,
            clip.samples.len()
        );

        Ok(clip)
    }

    /// Number of per-channel sample instants in the clip.
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.frame_count() as f64 / self.sample_rate as f64)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
