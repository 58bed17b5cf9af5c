use super::clip::AudioClip;
use crate::error::IntakeError;
use std::io::Cursor;
use std::time::Duration;

/// A contiguous fixed-duration slice of a clip, transcribed independently.
///
/// Chunk order is significant: segments must be transcribed and appended in
/// original temporal order.
#[derive(Debug, Clone)]
pub struct AudioChunk {
    /// Chunk number (0-indexed)
    pub index: usize,
    /// Raw audio samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl AudioChunk {
    /// Encode the chunk as a WAV byte blob for the speech-to-text backend.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, IntakeError> {
        let spec = hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer =
                hound::WavWriter::new(&mut cursor, spec).map_err(|e| IntakeError::InvalidAudio {
                    message: format!("failed to create WAV writer: {}", e),
                })?;

            for &sample in &self.samples {
                writer
                    .write_sample(sample)
                    .map_err(|e| IntakeError::InvalidAudio {
                        message: format!("failed to write sample: {}", e),
                    })?;
            }

            writer.finalize().map_err(|e| IntakeError::InvalidAudio {
                message: format!("failed to finalize WAV: {}", e),
            })?;
        }

        Ok(cursor.into_inner())
    }
}

/// Split a clip into consecutive non-overlapping chunks of `chunk_duration`.
///
/// The final chunk holds the remainder and may be shorter. A clip shorter than
/// one chunk yields exactly one chunk; an empty clip yields none. Chunk
/// boundaries land on whole frames so interleaved channels stay together.
/// Pure: no I/O, deterministic for identical input.
pub fn chunk_clip(
    clip: &AudioClip,
    chunk_duration: Duration,
) -> Result<Vec<AudioChunk>, IntakeError> {
    if chunk_duration.is_zero() {
        return Err(IntakeError::InvalidChunkDuration {
            message: "chunk duration must be positive".to_string(),
        });
    }

    if clip.is_empty() {
        return Ok(Vec::new());
    }

    // Millisecond math keeps frame counts exact for sub-second durations.
    let frames_per_chunk =
        (clip.sample_rate as u128 * chunk_duration.as_millis() / 1000) as usize;
    if frames_per_chunk == 0 {
        return Err(IntakeError::InvalidChunkDuration {
            message: format!(
                "chunk duration {:?} is below one frame at {}Hz",
                chunk_duration, clip.sample_rate
            ),
        });
    }

    let samples_per_chunk = frames_per_chunk * clip.channels as usize;

    let chunks = clip
        .samples
        .chunks(samples_per_chunk)
        .enumerate()
        .map(|(index, samples)| AudioChunk {
            index,
            samples: samples.to_vec(),
            sample_rate: clip.sample_rate,
            channels: clip.channels,
        })
        .collect();

    Ok(chunks)
}
