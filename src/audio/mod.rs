pub mod chunker;
pub mod clip;

pub use chunker::{chunk_clip, AudioChunk};
pub use clip::AudioClip;
