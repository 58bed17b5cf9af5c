use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub backend: BackendConfig,
    pub corpus: CorpusConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Remote backend endpoints and model identifiers.
#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Base URL of an OpenAI-compatible API, without a trailing slash
    pub base_url: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Model for the grounded assistant
    pub assistant_model: String,
    /// Model for keyword extraction completions
    pub completion_model: String,
    /// Model for speech-to-text
    pub transcription_model: String,
}

#[derive(Debug, Deserialize)]
pub struct CorpusConfig {
    /// Display name for the indexed document store
    pub store_name: String,
    /// Reference document URLs fetched at startup, in order
    pub documents: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    /// Duration of each transcription chunk in seconds
    pub chunk_duration_secs: u64,
    /// Target language code passed to the speech-to-text backend
    pub language: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
