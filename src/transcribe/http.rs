//! OpenAI-compatible transcription API backend

use super::backend::SpeechToText;
use anyhow::{Context, Result};

/// Speech-to-text over an OpenAI-compatible `/v1/audio/transcriptions` endpoint.
pub struct HttpSpeechToText {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl HttpSpeechToText {
    pub fn new(client: reqwest::Client, base_url: &str, model: &str, api_key: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl SpeechToText for HttpSpeechToText {
    async fn transcribe(&self, wav: &[u8], language: &str) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(wav.to_vec())
            .file_name("chunk.wav")
            .mime_str("audio/wav")
            .context("Failed to build multipart audio part")?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("language", language.to_string());

        let response = self
            .client
            .post(format!("{}/v1/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .context("Transcription request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Transcription API error {}: {}", status, body);
        }

        let json: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse transcription response")?;

        let text = json
            .get("text")
            .and_then(|v| v.as_str())
            .unwrap_or("")
            .to_string();

        Ok(text)
    }

    fn name(&self) -> &str {
        "openai-transcription"
    }
}
