//! OpenAI-compatible assistant / completion API client

use super::backend::{
    AssistantBackend, CompletionBackend, CorpusDocument, IndexStatus, RunStatus,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;

/// reqwest client for an OpenAI-compatible API: assistants v2 (vector stores,
/// threads, runs) and chat completions.
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    completion_model: String,
}

#[derive(Debug, Deserialize)]
struct IdResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
}

#[derive(Debug, Deserialize)]
struct MessageList {
    data: Vec<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Vec<MessageContent>,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    text: Option<MessageText>,
}

#[derive(Debug, Deserialize)]
struct MessageText {
    value: String,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

impl OpenAiClient {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: &str,
        completion_model: &str,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            completion_model: completion_model.to_string(),
        }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", "assistants=v2")
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_key)
            .header("OpenAI-Beta", "assistants=v2")
    }

    async fn parse<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{} failed with {}: {}", what, status, body);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse {} response", what))
    }

    /// Upload one document to file storage; returns the file id.
    async fn upload_file(&self, doc: &CorpusDocument) -> Result<String> {
        let part = reqwest::multipart::Part::bytes(doc.bytes.clone())
            .file_name(doc.name.clone())
            .mime_str("application/octet-stream")
            .context("Failed to build multipart file part")?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("purpose", "assistants");

        let response = self
            .post("/v1/files")
            .multipart(form)
            .send()
            .await
            .context("File upload request failed")?;

        let parsed: IdResponse = Self::parse(response, "file upload").await?;
        Ok(parsed.id)
    }
}

#[async_trait::async_trait]
impl AssistantBackend for OpenAiClient {
    async fn create_vector_store(&self, name: &str) -> Result<String> {
        let response = self
            .post("/v1/vector_stores")
            .json(&json!({ "name": name }))
            .send()
            .await
            .context("Vector store request failed")?;

        let parsed: IdResponse = Self::parse(response, "vector store create").await?;
        Ok(parsed.id)
    }

    async fn upload_corpus(&self, store_id: &str, docs: &[CorpusDocument]) -> Result<String> {
        let mut file_ids = Vec::with_capacity(docs.len());
        for doc in docs {
            file_ids.push(self.upload_file(doc).await?);
        }

        let response = self
            .post(&format!("/v1/vector_stores/{}/file_batches", store_id))
            .json(&json!({ "file_ids": file_ids }))
            .send()
            .await
            .context("File batch request failed")?;

        let parsed: IdResponse = Self::parse(response, "file batch create").await?;
        Ok(parsed.id)
    }

    async fn batch_status(&self, store_id: &str, batch_id: &str) -> Result<IndexStatus> {
        let response = self
            .get(&format!(
                "/v1/vector_stores/{}/file_batches/{}",
                store_id, batch_id
            ))
            .send()
            .await
            .context("Batch status request failed")?;

        let parsed: StatusResponse = Self::parse(response, "batch status").await?;
        Ok(match parsed.status.as_str() {
            "completed" => IndexStatus::Completed,
            "failed" => IndexStatus::Failed,
            "cancelled" => IndexStatus::Cancelled,
            _ => IndexStatus::InProgress,
        })
    }

    async fn create_assistant(
        &self,
        name: &str,
        instructions: &str,
        model: &str,
        store_id: &str,
    ) -> Result<String> {
        let response = self
            .post("/v1/assistants")
            .json(&json!({
                "name": name,
                "instructions": instructions,
                "model": model,
                "tools": [{ "type": "file_search" }],
                "tool_resources": {
                    "file_search": { "vector_store_ids": [store_id] }
                },
            }))
            .send()
            .await
            .context("Assistant create request failed")?;

        let parsed: IdResponse = Self::parse(response, "assistant create").await?;
        Ok(parsed.id)
    }

    async fn create_thread(&self, message: &str) -> Result<String> {
        let response = self
            .post("/v1/threads")
            .json(&json!({
                "messages": [{ "role": "user", "content": message }],
            }))
            .send()
            .await
            .context("Thread create request failed")?;

        let parsed: IdResponse = Self::parse(response, "thread create").await?;
        Ok(parsed.id)
    }

    async fn start_run(&self, thread_id: &str, assistant_id: &str) -> Result<String> {
        let response = self
            .post(&format!("/v1/threads/{}/runs", thread_id))
            .json(&json!({ "assistant_id": assistant_id }))
            .send()
            .await
            .context("Run create request failed")?;

        let parsed: IdResponse = Self::parse(response, "run create").await?;
        Ok(parsed.id)
    }

    async fn run_status(&self, thread_id: &str, run_id: &str) -> Result<RunStatus> {
        let response = self
            .get(&format!("/v1/threads/{}/runs/{}", thread_id, run_id))
            .send()
            .await
            .context("Run status request failed")?;

        let parsed: StatusResponse = Self::parse(response, "run status").await?;
        Ok(RunStatus::from(parsed.status.as_str()))
    }

    async fn first_message_text(&self, thread_id: &str, run_id: &str) -> Result<String> {
        let response = self
            .get(&format!(
                "/v1/threads/{}/messages?run_id={}",
                thread_id, run_id
            ))
            .send()
            .await
            .context("Message list request failed")?;

        let parsed: MessageList = Self::parse(response, "message list").await?;

        let text = parsed
            .data
            .first()
            .and_then(|m| m.content.first())
            .and_then(|c| c.text.as_ref())
            .map(|t| t.value.clone())
            .context("Run produced no text content")?;

        Ok(text)
    }
}

#[async_trait::async_trait]
impl CompletionBackend for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let response = self
            .post("/v1/chat/completions")
            .json(&json!({
                "model": self.completion_model,
                "messages": [{ "role": "user", "content": prompt }],
            }))
            .send()
            .await
            .context("Completion request failed")?;

        let parsed: CompletionResponse = Self::parse(response, "completion").await?;

        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .context("Completion returned no choices")?;

        Ok(content)
    }
}
