// Shared fakes for integration tests: scripted backends with zero-delay
// polling so lifecycle behavior can be driven deterministically.
#![allow(dead_code)]

use anyhow::Result;
use dispatch_intake::{
    AssistantBackend, CompletionBackend, CorpusDocument, IndexStatus, RunStatus, SpeechToText,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Speech-to-text fake that replays scripted per-chunk outcomes in order.
pub struct ScriptedStt {
    responses: Mutex<VecDeque<Result<String, String>>>,
}

impl ScriptedStt {
    pub fn new(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }

    pub fn ok(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }
}

#[async_trait::async_trait]
impl SpeechToText for ScriptedStt {
    async fn transcribe(&self, _wav: &[u8], _language: &str) -> Result<String> {
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => anyhow::bail!(message),
            None => anyhow::bail!("no scripted response left"),
        }
    }

    fn name(&self) -> &str {
        "scripted-stt"
    }
}

/// Speech-to-text fake that waits for a permit before answering each chunk,
/// so a test can hold the pipeline mid-clip and observe partial state.
pub struct GatedStt {
    responses: Mutex<VecDeque<String>>,
    gate: tokio::sync::Mutex<tokio::sync::mpsc::Receiver<()>>,
}

impl GatedStt {
    pub fn new(texts: &[&str]) -> (Self, tokio::sync::mpsc::Sender<()>) {
        let (tx, rx) = tokio::sync::mpsc::channel(16);
        let stt = Self {
            responses: Mutex::new(texts.iter().map(|t| t.to_string()).collect()),
            gate: tokio::sync::Mutex::new(rx),
        };
        (stt, tx)
    }
}

#[async_trait::async_trait]
impl SpeechToText for GatedStt {
    async fn transcribe(&self, _wav: &[u8], _language: &str) -> Result<String> {
        if self.gate.lock().await.recv().await.is_none() {
            anyhow::bail!("gate closed");
        }
        let next = self.responses.lock().unwrap().pop_front();
        next.ok_or_else(|| anyhow::anyhow!("no scripted response left"))
    }

    fn name(&self) -> &str {
        "gated-stt"
    }
}

/// Completion fake: a fixed response (or failure) plus a call counter.
pub struct FakeCompletion {
    pub response: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeCompletion {
    pub fn answering(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait::async_trait]
impl CompletionBackend for FakeCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Some(r) => Ok(r.clone()),
            None => anyhow::bail!("completion backend unavailable"),
        }
    }
}

/// Assistant backend fake with a scripted run outcome and batch statuses.
pub struct FakeAssistant {
    pub answer: String,
    pub run_result: RunStatus,
    pending_polls: Mutex<usize>,
    batch_statuses: Mutex<VecDeque<IndexStatus>>,
    pub stores_created: AtomicUsize,
    pub batches_uploaded: AtomicUsize,
    pub assistants_created: AtomicUsize,
    pub threads_created: AtomicUsize,
}

impl FakeAssistant {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            run_result: RunStatus::Completed,
            pending_polls: Mutex::new(0),
            batch_statuses: Mutex::new(VecDeque::new()),
            stores_created: AtomicUsize::new(0),
            batches_uploaded: AtomicUsize::new(0),
            assistants_created: AtomicUsize::new(0),
            threads_created: AtomicUsize::new(0),
        }
    }

    pub fn run_ending(status: RunStatus) -> Self {
        Self {
            run_result: status,
            ..Self::answering("")
        }
    }

    /// Report this many pending statuses before the terminal one.
    pub fn with_pending_polls(self, polls: usize) -> Self {
        *self.pending_polls.lock().unwrap() = polls;
        self
    }

    /// Replay these batch statuses in order; an exhausted script reports
    /// `Completed`.
    pub fn with_batch_statuses(self, statuses: Vec<IndexStatus>) -> Self {
        *self.batch_statuses.lock().unwrap() = statuses.into();
        self
    }
}

#[async_trait::async_trait]
impl AssistantBackend for FakeAssistant {
    async fn create_vector_store(&self, _name: &str) -> Result<String> {
        self.stores_created.fetch_add(1, Ordering::SeqCst);
        Ok("store-1".to_string())
    }

    async fn upload_corpus(&self, _store_id: &str, _docs: &[CorpusDocument]) -> Result<String> {
        self.batches_uploaded.fetch_add(1, Ordering::SeqCst);
        Ok("batch-1".to_string())
    }

    async fn batch_status(&self, _store_id: &str, _batch_id: &str) -> Result<IndexStatus> {
        let next = self.batch_statuses.lock().unwrap().pop_front();
        Ok(next.unwrap_or(IndexStatus::Completed))
    }

    async fn create_assistant(
        &self,
        _name: &str,
        _instructions: &str,
        _model: &str,
        _store_id: &str,
    ) -> Result<String> {
        self.assistants_created.fetch_add(1, Ordering::SeqCst);
        Ok("asst-1".to_string())
    }

    async fn create_thread(&self, _message: &str) -> Result<String> {
        let n = self.threads_created.fetch_add(1, Ordering::SeqCst);
        Ok(format!("thread-{}", n + 1))
    }

    async fn start_run(&self, _thread_id: &str, _assistant_id: &str) -> Result<String> {
        Ok("run-1".to_string())
    }

    async fn run_status(&self, _thread_id: &str, _run_id: &str) -> Result<RunStatus> {
        let mut pending = self.pending_polls.lock().unwrap();
        if *pending > 0 {
            *pending -= 1;
            return Ok(RunStatus::InProgress);
        }
        Ok(self.run_result.clone())
    }

    async fn first_message_text(&self, _thread_id: &str, _run_id: &str) -> Result<String> {
        Ok(self.answer.clone())
    }
}

/// Build a silent mono clip of the given duration.
pub fn silent_clip(seconds: u64, sample_rate: u32) -> dispatch_intake::AudioClip {
    dispatch_intake::AudioClip {
        samples: vec![0i16; (seconds * sample_rate as u64) as usize],
        sample_rate,
        channels: 1,
    }
}
