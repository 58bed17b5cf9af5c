use anyhow::Result;

/// Terminal and pending states of an assistant run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    Expired,
    Cancelled,
    /// Status string this client does not recognize
    Other(String),
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Completed | RunStatus::Failed | RunStatus::Expired | RunStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Queued => "queued",
            RunStatus::InProgress => "in_progress",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
            RunStatus::Expired => "expired",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Other(s) => s,
        }
    }
}

impl From<&str> for RunStatus {
    fn from(s: &str) -> Self {
        match s {
            "queued" => RunStatus::Queued,
            "in_progress" => RunStatus::InProgress,
            "completed" => RunStatus::Completed,
            "failed" => RunStatus::Failed,
            "expired" => RunStatus::Expired,
            "cancelled" => RunStatus::Cancelled,
            other => RunStatus::Other(other.to_string()),
        }
    }
}

/// Status of a corpus file batch being indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexStatus {
    InProgress,
    Completed,
    Failed,
    Cancelled,
}

/// A fetched reference document awaiting corpus registration.
#[derive(Debug, Clone)]
pub struct CorpusDocument {
    /// Filename derived from the source URL
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Grounded-assistant backend trait
///
/// One method per remote operation so poll loops stay in the caller, where a
/// test can drive them with scripted statuses and a zero-delay strategy.
#[async_trait::async_trait]
pub trait AssistantBackend: Send + Sync {
    /// Create an empty document store; returns the store id.
    async fn create_vector_store(&self, name: &str) -> Result<String>;

    /// Upload all documents as one batch; returns the batch id.
    async fn upload_corpus(&self, store_id: &str, docs: &[CorpusDocument]) -> Result<String>;

    /// Check indexing progress of a batch.
    async fn batch_status(&self, store_id: &str, batch_id: &str) -> Result<IndexStatus>;

    /// Create the assistant profile with an attached document store; returns
    /// the assistant id.
    async fn create_assistant(
        &self,
        name: &str,
        instructions: &str,
        model: &str,
        store_id: &str,
    ) -> Result<String>;

    /// Create an isolated conversation seeded with one user message; returns
    /// the thread id.
    async fn create_thread(&self, message: &str) -> Result<String>;

    /// Start a run of the assistant against a thread; returns the run id.
    async fn start_run(&self, thread_id: &str, assistant_id: &str) -> Result<String>;

    /// Check run progress.
    async fn run_status(&self, thread_id: &str, run_id: &str) -> Result<RunStatus>;

    /// First message's first text content produced by a completed run.
    async fn first_message_text(&self, thread_id: &str, run_id: &str) -> Result<String>;
}

/// General-purpose completion backend trait (keyword extraction).
#[async_trait::async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Submit one user prompt and return the first choice's content.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
