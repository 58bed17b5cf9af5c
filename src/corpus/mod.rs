//! Reference document corpus loading
//!
//! Fetches the fixed document set at process start and registers it with the
//! grounded-answer backend as one indexed store. All-or-nothing: any failed
//! fetch or an unfinished index aborts startup, and no sessions are served.

use crate::assistant::{AssistantBackend, CorpusDocument, IndexStatus, PollStrategy};
use crate::error::IntakeError;
use std::sync::Arc;
use tracing::info;

/// Fetch every document over plain GET, in order.
///
/// A non-2xx response or transport error fails the whole load, naming the
/// offending URL; no partial corpus is ever registered.
pub async fn fetch_documents(
    client: &reqwest::Client,
    urls: &[String],
) -> Result<Vec<CorpusDocument>, IntakeError> {
    let mut docs = Vec::with_capacity(urls.len());

    for url in urls {
        let fetch_err = |message: String| IntakeError::CorpusFetch {
            url: url.clone(),
            message,
        };

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fetch_err(format!("HTTP {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| fetch_err(e.to_string()))?;

        let name = url
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or("document")
            .to_string();

        info!("Fetched corpus document: {} ({} bytes)", name, bytes.len());

        docs.push(CorpusDocument {
            name,
            bytes: bytes.to_vec(),
        });
    }

    Ok(docs)
}

/// Fetch all documents and register them as one indexed store.
///
/// Blocks until the backend reports indexing complete. Returns the store id,
/// attached to the assistant profile and immutable for the process lifetime.
pub async fn load_corpus(
    backend: Arc<dyn AssistantBackend>,
    http: &reqwest::Client,
    urls: &[String],
    store_name: &str,
    poll: &PollStrategy,
) -> Result<String, IntakeError> {
    let docs = fetch_documents(http, urls).await?;

    let index_err = |message: String| IntakeError::CorpusIndex { message };

    let store_id = backend
        .create_vector_store(store_name)
        .await
        .map_err(|e| index_err(e.to_string()))?;

    let batch_id = backend
        .upload_corpus(&store_id, &docs)
        .await
        .map_err(|e| index_err(e.to_string()))?;

    info!(
        "Corpus batch {} uploaded to store {} ({} documents), waiting for indexing",
        batch_id,
        store_id,
        docs.len()
    );

    for _ in 0..poll.max_attempts {
        match backend
            .batch_status(&store_id, &batch_id)
            .await
            .map_err(|e| index_err(e.to_string()))?
        {
            IndexStatus::Completed => {
                info!("Corpus indexing complete: {}", store_id);
                return Ok(store_id);
            }
            IndexStatus::Failed => {
                return Err(index_err("file batch reported 'failed'".to_string()));
            }
            IndexStatus::Cancelled => {
                return Err(index_err("file batch reported 'cancelled'".to_string()));
            }
            IndexStatus::InProgress => poll.wait().await,
        }
    }

    Err(index_err(format!(
        "indexing still in progress after {} polls",
        poll.max_attempts
    )))
}
