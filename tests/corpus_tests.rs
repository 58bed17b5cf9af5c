// Integration tests for corpus loading
//
// Fetching uses a local axum server as the document host; registration and
// indexing run against a scripted assistant backend.

use axum::{http::StatusCode, routing::get, Router};
use dispatch_intake::{fetch_documents, load_corpus, IndexStatus, IntakeError, PollStrategy};
use std::sync::atomic::Ordering;
use std::sync::Arc;

mod common;
use common::FakeAssistant;

/// Serve the given routes on an ephemeral port; returns the base URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn document_host() -> Router {
    Router::new()
        .route("/protocol.pdf", get(|| async { "protocol bytes" }))
        .route("/scenarios.pdf", get(|| async { "scenario bytes" }))
        .route(
            "/missing.pdf",
            get(|| async { (StatusCode::NOT_FOUND, "gone") }),
        )
}

#[tokio::test]
async fn test_fetch_collects_documents_in_order() {
    let base = serve(document_host()).await;
    let urls = vec![
        format!("{}/protocol.pdf", base),
        format!("{}/scenarios.pdf", base),
    ];

    let docs = fetch_documents(&reqwest::Client::new(), &urls).await.unwrap();

    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].name, "protocol.pdf");
    assert_eq!(docs[0].bytes, b"protocol bytes");
    assert_eq!(docs[1].name, "scenarios.pdf");
}

#[tokio::test]
async fn test_one_missing_document_fails_the_whole_load() {
    let base = serve(document_host()).await;
    let missing = format!("{}/missing.pdf", base);
    let urls = vec![format!("{}/protocol.pdf", base), missing.clone()];

    let backend = Arc::new(FakeAssistant::answering(""));
    let err = load_corpus(
        backend.clone(),
        &reqwest::Client::new(),
        &urls,
        "test-corpus",
        &PollStrategy::no_delay(),
    )
    .await
    .unwrap_err();

    // The error names the failing location.
    match err {
        IntakeError::CorpusFetch { url, message } => {
            assert_eq!(url, missing);
            assert!(message.contains("404"), "got: {}", message);
        }
        other => panic!("expected CorpusFetch, got {:?}", other),
    }

    // No partial corpus and no assistant were created.
    assert_eq!(backend.stores_created.load(Ordering::SeqCst), 0);
    assert_eq!(backend.batches_uploaded.load(Ordering::SeqCst), 0);
    assert_eq!(backend.assistants_created.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_load_polls_until_indexing_completes() {
    let base = serve(document_host()).await;
    let urls = vec![format!("{}/protocol.pdf", base)];

    let backend = Arc::new(FakeAssistant::answering("").with_batch_statuses(vec![
        IndexStatus::InProgress,
        IndexStatus::InProgress,
        IndexStatus::Completed,
    ]));

    let store_id = load_corpus(
        backend.clone(),
        &reqwest::Client::new(),
        &urls,
        "test-corpus",
        &PollStrategy::no_delay(),
    )
    .await
    .unwrap();

    assert_eq!(store_id, "store-1");
    assert_eq!(backend.batches_uploaded.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_indexing_surfaces_corpus_index_error() {
    let base = serve(document_host()).await;
    let urls = vec![format!("{}/protocol.pdf", base)];

    let backend = Arc::new(
        FakeAssistant::answering("").with_batch_statuses(vec![IndexStatus::Failed]),
    );

    let err = load_corpus(
        backend,
        &reqwest::Client::new(),
        &urls,
        "test-corpus",
        &PollStrategy::no_delay(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, IntakeError::CorpusIndex { .. }));
}

#[tokio::test]
async fn test_indexing_stuck_in_progress_times_out() {
    let base = serve(document_host()).await;
    let urls = vec![format!("{}/protocol.pdf", base)];

    let backend = Arc::new(FakeAssistant::answering("").with_batch_statuses(vec![
        IndexStatus::InProgress;
        200
    ]));
    let poll = PollStrategy {
        interval: std::time::Duration::ZERO,
        max_attempts: 3,
    };

    let err = load_corpus(
        backend,
        &reqwest::Client::new(),
        &urls,
        "test-corpus",
        &poll,
    )
    .await
    .unwrap_err();

    match err {
        IntakeError::CorpusIndex { message } => assert!(message.contains("3 polls")),
        other => panic!("expected CorpusIndex, got {:?}", other),
    }
}
