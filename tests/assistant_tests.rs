// Integration tests for the grounded assistant wrapper and the chat loop

use dispatch_intake::{
    AssistantProfile, ChatLoop, ChatRole, GroundedAssistant, IntakeError, PollStrategy, RunStatus,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

mod common;
use common::FakeAssistant;

async fn grounded(assistant: Arc<FakeAssistant>, poll: PollStrategy) -> GroundedAssistant {
    GroundedAssistant::create(
        assistant,
        &AssistantProfile::operator("gpt-4o"),
        "store-1",
        poll,
    )
    .await
    .unwrap()
}

#[tokio::test]
async fn test_ask_returns_first_message_text_unmodified() {
    let backend = Arc::new(FakeAssistant::answering("Answer【1:0†doc.pdf】 here"));
    let assistant = grounded(backend, PollStrategy::no_delay()).await;

    // `ask` itself does not strip markers; that is caller-side cleanup.
    let answer = assistant.ask("what now?").await.unwrap();
    assert_eq!(answer, "Answer【1:0†doc.pdf】 here");
}

#[tokio::test]
async fn test_ask_polls_through_pending_statuses() {
    let backend = Arc::new(FakeAssistant::answering("done").with_pending_polls(3));
    let assistant = grounded(backend.clone(), PollStrategy::no_delay()).await;

    let answer = assistant.ask("q").await.unwrap();
    assert_eq!(answer, "done");
}

#[tokio::test]
async fn test_ask_surfaces_terminal_failure_reason() {
    for status in [RunStatus::Failed, RunStatus::Expired, RunStatus::Cancelled] {
        let backend = Arc::new(FakeAssistant::run_ending(status.clone()));
        let assistant = grounded(backend, PollStrategy::no_delay()).await;

        let err = assistant.ask("q").await.unwrap_err();
        match err {
            IntakeError::AssistantRun { reason } => assert_eq!(reason, status.as_str()),
            other => panic!("expected AssistantRun, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_ask_fails_instead_of_hanging_on_stuck_run() {
    let backend = Arc::new(FakeAssistant::answering("never").with_pending_polls(1000));
    let poll = PollStrategy {
        interval: Duration::ZERO,
        max_attempts: 5,
    };
    let assistant = grounded(backend, poll).await;

    let err = assistant.ask("q").await.unwrap_err();
    match err {
        IntakeError::AssistantRun { reason } => assert!(reason.contains("5 polls")),
        other => panic!("expected AssistantRun, got {:?}", other),
    }
}

#[tokio::test]
async fn test_each_ask_opens_a_fresh_thread() {
    let backend = Arc::new(FakeAssistant::answering("a"));
    let assistant = grounded(backend.clone(), PollStrategy::no_delay()).await;

    assistant.ask("one").await.unwrap();
    assistant.ask("two").await.unwrap();
    assistant.ask("three").await.unwrap();

    assert_eq!(backend.threads_created.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_chat_turns_append_in_order_with_clean_answers() {
    let backend = Arc::new(FakeAssistant::answering("Use protocol 7【2:1†x.pdf】"));
    let assistant = Arc::new(grounded(backend, PollStrategy::no_delay()).await);
    let mut chat = ChatLoop::new(assistant);

    let reply = chat.send("what protocol applies?").await.unwrap();
    assert_eq!(reply, "Use protocol 7");

    let history = chat.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, ChatRole::User);
    assert_eq!(history[0].content, "what protocol applies?");
    assert_eq!(history[1].role, ChatRole::Assistant);
    assert_eq!(history[1].content, "Use protocol 7");
}

#[tokio::test]
async fn test_failed_chat_turn_keeps_the_question() {
    let backend = Arc::new(FakeAssistant::run_ending(RunStatus::Failed));
    let assistant = Arc::new(grounded(backend, PollStrategy::no_delay()).await);
    let mut chat = ChatLoop::new(assistant);

    let err = chat.send("anyone there?").await.unwrap_err();
    assert!(matches!(err, IntakeError::AssistantRun { .. }));

    let history = chat.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].role, ChatRole::User);
}

#[tokio::test]
async fn test_chat_reset_clears_history() {
    let backend = Arc::new(FakeAssistant::answering("ok"));
    let assistant = Arc::new(grounded(backend, PollStrategy::no_delay()).await);
    let mut chat = ChatLoop::new(assistant);

    chat.send("one").await.unwrap();
    chat.send("two").await.unwrap();
    assert_eq!(chat.history().len(), 4);

    chat.reset();
    assert!(chat.history().is_empty());
}
