use anyhow::{Context, Result};
use clap::Parser;
use dispatch_intake::{
    assistant::AssistantProfile, create_router, AppState, CallSession, ChatLoop, Config,
    GroundedAssistant, HttpSpeechToText, KeywordExtractor, OpenAiClient, PollStrategy,
    RecommendationEngine, TranscriptionPipeline,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "dispatch-intake", about = "Call-intake assistant service")]
struct Args {
    /// Config file path (without extension, `config` crate convention)
    #[arg(long, default_value = "config/dispatch-intake")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v0.1.0", cfg.service.name);

    let api_key = std::env::var(&cfg.backend.api_key_env)
        .with_context(|| format!("Missing API key in env var {}", cfg.backend.api_key_env))?;

    let http = reqwest::Client::new();
    let openai = Arc::new(OpenAiClient::new(
        http.clone(),
        &cfg.backend.base_url,
        &api_key,
        &cfg.backend.completion_model,
    ));
    let poll = PollStrategy::default();

    // Startup-fatal: no sessions are served without an indexed corpus.
    let corpus_id = dispatch_intake::load_corpus(
        openai.clone(),
        &http,
        &cfg.corpus.documents,
        &cfg.corpus.store_name,
        &poll,
    )
    .await
    .context("Corpus load failed")?;

    let profile = AssistantProfile::operator(&cfg.backend.assistant_model);
    let assistant = Arc::new(
        GroundedAssistant::create(openai.clone(), &profile, &corpus_id, poll.clone()).await?,
    );

    let stt = Arc::new(HttpSpeechToText::new(
        http,
        &cfg.backend.base_url,
        &cfg.backend.transcription_model,
        &api_key,
    ));
    let pipeline = Arc::new(TranscriptionPipeline::new(
        stt,
        Duration::from_secs(cfg.audio.chunk_duration_secs),
        &cfg.audio.language,
    ));
    let extractor = Arc::new(KeywordExtractor::new(openai));
    let recommender = Arc::new(RecommendationEngine::new(assistant.clone()));

    let session = CallSession::new(pipeline, extractor, recommender);
    let chat = ChatLoop::new(assistant);

    let state = AppState::new(session, chat);
    let router = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    info!("HTTP server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    axum::serve(listener, router).await?;

    Ok(())
}
