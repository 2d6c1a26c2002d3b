mod config;
mod errors;
mod extraction;
mod models;
mod parsing;
mod processing;
mod routes;
mod scoring;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::{ExtractionSettings, HttpTextExtractor};
use crate::parsing::ResumeParser;
use crate::processing::notify::{DecisionNotifier, LogNotifier, WebhookNotifier};
use crate::processing::store::MemoryStore;
use crate::processing::ApplicationOrchestrator;
use crate::routes::build_router;
use crate::scoring::ScoringEngine;
use crate::state::AppState;

const NOTIFIER_TIMEOUT_SECS: u64 = 10;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting screening API v{}", env!("CARGO_PKG_VERSION"));

    // Application store (in-memory, optionally seeded)
    let store = match &config.seed_data_path {
        Some(path) => {
            let store = MemoryStore::from_seed_file(path)?;
            info!("Store seeded from {}", path.display());
            store
        }
        None => MemoryStore::new(),
    };

    // Text extraction
    let extractor = HttpTextExtractor::new(ExtractionSettings {
        service_url: config.extraction_service_url.clone(),
        api_key: config.extraction_api_key.clone(),
        timeout: config.extraction_timeout,
    })?;
    match &config.extraction_service_url {
        Some(url) => info!("Text extraction via conversion service at {url}"),
        None => info!("Text extraction in-process (PDF and plain text)"),
    }

    // Decision notifications
    let notifier: Arc<dyn DecisionNotifier> = match &config.email_webhook_url {
        Some(url) => {
            info!("Decision emails relayed to {url}");
            Arc::new(WebhookNotifier::new(
                url.clone(),
                std::time::Duration::from_secs(NOTIFIER_TIMEOUT_SECS),
            )?)
        }
        None => {
            info!("EMAIL_WEBHOOK_URL not set; decision emails are logged only");
            Arc::new(LogNotifier)
        }
    };

    let parser = ResumeParser::new();
    let engine = match &config.scoring_weights {
        Some(weights) => {
            info!("Custom scoring weights: {weights:?}");
            ScoringEngine::with_weights(weights.clone())?
        }
        None => ScoringEngine::new(),
    };
    let engine = Arc::new(engine);
    let orchestrator = ApplicationOrchestrator::new(
        Arc::new(store),
        Arc::new(extractor),
        parser,
        engine.clone(),
        notifier,
    );

    // Build app state
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        parser,
        engine,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
