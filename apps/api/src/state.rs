use std::sync::Arc;

use crate::config::Config;
use crate::parsing::ResumeParser;
use crate::processing::ApplicationOrchestrator;
use crate::scoring::ScoringEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ApplicationOrchestrator>,
    /// Used directly by the stand-alone parse and score endpoints.
    pub parser: ResumeParser,
    pub engine: Arc<ScoringEngine>,
    pub config: Config,
}
