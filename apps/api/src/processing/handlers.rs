//! Axum route handlers for application processing and ad-hoc screening.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::{JobPosting, JobRequirement};
use crate::models::resume::ParsedResume;
use crate::processing::orchestrator::{BatchReport, ProcessingOutcome, ProcessingStats};
use crate::scoring::{ScoreResult, ScoringEngine, WeightMap};
use crate::state::AppState;

const MAX_BATCH_SIZE: usize = 100;
const DEFAULT_REPROCESS_LIMIT: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct ProcessQuery {
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub application_ids: Vec<Uuid>,
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReprocessRequest {
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    pub job_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub resume_text: String,
    pub job: JobPosting,
    /// Overrides the service's category weights for this request.
    #[serde(default)]
    pub weights: Option<WeightMap>,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub parsed_resume: ParsedResume,
    pub requirement: JobRequirement,
    pub score: ScoreResult,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/applications/:id/process?force=bool
pub async fn handle_process_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<ProcessQuery>,
) -> Result<Json<ProcessingOutcome>, AppError> {
    let outcome = state.orchestrator.process_application(id, query.force).await?;
    Ok(Json(outcome))
}

/// POST /api/v1/applications/batch
///
/// Sequential; the response arrives once every application has been handled.
pub async fn handle_process_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchRequest>,
) -> Result<Json<BatchReport>, AppError> {
    if request.application_ids.is_empty() {
        return Err(AppError::Validation(
            "application_ids cannot be empty".to_string(),
        ));
    }
    if request.application_ids.len() > MAX_BATCH_SIZE {
        return Err(AppError::Validation(format!(
            "at most {MAX_BATCH_SIZE} applications per batch"
        )));
    }

    let report = state
        .orchestrator
        .process_batch(&request.application_ids, request.force)
        .await;
    Ok(Json(report))
}

/// POST /api/v1/applications/reprocess-failed
pub async fn handle_reprocess_failed(
    State(state): State<AppState>,
    request: Option<Json<ReprocessRequest>>,
) -> Result<Json<BatchReport>, AppError> {
    let limit = request
        .and_then(|Json(r)| r.limit)
        .unwrap_or(DEFAULT_REPROCESS_LIMIT)
        .min(MAX_BATCH_SIZE);
    let report = state.orchestrator.reprocess_failed(limit).await?;
    Ok(Json(report))
}

/// GET /api/v1/applications/stats?job_id=uuid
pub async fn handle_processing_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<ProcessingStats>, AppError> {
    let stats = state.orchestrator.processing_stats(query.job_id).await?;
    Ok(Json(stats))
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    Json(request): Json<ParseRequest>,
) -> Result<Json<ParsedResume>, AppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    Ok(Json(state.parser.parse(&request.text)))
}

/// POST /api/v1/resumes/score
///
/// Parses the text and scores it against the posting without touching storage.
pub async fn handle_score_resume(
    State(state): State<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_text cannot be empty".to_string(),
        ));
    }

    let parsed_resume = state.parser.parse(&request.resume_text);
    let requirement = JobRequirement::from_posting(&request.job);
    let score = match request.weights {
        Some(weights) => ScoringEngine::with_weights(weights)?.score(&parsed_resume, &requirement),
        None => state.engine.score(&parsed_resume, &requirement),
    };

    Ok(Json(ScoreResponse {
        parsed_resume,
        requirement,
        score,
    }))
}
