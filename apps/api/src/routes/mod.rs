pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::processing::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Application processing
        .route(
            "/api/v1/applications/:id/process",
            post(handlers::handle_process_application),
        )
        .route(
            "/api/v1/applications/batch",
            post(handlers::handle_process_batch),
        )
        .route(
            "/api/v1/applications/reprocess-failed",
            post(handlers::handle_reprocess_failed),
        )
        .route(
            "/api/v1/applications/stats",
            get(handlers::handle_processing_stats),
        )
        // Stand-alone screening
        .route("/api/v1/resumes/parse", post(handlers::handle_parse_resume))
        .route("/api/v1/resumes/score", post(handlers::handle_score_resume))
        .with_state(state)
}
