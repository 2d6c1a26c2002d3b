use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and collaborator modes.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let extraction = if state.config.extraction_service_url.is_some() {
        "service"
    } else {
        "local"
    };
    let notifications = if state.config.email_webhook_url.is_some() {
        "webhook"
    } else {
        "log"
    };

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "screening-api",
        "extraction": extraction,
        "notifications": notifications
    }))
}
