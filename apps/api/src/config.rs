use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::scoring::WeightMap;

/// Application configuration loaded from environment variables.
/// Every variable is optional; unset values fall back to local defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Remote document conversion service. Unset: documents are converted in-process.
    pub extraction_service_url: Option<String>,
    pub extraction_api_key: Option<String>,
    pub extraction_timeout: Duration,
    /// Email relay endpoint. Unset: decision emails are only logged.
    pub email_webhook_url: Option<String>,
    pub seed_data_path: Option<PathBuf>,
    /// JSON object of category weights, e.g. `{"skills": 40, "experience": 30}`.
    pub scoring_weights: Option<WeightMap>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: optional("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            extraction_service_url: optional("EXTRACTION_SERVICE_URL"),
            extraction_api_key: optional("EXTRACTION_API_KEY"),
            extraction_timeout: Duration::from_secs(
                optional("EXTRACTION_TIMEOUT_SECS")
                    .unwrap_or_else(|| "60".to_string())
                    .parse::<u64>()
                    .context("EXTRACTION_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            email_webhook_url: optional("EMAIL_WEBHOOK_URL"),
            seed_data_path: optional("SEED_DATA_PATH").map(PathBuf::from),
            scoring_weights: optional("SCORING_WEIGHTS")
                .map(|raw| serde_json::from_str::<WeightMap>(&raw))
                .transpose()
                .context("SCORING_WEIGHTS must be a JSON object of category weights")?,
        })
    }
}
