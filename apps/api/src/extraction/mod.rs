//! Text extraction gateway: turns a resume document URL into plain text.
//!
//! `HttpTextExtractor` has two modes:
//! - conversion service: POST `{ "url": ... }` to `EXTRACTION_SERVICE_URL`,
//!   read `{ "text": ... }` (or a plain-text body) back
//! - direct: download the document and convert it here. PDFs go through
//!   `pdf-extract` on a blocking thread; text documents are decoded as UTF-8.
//!
//! Retries are not done here. The orchestrator wraps calls in its `RetryPolicy`.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const API_KEY_HEADER: &str = "x-api-key";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("extraction failed (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("document contained no text")]
    EmptyDocument,

    #[error("unsupported document type: {0}")]
    UnsupportedType(String),

    #[error("conversion failed: {0}")]
    Conversion(String),
}

/// Resolves a document URL to its text content.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract_text(&self, url: &str) -> Result<String, ExtractionError>;
}

#[derive(Debug, Clone, Default)]
pub struct ExtractionSettings {
    pub service_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ConversionRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ConversionResponse {
    text: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentKind {
    Pdf,
    PlainText,
}

#[derive(Clone)]
pub struct HttpTextExtractor {
    client: Client,
    settings: ExtractionSettings,
}

impl HttpTextExtractor {
    pub fn new(settings: ExtractionSettings) -> Result<Self, ExtractionError> {
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    async fn via_service(&self, service_url: &str, url: &str) -> Result<String, ExtractionError> {
        let mut request = self
            .client
            .post(service_url)
            .json(&ConversionRequest { url });
        if let Some(key) = &self.settings.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await?;
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("json"));
        let body = response.text().await?;
        check_status(status, &body)?;

        let text = if is_json {
            serde_json::from_str::<ConversionResponse>(&body)
                .map_err(|e| ExtractionError::Conversion(e.to_string()))?
                .text
                .unwrap_or_default()
        } else {
            body
        };
        non_empty(text)
    }

    async fn direct(&self, url: &str) -> Result<String, ExtractionError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_lowercase();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        match detect_kind(url, &content_type, &bytes)? {
            DocumentKind::Pdf => non_empty(pdf_to_text(bytes).await?),
            DocumentKind::PlainText => non_empty(String::from_utf8_lossy(&bytes).into_owned()),
        }
    }
}

#[async_trait]
impl TextExtractor for HttpTextExtractor {
    async fn extract_text(&self, url: &str) -> Result<String, ExtractionError> {
        let text = match &self.settings.service_url {
            Some(service_url) => self.via_service(service_url, url).await?,
            None => self.direct(url).await?,
        };
        debug!(chars = text.len(), "extracted resume text");
        Ok(text)
    }
}

fn check_status(status: StatusCode, body: &str) -> Result<(), ExtractionError> {
    if status.is_success() {
        return Ok(());
    }
    Err(status_error(status, body))
}

fn status_error(status: StatusCode, body: &str) -> ExtractionError {
    ExtractionError::Status {
        status: status.as_u16(),
        message: body.chars().take(200).collect(),
    }
}

fn non_empty(text: String) -> Result<String, ExtractionError> {
    if text.trim().is_empty() {
        Err(ExtractionError::EmptyDocument)
    } else {
        Ok(text)
    }
}

fn detect_kind(url: &str, content_type: &str, bytes: &[u8]) -> Result<DocumentKind, ExtractionError> {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .to_lowercase();

    if bytes.starts_with(b"%PDF") || content_type.contains("pdf") || path.ends_with(".pdf") {
        return Ok(DocumentKind::Pdf);
    }
    if content_type.starts_with("text/plain") || path.ends_with(".txt") {
        return Ok(DocumentKind::PlainText);
    }

    let kind = if content_type.is_empty() {
        path.rsplit('/').next().unwrap_or_default().to_string()
    } else {
        content_type.to_string()
    };
    Err(ExtractionError::UnsupportedType(kind))
}

async fn pdf_to_text(bytes: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| ExtractionError::Conversion(format!("spawn_blocking failed: {e}")))?
        .map_err(|e| ExtractionError::Conversion(e.to_string()))
}
