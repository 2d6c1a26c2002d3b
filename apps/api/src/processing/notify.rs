//! Decision notifications sent to candidates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::scoring::{Decision, Recommendation};

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification rejected (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("recipient has no email address")]
    MissingRecipient,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipient {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DecisionEmail {
    pub candidate_name: String,
    pub job_title: String,
    pub company_name: String,
    pub score: Option<u8>,
    pub recommendations: Vec<Recommendation>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// Outbound decision email. Failures are reported, never retried.
#[async_trait]
pub trait DecisionNotifier: Send + Sync {
    async fn send_decision_email(
        &self,
        decision: Decision,
        recipient: &Recipient,
        email: &DecisionEmail,
    ) -> Result<(), NotificationError>;
}

/// Writes notifications to the log. Used when no relay is configured.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl DecisionNotifier for LogNotifier {
    async fn send_decision_email(
        &self,
        decision: Decision,
        recipient: &Recipient,
        email: &DecisionEmail,
    ) -> Result<(), NotificationError> {
        if recipient.email.trim().is_empty() {
            return Err(NotificationError::MissingRecipient);
        }
        info!(
            %decision,
            to = %recipient.email,
            job = %email.job_title,
            score = ?email.score,
            "decision email (log only)"
        );
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    template: &'a str,
    decision: Decision,
    to: &'a Recipient,
    #[serde(flatten)]
    email: &'a DecisionEmail,
}

fn template_for(decision: Decision) -> &'static str {
    match decision {
        Decision::Accept => "application_accepted",
        Decision::Reject => "application_rejected",
        Decision::ManualReview => "application_under_review",
    }
}

/// Posts decision emails as JSON to an email relay endpoint.
#[derive(Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String, timeout: Duration) -> Result<Self, NotificationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl DecisionNotifier for WebhookNotifier {
    async fn send_decision_email(
        &self,
        decision: Decision,
        recipient: &Recipient,
        email: &DecisionEmail,
    ) -> Result<(), NotificationError> {
        if recipient.email.trim().is_empty() {
            return Err(NotificationError::MissingRecipient);
        }
        let payload = WebhookPayload {
            template: template_for(decision),
            decision,
            to: recipient,
            email,
        };

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        info!(%decision, to = %recipient.email, "decision email sent");
        Ok(())
    }
}
