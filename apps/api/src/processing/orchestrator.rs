//! Application Orchestrator: runs one application through the screening pipeline.
//!
//! Flow per application:
//! 1. load bundle (application + job + user + company)
//! 2. skip if already processed, unless forced
//! 3. resolve resume URL (application, then profile); none → PROCESSING_FAILED
//! 4. derive `JobRequirement` from the posting
//! 5. extract text (retried) → parse → persist parsed resume
//! 6. score (retried) → persist score and decision
//! 7. decision email, best effort
//!
//! Collaborator failures after retries degrade to MANUAL_REVIEW. Anything
//! unexpected marks the application PROCESSING_FAILED and is returned as `Err`.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::extraction::TextExtractor;
use crate::models::application::{
    ApplicationBundle, ApplicationRecord, ApplicationStatus, ReviewStatus, NO_RESUME,
};
use crate::models::job::{JobPosting, JobRequirement};
use crate::models::resume::ParsedResume;
use crate::parsing::ResumeParser;
use crate::processing::notify::{DecisionEmail, DecisionNotifier, Recipient};
use crate::processing::resume_url::{choose_resume_url, ResumeSource};
use crate::processing::retry::RetryPolicy;
use crate::processing::store::{ApplicationFilter, ApplicationStore, StoreError};
use crate::scoring::{Category, Decision, Recommendation, ResumeScorer, ScoreResult};

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("application {0} not found")]
    ApplicationNotFound(Uuid),

    #[error("job {job_id} for application {application_id} not found")]
    JobNotFound { application_id: Uuid, job_id: Uuid },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingPolicy {
    pub extraction: RetryPolicy,
    pub scoring: RetryPolicy,
    /// Pause between applications in a batch.
    pub batch_pacing: Duration,
}

impl Default for ProcessingPolicy {
    fn default() -> Self {
        Self {
            extraction: RetryPolicy::new(2, Duration::from_secs(2)),
            scoring: RetryPolicy::new(2, Duration::from_secs(1)),
            batch_pacing: Duration::from_secs(1),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Outcomes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Scored,
    AlreadyProcessed,
    NoResume,
    ManualReview,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProcessingOutcome {
    pub success: bool,
    pub application_id: Uuid,
    pub status: OutcomeStatus,
    pub score: Option<u8>,
    pub decision: Option<Decision>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub category_scores: BTreeMap<Category, u8>,
    pub email_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ProcessingOutcome {
    fn bare(application_id: Uuid, status: OutcomeStatus, success: bool) -> Self {
        Self {
            success,
            application_id,
            status,
            score: None,
            decision: None,
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
            recommendations: Vec::new(),
            category_scores: BTreeMap::new(),
            email_sent: false,
            message: None,
        }
    }

    fn scored(application_id: Uuid, status: OutcomeStatus, result: &ScoreResult) -> Self {
        Self {
            score: Some(result.overall_score),
            decision: Some(result.decision),
            matched_skills: result.matched_skills.clone(),
            missing_skills: result.missing_skills.clone(),
            recommendations: result.recommendations.clone(),
            category_scores: result.category_scores.clone(),
            ..Self::bare(application_id, status, true)
        }
    }

    fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchItem {
    pub application_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ProcessingOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub already_processed: usize,
    pub results: Vec<BatchItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingStats {
    pub total: usize,
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub manual_review: usize,
    pub processing_failed: usize,
    pub automated: usize,
    pub average_score: Option<f64>,
}

// ────────────────────────────────────────────────────────────────────────────
// Orchestrator
// ────────────────────────────────────────────────────────────────────────────

pub struct ApplicationOrchestrator {
    store: Arc<dyn ApplicationStore>,
    extractor: Arc<dyn TextExtractor>,
    parser: ResumeParser,
    scorer: Arc<dyn ResumeScorer>,
    notifier: Arc<dyn DecisionNotifier>,
    policy: ProcessingPolicy,
}

impl ApplicationOrchestrator {
    pub fn new(
        store: Arc<dyn ApplicationStore>,
        extractor: Arc<dyn TextExtractor>,
        parser: ResumeParser,
        scorer: Arc<dyn ResumeScorer>,
        notifier: Arc<dyn DecisionNotifier>,
    ) -> Self {
        Self {
            store,
            extractor,
            parser,
            scorer,
            notifier,
            policy: ProcessingPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ProcessingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Screens one application. Unexpected failures mark it PROCESSING_FAILED.
    pub async fn process_application(
        &self,
        application_id: Uuid,
        force: bool,
    ) -> Result<ProcessingOutcome, ProcessingError> {
        info!(%application_id, force, "processing application");
        match self.run(application_id, force).await {
            Ok(outcome) => {
                info!(
                    %application_id,
                    status = ?outcome.status,
                    score = ?outcome.score,
                    decision = ?outcome.decision,
                    "application processed"
                );
                Ok(outcome)
            }
            Err(e) => {
                error!(%application_id, "processing failed: {e}");
                self.mark_failed(application_id, &e.to_string()).await;
                Err(e)
            }
        }
    }

    async fn run(&self, id: Uuid, force: bool) -> Result<ProcessingOutcome, ProcessingError> {
        let bundle = self
            .store
            .find_application(id)
            .await?
            .ok_or(ProcessingError::ApplicationNotFound(id))?;
        let job = bundle.job.clone().ok_or(ProcessingError::JobNotFound {
            application_id: id,
            job_id: bundle.application.job_id,
        })?;
        let mut application = bundle.application.clone();

        if !force && application.is_processed() {
            info!(application_id = %id, "already processed, skipping");
            return Ok(already_processed(&application));
        }

        let profile_url = bundle.user.as_ref().and_then(|u| u.resume_url.as_deref());
        let Some(source) = choose_resume_url(application.resume_url.as_deref(), profile_url) else {
            return self.fail_without_resume(application).await;
        };
        let resume_url = source.url().to_string();
        if matches!(source, ResumeSource::Profile(_)) {
            info!(application_id = %id, "using resume from candidate profile");
            application.resume_url = Some(resume_url.clone());
            self.store.save_application(&application).await?;
        }

        let requirement = JobRequirement::from_posting(&job);

        let text = match self
            .policy
            .extraction
            .run("text extraction", || self.extractor.extract_text(&resume_url))
            .await
        {
            Ok(text) => text,
            Err(e) => {
                let reason = format!("text extraction failed: {e}");
                return self.degrade(application, &bundle, &job, None, reason).await;
            }
        };

        let parsed = self.parser.parse(&text);
        application.parsed_resume = Some(parsed.clone());
        self.store.save_application(&application).await?;
        if parsed.is_error() {
            let reason = format!(
                "resume parsing failed: {}",
                parsed.error.as_deref().unwrap_or("unknown error")
            );
            return self
                .degrade(application, &bundle, &job, Some(&parsed), reason)
                .await;
        }

        let result = match self
            .policy
            .scoring
            .run("scoring", || self.scorer.score(&parsed, &requirement))
            .await
        {
            Ok(result) => result,
            Err(e) => {
                let reason = format!("scoring failed: {e}");
                return self
                    .degrade(application, &bundle, &job, Some(&parsed), reason)
                    .await;
            }
        };

        let now = Utc::now();
        application.score = Some(result.clone());
        application.review_status = result.decision.into();
        application.status = result.decision.into();
        application.automated_at = Some(now);
        application.reviewed_at = Some(now);
        application.processing_error = None;
        self.store.save_application(&application).await?;

        let email = decision_email(&bundle, &job, Some(&parsed), Some(&result));
        let email_sent = self
            .notify(result.decision, &bundle, Some(&parsed), &email)
            .await;

        Ok(ProcessingOutcome {
            email_sent,
            ..ProcessingOutcome::scored(id, OutcomeStatus::Scored, &result)
        })
    }

    async fn fail_without_resume(
        &self,
        mut application: ApplicationRecord,
    ) -> Result<ProcessingOutcome, ProcessingError> {
        warn!(application_id = %application.id, "no usable resume URL");
        if application.resume_url.is_none() {
            application.resume_url = Some(NO_RESUME.to_string());
        }
        application.score = None;
        application.review_status = ReviewStatus::ProcessingFailed;
        application.processing_error = Some("no valid resume URL".to_string());
        application.automated_at = Some(Utc::now());
        self.store.save_application(&application).await?;

        Ok(
            ProcessingOutcome::bare(application.id, OutcomeStatus::NoResume, false)
                .with_message("no valid resume URL"),
        )
    }

    /// Routes the application to a human and tells the candidate.
    async fn degrade(
        &self,
        mut application: ApplicationRecord,
        bundle: &ApplicationBundle,
        job: &JobPosting,
        parsed: Option<&ParsedResume>,
        reason: String,
    ) -> Result<ProcessingOutcome, ProcessingError> {
        warn!(application_id = %application.id, "degrading to manual review: {reason}");
        application.score = None;
        application.status = ApplicationStatus::Pending;
        application.review_status = ReviewStatus::ManualReview;
        application.processing_error = Some(reason.clone());
        application.automated_at = Some(Utc::now());
        self.store.save_application(&application).await?;

        let email = decision_email(bundle, job, parsed, None);
        let email_sent = self
            .notify(Decision::ManualReview, bundle, parsed, &email)
            .await;

        let mut outcome =
            ProcessingOutcome::bare(application.id, OutcomeStatus::ManualReview, true)
                .with_message(reason);
        outcome.decision = Some(Decision::ManualReview);
        outcome.email_sent = email_sent;
        Ok(outcome)
    }

    async fn notify(
        &self,
        decision: Decision,
        bundle: &ApplicationBundle,
        parsed: Option<&ParsedResume>,
        email: &DecisionEmail,
    ) -> bool {
        let Some(recipient) = recipient(bundle, parsed) else {
            warn!(application_id = %bundle.application.id, "no recipient for decision email");
            return false;
        };
        match self
            .notifier
            .send_decision_email(decision, &recipient, email)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(application_id = %bundle.application.id, "decision email failed: {e}");
                false
            }
        }
    }

    async fn mark_failed(&self, id: Uuid, message: &str) {
        let bundle = match self.store.find_application(id).await {
            Ok(Some(bundle)) => bundle,
            Ok(None) => return,
            Err(e) => {
                error!(application_id = %id, "could not load application to mark failed: {e}");
                return;
            }
        };
        let mut application = bundle.application;
        application.score = None;
        application.review_status = ReviewStatus::ProcessingFailed;
        application.processing_error = Some(message.to_string());
        if let Err(e) = self.store.save_application(&application).await {
            error!(application_id = %id, "could not mark application failed: {e}");
        }
    }

    // ── batch operations ────────────────────────────────────────────────────

    /// Processes applications one at a time with a fixed pause between them.
    pub async fn process_batch(&self, ids: &[Uuid], force: bool) -> BatchReport {
        let mut report = BatchReport {
            total: ids.len(),
            ..Default::default()
        };

        for (index, id) in ids.iter().copied().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.policy.batch_pacing).await;
            }
            let item = match self.process_application(id, force).await {
                Ok(outcome) => {
                    match outcome.status {
                        OutcomeStatus::AlreadyProcessed => report.already_processed += 1,
                        _ if outcome.success => report.successful += 1,
                        _ => report.failed += 1,
                    }
                    BatchItem {
                        application_id: id,
                        outcome: Some(outcome),
                        error: None,
                    }
                }
                Err(e) => {
                    report.failed += 1;
                    BatchItem {
                        application_id: id,
                        outcome: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            report.results.push(item);
        }

        info!(
            total = report.total,
            successful = report.successful,
            failed = report.failed,
            already_processed = report.already_processed,
            "batch finished"
        );
        report
    }

    /// Forced re-run of applications left in PROCESSING_FAILED.
    pub async fn reprocess_failed(&self, limit: usize) -> Result<BatchReport, ProcessingError> {
        let filter = ApplicationFilter {
            review_status: Some(ReviewStatus::ProcessingFailed),
            limit: Some(limit),
            ..Default::default()
        };
        let ids: Vec<Uuid> = self
            .store
            .list_applications(&filter)
            .await?
            .iter()
            .map(|a| a.id)
            .collect();
        info!(count = ids.len(), "reprocessing failed applications");
        Ok(self.process_batch(&ids, true).await)
    }

    pub async fn processing_stats(
        &self,
        job_id: Option<Uuid>,
    ) -> Result<ProcessingStats, ProcessingError> {
        let filter = ApplicationFilter {
            job_id,
            ..Default::default()
        };
        let applications = self.store.list_applications(&filter).await?;

        let mut stats = ProcessingStats {
            total: applications.len(),
            ..Default::default()
        };
        let mut score_sum = 0u64;
        let mut scored = 0u64;
        for application in &applications {
            match application.review_status {
                ReviewStatus::Pending => stats.pending += 1,
                ReviewStatus::Accept => stats.accepted += 1,
                ReviewStatus::Reject => stats.rejected += 1,
                ReviewStatus::ManualReview => stats.manual_review += 1,
                ReviewStatus::ProcessingFailed => stats.processing_failed += 1,
            }
            if application.automated_at.is_some() {
                stats.automated += 1;
            }
            if let Some(score) = &application.score {
                score_sum += u64::from(score.overall_score);
                scored += 1;
            }
        }
        if scored > 0 {
            let mean = score_sum as f64 / scored as f64;
            stats.average_score = Some((mean * 10.0).round() / 10.0);
        }
        Ok(stats)
    }
}

fn already_processed(application: &ApplicationRecord) -> ProcessingOutcome {
    let outcome = match &application.score {
        Some(result) => {
            ProcessingOutcome::scored(application.id, OutcomeStatus::AlreadyProcessed, result)
        }
        None => ProcessingOutcome::bare(application.id, OutcomeStatus::AlreadyProcessed, true),
    };
    let decision = application
        .review_status
        .as_decision()
        .or(outcome.decision);
    ProcessingOutcome {
        decision,
        ..outcome
    }
    .with_message("already processed")
}

fn recipient(bundle: &ApplicationBundle, parsed: Option<&ParsedResume>) -> Option<Recipient> {
    let user = bundle.user.as_ref();
    let email = user
        .map(|u| u.email.clone())
        .filter(|e| !e.trim().is_empty())
        .or_else(|| parsed.map(|p| p.email.clone()).filter(|e| !e.is_empty()))?;
    let name = user
        .map(|u| u.name.clone())
        .filter(|n| !n.trim().is_empty())
        .or_else(|| parsed.map(|p| p.name.clone()))
        .unwrap_or_default();
    Some(Recipient { name, email })
}

fn decision_email(
    bundle: &ApplicationBundle,
    job: &JobPosting,
    parsed: Option<&ParsedResume>,
    result: Option<&ScoreResult>,
) -> DecisionEmail {
    let candidate_name = bundle
        .user
        .as_ref()
        .map(|u| u.name.clone())
        .filter(|n| !n.trim().is_empty())
        .or_else(|| parsed.map(|p| p.name.clone()))
        .unwrap_or_default();

    DecisionEmail {
        candidate_name,
        job_title: job.title.clone(),
        company_name: bundle
            .company
            .as_ref()
            .map(|c| c.name.clone())
            .unwrap_or_default(),
        score: result.map(|r| r.overall_score),
        recommendations: result.map(|r| r.recommendations.clone()).unwrap_or_default(),
        matched_skills: result.map(|r| r.matched_skills.clone()).unwrap_or_default(),
        missing_skills: result.map(|r| r.missing_skills.clone()).unwrap_or_default(),
    }
}
