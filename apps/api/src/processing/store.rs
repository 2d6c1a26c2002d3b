//! Application persistence boundary and the in-memory store used by default.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::application::{
    ApplicationBundle, ApplicationRecord, Company, ReviewStatus, UserProfile,
};
use crate::models::job::JobPosting;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("application {0} not found")]
    NotFound(Uuid),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApplicationFilter {
    pub job_id: Option<Uuid>,
    pub review_status: Option<ReviewStatus>,
    pub limit: Option<usize>,
}

impl ApplicationFilter {
    fn matches(&self, record: &ApplicationRecord) -> bool {
        self.job_id.map_or(true, |id| record.job_id == id)
            && self.review_status.map_or(true, |s| record.review_status == s)
    }
}

/// Storage abstraction so the orchestrator can be exercised in isolation.
///
/// Saves replace the whole application document of an existing application.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn find_application(&self, id: Uuid) -> Result<Option<ApplicationBundle>, StoreError>;

    async fn save_application(&self, record: &ApplicationRecord) -> Result<(), StoreError>;

    async fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<ApplicationRecord>, StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// MemoryStore
// ────────────────────────────────────────────────────────────────────────────

/// JSON document accepted by `MemoryStore::from_seed_file`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub jobs: Vec<JobPosting>,
    pub users: Vec<UserProfile>,
    pub companies: Vec<Company>,
    pub applications: Vec<ApplicationRecord>,
}

#[derive(Default)]
struct Tables {
    applications: HashMap<Uuid, ApplicationRecord>,
    jobs: HashMap<Uuid, JobPosting>,
    users: HashMap<Uuid, UserProfile>,
    companies: HashMap<Uuid, Company>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: SeedData) -> Self {
        let tables = Tables {
            applications: seed.applications.into_iter().map(|a| (a.id, a)).collect(),
            jobs: seed.jobs.into_iter().map(|j| (j.id, j)).collect(),
            users: seed.users.into_iter().map(|u| (u.id, u)).collect(),
            companies: seed.companies.into_iter().map(|c| (c.id, c)).collect(),
        };
        Self {
            tables: RwLock::new(tables),
        }
    }

    pub fn from_seed_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read seed file {}", path.display()))?;
        let seed: SeedData = serde_json::from_str(&raw)
            .with_context(|| format!("invalid seed data in {}", path.display()))?;
        Ok(Self::from_seed(seed))
    }

    pub async fn insert_job(&self, job: JobPosting) {
        self.tables.write().await.jobs.insert(job.id, job);
    }

    pub async fn insert_user(&self, user: UserProfile) {
        self.tables.write().await.users.insert(user.id, user);
    }

    pub async fn insert_company(&self, company: Company) {
        self.tables.write().await.companies.insert(company.id, company);
    }

    pub async fn insert_application(&self, application: ApplicationRecord) {
        self.tables
            .write()
            .await
            .applications
            .insert(application.id, application);
    }

    pub async fn application(&self, id: Uuid) -> Option<ApplicationRecord> {
        self.tables.read().await.applications.get(&id).cloned()
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn find_application(&self, id: Uuid) -> Result<Option<ApplicationBundle>, StoreError> {
        let tables = self.tables.read().await;
        let Some(application) = tables.applications.get(&id).cloned() else {
            return Ok(None);
        };
        let job = tables.jobs.get(&application.job_id).cloned();
        let user = tables.users.get(&application.user_id).cloned();
        let company = job
            .as_ref()
            .and_then(|j| j.company_id)
            .and_then(|cid| tables.companies.get(&cid).cloned());

        Ok(Some(ApplicationBundle {
            application,
            job,
            user,
            company,
        }))
    }

    async fn save_application(&self, record: &ApplicationRecord) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .applications
            .get_mut(&record.id)
            .ok_or(StoreError::NotFound(record.id))?;
        *stored = record.clone();
        Ok(())
    }

    async fn list_applications(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<Vec<ApplicationRecord>, StoreError> {
        let tables = self.tables.read().await;
        let mut records: Vec<ApplicationRecord> = tables
            .applications
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        records.sort_by_key(|r| r.submitted_at);
        if let Some(limit) = filter.limit {
            records.truncate(limit);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_bundle_joins_job_user_and_company() {
        let store = MemoryStore::new();
        let company = Company {
            id: Uuid::new_v4(),
            name: "Acme".into(),
        };
        let job = JobPosting {
            id: Uuid::new_v4(),
            company_id: Some(company.id),
            title: "Backend Developer".into(),
            ..Default::default()
        };
        let user = UserProfile {
            id: Uuid::new_v4(),
            name: "Jane".into(),
            email: "jane@example.com".into(),
            resume_url: None,
        };
        let app = ApplicationRecord::new(job.id, user.id, None);
        let app_id = app.id;

        store.insert_company(company).await;
        store.insert_job(job).await;
        store.insert_user(user).await;
        store.insert_application(app).await;

        let bundle = store.find_application(app_id).await.unwrap().unwrap();
        assert_eq!(bundle.job.unwrap().title, "Backend Developer");
        assert_eq!(bundle.user.unwrap().name, "Jane");
        assert_eq!(bundle.company.unwrap().name, "Acme");

        assert!(store.find_application(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_replaces_existing_and_rejects_unknown() {
        let store = MemoryStore::new();
        let mut app = ApplicationRecord::new(Uuid::new_v4(), Uuid::new_v4(), None);
        store.insert_application(app.clone()).await;

        app.review_status = ReviewStatus::ManualReview;
        store.save_application(&app).await.unwrap();
        let stored = store.application(app.id).await.unwrap();
        assert_eq!(stored.review_status, ReviewStatus::ManualReview);

        let unknown = ApplicationRecord::new(Uuid::new_v4(), Uuid::new_v4(), None);
        let err = store.save_application(&unknown).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == unknown.id));
    }

    #[tokio::test]
    async fn test_list_filters_and_limits() {
        let store = MemoryStore::new();
        let job_a = Uuid::new_v4();
        let job_b = Uuid::new_v4();
        for job in [job_a, job_a, job_b] {
            let mut app = ApplicationRecord::new(job, Uuid::new_v4(), None);
            if job == job_b {
                app.review_status = ReviewStatus::ProcessingFailed;
            }
            store.insert_application(app).await;
        }

        let by_job = ApplicationFilter {
            job_id: Some(job_a),
            ..Default::default()
        };
        assert_eq!(store.list_applications(&by_job).await.unwrap().len(), 2);

        let failed = ApplicationFilter {
            review_status: Some(ReviewStatus::ProcessingFailed),
            ..Default::default()
        };
        assert_eq!(store.list_applications(&failed).await.unwrap().len(), 1);

        let limited = ApplicationFilter {
            limit: Some(1),
            ..Default::default()
        };
        assert_eq!(store.list_applications(&limited).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_seed_file_loads() {
        let job_id = Uuid::new_v4();
        let app_id = Uuid::new_v4();
        let seed = serde_json::json!({
            "jobs": [{ "id": job_id, "title": "Data Analyst", "skills": ["sql"] }],
            "applications": [{ "id": app_id, "job_id": job_id, "user_id": Uuid::new_v4() }]
        });
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{seed}").unwrap();

        let store = MemoryStore::from_seed_file(file.path()).unwrap();
        let bundle = store.find_application(app_id).await.unwrap().unwrap();
        assert_eq!(bundle.job.unwrap().skills, vec!["sql"]);
        assert_eq!(bundle.application.review_status, ReviewStatus::Pending);
    }

    #[test]
    fn test_bad_seed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = MemoryStore::from_seed_file(file.path()).err().unwrap();
        assert!(format!("{err:#}").contains("invalid seed data"));
    }
}
