//! In-memory `PlacementStore` used by the unit tests. A single mutex over
//! the whole state makes create-if-absent and the status CAS atomic, which
//! is exactly the guarantee the Postgres constraints provide in production.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, JobApplicationRow};
use crate::models::branch::BranchRow;
use crate::models::company::{CompanyRow, VerificationStatus};
use crate::models::drive::PlacementDriveRow;
use crate::models::posting::{JobPostingRow, PostingStatus};
use crate::models::student::StudentProfileRow;
use crate::store::{PlacementSnapshot, PlacementStore};

#[derive(Default)]
struct Inner {
    students: HashMap<Uuid, StudentProfileRow>,
    branches: Vec<BranchRow>,
    companies: HashMap<Uuid, CompanyRow>,
    postings: HashMap<Uuid, JobPostingRow>,
    applications: HashMap<Uuid, JobApplicationRow>,
    drives: Vec<PlacementDriveRow>,
}

#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_profile(&self, profile: StudentProfileRow) {
        self.inner
            .lock()
            .unwrap()
            .students
            .insert(profile.id, profile);
    }

    pub fn insert_branch(&self, branch: BranchRow) {
        self.inner.lock().unwrap().branches.push(branch);
    }

    pub fn insert_company(&self, company: CompanyRow) {
        self.inner
            .lock()
            .unwrap()
            .companies
            .insert(company.id, company);
    }

    pub fn insert_posting(&self, posting: JobPostingRow) {
        self.inner
            .lock()
            .unwrap()
            .postings
            .insert(posting.id, posting);
    }

    pub fn insert_application(&self, application: JobApplicationRow) {
        self.inner
            .lock()
            .unwrap()
            .applications
            .insert(application.id, application);
    }

    pub fn insert_drive(&self, drive: PlacementDriveRow) {
        self.inner.lock().unwrap().drives.push(drive);
    }
}

#[async_trait]
impl PlacementStore for InMemoryStore {
    async fn student_profile(&self, id: Uuid) -> Result<Option<StudentProfileRow>, AppError> {
        Ok(self.inner.lock().unwrap().students.get(&id).cloned())
    }

    async fn posting(&self, id: Uuid) -> Result<Option<JobPostingRow>, AppError> {
        Ok(self.inner.lock().unwrap().postings.get(&id).cloned())
    }

    async fn open_postings(&self) -> Result<Vec<JobPostingRow>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .postings
            .values()
            .filter(|p| p.status == PostingStatus::Open)
            .cloned()
            .collect())
    }

    async fn create_posting(&self, posting: JobPostingRow) -> Result<JobPostingRow, AppError> {
        self.insert_posting(posting.clone());
        Ok(posting)
    }

    async fn close_posting(
        &self,
        id: Uuid,
        closed_at: DateTime<Utc>,
    ) -> Result<Option<JobPostingRow>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.postings.get_mut(&id) {
            Some(posting) if posting.status == PostingStatus::Open => {
                posting.status = PostingStatus::Closed;
                posting.updated_at = closed_at;
                Ok(Some(posting.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn application(&self, id: Uuid) -> Result<Option<JobApplicationRow>, AppError> {
        Ok(self.inner.lock().unwrap().applications.get(&id).cloned())
    }

    async fn applications_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<JobApplicationRow>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .applications
            .values()
            .filter(|a| a.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn applications_for_posting(
        &self,
        posting_id: Uuid,
    ) -> Result<Vec<JobApplicationRow>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .applications
            .values()
            .filter(|a| a.posting_id == posting_id)
            .cloned()
            .collect())
    }

    async fn create_application_if_absent(
        &self,
        student_id: Uuid,
        posting_id: Uuid,
        applied_at: DateTime<Utc>,
    ) -> Result<Option<JobApplicationRow>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        let exists = inner
            .applications
            .values()
            .any(|a| a.student_id == student_id && a.posting_id == posting_id);
        if exists {
            return Ok(None);
        }
        let application = JobApplicationRow {
            id: Uuid::new_v4(),
            student_id,
            posting_id,
            status: ApplicationStatus::Submitted,
            applied_at,
            updated_at: applied_at,
        };
        inner.applications.insert(application.id, application.clone());
        Ok(Some(application))
    }

    async fn transition_application(
        &self,
        id: Uuid,
        from: ApplicationStatus,
        to: ApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<JobApplicationRow>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.applications.get_mut(&id) {
            Some(application) if application.status == from => {
                application.status = to;
                application.updated_at = updated_at;
                Ok(Some(application.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn company(&self, id: Uuid) -> Result<Option<CompanyRow>, AppError> {
        Ok(self.inner.lock().unwrap().companies.get(&id).cloned())
    }

    async fn set_company_verification(
        &self,
        id: Uuid,
        status: VerificationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CompanyRow>, AppError> {
        let mut inner = self.inner.lock().unwrap();
        match inner.companies.get_mut(&id) {
            Some(company) => {
                company.verification = status;
                company.updated_at = updated_at;
                Ok(Some(company.clone()))
            }
            None => Ok(None),
        }
    }

    async fn placement_snapshot(&self) -> Result<PlacementSnapshot, AppError> {
        let inner = self.inner.lock().unwrap();
        Ok(PlacementSnapshot {
            students: inner.students.values().cloned().collect(),
            branches: inner.branches.clone(),
            companies: inner.companies.values().cloned().collect(),
            postings: inner.postings.values().cloned().collect(),
            applications: inner.applications.values().cloned().collect(),
            drives: inner.drives.clone(),
        })
    }
}
