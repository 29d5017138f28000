//! Entity Store port. The core components only talk to this trait; `PgStore`
//! is the production implementation and an in-memory double backs the tests.
//!
//! Two methods are more than reads with a different name:
//! `create_application_if_absent` is the atomic create-if-absent primitive
//! that upholds the one-application-per-pair invariant under concurrent
//! submits, and `transition_application` applies a status change as a
//! compare-and-swap on the prior status.

pub mod postgres;

#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, JobApplicationRow};
use crate::models::branch::BranchRow;
use crate::models::company::{CompanyRow, VerificationStatus};
use crate::models::drive::PlacementDriveRow;
use crate::models::posting::JobPostingRow;
use crate::models::student::StudentProfileRow;

/// Everything the statistics aggregator needs, read in one pass so a report
/// reflects a single point-in-time view of the store.
#[derive(Debug, Clone, Default)]
pub struct PlacementSnapshot {
    pub students: Vec<StudentProfileRow>,
    pub branches: Vec<BranchRow>,
    pub companies: Vec<CompanyRow>,
    pub postings: Vec<JobPostingRow>,
    pub applications: Vec<JobApplicationRow>,
    pub drives: Vec<PlacementDriveRow>,
}

#[async_trait]
pub trait PlacementStore: Send + Sync {
    async fn student_profile(&self, id: Uuid) -> Result<Option<StudentProfileRow>, AppError>;

    async fn posting(&self, id: Uuid) -> Result<Option<JobPostingRow>, AppError>;

    /// Postings with status Open, regardless of deadline; the feed builder
    /// applies the deadline cut itself against its own clock.
    async fn open_postings(&self) -> Result<Vec<JobPostingRow>, AppError>;

    async fn create_posting(&self, posting: JobPostingRow) -> Result<JobPostingRow, AppError>;

    /// Open → Closed, guarded on the posting still being Open.
    /// Returns `None` if the posting is missing or already Closed.
    async fn close_posting(
        &self,
        id: Uuid,
        closed_at: DateTime<Utc>,
    ) -> Result<Option<JobPostingRow>, AppError>;

    async fn application(&self, id: Uuid) -> Result<Option<JobApplicationRow>, AppError>;

    async fn applications_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<JobApplicationRow>, AppError>;

    async fn applications_for_posting(
        &self,
        posting_id: Uuid,
    ) -> Result<Vec<JobApplicationRow>, AppError>;

    /// Atomically creates a Submitted application for the pair, or returns
    /// `None` if one already exists — whatever its status. This is the only
    /// defense against the concurrent-submit race; callers must not add a
    /// read-then-write existence check on top.
    async fn create_application_if_absent(
        &self,
        student_id: Uuid,
        posting_id: Uuid,
        applied_at: DateTime<Utc>,
    ) -> Result<Option<JobApplicationRow>, AppError>;

    /// Applies `from` → `to` only if the application still has status `from`.
    /// Returns `None` when the swap loses to a concurrent transition.
    async fn transition_application(
        &self,
        id: Uuid,
        from: ApplicationStatus,
        to: ApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<JobApplicationRow>, AppError>;

    async fn company(&self, id: Uuid) -> Result<Option<CompanyRow>, AppError>;

    async fn set_company_verification(
        &self,
        id: Uuid,
        status: VerificationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CompanyRow>, AppError>;

    async fn placement_snapshot(&self) -> Result<PlacementSnapshot, AppError>;
}
