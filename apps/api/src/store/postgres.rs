use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, JobApplicationRow};
use crate::models::company::{CompanyRow, VerificationStatus};
use crate::models::posting::{JobPostingRow, PostingStatus};
use crate::models::student::StudentProfileRow;
use crate::store::{PlacementSnapshot, PlacementStore};

/// PostgreSQL-backed entity store. The `job_applications` table carries a
/// UNIQUE (student_id, posting_id) constraint; `create_application_if_absent`
/// leans on it via `ON CONFLICT DO NOTHING` instead of checking first.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlacementStore for PgStore {
    async fn student_profile(&self, id: Uuid) -> Result<Option<StudentProfileRow>, AppError> {
        Ok(
            sqlx::query_as::<_, StudentProfileRow>(
                "SELECT * FROM student_profiles WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?,
        )
    }

    async fn posting(&self, id: Uuid) -> Result<Option<JobPostingRow>, AppError> {
        Ok(
            sqlx::query_as::<_, JobPostingRow>("SELECT * FROM job_postings WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn open_postings(&self) -> Result<Vec<JobPostingRow>, AppError> {
        Ok(sqlx::query_as::<_, JobPostingRow>(
            "SELECT * FROM job_postings WHERE status = $1 ORDER BY deadline ASC, id ASC",
        )
        .bind(PostingStatus::Open)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_posting(&self, posting: JobPostingRow) -> Result<JobPostingRow, AppError> {
        Ok(sqlx::query_as::<_, JobPostingRow>(
            r#"
            INSERT INTO job_postings
                (id, company_id, title, description, minimum_grade, maximum_backlogs,
                 eligible_branch_ids, deadline, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(posting.id)
        .bind(posting.company_id)
        .bind(&posting.title)
        .bind(&posting.description)
        .bind(posting.minimum_grade)
        .bind(posting.maximum_backlogs)
        .bind(&posting.eligible_branch_ids)
        .bind(posting.deadline)
        .bind(posting.status)
        .bind(posting.created_at)
        .bind(posting.updated_at)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn close_posting(
        &self,
        id: Uuid,
        closed_at: DateTime<Utc>,
    ) -> Result<Option<JobPostingRow>, AppError> {
        Ok(sqlx::query_as::<_, JobPostingRow>(
            r#"
            UPDATE job_postings
            SET status = $1, updated_at = $2
            WHERE id = $3 AND status = $4
            RETURNING *
            "#,
        )
        .bind(PostingStatus::Closed)
        .bind(closed_at)
        .bind(id)
        .bind(PostingStatus::Open)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn application(&self, id: Uuid) -> Result<Option<JobApplicationRow>, AppError> {
        Ok(
            sqlx::query_as::<_, JobApplicationRow>(
                "SELECT * FROM job_applications WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?,
        )
    }

    async fn applications_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<JobApplicationRow>, AppError> {
        Ok(sqlx::query_as::<_, JobApplicationRow>(
            "SELECT * FROM job_applications WHERE student_id = $1 ORDER BY applied_at DESC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn applications_for_posting(
        &self,
        posting_id: Uuid,
    ) -> Result<Vec<JobApplicationRow>, AppError> {
        Ok(sqlx::query_as::<_, JobApplicationRow>(
            "SELECT * FROM job_applications WHERE posting_id = $1 ORDER BY applied_at DESC",
        )
        .bind(posting_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn create_application_if_absent(
        &self,
        student_id: Uuid,
        posting_id: Uuid,
        applied_at: DateTime<Utc>,
    ) -> Result<Option<JobApplicationRow>, AppError> {
        // The unique constraint decides the race; a fetch-then-insert here
        // would admit duplicates under concurrent submits.
        Ok(sqlx::query_as::<_, JobApplicationRow>(
            r#"
            INSERT INTO job_applications
                (id, student_id, posting_id, status, applied_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            ON CONFLICT (student_id, posting_id) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(student_id)
        .bind(posting_id)
        .bind(ApplicationStatus::Submitted)
        .bind(applied_at)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn transition_application(
        &self,
        id: Uuid,
        from: ApplicationStatus,
        to: ApplicationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<JobApplicationRow>, AppError> {
        Ok(sqlx::query_as::<_, JobApplicationRow>(
            r#"
            UPDATE job_applications
            SET status = $1, updated_at = $2
            WHERE id = $3 AND status = $4
            RETURNING *
            "#,
        )
        .bind(to)
        .bind(updated_at)
        .bind(id)
        .bind(from)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn company(&self, id: Uuid) -> Result<Option<CompanyRow>, AppError> {
        Ok(
            sqlx::query_as::<_, CompanyRow>("SELECT * FROM companies WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn set_company_verification(
        &self,
        id: Uuid,
        status: VerificationStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<CompanyRow>, AppError> {
        Ok(sqlx::query_as::<_, CompanyRow>(
            r#"
            UPDATE companies
            SET verification = $1, updated_at = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(updated_at)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn placement_snapshot(&self) -> Result<PlacementSnapshot, AppError> {
        let students = sqlx::query_as("SELECT * FROM student_profiles")
            .fetch_all(&self.pool)
            .await?;
        let branches = sqlx::query_as("SELECT * FROM branches ORDER BY code ASC")
            .fetch_all(&self.pool)
            .await?;
        let companies = sqlx::query_as("SELECT * FROM companies")
            .fetch_all(&self.pool)
            .await?;
        let postings = sqlx::query_as("SELECT * FROM job_postings")
            .fetch_all(&self.pool)
            .await?;
        let applications = sqlx::query_as("SELECT * FROM job_applications")
            .fetch_all(&self.pool)
            .await?;
        let drives = sqlx::query_as("SELECT * FROM placement_drives")
            .fetch_all(&self.pool)
            .await?;

        Ok(PlacementSnapshot {
            students,
            branches,
            companies,
            postings,
            applications,
            drives,
        })
    }
}
