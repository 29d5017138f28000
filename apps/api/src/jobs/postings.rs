use chrono::{DateTime, Utc};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::clock::Clock;
use crate::config::GradeScale;
use crate::errors::AppError;
use crate::models::account::Actor;
use crate::models::posting::{JobPostingRow, PostingStatus};
use crate::store::PlacementStore;

#[derive(Debug, Error)]
pub enum PostingError {
    #[error("company must be verified before posting jobs")]
    CompanyNotVerified,

    #[error("{0}")]
    Invalid(String),

    #[error("actor may not manage this posting")]
    Unauthorized,

    #[error("posting is already closed")]
    AlreadyClosed,

    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<PostingError> for AppError {
    fn from(err: PostingError) -> Self {
        match err {
            PostingError::CompanyNotVerified | PostingError::Unauthorized => AppError::Forbidden,
            PostingError::Invalid(msg) => AppError::Validation(msg),
            PostingError::AlreadyClosed => {
                AppError::Conflict("posting is already closed".to_string())
            }
            PostingError::Store(e) => e,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewPosting {
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub minimum_grade: f64,
    pub maximum_backlogs: i32,
    pub eligible_branch_ids: Vec<Uuid>,
    pub deadline: DateTime<Utc>,
}

/// Creates an Open posting for a verified company. Only the recruiter
/// owning the company (or Admin) may create one.
pub async fn create_posting(
    store: &dyn PlacementStore,
    clock: &dyn Clock,
    grade_scale: GradeScale,
    actor: &Actor,
    draft: NewPosting,
) -> Result<JobPostingRow, PostingError> {
    let allowed = match actor {
        Actor::Admin => true,
        Actor::Recruiter { company_id } => *company_id == draft.company_id,
        Actor::Student { .. } => false,
    };
    if !allowed {
        return Err(PostingError::Unauthorized);
    }

    let company = store
        .company(draft.company_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {} not found", draft.company_id)))?;
    if !company.is_verified() {
        return Err(PostingError::CompanyNotVerified);
    }

    let now = clock.now();
    validate(&draft, grade_scale, now)?;

    let posting = JobPostingRow {
        id: Uuid::new_v4(),
        company_id: draft.company_id,
        title: draft.title,
        description: draft.description,
        minimum_grade: draft.minimum_grade,
        maximum_backlogs: draft.maximum_backlogs,
        eligible_branch_ids: draft.eligible_branch_ids,
        deadline: draft.deadline,
        status: PostingStatus::Open,
        created_at: now,
        updated_at: now,
    };
    let posting = store.create_posting(posting).await?;
    info!("Company {} opened posting {}", company.id, posting.id);
    Ok(posting)
}

fn validate(draft: &NewPosting, grade_scale: GradeScale, now: DateTime<Utc>) -> Result<(), PostingError> {
    if draft.title.trim().is_empty() {
        return Err(PostingError::Invalid("title must not be empty".to_string()));
    }
    if draft.eligible_branch_ids.is_empty() {
        return Err(PostingError::Invalid(
            "at least one eligible branch is required".to_string(),
        ));
    }
    if !(0.0..=grade_scale.max()).contains(&draft.minimum_grade) {
        return Err(PostingError::Invalid(format!(
            "minimum grade must be between 0 and {}",
            grade_scale.max()
        )));
    }
    if draft.maximum_backlogs < 0 {
        return Err(PostingError::Invalid(
            "maximum backlogs must not be negative".to_string(),
        ));
    }
    if draft.deadline <= now {
        return Err(PostingError::Invalid(
            "deadline must be in the future".to_string(),
        ));
    }
    Ok(())
}

/// Manually closes a posting ahead of its deadline. Open → Closed only, and
/// irreversible; the automatic deadline cut needs no write at all.
pub async fn close_posting(
    store: &dyn PlacementStore,
    clock: &dyn Clock,
    actor: &Actor,
    posting_id: Uuid,
) -> Result<JobPostingRow, PostingError> {
    let posting = store
        .posting(posting_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Posting {posting_id} not found")))?;

    if !actor.may_manage_posting(&posting) {
        return Err(PostingError::Unauthorized);
    }
    if posting.status == PostingStatus::Closed {
        return Err(PostingError::AlreadyClosed);
    }

    // Guarded at the store as well: a concurrent close wins, we report it.
    let closed = store
        .close_posting(posting.id, clock.now())
        .await?
        .ok_or(PostingError::AlreadyClosed)?;
    info!("Posting {} closed", closed.id);
    Ok(closed)
}
