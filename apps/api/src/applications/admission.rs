use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::applications::eligibility::{self, Eligibility, FailureReason};
use crate::clock::Clock;
use crate::errors::AppError;
use crate::models::account::Actor;
use crate::models::application::{ApplicationStatus, JobApplicationRow};
use crate::store::PlacementStore;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("posting is not accepting applications")]
    PostingClosed,

    #[error("student does not meet the posting's requirements")]
    NotEligible(Vec<FailureReason>),

    #[error("an application already exists for this student and posting")]
    DuplicateApplication,

    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::PostingClosed => {
                AppError::UnprocessableEntity("posting is not accepting applications".to_string())
            }
            SubmitError::NotEligible(reasons) => AppError::UnprocessableEntity(
                serde_json::to_string(&reasons).unwrap_or_default(),
            ),
            SubmitError::DuplicateApplication => {
                AppError::Conflict("an application already exists for this posting".to_string())
            }
            SubmitError::Store(e) => e,
        }
    }
}

/// Gate for creating a JobApplication.
///
/// Eligibility is re-evaluated here no matter what the caller already saw:
/// grades, backlogs, and the posting itself may all have changed between
/// feed render and submit. Re-application is never permitted, even after a
/// rejection.
pub async fn submit(
    store: &dyn PlacementStore,
    clock: &dyn Clock,
    student_id: Uuid,
    posting_id: Uuid,
) -> Result<JobApplicationRow, SubmitError> {
    let profile = store
        .student_profile(student_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Student profile {student_id} not found")))?;
    let posting = store
        .posting(posting_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Posting {posting_id} not found")))?;

    match eligibility::evaluate(&profile, &posting, clock.now()) {
        Eligibility::Eligible => {}
        Eligibility::Ineligible { reasons } => {
            // A closed posting outranks the remaining reasons.
            if reasons.contains(&FailureReason::PostingClosed) {
                return Err(SubmitError::PostingClosed);
            }
            return Err(SubmitError::NotEligible(reasons));
        }
    }

    // The store's uniqueness constraint decides concurrent submits; an
    // existence check here would reintroduce the check-then-write race.
    match store
        .create_application_if_absent(profile.id, posting.id, clock.now())
        .await?
    {
        Some(application) => {
            info!(
                "Student {} applied to posting {} (application {})",
                profile.id, posting.id, application.id
            );
            Ok(application)
        }
        None => Err(SubmitError::DuplicateApplication),
    }
}

#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("cannot move application from {from:?} to {to:?}")]
    InvalidTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("actor may not manage this application")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] AppError),
}

impl From<TransitionError> for AppError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::InvalidTransition { from, to } => AppError::UnprocessableEntity(
                format!("cannot move application from {from:?} to {to:?}"),
            ),
            TransitionError::Unauthorized => AppError::Forbidden,
            TransitionError::Store(e) => e,
        }
    }
}

/// Advances an application's status.
///
/// Only Admin or the recruiter owning the posting's company may transition,
/// and only along the monotonic lifecycle. The store applies the change as a
/// compare-and-swap on the prior status, so of two concurrent transitions at
/// most one lands; the loser surfaces as `InvalidTransition`.
pub async fn transition(
    store: &dyn PlacementStore,
    clock: &dyn Clock,
    application_id: Uuid,
    new_status: ApplicationStatus,
    actor: &Actor,
) -> Result<JobApplicationRow, TransitionError> {
    let application = store
        .application(application_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Application {application_id} not found")))?;
    let posting = store
        .posting(application.posting_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Posting {} not found", application.posting_id))
        })?;

    if !actor.may_manage_posting(&posting) {
        return Err(TransitionError::Unauthorized);
    }

    let from = application.status;
    if !from.can_transition_to(new_status) {
        return Err(TransitionError::InvalidTransition {
            from,
            to: new_status,
        });
    }

    let updated = store
        .transition_application(application.id, from, new_status, clock.now())
        .await?;
    match updated {
        Some(application) => {
            info!(
                "Application {} moved {:?} -> {:?}",
                application.id, from, new_status
            );
            Ok(application)
        }
        // Lost the CAS: someone else transitioned first, so the status we
        // validated against no longer holds.
        None => Err(TransitionError::InvalidTransition {
            from,
            to: new_status,
        }),
    }
}
