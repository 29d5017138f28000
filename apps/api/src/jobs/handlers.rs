use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::applications::eligibility::{self, Eligibility};
use crate::clock::Clock;
use crate::errors::AppError;
use crate::jobs::feed::{self, FeedItem};
use crate::jobs::postings::{self, NewPosting};
use crate::models::account::Actor;
use crate::models::application::JobApplicationRow;
use crate::models::posting::JobPostingRow;
use crate::state::AppState;
use crate::store::PlacementStore;

#[derive(Deserialize)]
pub struct StudentIdQuery {
    pub student_id: Uuid,
}

/// GET /api/v1/feed?student_id=
///
/// The feed is informative, not authoritative: submission re-checks
/// eligibility against live data.
pub async fn handle_feed(
    State(state): State<AppState>,
    Query(params): Query<StudentIdQuery>,
) -> Result<Json<Vec<FeedItem>>, AppError> {
    let profile = state
        .store
        .student_profile(params.student_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Student profile {} not found", params.student_id))
        })?;
    let postings = state.store.open_postings().await?;
    let items = feed::build_feed(&profile, postings, state.clock.now()).collect();
    Ok(Json(items))
}

/// GET /api/v1/postings/:id/eligibility?student_id=
pub async fn handle_eligibility(
    State(state): State<AppState>,
    Path(posting_id): Path<Uuid>,
    Query(params): Query<StudentIdQuery>,
) -> Result<Json<Eligibility>, AppError> {
    let profile = state
        .store
        .student_profile(params.student_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Student profile {} not found", params.student_id))
        })?;
    let posting = state
        .store
        .posting(posting_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Posting {posting_id} not found")))?;
    Ok(Json(eligibility::evaluate(
        &profile,
        &posting,
        state.clock.now(),
    )))
}

#[derive(Deserialize)]
pub struct CreatePostingRequest {
    pub actor: Actor,
    #[serde(flatten)]
    pub posting: NewPosting,
}

/// POST /api/v1/postings
pub async fn handle_create_posting(
    State(state): State<AppState>,
    Json(req): Json<CreatePostingRequest>,
) -> Result<(StatusCode, Json<JobPostingRow>), AppError> {
    let posting = postings::create_posting(
        state.store.as_ref(),
        state.clock.as_ref(),
        state.config.grade_scale,
        &req.actor,
        req.posting,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(posting)))
}

#[derive(Deserialize)]
pub struct ClosePostingRequest {
    pub actor: Actor,
}

/// POST /api/v1/postings/:id/close
pub async fn handle_close_posting(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ClosePostingRequest>,
) -> Result<Json<JobPostingRow>, AppError> {
    let posting =
        postings::close_posting(state.store.as_ref(), state.clock.as_ref(), &req.actor, id)
            .await?;
    Ok(Json(posting))
}

/// GET /api/v1/postings/:id/applications
pub async fn handle_posting_applications(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<JobApplicationRow>>, AppError> {
    state
        .store
        .posting(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Posting {id} not found")))?;
    let applications = state.store.applications_for_posting(id).await?;
    Ok(Json(applications))
}
