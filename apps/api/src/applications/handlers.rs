use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::applications::admission;
use crate::errors::AppError;
use crate::models::account::Actor;
use crate::models::application::{ApplicationStatus, JobApplicationRow};
use crate::state::AppState;
use crate::store::PlacementStore;

#[derive(Deserialize)]
pub struct SubmitRequest {
    pub student_id: Uuid,
    pub posting_id: Uuid,
}

/// POST /api/v1/applications
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(req): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<JobApplicationRow>), AppError> {
    let application = admission::submit(
        state.store.as_ref(),
        state.clock.as_ref(),
        req.student_id,
        req.posting_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(application)))
}

#[derive(Deserialize)]
pub struct TransitionRequest {
    pub new_status: ApplicationStatus,
    pub actor: Actor,
}

/// PATCH /api/v1/applications/:id/status
pub async fn handle_transition(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TransitionRequest>,
) -> Result<Json<JobApplicationRow>, AppError> {
    let application = admission::transition(
        state.store.as_ref(),
        state.clock.as_ref(),
        id,
        req.new_status,
        &req.actor,
    )
    .await?;
    Ok(Json(application))
}

#[derive(Deserialize)]
pub struct StudentIdQuery {
    pub student_id: Uuid,
}

/// GET /api/v1/applications?student_id=
pub async fn handle_list_for_student(
    State(state): State<AppState>,
    Query(params): Query<StudentIdQuery>,
) -> Result<Json<Vec<JobApplicationRow>>, AppError> {
    state
        .store
        .student_profile(params.student_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("Student profile {} not found", params.student_id))
        })?;
    let applications = state
        .store
        .applications_for_student(params.student_id)
        .await?;
    Ok(Json(applications))
}
