use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::clock::Clock;
use crate::errors::AppError;
use crate::models::account::Actor;
use crate::models::company::{CompanyRow, VerificationStatus};
use crate::state::AppState;
use crate::store::PlacementStore;

#[derive(Deserialize)]
pub struct VerificationRequest {
    pub actor: Actor,
    pub status: VerificationStatus,
}

/// PATCH /api/v1/companies/:id/verification
///
/// Admin-only: flips a company between Pending, Verified, and Rejected.
/// Only Verified companies may create postings.
pub async fn handle_set_verification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<VerificationRequest>,
) -> Result<Json<CompanyRow>, AppError> {
    if !req.actor.is_admin() {
        return Err(AppError::Forbidden);
    }

    let company = state
        .store
        .set_company_verification(id, req.status, state.clock.now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company {id} not found")))?;
    info!(
        "Company {} verification set to {:?}",
        company.id, company.verification
    );
    Ok(Json(company))
}
