use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;
use crate::stats::aggregate::{self, StatisticsReport, StatsScope};

#[derive(Deserialize)]
pub struct StatsQuery {
    #[serde(default = "default_scope")]
    pub scope: String,
    pub branch_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub drive_id: Option<Uuid>,
}

fn default_scope() -> String {
    "global".to_string()
}

fn parse_scope(params: &StatsQuery) -> Result<StatsScope, AppError> {
    match params.scope.as_str() {
        "global" => Ok(StatsScope::Global),
        "branch" => params
            .branch_id
            .map(StatsScope::Branch)
            .ok_or_else(|| AppError::Validation("branch scope requires branch_id".to_string())),
        "company" => params
            .company_id
            .map(StatsScope::Company)
            .ok_or_else(|| AppError::Validation("company scope requires company_id".to_string())),
        "drive" => params
            .drive_id
            .map(StatsScope::Drive)
            .ok_or_else(|| AppError::Validation("drive scope requires drive_id".to_string())),
        other => Err(AppError::Validation(format!(
            "unknown scope '{other}' (expected global, branch, company, or drive)"
        ))),
    }
}

/// GET /api/v1/stats
pub async fn handle_stats(
    State(state): State<AppState>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<StatisticsReport>, AppError> {
    let scope = parse_scope(&params)?;
    let report =
        aggregate::aggregate(state.store.as_ref(), scope, state.config.grade_scale).await?;
    Ok(Json(report))
}
