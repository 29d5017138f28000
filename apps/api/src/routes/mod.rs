pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::applications::handlers as application_handlers;
use crate::companies::handlers as company_handlers;
use crate::jobs::handlers as job_handlers;
use crate::state::AppState;
use crate::stats::handlers as stats_handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job feed & postings
        .route("/api/v1/feed", get(job_handlers::handle_feed))
        .route("/api/v1/postings", post(job_handlers::handle_create_posting))
        .route(
            "/api/v1/postings/:id/close",
            post(job_handlers::handle_close_posting),
        )
        .route(
            "/api/v1/postings/:id/eligibility",
            get(job_handlers::handle_eligibility),
        )
        .route(
            "/api/v1/postings/:id/applications",
            get(job_handlers::handle_posting_applications),
        )
        // Applications
        .route(
            "/api/v1/applications",
            post(application_handlers::handle_submit)
                .get(application_handlers::handle_list_for_student),
        )
        .route(
            "/api/v1/applications/:id/status",
            patch(application_handlers::handle_transition),
        )
        // Companies
        .route(
            "/api/v1/companies/:id/verification",
            patch(company_handlers::handle_set_verification),
        )
        // Dashboards
        .route("/api/v1/stats", get(stats_handlers::handle_stats))
        .with_state(state)
}
