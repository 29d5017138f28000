#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::posting::JobPostingRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "account_role", rename_all = "snake_case")]
pub enum Role {
    Student,
    Recruiter,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Capability describing who is performing a guarded write.
///
/// The surrounding auth layer resolves the session into one of these before
/// calling in; the core only checks it against ownership. Recruiters carry
/// the company they act for.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Actor {
    Student { profile_id: Uuid },
    Recruiter { company_id: Uuid },
    Admin,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin)
    }

    /// Admin, or the recruiter owning the posting's company.
    pub fn may_manage_posting(&self, posting: &JobPostingRow) -> bool {
        match self {
            Actor::Admin => true,
            Actor::Recruiter { company_id } => *company_id == posting.company_id,
            Actor::Student { .. } => false,
        }
    }
}
