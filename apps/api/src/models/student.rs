#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Student academic profile. The grade average is on the scale fixed by
/// `GRADE_SCALE` at deployment time; whether a student counts as placed is
/// derived from their applications, never cached here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentProfileRow {
    pub id: Uuid,
    pub account_id: Uuid,
    pub enrollment_number: String,
    pub branch_id: Uuid,
    pub grade_average: f64,
    pub active_backlogs: i32,
    pub skills: Vec<String>,
    pub resume_key: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
