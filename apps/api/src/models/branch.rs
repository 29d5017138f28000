#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Academic department. Reference data created once by an admin and never
/// mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct BranchRow {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
