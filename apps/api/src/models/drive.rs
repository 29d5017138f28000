#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Admin-managed event grouping companies over a time window. The postings
/// belonging to a drive are derived, never stored: a posting counts when its
/// company participates and its deadline falls inside the window.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlacementDriveRow {
    pub id: Uuid,
    pub name: String,
    pub starts_at: DateTime<Utc>,
    pub ends_at: DateTime<Utc>,
    pub company_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl PlacementDriveRow {
    pub fn window_contains(&self, t: DateTime<Utc>) -> bool {
        self.starts_at <= t && t <= self.ends_at
    }
}
