#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "posting_status", rename_all = "snake_case")]
pub enum PostingStatus {
    Open,
    Closed,
}

/// Job opportunity posted by a verified company. `eligible_branch_ids` is
/// guaranteed non-empty at creation time. Open → Closed is irreversible.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: String,
    pub minimum_grade: f64,
    pub maximum_backlogs: i32,
    pub eligible_branch_ids: Vec<Uuid>,
    pub deadline: DateTime<Utc>,
    pub status: PostingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JobPostingRow {
    /// A posting past its deadline no longer accepts applications even if
    /// nobody flipped its status yet.
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.status == PostingStatus::Open && now <= self.deadline
    }
}
