#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "application_status", rename_all = "snake_case")]
pub enum ApplicationStatus {
    Submitted,
    Shortlisted,
    Rejected,
    Selected,
}

impl ApplicationStatus {
    /// Rejected and Selected admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, ApplicationStatus::Rejected | ApplicationStatus::Selected)
    }

    /// Status moves monotonically: Submitted → {Shortlisted, Rejected},
    /// Shortlisted → {Selected, Rejected}.
    pub fn can_transition_to(self, next: ApplicationStatus) -> bool {
        use ApplicationStatus::*;
        matches!(
            (self, next),
            (Submitted, Shortlisted)
                | (Submitted, Rejected)
                | (Shortlisted, Selected)
                | (Shortlisted, Rejected)
        )
    }
}

/// Join entity between a student profile and a job posting. At most one row
/// exists per (student, posting) pair; the store enforces this with a
/// uniqueness constraint, not a check in application code.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplicationRow {
    pub id: Uuid,
    pub student_id: Uuid,
    pub posting_id: Uuid,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
