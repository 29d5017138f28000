//! Row constructors shared by the unit tests.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use crate::models::application::{ApplicationStatus, JobApplicationRow};
use crate::models::branch::BranchRow;
use crate::models::company::{CompanyRow, VerificationStatus};
use crate::models::drive::PlacementDriveRow;
use crate::models::posting::{JobPostingRow, PostingStatus};
use crate::models::student::StudentProfileRow;

/// Fixed "now" every test pins its clock to.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub fn days(n: i64) -> Duration {
    Duration::days(n)
}

pub fn make_branch(code: &str) -> BranchRow {
    BranchRow {
        id: Uuid::new_v4(),
        code: code.to_string(),
        name: format!("{code} Engineering"),
        created_at: t0(),
    }
}

pub fn make_profile(branch_id: Uuid, grade_average: f64, active_backlogs: i32) -> StudentProfileRow {
    StudentProfileRow {
        id: Uuid::new_v4(),
        account_id: Uuid::new_v4(),
        enrollment_number: format!("EN-{}", Uuid::new_v4().simple()),
        branch_id,
        grade_average,
        active_backlogs,
        skills: vec!["rust".to_string()],
        resume_key: None,
        created_at: t0(),
        updated_at: t0(),
    }
}

pub fn make_company(verification: VerificationStatus) -> CompanyRow {
    CompanyRow {
        id: Uuid::new_v4(),
        recruiter_account_id: Uuid::new_v4(),
        name: "Acme Systems".to_string(),
        description: "Builds things".to_string(),
        verification,
        created_at: t0(),
        updated_at: t0(),
    }
}

pub fn make_posting(
    company_id: Uuid,
    eligible_branch_ids: Vec<Uuid>,
    minimum_grade: f64,
    maximum_backlogs: i32,
    deadline: DateTime<Utc>,
) -> JobPostingRow {
    JobPostingRow {
        id: Uuid::new_v4(),
        company_id,
        title: "Graduate Engineer".to_string(),
        description: "Entry-level role".to_string(),
        minimum_grade,
        maximum_backlogs,
        eligible_branch_ids,
        deadline,
        status: PostingStatus::Open,
        created_at: t0(),
        updated_at: t0(),
    }
}

pub fn make_application(
    student_id: Uuid,
    posting_id: Uuid,
    status: ApplicationStatus,
) -> JobApplicationRow {
    JobApplicationRow {
        id: Uuid::new_v4(),
        student_id,
        posting_id,
        status,
        applied_at: t0(),
        updated_at: t0(),
    }
}

pub fn make_drive(
    company_ids: Vec<Uuid>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
) -> PlacementDriveRow {
    PlacementDriveRow {
        id: Uuid::new_v4(),
        name: "Summer Drive".to_string(),
        starts_at,
        ends_at,
        company_ids,
        created_at: t0(),
    }
}
