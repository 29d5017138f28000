use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::posting::JobPostingRow;
use crate::models::student::StudentProfileRow;

/// Why a student fails to qualify for a posting. Variants are listed in the
/// order the rules are checked — posting open, branch, grade, backlogs — and
/// reasons are always reported in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    PostingClosed,
    BranchNotEligible,
    GradeBelowMinimum,
    TooManyBacklogs,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            FailureReason::PostingClosed => "posting is not accepting applications",
            FailureReason::BranchNotEligible => "branch is not eligible for this posting",
            FailureReason::GradeBelowMinimum => "grade average is below the required minimum",
            FailureReason::TooManyBacklogs => "too many active backlogs",
        };
        f.write_str(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Eligibility {
    Eligible,
    Ineligible { reasons: Vec<FailureReason> },
}

impl Eligibility {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Eligibility::Eligible)
    }
}

/// Decides whether `profile` qualifies for `posting` at `now`.
///
/// Pure: no store access, no side effects — the same inputs always produce
/// the same verdict. Every failing rule is collected, not just the first, so
/// callers can show students the full picture. Both the job feed and the
/// admission controller go through here; eligibility cannot be bypassed by
/// submitting against a stale feed.
pub fn evaluate(
    profile: &StudentProfileRow,
    posting: &JobPostingRow,
    now: DateTime<Utc>,
) -> Eligibility {
    let mut reasons = Vec::new();

    if !posting.is_open(now) {
        reasons.push(FailureReason::PostingClosed);
    }
    if !posting.eligible_branch_ids.contains(&profile.branch_id) {
        reasons.push(FailureReason::BranchNotEligible);
    }
    if profile.grade_average < posting.minimum_grade {
        reasons.push(FailureReason::GradeBelowMinimum);
    }
    if profile.active_backlogs > posting.maximum_backlogs {
        reasons.push(FailureReason::TooManyBacklogs);
    }

    if reasons.is_empty() {
        Eligibility::Eligible
    } else {
        Eligibility::Ineligible { reasons }
    }
}
