use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::applications::eligibility::{self, Eligibility};
use crate::models::posting::JobPostingRow;
use crate::models::student::StudentProfileRow;

/// One feed element: the posting together with the student's eligibility
/// verdict. Ineligible postings stay in the feed so the surface can gray
/// them out rather than hide them — that is a product decision, not an
/// optimization.
#[derive(Debug, Clone, Serialize)]
pub struct FeedItem {
    pub posting: JobPostingRow,
    pub eligibility: Eligibility,
}

/// Builds a student's job feed from the given postings.
///
/// Closed and past-deadline postings are dropped outright; everything else
/// appears, eligible or not. Ordering is deadline ascending with ties broken
/// by posting id, so the feed is stable and deterministic. The returned
/// iterator evaluates eligibility lazily; call again to restart.
pub fn build_feed<'a>(
    profile: &'a StudentProfileRow,
    postings: Vec<JobPostingRow>,
    now: DateTime<Utc>,
) -> impl Iterator<Item = FeedItem> + 'a {
    let mut open: Vec<JobPostingRow> = postings.into_iter().filter(|p| p.is_open(now)).collect();
    open.sort_by(|a, b| a.deadline.cmp(&b.deadline).then(a.id.cmp(&b.id)));

    open.into_iter().map(move |posting| FeedItem {
        eligibility: eligibility::evaluate(profile, &posting, now),
        posting,
    })
}
