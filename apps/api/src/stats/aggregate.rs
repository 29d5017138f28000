use std::collections::{HashMap, HashSet};

use serde::Serialize;
use uuid::Uuid;

use crate::config::GradeScale;
use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, JobApplicationRow};
use crate::models::company::CompanyRow;
use crate::models::posting::JobPostingRow;
use crate::models::student::StudentProfileRow;
use crate::store::{PlacementSnapshot, PlacementStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsScope {
    Global,
    Branch(Uuid),
    Company(Uuid),
    Drive(Uuid),
}

#[derive(Debug, Clone, Serialize)]
pub struct BranchBreakdown {
    pub branch_id: Uuid,
    pub code: String,
    pub total_students: usize,
    pub placed_students: usize,
    pub placement_percentage: f64,
    pub average_grade: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanyBreakdown {
    pub company_id: Uuid,
    pub name: String,
    pub total_applicants: usize,
    pub placed_students: usize,
    pub placement_percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GradeBand {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsReport {
    pub total_students: usize,
    pub total_companies: usize,
    pub total_postings: usize,
    pub total_applications: usize,
    pub pending_applications: usize,
    pub placed_students: usize,
    /// Fraction in [0, 1]; 0.0 when there are no students in scope.
    pub placement_percentage: f64,
    pub insufficient_data: bool,
    pub per_branch: Vec<BranchBreakdown>,
    pub per_company: Vec<CompanyBreakdown>,
    pub grade_distribution: Vec<GradeBand>,
}

/// Computes placement statistics for `scope` from the store's current state.
pub async fn aggregate(
    store: &dyn PlacementStore,
    scope: StatsScope,
    grade_scale: GradeScale,
) -> Result<StatisticsReport, AppError> {
    let snapshot = store.placement_snapshot().await?;
    compute_report(&snapshot, scope, grade_scale)
}

struct Scoped<'a> {
    students: Vec<&'a StudentProfileRow>,
    companies: Vec<&'a CompanyRow>,
    postings: Vec<&'a JobPostingRow>,
}

/// Pure aggregation over one point-in-time snapshot.
///
/// Placed means: a student in the scoped student set holding at least one
/// Selected application to a posting in the scoped posting set. A student
/// selected by several companies counts once here, but appears in each
/// company's own breakdown.
pub fn compute_report(
    snapshot: &PlacementSnapshot,
    scope: StatsScope,
    grade_scale: GradeScale,
) -> Result<StatisticsReport, AppError> {
    let scoped = resolve_scope(snapshot, scope)?;

    let student_ids: HashSet<Uuid> = scoped.students.iter().map(|s| s.id).collect();
    let posting_ids: HashSet<Uuid> = scoped.postings.iter().map(|p| p.id).collect();

    let scoped_applications: Vec<&JobApplicationRow> = snapshot
        .applications
        .iter()
        .filter(|a| student_ids.contains(&a.student_id) && posting_ids.contains(&a.posting_id))
        .collect();

    let placed: HashSet<Uuid> = scoped_applications
        .iter()
        .filter(|a| a.status == ApplicationStatus::Selected)
        .map(|a| a.student_id)
        .collect();

    let total_students = scoped.students.len();
    let pending_applications = scoped_applications
        .iter()
        .filter(|a| a.status == ApplicationStatus::Submitted)
        .count();

    Ok(StatisticsReport {
        total_students,
        total_companies: scoped.companies.len(),
        total_postings: scoped.postings.len(),
        total_applications: scoped_applications.len(),
        pending_applications,
        placed_students: placed.len(),
        placement_percentage: ratio(placed.len(), total_students),
        insufficient_data: total_students == 0,
        per_branch: branch_breakdown(snapshot, &scoped, &placed),
        per_company: company_breakdown(&scoped, &scoped_applications),
        grade_distribution: grade_distribution(&scoped.students, grade_scale),
    })
}

fn resolve_scope<'a>(
    snapshot: &'a PlacementSnapshot,
    scope: StatsScope,
) -> Result<Scoped<'a>, AppError> {
    match scope {
        StatsScope::Global => Ok(Scoped {
            students: snapshot.students.iter().collect(),
            companies: snapshot.companies.iter().collect(),
            postings: snapshot.postings.iter().collect(),
        }),

        StatsScope::Branch(branch_id) => {
            snapshot
                .branches
                .iter()
                .find(|b| b.id == branch_id)
                .ok_or_else(|| AppError::NotFound(format!("Branch {branch_id} not found")))?;
            let postings: Vec<&JobPostingRow> = snapshot
                .postings
                .iter()
                .filter(|p| p.eligible_branch_ids.contains(&branch_id))
                .collect();
            let company_ids: HashSet<Uuid> = postings.iter().map(|p| p.company_id).collect();
            Ok(Scoped {
                students: snapshot
                    .students
                    .iter()
                    .filter(|s| s.branch_id == branch_id)
                    .collect(),
                companies: snapshot
                    .companies
                    .iter()
                    .filter(|c| company_ids.contains(&c.id))
                    .collect(),
                postings,
            })
        }

        StatsScope::Company(company_id) => {
            let company = snapshot
                .companies
                .iter()
                .find(|c| c.id == company_id)
                .ok_or_else(|| AppError::NotFound(format!("Company {company_id} not found")))?;
            let postings: Vec<&JobPostingRow> = snapshot
                .postings
                .iter()
                .filter(|p| p.company_id == company_id)
                .collect();
            Ok(Scoped {
                students: applicants(snapshot, &postings),
                companies: vec![company],
                postings,
            })
        }

        StatsScope::Drive(drive_id) => {
            let drive = snapshot
                .drives
                .iter()
                .find(|d| d.id == drive_id)
                .ok_or_else(|| AppError::NotFound(format!("Drive {drive_id} not found")))?;
            let companies: Vec<&CompanyRow> = snapshot
                .companies
                .iter()
                .filter(|c| drive.company_ids.contains(&c.id))
                .collect();
            // A posting belongs to the drive when its company participates
            // and its deadline falls inside the drive window.
            let postings: Vec<&JobPostingRow> = snapshot
                .postings
                .iter()
                .filter(|p| {
                    drive.company_ids.contains(&p.company_id) && drive.window_contains(p.deadline)
                })
                .collect();
            Ok(Scoped {
                students: applicants(snapshot, &postings),
                companies,
                postings,
            })
        }
    }
}

/// Distinct student profiles with at least one application to the postings.
fn applicants<'a>(
    snapshot: &'a PlacementSnapshot,
    postings: &[&JobPostingRow],
) -> Vec<&'a StudentProfileRow> {
    let posting_ids: HashSet<Uuid> = postings.iter().map(|p| p.id).collect();
    let applicant_ids: HashSet<Uuid> = snapshot
        .applications
        .iter()
        .filter(|a| posting_ids.contains(&a.posting_id))
        .map(|a| a.student_id)
        .collect();
    snapshot
        .students
        .iter()
        .filter(|s| applicant_ids.contains(&s.id))
        .collect()
}

fn branch_breakdown(
    snapshot: &PlacementSnapshot,
    scoped: &Scoped<'_>,
    placed: &HashSet<Uuid>,
) -> Vec<BranchBreakdown> {
    let mut by_branch: HashMap<Uuid, Vec<&StudentProfileRow>> = HashMap::new();
    for student in scoped.students.iter().copied() {
        by_branch.entry(student.branch_id).or_default().push(student);
    }

    let mut breakdown: Vec<BranchBreakdown> = snapshot
        .branches
        .iter()
        .filter_map(|branch| {
            let students = by_branch.get(&branch.id)?;
            let placed_here = students.iter().filter(|s| placed.contains(&s.id)).count();
            let grade_sum: f64 = students.iter().map(|s| s.grade_average).sum();
            Some(BranchBreakdown {
                branch_id: branch.id,
                code: branch.code.clone(),
                total_students: students.len(),
                placed_students: placed_here,
                placement_percentage: ratio(placed_here, students.len()),
                average_grade: grade_sum / students.len() as f64,
            })
        })
        .collect();
    breakdown.sort_by(|a, b| a.code.cmp(&b.code));
    breakdown
}

fn company_breakdown(
    scoped: &Scoped<'_>,
    scoped_applications: &[&JobApplicationRow],
) -> Vec<CompanyBreakdown> {
    let posting_company: HashMap<Uuid, Uuid> = scoped
        .postings
        .iter()
        .map(|p| (p.id, p.company_id))
        .collect();

    let mut breakdown: Vec<CompanyBreakdown> = scoped
        .companies
        .iter()
        .map(|company| {
            let mut applicant_ids = HashSet::new();
            let mut placed_ids = HashSet::new();
            for application in scoped_applications {
                if posting_company.get(&application.posting_id) != Some(&company.id) {
                    continue;
                }
                applicant_ids.insert(application.student_id);
                if application.status == ApplicationStatus::Selected {
                    placed_ids.insert(application.student_id);
                }
            }
            CompanyBreakdown {
                company_id: company.id,
                name: company.name.clone(),
                total_applicants: applicant_ids.len(),
                placed_students: placed_ids.len(),
                placement_percentage: ratio(placed_ids.len(), applicant_ids.len()),
            }
        })
        .collect();
    breakdown.sort_by(|a, b| {
        b.placed_students
            .cmp(&a.placed_students)
            .then_with(|| a.name.cmp(&b.name))
    });
    breakdown
}

/// Buckets the scoped students' grades into the bands the original admin
/// dashboard showed, with edges derived from the configured scale.
fn grade_distribution(students: &[&StudentProfileRow], grade_scale: GradeScale) -> Vec<GradeBand> {
    let max = grade_scale.max();
    let floor = 0.6 * max;
    let lowers: Vec<f64> = [0.9, 0.8, 0.7, 0.6].iter().map(|f| f * max).collect();

    let mut bands = Vec::with_capacity(lowers.len() + 1);
    for (i, lower) in lowers.iter().enumerate() {
        let count = students
            .iter()
            .filter(|s| s.grade_average >= *lower && (i == 0 || s.grade_average < lowers[i - 1]))
            .count();
        let label = if i == 0 {
            format!("{lower:.1} - {max:.1}")
        } else {
            format!("{:.1} - {:.1}", lower, lowers[i - 1])
        };
        bands.push(GradeBand { label, count });
    }
    bands.push(GradeBand {
        label: format!("below {floor:.1}"),
        count: students.iter().filter(|s| s.grade_average < floor).count(),
    });
    bands
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{
        days, make_application, make_branch, make_company, make_drive, make_posting,
        make_profile, t0,
    };
    use crate::models::company::VerificationStatus;
    use ApplicationStatus::*;

    /// 10 students in one branch, one company posting; `selected` of them
    /// placed, the rest left in Submitted.
    fn simple_snapshot(selected: usize) -> PlacementSnapshot {
        let branch = make_branch("CSE");
        let company = make_company(VerificationStatus::Verified);
        let posting = make_posting(company.id, vec![branch.id], 0.0, 10, t0() + days(7));

        let mut snapshot = PlacementSnapshot {
            branches: vec![branch.clone()],
            companies: vec![company],
            postings: vec![posting.clone()],
            ..Default::default()
        };
        for i in 0..10 {
            let student = make_profile(branch.id, 7.0, 0);
            let status = if i < selected { Selected } else { Submitted };
            snapshot
                .applications
                .push(make_application(student.id, posting.id, status));
            snapshot.students.push(student);
        }
        snapshot
    }

    #[test]
    fn test_global_placement_percentage_is_exact() {
        let report =
            compute_report(&simple_snapshot(4), StatsScope::Global, GradeScale::TenPoint).unwrap();

        assert_eq!(report.total_students, 10);
        assert_eq!(report.placed_students, 4);
        assert_eq!(report.placement_percentage, 0.4);
        assert!(!report.insufficient_data);
        assert_eq!(report.total_applications, 10);
        assert_eq!(report.pending_applications, 6);
    }

    #[test]
    fn test_empty_scope_reports_insufficient_data() {
        let snapshot = PlacementSnapshot::default();
        let report = compute_report(&snapshot, StatsScope::Global, GradeScale::TenPoint).unwrap();

        assert_eq!(report.total_students, 0);
        assert_eq!(report.placement_percentage, 0.0);
        assert!(report.insufficient_data);
    }

    #[test]
    fn test_multi_company_placement_counts_student_once() {
        let branch = make_branch("CSE");
        let company_a = make_company(VerificationStatus::Verified);
        let mut company_b = make_company(VerificationStatus::Verified);
        company_b.name = "Beta Corp".to_string();
        let posting_a = make_posting(company_a.id, vec![branch.id], 0.0, 10, t0() + days(7));
        let posting_b = make_posting(company_b.id, vec![branch.id], 0.0, 10, t0() + days(7));
        let student = make_profile(branch.id, 8.0, 0);

        let snapshot = PlacementSnapshot {
            students: vec![student.clone()],
            branches: vec![branch],
            companies: vec![company_a, company_b],
            postings: vec![posting_a.clone(), posting_b.clone()],
            applications: vec![
                make_application(student.id, posting_a.id, Selected),
                make_application(student.id, posting_b.id, Selected),
            ],
            drives: vec![],
        };

        let report = compute_report(&snapshot, StatsScope::Global, GradeScale::TenPoint).unwrap();
        assert_eq!(report.placed_students, 1);
        assert_eq!(report.per_company.len(), 2);
        for company in &report.per_company {
            assert_eq!(company.placed_students, 1);
            assert_eq!(company.placement_percentage, 1.0);
        }
    }

    #[test]
    fn test_branch_scope_restricts_students_and_postings() {
        let cse = make_branch("CSE");
        let mech = make_branch("MECH");
        let company = make_company(VerificationStatus::Verified);
        let cse_posting = make_posting(company.id, vec![cse.id], 0.0, 10, t0() + days(7));
        let mech_posting = make_posting(company.id, vec![mech.id], 0.0, 10, t0() + days(7));

        let cse_student = make_profile(cse.id, 8.0, 0);
        let mech_student = make_profile(mech.id, 7.0, 0);

        let snapshot = PlacementSnapshot {
            students: vec![cse_student.clone(), mech_student.clone()],
            branches: vec![cse.clone(), mech],
            companies: vec![company],
            postings: vec![cse_posting.clone(), mech_posting.clone()],
            applications: vec![
                make_application(cse_student.id, cse_posting.id, Selected),
                make_application(mech_student.id, mech_posting.id, Selected),
            ],
            drives: vec![],
        };

        let report =
            compute_report(&snapshot, StatsScope::Branch(cse.id), GradeScale::TenPoint).unwrap();
        assert_eq!(report.total_students, 1);
        assert_eq!(report.placed_students, 1);
        assert_eq!(report.total_postings, 1);
        assert_eq!(report.per_branch.len(), 1);
        assert_eq!(report.per_branch[0].code, "CSE");
        assert_eq!(report.per_branch[0].average_grade, 8.0);
    }

    #[test]
    fn test_company_scope_counts_its_applicants_only() {
        let snapshot = simple_snapshot(4);
        let company_id = snapshot.companies[0].id;

        let report =
            compute_report(&snapshot, StatsScope::Company(company_id), GradeScale::TenPoint)
                .unwrap();
        assert_eq!(report.total_companies, 1);
        assert_eq!(report.total_students, 10); // all ten applied
        assert_eq!(report.placed_students, 4);
        assert_eq!(report.placement_percentage, 0.4);
    }

    #[test]
    fn test_drive_scope_honors_time_window() {
        let branch = make_branch("CSE");
        let company = make_company(VerificationStatus::Verified);
        let inside = make_posting(company.id, vec![branch.id], 0.0, 10, t0() + days(5));
        let outside = make_posting(company.id, vec![branch.id], 0.0, 10, t0() + days(60));
        let student = make_profile(branch.id, 8.0, 0);
        let drive = make_drive(vec![company.id], t0(), t0() + days(10));
        let drive_id = drive.id;

        let snapshot = PlacementSnapshot {
            students: vec![student.clone()],
            branches: vec![branch],
            companies: vec![company],
            postings: vec![inside.clone(), outside.clone()],
            applications: vec![
                make_application(student.id, inside.id, Selected),
                make_application(student.id, outside.id, Submitted),
            ],
            drives: vec![drive],
        };

        let report =
            compute_report(&snapshot, StatsScope::Drive(drive_id), GradeScale::TenPoint).unwrap();
        assert_eq!(report.total_postings, 1);
        assert_eq!(report.total_applications, 1);
        assert_eq!(report.placed_students, 1);
    }

    #[test]
    fn test_unknown_drive_is_not_found() {
        let snapshot = simple_snapshot(0);
        let err = compute_report(
            &snapshot,
            StatsScope::Drive(Uuid::new_v4()),
            GradeScale::TenPoint,
        )
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_grade_bands_cover_the_scale() {
        let branch = make_branch("CSE");
        let grades = [9.5, 8.5, 7.5, 6.5, 5.5];
        let students: Vec<_> = grades
            .iter()
            .map(|g| make_profile(branch.id, *g, 0))
            .collect();
        let refs: Vec<&StudentProfileRow> = students.iter().collect();

        let bands = grade_distribution(&refs, GradeScale::TenPoint);
        assert_eq!(bands.len(), 5);
        assert!(bands.iter().all(|b| b.count == 1));
        assert_eq!(bands[0].label, "9.0 - 10.0");
        assert_eq!(bands[4].label, "below 6.0");
    }

    #[test]
    fn test_report_recomputes_from_snapshot_state() {
        // Same store, one more Selected application: the next report moves
        // with it — nothing is cached between calls.
        let mut snapshot = simple_snapshot(4);
        let before =
            compute_report(&snapshot, StatsScope::Global, GradeScale::TenPoint).unwrap();
        assert_eq!(before.placed_students, 4);

        let fifth = snapshot
            .applications
            .iter_mut()
            .find(|a| a.status == Submitted)
            .unwrap();
        fifth.status = Selected;
        let after = compute_report(&snapshot, StatsScope::Global, GradeScale::TenPoint).unwrap();
        assert_eq!(after.placed_students, 5);
        assert_eq!(after.placement_percentage, 0.5);
    }
}
