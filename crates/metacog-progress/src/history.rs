use uuid::Uuid;

use metacog_core::models::assessment::Assessment;
use metacog_core::models::patient::Patient;

/// A patient paired with their most recent assessment.
#[derive(Debug, Clone, Copy)]
pub struct RecentActivity<'a> {
    pub patient: &'a Patient,
    pub assessment: &'a Assessment,
}

/// A patient's assessments, most recent first.
pub fn patient_history(patient_id: Uuid, assessments: &[Assessment]) -> Vec<&Assessment> {
    let mut history: Vec<&Assessment> = assessments
        .iter()
        .filter(|a| a.patient_id == patient_id)
        .collect();
    history.sort_by(|a, b| b.date.cmp(&a.date));
    history
}

pub fn last_assessment(patient_id: Uuid, assessments: &[Assessment]) -> Option<&Assessment> {
    assessments
        .iter()
        .filter(|a| a.patient_id == patient_id)
        .max_by_key(|a| a.date)
}

/// Patients that have at least one assessment, each with their latest one,
/// ordered by that assessment's date (newest first) and cut to `limit`.
pub fn recent_assessments_per_patient<'a>(
    patients: &'a [Patient],
    assessments: &'a [Assessment],
    limit: usize,
) -> Vec<RecentActivity<'a>> {
    let mut recent: Vec<RecentActivity<'a>> = patients
        .iter()
        .filter_map(|patient| {
            last_assessment(patient.id, assessments)
                .map(|assessment| RecentActivity { patient, assessment })
        })
        .collect();
    recent.sort_by(|a, b| b.assessment.date.cmp(&a.assessment.date));
    recent.truncate(limit);
    recent
}

/// Whole days between `date` and `now`, rounded up, in either direction.
/// Sub-second remainders count toward the next day.
pub fn days_since(date: jiff::Timestamp, now: jiff::Timestamp) -> i64 {
    const DAY: i128 = 86_400 * 1_000_000_000;
    let nanos = (now.as_nanosecond() - date.as_nanosecond()).abs();
    i64::try_from((nanos + DAY - 1) / DAY).unwrap_or(i64::MAX)
}
