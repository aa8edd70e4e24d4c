use jiff::Zoned;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use metacog_core::models::assessment::Assessment;

/// Mean total score of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthlyAverage {
    pub year: i16,
    /// 1–12.
    pub month: i8,
    pub count: usize,
    /// 0 when the month has no assessments.
    pub average: f64,
}

/// One point of a patient's score chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScorePoint {
    pub date: jiff::Timestamp,
    pub score: u32,
    pub questionnaire_id: String,
}

/// Mean `total_score`, or 0 for no assessments.
pub fn average_score(assessments: &[Assessment]) -> f64 {
    average(assessments.iter())
}

pub(crate) fn average<'a>(assessments: impl Iterator<Item = &'a Assessment>) -> f64 {
    let (sum, count) = assessments.fold((0u64, 0usize), |(sum, count), a| {
        (sum + u64::from(a.total_score), count + 1)
    });
    if count == 0 {
        return 0.0;
    }
    sum as f64 / count as f64
}

/// Months counted from year 0, so consecutive months differ by one.
pub(crate) fn month_index(year: i16, month: i8) -> i32 {
    i32::from(year) * 12 + i32::from(month) - 1
}

/// Index of January of the earliest year a civil date can hold.
const FIRST_MONTH_INDEX: i32 = -9999 * 12;

/// `index` must not precede [`FIRST_MONTH_INDEX`].
fn from_month_index(index: i32) -> (i16, i8) {
    (index.div_euclid(12) as i16, (index.rem_euclid(12) + 1) as i8)
}

/// Calendar month of `date` in `now`'s time zone.
pub(crate) fn local_month_index(date: jiff::Timestamp, now: &Zoned) -> i32 {
    let local = date.to_zoned(now.time_zone().clone());
    month_index(local.year(), local.month())
}

/// Average total score for each of the trailing `month_count` calendar
/// months ending with `now`'s month, oldest first.
///
/// Months are taken in `now`'s time zone. Empty months average 0. The window
/// never reaches back before year -9999, so a larger `month_count` yields
/// fewer months.
pub fn monthly_averages(
    assessments: &[Assessment],
    month_count: usize,
    now: &Zoned,
) -> Vec<MonthlyAverage> {
    let current = month_index(now.year(), now.month());
    let keyed: Vec<(i32, &Assessment)> = assessments
        .iter()
        .map(|a| (local_month_index(a.date, now), a))
        .collect();

    let available = current - FIRST_MONTH_INDEX + 1;
    let month_count = i32::try_from(month_count).map_or(available, |n| n.min(available));

    (0..month_count)
        .rev()
        .map(|offset| {
            let index = current - offset;
            let (year, month) = from_month_index(index);
            let in_month: Vec<&Assessment> = keyed
                .iter()
                .filter(|(i, _)| *i == index)
                .map(|(_, a)| *a)
                .collect();
            MonthlyAverage {
                year,
                month,
                count: in_month.len(),
                average: average(in_month.into_iter()),
            }
        })
        .collect()
}

/// The last `limit` assessments as chart points, oldest first.
pub fn score_series(assessments: &[Assessment], limit: usize) -> Vec<ScorePoint> {
    let mut sorted: Vec<&Assessment> = assessments.iter().collect();
    sorted.sort_by_key(|a| a.date);
    let skip = sorted.len().saturating_sub(limit);
    sorted
        .into_iter()
        .skip(skip)
        .map(|a| ScorePoint {
            date: a.date,
            score: a.total_score,
            questionnaire_id: a.questionnaire_id.clone(),
        })
        .collect()
}
