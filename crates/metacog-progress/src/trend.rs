use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use metacog_core::models::assessment::Assessment;

/// Half-width of the band of percent changes treated as noise.
pub const STABLE_BAND: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Trend {
    /// Score fell by more than the stable band.
    Improvement,
    /// Score rose by more than the stable band.
    Decline,
    Stable,
}

impl Trend {
    pub fn label(&self) -> &'static str {
        match self {
            Trend::Improvement => "improvement",
            Trend::Decline => "decline",
            Trend::Stable => "stable",
        }
    }
}

/// Change from the first to the last administration in a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Progress {
    pub absolute_change: i64,
    pub percent_change: f64,
    /// `absolute_change < 0`.
    pub improving: bool,
    pub trend: Trend,
}

/// Side-by-side difference between two administrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Comparison {
    pub earlier_id: Uuid,
    pub later_id: Uuid,
    pub total_score_diff: i64,
    pub percent_change: f64,
    pub subscale_diffs: BTreeMap<String, i64>,
    pub trend: Trend,
}

/// `(new - old) / old * 100`.
///
/// A zero baseline has no meaningful relative change; it is reported as 0
/// rather than infinity or NaN.
pub fn percent_change(old: f64, new: f64) -> f64 {
    if old == 0.0 {
        return 0.0;
    }
    (new - old) * 100.0 / old
}

/// Strictly outside ±[`STABLE_BAND`] counts as movement.
pub fn classify_trend(percent_change: f64) -> Trend {
    if percent_change < -STABLE_BAND {
        Trend::Improvement
    } else if percent_change > STABLE_BAND {
        Trend::Decline
    } else {
        Trend::Stable
    }
}

/// Change between two specific administrations.
pub fn progress_between(first: &Assessment, last: &Assessment) -> Progress {
    let absolute_change = i64::from(last.total_score) - i64::from(first.total_score);
    let percent_change = percent_change(f64::from(first.total_score), f64::from(last.total_score));
    Progress {
        absolute_change,
        percent_change,
        improving: absolute_change < 0,
        trend: classify_trend(percent_change),
    }
}

/// Change between the chronologically first and last assessment.
///
/// `None` when there are fewer than two assessments. The input does not need
/// to be sorted.
pub fn progress<'a>(assessments: impl IntoIterator<Item = &'a Assessment>) -> Option<Progress> {
    let mut iter = assessments.into_iter();
    let head = iter.next()?;
    let (mut first, mut last, mut count) = (head, head, 1usize);
    for a in iter {
        if a.date < first.date {
            first = a;
        }
        if a.date >= last.date {
            last = a;
        }
        count += 1;
    }
    if count < 2 {
        return None;
    }
    Some(progress_between(first, last))
}

/// Per-subscale differences cover subscales present in either assessment;
/// a subscale missing on one side counts as 0 there.
pub fn compare(earlier: &Assessment, later: &Assessment) -> Comparison {
    let progress = progress_between(earlier, later);

    let mut subscale_diffs = BTreeMap::new();
    for name in earlier.subscale_scores.keys().chain(later.subscale_scores.keys()) {
        let before = earlier.subscale_scores.get(name).copied().unwrap_or(0);
        let after = later.subscale_scores.get(name).copied().unwrap_or(0);
        subscale_diffs.insert(name.clone(), i64::from(after) - i64::from(before));
    }

    Comparison {
        earlier_id: earlier.id,
        later_id: later.id,
        total_score_diff: progress.absolute_change,
        percent_change: progress.percent_change,
        subscale_diffs,
        trend: progress.trend,
    }
}
