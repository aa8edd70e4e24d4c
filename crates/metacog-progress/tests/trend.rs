use std::collections::BTreeMap;

use jiff::Timestamp;
use proptest::prelude::*;
use uuid::Uuid;

use metacog_core::models::assessment::Assessment;
use metacog_progress::trend::{
    classify_trend, compare, percent_change, progress, progress_between, Trend,
};

fn assessment(date: &str, total: u32) -> Assessment {
    let date: Timestamp = date.parse().unwrap();
    Assessment {
        id: Uuid::new_v4(),
        patient_id: Uuid::nil(),
        questionnaire_id: "mcq30".to_string(),
        date,
        total_score: total,
        subscale_scores: BTreeMap::new(),
        responses: Vec::new(),
        notes: None,
        completed: true,
        created_at: date,
        updated_at: date,
    }
}

#[test]
fn percent_change_from_zero_baseline_is_zero() {
    assert_eq!(percent_change(0.0, 0.0), 0.0);
    assert_eq!(percent_change(0.0, 42.0), 0.0);
}

#[test]
fn percent_change_is_relative_to_old_value() {
    assert_eq!(percent_change(100.0, 90.0), -10.0);
    assert_eq!(percent_change(50.0, 75.0), 50.0);
}

#[test]
fn trend_boundaries_are_strict() {
    assert_eq!(classify_trend(-10.0), Trend::Improvement);
    assert_eq!(classify_trend(10.0), Trend::Decline);
    assert_eq!(classify_trend(0.0), Trend::Stable);
    assert_eq!(classify_trend(-5.0), Trend::Stable);
    assert_eq!(classify_trend(5.0), Trend::Stable);
    assert_eq!(classify_trend(-5.01), Trend::Improvement);
    assert_eq!(classify_trend(5.01), Trend::Decline);
}

#[test]
fn progress_needs_two_assessments() {
    let empty: Vec<Assessment> = Vec::new();
    assert_eq!(progress(&empty), None);
    assert_eq!(progress(&[assessment("2024-01-10T10:00:00Z", 50)]), None);
}

#[test]
fn falling_score_is_improvement() {
    let assessments = [
        assessment("2024-01-10T10:00:00Z", 50),
        assessment("2024-02-10T10:00:00Z", 40),
    ];
    let p = progress(&assessments).unwrap();
    assert_eq!(p.absolute_change, -10);
    assert_eq!(p.percent_change, -20.0);
    assert!(p.improving);
    assert_eq!(p.trend, Trend::Improvement);
}

#[test]
fn progress_uses_chronological_order_not_slice_order() {
    let assessments = [
        assessment("2024-03-01T10:00:00Z", 30),
        assessment("2024-01-01T10:00:00Z", 60),
        assessment("2024-02-01T10:00:00Z", 90),
    ];
    let p = progress(&assessments).unwrap();
    assert_eq!(p.absolute_change, -30);
    assert_eq!(p.percent_change, -50.0);
}

#[test]
fn rising_score_is_decline() {
    let p = progress_between(
        &assessment("2024-01-01T10:00:00Z", 40),
        &assessment("2024-02-01T10:00:00Z", 44),
    );
    assert_eq!(p.absolute_change, 4);
    assert_eq!(p.percent_change, 10.0);
    assert!(!p.improving);
    assert_eq!(p.trend, Trend::Decline);
}

#[test]
fn compare_covers_subscales_on_either_side() {
    let mut earlier = assessment("2024-01-01T10:00:00Z", 20);
    earlier.subscale_scores.insert("a".into(), 12);
    earlier.subscale_scores.insert("b".into(), 8);
    let mut later = assessment("2024-02-01T10:00:00Z", 19);
    later.subscale_scores.insert("a".into(), 10);
    later.subscale_scores.insert("c".into(), 9);

    let comparison = compare(&earlier, &later);
    assert_eq!(comparison.earlier_id, earlier.id);
    assert_eq!(comparison.later_id, later.id);
    assert_eq!(comparison.total_score_diff, -1);
    assert_eq!(comparison.percent_change, -5.0);
    assert_eq!(comparison.trend, Trend::Stable);
    assert_eq!(comparison.subscale_diffs["a"], -2);
    assert_eq!(comparison.subscale_diffs["b"], -8);
    assert_eq!(comparison.subscale_diffs["c"], 9);
}

proptest! {
    #[test]
    fn improving_matches_sign_of_change(old in 1u32..200, new in 0u32..200) {
        let p = progress_between(
            &assessment("2024-01-01T00:00:00Z", old),
            &assessment("2024-06-01T00:00:00Z", new),
        );
        prop_assert_eq!(p.improving, new < old);
        prop_assert_eq!(p.absolute_change, i64::from(new) - i64::from(old));
    }

    #[test]
    fn trend_agrees_with_percent_change(pct in -200.0f64..200.0) {
        let trend = classify_trend(pct);
        match trend {
            Trend::Improvement => prop_assert!(pct < -5.0),
            Trend::Decline => prop_assert!(pct > 5.0),
            Trend::Stable => prop_assert!((-5.0..=5.0).contains(&pct)),
        }
    }
}
