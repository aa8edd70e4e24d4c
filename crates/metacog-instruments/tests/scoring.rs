use std::collections::BTreeMap;

use metacog_core::models::assessment::AssessmentResponse;
use metacog_instruments::get_questionnaire;
use metacog_instruments::scoring::{
    classify_score, compute_subscale_scores, compute_total_score, interpret_score,
    interpret_score_by_id, percent_of_max, Interpretation, QuestionnaireDefinition,
    QuestionnaireItem, ScaleType, ScoreBand, ValidationKind, NO_INTERPRETATION,
};
use proptest::prelude::*;

fn full_response_set(def: &QuestionnaireDefinition, value: u32) -> Vec<AssessmentResponse> {
    def.items
        .iter()
        .map(|i| AssessmentResponse::new(&i.id, value, i.subscale.clone()))
        .collect()
}

/// Ten untagged items on a 4-point scale: max score 40.
fn ten_item_definition(interpretation: Option<Interpretation>) -> QuestionnaireDefinition {
    QuestionnaireDefinition {
        id: "test10".to_string(),
        name: "TEST-10".to_string(),
        full_name: "Ten item test".to_string(),
        description: String::new(),
        estimated_minutes: 1,
        scale_type: ScaleType::Likert4,
        scale_labels: vec!["a".into(), "b".into(), "c".into(), "d".into()],
        items: (1..=10)
            .map(|i| QuestionnaireItem {
                id: format!("t_{i}"),
                text: format!("item {i}"),
                subscale: None,
            })
            .collect(),
        subscales: None,
        interpretation,
    }
}

fn bands() -> Interpretation {
    Interpretation {
        low: "low".into(),
        moderate: "moderate".into(),
        high: "high".into(),
    }
}

#[test]
fn mcq30_all_twos() {
    let q = get_questionnaire("mcq30").unwrap();
    let def = q.definition();
    let responses = full_response_set(def, 2);

    assert_eq!(compute_total_score(&responses), 60);

    let subscales = compute_subscale_scores(&responses, def);
    assert_eq!(subscales.len(), 5);
    for (name, score) in &subscales {
        assert_eq!(*score, 2 * def.items_in_subscale(name).count() as u32, "{name}");
    }
}

#[test]
fn nbrs_all_ones() {
    let q = get_questionnaire("nbrs").unwrap();
    let def = q.definition();
    let responses = full_response_set(def, 1);

    assert!(compute_subscale_scores(&responses, def).is_empty());
    assert_eq!(compute_total_score(&responses), def.items.len() as u32);
}

#[test]
fn empty_responses_score_zero_and_low() {
    let q = get_questionnaire("mcq30").unwrap();
    let def = q.definition();
    assert_eq!(compute_total_score(&[]), 0);
    assert_eq!(classify_score(0, def), ScoreBand::Low);

    let subscales = compute_subscale_scores(&[], def);
    assert_eq!(subscales.len(), 5);
    assert!(subscales.values().all(|s| *s == 0));
}

#[test]
fn out_of_range_values_are_summed_as_is() {
    let responses = vec![
        AssessmentResponse::new("x", 9, None),
        AssessmentResponse::new("y", 0, None),
    ];
    assert_eq!(compute_total_score(&responses), 9);
}

#[test]
fn undeclared_subscale_tags_are_ignored() {
    let q = get_questionnaire("mcq30").unwrap();
    let def = q.definition();
    let responses = vec![
        AssessmentResponse::new("mcq30_1", 3, Some("Not A Subscale".to_string())),
        AssessmentResponse::new("mcq30_2", 4, Some(def.items[1].subscale.clone().unwrap())),
    ];

    let subscales = compute_subscale_scores(&responses, def);
    assert!(!subscales.contains_key("Not A Subscale"));
    assert_eq!(subscales.values().sum::<u32>(), 4);
    assert_eq!(compute_total_score(&responses), 7);
}

#[test]
fn band_cut_points() {
    let def = ten_item_definition(Some(bands()));
    // 13/40 = 32.5%, 14/40 = 35%, 26/40 = 65%, 27/40 = 67.5%
    assert_eq!(classify_score(13, &def), ScoreBand::Low);
    assert_eq!(classify_score(14, &def), ScoreBand::Moderate);
    assert_eq!(classify_score(26, &def), ScoreBand::Moderate);
    assert_eq!(classify_score(27, &def), ScoreBand::High);
    assert_eq!(classify_score(40, &def), ScoreBand::High);
    assert_eq!(interpret_score(27, &def), "high");
}

#[test]
fn exact_cut_points_are_inclusive_lower() {
    // 100 items on a 4-point scale: max 400, so 132 is exactly 33%.
    let mut def = ten_item_definition(Some(bands()));
    def.items = (1..=100)
        .map(|i| QuestionnaireItem {
            id: format!("t_{i}"),
            text: String::new(),
            subscale: None,
        })
        .collect();
    assert_eq!(classify_score(131, &def), ScoreBand::Low);
    assert_eq!(classify_score(132, &def), ScoreBand::Moderate);
    assert_eq!(classify_score(268, &def), ScoreBand::High);
}

#[test]
fn missing_interpretation_yields_sentinel() {
    let def = ten_item_definition(None);
    assert_eq!(interpret_score(30, &def), NO_INTERPRETATION);
}

#[test]
fn zero_item_definition_does_not_divide() {
    let mut def = ten_item_definition(Some(bands()));
    def.items.clear();
    assert_eq!(def.max_possible_score(), 0);
    assert_eq!(percent_of_max(5, &def), 0.0);
    assert_eq!(classify_score(5, &def), ScoreBand::Low);
    assert_eq!(interpret_score(5, &def), "low");
}

#[test]
fn interpret_by_id_uses_catalog() {
    let q = get_questionnaire("mcq30").unwrap();
    let high = &q.definition().interpretation.as_ref().unwrap().high;
    assert_eq!(&interpret_score_by_id(120, "mcq30"), high);
    assert_eq!(interpret_score_by_id(10, "unknown"), NO_INTERPRETATION);
}

#[test]
fn score_summary_matches_free_functions() {
    let q = get_questionnaire("mcq30").unwrap();
    let responses = full_response_set(q.definition(), 3);
    let summary = q.score(&responses);

    assert_eq!(summary.questionnaire_id, "mcq30");
    assert_eq!(summary.total, 90);
    assert_eq!(summary.max_possible, 120);
    assert_eq!(summary.percent_of_max, 75.0);
    assert_eq!(summary.band, ScoreBand::High);
    assert_eq!(summary.subscales, compute_subscale_scores(&responses, q.definition()));
}

#[test]
fn validation_reports_each_problem() {
    let q = get_questionnaire("nbrs").unwrap();
    let mut responses = full_response_set(q.definition(), 2);
    responses[0].value = 5;
    responses.pop();
    responses.push(AssessmentResponse::new("nbrs_2", 1, None));
    responses.push(AssessmentResponse::new("mcq30_1", 1, None));

    let errors = q.validate_responses(&responses);
    let kinds: BTreeMap<String, ValidationKind> = errors
        .iter()
        .map(|e| (e.item_id.clone(), e.kind))
        .collect();

    assert_eq!(errors.len(), 4);
    assert_eq!(kinds["nbrs_1"], ValidationKind::OutOfRange);
    assert_eq!(kinds["nbrs_2"], ValidationKind::Duplicate);
    assert_eq!(kinds["nbrs_8"], ValidationKind::Missing);
    assert_eq!(kinds["mcq30_1"], ValidationKind::UnknownItem);
}

#[test]
fn complete_valid_set_has_no_validation_errors() {
    let q = get_questionnaire("pbrs").unwrap();
    let responses = full_response_set(q.definition(), 4);
    assert!(q.validate_responses(&responses).is_empty());
}

proptest! {
    #[test]
    fn total_is_sum_of_values(values in prop::collection::vec(0u32..10, 0..40)) {
        let responses: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, v)| AssessmentResponse::new(format!("i{i}"), *v, None))
            .collect();
        prop_assert_eq!(compute_total_score(&responses), values.iter().sum::<u32>());
    }

    /// Subscale sums never exceed the total, and match it when every
    /// response carries a declared tag.
    #[test]
    fn subscales_bounded_by_total(
        values in prop::collection::vec(1u32..=4, 30),
        untagged in prop::collection::vec(any::<bool>(), 30),
    ) {
        let q = get_questionnaire("mcq30").unwrap();
        let def = q.definition();
        let responses: Vec<_> = def
            .items
            .iter()
            .zip(&values)
            .zip(&untagged)
            .map(|((item, v), drop_tag)| {
                let tag = if *drop_tag { None } else { item.subscale.clone() };
                AssessmentResponse::new(&item.id, *v, tag)
            })
            .collect();

        let total = compute_total_score(&responses);
        let sub_sum: u32 = compute_subscale_scores(&responses, def).values().sum();
        prop_assert!(sub_sum <= total);
        if untagged.iter().all(|d| !d) {
            prop_assert_eq!(sub_sum, total);
        }
    }

    #[test]
    fn classification_is_monotonic(a in 0u32..=120, b in 0u32..=120) {
        let q = get_questionnaire("mcq30").unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify_score(lo, q.definition()) <= classify_score(hi, q.definition()));
    }
}
