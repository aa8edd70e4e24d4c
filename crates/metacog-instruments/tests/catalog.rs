use metacog_core::models::patient::Disorder;
use metacog_instruments::disorder_models::{model_by_label, model_for, COMMON_POSITIVE_BELIEFS};
use metacog_instruments::questionnaires::mcq30;
use metacog_instruments::scoring::ScaleType;
use metacog_instruments::{all_questionnaires, get_questionnaire, suggested_questionnaires};

#[test]
fn catalog_has_the_three_questionnaires() {
    let ids: Vec<String> = all_questionnaires()
        .iter()
        .map(|q| q.id().to_string())
        .collect();
    assert_eq!(ids, vec!["mcq30", "nbrs", "pbrs"]);
}

#[test]
fn every_definition_passes_its_own_checks() {
    for q in all_questionnaires() {
        q.definition()
            .check()
            .unwrap_or_else(|e| panic!("{} failed: {e}", q.id()));
    }
}

#[test]
fn unknown_id_is_not_found() {
    assert!(get_questionnaire("phq9").is_none());
    assert!(get_questionnaire("").is_none());
}

#[test]
fn mcq30_shape() {
    let q = get_questionnaire("mcq30").unwrap();
    let def = q.definition();
    assert_eq!(q.name(), "MCQ-30");
    assert_eq!(def.items.len(), 30);
    assert_eq!(def.scale_type, ScaleType::Likert4);
    assert_eq!(def.scale_labels.len(), 4);
    assert_eq!(def.max_possible_score(), 120);

    let subscales = def.subscales.as_ref().unwrap();
    assert_eq!(subscales.len(), 5);
    let tagged: usize = subscales
        .iter()
        .map(|s| def.items_in_subscale(s).count())
        .sum();
    assert_eq!(tagged, 30);
    assert_eq!(def.items_in_subscale(mcq30::UNCONTROLLABILITY).count(), 7);
    assert_eq!(def.items_in_subscale(mcq30::SELF_CONSCIOUSNESS).count(), 5);
}

#[test]
fn rumination_scales_have_no_subscales() {
    for id in ["nbrs", "pbrs"] {
        let q = get_questionnaire(id).unwrap();
        let def = q.definition();
        assert!(def.subscales.is_none(), "{id}");
        assert!(def.items.len() >= 8, "{id}");
        assert!(def.items.iter().all(|i| i.subscale.is_none()), "{id}");
        assert!(def.interpretation.is_some(), "{id}");
    }
}

#[test]
fn definitions_are_shared_not_rebuilt() {
    let a = get_questionnaire("nbrs").unwrap();
    let b = get_questionnaire("nbrs").unwrap();
    assert!(std::ptr::eq(a.definition(), b.definition()));
}

#[test]
fn suggestions_follow_disorder() {
    assert_eq!(suggested_questionnaires(Some(Disorder::Gad)), vec!["mcq30", "pbrs"]);
    assert_eq!(
        suggested_questionnaires(Some(Disorder::Depression)),
        vec!["mcq30", "nbrs", "pbrs"]
    );
    assert_eq!(suggested_questionnaires(Some(Disorder::Ocd)), vec!["mcq30", "nbrs"]);
    assert_eq!(suggested_questionnaires(Some(Disorder::Ptsd)), vec!["mcq30", "nbrs"]);
    assert_eq!(suggested_questionnaires(None), vec!["mcq30", "nbrs", "pbrs"]);
}

#[test]
fn disorder_models_cover_specific_disorders_only() {
    for disorder in [Disorder::Gad, Disorder::Depression, Disorder::Ocd, Disorder::Ptsd] {
        let model = model_for(disorder).unwrap();
        assert!(disorder.has_model());
        assert_eq!(model_by_label(model.label).unwrap().disorder, disorder);
        assert_eq!(model.draft().model, model.label);
    }
    assert!(model_for(Disorder::Other).is_none());
    assert!(model_for(Disorder::Unspecified).is_none());
}

#[test]
fn suggested_beliefs_do_not_repeat() {
    let gad = model_for(Disorder::Gad).unwrap();
    let beliefs = gad.suggested_positive_beliefs();
    // "Worrying keeps me prepared" is both model-specific and common.
    let count = beliefs
        .iter()
        .filter(|b| **b == "Worrying keeps me prepared")
        .count();
    assert_eq!(count, 1);
    assert_eq!(beliefs.len(), gad.positive_beliefs.len() + COMMON_POSITIVE_BELIEFS.len() - 1);
}
