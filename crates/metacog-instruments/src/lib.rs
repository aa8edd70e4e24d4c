//! metacog-instruments
//!
//! Questionnaire definitions and scoring rules. Pure data and pure
//! functions with no storage dependency. Defines the items, scale and
//! interpretation thresholds for each supported questionnaire.

pub mod administration;
pub mod disorder_models;
pub mod error;
pub mod questionnaires;
pub mod scoring;

use std::collections::HashSet;

use metacog_core::models::assessment::AssessmentResponse;
use metacog_core::models::patient::Disorder;
use scoring::{QuestionnaireDefinition, ScoreSummary, ValidationError, ValidationKind};

/// Trait implemented by each catalog questionnaire.
pub trait Questionnaire: Send + Sync {
    /// The immutable definition backing this questionnaire.
    fn definition(&self) -> &QuestionnaireDefinition;

    /// Short code (e.g., "mcq30", "nbrs").
    fn id(&self) -> &str {
        &self.definition().id
    }

    /// Human-readable name (e.g., "MCQ-30").
    fn name(&self) -> &str {
        &self.definition().name
    }

    /// Check a response set against this questionnaire's items and scale.
    ///
    /// Scoring never calls this; it exists for the code collecting answers.
    fn validate_responses(&self, responses: &[AssessmentResponse]) -> Vec<ValidationError> {
        let definition = self.definition();
        let max = definition.scale_type.cardinality();
        let mut errors = Vec::new();
        let mut seen = HashSet::new();

        for response in responses {
            if definition.item(&response.item_id).is_none() {
                errors.push(ValidationError {
                    item_id: response.item_id.clone(),
                    value: Some(response.value),
                    kind: ValidationKind::UnknownItem,
                    message: format!(
                        "{}: unknown item '{}'",
                        self.name(),
                        response.item_id
                    ),
                });
                continue;
            }
            if !seen.insert(response.item_id.as_str()) {
                errors.push(ValidationError {
                    item_id: response.item_id.clone(),
                    value: Some(response.value),
                    kind: ValidationKind::Duplicate,
                    message: format!(
                        "{}: item '{}' answered more than once",
                        self.name(),
                        response.item_id
                    ),
                });
            }
            if !definition.scale_type.contains(response.value) {
                errors.push(ValidationError {
                    item_id: response.item_id.clone(),
                    value: Some(response.value),
                    kind: ValidationKind::OutOfRange,
                    message: format!(
                        "{}: item '{}' value {} is outside [1, {max}]",
                        self.name(),
                        response.item_id,
                        response.value,
                    ),
                });
            }
        }

        for item in &definition.items {
            if !seen.contains(item.id.as_str()) {
                errors.push(ValidationError {
                    item_id: item.id.clone(),
                    value: None,
                    kind: ValidationKind::Missing,
                    message: format!("{}: item '{}' not answered", self.name(), item.id),
                });
            }
        }

        errors
    }

    /// Total, subscale scores and interpretation for a response set.
    fn score(&self, responses: &[AssessmentResponse]) -> ScoreSummary {
        scoring::summarize(responses, self.definition())
    }
}

/// Return all catalog questionnaires.
pub fn all_questionnaires() -> Vec<Box<dyn Questionnaire>> {
    vec![
        Box::new(questionnaires::mcq30::Mcq30),
        Box::new(questionnaires::nbrs::Nbrs),
        Box::new(questionnaires::pbrs::Pbrs),
    ]
}

/// Look up a questionnaire by id.
pub fn get_questionnaire(id: &str) -> Option<Box<dyn Questionnaire>> {
    all_questionnaires().into_iter().find(|q| q.id() == id)
}

/// Questionnaire ids worth administering first for a working diagnosis.
pub fn suggested_questionnaires(disorder: Option<Disorder>) -> Vec<&'static str> {
    use crate::questionnaires::{mcq30, nbrs, pbrs};

    match disorder {
        Some(Disorder::Gad) => vec![mcq30::ID, pbrs::ID],
        Some(Disorder::Depression) => vec![mcq30::ID, nbrs::ID, pbrs::ID],
        Some(Disorder::Ocd | Disorder::Ptsd) => vec![mcq30::ID, nbrs::ID],
        Some(Disorder::Other | Disorder::Unspecified) | None => {
            vec![mcq30::ID, nbrs::ID, pbrs::ID]
        }
    }
}
