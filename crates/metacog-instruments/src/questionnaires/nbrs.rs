use std::sync::LazyLock;

use crate::scoring::{Interpretation, QuestionnaireDefinition, ScaleType};
use crate::Questionnaire;

pub const ID: &str = "nbrs";

/// NBRS: Negative Beliefs about Rumination Scale.
/// 8 items rated 1–4, no subscales. Total 8–32.
pub struct Nbrs;

impl Questionnaire for Nbrs {
    fn definition(&self) -> &QuestionnaireDefinition {
        static DEFINITION: LazyLock<QuestionnaireDefinition> = LazyLock::new(|| {
            let items = super::items(
                ID,
                &[
                    ("Ruminating about my problems is uncontrollable", None),
                    ("Ruminating about the past is dangerous for me", None),
                    ("I cannot stop ruminating once I start", None),
                    ("Ruminating can make me lose control", None),
                    ("Ruminating about my feelings is harmful", None),
                    ("My ruminating will get worse if I do not do something", None),
                    ("Ruminating can harm me physically", None),
                    ("I have no control over my ruminating", None),
                ],
            );

            QuestionnaireDefinition {
                id: ID.to_string(),
                name: "NBRS".to_string(),
                full_name: "Negative Beliefs about Rumination Scale".to_string(),
                description: "Assesses negative beliefs about the uncontrollability and \
                              danger of rumination."
                    .to_string(),
                estimated_minutes: 5,
                scale_type: ScaleType::Likert4,
                scale_labels: super::agreement_labels(),
                items,
                subscales: None,
                interpretation: Some(Interpretation {
                    low: "Few negative beliefs about rumination".to_string(),
                    moderate: "Moderate negative beliefs about rumination".to_string(),
                    high: "Strong beliefs that rumination is uncontrollable and harmful"
                        .to_string(),
                }),
            }
        });
        &DEFINITION
    }
}
