use std::sync::LazyLock;

use crate::scoring::{Interpretation, QuestionnaireDefinition, ScaleType};
use crate::Questionnaire;

pub const ID: &str = "pbrs";

/// PBRS: Positive Beliefs about Rumination Scale.
/// 9 items rated 1–4, no subscales. Total 9–36.
pub struct Pbrs;

impl Questionnaire for Pbrs {
    fn definition(&self) -> &QuestionnaireDefinition {
        static DEFINITION: LazyLock<QuestionnaireDefinition> = LazyLock::new(|| {
            let items = super::items(
                ID,
                &[
                    ("I need to ruminate about the bad things that have happened in the past to make sense of them", None),
                    ("I need to ruminate about my problems to find answers to my depression", None),
                    ("Ruminating about my feelings helps me to recognize the triggers for my depression", None),
                    ("Ruminating about my depression helps me to understand past mistakes and failures", None),
                    ("I need to ruminate about my problems to find the causes of my depression", None),
                    ("Ruminating about my problems helps me to focus on the most important things", None),
                    ("Ruminating about the past helps me to prevent future mistakes and failures", None),
                    ("Ruminating about my feelings helps me to understand myself", None),
                    ("Ruminating helps me to cope with depression", None),
                ],
            );

            QuestionnaireDefinition {
                id: ID.to_string(),
                name: "PBRS".to_string(),
                full_name: "Positive Beliefs about Rumination Scale".to_string(),
                description: "Assesses positive beliefs about the usefulness of rumination."
                    .to_string(),
                estimated_minutes: 5,
                scale_type: ScaleType::Likert4,
                scale_labels: super::agreement_labels(),
                items,
                subscales: None,
                interpretation: Some(Interpretation {
                    low: "Few positive beliefs about rumination".to_string(),
                    moderate: "Moderate positive beliefs about rumination".to_string(),
                    high: "Strong beliefs that rumination is useful, likely sustaining it"
                        .to_string(),
                }),
            }
        });
        &DEFINITION
    }
}
