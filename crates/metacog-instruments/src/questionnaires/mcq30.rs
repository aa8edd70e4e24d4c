use std::sync::LazyLock;

use crate::scoring::{Interpretation, QuestionnaireDefinition, ScaleType};
use crate::Questionnaire;

pub const ID: &str = "mcq30";

pub const POSITIVE_BELIEFS: &str = "Positive Beliefs about Worry";
pub const UNCONTROLLABILITY: &str = "Uncontrollability and Danger";
pub const COGNITIVE_CONFIDENCE: &str = "Cognitive Confidence";
pub const NEED_FOR_CONTROL: &str = "Need to Control Thoughts";
pub const SELF_CONSCIOUSNESS: &str = "Cognitive Self-Consciousness";

/// MCQ-30: Metacognitions Questionnaire-30.
/// 30 items rated 1–4 across five subscales. Total 30–120.
pub struct Mcq30;

impl Questionnaire for Mcq30 {
    fn definition(&self) -> &QuestionnaireDefinition {
        static DEFINITION: LazyLock<QuestionnaireDefinition> = LazyLock::new(|| {
            let pb = Some(POSITIVE_BELIEFS);
            let ud = Some(UNCONTROLLABILITY);
            let cc = Some(COGNITIVE_CONFIDENCE);
            let nc = Some(NEED_FOR_CONTROL);
            let cs = Some(SELF_CONSCIOUSNESS);

            let items = super::items(
                ID,
                &[
                    ("Worrying helps me to avoid problems in the future", pb),
                    ("My worrying is dangerous for me", ud),
                    ("I have little confidence in my memory for words and names", cc),
                    ("My worrying thoughts persist, no matter how I try to stop them", ud),
                    ("Worrying about a problem helps me find solutions", pb),
                    ("I have little confidence in my memory for places", cc),
                    ("I pay close attention to the way my mind works", cs),
                    ("I have many thoughts I cannot stop", ud),
                    ("Worrying helps me cope", pb),
                    ("I need to worry in order to remain organised", pb),
                    ("I have little confidence in my memory for actions", cc),
                    ("I constantly monitor my thoughts", cs),
                    ("I should be in control of my thoughts all of the time", nc),
                    ("My memory can mislead me at times", cc),
                    ("My ability to control my thoughts is failing", ud),
                    ("I need to worry in order to work well", pb),
                    ("I do not trust my memory", cc),
                    ("I think a lot about my thoughts", cs),
                    ("I could be punished for not controlling certain thoughts", nc),
                    ("I have thoughts that try to take control of me", ud),
                    ("I need to worry in order to stay safe", pb),
                    ("I would function much better without bad thoughts", nc),
                    ("I am constantly aware of my thinking", cs),
                    ("I find it hard to tell whether I did something or only thought about it", cc),
                    ("It is bad to think certain thoughts", nc),
                    ("I should not have certain thoughts", nc),
                    ("When I start worrying, I cannot stop", ud),
                    ("I could go mad from my worrying", ud),
                    ("I constantly examine what I am thinking", cs),
                    ("Some things should not be thought about", nc),
                ],
            );

            QuestionnaireDefinition {
                id: ID.to_string(),
                name: "MCQ-30".to_string(),
                full_name: "Metacognitions Questionnaire-30".to_string(),
                description: "Assesses metacognitive beliefs about worry, thought control \
                              and cognitive self-monitoring."
                    .to_string(),
                estimated_minutes: 10,
                scale_type: ScaleType::Likert4,
                scale_labels: super::agreement_labels(),
                items,
                subscales: Some(
                    [
                        POSITIVE_BELIEFS,
                        UNCONTROLLABILITY,
                        COGNITIVE_CONFIDENCE,
                        NEED_FOR_CONTROL,
                        SELF_CONSCIOUSNESS,
                    ]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                ),
                interpretation: Some(Interpretation {
                    low: "Low levels of dysfunctional metacognitive beliefs".to_string(),
                    moderate: "Moderate levels of metacognitive beliefs that may need attention"
                        .to_string(),
                    high: "High levels of dysfunctional metacognitive beliefs that may be \
                           maintaining symptoms"
                        .to_string(),
                }),
            }
        });
        &DEFINITION
    }
}
