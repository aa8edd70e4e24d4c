use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use metacog_core::models::assessment::AssessmentResponse;

use crate::error::InstrumentError;

/// Returned by [`interpret_score`] when a definition declares no thresholds.
pub const NO_INTERPRETATION: &str = "No interpretation available";

/// Lower bound (percent of maximum) of the moderate band.
pub const MODERATE_CUT: f64 = 33.0;

/// Lower bound (percent of maximum) of the high band.
pub const HIGH_CUT: f64 = 67.0;

/// Likert response format of a questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScaleType {
    /// Values 1–4.
    Likert4,
    /// Values 1–5.
    Likert5,
}

impl ScaleType {
    /// Number of points on the scale, which is also the highest valid value.
    pub fn cardinality(&self) -> u32 {
        match self {
            ScaleType::Likert4 => 4,
            ScaleType::Likert5 => 5,
        }
    }

    pub fn contains(&self, value: u32) -> bool {
        (1..=self.cardinality()).contains(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionnaireItem {
    pub id: String,
    pub text: String,
    pub subscale: Option<String>,
}

/// Descriptive text for each score band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Interpretation {
    pub low: String,
    pub moderate: String,
    pub high: String,
}

impl Interpretation {
    pub fn for_band(&self, band: ScoreBand) -> &str {
        match band {
            ScoreBand::Low => &self.low,
            ScoreBand::Moderate => &self.moderate,
            ScoreBand::High => &self.high,
        }
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuestionnaireDefinition {
    pub id: String,
    pub name: String,
    pub full_name: String,
    pub description: String,
    pub estimated_minutes: u32,
    pub scale_type: ScaleType,
    /// One label per scale point; index + 1 is the numeric value.
    pub scale_labels: Vec<String>,
    pub items: Vec<QuestionnaireItem>,
    pub subscales: Option<Vec<String>>,
    pub interpretation: Option<Interpretation>,
}

impl QuestionnaireDefinition {
    /// `item count × scale cardinality`.
    pub fn max_possible_score(&self) -> u32 {
        self.items.len() as u32 * self.scale_type.cardinality()
    }

    pub fn item(&self, item_id: &str) -> Option<&QuestionnaireItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Items tagged with `subscale`.
    pub fn items_in_subscale<'a>(
        &'a self,
        subscale: &'a str,
    ) -> impl Iterator<Item = &'a QuestionnaireItem> + 'a {
        self.items
            .iter()
            .filter(move |i| i.subscale.as_deref() == Some(subscale))
    }

    /// Verify the structural invariants of a definition: unique item ids,
    /// one label per scale point, and every item subscale declared.
    pub fn check(&self) -> Result<(), InstrumentError> {
        let invalid = |reason: String| InstrumentError::InvalidDefinition {
            questionnaire_id: self.id.clone(),
            reason,
        };

        let mut seen = HashSet::new();
        for item in &self.items {
            if !seen.insert(item.id.as_str()) {
                return Err(invalid(format!("duplicate item id '{}'", item.id)));
            }
        }

        let cardinality = self.scale_type.cardinality() as usize;
        if self.scale_labels.len() != cardinality {
            return Err(invalid(format!(
                "{} scale labels for a {cardinality}-point scale",
                self.scale_labels.len()
            )));
        }

        for item in &self.items {
            let Some(tag) = &item.subscale else { continue };
            let declared = self
                .subscales
                .as_ref()
                .is_some_and(|subscales| subscales.contains(tag));
            if !declared {
                return Err(invalid(format!(
                    "item '{}' uses undeclared subscale '{tag}'",
                    item.id
                )));
            }
        }

        Ok(())
    }
}

/// Severity band of a total score relative to its maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScoreBand {
    Low,
    Moderate,
    High,
}

/// Everything the presentation layer shows for one scored response set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreSummary {
    pub questionnaire_id: String,
    pub total: u32,
    pub subscales: BTreeMap<String, u32>,
    pub max_possible: u32,
    pub percent_of_max: f64,
    pub band: ScoreBand,
    pub interpretation: String,
}

/// A problem found in a response set before it is scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub item_id: String,
    pub value: Option<u32>,
    pub kind: ValidationKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationKind {
    UnknownItem,
    OutOfRange,
    Duplicate,
    Missing,
}

/// Sum of all response values. Values are trusted as-is.
pub fn compute_total_score(responses: &[AssessmentResponse]) -> u32 {
    responses.iter().map(|r| r.value).sum()
}

/// Per-subscale sums for every subscale the definition declares.
///
/// Declared subscales with no matching response score 0. Responses tagged
/// with a subscale the definition does not declare are ignored.
pub fn compute_subscale_scores(
    responses: &[AssessmentResponse],
    definition: &QuestionnaireDefinition,
) -> BTreeMap<String, u32> {
    let Some(subscales) = &definition.subscales else {
        return BTreeMap::new();
    };

    subscales
        .iter()
        .map(|subscale| {
            let score = responses
                .iter()
                .filter(|r| r.subscale.as_deref() == Some(subscale.as_str()))
                .map(|r| r.value)
                .sum::<u32>();
            (subscale.clone(), score)
        })
        .collect()
}

/// `total` as a percentage of the definition's maximum, or 0 when the
/// definition has no items.
pub fn percent_of_max(total: u32, definition: &QuestionnaireDefinition) -> f64 {
    let max = definition.max_possible_score();
    if max == 0 {
        return 0.0;
    }
    f64::from(total) * 100.0 / f64::from(max)
}

pub fn classify_score(total: u32, definition: &QuestionnaireDefinition) -> ScoreBand {
    let percentage = percent_of_max(total, definition);
    if percentage < MODERATE_CUT {
        ScoreBand::Low
    } else if percentage < HIGH_CUT {
        ScoreBand::Moderate
    } else {
        ScoreBand::High
    }
}

/// The definition's text for the band `total` falls into, or
/// [`NO_INTERPRETATION`].
pub fn interpret_score(total: u32, definition: &QuestionnaireDefinition) -> &str {
    match &definition.interpretation {
        Some(interpretation) => interpretation.for_band(classify_score(total, definition)),
        None => NO_INTERPRETATION,
    }
}

/// Catalog lookup followed by [`interpret_score`]; unknown ids yield
/// [`NO_INTERPRETATION`].
pub fn interpret_score_by_id(total: u32, questionnaire_id: &str) -> String {
    match crate::get_questionnaire(questionnaire_id) {
        Some(q) => interpret_score(total, q.definition()).to_string(),
        None => NO_INTERPRETATION.to_string(),
    }
}

pub fn summarize(
    responses: &[AssessmentResponse],
    definition: &QuestionnaireDefinition,
) -> ScoreSummary {
    let total = compute_total_score(responses);
    ScoreSummary {
        questionnaire_id: definition.id.clone(),
        total,
        subscales: compute_subscale_scores(responses, definition),
        max_possible: definition.max_possible_score(),
        percent_of_max: percent_of_max(total, definition),
        band: classify_score(total, definition),
        interpretation: interpret_score(total, definition).to_string(),
    }
}
