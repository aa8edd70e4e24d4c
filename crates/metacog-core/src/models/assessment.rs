use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// One administration of a questionnaire to one patient.
///
/// `total_score` and `subscale_scores` are derived from `responses` when the
/// administration completes and are never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Assessment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub questionnaire_id: String,
    pub date: jiff::Timestamp,
    pub total_score: u32,
    #[serde(default)]
    pub subscale_scores: BTreeMap<String, u32>,
    pub responses: Vec<AssessmentResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub completed: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl Assessment {
    /// Replace the free-text notes, the only edit allowed after completion.
    pub fn set_notes(&mut self, notes: Option<String>, now: jiff::Timestamp) {
        self.notes = notes.filter(|n| !n.trim().is_empty());
        self.updated_at = now;
    }
}

/// A single answered item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct AssessmentResponse {
    pub item_id: String,
    /// 1-based Likert value.
    pub value: u32,
    /// Copy of the item's subscale at the time it was answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscale: Option<String>,
}

impl AssessmentResponse {
    pub fn new(item_id: impl Into<String>, value: u32, subscale: Option<String>) -> Self {
        Self {
            item_id: item_id.into(),
            value,
            subscale,
        }
    }
}
