//! Metacognitive mapping: a per-patient case formulation note.
//!
//! Mappings are append-only per patient and carry no scores. The query
//! helpers here take the loaded collection explicitly.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MetacognitiveMapping {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub date: jiff::Timestamp,
    /// Label of the disorder model the formulation follows.
    pub model: String,
    #[serde(default)]
    pub positive_metabeliefs: Vec<String>,
    #[serde(default)]
    pub negative_metabeliefs: Vec<String>,
    #[serde(default)]
    pub cas_components: CasComponents,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
}

impl MetacognitiveMapping {
    pub fn is_valid(&self) -> bool {
        self.positive_metabeliefs
            .iter()
            .chain(&self.negative_metabeliefs)
            .any(|b| !b.trim().is_empty())
    }
}

/// Cognitive Attentional Syndrome observations. Each field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CasComponents {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rumination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threat_monitoring: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought_suppression: Option<String>,
}

/// Raw form input for a new mapping, before trimming.
#[derive(Debug, Clone, Default)]
pub struct MappingDraft {
    pub model: String,
    pub positive_metabeliefs: Vec<String>,
    pub negative_metabeliefs: Vec<String>,
    pub cas_components: CasComponents,
    pub notes: Option<String>,
}

impl MappingDraft {
    /// Normalize the draft into a mapping dated `now`.
    ///
    /// Beliefs are trimmed and blank ones dropped; blank CAS fields and notes
    /// become `None`. Fails when no belief survives or the model is blank.
    pub fn into_mapping(
        self,
        patient_id: Uuid,
        now: jiff::Timestamp,
    ) -> Result<MetacognitiveMapping, CoreError> {
        let model = self.model.trim().to_string();
        if model.is_empty() {
            return Err(CoreError::MissingField("model".to_string()));
        }

        let positive_metabeliefs = clean_beliefs(self.positive_metabeliefs);
        let negative_metabeliefs = clean_beliefs(self.negative_metabeliefs);
        if positive_metabeliefs.is_empty() && negative_metabeliefs.is_empty() {
            return Err(CoreError::EmptyMapping);
        }

        let cas = self.cas_components;
        Ok(MetacognitiveMapping {
            id: Uuid::new_v4(),
            patient_id,
            date: now,
            model,
            positive_metabeliefs,
            negative_metabeliefs,
            cas_components: CasComponents {
                worry: non_blank(cas.worry),
                rumination: non_blank(cas.rumination),
                threat_monitoring: non_blank(cas.threat_monitoring),
                thought_suppression: non_blank(cas.thought_suppression),
            },
            notes: non_blank(self.notes),
            created_at: now,
            updated_at: now,
        })
    }
}

fn clean_beliefs(beliefs: Vec<String>) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(beliefs.len());
    for belief in beliefs {
        let belief = belief.trim();
        if !belief.is_empty() && !cleaned.iter().any(|b| b == belief) {
            cleaned.push(belief.to_string());
        }
    }
    cleaned
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Share of positive vs negative metabeliefs in one mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BeliefDistribution {
    pub positive_count: usize,
    pub negative_count: usize,
    pub positive_percent: u32,
    pub negative_percent: u32,
}

/// Mappings for one patient, most recent first.
pub fn mappings_for_patient(
    mappings: &[MetacognitiveMapping],
    patient_id: Uuid,
) -> Vec<&MetacognitiveMapping> {
    let mut found: Vec<_> = mappings
        .iter()
        .filter(|m| m.patient_id == patient_id)
        .collect();
    found.sort_by(|a, b| b.date.cmp(&a.date));
    found
}

/// The most recent mapping in the slice, by `date`.
pub fn latest_mapping(mappings: &[MetacognitiveMapping]) -> Option<&MetacognitiveMapping> {
    mappings.iter().max_by_key(|m| m.date)
}

/// Percentages are rounded half away from zero; `None` when the mapping has
/// no non-blank beliefs. Blank entries are skipped, as in [`MetacognitiveMapping::is_valid`].
pub fn belief_distribution(mapping: &MetacognitiveMapping) -> Option<BeliefDistribution> {
    let count_filled = |beliefs: &[String]| beliefs.iter().filter(|b| !b.trim().is_empty()).count();
    let positive_count = count_filled(&mapping.positive_metabeliefs);
    let negative_count = count_filled(&mapping.negative_metabeliefs);
    let total = positive_count + negative_count;
    if total == 0 {
        return None;
    }

    let percent = |count: usize| (count as f64 / total as f64 * 100.0).round() as u32;
    Some(BeliefDistribution {
        positive_count,
        negative_count,
        positive_percent: percent(positive_count),
        negative_percent: percent(negative_count),
    })
}
