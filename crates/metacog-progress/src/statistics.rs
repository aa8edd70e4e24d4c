use std::collections::{BTreeMap, BTreeSet};

use jiff::Zoned;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use metacog_core::models::assessment::Assessment;
use metacog_core::models::patient::Patient;

use crate::history::patient_history;
use crate::series::{average, local_month_index, month_index};
use crate::trend::{Trend, progress};

/// Practice-wide aggregates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Statistics {
    pub total_patients: usize,
    /// Patients with at least one assessment.
    pub active_patients: usize,
    pub total_assessments: usize,
    pub assessments_this_month: usize,
    pub average_score: f64,
    /// Mean total score keyed by questionnaire id.
    pub questionnaire_averages: BTreeMap<String, f64>,
    /// Patients whose score on some questionnaire trends towards improvement.
    pub patients_with_improvement: usize,
    /// Ties resolve to the smallest id; `None` without assessments.
    pub most_used_questionnaire: Option<String>,
    /// Mean gap between consecutive assessments of the same patient.
    pub average_days_between_assessments: f64,
}

pub fn population_statistics(
    patients: &[Patient],
    assessments: &[Assessment],
    now: &Zoned,
) -> Statistics {
    let current_month = month_index(now.year(), now.month());
    let assessments_this_month = assessments
        .iter()
        .filter(|a| local_month_index(a.date, now) == current_month)
        .count();

    let questionnaire_ids: BTreeSet<&str> = assessments
        .iter()
        .map(|a| a.questionnaire_id.as_str())
        .collect();

    let questionnaire_averages = questionnaire_ids
        .iter()
        .map(|&id| {
            let avg = average(assessments.iter().filter(|a| a.questionnaire_id == id));
            (id.to_string(), avg)
        })
        .collect();

    let most_used_questionnaire = questionnaire_ids
        .iter()
        .map(|&id| {
            let uses = assessments.iter().filter(|a| a.questionnaire_id == id).count();
            (id, uses)
        })
        // max_by_key keeps the last maximum; iterate descending so that is the smallest id.
        .rev()
        .max_by_key(|&(_, uses)| uses)
        .map(|(id, _)| id.to_string());

    let mut active_patients = 0;
    let mut patients_with_improvement = 0;
    let mut gap_days = 0.0;
    let mut gaps = 0usize;

    for patient in patients {
        let history = patient_history(patient.id, assessments);
        if history.is_empty() {
            continue;
        }
        active_patients += 1;

        let improved = questionnaire_ids.iter().any(|&id| {
            let per_questionnaire = history.iter().copied().filter(|a| a.questionnaire_id == id);
            progress(per_questionnaire).is_some_and(|p| p.trend == Trend::Improvement)
        });
        if improved {
            patients_with_improvement += 1;
        }

        // History is newest first.
        for pair in history.windows(2) {
            let nanos = pair[0].date.as_nanosecond() - pair[1].date.as_nanosecond();
            gap_days += nanos as f64 / 86_400e9;
            gaps += 1;
        }
    }

    Statistics {
        total_patients: patients.len(),
        active_patients,
        total_assessments: assessments.len(),
        assessments_this_month,
        average_score: average(assessments.iter()),
        questionnaire_averages,
        patients_with_improvement,
        most_used_questionnaire,
        average_days_between_assessments: if gaps == 0 {
            0.0
        } else {
            gap_days / gaps as f64
        },
    }
}
