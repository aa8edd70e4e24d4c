//! Response collection for one questionnaire administration.
//!
//! An [`Administration`] walks the items in catalog order and only yields an
//! [`Assessment`] once every item has an answer, so a half-finished
//! administration can never reach storage.

use metacog_core::models::assessment::{Assessment, AssessmentResponse};
use uuid::Uuid;

use crate::error::InstrumentError;
use crate::scoring::{self, QuestionnaireItem};
use crate::{get_questionnaire, Questionnaire};

pub struct Administration {
    questionnaire: Box<dyn Questionnaire>,
    patient_id: Uuid,
    /// One slot per item, in definition order.
    answers: Vec<Option<u32>>,
}

impl Administration {
    pub fn new(questionnaire: Box<dyn Questionnaire>, patient_id: Uuid) -> Self {
        let answers = vec![None; questionnaire.definition().items.len()];
        Self {
            questionnaire,
            patient_id,
            answers,
        }
    }

    /// Start an administration of the catalog questionnaire `questionnaire_id`.
    pub fn start(questionnaire_id: &str, patient_id: Uuid) -> Result<Self, InstrumentError> {
        let questionnaire = get_questionnaire(questionnaire_id)
            .ok_or_else(|| InstrumentError::UnknownQuestionnaire(questionnaire_id.to_string()))?;
        Ok(Self::new(questionnaire, patient_id))
    }

    pub fn questionnaire(&self) -> &dyn Questionnaire {
        self.questionnaire.as_ref()
    }

    pub fn patient_id(&self) -> Uuid {
        self.patient_id
    }

    /// The first item still without an answer.
    pub fn next_item(&self) -> Option<&QuestionnaireItem> {
        let items = &self.questionnaire.definition().items;
        self.answers
            .iter()
            .position(Option::is_none)
            .map(|index| &items[index])
    }

    /// Record `value` for `item_id`. Answering an item again replaces the
    /// previous value.
    pub fn answer(&mut self, item_id: &str, value: u32) -> Result<(), InstrumentError> {
        let definition = self.questionnaire.definition();
        let index = definition
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(|| InstrumentError::UnknownItem {
                questionnaire_id: definition.id.clone(),
                item_id: item_id.to_string(),
            })?;

        if !definition.scale_type.contains(value) {
            return Err(InstrumentError::ValueOutOfRange {
                item_id: item_id.to_string(),
                value,
                max: definition.scale_type.cardinality(),
            });
        }

        self.answers[index] = Some(value);
        tracing::trace!(questionnaire = %definition.id, item_id, value, "item answered");
        Ok(())
    }

    /// Answer the next unanswered item.
    pub fn answer_next(&mut self, value: u32) -> Result<(), InstrumentError> {
        let item_id = match self.next_item() {
            Some(item) => item.id.clone(),
            None => {
                return Err(InstrumentError::AlreadyComplete {
                    questionnaire_id: self.questionnaire.id().to_string(),
                });
            }
        };
        self.answer(&item_id, value)
    }

    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    /// `(answered, total)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.answered(), self.answers.len())
    }

    /// Responses so far, in item order, each carrying its item's subscale.
    pub fn responses(&self) -> Vec<AssessmentResponse> {
        self.questionnaire
            .definition()
            .items
            .iter()
            .zip(&self.answers)
            .filter_map(|(item, answer)| {
                answer.map(|value| AssessmentResponse::new(&item.id, value, item.subscale.clone()))
            })
            .collect()
    }

    /// Score the completed administration into an [`Assessment`] dated `now`.
    pub fn finish(self, now: jiff::Timestamp) -> Result<Assessment, InstrumentError> {
        if !self.is_complete() {
            return Err(InstrumentError::Incomplete {
                answered: self.answered(),
                total: self.answers.len(),
            });
        }

        let assessment = build_assessment(
            self.questionnaire.as_ref(),
            self.patient_id,
            self.responses(),
            now,
        );
        tracing::debug!(
            questionnaire = %assessment.questionnaire_id,
            patient_id = %assessment.patient_id,
            total_score = assessment.total_score,
            "administration finished"
        );
        Ok(assessment)
    }
}

/// Build a completed assessment with derived totals from `responses`.
pub fn build_assessment(
    questionnaire: &dyn Questionnaire,
    patient_id: Uuid,
    responses: Vec<AssessmentResponse>,
    now: jiff::Timestamp,
) -> Assessment {
    let definition = questionnaire.definition();
    Assessment {
        id: Uuid::new_v4(),
        patient_id,
        questionnaire_id: definition.id.clone(),
        date: now,
        total_score: scoring::compute_total_score(&responses),
        subscale_scores: scoring::compute_subscale_scores(&responses, definition),
        responses,
        notes: None,
        completed: true,
        created_at: now,
        updated_at: now,
    }
}
