use thiserror::Error;

use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown questionnaire: {0}")]
    UnknownQuestionnaire(String),

    #[error("unknown item '{item_id}' for questionnaire '{questionnaire_id}'")]
    UnknownItem {
        questionnaire_id: String,
        item_id: String,
    },

    #[error("value {value} for item '{item_id}' is outside [1, {max}]")]
    ValueOutOfRange { item_id: String, value: u32, max: u32 },

    #[error("administration incomplete: {answered} of {total} items answered")]
    Incomplete { answered: usize, total: usize },

    #[error("administration of '{questionnaire_id}' already has every item answered")]
    AlreadyComplete { questionnaire_id: String },

    #[error("invalid definition '{questionnaire_id}': {reason}")]
    InvalidDefinition {
        questionnaire_id: String,
        reason: String,
    },

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}
