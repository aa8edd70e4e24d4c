use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// The clinician profile. Persisted alongside patients; the scoring and
/// progress crates never read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Therapist {
    pub id: Uuid,
    pub name: String,
    /// Professional registration number.
    pub professional_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub created_at: jiff::Timestamp,
}
