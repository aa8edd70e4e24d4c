use serde::{Deserialize, Serialize};

use metacog_core::models::assessment::Assessment;
use metacog_core::models::patient::Patient;
use metacog_core::models::therapist::Therapist;
use metacog_core::storage_keys::DOCUMENT_VERSION;

use crate::error::StorageError;

/// The main persisted document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub therapist: Option<Therapist>,
    pub patients: Vec<Patient>,
    pub assessments: Vec<Assessment>,
    pub version: String,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            therapist: None,
            patients: Vec::new(),
            assessments: Vec::new(),
            version: DOCUMENT_VERSION.to_string(),
        }
    }
}

impl Document {
    /// Reject documents written by an incompatible major version.
    pub fn check_version(&self) -> Result<(), StorageError> {
        if major(&self.version) != major(DOCUMENT_VERSION) {
            return Err(StorageError::UnsupportedVersion {
                found: self.version.clone(),
                expected: DOCUMENT_VERSION.to_string(),
            });
        }
        Ok(())
    }

    /// Parse an exported document. Both collections must be present; the
    /// version is re-stamped to the current one. Records must already be in
    /// the stored shape: uuid ids, ISO dates, snake_case labels.
    pub fn from_import(json: &str) -> Result<Self, StorageError> {
        let mut raw: serde_json::Value = serde_json::from_str(json)?;
        let Some(object) = raw.as_object_mut() else {
            return Err(StorageError::InvalidDocument("not a JSON object".to_string()));
        };
        for field in ["patients", "assessments"] {
            if !object.get(field).is_some_and(serde_json::Value::is_array) {
                return Err(StorageError::InvalidDocument(format!(
                    "missing '{field}' array"
                )));
            }
        }
        object.insert("version".to_string(), DOCUMENT_VERSION.into());
        Ok(serde_json::from_value(raw)?)
    }
}

fn major(version: &str) -> &str {
    version.split('.').next().unwrap_or(version)
}
