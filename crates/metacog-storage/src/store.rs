//! The local store: every read-modify-write against the data directory goes
//! through [`LocalStore`], which holds a lock for the whole cycle.

use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use uuid::Uuid;

use metacog_core::models::assessment::Assessment;
use metacog_core::models::mapping::{self, MetacognitiveMapping};
use metacog_core::models::patient::Patient;
use metacog_core::models::therapist::Therapist;
use metacog_core::storage_keys::{self, DOCUMENT, MAPPINGS};

use crate::document::Document;
use crate::error::StorageError;
use crate::{objects, state};

pub struct LocalStore {
    data_dir: PathBuf,
    lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    // ── Document ─────────────────────────────────────────────────────

    /// Load the main document. A missing document loads as empty.
    pub async fn load(&self) -> Result<Document, StorageError> {
        let document: Document = state::load_state_or_default(&self.data_dir, DOCUMENT)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to load document"))?;
        document.check_version()?;
        Ok(document)
    }

    /// Save the main document, stamping the current version.
    pub async fn save(&self, document: &Document) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        self.write_document(document.clone()).await
    }

    async fn write_document(&self, mut document: Document) -> Result<(), StorageError> {
        document.version = storage_keys::DOCUMENT_VERSION.to_string();
        state::save_state(&self.data_dir, DOCUMENT, &document)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to save document"))
    }

    /// Load, apply `f`, save. The lock is held across the whole cycle.
    async fn modify_document<R>(
        &self,
        f: impl FnOnce(&mut Document) -> R,
    ) -> Result<R, StorageError> {
        let _guard = self.lock.lock().await;
        let mut document = self.load().await?;
        let result = f(&mut document);
        self.write_document(document).await?;
        Ok(result)
    }

    // ── Therapist ────────────────────────────────────────────────────

    pub async fn therapist(&self) -> Result<Option<Therapist>, StorageError> {
        Ok(self.load().await?.therapist)
    }

    pub async fn save_therapist(&self, therapist: Therapist) -> Result<(), StorageError> {
        self.modify_document(|doc| doc.therapist = Some(therapist))
            .await?;
        tracing::info!("therapist profile saved");
        Ok(())
    }

    // ── Patients ─────────────────────────────────────────────────────

    /// Patients that are not archived.
    pub async fn patients(&self) -> Result<Vec<Patient>, StorageError> {
        let mut patients = self.load().await?.patients;
        patients.retain(|p| !p.archived);
        Ok(patients)
    }

    pub async fn all_patients(&self) -> Result<Vec<Patient>, StorageError> {
        Ok(self.load().await?.patients)
    }

    pub async fn patient(&self, id: Uuid) -> Result<Option<Patient>, StorageError> {
        Ok(self.load().await?.patients.into_iter().find(|p| p.id == id))
    }

    /// Insert a new patient or replace an existing one. Replacing refreshes
    /// `updated_at`. Returns the stored record.
    pub async fn save_patient(&self, mut patient: Patient) -> Result<Patient, StorageError> {
        let id = patient.id;
        let saved = self
            .modify_document(|doc| {
                match doc.patients.iter_mut().find(|p| p.id == id) {
                    Some(existing) => {
                        patient.updated_at = jiff::Timestamp::now();
                        *existing = patient.clone();
                    }
                    None => doc.patients.push(patient.clone()),
                }
                patient
            })
            .await?;
        tracing::info!(patient_id = %id, "patient saved");
        Ok(saved)
    }

    /// Returns whether the patient existed.
    pub async fn archive_patient(&self, id: Uuid) -> Result<bool, StorageError> {
        let found = self
            .modify_document(|doc| {
                let Some(patient) = doc.patients.iter_mut().find(|p| p.id == id) else {
                    return false;
                };
                patient.archived = true;
                patient.updated_at = jiff::Timestamp::now();
                true
            })
            .await?;
        if found {
            tracing::info!(patient_id = %id, "patient archived");
        }
        Ok(found)
    }

    /// Delete a patient together with their assessments and mappings.
    /// Returns whether the patient existed.
    pub async fn delete_patient(&self, id: Uuid) -> Result<bool, StorageError> {
        let (found, assessments_removed) = self
            .modify_document(|doc| {
                let before = doc.patients.len();
                doc.patients.retain(|p| p.id != id);
                let assessments_before = doc.assessments.len();
                doc.assessments.retain(|a| a.patient_id != id);
                (
                    doc.patients.len() != before,
                    assessments_before - doc.assessments.len(),
                )
            })
            .await?;

        let mappings_removed = self
            .modify_mappings(|mappings| {
                let before = mappings.len();
                mappings.retain(|m| m.patient_id != id);
                before - mappings.len()
            })
            .await?;

        tracing::info!(
            patient_id = %id,
            found,
            assessments_removed,
            mappings_removed,
            "patient deleted"
        );
        Ok(found)
    }

    // ── Assessments ──────────────────────────────────────────────────

    pub async fn assessments(&self) -> Result<Vec<Assessment>, StorageError> {
        Ok(self.load().await?.assessments)
    }

    /// A patient's assessments, most recent first.
    pub async fn assessments_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Assessment>, StorageError> {
        let mut assessments = self.load().await?.assessments;
        assessments.retain(|a| a.patient_id == patient_id);
        assessments.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(assessments)
    }

    pub async fn assessment(&self, id: Uuid) -> Result<Option<Assessment>, StorageError> {
        Ok(self
            .load()
            .await?
            .assessments
            .into_iter()
            .find(|a| a.id == id))
    }

    pub async fn save_assessment(&self, mut assessment: Assessment) -> Result<(), StorageError> {
        let id = assessment.id;
        let patient_id = assessment.patient_id;
        self.modify_document(|doc| match doc.assessments.iter_mut().find(|a| a.id == id) {
            Some(existing) => {
                assessment.updated_at = jiff::Timestamp::now();
                *existing = assessment;
            }
            None => doc.assessments.push(assessment),
        })
        .await?;
        tracing::info!(assessment_id = %id, patient_id = %patient_id, "assessment saved");
        Ok(())
    }

    pub async fn delete_assessment(&self, id: Uuid) -> Result<bool, StorageError> {
        let found = self
            .modify_document(|doc| {
                let before = doc.assessments.len();
                doc.assessments.retain(|a| a.id != id);
                doc.assessments.len() != before
            })
            .await?;
        tracing::info!(assessment_id = %id, found, "assessment deleted");
        Ok(found)
    }

    // ── Mappings ─────────────────────────────────────────────────────

    pub async fn mappings(&self) -> Result<Vec<MetacognitiveMapping>, StorageError> {
        state::load_state_or_default(&self.data_dir, MAPPINGS)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to load mappings"))
    }

    async fn modify_mappings<R>(
        &self,
        f: impl FnOnce(&mut Vec<MetacognitiveMapping>) -> R,
    ) -> Result<R, StorageError> {
        let _guard = self.lock.lock().await;
        let mut mappings = self.mappings().await?;
        let result = f(&mut mappings);
        state::save_state(&self.data_dir, MAPPINGS, &mappings)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "failed to save mappings"))?;
        Ok(result)
    }

    /// A patient's mappings, most recent first.
    pub async fn mappings_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<MetacognitiveMapping>, StorageError> {
        let mappings = self.mappings().await?;
        Ok(mapping::mappings_for_patient(&mappings, patient_id)
            .into_iter()
            .cloned()
            .collect())
    }

    pub async fn mapping(&self, id: Uuid) -> Result<Option<MetacognitiveMapping>, StorageError> {
        Ok(self.mappings().await?.into_iter().find(|m| m.id == id))
    }

    /// Insert or replace a mapping. Mappings without any metabelief are
    /// rejected.
    pub async fn save_mapping(&self, mut mapping: MetacognitiveMapping) -> Result<(), StorageError> {
        if !mapping.is_valid() {
            return Err(StorageError::InvalidDocument(format!(
                "mapping {} has no metabeliefs",
                mapping.id
            )));
        }
        let id = mapping.id;
        let patient_id = mapping.patient_id;
        self.modify_mappings(|mappings| match mappings.iter_mut().find(|m| m.id == id) {
            Some(existing) => {
                mapping.updated_at = jiff::Timestamp::now();
                *existing = mapping;
            }
            None => mappings.push(mapping),
        })
        .await?;
        tracing::info!(mapping_id = %id, patient_id = %patient_id, "mapping saved");
        Ok(())
    }

    pub async fn delete_mapping(&self, id: Uuid) -> Result<bool, StorageError> {
        let found = self
            .modify_mappings(|mappings| {
                let before = mappings.len();
                mappings.retain(|m| m.id != id);
                mappings.len() != before
            })
            .await?;
        tracing::info!(mapping_id = %id, found, "mapping deleted");
        Ok(found)
    }

    // ── Bulk ─────────────────────────────────────────────────────────

    /// The main document as pretty-printed JSON.
    pub async fn export_json(&self) -> Result<String, StorageError> {
        let document = self.load().await?;
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Replace the main document with an exported one.
    pub async fn import_json(&self, json: &str) -> Result<Document, StorageError> {
        let document = Document::from_import(json)
            .inspect_err(|e| tracing::error!(error = %e, "import rejected"))?;
        self.save(&document).await?;
        tracing::info!(
            patients = document.patients.len(),
            assessments = document.assessments.len(),
            "document imported"
        );
        Ok(document)
    }

    /// Remove both documents from the data directory.
    pub async fn clear_all(&self) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        objects::delete_object(&self.data_dir, DOCUMENT).await?;
        objects::delete_object(&self.data_dir, MAPPINGS).await?;
        tracing::warn!(data_dir = %self.data_dir.display(), "all data cleared");
        Ok(())
    }
}
