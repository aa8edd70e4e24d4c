use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use metacog_core::models::assessment::Assessment;
use metacog_core::models::mapping::{MappingDraft, MetacognitiveMapping};
use metacog_core::models::patient::Patient;
use metacog_core::models::therapist::Therapist;
use metacog_instruments::administration::Administration;
use metacog_storage::store::LocalStore;

/// Everything loaded from the data directory, as of the last refresh.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub therapist: Option<Therapist>,
    /// Includes archived patients.
    pub patients: Vec<Patient>,
    pub assessments: Vec<Assessment>,
    pub mappings: Vec<MetacognitiveMapping>,
}

impl Snapshot {
    pub fn active_patients(&self) -> impl Iterator<Item = &Patient> {
        self.patients.iter().filter(|p| !p.archived)
    }

    pub fn patient(&self, id: Uuid) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Resolve a patient by id, or by a case-insensitive name prefix when
    /// exactly one patient matches.
    pub fn find_patient(&self, query: &str) -> eyre::Result<&Patient> {
        if let Ok(id) = query.parse::<Uuid>() {
            return self
                .patient(id)
                .ok_or_else(|| eyre::eyre!("no patient with id {id}"));
        }
        let needle = query.trim().to_lowercase();
        let mut matches = self
            .patients
            .iter()
            .filter(|p| p.name.to_lowercase().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(patient), None) => Ok(patient),
            (None, _) => Err(eyre::eyre!("no patient matches '{query}'")),
            (Some(_), Some(_)) => Err(eyre::eyre!(
                "'{query}' matches more than one patient; use the id"
            )),
        }
    }

    pub fn assessments_for(&self, patient_id: Uuid) -> Vec<Assessment> {
        self.assessments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .cloned()
            .collect()
    }
}

/// Application state: the store plus an in-memory snapshot that every write
/// refreshes.
pub struct AppState {
    store: LocalStore,
    snapshot: Arc<Mutex<Snapshot>>,
}

impl AppState {
    pub async fn open(data_dir: impl Into<PathBuf>) -> eyre::Result<Self> {
        let state = Self {
            store: LocalStore::new(data_dir),
            snapshot: Arc::new(Mutex::new(Snapshot::default())),
        };
        state.refresh().await?;
        Ok(state)
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Reload everything from disk.
    pub async fn refresh(&self) -> eyre::Result<()> {
        let document = self.store.load().await?;
        let mappings = self.store.mappings().await?;

        let mut snapshot = self.snapshot.lock().await;
        *snapshot = Snapshot {
            therapist: document.therapist,
            patients: document.patients,
            assessments: document.assessments,
            mappings,
        };
        tracing::debug!(
            patients = snapshot.patients.len(),
            assessments = snapshot.assessments.len(),
            mappings = snapshot.mappings.len(),
            "state refreshed"
        );
        Ok(())
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.snapshot.lock().await.clone()
    }

    pub async fn save_therapist(&self, therapist: Therapist) -> eyre::Result<()> {
        self.store.save_therapist(therapist).await?;
        self.refresh().await
    }

    pub async fn add_patient(&self, patient: Patient) -> eyre::Result<Patient> {
        if patient.name.trim().is_empty() {
            return Err(eyre::eyre!("patient name is required"));
        }
        if self.snapshot.lock().await.patient(patient.id).is_some() {
            return Err(eyre::eyre!("patient {} already exists", patient.id));
        }
        let saved = self.store.save_patient(patient).await?;
        self.refresh().await?;
        Ok(saved)
    }

    pub async fn update_patient(&self, patient: Patient) -> eyre::Result<Patient> {
        if self.snapshot.lock().await.patient(patient.id).is_none() {
            return Err(eyre::eyre!("no patient with id {}", patient.id));
        }
        let saved = self.store.save_patient(patient).await?;
        self.refresh().await?;
        Ok(saved)
    }

    pub async fn archive_patient(&self, id: Uuid) -> eyre::Result<bool> {
        let found = self.store.archive_patient(id).await?;
        self.refresh().await?;
        Ok(found)
    }

    /// Removes the patient with all their assessments and mappings.
    pub async fn delete_patient(&self, id: Uuid) -> eyre::Result<bool> {
        let found = self.store.delete_patient(id).await?;
        self.refresh().await?;
        Ok(found)
    }

    /// Finish `administration` and persist the resulting assessment.
    pub async fn record_assessment(
        &self,
        administration: Administration,
        notes: Option<String>,
        now: jiff::Timestamp,
    ) -> eyre::Result<Assessment> {
        let patient_id = administration.patient_id();
        if self.snapshot.lock().await.patient(patient_id).is_none() {
            return Err(eyre::eyre!("no patient with id {patient_id}"));
        }
        let mut assessment = administration.finish(now)?;
        if notes.is_some() {
            assessment.set_notes(notes, now);
        }
        self.store.save_assessment(assessment.clone()).await?;
        self.refresh().await?;
        Ok(assessment)
    }

    pub async fn record_mapping(
        &self,
        patient_id: Uuid,
        draft: MappingDraft,
        now: jiff::Timestamp,
    ) -> eyre::Result<MetacognitiveMapping> {
        if self.snapshot.lock().await.patient(patient_id).is_none() {
            return Err(eyre::eyre!("no patient with id {patient_id}"));
        }
        let mapping = draft.into_mapping(patient_id, now)?;
        self.store.save_mapping(mapping.clone()).await?;
        self.refresh().await?;
        Ok(mapping)
    }

    pub async fn import_json(&self, json: &str) -> eyre::Result<()> {
        self.store.import_json(json).await?;
        self.refresh().await
    }
}
