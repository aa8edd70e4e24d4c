//! Command-line argument definitions for the `metacog` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use metacog_core::models::patient::{Disorder, Gender};

use crate::logging::LogFormat;

#[derive(Debug, Parser)]
#[command(
    name = "metacog",
    version,
    about = "Clinical record keeper for metacognitive therapy",
    long_about = "Keep patient records, administer MCQ-30, NBRS and PBRS, \
                  track score progress and record metacognitive case formulations."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the practice documents (overrides the config file).
    #[arg(long = "data-dir", value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the questionnaire catalog.
    Questionnaires(QuestionnairesArgs),

    /// List patients with their latest assessment.
    Patients(PatientsArgs),

    /// Register a new patient.
    AddPatient(AddPatientArgs),

    /// Archive a patient; their history is kept.
    ArchivePatient(PatientArg),

    /// Delete a patient together with their assessments and mappings.
    DeletePatient(PatientArg),

    /// Score a full set of responses and record the assessment.
    Administer(AdministerArgs),

    /// Show a patient's score history and trend.
    Progress(PatientArg),

    /// Practice-wide statistics.
    Stats,

    /// Record a metacognitive mapping for a patient.
    Map(MapArgs),

    /// Write the main document as JSON.
    Export(ExportArgs),

    /// Replace the main document with an exported one.
    Import(ImportArgs),

    /// Show or update the therapist profile.
    Therapist(TherapistArgs),
}

#[derive(Debug, Args)]
pub struct QuestionnairesArgs {
    /// Order the list by suitability for this working diagnosis.
    #[arg(long, value_enum)]
    pub disorder: Option<DisorderArg>,
}

#[derive(Debug, Args)]
pub struct PatientsArgs {
    /// Include archived patients.
    #[arg(long)]
    pub all: bool,
}

#[derive(Debug, Args)]
pub struct PatientArg {
    /// Patient id, or a unique name prefix.
    #[arg(long, short)]
    pub patient: String,
}

#[derive(Debug, Args)]
pub struct AddPatientArgs {
    #[arg(long)]
    pub name: String,

    /// Date of birth (YYYY-MM-DD).
    #[arg(long)]
    pub dob: jiff::civil::Date,

    #[arg(long, value_enum)]
    pub gender: Option<GenderArg>,

    #[arg(long, value_enum)]
    pub disorder: Option<DisorderArg>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct AdministerArgs {
    /// Patient id, or a unique name prefix.
    #[arg(long, short)]
    pub patient: String,

    /// Questionnaire id (mcq30, nbrs, pbrs).
    #[arg(long, short)]
    pub questionnaire: String,

    /// One value per item, in item order.
    #[arg(long, short, value_delimiter = ',', required = true)]
    pub responses: Vec<u32>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct MapArgs {
    /// Patient id, or a unique name prefix.
    #[arg(long, short)]
    pub patient: String,

    /// Model label; defaults to the reference model for the patient's disorder.
    #[arg(long)]
    pub model: Option<String>,

    /// A positive metabelief. Repeat for more than one.
    #[arg(long = "positive")]
    pub positive: Vec<String>,

    /// A negative metabelief. Repeat for more than one.
    #[arg(long = "negative")]
    pub negative: Vec<String>,

    #[arg(long)]
    pub worry: Option<String>,

    #[arg(long)]
    pub rumination: Option<String>,

    #[arg(long = "threat-monitoring")]
    pub threat_monitoring: Option<String>,

    #[arg(long = "thought-suppression")]
    pub thought_suppression: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output file; defaults to a dated file in the current directory.
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct TherapistArgs {
    /// Set the name (creates the profile when none exists).
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long = "professional-id")]
    pub professional_id: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DisorderArg {
    Gad,
    Depression,
    Ocd,
    Ptsd,
    Other,
    Unspecified,
}

impl From<DisorderArg> for Disorder {
    fn from(arg: DisorderArg) -> Self {
        match arg {
            DisorderArg::Gad => Disorder::Gad,
            DisorderArg::Depression => Disorder::Depression,
            DisorderArg::Ocd => Disorder::Ocd,
            DisorderArg::Ptsd => Disorder::Ptsd,
            DisorderArg::Other => Disorder::Other,
            DisorderArg::Unspecified => Disorder::Unspecified,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
    Other,
    Undisclosed,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Self {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
            GenderArg::Other => Gender::Other,
            GenderArg::Undisclosed => Gender::Undisclosed,
        }
    }
}
