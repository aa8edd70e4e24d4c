use std::collections::BTreeSet;
use std::io::Write;

use jiff::Zoned;

use metacog_core::models::assessment::Assessment;
use metacog_core::models::mapping::{self, CasComponents, MappingDraft};
use metacog_core::models::patient::Patient;
use metacog_core::models::therapist::Therapist;
use metacog_core::storage_keys;
use metacog_instruments::administration::Administration;
use metacog_instruments::disorder_models;
use metacog_instruments::scoring::summarize;
use metacog_instruments::{all_questionnaires, get_questionnaire, suggested_questionnaires};
use metacog_progress::history::{days_since, patient_history, recent_assessments_per_patient};
use metacog_progress::series::{monthly_averages, score_series};
use metacog_progress::statistics::population_statistics;
use metacog_progress::trend::{compare, progress};

use crate::cli::{
    AddPatientArgs, AdministerArgs, Command, ExportArgs, ImportArgs, MapArgs, PatientArg,
    PatientsArgs, QuestionnairesArgs, TherapistArgs,
};
use crate::config::MetacogConfig;
use crate::state::AppState;

/// Points shown per questionnaire in `progress`.
const SERIES_POINTS: usize = 10;

pub async fn run(
    command: Command,
    state: &AppState,
    config: &MetacogConfig,
    now: &Zoned,
    out: &mut dyn Write,
) -> eyre::Result<()> {
    match command {
        Command::Questionnaires(args) => questionnaires(&args, out),
        Command::Patients(args) => patients(&args, state, config, now, out).await,
        Command::AddPatient(args) => add_patient(args, state, now, out).await,
        Command::ArchivePatient(args) => archive_patient(&args, state, out).await,
        Command::DeletePatient(args) => delete_patient(&args, state, out).await,
        Command::Administer(args) => administer(args, state, now, out).await,
        Command::Progress(args) => patient_progress(&args, state, now, out).await,
        Command::Stats => stats(state, config, now, out).await,
        Command::Map(args) => map(args, state, now, out).await,
        Command::Export(args) => export(&args, state, now, out).await,
        Command::Import(args) => import(&args, state, out).await,
        Command::Therapist(args) => therapist(args, state, config, now, out).await,
    }
}

fn questionnaires(args: &QuestionnairesArgs, out: &mut dyn Write) -> eyre::Result<()> {
    let suggested = args
        .disorder
        .map(|d| suggested_questionnaires(Some(d.into())))
        .unwrap_or_default();

    let mut catalog = all_questionnaires();
    catalog.sort_by_key(|q| {
        suggested
            .iter()
            .position(|id| *id == q.id())
            .unwrap_or(usize::MAX)
    });

    for q in &catalog {
        let definition = q.definition();
        let marker = if suggested.iter().any(|id| *id == q.id()) { "*" } else { " " };
        writeln!(
            out,
            "{marker} {:<6} {:<7} {:>2} items  ~{:>2} min  {}",
            definition.id,
            definition.name,
            definition.items.len(),
            definition.estimated_minutes,
            definition.full_name,
        )?;
    }
    Ok(())
}

async fn patients(
    args: &PatientsArgs,
    state: &AppState,
    config: &MetacogConfig,
    now: &Zoned,
    out: &mut dyn Write,
) -> eyre::Result<()> {
    let snapshot = state.snapshot().await;
    let listed: Vec<&Patient> = if args.all {
        snapshot.patients.iter().collect()
    } else {
        snapshot.active_patients().collect()
    };

    if listed.is_empty() {
        writeln!(out, "No patients.")?;
        return Ok(());
    }

    for patient in &listed {
        let history = patient_history(patient.id, &snapshot.assessments);
        let last = match history.first() {
            Some(a) => format!(
                "last {} {} ({} days ago)",
                a.questionnaire_id,
                a.total_score,
                days_since(a.date, now.timestamp())
            ),
            None => "no assessments".to_string(),
        };
        writeln!(
            out,
            "{:<2} {:<28} {:>3}y  {}{}  {}",
            patient.initials(),
            patient.name,
            patient.age_on(now.date()),
            patient.id,
            if patient.archived { " [archived]" } else { "" },
            last,
        )?;
    }

    let active: Vec<Patient> = snapshot.active_patients().cloned().collect();
    let recent = recent_assessments_per_patient(&active, &snapshot.assessments, config.recent_limit);
    if !recent.is_empty() {
        writeln!(out)?;
        writeln!(out, "Recent activity:")?;
        for activity in recent {
            writeln!(
                out,
                "  {} {} {} on {}",
                activity.patient.name,
                activity.assessment.questionnaire_id,
                activity.assessment.total_score,
                activity.assessment.date.to_zoned(now.time_zone().clone()).date(),
            )?;
        }
    }
    Ok(())
}

async fn add_patient(
    args: AddPatientArgs,
    state: &AppState,
    now: &Zoned,
    out: &mut dyn Write,
) -> eyre::Result<()> {
    let mut patient = Patient::new(args.name, args.dob, now.timestamp());
    patient.gender = args.gender.map(Into::into);
    patient.disorder = args.disorder.map(Into::into);
    patient.phone = args.phone;
    patient.email = args.email;
    patient.notes = args.notes;

    let patient = state.add_patient(patient).await?;
    writeln!(out, "Added {} ({})", patient.name, patient.id)?;
    Ok(())
}

async fn archive_patient(args: &PatientArg, state: &AppState, out: &mut dyn Write) -> eyre::Result<()> {
    let patient = state.snapshot().await.find_patient(&args.patient)?.clone();
    state.archive_patient(patient.id).await?;
    writeln!(out, "Archived {}", patient.name)?;
    Ok(())
}

async fn delete_patient(args: &PatientArg, state: &AppState, out: &mut dyn Write) -> eyre::Result<()> {
    let patient = state.snapshot().await.find_patient(&args.patient)?.clone();
    state.delete_patient(patient.id).await?;
    writeln!(out, "Deleted {} with all assessments and mappings", patient.name)?;
    Ok(())
}

async fn administer(
    args: AdministerArgs,
    state: &AppState,
    now: &Zoned,
    out: &mut dyn Write,
) -> eyre::Result<()> {
    let snapshot = state.snapshot().await;
    let patient = snapshot.find_patient(&args.patient)?;

    let mut administration = Administration::start(&args.questionnaire, patient.id)?;
    for value in &args.responses {
        administration.answer_next(*value)?;
    }
    let previous = patient_history(patient.id, &snapshot.assessments)
        .into_iter()
        .find(|a| a.questionnaire_id == args.questionnaire)
        .cloned();

    let assessment = state
        .record_assessment(administration, args.notes, now.timestamp())
        .await?;
    write_assessment(&assessment, out)?;

    if let Some(previous) = previous {
        let comparison = compare(&previous, &assessment);
        writeln!(
            out,
            "Since {}: {:+} ({:+.1}%), {}",
            previous.date.to_zoned(now.time_zone().clone()).date(),
            comparison.total_score_diff,
            comparison.percent_change,
            comparison.trend.label(),
        )?;
        for (subscale, diff) in &comparison.subscale_diffs {
            writeln!(out, "  {subscale:<24} {diff:+}")?;
        }
    }
    Ok(())
}

fn write_assessment(assessment: &Assessment, out: &mut dyn Write) -> eyre::Result<()> {
    let questionnaire = get_questionnaire(&assessment.questionnaire_id)
        .ok_or_else(|| eyre::eyre!("unknown questionnaire '{}'", assessment.questionnaire_id))?;
    let summary = summarize(&assessment.responses, questionnaire.definition());

    writeln!(
        out,
        "{}: {}/{} ({:.0}%, {:?})",
        questionnaire.name(),
        summary.total,
        summary.max_possible,
        summary.percent_of_max,
        summary.band,
    )?;
    writeln!(out, "{}", summary.interpretation)?;
    for (subscale, score) in &summary.subscales {
        writeln!(out, "  {subscale:<24} {score}")?;
    }
    Ok(())
}

async fn patient_progress(
    args: &PatientArg,
    state: &AppState,
    now: &Zoned,
    out: &mut dyn Write,
) -> eyre::Result<()> {
    let snapshot = state.snapshot().await;
    let patient = snapshot.find_patient(&args.patient)?;
    let assessments = snapshot.assessments_for(patient.id);

    writeln!(out, "{} ({})", patient.name, patient.id)?;
    if assessments.is_empty() {
        writeln!(out, "No assessments yet.")?;
    }

    let questionnaire_ids: BTreeSet<&str> = assessments
        .iter()
        .map(|a| a.questionnaire_id.as_str())
        .collect();
    for id in questionnaire_ids {
        let of_questionnaire: Vec<Assessment> = assessments
            .iter()
            .filter(|a| a.questionnaire_id == id)
            .cloned()
            .collect();

        writeln!(out)?;
        writeln!(out, "{id}:")?;
        for point in score_series(&of_questionnaire, SERIES_POINTS) {
            writeln!(
                out,
                "  {}  {:>3}",
                point.date.to_zoned(now.time_zone().clone()).date(),
                point.score
            )?;
        }
        match progress(&of_questionnaire) {
            Some(p) => writeln!(
                out,
                "  change {:+} ({:+.1}%), {}",
                p.absolute_change,
                p.percent_change,
                p.trend.label()
            )?,
            None => writeln!(out, "  a second administration is needed to show change")?,
        }
    }

    if let Some(last) = patient_history(patient.id, &snapshot.assessments).first() {
        writeln!(out)?;
        writeln!(out, "Last assessment {} days ago.", days_since(last.date, now.timestamp()))?;
    }

    let mappings = mapping::mappings_for_patient(&snapshot.mappings, patient.id);
    if let Some(latest) = mappings.first() {
        writeln!(out, "Latest mapping ({}): {}", latest.date.to_zoned(now.time_zone().clone()).date(), latest.model)?;
        if let Some(d) = mapping::belief_distribution(latest) {
            writeln!(
                out,
                "  positive {} ({}%), negative {} ({}%)",
                d.positive_count, d.positive_percent, d.negative_count, d.negative_percent
            )?;
        }
    }
    Ok(())
}

async fn stats(
    state: &AppState,
    config: &MetacogConfig,
    now: &Zoned,
    out: &mut dyn Write,
) -> eyre::Result<()> {
    let snapshot = state.snapshot().await;
    let stats = population_statistics(&snapshot.patients, &snapshot.assessments, now);

    writeln!(out, "Patients:               {} ({} with assessments)", stats.total_patients, stats.active_patients)?;
    writeln!(out, "Assessments:            {} ({} this month)", stats.total_assessments, stats.assessments_this_month)?;
    writeln!(out, "Average score:          {:.1}", stats.average_score)?;
    writeln!(out, "Improving patients:     {}", stats.patients_with_improvement)?;
    writeln!(
        out,
        "Most used:              {}",
        stats.most_used_questionnaire.as_deref().unwrap_or("-")
    )?;
    writeln!(out, "Days between sessions:  {:.1}", stats.average_days_between_assessments)?;

    if !stats.questionnaire_averages.is_empty() {
        writeln!(out)?;
        for (id, average) in &stats.questionnaire_averages {
            writeln!(out, "  {id:<6} {average:.1}")?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Monthly averages:")?;
    for month in monthly_averages(&snapshot.assessments, config.chart_months, now) {
        writeln!(
            out,
            "  {}-{:02}  {:>6.1}  ({} assessments)",
            month.year, month.month, month.average, month.count
        )?;
    }
    Ok(())
}

async fn map(args: MapArgs, state: &AppState, now: &Zoned, out: &mut dyn Write) -> eyre::Result<()> {
    let snapshot = state.snapshot().await;
    let patient = snapshot.find_patient(&args.patient)?;

    let model = match args.model {
        Some(model) => model,
        None => patient
            .disorder
            .and_then(disorder_models::model_for)
            .map(|m| m.label.to_string())
            .ok_or_else(|| eyre::eyre!("no reference model for this patient; pass --model"))?,
    };

    let draft = MappingDraft {
        model,
        positive_metabeliefs: args.positive,
        negative_metabeliefs: args.negative,
        cas_components: CasComponents {
            worry: args.worry,
            rumination: args.rumination,
            threat_monitoring: args.threat_monitoring,
            thought_suppression: args.thought_suppression,
        },
        notes: args.notes,
    };

    let recorded = state.record_mapping(patient.id, draft, now.timestamp()).await?;
    writeln!(out, "Mapping {} recorded for {} ({})", recorded.id, patient.name, recorded.model)?;
    if let Some(d) = mapping::belief_distribution(&recorded) {
        writeln!(
            out,
            "  positive {} ({}%), negative {} ({}%)",
            d.positive_count, d.positive_percent, d.negative_count, d.negative_percent
        )?;
    }
    Ok(())
}

async fn export(
    args: &ExportArgs,
    state: &AppState,
    now: &Zoned,
    out: &mut dyn Write,
) -> eyre::Result<()> {
    let json = state.store().export_json().await?;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| storage_keys::export_file(now.date()).into());
    tokio::fs::write(&path, json).await?;
    tracing::info!(path = %path.display(), "document exported");
    writeln!(out, "Exported to {}", path.display())?;
    Ok(())
}

async fn import(args: &ImportArgs, state: &AppState, out: &mut dyn Write) -> eyre::Result<()> {
    let json = tokio::fs::read_to_string(&args.file).await?;
    state.import_json(&json).await?;
    let snapshot = state.snapshot().await;
    writeln!(
        out,
        "Imported {} patients and {} assessments",
        snapshot.patients.len(),
        snapshot.assessments.len()
    )?;
    Ok(())
}

async fn therapist(
    args: TherapistArgs,
    state: &AppState,
    config: &MetacogConfig,
    now: &Zoned,
    out: &mut dyn Write,
) -> eyre::Result<()> {
    let current = state.snapshot().await.therapist;
    let editing = args.name.is_some()
        || args.professional_id.is_some()
        || args.email.is_some()
        || args.phone.is_some();

    let therapist = if editing {
        let mut therapist = match current {
            Some(existing) => existing,
            None => Therapist {
                id: uuid::Uuid::new_v4(),
                name: args
                    .name
                    .clone()
                    .or_else(|| config.therapist_name.clone())
                    .ok_or_else(|| eyre::eyre!("--name is required for a new profile"))?,
                professional_id: String::new(),
                email: None,
                phone: None,
                created_at: now.timestamp(),
            },
        };
        if let Some(name) = args.name {
            therapist.name = name;
        }
        if let Some(professional_id) = args.professional_id {
            therapist.professional_id = professional_id;
        }
        if args.email.is_some() {
            therapist.email = args.email;
        }
        if args.phone.is_some() {
            therapist.phone = args.phone;
        }
        state.save_therapist(therapist.clone()).await?;
        Some(therapist)
    } else {
        current
    };

    match therapist {
        Some(t) => {
            writeln!(out, "{}", t.name)?;
            if !t.professional_id.is_empty() {
                writeln!(out, "  registration: {}", t.professional_id)?;
            }
            if let Some(email) = &t.email {
                writeln!(out, "  email: {email}")?;
            }
            if let Some(phone) = &t.phone {
                writeln!(out, "  phone: {phone}")?;
            }
        }
        None => writeln!(out, "No therapist profile. Set one with --name.")?,
    }
    Ok(())
}
