//! Storage key conventions.
//!
//! Pure string constants with no filesystem access. These define the canonical
//! layout of documents inside the local data directory.

/// The main document: therapist profile, patients and assessments.
pub const DOCUMENT: &str = "metacognitive_therapy_app.json";

/// Metacognitive mappings live in their own array, outside the main document.
pub const MAPPINGS: &str = "metacognitive_mappings.json";

/// Version stamped into every saved main document.
pub const DOCUMENT_VERSION: &str = "1.0.0";

/// Suffix used for in-flight writes before the atomic rename.
pub const TMP_SUFFIX: &str = ".tmp";

pub fn tmp_key(key: &str) -> String {
    format!("{key}{TMP_SUFFIX}")
}

/// Default file name for `export` when the caller gives no path.
pub fn export_file(date: jiff::civil::Date) -> String {
    format!("metacog-export-{date}.json")
}
