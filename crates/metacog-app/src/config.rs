use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

pub const DEFAULT_CHART_MONTHS: usize = 6;
pub const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetacogConfig {
    /// Schema version. Missing or 0 = hand-written config, read as current.
    #[serde(default)]
    pub config_version: u32,
    /// Where the practice documents live. `None` uses the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Pre-filled when creating the therapist profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub therapist_name: Option<String>,
    /// Months shown in the monthly average chart.
    #[serde(default = "default_chart_months")]
    pub chart_months: usize,
    /// Patients listed under recent activity.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for MetacogConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            data_dir: None,
            therapist_name: None,
            chart_months: DEFAULT_CHART_MONTHS,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

fn default_chart_months() -> usize {
    DEFAULT_CHART_MONTHS
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

impl MetacogConfig {
    /// `override_dir` (from the command line) wins over the configured
    /// directory, which wins over the platform default.
    pub fn resolve_data_dir(&self, override_dir: Option<&Path>) -> eyre::Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        default_data_dir()
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("metacog"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn default_data_dir() -> eyre::Result<PathBuf> {
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join("metacog"))
}

/// Load the config from its platform location, or defaults when none exists.
pub fn load_config() -> eyre::Result<MetacogConfig> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> eyre::Result<MetacogConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(MetacogConfig::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX));

    let migrated = migrate(json, on_disk_version)?;
    let config: MetacogConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Bring a config at `from_version` up to [`CURRENT_VERSION`].
///
/// Version 1 is the first schema, so there is nothing to transform yet; a
/// future bump adds its step here as a pure transform on the raw JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update metacog."
        ));
    }

    let obj = json
        .as_object_mut()
        .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;

    obj.insert(
        "config_version".to_string(),
        serde_json::Value::Number(CURRENT_VERSION.into()),
    );
    Ok(json)
}

pub fn save_config(config: &MetacogConfig) -> eyre::Result<()> {
    save_config_to(&config_path()?, config)
}

pub fn save_config_to(path: &Path, config: &MetacogConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
