use metacog_app::config::{
    load_config_from, save_config_to, MetacogConfig, CURRENT_VERSION, DEFAULT_CHART_MONTHS,
    DEFAULT_RECENT_LIMIT,
};

#[test]
fn missing_config_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, MetacogConfig::default());
    assert_eq!(config.chart_months, 6);
    assert_eq!(config.recent_limit, 5);
}

#[test]
fn save_then_load_keeps_values_and_stamps_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = MetacogConfig {
        config_version: 0,
        data_dir: Some(dir.path().join("data")),
        therapist_name: Some("Dr. Helena Costa".to_string()),
        chart_months: 12,
        recent_limit: 3,
    };

    save_config_to(&path, &config).unwrap();
    let loaded = load_config_from(&path).unwrap();

    assert_eq!(loaded.config_version, CURRENT_VERSION);
    assert_eq!(loaded.data_dir, config.data_dir);
    assert_eq!(loaded.chart_months, 12);
    assert!(!path.with_extension("json.tmp").exists());
}

#[cfg(unix)]
#[test]
fn saved_config_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    save_config_to(&path, &MetacogConfig::default()).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn unversioned_config_is_read_as_current() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "data_dir": "/srv/metacog", "therapist_name": "Ana" }"#).unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.config_version, CURRENT_VERSION);
    assert_eq!(config.chart_months, DEFAULT_CHART_MONTHS);
    assert_eq!(config.recent_limit, DEFAULT_RECENT_LIMIT);
    assert_eq!(config.data_dir.as_deref(), Some(std::path::Path::new("/srv/metacog")));
    assert_eq!(config.therapist_name.as_deref(), Some("Ana"));
}

#[test]
fn v1_config_keeps_its_sizes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{ "config_version": 1, "chart_months": 3, "recent_limit": 10 }"#,
    )
    .unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.chart_months, 3);
    assert_eq!(config.recent_limit, 10);
    assert_eq!(config.data_dir, None);
}

#[test]
fn first_schema_is_version_one() {
    assert_eq!(CURRENT_VERSION, 1);
    assert_eq!(MetacogConfig::default().config_version, 1);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{ "config_version": 1, "storage_path": "/srv/old" }"#).unwrap();

    let config = load_config_from(&path).unwrap();
    assert_eq!(config.data_dir, None);
    assert_eq!(config.chart_months, DEFAULT_CHART_MONTHS);
    assert_eq!(config.recent_limit, DEFAULT_RECENT_LIMIT);
}

#[test]
fn newer_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(
        &path,
        format!(r#"{{ "config_version": {}, "chart_months": 6, "recent_limit": 5 }}"#, CURRENT_VERSION + 1),
    )
    .unwrap();

    let err = load_config_from(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn command_line_data_dir_wins() {
    let config = MetacogConfig {
        data_dir: Some("/from/config".into()),
        ..MetacogConfig::default()
    };
    let from_cli = std::path::Path::new("/from/cli");

    assert_eq!(config.resolve_data_dir(Some(from_cli)).unwrap(), from_cli);
    assert_eq!(
        config.resolve_data_dir(None).unwrap(),
        std::path::Path::new("/from/config")
    );
}
