use std::io::Write;

use config_engine::{ConfigEngine, ConfigError, ConfigSource};

fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults_without_sources() {
    let config = ConfigEngine::new().load().unwrap();
    assert_eq!(config.sequence.reference_level.prefix, "RL");
    assert_eq!(config.sequence.reference_level.padding, 5);
    assert_eq!(config.search.default_limit, 100);
    assert_eq!(config.his_sync.departments.len(), 6);
    assert!(config.logging.redact_insurance_numbers);
}

#[test]
fn test_file_overrides_defaults() {
    let file = yaml_file(
        r#"
sequence:
  reference_level:
    prefix: "MTT"
    padding: 4
logging:
  level: debug
his_sync:
  departments:
    - his_code: "KB"
      name: "Khoa Khám bệnh"
"#,
    );

    let config = ConfigEngine::new()
        .add_source(ConfigSource::file(file.path()))
        .load()
        .unwrap();

    assert_eq!(config.sequence.reference_level.prefix, "MTT");
    assert_eq!(config.sequence.reference_level.padding, 4);
    assert_eq!(config.sequence.reference_level.start, 1);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.his_sync.departments.len(), 1);
    assert_eq!(config.his_sync.departments[0].his_code, "KB");
}

#[test]
fn test_missing_optional_file_is_ignored() {
    let config = ConfigEngine::new()
        .add_source(ConfigSource::optional_file("/nonexistent/hic.yaml"))
        .load()
        .unwrap();
    assert_eq!(config.search.default_limit, 100);
}

#[test]
fn test_missing_required_file_fails() {
    let result = ConfigEngine::new()
        .add_source(ConfigSource::file("/nonexistent/hic.yaml"))
        .load();
    assert!(matches!(result, Err(ConfigError::LoadError(_))));
}

#[test]
fn test_invalid_file_values_fail_validation() {
    let file = yaml_file(
        r#"
search:
  default_limit: 0
"#,
    );

    let result = ConfigEngine::new()
        .add_source(ConfigSource::file(file.path()))
        .load();
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_environment_overrides_file() {
    std::env::set_var("HICTEST_SEARCH__DEFAULT_LIMIT", "25");
    std::env::set_var("HICTEST_SEQUENCE__REFERENCE_LEVEL__PREFIX", "REF");

    let config = ConfigEngine::new()
        .add_source(ConfigSource::env_with_prefix("HICTEST"))
        .load()
        .unwrap();

    std::env::remove_var("HICTEST_SEARCH__DEFAULT_LIMIT");
    std::env::remove_var("HICTEST_SEQUENCE__REFERENCE_LEVEL__PREFIX");

    assert_eq!(config.search.default_limit, 25);
    assert_eq!(config.sequence.reference_level.prefix, "REF");
}
