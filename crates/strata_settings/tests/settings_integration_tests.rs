//! Integration tests for settings loading and validation.

use std::fs;

use strata_settings::{KeySpec, SchemaValidator, SettingsError, SettingsLoader, ValueKind};
use tempfile::tempdir;

const ENV_FILE: &str = r#"
"config:aws":
  app: Acme
  env: stage
  sg_app.name: SgApp
  sg_app.ports: "80, 443"
  asg.scale_min: "2"
"#;

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stage.yaml");
    fs::write(&path, ENV_FILE).unwrap();

    let settings = SettingsLoader::from_file(&path).unwrap();

    assert_eq!(settings.app().unwrap(), "Acme");
    assert_eq!(settings.env().unwrap(), "stage");
    assert_eq!(settings.string("sg_app.name").unwrap(), "SgApp");
    assert_eq!(settings.integer("asg.scale_min").unwrap(), 2);
    assert_eq!(settings.list("sg_app.ports").unwrap(), vec!["80", "443"]);
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let err = SettingsLoader::from_file(dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, SettingsError::Io(_)));
}

#[test]
fn test_loaded_settings_validate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stage.yaml");
    fs::write(&path, ENV_FILE).unwrap();

    let settings = SettingsLoader::from_file(&path).unwrap();

    let specs = [
        KeySpec::required("app", ValueKind::String),
        KeySpec::required("env", ValueKind::String),
        KeySpec::required("sg_app.ports", ValueKind::IntegerList),
        KeySpec::required("asg.scale_min", ValueKind::Integer),
    ];
    assert!(SchemaValidator::validate_strict(&settings, &specs).is_ok());

    let missing = [KeySpec::required("elb.ssl_id", ValueKind::String)];
    assert!(SchemaValidator::validate_strict(&settings, &missing).is_err());
}
