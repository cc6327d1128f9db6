use std::fs;

use veil_config::{ClassNames, RevealConfig};

#[test]
fn loads_toml_file_with_partial_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("veil.toml");
    fs::write(
        &path,
        r#"
blur_strength = "12"
log_filter = "veil_core=trace"

[classes]
loaded = "is-loaded"

[observer]
root_margin = "50px"
"#,
    )
    .unwrap();

    let config = RevealConfig::load_from_file(&path).unwrap();
    assert_eq!(config.blur_strength.as_str(), "12");
    assert!(config.trigger_once);
    assert_eq!(config.log_filter.as_deref(), Some("veil_core=trace"));
    assert_eq!(config.classes.loaded, "is-loaded");
    assert_eq!(config.classes.original, ClassNames::default().original);
    assert_eq!(config.observer.root_margin.as_deref(), Some("50px"));
}

#[test]
fn loads_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("veil.json");
    fs::write(&path, r#"{"trigger_once": false, "blur_strength": "0"}"#)
        .unwrap();

    let config = RevealConfig::load_from_file(&path).unwrap();
    assert!(!config.trigger_once);
    assert!(config.blur_strength.disables_animation());
}

#[test]
fn missing_file_carries_path_in_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = RevealConfig::load_from_file(&path).unwrap_err();
    assert!(format!("{err:#}").contains("absent.toml"));
}

#[test]
fn serialized_defaults_round_trip_through_toml() {
    let rendered = toml::to_string(&RevealConfig::default()).unwrap();
    let parsed = RevealConfig::parse_from_str(&rendered, "rendered").unwrap();
    assert_eq!(parsed, RevealConfig::default());
}
