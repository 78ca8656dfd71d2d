// tests/config_behaviour.rs

//! Configuration loading: defaults, overrides and validation failures.

mod common;

use patternpipe::config::{ConfigFile, load_and_validate, load_from_path, validate_config};
use patternpipe::errors::PipelineError;
use tempfile::TempDir;

use common::{default_config, write_file};

#[test]
fn empty_config_gets_the_conventional_layout() {
    let cfg = default_config();
    assert!(cfg.clean_public);
    assert_eq!(cfg.paths.source.css, "source/css");
    assert_eq!(cfg.paths.public.root, "public");
    assert_eq!(cfg.styles.entry, "style.css");
    assert_eq!(cfg.scripts.bundle, "production.min.js");
    assert_eq!(cfg.export.target, "../style-guide");
    assert_eq!(cfg.serve.port, 3000);
    assert_eq!(cfg.watch.settle_ms, 300);
    assert_eq!(cfg.engine.command, "patternlab");
    assert_eq!(cfg.engine.template_extensions, vec![".mustache"]);
    validate_config(&cfg).expect("defaults validate");
}

#[test]
fn partial_config_overrides_only_what_it_names() {
    let cfg: ConfigFile = toml::from_str(
        r#"
clean_public = false

[paths.source]
css = "assets/styles"

[serve]
port = 8080

[[styles.extract]]
src = "assets/styles/_colors.scss"
dest = "source/_patterns/colors.json"
prefix = "$color-"
"#,
    )
    .unwrap();

    assert!(!cfg.clean_public);
    assert_eq!(cfg.paths.source.css, "assets/styles");
    assert_eq!(cfg.paths.source.js, "source/js");
    assert_eq!(cfg.serve.port, 8080);
    assert_eq!(cfg.styles.extract.len(), 1);
    assert_eq!(cfg.styles.extract[0].prefix, "$color-");
    validate_config(&cfg).expect("partial config validates");
}

#[test]
fn empty_path_role_fails_validation_as_config_error() {
    let cfg: ConfigFile = toml::from_str(
        r#"
[paths.source]
css = ""
"#,
    )
    .unwrap();

    let err = validate_config(&cfg).unwrap_err();
    assert!(
        matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::Config(_))
        ),
        "expected a configuration error, got: {err:?}"
    );
    assert!(err.to_string().contains("paths.source.css"));
}

#[test]
fn zero_settle_and_zero_port_are_rejected() {
    let cfg: ConfigFile = toml::from_str("[watch]\nsettle_ms = 0\n").unwrap();
    assert!(validate_config(&cfg).is_err());

    let cfg: ConfigFile = toml::from_str("[serve]\nport = 0\n").unwrap();
    assert!(validate_config(&cfg).is_err());
}

#[test]
fn extract_rule_missing_prefix_is_rejected() {
    let cfg: ConfigFile = toml::from_str(
        r#"
[[styles.extract]]
src = "a.scss"
dest = "a.json"
prefix = ""
"#,
    )
    .unwrap();
    assert!(validate_config(&cfg).is_err());
}

#[test]
fn load_from_disk_round_trips_through_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Patternpipe.toml");
    write_file(&path, b"[serve]\nport = 4000\n");

    let cfg = load_and_validate(&path).unwrap();
    assert_eq!(cfg.serve.port, 4000);
}

#[test]
fn missing_config_file_reports_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.toml");
    let err = load_from_path(&path).unwrap_err();
    assert!(format!("{err:?}").contains("nope.toml"));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Patternpipe.toml");
    write_file(&path, b"clean_public = maybe\n");
    assert!(load_from_path(&path).is_err());
}
