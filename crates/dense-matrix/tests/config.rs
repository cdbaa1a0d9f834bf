//! Integration tests for solver configuration loading.

use std::io::Write;
use std::str::FromStr;

use dense_matrix::config::{SolverConfig, SolverKind};
use dense_matrix::math::SINGULAR_TOLERANCE;
use tempfile::NamedTempFile;

#[test]
fn default_config_uses_elimination() {
    let config = SolverConfig::default();
    assert_eq!(config.strategy, SolverKind::Elimination);
    assert_eq!(config.singular_tolerance, SINGULAR_TOLERANCE);
}

#[test]
fn solver_kind_from_str_aliases() {
    assert_eq!(SolverKind::from_str("elimination").unwrap(), SolverKind::Elimination);
    assert_eq!(SolverKind::from_str("Gauss").unwrap(), SolverKind::Elimination);
    assert_eq!(SolverKind::from_str("DGESV").unwrap(), SolverKind::Delegated);
    assert_eq!("lapack".parse::<SolverKind>().unwrap(), SolverKind::Delegated);

    let err = SolverKind::from_str("cholesky").unwrap_err();
    assert!(err.contains("cholesky"));
}

#[test]
fn config_serializes_with_snake_case_strategy() {
    let config = SolverConfig::new(1e-9, SolverKind::Delegated);
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"strategy\":\"delegated\""));

    let back: SolverConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn from_json_str_reads_all_fields() {
    let config =
        SolverConfig::from_json_str(r#"{"singular_tolerance": 1e-8, "strategy": "delegated"}"#)
            .unwrap();
    assert_eq!(config, SolverConfig::new(1e-8, SolverKind::Delegated));
}

#[test]
fn from_json_str_falls_back_on_missing_or_invalid_fields() {
    let missing = SolverConfig::from_json_str(r#"{"strategy": "delegated"}"#).unwrap();
    assert_eq!(missing.singular_tolerance, SINGULAR_TOLERANCE);
    assert_eq!(missing.strategy, SolverKind::Delegated);

    let invalid =
        SolverConfig::from_json_str(r#"{"singular_tolerance": "tiny", "strategy": "qr"}"#).unwrap();
    assert_eq!(invalid, SolverConfig::default());
}

#[test]
fn from_json_str_rejects_malformed_json() {
    assert!(SolverConfig::from_json_str("{ not json").is_err());
}

#[test]
fn from_json_file_round_trip() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"singular_tolerance": 1e-10, "strategy": "elimination"}}"#).unwrap();
    file.flush().unwrap();

    let config = SolverConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config, SolverConfig::new(1e-10, SolverKind::Elimination));

    assert!(SolverConfig::from_json_file("/no/such/solver.json").is_err());
}
