#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;
use std::io::Write;

use super::*;

fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    (dir, path)
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(&dir.path().join(CONFIG_FILE)).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.default_budget, dec!(10000));
    assert_eq!(config.savings_policy, SavingsPolicy::Clamped);
    assert_eq!(config.placeholder_name, "unnamed subscription");
}

#[test]
fn test_partial_file_fills_defaults() {
    let (_dir, path) = write_config(r#"{ "savings_policy": "raw" }"#);
    let config = Config::load(&path).unwrap();
    assert_eq!(config.savings_policy, SavingsPolicy::Raw);
    assert_eq!(config.default_budget, dec!(10000));
    assert_eq!(config.currency_symbol, "¥");
}

#[test]
fn test_full_file() {
    let (_dir, path) = write_config(
        r#"{
            "default_budget": 25000,
            "savings_policy": "clamped",
            "currency_symbol": "$",
            "placeholder_name": "mystery"
        }"#,
    );
    let config = Config::load(&path).unwrap();
    assert_eq!(config.default_budget, dec!(25000));
    assert_eq!(config.currency_symbol, "$");
    assert_eq!(config.placeholder_name, "mystery");
}

#[test]
fn test_budget_as_string() {
    let (_dir, path) = write_config(r#"{ "default_budget": "12500.50" }"#);
    assert_eq!(Config::load(&path).unwrap().default_budget, dec!(12500.50));
}

#[test]
fn test_malformed_file_is_error() {
    let (_dir, path) = write_config("{ not json");
    let err = Config::load(&path).unwrap_err();
    assert!(format!("{err}").contains("Parsing config JSON"));
}

#[test]
fn test_unknown_policy_is_error() {
    let (_dir, path) = write_config(r#"{ "savings_policy": "sometimes" }"#);
    assert!(Config::load(&path).is_err());
}

#[test]
fn test_unknown_field_is_error() {
    let (_dir, path) = write_config(r#"{ "budget": 5 }"#);
    assert!(Config::load(&path).is_err());
}

#[test]
fn test_negative_budget_is_error() {
    let (_dir, path) = write_config(r#"{ "default_budget": -1 }"#);
    assert!(Config::load(&path).is_err());
}
