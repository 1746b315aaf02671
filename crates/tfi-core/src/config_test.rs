use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "TFI_ENV"));
}

#[test]
fn parse_embedder_is_case_insensitive() {
    assert_eq!(parse_embedder("TEI").unwrap(), EmbedderKind::Tei);
    assert_eq!(parse_embedder(" hashing ").unwrap(), EmbedderKind::Hashing);
}

#[test]
fn parse_embedder_unknown_fails() {
    let err = parse_embedder("openai").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "TFI_EMBEDDER"));
}

#[test]
fn build_app_config_defaults_from_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.embedder, EmbedderKind::Tei);
    assert_eq!(cfg.tei_url, "http://localhost:8080");
    assert_eq!(cfg.tei_timeout_secs, 30);
    assert_eq!(cfg.tei_batch_size, 64);
    assert_eq!(cfg.hashing_dimensions, 384);
}

#[test]
fn build_app_config_trims_trailing_slash_from_tei_url() {
    let mut map = HashMap::new();
    map.insert("TFI_TEI_URL", "http://tei.internal:3000/");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.tei_url, "http://tei.internal:3000");
}

#[test]
fn build_app_config_rejects_empty_tei_url() {
    let mut map = HashMap::new();
    map.insert("TFI_TEI_URL", "/");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TFI_TEI_URL"),
        "expected InvalidEnvVar(TFI_TEI_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_embedder_override() {
    let mut map = HashMap::new();
    map.insert("TFI_EMBEDDER", "hashing");
    map.insert("TFI_HASHING_DIMENSIONS", "128");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.embedder, EmbedderKind::Hashing);
    assert_eq!(cfg.hashing_dimensions, 128);
}

#[test]
fn build_app_config_fails_on_invalid_tfi_env() {
    let mut map = HashMap::new();
    map.insert("TFI_ENV", "producton");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TFI_ENV"),
        "expected InvalidEnvVar(TFI_ENV), got: {result:?}"
    );
}

#[test]
fn build_app_config_tei_timeout_secs_invalid() {
    let mut map = HashMap::new();
    map.insert("TFI_TEI_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TFI_TEI_TIMEOUT_SECS"),
        "expected InvalidEnvVar(TFI_TEI_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_tei_batch_size_override() {
    let mut map = HashMap::new();
    map.insert("TFI_TEI_BATCH_SIZE", "16");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.tei_batch_size, 16);
}

#[test]
fn build_app_config_rejects_zero_batch_size() {
    let mut map = HashMap::new();
    map.insert("TFI_TEI_BATCH_SIZE", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TFI_TEI_BATCH_SIZE"),
        "expected InvalidEnvVar(TFI_TEI_BATCH_SIZE), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_hashing_dimensions() {
    let mut map = HashMap::new();
    map.insert("TFI_HASHING_DIMENSIONS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TFI_HASHING_DIMENSIONS"),
        "expected InvalidEnvVar(TFI_HASHING_DIMENSIONS), got: {result:?}"
    );
}
