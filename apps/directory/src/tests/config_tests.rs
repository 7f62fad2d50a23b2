use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let values: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| values.get(key).cloned()
}

#[test]
fn defaults_match_controller_retry_budget() {
    let settings = Settings::default();
    assert_eq!(settings.max_attempts, 3);
    assert_eq!(settings.retry_delay_ms, 1_000);
    assert_eq!(settings.request_timeout(), None);
    assert_eq!(settings.retry_policy(), RetryPolicy::default());
}

#[test]
fn file_values_override_defaults() {
    let mut settings = Settings::default();
    apply_file_settings(
        &mut settings,
        r#"
            base_url = "https://hr.example.com"
            retry_delay_ms = 250
            request_timeout_ms = 5000
        "#,
    )
    .expect("apply");

    assert_eq!(settings.base_url, "https://hr.example.com");
    assert_eq!(settings.max_attempts, 3);
    assert_eq!(settings.retry_delay_ms, 250);
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(5)));
}

#[test]
fn unknown_file_keys_are_rejected() {
    let mut settings = Settings::default();
    assert!(apply_file_settings(&mut settings, "retries = 9").is_err());
}

#[test]
fn app_prefixed_env_wins_over_legacy_name() {
    let mut settings = Settings::default();
    apply_env_overrides(
        &mut settings,
        lookup_from(&[
            ("DIRECTORY_BASE_URL", "http://legacy.local"),
            ("APP__BASE_URL", "http://app.local"),
            ("APP__MAX_ATTEMPTS", "5"),
        ]),
    )
    .expect("apply");

    assert_eq!(settings.base_url, "http://app.local");
    assert_eq!(settings.max_attempts, 5);
}

#[test]
fn non_numeric_env_value_is_an_error() {
    let mut settings = Settings::default();
    let err = apply_env_overrides(&mut settings, lookup_from(&[("APP__RETRY_DELAY_MS", "soon")]))
        .expect_err("must fail");
    assert!(err.to_string().contains("APP__RETRY_DELAY_MS"));
}

#[test]
fn explicit_missing_config_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let missing = env::temp_dir().join(format!("directory_missing_{suffix}.toml"));

    let err = load_settings(Some(&missing)).expect_err("must fail");
    assert!(err.to_string().contains("failed to read config file"));
}

#[test]
fn explicit_config_file_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("directory_config_{suffix}.toml"));
    fs::write(&path, "max_attempts = 4\n").expect("write config");

    let settings = load_settings(Some(&path)).expect("load");
    assert_eq!(settings.max_attempts, 4);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn base_url_validation_trims_trailing_slash() {
    assert_eq!(
        validate_base_url(" https://hr.example.com/ ").expect("valid"),
        "https://hr.example.com"
    );
}

#[test]
fn base_url_validation_rejects_non_http_schemes() {
    assert!(validate_base_url("ftp://hr.example.com").is_err());
    assert!(validate_base_url("hr.example.com").is_err());
}
