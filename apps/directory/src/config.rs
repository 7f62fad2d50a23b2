use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{bail, Context};
use client_core::{RetryPolicy, FETCH_RETRY_DELAY, MAX_FETCH_ATTEMPTS};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "directory.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
    pub request_timeout_ms: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            max_attempts: MAX_FETCH_ATTEMPTS,
            retry_delay_ms: FETCH_RETRY_DELAY.as_millis() as u64,
            request_timeout_ms: None,
        }
    }
}

impl Settings {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.retry_delay_ms))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    base_url: Option<String>,
    max_attempts: Option<u32>,
    retry_delay_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
}

/// Defaults, then the TOML file, then environment variables.
///
/// An explicitly requested file must exist; the default `directory.toml` is optional.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = Settings::default();

    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    if required || path.exists() {
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        apply_file_settings(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?;
    }

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn apply_file_settings(settings: &mut Settings, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileSettings = toml::from_str(raw)?;
    if let Some(v) = file_cfg.base_url {
        settings.base_url = v;
    }
    if let Some(v) = file_cfg.max_attempts {
        settings.max_attempts = v;
    }
    if let Some(v) = file_cfg.retry_delay_ms {
        settings.retry_delay_ms = v;
    }
    if let Some(v) = file_cfg.request_timeout_ms {
        settings.request_timeout_ms = Some(v);
    }
    Ok(())
}

fn apply_env_overrides(
    settings: &mut Settings,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = lookup("DIRECTORY_BASE_URL") {
        settings.base_url = v;
    }
    if let Some(v) = lookup("APP__BASE_URL") {
        settings.base_url = v;
    }

    if let Some(v) = lookup("APP__MAX_ATTEMPTS") {
        settings.max_attempts = v
            .parse()
            .with_context(|| format!("APP__MAX_ATTEMPTS must be an integer, got '{v}'"))?;
    }
    if let Some(v) = lookup("APP__RETRY_DELAY_MS") {
        settings.retry_delay_ms = v
            .parse()
            .with_context(|| format!("APP__RETRY_DELAY_MS must be an integer, got '{v}'"))?;
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_MS") {
        let parsed = v
            .parse()
            .with_context(|| format!("APP__REQUEST_TIMEOUT_MS must be an integer, got '{v}'"))?;
        settings.request_timeout_ms = Some(parsed);
    }

    Ok(())
}

/// Checks the base URL is an absolute http(s) URL and returns it without a trailing slash.
pub fn validate_base_url(raw: &str) -> anyhow::Result<String> {
    let raw = raw.trim();
    let url = Url::parse(raw).with_context(|| format!("invalid base url '{raw}'"))?;
    match url.scheme() {
        "http" | "https" => {}
        other => bail!("unsupported base url scheme '{other}' in '{raw}'"),
    }
    if url.host_str().is_none() {
        bail!("base url '{raw}' has no host");
    }
    Ok(raw.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
