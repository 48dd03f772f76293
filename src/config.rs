//! API endpoint configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::storage::StorageBackend;

pub const DEFAULT_API_URL: &str = "http://localhost:5239";
pub const DEFAULT_API_URLS: &[&str] = &[
    "https://localhost:7257",
    "http://localhost:5239",
    "http://localhost:26624",
    "http://localhost:8080",
    "https://localhost:8081",
];
pub const DEFAULT_PROBE_PATH: &str = "/swagger/index.html";
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_STORAGE_PATH: &str = ".finance-client/storage.json";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },

    #[error("{var} must list at least one origin")]
    EmptyCandidates { var: &'static str },

    #[error("origin must start with http:// or https://: {0}")]
    InvalidOrigin(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Origins to probe, highest priority first.
    pub candidates: Vec<String>,
    /// Origin used when no candidate answers.
    pub default_url: String,
    pub probe_path: String,
    pub probe_timeout_ms: u64,
    pub storage: StorageBackend,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            candidates: DEFAULT_API_URLS.iter().map(|s| (*s).to_owned()).collect(),
            default_url: DEFAULT_API_URL.to_owned(),
            probe_path: DEFAULT_PROBE_PATH.to_owned(),
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            storage: StorageBackend::File(PathBuf::from(DEFAULT_STORAGE_PATH)),
        }
    }
}

impl ApiConfig {
    /// Build typed API config from environment variables.
    ///
    /// Optional:
    /// - `FINANCE_API_URLS`: comma-separated candidate origins
    /// - `FINANCE_API_URL`: fallback origin, default `http://localhost:5239`
    /// - `FINANCE_API_TIMEOUT_MS`: per-probe timeout, default 5000
    /// - `FINANCE_API_PROBE_PATH`: default `/swagger/index.html`
    /// - `FINANCE_STORAGE`: `file` (default), `memory` or `none`
    /// - `FINANCE_STORAGE_PATH`: file store location
    ///
    /// # Errors
    ///
    /// Returns an error if any present variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Same as [`ApiConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let candidates = match lookup("FINANCE_API_URLS") {
            Some(raw) => parse_candidates(&raw)?,
            None => defaults.candidates,
        };
        let default_url = match lookup("FINANCE_API_URL") {
            Some(raw) => normalize_origin(&raw)?,
            None => defaults.default_url,
        };
        let probe_timeout_ms = match lookup("FINANCE_API_TIMEOUT_MS") {
            Some(raw) => parse_timeout(&raw)?,
            None => defaults.probe_timeout_ms,
        };
        let probe_path = lookup("FINANCE_API_PROBE_PATH")
            .map(|raw| normalize_probe_path(&raw))
            .unwrap_or(defaults.probe_path);
        let storage = parse_storage(
            lookup("FINANCE_STORAGE").as_deref(),
            lookup("FINANCE_STORAGE_PATH").map(PathBuf::from),
        )?;

        Ok(Self { candidates, default_url, probe_path, probe_timeout_ms, storage })
    }

    #[must_use]
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

/// Parse a comma-separated origin list, preserving order and duplicates.
///
/// # Errors
///
/// Returns an error if the list is empty or any entry is not an http(s) origin.
pub fn parse_candidates(raw: &str) -> Result<Vec<String>, ConfigError> {
    let candidates = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(normalize_origin)
        .collect::<Result<Vec<_>, _>>()?;
    if candidates.is_empty() {
        return Err(ConfigError::EmptyCandidates { var: "FINANCE_API_URLS" });
    }
    Ok(candidates)
}

/// Trim whitespace and trailing slashes from an origin.
///
/// # Errors
///
/// Returns an error unless the origin uses the http or https scheme.
pub fn normalize_origin(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidOrigin(raw.trim().to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn normalize_probe_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('/') { trimmed.to_owned() } else { format!("/{trimmed}") }
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(ms),
        _ => Err(ConfigError::InvalidValue { var: "FINANCE_API_TIMEOUT_MS", value: raw.to_owned() }),
    }
}

fn parse_storage(kind: Option<&str>, path: Option<PathBuf>) -> Result<StorageBackend, ConfigError> {
    match kind.map(str::trim).unwrap_or("file") {
        "file" => Ok(StorageBackend::File(path.unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH)))),
        "memory" => Ok(StorageBackend::Memory),
        "none" => Ok(StorageBackend::Disabled),
        other => Err(ConfigError::InvalidValue { var: "FINANCE_STORAGE", value: other.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
