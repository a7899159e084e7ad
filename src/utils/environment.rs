//! Runtime configuration resolved from command-line flags and environment variables.
//!
//! Precedence for every setting is: explicit flag, then environment variable, then default.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};

/// Overrides the history data directory
pub const DATA_DIR_ENV: &str = "CONTRACTIQ_DATA_DIR";
/// Overrides the analysis service base url
pub const API_URL_ENV: &str = "CONTRACTIQ_API_URL";
/// Request timeout in whole seconds
pub const TIMEOUT_ENV: &str = "CONTRACTIQ_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

const APP_DIR_NAME: &str = "contractiq";

/// Directory holding the history store
pub fn resolve_data_dir(flag: Option<&Path>) -> Result<PathBuf> {
    data_dir_from(flag, env_value(DATA_DIR_ENV), dirs::data_dir())
}

fn data_dir_from(
    flag: Option<&Path>,
    env_value: Option<String>,
    platform_dir: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = env_value {
        return Ok(PathBuf::from(dir));
    }
    platform_dir
        .map(|dir| dir.join(APP_DIR_NAME))
        .with_context(|| format!("No platform data directory found; set {}", DATA_DIR_ENV))
}

/// Base url of the analysis service, without a trailing slash
pub fn resolve_api_url(flag: Option<&str>) -> String {
    api_url_from(flag, env_value(API_URL_ENV))
}

fn api_url_from(flag: Option<&str>, env_value: Option<String>) -> String {
    let url = flag.map(str::to_string).or(env_value);
    url.as_deref().unwrap_or(DEFAULT_API_URL).trim_end_matches('/').to_string()
}

/// Timeout applied to each analysis request
pub fn request_timeout() -> Result<Duration> {
    timeout_from(env_value(TIMEOUT_ENV))
}

fn timeout_from(env_value: Option<String>) -> Result<Duration> {
    let Some(raw) = env_value else {
        return Ok(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    };
    let secs: u64 = raw.trim().parse().with_context(|| {
        format!("{} must be a whole number of seconds, got '{}'", TIMEOUT_ENV, raw)
    })?;
    if secs == 0 {
        bail!("{} must be at least 1 second, got '{}'", TIMEOUT_ENV, raw);
    }
    Ok(Duration::from_secs(secs))
}

/// Non-empty value of an environment variable
fn env_value(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
