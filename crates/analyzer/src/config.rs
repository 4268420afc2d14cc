//! Runtime configuration loaded from environment variables.
//!
//! | Variable                   | Required | Default                          |
//! |----------------------------|----------|----------------------------------|
//! | `GW2_API_KEY`              | yes      | --                               |
//! | `GW2_API_BASE_URL`         | no       | `https://api.guildwars2.com/v2`  |
//! | `REQUEST_TIMEOUT_SECS`     | no       | `30`                             |
//! | `FETCH_CONCURRENCY`        | no       | available parallelism            |
//! | `ARMORY_CACHE_DIR`         | no       | platform cache directory         |
//! | `EXCLUDE_LEGENDARY_ARMORY` | no       | `false`                          |
//! | `ONLY_LEGENDARY_ARMORY`    | no       | `false`                          |
//! | `LEGENDARY_GENERATION`     | no       | unset (`1`, `2`, `3`, `3_5`)     |
//! | `SHOW_CHARACTER_DETAILS`   | no       | `false`                          |
//! | `OUTPUT_FORMAT`            | no       | `text` (`text` or `json`)        |
//!
//! The exclusive legendary-armory flags are not rejected here; the
//! pipeline checks them before doing any remote work. An unrecognized
//! `LEGENDARY_GENERATION` is kept as-is and ignored by the filter.

use std::path::PathBuf;
use std::time::Duration;

use armory_core::generation::Generation;
use armory_core::weapon_filter::FilterOptions;
use armory_gw2::{Gw2ClientConfig, DEFAULT_BASE_URL};

/// Default request timeout in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fallback cache directory when no platform directory is available.
const FALLBACK_CACHE_DIR: &str = ".armory-cache";

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),

    #[error("{var} is invalid: {message}")]
    Invalid { var: &'static str, message: String },
}

/// How the final report is written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Fully resolved analyzer configuration.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub request_timeout: Duration,
    /// Upper bound on concurrently processed characters.
    pub fetch_concurrency: usize,
    /// Directory holding the persisted item cache and legendary catalogue.
    pub cache_dir: PathBuf,
    pub filter: FilterOptions,
    pub show_character_details: bool,
    pub output: OutputFormat,
}

impl AnalyzerConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = read("GW2_API_KEY").ok_or(ConfigError::Missing("GW2_API_KEY"))?;

        let api_base_url = read("GW2_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let request_timeout_secs = match read("REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_positive("REQUEST_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let fetch_concurrency = match read("FETCH_CONCURRENCY") {
            Some(raw) => parse_positive("FETCH_CONCURRENCY", &raw)? as usize,
            None => default_concurrency(),
        };

        let cache_dir = read("ARMORY_CACHE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_cache_dir);

        let generation = read("LEGENDARY_GENERATION");
        if let Some(label) = generation.as_deref() {
            if Generation::from_label(label).is_none() {
                tracing::warn!(
                    label,
                    "LEGENDARY_GENERATION not recognized, generation filter disabled"
                );
            }
        }

        let filter = FilterOptions {
            exclude_legendary_armory: read_bool(&read, "EXCLUDE_LEGENDARY_ARMORY")?,
            only_legendary_armory: read_bool(&read, "ONLY_LEGENDARY_ARMORY")?,
            generation,
        };

        let output = match read("OUTPUT_FORMAT").map(|v| v.to_lowercase()).as_deref() {
            None | Some("text") => OutputFormat::Text,
            Some("json") => OutputFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "OUTPUT_FORMAT",
                    message: format!("expected \"text\" or \"json\", got \"{other}\""),
                })
            }
        };

        Ok(Self {
            api_key,
            api_base_url,
            request_timeout: Duration::from_secs(request_timeout_secs),
            fetch_concurrency,
            cache_dir,
            filter,
            show_character_details: read_bool(&read, "SHOW_CHARACTER_DETAILS")?,
            output,
        })
    }

    /// HTTP client settings derived from this configuration.
    pub fn client_config(&self) -> Gw2ClientConfig {
        Gw2ClientConfig {
            base_url: self.api_base_url.clone(),
            api_key: self.api_key.clone(),
            timeout: self.request_timeout,
        }
    }
}

/// One worker per available CPU, falling back to 4.
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(4)
}

/// Platform cache directory for the census:
/// - Linux: `~/.cache/armory-census`
/// - macOS: `~/Library/Caches/armory-census`
/// - Windows: `%LOCALAPPDATA%\armory-census\cache`
pub fn default_cache_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "armory-census")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(FALLBACK_CACHE_DIR))
}

fn parse_positive(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            var,
            message: "must be greater than zero".to_string(),
        }),
        Ok(value) => Ok(value),
        Err(e) => Err(ConfigError::Invalid {
            var,
            message: e.to_string(),
        }),
    }
}

fn read_bool<F>(read: &F, var: &'static str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = read(var) else {
        return Ok(false);
    };
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Invalid {
            var,
            message: format!("expected a boolean, got \"{other}\""),
        }),
    }
}
