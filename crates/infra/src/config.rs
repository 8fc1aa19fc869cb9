//! Configuration loading and representation.
//!
//! Settings come from environment variables; anything unset falls back to a
//! default (logged). Unknown values are rejected instead of silently ignored.

use thiserror::Error;

use storefront_observability::LogFormat;
use storefront_shop::FilterPolicy;

pub const FILTER_POLICY_VAR: &str = "STOREFRONT_FILTER_POLICY";
pub const LOG_FORMAT_VAR: &str = "STOREFRONT_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} (expected one of: {expected})")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShopConfig {
    pub filter_policy: FilterPolicy,
    pub log_format: LogFormat,
}

impl ShopConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup` (key → value).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let filter_policy = match lookup(FILTER_POLICY_VAR) {
            Some(raw) => parse_filter_policy(&raw)?,
            None => {
                tracing::debug!("{FILTER_POLICY_VAR} not set; using baseline filter policy");
                FilterPolicy::default()
            }
        };

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => parse_log_format(&raw)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            filter_policy,
            log_format,
        })
    }

    /// Install logging in the configured format.
    pub fn init_logging(&self) {
        storefront_observability::init(self.log_format);
    }
}

fn parse_filter_policy(raw: &str) -> Result<FilterPolicy, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "baseline" => Ok(FilterPolicy::Baseline),
        "composed" => Ok(FilterPolicy::Composed),
        _ => Err(ConfigError::InvalidValue {
            key: FILTER_POLICY_VAR,
            value: raw.to_string(),
            expected: "baseline, composed",
        }),
    }
}

fn parse_log_format(raw: &str) -> Result<LogFormat, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "json" => Ok(LogFormat::Json),
        "pretty" => Ok(LogFormat::Pretty),
        _ => Err(ConfigError::InvalidValue {
            key: LOG_FORMAT_VAR,
            value: raw.to_string(),
            expected: "json, pretty",
        }),
    }
}
