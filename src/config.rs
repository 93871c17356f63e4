//! Server configuration read from the environment.

use std::time::Duration;

use thiserror::Error;

use crate::operations::command::DEFAULT_TIMEOUT_SECS;

/// Timeout for each git CLI invocation, in seconds.
pub const GIT_TIMEOUT_ENV: &str = "KODEGEN_GIT_TIMEOUT_SECS";
/// Optional bound on a whole tool invocation, in seconds.
pub const CALL_TIMEOUT_ENV: &str = "KODEGEN_GIT_CALL_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive number of seconds, got '{value}'")]
    InvalidSeconds { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub git_timeout_secs: u64,
    pub call_timeout: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            git_timeout_secs: DEFAULT_TIMEOUT_SECS,
            call_timeout: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or blank variables keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(secs) = seconds(&lookup, GIT_TIMEOUT_ENV)? {
            config.git_timeout_secs = secs;
        }
        config.call_timeout = seconds(&lookup, CALL_TIMEOUT_ENV)?.map(Duration::from_secs);

        Ok(config)
    }
}

fn seconds(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = lookup(var).filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Some(secs)),
        _ => Err(ConfigError::InvalidSeconds { var, value: raw }),
    }
}
