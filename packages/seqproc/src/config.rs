use std::env;
use std::time::Duration;

/// Environment variable holding the default inter-item delay in milliseconds.
pub const DELAY_ENV_VAR: &str = "SEQPROC_DELAY_MS";

/// Delay used when neither the caller nor the environment supplies one.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Processor configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// Delay between consecutive items when a run does not specify one
    pub default_delay: Duration,
}

impl ProcessorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Used by `from_env`; tests pass a closure instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_delay = match lookup(DELAY_ENV_VAR) {
            Some(raw) => {
                let ms = raw.trim().parse::<u64>().map_err(|_| {
                    ConfigError::InvalidValue(format!(
                        "{} must be a non-negative integer, got '{}'",
                        DELAY_ENV_VAR, raw
                    ))
                })?;
                Duration::from_millis(ms)
            }
            None => Duration::from_millis(DEFAULT_DELAY_MS),
        };

        Ok(Self { default_delay })
    }

    pub fn with_default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            default_delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}
