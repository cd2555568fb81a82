//! Usage reporting for fallible entity constructors.
//!
//! Failures are recorded through `tracing` and then handed back to the
//! caller untouched. Reporting can be switched off with `FEAST_USAGE=false`.

use std::fmt::Display;
use std::sync::OnceLock;
use tracing::warn;

/// Environment variable read by [`UsageConfig::from_env`].
pub const USAGE_ENV_VAR: &str = "FEAST_USAGE";

static CONFIG: OnceLock<UsageConfig> = OnceLock::new();

/// Controls whether constructor failures are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageConfig {
    pub enabled: bool,
}

impl Default for UsageConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl UsageConfig {
    /// Reads [`USAGE_ENV_VAR`]. Unset or unrecognized values leave reporting on.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(USAGE_ENV_VAR).ok().as_deref())
    }

    /// Interprets a raw setting (`false`, `0`, `off` and `no` disable).
    pub fn from_value(value: Option<&str>) -> Self {
        let disabled = value.is_some_and(|v| {
            matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "false" | "0" | "off" | "no"
            )
        });
        Self { enabled: !disabled }
    }
}

/// Process-wide configuration, read from the environment on first use.
pub fn config() -> UsageConfig {
    *CONFIG.get_or_init(UsageConfig::from_env)
}

/// Runs `f`, reporting an error before returning it unchanged.
pub fn log_exceptions<T, E, F>(operation: &'static str, f: F) -> Result<T, E>
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    log_exceptions_with(config(), operation, f)
}

/// Same as [`log_exceptions`] with an explicit configuration.
pub fn log_exceptions_with<T, E, F>(config: UsageConfig, operation: &'static str, f: F) -> Result<T, E>
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    let result = f();
    if config.enabled {
        if let Err(e) = &result {
            warn!(operation, error = %e, "Entity operation failed");
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabling_values() {
        for raw in ["false", "FALSE", "0", "off", " no "] {
            assert!(!UsageConfig::from_value(Some(raw)).enabled, "{raw}");
        }
    }

    #[test]
    fn enabled_by_default() {
        assert!(UsageConfig::from_value(None).enabled);
        assert!(UsageConfig::from_value(Some("true")).enabled);
        assert!(UsageConfig::from_value(Some("maybe")).enabled);
        assert_eq!(UsageConfig::default(), UsageConfig { enabled: true });
    }

    #[test]
    fn errors_pass_through_unchanged() {
        let result: Result<(), String> =
            log_exceptions_with(UsageConfig::default(), "test", || Err("boom".to_string()));
        assert_eq!(result.unwrap_err(), "boom");
    }

    #[test]
    fn ok_values_pass_through() {
        let result: Result<u8, String> =
            log_exceptions_with(UsageConfig { enabled: false }, "test", || Ok(7));
        assert_eq!(result.unwrap(), 7);
    }
}
