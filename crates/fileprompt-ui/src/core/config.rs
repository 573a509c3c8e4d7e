//! Runtime configuration for the conversion UI.
//!
//! # Design
//! - Defaults match the shipped behaviour; overrides arrive as raw strings from
//!   browser storage and are validated here so parsing stays testable off-wasm.
//! - Invalid overrides are rejected as a whole rather than partially applied.

use std::str::FromStr;
use thiserror::Error;

/// Default revert delay for button feedback, in milliseconds.
pub const DEFAULT_BUTTON_FEEDBACK_MS: u32 = 1_500;
/// Default lifetime of a toast notification, in milliseconds.
pub const DEFAULT_TOAST_MS: u32 = 2_400;

/// Errors raised while validating configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Field contained an invalid value.
    #[error("invalid configuration field {field}: {reason}")]
    InvalidField {
        /// Name of the offending field.
        field: &'static str,
        /// Raw value provided.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
}

/// Console log verbosity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// Errors only.
    Error,
    /// Warnings and errors.
    Warn,
    /// Informational messages and above.
    #[default]
    Info,
    /// Debug detail and above.
    Debug,
    /// Everything.
    Trace,
}

impl LogLevel {
    /// Matching `tracing` level.
    #[must_use]
    pub const fn as_tracing(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(ConfigError::InvalidField {
                field: "log_level",
                value: value.to_string(),
                reason: "unknown level",
            }),
        }
    }
}

/// Effective UI configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// Backend origin; empty means same origin as the page.
    pub api_base_url: String,
    /// Button feedback revert delay in milliseconds.
    pub button_feedback_ms: u32,
    /// Toast lifetime in milliseconds.
    pub toast_ms: u32,
    /// Console log verbosity.
    pub log_level: LogLevel,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            button_feedback_ms: DEFAULT_BUTTON_FEEDBACK_MS,
            toast_ms: DEFAULT_TOAST_MS,
            log_level: LogLevel::default(),
        }
    }
}

/// Raw override values as read from storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Backend origin override.
    pub api_base_url: Option<String>,
    /// Button feedback delay override.
    pub button_feedback_ms: Option<String>,
    /// Toast lifetime override.
    pub toast_ms: Option<String>,
    /// Log level override.
    pub log_level: Option<String>,
}

impl UiConfig {
    /// Apply raw overrides on top of the defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidField`] when any override fails to parse or
    /// the resulting configuration fails [`UiConfig::validate`].
    pub fn from_overrides(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = non_empty(overrides.api_base_url.as_deref()) {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = non_empty(overrides.button_feedback_ms.as_deref()) {
            config.button_feedback_ms = parse_millis("button_feedback_ms", raw)?;
        }
        if let Some(raw) = non_empty(overrides.toast_ms.as_deref()) {
            config.toast_ms = parse_millis("toast_ms", raw)?;
        }
        if let Some(raw) = non_empty(overrides.log_level.as_deref()) {
            config.log_level = raw.parse()?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that parsing alone cannot enforce.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidField`] for zero delays or a base URL that is
    /// neither empty nor an http(s) origin.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.button_feedback_ms == 0 {
            return Err(ConfigError::InvalidField {
                field: "button_feedback_ms",
                value: "0".to_string(),
                reason: "delay must be positive",
            });
        }
        if self.toast_ms == 0 {
            return Err(ConfigError::InvalidField {
                field: "toast_ms",
                value: "0".to_string(),
                reason: "delay must be positive",
            });
        }
        let url = &self.api_base_url;
        if !url.is_empty() && !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidField {
                field: "api_base_url",
                value: url.clone(),
                reason: "expected an http(s) origin",
            });
        }
        Ok(())
    }

    /// Join the base URL with an endpoint path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_base_url.trim_end_matches('/'))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn parse_millis(field: &'static str, raw: &str) -> Result<u32, ConfigError> {
    raw.parse::<u32>().map_err(|_| ConfigError::InvalidField {
        field,
        value: raw.to_string(),
        reason: "expected milliseconds",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_observed_delays() {
        let config = UiConfig::default();
        assert_eq!(config.button_feedback_ms, 1_500);
        assert_eq!(config.toast_ms, 2_400);
        assert!(config.validate().is_ok());
        assert_eq!(config.endpoint("/upload"), "/upload");
    }

    #[test]
    fn overrides_apply_and_trim() {
        let config = UiConfig::from_overrides(&ConfigOverrides {
            api_base_url: Some("http://localhost:8000/".into()),
            button_feedback_ms: Some(" 900 ".into()),
            toast_ms: None,
            log_level: Some("DEBUG".into()),
        })
        .expect("overrides are valid");
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.button_feedback_ms, 900);
        assert_eq!(config.toast_ms, DEFAULT_TOAST_MS);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.endpoint("/history"), "http://localhost:8000/history");
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = UiConfig {
            api_base_url: "https://convert.example.org/".into(),
            ..UiConfig::default()
        };
        assert_eq!(
            config.endpoint("/data/42"),
            "https://convert.example.org/data/42"
        );
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let config = UiConfig::from_overrides(&ConfigOverrides {
            api_base_url: Some("  ".into()),
            ..ConfigOverrides::default()
        })
        .expect("blank values fall back to defaults");
        assert_eq!(config, UiConfig::default());
    }

    #[test]
    fn invalid_overrides_are_rejected() {
        let err = UiConfig::from_overrides(&ConfigOverrides {
            toast_ms: Some("soon".into()),
            ..ConfigOverrides::default()
        })
        .expect_err("non-numeric delay");
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "toast_ms",
                ..
            }
        ));

        let err = UiConfig::from_overrides(&ConfigOverrides {
            button_feedback_ms: Some("0".into()),
            ..ConfigOverrides::default()
        })
        .expect_err("zero delay");
        assert!(err.to_string().contains("button_feedback_ms"));

        let err = UiConfig::from_overrides(&ConfigOverrides {
            api_base_url: Some("ftp://example".into()),
            ..ConfigOverrides::default()
        })
        .expect_err("non-http origin");
        assert!(err.to_string().contains("api_base_url"));
    }

    #[test]
    fn log_levels_parse_aliases() {
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(LogLevel::Trace.as_tracing(), tracing::Level::TRACE);
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
