//! Configuration structures for timed-input.
//!
//! This module provides configuration types for the prompt layer:
//!
//! - [`PromptConfig`] - Prompt settings (timeout, retry attempts, trimming)
//! - [`Config`] - Root configuration, loadable from a JSON file
//!
//! All configuration types implement [`Default`]. Missing fields in a
//! configuration file fall back to their defaults.

use std::time::Duration;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for interactive prompts.
///
/// # Examples
///
/// ```
/// use ti_core::PromptConfig;
///
/// let config = PromptConfig::default();
/// assert_eq!(config.timeout_ms, None);
/// assert_eq!(config.max_attempts, 3);
/// assert!(config.trim_whitespace);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    /// How long to wait for an answer, in milliseconds.
    ///
    /// `None` waits indefinitely.
    pub timeout_ms: Option<u64>,

    /// How many invalid answers are tolerated before a prompt gives up.
    pub max_attempts: u32,

    /// Whether to trim surrounding whitespace from answers.
    pub trim_whitespace: bool,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            max_attempts: 3,
            trim_whitespace: true,
        }
    }
}

impl PromptConfig {
    /// Returns the answer timeout, if one is configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use ti_core::PromptConfig;
    ///
    /// let config = PromptConfig { timeout_ms: Some(1500), ..PromptConfig::default() };
    /// assert_eq!(config.timeout(), Some(Duration::from_millis(1500)));
    /// ```
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Returns a copy with the given timeout.
    #[inline]
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: Option<u64>) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Checks that every option holds a usable value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] if `timeout_ms` is zero or
    /// `max_attempts` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == Some(0) {
            return Err(ConfigError::invalid_option(
                "prompt.timeout_ms",
                "must be positive; omit it to wait indefinitely",
            ));
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::invalid_option(
                "prompt.max_attempts",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Root configuration for timed-input.
///
/// # Examples
///
/// ```
/// use ti_core::Config;
///
/// let config = Config::from_json_str(r#"{"prompt": {"timeout_ms": 5000}}"#).unwrap();
/// assert_eq!(config.prompt.timeout_ms, Some(5000));
/// assert_eq!(config.prompt.max_attempts, 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Prompt configuration.
    pub prompt: PromptConfig,
}

impl Config {
    /// Parses and validates a configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidOption`] for values that fail validation.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if `path` does not exist, or any
    /// error from [`Config::from_json_str`].
    pub fn load(path: &Utf8Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Checks that every option holds a usable value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidOption`] naming the first invalid option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.prompt.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_prompt_config_defaults() {
        let config = PromptConfig::default();
        assert_eq!(config.timeout_ms, None);
        assert_eq!(config.timeout(), None);
        assert_eq!(config.max_attempts, 3);
        assert!(config.trim_whitespace);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            prompt: PromptConfig::default().with_timeout_ms(Some(750)),
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_config_deserialize_with_missing_fields() {
        let config = Config::from_json_str(r#"{"prompt": {"max_attempts": 5}}"#).unwrap();
        assert_eq!(config.prompt.max_attempts, 5);
        assert_eq!(config.prompt.timeout_ms, None);
        assert!(config.prompt.trim_whitespace);

        let empty = Config::from_json_str("{}").unwrap();
        assert_eq!(empty, Config::default());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let result = Config::from_json_str(r#"{"prompt": {"timeout_ms": 0}}"#);
        match result {
            Err(ConfigError::InvalidOption { option, .. }) => {
                assert_eq!(option, "prompt.timeout_ms");
            }
            other => panic!("Expected InvalidOption, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let config = PromptConfig {
            max_attempts: 0,
            ..PromptConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        write!(file, r#"{{"prompt": {{"timeout_ms": 2000, "trim_whitespace": false}}}}"#)
            .expect("Failed to write config");

        let path = Utf8Path::from_path(file.path()).expect("Invalid path");
        let config = Config::load(path).expect("Config should load");
        assert_eq!(config.prompt.timeout(), Some(Duration::from_secs(2)));
        assert!(!config.prompt.trim_whitespace);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Utf8Path::new("/nonexistent/timed-input.json"));
        assert!(matches!(result, Err(ConfigError::MissingFile(_))));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        write!(file, "not json").expect("Failed to write config");

        let path = Utf8Path::from_path(file.path()).expect("Invalid path");
        assert!(matches!(Config::load(path), Err(ConfigError::Parse(_))));
    }
}
