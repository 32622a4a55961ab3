//! Configuration types for the cleaning pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use crate::utils::is_null_token;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Value written into every absent cell unless configured otherwise.
pub const DEFAULT_SENTINEL: &str = "UNKNOWN";

/// Field delimiter used unless configured otherwise.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Configuration for the cleaning pipeline.
///
/// Use [`CleanerConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use tabular_cleaner::config::CleanerConfig;
///
/// let config = CleanerConfig::builder()
///     .sentinel("N/A-FILLED")
///     .null_tokens(["NA", "null"])
///     .output_path("out/cleaned.csv")
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanerConfig {
    /// Replacement value for every absent cell, regardless of column.
    /// Default: "UNKNOWN"
    pub sentinel: String,

    /// Extra textual markers read as absent. Matching trims whitespace and
    /// ignores ASCII case. The empty string is always a null token.
    /// Default: empty
    pub null_tokens: Vec<String>,

    /// Field delimiter of the source file (and of the persisted output).
    /// Default: b','
    pub delimiter: u8,

    /// Where to persist the filled dataset. `None` keeps results in memory only.
    /// Default: None
    pub output_path: Option<PathBuf>,
}

impl Default for CleanerConfig {
    fn default() -> Self {
        Self {
            sentinel: DEFAULT_SENTINEL.to_string(),
            null_tokens: Vec::new(),
            delimiter: DEFAULT_DELIMITER,
            output_path: None,
        }
    }
}

impl CleanerConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleanerConfigBuilder {
        CleanerConfigBuilder::default()
    }

    /// Read a configuration from a JSON file and validate it.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: CleanerConfig = serde_json::from_str(&content)?;
        config
            .validate()
            .map_err(|e| crate::error::CleanerError::InvalidConfig(e.to_string()))?;
        Ok(config)
    }

    /// Check whether `value` would be read back as an absent cell.
    pub fn is_null_token(&self, value: &str) -> bool {
        is_null_token(value, &self.null_tokens)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.is_null_token(&self.sentinel) {
            return Err(ConfigValidationError::SentinelIsNullToken(
                self.sentinel.clone(),
            ));
        }

        if !self.delimiter.is_ascii() || matches!(self.delimiter, b'"' | b'\n' | b'\r') {
            return Err(ConfigValidationError::InvalidDelimiter(self.delimiter));
        }

        let delimiter = self.delimiter as char;
        if let Some(token) = self.null_tokens.iter().find(|t| t.contains(delimiter)) {
            return Err(ConfigValidationError::TokenContainsDelimiter {
                token: token.clone(),
                delimiter,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Sentinel '{0}' would itself be read as a missing value")]
    SentinelIsNullToken(String),

    #[error("Invalid delimiter byte 0x{0:02x} (must be ASCII and not a quote or line break)")]
    InvalidDelimiter(u8),

    #[error("Null token '{token}' contains the delimiter '{delimiter}'")]
    TokenContainsDelimiter { token: String, delimiter: char },
}

/// Builder for [`CleanerConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleanerConfigBuilder {
    sentinel: Option<String>,
    null_tokens: Vec<String>,
    delimiter: Option<u8>,
    output_path: Option<PathBuf>,
}

impl CleanerConfigBuilder {
    /// Start from an existing configuration (e.g. one loaded from JSON).
    pub fn from_config(config: CleanerConfig) -> Self {
        Self {
            sentinel: Some(config.sentinel),
            null_tokens: config.null_tokens,
            delimiter: Some(config.delimiter),
            output_path: config.output_path,
        }
    }

    /// Set the value substituted for absent cells.
    pub fn sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = Some(sentinel.into());
        self
    }

    /// Add one null token.
    pub fn null_token(mut self, token: impl Into<String>) -> Self {
        self.null_tokens.push(token.into());
        self
    }

    /// Add several null tokens.
    pub fn null_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_tokens.extend(tokens.into_iter().map(Into::into));
        self
    }

    /// Set the field delimiter.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Persist the filled dataset to this path.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleanerConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleanerConfig, ConfigValidationError> {
        // Matching ignores ASCII case, so "NA" and "na" are the same token
        let mut null_tokens: Vec<String> = Vec::with_capacity(self.null_tokens.len());
        for token in self.null_tokens {
            if !null_tokens.iter().any(|t| t.eq_ignore_ascii_case(&token)) {
                null_tokens.push(token);
            }
        }

        let config = CleanerConfig {
            sentinel: self
                .sentinel
                .unwrap_or_else(|| DEFAULT_SENTINEL.to_string()),
            null_tokens,
            delimiter: self.delimiter.unwrap_or(DEFAULT_DELIMITER),
            output_path: self.output_path,
        };

        config.validate()?;
        Ok(config)
    }
}
