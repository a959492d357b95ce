//! Serializable logger configuration
//!
//! A plain data description of a logger (level, format and format options) that can be
//! loaded from JSON and turned into a [`Logger`](crate::Logger) with
//! [`Logger::from_config`](crate::Logger::from_config).

use super::error::{LoggerError, Result};
use super::formatter::Formatter;
use super::log_level::LogLevel;
use super::output_format::OutputFormat;
use super::timestamp::TimestampFormat;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Logger configuration
///
/// The level is kept as text: an unrecognized level is not an error and selects INFO.
///
/// # Example
///
/// ```
/// use rust_chain_logger::core::{LoggerConfig, OutputFormat};
///
/// let config = LoggerConfig::from_json(r#"{"level": "warn", "format": "logfmt"}"#).unwrap();
/// assert_eq!(config.format, OutputFormat::Logfmt);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub level: String,
    pub format: OutputFormat,
    /// Pretty-printed JSON; only valid with the json format
    pub pretty: bool,
    pub timestamp_format: TimestampFormat,
    /// ANSI colors for the text format
    pub colors: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info.to_str().to_string(),
            format: OutputFormat::default(),
            pretty: false,
            timestamp_format: TimestampFormat::default(),
            colors: false,
        }
    }
}

impl LoggerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Effective minimum level
    pub fn min_level(&self) -> LogLevel {
        LogLevel::parse_or_default(&self.level)
    }

    /// Reject option combinations that cannot be honored
    pub fn validate(&self) -> Result<()> {
        if self.pretty && self.format != OutputFormat::Json {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("pretty printing is not available for the {} format", self.format),
            ));
        }

        if let TimestampFormat::Custom(ref pattern) = self.timestamp_format {
            if pattern.trim().is_empty() {
                return Err(LoggerError::config(
                    "LoggerConfig",
                    "custom timestamp format is empty",
                ));
            }
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::config(
                    "LoggerConfig",
                    format!("invalid strftime pattern '{}'", pattern),
                ));
            }
        }

        Ok(())
    }

    /// Formatter described by this configuration
    pub fn formatter(&self) -> Box<dyn Formatter> {
        self.format
            .formatter(self.pretty, &self.timestamp_format, self.colors)
    }
}
