//! Output format selection for configuration-driven loggers
//!
//! - Json: machine-readable JSON records (default)
//! - Logfmt: key=value pairs for log aggregation tools
//! - Text: human-readable lines

use super::formatter::Formatter;
use super::timestamp::TimestampFormat;
use crate::formatters::{JsonFormatter, LogfmtFormatter, TextFormatter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Output format for log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Example: `{"timestamp":"2025-01-08T10:30:45.123456789Z","level":"INFO",...,"message":"Request processed"}`
    #[default]
    Json,

    /// Example: `timestamp=2025-01-08T10:30:45.123Z level=INFO ... message="Request processed"`
    Logfmt,

    /// Example: `[2025-01-08T10:30:45.123Z] [INFO ] my_app main (main.rs:9) - Request processed`
    Text,
}

impl OutputFormat {
    /// Build the formatter for this format
    ///
    /// `pretty` only affects JSON; `timestamp_format` and `colors` only affect the
    /// logfmt and text formats.
    pub fn formatter(
        &self,
        pretty: bool,
        timestamp_format: &TimestampFormat,
        colors: bool,
    ) -> Box<dyn Formatter> {
        match self {
            OutputFormat::Json if pretty => Box::new(JsonFormatter::new_pretty()),
            OutputFormat::Json => Box::new(JsonFormatter::new()),
            OutputFormat::Logfmt => Box::new(
                LogfmtFormatter::new().with_timestamp_format(timestamp_format.clone()),
            ),
            OutputFormat::Text => Box::new(
                TextFormatter::new()
                    .with_timestamp_format(timestamp_format.clone())
                    .with_colors(colors),
            ),
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Logfmt => "logfmt",
            OutputFormat::Text => "text",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "logfmt" => Ok(OutputFormat::Logfmt),
            "text" => Ok(OutputFormat::Text),
            _ => Err(format!("Invalid output format: '{}'", s)),
        }
    }
}
