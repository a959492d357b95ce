//! Finalized log records

use super::call_site::CallSite;
use super::log_context::LogContext;
use super::log_level::LogLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;

/// Structural form of an attached error value
///
/// `message` is the error's `Display` text; `sources` lists the `Error::source()` chain
/// from the outermost cause inward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorData {
    pub message: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
}

impl ErrorData {
    pub fn from_error(err: &dyn Error) -> Self {
        let mut sources = Vec::new();
        let mut current = err.source();
        while let Some(source) = current {
            sources.push(source.to_string());
            current = source.source();
        }

        Self {
            message: err.to_string(),
            sources,
        }
    }
}

/// A fully populated record, ready for a formatter
///
/// Field names follow the JSON record shape: optional parts (`fields`, `error`,
/// `errorData`, `errorLocation`) are omitted rather than emitted as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub package: String,
    pub function: String,
    pub file: String,
    pub line: u32,

    #[serde(default, skip_serializing_if = "LogContext::is_empty")]
    pub fields: LogContext,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_data: Option<ErrorData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_location: Option<CallSite>,

    pub message: String,
}

impl LogRecord {
    /// Create a record with no fields or error state
    pub fn new(level: LogLevel, call_site: CallSite, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            package: call_site.package,
            function: call_site.function,
            file: call_site.file,
            line: call_site.line,
            fields: LogContext::new(),
            error: None,
            error_data: None,
            error_location: None,
            message: message.into(),
        }
    }

    /// Where the record was emitted
    pub fn call_site(&self) -> CallSite {
        CallSite {
            package: self.package.clone(),
            function: self.function.clone(),
            file: self.file.clone(),
            line: self.line,
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize to pretty JSON string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parse from JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
