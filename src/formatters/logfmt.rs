//! Logfmt formatter (key=value pairs)

use crate::core::{FieldValue, Formatter, LogRecord, LoggerError, Result, TimestampFormat};

/// Renders records as `key=value` pairs, compatible with log aggregation tools
///
/// Example: `timestamp=2025-01-08T10:30:45.123Z level=INFO package=my_app function=main file=main.rs line=3 message="started" port=8080`
///
/// Field keys are reduced to alphanumerics, `_` and `-`; a key with nothing left after
/// that is a formatting error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogfmtFormatter {
    timestamp_format: TimestampFormat,
}

impl LogfmtFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// Escape a logfmt key (remove spaces and special chars)
    fn escape_key(key: &str) -> Result<String> {
        let escaped: String = key
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-')
            .collect();
        if escaped.is_empty() {
            return Err(LoggerError::formatter(
                "logfmt",
                format!("field key '{}' has no usable characters", key),
            ));
        }
        Ok(escaped)
    }

    /// Escape a logfmt value (quote if contains spaces)
    fn escape_value(value: &str) -> String {
        if value.is_empty() || value.contains([' ', '"', '=']) {
            Self::quote_value(value)
        } else {
            value.to_string()
        }
    }

    fn quote_value(value: &str) -> String {
        format!(
            "\"{}\"",
            value
                .replace('\\', "\\\\")
                .replace('"', "\\\"")
                .replace('\n', "\\n")
        )
    }

    fn field_value(value: &FieldValue) -> String {
        match value {
            FieldValue::String(s) => Self::quote_value(s),
            FieldValue::List(_) | FieldValue::Map(_) => Self::quote_value(&value.to_string()),
            other => other.to_string(),
        }
    }
}

impl Formatter for LogfmtFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        let mut parts = vec![
            format!(
                "timestamp={}",
                Self::escape_value(&self.timestamp_format.format(&record.timestamp))
            ),
            format!("level={}", record.level),
            format!("package={}", Self::escape_value(&record.package)),
            format!("function={}", Self::escape_value(&record.function)),
            format!("file={}", Self::escape_value(&record.file)),
            format!("line={}", record.line),
            format!("message={}", Self::quote_value(&record.message)),
        ];

        if let Some(ref error) = record.error {
            parts.push(format!("error={}", Self::quote_value(error)));
        }
        if let Some(ref location) = record.error_location {
            parts.push(format!(
                "error_location={}",
                Self::escape_value(&format!(
                    "{}::{}@{}:{}",
                    location.package, location.function, location.file, location.line
                ))
            ));
        }

        for (key, value) in record.fields.sorted() {
            parts.push(format!("{}={}", Self::escape_key(key)?, Self::field_value(value)));
        }

        Ok(parts.join(" "))
    }

    fn name(&self) -> &str {
        "logfmt"
    }
}
