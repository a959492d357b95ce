//! Human-readable text formatter

use crate::core::{Formatter, LogRecord, Result, TimestampFormat};
#[cfg(feature = "console")]
use colored::Colorize;

/// Renders records as one readable line
///
/// Example: `[2025-01-08T10:30:45.123Z] [INFO ] my_app::server Server::run (server.rs:42) - listening port=8080`
///
/// An attached error is appended as `error="..."` after the fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFormatter {
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl TextFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Color the level column with ANSI escapes (needs the `console` feature)
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn level_column(&self, record: &LogRecord) -> String {
        let level = format!("{:5}", record.level.to_str());
        #[cfg(feature = "console")]
        let level = if self.use_colors {
            level.color(record.level.color_code()).to_string()
        } else {
            level
        };
        level
    }

    pub fn uses_colors(&self) -> bool {
        self.use_colors
    }
}

impl Formatter for TextFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        let mut line = format!(
            "[{}] [{}] {} {} ({}:{}) - {}",
            self.timestamp_format.format(&record.timestamp),
            self.level_column(record),
            record.package,
            record.function,
            record.file,
            record.line,
            record.message
        );

        if !record.fields.is_empty() {
            line.push(' ');
            line.push_str(&record.fields.format_fields());
        }
        if let Some(ref error) = record.error {
            line.push_str(&format!(" error={:?}", error));
        }

        Ok(line)
    }

    fn name(&self) -> &str {
        "text"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CallSite, LogContext, LogLevel};

    fn record() -> LogRecord {
        let site = CallSite {
            package: "my_app::server".to_string(),
            function: "Server::run".to_string(),
            file: "server.rs".to_string(),
            line: 42,
        };
        LogRecord::new(LogLevel::Info, site, "listening")
    }

    #[test]
    fn test_text_format() {
        let output = TextFormatter::new().format(&record()).unwrap();
        assert!(output.contains("[INFO ]"));
        assert!(output.ends_with("my_app::server Server::run (server.rs:42) - listening"));
    }

    #[test]
    fn test_text_format_with_fields_and_error() {
        let mut record = record();
        record.fields = LogContext::new().with_field("port", 8080);
        record.error = Some("address in use".to_string());

        let output = TextFormatter::new().format(&record).unwrap();
        assert!(output.ends_with("- listening port=8080 error=\"address in use\""));
    }

    #[test]
    fn test_text_custom_timestamp() {
        let formatter =
            TextFormatter::new().with_timestamp_format(TimestampFormat::Custom("%Y".to_string()));
        let output = formatter.format(&record()).unwrap();
        assert!(output.starts_with(&format!("[{}]", record().timestamp.format("%Y"))));
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_colors_only_touch_level() {
        assert!(!TextFormatter::new().uses_colors());
        let formatter = TextFormatter::new().with_colors(true);
        assert!(formatter.uses_colors());

        colored::control::set_override(true);
        let output = formatter.format(&record()).unwrap();
        colored::control::unset_override();

        assert!(output.contains("\u{1b}["));
        assert!(output.ends_with("- listening"));
    }
}
