//! Chained log entries
//!
//! A `LogEntry` is one step of a `with_field`/`with_error` chain. It owns a private copy
//! of the accumulated fields and error state, so sibling chains built from the same
//! parent never observe each other.

use super::call_site::CallSite;
use super::log_context::{FieldValue, LogContext};
use super::log_level::LogLevel;
use super::log_record::{ErrorData, LogRecord};
use super::logger::LoggerShared;
use super::structured_log::StructuredLog;
use chrono::Utc;
use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

#[derive(Clone)]
pub struct LogEntry {
    /// Configuration of the logger that started the chain (read-only)
    shared: Arc<LoggerShared>,
    context: LogContext,
    error: Option<String>,
    error_data: Option<ErrorData>,
    error_location: Option<CallSite>,
}

impl LogEntry {
    pub(crate) fn new(shared: Arc<LoggerShared>) -> Self {
        Self {
            shared,
            context: LogContext::new(),
            error: None,
            error_data: None,
            error_location: None,
        }
    }

    /// Fields accumulated along the chain
    pub fn fields(&self) -> &LogContext {
        &self.context
    }

    /// Display text of the attached error
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn error_data(&self) -> Option<&ErrorData> {
        self.error_data.as_ref()
    }

    /// Where `with_error` was called
    pub fn error_location(&self) -> Option<&CallSite> {
        self.error_location.as_ref()
    }

    /// Build the record this entry would emit at `level`.
    ///
    /// Timestamp, level, call site and message are stamped here and nowhere else.
    pub fn finalize(&self, level: LogLevel, call_site: CallSite, message: &str) -> LogRecord {
        LogRecord {
            timestamp: Utc::now(),
            level,
            package: call_site.package,
            function: call_site.function,
            file: call_site.file,
            line: call_site.line,
            fields: self.context.clone(),
            error: self.error.clone(),
            error_data: self.error_data.clone(),
            error_location: self.error_location.clone(),
            message: message.to_string(),
        }
    }

    fn emit(&self, level: LogLevel, call_site: CallSite, message: &str) {
        let record = self.finalize(level, call_site, message);
        self.shared.write_record(&record);
    }
}

impl StructuredLog for LogEntry {
    fn with_field_value(&self, key: String, value: FieldValue) -> LogEntry {
        let mut next = self.clone();
        next.context.add_field(key, value);
        next
    }

    #[track_caller]
    fn with_optional_error(&self, err: Option<&dyn Error>) -> LogEntry {
        let mut next = self.clone();
        next.error = err.map(|e| e.to_string());
        next.error_data = err.map(ErrorData::from_error);
        next.error_location = Some(self.shared.resolve(Location::caller()));
        next
    }

    fn min_level(&self) -> LogLevel {
        self.shared.min_level()
    }

    #[track_caller]
    fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        let call_site = self.shared.resolve(Location::caller());
        self.emit(level, call_site, message);
    }

    fn log_at(&self, level: LogLevel, call_site: CallSite, message: &str) {
        if !self.enabled(level) {
            return;
        }
        self.emit(level, call_site, message);
    }
}

impl fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEntry")
            .field("min_level", &self.shared.min_level())
            .field("fields", &self.context)
            .field("error", &self.error)
            .field("error_location", &self.error_location)
            .finish()
    }
}
