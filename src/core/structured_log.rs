//! The logging capability shared by `Logger` and `LogEntry`

use super::call_site::CallSite;
use super::log_context::FieldValue;
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use std::error::Error;

/// Field/error chaining plus the four level methods.
///
/// Both the root [`Logger`](crate::Logger) and every [`LogEntry`] derived from it
/// implement this trait, so code that only logs can accept `&impl StructuredLog`
/// without caring whether it was handed a root or a chain.
///
/// Chaining never mutates the receiver: each `with_*` call returns a new entry holding
/// a copy of the receiver's fields and error state.
///
/// Level methods are `#[track_caller]`: the record names the function, file and line
/// that called them.
///
/// # Example
///
/// ```
/// use rust_chain_logger::prelude::*;
///
/// let sink = BufferSink::new();
/// let logger = Logger::new(sink.clone(), "DEBUG");
///
/// let request = logger.with_field("request_id", "r-17");
/// request.with_field("status", 200).info("request served");
/// request.debug("request context only");
///
/// assert_eq!(sink.lines().len(), 2);
/// ```
pub trait StructuredLog {
    /// Chain step with `key` set to `value`, replacing any earlier value for `key`.
    fn with_field_value(&self, key: String, value: FieldValue) -> LogEntry;

    /// Chain step carrying `err` (or no error at all for `None`) and the location of
    /// this call as the error location.
    #[track_caller]
    fn with_optional_error(&self, err: Option<&dyn Error>) -> LogEntry;

    /// Minimum level of the logger that originated this chain.
    fn min_level(&self) -> LogLevel;

    /// Emit `message` at `level`, attributing it to the caller.
    ///
    /// Suppressed levels return before any call-site resolution or formatting.
    #[track_caller]
    fn log(&self, level: LogLevel, message: &str);

    /// Emit `message` at `level` with an explicitly supplied call site.
    fn log_at(&self, level: LogLevel, call_site: CallSite, message: &str);

    fn with_field<K, V>(&self, key: K, value: V) -> LogEntry
    where
        Self: Sized,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.with_field_value(key.into(), value.into())
    }

    #[track_caller]
    fn with_error(&self, err: &dyn Error) -> LogEntry {
        self.with_optional_error(Some(err))
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level()
    }

    #[track_caller]
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    #[track_caller]
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    #[track_caller]
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    #[track_caller]
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }
}
