//! Main logger implementation

use super::{
    call_site::{BacktraceResolver, CallSite, CallSiteResolver},
    config::LoggerConfig,
    error::{LoggerError, Result},
    formatter::Formatter,
    log_context::FieldValue,
    log_entry::LogEntry,
    log_level::LogLevel,
    log_record::LogRecord,
    metrics::LoggerMetrics,
    structured_log::StructuredLog,
};
use crate::formatters::JsonFormatter;
use parking_lot::Mutex;
use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe, Location};
use std::sync::Arc;

/// Written to the sink, without a trailing newline, in place of a record whose
/// formatter failed.
pub const FORMAT_FAILURE_NOTICE: &str = "error marshalling logEntry";

type Sink = Box<dyn Write + Send>;

/// State shared by a logger and every entry chained from it
///
/// Immutable after construction apart from the sink (serialized by its lock) and the
/// metric counters.
pub(crate) struct LoggerShared {
    min_level: LogLevel,
    sink: Mutex<Sink>,
    formatter: Box<dyn Formatter>,
    resolver: Box<dyn CallSiteResolver>,
    metrics: LoggerMetrics,
}

impl LoggerShared {
    pub(crate) fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Resolve a call site; a panicking resolver yields an unresolved site.
    pub(crate) fn resolve(&self, caller: &'static Location<'static>) -> CallSite {
        panic::catch_unwind(AssertUnwindSafe(|| self.resolver.resolve(caller)))
            .unwrap_or_else(|_| CallSite::unresolved(caller))
    }

    /// Format and write one record.
    ///
    /// A successful record is two sink writes (body, then newline) under one lock
    /// acquisition. Formatter errors and panics write [`FORMAT_FAILURE_NOTICE`] instead.
    /// Nothing here propagates to the caller.
    pub(crate) fn write_record(&self, record: &LogRecord) {
        let body = match panic::catch_unwind(AssertUnwindSafe(|| self.formatter.format(record))) {
            Ok(Ok(body)) => Some(body),
            Ok(Err(_)) | Err(_) => {
                self.metrics.record_format_failure();
                None
            }
        };

        let written = panic::catch_unwind(AssertUnwindSafe(|| -> io::Result<()> {
            let mut sink = self.sink.lock();
            match body.as_deref() {
                Some(body) => {
                    sink.write_all(body.as_bytes())?;
                    sink.write_all(b"\n")
                }
                None => sink.write_all(FORMAT_FAILURE_NOTICE.as_bytes()),
            }
        }));

        match written {
            Ok(Ok(())) => {
                if body.is_some() {
                    self.metrics.record_written();
                }
            }
            Ok(Err(e)) => {
                self.metrics.record_write_failure();
                eprintln!("[LOGGER ERROR] Failed to write log record: {}", e);
            }
            Err(_) => {
                self.metrics.record_write_failure();
                eprintln!("[LOGGER CRITICAL] Sink panicked while writing a log record");
            }
        }
    }
}

/// Root of every logging chain
///
/// Cloning is cheap and clones share the sink, formatter, level and metrics.
///
/// # Example
///
/// ```
/// use rust_chain_logger::prelude::*;
///
/// let sink = BufferSink::new();
/// let logger = Logger::new(sink.clone(), "WARN");
///
/// logger.info("x");
/// assert!(sink.is_empty());
///
/// logger.error("y");
/// let record = &sink.records().unwrap()[0];
/// assert_eq!(record.level, LogLevel::Error);
/// assert_eq!(record.message, "y");
/// ```
#[derive(Clone)]
pub struct Logger {
    shared: Arc<LoggerShared>,
}

impl Logger {
    /// JSON logger writing to `sink`; an unrecognized `level` selects INFO.
    #[must_use]
    pub fn new<W: Write + Send + 'static>(sink: W, level: &str) -> Self {
        Self::builder().sink(sink).level_str(level).build()
    }

    /// Logger writing to `sink` through `formatter`; an unrecognized `level` selects INFO.
    #[must_use]
    pub fn with_formatter<W, F>(sink: W, formatter: F, level: &str) -> Self
    where
        W: Write + Send + 'static,
        F: Formatter + 'static,
    {
        Self::builder()
            .sink(sink)
            .formatter(formatter)
            .level_str(level)
            .build()
    }

    /// Logger described by `config`, writing to `sink`
    pub fn from_config<W: Write + Send + 'static>(config: &LoggerConfig, sink: W) -> Result<Self> {
        config.validate()?;
        Ok(Self::builder()
            .sink(sink)
            .level_str(&config.level)
            .boxed_formatter(config.formatter())
            .build())
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn level(&self) -> LogLevel {
        self.shared.min_level
    }

    pub fn formatter_name(&self) -> &str {
        self.shared.formatter.name()
    }

    pub fn resolver_name(&self) -> &str {
        self.shared.resolver.name()
    }

    /// Counters for records written and failures
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.shared.metrics
    }

    pub fn flush(&self) -> Result<()> {
        self.shared
            .sink
            .lock()
            .flush()
            .map_err(|e| LoggerError::io_operation("flushing sink", "sink flush failed", e))
    }

    fn root_entry(&self) -> LogEntry {
        LogEntry::new(Arc::clone(&self.shared))
    }
}

impl StructuredLog for Logger {
    fn with_field_value(&self, key: String, value: FieldValue) -> LogEntry {
        self.root_entry().with_field_value(key, value)
    }

    #[track_caller]
    fn with_optional_error(&self, err: Option<&dyn Error>) -> LogEntry {
        self.root_entry().with_optional_error(err)
    }

    fn min_level(&self) -> LogLevel {
        self.shared.min_level
    }

    #[track_caller]
    fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        self.root_entry().log(level, message);
    }

    fn log_at(&self, level: LogLevel, call_site: CallSite, message: &str) {
        if !self.enabled(level) {
            return;
        }
        self.root_entry().log_at(level, call_site, message);
    }
}

impl Default for Logger {
    /// JSON logger at INFO that discards everything
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.shared.min_level)
            .field("formatter", &self.formatter_name())
            .field("resolver", &self.resolver_name())
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// Every part is optional: the sink defaults to discarding output, the formatter to
/// [`JsonFormatter`], the level to INFO and the resolver to [`BacktraceResolver`].
///
/// # Example
/// ```
/// use rust_chain_logger::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::Debug)
///     .sink(std::io::stdout())
///     .formatter(LogfmtFormatter::new())
///     .resolver(LocationResolver)
///     .build();
/// assert_eq!(logger.formatter_name(), "logfmt");
/// ```
pub struct LoggerBuilder {
    min_level: LogLevel,
    sink: Option<Sink>,
    formatter: Option<Box<dyn Formatter>>,
    resolver: Option<Box<dyn CallSiteResolver>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            sink: None,
            formatter: None,
            resolver: None,
        }
    }

    /// Set minimum log level
    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set minimum log level from its name; unrecognized names select INFO
    #[must_use = "builder methods return a new value"]
    pub fn level_str(mut self, level: &str) -> Self {
        self.min_level = LogLevel::parse_or_default(level);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn sink<W: Write + Send + 'static>(mut self, sink: W) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_formatter(mut self, formatter: Box<dyn Formatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn resolver<R: CallSiteResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            shared: Arc::new(LoggerShared {
                min_level: self.min_level,
                sink: Mutex::new(self.sink.unwrap_or_else(|| Box::new(io::sink()))),
                formatter: self
                    .formatter
                    .unwrap_or_else(|| Box::new(JsonFormatter::new())),
                resolver: self
                    .resolver
                    .unwrap_or_else(|| Box::new(BacktraceResolver::new())),
                metrics: LoggerMetrics::new(),
            }),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
