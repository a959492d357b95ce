//! # Rust Chain Logger
//!
//! A small structured logger that writes one record per line to any
//! [`std::io::Write`] sink.
//!
//! ## Features
//!
//! - **Leveled**: DEBUG < INFO < WARN < ERROR, with suppressed levels costing only a comparison
//! - **Chained context**: `with_field` / `with_error` return new immutable entries
//! - **Call-site attribution**: package, function, file and line of every logging call
//! - **Pluggable output**: JSON by default, logfmt and text built in, or any [`Formatter`]
//!
//! ## Example
//!
//! ```
//! use rust_chain_logger::prelude::*;
//!
//! let sink = BufferSink::new();
//! let logger = Logger::new(sink.clone(), "DEBUG");
//!
//! logger
//!     .with_field("user", "ada")
//!     .with_field("attempt", 2)
//!     .warn("login slow");
//!
//! let record = &sink.records().unwrap()[0];
//! assert_eq!(record.level, LogLevel::Warn);
//! assert_eq!(record.fields.len(), 2);
//! ```

pub mod core;
pub mod formatters;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        BacktraceResolver, CallSite, CallSiteResolver, ErrorData, FieldValue, Formatter,
        LocationResolver, LogContext, LogEntry, LogLevel, LogRecord, Logger, LoggerBuilder,
        LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, Result, StructuredLog,
        TimestampFormat,
    };
    pub use crate::formatters::{JsonFormatter, LogfmtFormatter, TextFormatter};
    pub use crate::sinks::BufferSink;
}

pub use crate::core::{
    BacktraceResolver, CallSite, CallSiteResolver, ErrorData, FieldValue, Formatter,
    LocationResolver, LogContext, LogEntry, LogLevel, LogRecord, Logger, LoggerBuilder,
    LoggerConfig, LoggerError, LoggerMetrics, OutputFormat, Result, StructuredLog,
    TimestampFormat, FORMAT_FAILURE_NOTICE, UNKNOWN,
};
pub use crate::formatters::{JsonFormatter, LogfmtFormatter, TextFormatter};
pub use crate::sinks::BufferSink;
