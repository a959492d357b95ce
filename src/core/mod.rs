//! Core logger types and traits

pub mod call_site;
pub mod config;
pub mod error;
pub mod formatter;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod log_record;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod structured_log;
pub mod timestamp;

pub use call_site::{BacktraceResolver, CallSite, CallSiteResolver, LocationResolver, UNKNOWN};
pub use config::LoggerConfig;
pub use error::{LoggerError, Result};
pub use formatter::Formatter;
pub use log_context::{FieldValue, LogContext};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use log_record::{ErrorData, LogRecord};
pub use logger::{Logger, LoggerBuilder, FORMAT_FAILURE_NOTICE};
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use structured_log::StructuredLog;
pub use timestamp::TimestampFormat;
