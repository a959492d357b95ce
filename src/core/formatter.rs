//! Formatter trait: turns a finalized record into its textual form

use super::{error::Result, log_record::LogRecord};

/// Serializes a populated record.
///
/// Implementations must be pure with respect to the logger: an `Err` (or a panic)
/// makes the logger write its fixed fallback notice instead of the record.
pub trait Formatter: Send + Sync {
    fn format(&self, record: &LogRecord) -> Result<String>;

    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Formatter for F
where
    F: Fn(&LogRecord) -> Result<String> + Send + Sync,
{
    fn format(&self, record: &LogRecord) -> Result<String> {
        self(record)
    }
}
