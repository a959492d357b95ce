//! JSON formatter, the default record format

use crate::core::{Formatter, LogRecord, Result};

/// Serializes each record as one JSON object
///
/// Keys follow the record shape (`timestamp`, `level`, `package`, `function`, `file`,
/// `line`, `fields`, `error`, `errorData`, `errorLocation`, `message`), with the
/// optional ones omitted when empty. Pretty mode spreads a record over several lines
/// and is meant for local debugging only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Create a JSON formatter with pretty printing
    #[must_use]
    pub fn new_pretty() -> Self {
        Self { pretty: true }
    }

    pub fn is_pretty(&self) -> bool {
        self.pretty
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        let json = if self.pretty {
            record.to_json_pretty()?
        } else {
            record.to_json()?
        };
        Ok(json)
    }

    fn name(&self) -> &str {
        "json"
    }
}
