//! Integration tests for the chain logger
//!
//! These tests verify:
//! - Level suppression and the JSON record shape
//! - Chained field and error context
//! - Formatter failure handling
//! - Call-site attribution
//! - Thread safety with a shared sink

use rust_chain_logger::prelude::*;
use rust_chain_logger::{error, info, FORMAT_FAILURE_NOTICE, UNKNOWN};
use serde_json::{json, Value};
use std::fmt;
use std::fs;
use std::io;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn raw_lines(sink: &BufferSink) -> Vec<Value> {
    sink.lines()
        .iter()
        .map(|line| serde_json::from_str(line).expect("record is valid JSON"))
        .collect()
}

#[test]
fn test_warn_logger_suppresses_info() {
    let sink = BufferSink::new();
    let logger = Logger::new(sink.clone(), "WARN");

    logger.info("x");
    assert!(sink.is_empty());

    logger.error("y");
    let lines = raw_lines(&sink);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["level"], "ERROR");
    assert_eq!(lines[0]["message"], "y");
    assert!(lines[0].get("fields").is_none());
    assert!(lines[0].get("error").is_none());
    assert!(lines[0].get("errorData").is_none());
    assert!(lines[0].get("errorLocation").is_none());
}

#[test]
fn test_chained_fields_at_debug() {
    let sink = BufferSink::new();
    let logger = Logger::new(sink.clone(), "DEBUG");

    logger.with_field("k", "v").with_field("k2", 2).debug("m");

    let lines = raw_lines(&sink);
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["fields"], json!({"k": "v", "k2": 2}));
    assert_eq!(lines[0]["level"], "DEBUG");
    assert!(sink.contents().ends_with("\n"));
}

#[test]
fn test_record_carries_every_required_key() {
    let sink = BufferSink::new();
    let logger = Logger::new(sink.clone(), "INFO");

    logger.info("shape");

    let line = &raw_lines(&sink)[0];
    for key in ["timestamp", "level", "package", "function", "file", "line", "message"] {
        assert!(line.get(key).is_some(), "missing key {}", key);
    }
    assert_eq!(line["file"], "integration_tests.rs");
}

#[test]
fn test_field_immutability_and_overwrite() {
    let sink = BufferSink::new();
    let logger = Logger::new(sink.clone(), "DEBUG");

    let e1 = logger.with_field("a", 1);
    let e2 = e1.with_field("b", 2);
    e1.info("first");
    e2.info("second");
    logger.with_field("a", 1).with_field("a", 2).info("third");

    let records = sink.records().unwrap();
    assert_eq!(records[0].fields.len(), 1);
    assert_eq!(records[1].fields.len(), 2);
    assert_eq!(records[1].fields.get("b"), Some(&FieldValue::Int(2)));
    assert_eq!(records[2].fields.len(), 1);
    assert_eq!(records[2].fields.get("a"), Some(&FieldValue::Int(2)));
}

#[derive(Debug)]
struct QueryError {
    cause: io::Error,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "query failed")
    }
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

#[test]
fn test_error_attachment() {
    let sink = BufferSink::new();
    let logger = Logger::new(sink.clone(), "INFO");
    let err = QueryError {
        cause: io::Error::new(io::ErrorKind::TimedOut, "connection timed out"),
    };

    let (entry, line) = (logger.with_error(&err), line!());
    entry.with_field("table", "users").error("lookup");

    let record = &sink.records().unwrap()[0];
    assert_eq!(record.error.as_deref(), Some("query failed"));

    let data = record.error_data.as_ref().unwrap();
    assert_eq!(data.message, err.to_string());
    assert_eq!(data.sources, vec!["connection timed out".to_string()]);

    let location = record.error_location.as_ref().unwrap();
    assert_eq!(location.file, "integration_tests.rs");
    assert_eq!(location.line, line);
}

#[test]
fn test_absent_error_still_chains() {
    let sink = BufferSink::new();
    let logger = Logger::new(sink.clone(), "INFO");

    logger.with_optional_error(None).info("no error");

    let line = &raw_lines(&sink)[0];
    assert!(line.get("error").is_none());
    assert!(line.get("errorData").is_none());
    assert!(line.get("errorLocation").is_some());
}

#[test]
fn test_round_trip_preserves_record() {
    let sink = BufferSink::new();
    let logger = Logger::new(sink.clone(), "DEBUG");

    logger
        .with_field("user", "ada")
        .with_field("ratio", 0.25)
        .with_field("tags", vec!["a", "b"])
        .with_error(&io::Error::other("boom"))
        .warn("round trip");

    let line = sink.lines().remove(0);
    let record = LogRecord::from_json(&line).unwrap();
    let original: Value = serde_json::from_str(&line).unwrap();
    assert_eq!(serde_json::to_value(&record).unwrap(), original);
    assert_eq!(record.fields.get("ratio"), Some(&FieldValue::Float(0.25)));
}

#[test]
fn test_failing_formatter_writes_only_notice() {
    let sink = BufferSink::new();
    let formatter = |_: &LogRecord| -> Result<String> {
        Err(LoggerError::formatter("broken", "cannot encode"))
    };
    let logger = Logger::with_formatter(sink.clone(), formatter, "DEBUG");

    logger.with_field("k", "v").info("lost");

    assert_eq!(sink.contents(), FORMAT_FAILURE_NOTICE);
    assert_eq!(logger.metrics().format_failures(), 1);
}

#[test]
fn test_non_finite_float_field_writes_only_notice() {
    for value in [f64::NAN, f64::INFINITY] {
        let sink = BufferSink::new();
        let logger = Logger::new(sink.clone(), "INFO");

        logger.with_field("ratio", value).info("ratio computed");

        assert_eq!(sink.contents(), FORMAT_FAILURE_NOTICE);
        assert_eq!(logger.metrics().format_failures(), 1);
    }
}

#[test]
fn test_closure_formatter() {
    let sink = BufferSink::new();
    let formatter = |record: &LogRecord| -> Result<String> {
        Ok(format!("{} {}", record.level, record.message))
    };
    let logger = Logger::with_formatter(sink.clone(), formatter, "INFO");

    logger.warn("disk at 91%");
    assert_eq!(sink.contents(), "WARN disk at 91%\n");
    assert_eq!(logger.formatter_name(), "custom");
}

#[test]
fn test_logfmt_from_config() {
    let sink = BufferSink::new();
    let config = LoggerConfig::from_json(r#"{"level": "info", "format": "logfmt"}"#).unwrap();
    let logger = Logger::from_config(&config, sink.clone()).unwrap();

    logger.with_field("port", 8080).info("listening");

    let line = sink.lines().remove(0);
    assert!(line.contains("level=INFO"));
    assert!(line.contains("message=\"listening\""));
    assert!(line.ends_with("port=8080"));
}

#[test]
fn test_location_resolver_attribution() {
    let sink = BufferSink::new();
    let logger = Logger::builder()
        .sink(sink.clone())
        .resolver(LocationResolver)
        .build();

    let line = line!() + 1;
    logger.info("located");

    let record = &sink.records().unwrap()[0];
    assert_eq!(record.package, "tests");
    assert_eq!(record.function, UNKNOWN);
    assert_eq!(record.file, "integration_tests.rs");
    assert_eq!(record.line, line);
}

#[test]
fn test_backtrace_resolver_attribution() {
    let sink = BufferSink::new();
    let logger = Logger::new(sink.clone(), "INFO");

    let line = line!() + 1;
    logger.info("walked");

    let record = &sink.records().unwrap()[0];
    assert_eq!(record.line, line);
    assert_eq!(record.file, "integration_tests.rs");
    // Symbol names need debug info; without it the site degrades to the sentinel
    if record.call_site().is_resolved() {
        assert_eq!(record.package, "integration_tests");
        assert_eq!(record.function, "test_backtrace_resolver_attribution");
    } else {
        assert_eq!(record.function, UNKNOWN);
    }
}

#[test]
fn test_macros_attribute_enclosing_function() {
    let sink = BufferSink::new();
    let logger = Logger::new(sink.clone(), "INFO");

    info!(logger, "user {} signed in", 42);
    error!(logger.with_field("retry", false), "giving up after {} attempts", 3);

    let records = sink.records().unwrap();
    assert_eq!(records[0].message, "user 42 signed in");
    assert_eq!(records[0].package, "integration_tests");
    assert_eq!(records[0].function, "test_macros_attribute_enclosing_function");
    assert_eq!(records[1].level, LogLevel::Error);
    assert_eq!(records[1].fields.get("retry"), Some(&FieldValue::Bool(false)));
}

#[test]
fn test_file_sink() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");
    let file = fs::File::create(&log_file).expect("Failed to create log file");

    let logger = Logger::new(file, "DEBUG");
    for i in 0..5 {
        logger.with_field("seq", i).debug("tick");
    }
    logger.flush().expect("Failed to flush");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let records: Vec<LogRecord> = content
        .lines()
        .map(|line| LogRecord::from_json(line).unwrap())
        .collect();
    assert_eq!(records.len(), 5);
    assert_eq!(records[4].fields.get("seq"), Some(&FieldValue::Int(4)));
}

#[test]
fn test_concurrent_logging_keeps_records_whole() {
    let sink = BufferSink::new();
    let logger = Arc::new(Logger::new(sink.clone(), "INFO"));
    let threads = 8;
    let per_thread = 200;

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                let entry = logger.with_field("thread", t);
                for i in 0..per_thread {
                    entry.with_field("i", i).info("concurrent");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("logging thread panicked");
    }

    let records = sink.records().expect("every line is a whole record");
    assert_eq!(records.len(), threads * per_thread);
    assert_eq!(logger.metrics().records_written(), (threads * per_thread) as u64);
}
