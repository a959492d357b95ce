//! Custom formatter example
//!
//! Demonstrates the built-in formatters, configuration from JSON and a
//! closure used as a formatter.
//!
//! Run with: cargo run --example custom_formatter

use rust_chain_logger::prelude::*;
use std::io;

fn main() -> Result<()> {
    println!("=== Rust Chain Logger - Custom Formatter Example ===\n");

    println!("1. logfmt:");
    let logfmt = Logger::with_formatter(io::stdout(), LogfmtFormatter::new(), "INFO");
    logfmt.with_field("port", 8080).info("listening");

    println!("\n2. Text with colors:");
    let text = Logger::with_formatter(
        io::stdout(),
        TextFormatter::new()
            .with_colors(true)
            .with_timestamp_format(TimestampFormat::Rfc3339),
        "INFO",
    );
    text.with_field("port", 8080).warn("listening on a privileged port");

    println!("\n3. Pretty JSON from a configuration document:");
    let config = LoggerConfig::from_json(r#"{"level": "debug", "pretty": true}"#)?;
    let pretty = Logger::from_config(&config, io::stdout())?;
    pretty.with_field("tags", vec!["a", "b"]).debug("configured");

    println!("\n4. A closure as formatter:");
    let compact = Logger::with_formatter(
        io::stdout(),
        |record: &LogRecord| -> Result<String> {
            Ok(format!(
                "{} {}:{} {}",
                record.level, record.file, record.line, record.message
            ))
        },
        "INFO",
    );
    compact.info("one line, no JSON");

    println!("\n5. A failing formatter writes a fixed notice instead:");
    let failing = Logger::with_formatter(
        io::stdout(),
        |_: &LogRecord| -> Result<String> { Err(LoggerError::formatter("demo", "refused")) },
        "INFO",
    );
    failing.error("never rendered");
    println!();
    println!("   format failures: {}", failing.metrics().format_failures());

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
