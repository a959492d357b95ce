//! Basic logger usage example
//!
//! Demonstrates JSON logging to stdout at different levels.
//!
//! Run with: cargo run --example basic_usage

use rust_chain_logger::prelude::*;
use std::io;

fn main() -> Result<()> {
    println!("=== Rust Chain Logger - Basic Usage Example ===\n");

    // JSON records on stdout, everything from DEBUG up
    let logger = Logger::new(io::stdout(), "DEBUG");

    println!("1. Logging at different levels:");
    logger.debug("This is a debug message");
    logger.info("This is an info message");
    logger.warn("This is a warning message");
    logger.error("This is an error message");

    println!("\n2. A WARN logger hides debug and info:");
    let quiet = Logger::new(io::stdout(), "WARN");
    quiet.debug("Debug message (hidden)");
    quiet.info("Info message (hidden)");
    quiet.warn("Warning message (visible)");

    println!("\n3. Unrecognized level names fall back to INFO:");
    let fallback = Logger::new(io::stdout(), "chatty");
    println!("   level = {}", fallback.level());
    fallback.debug("Debug message (hidden)");
    fallback.info("Info message (visible)");

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
