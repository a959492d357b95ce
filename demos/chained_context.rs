//! Chained context example
//!
//! Demonstrates `with_field` / `with_error` chains, branch isolation and the
//! formatting macros.
//!
//! Run with: cargo run --example chained_context

use rust_chain_logger::prelude::*;
use rust_chain_logger::{info, warn};
use std::io;

#[derive(Debug)]
struct PaymentError {
    cause: io::Error,
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "payment provider unavailable")
    }
}

impl std::error::Error for PaymentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

fn charge(log: &impl StructuredLog, amount: u64) -> std::result::Result<(), PaymentError> {
    log.with_field("amount", amount).debug("charging card");
    Err(PaymentError {
        cause: io::Error::new(io::ErrorKind::TimedOut, "upstream timed out"),
    })
}

fn main() -> Result<()> {
    println!("=== Rust Chain Logger - Chained Context Example ===\n");

    let logger = Logger::new(io::stdout(), "DEBUG");

    println!("1. Request-scoped context:");
    let request = logger
        .with_field("request_id", "r-8f2a")
        .with_field("user", "ada");
    request.info("request received");

    println!("\n2. Branches do not see each other's fields:");
    let cart = request.with_field("step", "cart");
    let checkout = request.with_field("step", "checkout");
    cart.info("items added");
    checkout.info("checkout started");
    request.info("request context unchanged");

    println!("\n3. Attaching an error records where it was attached:");
    if let Err(err) = charge(&checkout, 4200) {
        checkout.with_error(&err).error("charge failed");
    }

    println!("\n4. Formatting macros:");
    info!(request, "served in {}ms", 37);
    warn!(logger, "{} retries left", 2);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
