//! Sink helpers
//!
//! Any `std::io::Write + Send` value is a sink (`std::io::stdout()`, a `File`, a
//! socket). This module adds sinks the standard library does not provide.

pub mod buffer;

pub use buffer::BufferSink;
