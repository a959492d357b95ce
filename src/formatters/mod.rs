//! Formatter implementations

pub mod json;
pub mod logfmt;
pub mod text;

pub use json::JsonFormatter;
pub use logfmt::LogfmtFormatter;
pub use text::TextFormatter;

// Re-export the trait for convenience
pub use crate::core::Formatter;
