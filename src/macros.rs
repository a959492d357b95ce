//! Logging macros with `format!`-style arguments.
//!
//! The macros capture the call site at expansion time with [`call_site!`], so records
//! carry the enclosing function even when the binary has no debug info. Arguments are
//! only formatted when the level is enabled.
//!
//! # Examples
//!
//! ```
//! use rust_chain_logger::prelude::*;
//! use rust_chain_logger::info;
//!
//! let sink = BufferSink::new();
//! let logger = Logger::new(sink.clone(), "INFO");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! info!(logger.with_field("port", port), "ready");
//!
//! assert_eq!(sink.lines().len(), 2);
//! ```

/// The [`CallSite`](crate::CallSite) of the expansion point.
///
/// Package and function come from the enclosing function's path; closures are
/// attributed to the function that defines them.
///
/// ```
/// use rust_chain_logger::call_site;
///
/// fn handler() -> rust_chain_logger::CallSite {
///     call_site!()
/// }
///
/// let site = handler();
/// assert!(site.function.ends_with("handler"));
/// assert!(site.line > 0);
/// ```
#[macro_export]
macro_rules! call_site {
    () => {{
        fn __call_site() {}
        $crate::CallSite::from_fn_path(
            ::std::any::type_name_of_val(&__call_site),
            ::std::file!(),
            ::std::line!(),
        )
    }};
}

/// Log a formatted message at `level` on a logger or entry.
///
/// # Examples
///
/// ```
/// # use rust_chain_logger::prelude::*;
/// # let logger = Logger::default();
/// use rust_chain_logger::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::StructuredLog as _;
        let __logger = &$logger;
        let __level = $level;
        if __logger.enabled(__level) {
            __logger.log_at(__level, $crate::call_site!(), &::std::format!($($arg)+));
        }
    }};
}

/// Log a debug-level message.
///
/// ```
/// # use rust_chain_logger::prelude::*;
/// # let logger = Logger::default();
/// use rust_chain_logger::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
///
/// ```
/// # use rust_chain_logger::prelude::*;
/// # let logger = Logger::default();
/// use rust_chain_logger::error;
/// let err = std::io::Error::other("disk full");
/// error!(logger.with_error(&err), "Unable to save {}", "report.csv");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
