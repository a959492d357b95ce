//! Call-site attribution for log records
//!
//! Every record names the package, function, file and line of the logging call.
//! File and line come from `#[track_caller]`, so they are exact even when frames are
//! inlined. Package and function are recovered from a symbol path such as
//! `my_app::server::Server::run` by [`split_symbol`].
//!
//! Two resolvers are provided:
//! - [`BacktraceResolver`] (default) walks the live stack and matches the frame whose
//!   debug info points at the caller location.
//! - [`LocationResolver`] never walks the stack; it derives the package from the file
//!   path and reports the function as [`UNKNOWN`].
//!
//! The [`call_site!`](crate::call_site) macro supplies the whole call site explicitly
//! from the calling function's type name.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::panic::Location;
use std::path::Path;

/// Sentinel used for any call-site component that could not be resolved.
pub const UNKNOWN: &str = "unknown";

/// Package, function, file and line of a logging call (or of an error attachment).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallSite {
    pub package: String,
    pub function: String,
    pub file: String,
    pub line: u32,
}

impl CallSite {
    /// Build a call site from a fully qualified symbol path.
    pub fn from_symbol(symbol: &str, file: &str, line: u32) -> Self {
        let (package, function) = split_symbol(symbol);
        Self {
            package,
            function,
            file: file_basename(file).to_string(),
            line,
        }
    }

    /// Build a call site from the type name of a marker fn nested in the calling function.
    ///
    /// Used by [`call_site!`](crate::call_site); the marker's own name is dropped.
    pub fn from_fn_path(path: &str, file: &str, line: u32) -> Self {
        let enclosing = path.rsplit_once("::").map_or(path, |(head, _)| head);
        Self::from_symbol(enclosing, file, line)
    }

    /// A call site whose package and function could not be determined.
    pub fn unresolved(location: &Location<'_>) -> Self {
        Self {
            package: UNKNOWN.to_string(),
            function: UNKNOWN.to_string(),
            file: file_basename(location.file()).to_string(),
            line: location.line(),
        }
    }

    /// Whether package and function were both recovered.
    pub fn is_resolved(&self) -> bool {
        self.package != UNKNOWN && self.function != UNKNOWN
    }
}

/// Final path segment of a source path, for either separator style.
pub fn file_basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Split a symbol path into `(package, function)`.
///
/// The path is split on `::` outside angle brackets. Trailing closure segments stay
/// attached to their enclosing function. If the segment before the function is a
/// receiver (a type name starting with an uppercase letter, or a `<T as Trait>`
/// qualified path) it is folded into the function name; otherwise it belongs to the
/// package path.
///
/// ```
/// use rust_chain_logger::core::call_site::split_symbol;
///
/// assert_eq!(
///     split_symbol("my_app::server::Server::run"),
///     ("my_app::server".to_string(), "Server::run".to_string())
/// );
/// assert_eq!(
///     split_symbol("my_app::server::handle"),
///     ("my_app::server".to_string(), "handle".to_string())
/// );
/// ```
pub fn split_symbol(symbol: &str) -> (String, String) {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return (UNKNOWN.to_string(), UNKNOWN.to_string());
    }

    let segments = split_path(symbol);
    let mut start = segments.len() - 1;

    while start > 0 && is_anonymous(segments[start]) {
        start -= 1;
    }
    if start > 0 && is_receiver(segments[start - 1]) {
        start -= 1;
    }

    let function = segments[start..].join("::");
    let mut package = segments[..start].join("::");
    if package.is_empty() && segments[start].starts_with('<') {
        package = qualified_receiver_package(segments[start]);
    }

    (package, function)
}

fn split_path(path: &str) -> Vec<&str> {
    let bytes = path.as_bytes();
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'<' => depth += 1,
            // `->` inside fn pointer types does not close a bracket
            b'>' if i == 0 || bytes[i - 1] != b'-' => depth = depth.saturating_sub(1),
            b':' if depth == 0 && bytes.get(i + 1) == Some(&b':') => {
                segments.push(&path[start..i]);
                i += 2;
                start = i;
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    segments.push(&path[start..]);
    segments
}

fn is_anonymous(segment: &str) -> bool {
    segment.starts_with('{')
}

fn is_receiver(segment: &str) -> bool {
    segment.starts_with('<')
        || segment
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_uppercase())
}

/// Package of `<my_app::Foo as core::fmt::Display>`: the self type's module, falling
/// back to the trait's module for primitive self types.
fn qualified_receiver_package(segment: &str) -> String {
    let inner = segment
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(segment);
    let (self_ty, trait_path) = match inner.split_once(" as ") {
        Some((self_ty, trait_path)) => (self_ty, Some(trait_path)),
        None => (inner, None),
    };

    let module_of = |path: &str| {
        let path = path.trim_start_matches(['&', '*']).trim_start_matches("mut ");
        let segments = split_path(path);
        segments[..segments.len() - 1].join("::")
    };

    let package = module_of(self_ty);
    if package.is_empty() {
        trait_path.map(module_of).unwrap_or_default()
    } else {
        package
    }
}

/// Resolves the call site of a logging call from its source location.
///
/// Implementations must not panic and must not fabricate attribution: a component
/// that cannot be determined is reported as [`UNKNOWN`].
pub trait CallSiteResolver: Send + Sync {
    fn resolve(&self, caller: &'static Location<'static>) -> CallSite;

    fn name(&self) -> &str;
}

type LocationKey = (&'static str, u32, u32);

/// Stack-walking resolver backed by the `backtrace` crate.
///
/// The frame whose symbol file and line equal the caller location is used. When no
/// frame matches exactly (no debug info, coarse line tables) the call site is
/// [`CallSite::unresolved`].
/// Results are cached per location, so each call site is walked once.
#[derive(Debug, Default)]
pub struct BacktraceResolver {
    cache: RwLock<HashMap<LocationKey, CallSite>>,
}

impl BacktraceResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct call sites resolved so far.
    pub fn cached_sites(&self) -> usize {
        self.cache.read().len()
    }

    fn find_symbol(caller: &Location<'_>) -> Option<String> {
        let mut found: Option<String> = None;

        backtrace::trace(|frame| {
            backtrace::resolve_frame(frame, |symbol| {
                if found.is_some() {
                    return;
                }
                if !symbol_matches(symbol.filename(), symbol.lineno(), caller) {
                    return;
                }
                if let Some(name) = symbol.name() {
                    found = Some(format!("{:#}", name));
                }
            });
            found.is_none()
        });

        found
    }
}

/// Whether a resolved symbol sits exactly at `caller`.
///
/// Only an exact file and line match counts: a neighbouring line in the same file may
/// belong to a different function.
fn symbol_matches(file: Option<&Path>, line: Option<u32>, caller: &Location<'_>) -> bool {
    match (file, line) {
        (Some(file), Some(line)) => line == caller.line() && file.ends_with(caller.file()),
        _ => false,
    }
}

impl CallSiteResolver for BacktraceResolver {
    fn resolve(&self, caller: &'static Location<'static>) -> CallSite {
        let key = (caller.file(), caller.line(), caller.column());
        if let Some(site) = self.cache.read().get(&key) {
            return site.clone();
        }

        let site = match Self::find_symbol(caller) {
            Some(symbol) => CallSite::from_symbol(&symbol, caller.file(), caller.line()),
            None => CallSite::unresolved(caller),
        };
        self.cache.write().insert(key, site.clone());
        site
    }

    fn name(&self) -> &str {
        "backtrace"
    }
}

/// Resolver that uses only the caller location.
///
/// The package is the directory of the source file with `::` separators
/// (`src/net/client.rs` gives `src::net`); the function is [`UNKNOWN`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LocationResolver;

impl CallSiteResolver for LocationResolver {
    fn resolve(&self, caller: &'static Location<'static>) -> CallSite {
        let file = caller.file();
        let directory = file
            .rsplit_once(['/', '\\'])
            .map_or("", |(dir, _)| dir);
        let package = directory
            .split(['/', '\\'])
            .filter(|part| !part.is_empty() && *part != ".")
            .collect::<Vec<_>>()
            .join("::");

        CallSite {
            package: if package.is_empty() {
                UNKNOWN.to_string()
            } else {
                package
            },
            function: UNKNOWN.to_string(),
            file: file_basename(file).to_string(),
            line: caller.line(),
        }
    }

    fn name(&self) -> &str {
        "location"
    }
}
