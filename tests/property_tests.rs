//! Property-based tests for rust_chain_logger using proptest

use proptest::prelude::*;
use rust_chain_logger::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Debug),
        Just(LogLevel::Info),
        Just(LogLevel::Warn),
        Just(LogLevel::Error),
    ]
}

struct CountingFormatter(Arc<AtomicUsize>);

impl Formatter for CountingFormatter {
    fn format(&self, record: &LogRecord) -> Result<String> {
        self.0.fetch_add(1, Ordering::Relaxed);
        Ok(record.message.clone())
    }
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Level names parse back to the same level in any letter case
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), lower in any::<bool>()) {
        let name = if lower {
            level.to_str().to_lowercase()
        } else {
            level.to_str().to_string()
        };
        let parsed: LogLevel = name.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Anything that is not a level name selects INFO
    #[test]
    fn test_unknown_level_defaults_to_info(name in "[a-z]{6,12}") {
        prop_assume!(name.parse::<LogLevel>().is_err());
        prop_assert_eq!(LogLevel::parse_or_default(&name), LogLevel::Info);
    }

    /// Ordering follows the discriminants
    #[test]
    fn test_log_level_ordering(a in any_level(), b in any_level()) {
        prop_assert_eq!(a <= b, (a as u8) <= (b as u8));
    }
}

// ============================================================================
// Suppression Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A call below the minimum level reaches neither the formatter nor the sink
    #[test]
    fn test_level_gate(min in any_level(), level in any_level(), message in ".{0,40}") {
        let calls = Arc::new(AtomicUsize::new(0));
        let sink = BufferSink::new();
        let logger = Logger::builder()
            .min_level(min)
            .sink(sink.clone())
            .formatter(CountingFormatter(Arc::clone(&calls)))
            .resolver(LocationResolver)
            .build();

        logger.with_field("k", 1).log(level, &message);

        let expected = usize::from(level >= min);
        prop_assert_eq!(calls.load(Ordering::Relaxed), expected);
        prop_assert_eq!(sink.write_count(), expected * 2);
    }
}

// ============================================================================
// Chain Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Extending a chain never changes the entries it was built from
    #[test]
    fn test_chain_isolation(
        keys in prop::collection::vec("[a-z]{1,6}", 1..8),
        extra in "[A-Z]{1,6}",
    ) {
        let logger = Logger::default();
        let mut chain = vec![logger.with_field(keys[0].clone(), 0)];
        for (i, key) in keys.iter().enumerate().skip(1) {
            let next = chain[i - 1].with_field(key.clone(), i as i64);
            chain.push(next);
        }

        let before: Vec<_> = chain.iter().map(|entry| entry.fields().clone()).collect();
        for entry in &chain {
            let _ = entry.with_field(extra.clone(), "x");
        }
        let after: Vec<_> = chain.iter().map(|entry| entry.fields().clone()).collect();
        prop_assert_eq!(before, after);
    }

    /// The last write to a key wins
    #[test]
    fn test_overwrite(key in "[a-z]{1,8}", values in prop::collection::vec(any::<i64>(), 1..6)) {
        let logger = Logger::default();
        let mut entry = logger.with_field(key.clone(), values[0]);
        for value in &values[1..] {
            entry = entry.with_field(key.clone(), *value);
        }

        prop_assert_eq!(entry.fields().len(), 1);
        prop_assert_eq!(entry.fields().get(&key), Some(&FieldValue::Int(values[values.len() - 1])));
    }

    /// String field values survive the JSON encoding
    #[test]
    fn test_json_preserves_string_fields(value in ".*", message in ".*") {
        let sink = BufferSink::new();
        let logger = Logger::new(sink.clone(), "DEBUG");

        logger.with_field("value", value.clone()).info(&message);

        let records = sink.records().unwrap();
        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(&records[0].message, &message);
        prop_assert_eq!(records[0].fields.get("value"), Some(&FieldValue::String(value)));
    }
}
