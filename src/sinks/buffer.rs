//! In-memory shared buffer sink

use crate::core::{LogRecord, Result};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

#[derive(Debug, Default)]
struct BufferState {
    bytes: Vec<u8>,
    writes: usize,
}

/// Cloneable in-memory sink
///
/// Clones share one buffer, so a clone can be handed to a logger while the original is
/// kept for inspection. Every `write` call is counted.
#[derive(Debug, Clone, Default)]
pub struct BufferSink {
    state: Arc<Mutex<BufferState>>,
}

impl BufferSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.state.lock().bytes).into_owned()
    }

    /// Newline-terminated lines written so far
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Parse every line as a JSON record
    pub fn records(&self) -> Result<Vec<LogRecord>> {
        self.lines()
            .iter()
            .map(|line| LogRecord::from_json(line).map_err(Into::into))
            .collect()
    }

    /// Number of `write` calls received
    pub fn write_count(&self) -> usize {
        self.state.lock().writes
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().bytes.is_empty()
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.bytes.clear();
        state.writes = 0;
    }
}

impl Write for BufferSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock();
        state.bytes.extend_from_slice(buf);
        state.writes += 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let sink = BufferSink::new();
        let mut writer = sink.clone();

        writer.write_all(b"first\n").unwrap();
        writer.write_all(b"second\n").unwrap();

        assert_eq!(sink.lines(), vec!["first", "second"]);
        assert_eq!(sink.write_count(), 2);
    }

    #[test]
    fn test_clear() {
        let sink = BufferSink::new();
        sink.clone().write_all(b"x").unwrap();
        sink.clear();

        assert!(sink.is_empty());
        assert_eq!(sink.write_count(), 0);
    }

    #[test]
    fn test_records_rejects_non_json() {
        let sink = BufferSink::new();
        sink.clone().write_all(b"not json\n").unwrap();
        assert!(sink.records().is_err());
    }
}
