//! Log sinks.

use std::sync::{Arc, Mutex};

use crate::logging::LogEntry;

/// Destination for rendered log entries.
pub trait LogSink: Send + Sync {
    /// Write one entry. `rendered` is the entry in the logger's format.
    fn write(&self, entry: &LogEntry, rendered: &str);
}

/// Writes to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write(&self, _entry: &LogEntry, rendered: &str) {
        eprintln!("{}", rendered);
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn write(&self, _entry: &LogEntry, _rendered: &str) {}
}

/// Collects entries in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<(LogEntry, String)>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries written so far.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().iter().map(|(entry, _)| entry.clone()).collect()
    }

    /// Rendered lines written so far.
    pub fn rendered(&self) -> Vec<String> {
        self.lock().iter().map(|(_, line)| line.clone()).collect()
    }

    /// Whether any entry's message contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.lock().iter().any(|(entry, _)| entry.message.contains(needle))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(LogEntry, String)>> {
        // A panic while holding the lock only loses log lines.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemorySink {
    fn write(&self, entry: &LogEntry, rendered: &str) {
        self.lock().push((entry.clone(), rendered.to_string()));
    }
}
