//! Browser console log sink.

use shopfront_observability::{LogEntry, LogLevel, LogSink};
use wasm_bindgen::JsValue;

/// Writes each entry to the console method matching its level.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write(&self, entry: &LogEntry, rendered: &str) {
        let line = JsValue::from_str(rendered);
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&line),
            LogLevel::Info => web_sys::console::info_1(&line),
            LogLevel::Warn => web_sys::console::warn_1(&line),
            LogLevel::Error => web_sys::console::error_1(&line),
        }
    }
}
