//! Structured logging with session context.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use shopfront_core::{LoggingConfig, SessionId};

use crate::sink::{LogSink, StderrSink};

/// Log level for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trace => write!(f, "TRACE"),
            Self::Debug => write!(f, "DEBUG"),
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// A structured log entry.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    /// Log level.
    pub level: LogLevel,
    /// Log message.
    pub message: String,
    /// Session ID for correlation.
    pub session_id: String,
    /// Enhancement that produced the entry (cart, search, seo, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    /// Additional structured fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, serde_json::Value>,
}

impl LogEntry {
    /// Format as JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.message.clone())
    }

    /// Format as human-readable string.
    pub fn to_human(&self) -> String {
        let mut s = match &self.component {
            Some(component) => format!("[{}] {}: {}", self.level, component, self.message),
            None => format!("[{}] {}", self.level, self.message),
        };

        if !self.fields.is_empty() {
            s.push_str(" | ");
            let fields: Vec<String> = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            s.push_str(&fields.join(" "));
        }

        s
    }
}

/// Output format for logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// JSON format (for log collection).
    #[default]
    Json,
    /// Human-readable format (for development).
    Human,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "human" | "text" => Ok(Self::Human),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

/// Structured logger with session context.
///
/// Cloning is cheap; clones share the sink. Each enhancement takes a clone
/// tagged with its own component name.
#[derive(Clone)]
pub struct StructuredLogger {
    session_id: SessionId,
    component: Option<String>,
    min_level: LogLevel,
    format: LogFormat,
    sink: Arc<dyn LogSink>,
}

impl fmt::Debug for StructuredLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StructuredLogger")
            .field("session_id", &self.session_id)
            .field("component", &self.component)
            .field("min_level", &self.min_level)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl StructuredLogger {
    /// Create a new logger writing to stderr.
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            component: None,
            min_level: LogLevel::Info,
            format: LogFormat::Json,
            sink: Arc::new(StderrSink),
        }
    }

    /// Create a logger from configuration. Unknown level or format names
    /// fall back to the defaults.
    pub fn from_config(
        config: &LoggingConfig,
        session_id: SessionId,
        sink: Arc<dyn LogSink>,
    ) -> Self {
        Self {
            session_id,
            component: None,
            min_level: config.level.parse().unwrap_or(LogLevel::Info),
            format: config.format.parse().unwrap_or_default(),
            sink,
        }
    }

    /// A logger that discards everything.
    pub fn disabled() -> Self {
        Self::new(SessionId::default()).with_sink(Arc::new(crate::sink::NullSink))
    }

    /// Set the component name.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Set minimum log level.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Replace the sink.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Clone this logger for a named component.
    pub fn for_component(&self, component: &str) -> Self {
        self.clone().with_component(component)
    }

    /// Log at trace level.
    pub fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message, BTreeMap::new());
    }

    /// Log at debug level.
    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, BTreeMap::new());
    }

    /// Log at info level.
    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, BTreeMap::new());
    }

    /// Log at warn level.
    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, BTreeMap::new());
    }

    /// Log at error level.
    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message, BTreeMap::new());
    }

    /// Log at debug level with fields.
    pub fn debug_with(&self, message: &str, fields: &[(&str, &dyn fmt::Display)]) {
        self.log(LogLevel::Debug, message, display_fields(fields));
    }

    /// Log at info level with fields.
    pub fn info_with(&self, message: &str, fields: &[(&str, &dyn fmt::Display)]) {
        self.log(LogLevel::Info, message, display_fields(fields));
    }

    /// Log at warn level with fields.
    pub fn warn_with(&self, message: &str, fields: &[(&str, &dyn fmt::Display)]) {
        self.log(LogLevel::Warn, message, display_fields(fields));
    }

    /// Check whether a level would be emitted.
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    fn log(&self, level: LogLevel, message: &str, fields: BTreeMap<String, serde_json::Value>) {
        if !self.enabled(level) {
            return;
        }

        let entry = LogEntry {
            level,
            message: message.to_string(),
            session_id: self.session_id.to_string(),
            component: self.component.clone(),
            fields,
        };

        let output = match self.format {
            LogFormat::Json => entry.to_json(),
            LogFormat::Human => entry.to_human(),
        };

        self.sink.write(&entry, &output);
    }

    /// Get the session ID.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }
}

fn display_fields(fields: &[(&str, &dyn fmt::Display)]) -> BTreeMap<String, serde_json::Value> {
    fields
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::json!(v.to_string())))
        .collect()
}

/// Builder for log entries with fluent API.
pub struct LogBuilder<'a> {
    logger: &'a StructuredLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<String, serde_json::Value>,
}

impl<'a> LogBuilder<'a> {
    /// Create a new log builder.
    pub fn new(logger: &'a StructuredLogger, level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            logger,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a string field.
    pub fn field(mut self, key: &str, value: impl Into<String>) -> Self {
        self.fields
            .insert(key.to_string(), serde_json::json!(value.into()));
        self
    }

    /// Add an integer field.
    pub fn field_i64(mut self, key: &str, value: i64) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a count field.
    pub fn field_usize(mut self, key: &str, value: usize) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Add a boolean field.
    pub fn field_bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), serde_json::json!(value));
        self
    }

    /// Emit the log entry.
    pub fn emit(self) {
        self.logger.log(self.level, &self.message, self.fields);
    }
}

impl StructuredLogger {
    /// Start building a debug log entry.
    pub fn debug_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Debug, message)
    }

    /// Start building an info log entry.
    pub fn info_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Info, message)
    }

    /// Start building a warn log entry.
    pub fn warn_builder(&self, message: impl Into<String>) -> LogBuilder<'_> {
        LogBuilder::new(self, LogLevel::Warn, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn memory_logger() -> (StructuredLogger, MemorySink) {
        let sink = MemorySink::new();
        let logger = StructuredLogger::new(SessionId::from_string("sess-1"))
            .with_sink(Arc::new(sink.clone()));
        (logger, sink)
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Trace < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_min_level_filters() {
        let (logger, sink) = memory_logger();
        logger.debug("hidden");
        logger.info("shown");
        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "shown");
    }

    #[test]
    fn test_info_with_fields() {
        let (logger, sink) = memory_logger();
        logger.info_with("Cart saved", &[("lines", &3), ("key", &"digitalStoreCart")]);
        let entry = &sink.entries()[0];
        assert_eq!(entry.fields["lines"], "3");
        assert_eq!(entry.fields["key"], "digitalStoreCart");
    }

    #[test]
    fn test_component_and_session_attached() {
        let (logger, sink) = memory_logger();
        logger.for_component("cart").warn("stored cart invalid");
        let entry = &sink.entries()[0];
        assert_eq!(entry.component.as_deref(), Some("cart"));
        assert_eq!(entry.session_id, "sess-1");
        assert_eq!(entry.level, LogLevel::Warn);
    }

    #[test]
    fn test_log_entry_json() {
        let mut fields = BTreeMap::new();
        fields.insert("count".to_string(), serde_json::json!(2));
        let entry = LogEntry {
            level: LogLevel::Info,
            message: "Injected structured data".to_string(),
            session_id: "s".to_string(),
            component: Some("seo".to_string()),
            fields,
        };

        let json = entry.to_json();
        assert!(json.contains("\"level\":\"info\""));
        assert!(json.contains("\"component\":\"seo\""));
        assert!(json.contains("\"count\":2"));
    }

    #[test]
    fn test_log_entry_human() {
        let entry = LogEntry {
            level: LogLevel::Warn,
            message: "fallback".to_string(),
            session_id: "s".to_string(),
            component: Some("media".to_string()),
            fields: BTreeMap::new(),
        };
        assert_eq!(entry.to_human(), "[WARN] media: fallback");
    }

    #[test]
    fn test_log_builder() {
        let (logger, sink) = memory_logger();
        logger
            .info_builder("Wrapped tables")
            .field_usize("count", 3)
            .field_bool("idempotent", true)
            .field("selector", "table")
            .emit();

        let entry = &sink.entries()[0];
        assert_eq!(entry.fields["count"], serde_json::json!(3));
        assert_eq!(entry.fields["idempotent"], serde_json::json!(true));
        assert_eq!(entry.fields["selector"], serde_json::json!("table"));
    }

    #[test]
    fn test_from_config_falls_back() {
        let config = LoggingConfig {
            level: "nonsense".to_string(),
            format: "human".to_string(),
        };
        let sink = MemorySink::new();
        let logger =
            StructuredLogger::from_config(&config, SessionId::default(), Arc::new(sink.clone()));
        logger.info("hello");
        assert_eq!(sink.rendered(), vec!["[INFO] hello".to_string()]);
    }
}
