//! Observability for the storefront enhancements.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with session and component context
//! - `LogSink` - Where rendered entries go (stderr, memory, browser console)

mod logging;
mod sink;

pub use logging::*;
pub use sink::*;

// Re-export SessionId from shopfront-core for convenience
pub use shopfront_core::SessionId;
