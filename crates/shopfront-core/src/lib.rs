//! Core abstractions for the storefront enhancements.
//!
//! This crate provides the types every other crate shares:
//! - `StorefrontConfig` - Class names, ids, constants and their defaults
//! - `SessionId` - Identifier attached to log entries for one page session
//! - `ConfigError` - Errors raised while loading or validating configuration

mod config;
mod context;
mod error;

pub use config::*;
pub use context::*;
pub use error::*;
