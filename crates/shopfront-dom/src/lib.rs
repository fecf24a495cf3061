//! Page abstraction for the storefront enhancements.
//!
//! The enhancements never touch a browser directly. They talk to a [`Dom`],
//! which the browser host implements over `web-sys` and tests implement with
//! [`MemoryDom`].
//!
//! Elements are addressed by opaque [`ElementId`] handles. Lookups that find
//! nothing return `None` or an empty list; the enhancements treat that as
//! "markup not present" and skip quietly.

mod dom;
mod error;
mod memory;
mod selector;

pub use dom::{Dom, ElementId};
pub use error::{DomError, DomResult, SelectorError};
pub use memory::{ElementBuilder, MemoryDom};
pub use selector::Selector;
