//! Browser host for the storefront enhancements.
//!
//! On `wasm32` this crate provides:
//!
//! - [`WebDom`]: the `Dom` trait over `web_sys::Document`
//! - [`LocalStorage`]: the `KeyValueStore` trait over `window.localStorage`
//! - [`ConsoleSink`]: log sink writing to the browser console
//! - `start`: the module entry point that boots a `Storefront` for the page
//! - [`ShopfrontCart`]: the cart API exported to page scripts
//!
//! On other targets only the page configuration helpers are built.

mod bootstrap;

#[cfg(target_arch = "wasm32")]
mod cart_api;
#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod storage;

pub use bootstrap::{page_config, CONFIG_SCRIPT_ID, SEARCH_EVENT};

#[cfg(target_arch = "wasm32")]
pub use cart_api::ShopfrontCart;
#[cfg(target_arch = "wasm32")]
pub use console::ConsoleSink;
#[cfg(target_arch = "wasm32")]
pub use dom::WebDom;
#[cfg(target_arch = "wasm32")]
pub use host::start;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
