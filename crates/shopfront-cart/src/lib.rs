//! Shopping cart persisted in browser storage.
//!
//! The cart is an ordered list of [`LineItem`]s stored as one JSON array
//! under a single key of a [`KeyValueStore`] (`localStorage` in the
//! browser, [`MemoryStore`] in tests).
//!
//! # Example
//!
//! ```
//! use shopfront_cart::{CartStore, LineItem, MemoryStore};
//!
//! let mut cart = CartStore::new(MemoryStore::new(), "digitalStoreCart");
//! cart.add_item(LineItem::new("a", 1)).unwrap();
//! cart.add_item(LineItem::new("a", 2)).unwrap();
//!
//! let items = cart.get_cart();
//! assert_eq!(items.len(), 1);
//! assert_eq!(items[0].quantity, 3);
//! ```

mod error;
mod line_item;
mod storage;
mod store;

pub use error::{CartError, StorageError};
pub use line_item::{LineItem, LineItemId};
pub use storage::{KeyValueStore, MemoryStore};
pub use store::CartStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CartError, CartStore, KeyValueStore, LineItem, LineItemId, MemoryStore};
}
