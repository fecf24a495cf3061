//! Cart read-modify-write over a key-value store.

use shopfront_observability::StructuredLogger;

use crate::{CartError, KeyValueStore, LineItem, LineItemId};

/// Shopping cart persisted as a JSON array under one storage key.
///
/// Every mutation reads the stored cart, applies the change and writes the
/// whole array back. Two tabs writing concurrently race; the last write wins.
#[derive(Debug)]
pub struct CartStore<S> {
    store: S,
    key: String,
    logger: StructuredLogger,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a cart over `store` using `key`.
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            logger: StructuredLogger::disabled(),
        }
    }

    /// Attach a logger.
    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger.with_component("cart");
        self
    }

    /// Current line items, in insertion order.
    ///
    /// Returns an empty cart when nothing is stored, when storage cannot be
    /// read, or when the stored value is not a valid line item array.
    pub fn get_cart(&self) -> Vec<LineItem> {
        let raw = match self.store.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                self.logger
                    .warn_with("Cart storage unreadable", &[("error", &e)]);
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                self.logger
                    .warn_with("Stored cart is invalid, using empty cart", &[("error", &e)]);
                Vec::new()
            }
        }
    }

    /// Overwrite the stored cart.
    pub fn save_cart(&mut self, items: &[LineItem]) -> Result<(), CartError> {
        let json = serde_json::to_string(items)?;
        self.store.set_item(&self.key, &json)?;
        self.logger
            .debug_builder("Cart saved")
            .field_usize("lines", items.len())
            .emit();
        Ok(())
    }

    /// Add an item. An item whose id is already in the cart has its
    /// quantity added to the existing line instead.
    pub fn add_item(&mut self, item: LineItem) -> Result<(), CartError> {
        let mut cart = self.get_cart();

        if let Some(existing) = cart.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or_else(|| CartError::QuantityOverflow(item.id.to_string()))?;
        } else {
            cart.push(item);
        }

        self.save_cart(&cart)
    }

    /// Remove every line with `id`. The cart is written back even when
    /// nothing matched.
    pub fn remove_item(&mut self, id: &LineItemId) -> Result<(), CartError> {
        let mut cart = self.get_cart();
        cart.retain(|i| &i.id != id);
        self.save_cart(&cart)
    }

    /// Set the quantity of the line with `id`.
    ///
    /// Returns `Ok(false)` without writing when no such line exists. The
    /// quantity is stored as given; zero or negative values are not
    /// interpreted as removal.
    pub fn update_quantity(&mut self, id: &LineItemId, quantity: i64) -> Result<bool, CartError> {
        let mut cart = self.get_cart();

        match cart.iter_mut().find(|i| &i.id == id) {
            Some(item) => {
                item.quantity = quantity;
                self.save_cart(&cart)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Delete the stored cart.
    pub fn clear_cart(&mut self) -> Result<(), CartError> {
        self.store.remove_item(&self.key)?;
        self.logger.debug("Cart cleared");
        Ok(())
    }

    /// Sum of quantities across all lines.
    pub fn item_count(&self) -> i64 {
        self.get_cart()
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.get_cart().len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.get_cart().is_empty()
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consume and return the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }
}
