//! Cart line items.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a line item, unique within a cart.
///
/// Page scripts sometimes store numeric ids; those are accepted and kept
/// as their decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LineItemId(String);

impl LineItemId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LineItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for LineItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl<'de> Deserialize<'de> for LineItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = LineItemId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer id")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(LineItemId::new(v))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(LineItemId(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(LineItemId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(LineItemId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}

/// One product entry in the cart.
///
/// Only `id` and `quantity` carry meaning here. Product fields the page
/// stores alongside them (name, price, image, ...) are kept verbatim in
/// `details` so a read-modify-write never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: LineItemId,
    pub quantity: i64,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

impl LineItem {
    /// Create a line item with no product details.
    pub fn new(id: impl Into<LineItemId>, quantity: i64) -> Self {
        Self {
            id: id.into(),
            quantity,
            details: serde_json::Map::new(),
        }
    }

    /// Attach a product field.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Product name, when the page stored one.
    pub fn name(&self) -> Option<&str> {
        self.details.get("name").and_then(|v| v.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_details_survive_roundtrip() {
        let raw = json!({"id": "sku-1", "quantity": 2, "name": "Mug", "price": 35.5});
        let item: LineItem = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(item.name(), Some("Mug"));
        assert_eq!(item.details["price"], json!(35.5));
        assert_eq!(serde_json::to_value(&item).unwrap(), raw);
    }

    #[test]
    fn test_numeric_id_accepted() {
        let item: LineItem = serde_json::from_value(json!({"id": 42, "quantity": 1})).unwrap();
        assert_eq!(item.id, LineItemId::new("42"));
    }

    #[test]
    fn test_missing_id_rejected() {
        assert!(serde_json::from_value::<LineItem>(json!({"quantity": 1})).is_err());
    }

    #[test]
    fn test_fractional_quantity_rejected() {
        assert!(serde_json::from_value::<LineItem>(json!({"id": "a", "quantity": 1.5})).is_err());
    }

    #[test]
    fn test_builder() {
        let item = LineItem::new("a", 3).with_detail("name", "Pen");
        assert_eq!(item.name(), Some("Pen"));
        assert_eq!(item.quantity, 3);
    }
}
