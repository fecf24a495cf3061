//! Cart API exported to page scripts.

use shopfront_cart::{CartStore, LineItem, LineItemId};
use shopfront_core::CartConfig;
use wasm_bindgen::prelude::*;

use crate::storage::LocalStorage;

/// `localStorage` cart for page scripts.
///
/// ```js
/// const cart = new ShopfrontCart();
/// cart.addItem({ id: "p-1", quantity: 2, name: "Oud" });
/// cart.getCart(); // [{ id: "p-1", quantity: 2, name: "Oud" }]
/// ```
#[wasm_bindgen]
pub struct ShopfrontCart {
    cart: CartStore<LocalStorage>,
}

#[wasm_bindgen]
impl ShopfrontCart {
    /// Open the cart stored under `storageKey`, or the default key.
    #[wasm_bindgen(constructor)]
    pub fn new(storage_key: Option<String>) -> ShopfrontCart {
        let key = storage_key.unwrap_or_else(|| CartConfig::default().storage_key);
        Self {
            cart: CartStore::new(LocalStorage::new(), key),
        }
    }

    #[wasm_bindgen(js_name = getCart)]
    pub fn get_cart(&self) -> Result<JsValue, JsValue> {
        to_js(&self.cart.get_cart())
    }

    #[wasm_bindgen(js_name = saveCart)]
    pub fn save_cart(&mut self, items: JsValue) -> Result<(), JsValue> {
        let items: Vec<LineItem> = from_js(&items)?;
        self.cart.save_cart(&items).map_err(js_error)
    }

    #[wasm_bindgen(js_name = addItem)]
    pub fn add_item(&mut self, item: JsValue) -> Result<(), JsValue> {
        let item: LineItem = from_js(&item)?;
        self.cart.add_item(item).map_err(js_error)
    }

    #[wasm_bindgen(js_name = removeItem)]
    pub fn remove_item(&mut self, id: JsValue) -> Result<(), JsValue> {
        let id: LineItemId = from_js(&id)?;
        self.cart.remove_item(&id).map_err(js_error)
    }

    /// Returns `false` when no line has `id`.
    #[wasm_bindgen(js_name = updateQuantity)]
    pub fn update_quantity(&mut self, id: JsValue, quantity: f64) -> Result<bool, JsValue> {
        let id: LineItemId = from_js(&id)?;
        if !quantity.is_finite() || quantity.fract() != 0.0 {
            return Err(js_error("quantity must be a whole number"));
        }
        self.cart
            .update_quantity(&id, quantity as i64)
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = clearCart)]
    pub fn clear_cart(&mut self) -> Result<(), JsValue> {
        self.cart.clear_cart().map_err(js_error)
    }

    /// Sum of all quantities.
    #[wasm_bindgen(js_name = itemCount)]
    pub fn item_count(&self) -> f64 {
        self.cart.item_count() as f64
    }
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn from_js<T: serde::de::DeserializeOwned>(value: &JsValue) -> Result<T, JsValue> {
    let json = js_sys::JSON::stringify(value)?
        .as_string()
        .ok_or_else(|| js_error("value is not representable as JSON"))?;
    serde_json::from_str(&json).map_err(js_error)
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let json = serde_json::to_string(value).map_err(js_error)?;
    js_sys::JSON::parse(&json)
}
