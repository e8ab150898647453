//! Persisted storage for the cart.
//!
//! Modeled on browser local storage: a [`KeyValueStore`] maps string keys to string
//! values, and [`CartStore`] keeps the JSON-serialized cart under one key. Reads and
//! writes are synchronous and write the whole value.

pub mod error;
pub mod file;
pub mod memory;

pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::model::{Cart, CartItem};

/// Default key the cart is stored under.
pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// String key-value storage.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// The cart's view of a [`KeyValueStore`]: one key, one JSON array.
#[derive(Clone)]
pub struct CartStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads the persisted cart.
    ///
    /// Never fails: a missing key is an empty cart, and an unreadable value or one that is
    /// not a JSON array is logged and treated as empty. Entries are decoded one by one;
    /// those that do not decode or break the cart invariants are dropped, the rest kept.
    pub fn load(&self) -> Cart {
        let raw = match self.backend.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No persisted cart");
                return Cart::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Could not read persisted cart");
                return Cart::new();
            }
        };

        let entries = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Persisted cart is not a JSON array");
                return Cart::new();
            }
        };

        let stored = entries.len();
        let items = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value::<CartItem>(entry) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(key = %self.key, index, error = %e, "Skipping undecodable cart entry");
                    None
                }
            });
        let cart = Cart::from_items(items);
        if cart.len() != stored {
            warn!(key = %self.key, stored, kept = cart.len(), "Dropped invalid cart entries");
        }
        debug!(key = %self.key, size = cart.len(), "Loaded persisted cart");
        cart
    }

    /// Overwrites the persisted cart.
    pub fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cart)?;
        self.backend.set_item(&self.key, &raw)?;
        debug!(key = %self.key, size = cart.len(), "Persisted cart");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CartItem, Product};

    fn store() -> (Arc<MemoryStore>, CartStore) {
        let backend = Arc::new(MemoryStore::new());
        let store = CartStore::new(backend.clone(), DEFAULT_CART_KEY);
        (backend, store)
    }

    #[test]
    fn test_missing_key_loads_empty() {
        let (_, store) = store();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let (_, store) = store();
        let cart = Cart::from_items([
            CartItem::from_product(Product::new(1, "Shoe", 10.0), 1),
            CartItem::from_product(Product::new(2, "Boot", 99.9).with_image("boot.jpg"), 4),
        ]);
        store.save(&cart).unwrap();
        assert_eq!(store.load(), cart);
    }

    #[test]
    fn test_garbage_loads_empty() {
        let (backend, store) = store();
        backend.set_item(DEFAULT_CART_KEY, "{not json").unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_legacy_layout_is_accepted_and_repaired() {
        let (backend, store) = store();
        backend
            .set_item(
                DEFAULT_CART_KEY,
                r#"[{"id":1,"title":"Shoe","price":10,"image":"a.jpg","amount":2},
                    {"id":2,"title":"Boot","price":20,"image":"b.jpg","amount":0}]"#,
            )
            .unwrap();
        let cart = store.load();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.amount_of(1.into()), Some(2));
    }

    #[test]
    fn test_undecodable_entry_does_not_discard_the_rest() {
        let (backend, store) = store();
        backend
            .set_item(
                DEFAULT_CART_KEY,
                r#"[{"id":1,"title":"Shoe","price":10,"image":"a.jpg","amount":2},
                    {"id":2,"title":"Boot","image":"b.jpg","amount":1},
                    {"id":3,"title":"Sock","price":5,"image":"c.jpg","amount":-1},
                    {"id":4,"title":"Sandal","price":30,"image":null,"amount":1}]"#,
            )
            .unwrap();

        let cart = store.load();
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.amount_of(1.into()), Some(2));
        assert_eq!(cart.get(4.into()).map(|item| item.image.as_str()), Some(""));
        assert!(!cart.contains(2.into()));
        assert!(!cart.contains(3.into()));
    }

    #[test]
    fn test_save_propagates_backend_failure() {
        let backend = Arc::new(MemoryStore::new());
        backend.fail_writes(true);
        let store = CartStore::new(backend, DEFAULT_CART_KEY);
        assert!(matches!(store.save(&Cart::new()), Err(StorageError::Unavailable(_))));
    }
}
