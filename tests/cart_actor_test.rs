use std::sync::Arc;
use std::time::Duration;

use cart_manager::cart_actor::{CartContext, CartError};
use cart_manager::lifecycle::CartSystem;
use cart_manager::model::{Cart, CartItem, Product, ProductId};
use cart_manager::notify::{ChannelNotifier, Notification};
use cart_manager::services::MemoryApi;
use cart_manager::storage::{CartStore, KeyValueStore, MemoryStore, DEFAULT_CART_KEY};
use tokio::sync::mpsc::UnboundedReceiver;

/// Real actor, in-memory collaborators.
struct Fixture {
    system: CartSystem,
    api: Arc<MemoryApi>,
    backend: Arc<MemoryStore>,
    notifications: UnboundedReceiver<Notification>,
}

impl Fixture {
    fn start(api: MemoryApi, backend: Arc<MemoryStore>) -> Self {
        let api = Arc::new(api);
        let (notifier, notifications) = ChannelNotifier::new();
        let context = CartContext {
            catalog: api.clone(),
            stock: api.clone(),
            store: CartStore::new(backend.clone(), DEFAULT_CART_KEY),
            notifier: Arc::new(notifier),
        };
        Self {
            system: CartSystem::start(context, 8),
            api,
            backend,
            notifications,
        }
    }

    fn persisted(&self) -> Cart {
        CartStore::new(self.backend.clone(), DEFAULT_CART_KEY).load()
    }

    fn drain(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(n) = self.notifications.try_recv() {
            out.push(n.message);
        }
        out
    }
}

fn shoe() -> Product {
    Product::new(1, "Shoe", 10.0)
}

fn seeded(cart: &Cart) -> Arc<MemoryStore> {
    let backend = Arc::new(MemoryStore::new());
    backend
        .set_item(DEFAULT_CART_KEY, &serde_json::to_string(cart).unwrap())
        .unwrap();
    backend
}

#[tokio::test]
async fn test_add_to_empty_cart() {
    let mut f = Fixture::start(
        MemoryApi::new().with_product(shoe(), 5),
        Arc::new(MemoryStore::new()),
    );

    let cart = f.system.cart_client.add_product(ProductId(1)).await.unwrap();

    let expected = Cart::from_items([CartItem::from_product(shoe(), 1)]);
    assert_eq!(cart, expected);
    assert_eq!(f.system.cart_client.cart().await.unwrap(), expected);
    assert_eq!(f.persisted(), expected);
    assert!(f.drain().is_empty());

    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_hydrates_from_storage() {
    let stored = Cart::from_items([
        CartItem::from_product(shoe(), 2),
        CartItem::from_product(Product::new(2, "Boot", 20.0), 1),
    ]);
    let f = Fixture::start(MemoryApi::new(), seeded(&stored));

    assert_eq!(f.system.cart_client.cart().await.unwrap(), stored);
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_set_quantity_within_stock() {
    let start = Cart::from_items([CartItem::from_product(shoe(), 1)]);
    let mut f = Fixture::start(MemoryApi::new().with_product(shoe(), 5), seeded(&start));

    let cart = f
        .system
        .cart_client
        .update_product_amount(ProductId(1), 3)
        .await
        .unwrap();

    assert_eq!(cart.amount_of(ProductId(1)), Some(3));
    assert_eq!(f.persisted(), cart);
    assert!(f.drain().is_empty());
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_set_quantity_above_stock_leaves_cart_unchanged() {
    let start = Cart::from_items([CartItem::from_product(shoe(), 1)]);
    let mut f = Fixture::start(MemoryApi::new().with_product(shoe(), 2), seeded(&start));

    let result = f
        .system
        .cart_client
        .update_product_amount(ProductId(1), 5)
        .await;

    assert!(matches!(
        result,
        Err(CartError::InsufficientStock {
            requested: 5,
            available: 2
        })
    ));
    assert_eq!(f.system.cart_client.cart().await.unwrap(), start);
    assert_eq!(f.persisted(), start);
    assert_eq!(f.drain(), vec!["Requested quantity is out of stock"]);
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_every_rejection_notifies_exactly_once() {
    let start = Cart::from_items([CartItem::from_product(shoe(), 1)]);
    let mut f = Fixture::start(MemoryApi::new().with_product(shoe(), 1), seeded(&start));
    let client = f.system.cart_client.clone();

    assert!(client.update_product_amount(ProductId(1), 0).await.is_err());
    assert!(client.update_product_amount(ProductId(1), -1).await.is_err());
    assert!(client.add_product(ProductId(1)).await.is_err()); // stock is 1
    assert!(client.add_product(ProductId(99)).await.is_err()); // unknown
    f.api.set_offline(true);
    assert!(client.update_product_amount(ProductId(1), 1).await.is_err());
    f.backend.fail_writes(true);
    assert!(client.remove_product(ProductId(1)).await.is_err());

    assert_eq!(f.drain().len(), 6);
    assert_eq!(client.cart().await.unwrap(), start);
    drop(client);
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_remove_present_and_absent() {
    let start = Cart::from_items([
        CartItem::from_product(shoe(), 1),
        CartItem::from_product(Product::new(2, "Boot", 20.0), 3),
    ]);
    let mut f = Fixture::start(MemoryApi::new(), seeded(&start));

    let cart = f.system.cart_client.remove_product(ProductId(9)).await.unwrap();
    assert_eq!(cart, start);

    let cart = f.system.cart_client.remove_product(ProductId(1)).await.unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.amount_of(ProductId(2)), Some(3));
    assert_eq!(f.persisted(), cart);
    assert!(f.drain().is_empty());
    f.system.shutdown().await.unwrap();
}

/// Concurrent adds of a product not yet in the cart must not produce two lines.
#[tokio::test]
async fn test_concurrent_adds_are_serialized() {
    let api = MemoryApi::new()
        .with_product(shoe(), 10)
        .with_latency(Duration::from_millis(20));
    let mut f = Fixture::start(api, Arc::new(MemoryStore::new()));

    let mut handles = vec![];
    for _ in 0..4 {
        let client = f.system.cart_client.clone();
        handles.push(tokio::spawn(async move {
            client.add_product(ProductId(1)).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let cart = f.system.cart_client.cart().await.unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.amount_of(ProductId(1)), Some(4));
    assert_eq!(f.api.product_lookups(), 1);
    assert!(f.drain().is_empty());
    f.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_one_bad_stored_entry_keeps_the_others() {
    let backend = Arc::new(MemoryStore::new());
    backend
        .set_item(
            DEFAULT_CART_KEY,
            r#"[{"id":1,"title":"Shoe","price":10,"image":"a.jpg","amount":2},
                {"id":2,"title":"Boot","price":20,"image":null,"amount":1},
                {"id":3,"title":"Sock","image":"c.jpg","amount":1}]"#,
        )
        .unwrap();
    let f = Fixture::start(MemoryApi::new(), backend);

    let hydrated = f.system.cart_client.cart().await.unwrap();
    assert_eq!(hydrated.amount_of(ProductId(1)), Some(2));
    assert_eq!(hydrated.amount_of(ProductId(2)), Some(1));
    assert_eq!(hydrated.len(), 2);

    // The next save writes back what survived, not an empty cart.
    f.system.cart_client.remove_product(ProductId(9)).await.unwrap();
    assert_eq!(f.persisted(), hydrated);

    f.system.shutdown().await.unwrap();
}
