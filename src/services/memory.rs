//! In-memory catalog and stock, for tests and offline demos.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use super::{ProductCatalog, ServiceError, StockService};
use crate::model::{Product, ProductId, Stock};

#[derive(Debug, Default)]
pub struct MemoryApi {
    products: Mutex<HashMap<ProductId, Product>>,
    stock: Mutex<HashMap<ProductId, u32>>,
    offline: AtomicBool,
    latency: Option<Duration>,
    product_lookups: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MemoryApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a product with `available` units in stock.
    #[must_use]
    pub fn with_product(self, product: Product, available: u32) -> Self {
        self.set_stock(product.id, available);
        lock(&self.products).insert(product.id, product);
        self
    }

    /// Delays every lookup, to widen interleaving windows in tests.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn set_stock(&self, id: ProductId, available: u32) {
        lock(&self.stock).insert(id, available);
    }

    /// While offline every lookup fails with [`ServiceError::Request`].
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of catalog lookups served so far.
    pub fn product_lookups(&self) -> usize {
        self.product_lookups.load(Ordering::SeqCst)
    }

    async fn round_trip(&self) -> Result<(), ServiceError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(ServiceError::Request("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for MemoryApi {
    async fn product(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.product_lookups.fetch_add(1, Ordering::SeqCst);
        self.round_trip().await?;
        lock(&self.products)
            .get(&id)
            .cloned()
            .ok_or(ServiceError::NotFound(id))
    }
}

#[async_trait]
impl StockService for MemoryApi {
    async fn stock(&self, id: ProductId) -> Result<Stock, ServiceError> {
        self.round_trip().await?;
        lock(&self.stock)
            .get(&id)
            .map(|&amount| Stock { id, amount })
            .ok_or(ServiceError::NotFound(id))
    }
}
