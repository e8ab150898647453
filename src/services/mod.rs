//! Outbound collaborators: the product catalog and the stock service.
//!
//! The cart only sees the [`ProductCatalog`] and [`StockService`] traits. [`ApiClient`]
//! implements both over HTTP; [`MemoryApi`] implements both in memory for tests.

pub mod api;
pub mod error;
pub mod memory;

pub use api::ApiClient;
pub use error::ServiceError;
pub use memory::MemoryApi;

use crate::model::{Product, ProductId, Stock};
use async_trait::async_trait;

/// Read access to catalog products.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn product(&self, id: ProductId) -> Result<Product, ServiceError>;
}

/// Read access to available stock.
#[async_trait]
pub trait StockService: Send + Sync {
    async fn stock(&self, id: ProductId) -> Result<Stock, ServiceError>;
}
