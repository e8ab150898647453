//! HTTP client for the storefront API.
//!
//! Serves both collaborators from one base URL:
//! `GET {base}/products/{id}` and `GET {base}/stock/{id}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::error::ServiceError;
use super::{ProductCatalog, StockService};
use crate::model::{Product, ProductId, Stock};

/// Storefront API client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns error if `base_url` cannot be a base (e.g. `mailto:`) or the underlying
    /// HTTP client fails to build.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ServiceError> {
        if base_url.cannot_be_a_base() {
            return Err(ServiceError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Request(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, resource: &str, id: ProductId) -> Result<Url, ServiceError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ServiceError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(resource)
            .push(&id.to_string());
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: &str, id: ProductId) -> Result<T, ServiceError> {
        let url = self.endpoint(resource, id)?;
        debug!(%url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ServiceError::Request(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(ServiceError::NotFound(id)),
            status if !status.is_success() => {
                warn!(status = status.as_u16(), resource, %id, "Unexpected status");
                return Err(ServiceError::Status(status.as_u16()));
            }
            _ => {}
        }

        response
            .json()
            .await
            .map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ProductCatalog for ApiClient {
    #[instrument(skip(self))]
    async fn product(&self, id: ProductId) -> Result<Product, ServiceError> {
        self.fetch("products", id).await
    }
}

#[async_trait]
impl StockService for ApiClient {
    #[instrument(skip(self))]
    async fn stock(&self, id: ProductId) -> Result<Stock, ServiceError> {
        self.fetch("stock", id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).unwrap(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn test_endpoint_without_trailing_slash() {
        let url = client("http://localhost:3333").endpoint("products", ProductId(4)).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3333/products/4");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = client("http://shop.test/api/").endpoint("stock", ProductId(2)).unwrap();
        assert_eq!(url.as_str(), "http://shop.test/api/stock/2");
    }

    #[test]
    fn test_rejects_non_base_url() {
        let result = ApiClient::new(Url::parse("mailto:shop@example.com").unwrap(), Duration::from_secs(1));
        assert!(matches!(result, Err(ServiceError::InvalidBaseUrl(_))));
    }
}
