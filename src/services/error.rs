//! Errors from the catalog and stock services.

use crate::model::ProductId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request could not be sent or timed out.
    #[error("Request failed: {0}")]
    Request(String),

    /// The service answered 404 for this id.
    #[error("Product {0} not found")]
    NotFound(ProductId),

    /// Any other non-success status.
    #[error("Unexpected status {0}")]
    Status(u16),

    /// The body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The configured base URL cannot carry path segments.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}
