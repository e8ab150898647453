//! Error types for the cart actor.
//!
//! The `Display` text of each variant is the notification shown to the user, so it
//! stays short and free of internals; the underlying cause hangs off `source()`.

use thiserror::Error;

use crate::services::ServiceError;
use crate::storage::StorageError;

/// Why a cart operation was rejected.
#[derive(Debug, Error)]
pub enum CartError {
    /// Catalog lookup failed, or the new cart could not be saved.
    #[error("Could not add the product to the cart")]
    AddFailed(#[source] Cause),

    /// The new cart could not be saved.
    #[error("Could not remove the product from the cart")]
    RemoveFailed(#[source] StorageError),

    /// The requested amount is zero or negative.
    #[error("Invalid quantity: {0}")]
    InvalidAmount(i64),

    /// The stock lookup failed.
    #[error("Could not change the product quantity")]
    StockUnavailable(#[source] ServiceError),

    /// More units requested than the stock service reports.
    #[error("Requested quantity is out of stock")]
    InsufficientStock { requested: i64, available: u32 },

    /// The new cart could not be saved.
    #[error("Could not change the product quantity")]
    UpdateFailed(#[source] StorageError),

    /// The actor is gone (shut down or panicked).
    #[error("Cart is unavailable: {0}")]
    Actor(String),
}

/// Underlying failure of an add.
#[derive(Debug, Error)]
pub enum Cause {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
