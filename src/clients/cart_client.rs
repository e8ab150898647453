//! # Cart Client
//!
//! The consumer-facing handle to the cart actor: read the current cart, add, remove,
//! and set quantities.
//!
//! Every mutating call answers with the cart in effect afterwards. A rejected call has
//! already produced its user notification by the time the `Err` comes back, so callers
//! that only render the cart can ignore the error.

use crate::cart_actor::{CartAction, CartError};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, StateClient};
use crate::model::{Cart, ProductId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the cart actor. Cheap to clone.
#[derive(Clone)]
pub struct CartClient {
    inner: StateClient<Cart>,
}

impl CartClient {
    pub fn new(inner: StateClient<Cart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &StateClient<Cart> {
        &self.inner
    }

    /// Recovers the actor's own [`CartError`] from the boxed state error.
    fn map_error(e: FrameworkError) -> CartError {
        match e {
            FrameworkError::StateError(inner) => match inner.downcast::<CartError>() {
                Ok(err) => *err,
                Err(other) => CartError::Actor(other.to_string()),
            },
            other => CartError::Actor(other.to_string()),
        }
    }
}

impl CartClient {
    /// The current cart snapshot.
    pub async fn cart(&self) -> Result<Cart, CartError> {
        self.snapshot().await
    }

    #[instrument(skip(self))]
    pub async fn add_product(&self, id: ProductId) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.perform(CartAction::AddProduct(id)).await
    }

    #[instrument(skip(self))]
    pub async fn remove_product(&self, id: ProductId) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.perform(CartAction::RemoveProduct(id)).await
    }

    #[instrument(skip(self))]
    pub async fn update_product_amount(
        &self,
        id: ProductId,
        amount: i64,
    ) -> Result<Cart, CartError> {
        debug!("Sending request");
        self.perform(CartAction::UpdateAmount { id, amount }).await
    }

    async fn perform(&self, action: CartAction) -> Result<Cart, CartError> {
        self.inner
            .perform_action(action)
            .await
            .map_err(Self::map_error)
    }
}
