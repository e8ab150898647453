use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use crate::cart_actor::{self, CartContext};
use crate::clients::CartClient;
use crate::config::CartConfig;
use crate::notify::Notifier;
use crate::services::{ApiClient, ServiceError};
use crate::storage::{CartStore, FileStore};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Could not build API client: {0}")]
    Api(#[from] ServiceError),
    #[error("Cart actor task failed: {0}")]
    ActorTask(#[from] tokio::task::JoinError),
}

/// Runtime owner of the cart actor.
///
/// # Example
///
/// ```ignore
/// let system = CartSystem::start(context, 32);
/// let cart = system.cart_client.add_product(ProductId(1)).await?;
/// system.shutdown().await?;
/// ```
pub struct CartSystem {
    /// Client for interacting with the cart actor
    pub cart_client: CartClient,

    /// Actor task, joined on shutdown
    handle: tokio::task::JoinHandle<()>,
}

impl CartSystem {
    /// Hydrates the cart from `context.store` and spawns the actor.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn start(context: CartContext, channel_capacity: usize) -> Self {
        let initial = context.store.load();
        info!(key = context.store.key(), size = initial.len(), "Cart hydrated");

        let (actor, client) = cart_actor::new(initial, channel_capacity);
        let handle = tokio::spawn(actor.run(context));

        Self {
            cart_client: CartClient::new(client),
            handle,
        }
    }

    /// Wires the production dependencies: the HTTP API for catalog and stock, and the
    /// file-backed store.
    ///
    /// # Errors
    ///
    /// Returns error if the API client cannot be built from the configured URL.
    pub fn from_config(
        config: &CartConfig,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, LifecycleError> {
        let api = Arc::new(ApiClient::new(config.api_url.clone(), config.request_timeout)?);
        let backend = Arc::new(FileStore::new(&config.storage_path));

        let context = CartContext {
            catalog: api.clone(),
            stock: api,
            store: CartStore::new(backend, config.storage_key.clone()),
            notifier,
        };
        Ok(Self::start(context, config.channel_capacity))
    }

    /// Drops this system's client and waits for the actor to drain and stop.
    ///
    /// # Errors
    ///
    /// Returns error if the actor task panicked.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down cart...");
        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!(error = %e, "Cart actor task failed");
            return Err(e.into());
        }

        info!("Cart shutdown complete.");
        Ok(())
    }
}
