//! # System Lifecycle
//!
//! The composition root: builds the cart's dependencies, hydrates the cart from
//! storage, spawns the actor, and hands out [`CartClient`](crate::clients::CartClient)
//! handles. Nothing else in the crate reaches for shared global state; consumers hold
//! the client they were given.
//!
//! ```rust,ignore
//! let system = CartSystem::from_config(&config, Arc::new(TracingNotifier))?;
//! system.cart_client.add_product(ProductId(1)).await.ok();
//! system.shutdown().await?;
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sender side of the channel
//! 2. **Actor detects closure** - `recv()` returns `None` after queued requests drain
//! 3. **Await completion** - [`CartSystem::shutdown`] joins the actor task
//!
//! Clones of the client held elsewhere keep the actor alive; drop them first.
//!
//! ## Observability
//!
//! [`setup_tracing`] installs the subscriber. `RUST_LOG=debug` shows every request.

pub mod cart_system;
pub mod tracing;

pub use self::cart_system::*;
pub use self::tracing::setup_tracing;
