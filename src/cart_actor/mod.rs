//! # Cart Actor
//!
//! The single writer for the shopping cart.
//!
//! ## Overview
//!
//! The actor owns the current [`Cart`] snapshot and applies [`CartAction`]s to it one
//! at a time. Each action suspends at most once (the catalog or stock lookup), then
//! persists the candidate snapshot and only afterwards swaps it in. Two adds of the
//! same new product can no longer race into duplicate lines: the second one sees the
//! first one's result.
//!
//! Every rejection reaches the user as exactly one [`Notification`](crate::notify::Notification)
//! through the injected notifier; the typed [`CartError`] also travels back to the caller.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorState`](crate::framework::ActorState) implementation for [`Cart`]
//! - [`actions`] - [`CartAction`]
//! - [`error`] - [`CartError`]
//! - [`CartContext`] - the dependencies injected at `run()`

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use std::sync::Arc;

use crate::framework::{StateActor, StateClient};
use crate::model::Cart;
use crate::notify::Notifier;
use crate::services::{ProductCatalog, StockService};
use crate::storage::CartStore;

/// Dependencies of the cart actor.
#[derive(Clone)]
pub struct CartContext {
    pub catalog: Arc<dyn ProductCatalog>,
    pub stock: Arc<dyn StockService>,
    pub store: CartStore,
    pub notifier: Arc<dyn Notifier>,
}

/// Creates a cart actor holding `initial` and its client.
pub fn new(initial: Cart, buffer_size: usize) -> (StateActor<Cart>, StateClient<Cart>) {
    StateActor::new(initial, buffer_size)
}
