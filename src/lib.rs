//! # Cart Manager
//!
//! Shopping-cart state for a storefront: add products, remove them, change quantities.
//! The cart is checked against a remote stock service and persisted to a local
//! key-value store after every successful change.
//!
//! ## Design
//!
//! The cart lives inside a single actor ([`framework::StateActor`]) that handles one
//! request at a time. Consumers never touch the cart directly; they hold a
//! [`clients::CartClient`] handed out by the composition root
//! ([`lifecycle::CartSystem`]) and get immutable [`model::Cart`] snapshots back.
//!
//! Rejected operations (unknown product, bad quantity, not enough stock, storage
//! failure) leave the cart untouched and emit one user-facing
//! [`notify::Notification`].
//!
//! ## Module Tour
//!
//! - [`framework`] - generic single-writer actor, client, and test mocks
//! - [`cart_actor`] - cart actions, errors, and the state handler
//! - [`clients`] - the consumer-facing [`CartClient`](clients::CartClient)
//! - [`model`] - products, stock, cart items, and the cart snapshot
//! - [`services`] - catalog and stock lookups (HTTP and in-memory)
//! - [`storage`] - key-value persistence (file and in-memory)
//! - [`notify`] - notification sinks
//! - [`config`] - environment configuration
//! - [`lifecycle`] - wiring, shutdown, tracing setup
//!
//! ## Running
//!
//! ```bash
//! CART_API_URL=http://localhost:3333 RUST_LOG=info cargo run -- add 1
//! ```

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod notify;
pub mod services;
pub mod storage;
