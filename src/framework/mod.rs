//! Single-writer actor plumbing.
//!
//! A [`StateActor`] owns exactly one piece of state and applies actions to it one at a
//! time. Callers talk to it through a cloneable [`StateClient`]; requests travel over a
//! bounded mpsc channel and answers come back on a oneshot.
//!
//! # Main Components
//!
//! - [`ActorState`] - Trait the owned state implements to handle actions
//! - [`StateActor`] - The task that owns the state and runs the message loop
//! - [`StateClient`] - Cheap handle used to send requests
//! - [`FrameworkError`] - Plumbing failures (closed channel, dropped responder)
//!
//! # Testing
//!
//! See the [`mock`] module for utilities to test client wrappers without spawning an actor.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod state;

pub use actor::StateActor;
pub use client::StateClient;
pub use error::FrameworkError;
pub use message::{Response, StateRequest};
pub use state::ActorState;
