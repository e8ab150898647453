//! # ActorState Trait
//!
//! The contract for state owned by a [`StateActor`](crate::framework::StateActor).
//!
//! The actor holds one value of the implementing type and hands every incoming action
//! to [`ActorState::handle_action`] together with the injected `Context`. Because the
//! actor processes requests sequentially, the handler has exclusive `&mut` access and
//! needs no locking, even across the `.await` points inside it.

use async_trait::async_trait;
use std::fmt::Debug;

/// State that can be owned and mutated by a [`StateActor`](crate::framework::StateActor).
///
/// # Context
/// Dependencies are passed to [`StateActor::run`](crate::framework::StateActor::run)
/// rather than to the constructor, and are then lent to every handler call. Use `()`
/// if no dependencies are needed.
#[async_trait]
pub trait ActorState: Clone + Send + Sync + 'static {
    /// Enum of the operations the state supports.
    type Action: Send + Sync + Debug;

    /// The result type returned by actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    type Context: Send + Sync;

    /// The error type returned by actions.
    ///
    /// Errors are boxed on their way through the channel; clients downcast them back.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short name used in log lines.
    fn state_name() -> &'static str {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown")
    }

    /// Size reported in lifecycle log lines.
    fn size(&self) -> usize {
        0
    }

    /// Apply an action to the state.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
