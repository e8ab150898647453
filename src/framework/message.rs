//! # Messages
//!
//! The request type sent from a [`StateClient`](crate::framework::StateClient) to its
//! [`StateActor`](crate::framework::StateActor).

use crate::framework::error::FrameworkError;
use crate::framework::state::ActorState;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// - **Get**: returns a clone of the current state. For snapshot types this is cheap.
/// - **Action**: applies an [`ActorState::Action`] and returns its result.
#[derive(Debug)]
pub enum StateRequest<S: ActorState> {
    Get {
        respond_to: Response<S>,
    },
    Action {
        action: S::Action,
        respond_to: Response<S::ActionResult>,
    },
}
