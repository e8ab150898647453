//! # State Actor
//!
//! The "server" half of the actor: it owns the state and the receiving end of the
//! channel, and processes messages one at a time until every client is dropped.

use crate::framework::client::StateClient;
use crate::framework::error::FrameworkError;
use crate::framework::message::StateRequest;
use crate::framework::state::ActorState;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that owns one value of `S`.
///
/// **Concurrency Model**:
/// The run loop handles one request to completion before receiving the next, so two
/// actions never interleave even when a handler awaits an outbound call. The state is
/// therefore held without a `Mutex`.
///
/// # Usage Pattern
///
/// 1.  **Create**: `StateActor::new(initial, capacity)` returns the actor and a client.
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop on a Tokio task.
///
/// ```rust
/// use cart_manager::framework::{ActorState, StateActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug, Default)]
/// struct Counter(u32);
///
/// #[derive(Debug)]
/// enum CounterAction { Incr }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("never")]
/// struct Never;
///
/// #[async_trait]
/// impl ActorState for Counter {
///     type Action = CounterAction;
///     type ActionResult = u32;
///     type Context = ();
///     type Error = Never;
///
///     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, Never> {
///         self.0 += 1;
///         Ok(self.0)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = StateActor::new(Counter::default(), 8);
///     tokio::spawn(actor.run(()));
///     assert_eq!(client.perform_action(CounterAction::Incr).await.unwrap(), 1);
///     assert_eq!(client.get().await.unwrap().0, 1);
/// }
/// ```
pub struct StateActor<S: ActorState> {
    receiver: mpsc::Receiver<StateRequest<S>>,
    state: S,
}

impl<S: ActorState> StateActor<S> {
    /// Creates a new `StateActor` holding `initial` and its associated `StateClient`.
    ///
    /// # Arguments
    ///
    /// * `initial` - The state the actor starts with.
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client wait until there is space.
    pub fn new(initial: S, buffer_size: usize) -> (Self, StateClient<S>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            state: initial,
        };
        (actor, StateClient::new(sender))
    }

    /// Runs the event loop until the channel closes.
    pub async fn run(mut self, context: S::Context) {
        let state_name = S::state_name();
        info!(state_name, size = self.state.size(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StateRequest::Get { respond_to } => {
                    debug!(state_name, "Get");
                    let _ = respond_to.send(Ok(self.state.clone()));
                }
                StateRequest::Action { action, respond_to } => {
                    debug!(state_name, ?action, "Action");
                    let result = self
                        .state
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::StateError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(state_name, size = self.state.size(), "Action ok"),
                        Err(e) => warn!(state_name, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(state_name, size = self.state.size(), "Shutdown");
    }
}
