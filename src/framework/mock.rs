//! # Mock Framework
//!
//! Helpers for testing code that sits *around* a [`StateClient`] (for example a domain
//! client wrapper) without spawning a real actor.
//!
//! | | Mock | Real actor |
//! |---|---|---|
//! | **State** | None, answers are scripted | Real state transitions |
//! | **Error injection** | Trivial (`return_err`) | Needs a failing dependency |
//! | **Use case** | Client wrappers, error mapping | The state's own logic |
//!
//! Two styles are available:
//!
//! - [`create_mock_client`] plus [`expect_get`] / [`expect_action`]: the test receives
//!   each raw request, inspects it, and answers through the responder.
//! - [`MockClient`]: queue expectations up front with a fluent API, then call
//!   [`MockClient::verify`] at the end.
//!
//! ```rust
//! use cart_manager::framework::mock::MockClient;
//! use cart_manager::framework::{ActorState, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, Default)]
//! struct Flag(bool);
//! #[derive(Debug)] enum FlagAction { Toggle }
//! #[derive(Debug, thiserror::Error)] #[error("never")] struct Never;
//!
//! #[async_trait]
//! impl ActorState for Flag {
//!     type Action = FlagAction; type ActionResult = bool; type Context = (); type Error = Never;
//!     async fn handle_action(&mut self, _: FlagAction, _: &()) -> Result<bool, Never> {
//!         self.0 = !self.0;
//!         Ok(self.0)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Flag>::new();
//!     mock.expect_action().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     let result = client.perform_action(FlagAction::Toggle).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::framework::client::StateClient;
use crate::framework::error::FrameworkError;
use crate::framework::message::StateRequest;
use crate::framework::state::ActorState;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<S: ActorState> {
    Get {
        response: Result<S, FrameworkError>,
    },
    Action {
        response: Result<S::ActionResult, FrameworkError>,
    },
}

type Expectations<S> = Arc<Mutex<VecDeque<Expectation<S>>>>;

fn lock<S: ActorState>(expectations: &Expectations<S>) -> MutexGuard<'_, VecDeque<Expectation<S>>> {
    expectations.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A mock client with scripted answers.
///
/// Requests are answered in the order expectations were queued. A request that does
/// not match the next expectation panics the background task, which surfaces in the
/// test as [`FrameworkError::ActorDropped`].
pub struct MockClient<S: ActorState> {
    client: StateClient<S>,
    expectations: Expectations<S>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<S: ActorState> Default for MockClient<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ActorState> MockClient<S> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StateRequest<S>>(100);
        let expectations: Expectations<S> = Arc::new(Mutex::new(VecDeque::new()));
        let queued = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queued).pop_front();

                match (request, expectation) {
                    (StateRequest::Get { respond_to }, Some(Expectation::Get { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        StateRequest::Action { respond_to, .. },
                        Some(Expectation::Action { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: StateClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StateClient<S> {
        self.client.clone()
    }

    /// Expects a `get` request.
    pub fn expect_get(&mut self) -> GetExpectationBuilder<S> {
        GetExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` request.
    pub fn expect_action(&mut self) -> ActionExpectationBuilder<S> {
        ActionExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Panics if any queued expectation was not consumed.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<S: ActorState> {
    expectations: Expectations<S>,
}

impl<S: ActorState> GetExpectationBuilder<S> {
    pub fn return_ok(self, state: S) {
        lock(&self.expectations).push_back(Expectation::Get { response: Ok(state) });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Get {
            response: Err(error),
        });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<S: ActorState> {
    expectations: Expectations<S>,
}

impl<S: ActorState> ActionExpectationBuilder<S> {
    pub fn return_ok(self, result: S::ActionResult) {
        lock(&self.expectations).push_back(Expectation::Action {
            response: Ok(result),
        });
    }

    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Action {
            response: Err(error),
        });
    }
}

// =============================================================================
// RAW RECEIVER HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver the test controls.
pub fn create_mock_client<S: ActorState>(
    buffer_size: usize,
) -> (StateClient<S>, mpsc::Receiver<StateRequest<S>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StateClient::new(sender), receiver)
}

/// Returns the responder if the next message is a Get request.
pub async fn expect_get<S: ActorState>(
    receiver: &mut mpsc::Receiver<StateRequest<S>>,
) -> Option<oneshot::Sender<Result<S, FrameworkError>>> {
    match receiver.recv().await {
        Some(StateRequest::Get { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Returns the action and its responder if the next message is an Action request.
pub async fn expect_action<S: ActorState>(
    receiver: &mut mpsc::Receiver<StateRequest<S>>,
) -> Option<(
    S::Action,
    oneshot::Sender<Result<S::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(StateRequest::Action { action, respond_to }) => Some((action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Tally {
        count: u32,
    }

    #[derive(Debug)]
    enum TallyAction {
        Add(u32),
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Tally error")]
    struct TallyError;

    #[async_trait]
    impl ActorState for Tally {
        type Action = TallyAction;
        type ActionResult = u32;
        type Context = ();
        type Error = TallyError;

        async fn handle_action(
            &mut self,
            action: TallyAction,
            _ctx: &Self::Context,
        ) -> Result<u32, Self::Error> {
            match action {
                TallyAction::Add(n) => self.count += n,
            }
            Ok(self.count)
        }
    }

    #[tokio::test]
    async fn test_raw_mock_client() {
        let (client, mut receiver) = create_mock_client::<Tally>(10);

        let task = tokio::spawn(async move { client.perform_action(TallyAction::Add(3)).await });

        let (action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert!(matches!(action, TallyAction::Add(3)));
        responder.send(Ok(3)).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 3);
    }

    #[tokio::test]
    async fn test_mock_client_with_expectations() {
        let mut mock = MockClient::<Tally>::new();
        mock.expect_action().return_ok(7);
        mock.expect_get().return_ok(Tally { count: 7 });

        let client = mock.client();
        assert_eq!(client.perform_action(TallyAction::Add(7)).await.unwrap(), 7);
        assert_eq!(client.get().await.unwrap(), Tally { count: 7 });

        mock.verify();
    }

    #[tokio::test]
    async fn test_real_actor_serializes_actions() {
        let (actor, client) = crate::framework::StateActor::new(Tally::default(), 4);
        let handle = tokio::spawn(actor.run(()));

        let mut tasks = Vec::new();
        for _ in 0..10 {
            let client = client.clone();
            tasks.push(tokio::spawn(async move {
                client.perform_action(TallyAction::Add(1)).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(client.get().await.unwrap().count, 10);
        drop(client);
        handle.await.unwrap();
    }
}
