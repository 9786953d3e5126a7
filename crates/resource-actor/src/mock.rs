//! # Mock Framework
//!
//! Utilities for testing clients and the code built on them without spawning a real
//! `ResourceActor`.
//!
//! Two styles are supported:
//!
//! - **Fluent expectations** with [`MockClient`]: queue the requests you expect and the
//!   answers to give, run the code under test, then call [`MockClient::verify`].
//!   A request that does not match the next expectation is answered with
//!   [`FrameworkError::ActorDropped`], so a stray write surfaces as an error in the code
//!   under test instead of silently succeeding.
//! - **Raw channel** with [`create_mock_client`]: inspect each request yourself and answer
//!   through its responder.
//!
//! ```rust,ignore
//! let mut users = MockClient::<User>::new();
//! users.expect_get(UserId(7)).return_ok(None);
//!
//! let storage = UserClient::new(users.client());
//! let result = lifecycle_using(storage).delete_user(UserId(7)).await;
//!
//! assert!(matches!(result, Err(ServiceError::NotFound(_))));
//! users.verify(); // no Delete request was ever sent
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tracing::warn;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to give it.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn lock<T: ActorEntity>(queue: &Queue<T>) -> MutexGuard<'_, VecDeque<Expectation<T>>> {
    // A poisoned queue only means another test thread panicked; the data is still usable.
    queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Short human-readable form of a request, for failure reports.
fn describe<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { params, .. } => format!("Create({params:?})"),
        ResourceRequest::Get { id, .. } => format!("Get({id})"),
        ResourceRequest::List { .. } => "List".to_string(),
        ResourceRequest::Update { id, update, .. } => format!("Update({id}, {update:?})"),
        ResourceRequest::Delete { id, .. } => format!("Delete({id})"),
        ResourceRequest::Action { id, action, .. } => format!("Action({id}, {action:?})"),
    }
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    unexpected: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let unexpected = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let strays = unexpected.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&queue).pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action {
                            id: expected,
                            response,
                        }),
                    ) if id == expected => {
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        // Dropping the responder makes the caller see `ActorDropped`.
                        let description = describe(&request);
                        warn!(request = %description, "Unexpected request");
                        strays
                            .lock()
                            .unwrap_or_else(|poisoned| poisoned.into_inner())
                            .push(description);
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            unexpected,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ListExpectationBuilder<T> {
        ListExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `create` operation.
    pub fn expect_create(&mut self) -> EntityExpectationBuilder<T> {
        EntityExpectationBuilder {
            kind: EntityOp::Create,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `update` operation on `id`.
    pub fn expect_update(&mut self, id: T::Id) -> EntityExpectationBuilder<T> {
        EntityExpectationBuilder {
            kind: EntityOp::Update(id),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `delete` operation on `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> EntityExpectationBuilder<T> {
        EntityExpectationBuilder {
            kind: EntityOp::Delete(id),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` operation on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            id,
            expectations: self.expectations.clone(),
        }
    }

    /// Verifies that all expectations were met and no unexpected request arrived.
    pub fn verify(&self) {
        let strays = self
            .unexpected
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if !strays.is_empty() {
            panic!("Unexpected requests received: {strays:?}");
        }
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<T>) {
        lock(&self.expectations).push_back(Expectation::Get {
            id: self.id,
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Get {
            id: self.id,
            response: Err(error),
        });
    }
}

/// Builder for `list` expectations.
pub struct ListExpectationBuilder<T: ActorEntity> {
    expectations: Queue<T>,
}

impl<T: ActorEntity> ListExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, items: Vec<T>) {
        lock(&self.expectations).push_back(Expectation::List { response: Ok(items) });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::List {
            response: Err(error),
        });
    }
}

enum EntityOp<Id> {
    Create,
    Update(Id),
    Delete(Id),
}

/// Builder for `create`, `update` and `delete` expectations, which all answer with an entity.
pub struct EntityExpectationBuilder<T: ActorEntity> {
    kind: EntityOp<T::Id>,
    expectations: Queue<T>,
}

impl<T: ActorEntity> EntityExpectationBuilder<T> {
    fn push(self, response: Result<T, FrameworkError>) {
        let expectation = match self.kind {
            EntityOp::Create => Expectation::Create { response },
            EntityOp::Update(id) => Expectation::Update { id, response },
            EntityOp::Delete(id) => Expectation::Delete { id, response },
        };
        lock(&self.expectations).push_back(expectation);
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, entity: T) {
        self.push(Ok(entity));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    id: T::Id,
    expectations: Queue<T>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, result: T::ActionResult) {
        lock(&self.expectations).push_back(Expectation::Action {
            id: self.id,
            response: Ok(result),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        lock(&self.expectations).push_back(Expectation::Action {
            id: self.id,
            response: Err(error),
        });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver the test controls.
///
/// Useful when the test needs to look at the payload itself (e.g. to check what a
/// client actually sent), which the fluent [`MockClient`] does not expose.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Update,
    tokio::sync::oneshot::Sender<Result<T, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    tokio::sync::oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::convert::Infallible;

    #[derive(Clone, Debug, PartialEq)]
    struct Account {
        id: u32,
        email: String,
    }

    #[derive(Debug)]
    struct AccountCreate {
        email: String,
    }

    #[async_trait]
    impl ActorEntity for Account {
        type Id = u32;
        type Create = AccountCreate;
        type Update = String;
        type Action = ();
        type ActionResult = ();
        type Context = ();
        type Error = Infallible;

        fn from_create_params(id: u32, params: AccountCreate) -> Result<Self, Infallible> {
            Ok(Self {
                id,
                email: params.email,
            })
        }

        async fn on_update(&mut self, email: String, _ctx: &()) -> Result<(), Infallible> {
            self.email = email;
            Ok(())
        }

        async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), Infallible> {
            Ok(())
        }
    }

    fn account(id: u32, email: &str) -> Account {
        Account {
            id,
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_expectations_in_order() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_create().return_ok(account(1, "a@example.com"));
        mock.expect_get(1).return_ok(Some(account(1, "a@example.com")));
        mock.expect_update(1).return_ok(account(1, "b@example.com"));
        mock.expect_list().return_ok(vec![account(1, "b@example.com")]);
        mock.expect_delete(1).return_ok(account(1, "b@example.com"));

        let client = mock.client();
        let created = client
            .create(AccountCreate {
                email: "a@example.com".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.id, 1);
        assert!(client.get(1).await.unwrap().is_some());
        assert_eq!(
            client.update(1, "b@example.com".into()).await.unwrap().email,
            "b@example.com"
        );
        assert_eq!(client.list().await.unwrap().len(), 1);
        assert_eq!(client.delete(1).await.unwrap().id, 1);

        mock.verify();
    }

    #[tokio::test]
    async fn test_unexpected_request_is_dropped() {
        let mut mock = MockClient::<Account>::new();
        mock.expect_get(1).return_ok(None);

        let client = mock.client();
        let result = client.delete(1).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected requests received")]
    async fn test_verify_reports_stray_requests() {
        let mock = MockClient::<Account>::new();
        let _ = mock.client().get(9).await;
        mock.verify();
    }
}
