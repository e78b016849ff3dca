//! # Mock Framework
//!
//! Utilities for testing clients and the sync engine without spawning real stores.
//!
//! Use [`MockClient`] to script responses with a fluent expectation API, or
//! [`create_mock_client`] plus the `expect_*` helpers to inspect raw requests.
//! Injecting collaborator failures and proving that no write request was ever
//! sent are both done through these helpers.

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected request to the mock client, with its canned response.
enum Expectation<T: ActorEntity> {
    Exists {
        key: T::Key,
        response: Result<bool, FrameworkError>,
    },
    Get {
        key: T::Key,
        response: Result<Option<T>, FrameworkError>,
    },
    Save {
        response: Result<T::Key, FrameworkError>,
    },
    Action {
        key: T::Key,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

/// A mock client with expectation tracking for fluent testing.
///
/// Requests are matched in order against the queued expectations. A request
/// for the wrong key, or of the wrong kind, panics the mock task; the caller
/// then observes [`FrameworkError::ActorDropped`] and every later request
/// observes [`FrameworkError::ActorClosed`].
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<CatalogProduct>::new();
/// mock.expect_exists("SKU-1".to_string()).return_ok(false);
/// mock.expect_save().return_ok("SKU-1".to_string());
///
/// let client = mock.client();
/// // Use client in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
    saved: Arc<Mutex<Vec<T>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations = Arc::new(Mutex::new(VecDeque::new()));
        let saved = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let saved_clone = saved.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Exists { key, respond_to },
                        Some(Expectation::Exists { key: expected, response }),
                    ) => {
                        assert_eq!(key, expected, "Exists requested for an unexpected key");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Get { key, respond_to },
                        Some(Expectation::Get { key: expected, response }),
                    ) => {
                        assert_eq!(key, expected, "Get requested for an unexpected key");
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Save { entity, respond_to },
                        Some(Expectation::Save { response }),
                    ) => {
                        saved_clone.lock().unwrap().push(entity);
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Action { key, respond_to, .. },
                        Some(Expectation::Action { key: expected, response }),
                    ) => {
                        assert_eq!(key, expected, "Action requested for an unexpected key");
                        let _ = respond_to.send(response);
                    }
                    (request, _) => {
                        panic!("Unexpected request or expectation mismatch: {:?}", request);
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            saved,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    /// Expects an `exists` operation.
    pub fn expect_exists(&mut self, key: T::Key) -> ExistsExpectationBuilder<T> {
        ExistsExpectationBuilder {
            key,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, key: T::Key) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            key,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `save` operation.
    pub fn expect_save(&mut self) -> SaveExpectationBuilder<T> {
        SaveExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, key: T::Key) -> ActionExpectationBuilder<T> {
        ActionExpectationBuilder {
            key,
            expectations: self.expectations.clone(),
        }
    }

    /// Entities received by `save` requests, in arrival order.
    pub fn saved(&self) -> Vec<T> {
        self.saved.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for `exists` expectations.
pub struct ExistsExpectationBuilder<T: ActorEntity> {
    key: T::Key,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ActorEntity> ExistsExpectationBuilder<T> {
    pub fn return_ok(self, found: bool) {
        self.push(Ok(found));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<bool, FrameworkError>) {
        self.expectations.lock().unwrap().push_back(Expectation::Exists {
            key: self.key,
            response,
        });
    }
}

/// Builder for `get` expectations.
pub struct GetExpectationBuilder<T: ActorEntity> {
    key: T::Key,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ActorEntity> GetExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<T>) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Option<T>, FrameworkError>) {
        self.expectations.lock().unwrap().push_back(Expectation::Get {
            key: self.key,
            response,
        });
    }
}

/// Builder for `save` expectations.
pub struct SaveExpectationBuilder<T: ActorEntity> {
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ActorEntity> SaveExpectationBuilder<T> {
    pub fn return_ok(self, key: T::Key) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Save { response: Ok(key) });
    }

    pub fn return_err(self, error: FrameworkError) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Save {
                response: Err(error),
            });
    }
}

/// Builder for `action` expectations.
pub struct ActionExpectationBuilder<T: ActorEntity> {
    key: T::Key,
    expectations: Arc<Mutex<VecDeque<Expectation<T>>>>,
}

impl<T: ActorEntity> ActionExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, result: T::ActionResult) {
        self.push(Ok(result));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T::ActionResult, FrameworkError>) {
        self.expectations.lock().unwrap().push_back(Expectation::Action {
            key: self.key,
            response,
        });
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// The client sends to a channel the test controls. The test inspects each
/// request as it arrives and answers through the embedded responder, which
/// lets it simulate success, failure or delays deterministically.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Exists request
pub async fn expect_exists<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Key, oneshot::Sender<Result<bool, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Exists { key, respond_to }) => Some((key, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Key, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { key, respond_to }) => Some((key, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Save request
pub async fn expect_save<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T, oneshot::Sender<Result<T::Key, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Save { entity, respond_to }) => Some((entity, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Key,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            key,
            action,
            respond_to,
        }) => Some((key, action, respond_to)),
        _ => None,
    }
}
