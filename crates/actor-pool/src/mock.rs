//! # Mock Pool & Testing Guide
//!
//! The `MockPool<T>` type hands out a real `PoolClient<T>` whose requests are answered
//! from a queue of expectations instead of by a `PoolActor`. It lets you test code that
//! borrows from a pool (retry loops, wrappers implementing [`Pooler`](crate::Pooler),
//! error mapping) without depending on timing.
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockPool | Real PoolActor |
//! |---------|----------|----------------|
//! | **Speed** | Instant (in-memory) | Fast (but involves tokio spawn) |
//! | **Determinism** | 100% Deterministic | Subject to scheduler and timers |
//! | **State** | No real state (expectations) | Real idle store and waiter queue |
//! | **Use Case** | Unit testing logic *around* the client | Testing pool semantics or full system |
//! | **Error Injection** | Easy (`return_err`) | Hard (needs an exhausted pool or real timeouts) |
//!
//! ## Example
//!
//! ```rust
//! use actor_pool::mock::MockPool;
//! use actor_pool::PoolError;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockPool::<u32>::new();
//!     mock.expect_get().return_ok(7);
//!     mock.expect_put();
//!     mock.expect_get().return_err(PoolError::Timeout(Duration::from_millis(5)));
//!
//!     let client = mock.client();
//!     let item = client.get().await.unwrap();
//!     client.put(item).await.unwrap();
//!     assert!(client.get().await.unwrap_err().is_timeout());
//!
//!     mock.verify();
//!     assert_eq!(mock.returned(), vec![7]);
//! }
//! ```
//!
//! ## Mocking Utilities
//!
//! Use [`create_mock_pool`] to get a client and the raw request receiver, or use the
//! fluent [`MockPool`] API.

use crate::client::PoolClient;
use crate::error::PoolError;
use crate::message::{PoolRequest, PoolStatus, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the answer to give it.
enum Expectation<T> {
    Get { response: Result<T, PoolError> },
    TryGet { response: Result<T, PoolError> },
    Put,
    SetMax { max: usize },
    SetTimeout { timeout: Option<Duration> },
    Status { response: Result<PoolStatus, PoolError> },
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock pool with expectation tracking for fluent testing.
///
/// Expectations are consumed in the order they were registered. A request that does not
/// match the next expectation panics the background task, which callers observe as
/// [`PoolError::ActorDropped`] or [`PoolError::ActorClosed`].
pub struct MockPool<T> {
    client: PoolClient<T>,
    expectations: Expectations<T>,
    returned: Arc<Mutex<Vec<T>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Send + 'static> Default for MockPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Send + 'static> MockPool<T> {
    /// Creates a new mock pool with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<PoolRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let returned = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let returned_clone = returned.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (PoolRequest::Get { respond_to }, Some(Expectation::Get { response }))
                    | (PoolRequest::TryGet { respond_to }, Some(Expectation::TryGet { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (PoolRequest::Put { item }, Some(Expectation::Put)) => {
                        returned_clone.lock().unwrap().push(item);
                    }
                    (PoolRequest::SetMax { max }, Some(Expectation::SetMax { max: expected })) => {
                        assert_eq!(max, expected, "Unexpected limit");
                    }
                    (
                        PoolRequest::SetTimeout { timeout },
                        Some(Expectation::SetTimeout { timeout: expected }),
                    ) => {
                        assert_eq!(timeout, expected, "Unexpected timeout");
                    }
                    (PoolRequest::Status { respond_to }, Some(Expectation::Status { response })) => {
                        let _ = respond_to.send(response);
                    }
                    _ => {
                        panic!("Unexpected request or expectation mismatch");
                    }
                }
            }
        });

        Self {
            client: PoolClient::new(sender),
            expectations,
            returned,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> PoolClient<T> {
        self.client.clone()
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            blocking: true,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `try_get` operation.
    pub fn expect_try_get(&mut self) -> GetExpectationBuilder<T> {
        GetExpectationBuilder {
            blocking: false,
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `put` operation. The returned item is kept; see [`MockPool::returned`].
    pub fn expect_put(&mut self) {
        self.push(Expectation::Put);
    }

    /// Expects `set_max(max)`.
    pub fn expect_set_max(&mut self, max: usize) {
        self.push(Expectation::SetMax { max });
    }

    /// Expects `set_timeout(timeout)`.
    pub fn expect_set_timeout(&mut self, timeout: Duration) {
        self.push(Expectation::SetTimeout {
            timeout: crate::config::normalize_timeout(timeout),
        });
    }

    /// Expects a `status` operation answered with `status`.
    pub fn expect_status(&mut self, status: PoolStatus) {
        self.push(Expectation::Status {
            response: Ok(status),
        });
    }

    /// Items received through `put`, in arrival order. Draining: a second call only
    /// sees items put since the first.
    pub fn returned(&self) -> Vec<T> {
        std::mem::take(&mut *self.returned.lock().unwrap())
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn push(&mut self, expectation: Expectation<T>) {
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// Builder for `get` and `try_get` expectations.
pub struct GetExpectationBuilder<T> {
    blocking: bool,
    expectations: Expectations<T>,
}

impl<T> GetExpectationBuilder<T> {
    /// Sets the expectation to hand out `item`.
    pub fn return_ok(self, item: T) {
        self.respond(Ok(item));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: PoolError) {
        self.respond(Err(error));
    }

    fn respond(self, response: Result<T, PoolError>) {
        let expectation = if self.blocking {
            Expectation::Get { response }
        } else {
            Expectation::TryGet { response }
        };
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a pool client and the receiver its requests arrive on.
///
/// # Testing Strategy
/// Instead of a real `PoolActor`, the test holds the receiving end and answers requests
/// itself. This makes it possible to hold a reply back, answer out of order, or drop the
/// reply channel to simulate a vanished actor.
///
/// **Note**: Consider using [`MockPool`] for a more fluent API.
pub fn create_mock_pool<T>(buffer_size: usize) -> (PoolClient<T>, mpsc::Receiver<PoolRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (PoolClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T>(receiver: &mut mpsc::Receiver<PoolRequest<T>>) -> Option<Response<T>> {
    match receiver.recv().await {
        Some(PoolRequest::Get { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Put request
pub async fn expect_put<T>(receiver: &mut mpsc::Receiver<PoolRequest<T>>) -> Option<T> {
    match receiver.recv().await {
        Some(PoolRequest::Put { item }) => Some(item),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Connection {
        id: u32,
    }

    #[tokio::test]
    async fn test_raw_mock_pool() {
        let (client, mut receiver) = create_mock_pool::<Connection>(10);

        let borrower = tokio::spawn(async move {
            let conn = client.get().await?;
            client.put(conn).await?;
            Ok::<_, PoolError>(())
        });

        let responder = expect_get(&mut receiver)
            .await
            .expect("Expected Get request");
        responder.send(Ok(Connection { id: 3 })).unwrap();

        let returned = expect_put(&mut receiver)
            .await
            .expect("Expected Put request");
        assert_eq!(returned, Connection { id: 3 });

        borrower.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_mock_pool_with_expectations() {
        let mut mock = MockPool::<Connection>::new();
        mock.expect_set_max(2);
        mock.expect_try_get().return_err(PoolError::LimitReached);
        mock.expect_get().return_ok(Connection { id: 1 });
        mock.expect_put();

        let client = mock.client();
        client.set_max(2).await.unwrap();
        assert!(matches!(
            client.try_get().await,
            Err(PoolError::LimitReached)
        ));
        let conn = client.get().await.unwrap();
        assert_eq!(conn.id, 1);
        client.put(conn).await.unwrap();

        // Fire-and-forget requests are answered asynchronously; a status round-trip
        // guarantees the put has been recorded.
        mock.expect_status(PoolStatus {
            idle: 0,
            waiting: 0,
            created: 0,
            max: 2,
            timeout: None,
        });
        client.status().await.unwrap();

        mock.verify();
        assert_eq!(mock.returned(), vec![Connection { id: 1 }]);
    }

    #[tokio::test]
    async fn test_mismatch_drops_reply() {
        let mut mock = MockPool::<Connection>::new();
        mock.expect_put();

        let client = mock.client();
        let result = client.get().await;
        assert!(matches!(result, Err(PoolError::ActorDropped)));
    }
}
