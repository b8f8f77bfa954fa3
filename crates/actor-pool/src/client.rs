//! # Pool Client
//!
//! This module defines the handle callers use to borrow from and return to a pool.

use crate::config::normalize_timeout;
use crate::error::PoolError;
use crate::message::{PoolRequest, PoolStatus};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// ## PoolClient
///
/// The `PoolClient<T>` turns each pool operation into one message for a `PoolActor<T>`.
/// Borrowing waits for the actor's reply on a oneshot channel; everything else only waits
/// for the inbox to accept the message.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive and does not require `T: Clone`.
/// * **At most one reply** – every `get` receives exactly one instance or one error.
/// * **Shutdown** – the actor stops once the last clone is dropped.
pub struct PoolClient<T> {
    sender: mpsc::Sender<PoolRequest<T>>,
}

impl<T> Clone for PoolClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T> PoolClient<T> {
    pub fn new(sender: mpsc::Sender<PoolRequest<T>>) -> Self {
        Self { sender }
    }

    /// Borrows an instance, waiting until one is available or the configured timeout
    /// elapses.
    ///
    /// Without a timeout, and with no factory able to build more, this waits until some
    /// other caller returns an instance.
    pub async fn get(&self) -> Result<T, PoolError> {
        let (respond_to, response) = oneshot::channel();
        self.send(PoolRequest::Get { respond_to }).await?;
        response.await.map_err(|_| PoolError::ActorDropped)?
    }

    /// Borrows an instance only if one is idle or can be built right now.
    pub async fn try_get(&self) -> Result<T, PoolError> {
        let (respond_to, response) = oneshot::channel();
        self.send(PoolRequest::TryGet { respond_to }).await?;
        response.await.map_err(|_| PoolError::ActorDropped)?
    }

    /// Returns an instance to the pool. The oldest waiter, if any, receives it directly.
    pub async fn put(&self, item: T) -> Result<(), PoolError> {
        self.send(PoolRequest::Put { item }).await
    }

    /// Sets the creation limit. `0` means unlimited.
    pub async fn set_max(&self, max: usize) -> Result<(), PoolError> {
        self.send(PoolRequest::SetMax { max }).await
    }

    /// Sets the wait applied to borrow requests queued from now on. `Duration::ZERO`
    /// means wait indefinitely.
    pub async fn set_timeout(&self, timeout: Duration) -> Result<(), PoolError> {
        self.send(PoolRequest::SetTimeout {
            timeout: normalize_timeout(timeout),
        })
        .await
    }

    pub async fn status(&self) -> Result<PoolStatus, PoolError> {
        let (respond_to, response) = oneshot::channel();
        self.send(PoolRequest::Status { respond_to }).await?;
        response.await.map_err(|_| PoolError::ActorDropped)?
    }

    async fn send(&self, request: PoolRequest<T>) -> Result<(), PoolError> {
        self.sender
            .send(request)
            .await
            .map_err(|_| PoolError::ActorClosed)
    }
}
