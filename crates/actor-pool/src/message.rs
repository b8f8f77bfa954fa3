//! # Pool Messages
//!
//! This module defines the message types used for communication between
//! the `PoolClient` and the `PoolActor`.

use crate::error::PoolError;
use std::time::Duration;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, PoolError>>;

/// Internal message type sent to the actor to request operations.
///
/// Every variant that needs an answer carries its own `respond_to` channel. The actor
/// replies on it exactly once; a `Get` that has to wait keeps its channel in the
/// waiter queue until a `Put` or a timer expiry settles it.
///
/// `Put`, `SetMax` and `SetTimeout` are fire-and-forget: the caller only waits for the
/// actor's inbox to accept them.
#[derive(Debug)]
pub enum PoolRequest<T> {
    Get {
        respond_to: Response<T>,
    },
    TryGet {
        respond_to: Response<T>,
    },
    Put {
        item: T,
    },
    SetMax {
        max: usize,
    },
    SetTimeout {
        timeout: Option<Duration>,
    },
    Status {
        respond_to: Response<PoolStatus>,
    },
}

/// Point-in-time view of the actor's state, as returned by `PoolClient::status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    /// Instances sitting in the idle store.
    pub idle: usize,
    /// Borrow requests queued behind the idle store.
    pub waiting: usize,
    /// Instances produced by the factory so far.
    pub created: usize,
    /// Creation limit. `0` means unlimited.
    pub max: usize,
    /// Wait applied to newly queued requests. `None` means forever.
    pub timeout: Option<Duration>,
}
