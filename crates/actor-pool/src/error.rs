//! # Pool Errors
//!
//! This module defines the error type returned by every pool operation.
//! The blocking `get` path only ever produces [`PoolError::Timeout`] (or one of the
//! channel errors if the actor is gone); the other variants belong to `try_get`.

use std::time::Duration;

/// Errors that can occur when talking to a pool actor.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("Pool actor closed")]
    ActorClosed,
    #[error("Pool actor dropped response channel")]
    ActorDropped,
    #[error("Timed out after {0:?} waiting for an instance")]
    Timeout(Duration),
    #[error("Limit reached: no instance can be obtained")]
    LimitReached,
    #[error("Construction failed: {0}")]
    Construction(Box<dyn std::error::Error + Send + Sync>),
}

impl PoolError {
    /// Returns `true` if the error is a waiter expiry.
    pub fn is_timeout(&self) -> bool {
        matches!(self, PoolError::Timeout(_))
    }
}
