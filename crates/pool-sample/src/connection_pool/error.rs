//! Error types for the connection pool.

use thiserror::Error;

/// Errors that can occur while using pooled connections.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConnectionError {
    /// The backend refused a new connection.
    #[error("Could not connect to {0}")]
    ConnectFailed(String),

    /// No connection became free within the configured wait.
    #[error("Timed out waiting for a connection")]
    Timeout,

    /// An error occurred while communicating with the pool actor.
    #[error("Pool communication error: {0}")]
    PoolCommunicationError(String),
}

impl From<actor_pool::PoolError> for ConnectionError {
    fn from(e: actor_pool::PoolError) -> Self {
        match e {
            actor_pool::PoolError::Timeout(_) => ConnectionError::Timeout,
            other => ConnectionError::PoolCommunicationError(other.to_string()),
        }
    }
}
