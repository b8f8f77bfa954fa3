//! # Connection Client
//!
//! Provides a high-level API over the connection pool.
//! It wraps a `PoolClient<Connection>` and exposes domain-specific methods.
use crate::connection_pool::ConnectionError;
use crate::model::Connection;
use actor_pool::{PoolClient, PoolError, PoolStatus, Pooler};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for borrowing pooled connections.
#[derive(Clone)]
pub struct ConnectionClient {
    inner: PoolClient<Connection>,
}

impl ConnectionClient {
    pub fn new(inner: PoolClient<Connection>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Pooler<Connection> for ConnectionClient {
    type Error = ConnectionError;

    fn inner(&self) -> &PoolClient<Connection> {
        &self.inner
    }

    fn map_error(e: PoolError) -> Self::Error {
        ConnectionError::from(e)
    }
}

impl ConnectionClient {
    /// Borrows a connection, runs `sql` on it and returns the connection to the pool.
    #[instrument(skip(self))]
    pub async fn run_query(&self, sql: &str) -> Result<String, ConnectionError> {
        let mut conn = self.get().await?;
        let row = conn.execute(sql);
        debug!(id = %conn.id, "Query done");
        self.put(conn).await?;
        Ok(row)
    }

    /// Changes how many connections the pool may open. `0` lifts the cap.
    #[instrument(skip(self))]
    pub async fn resize(&self, max: usize) -> Result<(), ConnectionError> {
        debug!("Sending request");
        self.inner.set_max(max).await.map_err(Self::map_error)
    }

    /// Changes how long later borrowers wait for a connection.
    #[instrument(skip(self))]
    pub async fn set_wait(&self, wait: Duration) -> Result<(), ConnectionError> {
        debug!("Sending request");
        self.inner.set_timeout(wait).await.map_err(Self::map_error)
    }

    pub async fn stats(&self) -> Result<PoolStatus, ConnectionError> {
        self.inner.status().await.map_err(Self::map_error)
    }
}
