//! Connection factory for the sample pool.

use crate::connection_pool::ConnectionError;
use crate::model::{Connection, ConnectionId, ConnectionSettings};
use actor_pool::Factory;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Opens new [`Connection`]s for the pool.
///
/// The pool actor owns the connector and never calls it concurrently, so the id counter
/// and the failure budget are plain fields.
#[derive(Debug)]
pub struct Connector {
    endpoint: String,
    handshake: Duration,
    failures_left: u32,
    next_id: u32,
}

impl Connector {
    pub fn new(settings: &ConnectionSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            handshake: settings.handshake(),
            failures_left: settings.failing_attempts,
            next_id: 1,
        }
    }
}

#[async_trait]
impl Factory<Connection> for Connector {
    type Error = ConnectionError;

    async fn create(&mut self) -> Result<Connection, ConnectionError> {
        if !self.handshake.is_zero() {
            tokio::time::sleep(self.handshake).await;
        }
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(ConnectionError::ConnectFailed(self.endpoint.clone()));
        }

        let id = ConnectionId(self.next_id);
        self.next_id += 1;
        debug!(%id, endpoint = %self.endpoint, "Connected");
        Ok(Connection::new(id, self.endpoint.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn numbers_connections_after_failures() {
        let settings = ConnectionSettings {
            failing_attempts: 1,
            ..ConnectionSettings::default()
        };
        let mut connector = Connector::new(&settings);

        assert!(matches!(
            connector.create().await,
            Err(ConnectionError::ConnectFailed(_))
        ));
        assert_eq!(connector.create().await.unwrap().id, ConnectionId(1));
        assert_eq!(connector.create().await.unwrap().id, ConnectionId(2));
    }
}
