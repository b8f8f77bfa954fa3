use actor_pool::PoolConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings for the sample connection pool.
///
/// Deserializable so it can be embedded in an application config file:
///
/// ```text
/// endpoint = "db.internal:5432"
/// handshake_ms = 5
///
/// [pool]
/// max = 3
/// timeout_ms = 500
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    pub endpoint: String,
    /// Simulated cost of opening a connection.
    pub handshake_ms: u64,
    /// Number of connection attempts that fail before the backend comes up.
    pub failing_attempts: u32,
    pub pool: PoolConfig,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            endpoint: "localhost:5432".to_string(),
            handshake_ms: 0,
            failing_attempts: 0,
            pool: PoolConfig::default(),
        }
    }
}

impl ConnectionSettings {
    pub fn handshake(&self) -> Duration {
        Duration::from_millis(self.handshake_ms)
    }
}
