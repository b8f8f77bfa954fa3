use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the connector stamps on each connection it opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionId(pub u32);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn_{}", self.0)
    }
}

/// A simulated database connection.
///
/// Opening one is the expensive part (see [`Connector`](crate::connection_pool::Connector)),
/// so connections are borrowed from a pool rather than opened per query.
#[derive(Debug, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub endpoint: String,
    /// Queries executed over the lifetime of this connection.
    pub queries: u32,
}

impl Connection {
    pub fn new(id: ConnectionId, endpoint: impl Into<String>) -> Self {
        Self {
            id,
            endpoint: endpoint.into(),
            queries: 0,
        }
    }

    /// Runs `sql` and returns a fake result row naming the connection that served it.
    pub fn execute(&mut self, sql: &str) -> String {
        self.queries += 1;
        format!("{} #{}: {}", self.id, self.queries, sql)
    }
}
