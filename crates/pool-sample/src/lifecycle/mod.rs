//! # System Lifecycle
//!
//! Starts the connection pool actor, hands out its client, and shuts it down cleanly.
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop the client** - closes the sender side of the pool's inbox
//! 2. **Actor detects closure** - `receiver.recv()` returns `None`
//! 3. **Actor logs final state** - idle, waiting and created counts
//! 4. **Await completion** - the join handle resolves
//!
//! Clones of the client held elsewhere keep the actor alive, so drop them before calling
//! [`ConnectionSystem::shutdown`].

use crate::clients::ConnectionClient;
use crate::model::ConnectionSettings;
use tracing::{error, info};

/// Runtime orchestrator for the sample connection pool.
pub struct ConnectionSystem {
    /// Client for borrowing connections.
    pub client: ConnectionClient,

    /// Task handle for the pool actor (used for graceful shutdown).
    handle: tokio::task::JoinHandle<()>,
}

impl ConnectionSystem {
    /// Creates the pool and spawns its actor. Must be called inside a Tokio runtime.
    pub fn new(settings: &ConnectionSettings) -> Self {
        let (actor, client) = crate::connection_pool::new(settings);
        let handle = tokio::spawn(actor.run());
        info!(endpoint = %settings.endpoint, "Connection system started");
        Self { client, handle }
    }

    /// Drops the client and waits for the actor to finish.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the actor shut down cleanly
    /// - `Err(String)` if the actor task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.client);

        if let Err(e) = self.handle.await {
            error!("Pool actor failed: {:?}", e);
            return Err(format!("Pool actor failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
