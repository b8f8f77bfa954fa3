//! # Connection Pool Sample
//!
//! Runs more concurrent queries than the pool may open connections, then shows that the
//! connections were shared.
//!
//! ```bash
//! RUST_LOG=info cargo run -p pool-sample
//! RUST_LOG=debug cargo run -p pool-sample   # every borrow, queue and hand-off
//! ```

use actor_pool::tracing::setup_tracing;
use actor_pool::PoolConfig;
use pool_sample::lifecycle::ConnectionSystem;
use pool_sample::model::ConnectionSettings;
use std::time::Duration;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let settings = ConnectionSettings {
        endpoint: "db.internal:5432".to_string(),
        handshake_ms: 20,
        failing_attempts: 1,
        pool: PoolConfig::default()
            .with_max(3)
            .with_timeout(Duration::from_secs(2)),
    };
    info!(?settings, "Starting connection pool sample");

    let system = ConnectionSystem::new(&settings);

    let mut queries = Vec::new();
    for n in 0..8 {
        let client = system.client.clone();
        let span = tracing::info_span!("query", n);
        queries.push(tokio::spawn(
            async move { client.run_query(&format!("SELECT {n}")).await }.instrument(span),
        ));
    }

    for query in queries {
        match query.await.map_err(|e| e.to_string())? {
            Ok(row) => info!(%row, "Query succeeded"),
            Err(e) => error!(error = %e, "Query failed"),
        }
    }

    let stats = system.client.stats().await.map_err(|e| e.to_string())?;
    info!(
        created = stats.created,
        idle = stats.idle,
        waiting = stats.waiting,
        "Pool stats"
    );

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
