//! # Actor Pool
//!
//! A generic object pool for expensive-to-build resources, run as a single actor on Tokio.
//! Many tasks borrow and return instances concurrently; the pool reuses idle instances
//! before building new ones, caps how many are ever built, and can bound how long a
//! borrower waits.
//!
//! ## Why an Actor?
//!
//! - All pool state (idle instances, waiting borrowers, counters) lives in one task
//! - Every operation is a message, processed strictly one at a time
//! - No locks, and no race between "a timer fired" and "an instance came back": whichever
//!   message reaches the actor first wins, and the other finds nothing to do
//!
//! ## Quick Start
//!
//! ```rust
//! use actor_pool::{PoolActor, PoolConfig};
//! use std::time::Duration;
//!
//! #[derive(Debug)]
//! struct Connection {
//!     id: u32,
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut next_id = 0;
//!     let factory = move || -> Result<Connection, std::io::Error> {
//!         next_id += 1;
//!         Ok(Connection { id: next_id })
//!     };
//!
//!     // At most two connections, and nobody waits longer than 50ms.
//!     let config = PoolConfig::default()
//!         .with_max(2)
//!         .with_timeout(Duration::from_millis(50));
//!     let (actor, client) = PoolActor::with_factory(config, factory);
//!     tokio::spawn(actor.run());
//!
//!     let a = client.get().await.unwrap();
//!     let b = client.get().await.unwrap();
//!     assert_eq!((a.id, b.id), (1, 2));
//!
//!     // Limit reached and nothing idle: the third borrower times out.
//!     assert!(client.get().await.unwrap_err().is_timeout());
//!
//!     client.put(a).await.unwrap();
//!     assert_eq!(client.get().await.unwrap().id, 1);
//! }
//! ```
//!
//! ## Ordering
//!
//! - **Idle reuse is LIFO**: the most recently returned instance is handed out first.
//! - **Waiters are FIFO**: borrowers that had to queue are served in arrival order, and a
//!   returned instance goes straight to the oldest of them without touching the idle store.
//!
//! ## Construction Failures
//!
//! A failing [`Factory`] is treated as "nothing available yet". `get` queues the caller
//! (who then waits for a `put` or the timeout); `try_get` reports the failure as
//! [`PoolError::Construction`].
//!
//! ## Testing
//!
//! [`mock::MockPool`] answers a real [`PoolClient`] from scripted expectations, for testing
//! code built around a pool without spawning the actor.

pub mod actor;
pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod message;
pub mod mock;
pub mod pooler;
pub mod tracing;
mod waiter;

// Re-export core types for convenience
pub use actor::PoolActor;
pub use client::PoolClient;
pub use config::PoolConfig;
pub use error::PoolError;
pub use factory::{Factory, NoFactory};
pub use message::{PoolRequest, PoolStatus, Response};
pub use pooler::Pooler;
