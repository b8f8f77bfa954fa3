//! # Connection Pool
//!
//! This module wires the generic [`PoolActor`](actor_pool::PoolActor) to the sample's
//! [`Connection`] type.
//!
//! ## Structure
//!
//! - [`connector`] - [`Connector`], the [`Factory`](actor_pool::Factory) that opens connections
//! - [`error`] - [`ConnectionError`] type for type-safe error handling
//! - [`new()`] - Creates the pool actor and its client
//!
//! ## Usage
//!
//! ```rust
//! use actor_pool::Pooler;
//! use pool_sample::connection_pool;
//! use pool_sample::model::ConnectionSettings;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = connection_pool::new(&ConnectionSettings::default());
//!     tokio::spawn(actor.run());
//!
//!     let row = client.run_query("SELECT 1").await?;
//!     assert_eq!(row, "conn_1 #1: SELECT 1");
//!
//!     let conn = client.get().await?;
//!     assert_eq!(conn.queries, 1);
//!     client.put(conn).await?;
//!     Ok(())
//! }
//! ```

pub mod connector;
pub mod error;

pub use connector::*;
pub use error::*;

use crate::clients::ConnectionClient;
use crate::model::{Connection, ConnectionSettings};
use actor_pool::PoolActor;

/// Creates a connection pool actor and its client.
pub fn new(settings: &ConnectionSettings) -> (PoolActor<Connection, Connector>, ConnectionClient) {
    let connector = Connector::new(settings);
    let (actor, generic_client) = PoolActor::with_factory(settings.pool.clone(), connector);
    (actor, ConnectionClient::new(generic_client))
}
