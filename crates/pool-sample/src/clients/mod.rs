//! Type-safe wrappers around [`PoolClient`](actor_pool::PoolClient).

pub mod connection_client;

pub use connection_client::*;
