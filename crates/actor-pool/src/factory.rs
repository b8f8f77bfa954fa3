//! # Factory Trait
//!
//! The `Factory` trait is the construction callback a `PoolActor` calls when a borrow
//! request finds the idle store empty and the creation limit allows another instance.
//!
//! The actor owns its factory and calls it with `&mut self` from inside the event loop,
//! so a factory is never invoked concurrently with itself and may keep plain mutable
//! state (counters, connection strings, retry bookkeeping) without locks.
//!
//! A failed `create` is not fatal. The blocking `get` path treats it as "no instance
//! available right now" and queues the caller; `try_get` surfaces it as
//! [`PoolError::Construction`](crate::PoolError::Construction).
//!
//! Any `FnMut() -> Result<T, E>` closure is a factory:
//!
//! ```rust
//! use actor_pool::{PoolActor, PoolConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut next = 0u32;
//!     let factory = move || -> Result<u32, std::io::Error> {
//!         next += 1;
//!         Ok(next)
//!     };
//!
//!     let (actor, client) = PoolActor::with_factory(PoolConfig::default(), factory);
//!     tokio::spawn(actor.run());
//!
//!     assert_eq!(client.get().await.unwrap(), 1);
//! }
//! ```

use async_trait::async_trait;

/// Construction callback that produces new pool instances.
///
/// # Async
/// This trait is `#[async_trait]` so a factory can perform asynchronous setup
/// (opening a socket, handshaking). The actor awaits `create` inline, which means a slow
/// factory delays every other request queued at the actor while it runs.
#[async_trait]
pub trait Factory<T>: Send + 'static {
    /// Reason a construction attempt failed.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produces a fresh instance.
    async fn create(&mut self) -> Result<T, Self::Error>;
}

#[async_trait]
impl<T, E, F> Factory<T> for F
where
    T: Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
    F: FnMut() -> Result<T, E> + Send + 'static,
{
    type Error = E;

    async fn create(&mut self) -> Result<T, E> {
        (*self)()
    }
}

/// Placeholder factory for pools that are only ever filled through `put`.
///
/// `NoFactory` has no values, so a `PoolActor<T, NoFactory>` can never hold one and
/// never attempts construction.
#[derive(Debug)]
pub enum NoFactory {}

#[async_trait]
impl<T: Send + 'static> Factory<T> for NoFactory {
    type Error = std::convert::Infallible;

    async fn create(&mut self) -> Result<T, Self::Error> {
        match *self {}
    }
}
