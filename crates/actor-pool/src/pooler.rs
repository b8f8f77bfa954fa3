//! # Pooler Trait
//!
//! Provides a common interface for domain-specific pool wrappers, adding default `get`
//! and `put` methods built on top of a generic `PoolClient`.
use crate::{PoolClient, PoolError};
use async_trait::async_trait;

/// Trait for domain-specific pool clients to inherit the borrow/return operations.
///
/// Implementors supply the inner [`PoolClient`] and a mapping into their own error type;
/// `get` and `put` come for free.
///
/// # Example
///
/// ```rust
/// use actor_pool::{PoolClient, PoolError, Pooler};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct Buffer(Vec<u8>);
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("buffer pool: {0}")]
/// struct BufferError(String);
///
/// struct BufferPool {
///     inner: PoolClient<Buffer>,
/// }
///
/// #[async_trait]
/// impl Pooler<Buffer> for BufferPool {
///     type Error = BufferError;
///
///     fn inner(&self) -> &PoolClient<Buffer> {
///         &self.inner
///     }
///
///     fn map_error(e: PoolError) -> Self::Error {
///         BufferError(e.to_string())
///     }
/// }
///
/// async fn usage(pool: BufferPool) -> Result<(), BufferError> {
///     // get() and put() are provided automatically!
///     let buffer = pool.get().await?;
///     pool.put(buffer).await
/// }
/// ```
#[async_trait]
pub trait Pooler<T: Send + 'static>: Send + Sync {
    /// The domain-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic PoolClient.
    fn inner(&self) -> &PoolClient<T>;

    /// Map pool errors to the domain error type.
    fn map_error(e: PoolError) -> Self::Error;

    /// Borrow an instance.
    #[tracing::instrument(skip(self))]
    async fn get(&self) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get().await.map_err(Self::map_error)
    }

    /// Return a borrowed instance.
    #[tracing::instrument(skip_all)]
    async fn put(&self, item: T) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().put(item).await.map_err(Self::map_error)
    }
}
