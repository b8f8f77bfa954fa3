//! # Pool Actor
//!
//! This module defines the `PoolActor`, the single task that owns every piece of pool
//! state. It implements the "Server" side of the pool, processing messages sequentially
//! so the idle store, the waiter queue and the counters never need a lock.

use crate::client::PoolClient;
use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::factory::{Factory, NoFactory};
use crate::message::{PoolRequest, PoolStatus, Response};
use crate::waiter::{Ticket, WaiterQueue};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor that lends out instances of `T`.
///
/// # Architecture Note
/// This struct is the "Server" half of the pool. It owns the state and the receiving end
/// of two channels: the public inbox fed by [`PoolClient`]s, and a private channel on which
/// waiter timers report expiries. Both are drained by the same loop, one event at a time,
/// so a `Put` and a timer expiry for the same waiter can never both win.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call [`PoolActor::new`] or [`PoolActor::with_factory`] to get the
///     `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn `actor.run()` in a background task.
/// 3.  **Use**: Clone the client freely; every clone talks to the same actor.
///
/// ```rust
/// use actor_pool::{PoolActor, PoolConfig};
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = PoolActor::new(PoolConfig::default());
///     tokio::spawn(actor.run());
///
///     client.put(String::from("a")).await.unwrap();
///     client.put(String::from("b")).await.unwrap();
///
///     // Most recently returned instance comes out first.
///     assert_eq!(client.get().await.unwrap(), "b");
///     assert_eq!(client.get().await.unwrap(), "a");
/// }
/// ```
///
/// # Operations
///
/// * **Get**:
///     1. Pops the most recently returned idle instance, if any.
///     2. Otherwise, if a factory is configured and `max` is `0` or not yet reached,
///        awaits the factory. Success increments `created` and answers the caller.
///     3. Otherwise (or if the factory failed) queues the caller behind earlier waiters and
///        arms a timer when a timeout is configured.
///
/// * **TryGet**: steps 1 and 2 of `Get`, answering `LimitReached` or `Construction`
///   instead of queueing.
///
/// * **Put**: hands the instance straight to the oldest waiter, disarming its timer. With
///   nobody waiting, the instance goes on top of the idle store.
///
/// * **SetMax / SetTimeout**: replace the limit or the wait. Only later decisions see the
///   new value; queued waiters keep the timer they were given.
///
/// * **Expiry**: removes the waiter with the expired ticket and answers it with
///   [`PoolError::Timeout`]. If the waiter was already served, nothing happens.
pub struct PoolActor<T, F = NoFactory> {
    receiver: mpsc::Receiver<PoolRequest<T>>,
    expiries: mpsc::UnboundedReceiver<Ticket>,
    factory: Option<F>,
    idle: Vec<T>,
    waiters: WaiterQueue<T>,
    created: usize,
    max: usize,
    timeout: Option<Duration>,
    item_type: &'static str,
}

impl<T: Send + 'static> PoolActor<T, NoFactory> {
    /// Creates a pool without a factory. Instances only enter it through `put`.
    pub fn new(config: PoolConfig) -> (Self, PoolClient<T>) {
        Self::build(config, None)
    }
}

impl<T: Send + 'static, F: Factory<T>> PoolActor<T, F> {
    /// Creates a pool that calls `factory` when it runs out of idle instances.
    ///
    /// # Returns
    ///
    /// A tuple containing:
    /// 1. The `PoolActor` instance (the server), which must be run via `.run()`.
    /// 2. The `PoolClient` instance, which can be cloned and shared to send requests.
    pub fn with_factory(config: PoolConfig, factory: F) -> (Self, PoolClient<T>) {
        Self::build(config, Some(factory))
    }

    fn build(config: PoolConfig, factory: Option<F>) -> (Self, PoolClient<T>) {
        let (sender, receiver) = mpsc::channel(config.buffer_size.max(1));
        let (waiters, expiries) = WaiterQueue::new();
        // Extract just the type name (e.g., "Connection" instead of "pool_sample::model::Connection")
        let item_type = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown");

        let actor = Self {
            receiver,
            expiries,
            factory,
            idle: Vec::new(),
            waiters,
            created: 0,
            max: config.max,
            timeout: config.timeout(),
            item_type,
        };
        (actor, PoolClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    pub async fn run(mut self) {
        let item_type = self.item_type;
        info!(item_type, max = self.max, timeout = ?self.timeout, "Pool started");

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle(msg).await,
                    None => break,
                },
                Some(ticket) = self.expiries.recv() => self.expire(ticket),
            }
        }

        info!(
            item_type,
            idle = self.idle.len(),
            waiting = self.waiters.len(),
            created = self.created,
            "Shutdown"
        );
    }

    async fn handle(&mut self, msg: PoolRequest<T>) {
        let item_type = self.item_type;
        match msg {
            PoolRequest::Get { respond_to } => {
                debug!(item_type, idle = self.idle.len(), created = self.created, "Get");
                match self.obtain().await {
                    Ok(item) => self.reply(respond_to, item),
                    Err(e) => {
                        if let PoolError::Construction(cause) = &e {
                            warn!(item_type, error = %cause, "Construction failed, queueing");
                        }
                        let ticket = self.waiters.push(respond_to, self.timeout);
                        debug!(item_type, %ticket, waiting = self.waiters.len(), "Queued");
                    }
                }
            }
            PoolRequest::TryGet { respond_to } => {
                debug!(item_type, idle = self.idle.len(), created = self.created, "TryGet");
                match self.obtain().await {
                    Ok(item) => self.reply(respond_to, item),
                    Err(e) => {
                        debug!(item_type, error = %e, "TryGet refused");
                        let _ = respond_to.send(Err(e));
                    }
                }
            }
            PoolRequest::Put { item } => {
                debug!(item_type, waiting = self.waiters.len(), "Put");
                self.release(item);
            }
            PoolRequest::SetMax { max } => {
                info!(item_type, max, "Limit changed");
                self.max = max;
            }
            PoolRequest::SetTimeout { timeout } => {
                info!(item_type, ?timeout, "Timeout changed");
                self.timeout = timeout;
            }
            PoolRequest::Status { respond_to } => {
                self.waiters.prune();
                let _ = respond_to.send(Ok(self.status()));
            }
        }
    }

    /// Takes an idle instance or builds a new one, without queueing.
    async fn obtain(&mut self) -> Result<T, PoolError> {
        if let Some(item) = self.idle.pop() {
            return Ok(item);
        }
        if self.max != 0 && self.created >= self.max {
            return Err(PoolError::LimitReached);
        }
        let Some(factory) = self.factory.as_mut() else {
            return Err(PoolError::LimitReached);
        };

        let item = factory
            .create()
            .await
            .map_err(|e| PoolError::Construction(Box::new(e)))?;
        self.created += 1;
        info!(item_type = self.item_type, created = self.created, "Created");
        Ok(item)
    }

    /// Answers a borrow request, taking the instance back if the caller already left.
    fn reply(&mut self, respond_to: Response<T>, item: T) {
        if let Err(Ok(item)) = respond_to.send(Ok(item)) {
            debug!(item_type = self.item_type, "Caller gone, reclaiming instance");
            self.release(item);
        }
    }

    /// Gives `item` to the oldest live waiter, or parks it in the idle store.
    fn release(&mut self, mut item: T) {
        while let Some(waiter) = self.waiters.pop_front() {
            let ticket = waiter.ticket();
            match waiter.fulfil(item) {
                Ok(()) => {
                    debug!(
                        item_type = self.item_type,
                        %ticket,
                        waiting = self.waiters.len(),
                        "Handed off"
                    );
                    return;
                }
                Err(returned) => item = returned,
            }
        }
        self.idle.push(item);
    }

    fn expire(&mut self, ticket: Ticket) {
        match self.waiters.expire(ticket) {
            Some(waiter) => {
                warn!(
                    item_type = self.item_type,
                    %ticket,
                    waiting = self.waiters.len(),
                    "Waiter timed out"
                );
                waiter.time_out();
            }
            None => debug!(item_type = self.item_type, %ticket, "Stale expiry ignored"),
        }
    }

    fn status(&self) -> PoolStatus {
        PoolStatus {
            idle: self.idle.len(),
            waiting: self.waiters.len(),
            created: self.created,
            max: self.max,
            timeout: self.timeout,
        }
    }
}
