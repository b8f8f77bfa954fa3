//! # Waiter Queue
//!
//! Borrow requests that could not be served when they reached the actor wait here in
//! arrival order. Each waiter gets a [`Ticket`], a generation id that is never reused.
//! When a timeout is configured, a timer task is armed per waiter; on expiry it sends
//! the ticket back to the actor over a private channel.
//!
//! A timer message can reach the actor after its waiter was already handed an instance.
//! [`WaiterQueue::expire`] looks the ticket up and returns `None` in that case, so a stale
//! expiry is a no-op and a waiter is never answered twice.

use crate::error::PoolError;
use crate::message::Response;
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Generation id identifying one queued borrow request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A queued borrow request.
pub(crate) struct Waiter<T> {
    ticket: Ticket,
    respond_to: Response<T>,
    timeout: Option<Duration>,
    timer: Option<AbortHandle>,
}

impl<T> Waiter<T> {
    pub(crate) fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Hands `item` to the waiting caller. Gives the item back if the caller is gone.
    pub(crate) fn fulfil(self, item: T) -> Result<(), T> {
        self.respond_to.send(Ok(item)).map_err(|unsent| match unsent {
            Ok(item) => item,
            Err(_) => unreachable!("waiters are only ever sent Ok"),
        })
    }

    /// Answers the caller with a timeout error.
    pub(crate) fn time_out(self) {
        let waited = self.timeout.unwrap_or_default();
        let _ = self.respond_to.send(Err(PoolError::Timeout(waited)));
    }

    fn disarm(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// FIFO queue of waiters, ordered by ticket.
pub(crate) struct WaiterQueue<T> {
    waiters: VecDeque<Waiter<T>>,
    next_ticket: u64,
    expiry_tx: mpsc::UnboundedSender<Ticket>,
}

impl<T> WaiterQueue<T> {
    /// Creates an empty queue and the receiver its timers report expiries on.
    pub(crate) fn new() -> (Self, mpsc::UnboundedReceiver<Ticket>) {
        let (expiry_tx, expiry_rx) = mpsc::unbounded_channel();
        let queue = Self {
            waiters: VecDeque::new(),
            next_ticket: 1,
            expiry_tx,
        };
        (queue, expiry_rx)
    }

    pub(crate) fn len(&self) -> usize {
        self.waiters.len()
    }

    /// Appends a waiter, arming its timer when `timeout` is set.
    ///
    /// Must be called from within a Tokio runtime if `timeout` is `Some`.
    pub(crate) fn push(&mut self, respond_to: Response<T>, timeout: Option<Duration>) -> Ticket {
        self.prune();
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;

        let timer = timeout.map(|delay| self.arm(ticket, delay));
        self.waiters.push_back(Waiter {
            ticket,
            respond_to,
            timeout,
            timer,
        });
        ticket
    }

    /// Removes the oldest waiter whose caller is still listening and disarms its timer.
    pub(crate) fn pop_front(&mut self) -> Option<Waiter<T>> {
        while let Some(mut waiter) = self.waiters.pop_front() {
            waiter.disarm();
            if !waiter.respond_to.is_closed() {
                return Some(waiter);
            }
        }
        None
    }

    /// Drops waiters whose caller stopped listening, disarming their timers.
    ///
    /// Order is kept, so the queue stays sorted by ticket.
    pub(crate) fn prune(&mut self) {
        self.waiters.retain_mut(|waiter| {
            if waiter.respond_to.is_closed() {
                waiter.disarm();
                false
            } else {
                true
            }
        });
    }

    /// Removes the waiter holding `ticket`, if it is still queued.
    pub(crate) fn expire(&mut self, ticket: Ticket) -> Option<Waiter<T>> {
        let index = self
            .waiters
            .binary_search_by_key(&ticket, |waiter| waiter.ticket)
            .ok()?;
        let mut waiter = self.waiters.remove(index)?;
        waiter.timer = None;
        Some(waiter)
    }

    fn arm(&self, ticket: Ticket, delay: Duration) -> AbortHandle {
        let expiry_tx = self.expiry_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = expiry_tx.send(ticket);
        })
        .abort_handle()
    }
}

impl<T> Drop for WaiterQueue<T> {
    fn drop(&mut self) {
        for waiter in self.waiters.iter_mut() {
            waiter.disarm();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;

    fn waiter_channel() -> (Response<u32>, oneshot::Receiver<Result<u32, PoolError>>) {
        oneshot::channel()
    }

    #[tokio::test]
    async fn pops_in_arrival_order() {
        let (mut queue, _expiry_rx) = WaiterQueue::<u32>::new();
        let (tx1, mut rx1) = waiter_channel();
        let (tx2, mut rx2) = waiter_channel();
        queue.push(tx1, None);
        queue.push(tx2, None);

        queue.pop_front().unwrap().fulfil(10).unwrap();
        queue.pop_front().unwrap().fulfil(20).unwrap();
        assert_eq!(queue.len(), 0);

        assert_eq!(rx1.try_recv().unwrap().unwrap(), 10);
        assert_eq!(rx2.try_recv().unwrap().unwrap(), 20);
    }

    #[tokio::test]
    async fn expire_removes_only_the_matching_waiter() {
        let (mut queue, _expiry_rx) = WaiterQueue::<u32>::new();
        let (tx1, _rx1) = waiter_channel();
        let (tx2, _rx2) = waiter_channel();
        let (tx3, _rx3) = waiter_channel();
        let first = queue.push(tx1, None);
        let middle = queue.push(tx2, None);
        let last = queue.push(tx3, None);

        let expired = queue.expire(middle).unwrap();
        assert_eq!(expired.ticket(), middle);
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.pop_front().unwrap().ticket(), first);
        assert_eq!(queue.pop_front().unwrap().ticket(), last);
    }

    #[tokio::test]
    async fn stale_ticket_is_ignored() {
        let (mut queue, _expiry_rx) = WaiterQueue::<u32>::new();
        let (tx, _rx) = waiter_channel();
        let ticket = queue.push(tx, None);

        queue.pop_front().unwrap().fulfil(1).unwrap();
        assert!(queue.expire(ticket).is_none());
        assert!(queue.expire(ticket).is_none());
    }

    #[tokio::test]
    async fn pop_skips_abandoned_callers() {
        let (mut queue, _expiry_rx) = WaiterQueue::<u32>::new();
        let (gone, gone_rx) = waiter_channel();
        let (live, _live_rx) = waiter_channel();
        queue.push(gone, None);
        let live_ticket = queue.push(live, None);
        drop(gone_rx);

        assert_eq!(queue.pop_front().unwrap().ticket(), live_ticket);
        assert!(queue.pop_front().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn push_prunes_abandoned_callers() {
        let (mut queue, mut expiry_rx) = WaiterQueue::<u32>::new();
        for _ in 0..100 {
            let (tx, rx) = waiter_channel();
            queue.push(tx, Some(Duration::from_millis(10)));
            drop(rx);
        }
        // Each push cleared the one abandoned before it.
        assert_eq!(queue.len(), 1);

        let (tx, _rx) = waiter_channel();
        let live = queue.push(tx, None);
        assert_eq!(queue.len(), 1);

        // Timers of pruned waiters were aborted.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(expiry_rx.try_recv().is_err());
        assert_eq!(queue.pop_front().unwrap().ticket(), live);
    }

    #[tokio::test]
    async fn prune_keeps_ticket_order_for_expire() {
        let (mut queue, _expiry_rx) = WaiterQueue::<u32>::new();
        let (tx1, _rx1) = waiter_channel();
        let (gone, gone_rx) = waiter_channel();
        let (tx3, _rx3) = waiter_channel();
        let first = queue.push(tx1, None);
        queue.push(gone, None);
        let last = queue.push(tx3, None);
        drop(gone_rx);

        queue.prune();
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.expire(last).unwrap().ticket(), last);
        assert_eq!(queue.expire(first).unwrap().ticket(), first);
    }

    #[tokio::test]
    async fn fulfil_returns_item_when_caller_left() {
        let (mut queue, _expiry_rx) = WaiterQueue::<u32>::new();
        let (tx, rx) = waiter_channel();
        queue.push(tx, None);
        let waiter = queue.pop_front().unwrap();
        drop(rx);

        assert_eq!(waiter.fulfil(7), Err(7));
    }

    #[tokio::test(start_paused = true)]
    async fn timer_reports_ticket_on_expiry() {
        let (mut queue, mut expiry_rx) = WaiterQueue::<u32>::new();
        let (tx, rx) = waiter_channel();
        let ticket = queue.push(tx, Some(Duration::from_millis(10)));

        assert_eq!(expiry_rx.recv().await, Some(ticket));
        queue.expire(ticket).unwrap().time_out();

        let reply = rx.await.unwrap();
        assert!(matches!(reply, Err(PoolError::Timeout(d)) if d == Duration::from_millis(10)));
    }

    #[tokio::test(start_paused = true)]
    async fn pop_disarms_timer() {
        let (mut queue, mut expiry_rx) = WaiterQueue::<u32>::new();
        let (tx, _rx) = waiter_channel();
        queue.push(tx, Some(Duration::from_millis(10)));

        queue.pop_front().unwrap().fulfil(1).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(expiry_rx.try_recv().is_err());
    }
}
