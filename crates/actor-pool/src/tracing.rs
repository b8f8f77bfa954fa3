//! # Observability & Tracing
//!
//! The pool actor reports through the `tracing` crate. Every event carries an `item_type`
//! field (the short type name of the pooled resource), so logs from several pools in one
//! process stay apart.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle** (`info`): start with initial limit and timeout, shutdown with
//!   final idle/waiting/created counts, limit and timeout changes, each construction.
//! - **Requests** (`debug`): every Get, TryGet and Put, plus queueing and hand-offs with
//!   the waiter's ticket.
//! - **Trouble** (`warn`): failed construction attempts and waiters that time out.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle and warnings only
//! RUST_LOG=info cargo run
//!
//! # Follow every request and hand-off
//! RUST_LOG=actor_pool=debug cargo run
//! ```
//!
//! **With `RUST_LOG=debug`**, a borrower that has to wait for a return looks like:
//!
//! ```text
//! DEBUG Get item_type="Connection" idle=0 created=2
//! DEBUG Queued item_type="Connection" ticket=#1 waiting=1
//! DEBUG Put item_type="Connection" waiting=1
//! DEBUG Handed off item_type="Connection" ticket=#1 waiting=0
//! ```

/// Initializes a compact `tracing` subscriber filtered by `RUST_LOG`.
///
/// Call once at program start; a second call panics because the global subscriber is
/// already set.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // item_type identifies the pool, module paths add nothing
        .compact()
        .init();
}
