//! Tiered waiting lines and the weighted round-robin dispatcher.
//!
//! - [`TierQueue`]: one FIFO per tier with O(1) enqueue/dequeue and a
//!   history of the customers it handed out.
//! - [`QueueManager`]: owns the three tier queues and selects the next
//!   customer under a [`FairnessQuota`] (1 Corporate, 1 Preferential,
//!   2 Standard by default), falling back to strict priority order when
//!   the tier whose turn it is has nobody waiting.
//!
//! Neither type is synchronized. The [`Dispatcher`](crate::dispatcher::Dispatcher)
//! wraps a manager in a mutex for shared use.
//!
//! # References
//!
//! Weighted round-robin: Katevenis, Sidiropoulos & Courcoubetis (1991),
//! "Weighted Round-Robin Cell Multiplexing in a General-Purpose ATM Switch Chip"

mod config;
mod manager;
mod tier_queue;

pub use config::FairnessQuota;
pub use manager::{QueueManager, QueueSizes};
pub use tier_queue::TierQueue;
