//! Priority-aware service dispatcher.
//!
//! Customers are registered into one of three tiers and served in an
//! order that balances priority against fairness:
//!
//! - **Model**: [`Customer`](model::Customer), [`Tier`](model::Tier),
//!   lifecycle [`Status`](model::Status), and the [`Clock`](model::Clock)
//!   that stamps arrivals and service times.
//! - **Queues**: one FIFO per tier plus a weighted round-robin
//!   [`QueueManager`](queue::QueueManager) (1 Corporate, 1 Preferential,
//!   2 Standard per cycle) with fallback to strict priority.
//! - **Sorting**: interchangeable quicksort, merge sort and heap sort
//!   strategies over the canonical `(tier weight, arrival)` order.
//! - **Benchmark**: times each strategy on independent copies of one
//!   population, verifies the results, and recommends a strategy.
//! - **Stats**: wait, service and throughput figures over the served history.
//! - **Dispatcher**: the thread-safe façade tying the above together.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for the public data types.
//! - `parallel`: verifies benchmark output with rayon.

pub mod benchmark;
pub mod dispatcher;
pub mod error;
pub mod model;
pub mod queue;
pub mod sorting;
pub mod stats;

pub use error::{DispatchError, Result};
