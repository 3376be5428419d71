//! Thread-safe dispatcher façade.
//!
//! [`Dispatcher`] is the surface callers use: it registers customers,
//! serves them under the fairness policy, re-sorts the waiting
//! population on demand, benchmarks the sort strategies against a
//! snapshot, and reports statistics. All queue state sits behind one
//! lock; sorting and benchmarking run on snapshots outside it.
//!
//! Reorders that race with registrations or dispatches are reconciled
//! before the swap, so no customer is lost or duplicated.

mod config;
mod service;

pub use config::DispatcherConfig;
pub use service::Dispatcher;
