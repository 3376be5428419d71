//! Comparative benchmarking of the sort strategies.
//!
//! The [`Comparator`] sorts independent copies of one population with each
//! requested strategy, times the sort call, verifies the output against the
//! canonical order, and ranks the strategies by elapsed time. Ordering
//! mistakes show up as `correct == false` in the report; they are never
//! raised as errors.
//!
//! An empty population yields a report with no results and no fastest
//! strategy rather than an error.

mod config;
mod runner;

pub use config::{CompareConfig, MAX_RUNS};
pub use runner::{sample_population, BenchmarkReport, Comparator, StrategyResult};
