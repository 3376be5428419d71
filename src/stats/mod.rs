//! Service statistics derived from the served history.

mod summary;

pub use summary::{Statistics, TierStatistics};
