//! Dispatcher configuration.

use crate::queue::FairnessQuota;
use crate::sorting::Algorithm;
use std::time::Duration;

/// Configuration for a [`Dispatcher`](super::Dispatcher).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_dispatch::dispatcher::DispatcherConfig;
/// use u_dispatch::sorting::Algorithm;
///
/// let config = DispatcherConfig::default()
///     .with_default_algorithm(Algorithm::MergeSort)
///     .with_service_time_scale(Duration::from_millis(100))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Slots per tier in one fairness cycle.
    pub quota: FairnessQuota,

    /// Algorithm used by [`Dispatcher::reorder_default`](super::Dispatcher::reorder_default).
    pub default_algorithm: Algorithm,

    /// Wall-clock time spent per estimated service minute when a customer
    /// is dispatched.
    ///
    /// `Duration::ZERO` (the default) completes service immediately. The
    /// delay runs outside the queue lock.
    pub service_time_scale: Duration,

    /// Seed for [`Dispatcher::simulate`](super::Dispatcher::simulate).
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            quota: FairnessQuota::default(),
            default_algorithm: Algorithm::QuickSort,
            service_time_scale: Duration::ZERO,
            seed: None,
        }
    }
}

impl DispatcherConfig {
    pub fn with_quota(mut self, quota: FairnessQuota) -> Self {
        self.quota = quota;
        self
    }

    pub fn with_default_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.default_algorithm = algorithm;
        self
    }

    pub fn with_service_time_scale(mut self, scale: Duration) -> Self {
        self.service_time_scale = scale;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        self.quota.validate()?;
        if self.service_time_scale > Duration::from_secs(60) {
            return Err(format!(
                "service_time_scale must not exceed real time (60s per minute), got {:?}",
                self.service_time_scale
            ));
        }
        Ok(())
    }
}
