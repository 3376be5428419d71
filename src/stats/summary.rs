//! Aggregate service statistics.

use crate::model::{minutes_between, Customer, Tier, Timestamp};
use crate::queue::QueueSizes;
use std::collections::BTreeMap;

/// Served-customer figures for one tier.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TierStatistics {
    pub served: usize,
    pub mean_wait_minutes: f64,
    pub mean_service_minutes: f64,
}

/// Snapshot of dispatcher activity.
///
/// Times are whole minutes, truncated, derived from the served history.
/// With nothing served all averages and extremes are zero.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Statistics {
    /// Customers ever registered since the last reset.
    pub registered: usize,
    pub served: usize,
    pub waiting: usize,
    /// Customers dispatched whose service has not finished.
    pub in_service: usize,
    pub cancelled: usize,

    pub mean_wait_minutes: f64,
    pub mean_service_minutes: f64,
    pub mean_total_minutes: f64,
    pub max_wait_minutes: u64,
    pub min_wait_minutes: u64,

    /// Minutes from the earliest served arrival to the latest service end.
    pub span_minutes: f64,

    /// Per-tier figures; every tier is present.
    pub per_tier: BTreeMap<Tier, TierStatistics>,

    pub queue_sizes: QueueSizes,
}

impl Statistics {
    /// Computes statistics from the served history and current counters.
    pub fn compute(
        served: &[Customer],
        registered: usize,
        cancelled: usize,
        queue_sizes: QueueSizes,
        now: Timestamp,
    ) -> Self {
        let mut stats = Statistics {
            registered,
            served: served.len(),
            waiting: queue_sizes.total,
            cancelled,
            per_tier: Tier::ALL
                .into_iter()
                .map(|t| (t, TierStatistics::default()))
                .collect(),
            queue_sizes,
            ..Default::default()
        };
        if served.is_empty() {
            return stats;
        }

        let waits: Vec<u64> = served.iter().map(|c| c.wait_minutes(now)).collect();
        stats.mean_wait_minutes = mean(waits.iter().copied());
        stats.mean_service_minutes = mean(served.iter().map(Customer::service_minutes));
        stats.mean_total_minutes = mean(served.iter().map(|c| c.total_minutes(now)));
        stats.max_wait_minutes = waits.iter().copied().max().unwrap_or(0);
        stats.min_wait_minutes = waits.iter().copied().min().unwrap_or(0);

        let first_arrival = served.iter().map(|c| c.arrival).min().unwrap_or(now);
        let last_end = served
            .iter()
            .filter_map(|c| c.service_end)
            .max()
            .unwrap_or(now);
        stats.span_minutes = minutes_between(first_arrival, last_end) as f64;

        for tier in Tier::ALL {
            let of_tier: Vec<&Customer> = served.iter().filter(|c| c.tier == tier).collect();
            stats.per_tier.insert(
                tier,
                TierStatistics {
                    served: of_tier.len(),
                    mean_wait_minutes: mean(of_tier.iter().map(|c| c.wait_minutes(now))),
                    mean_service_minutes: mean(of_tier.iter().map(|c| c.service_minutes())),
                },
            );
        }
        stats
    }

    /// Served customers as a percentage of registered ones.
    pub fn occupancy_rate(&self) -> f64 {
        if self.registered == 0 {
            return 0.0;
        }
        self.served as f64 / self.registered as f64 * 100.0
    }

    /// Served customers per minute of span. Zero when the span is zero.
    pub fn throughput(&self) -> f64 {
        if self.span_minutes == 0.0 {
            return 0.0;
        }
        self.served as f64 / self.span_minutes
    }

    pub fn tier(&self, tier: Tier) -> TierStatistics {
        self.per_tier.get(&tier).copied().unwrap_or_default()
    }
}

fn mean(values: impl Iterator<Item = u64>) -> f64 {
    let (sum, count) = values.fold((0u64, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::minutes;

    fn served(id: u64, tier: Tier, arrival: u64, start: u64, end: u64) -> Customer {
        let mut c = Customer::new(id, format!("c{id}"), tier, 5, minutes(arrival));
        c.begin_service(minutes(start)).unwrap();
        c.finish_service(minutes(end)).unwrap();
        c
    }

    #[test]
    fn test_empty_history() {
        let sizes = QueueSizes {
            corporate: 1,
            preferential: 0,
            standard: 2,
            total: 3,
        };
        let stats = Statistics::compute(&[], 3, 0, sizes, 0);
        assert_eq!(stats.registered, 3);
        assert_eq!(stats.waiting, 3);
        assert_eq!(stats.served, 0);
        assert_eq!(stats.mean_wait_minutes, 0.0);
        assert_eq!(stats.max_wait_minutes, 0);
        assert_eq!(stats.occupancy_rate(), 0.0);
        assert_eq!(stats.throughput(), 0.0);
        assert_eq!(stats.per_tier.len(), 3);
        assert_eq!(stats.tier(Tier::Corporate).served, 0);
    }

    #[test]
    fn test_aggregates() {
        let history = vec![
            served(1, Tier::Corporate, 0, 2, 6),
            served(2, Tier::Standard, 1, 7, 10),
            served(3, Tier::Standard, 2, 12, 20),
        ];
        let stats = Statistics::compute(&history, 4, 1, QueueSizes::default(), 0);

        // waits: 2, 6, 10
        assert!((stats.mean_wait_minutes - 6.0).abs() < 1e-10);
        assert_eq!(stats.max_wait_minutes, 10);
        assert_eq!(stats.min_wait_minutes, 2);
        // service: 4, 3, 8
        assert!((stats.mean_service_minutes - 5.0).abs() < 1e-10);
        // totals: 6, 9, 18
        assert!((stats.mean_total_minutes - 11.0).abs() < 1e-10);
        assert!((stats.span_minutes - 20.0).abs() < 1e-10);
        assert!((stats.occupancy_rate() - 75.0).abs() < 1e-10);
        assert!((stats.throughput() - 0.15).abs() < 1e-10);
        assert_eq!(stats.cancelled, 1);

        let standard = stats.tier(Tier::Standard);
        assert_eq!(standard.served, 2);
        assert!((standard.mean_wait_minutes - 8.0).abs() < 1e-10);
        assert!((standard.mean_service_minutes - 5.5).abs() < 1e-10);
        assert_eq!(stats.tier(Tier::Preferential).served, 0);
    }
}
