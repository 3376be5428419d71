//! Weighted round-robin selection across the tier queues.

use super::config::FairnessQuota;
use super::tier_queue::TierQueue;
use crate::error::Result;
use crate::model::{Customer, CustomerId, Tier};

/// Number of waiting customers per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct QueueSizes {
    pub corporate: usize,
    pub preferential: usize,
    pub standard: usize,
    pub total: usize,
}

/// Owns one [`TierQueue`] per tier and picks the next customer to serve.
///
/// # Selection
///
/// With the default quota the pattern is Corporate, Preferential,
/// Standard, Standard, repeating:
///
/// 1. Corporate waiting and its slots not used up: serve Corporate.
/// 2. Else Preferential waiting and slots left: serve Preferential.
/// 3. Else Standard waiting and slots left: serve Standard.
/// 4. Else serve the first non-empty queue in priority order, so a tier
///    that has no customers never stalls the others.
///
/// When every tier has used all of its slots the counters reset together
/// and a new cycle begins. All queues empty yields `None`.
///
/// # Examples
///
/// ```
/// use u_dispatch::model::{Customer, Tier};
/// use u_dispatch::queue::QueueManager;
///
/// let mut manager = QueueManager::new();
/// manager.enqueue(Customer::new(1, "a", Tier::Standard, 5, 1)).unwrap();
/// manager.enqueue(Customer::new(2, "b", Tier::Corporate, 5, 2)).unwrap();
///
/// assert_eq!(manager.next().map(|c| c.id), Some(2));
/// assert_eq!(manager.next().map(|c| c.id), Some(1));
/// assert!(manager.next().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct QueueManager {
    corporate: TierQueue,
    preferential: TierQueue,
    standard: TierQueue,
    quota: FairnessQuota,
    corporate_served: u32,
    preferential_served: u32,
    standard_served: u32,
}

impl QueueManager {
    /// Creates a manager with the default 1:1:2 quota.
    pub fn new() -> Self {
        Self::with_quota(FairnessQuota::default())
    }

    pub fn with_quota(quota: FairnessQuota) -> Self {
        Self {
            corporate: TierQueue::new(Tier::Corporate),
            preferential: TierQueue::new(Tier::Preferential),
            standard: TierQueue::new(Tier::Standard),
            quota,
            corporate_served: 0,
            preferential_served: 0,
            standard_served: 0,
        }
    }

    pub fn quota(&self) -> FairnessQuota {
        self.quota
    }

    pub fn queue(&self, tier: Tier) -> &TierQueue {
        match tier {
            Tier::Corporate => &self.corporate,
            Tier::Preferential => &self.preferential,
            Tier::Standard => &self.standard,
        }
    }

    fn queue_mut(&mut self, tier: Tier) -> &mut TierQueue {
        match tier {
            Tier::Corporate => &mut self.corporate,
            Tier::Preferential => &mut self.preferential,
            Tier::Standard => &mut self.standard,
        }
    }

    /// Routes a customer to the queue of its tier.
    pub fn enqueue(&mut self, customer: Customer) -> Result<()> {
        self.queue_mut(customer.tier).enqueue(customer)
    }

    /// Selects and removes the next customer to serve.
    pub fn next(&mut self) -> Option<Customer> {
        let tier = self.select_tier()?;
        let customer = self.queue_mut(tier).dequeue();
        self.close_cycle_if_complete();
        customer
    }

    fn select_tier(&mut self) -> Option<Tier> {
        if !self.corporate.is_empty() && self.corporate_served < self.quota.corporate {
            self.corporate_served += 1;
            return Some(Tier::Corporate);
        }
        if !self.preferential.is_empty() && self.preferential_served < self.quota.preferential {
            self.preferential_served += 1;
            return Some(Tier::Preferential);
        }
        if !self.standard.is_empty() && self.standard_served < self.quota.standard {
            self.standard_served += 1;
            return Some(Tier::Standard);
        }
        // The tier whose turn it is has nobody waiting.
        Tier::ALL
            .into_iter()
            .find(|&tier| !self.queue(tier).is_empty())
    }

    fn close_cycle_if_complete(&mut self) {
        if self.corporate_served >= self.quota.corporate
            && self.preferential_served >= self.quota.preferential
            && self.standard_served >= self.quota.standard
        {
            self.reset_counters();
        }
    }

    fn reset_counters(&mut self) {
        self.corporate_served = 0;
        self.preferential_served = 0;
        self.standard_served = 0;
    }

    /// Current cycle counters as `(corporate, preferential, standard)`.
    pub fn cycle_counters(&self) -> (u32, u32, u32) {
        (
            self.corporate_served,
            self.preferential_served,
            self.standard_served,
        )
    }

    /// Removes a waiting customer by id from whichever queue holds it.
    pub fn remove(&mut self, id: CustomerId) -> Option<Customer> {
        Tier::ALL
            .into_iter()
            .find_map(|tier| self.queue_mut(tier).remove(id))
    }

    pub fn total_waiting(&self) -> usize {
        self.corporate.len() + self.preferential.len() + self.standard.len()
    }

    pub fn has_waiting(&self) -> bool {
        self.total_waiting() > 0
    }

    pub fn sizes(&self) -> QueueSizes {
        QueueSizes {
            corporate: self.corporate.len(),
            preferential: self.preferential.len(),
            standard: self.standard.len(),
            total: self.total_waiting(),
        }
    }

    /// All waiting customers, tier by tier in priority order, each tier in
    /// FIFO order.
    pub fn all_waiting_snapshot(&self) -> Vec<Customer> {
        let mut all = Vec::with_capacity(self.total_waiting());
        for tier in Tier::ALL {
            all.extend(self.queue(tier).drain_to_list());
        }
        all
    }

    /// Clears every queue and refills them from `sorted`, partitioned by
    /// tier with relative order preserved. A new fairness cycle starts.
    pub fn bulk_replace(&mut self, sorted: Vec<Customer>) -> Result<()> {
        let mut parts: [Vec<Customer>; 3] = Default::default();
        for customer in sorted {
            parts[customer.tier.index()].push(customer);
        }
        let [corporate, preferential, standard] = parts;
        self.corporate.replace_all(corporate)?;
        self.preferential.replace_all(preferential)?;
        self.standard.replace_all(standard)?;
        self.reset_counters();
        Ok(())
    }

    /// Clears all queues, their histories, and the cycle counters.
    pub fn reset_all(&mut self) {
        for tier in Tier::ALL {
            let queue = self.queue_mut(tier);
            queue.clear();
            queue.clear_history();
        }
        self.reset_counters();
    }
}

impl Default for QueueManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn populated(tiers: &[Tier]) -> QueueManager {
        let mut m = QueueManager::new();
        for (i, &tier) in tiers.iter().enumerate() {
            let id = i as u64 + 1;
            m.enqueue(Customer::new(id, format!("c{id}"), tier, 5, id))
                .unwrap();
        }
        m
    }

    fn drain_tiers(m: &mut QueueManager) -> Vec<Tier> {
        std::iter::from_fn(|| m.next()).map(|c| c.tier).collect()
    }

    #[test]
    fn test_weighted_pattern_repeats() {
        use Tier::*;
        let mut tiers = vec![Corporate; 3];
        tiers.extend(vec![Preferential; 3]);
        tiers.extend(vec![Standard; 6]);
        let mut m = populated(&tiers);

        let served = drain_tiers(&mut m);
        assert_eq!(
            served,
            vec![
                Corporate,
                Preferential,
                Standard,
                Standard,
                Corporate,
                Preferential,
                Standard,
                Standard,
                Corporate,
                Preferential,
                Standard,
                Standard,
            ]
        );
        assert_eq!(m.cycle_counters(), (0, 0, 0));
    }

    #[test]
    fn test_fallback_when_turn_tier_empty() {
        use Tier::*;
        // Only corporate waiting: served back to back through the fallback.
        let mut m = populated(&[Corporate, Corporate, Corporate]);
        assert_eq!(drain_tiers(&mut m), vec![Corporate; 3]);
    }

    #[test]
    fn test_no_starvation_without_corporate() {
        use Tier::*;
        let mut m = populated(&[Preferential, Preferential, Standard, Standard, Standard]);
        let served = drain_tiers(&mut m);
        assert_eq!(served.len(), 5);
        assert_eq!(
            served,
            vec![Preferential, Standard, Standard, Preferential, Standard]
        );
    }

    #[test]
    fn test_empty_manager_yields_none() {
        let mut m = QueueManager::new();
        assert!(m.next().is_none());
        assert_eq!(m.cycle_counters(), (0, 0, 0));
    }

    #[test]
    fn test_sizes_and_snapshot_order() {
        use Tier::*;
        let m = populated(&[Standard, Corporate, Preferential, Standard]);
        assert_eq!(
            m.sizes(),
            QueueSizes {
                corporate: 1,
                preferential: 1,
                standard: 2,
                total: 4
            }
        );
        let ids: Vec<u64> = m.all_waiting_snapshot().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_bulk_replace_partitions_by_tier() {
        use Tier::*;
        let mut m = populated(&[Standard, Corporate]);
        let replacement = vec![
            Customer::new(10, "x", Corporate, 5, 1),
            Customer::new(12, "z", Standard, 5, 3),
            Customer::new(11, "y", Standard, 5, 2),
        ];
        m.bulk_replace(replacement).unwrap();
        assert_eq!(m.sizes().total, 3);
        let std_ids: Vec<u64> = m
            .queue(Standard)
            .drain_to_list()
            .iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(std_ids, vec![12, 11]);
    }

    #[test]
    fn test_bulk_replace_starts_new_cycle() {
        use Tier::*;
        let mut m = populated(&[Corporate, Preferential, Standard, Corporate]);
        assert_eq!(m.next().map(|c| c.id), Some(1));
        assert_eq!(m.cycle_counters(), (1, 0, 0));

        let waiting = m.all_waiting_snapshot();
        m.bulk_replace(waiting).unwrap();
        assert_eq!(m.cycle_counters(), (0, 0, 0));
        assert_eq!(m.next().map(|c| c.id), Some(4));
    }

    #[test]
    fn test_reset_all() {
        use Tier::*;
        let mut m = populated(&[Corporate, Standard]);
        m.next();
        assert_eq!(m.cycle_counters(), (1, 0, 0));
        m.reset_all();
        assert_eq!(m.total_waiting(), 0);
        assert_eq!(m.cycle_counters(), (0, 0, 0));
        assert!(m.queue(Corporate).history().is_empty());
    }

    #[test]
    fn test_remove_from_any_queue() {
        use Tier::*;
        let mut m = populated(&[Corporate, Standard, Preferential]);
        assert_eq!(m.remove(2).map(|c| c.tier), Some(Standard));
        assert!(m.remove(2).is_none());
        assert_eq!(m.total_waiting(), 2);
    }

    #[test]
    fn test_custom_quota() {
        use Tier::*;
        let quota = FairnessQuota::default().with_corporate(2).with_standard(1);
        let mut m = QueueManager::with_quota(quota);
        let tiers = [Corporate, Corporate, Corporate, Preferential, Standard, Standard];
        for (i, &tier) in tiers.iter().enumerate() {
            let id = i as u64 + 1;
            m.enqueue(Customer::new(id, "c", tier, 5, id)).unwrap();
        }
        assert_eq!(
            drain_tiers(&mut m),
            vec![Corporate, Corporate, Preferential, Standard, Corporate, Standard]
        );
    }

    fn tier_strategy() -> impl Strategy<Value = Tier> {
        prop_oneof![
            Just(Tier::Corporate),
            Just(Tier::Preferential),
            Just(Tier::Standard)
        ]
    }

    proptest! {
        #[test]
        fn prop_drain_returns_every_customer_once(
            tiers in prop::collection::vec(tier_strategy(), 0..200)
        ) {
            let mut m = populated(&tiers);
            let mut ids: Vec<u64> = std::iter::from_fn(|| m.next()).map(|c| c.id).collect();
            ids.sort_unstable();
            let expected: Vec<u64> = (1..=tiers.len() as u64).collect();
            prop_assert_eq!(ids, expected);
        }

        #[test]
        fn prop_never_empty_while_customers_wait(
            tiers in prop::collection::vec(tier_strategy(), 1..100)
        ) {
            let mut m = populated(&tiers);
            for remaining in (1..=tiers.len()).rev() {
                prop_assert_eq!(m.total_waiting(), remaining);
                prop_assert!(m.next().is_some());
            }
            prop_assert!(m.next().is_none());
        }

        #[test]
        fn prop_counters_stay_within_quota(
            tiers in prop::collection::vec(tier_strategy(), 0..100)
        ) {
            let mut m = populated(&tiers);
            while m.next().is_some() {
                let (c, p, s) = m.cycle_counters();
                prop_assert!(c <= 1 && p <= 1 && s <= 2);
            }
        }

        #[test]
        fn prop_pattern_with_plenty_of_each_tier(cycles in 1usize..20) {
            use Tier::*;
            let mut tiers = Vec::new();
            for _ in 0..cycles {
                tiers.extend([Standard, Standard, Preferential, Corporate]);
            }
            let mut m = populated(&tiers);
            let served = drain_tiers(&mut m);
            for window in served.chunks(4) {
                prop_assert_eq!(window, &[Corporate, Preferential, Standard, Standard][..]);
            }
        }
    }
}
