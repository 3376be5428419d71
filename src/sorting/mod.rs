//! Interchangeable comparison sorts over the waiting population.
//!
//! Three strategies produce the canonical order
//! `(tier weight ascending, arrival ascending)`:
//!
//! | Strategy | Time | Space | Stable |
//! |---|---|---|---|
//! | [`QuickSorter`] (Lomuto, last pivot) | O(n log n) avg, O(n²) worst | O(log n) | no |
//! | [`MergeSorter`] (top-down) | O(n log n) | O(n) | yes |
//! | [`HeapSorter`] (max-heap) | O(n log n) | O(1) | no |
//!
//! Whenever no two customers share an identical `(tier, arrival)` key the
//! three outputs are identical. With duplicate keys only mergesort keeps
//! the input order of the tied customers.
//!
//! The generic `*_sort_by` functions work on any slice and comparator;
//! the strategies apply them to customers.
//!
//! # References
//!
//! - Hoare (1962), "Quicksort"; Lomuto partition as popularized by
//!   Bentley (1986), "Programming Pearls"
//! - Williams (1964), "Algorithm 232: Heapsort"
//! - Knuth (1998), "The Art of Computer Programming, Vol. 3", §5.2.4

mod heap;
mod merge;
mod quick;
mod types;

pub use heap::{heap_sort_by, HeapSorter};
pub use merge::{merge_sort_by, MergeSorter};
pub use quick::{quick_sort_by, QuickSorter};
pub use types::{is_canonically_sorted, is_sorted_by, Algorithm, SortStrategy};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Customer, Tier};
    use proptest::prelude::*;

    /// Customers with random tiers and unique, shuffled arrivals.
    fn population() -> impl Strategy<Value = Vec<Customer>> {
        prop::collection::vec(0usize..3, 0..200)
            .prop_flat_map(|tiers| {
                let n = tiers.len() as u64;
                (Just(tiers), Just((0..n).collect::<Vec<u64>>()).prop_shuffle())
            })
            .prop_map(|(tiers, arrivals)| {
                tiers
                    .iter()
                    .zip(arrivals)
                    .enumerate()
                    .map(|(i, (&t, arrival))| {
                        Customer::new(i as u64 + 1, format!("c{i}"), Tier::ALL[t], 5, arrival)
                    })
                    .collect()
            })
    }

    #[test]
    fn test_example_population_order() {
        let input = vec![
            Customer::new(1, "A", Tier::Standard, 5, 1),
            Customer::new(2, "B", Tier::Corporate, 5, 2),
            Customer::new(3, "C", Tier::Preferential, 5, 3),
            Customer::new(4, "D", Tier::Standard, 5, 4),
        ];
        for algo in Algorithm::ALL {
            let names: Vec<String> = algo.sort(&input).into_iter().map(|c| c.name).collect();
            assert_eq!(names, vec!["B", "C", "A", "D"], "{algo}");
        }
    }

    #[test]
    fn test_input_not_mutated() {
        let input = vec![
            Customer::new(1, "a", Tier::Standard, 5, 2),
            Customer::new(2, "b", Tier::Corporate, 5, 1),
        ];
        let before = input.clone();
        for algo in Algorithm::ALL {
            let _ = algo.sort(&input);
            assert_eq!(input, before);
        }
    }

    #[test]
    fn test_duplicate_keys_merge_is_stable() {
        let input: Vec<Customer> = (1..=6)
            .map(|id| Customer::new(id, format!("c{id}"), Tier::Standard, 5, 0))
            .collect();
        let ids: Vec<u64> = MergeSorter.sort(&input).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        // Unstable strategies still produce a canonically sorted permutation.
        for algo in [Algorithm::QuickSort, Algorithm::HeapSort] {
            let out = algo.sort(&input);
            assert!(is_canonically_sorted(&out));
            let mut ids: Vec<u64> = out.iter().map(|c| c.id).collect();
            ids.sort_unstable();
            assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        }
    }

    proptest! {
        #[test]
        fn prop_every_strategy_sorts(customers in population()) {
            for algo in Algorithm::ALL {
                let out = algo.sort(&customers);
                prop_assert_eq!(out.len(), customers.len());
                prop_assert!(is_canonically_sorted(&out));
            }
        }

        #[test]
        fn prop_strategies_agree_on_unique_keys(customers in population()) {
            let quick = Algorithm::QuickSort.sort(&customers);
            let merge = Algorithm::MergeSort.sort(&customers);
            let heap = Algorithm::HeapSort.sort(&customers);
            prop_assert_eq!(&quick, &merge);
            prop_assert_eq!(&merge, &heap);
        }

        #[test]
        fn prop_sorting_is_idempotent(customers in population()) {
            for algo in Algorithm::ALL {
                let once = algo.sort(&customers);
                let twice = algo.sort(&once);
                prop_assert_eq!(once, twice);
            }
        }
    }
}
