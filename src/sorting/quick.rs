//! Quicksort with Lomuto partitioning.

use super::types::SortStrategy;
use crate::model::Customer;
use std::cmp::Ordering;

/// Sorts `v` in place with quicksort, using the last element as pivot.
///
/// Not stable. O(n log n) on average and O(n²) on already sorted input,
/// which this pivot rule turns into maximally unbalanced partitions.
/// Recursing into the smaller partition and looping over the larger keeps
/// the stack at O(log n).
pub fn quick_sort_by<T, F>(v: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort_range(v, &mut cmp);
}

fn sort_range<T, F>(mut v: &mut [T], cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    while v.len() > 1 {
        let pivot = partition(v, cmp);
        let (left, right) = std::mem::take(&mut v).split_at_mut(pivot);
        let right = &mut right[1..];
        if left.len() < right.len() {
            sort_range(left, cmp);
            v = right;
        } else {
            sort_range(right, cmp);
            v = left;
        }
    }
}

/// Moves every element `<=` the pivot before it and returns the pivot's
/// final index.
fn partition<T, F>(v: &mut [T], cmp: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let last = v.len() - 1;
    let mut store = 0;
    for j in 0..last {
        if cmp(&v[j], &v[last]) != Ordering::Greater {
            v.swap(store, j);
            store += 1;
        }
    }
    v.swap(store, last);
    store
}

/// Quicksort strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuickSorter;

impl SortStrategy for QuickSorter {
    fn name(&self) -> &str {
        "Quick Sort"
    }

    fn time_complexity(&self) -> &'static str {
        "O(n log n) average, O(n^2) worst case"
    }

    fn space_complexity(&self) -> &'static str {
        "O(log n)"
    }

    fn is_stable(&self) -> bool {
        false
    }

    fn sort(&self, customers: &[Customer]) -> Vec<Customer> {
        let mut out = customers.to_vec();
        quick_sort_by(&mut out, Customer::canonical_cmp);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_small_inputs() {
        let mut empty: Vec<i32> = vec![];
        quick_sort_by(&mut empty, i32::cmp);
        assert!(empty.is_empty());

        let mut one = vec![7];
        quick_sort_by(&mut one, i32::cmp);
        assert_eq!(one, vec![7]);

        let mut two = vec![2, 1];
        quick_sort_by(&mut two, i32::cmp);
        assert_eq!(two, vec![1, 2]);
    }

    #[test]
    fn test_sorted_and_reversed_worst_cases() {
        let mut sorted: Vec<u32> = (0..2000).collect();
        quick_sort_by(&mut sorted, u32::cmp);
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));

        let mut reversed: Vec<u32> = (0..2000).rev().collect();
        quick_sort_by(&mut reversed, u32::cmp);
        assert_eq!(reversed, (0..2000).collect::<Vec<_>>());
    }

    #[test]
    fn test_duplicates() {
        let mut v = vec![3, 1, 3, 1, 2, 2, 3];
        quick_sort_by(&mut v, i32::cmp);
        assert_eq!(v, vec![1, 1, 2, 2, 3, 3, 3]);
    }

    #[test]
    fn test_partition_places_pivot() {
        let mut v = vec![5, 9, 1, 7, 4];
        let p = partition(&mut v, &mut i32::cmp);
        assert_eq!(v[p], 4);
        assert!(v[..p].iter().all(|&x| x <= 4));
        assert!(v[p + 1..].iter().all(|&x| x > 4));
    }

    proptest! {
        #[test]
        fn prop_matches_std_sort(mut v in prop::collection::vec(any::<i32>(), 0..300)) {
            let mut expected = v.clone();
            expected.sort();
            quick_sort_by(&mut v, i32::cmp);
            prop_assert_eq!(v, expected);
        }
    }
}
