//! In-place heapsort.

use super::types::SortStrategy;
use crate::model::Customer;
use std::cmp::Ordering;

/// Sorts `v` in place with heapsort.
///
/// Builds a max-heap, then repeatedly swaps the root with the last
/// unsorted element and sifts the new root down. Not stable.
/// O(n log n) time, O(1) auxiliary space.
pub fn heap_sort_by<T, F>(v: &mut [T], mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();
    for root in (0..n / 2).rev() {
        sift_down(v, root, n, &mut cmp);
    }
    for end in (1..n).rev() {
        v.swap(0, end);
        sift_down(v, 0, end, &mut cmp);
    }
}

fn sift_down<T, F>(v: &mut [T], mut root: usize, len: usize, cmp: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    loop {
        let left = 2 * root + 1;
        if left >= len {
            break;
        }
        let right = left + 1;
        let mut largest = root;
        if cmp(&v[left], &v[largest]) == Ordering::Greater {
            largest = left;
        }
        if right < len && cmp(&v[right], &v[largest]) == Ordering::Greater {
            largest = right;
        }
        if largest == root {
            break;
        }
        v.swap(root, largest);
        root = largest;
    }
}

/// Heapsort strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeapSorter;

impl SortStrategy for HeapSorter {
    fn name(&self) -> &str {
        "Heap Sort"
    }

    fn time_complexity(&self) -> &'static str {
        "O(n log n) guaranteed"
    }

    fn space_complexity(&self) -> &'static str {
        "O(1)"
    }

    fn is_stable(&self) -> bool {
        false
    }

    fn sort(&self, customers: &[Customer]) -> Vec<Customer> {
        let mut out = customers.to_vec();
        heap_sort_by(&mut out, Customer::canonical_cmp);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_basic() {
        let mut v = vec![4, 10, 3, 5, 1];
        heap_sort_by(&mut v, i32::cmp);
        assert_eq!(v, vec![1, 3, 4, 5, 10]);
    }

    #[test]
    fn test_heap_property_after_build() {
        let mut v = vec![1, 2, 3, 4, 5, 6, 7];
        let n = v.len();
        for root in (0..n / 2).rev() {
            sift_down(&mut v, root, n, &mut i32::cmp);
        }
        assert_eq!(v[0], 7);
        for i in 1..n {
            assert!(v[(i - 1) / 2] >= v[i]);
        }
    }

    #[test]
    fn test_empty_and_single() {
        let mut empty: Vec<i32> = vec![];
        heap_sort_by(&mut empty, i32::cmp);
        assert!(empty.is_empty());

        let mut one = vec![3];
        heap_sort_by(&mut one, i32::cmp);
        assert_eq!(one, vec![3]);
    }

    proptest! {
        #[test]
        fn prop_matches_std_sort(mut v in prop::collection::vec(any::<i64>(), 0..300)) {
            let mut expected = v.clone();
            expected.sort();
            heap_sort_by(&mut v, i64::cmp);
            prop_assert_eq!(v, expected);
        }
    }
}
