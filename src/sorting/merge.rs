//! Top-down mergesort.

use super::types::SortStrategy;
use crate::model::Customer;
use std::cmp::Ordering;

/// Sorts `v` with top-down mergesort.
///
/// Stable: equal elements keep their relative order. O(n log n) time,
/// O(n) auxiliary buffer.
pub fn merge_sort_by<T, F>(v: &mut [T], mut cmp: F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    if v.len() <= 1 {
        return;
    }
    let mut buf = v.to_vec();
    sort_range(v, &mut buf, &mut cmp);
}

fn sort_range<T, F>(v: &mut [T], buf: &mut [T], cmp: &mut F)
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering,
{
    let n = v.len();
    if n <= 1 {
        return;
    }
    let mid = n / 2;
    {
        let (v_left, v_right) = v.split_at_mut(mid);
        let (b_left, b_right) = buf.split_at_mut(mid);
        sort_range(v_left, b_left, cmp);
        sort_range(v_right, b_right, cmp);
    }

    buf.clone_from_slice(v);
    let (left, right) = buf.split_at(mid);
    let (mut i, mut j) = (0, 0);
    for slot in v.iter_mut() {
        // Ties take from the left run.
        let take_left =
            j >= right.len() || (i < left.len() && cmp(&left[i], &right[j]) != Ordering::Greater);
        if take_left {
            *slot = left[i].clone();
            i += 1;
        } else {
            *slot = right[j].clone();
            j += 1;
        }
    }
}

/// Mergesort strategy.
#[derive(Debug, Clone, Copy, Default)]
pub struct MergeSorter;

impl SortStrategy for MergeSorter {
    fn name(&self) -> &str {
        "Merge Sort"
    }

    fn time_complexity(&self) -> &'static str {
        "O(n log n) guaranteed"
    }

    fn space_complexity(&self) -> &'static str {
        "O(n)"
    }

    fn is_stable(&self) -> bool {
        true
    }

    fn sort(&self, customers: &[Customer]) -> Vec<Customer> {
        let mut out = customers.to_vec();
        merge_sort_by(&mut out, Customer::canonical_cmp);
        out
    }
}
