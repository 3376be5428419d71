//! Strategy trait and algorithm selector.

use super::heap::HeapSorter;
use super::merge::MergeSorter;
use super::quick::QuickSorter;
use crate::model::Customer;
use std::cmp::Ordering;
use std::fmt;
use tracing::warn;

/// A total-ordering algorithm over customers.
///
/// Implementations return a new vector in canonical order
/// (`tier weight`, then `arrival`) and leave the input untouched.
/// The complexity descriptors are informational only.
pub trait SortStrategy: Send + Sync {
    /// Display name of the algorithm.
    fn name(&self) -> &str;

    /// Time complexity, e.g. `"O(n log n)"`.
    fn time_complexity(&self) -> &'static str;

    /// Auxiliary space complexity.
    fn space_complexity(&self) -> &'static str;

    /// Whether customers with equal keys keep their input order.
    fn is_stable(&self) -> bool;

    /// Sorts a copy of `customers` into canonical order.
    fn sort(&self, customers: &[Customer]) -> Vec<Customer>;
}

/// Selects one of the built-in strategies.
///
/// Declaration order (quick, merge, heap) is also the tie-break order
/// when two strategies time identically in a benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    QuickSort,
    MergeSort,
    HeapSort,
}

impl Algorithm {
    /// All algorithms in declaration order.
    pub const ALL: [Algorithm; 3] = [Algorithm::QuickSort, Algorithm::MergeSort, Algorithm::HeapSort];

    /// Lowercase identifier: `"quicksort"`, `"mergesort"` or `"heapsort"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::QuickSort => "quicksort",
            Algorithm::MergeSort => "mergesort",
            Algorithm::HeapSort => "heapsort",
        }
    }

    /// Resolves an identifier case-insensitively.
    ///
    /// Unrecognized names fall back to [`Algorithm::QuickSort`].
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "quicksort" => Algorithm::QuickSort,
            "mergesort" => Algorithm::MergeSort,
            "heapsort" => Algorithm::HeapSort,
            other => {
                warn!(requested = other, "unknown sort algorithm, using quicksort");
                Algorithm::QuickSort
            }
        }
    }

    /// The strategy implementing this algorithm.
    pub fn strategy(self) -> &'static dyn SortStrategy {
        match self {
            Algorithm::QuickSort => &QuickSorter,
            Algorithm::MergeSort => &MergeSorter,
            Algorithm::HeapSort => &HeapSorter,
        }
    }

    /// Shorthand for `self.strategy().sort(customers)`.
    pub fn sort(self, customers: &[Customer]) -> Vec<Customer> {
        self.strategy().sort(customers)
    }
}

impl Default for Algorithm {
    fn default() -> Self {
        Algorithm::QuickSort
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` if `items` is non-decreasing under `cmp`. O(n).
pub fn is_sorted_by<T, F>(items: &[T], mut cmp: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    items
        .windows(2)
        .all(|w| cmp(&w[0], &w[1]) != Ordering::Greater)
}

/// Returns `true` if `customers` is in canonical order.
pub fn is_canonically_sorted(customers: &[Customer]) -> bool {
    is_sorted_by(customers, Customer::canonical_cmp)
}
