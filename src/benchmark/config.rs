//! Comparator configuration.

use crate::sorting::Algorithm;

/// Upper bound on timed rounds per comparison.
pub const MAX_RUNS: usize = 10_000;

/// Configuration for a strategy comparison.
///
/// # Examples
///
/// ```
/// use u_dispatch::benchmark::CompareConfig;
/// use u_dispatch::sorting::Algorithm;
///
/// let config = CompareConfig::default()
///     .with_names(["heapsort", "quicksort"])
///     .with_runs(5);
/// assert_eq!(
///     config.resolved_algorithms(),
///     vec![Algorithm::QuickSort, Algorithm::HeapSort]
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct CompareConfig {
    /// Strategies to run. Empty means all of them.
    pub algorithms: Vec<Algorithm>,

    /// Number of timed rounds. Timings are averaged per strategy.
    /// Zero is treated as one; values above [`MAX_RUNS`] are capped.
    pub runs: usize,

    /// Verify output ordering with rayon.
    ///
    /// Only effective with the `parallel` feature; otherwise the scan is
    /// sequential. Timed sections always run on the calling thread.
    pub parallel: bool,
}

impl CompareConfig {
    pub fn with_algorithms(mut self, algorithms: impl IntoIterator<Item = Algorithm>) -> Self {
        self.algorithms = algorithms.into_iter().collect();
        self
    }

    /// Selects strategies by name; unrecognized names resolve to quicksort.
    pub fn with_names<'a>(self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.with_algorithms(names.into_iter().map(Algorithm::from_name))
    }

    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Requested strategies, deduplicated, in declaration order.
    pub fn resolved_algorithms(&self) -> Vec<Algorithm> {
        if self.algorithms.is_empty() {
            return Algorithm::ALL.to_vec();
        }
        let mut algos = self.algorithms.clone();
        algos.sort();
        algos.dedup();
        algos
    }

    /// Number of rounds, clamped to `1..=MAX_RUNS`.
    pub fn effective_runs(&self) -> usize {
        self.runs.clamp(1, MAX_RUNS)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.runs > MAX_RUNS {
            return Err(format!("runs must be at most {MAX_RUNS}, got {}", self.runs));
        }
        Ok(())
    }
}
