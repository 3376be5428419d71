//! Timing and verification loop.

use super::config::CompareConfig;
use crate::model::{Customer, Tier};
use crate::sorting::{is_canonically_sorted, Algorithm};
use rand::Rng;
use std::fmt::Write as _;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use u_numflow::random::{create_rng, shuffle};

/// Outcome of one strategy in a comparison.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StrategyResult {
    pub algorithm: Algorithm,

    /// Display name of the strategy.
    pub name: &'static str,

    /// Elapsed sort time. Averaged over all runs in a repeated comparison.
    pub elapsed: Duration,

    /// Whether every run produced canonically ordered output.
    pub correct: bool,

    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
}

impl StrategyResult {
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Per-strategy timing and correctness summary.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BenchmarkReport {
    /// Size of the sorted population.
    pub element_count: usize,

    /// Rounds the timings were averaged over.
    pub runs: usize,

    /// One entry per strategy, in declaration order.
    pub results: Vec<StrategyResult>,

    /// Strategy with the lowest elapsed time. `None` when there was no data.
    pub fastest: Option<Algorithm>,
}

impl BenchmarkReport {
    fn empty(runs: usize) -> Self {
        Self {
            element_count: 0,
            runs,
            results: Vec::new(),
            fastest: None,
        }
    }

    /// `true` when the comparison had no customers to sort.
    pub fn is_empty(&self) -> bool {
        self.element_count == 0
    }

    pub fn result(&self, algorithm: Algorithm) -> Option<&StrategyResult> {
        self.results.iter().find(|r| r.algorithm == algorithm)
    }

    pub fn all_correct(&self) -> bool {
        self.results.iter().all(|r| r.correct)
    }

    /// Human-readable analysis: timings, complexity, and size-based advice.
    pub fn recommendation(&self) -> String {
        let Some(fastest) = self.fastest else {
            return "No data to compare.".to_string();
        };

        let mut out = String::new();
        let _ = writeln!(out, "Elements: {}", self.element_count);
        let _ = writeln!(out, "Fastest: {}", fastest.strategy().name());
        if self.runs > 1 {
            let _ = writeln!(out, "Averaged over {} runs", self.runs);
        }

        out.push_str("\nExecution time:\n");
        for r in &self.results {
            let flag = if r.correct { "" } else { " (INCORRECT ORDER)" };
            let _ = writeln!(out, "  {}: {:.3} ms{flag}", r.name, r.elapsed_ms());
        }

        out.push_str("\nComplexity:\n");
        for r in &self.results {
            let _ = writeln!(
                out,
                "  {}: time {}, space {}",
                r.name, r.time_complexity, r.space_complexity
            );
        }

        out.push_str("\nAdvice:\n");
        if self.element_count < 50 {
            out.push_str("  Small input: any strategy is adequate; quicksort is usually fastest.\n");
        } else if self.element_count < 1000 {
            out.push_str("  Medium input: quicksort is fastest on average, mergesort is stable and predictable.\n");
        } else {
            out.push_str("  Large input: mergesort or heapsort guarantee O(n log n).\n");
            out.push_str("  Mergesort needs O(n) extra memory, heapsort sorts in place.\n");
            out.push_str("  Quicksort degrades to O(n^2) on sorted input with a last-element pivot.\n");
        }
        out
    }
}

/// Runs sort strategies over the same population and compares them.
///
/// Every strategy sorts its own copy of the input, so neither the caller's
/// list nor the order produced by an earlier strategy influences a run.
pub struct Comparator;

impl Comparator {
    /// Runs the comparison described by `config`.
    ///
    /// With more than one run this is [`compare_repeated`](Self::compare_repeated).
    pub fn run(customers: &[Customer], config: &CompareConfig) -> BenchmarkReport {
        if let Err(details) = config.validate() {
            warn!(%details, "comparison config clamped");
        }
        let algorithms = config.resolved_algorithms();
        let runs = config.effective_runs();
        if runs == 1 {
            Self::compare_with(customers, &algorithms, config.parallel)
        } else {
            Self::repeat(customers, &algorithms, runs, config.parallel)
        }
    }

    /// Single timed round over `algorithms` (all of them when empty).
    pub fn compare(customers: &[Customer], algorithms: &[Algorithm]) -> BenchmarkReport {
        let config = CompareConfig::default().with_algorithms(algorithms.iter().copied());
        Self::compare_with(customers, &config.resolved_algorithms(), false)
    }

    /// `runs` rounds over all strategies, timings averaged. Zero runs count as one.
    pub fn compare_repeated(customers: &[Customer], runs: usize) -> BenchmarkReport {
        let runs = CompareConfig::default().with_runs(runs).effective_runs();
        Self::repeat(customers, &Algorithm::ALL, runs, false)
    }

    fn compare_with(customers: &[Customer], algorithms: &[Algorithm], parallel: bool) -> BenchmarkReport {
        if customers.is_empty() {
            warn!("empty population, nothing to compare");
            return BenchmarkReport::empty(1);
        }
        info!(elements = customers.len(), "comparing sort strategies");

        let results: Vec<StrategyResult> = algorithms
            .iter()
            .map(|&algo| time_strategy(algo, customers, parallel))
            .collect();
        let fastest = fastest_of(&results);

        BenchmarkReport {
            element_count: customers.len(),
            runs: 1,
            results,
            fastest,
        }
    }

    fn repeat(
        customers: &[Customer],
        algorithms: &[Algorithm],
        runs: usize,
        parallel: bool,
    ) -> BenchmarkReport {
        if customers.is_empty() {
            warn!("empty population, nothing to compare");
            return BenchmarkReport::empty(runs);
        }
        info!(runs, elements = customers.len(), "repeated strategy comparison");

        let mut totals: Vec<(Duration, bool)> = vec![(Duration::ZERO, true); algorithms.len()];
        for _ in 0..runs {
            let round = Self::compare_with(customers, algorithms, parallel);
            for (total, r) in totals.iter_mut().zip(&round.results) {
                total.0 += r.elapsed;
                total.1 &= r.correct;
            }
        }

        let results: Vec<StrategyResult> = algorithms
            .iter()
            .zip(totals)
            .map(|(&algo, (total, correct))| {
                let strategy = algo.strategy();
                StrategyResult {
                    algorithm: algo,
                    name: strategy.name(),
                    elapsed: total / runs as u32,
                    correct,
                    time_complexity: strategy.time_complexity(),
                    space_complexity: strategy.space_complexity(),
                }
            })
            .collect();
        let fastest = fastest_of(&results);

        BenchmarkReport {
            element_count: customers.len(),
            runs,
            results,
            fastest,
        }
    }
}

fn time_strategy(algo: Algorithm, customers: &[Customer], parallel: bool) -> StrategyResult {
    let strategy = algo.strategy();

    let start = Instant::now();
    let sorted = strategy.sort(customers);
    let elapsed = start.elapsed();

    let correct = sorted.len() == customers.len() && verify_order(&sorted, parallel);
    debug!(
        strategy = strategy.name(),
        elapsed_ns = elapsed.as_nanos() as u64,
        correct,
        "strategy timed"
    );

    StrategyResult {
        algorithm: algo,
        name: strategy.name(),
        elapsed,
        correct,
        time_complexity: strategy.time_complexity(),
        space_complexity: strategy.space_complexity(),
    }
}

/// Lowest elapsed time; the first one wins ties.
fn fastest_of(results: &[StrategyResult]) -> Option<Algorithm> {
    results
        .iter()
        .min_by_key(|r| r.elapsed)
        .map(|r| r.algorithm)
}

#[cfg(feature = "parallel")]
fn verify_order(sorted: &[Customer], parallel: bool) -> bool {
    use rayon::prelude::*;
    if parallel {
        sorted
            .par_windows(2)
            .all(|w| w[0].canonical_cmp(&w[1]) != std::cmp::Ordering::Greater)
    } else {
        is_canonically_sorted(sorted)
    }
}

#[cfg(not(feature = "parallel"))]
fn verify_order(sorted: &[Customer], _parallel: bool) -> bool {
    is_canonically_sorted(sorted)
}

/// Generates `n` customers with random tiers, estimated durations in
/// `[5, 25)` minutes, and unique arrival times in shuffled order.
///
/// Deterministic for a given seed. Useful as benchmark input.
pub fn sample_population(n: usize, seed: u64) -> Vec<Customer> {
    let mut rng = create_rng(seed);
    let mut arrivals: Vec<u64> = (0..n as u64).collect();
    shuffle(&mut arrivals, &mut rng);

    arrivals
        .into_iter()
        .enumerate()
        .map(|(i, arrival)| {
            let tier = Tier::ALL[rng.random_range(0..Tier::ALL.len())];
            let minutes = rng.random_range(5..25);
            let id = i as u64 + 1;
            Customer::new(id, format!("Customer {id}"), tier, minutes, arrival)
        })
        .collect()
}
