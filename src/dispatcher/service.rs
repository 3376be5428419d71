//! Thread-safe dispatcher façade.

use super::config::DispatcherConfig;
use crate::benchmark::{BenchmarkReport, CompareConfig, Comparator};
use crate::error::{DispatchError, Result};
use crate::model::{Clock, Customer, CustomerId, CustomerRequest, SystemClock, Tier};
use crate::queue::{QueueManager, QueueSizes};
use crate::sorting::Algorithm;
use crate::stats::Statistics;
use parking_lot::Mutex;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use u_numflow::random::create_rng;

/// Mutable state guarded by the dispatcher's lock.
struct State {
    queues: QueueManager,
    in_service: Vec<Customer>,
    served: Vec<Customer>,
    cancelled: Vec<Customer>,
    next_id: CustomerId,
    registered: usize,
    /// Bumped by every change to the waiting population.
    revision: u64,
    /// Bumped by `reset` only. Ids restart at 1 afterwards, so customers
    /// from different generations must never be matched by id.
    generation: u64,
}

impl State {
    fn new(queues: QueueManager) -> Self {
        Self {
            queues,
            in_service: Vec::new(),
            served: Vec::new(),
            cancelled: Vec::new(),
            next_id: 1,
            registered: 0,
            revision: 0,
            generation: 0,
        }
    }
}

/// Priority-aware service dispatcher.
///
/// Owns a [`QueueManager`] behind a single mutex: every operation that
/// touches the queues runs in one short critical section. Sorting and
/// benchmarking work on a snapshot taken under the lock and run outside
/// it; [`reorder`](Self::reorder) reacquires the lock only to swap the
/// sorted population back in.
///
/// Construct one instance and share it by reference or `Arc`.
///
/// # Examples
///
/// ```
/// use u_dispatch::dispatcher::Dispatcher;
/// use u_dispatch::model::Tier;
///
/// let dispatcher = Dispatcher::default();
/// dispatcher.enqueue("Ana", Tier::Standard, 10).unwrap();
/// dispatcher.enqueue("Bruno", Tier::Corporate, 5).unwrap();
///
/// let next = dispatcher.dispatch_next().unwrap();
/// assert_eq!(next.name, "Bruno");
/// assert_eq!(dispatcher.dispatch_all(), 1);
/// assert!(dispatcher.dispatch_next().is_none());
/// ```
pub struct Dispatcher {
    config: DispatcherConfig,
    clock: Arc<dyn Clock>,
    state: Mutex<State>,
}

impl Dispatcher {
    /// Creates a dispatcher that stamps times with a [`SystemClock`].
    pub fn new(config: DispatcherConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// Creates a dispatcher with a caller-provided clock.
    pub fn with_clock(config: DispatcherConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        config
            .validate()
            .map_err(|details| DispatchError::InvalidConfig { details })?;
        Ok(Self::from_parts(config, clock))
    }

    fn from_parts(config: DispatcherConfig, clock: Arc<dyn Clock>) -> Self {
        let queues = QueueManager::with_quota(config.quota);
        Self {
            config,
            clock,
            state: Mutex::new(State::new(queues)),
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Registers a customer from a caller request.
    ///
    /// Fails with [`DispatchError::ValidationFailed`] on a blank name, a
    /// missing tier, or an estimated duration below one minute.
    pub fn submit(&self, request: &CustomerRequest) -> Result<Customer> {
        let (tier, minutes) = request.validate()?;

        let mut state = self.state.lock();
        let id = state.next_id;
        let customer = Customer::new(id, request.name.trim(), tier, minutes, self.clock.now());
        state.queues.enqueue(customer.clone())?;
        state.next_id += 1;
        state.registered += 1;
        state.revision += 1;
        drop(state);

        info!(id, name = %customer.name, tier = %tier, "customer registered");
        Ok(customer)
    }

    /// Registers a customer.
    pub fn enqueue(&self, name: &str, tier: Tier, estimated_minutes: u32) -> Result<Customer> {
        self.submit(&CustomerRequest::new(name, tier, estimated_minutes))
    }

    /// Serves the next customer chosen by the fairness policy.
    ///
    /// Returns `None` when nobody is waiting. The returned customer is in
    /// [`Status::Served`](crate::model::Status::Served) and has been added
    /// to the served list.
    pub fn dispatch_next(&self) -> Option<Customer> {
        let served = self.serve_next();
        if served.is_none() {
            warn!("no customer waiting");
        }
        served
    }

    /// While the service runs the customer is listed by
    /// [`list_in_service`](Self::list_in_service).
    fn serve_next(&self) -> Option<Customer> {
        let (mut customer, generation) = {
            let mut state = self.state.lock();
            let mut customer = state.queues.next()?;
            if let Err(err) = customer.begin_service(self.clock.now()) {
                error!(id = customer.id, %err, "dispatched customer was not waiting");
            }
            state.in_service.push(customer.clone());
            state.revision += 1;
            (customer, state.generation)
        };
        info!(
            id = customer.id,
            name = %customer.name,
            tier = %customer.tier,
            "service started"
        );

        self.simulate_service(&customer);

        if let Err(err) = customer.finish_service(self.clock.now()) {
            error!(id = customer.id, %err, "could not complete service");
        }

        let mut state = self.state.lock();
        if state.generation == generation {
            state.in_service.retain(|c| c.id != customer.id);
            state.served.push(customer.clone());
        } else {
            debug!(id = customer.id, "dispatcher reset during service, not recorded");
        }
        drop(state);

        info!(id = customer.id, "service finished");
        Some(customer)
    }

    fn simulate_service(&self, customer: &Customer) {
        let scale = self.config.service_time_scale;
        if !scale.is_zero() {
            std::thread::sleep(scale * customer.estimated_minutes);
        }
    }

    /// Serves customers until every queue is empty. Returns how many were served.
    pub fn dispatch_all(&self) -> usize {
        info!("dispatching all waiting customers");
        let count = std::iter::from_fn(|| self.serve_next()).count();
        info!(count, "dispatch complete");
        count
    }

    /// Re-sorts the waiting population with the named algorithm.
    ///
    /// Unrecognized names use quicksort. Returns the sort time in
    /// milliseconds; zero when nobody is waiting.
    pub fn reorder(&self, algorithm: &str) -> u64 {
        self.reorder_with(Algorithm::from_name(algorithm))
    }

    /// Re-sorts with [`DispatcherConfig::default_algorithm`].
    pub fn reorder_default(&self) -> u64 {
        self.reorder_with(self.config.default_algorithm)
    }

    /// Re-sorts the waiting population with `algorithm`.
    ///
    /// Customers registered, served or cancelled while the sort ran are
    /// reconciled before the swap: departed customers are dropped and new
    /// arrivals keep their place behind the sorted population. A
    /// [`reset`](Self::reset) during the sort discards the sorted order.
    /// A completed swap starts a new fairness cycle.
    pub fn reorder_with(&self, algorithm: Algorithm) -> u64 {
        let (snapshot, revision, generation) = self.waiting_snapshot();
        if snapshot.is_empty() {
            debug!("nothing to reorder");
            return 0;
        }

        let start = Instant::now();
        let sorted = algorithm.sort(&snapshot);
        let elapsed = start.elapsed();

        self.install_sorted(sorted, revision, generation);

        let millis = elapsed.as_millis() as u64;
        info!(
            algorithm = %algorithm,
            elapsed_ms = millis,
            "queues reordered"
        );
        millis
    }

    /// Waiting customers with the revision and generation they were read at.
    fn waiting_snapshot(&self) -> (Vec<Customer>, u64, u64) {
        let state = self.state.lock();
        (
            state.queues.all_waiting_snapshot(),
            state.revision,
            state.generation,
        )
    }

    /// Swaps a sorted snapshot into the live queues. Returns `false` when
    /// the dispatcher was reset since the snapshot was taken.
    fn install_sorted(&self, sorted: Vec<Customer>, revision: u64, generation: u64) -> bool {
        let mut state = self.state.lock();
        if state.generation != generation {
            debug!("dispatcher reset during sort, discarding sorted order");
            return false;
        }
        let sorted = if state.revision == revision {
            sorted
        } else {
            debug!("waiting population changed during sort, reconciling");
            reconcile(&sorted, state.queues.all_waiting_snapshot())
        };
        if let Err(err) = state.queues.bulk_replace(sorted) {
            error!(%err, "bulk replace rejected the sorted population");
        }
        state.revision += 1;
        true
    }

    /// Waiting customers, tier by tier in priority order.
    pub fn list_waiting(&self) -> Vec<Customer> {
        self.state.lock().queues.all_waiting_snapshot()
    }

    /// Served customers in service order.
    pub fn list_served(&self) -> Vec<Customer> {
        self.state.lock().served.clone()
    }

    /// Customers dispatched whose service has not finished yet.
    pub fn list_in_service(&self) -> Vec<Customer> {
        self.state.lock().in_service.clone()
    }

    /// Cancelled customers in cancellation order.
    pub fn list_cancelled(&self) -> Vec<Customer> {
        self.state.lock().cancelled.clone()
    }

    pub fn queue_sizes(&self) -> QueueSizes {
        self.state.lock().queues.sizes()
    }

    /// Removes a waiting customer and marks it cancelled.
    pub fn cancel(&self, id: CustomerId) -> Result<Customer> {
        let mut state = self.state.lock();
        let mut customer = state
            .queues
            .remove(id)
            .ok_or(DispatchError::CustomerNotFound { id })?;
        customer.cancel()?;
        state.cancelled.push(customer.clone());
        state.revision += 1;
        drop(state);

        info!(id, name = %customer.name, "customer cancelled");
        Ok(customer)
    }

    /// Benchmarks sort strategies on a snapshot of the waiting population.
    ///
    /// The snapshot is taken under the lock; sorting runs outside it and
    /// never touches the live queues.
    pub fn compare(&self, config: &CompareConfig) -> BenchmarkReport {
        let snapshot = self.list_waiting();
        Comparator::run(&snapshot, config)
    }

    /// Registers `count` synthetic customers named `Customer {i}`.
    ///
    /// Tiers cycle Preferential, Corporate, Standard; estimated durations
    /// are drawn uniformly from `[5, 25)` minutes.
    pub fn simulate(&self, count: usize) -> Result<Vec<Customer>> {
        info!(count, "simulating registrations");
        let first_id = self.state.lock().next_id;
        let seed = match self.config.seed {
            Some(seed) => seed ^ first_id,
            None => rand::random(),
        };
        let mut rng = create_rng(seed);

        let cycle = [Tier::Standard, Tier::Preferential, Tier::Corporate];
        (1..=count)
            .map(|i| {
                let tier = cycle[i % cycle.len()];
                let minutes = rng.random_range(5..25);
                self.enqueue(&format!("Customer {i}"), tier, minutes)
            })
            .collect()
    }

    /// Aggregate statistics over everything served since the last reset.
    pub fn statistics(&self) -> Statistics {
        let now = self.clock.now();
        let state = self.state.lock();
        let mut stats = Statistics::compute(
            &state.served,
            state.registered,
            state.cancelled.len(),
            state.queues.sizes(),
            now,
        );
        stats.in_service = state.in_service.len();
        stats
    }

    /// Clears queues, histories, counters, and restarts ids at 1.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.queues.reset_all();
        state.in_service.clear();
        state.served.clear();
        state.cancelled.clear();
        state.next_id = 1;
        state.registered = 0;
        state.revision += 1;
        state.generation += 1;
        drop(state);
        info!("dispatcher reset");
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::from_parts(DispatcherConfig::default(), Arc::new(SystemClock::new()))
    }
}

/// Orders the current waiting population by a sorted snapshot taken in
/// the same generation.
///
/// Only `current` customers are returned; `sorted` contributes positions.
/// Customers absent from the snapshot follow in their current order.
/// Arrivals are monotonic, so they sort after everything of their tier.
fn reconcile(sorted: &[Customer], current: Vec<Customer>) -> Vec<Customer> {
    let rank: HashMap<CustomerId, usize> = sorted
        .iter()
        .enumerate()
        .map(|(pos, c)| (c.id, pos))
        .collect();
    let (mut ranked, arrivals): (Vec<Customer>, Vec<Customer>) = current
        .into_iter()
        .partition(|c| rank.contains_key(&c.id));
    ranked.sort_by_key(|c| rank.get(&c.id).copied().unwrap_or(usize::MAX));
    ranked.extend(arrivals);
    ranked
}
