/*
 * Result Cache
 *
 * Per-container memo of analysis results, keyed by analyzed unit.
 *
 * - Each container entry is tagged with the program model's modification
 *   count; a newer count replaces the whole entry, an older one bypasses it.
 * - The first caller for a unit owns the computation; later callers block on
 *   it while the blocking budget allows, otherwise compute on their own.
 * - The first published result wins and is what every caller gets back.
 * - A slot abandoned by a panicking owner is taken over by the next caller.
 * - Inside a rayon pool a waiting worker keeps executing pool jobs.
 */

use super::blocking::BlockingBudget;
use crate::features::common_dataflow::domain::BodyResult;
use crate::features::common_dataflow::ports::Lattice;
use crate::shared::models::{ContainerId, UnitId};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

enum SlotState<T> {
    Pending,
    Ready(Arc<BodyResult<T>>),
    /// Owner panicked before publishing
    Abandoned,
}

/// Result of one unit, possibly still being computed
struct ResultSlot<T> {
    state: Mutex<SlotState<T>>,
    ready: Condvar,
}

impl<T> ResultSlot<T> {
    fn pending() -> Self {
        Self {
            state: Mutex::new(SlotState::Pending),
            ready: Condvar::new(),
        }
    }

    fn get(&self) -> Option<Arc<BodyResult<T>>> {
        match &*self.state.lock() {
            SlotState::Ready(result) => Some(Arc::clone(result)),
            _ => None,
        }
    }

    /// Store `result` unless a result is already there; returns the stored one
    fn publish(&self, result: Arc<BodyResult<T>>) -> Arc<BodyResult<T>> {
        let mut state = self.state.lock();
        if let SlotState::Ready(existing) = &*state {
            return Arc::clone(existing);
        }
        *state = SlotState::Ready(Arc::clone(&result));
        drop(state);
        self.ready.notify_all();
        result
    }

    /// Take over an abandoned slot; true if the caller is now its owner
    fn reclaim(&self) -> bool {
        let mut state = self.state.lock();
        if let SlotState::Abandoned = *state {
            *state = SlotState::Pending;
            return true;
        }
        false
    }

    fn abandon(&self) {
        let mut state = self.state.lock();
        if let SlotState::Pending = *state {
            *state = SlotState::Abandoned;
        }
        drop(state);
        self.ready.notify_all();
    }

    /// Block until the slot is resolved; `None` if it was abandoned
    fn wait(&self, poll_interval: Duration) -> Option<Arc<BodyResult<T>>> {
        let in_pool = rayon::current_thread_index().is_some();
        loop {
            let mut state = self.state.lock();
            if let SlotState::Ready(result) = &*state {
                return Some(Arc::clone(result));
            }
            if let SlotState::Abandoned = *state {
                return None;
            }
            if !in_pool {
                self.ready.wait_for(&mut state, poll_interval);
                continue;
            }
            drop(state);

            // keep the worker busy so the owner's own pool jobs can finish
            if let Some(rayon::Yield::Executed) = rayon::yield_now() {
                continue;
            }
            let mut state = self.state.lock();
            if let SlotState::Pending = *state {
                self.ready.wait_for(&mut state, poll_interval);
            }
        }
    }
}

/// Marks the slot abandoned unless the owner publishes
struct OwnerGuard<'a, T> {
    slot: &'a ResultSlot<T>,
    published: bool,
}

impl<T> OwnerGuard<'_, T> {
    fn publish(mut self, result: Arc<BodyResult<T>>) -> Arc<BodyResult<T>> {
        self.published = true;
        self.slot.publish(result)
    }
}

impl<T> Drop for OwnerGuard<'_, T> {
    fn drop(&mut self) {
        if !self.published {
            self.slot.abandon();
        }
    }
}

/// Cached results of one container at one generation
struct ContainerResults<T> {
    generation: u64,
    units: DashMap<UnitId, Arc<ResultSlot<T>>>,
}

impl<T> ContainerResults<T> {
    fn new(generation: u64) -> Self {
        Self {
            generation,
            units: DashMap::new(),
        }
    }
}

/// Concurrent per-container result memo
pub struct ResultCache<T> {
    containers: DashMap<ContainerId, Arc<ContainerResults<T>>>,
    budget: BlockingBudget,
    poll_interval: Duration,
}

impl<T: Lattice> ResultCache<T> {
    pub fn new(max_blocked_waiters: usize, poll_interval: Duration) -> Self {
        Self {
            containers: DashMap::new(),
            budget: BlockingBudget::new(max_blocked_waiters),
            poll_interval,
        }
    }

    /// Cached result for `unit`, computing it with `compute` when absent.
    ///
    /// Concurrent callers for the same container generation and unit all
    /// receive the same `Arc`.
    pub fn get_or_compute<F>(
        &self,
        container: ContainerId,
        generation: u64,
        unit: UnitId,
        compute: F,
    ) -> Arc<BodyResult<T>>
    where
        F: FnOnce() -> BodyResult<T>,
    {
        let Some(results) = self.results_for(container, generation) else {
            debug!(%container, generation, "stale generation, computing uncached");
            return Arc::new(compute());
        };

        let (slot, mut owner) = match results.units.entry(unit) {
            Entry::Occupied(entry) => (Arc::clone(entry.get()), false),
            Entry::Vacant(entry) => {
                let slot = Arc::new(ResultSlot::pending());
                entry.insert(Arc::clone(&slot));
                (slot, true)
            }
        };

        if !owner {
            if let Some(result) = slot.get() {
                debug!(%container, %unit, "cache hit");
                return result;
            }
            owner = slot.reclaim();
        }

        if !owner {
            let Some(_permit) = self.budget.try_acquire() else {
                warn!(
                    %container,
                    %unit,
                    limit = self.budget.limit(),
                    "blocking budget exhausted, computing without waiting"
                );
                return slot.publish(Arc::new(compute()));
            };
            loop {
                if let Some(result) = slot.wait(self.poll_interval) {
                    debug!(%container, %unit, "cache hit after wait");
                    return result;
                }
                if slot.reclaim() {
                    warn!(%container, %unit, "owner abandoned computation, taking over");
                    break;
                }
            }
        }

        debug!(%container, %unit, generation, "cache miss, computing");
        let guard = OwnerGuard {
            slot: &slot,
            published: false,
        };
        guard.publish(Arc::new(compute()))
    }

    /// Ready result for `unit` at `generation`, without computing
    pub fn peek(&self, container: ContainerId, generation: u64, unit: UnitId) -> Option<Arc<BodyResult<T>>> {
        let results = self.containers.get(&container)?;
        if results.generation != generation {
            return None;
        }
        let slot = Arc::clone(results.units.get(&unit)?.value());
        slot.get()
    }

    /// Drop every cached result of `container`
    pub fn invalidate(&self, container: ContainerId) {
        if self.containers.remove(&container).is_some() {
            debug!(%container, "cache entry invalidated");
        }
    }

    pub fn clear(&self) {
        self.containers.clear();
    }

    /// Number of containers with cached results
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Entry for `container` at `generation`; `None` if a newer one is cached
    fn results_for(&self, container: ContainerId, generation: u64) -> Option<Arc<ContainerResults<T>>> {
        let mut entry = self
            .containers
            .entry(container)
            .or_insert_with(|| Arc::new(ContainerResults::new(generation)));
        if entry.generation < generation {
            *entry = Arc::new(ContainerResults::new(generation));
        }
        (entry.generation == generation).then(|| Arc::clone(&*entry))
    }
}
