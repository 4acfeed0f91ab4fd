//! Bounded budget of threads allowed to block on another thread's computation

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counting budget; a permit is returned when it is dropped
#[derive(Debug)]
pub struct BlockingBudget {
    limit: usize,
    in_use: AtomicUsize,
}

impl BlockingBudget {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            in_use: AtomicUsize::new(0),
        }
    }

    /// Take a permit, or `None` when the budget is exhausted
    pub fn try_acquire(&self) -> Option<BlockingPermit<'_>> {
        let mut current = self.in_use.load(Ordering::Acquire);
        loop {
            if current >= self.limit {
                return None;
            }
            match self.in_use.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return Some(BlockingPermit { budget: self }),
                Err(actual) => current = actual,
            }
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn in_use(&self) -> usize {
        self.in_use.load(Ordering::Acquire)
    }
}

/// Held while blocked
#[derive(Debug)]
pub struct BlockingPermit<'a> {
    budget: &'a BlockingBudget,
}

impl Drop for BlockingPermit<'_> {
    fn drop(&mut self) {
        self.budget.in_use.fetch_sub(1, Ordering::AcqRel);
    }
}
