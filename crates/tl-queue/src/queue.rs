//! `PhaseQueue` — unbounded blocking queue guarded by one mutex.
//!
//! # Pop order
//!
//! The default order is [`PopOrder::Lifo`]: `blocking_pop` takes the most
//! recently pushed value.  When the consumer keeps up with the producer the
//! queue holds at most one value and the order never shows.  When values
//! pile up, LIFO hands the freshest phase to the next waiter first.
//! [`PopOrder::Fifo`] is available for callers that want event order.
//!
//! # Poisoning
//!
//! The buffer has no invariant a panicking lock holder could break, so a
//! poisoned lock is recovered and used as-is.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tl_core::Phase;

/// Which end of the buffer the pop operations take from.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum PopOrder {
    /// Most recently pushed first.
    #[default]
    Lifo,
    /// Oldest first.
    Fifo,
}

struct Inner<T> {
    items:  VecDeque<T>,
    pushed: u64,
    popped: u64,
}

/// Thread-safe hand-off from one producer to any number of blocked consumers.
///
/// `push` never blocks beyond taking the lock.  `blocking_pop` parks the
/// caller on the condition variable until the buffer is non-empty.
pub struct PhaseQueue<T = Phase> {
    inner:     Mutex<Inner<T>>,
    not_empty: Condvar,
    order:     PopOrder,
}

impl<T> PhaseQueue<T> {
    /// An empty LIFO queue.
    pub fn new() -> Self {
        Self::with_order(PopOrder::Lifo)
    }

    pub fn with_order(order: PopOrder) -> Self {
        Self {
            inner: Mutex::new(Inner {
                items:  VecDeque::new(),
                pushed: 0,
                popped: 0,
            }),
            not_empty: Condvar::new(),
            order,
        }
    }

    /// Append `value` and wake one blocked consumer, if any.
    pub fn push(&self, value: T) {
        let mut inner = self.lock();
        inner.items.push_back(value);
        inner.pushed += 1;
        self.not_empty.notify_one();
    }

    /// Remove and return a value, parking the caller while the queue is empty.
    ///
    /// Spurious wakeups re-check the buffer before returning.  Never returns
    /// without a value: with no producer this blocks forever.
    pub fn blocking_pop(&self) -> T {
        let mut inner = self.lock();
        loop {
            inner = self
                .not_empty
                .wait_while(inner, |inner| inner.items.is_empty())
                .unwrap_or_else(PoisonError::into_inner);
            if let Some(value) = self.take(&mut inner) {
                return value;
            }
        }
    }

    /// Like [`blocking_pop`](Self::blocking_pop) but gives up after `timeout`.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T> {
        let guard = self.lock();
        let (mut inner, _timed_out) = self
            .not_empty
            .wait_timeout_while(guard, timeout, |inner| inner.items.is_empty())
            .unwrap_or_else(PoisonError::into_inner);
        self.take(&mut inner)
    }

    /// Take a value if one is buffered; never waits.
    pub fn try_pop(&self) -> Option<T> {
        let mut inner = self.lock();
        self.take(&mut inner)
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn order(&self) -> PopOrder {
        self.order
    }

    /// Lifetime `(pushed, popped)` counts.
    pub fn stats(&self) -> (u64, u64) {
        let inner = self.lock();
        (inner.pushed, inner.popped)
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn take(&self, inner: &mut Inner<T>) -> Option<T> {
        let value = match self.order {
            PopOrder::Lifo => inner.items.pop_back(),
            PopOrder::Fifo => inner.items.pop_front(),
        }?;
        inner.popped += 1;
        Some(value)
    }
}

impl<T> Default for PhaseQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
