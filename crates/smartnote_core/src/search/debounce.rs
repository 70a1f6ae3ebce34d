//! Deadline-based debouncer for bursty input.
//!
//! # Responsibility
//! - Collapse successive updates within a window into one delivery carrying
//!   the last value.
//!
//! # Invariants
//! - Scheduling replaces any pending value and restarts the window; replaced
//!   values are never delivered.
//! - Nothing is delivered before the window has elapsed since the last
//!   schedule call.
//! - The debouncer owns no thread or timer; callers drive it with `poll`.

use std::time::{Duration, Instant};

/// Default window for search-text input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Cancel-on-reschedule debouncer driven by caller-supplied instants.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    due_at: Instant,
    value: T,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedules `value` for delivery at `now + window`, cancelling any
    /// pending value.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some(Pending {
            due_at: now + self.window,
            value,
        });
    }

    /// Delivers the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.as_ref()?.due_at > now {
            return None;
        }
        self.pending.take().map(|pending| pending.value)
    }

    /// Delivers the pending value immediately, ignoring the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Drops the pending value without delivering it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Deadline of the pending value, for callers that sleep until it.
    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due_at)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
