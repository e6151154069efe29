//! Cancellable timers on a logical clock
//!
//! Time only moves when the owner calls [`TimerQueue::advance`], so the engine stays
//! single-threaded and tests can step through delays exactly.

use std::time::Duration;

/// Handle returned by [`TimerQueue::schedule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Pending<T> {
    id: TimerId,
    due: Duration,
    payload: T,
}

/// Pending timers carrying a payload of type `T`
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now: Duration,
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<T> TimerQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time
    #[inline]
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Fire `payload` once `delay` has elapsed from now
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            id,
            due: self.now + delay,
            payload,
        });
        id
    }

    /// Remove a pending timer, returning its payload if it had not fired yet
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let index = self.pending.iter().position(|p| p.id == id)?;
        Some(self.pending.remove(index).payload)
    }

    /// Move the clock forward and return every timer that came due, earliest first
    pub fn advance(&mut self, elapsed: Duration) -> Vec<(TimerId, T)> {
        self.now += elapsed;
        let now = self.now;

        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due <= now);
        self.pending = pending;

        due.sort_by_key(|p| (p.due, p.id.0));
        due.into_iter().map(|p| (p.id, p.payload)).collect()
    }

    /// Drop every pending timer
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
