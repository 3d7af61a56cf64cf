// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flipbook Timing: a host-agnostic timer queue for UI animations.
//!
//! Animated widgets often advance their state on fixed-delay timers: "after
//! 650 ms the page turn is done". This crate keeps the bookkeeping for those
//! timers without owning a clock or an event loop. Hosts pass the current time
//! (in milliseconds, from any monotonic origin) into every call and either:
//!
//! - poll the queue with [`TimerQueue::pop_due`] from their frame or tick
//!   callback, using [`TimerQueue::next_deadline`] to decide when to wake up, or
//! - arm their own platform timers from the returned [`TimerToken`]s and hand
//!   the token back through [`TimerQueue::take`] when the platform timer fires.
//!
//! ## Epochs
//!
//! Every queue carries an [`Epoch`]. [`TimerQueue::clear`] drops all pending
//! timers and advances the epoch, so a token issued before the clear can never
//! be accepted again, even if the host's platform timer fires late. This is the
//! guard that keeps a timer scheduled for one piece of content from mutating
//! state that has since been reset for another.
//!
//! ## Minimal example
//!
//! ```rust
//! use flipbook_timing::TimerQueue;
//!
//! let mut timers = TimerQueue::new();
//! let turn = timers.schedule(1_000, 650, "turn");
//! assert_eq!(timers.next_deadline(), Some(1_650));
//!
//! // Nothing is due yet.
//! assert!(timers.pop_due(1_200).is_none());
//!
//! // The deadline passed: the timer fires exactly once.
//! let fired = timers.pop_due(1_700).unwrap();
//! assert_eq!(fired.key(), &"turn");
//! assert_eq!(fired.id(), turn.id());
//! assert!(timers.pop_due(1_700).is_none());
//!
//! // Tokens from before a clear are stale.
//! let stale = timers.schedule(2_000, 10, "late");
//! timers.clear();
//! assert!(!timers.take(&stale));
//! ```
//!
//! This crate is `no_std`.

#![no_std]

use smallvec::SmallVec;

/// Generation counter of a [`TimerQueue`].
///
/// Advanced by [`TimerQueue::clear`]; tokens remember the epoch they were
/// issued in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(u64);

impl Epoch {
    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    #[must_use]
    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// A scheduled timer, as handed out to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerToken<K> {
    id: u64,
    epoch: Epoch,
    deadline: u64,
    key: K,
}

impl<K> TimerToken<K> {
    /// Identifier unique within the issuing queue.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Epoch the timer was scheduled in.
    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Absolute deadline in host milliseconds.
    #[must_use]
    pub fn deadline(&self) -> u64 {
        self.deadline
    }

    /// Caller-supplied payload describing what the timer is for.
    #[must_use]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Consumes the token and returns its payload.
    #[must_use]
    pub fn into_key(self) -> K {
        self.key
    }
}

/// A small queue of pending timers.
///
/// Pending timers are kept in a `SmallVec`; animation state machines rarely
/// have more than a couple of timers in flight, so the queue never allocates
/// in practice.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    pending: SmallVec<[TimerToken<K>; 4]>,
    epoch: Epoch,
    next_id: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TimerQueue<K> {
    /// Creates an empty queue in the initial epoch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: SmallVec::new(),
            epoch: Epoch::default(),
            next_id: 0,
        }
    }

    /// Returns the current epoch.
    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no timer is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterates over pending timers in scheduling order.
    pub fn iter(&self) -> impl Iterator<Item = &TimerToken<K>> + '_ {
        self.pending.iter()
    }

    /// Schedules `key` to fire `delay` milliseconds after `now`.
    ///
    /// The deadline saturates instead of overflowing.
    pub fn schedule(&mut self, now: u64, delay: u64, key: K) -> TimerToken<K>
    where
        K: Clone,
    {
        let token = TimerToken {
            id: self.next_id,
            epoch: self.epoch,
            deadline: now.saturating_add(delay),
            key,
        };
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push(token.clone());
        token
    }

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.iter().map(|t| t.deadline).min()
    }

    /// Removes and returns the earliest timer whose deadline is `<= now`.
    ///
    /// Timers with equal deadlines fire in the order they were scheduled.
    pub fn pop_due(&mut self, now: u64) -> Option<TimerToken<K>> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= now)
            .min_by_key(|(_, t)| (t.deadline, t.id))
            .map(|(i, _)| i)?;
        Some(self.pending.remove(index))
    }

    /// Accepts a host-fired token.
    ///
    /// Returns `true` and forgets the timer if the token belongs to the
    /// current epoch and is still pending. Stale, cancelled or already fired
    /// tokens return `false`.
    pub fn take(&mut self, token: &TimerToken<K>) -> bool {
        self.cancel(token)
    }

    /// Cancels a pending timer. Returns `true` if it was pending.
    pub fn cancel(&mut self, token: &TimerToken<K>) -> bool {
        if token.epoch != self.epoch {
            return false;
        }
        match self.pending.iter().position(|t| t.id == token.id) {
            Some(index) => {
                self.pending.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drops every pending timer and advances the epoch.
    ///
    /// Returns the new epoch.
    pub fn clear(&mut self) -> Epoch {
        self.pending.clear();
        self.epoch = self.epoch.next();
        self.epoch
    }

    /// Returns `true` if `token` was issued in the current epoch and is
    /// still pending.
    #[must_use]
    pub fn is_pending(&self, token: &TimerToken<K>) -> bool {
        token.epoch == self.epoch && self.pending.iter().any(|t| t.id == token.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_sets_deadline_relative_to_now() {
        let mut q = TimerQueue::new();
        let t = q.schedule(100, 650, 1_u8);
        assert_eq!(t.deadline(), 750);
        assert_eq!(t.epoch(), q.epoch());
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_deadline(), Some(750));
    }

    #[test]
    fn deadline_saturates() {
        let mut q = TimerQueue::new();
        let t = q.schedule(u64::MAX - 1, 650, ());
        assert_eq!(t.deadline(), u64::MAX);
    }

    #[test]
    fn pop_due_returns_earliest_first() {
        let mut q = TimerQueue::new();
        q.schedule(0, 650, "done");
        q.schedule(0, 360, "stage");

        assert!(q.pop_due(359).is_none());
        assert_eq!(q.pop_due(1_000).map(TimerToken::into_key), Some("stage"));
        assert_eq!(q.pop_due(1_000).map(TimerToken::into_key), Some("done"));
        assert!(q.pop_due(1_000).is_none());
        assert!(q.is_empty());
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(0, 10, 'a');
        q.schedule(0, 10, 'b');
        q.schedule(0, 10, 'c');

        let order: [char; 3] = core::array::from_fn(|_| q.pop_due(10).unwrap().into_key());
        assert_eq!(order, ['a', 'b', 'c']);
    }

    #[test]
    fn take_accepts_pending_token_once() {
        let mut q = TimerQueue::new();
        let t = q.schedule(0, 10, ());
        assert!(q.is_pending(&t));
        assert!(q.take(&t));
        assert!(!q.take(&t));
        assert!(!q.is_pending(&t));
    }

    #[test]
    fn clear_advances_epoch_and_rejects_old_tokens() {
        let mut q = TimerQueue::new();
        let before = q.epoch();
        let t = q.schedule(0, 10, ());

        let after = q.clear();

        assert!(after > before);
        assert!(q.is_empty());
        assert!(!q.take(&t));
        assert!(q.pop_due(u64::MAX).is_none());
    }

    #[test]
    fn stale_token_with_reused_id_is_rejected() {
        // Ids keep counting across epochs, but even a forged token with a live id
        // is refused when its epoch is old.
        let mut q = TimerQueue::new();
        let old = q.schedule(0, 10, 7);
        q.clear();
        let fresh = q.schedule(0, 10, 7);
        assert_ne!(old.id(), fresh.id());

        let forged = TimerToken {
            id: fresh.id(),
            epoch: old.epoch(),
            deadline: fresh.deadline(),
            key: 7,
        };
        assert!(!q.take(&forged));
        assert!(q.take(&fresh));
    }

    #[test]
    fn cancel_removes_only_that_timer() {
        let mut q = TimerQueue::new();
        let a = q.schedule(0, 10, 'a');
        let _b = q.schedule(0, 20, 'b');

        assert!(q.cancel(&a));
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_deadline(), Some(20));
    }
}
