// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click suppression after a drag gesture.
//!
//! A pointer that goes down on a button, drags and comes back up over the
//! same button produces a synthetic click on most platforms. When the drag
//! itself already did something (turned a page, moved a slider), that click
//! must not trigger the button's tap action as well.
//!
//! [`ClickGate`] has three states:
//!
//! - idle: clicks pass through,
//! - armed: a drag crossed the gesture threshold and is still in progress,
//! - released: the drag ended at some time `t`; the next click arriving within
//!   the suppression window is swallowed, then the gate returns to idle.
//!
//! A gate that was armed but never saw its click (the pointer left the target
//! before release, say) expires once the window passes, so a much later tap is
//! not lost.

/// Swallows exactly one click following a drag gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickGate {
    state: GateState,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum GateState {
    #[default]
    Idle,
    Armed,
    Released {
        expires_at: u64,
    },
}

impl ClickGate {
    /// Marks the current drag as a gesture whose click must be swallowed.
    ///
    /// Arming an already released gate re-arms it without a deadline.
    pub fn arm(&mut self) {
        self.state = GateState::Armed;
    }

    /// The drag ended at `now`; a pending suppression stays valid for
    /// `window` milliseconds.
    ///
    /// Has no effect unless the gate is armed.
    pub fn release(&mut self, now: u64, window: u64) {
        if self.state == GateState::Armed {
            self.state = GateState::Released {
                expires_at: now.saturating_add(window),
            };
        }
    }

    /// Called for every click. Returns `true` if this click must be ignored.
    ///
    /// A suppression is consumed by the first click that observes it.
    pub fn suppress(&mut self, now: u64) -> bool {
        match self.state {
            GateState::Idle => false,
            GateState::Armed => {
                self.state = GateState::Idle;
                true
            }
            GateState::Released { expires_at } => {
                self.state = GateState::Idle;
                now <= expires_at
            }
        }
    }

    /// Returns `true` if a click arriving at `now` would be swallowed.
    #[must_use]
    pub fn is_pending(&self, now: u64) -> bool {
        match self.state {
            GateState::Idle => false,
            GateState::Armed => true,
            GateState::Released { expires_at } => now <= expires_at,
        }
    }

    /// Forgets any pending suppression.
    pub fn reset(&mut self) {
        self.state = GateState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_gate_lets_clicks_through() {
        let mut gate = ClickGate::default();
        assert!(!gate.is_pending(0));
        assert!(!gate.suppress(0));
    }

    #[test]
    fn release_without_arm_does_nothing() {
        let mut gate = ClickGate::default();
        gate.release(100, 200);
        assert!(!gate.suppress(110));
    }

    #[test]
    fn released_gate_swallows_one_click_in_window() {
        let mut gate = ClickGate::default();
        gate.arm();
        gate.release(1_000, 200);

        assert!(gate.is_pending(1_200));
        assert!(gate.suppress(1_200));
        assert!(!gate.suppress(1_201));
    }

    #[test]
    fn expired_gate_does_not_swallow() {
        let mut gate = ClickGate::default();
        gate.arm();
        gate.release(1_000, 200);

        assert!(!gate.is_pending(1_201));
        assert!(!gate.suppress(1_500));
        // The expired suppression is gone for good.
        assert!(!gate.suppress(1_000));
    }

    #[test]
    fn click_during_drag_is_swallowed() {
        let mut gate = ClickGate::default();
        gate.arm();
        assert!(gate.suppress(5));
        assert!(!gate.suppress(6));
    }

    #[test]
    fn reset_forgets_pending_suppression() {
        let mut gate = ClickGate::default();
        gate.arm();
        gate.release(0, 200);
        gate.reset();
        assert!(!gate.suppress(10));
    }
}
