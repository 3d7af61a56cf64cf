// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use flipbook_timing::{TimerQueue, TimerToken};
use log::{debug, trace};

use crate::config::FlipTimings;
use crate::state::{OpeningStage, Phase, PeelDirection, PeelOutcome, ViewState};

/// What a pending timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The opening cover starts turning.
    OpeningStage,
    /// The book finished opening.
    OpeningDone,
    /// A forward turn landed.
    FlipForwardDone,
    /// A backward turn landed.
    FlipBackwardDone,
    /// The book finished closing onto the back cover.
    ClosingDone,
    /// The book finished turning back to the front cover.
    ReturningDone,
    /// A released peel came to rest.
    PeelSettled,
}

/// A scheduled [`Transition`].
pub type TransitionTimer = TimerToken<Transition>;

/// Whether a tick changed anything worth repainting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickResult {
    /// No timer was due.
    NoRender,
    /// At least one transition was applied.
    RenderRequested,
}

/// The book lifecycle state machine.
///
/// Owns the [`ViewState`] of one mounted book and the timers of its
/// in-flight animation. Inputs arriving while an animation is in flight are
/// dropped, not queued: the machine only accepts page turns in
/// [`Phase::Closed`] and [`Phase::Open`].
///
/// Time is supplied by the caller with every input, in milliseconds from any
/// monotonic origin. Due transitions are applied by [`BookMachine::tick`], or
/// one at a time by [`BookMachine::fire`] for hosts that run their own timers.
///
/// ```rust
/// use flipbook_book::{BookMachine, FlipTimings, Phase};
///
/// let mut machine = BookMachine::new(6, FlipTimings::default());
/// assert!(machine.advance(0));
/// // Rapid repeated input is absorbed while the book opens.
/// assert!(!machine.advance(10));
///
/// machine.tick(650);
/// assert_eq!(machine.phase(), Phase::Open);
/// assert_eq!((machine.state().left_index(), machine.state().right_index()), (0, 1));
/// ```
#[derive(Clone, Debug)]
pub struct BookMachine {
    state: ViewState,
    page_count: usize,
    timings: FlipTimings,
    timers: TimerQueue<Transition>,
}

impl BookMachine {
    /// Creates a machine for a book with `page_count` interior pages,
    /// resting closed on the front cover.
    #[must_use]
    pub fn new(page_count: usize, timings: FlipTimings) -> Self {
        Self {
            state: ViewState::default(),
            page_count,
            timings,
            timers: TimerQueue::new(),
        }
    }

    /// Current view state.
    #[must_use]
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Number of interior pages of the mounted book.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Transition durations in use.
    #[must_use]
    pub fn timings(&self) -> FlipTimings {
        self.timings
    }

    /// Returns `true` when the right page is on the last spread, so that the
    /// next forward turn closes the book instead of flipping.
    #[must_use]
    pub fn is_last_spread(&self) -> bool {
        self.state.right_index() + 2 >= self.page_count
    }

    /// Drops all pending timers and returns to the front cover for a book
    /// with `page_count` pages.
    ///
    /// Timers handed out before the reset are rejected by [`Self::fire`].
    pub fn reset(&mut self, page_count: usize) {
        let epoch = self.timers.clear();
        debug!("book reset: {page_count} pages, epoch {}", epoch.get());
        self.state = ViewState::default();
        self.page_count = page_count;
    }

    /// Turns towards the end of the book.
    ///
    /// Opens a closed book, turns the right page of an open book, closes the
    /// book from its last spread, and turns a book resting on its back cover
    /// over to the front. A book without pages stays closed. Returns `false`
    /// if the input was dropped.
    pub fn advance(&mut self, now: u64) -> bool {
        match self.state.phase() {
            Phase::Closed if self.state.is_showing_back_cover() => {
                self.enter(Phase::Returning);
                self.schedule(now, self.timings.page_turn_ms, Transition::ReturningDone);
            }
            Phase::Closed if self.page_count == 0 => {
                trace!("advance dropped: book has no pages");
                return false;
            }
            Phase::Closed => {
                self.state.reset_indices();
                self.state.set_back_cover(false);
                self.enter(Phase::Opening(OpeningStage::Slide));
                self.schedule(now, self.timings.opening_stage_ms, Transition::OpeningStage);
                self.schedule(now, self.timings.page_turn_ms, Transition::OpeningDone);
            }
            Phase::Open if self.is_last_spread() => {
                self.enter(Phase::Closing);
                self.schedule(now, self.timings.page_turn_ms, Transition::ClosingDone);
            }
            Phase::Open => {
                self.enter(Phase::FlippingForward);
                self.schedule(now, self.timings.page_turn_ms, Transition::FlipForwardDone);
            }
            phase => {
                trace!("advance dropped in {phase:?}");
                return false;
            }
        }
        true
    }

    /// Turns towards the front of the book.
    ///
    /// Closes onto the front cover from the first spread, without animation.
    /// A closed book ignores it. Returns `false` if the input was dropped.
    pub fn retreat(&mut self, now: u64) -> bool {
        match self.state.phase() {
            Phase::Open if self.state.left_index() == 0 => {
                self.rest_on_cover(false);
            }
            Phase::Open => {
                self.enter(Phase::FlippingBackward);
                self.schedule(now, self.timings.page_turn_ms, Transition::FlipBackwardDone);
            }
            phase => {
                trace!("retreat dropped in {phase:?}");
                return false;
            }
        }
        true
    }

    /// Starts a peel in `direction`.
    ///
    /// Only an open book at rest can be peeled, and only towards a page that
    /// exists on the left for [`PeelDirection::Prev`].
    pub fn begin_peel(&mut self, direction: PeelDirection) -> bool {
        let allowed = self.state.phase() == Phase::Open
            && (direction == PeelDirection::Next || self.state.left_index() > 0);
        if !allowed {
            trace!("peel {direction:?} rejected in {:?}", self.state.phase());
            return false;
        }
        self.state.start_peel(direction);
        debug!("peel {direction:?} started");
        true
    }

    /// Updates the progress of the active peel, clamped into `[0, 1]`.
    ///
    /// Ignored outside [`Phase::Peeling`].
    pub fn update_peel(&mut self, progress: f64) -> bool {
        if self.state.phase() != Phase::Peeling {
            return false;
        }
        let progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        self.state.set_peel_progress(progress);
        true
    }

    /// Releases the active peel.
    ///
    /// Progress strictly above `commit_threshold` commits the turn: progress
    /// jumps to `1` and the spread changes once the peel has settled for
    /// [`FlipTimings::peel_settle_ms`]. Anything else cancels: the book is
    /// [`Phase::Open`] on the same spread straight away, so a tap that
    /// started a peel still turns the page with the click that follows it.
    /// Returns `None` if no peel was active.
    pub fn release_peel(&mut self, now: u64, commit_threshold: f64) -> Option<PeelOutcome> {
        if self.state.phase() != Phase::Peeling {
            return None;
        }
        if self.state.peel_progress() > commit_threshold {
            self.state.set_peel_progress(1.0);
            self.enter(Phase::PeelCompleting);
            self.schedule(now, self.timings.peel_settle_ms, Transition::PeelSettled);
            Some(PeelOutcome::Commit)
        } else {
            self.state.clear_peel();
            self.enter(Phase::Open);
            Some(PeelOutcome::Cancel)
        }
    }

    /// Earliest pending transition deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Pending transition timers, for hosts that arm platform timers.
    pub fn pending_timers(&self) -> impl Iterator<Item = &TransitionTimer> {
        self.timers.iter()
    }

    /// Applies every transition due at `now`, in deadline order.
    pub fn tick(&mut self, now: u64) -> TickResult {
        let mut result = TickResult::NoRender;
        while let Some(timer) = self.timers.pop_due(now) {
            if self.apply(timer.into_key()) {
                result = TickResult::RenderRequested;
            }
        }
        result
    }

    /// Applies a single host-fired timer.
    ///
    /// Timers from before the last [`Self::reset`], or ones already applied,
    /// are ignored.
    pub fn fire(&mut self, timer: &TransitionTimer) -> bool {
        if !self.timers.take(timer) {
            trace!(
                "stale timer {:?} (epoch {}, current {})",
                timer.key(),
                timer.epoch().get(),
                self.timers.epoch().get()
            );
            return false;
        }
        self.apply(*timer.key())
    }

    fn apply(&mut self, transition: Transition) -> bool {
        match (transition, self.state.phase()) {
            (Transition::OpeningStage, Phase::Opening(OpeningStage::Slide)) => {
                self.enter(Phase::Opening(OpeningStage::Flip));
            }
            (Transition::OpeningDone, Phase::Opening(_)) => {
                self.state.set_back_cover(false);
                self.enter(Phase::Open);
            }
            (Transition::FlipForwardDone, Phase::FlippingForward) => {
                debug_assert!(!self.is_last_spread(), "last spread closes instead");
                self.state.step_forward();
                self.enter(Phase::Open);
            }
            (Transition::FlipBackwardDone, Phase::FlippingBackward) => {
                self.state.step_backward();
                self.enter(Phase::Open);
            }
            (Transition::ClosingDone, Phase::Closing) => {
                self.rest_on_cover(true);
            }
            (Transition::ReturningDone, Phase::Returning) => {
                self.state.set_back_cover(false);
                self.enter(Phase::Closed);
            }
            (Transition::PeelSettled, Phase::PeelCompleting) => {
                self.settle_peel();
            }
            (transition, phase) => {
                trace!("timer {transition:?} does not apply in {phase:?}");
                return false;
            }
        }
        true
    }

    fn settle_peel(&mut self) {
        let direction = self.state.peel_direction();
        self.state.clear_peel();
        match direction {
            Some(PeelDirection::Next) if self.is_last_spread() => {
                self.rest_on_cover(true);
            }
            Some(PeelDirection::Next) => {
                self.state.step_forward();
                self.enter(Phase::Open);
            }
            Some(PeelDirection::Prev) => {
                debug_assert!(self.state.left_index() > 0, "no previous spread to peel to");
                self.state.step_backward();
                self.enter(Phase::Open);
            }
            None => self.enter(Phase::Open),
        }
    }

    fn rest_on_cover(&mut self, back: bool) {
        self.state.reset_indices();
        self.state.set_back_cover(back);
        self.enter(Phase::Closed);
    }

    fn enter(&mut self, phase: Phase) {
        let from = self.state.phase();
        self.state.set_phase(phase);
        debug!(
            "book {from:?} -> {phase:?} (pages {}/{}, back cover {})",
            self.state.left_index(),
            self.state.right_index(),
            self.state.is_showing_back_cover()
        );
    }

    fn schedule(&mut self, now: u64, delay: u64, transition: Transition) {
        let timer = self.timers.schedule(now, delay, transition);
        trace!("scheduled {transition:?} at {}", timer.deadline());
    }
}
