// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Lifecycle phase of a book. Exactly one phase is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Resting on the front or back cover, see [`ViewState::is_showing_back_cover`].
    #[default]
    Closed,
    /// The front cover is sliding into place and then turning open.
    Opening(OpeningStage),
    /// Resting on a spread; the only phase that accepts page turns and peels.
    Open,
    /// The last spread is being turned over onto the back cover.
    Closing,
    /// The book is being turned over from the back cover to the front cover.
    Returning,
    /// The right page is turning towards the left.
    FlippingForward,
    /// The left page is turning towards the right.
    FlippingBackward,
    /// A page follows the pointer.
    Peeling,
    /// A committed peel settles into the turned spread.
    PeelCompleting,
}

impl Phase {
    /// Returns `true` while an animation is in flight.
    ///
    /// Page-turn requests are dropped in these phases.
    #[must_use]
    pub fn is_transitional(self) -> bool {
        !matches!(self, Self::Closed | Self::Open)
    }

    /// Returns `true` for the phases in which the spread is visible.
    #[must_use]
    pub fn shows_spread(self) -> bool {
        matches!(
            self,
            Self::Open
                | Self::Closing
                | Self::FlippingForward
                | Self::FlippingBackward
                | Self::Peeling
                | Self::PeelCompleting
        )
    }
}

/// Sub-stage of [`Phase::Opening`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpeningStage {
    /// The cover slides to its open position.
    #[default]
    Slide,
    /// The cover turns, revealing the first spread.
    Flip,
}

/// Direction of a peel gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PeelDirection {
    /// Dragging the right page leftwards, towards the next spread.
    Next,
    /// Dragging the left page rightwards, towards the previous spread.
    Prev,
}

/// How a released peel resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PeelOutcome {
    /// The turn completes and the spread changes once the peel settles.
    Commit,
    /// The page falls back and the book is at rest again at once.
    Cancel,
}

/// Mutable view state of one mounted book.
///
/// Only [`BookMachine`](crate::BookMachine) mutates it; everything else reads
/// it through the accessors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    phase: Phase,
    showing_back_cover: bool,
    left_index: usize,
    right_index: usize,
    peel_progress: f64,
    peel_direction: Option<PeelDirection>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            phase: Phase::Closed,
            showing_back_cover: false,
            left_index: 0,
            right_index: 1,
            peel_progress: 0.0,
            peel_direction: None,
        }
    }
}

impl ViewState {
    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a closed book rests on its back cover.
    ///
    /// Stays `true` while [`Phase::Returning`] turns the book back over.
    #[must_use]
    pub fn is_showing_back_cover(&self) -> bool {
        self.showing_back_cover
    }

    /// Index of the page on the left of the spread.
    #[must_use]
    pub fn left_index(&self) -> usize {
        self.left_index
    }

    /// Index of the page on the right of the spread.
    #[must_use]
    pub fn right_index(&self) -> usize {
        self.right_index
    }

    /// Peel progress in `[0, 1]`; zero outside the peel phases.
    #[must_use]
    pub fn peel_progress(&self) -> f64 {
        self.peel_progress
    }

    /// Direction of the active peel, if any.
    #[must_use]
    pub fn peel_direction(&self) -> Option<PeelDirection> {
        self.peel_direction
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn set_back_cover(&mut self, showing: bool) {
        self.showing_back_cover = showing;
    }

    pub(crate) fn reset_indices(&mut self) {
        self.left_index = 0;
        self.right_index = 1;
    }

    /// Moves to the next spread: the page behind the turned leaf lands on the left.
    pub(crate) fn step_forward(&mut self) {
        self.left_index = self.right_index + 1;
        self.right_index += 2;
    }

    pub(crate) fn step_backward(&mut self) {
        self.left_index = self.left_index.saturating_sub(2);
        self.right_index = self.right_index.saturating_sub(2).max(1);
    }

    pub(crate) fn start_peel(&mut self, direction: PeelDirection) {
        self.phase = Phase::Peeling;
        self.peel_direction = Some(direction);
        self.peel_progress = 0.0;
    }

    pub(crate) fn set_peel_progress(&mut self, progress: f64) {
        self.peel_progress = progress;
    }

    pub(crate) fn clear_peel(&mut self) {
        self.peel_progress = 0.0;
        self.peel_direction = None;
    }
}
