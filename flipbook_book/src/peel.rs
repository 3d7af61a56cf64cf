// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use flipbook_event_state::PointerId;
use flipbook_event_state::click::ClickGate;
use flipbook_event_state::drag::DragState;
use kurbo::Point;
use log::debug;

use crate::config::PeelTuning;
use crate::machine::BookMachine;
use crate::state::{PeelDirection, PeelOutcome};

/// Result of releasing the pointer that drove a peel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PeelRelease {
    /// The turn completes once the peel settles.
    Committed,
    /// The page falls back into place.
    Cancelled,
    /// The pointer did not own a peel.
    Ignored,
}

/// Turns a pointer drag into a provisional page turn.
///
/// The controller captures the pointer that started the peel and ignores all
/// others. Progress is the horizontal drag distance relative to the width of
/// the element the drag started on: dragging the right page leftwards peels
/// towards the next spread, dragging the left page rightwards towards the
/// previous one.
///
/// Drags that travel far enough count as gestures and swallow the click the
/// platform synthesizes on release, see [`PeelController::suppress_click`].
#[derive(Clone, Debug)]
pub struct PeelController {
    tuning: PeelTuning,
    drag: DragState,
    direction: Option<PeelDirection>,
    width: f64,
    gate: ClickGate,
}

impl PeelController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(tuning: PeelTuning) -> Self {
        Self {
            tuning,
            drag: DragState::default(),
            direction: None,
            width: tuning.fallback_width,
            gate: ClickGate::default(),
        }
    }

    /// Gesture tuning in use.
    #[must_use]
    pub fn tuning(&self) -> PeelTuning {
        self.tuning
    }

    /// Returns `true` while a pointer drives a peel.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.drag.is_dragging()
    }

    /// The pointer driving the active peel.
    #[must_use]
    pub fn captured(&self) -> Option<PointerId> {
        self.drag.captured()
    }

    /// Starts a peel for `pointer`, pressed at `start` on an element
    /// `element_width` wide.
    ///
    /// Rejected while another peel is active or when `machine` does not
    /// accept a peel in `direction`.
    pub fn begin(
        &mut self,
        machine: &mut BookMachine,
        pointer: PointerId,
        direction: PeelDirection,
        start: Point,
        element_width: f64,
    ) -> bool {
        if self.drag.is_dragging() || !machine.begin_peel(direction) {
            return false;
        }
        self.width = if element_width.is_finite() && element_width > 0.0 {
            element_width
        } else {
            self.tuning.fallback_width
        };
        self.direction = Some(direction);
        self.drag.start(pointer, start);
        self.gate.reset();
        true
    }

    /// Follows a move of `pointer` to `pos`.
    ///
    /// Moves of pointers other than the captured one are ignored.
    pub fn update(&mut self, machine: &mut BookMachine, pointer: PointerId, pos: Point) -> bool {
        let (Some(offset), Some(direction)) =
            (self.drag.total_offset(pointer, pos), self.direction)
        else {
            return false;
        };
        self.drag.update(pointer, pos);
        let travel = match direction {
            PeelDirection::Next => -offset.x,
            PeelDirection::Prev => offset.x,
        };
        let progress = (travel / self.width).clamp(0.0, 1.0);
        if progress > self.tuning.click_suppress_threshold {
            self.gate.arm();
        }
        machine.update_peel(progress)
    }

    /// Releases `pointer` at `now`, committing or cancelling the turn.
    ///
    /// Pointer cancellation is handled the same way as a release.
    pub fn end(&mut self, machine: &mut BookMachine, pointer: PointerId, now: u64) -> PeelRelease {
        if !self.drag.end(pointer) {
            return PeelRelease::Ignored;
        }
        self.direction = None;
        self.gate.release(now, self.tuning.click_suppress_window_ms);
        let release = match machine.release_peel(now, self.tuning.commit_threshold) {
            Some(PeelOutcome::Commit) => PeelRelease::Committed,
            Some(PeelOutcome::Cancel) => PeelRelease::Cancelled,
            None => PeelRelease::Ignored,
        };
        debug!("peel released by {pointer:?}: {release:?}");
        release
    }

    /// Called for every click on a page target. Returns `true` if the click
    /// is the tail of a peel gesture and must be ignored.
    ///
    /// Each gesture swallows at most one click.
    pub fn suppress_click(&mut self, now: u64) -> bool {
        self.gate.suppress(now)
    }

    /// Forgets the active drag and any pending click suppression.
    pub fn reset(&mut self) {
        self.drag.reset();
        self.direction = None;
        self.gate.reset();
    }
}
