// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Durations of the timed transitions, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlipTimings {
    /// Delay before the opening cover switches from sliding to flipping.
    pub opening_stage_ms: u64,
    /// Length of a full turn: opening, flipping, closing and returning.
    pub page_turn_ms: u64,
    /// Time a committed peel takes to settle into the turned spread.
    pub peel_settle_ms: u64,
}

impl Default for FlipTimings {
    fn default() -> Self {
        Self {
            opening_stage_ms: 360,
            page_turn_ms: 650,
            peel_settle_ms: 360,
        }
    }
}

/// Tuning of the drag-to-turn gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeelTuning {
    /// Progress strictly above which a released peel completes the turn.
    pub commit_threshold: f64,
    /// Progress strictly above which the drag swallows the following click.
    pub click_suppress_threshold: f64,
    /// How long after release a swallowed click may still arrive.
    pub click_suppress_window_ms: u64,
    /// Element width used when the host reports a zero or invalid width.
    pub fallback_width: f64,
}

impl Default for PeelTuning {
    fn default() -> Self {
        Self {
            commit_threshold: 0.35,
            click_suppress_threshold: 0.02,
            click_suppress_window_ms: 200,
            fallback_width: 200.0,
        }
    }
}

/// Complete viewer configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewerConfig {
    /// Transition durations.
    pub timings: FlipTimings,
    /// Gesture tuning.
    pub peel: PeelTuning,
}
