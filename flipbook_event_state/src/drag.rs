// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper: follow one captured pointer and compute offsets.
//!
//! ## Usage
//!
//! 1) Start a drag with [`DragState::start`], passing the pointer that went down.
//! 2) On each move, call [`DragState::update`]; moves from other pointers return `None`.
//! 3) Use [`DragState::total_offset`] for the offset from the drag origin.
//! 4) End the drag with [`DragState::end`]; only the captured pointer can end it.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use flipbook_event_state::PointerId;
//! use flipbook_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! let p = PointerId(7);
//!
//! drag.start(p, Point::new(10.0, 20.0));
//! assert_eq!(drag.captured(), Some(p));
//!
//! let delta = drag.update(p, Point::new(15.0, 25.0)).unwrap();
//! assert_eq!(delta.x, 5.0);
//!
//! assert!(drag.end(p));
//! assert!(!drag.is_dragging());
//! ```

use kurbo::{Point, Vec2};

use crate::PointerId;

/// Tracks a drag driven by a single captured pointer.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    pointer: Option<PointerId>,
    start_pos: Option<Point>,
    last_pos: Option<Point>,
}

impl DragState {
    /// Start a drag for `pointer` at `pos`, replacing any drag in progress.
    pub fn start(&mut self, pointer: PointerId, pos: Point) {
        self.pointer = Some(pointer);
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Record a move of `pointer`, returning the delta since the previous move.
    ///
    /// Returns `None` when no drag is active or `pointer` is not the captured one.
    pub fn update(&mut self, pointer: PointerId, pos: Point) -> Option<Vec2> {
        if !self.owns(pointer) {
            return None;
        }
        let last = self.last_pos.replace(pos)?;
        Some(pos - last)
    }

    /// Offset of `pos` from the drag origin, if `pointer` owns the drag.
    #[must_use]
    pub fn total_offset(&self, pointer: PointerId, pos: Point) -> Option<Vec2> {
        if !self.owns(pointer) {
            return None;
        }
        self.start_pos.map(|start| pos - start)
    }

    /// Where the drag started.
    #[must_use]
    pub fn start_pos(&self) -> Option<Point> {
        self.start_pos
    }

    /// Last position seen for the captured pointer.
    #[must_use]
    pub fn last_pos(&self) -> Option<Point> {
        self.last_pos
    }

    /// End the drag if `pointer` owns it. Returns `true` if a drag was ended.
    pub fn end(&mut self, pointer: PointerId) -> bool {
        if !self.owns(pointer) {
            return false;
        }
        *self = Self::default();
        true
    }

    /// Drop the drag regardless of which pointer owns it.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The pointer currently captured by the drag.
    #[must_use]
    pub fn captured(&self) -> Option<PointerId> {
        self.pointer
    }

    /// Returns `true` while a drag operation is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.pointer.is_some()
    }

    fn owns(&self, pointer: PointerId) -> bool {
        self.pointer == Some(pointer)
    }
}
