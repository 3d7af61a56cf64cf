// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect};

use crate::projection::{Pose, Slot};
use crate::state::PeelDirection;

/// One of the two invisible buttons covering the book.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HitTarget {
    /// Left half: turns back, peels the left page.
    PreviousPage,
    /// Right half: turns forward, peels the right page.
    NextPage,
}

impl HitTarget {
    /// Accessible label of the target.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::PreviousPage => "Previous page",
            Self::NextPage => "Next page",
        }
    }

    /// Peel direction started by pressing this target.
    #[must_use]
    pub fn peel_direction(self) -> PeelDirection {
        match self {
            Self::PreviousPage => PeelDirection::Prev,
            Self::NextPage => PeelDirection::Next,
        }
    }
}

impl fmt::Display for HitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A hit target and the area it covers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitRegion {
    /// Which target.
    pub target: HitTarget,
    /// Covered area, in the same space as the layout bounds.
    pub rect: Rect,
}

/// Geometry of the book area.
///
/// `bounds` is the area of the open spread. Slots have fixed sizes derived
/// from it, so what is shown in a slot never changes the geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BookLayout {
    bounds: Rect,
}

impl Default for BookLayout {
    fn default() -> Self {
        // Two 8.5 x 11 pages at 40 px per inch.
        Self::new(Rect::new(0.0, 0.0, 680.0, 440.0))
    }
}

impl BookLayout {
    /// Creates a layout for a spread occupying `bounds`.
    #[must_use]
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds: bounds.abs(),
        }
    }

    /// Area of the open spread.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Replaces the spread area, for instance after a resize.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds.abs();
    }

    fn left_half(&self) -> Rect {
        let b = self.bounds;
        Rect::new(b.x0, b.y0, b.center().x, b.y1)
    }

    fn right_half(&self) -> Rect {
        let b = self.bounds;
        Rect::new(b.center().x, b.y0, b.x1, b.y1)
    }

    /// Rectangle of `slot`.
    ///
    /// A closed book shows its cover centred in the spread area; while open
    /// the cover slot coincides with the right page, where the cover hinges.
    #[must_use]
    pub fn slot_rect(&self, slot: Slot, pose: Pose) -> Rect {
        match (slot, pose) {
            (Slot::Left, _) => self.left_half(),
            (Slot::Right, _) | (Slot::Cover, Pose::Open) => self.right_half(),
            (Slot::Cover, Pose::Closed) => {
                let half = self.bounds.width() / 4.0;
                let cx = self.bounds.center().x;
                Rect::new(cx - half, self.bounds.y0, cx + half, self.bounds.y1)
            }
        }
    }

    /// The two hit targets, each spanning half of the book area.
    #[must_use]
    pub fn hit_regions(&self) -> [HitRegion; 2] {
        [
            HitRegion {
                target: HitTarget::PreviousPage,
                rect: self.left_half(),
            },
            HitRegion {
                target: HitTarget::NextPage,
                rect: self.right_half(),
            },
        ]
    }

    /// Target under `pos`, if any. The centre line belongs to the next-page target.
    #[must_use]
    pub fn hit_test(&self, pos: Point) -> Option<HitTarget> {
        if !self.bounds.contains(pos) {
            return None;
        }
        Some(if pos.x < self.bounds.center().x {
            HitTarget::PreviousPage
        } else {
            HitTarget::NextPage
        })
    }

    /// Region of `target`.
    #[must_use]
    pub fn region(&self, target: HitTarget) -> HitRegion {
        let [prev, next] = self.hit_regions();
        match target {
            HitTarget::PreviousPage => prev,
            HitTarget::NextPage => next,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BookLayout {
        BookLayout::new(Rect::new(0.0, 0.0, 400.0, 300.0))
    }

    #[test]
    fn hit_regions_split_the_book_in_halves() {
        let [prev, next] = layout().hit_regions();
        assert_eq!(prev.rect, Rect::new(0.0, 0.0, 200.0, 300.0));
        assert_eq!(next.rect, Rect::new(200.0, 0.0, 400.0, 300.0));
        assert_eq!(prev.target.label(), "Previous page");
        assert_eq!(next.target.label(), "Next page");
    }

    #[test]
    fn hit_test_picks_half() {
        let l = layout();
        assert_eq!(l.hit_test(Point::new(10.0, 10.0)), Some(HitTarget::PreviousPage));
        assert_eq!(l.hit_test(Point::new(390.0, 10.0)), Some(HitTarget::NextPage));
        assert_eq!(l.hit_test(Point::new(200.0, 10.0)), Some(HitTarget::NextPage));
        assert_eq!(l.hit_test(Point::new(500.0, 10.0)), None);
    }

    #[test]
    fn slots_have_page_size_in_both_poses() {
        let l = layout();
        let cover = l.slot_rect(Slot::Cover, Pose::Closed);
        assert_eq!(cover, Rect::new(100.0, 0.0, 300.0, 300.0));
        assert_eq!(cover.size(), l.slot_rect(Slot::Left, Pose::Open).size());
        assert_eq!(l.slot_rect(Slot::Cover, Pose::Open), l.slot_rect(Slot::Right, Pose::Open));
    }
}
