// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render projection: which surfaces are visible for a given view state.
//!
//! [`project`] is a pure function of the book, the view state and the timing
//! configuration. It returns the layers to paint, bottom to top, each with its
//! image (or a placeholder), slot, z-order and, for turning leaves, a
//! declarative rotation.
//!
//! A turning leaf is emitted as two layers sharing one [`Leaf`] transform: the
//! front face, visible until the leaf passes 90°, and the back face, which
//! already carries the content that will be visible once the turn is over.
//! The destination content is therefore part of the layer stack from the first
//! frame of the turn.
//!
//! Missing images never remove a layer: the layer stays in its slot with
//! [`Content::Placeholder`], so neighbouring pages keep their geometry.

use core::fmt;

use smallvec::SmallVec;

use crate::book::{Book, Source};
use crate::config::FlipTimings;
use crate::state::{OpeningStage, Phase, PeelDirection, ViewState};

/// What a layer represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// Front cover of a closed book.
    Cover,
    /// Back cover of a closed book.
    BackCover,
    /// Page resting on the left.
    LeftPage,
    /// Page revealed on the left as a leaf turns away from it.
    LeftPageUnder,
    /// Page resting on the right.
    RightPage,
    /// Page revealed on the right as a leaf turns away from it.
    RightPageUnder,
    /// Face of the turning leaf visible before it passes 90°.
    TurningFaceFront,
    /// Face of the turning leaf visible after it passes 90°.
    TurningFaceBack,
}

/// Fixed position a layer occupies in the book area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The single page-sized area of a closed book.
    Cover,
    /// Left half of an open book.
    Left,
    /// Right half of an open book.
    Right,
}

/// Whether the book is laid out as a single cover or as a spread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pose {
    /// One cover-sized slot.
    Closed,
    /// Two page-sized slots side by side.
    Open,
}

impl Pose {
    /// Layout pose for a phase. The book is open while it opens.
    #[must_use]
    pub fn for_phase(phase: Phase) -> Self {
        if matches!(phase, Phase::Opening(_)) || phase.shows_spread() {
            Self::Open
        } else {
            Self::Closed
        }
    }
}

/// Image shown by a layer.
#[derive(Debug, PartialEq, Eq)]
pub enum Content<'a, I> {
    /// The referenced image.
    Image(&'a I),
    /// Nothing to show: a blank block of the slot's size.
    Placeholder,
}

impl<I> Clone for Content<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Content<'_, I> {}

impl<'a, I> Content<'a, I> {
    /// The image, if any.
    #[must_use]
    pub fn image(self) -> Option<&'a I> {
        match self {
            Self::Image(image) => Some(image),
            Self::Placeholder => None,
        }
    }

    /// Returns `true` for [`Content::Placeholder`].
    #[must_use]
    pub fn is_placeholder(self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// Edge a leaf rotates around.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hinge {
    /// The left edge of the slot, the spine for right-hand leaves.
    Left,
    /// The right edge of the slot, the spine for left-hand leaves.
    Right,
    /// The vertical centre line, for turning the whole closed book over.
    Center,
}

/// How a leaf reaches its angle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Jump to the angle; used while the leaf follows the pointer.
    Still,
    /// Animate from `from_deg` to the angle.
    Sweep {
        /// Starting angle in degrees.
        from_deg: f64,
        /// Animation length.
        duration_ms: u64,
    },
    /// Ease from whatever angle is on screen to the angle.
    Settle {
        /// Animation length.
        duration_ms: u64,
    },
}

/// Rotation of a turning leaf around the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leaf {
    /// Rotation axis.
    pub hinge: Hinge,
    /// Target angle in degrees. Negative turns right-to-left.
    pub angle_deg: f64,
    /// How the angle is reached.
    pub motion: Motion,
}

/// Accessible description of a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AltText {
    /// "Front cover".
    FrontCover,
    /// "Back cover".
    BackCover,
    /// "Page n", one-based.
    Page(usize),
}

impl fmt::Display for AltText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrontCover => f.write_str("Front cover"),
            Self::BackCover => f.write_str("Back cover"),
            Self::Page(index) => write!(f, "Page {}", index + 1),
        }
    }
}

/// One paintable surface.
#[derive(Debug, PartialEq)]
pub struct Layer<'a, I> {
    /// What the layer represents.
    pub role: LayerRole,
    /// Where it is painted.
    pub slot: Slot,
    /// Where its image comes from.
    pub source: Source,
    /// The image or a placeholder.
    pub content: Content<'a, I>,
    /// Stacking order; higher is nearer the viewer.
    pub z: u8,
    /// Rotation for turning faces.
    pub leaf: Option<Leaf>,
    /// The host reported that the image failed to load.
    pub error: bool,
}

impl<I> Clone for Layer<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Layer<'_, I> {}

impl<I> Layer<'_, I> {
    /// Accessible text, or `None` for decorative faces hidden from
    /// assistive technology.
    #[must_use]
    pub fn alt(&self) -> Option<AltText> {
        if self.leaf.is_some() {
            return None;
        }
        Some(match self.source {
            Source::FrontCover => AltText::FrontCover,
            Source::BackCover => AltText::BackCover,
            Source::Page(index) => AltText::Page(index),
        })
    }
}

/// Layers of one frame, bottom to top.
pub type LayerStack<'a, I> = SmallVec<[Layer<'a, I>; 6]>;

const Z_UNDER: u8 = 0;
const Z_PAGE: u8 = 1;
const Z_LEAF: u8 = 2;

/// Computes the visible layers for `state`.
#[must_use]
pub fn project<'a, I>(book: &'a Book<I>, state: &ViewState, timings: &FlipTimings) -> LayerStack<'a, I> {
    let mut out = Projector {
        book,
        layers: LayerStack::new(),
    };
    let left = state.left_index();
    let right = state.right_index();
    let phase = state.phase();
    let turn = timings.page_turn_ms;

    match phase {
        Phase::Closed => {
            if state.is_showing_back_cover() {
                out.flat(LayerRole::BackCover, Slot::Cover, Source::BackCover);
            } else {
                out.flat(LayerRole::Cover, Slot::Cover, Source::FrontCover);
            }
        }
        Phase::Returning => {
            let leaf = Leaf {
                hinge: Hinge::Center,
                angle_deg: 180.0,
                motion: Motion::Sweep {
                    from_deg: 0.0,
                    duration_ms: turn,
                },
            };
            out.leaf(Slot::Cover, leaf, Source::BackCover, Source::FrontCover);
        }
        Phase::Opening(stage) => {
            let motion = match stage {
                OpeningStage::Slide => Motion::Still,
                OpeningStage::Flip => {
                    out.under(LayerRole::RightPageUnder, Slot::Right, Source::Page(right));
                    Motion::Sweep {
                        from_deg: 0.0,
                        duration_ms: turn.saturating_sub(timings.opening_stage_ms),
                    }
                }
            };
            let angle_deg = if stage == OpeningStage::Flip { -180.0 } else { 0.0 };
            let leaf = Leaf {
                hinge: Hinge::Left,
                angle_deg,
                motion,
            };
            out.leaf(Slot::Right, leaf, Source::FrontCover, Source::Page(left));
        }
        _ => out.spread(state, timings),
    }
    out.layers
}

struct Projector<'a, I> {
    book: &'a Book<I>,
    layers: LayerStack<'a, I>,
}

impl<I> Projector<'_, I> {
    fn push(&mut self, role: LayerRole, slot: Slot, source: Source, z: u8, leaf: Option<Leaf>) {
        let content = match self.book.resolve(source) {
            Some(image) => Content::Image(image),
            None => Content::Placeholder,
        };
        self.layers.push(Layer {
            role,
            slot,
            source,
            content,
            z,
            leaf,
            error: false,
        });
    }

    fn flat(&mut self, role: LayerRole, slot: Slot, source: Source) {
        self.push(role, slot, source, Z_PAGE, None);
    }

    fn under(&mut self, role: LayerRole, slot: Slot, source: Source) {
        self.push(role, slot, source, Z_UNDER, None);
    }

    fn leaf(&mut self, slot: Slot, leaf: Leaf, front: Source, back: Source) {
        self.push(LayerRole::TurningFaceFront, slot, front, Z_LEAF, Some(leaf));
        self.push(LayerRole::TurningFaceBack, slot, back, Z_LEAF, Some(leaf));
    }

    /// Layers of an open book: resting pages, pages revealed under a turn, and
    /// the turning leaf itself.
    fn spread(&mut self, state: &ViewState, timings: &FlipTimings) {
        let left = state.left_index();
        let right = state.right_index();
        let phase = state.phase();
        let prev_left = left.saturating_sub(2);
        let prev_right = left.saturating_sub(1);
        let closes = right + 2 >= self.book.page_count();
        let turn = Motion::Sweep {
            from_deg: 0.0,
            duration_ms: timings.page_turn_ms,
        };

        let peel = match phase {
            Phase::Peeling | Phase::PeelCompleting => state.peel_direction(),
            _ => None,
        };
        let peel_leaf = |hinge, sign: f64| Leaf {
            hinge,
            angle_deg: sign * state.peel_progress() * 180.0,
            motion: if phase == Phase::Peeling {
                Motion::Still
            } else {
                Motion::Settle {
                    duration_ms: timings.peel_settle_ms,
                }
            },
        };

        // Left half.
        if peel == Some(PeelDirection::Prev) {
            self.under(LayerRole::LeftPageUnder, Slot::Left, Source::Page(prev_left));
            self.leaf(
                Slot::Left,
                peel_leaf(Hinge::Right, 1.0),
                Source::Page(left),
                Source::Page(prev_right),
            );
        } else if phase == Phase::FlippingBackward {
            self.under(LayerRole::LeftPageUnder, Slot::Left, Source::Page(prev_left));
        } else {
            self.flat(LayerRole::LeftPage, Slot::Left, Source::Page(left));
        }

        // The next spread's right page sits under the right leaf, ready
        // before any forward turn starts.
        if phase != Phase::FlippingBackward {
            self.under(LayerRole::RightPageUnder, Slot::Right, Source::Page(right + 2));
        }

        // Right half. A forward turn from the last spread lands on the back cover.
        let forward_back = if closes {
            Source::BackCover
        } else {
            Source::Page(right + 1)
        };
        match phase {
            _ if peel == Some(PeelDirection::Next) => {
                self.leaf(
                    Slot::Right,
                    peel_leaf(Hinge::Left, -1.0),
                    Source::Page(right),
                    forward_back,
                );
            }
            Phase::FlippingBackward => {
                let leaf = Leaf {
                    hinge: Hinge::Right,
                    angle_deg: 180.0,
                    motion: turn,
                };
                self.leaf(Slot::Left, leaf, Source::Page(left), Source::Page(prev_right));
                self.flat(LayerRole::RightPage, Slot::Right, Source::Page(right));
            }
            Phase::FlippingForward | Phase::Closing => {
                let leaf = Leaf {
                    hinge: Hinge::Left,
                    angle_deg: -180.0,
                    motion: turn,
                };
                self.leaf(Slot::Right, leaf, Source::Page(right), forward_back);
            }
            _ => self.flat(LayerRole::RightPage, Slot::Right, Source::Page(right)),
        }
    }
}
