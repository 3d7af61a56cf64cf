// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=flipbook_book --heading-base-level=0

//! Flipbook Book: the core of a page-flip book viewer.
//!
//! A book is a front cover, an optional back cover and an ordered list of page
//! images, shown as two-page spreads. This crate turns user input and elapsed
//! time into the visual state of such a book, without rendering anything and
//! without owning a clock:
//!
//! - [`BookMachine`]: the lifecycle state machine. Closed, opening, open,
//!   flipping forwards and backwards, closing onto the back cover, returning to
//!   the front, and the peel phases. Input arriving during an animation is
//!   dropped.
//! - [`PeelController`]: drives a provisional turn from a pointer drag, commits
//!   or cancels it on release, and swallows the click that trails a gesture.
//! - [`project`]: maps the current [`ViewState`] to an ordered [`LayerStack`]
//!   of paintable surfaces: which image goes in which slot, which faces are
//!   turning and how.
//! - [`BookViewer`]: the mountable surface that wires the above together behind
//!   a single [`ViewerInput`] entry point, with [`BookLayout`] hit targets and
//!   the [`Indicator`] progress label.
//!
//! Images are opaque: `Book<I>` is generic over whatever the host uses to name
//! an image.
//!
//! ## Time
//!
//! Every input carries the host time in milliseconds. Transitions are timers
//! in a [`flipbook_timing::TimerQueue`]; hosts call [`BookViewer::tick`] when
//! [`BookViewer::next_deadline`] passes, or fire individual tokens with
//! [`BookViewer::fire`]. Loading a different book or unmounting the viewer
//! advances the timer epoch, so late timers from the previous book are
//! ignored.
//!
//! ## Minimal example
//!
//! ```rust
//! use flipbook_book::{Book, BookViewer, LayerRole, Phase, ViewerConfig, ViewerInput, Key};
//!
//! let book = Book::new("zine-7", Some("cover"), Some("back"), ["p1", "p2", "p3", "p4"]);
//! let mut viewer = BookViewer::new(book, ViewerConfig::default());
//!
//! // Closed on the front cover.
//! let layers = viewer.layers();
//! assert_eq!(layers[0].role, LayerRole::Cover);
//! drop(layers);
//!
//! // Open the book and let the animation finish.
//! viewer.handle(ViewerInput::Key(Key::ArrowRight), 0);
//! viewer.tick(650);
//! assert_eq!(viewer.state().phase(), Phase::Open);
//!
//! // Pages 1 and 2 are visible, page 4 waits underneath the right page.
//! let images: Vec<_> = viewer
//!     .layers()
//!     .iter()
//!     .filter_map(|layer| layer.content.image().copied())
//!     .collect();
//! assert_eq!(images, ["p1", "p4", "p2"]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): forwards to `kurbo/std`.
//! - `libm`: floating point support for `no_std` builds through `kurbo/libm`.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod book;
mod config;
mod indicator;
mod layout;
mod machine;
mod peel;
mod projection;
mod state;
mod viewer;

pub use book::{Book, Source};
pub use config::{FlipTimings, PeelTuning, ViewerConfig};
pub use indicator::Indicator;
pub use layout::{BookLayout, HitRegion, HitTarget};
pub use machine::{BookMachine, TickResult, Transition, TransitionTimer};
pub use peel::{PeelController, PeelRelease};
pub use projection::{
    AltText, Content, Hinge, Layer, LayerRole, LayerStack, Leaf, Motion, Pose, Slot, project,
};
pub use state::{OpeningStage, Phase, PeelDirection, PeelOutcome, ViewState};
pub use viewer::{BookViewer, Key, ViewerInput};

pub use flipbook_event_state::PointerId;
