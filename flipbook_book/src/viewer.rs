// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::hash::Hash;

use flipbook_event_state::PointerId;
use hashbrown::HashSet;
use kurbo::Point;
use log::{debug, trace};

use crate::book::Book;
use crate::config::ViewerConfig;
use crate::indicator::Indicator;
use crate::layout::{BookLayout, HitTarget};
use crate::machine::{BookMachine, TickResult, TransitionTimer};
use crate::peel::{PeelController, PeelRelease};
use crate::projection::{LayerStack, project};
use crate::state::ViewState;

/// Keys the viewer reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Turns back.
    ArrowLeft,
    /// Turns forward.
    ArrowRight,
    /// Any other key; ignored.
    Other,
}

/// Input delivered by the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewerInput {
    /// A key was pressed while the viewer is mounted.
    Key(Key),
    /// A pointer was pressed at `pos`, in layout coordinates.
    PointerDown {
        /// Which pointer.
        pointer: PointerId,
        /// Where.
        pos: Point,
    },
    /// A pointer moved to `pos`.
    PointerMove {
        /// Which pointer.
        pointer: PointerId,
        /// Where.
        pos: Point,
    },
    /// A pointer was released.
    PointerUp {
        /// Which pointer.
        pointer: PointerId,
    },
    /// The platform took the pointer away.
    PointerCancel {
        /// Which pointer.
        pointer: PointerId,
    },
    /// A hit target was activated, by a click or by assistive technology.
    Click {
        /// The activated target.
        target: HitTarget,
    },
}

/// A mounted page-flip viewer for one book.
///
/// Wraps a [`BookMachine`] and a [`PeelController`] behind a single input
/// entry point, and renders through [`project`]. Timers are owned by the
/// viewer; hosts either call [`BookViewer::tick`] when
/// [`BookViewer::next_deadline`] passes or fire the tokens from
/// [`BookViewer::pending_timers`] themselves.
///
/// ```rust
/// use flipbook_book::{Book, BookViewer, Key, ViewerConfig, ViewerInput};
///
/// let book = Book::new("issue-1", Some("cover.png"), None, ["p1.png", "p2.png"]);
/// let mut viewer = BookViewer::new(book, ViewerConfig::default());
///
/// viewer.handle(ViewerInput::Key(Key::ArrowRight), 0);
/// viewer.tick(viewer.next_deadline().unwrap());
/// viewer.tick(viewer.next_deadline().unwrap());
/// assert_eq!(viewer.indicator().unwrap().to_string(), "Page 1/1");
/// ```
#[derive(Debug)]
pub struct BookViewer<I> {
    book: Book<I>,
    config: ViewerConfig,
    machine: BookMachine,
    peel: PeelController,
    layout: BookLayout,
    failed: HashSet<I>,
}

impl<I: Clone + Eq + Hash> BookViewer<I> {
    /// Mounts `book`, closed on its front cover.
    #[must_use]
    pub fn new(book: Book<I>, config: ViewerConfig) -> Self {
        Self {
            machine: BookMachine::new(book.page_count(), config.timings),
            peel: PeelController::new(config.peel),
            layout: BookLayout::default(),
            failed: HashSet::new(),
            book,
            config,
        }
    }

    /// The mounted book.
    #[must_use]
    pub fn book(&self) -> &Book<I> {
        &self.book
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> ViewerConfig {
        self.config
    }

    /// Current view state.
    #[must_use]
    pub fn state(&self) -> &ViewState {
        self.machine.state()
    }

    /// Book geometry.
    #[must_use]
    pub fn layout(&self) -> &BookLayout {
        &self.layout
    }

    /// Replaces the book geometry, for instance after a resize.
    pub fn set_layout(&mut self, layout: BookLayout) {
        self.layout = layout;
    }

    /// Loads `book`.
    ///
    /// A book with the mounted id is ignored. Any other book replaces the
    /// mounted one and resets the viewer to its front cover, cancelling all
    /// pending timers. Returns `true` if the book was replaced.
    pub fn load(&mut self, book: Book<I>) -> bool {
        if book.id() == self.book.id() {
            trace!("book {} already mounted", book.id());
            return false;
        }
        debug!("mounting book {} ({} pages)", book.id(), book.page_count());
        self.book = book;
        self.reset();
        true
    }

    /// Cancels every pending timer and forgets the gesture in progress.
    ///
    /// Tokens handed out before stay stale forever.
    pub fn unmount(&mut self) {
        debug!("unmounting book {}", self.book.id());
        self.reset();
    }

    fn reset(&mut self) {
        self.machine.reset(self.book.page_count());
        self.peel.reset();
        self.failed.clear();
    }

    /// Applies one input at host time `now`. Returns `true` if the state
    /// changed.
    pub fn handle(&mut self, input: ViewerInput, now: u64) -> bool {
        let handled = match input {
            ViewerInput::Key(Key::ArrowRight) => self.machine.advance(now),
            ViewerInput::Key(Key::ArrowLeft) => self.machine.retreat(now),
            ViewerInput::Key(Key::Other) => false,
            ViewerInput::PointerDown { pointer, pos } => {
                let Some(target) = self.layout.hit_test(pos) else {
                    return false;
                };
                let width = self.layout.region(target).rect.width();
                self.peel
                    .begin(&mut self.machine, pointer, target.peel_direction(), pos, width)
            }
            ViewerInput::PointerMove { pointer, pos } => {
                self.peel.update(&mut self.machine, pointer, pos)
            }
            ViewerInput::PointerUp { pointer } | ViewerInput::PointerCancel { pointer } => {
                self.peel.end(&mut self.machine, pointer, now) != PeelRelease::Ignored
            }
            ViewerInput::Click { target } => {
                if self.peel.suppress_click(now) {
                    trace!("click on {target} swallowed by peel gesture");
                    return false;
                }
                match target {
                    HitTarget::PreviousPage => self.machine.retreat(now),
                    HitTarget::NextPage => self.machine.advance(now),
                }
            }
        };
        if !handled {
            trace!("dropped {input:?} in {:?}", self.machine.phase());
        }
        handled
    }

    /// Applies every transition due at `now`.
    pub fn tick(&mut self, now: u64) -> TickResult {
        self.machine.tick(now)
    }

    /// Applies a host-fired timer. Stale tokens are ignored.
    pub fn fire(&mut self, timer: &TransitionTimer) -> bool {
        self.machine.fire(timer)
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.machine.next_deadline()
    }

    /// Pending timers, for hosts that schedule their own callbacks.
    pub fn pending_timers(&self) -> impl Iterator<Item = &TransitionTimer> {
        self.machine.pending_timers()
    }

    /// Records that `image` failed to load.
    ///
    /// Layers showing it are flagged with [`Layer::error`](crate::Layer::error)
    /// until another book is loaded or the viewer is unmounted.
    pub fn report_image_error(&mut self, image: &I) {
        if self.failed.insert(image.clone()) {
            debug!("image failed to load in book {}", self.book.id());
        }
    }

    /// Layers of the current frame, bottom to top.
    #[must_use]
    pub fn layers(&self) -> LayerStack<'_, I> {
        let mut layers = project(&self.book, self.machine.state(), &self.config.timings);
        for layer in &mut layers {
            if let Some(image) = layer.content.image()
                && self.failed.contains(image)
            {
                layer.error = true;
            }
        }
        layers
    }

    /// Progress label, or `None` for a book without pages.
    #[must_use]
    pub fn indicator(&self) -> Option<Indicator> {
        Indicator::for_state(self.machine.state(), self.book.page_count())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::projection::LayerRole;
    use crate::state::Phase;

    const FINGER: PointerId = PointerId(7);

    fn viewer(pages: usize) -> BookViewer<u32> {
        let book = Book::new("a", Some(100), Some(200), 0..pages as u32);
        BookViewer::new(book, ViewerConfig::default())
    }

    fn open(v: &mut BookViewer<u32>) {
        v.handle(ViewerInput::Key(Key::ArrowRight), 0);
        v.tick(650);
        assert_eq!(v.state().phase(), Phase::Open);
    }

    #[test]
    fn keys_turn_pages() {
        let mut v = viewer(6);
        open(&mut v);
        assert!(v.handle(ViewerInput::Key(Key::ArrowRight), 1_000));
        assert!(!v.handle(ViewerInput::Key(Key::ArrowRight), 1_010));
        v.tick(1_650);
        assert_eq!(v.state().left_index(), 2);
        assert!(v.handle(ViewerInput::Key(Key::ArrowLeft), 2_000));
        v.tick(2_650);
        assert_eq!(v.state().left_index(), 0);
        assert!(!v.handle(ViewerInput::Key(Key::Other), 3_000));
    }

    #[test]
    fn click_targets_turn_pages() {
        let mut v = viewer(6);
        assert!(v.handle(
            ViewerInput::Click {
                target: HitTarget::NextPage
            },
            0
        ));
        v.tick(650);
        assert!(v.handle(
            ViewerInput::Click {
                target: HitTarget::PreviousPage
            },
            700
        ));
        // Retreating from the first spread rests on the front cover at once.
        assert_eq!(v.state().phase(), Phase::Closed);
        assert!(!v.state().is_showing_back_cover());
    }

    #[test]
    fn drag_on_right_half_peels_and_swallows_click() {
        let mut v = viewer(6);
        open(&mut v);
        let half = v.layout().bounds().width() / 2.0;
        let start = Point::new(v.layout().bounds().x1 - 10.0, 100.0);

        assert!(v.handle(ViewerInput::PointerDown { pointer: FINGER, pos: start }, 1_000));
        assert_eq!(v.state().phase(), Phase::Peeling);
        let pos = Point::new(start.x - half * 0.5, 100.0);
        v.handle(ViewerInput::PointerMove { pointer: FINGER, pos }, 1_050);
        assert_eq!(v.state().peel_progress(), 0.5);

        assert!(v.handle(ViewerInput::PointerUp { pointer: FINGER }, 1_100));
        assert!(!v.handle(
            ViewerInput::Click {
                target: HitTarget::NextPage
            },
            1_101
        ));
        v.tick(1_460);
        assert_eq!(v.state().phase(), Phase::Open);
        assert_eq!(v.state().left_index(), 2);
    }

    /// Presses and releases `FINGER` at `pos` without moving, then delivers
    /// the click the platform synthesizes. Returns whether the click was
    /// accepted.
    fn tap(v: &mut BookViewer<u32>, pos: Point, target: HitTarget, now: u64) -> bool {
        v.handle(ViewerInput::PointerDown { pointer: FINGER, pos }, now);
        v.handle(ViewerInput::PointerUp { pointer: FINGER }, now + 80);
        v.handle(ViewerInput::Click { target }, now + 81)
    }

    #[test]
    fn taps_on_an_open_book_turn_pages() {
        let mut v = viewer(6);
        open(&mut v);
        let bounds = v.layout().bounds();
        let right = Point::new(bounds.x1 - 10.0, bounds.center().y);
        let left = Point::new(bounds.x0 + 10.0, bounds.center().y);

        assert!(tap(&mut v, right, HitTarget::NextPage, 1_000));
        assert_eq!(v.state().phase(), Phase::FlippingForward);
        v.tick(1_081 + 650);
        assert_eq!((v.state().left_index(), v.state().right_index()), (2, 3));

        assert!(tap(&mut v, left, HitTarget::PreviousPage, 3_000));
        assert_eq!(v.state().phase(), Phase::FlippingBackward);
        v.tick(3_081 + 650);
        assert_eq!((v.state().left_index(), v.state().right_index()), (0, 1));
        assert_eq!(v.state().phase(), Phase::Open);
    }

    #[test]
    fn pointer_down_outside_the_book_is_ignored() {
        let mut v = viewer(6);
        open(&mut v);
        let outside = Point::new(-50.0, -50.0);
        assert!(!v.handle(ViewerInput::PointerDown { pointer: FINGER, pos: outside }, 1_000));
        assert_eq!(v.state().phase(), Phase::Open);
    }

    #[test]
    fn cancelled_pointer_ends_the_peel() {
        let mut v = viewer(6);
        open(&mut v);
        let start = Point::new(v.layout().bounds().x1 - 10.0, 100.0);
        v.handle(ViewerInput::PointerDown { pointer: FINGER, pos: start }, 1_000);
        assert!(v.handle(ViewerInput::PointerCancel { pointer: FINGER }, 1_010));
        assert_eq!(v.state().phase(), Phase::Open);
        assert_eq!(v.state().left_index(), 0);
    }

    #[test]
    fn loading_same_id_keeps_position() {
        let mut v = viewer(6);
        open(&mut v);
        let same = Book::new("a", None, None, [1_u32, 2]);
        assert!(!v.load(same));
        assert_eq!(v.state().phase(), Phase::Open);
        assert_eq!(v.book().page_count(), 6);
    }

    #[test]
    fn loading_new_book_resets_and_cancels_timers() {
        let mut v = viewer(6);
        v.handle(ViewerInput::Key(Key::ArrowRight), 0);
        let stale: alloc::vec::Vec<_> = v.pending_timers().copied().collect();
        assert!(!stale.is_empty());

        assert!(v.load(Book::new("b", None, None, [9_u32, 10, 11])));
        assert_eq!(v.state(), &ViewState::default());
        assert_eq!(v.next_deadline(), None);
        for timer in &stale {
            assert!(!v.fire(timer));
        }
        assert_eq!(v.state().phase(), Phase::Closed);
    }

    #[test]
    fn unmount_cancels_timers() {
        let mut v = viewer(6);
        v.handle(ViewerInput::Key(Key::ArrowRight), 0);
        v.unmount();
        assert_eq!(v.tick(10_000), TickResult::NoRender);
        assert_eq!(v.state().phase(), Phase::Closed);
    }

    #[test]
    fn failed_images_are_flagged() {
        let mut v = viewer(6);
        v.report_image_error(&100);
        {
            let layers = v.layers();
            assert_eq!(layers.len(), 1);
            assert_eq!(layers[0].role, LayerRole::Cover);
            assert!(layers[0].error);
        }

        open(&mut v);
        assert!(v.layers().iter().all(|layer| !layer.error));
    }

    #[test]
    fn indicator_tracks_spreads() {
        let mut v = viewer(6);
        assert_eq!(v.indicator().unwrap().to_string(), "Front cover");
        open(&mut v);
        assert_eq!(v.indicator().unwrap().to_string(), "Page 1/3");
        assert_eq!(viewer(0).indicator(), None);
    }
}
