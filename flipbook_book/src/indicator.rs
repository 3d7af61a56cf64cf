// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use crate::state::{Phase, ViewState};

/// Progress label shown under the book.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Indicator {
    /// The book is closed (or opening) on its front cover.
    FrontCover,
    /// The book rests on (or is turning away from) its back cover.
    BackCover,
    /// The book is open on spread `current` of `total`, both one-based.
    Spread {
        /// Current spread.
        current: usize,
        /// Number of spreads.
        total: usize,
    },
}

impl Indicator {
    /// Label for `state` of a book with `page_count` pages.
    ///
    /// Books without pages get no label.
    #[must_use]
    pub fn for_state(state: &ViewState, page_count: usize) -> Option<Self> {
        if page_count == 0 {
            return None;
        }
        let closed = matches!(
            state.phase(),
            Phase::Closed | Phase::Opening(_) | Phase::Returning
        );
        Some(if closed {
            if state.is_showing_back_cover() {
                Self::BackCover
            } else {
                Self::FrontCover
            }
        } else {
            let total = page_count.div_ceil(2);
            let current = (state.left_index() / 2 + 1).clamp(1, total);
            Self::Spread { current, total }
        })
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FrontCover => f.write_str("Front cover"),
            Self::BackCover => f.write_str("Back cover"),
            Self::Spread { current, total } => write!(f, "Page {current}/{total}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::config::FlipTimings;
    use crate::machine::BookMachine;

    #[test]
    fn labels_follow_the_book() {
        let mut m = BookMachine::new(5, FlipTimings::default());
        let label = |m: &BookMachine| Indicator::for_state(m.state(), 5).unwrap().to_string();

        assert_eq!(label(&m), "Front cover");
        m.advance(0);
        assert_eq!(label(&m), "Front cover");
        m.tick(650);
        assert_eq!(label(&m), "Page 1/3");
        m.advance(700);
        m.tick(1_400);
        assert_eq!(label(&m), "Page 2/3");
        m.advance(1_500);
        m.tick(2_200);
        assert_eq!(label(&m), "Back cover");
    }

    #[test]
    fn empty_book_has_no_label() {
        let m = BookMachine::new(0, FlipTimings::default());
        assert_eq!(Indicator::for_state(m.state(), 0), None);
    }
}
