// Copyright 2026 the Flipbook Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flipbook Event State: small state managers for gesture-driven widgets.
//!
//! Drag gestures on touch and pen devices come with two recurring chores:
//!
//! - [`drag`]: follow exactly one pointer for the duration of a drag and ignore
//!   every other concurrent pointer, computing offsets from the drag origin.
//! - [`click`]: platforms synthesize a click when a pointer is released over the
//!   element it went down on, even after a long drag. [`click::ClickGate`]
//!   remembers that a drag happened so the follow-up click can be swallowed
//!   exactly once.
//!
//! Neither manager knows about widgets, hit testing or clocks. Callers feed
//! them pointer ids, positions and host timestamps and interpret the results.
//!
//! ## Drag with pointer capture
//!
//! ```rust
//! # #[cfg(feature = "drag")]
//! # fn example() {
//! use kurbo::Point;
//! use flipbook_event_state::PointerId;
//! use flipbook_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! let finger = PointerId(1);
//! let other = PointerId(2);
//!
//! drag.start(finger, Point::new(100.0, 10.0));
//!
//! // Moves from a second finger are ignored.
//! assert_eq!(drag.update(other, Point::new(0.0, 0.0)), None);
//!
//! drag.update(finger, Point::new(60.0, 12.0));
//! let total = drag.total_offset(finger, Point::new(60.0, 12.0)).unwrap();
//! assert_eq!(total.x, -40.0);
//! # }
//! ```
//!
//! ## Swallowing the click after a drag
//!
//! ```rust
//! # #[cfg(feature = "click")]
//! # fn example() {
//! use flipbook_event_state::click::ClickGate;
//!
//! let mut gate = ClickGate::default();
//!
//! // The drag travelled far enough to count as a gesture.
//! gate.arm();
//! // Pointer released at t = 1000 ms; the click follows shortly after.
//! gate.release(1_000, 200);
//! assert!(gate.suppress(1_010));
//! // Only once.
//! assert!(!gate.suppress(1_020));
//! # }
//! ```
//!
//! ## Features
//!
//! - `drag`: Enable drag tracking (requires `kurbo` dependency)
//! - `click`: Enable the click suppression gate
//!
//! This crate is `no_std` compatible for all modules.

#![no_std]

#[cfg(feature = "click")]
pub mod click;

#[cfg(feature = "drag")]
pub mod drag;

/// Identifier of a pointer (mouse, pen or a single touch contact).
///
/// Hosts usually forward the platform's pointer id unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointerId(pub u64);
