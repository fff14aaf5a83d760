// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-pointer gesture classification.
//!
//! [`GestureTracker`] turns pointer down/move/up events into one of two
//! outcomes: a click at a position, or a scroll that ends in a fling.
//!
//! # State machine
//!
//! ```text
//!   Resting ──down──► Click ──move past slop──► Scroll
//!      ▲                │                         │
//!      └────up/cancel───┴────────up/cancel────────┘
//! ```
//!
//! A gesture that became a scroll never reverts to a click, so a drag never
//! produces a click on release.

use kurbo::{Point, Vec2};

/// Phase of the current gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GesturePhase {
    /// No pointer is down.
    #[default]
    Resting,
    /// A pointer is down and has not moved past the touch slop.
    Click,
    /// The pointer is dragging the cloud.
    Scroll,
}

/// Result of a pointer move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome {
    /// No gesture is in progress.
    Ignored,
    /// The pointer is still within the touch slop.
    Pending,
    /// The cloud should pan by `delta`.
    Scroll {
        /// Movement since the previous scroll position.
        delta: Vec2,
        /// Whether this move turned the gesture into a scroll.
        began: bool,
    },
}

/// How a gesture ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Release {
    /// No gesture was in progress.
    None,
    /// The gesture was a click at this position.
    Click(Point),
    /// The gesture was a scroll whose last move was this delta.
    Fling(Vec2),
}

/// Gesture classifier for one pointer.
#[derive(Clone, Copy, Debug)]
pub struct GestureTracker {
    phase: GesturePhase,
    slop: f64,
    start: Point,
    last: Point,
    last_delta: Vec2,
}

impl GestureTracker {
    /// Creates a resting tracker with the given per-axis touch slop.
    #[must_use]
    pub const fn new(slop: f64) -> Self {
        Self {
            phase: GesturePhase::Resting,
            slop,
            start: Point::ORIGIN,
            last: Point::ORIGIN,
            last_delta: Vec2::ZERO,
        }
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Last position seen by the tracker.
    #[inline]
    #[must_use]
    pub fn last_position(&self) -> Point {
        self.last
    }

    /// Starts a gesture at `pos`.
    pub fn pointer_down(&mut self, pos: Point) {
        self.phase = GesturePhase::Click;
        self.start = pos;
        self.last = pos;
        self.last_delta = Vec2::ZERO;
    }

    /// Feeds a pointer move.
    pub fn pointer_move(&mut self, pos: Point) -> MoveOutcome {
        let began = match self.phase {
            GesturePhase::Resting => return MoveOutcome::Ignored,
            GesturePhase::Click => {
                let d = pos - self.start;
                if d.x.abs() <= self.slop && d.y.abs() <= self.slop {
                    return MoveOutcome::Pending;
                }
                self.phase = GesturePhase::Scroll;
                true
            }
            GesturePhase::Scroll => false,
        };
        let delta = pos - self.last;
        self.last = pos;
        self.last_delta = delta;
        MoveOutcome::Scroll { delta, began }
    }

    /// Ends the gesture with the pointer lifted at `pos`.
    pub fn pointer_up(&mut self, pos: Point) -> Release {
        let release = match self.phase {
            GesturePhase::Resting => Release::None,
            GesturePhase::Click => Release::Click(pos),
            GesturePhase::Scroll => Release::Fling(self.last_delta),
        };
        self.last = pos;
        self.reset();
        release
    }

    /// Ends the gesture without a final position.
    ///
    /// A pending click resolves at the last known position.
    pub fn pointer_cancel(&mut self) -> Release {
        let last = self.last;
        self.pointer_up(last)
    }

    /// Forces the tracker back to [`GesturePhase::Resting`].
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Resting;
        self.last_delta = Vec2::ZERO;
    }
}
