// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pan offset with soft limits.
//!
//! The raw pan accumulates every drag delta. The effective pan, which feeds
//! the layout, follows the raw pan one-to-one inside `±range` and at a damped
//! rate past it, so a drag beyond the limit keeps moving but more slowly.

use kurbo::Vec2;

/// Applies the soft limit to one axis.
///
/// Inside `[-range, range]` the value is returned unchanged. Past the limit,
/// only `damping` of the excess is kept.
#[inline]
#[must_use]
pub fn soft_clamp(raw: f64, range: f64, damping: f64) -> f64 {
    if raw > range {
        range + (raw - range) * damping
    } else if raw < -range {
        -range + (raw + range) * damping
    } else {
        raw
    }
}

/// Pulls one axis back toward `±range` by `relax` of its overshoot.
#[inline]
#[must_use]
pub fn relax_overshoot(value: f64, range: f64, relax: f64) -> f64 {
    if value > range {
        value - (value - range) * relax
    } else if value < -range {
        value - (value + range) * relax
    } else {
        value
    }
}

/// Current pan state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    raw: Vec2,
    effective: Vec2,
}

impl ScrollState {
    /// A pan at the origin.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            raw: Vec2::ZERO,
            effective: Vec2::ZERO,
        }
    }

    /// Undamped accumulation of drag deltas.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> Vec2 {
        self.raw
    }

    /// The offset the layout uses.
    #[inline]
    #[must_use]
    pub fn effective(&self) -> Vec2 {
        self.effective
    }

    /// Adds a drag delta and recomputes the damped offset.
    pub fn drag_by(&mut self, delta: Vec2, range: Vec2, damping: f64) {
        self.raw += delta;
        self.effective = Vec2::new(
            soft_clamp(self.raw.x, range.x, damping),
            soft_clamp(self.raw.y, range.y, damping),
        );
    }

    /// Applies one inertial displacement, then relaxes any overshoot
    /// `relax_steps` times.
    ///
    /// Inertia moves the effective offset directly; the raw offset is then
    /// resynchronized so a following drag continues from where the cloud
    /// visibly is.
    pub fn coast_by(&mut self, displacement: Vec2, range: Vec2, relax: f64, relax_steps: u32) {
        let mut p = self.effective + displacement;
        for _ in 0..relax_steps {
            p = Vec2::new(
                relax_overshoot(p.x, range.x, relax),
                relax_overshoot(p.y, range.y, relax),
            );
        }
        self.effective = p;
        self.raw = p;
    }

    /// Returns to the origin.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
