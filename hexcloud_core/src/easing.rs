// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed-form easing curves.
//!
//! Every function takes the conventional `(t, b, c, d)` quadruple: elapsed
//! time `t`, start value `b`, total change `c`, and duration `d`. The curve
//! returns `b` at `t = 0` and `b + c` at `t = d`.
//!
//! The same curves shape both space (sphere-warp depth, edge falloff) and
//! time (entry animation, inertial deceleration), so their formulas must
//! stay exactly as written here. Inputs outside `[0, d]` are evaluated on the
//! same closed form rather than clamped; the edge reflow relies on that.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use core::f64::consts::{FRAC_PI_2, PI};

/// Cubic ease-out: fast start, decelerating to rest.
#[inline]
#[must_use]
pub fn ease_out_cubic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d - 1.0;
    c * (t * t * t + 1.0) + b
}

/// Cubic ease-in-out: slow at both ends.
#[inline]
#[must_use]
pub fn ease_in_out_cubic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t * t + b;
    }
    let t = t - 2.0;
    c / 2.0 * (t * t * t + 2.0) + b
}

/// Sine ease-in: starts at rest.
#[inline]
#[must_use]
pub fn ease_in_sine(t: f64, b: f64, c: f64, d: f64) -> f64 {
    -c * (t / d * FRAC_PI_2).cos() + c + b
}

/// Sine ease-out: ends at rest.
#[inline]
#[must_use]
pub fn ease_out_sine(t: f64, b: f64, c: f64, d: f64) -> f64 {
    c * (t / d * FRAC_PI_2).sin() + b
}

/// Sine ease-in-out.
#[inline]
#[must_use]
pub fn ease_in_out_sine(t: f64, b: f64, c: f64, d: f64) -> f64 {
    -c / 2.0 * ((PI * t / d).cos() - 1.0) + b
}

/// Quadratic "swing": a single-overshoot quadratic ease-out.
#[inline]
#[must_use]
pub fn swing(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let t = t / d;
    -c * t * (t - 2.0) + b
}
