// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate transforms from lattice cells to screen placements.
//!
//! The pipeline for one cell is:
//!
//! ```text
//!   HexCoord ──hex_to_ortho──► Point ──ortho_to_polar──► PolarPoint
//!                                                            │
//!                                                       sphere_warp
//!                                                            ▼
//!   (Point, scale) ◄──edge_scale / edge_reflow── Point ◄── WarpedPolar
//!                                        polar_to_ortho
//! ```
//!
//! Ortho points are relative to the cloud centre, with `y` growing downward
//! like the host's screen coordinates. Every function here is pure.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use core::f64::consts::FRAC_PI_2;

use kurbo::{Point, Vec2};

use crate::config::Tuning;
use crate::easing::{ease_in_out_cubic, ease_in_out_sine, ease_in_sine, ease_out_sine, swing};
use crate::lattice::HexCoord;

/// `√3 / 2`, the vertical distance between lattice rows per unit spacing.
const ROW_HEIGHT: f64 = 0.866_025_403_784_438_6;

/// A point in polar form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolarPoint {
    /// Distance from the cloud centre.
    pub radius: f64,
    /// Angle in radians, as returned by `atan2(y, x)`.
    pub angle: f64,
}

/// A polar point after projection onto the virtual sphere.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpedPolar {
    /// Warped distance from the cloud centre.
    pub radius: f64,
    /// Pseudo-depth driving scale falloff. `1.0` at the centre, `0.5` at and
    /// beyond the sphere's horizon.
    pub depth: f64,
    /// Angle in radians, unchanged by the warp.
    pub angle: f64,
}

/// Maps a lattice cell to an ortho point for the given spacing and pan.
#[inline]
#[must_use]
pub fn hex_to_ortho(cell: HexCoord, spacing: f64, pan: Vec2) -> Point {
    let q = f64::from(cell.q);
    let r = f64::from(cell.r);
    Point::new(
        (r + q / 2.0) * spacing + pan.x,
        ROW_HEIGHT * q * spacing + pan.y,
    )
}

/// Converts an ortho point to polar form.
///
/// At the origin the angle is `0.0`; it carries no meaning there.
#[inline]
#[must_use]
pub fn ortho_to_polar(p: Point) -> PolarPoint {
    PolarPoint {
        radius: p.x.hypot(p.y),
        angle: p.y.atan2(p.x),
    }
}

/// Converts a polar point back to ortho form without quantization.
#[inline]
#[must_use]
pub fn polar_to_cartesian(radius: f64, angle: f64) -> Point {
    Point::new(radius * angle.cos(), radius * angle.sin())
}

/// Projects a polar point onto a sphere of `sphere_radius`.
///
/// Inside the horizon (`r / sphere_radius < π/2`) the radius is scaled by a
/// swing ease, pushing near-centre cells outward, and depth follows a cubic
/// in-out ease. Past the horizon the radius is unchanged and depth saturates.
#[must_use]
pub fn sphere_warp(polar: PolarPoint, sphere_radius: f64, tuning: &Tuning) -> WarpedPolar {
    let t = polar.radius / sphere_radius;
    let (radius, depth) = if t < FRAC_PI_2 {
        let u = t / FRAC_PI_2;
        (
            polar.radius * swing(u, tuning.swing_start, tuning.swing_change, 1.0),
            ease_in_out_cubic(u, tuning.depth_start, tuning.depth_change, 1.0),
        )
    } else {
        (
            polar.radius,
            ease_in_out_cubic(1.0, tuning.depth_start, tuning.depth_change, 1.0),
        )
    };
    WarpedPolar {
        radius,
        depth,
        angle: polar.angle,
    }
}

/// Converts a warped point back to ortho form.
///
/// Both coordinates are rounded to one decimal digit, and `y` is then
/// stretched by the aspect correction.
#[must_use]
pub fn polar_to_ortho(warped: WarpedPolar, tuning: &Tuning) -> Point {
    let p = polar_to_cartesian(warped.radius, warped.angle);
    Point::new(round_tenth(p.x), round_tenth(p.y) * tuning.y_aspect)
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Computes an item's scale from its depth and its proximity to the edges.
///
/// `half` is half the screen size and `edge` the margin width. Zones are
/// tested in order:
///
/// 1. Outside the outer band on either axis: `depth * outer_scale`.
/// 2. Inside the inner band on both axes: the smaller of the two per-axis
///    in-out sine shrinks.
/// 3. Inside the inner band on one axis: that axis's out sine shrink.
/// 4. Elsewhere: `depth`.
#[must_use]
pub fn edge_scale(p: Point, depth: f64, half: Vec2, edge: f64, tuning: &Tuning) -> f64 {
    let ax = p.x.abs();
    let ay = p.y.abs();
    let to_x = half.x - ax - edge;
    let to_y = half.y - ay - edge;

    if ax > half.x - edge || ay > half.y - edge {
        depth * tuning.outer_scale
    } else if ax > half.x - 2.0 * edge && ay > half.y - 2.0 * edge {
        let sx = depth * ease_in_out_sine(to_x, tuning.band_start, tuning.band_change, edge);
        let sy = depth
            * ease_in_out_sine(to_y, tuning.corner_y_start, tuning.corner_y_change, edge);
        sx.min(sy)
    } else if ax > half.x - 2.0 * edge {
        depth * ease_out_sine(to_x, tuning.band_start, tuning.band_change, edge)
    } else if ay > half.y - 2.0 * edge {
        depth * ease_out_sine(to_y, tuning.band_start, tuning.band_change, edge)
    } else {
        depth
    }
}

/// Nudges points inside the outer `2 * edge` band back toward the centre.
///
/// The push grows from zero at the band's inner boundary to `reflow_x` /
/// `reflow_y` at the screen edge.
#[must_use]
pub fn edge_reflow(p: Point, half: Vec2, edge: f64, tuning: &Tuning) -> Point {
    let band = 2.0 * edge;
    let mut out = p;
    let tx = half.x - p.x.abs() - band;
    if p.x < -half.x + band {
        out.x += ease_in_sine(tx, 0.0, tuning.reflow_x, band);
    } else if p.x > half.x - band {
        out.x += ease_in_sine(tx, 0.0, -tuning.reflow_x, band);
    }
    let ty = half.y - p.y.abs() - band;
    if p.y < -half.y + band {
        out.y += ease_in_sine(ty, 0.0, tuning.reflow_y, band);
    } else if p.y > half.y - band {
        out.y += ease_in_sine(ty, 0.0, -tuning.reflow_y, band);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const T: Tuning = Tuning::DEFAULT;
    const HALF: Vec2 = Vec2::new(500.0, 500.0);

    #[test]
    fn hex_to_ortho_positions() {
        let p = hex_to_ortho(HexCoord::new(0, 1), 100.0, Vec2::ZERO);
        assert!((p.x - 100.0).abs() < 1e-12 && p.y.abs() < 1e-12, "got {p:?}");

        let p = hex_to_ortho(HexCoord::new(2, -1), 100.0, Vec2::new(5.0, -3.0));
        assert!((p.x - 5.0).abs() < 1e-9, "got {p:?}");
        assert!((p.y - (2.0 * ROW_HEIGHT * 100.0 - 3.0)).abs() < 1e-9, "got {p:?}");
    }

    #[test]
    fn origin_keeps_full_depth() {
        let w = sphere_warp(ortho_to_polar(Point::ORIGIN), 500.0, &T);
        assert_eq!(w.radius, 0.0);
        assert_eq!(w.depth, 1.0);
    }

    #[test]
    fn near_centre_cells_bulge_outward() {
        let polar = PolarPoint {
            radius: 100.0,
            angle: 0.0,
        };
        let w = sphere_warp(polar, 500.0, &T);
        assert!(w.radius > 130.0 && w.radius < 140.0, "got {}", w.radius);
        assert!(w.depth < 1.0 && w.depth > 0.5, "got {}", w.depth);
    }

    #[test]
    fn beyond_horizon_radius_is_unchanged() {
        let polar = PolarPoint {
            radius: 900.0,
            angle: 1.0,
        };
        let w = sphere_warp(polar, 500.0, &T);
        assert_eq!(w.radius, 900.0);
        assert_eq!(w.depth, 0.5);
        assert_eq!(w.angle, 1.0);
    }

    #[test]
    fn polar_to_ortho_rounds_and_corrects_aspect() {
        let w = WarpedPolar {
            radius: 10.04,
            depth: 1.0,
            angle: FRAC_PI_2,
        };
        let p = polar_to_ortho(w, &T);
        assert_eq!(p.x, 0.0);
        assert!((p.y - 10.0 * 1.14).abs() < 1e-9, "got {}", p.y);
    }

    #[test]
    fn edge_scale_zones() {
        let edge = 50.0;
        // Centre: full depth.
        assert_eq!(edge_scale(Point::new(0.0, 0.0), 0.8, HALF, edge, &T), 0.8);
        // Outer band: heavy shrink.
        assert_eq!(edge_scale(Point::new(470.0, 0.0), 0.8, HALF, edge, &T), 0.8 * 0.4);
        assert_eq!(edge_scale(Point::new(0.0, -460.0), 1.0, HALF, edge, &T), 0.4);
        // Inner band on x only, right at its inner boundary: no shrink yet.
        let s = edge_scale(Point::new(400.0 + 1e-9, 0.0), 1.0, HALF, edge, &T);
        assert!((s - 1.0).abs() < 1e-6, "got {s}");
        // Inner band on x only, at the outer boundary: shrunk to 0.4.
        let s = edge_scale(Point::new(450.0, 0.0), 1.0, HALF, edge, &T);
        assert!((s - 0.4).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn corner_band_takes_the_smaller_axis() {
        let edge = 50.0;
        let s = edge_scale(Point::new(425.0, 449.0), 1.0, HALF, edge, &T);
        let sx = ease_in_out_sine(25.0, 0.4, 0.6, edge);
        let sy = ease_in_out_sine(1.0, 0.3, 0.7, edge);
        assert_eq!(s, sx.min(sy));
        assert!(s < 0.4, "y axis dominates near the corner, got {s}");
    }

    #[test]
    fn edge_reflow_pushes_inward() {
        let edge = 50.0;
        let p = edge_reflow(Point::new(500.0, -500.0), HALF, edge, &T);
        assert!((p.x - (500.0 - 6.0)).abs() < 1e-9, "got {p:?}");
        assert!((p.y - (-500.0 + 8.0)).abs() < 1e-9, "got {p:?}");

        let inside = Point::new(120.0, -350.0);
        assert_eq!(edge_reflow(inside, HALF, edge, &T), inside);
    }

    #[test]
    fn edge_reflow_is_zero_at_band_boundary() {
        let p = edge_reflow(Point::new(-400.0, 0.0), HALF, 50.0, &T);
        assert_eq!(p, Point::new(-400.0, 0.0));
    }

    proptest! {
        #[test]
        fn polar_round_trip(x in -2000.0_f64..2000.0, y in -2000.0_f64..2000.0) {
            let polar = ortho_to_polar(Point::new(x, y));
            let back = polar_to_cartesian(polar.radius, polar.angle);
            prop_assert!((back.x - x).abs() < 1e-9);
            prop_assert!((back.y - y).abs() < 1e-9);
        }

        #[test]
        fn edge_scale_shrinks_toward_the_edge(
            d1 in 0.0_f64..100.0,
            d2 in 0.0_f64..100.0,
            depth in 0.5_f64..=1.0,
        ) {
            // Distance to the visible boundary, measured on the x axis only.
            let (near, far) = if d1 < d2 { (d1, d2) } else { (d2, d1) };
            let s_near = edge_scale(Point::new(500.0 - near, 0.0), depth, HALF, 50.0, &T);
            let s_far = edge_scale(Point::new(500.0 - far, 0.0), depth, HALF, 50.0, &T);
            prop_assert!(s_near <= s_far + 1e-12, "near {s_near} far {s_far}");
        }

        #[test]
        fn edge_scale_shrinks_toward_the_top_and_bottom(
            d1 in 0.0_f64..100.0,
            d2 in 0.0_f64..100.0,
            depth in 0.5_f64..=1.0,
            below in any::<bool>(),
        ) {
            let (near, far) = if d1 < d2 { (d1, d2) } else { (d2, d1) };
            let sign = if below { -1.0 } else { 1.0 };
            let s_near = edge_scale(Point::new(0.0, sign * (500.0 - near)), depth, HALF, 50.0, &T);
            let s_far = edge_scale(Point::new(0.0, sign * (500.0 - far)), depth, HALF, 50.0, &T);
            prop_assert!(s_near <= s_far + 1e-12, "near {s_near} far {s_far}");
        }

        #[test]
        fn edge_reflow_pushes_harder_near_the_edge(
            d1 in 0.0_f64..100.0,
            d2 in 0.0_f64..100.0,
            horizontal in any::<bool>(),
            negative in any::<bool>(),
        ) {
            // Inside the 2 * edge band, the inward push grows toward the edge
            // on both axes and never moves a point outward.
            let (near, far) = if d1 < d2 { (d1, d2) } else { (d2, d1) };
            let sign = if negative { -1.0 } else { 1.0 };
            let push = |d: f64| {
                let v = sign * (500.0 - d);
                let p = if horizontal { Point::new(v, 0.0) } else { Point::new(0.0, v) };
                let out = edge_reflow(p, HALF, 50.0, &T);
                let (before, after) = if horizontal { (p.x, out.x) } else { (p.y, out.y) };
                sign * (before - after)
            };
            let (p_near, p_far) = (push(near), push(far));
            prop_assert!(p_far >= -1e-12, "outward push {p_far}");
            prop_assert!(p_near + 1e-12 >= p_far, "near {p_near} far {p_far}");
        }

        #[test]
        fn warp_depth_stays_in_range(r in 0.0_f64..5000.0) {
            let w = sphere_warp(PolarPoint { radius: r, angle: 0.0 }, 500.0, &T);
            prop_assert!((0.5..=1.0).contains(&w.depth));
            prop_assert!(w.radius >= r);
        }
    }
}
