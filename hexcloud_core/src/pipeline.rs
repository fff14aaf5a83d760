// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Whole-frame layout.
//!
//! [`layout`] composes the [`geometry`](crate::geometry) transforms for every
//! lattice cell from one [`LayoutParams`] snapshot. It holds no state, so two
//! calls with equal inputs produce bit-identical output.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::config::{CloudConfig, Tuning};
use crate::geometry::{edge_reflow, edge_scale, hex_to_ortho, ortho_to_polar, polar_to_ortho, sphere_warp};
use crate::lattice::{HexCoord, Lattice};

/// Final screen placement of one item, relative to the cloud centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Horizontal offset from the cloud centre.
    pub x: f64,
    /// Vertical offset from the cloud centre.
    pub y: f64,
    /// Uniform item scale.
    pub scale: f64,
    /// Item opacity in `[0, 1]`.
    pub opacity: f64,
    /// Sphere depth the scale was derived from.
    pub depth: f64,
}

impl Placement {
    /// The placement offset as a point.
    #[inline]
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Inputs of one layout pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutParams {
    /// Distance between neighbouring cells.
    pub spacing: f64,
    /// Effective pan offset.
    pub pan: Vec2,
    /// Uniform item opacity.
    pub opacity: f64,
    /// Radius of the virtual sphere.
    pub sphere_radius: f64,
    /// Half the screen size.
    pub half_extent: Vec2,
    /// Width of each edge band.
    pub edge_margin: f64,
    /// Curve constants.
    pub tuning: Tuning,
}

impl LayoutParams {
    /// Builds layout inputs from a configuration and the animated values.
    #[must_use]
    pub fn new(config: &CloudConfig, spacing: f64, pan: Vec2, opacity: f64) -> Self {
        Self {
            spacing,
            pan,
            opacity,
            sphere_radius: config.sphere_radius,
            half_extent: config.half_extent(),
            edge_margin: config.edge_margin,
            tuning: config.tuning,
        }
    }
}

/// Places a single cell.
#[must_use]
pub fn place_cell(cell: HexCoord, params: &LayoutParams) -> Placement {
    let t = &params.tuning;
    let ortho = hex_to_ortho(cell, params.spacing, params.pan);
    let warped = sphere_warp(ortho_to_polar(ortho), params.sphere_radius, t);
    let p = polar_to_ortho(warped, t);
    let scale = edge_scale(p, warped.depth, params.half_extent, params.edge_margin, t);
    let p = edge_reflow(p, params.half_extent, params.edge_margin, t);
    Placement {
        x: p.x,
        y: p.y,
        scale,
        opacity: params.opacity,
        depth: warped.depth,
    }
}

/// Lays out every cell of `lattice`.
#[must_use]
pub fn layout(lattice: &Lattice, params: &LayoutParams) -> Vec<Placement> {
    let mut out = Vec::with_capacity(lattice.len());
    layout_into(lattice, params, &mut out);
    out
}

/// Like [`layout`], but reuses a caller-provided buffer.
pub fn layout_into(lattice: &Lattice, params: &LayoutParams, out: &mut Vec<Placement>) {
    out.clear();
    out.extend(lattice.cells().iter().map(|&cell| place_cell(cell, params)));
}
