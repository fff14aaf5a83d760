// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item rectangles in host coordinates.

use kurbo::{Point, Rect, Size, Vec2};

use crate::config::CloudConfig;

/// Maps centre-relative placements to item rectangles in host coordinates.
///
/// An item's layout rectangle has its top-left corner at the placement
/// offset plus [`origin`](Self::origin) and a side of
/// [`item_size`](Self::item_size). Its on-screen bounds are that rectangle
/// scaled about its centre by the placement scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemFrame {
    /// Offset from a placement to its layout rectangle's top-left corner.
    pub origin: Vec2,
    /// Side length of the unscaled item square.
    pub item_size: f64,
}

impl ItemFrame {
    /// Derives the frame from a configuration.
    #[must_use]
    pub fn from_config(config: &CloudConfig) -> Self {
        let half = config.half_extent();
        Self {
            origin: Vec2::new(half.x - config.edge_margin, half.y - config.edge_margin),
            item_size: config.item_size,
        }
    }

    /// Unscaled layout rectangle for a placement at `(x, y)`.
    #[must_use]
    pub fn layout_rect(&self, x: f64, y: f64) -> Rect {
        Rect::from_origin_size(
            Point::new(x + self.origin.x, y + self.origin.y),
            Size::new(self.item_size, self.item_size),
        )
    }

    /// On-screen bounds of a placement at `(x, y)` with `scale`.
    #[must_use]
    pub fn bounds(&self, x: f64, y: f64, scale: f64) -> Rect {
        let side = self.item_size * scale;
        Rect::from_center_size(self.layout_rect(x, y).center(), Size::new(side, side))
    }
}
