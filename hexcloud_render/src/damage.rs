// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial damage tracking for partial re-rendering.

use alloc::vec::Vec;

use kurbo::Rect;

/// A region of the viewport that needs re-rendering.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DamageRegion {
    /// The entire viewport needs redrawing.
    #[default]
    Full,
    /// Rectangles in host coordinates that need redrawing.
    Rects(Vec<Rect>),
    /// Nothing changed; the previous frame can be reused.
    None,
}

impl DamageRegion {
    /// Returns `true` if no region needs redrawing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Adds a damaged rectangle. Zero-area rectangles are ignored.
    pub fn add_rect(&mut self, rect: Rect) {
        if rect.area() <= 0.0 {
            return;
        }
        match self {
            Self::Full => {}
            Self::Rects(rects) => rects.push(rect),
            Self::None => *self = Self::Rects(alloc::vec![rect]),
        }
    }

    /// Merges another damage region into this one.
    pub fn merge(&mut self, other: &Self) {
        match (&mut *self, other) {
            (_, Self::None) | (Self::Full, _) => {}
            (_, Self::Full) => *self = Self::Full,
            (Self::None, Self::Rects(_)) => *self = other.clone(),
            (Self::Rects(a), Self::Rects(b)) => a.extend_from_slice(b),
        }
    }

    /// Smallest rectangle covering the damage, or `None` for
    /// [`Full`](Self::Full) and [`None`](Self::None).
    #[must_use]
    pub fn bounding_box(&self) -> Option<Rect> {
        match self {
            Self::Rects(rects) => rects.iter().copied().reduce(|a, b| a.union(b)),
            Self::Full | Self::None => None,
        }
    }
}
