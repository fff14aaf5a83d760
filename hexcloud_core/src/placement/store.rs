// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays placement storage.

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use understory_dirty::{CycleHandling, DirtyTracker};

use super::frame::ItemFrame;
use super::iter::Placements;
use crate::dirty;
use crate::error::{Error, Result};
use crate::pipeline::Placement;

/// Holds the most recently published placement of every lattice cell.
///
/// Each placement occupies one slot, addressed by its item index, in
/// parallel arrays. A frame is replaced wholesale by [`publish`](Self::publish)
/// through `&mut self`, so readers never observe a partially written frame.
#[derive(Debug)]
pub struct PlacementStore {
    // -- Properties --
    pub(crate) x: Vec<f64>,
    pub(crate) y: Vec<f64>,
    pub(crate) scale: Vec<f64>,
    pub(crate) opacity: Vec<f64>,
    pub(crate) depth: Vec<f64>,

    // -- Geometry --
    pub(crate) frame: ItemFrame,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,
    pub(crate) pending_removed: Vec<u32>,
    pub(crate) resized: bool,

    // -- Frame counter --
    pub(crate) frame_index: u64,
}

impl PlacementStore {
    /// Creates an empty store whose bounds follow `frame`.
    #[must_use]
    pub fn new(frame: ItemFrame) -> Self {
        Self {
            x: Vec::new(),
            y: Vec::new(),
            scale: Vec::new(),
            opacity: Vec::new(),
            depth: Vec::new(),
            frame,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_removed: Vec::new(),
            resized: false,
            frame_index: 0,
        }
    }

    /// Replaces the whole frame with `placements`.
    ///
    /// Only slots whose values differ are marked dirty. Slots past the new
    /// length are dropped; slots past the old length are marked on every
    /// channel.
    pub fn publish(&mut self, placements: &[Placement]) {
        let old_len = self.x.len();
        let new_len = placements.len();

        if new_len < old_len {
            for idx in new_len..old_len {
                let slot = slot(idx);
                self.dirty.remove_key(slot);
                self.pending_removed.push(slot);
            }
            self.x.truncate(new_len);
            self.y.truncate(new_len);
            self.scale.truncate(new_len);
            self.opacity.truncate(new_len);
            self.depth.truncate(new_len);
            self.resized = true;
        }

        for (idx, p) in placements.iter().enumerate() {
            let slot = slot(idx);
            if idx >= old_len {
                self.x.push(p.x);
                self.y.push(p.y);
                self.scale.push(p.scale);
                self.opacity.push(p.opacity);
                self.depth.push(p.depth);
                self.dirty.mark(slot, dirty::POSITION);
                self.dirty.mark(slot, dirty::SCALE);
                self.dirty.mark(slot, dirty::OPACITY);
                self.dirty.mark(slot, dirty::TOPOLOGY);
                continue;
            }
            if self.x[idx] != p.x || self.y[idx] != p.y {
                self.x[idx] = p.x;
                self.y[idx] = p.y;
                self.dirty.mark(slot, dirty::POSITION);
            }
            if self.scale[idx] != p.scale {
                self.scale[idx] = p.scale;
                self.dirty.mark(slot, dirty::SCALE);
            }
            if self.opacity[idx] != p.opacity {
                self.opacity[idx] = p.opacity;
                self.dirty.mark(slot, dirty::OPACITY);
            }
            self.depth[idx] = p.depth;
        }

        if new_len > old_len {
            self.resized = true;
        }
        self.frame_index += 1;
    }

    /// Number of published placements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether no placement has been published.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Number of frames published so far.
    #[inline]
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    /// The rectangle mapping in use.
    #[inline]
    #[must_use]
    pub fn item_frame(&self) -> &ItemFrame {
        &self.frame
    }

    /// Returns the placement at `index`.
    pub fn placement_at(&self, index: usize) -> Result<Placement> {
        self.get(index).ok_or(Error::IndexOutOfRange {
            index,
            count: self.len(),
        })
    }

    /// Returns the placement at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Placement> {
        (index < self.len()).then(|| Placement {
            x: self.x[index],
            y: self.y[index],
            scale: self.scale[index],
            opacity: self.opacity[index],
            depth: self.depth[index],
        })
    }

    /// Iterates over `(index, placement)` pairs in index order.
    #[must_use]
    pub fn iter(&self) -> Placements<'_> {
        Placements::new(self)
    }

    /// On-screen bounds of the placement at `index`.
    pub fn bounds(&self, index: usize) -> Result<Rect> {
        if index >= self.len() {
            return Err(Error::IndexOutOfRange {
                index,
                count: self.len(),
            });
        }
        Ok(self.bounds_unchecked(index))
    }

    /// Lowest index below `limit` whose bounds contain `point`.
    #[must_use]
    pub fn hit_test(&self, point: Point, limit: usize) -> Option<usize> {
        (0..self.len().min(limit)).find(|&idx| self.bounds_unchecked(idx).contains(point))
    }

    fn bounds_unchecked(&self, idx: usize) -> Rect {
        self.frame.bounds(self.x[idx], self.y[idx], self.scale[idx])
    }

    // -- Raw slot accessors --

    /// Returns the x offset at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[must_use]
    pub fn x_at(&self, idx: u32) -> f64 {
        self.check_slot(idx);
        self.x[idx as usize]
    }

    /// Returns the y offset at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[must_use]
    pub fn y_at(&self, idx: u32) -> f64 {
        self.check_slot(idx);
        self.y[idx as usize]
    }

    /// Returns the scale at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[must_use]
    pub fn scale_at(&self, idx: u32) -> f64 {
        self.check_slot(idx);
        self.scale[idx as usize]
    }

    /// Returns the opacity at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[must_use]
    pub fn opacity_at(&self, idx: u32) -> f64 {
        self.check_slot(idx);
        self.opacity[idx as usize]
    }

    /// Returns the on-screen bounds at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[must_use]
    pub fn bounds_at(&self, idx: u32) -> Rect {
        self.check_slot(idx);
        self.bounds_unchecked(idx as usize)
    }

    fn check_slot(&self, idx: u32) {
        assert!(
            (idx as usize) < self.len(),
            "slot index {idx} out of range (len {})",
            self.len()
        );
    }
}

/// Converts an item index to a dirty-tracker key.
#[expect(
    clippy::cast_possible_truncation,
    reason = "lattice sizes stay far below u32::MAX"
)]
pub(crate) fn slot(idx: usize) -> u32 {
    idx as u32
}
