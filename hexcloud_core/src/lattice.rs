// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hex-cube lattice generation.
//!
//! A lattice of `R` rings holds every cube coordinate `(q, r, s)` with
//! `q + r + s = 0` and hex distance `< R` from the origin. Cells are emitted
//! ring by ring, and lexicographically within a ring, so the index of a cell
//! is stable for a given ring count. That index is the item index used by the
//! item source and the placement store.

use alloc::vec::Vec;

/// Largest ring count a lattice is generated with.
///
/// A lattice this size holds 48 769 cells.
pub const MAX_RINGS: u32 = 128;

/// One lattice cell in cube coordinates.
///
/// The invariant `q + r + s == 0` holds for every value produced by
/// [`Lattice::generate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HexCoord {
    /// Row axis. Scales the vertical offset.
    pub q: i32,
    /// Column axis.
    pub r: i32,
    /// Third cube axis, always `-q - r`.
    pub s: i32,
}

impl HexCoord {
    /// The lattice origin.
    pub const ORIGIN: Self = Self { q: 0, r: 0, s: 0 };

    /// Creates a coordinate from its first two axes.
    #[inline]
    #[must_use]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Hex distance from the origin (the ring this cell belongs to).
    #[inline]
    #[must_use]
    pub const fn ring(self) -> u32 {
        (self.q.unsigned_abs() + self.r.unsigned_abs() + self.s.unsigned_abs()) / 2
    }
}

/// An immutable, ordered set of hex cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lattice {
    rings: u32,
    cells: Vec<HexCoord>,
}

impl Lattice {
    /// Generates the lattice covering `rings` rings around the origin.
    ///
    /// `rings` is clamped to [`MAX_RINGS`].
    #[must_use]
    pub fn generate(rings: u32) -> Self {
        let rings = rings.min(MAX_RINGS);
        let mut cells = Vec::with_capacity(cell_count(rings));
        let ring_limit = i32::try_from(rings).unwrap_or(i32::MAX);
        for ring in 0..ring_limit {
            for q in -ring..=ring {
                for r in -ring..=ring {
                    let s = -q - r;
                    if s.abs() <= ring && q.abs() + r.abs() + s.abs() == 2 * ring {
                        cells.push(HexCoord { q, r, s });
                    }
                }
            }
        }
        debug_assert_eq!(cells.len(), cell_count(rings));
        Self { rings, cells }
    }

    /// Generates the smallest lattice with at least `min_rings` rings that
    /// holds `items` cells, up to [`MAX_RINGS`] rings.
    #[must_use]
    pub fn covering(items: usize, min_rings: u32) -> Self {
        Self::generate(rings_for_items(items).max(min_rings))
    }

    /// Number of rings.
    #[inline]
    #[must_use]
    pub fn rings(&self) -> u32 {
        self.rings
    }

    /// Number of cells.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the lattice has no cells (zero rings).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in index order.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[HexCoord] {
        &self.cells
    }

    /// Returns the cell at `index`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<HexCoord> {
        self.cells.get(index).copied()
    }
}

/// Number of cells in a lattice of `rings` rings: `1 + 3R(R - 1)`.
#[inline]
#[must_use]
pub const fn cell_count(rings: u32) -> usize {
    if rings == 0 {
        return 0;
    }
    let r = rings as usize;
    r.saturating_mul(r - 1).saturating_mul(3).saturating_add(1)
}

/// Smallest ring count whose lattice holds at least `items` cells, capped at
/// [`MAX_RINGS`].
#[must_use]
pub fn rings_for_items(items: usize) -> u32 {
    let mut rings = 0;
    while rings < MAX_RINGS && cell_count(rings) < items {
        rings += 1;
    }
    rings
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn four_rings_hold_37_cells() {
        let lattice = Lattice::generate(4);
        assert_eq!(lattice.len(), 37);
        assert_eq!(lattice.rings(), 4);
    }

    #[test]
    fn origin_comes_first() {
        let lattice = Lattice::generate(4);
        assert_eq!(lattice.get(0), Some(HexCoord::ORIGIN));
    }

    #[test]
    fn first_ring_order_is_lexicographic() {
        let lattice = Lattice::generate(2);
        let expected = [
            HexCoord::ORIGIN,
            HexCoord::new(-1, 0),
            HexCoord::new(-1, 1),
            HexCoord::new(0, -1),
            HexCoord::new(0, 1),
            HexCoord::new(1, -1),
            HexCoord::new(1, 0),
        ];
        assert_eq!(lattice.cells(), &expected);
    }

    #[test]
    fn cells_are_grouped_by_ring() {
        let lattice = Lattice::generate(5);
        let rings: Vec<u32> = lattice.cells().iter().map(|c| c.ring()).collect();
        assert!(rings.windows(2).all(|w| w[0] <= w[1]), "rings out of order: {rings:?}");
    }

    #[test]
    fn zero_rings_is_empty() {
        let lattice = Lattice::generate(0);
        assert!(lattice.is_empty());
        assert_eq!(cell_count(0), 0);
    }

    #[test]
    fn covering_respects_minimum_and_item_count() {
        assert_eq!(Lattice::covering(19, 4).rings(), 4);
        assert_eq!(Lattice::covering(38, 4).rings(), 5);
        assert_eq!(Lattice::covering(0, 1).len(), 1);
    }

    #[test]
    fn huge_counts_saturate_at_the_ring_limit() {
        assert_eq!(cell_count(u32::MAX), usize::MAX);
        assert_eq!(rings_for_items(usize::MAX), MAX_RINGS);
        assert_eq!(rings_for_items(cell_count(MAX_RINGS)), MAX_RINGS);
        assert_eq!(Lattice::covering(usize::MAX, 1).rings(), MAX_RINGS);
    }

    #[test]
    fn generate_clamps_ring_count() {
        let lattice = Lattice::generate(u32::MAX);
        assert_eq!(lattice.rings(), MAX_RINGS);
        assert_eq!(lattice.len(), cell_count(MAX_RINGS));
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(Lattice::generate(6), Lattice::generate(6));
    }

    proptest! {
        #[test]
        fn cube_invariant_and_count(rings in 0_u32..9) {
            let lattice = Lattice::generate(rings);
            prop_assert_eq!(lattice.len(), cell_count(rings));
            for cell in lattice.cells() {
                prop_assert_eq!(cell.q + cell.r + cell.s, 0);
                prop_assert!(cell.ring() < rings);
            }
        }

        #[test]
        fn rings_for_items_is_minimal(items in 0_usize..400) {
            let rings = rings_for_items(items);
            prop_assert!(cell_count(rings) >= items);
            if rings > 0 {
                prop_assert!(cell_count(rings - 1) < items);
            }
        }
    }
}
