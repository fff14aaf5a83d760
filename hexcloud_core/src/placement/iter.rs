// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement iteration.

use super::store::PlacementStore;
use crate::pipeline::Placement;

/// An iterator over `(index, placement)` pairs of a store.
///
/// Created by [`PlacementStore::iter`].
#[derive(Debug)]
pub struct Placements<'a> {
    store: &'a PlacementStore,
    next: usize,
}

impl<'a> Placements<'a> {
    pub(crate) fn new(store: &'a PlacementStore) -> Self {
        Self { store, next: 0 }
    }
}

impl Iterator for Placements<'_> {
    type Item = (usize, Placement);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next;
        let placement = self.store.get(idx)?;
        self.next += 1;
        Some((idx, placement))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.store.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Placements<'_> {}
