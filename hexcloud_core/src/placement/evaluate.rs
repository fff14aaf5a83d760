// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change collection.
//!
//! [`PlacementStore::evaluate`] drains each dirty channel into a
//! [`PlacementChanges`] value. Indices are raw slot indices (`u32`) so
//! presenters can read the store directly through the `*_at()` accessors.
//! A slot that is dropped and re-created between two evaluations appears in
//! both [`removed`](PlacementChanges::removed) and
//! [`added`](PlacementChanges::added); apply removals first.

use alloc::vec::Vec;

use super::store::PlacementStore;
use crate::dirty;

/// The changes accumulated since the previous [`PlacementStore::evaluate`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementChanges {
    /// Frame index of the latest publish.
    pub frame_index: u64,
    /// Slots whose position changed.
    pub moved: Vec<u32>,
    /// Slots whose scale changed.
    pub scaled: Vec<u32>,
    /// Slots whose opacity changed.
    pub faded: Vec<u32>,
    /// Slots created since the last evaluate.
    pub added: Vec<u32>,
    /// Slots dropped since the last evaluate.
    pub removed: Vec<u32>,
    /// Whether the placement count changed.
    pub resized: bool,
}

impl PlacementChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.frame_index = 0;
        self.moved.clear();
        self.scaled.clear();
        self.faded.clear();
        self.added.clear();
        self.removed.clear();
        self.resized = false;
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty()
            && self.scaled.is_empty()
            && self.faded.is_empty()
            && self.added.is_empty()
            && self.removed.is_empty()
            && !self.resized
    }
}

impl PlacementStore {
    /// Drains pending changes.
    pub fn evaluate(&mut self) -> PlacementChanges {
        let mut changes = PlacementChanges::default();
        self.evaluate_into(&mut changes);
        changes
    }

    /// Like [`evaluate`](Self::evaluate), but reuses a caller-provided buffer
    /// to avoid allocation.
    pub fn evaluate_into(&mut self, changes: &mut PlacementChanges) {
        changes.clear();
        changes.frame_index = self.frame_index;

        changes.moved = self
            .dirty
            .drain(dirty::POSITION)
            .deterministic()
            .run()
            .collect();
        changes.scaled = self
            .dirty
            .drain(dirty::SCALE)
            .deterministic()
            .run()
            .collect();
        changes.faded = self
            .dirty
            .drain(dirty::OPACITY)
            .deterministic()
            .run()
            .collect();
        changes.added = self
            .dirty
            .drain(dirty::TOPOLOGY)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_removed, &mut changes.removed);
        changes.resized = core::mem::take(&mut self.resized);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;
    use crate::config::CloudConfig;
    use crate::pipeline::Placement;
    use crate::placement::ItemFrame;

    fn at(x: f64, scale: f64, opacity: f64) -> Placement {
        Placement {
            x,
            y: 0.0,
            scale,
            opacity,
            depth: 1.0,
        }
    }

    fn store() -> PlacementStore {
        PlacementStore::new(ItemFrame::from_config(&CloudConfig::default()))
    }

    #[test]
    fn first_publish_marks_everything() {
        let mut s = store();
        s.publish(&[at(0.0, 1.0, 1.0), at(1.0, 1.0, 1.0)]);
        let changes = s.evaluate();
        assert_eq!(changes.moved, vec![0, 1]);
        assert_eq!(changes.scaled, vec![0, 1]);
        assert_eq!(changes.faded, vec![0, 1]);
        assert_eq!(changes.added, vec![0, 1]);
        assert!(changes.resized);
        assert_eq!(changes.frame_index, 1);
    }

    #[test]
    fn evaluate_drains() {
        let mut s = store();
        s.publish(&[at(0.0, 1.0, 1.0)]);
        let _ = s.evaluate();
        let changes = s.evaluate();
        assert!(changes.is_empty(), "second evaluate should be empty: {changes:?}");
    }

    #[test]
    fn identical_frame_marks_nothing() {
        let mut s = store();
        let frame = [at(0.0, 1.0, 1.0), at(5.0, 0.5, 1.0)];
        s.publish(&frame);
        let _ = s.evaluate();
        s.publish(&frame);
        assert!(s.evaluate().is_empty());
    }

    #[test]
    fn channels_are_independent() {
        let mut s = store();
        s.publish(&[at(0.0, 1.0, 1.0), at(5.0, 1.0, 1.0), at(9.0, 1.0, 1.0)]);
        let _ = s.evaluate();

        s.publish(&[at(1.0, 1.0, 1.0), at(5.0, 0.7, 1.0), at(9.0, 1.0, 0.3)]);
        let changes = s.evaluate();
        assert_eq!(changes.moved, vec![0]);
        assert_eq!(changes.scaled, vec![1]);
        assert_eq!(changes.faded, vec![2]);
        assert!(changes.added.is_empty());
        assert!(!changes.resized);
    }

    #[test]
    fn shrinking_reports_removed_slots() {
        let mut s = store();
        s.publish(&[at(0.0, 1.0, 1.0), at(1.0, 1.0, 1.0), at(2.0, 1.0, 1.0)]);
        let _ = s.evaluate();
        s.publish(&[at(0.0, 1.0, 1.0)]);
        let changes = s.evaluate();
        assert_eq!(changes.removed, vec![1, 2]);
        assert!(changes.resized);
        assert!(changes.moved.is_empty());
    }

    #[test]
    fn evaluate_into_reuses_buffer() {
        let mut s = store();
        let mut changes = PlacementChanges::default();
        s.publish(&[at(0.0, 1.0, 1.0)]);
        s.evaluate_into(&mut changes);
        assert_eq!(changes.moved, vec![0]);
        s.evaluate_into(&mut changes);
        assert!(changes.is_empty());
        assert_eq!(changes.frame_index, 1);
    }
}
