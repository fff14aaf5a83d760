// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plan: the item rectangles of one frame in draw order.

use alloc::vec::Vec;

use hexcloud_core::backend::Presenter;
use hexcloud_core::placement::{PlacementChanges, PlacementStore};
use kurbo::Rect;

use crate::damage::DamageRegion;

/// A single item draw in the render plan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderItem {
    /// Item index.
    pub index: usize,
    /// On-screen bounds in host coordinates, already scaled.
    pub bounds: Rect,
    /// Placement scale (0.0–1.0).
    pub scale: f64,
    /// Uniform opacity (0.0–1.0).
    pub opacity: f64,
}

/// The drawable items of one frame, ordered back to front.
///
/// Smaller items sit further from the viewer, so items are sorted by
/// ascending scale with ties broken by index. Only cells backed by an item
/// (`index < item_limit`) are included.
///
/// `RenderPlan` implements [`Presenter`], so it can be handed straight to
/// [`BubbleCloud::present`](hexcloud_core::cloud::BubbleCloud::present).
#[derive(Clone, Debug, Default)]
pub struct RenderPlan {
    item_limit: usize,
    items: Vec<RenderItem>,
    /// Bounds from the previous apply, indexed by item index.
    previous: Vec<Rect>,
    damage: DamageRegion,
    frame_index: u64,
    limit_changed: bool,
}

impl RenderPlan {
    /// Creates an empty plan that draws at most `item_limit` items.
    #[must_use]
    pub fn new(item_limit: usize) -> Self {
        Self {
            item_limit,
            ..Self::default()
        }
    }

    /// Changes how many items are drawn. The next apply damages the full
    /// viewport.
    pub fn set_item_limit(&mut self, item_limit: usize) {
        if item_limit != self.item_limit {
            self.item_limit = item_limit;
            self.limit_changed = true;
        }
    }

    /// Items in back-to-front order.
    #[must_use]
    pub fn items(&self) -> &[RenderItem] {
        &self.items
    }

    /// Damage accumulated since the last [`take_damage`](Self::take_damage).
    #[must_use]
    pub fn damage(&self) -> &DamageRegion {
        &self.damage
    }

    /// Returns the accumulated damage and resets it to
    /// [`DamageRegion::None`].
    ///
    /// Applies that are not followed by a take merge their damage, so a host
    /// that skips a repaint still redraws everything that changed.
    pub fn take_damage(&mut self) -> DamageRegion {
        core::mem::replace(&mut self.damage, DamageRegion::None)
    }

    /// Frame index of the store when the plan was last built.
    #[must_use]
    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    fn rebuild(&mut self, store: &PlacementStore) {
        self.items.clear();
        self.items.extend(
            store
                .iter()
                .take(self.item_limit)
                .filter_map(|(index, p)| {
                    let bounds = store.bounds(index).ok()?;
                    Some(RenderItem {
                        index,
                        bounds,
                        scale: p.scale,
                        opacity: p.opacity,
                    })
                }),
        );
        self.items.sort_by(|a, b| {
            a.scale
                .total_cmp(&b.scale)
                .then_with(|| a.index.cmp(&b.index))
        });
    }

    fn compute_damage(&self, store: &PlacementStore, changes: &PlacementChanges) -> DamageRegion {
        if changes.resized || self.limit_changed || self.previous.is_empty() {
            return DamageRegion::Full;
        }
        // Opacity is uniform, so any fade repaints everything.
        if !changes.faded.is_empty() {
            return DamageRegion::Full;
        }
        let mut damage = DamageRegion::None;
        let limit = self.item_limit.min(store.len());
        for &slot in changes.moved.iter().chain(&changes.scaled) {
            let index = slot as usize;
            if index >= limit {
                continue;
            }
            if let Some(old) = self.previous.get(index) {
                damage.add_rect(*old);
            }
            if let Ok(new) = store.bounds(index) {
                damage.add_rect(new);
            }
        }
        damage
    }
}

impl Presenter for RenderPlan {
    fn apply(&mut self, store: &PlacementStore, changes: &PlacementChanges) {
        let damage = self.compute_damage(store, changes);
        self.damage.merge(&damage);
        self.rebuild(store);

        self.previous.clear();
        self.previous.resize(store.len(), Rect::ZERO);
        for item in &self.items {
            self.previous[item.index] = item.bounds;
        }
        self.frame_index = changes.frame_index;
        self.limit_changed = false;
    }
}
