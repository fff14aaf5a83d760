// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contract between the engine and its host.
//!
//! The host supplies two collaborators:
//!
//! - **Item source** — Implements [`ItemSource`]: how many items exist, an
//!   identifier per item, and where click notifications go. The engine owns
//!   the source for its lifetime.
//!
//! - **Presenter** — Implements [`Presenter`] to move, scale, and fade the
//!   host's item widgets from a [`PlacementStore`]. Presenters are passed per
//!   frame, so the same engine can drive a real view tree or a test double.
//!
//! Input events and frame ticks are delivered by the host as plain method
//! calls on [`BubbleCloud`](crate::cloud::BubbleCloud), together with the
//! host's current [`HostTime`](crate::time::HostTime).
//!
//! # Frame loop pseudocode
//!
//! ```rust,ignore
//! fn on_pointer(event: PointerEvent) {
//!     match event {
//!         Down(p) => cloud.pointer_down(p, now()),
//!         Move(p) => { cloud.pointer_move(p, now()); }
//!         Up(p) => cloud.pointer_up(p, now()),
//!         Cancel => cloud.pointer_cancel(now()),
//!     }
//!     schedule_frame();
//! }
//!
//! fn on_frame() {
//!     let animating = cloud.tick(now());
//!     cloud.present(&mut presenter);
//!     if animating {
//!         schedule_frame();
//!     }
//! }
//! ```

use crate::placement::{PlacementChanges, PlacementStore};

/// The collection of items shown in the cloud.
pub trait ItemSource {
    /// Opaque per-item identifier passed to click notifications.
    type Id;

    /// Number of items.
    fn item_count(&self) -> usize;

    /// Identifier of the item at `index`.
    ///
    /// Only called with `index < self.item_count()`.
    fn item_id(&self, index: usize) -> Self::Id;

    /// Called once per completed click gesture that lands on an item.
    fn item_clicked(&mut self, index: usize, id: Self::Id);
}

/// Applies evaluated placement changes to the host's item widgets.
pub trait Presenter {
    /// Applies `changes`, reading current placement values from `store` as
    /// needed.
    fn apply(&mut self, store: &PlacementStore, changes: &PlacementChanges);
}
