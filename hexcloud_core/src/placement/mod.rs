// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement publishing.
//!
//! The [`PlacementStore`] holds the latest frame of per-item placements in
//! struct-of-arrays layout, indexed by item index. Every
//! [`publish`](PlacementStore::publish) replaces the frame and marks the slots
//! whose values changed on the matching [`dirty`](crate::dirty) channel:
//!
//! - **POSITION** — x or y changed.
//! - **SCALE** — scale changed.
//! - **OPACITY** — opacity changed.
//! - **TOPOLOGY** — the slot is new.
//!
//! [`evaluate`](PlacementStore::evaluate) drains those channels into
//! [`PlacementChanges`], which presenters
//! [consume](crate::backend::Presenter::apply) to update only what moved.

mod evaluate;
mod frame;
mod iter;
mod store;

pub use evaluate::PlacementChanges;
pub use frame::ItemFrame;
pub use iter::Placements;
pub use store::PlacementStore;
