// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! The placement store marks per-index changes on independent channels (via
//! [`understory_dirty`]) each time a frame is published. Placements have no
//! parent/child relationship, so every channel is local-only: only the
//! marked index appears in the drain output.
//!
//! [`PlacementStore::evaluate`](crate::placement::PlacementStore::evaluate)
//! drains all channels and surfaces the results as
//! [`PlacementChanges`](crate::placement::PlacementChanges).

use understory_dirty::Channel;

/// Position (x or y) changed.
pub const POSITION: Channel = Channel::new(0);

/// Scale changed.
pub const SCALE: Channel = Channel::new(1);

/// Opacity changed.
pub const OPACITY: Channel = Channel::new(2);

/// Placement count changed; marked for every index added since the last
/// evaluate.
pub const TOPOLOGY: Channel = Channel::new(3);
