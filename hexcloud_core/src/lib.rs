// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spherical hex-cloud layout and interaction engine.
//!
//! `hexcloud_core` arranges items on a hexagonal lattice and projects the
//! lattice onto a pseudo-spherical surface: cells near the centre appear
//! large and spread apart, cells further out shrink and crowd together, and
//! cells near the viewport edge shrink further and are pulled inward. Panning
//! follows the pointer with soft limits, a release coasts to a stop, and the
//! cloud fades and contracts into place on first show. It is `no_std`
//! compatible (with `alloc`) and holds no platform resources; a host feeds it
//! pointer events and frame times and reads back per-item placements.
//!
//! # Architecture
//!
//! ```text
//!   Host input ──► GestureTracker ──► ScrollState (raw, effective pan)
//!                        │                    ▲
//!                        │ release            │ coast
//!                        ▼                    │
//!                  AnimationDriver ───────────┘
//!                        │ entry (spacing, opacity)
//!                        ▼
//!   Lattice ──► pipeline::layout() ──► PlacementStore::publish()
//!                                             │
//!                                             ▼
//!                   PlacementStore::evaluate() ──► PlacementChanges ──► Presenter::apply()
//! ```
//!
//! **[`cloud`]** — [`BubbleCloud`](cloud::BubbleCloud), the owner of all
//! mutable state and the single entry point for hosts.
//!
//! **[`lattice`]** — Cube-coordinate cell generation in ring order.
//!
//! **[`geometry`]** and **[`pipeline`]** — The pure projection from a cell to
//! a [`Placement`](pipeline::Placement): offset layout, spherical warp, edge
//! scaling, and edge reflow.
//!
//! **[`gesture`]** and **[`scroll`]** — Click versus scroll classification
//! and the damped pan offset.
//!
//! **[`animation`]** — Entry and inertia runs with generation-checked tokens.
//!
//! **[`placement`]** and **[`dirty`]** — Struct-of-arrays frame storage with
//! per-channel change tracking via `understory_dirty`.
//!
//! **[`backend`]** — The [`ItemSource`](backend::ItemSource) and
//! [`Presenter`](backend::Presenter) traits a host implements.
//!
//! **[`trace`]** — [`TraceSink`](trace::TraceSink) trait and event types with
//! a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-placement
//!   change events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod animation;
pub mod backend;
pub mod cloud;
pub mod config;
pub mod dirty;
pub mod easing;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod lattice;
pub mod pipeline;
pub mod placement;
pub mod scroll;
pub mod time;
pub mod trace;

pub use error::{Error, Result};
