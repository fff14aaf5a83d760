// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render plans and damage tracking for hexcloud.
//!
//! This crate sits between [`hexcloud_core`]'s placement store and a
//! host's drawing code. It defines:
//!
//! - [`RenderItem`] — one item rectangle with its scale and opacity
//! - [`RenderPlan`] — the items of one frame in back-to-front order; a
//!   core [`Presenter`](hexcloud_core::backend::Presenter)
//! - [`DamageRegion`] — the part of the viewport that changed

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod damage;
mod plan;

pub use damage::DamageRegion;
pub use plan::{RenderItem, RenderPlan};
