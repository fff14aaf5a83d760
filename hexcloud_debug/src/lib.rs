// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing, and Chrome trace export for hexcloud
//! diagnostics.
//!
//! This crate provides [`TraceSink`](hexcloud_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`] — typed in-memory recording.
//! - [`chrome::export`] — writes Chrome Trace Event Format JSON from
//!   recorded events.

pub mod chrome;
pub mod pretty;
pub mod recorder;
