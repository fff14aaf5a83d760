// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Times are
//! printed in milliseconds.

use std::io::Write;

use hexcloud_core::animation::{AnimationKind, AnimationToken};
use hexcloud_core::time::HostTime;
use hexcloud_core::trace::{
    AnimationEndEvent, AnimationStartEvent, GestureEvent, ItemClickEvent, PlacementChange,
    RecomputeEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.as_nanos() as f64 / 1_000_000.0
}

fn kind_name(kind: AnimationKind) -> &'static str {
    match kind {
        AnimationKind::Entry => "entry",
        AnimationKind::Inertia => "inertia",
    }
}

fn run_name(token: AnimationToken) -> String {
    format!("{}#{}", kind_name(token.kind), token.generation)
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_gesture(&mut self, e: &GestureEvent) {
        let _ = writeln!(
            self.writer,
            "[gesture] {:?} -> {:?} at ({:.1}, {:.1}) t={:.1}ms",
            e.from,
            e.to,
            e.position.x,
            e.position.y,
            ms(e.time),
        );
    }

    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        let _ = writeln!(
            self.writer,
            "[anim:start] {} duration={:.0}ms steps={} t={:.1}ms",
            run_name(e.token),
            e.duration.as_millis_f64(),
            e.steps,
            ms(e.time),
        );
    }

    fn on_animation_end(&mut self, e: &AnimationEndEvent) {
        let _ = writeln!(
            self.writer,
            "[anim:end] {} {:?} t={:.1}ms",
            run_name(e.token),
            e.reason,
            ms(e.time),
        );
    }

    fn on_recompute(&mut self, e: &RecomputeEvent) {
        let _ = writeln!(
            self.writer,
            "[layout] frame={} spacing={:.1} pan=({:.1}, {:.1}) opacity={:.2} count={} t={:.1}ms",
            e.frame_index,
            e.spacing,
            e.pan.x,
            e.pan.y,
            e.opacity,
            e.placement_count,
            ms(e.time),
        );
    }

    fn on_item_click(&mut self, e: &ItemClickEvent) {
        let _ = writeln!(
            self.writer,
            "[click] index={} at ({:.1}, {:.1}) t={:.1}ms",
            e.index,
            e.position.x,
            e.position.y,
            ms(e.time),
        );
    }

    fn on_placement_changes(&mut self, frame_index: u64, changes: &[PlacementChange]) {
        let _ = writeln!(
            self.writer,
            "[placements] frame={frame_index} changes={}",
            changes.len(),
        );
    }
}
