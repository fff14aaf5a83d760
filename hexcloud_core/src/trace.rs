// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the engine.
//!
//! This module provides a [`TraceSink`] trait with one method per event the
//! engine reports: gesture transitions, animation lifecycle, layout
//! recomputation, and item clicks. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) — gates [`PlacementChange`] events plus
//!   the corresponding `TraceSink` method.

#[cfg(feature = "trace-rich")]
use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::animation::AnimationToken;
use crate::gesture::GesturePhase;
#[cfg(feature = "trace-rich")]
use crate::placement::PlacementChanges;
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Why an animation run stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The run reached its full duration.
    Finished,
    /// A new run of the same kind replaced it.
    Superseded,
    /// A pointer-down or reset stopped it.
    Cancelled,
}

/// Which property of a placement changed.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementField {
    /// x or y.
    Position,
    /// Scale.
    Scale,
    /// Opacity.
    Opacity,
    /// The slot was created.
    Added,
    /// The slot was dropped.
    Removed,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when the gesture phase changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureEvent {
    /// Phase before the event.
    pub from: GesturePhase,
    /// Phase after the event.
    pub to: GesturePhase,
    /// Pointer position that caused the transition.
    pub position: Point,
    /// Host time of the input event.
    pub time: HostTime,
}

/// Emitted when an animation run starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationStartEvent {
    /// Identity of the new run.
    pub token: AnimationToken,
    /// Start time.
    pub time: HostTime,
    /// Total length of the run.
    pub duration: Duration,
    /// Number of discrete steps.
    pub steps: u32,
}

/// Emitted when an animation run stops.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationEndEvent {
    /// Identity of the run that stopped.
    pub token: AnimationToken,
    /// Host time at which it stopped.
    pub time: HostTime,
    /// Why it stopped.
    pub reason: EndReason,
}

/// Emitted after a layout pass publishes a new frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecomputeEvent {
    /// Frame index of the published frame.
    pub frame_index: u64,
    /// Hex spacing used.
    pub spacing: f64,
    /// Effective pan used.
    pub pan: Vec2,
    /// Uniform opacity used.
    pub opacity: f64,
    /// Number of placements published.
    pub placement_count: usize,
    /// Host time of the pass.
    pub time: HostTime,
}

/// Emitted when a click lands on an item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemClickEvent {
    /// Index of the clicked item.
    pub index: usize,
    /// Click position.
    pub position: Point,
    /// Host time of the release.
    pub time: HostTime,
}

/// A per-frame placement change record.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlacementChange {
    /// Slot index of the placement that changed.
    pub index: u32,
    /// Which field changed.
    pub field: PlacementField,
}

#[cfg(feature = "trace-rich")]
impl PlacementChange {
    /// Flattens evaluated changes into one record per index and field.
    #[must_use]
    pub fn collect(changes: &PlacementChanges) -> Vec<Self> {
        let groups = [
            (&changes.removed, PlacementField::Removed),
            (&changes.added, PlacementField::Added),
            (&changes.moved, PlacementField::Position),
            (&changes.scaled, PlacementField::Scale),
            (&changes.faded, PlacementField::Opacity),
        ];
        groups
            .into_iter()
            .flat_map(|(indices, field)| {
                indices.iter().map(move |&index| Self { index, field })
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the gesture phase changes.
    fn on_gesture(&mut self, e: &GestureEvent) {
        _ = e;
    }

    /// Called when an animation run starts.
    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        _ = e;
    }

    /// Called when an animation run stops.
    fn on_animation_end(&mut self, e: &AnimationEndEvent) {
        _ = e;
    }

    /// Called after each layout pass.
    fn on_recompute(&mut self, e: &RecomputeEvent) {
        _ = e;
    }

    /// Called when a click lands on an item.
    fn on_item_click(&mut self, e: &ItemClickEvent) {
        _ = e;
    }

    /// Called with per-frame placement changes (requires `trace-rich`
    /// feature).
    #[cfg(feature = "trace-rich")]
    fn on_placement_changes(&mut self, frame_index: u64, changes: &[PlacementChange]) {
        _ = (frame_index, changes);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`GestureEvent`].
    #[inline]
    pub fn gesture(&mut self, e: &GestureEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_gesture(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AnimationStartEvent`].
    #[inline]
    pub fn animation_start(&mut self, e: &AnimationStartEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_animation_start(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AnimationEndEvent`].
    #[inline]
    pub fn animation_end(&mut self, e: &AnimationEndEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_animation_end(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RecomputeEvent`].
    #[inline]
    pub fn recompute(&mut self, e: &RecomputeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_recompute(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ItemClickEvent`].
    #[inline]
    pub fn item_click(&mut self, e: &ItemClickEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_item_click(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits placement changes (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn placement_changes(&mut self, frame_index: u64, changes: &[PlacementChange]) {
        if let Some(s) = &mut self.sink {
            s.on_placement_changes(frame_index, changes);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::AnimationKind;

    fn sample_gesture() -> GestureEvent {
        GestureEvent {
            from: GesturePhase::Resting,
            to: GesturePhase::Click,
            position: Point::new(10.0, 20.0),
            time: HostTime::from_millis(5),
        }
    }

    fn sample_token() -> AnimationToken {
        AnimationToken {
            kind: AnimationKind::Inertia,
            generation: 3,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_gesture(&sample_gesture());
        sink.on_animation_end(&AnimationEndEvent {
            token: sample_token(),
            time: HostTime(0),
            reason: EndReason::Finished,
        });
        sink.on_item_click(&ItemClickEvent {
            index: 5,
            position: Point::ORIGIN,
            time: HostTime(0),
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.gesture(&sample_gesture());
        tracer.animation_start(&AnimationStartEvent {
            token: sample_token(),
            time: HostTime(0),
            duration: Duration::from_millis(300),
            steps: 16,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            phases: Vec<GesturePhase>,
            ends: Vec<EndReason>,
        }
        impl TraceSink for RecordingSink {
            fn on_gesture(&mut self, e: &GestureEvent) {
                self.phases.push(e.to);
            }
            fn on_animation_end(&mut self, e: &AnimationEndEvent) {
                self.ends.push(e.reason);
            }
        }

        let mut sink = RecordingSink {
            phases: Vec::new(),
            ends: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.gesture(&sample_gesture());
        tracer.animation_end(&AnimationEndEvent {
            token: sample_token(),
            time: HostTime(1),
            reason: EndReason::Superseded,
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.phases, &[GesturePhase::Click]);
        assert_eq!(sink.ends, &[EndReason::Superseded]);
    }

    #[cfg(feature = "trace-rich")]
    #[test]
    fn placement_change_collect_orders_removals_first() {
        use alloc::vec;

        let changes = PlacementChanges {
            frame_index: 2,
            moved: vec![0, 1],
            scaled: vec![1],
            faded: vec![],
            added: vec![4],
            removed: vec![7],
            resized: true,
        };
        let records = PlacementChange::collect(&changes);
        assert_eq!(records.len(), 5);
        assert_eq!(
            records[0],
            PlacementChange {
                index: 7,
                field: PlacementField::Removed,
            }
        );
        assert_eq!(records[1].field, PlacementField::Added);
        assert_eq!(records[4].field, PlacementField::Scale);
    }
}
