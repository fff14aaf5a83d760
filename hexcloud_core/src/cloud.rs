// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The interactive bubble cloud.
//!
//! [`BubbleCloud`] owns every piece of mutable state: the lattice, the pan,
//! the gesture tracker, the animation runs, and the placement store. Input
//! events, frame ticks, and animation steps are plain `&mut self` calls, and
//! each one that changes the layout inputs recomputes the full frame from a
//! single snapshot of (spacing, pan, opacity).

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::animation::{AnimationDriver, AnimationKind, AnimationToken, Sample, StepOutcome};
use crate::backend::{ItemSource, Presenter};
use crate::config::CloudConfig;
use crate::error::Result;
use crate::gesture::{GesturePhase, GestureTracker, MoveOutcome, Release};
use crate::lattice::Lattice;
use crate::pipeline::{LayoutParams, Placement, layout_into};
use crate::placement::{ItemFrame, PlacementStore};
use crate::scroll::ScrollState;
use crate::time::HostTime;
use crate::trace::{
    AnimationEndEvent, AnimationStartEvent, EndReason, GestureEvent, ItemClickEvent, NoopSink,
    RecomputeEvent, TraceSink, Tracer,
};

/// A pseudo-3D hexagonal item cloud driven by pointer input.
#[derive(Debug)]
pub struct BubbleCloud<S: ItemSource, T: TraceSink = NoopSink> {
    config: CloudConfig,
    source: S,
    lattice: Lattice,
    scroll: ScrollState,
    gesture: GestureTracker,
    animations: AnimationDriver,
    spacing: f64,
    opacity: f64,
    store: PlacementStore,
    scratch: Vec<Placement>,
    layout_requested: bool,
    sink: T,
}

impl<S: ItemSource> BubbleCloud<S> {
    /// Creates a cloud for `source`.
    ///
    /// The initial frame is laid out at the entry animation's starting
    /// spacing with full opacity, ready for [`attach`](Self::attach).
    pub fn new(config: CloudConfig, source: S) -> Result<Self> {
        Self::with_trace_sink(config, source, NoopSink)
    }
}

impl<S: ItemSource, T: TraceSink> BubbleCloud<S, T> {
    /// Creates a cloud that reports diagnostics to `sink`.
    pub fn with_trace_sink(config: CloudConfig, source: S, sink: T) -> Result<Self> {
        config.validate()?;
        let lattice = Lattice::covering(source.item_count(), config.rings);
        let mut cloud = Self {
            config,
            source,
            lattice,
            scroll: ScrollState::new(),
            gesture: GestureTracker::new(config.tuning.touch_slop),
            animations: AnimationDriver::new(),
            spacing: config.hex_radius + config.tuning.entry_spacing_offset,
            opacity: 1.0,
            store: PlacementStore::new(ItemFrame::from_config(&config)),
            scratch: Vec::new(),
            layout_requested: false,
            sink,
        };
        cloud.recompute(HostTime::default());
        Ok(cloud)
    }

    // -- Lifecycle --

    /// Starts (or restarts) the entry animation and lays out its first step.
    pub fn attach(&mut self, now: HostTime) -> AnimationToken {
        let (token, previous) =
            self.animations
                .start_entry(now, self.config.hex_radius, &self.config.tuning);
        self.trace_start(token, previous, now);
        if self.advance(token, now) {
            self.recompute(now);
        }
        token
    }

    /// Stops every animation run and abandons any gesture in progress.
    ///
    /// Outstanding tokens go stale, so late steps are no-ops.
    pub fn detach(&mut self, now: HostTime) {
        for kind in [AnimationKind::Entry, AnimationKind::Inertia] {
            if let Some(token) = self.animations.cancel(kind) {
                self.trace_end(token, now, EndReason::Cancelled);
            }
        }
        let from = self.gesture.phase();
        let position = self.gesture.last_position();
        self.gesture.reset();
        self.trace_gesture(from, GesturePhase::Resting, position, now);
    }

    // -- Input --

    /// Handles a pointer press.
    ///
    /// Any inertial run in flight is cancelled.
    pub fn pointer_down(&mut self, pos: Point, now: HostTime) {
        if let Some(token) = self.animations.cancel(AnimationKind::Inertia) {
            self.trace_end(token, now, EndReason::Cancelled);
        }
        let from = self.gesture.phase();
        self.gesture.pointer_down(pos);
        self.trace_gesture(from, GesturePhase::Click, pos, now);
    }

    /// Handles a pointer move.
    ///
    /// Returns `true` when this move turned the gesture into a scroll.
    pub fn pointer_move(&mut self, pos: Point, now: HostTime) -> bool {
        match self.gesture.pointer_move(pos) {
            MoveOutcome::Ignored | MoveOutcome::Pending => false,
            MoveOutcome::Scroll { delta, began } => {
                if began {
                    self.trace_gesture(GesturePhase::Click, GesturePhase::Scroll, pos, now);
                }
                self.scroll.drag_by(
                    delta,
                    self.config.scroll_range,
                    self.config.tuning.drag_damping,
                );
                self.recompute(now);
                began
            }
        }
    }

    /// Handles a pointer release at `pos`.
    ///
    /// A click notifies the item source if it lands on an item; a scroll
    /// starts an inertial run.
    pub fn pointer_up(&mut self, pos: Point, now: HostTime) {
        let from = self.gesture.phase();
        let release = self.gesture.pointer_up(pos);
        self.finish_gesture(from, release, pos, now);
    }

    /// Handles a cancelled pointer. Behaves like a release at the last known
    /// position.
    pub fn pointer_cancel(&mut self, now: HostTime) {
        let from = self.gesture.phase();
        let pos = self.gesture.last_position();
        let release = self.gesture.pointer_cancel();
        self.finish_gesture(from, release, pos, now);
    }

    fn finish_gesture(&mut self, from: GesturePhase, release: Release, pos: Point, now: HostTime) {
        self.trace_gesture(from, GesturePhase::Resting, pos, now);
        match release {
            Release::None => {}
            Release::Click(at) => {
                self.click_at(at, now);
            }
            Release::Fling(delta) => {
                let distance = delta * self.config.tuning.inertia_gain;
                let (token, previous) =
                    self.animations
                        .start_inertia(now, distance, &self.config.tuning);
                self.trace_start(token, previous, now);
            }
        }
    }

    fn click_at(&mut self, at: Point, now: HostTime) -> Option<usize> {
        let index = self.hit_test(at)?;
        let id = self.source.item_id(index);
        self.source.item_clicked(index, id);
        let e = ItemClickEvent {
            index,
            position: at,
            time: now,
        };
        self.tracer().item_click(&e);
        Some(index)
    }

    // -- Animation --

    /// Steps every active run at `now` and recomputes once if anything
    /// changed.
    ///
    /// Returns whether a run is still active, i.e. whether the host should
    /// schedule another frame.
    pub fn tick(&mut self, now: HostTime) -> bool {
        let mut tokens = [None; 2];
        for (slot, token) in tokens.iter_mut().zip(self.animations.active_tokens()) {
            *slot = Some(token);
        }
        let mut changed = false;
        for token in tokens.into_iter().flatten() {
            changed |= self.advance(token, now);
        }
        if changed {
            self.recompute(now);
        }
        self.animations.is_animating()
    }

    /// Steps the single run named by `token`.
    ///
    /// A superseded or cancelled token yields [`StepOutcome::Stale`] and
    /// leaves every piece of state untouched.
    pub fn step_animation(&mut self, token: AnimationToken, now: HostTime) -> StepOutcome {
        let outcome = self.animations.step(token, now);
        if self.apply_outcome(token, outcome, now) {
            self.recompute(now);
        }
        outcome
    }

    /// Whether any animation run is active.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animations.is_animating()
    }

    fn advance(&mut self, token: AnimationToken, now: HostTime) -> bool {
        let outcome = self.animations.step(token, now);
        self.apply_outcome(token, outcome, now)
    }

    /// Applies a step's sample to the layout inputs. Returns whether they
    /// changed.
    fn apply_outcome(&mut self, token: AnimationToken, outcome: StepOutcome, now: HostTime) -> bool {
        let sample = match outcome {
            StepOutcome::Stale => return false,
            StepOutcome::Advanced(sample) => sample,
            StepOutcome::Finished(sample) => {
                self.trace_end(token, now, EndReason::Finished);
                sample
            }
        };
        match sample {
            Sample::Entry { spacing, opacity } => {
                self.spacing = spacing;
                self.opacity = opacity;
                true
            }
            Sample::Inertia {
                displacement,
                steps_advanced,
            } => {
                if steps_advanced == 0 {
                    return false;
                }
                self.scroll.coast_by(
                    displacement,
                    self.config.scroll_range,
                    self.config.tuning.inertia_relax,
                    steps_advanced,
                );
                true
            }
        }
    }

    // -- Items --

    /// Re-reads the item count and regenerates the lattice if it no longer
    /// fits.
    ///
    /// The lattice keeps at least [`CloudConfig::rings`] rings.
    pub fn reload_items(&mut self, now: HostTime) {
        let lattice = Lattice::covering(self.source.item_count(), self.config.rings);
        if lattice.rings() != self.lattice.rings() {
            self.lattice = lattice;
            self.recompute(now);
        }
    }

    /// The item source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Mutable access to the item source. Call
    /// [`reload_items`](Self::reload_items) after changing its count.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    // -- Output --

    /// Number of published placements (the lattice size).
    #[must_use]
    pub fn placement_count(&self) -> usize {
        self.store.len()
    }

    /// The placement at `index`.
    pub fn placement_at(&self, index: usize) -> Result<Placement> {
        self.store.placement_at(index)
    }

    /// Index of the item under `point` in host coordinates.
    ///
    /// Only lattice cells backed by an item are considered; overlapping
    /// items resolve to the lowest index.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.store.hit_test(point, self.source.item_count())
    }

    /// Returns and clears the pending recompute request.
    ///
    /// Set whenever a new frame is published.
    pub fn take_layout_request(&mut self) -> bool {
        core::mem::take(&mut self.layout_requested)
    }

    /// Hands pending placement changes to `presenter` if a recompute was
    /// requested. Returns whether the presenter was called.
    pub fn present(&mut self, presenter: &mut dyn Presenter) -> bool {
        if !self.take_layout_request() {
            return false;
        }
        let changes = self.store.evaluate();
        #[cfg(feature = "trace-rich")]
        {
            let records = crate::trace::PlacementChange::collect(&changes);
            self.tracer().placement_changes(changes.frame_index, &records);
        }
        presenter.apply(&self.store, &changes);
        true
    }

    /// The placement store.
    #[must_use]
    pub fn store(&self) -> &PlacementStore {
        &self.store
    }

    // -- State --

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    /// The lattice.
    #[must_use]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Current gesture phase.
    #[must_use]
    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    /// Effective pan offset.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.scroll.effective()
    }

    /// Current hex spacing.
    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Current uniform opacity.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// The animation runs.
    #[must_use]
    pub fn animations(&self) -> &AnimationDriver {
        &self.animations
    }

    /// The trace sink.
    #[must_use]
    pub fn trace_sink(&self) -> &T {
        &self.sink
    }

    /// Mutable access to the trace sink.
    pub fn trace_sink_mut(&mut self) -> &mut T {
        &mut self.sink
    }

    /// Consumes the cloud, returning the item source and trace sink.
    pub fn into_parts(self) -> (S, T) {
        (self.source, self.sink)
    }

    // -- Internal helpers --

    fn recompute(&mut self, now: HostTime) {
        let params = LayoutParams::new(
            &self.config,
            self.spacing,
            self.scroll.effective(),
            self.opacity,
        );
        layout_into(&self.lattice, &params, &mut self.scratch);
        self.store.publish(&self.scratch);
        self.layout_requested = true;

        let e = RecomputeEvent {
            frame_index: self.store.frame_index(),
            spacing: self.spacing,
            pan: params.pan,
            opacity: self.opacity,
            placement_count: self.store.len(),
            time: now,
        };
        self.tracer().recompute(&e);
    }

    fn tracer(&mut self) -> Tracer<'_> {
        Tracer::new(&mut self.sink)
    }

    fn trace_gesture(&mut self, from: GesturePhase, to: GesturePhase, position: Point, time: HostTime) {
        if from == to {
            return;
        }
        let e = GestureEvent {
            from,
            to,
            position,
            time,
        };
        self.tracer().gesture(&e);
    }

    fn trace_start(&mut self, token: AnimationToken, previous: Option<AnimationToken>, now: HostTime) {
        if let Some(previous) = previous {
            self.trace_end(previous, now, EndReason::Superseded);
        }
        let Some(run) = self.animations.active(token.kind).copied() else {
            return;
        };
        let e = AnimationStartEvent {
            token,
            time: now,
            duration: run.duration,
            steps: run.steps,
        };
        self.tracer().animation_start(&e);
    }

    fn trace_end(&mut self, token: AnimationToken, time: HostTime, reason: EndReason) {
        let e = AnimationEndEvent {
            token,
            time,
            reason,
        };
        self.tracer().animation_end(&e);
    }
}
