// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event it receives
//! as a [`RecordedEvent`], in arrival order.

use hexcloud_core::trace::{
    AnimationEndEvent, AnimationStartEvent, GestureEvent, ItemClickEvent, PlacementChange,
    RecomputeEvent, TraceSink,
};

/// A recorded trace event.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A gesture phase transition.
    Gesture(GestureEvent),
    /// An animation run started.
    AnimationStart(AnimationStartEvent),
    /// An animation run stopped.
    AnimationEnd(AnimationEndEvent),
    /// A frame was laid out and published.
    Recompute(RecomputeEvent),
    /// A click landed on an item.
    ItemClick(ItemClickEvent),
    /// Placement changes handed to a presenter.
    PlacementChanges {
        /// Frame index of the evaluated frame.
        frame_index: u64,
        /// The changes, removals first.
        changes: Vec<PlacementChange>,
    },
}

/// A [`TraceSink`] that records events in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Discards all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Indices of clicked items, in click order.
    pub fn clicked_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.events.iter().filter_map(|e| match e {
            RecordedEvent::ItemClick(click) => Some(click.index),
            _ => None,
        })
    }
}

impl TraceSink for RecorderSink {
    fn on_gesture(&mut self, e: &GestureEvent) {
        self.events.push(RecordedEvent::Gesture(*e));
    }

    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        self.events.push(RecordedEvent::AnimationStart(*e));
    }

    fn on_animation_end(&mut self, e: &AnimationEndEvent) {
        self.events.push(RecordedEvent::AnimationEnd(*e));
    }

    fn on_recompute(&mut self, e: &RecomputeEvent) {
        self.events.push(RecordedEvent::Recompute(*e));
    }

    fn on_item_click(&mut self, e: &ItemClickEvent) {
        self.events.push(RecordedEvent::ItemClick(*e));
    }

    fn on_placement_changes(&mut self, frame_index: u64, changes: &[PlacementChange]) {
        self.events.push(RecordedEvent::PlacementChanges {
            frame_index,
            changes: changes.to_vec(),
        });
    }
}

#[cfg(test)]
mod tests {
    use hexcloud_core::backend::ItemSource;
    use hexcloud_core::cloud::BubbleCloud;
    use hexcloud_core::config::CloudConfig;
    use hexcloud_core::gesture::GesturePhase;
    use hexcloud_core::time::HostTime;
    use hexcloud_core::trace::EndReason;
    use hexcloud_render::RenderPlan;

    use super::*;

    struct Nineteen;

    impl ItemSource for Nineteen {
        type Id = usize;

        fn item_count(&self) -> usize {
            19
        }

        fn item_id(&self, index: usize) -> usize {
            index
        }

        fn item_clicked(&mut self, _index: usize, _id: usize) {}
    }

    fn ms(v: u64) -> HostTime {
        HostTime::from_millis(v)
    }

    #[test]
    fn empty_recorder() {
        let rec = RecorderSink::new();
        assert!(rec.is_empty());
        assert_eq!(rec.clicked_indices().count(), 0);
    }

    #[test]
    fn records_a_session_in_order() {
        let config = CloudConfig::new(1000.0, 1000.0);
        let mut cloud = BubbleCloud::with_trace_sink(config, Nineteen, RecorderSink::new()).unwrap();
        cloud.trace_sink_mut().clear();

        cloud.attach(ms(0));
        cloud.tick(ms(1000));
        let centre = cloud.store().bounds(0).unwrap().center();
        cloud.pointer_down(centre, ms(1100));
        cloud.pointer_up(centre, ms(1120));

        let events = cloud.trace_sink().events();
        assert!(
            matches!(events[0], RecordedEvent::AnimationStart(e) if e.steps == 36),
            "got {:?}",
            events[0]
        );
        assert!(matches!(events[1], RecordedEvent::Recompute(e) if e.opacity == 0.0));
        assert!(matches!(
            events[2],
            RecordedEvent::AnimationEnd(e) if e.reason == EndReason::Finished
        ));
        assert!(matches!(events[3], RecordedEvent::Recompute(e) if e.spacing == 100.0));
        assert!(matches!(
            events[4],
            RecordedEvent::Gesture(e) if e.to == GesturePhase::Click
        ));
        assert!(matches!(
            events[5],
            RecordedEvent::Gesture(e) if e.to == GesturePhase::Resting
        ));
        assert_eq!(cloud.trace_sink().clicked_indices().collect::<Vec<_>>(), [0]);
    }

    #[test]
    fn records_placement_changes_on_present() {
        let config = CloudConfig::new(1000.0, 1000.0);
        let mut cloud = BubbleCloud::with_trace_sink(config, Nineteen, RecorderSink::new()).unwrap();
        let mut plan = RenderPlan::new(19);
        assert!(cloud.present(&mut plan));

        let Some(RecordedEvent::PlacementChanges {
            frame_index,
            changes,
        }) = cloud.trace_sink().events().last()
        else {
            panic!("expected a placement changes record");
        };
        assert_eq!(*frame_index, 1);
        // 37 new slots, each added, moved, scaled, and faded.
        assert_eq!(changes.len(), 37 * 4);
    }
}
