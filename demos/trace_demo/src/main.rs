// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated bubble cloud session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Attaches a 19-item cloud, lets the entry animation play out, drags and
//! flings the pan, then clicks an item. Events go to both a
//! [`PrettyPrintSink`](hexcloud_debug::pretty::PrettyPrintSink) on stdout and
//! a [`RecorderSink`](hexcloud_debug::recorder::RecorderSink), which is then
//! exported as a Chrome trace JSON file.

use std::fs::File;
use std::io::{BufWriter, Stdout};

use hexcloud_core::backend::ItemSource;
use hexcloud_core::cloud::BubbleCloud;
use hexcloud_core::config::CloudConfig;
use hexcloud_core::time::HostTime;
use hexcloud_core::trace::{
    AnimationEndEvent, AnimationStartEvent, GestureEvent, ItemClickEvent, PlacementChange,
    RecomputeEvent, TraceSink,
};
use hexcloud_debug::pretty::PrettyPrintSink;
use hexcloud_debug::recorder::RecorderSink;
use hexcloud_render::{DamageRegion, RenderPlan};
use kurbo::{Point, Vec2};

/// 16ms frame interval in milliseconds.
const FRAME_MS: u64 = 16;

/// Counts presented frames by the kind of repaint they need.
#[derive(Debug, Default)]
struct DamageTally {
    full: usize,
    partial: usize,
    unchanged: usize,
}

impl DamageTally {
    fn record(&mut self, damage: &DamageRegion) {
        match damage {
            DamageRegion::Full => self.full += 1,
            DamageRegion::Rects(_) => self.partial += 1,
            DamageRegion::None => self.unchanged += 1,
        }
    }
}

/// Fixed list of item labels.
struct Labels {
    labels: Vec<String>,
}

impl ItemSource for Labels {
    type Id = String;

    fn item_count(&self) -> usize {
        self.labels.len()
    }

    fn item_id(&self, index: usize) -> String {
        self.labels[index].clone()
    }

    fn item_clicked(&mut self, index: usize, id: String) {
        println!("clicked item {index} ({id})");
    }
}

/// Forwards every event to a pretty printer and a recorder.
#[derive(Debug)]
struct Tee {
    pretty: PrettyPrintSink<Stdout>,
    recorder: RecorderSink,
}

impl TraceSink for Tee {
    fn on_gesture(&mut self, e: &GestureEvent) {
        self.pretty.on_gesture(e);
        self.recorder.on_gesture(e);
    }

    fn on_animation_start(&mut self, e: &AnimationStartEvent) {
        self.pretty.on_animation_start(e);
        self.recorder.on_animation_start(e);
    }

    fn on_animation_end(&mut self, e: &AnimationEndEvent) {
        self.pretty.on_animation_end(e);
        self.recorder.on_animation_end(e);
    }

    fn on_recompute(&mut self, e: &RecomputeEvent) {
        self.pretty.on_recompute(e);
        self.recorder.on_recompute(e);
    }

    fn on_item_click(&mut self, e: &ItemClickEvent) {
        self.pretty.on_item_click(e);
        self.recorder.on_item_click(e);
    }

    fn on_placement_changes(&mut self, frame_index: u64, changes: &[PlacementChange]) {
        self.pretty.on_placement_changes(frame_index, changes);
        self.recorder.on_placement_changes(frame_index, changes);
    }
}

fn main() {
    let source = Labels {
        labels: (0..19).map(|i| format!("item-{i}")).collect(),
    };
    let sink = Tee {
        pretty: PrettyPrintSink::with_writer(std::io::stdout()),
        recorder: RecorderSink::new(),
    };
    let mut plan = RenderPlan::new(source.item_count());
    let mut cloud = BubbleCloud::with_trace_sink(CloudConfig::new(1080.0, 1920.0), source, sink)
        .expect("reference configuration is valid");

    let mut now = 1_000;
    let mut tally = DamageTally::default();
    let mut frame = |cloud: &mut BubbleCloud<Labels, Tee>, plan: &mut RenderPlan, now: u64| {
        let animating = cloud.tick(HostTime::from_millis(now));
        cloud.present(plan);
        tally.record(&plan.take_damage());
        animating
    };

    // -- entry -------------------------------------------------------------
    cloud.attach(HostTime::from_millis(now));
    while frame(&mut cloud, &mut plan, now) {
        now += FRAME_MS;
    }

    // -- drag then fling ---------------------------------------------------
    let mut pos = Point::new(540.0, 960.0);
    cloud.pointer_down(pos, HostTime::from_millis(now));
    for _ in 0..8 {
        now += FRAME_MS;
        pos += Vec2::new(6.0, 2.0);
        cloud.pointer_move(pos, HostTime::from_millis(now));
        frame(&mut cloud, &mut plan, now);
    }
    cloud.pointer_up(pos, HostTime::from_millis(now));
    while frame(&mut cloud, &mut plan, now) {
        now += FRAME_MS;
    }

    println!(
        "frames: {} full, {} partial, {} unchanged",
        tally.full, tally.partial, tally.unchanged
    );

    // -- click the front-most item ----------------------------------------
    if let Some(front) = plan.items().last() {
        let target = front.bounds.center();
        now += 200;
        cloud.pointer_down(target, HostTime::from_millis(now));
        cloud.pointer_up(target, HostTime::from_millis(now + 40));
    }

    // -- export Chrome trace -----------------------------------------------
    let (_, sink) = cloud.into_parts();
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    hexcloud_debug::chrome::export(sink.recorder.events(), &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({} events)", sink.recorder.len());
}
