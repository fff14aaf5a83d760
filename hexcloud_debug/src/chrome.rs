// Copyright 2026 the Hexcloud Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] takes events recorded by a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//! Animation runs become duration slices on one track per animation kind;
//! everything else is an instant event. The effective pan is also exported as
//! a counter track.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use hexcloud_core::animation::AnimationKind;
use hexcloud_core::time::HostTime;

use crate::recorder::RecordedEvent;

const TID_INPUT: u32 = 0;
const TID_LAYOUT: u32 = 1;
const TID_ENTRY: u32 = 2;
const TID_INERTIA: u32 = 3;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    let mut out: Vec<Value> = Vec::new();
    // Rich events carry no time of their own; they inherit the last seen.
    let mut last_ts = 0.0;

    for recorded in events {
        match recorded {
            RecordedEvent::Gesture(e) => {
                last_ts = us(e.time);
                out.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.to),
                    "cat": "Gesture",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": TID_INPUT,
                    "s": "t",
                    "args": {
                        "from": format!("{:?}", e.from),
                        "x": e.position.x,
                        "y": e.position.y,
                    }
                }));
            }
            RecordedEvent::AnimationStart(e) => {
                last_ts = us(e.time);
                out.push(json!({
                    "ph": "B",
                    "name": kind_name(e.token.kind),
                    "cat": "Animation",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": kind_tid(e.token.kind),
                    "args": {
                        "generation": e.token.generation,
                        "duration_ms": e.duration.as_millis_f64(),
                        "steps": e.steps,
                    }
                }));
            }
            RecordedEvent::AnimationEnd(e) => {
                last_ts = us(e.time);
                out.push(json!({
                    "ph": "E",
                    "name": kind_name(e.token.kind),
                    "cat": "Animation",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": kind_tid(e.token.kind),
                    "args": {
                        "generation": e.token.generation,
                        "reason": format!("{:?}", e.reason),
                    }
                }));
            }
            RecordedEvent::Recompute(e) => {
                last_ts = us(e.time);
                out.push(json!({
                    "ph": "i",
                    "name": "Recompute",
                    "cat": "Layout",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": TID_LAYOUT,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "spacing": e.spacing,
                        "opacity": e.opacity,
                        "placement_count": e.placement_count,
                    }
                }));
                out.push(json!({
                    "ph": "C",
                    "name": "pan",
                    "ts": last_ts,
                    "pid": 0,
                    "args": {
                        "x": e.pan.x,
                        "y": e.pan.y,
                    }
                }));
            }
            RecordedEvent::ItemClick(e) => {
                last_ts = us(e.time);
                out.push(json!({
                    "ph": "i",
                    "name": "ItemClick",
                    "cat": "Gesture",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": TID_INPUT,
                    "s": "p",
                    "args": {
                        "index": e.index,
                        "x": e.position.x,
                        "y": e.position.y,
                    }
                }));
            }
            RecordedEvent::PlacementChanges {
                frame_index,
                changes,
            } => {
                out.push(json!({
                    "ph": "i",
                    "name": "PlacementChanges",
                    "cat": "Rich",
                    "ts": last_ts,
                    "pid": 0,
                    "tid": TID_LAYOUT,
                    "s": "t",
                    "args": {
                        "frame_index": frame_index,
                        "count": changes.len(),
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &out)?;
    Ok(())
}

fn us(t: HostTime) -> f64 {
    t.as_nanos() as f64 / 1000.0
}

fn kind_name(kind: AnimationKind) -> &'static str {
    match kind {
        AnimationKind::Entry => "Entry",
        AnimationKind::Inertia => "Inertia",
    }
}

fn kind_tid(kind: AnimationKind) -> u32 {
    match kind {
        AnimationKind::Entry => TID_ENTRY,
        AnimationKind::Inertia => TID_INERTIA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use hexcloud_core::animation::AnimationToken;
    use hexcloud_core::gesture::GesturePhase;
    use hexcloud_core::time::Duration;
    use hexcloud_core::trace::{
        AnimationEndEvent, AnimationStartEvent, EndReason, GestureEvent, TraceSink,
    };
    use kurbo::Point;

    fn parse(out: Vec<u8>) -> Vec<Value> {
        let json_str = String::from_utf8(out).unwrap();
        serde_json::from_str(&json_str).unwrap()
    }

    #[test]
    fn export_produces_valid_json() {
        let token = AnimationToken {
            kind: AnimationKind::Inertia,
            generation: 1,
        };
        let mut rec = RecorderSink::new();
        rec.on_gesture(&GestureEvent {
            from: GesturePhase::Scroll,
            to: GesturePhase::Resting,
            position: Point::new(10.0, 20.0),
            time: HostTime::from_millis(1),
        });
        rec.on_animation_start(&AnimationStartEvent {
            token,
            time: HostTime::from_millis(1),
            duration: Duration::from_millis(300),
            steps: 16,
        });
        rec.on_animation_end(&AnimationEndEvent {
            token,
            time: HostTime::from_millis(301),
            reason: EndReason::Finished,
        });

        let mut out = Vec::new();
        export(rec.events(), &mut out).unwrap();
        let parsed = parse(out);
        assert_eq!(parsed.len(), 3);

        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "Resting");
        assert_eq!(parsed[0]["ts"], 1000.0);

        assert_eq!(parsed[1]["ph"], "B");
        assert_eq!(parsed[1]["name"], "Inertia");
        assert_eq!(parsed[1]["tid"], TID_INERTIA);

        assert_eq!(parsed[2]["ph"], "E");
        assert_eq!(parsed[2]["args"]["reason"], "Finished");
        assert_eq!(parsed[2]["ts"], 301_000.0);
    }

    #[test]
    fn recompute_adds_pan_counter() {
        let mut rec = RecorderSink::new();
        rec.on_recompute(&hexcloud_core::trace::RecomputeEvent {
            frame_index: 2,
            spacing: 150.0,
            pan: kurbo::Vec2::new(3.0, -1.0),
            opacity: 0.5,
            placement_count: 37,
            time: HostTime::from_millis(500),
        });
        let mut out = Vec::new();
        export(rec.events(), &mut out).unwrap();
        let parsed = parse(out);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0]["args"]["placement_count"], 37);
        assert_eq!(parsed[1]["ph"], "C");
        assert_eq!(parsed[1]["args"]["x"], 3.0);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        assert!(parse(out).is_empty());
    }
}
