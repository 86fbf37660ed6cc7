// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//! Each frame feeds two counter tracks, `Playhead` (phase and rate) and
//! `Index` (lead and current element). Everything else is an instant event.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use marquee_core::time::{HostTime, Timebase};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
///
/// Timestamps are converted to microseconds using the provided [`Timebase`].
pub fn export(bytes: &[u8], timebase: Timebase, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for recorded in decode(bytes) {
        let ts = host_us(recorded.at(), timebase);
        match recorded {
            RecordedEvent::Build(e) => {
                events.push(instant(
                    "Build",
                    "Timeline",
                    ts,
                    json!({
                        "elements": e.elements,
                        "total_span": e.total_span,
                        "period": e.period,
                        "pixels_per_second": e.pixels_per_second,
                    }),
                ));
            }
            RecordedEvent::Frame(e) => {
                events.push(json!({
                    "ph": "C",
                    "name": "Playhead",
                    "cat": "Frame",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "phase": e.phase,
                        "rate": e.rate,
                    }
                }));
                events.push(json!({
                    "ph": "C",
                    "name": "Index",
                    "cat": "Frame",
                    "ts": ts,
                    "pid": 0,
                    "tid": 0,
                    "args": {
                        "lead": e.lead_index,
                        "current": e.current_index,
                    }
                }));
            }
            RecordedEvent::Seek(e) => {
                events.push(instant(
                    "Seek",
                    "Navigation",
                    ts,
                    json!({
                        "from": e.from,
                        "to": e.to,
                        "target_index": e.target_index,
                        "duration": e.duration,
                    }),
                ));
            }
            RecordedEvent::SeekComplete(e) => {
                events.push(instant(
                    "SeekComplete",
                    "Navigation",
                    ts,
                    json!({
                        "target_index": e.target_index,
                        "phase": e.phase,
                    }),
                ));
            }
            RecordedEvent::RateSession(e) => {
                events.push(instant(
                    "RateSession",
                    "Input",
                    ts,
                    json!({
                        "delta": e.delta,
                        "start": e.start,
                        "peak": e.peak,
                        "settle": e.settle,
                    }),
                ));
            }
            RecordedEvent::Reverse(e) => {
                events.push(instant(
                    "Reverse",
                    "Playback",
                    ts,
                    json!({
                        "direction": format!("{:?}", e.direction),
                        "phase": e.phase,
                    }),
                ));
            }
            RecordedEvent::Lap(e) => {
                events.push(instant(
                    "Lap",
                    "Playback",
                    ts,
                    json!({
                        "crossed": e.crossed,
                        "laps": e.laps,
                    }),
                ));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn instant(name: &str, cat: &str, ts: f64, args: Value) -> Value {
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": ts,
        "pid": 0,
        "tid": 0,
        "s": "t",
        "args": args,
    })
}

fn host_us(t: HostTime, timebase: Timebase) -> f64 {
    timebase.ticks_to_nanos(t.ticks()) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use marquee_core::navigator::SeekOptions;
    use marquee_core::player::LoopPlayer;
    use marquee_core::sample::packed_row;
    use marquee_core::tick::FrameTick;
    use marquee_core::timeline::LoopConfig;
    use marquee_core::trace::Tracer;

    #[test]
    fn export_produces_valid_json() {
        let mut rec = RecorderSink::new();
        let mut tracer = Tracer::new(&mut rec);
        let mut player =
            LoopPlayer::build(&packed_row(&[100.0; 3]), &LoopConfig::new(), &mut tracer).unwrap();
        player.tick(&FrameTick::from_nanos(1_000_000, 0), &mut tracer);
        player.next(SeekOptions::instant(), &mut tracer);
        player.tick(&FrameTick::from_nanos(17_666_667, 1), &mut tracer);
        drop(tracer);

        let mut out = Vec::new();
        export(rec.as_bytes(), Timebase::NANOS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        // Should parse as a JSON array.
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        let names: Vec<&str> = parsed
            .iter()
            .map(|e| e["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            [
                "Build",
                "Playhead",
                "Index",
                "Seek",
                "SeekComplete",
                "Playhead",
                "Index"
            ]
        );

        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["args"]["elements"], 3);
        assert_eq!(parsed[1]["ph"], "C");
        assert_eq!(parsed[1]["ts"], 1000.0);
        assert_eq!(parsed[4]["args"]["target_index"], 1);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], Timebase::NANOS, &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
