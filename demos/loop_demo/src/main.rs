// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated frame loop that exercises playback and the diagnostics pipeline.
//!
//! Plays a four-element ticker for three seconds of synthetic 60 Hz frames,
//! scrolls against it, steps to the next element, reverses and jumps to the
//! last element. State changes go to a
//! [`PrettyPrintSink`](marquee_debug::pretty::PrettyPrintSink) on stdout and
//! everything is recorded by a
//! [`RecorderSink`](marquee_debug::recorder::RecorderSink), then exported as
//! a Chrome trace JSON file.

use std::fs::File;
use std::io::BufWriter;

use marquee_core::backend::{Presenter, RecordingPresenter};
use marquee_core::input::DirectionalInput;
use marquee_core::navigator::SeekOptions;
use marquee_core::player::LoopPlayer;
use marquee_core::sample::packed_row;
use marquee_core::tick::FrameTick;
use marquee_core::time::{HostTime, Timebase};
use marquee_core::timeline::LoopConfig;
use marquee_core::trace::{
    BuildEvent, FrameEvent, LapEvent, RateSessionEvent, ReverseEvent, SeekCompleteEvent,
    SeekEvent, TraceSink, Tracer,
};

use marquee_debug::pretty::PrettyPrintSink;
use marquee_debug::recorder::RecorderSink;

const FRAME_COUNT: u64 = 180;
/// 16.6ms refresh interval in nanoseconds (≈60 Hz).
const REFRESH_INTERVAL_NS: u64 = 16_666_667;

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_build(&mut self, e: &BuildEvent) {
        self.a.on_build(e);
        self.b.on_build(e);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.a.on_frame(e);
        self.b.on_frame(e);
    }

    fn on_seek(&mut self, e: &SeekEvent) {
        self.a.on_seek(e);
        self.b.on_seek(e);
    }

    fn on_seek_complete(&mut self, e: &SeekCompleteEvent) {
        self.a.on_seek_complete(e);
        self.b.on_seek_complete(e);
    }

    fn on_rate_session(&mut self, e: &RateSessionEvent) {
        self.a.on_rate_session(e);
        self.b.on_rate_session(e);
    }

    fn on_reverse(&mut self, e: &ReverseEvent) {
        self.a.on_reverse(e);
        self.b.on_reverse(e);
    }

    fn on_lap(&mut self, e: &LapEvent) {
        self.a.on_lap(e);
        self.b.on_lap(e);
    }
}

fn main() {
    let timebase = Timebase::NANOS;

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()), timebase).without_frames();
    let mut recorder = RecorderSink::new();
    let mut tee = Tee {
        a: &mut pretty,
        b: &mut recorder,
    };
    let mut tracer = Tracer::new(&mut tee);

    // -- player ------------------------------------------------------------
    let samples = packed_row(&[120.0, 80.0, 200.0, 150.0]);
    let config = LoopConfig::marquee();
    let mut player =
        LoopPlayer::build(&samples, &config, &mut tracer).expect("demo geometry is valid");
    let input = player.input_sender();
    let mut presenter = RecordingPresenter::default();

    // -- simulated loop ----------------------------------------------------
    let mut now_ticks: u64 = 1_000_000_000; // start at 1s

    for frame_index in 0..FRAME_COUNT {
        match frame_index {
            30 => {
                input.send(DirectionalInput::new(-120.0, HostTime(now_ticks)));
            }
            90 => {
                player.next(SeekOptions::new().resuming(true), &mut tracer);
            }
            120 => {
                player.reverse(&mut tracer);
            }
            150 => {
                player.to_index(-1, SeekOptions::paced().resuming(true), &mut tracer);
            }
            _ => {}
        }

        let tick = FrameTick {
            now: HostTime(now_ticks),
            timebase,
            frame_index,
        };
        presenter.apply(player.tick(&tick, &mut tracer));

        if frame_index % 30 == 0 {
            println!(
                "frame {frame_index:3}: phase={:.3}s rate={:+.2} lead={} x={:?}",
                player.phase(),
                player.rate(),
                player.lead_index(),
                presenter.translations,
            );
        }

        now_ticks += REFRESH_INTERVAL_NS;
    }

    // -- export Chrome trace -----------------------------------------------
    let path = "trace.json";
    let file = File::create(path).expect("failed to create trace.json");
    let mut writer = BufWriter::new(file);
    marquee_debug::chrome::export(recorder.as_bytes(), timebase, &mut writer)
        .expect("failed to write Chrome trace");

    println!(
        "Wrote {path} ({FRAME_COUNT} frames, {} laps)",
        player.laps()
    );
}
