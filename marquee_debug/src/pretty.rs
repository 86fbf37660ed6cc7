// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Timestamps
//! are converted to microseconds using a [`Timebase`].

use std::io::Write;

use marquee_core::time::{HostTime, Timebase};
use marquee_core::trace::{
    BuildEvent, FrameEvent, LapEvent, RateSessionEvent, ReverseEvent, SeekCompleteEvent,
    SeekEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    timebase: Timebase,
    frames: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("timebase", &self.timebase)
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr(timebase: Timebase) -> Self {
        Self::new(Box::new(std::io::stderr()), timebase)
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, timebase: Timebase) -> Self {
        Self::with_writer(writer, timebase)
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W, timebase: Timebase) -> Self {
        Self {
            writer,
            timebase,
            frames: true,
        }
    }

    /// Skips per-frame lines, keeping only state changes.
    #[must_use]
    pub fn without_frames(mut self) -> Self {
        self.frames = false;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn host_us(&self, t: HostTime) -> f64 {
        self.timebase.ticks_to_nanos(t.ticks()) as f64 / 1000.0
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_build(&mut self, e: &BuildEvent) {
        let _ = writeln!(
            self.writer,
            "[build] at {:.1}µs elements={} span={:.1}px period={:.3}s pps={:.1}",
            self.host_us(e.at),
            e.elements,
            e.total_span,
            e.period,
            e.pixels_per_second,
        );
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        if !self.frames {
            return;
        }
        let _ = writeln!(
            self.writer,
            "[frame] frame={} at {:.1}µs phase={:.4}s rate={:+.3} lead={} current={}",
            e.frame_index,
            self.host_us(e.at),
            e.phase,
            e.rate,
            e.lead_index,
            e.current_index,
        );
    }

    fn on_seek(&mut self, e: &SeekEvent) {
        let _ = writeln!(
            self.writer,
            "[seek] at {:.1}µs {:.4}s -> {:.4}s target={} over {:.3}s",
            self.host_us(e.at),
            e.from,
            e.to,
            e.target_index,
            e.duration,
        );
    }

    fn on_seek_complete(&mut self, e: &SeekCompleteEvent) {
        let _ = writeln!(
            self.writer,
            "[seek:done] at {:.1}µs current={} phase={:.4}s",
            self.host_us(e.at),
            e.target_index,
            e.phase,
        );
    }

    fn on_rate_session(&mut self, e: &RateSessionEvent) {
        let _ = writeln!(
            self.writer,
            "[rate] at {:.1}µs delta={:+} {:+.3} -> {:+.3} -> {:+.3}",
            self.host_us(e.at),
            e.delta,
            e.start,
            e.peak,
            e.settle,
        );
    }

    fn on_reverse(&mut self, e: &ReverseEvent) {
        let _ = writeln!(
            self.writer,
            "[reverse] at {:.1}µs direction={:?} phase={:.4}s",
            self.host_us(e.at),
            e.direction,
            e.phase,
        );
    }

    fn on_lap(&mut self, e: &LapEvent) {
        let _ = writeln!(
            self.writer,
            "[lap] at {:.1}µs crossed={:+} laps={}",
            self.host_us(e.at),
            e.crossed,
            e.laps,
        );
    }
}
