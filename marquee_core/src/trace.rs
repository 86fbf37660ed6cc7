// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for loop playback.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! the [`LoopPlayer`](crate::player::LoopPlayer) calls as it builds, ticks,
//! seeks and reacts to input. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! Every event carries `at`, the host time of the most recent frame tick
//! (zero before the first tick).

use crate::state::Direction;
use crate::time::HostTime;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a timeline is built or rebuilt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildEvent {
    /// Host time of the last tick.
    pub at: HostTime,
    /// Number of elements.
    pub elements: usize,
    /// Distance in pixels after which the pattern repeats.
    pub total_span: f64,
    /// Loop period in seconds.
    pub period: f64,
    /// Pixels per second at unit rate.
    pub pixels_per_second: f64,
}

/// Emitted once per evaluated frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameEvent {
    /// Host time of the tick.
    pub at: HostTime,
    /// Monotonic frame counter from the tick.
    pub frame_index: u64,
    /// Playhead phase in `[0, period)`.
    pub phase: f64,
    /// Effective signed rate this frame.
    pub rate: f64,
    /// Element at the lead position.
    pub lead_index: usize,
    /// Element navigation treats as current.
    pub current_index: usize,
}

/// Emitted when a seek is scheduled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeekEvent {
    /// Host time of the last tick.
    pub at: HostTime,
    /// Start time.
    pub from: f64,
    /// Target time, possibly one period outside `[0, period)`.
    pub to: f64,
    /// Element the seek lands on.
    pub target_index: usize,
    /// Seek length in seconds.
    pub duration: f64,
}

/// Emitted when a seek lands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeekCompleteEvent {
    /// Host time of the tick that finished the seek.
    pub at: HostTime,
    /// The new current index.
    pub target_index: usize,
    /// Re-homed phase after landing.
    pub phase: f64,
}

/// Emitted when an input event starts a rate session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateSessionEvent {
    /// Host time of the last tick.
    pub at: HostTime,
    /// The input delta.
    pub delta: f64,
    /// Multiplier the ramp starts from.
    pub start: f64,
    /// Peak multiplier.
    pub peak: f64,
    /// Multiplier after the session ends.
    pub settle: f64,
}

/// Emitted when the playback direction flips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReverseEvent {
    /// Host time of the last tick.
    pub at: HostTime,
    /// The new direction.
    pub direction: Direction,
    /// Phase at the flip (unchanged by it).
    pub phase: f64,
}

/// Emitted when the playhead re-homes across a period boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LapEvent {
    /// Host time of the tick.
    pub at: HostTime,
    /// Periods crossed by this re-home (negative running backward).
    pub crossed: i64,
    /// Lap counter after the re-home.
    pub laps: i64,
}

// ---------------------------------------------------------------------------
// TraceSink
// ---------------------------------------------------------------------------

/// Receives playback events.
///
/// All methods default to no-ops.
pub trait TraceSink {
    /// Called after a timeline is built.
    fn on_build(&mut self, e: &BuildEvent) {
        _ = e;
    }

    /// Called once per evaluated frame.
    fn on_frame(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called when a seek is scheduled.
    fn on_seek(&mut self, e: &SeekEvent) {
        _ = e;
    }

    /// Called when a seek lands.
    fn on_seek_complete(&mut self, e: &SeekCompleteEvent) {
        _ = e;
    }

    /// Called when input starts a rate session.
    fn on_rate_session(&mut self, e: &RateSessionEvent) {
        _ = e;
    }

    /// Called when playback reverses.
    fn on_reverse(&mut self, e: &ReverseEvent) {
        _ = e;
    }

    /// Called when the playhead wraps.
    fn on_lap(&mut self, e: &LapEvent) {
        _ = e;
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
/// When the `trace` feature is **off**, every method compiles to nothing.
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

    /// Emits a [`BuildEvent`].
    #[inline]
    pub fn build(&mut self, e: &BuildEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_build(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SeekEvent`].
    #[inline]
    pub fn seek(&mut self, e: &SeekEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_seek(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SeekCompleteEvent`].
    #[inline]
    pub fn seek_complete(&mut self, e: &SeekCompleteEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_seek_complete(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RateSessionEvent`].
    #[inline]
    pub fn rate_session(&mut self, e: &RateSessionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rate_session(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ReverseEvent`].
    #[inline]
    pub fn reverse(&mut self, e: &ReverseEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reverse(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`LapEvent`].
    #[inline]
    pub fn lap(&mut self, e: &LapEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_lap(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> FrameEvent {
        FrameEvent {
            at: HostTime(16_666_667),
            frame_index: 42,
            phase: 1.25,
            rate: 1.0,
            lead_index: 1,
            current_index: 0,
        }
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_frame(&sample_frame());
        sink.on_lap(&LapEvent {
            at: HostTime(0),
            crossed: 1,
            laps: 1,
        });
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.frame(&sample_frame());
        tracer.reverse(&ReverseEvent {
            at: HostTime(0),
            direction: Direction::Reversed,
            phase: 0.5,
        });
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            frames: Vec<u64>,
            seeks: Vec<usize>,
        }
        impl TraceSink for RecordingSink {
            fn on_frame(&mut self, e: &FrameEvent) {
                self.frames.push(e.frame_index);
            }
            fn on_seek(&mut self, e: &SeekEvent) {
                self.seeks.push(e.target_index);
            }
        }

        let mut sink = RecordingSink {
            frames: Vec::new(),
            seeks: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame(&sample_frame());
        tracer.seek(&SeekEvent {
            at: HostTime(0),
            from: 0.0,
            to: 1.0,
            target_index: 3,
            duration: 0.5,
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.frames, &[42]);
        assert_eq!(sink.seeks, &[3]);
    }
}
