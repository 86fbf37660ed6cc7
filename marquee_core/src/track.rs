// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Piecewise-linear position tracks.
//!
//! Each element of a loop moves along a [`Track`]: a short, time-sorted list
//! of [`Segment`]s evaluated by linear interpolation. A segment only takes
//! effect once its start time is reached, so a later segment that begins at
//! a different value (the wrap from the exit edge to the entry edge) never
//! bleeds into the time range of the one before it.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// A linear transition of one value over `[start, end]` seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    /// Time at which the segment takes effect.
    pub start: f64,
    /// Time at which the segment reaches `to`.
    pub end: f64,
    /// Value at `start`.
    pub from: f64,
    /// Value at `end`.
    pub to: f64,
}

impl Segment {
    /// Creates a segment.
    #[must_use]
    pub const fn new(start: f64, end: f64, from: f64, to: f64) -> Self {
        Self {
            start,
            end,
            from,
            to,
        }
    }

    /// Duration in seconds.
    #[inline]
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Value at time `t`, clamped to the segment's endpoints.
    #[must_use]
    pub fn value_at(&self, t: f64) -> f64 {
        let span = self.duration();
        if span <= 0.0 {
            return self.to;
        }
        let progress = ((t - self.start) / span).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * progress
    }
}

/// Time-sorted segments for one element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    segments: Vec<Segment>,
}

impl Track {
    /// Creates an empty track.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Appends a segment.
    ///
    /// Segments must be pushed in start-time order.
    pub fn push(&mut self, segment: Segment) {
        debug_assert!(
            self.segments
                .last()
                .is_none_or(|last| last.start <= segment.start),
            "segments must be pushed in start-time order"
        );
        self.segments.push(segment);
    }

    /// Returns the segments in start-time order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Value at time `t`.
    ///
    /// The active segment is the last one whose start is at or before `t`.
    /// Before the first segment the track holds that segment's `from` value;
    /// an empty track evaluates to zero.
    #[must_use]
    pub fn value_at(&self, t: f64) -> f64 {
        let started = self.segments.partition_point(|s| s.start <= t);
        match started {
            0 => self.segments.first().map_or(0.0, |s| s.from),
            n => self.segments[n - 1].value_at(t),
        }
    }
}

/// Rounds `value` to the nearest multiple of `increment`.
///
/// With no increment the value passes through unchanged.
#[must_use]
pub fn snap(value: f64, increment: Option<f64>) -> f64 {
    match increment {
        Some(step) => (value / step).round() * step,
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap_track() -> Track {
        let mut track = Track::new();
        track.push(Segment::new(0.0, 2.0, 0.0, -200.0));
        track.push(Segment::new(2.0, 4.0, 200.0, 0.0));
        track
    }

    #[test]
    fn evaluates_within_segments() {
        let track = wrap_track();
        assert_eq!(track.value_at(0.0), 0.0);
        assert_eq!(track.value_at(1.0), -100.0);
        assert_eq!(track.value_at(3.0), 100.0);
        assert_eq!(track.value_at(4.0), 0.0);
    }

    #[test]
    fn later_segment_applies_from_its_start() {
        let track = wrap_track();
        assert!(track.value_at(1.999) < -199.0, "still exiting");
        assert_eq!(track.value_at(2.0), 200.0, "entry value at the wrap");
    }

    #[test]
    fn zero_length_segment_holds_target() {
        let seg = Segment::new(1.0, 1.0, 5.0, 9.0);
        assert_eq!(seg.value_at(1.0), 9.0);
    }

    #[test]
    fn before_first_segment_holds_from() {
        let mut track = Track::new();
        track.push(Segment::new(1.0, 2.0, 10.0, 20.0));
        assert_eq!(track.value_at(0.5), 10.0);
        assert_eq!(Track::new().value_at(3.0), 0.0);
    }

    #[test]
    fn snap_rounds_to_increment() {
        assert_eq!(snap(12.4, Some(1.0)), 12.0);
        assert_eq!(snap(12.6, Some(0.5)), 12.5);
        assert_eq!(snap(-3.3, Some(2.0)), -4.0);
        assert_eq!(snap(1.23, None), 1.23);
    }
}
