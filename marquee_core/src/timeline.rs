// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Loop timeline construction.
//!
//! [`LoopTimeline::build`] turns measured [`ElementSample`]s into a schedule
//! that repeats every [`period`](LoopTimeline::period) seconds. Every element
//! gets a two-segment [`Track`]:
//!
//! ```text
//!   x
//!   │ rest ╲                          ╱ rest
//!   │       ╲ (a) exit          (b) ╱
//!   │        ╲                   ╱
//!   │  exit   ╲       entry ────╯
//!   └──────────┴──────────────────────── t
//!   0      distance_to_loop / pps     period
//! ```
//!
//! Segment (a) slides the element left until its right edge reaches the
//! track origin; segment (b) starts one full span further right and slides
//! it back to where it started. Both ends of every track hold the resting
//! position, so phase `0` and phase `period` render identically.
//!
//! Each element also gets a [`Marker`]: the time at which its left edge
//! reaches the origin, which is what navigation seeks to.

use alloc::vec::Vec;
use core::fmt;

use kurbo::Affine;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::sample::ElementSample;
use crate::track::{Segment, Track, snap};

/// Build-time configuration for a loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopConfig {
    /// Playback speed at unit rate, in pixels per second.
    pub pixels_per_second: f64,
    /// Extra space after the last element before the first one repeats.
    pub padding_after_last: f64,
    /// Snap every computed position to a multiple of this many pixels.
    pub snap: Option<f64>,
    /// Start playing right-to-left.
    pub start_reversed: bool,
    /// Start paused.
    pub paused: bool,
}

impl LoopConfig {
    /// Speed used when none is configured.
    pub const DEFAULT_PIXELS_PER_SECOND: f64 = 100.0;

    /// Unpadded, unsnapped loop at the default speed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pixels_per_second: Self::DEFAULT_PIXELS_PER_SECOND,
            padding_after_last: 0.0,
            snap: None,
            start_reversed: false,
            paused: false,
        }
    }

    /// Settings for a text ticker: 30px gap before the seam, whole-pixel
    /// positions.
    #[must_use]
    pub const fn marquee() -> Self {
        Self {
            padding_after_last: 30.0,
            snap: Some(1.0),
            ..Self::new()
        }
    }

    /// Sets the speed from a unitless multiplier of the default speed.
    #[must_use]
    pub const fn with_speed(mut self, speed: f64) -> Self {
        self.pixels_per_second = speed * Self::DEFAULT_PIXELS_PER_SECOND;
        self
    }

    /// Sets whether playback starts reversed.
    #[must_use]
    pub const fn reversed(mut self, reversed: bool) -> Self {
        self.start_reversed = reversed;
        self
    }

    /// Sets whether playback starts paused.
    #[must_use]
    pub const fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    fn validate(&self) -> Result<(), BuildError> {
        if !self.pixels_per_second.is_finite() || self.pixels_per_second <= 0.0 {
            return Err(BuildError::InvalidConfig(ConfigField::PixelsPerSecond));
        }
        if !self.padding_after_last.is_finite() || self.padding_after_last < 0.0 {
            return Err(BuildError::InvalidConfig(ConfigField::PaddingAfterLast));
        }
        if let Some(step) = self.snap
            && (!step.is_finite() || step <= 0.0)
        {
            return Err(BuildError::InvalidConfig(ConfigField::Snap));
        }
        Ok(())
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// What was wrong with one element's geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryFault {
    /// The offset is NaN or infinite.
    NonFiniteOffset,
    /// The pre-existing translation is NaN or infinite.
    NonFiniteShift,
    /// The width is not a finite positive number.
    InvalidWidth,
    /// The scale factor is not a finite positive number.
    InvalidScale,
    /// The element starts before the first element or ends past the seam.
    OutsideSpan,
    /// The row is too wide to measure in `f64`.
    SpanOverflow,
}

/// Which configuration field was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigField {
    /// [`LoopConfig::pixels_per_second`].
    PixelsPerSecond,
    /// [`LoopConfig::padding_after_last`].
    PaddingAfterLast,
    /// [`LoopConfig::snap`].
    Snap,
}

/// Errors from [`LoopTimeline::build`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BuildError {
    /// No elements were supplied.
    EmptyInput,
    /// An element's geometry cannot be looped.
    InvalidGeometry {
        /// Position of the offending element.
        index: usize,
        /// What was wrong with it.
        fault: GeometryFault,
    },
    /// A configuration value is out of range.
    InvalidConfig(ConfigField),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("cannot build a loop from zero elements"),
            Self::InvalidGeometry { index, fault } => {
                let what = match fault {
                    GeometryFault::NonFiniteOffset => "offset is not finite",
                    GeometryFault::NonFiniteShift => "shift is not finite",
                    GeometryFault::InvalidWidth => "width must be finite and positive",
                    GeometryFault::InvalidScale => "scale must be finite and positive",
                    GeometryFault::OutsideSpan => "element lies outside the loop span",
                    GeometryFault::SpanOverflow => "loop span overflows",
                };
                write!(f, "element {index}: {what}")
            }
            Self::InvalidConfig(field) => {
                let what = match field {
                    ConfigField::PixelsPerSecond => "pixels per second must be finite and positive",
                    ConfigField::PaddingAfterLast => "padding must be finite and non-negative",
                    ConfigField::Snap => "snap increment must be finite and positive",
                };
                write!(f, "invalid loop config: {what}")
            }
        }
    }
}

impl core::error::Error for BuildError {}

/// The time at which an element's left edge reaches the track origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    /// Element index.
    pub index: usize,
    /// Seconds from the start of the period, in `[0, period)`.
    pub time: f64,
}

/// One element's rendered translation at some phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementPosition {
    /// Element index.
    pub index: usize,
    /// Horizontal translation in pixels, relative to the element's layout
    /// position.
    pub x: f64,
    /// Unscaled element width, for renderers that position in percent.
    pub width: f64,
}

impl ElementPosition {
    /// The translation as a percentage of the element's width.
    #[must_use]
    pub fn x_percent(&self) -> f64 {
        self.x / self.width * 100.0
    }

    /// The translation as a 2D affine transform.
    #[must_use]
    pub fn transform(&self) -> Affine {
        Affine::translate((self.x, 0.0))
    }
}

/// An immutable, repeatable schedule of per-element positions.
#[derive(Clone, Debug, PartialEq)]
pub struct LoopTimeline {
    total_span: f64,
    period: f64,
    pixels_per_second: f64,
    markers: Vec<Marker>,
    tracks: Vec<Track>,
    widths: Vec<f64>,
}

impl LoopTimeline {
    /// Builds a timeline from samples in visual order.
    ///
    /// Samples are indexed by their position in `samples`.
    pub fn build(samples: &[ElementSample], config: &LoopConfig) -> Result<Self, BuildError> {
        config.validate()?;
        let Some(last) = samples.last() else {
            return Err(BuildError::EmptyInput);
        };
        for (index, sample) in samples.iter().enumerate() {
            check_sample(index, sample)?;
        }

        let pps = config.pixels_per_second;
        let origin = samples[0].offset;
        let (_, last_loop) = distances(last, origin, config.snap);
        let total_span = last_loop + config.padding_after_last;
        if !total_span.is_finite() {
            return Err(BuildError::InvalidGeometry {
                index: samples.len() - 1,
                fault: GeometryFault::SpanOverflow,
            });
        }
        let period = total_span / pps;
        // Extreme speeds push the period out of range even though both
        // inputs are valid on their own.
        if !period.is_finite() || period <= 0.0 {
            return Err(BuildError::InvalidConfig(ConfigField::PixelsPerSecond));
        }

        let mut markers = Vec::with_capacity(samples.len());
        let mut tracks = Vec::with_capacity(samples.len());
        let mut widths = Vec::with_capacity(samples.len());
        for (index, sample) in samples.iter().enumerate() {
            let (to_start, to_loop) = distances(sample, origin, config.snap);
            if to_start < 0.0 || to_loop > total_span {
                return Err(BuildError::InvalidGeometry {
                    index,
                    fault: GeometryFault::OutsideSpan,
                });
            }
            let rest = snap(sample.shift, config.snap);
            let exit_at = to_loop / pps;

            let mut track = Track::new();
            track.push(Segment::new(
                0.0,
                exit_at,
                rest,
                snap(rest - to_loop, config.snap),
            ));
            track.push(Segment::new(
                exit_at,
                period,
                snap(rest - to_loop + total_span, config.snap),
                rest,
            ));

            markers.push(Marker {
                index,
                time: to_start / pps,
            });
            tracks.push(track);
            widths.push(sample.width);
        }

        Ok(Self {
            total_span,
            period,
            pixels_per_second: pps,
            markers,
            tracks,
            widths,
        })
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Always `false`: a timeline has at least one element.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Distance after which the pattern repeats, in pixels.
    #[must_use]
    pub fn total_span(&self) -> f64 {
        self.total_span
    }

    /// Duration of one repeat at unit rate, in seconds.
    #[must_use]
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Unit-rate speed the timeline was built with.
    #[must_use]
    pub fn pixels_per_second(&self) -> f64 {
        self.pixels_per_second
    }

    /// One marker per element, in element order.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Marker time for `index`, wrapped modulo the element count.
    #[must_use]
    pub fn marker_time(&self, index: usize) -> f64 {
        self.markers[index % self.len()].time
    }

    /// The position track for `index`.
    #[must_use]
    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Maps any time onto `[0, period)`.
    #[must_use]
    pub fn phase_of(&self, time: f64) -> f64 {
        wrap_phase(time, self.period)
    }

    /// Translation of element `index` at `time`, wrapped into the period.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    #[must_use]
    pub fn position_at(&self, index: usize, time: f64) -> f64 {
        self.tracks[index].value_at(self.phase_of(time))
    }

    /// Every element's position at `time`, in element order.
    pub fn positions_at(&self, time: f64) -> impl Iterator<Item = ElementPosition> + '_ {
        let phase = self.phase_of(time);
        self.tracks
            .iter()
            .zip(&self.widths)
            .enumerate()
            .map(move |(index, (track, &width))| ElementPosition {
                index,
                x: track.value_at(phase),
                width,
            })
    }

    /// The element whose marker most recently passed at `time`.
    ///
    /// Before the earliest marker of a period, the lead is still the element
    /// with the latest marker of the previous period.
    #[must_use]
    pub fn lead_index_at(&self, time: f64) -> usize {
        let phase = self.phase_of(time);
        let passed = self
            .markers
            .iter()
            .filter(|m| m.time <= phase)
            .max_by(|a, b| a.time.total_cmp(&b.time));
        let lead = passed.or_else(|| self.markers.iter().max_by(|a, b| a.time.total_cmp(&b.time)));
        lead.map_or(0, |m| m.index)
    }
}

/// Maps `time` onto `[0, period)`.
#[must_use]
pub fn wrap_phase(time: f64, period: f64) -> f64 {
    let mut phase = time - period * (time / period).floor();
    if phase < 0.0 {
        phase += period;
    }
    if phase >= period {
        phase -= period;
    }
    phase.max(0.0)
}

fn check_sample(index: usize, s: &ElementSample) -> Result<(), BuildError> {
    let fault = if !s.offset.is_finite() {
        GeometryFault::NonFiniteOffset
    } else if !s.shift.is_finite() {
        GeometryFault::NonFiniteShift
    } else if !s.width.is_finite() || s.width <= 0.0 {
        GeometryFault::InvalidWidth
    } else if !s.scale_x.is_finite() || s.scale_x <= 0.0 {
        GeometryFault::InvalidScale
    } else {
        return Ok(());
    };
    Err(BuildError::InvalidGeometry { index, fault })
}

/// Returns `(distance_to_start, distance_to_loop)` for one element.
fn distances(s: &ElementSample, origin: f64, step: Option<f64>) -> (f64, f64) {
    let to_start = s.offset + snap(s.shift, step) - origin;
    (to_start, to_start + s.effective_width())
}
