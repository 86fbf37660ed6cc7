// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`]. Floats are stored as their IEEE bit
//! patterns, so decoding is exact.

use marquee_core::state::Direction;
use marquee_core::time::HostTime;
use marquee_core::trace::{
    BuildEvent, FrameEvent, LapEvent, RateSessionEvent, ReverseEvent, SeekCompleteEvent,
    SeekEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_BUILD: u8 = 1;
const TAG_FRAME: u8 = 2;
const TAG_SEEK: u8 = 3;
const TAG_SEEK_COMPLETE: u8 = 4;
const TAG_RATE_SESSION: u8 = 5;
const TAG_REVERSE: u8 = 6;
const TAG_LAP: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_index(&mut self, v: usize) {
        self.write_u64(u64::try_from(v).unwrap_or(u64::MAX));
    }

    fn write_time(&mut self, t: HostTime) {
        self.write_u64(t.ticks());
    }

    fn write_direction(&mut self, d: Direction) {
        self.write_u8(match d {
            Direction::Forward => 0,
            Direction::Reversed => 1,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_build(&mut self, e: &BuildEvent) {
        self.write_u8(TAG_BUILD);
        self.write_time(e.at);
        self.write_index(e.elements);
        self.write_f64(e.total_span);
        self.write_f64(e.period);
        self.write_f64(e.pixels_per_second);
    }

    fn on_frame(&mut self, e: &FrameEvent) {
        self.write_u8(TAG_FRAME);
        self.write_time(e.at);
        self.write_u64(e.frame_index);
        self.write_f64(e.phase);
        self.write_f64(e.rate);
        self.write_index(e.lead_index);
        self.write_index(e.current_index);
    }

    fn on_seek(&mut self, e: &SeekEvent) {
        self.write_u8(TAG_SEEK);
        self.write_time(e.at);
        self.write_f64(e.from);
        self.write_f64(e.to);
        self.write_index(e.target_index);
        self.write_f64(e.duration);
    }

    fn on_seek_complete(&mut self, e: &SeekCompleteEvent) {
        self.write_u8(TAG_SEEK_COMPLETE);
        self.write_time(e.at);
        self.write_index(e.target_index);
        self.write_f64(e.phase);
    }

    fn on_rate_session(&mut self, e: &RateSessionEvent) {
        self.write_u8(TAG_RATE_SESSION);
        self.write_time(e.at);
        self.write_f64(e.delta);
        self.write_f64(e.start);
        self.write_f64(e.peak);
        self.write_f64(e.settle);
    }

    fn on_reverse(&mut self, e: &ReverseEvent) {
        self.write_u8(TAG_REVERSE);
        self.write_time(e.at);
        self.write_direction(e.direction);
        self.write_f64(e.phase);
    }

    fn on_lap(&mut self, e: &LapEvent) {
        self.write_u8(TAG_LAP);
        self.write_time(e.at);
        self.write_i64(e.crossed);
        self.write_i64(e.laps);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`BuildEvent`].
    Build(BuildEvent),
    /// A [`FrameEvent`].
    Frame(FrameEvent),
    /// A [`SeekEvent`].
    Seek(SeekEvent),
    /// A [`SeekCompleteEvent`].
    SeekComplete(SeekCompleteEvent),
    /// A [`RateSessionEvent`].
    RateSession(RateSessionEvent),
    /// A [`ReverseEvent`].
    Reverse(ReverseEvent),
    /// A [`LapEvent`].
    Lap(LapEvent),
}

impl RecordedEvent {
    /// Host time of the tick the event belongs to.
    #[must_use]
    pub fn at(&self) -> HostTime {
        match self {
            Self::Build(e) => e.at,
            Self::Frame(e) => e.at,
            Self::Seek(e) => e.at,
            Self::SeekComplete(e) => e.at,
            Self::RateSession(e) => e.at,
            Self::Reverse(e) => e.at,
            Self::Lap(e) => e.at,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_i64(&mut self) -> Option<i64> {
        self.take().map(i64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_index(&mut self) -> Option<usize> {
        usize::try_from(self.read_u64()?).ok()
    }

    fn read_time(&mut self) -> Option<HostTime> {
        self.read_u64().map(HostTime)
    }

    fn read_direction(&mut self) -> Option<Direction> {
        Some(match self.read_u8()? {
            0 => Direction::Forward,
            _ => Direction::Reversed,
        })
    }

    fn decode_build(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Build(BuildEvent {
            at: self.read_time()?,
            elements: self.read_index()?,
            total_span: self.read_f64()?,
            period: self.read_f64()?,
            pixels_per_second: self.read_f64()?,
        }))
    }

    fn decode_frame(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Frame(FrameEvent {
            at: self.read_time()?,
            frame_index: self.read_u64()?,
            phase: self.read_f64()?,
            rate: self.read_f64()?,
            lead_index: self.read_index()?,
            current_index: self.read_index()?,
        }))
    }

    fn decode_seek(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Seek(SeekEvent {
            at: self.read_time()?,
            from: self.read_f64()?,
            to: self.read_f64()?,
            target_index: self.read_index()?,
            duration: self.read_f64()?,
        }))
    }

    fn decode_seek_complete(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::SeekComplete(SeekCompleteEvent {
            at: self.read_time()?,
            target_index: self.read_index()?,
            phase: self.read_f64()?,
        }))
    }

    fn decode_rate_session(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RateSession(RateSessionEvent {
            at: self.read_time()?,
            delta: self.read_f64()?,
            start: self.read_f64()?,
            peak: self.read_f64()?,
            settle: self.read_f64()?,
        }))
    }

    fn decode_reverse(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Reverse(ReverseEvent {
            at: self.read_time()?,
            direction: self.read_direction()?,
            phase: self.read_f64()?,
        }))
    }

    fn decode_lap(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Lap(LapEvent {
            at: self.read_time()?,
            crossed: self.read_i64()?,
            laps: self.read_i64()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_BUILD => self.decode_build(),
            TAG_FRAME => self.decode_frame(),
            TAG_SEEK => self.decode_seek(),
            TAG_SEEK_COMPLETE => self.decode_seek_complete(),
            TAG_RATE_SESSION => self.decode_rate_session(),
            TAG_REVERSE => self.decode_reverse(),
            TAG_LAP => self.decode_lap(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
