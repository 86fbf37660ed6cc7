// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monotonic host time and conversion to playback seconds.
//!
//! Tick sources report [`HostTime`] in whatever unit the platform clock uses
//! (microseconds for `performance.now()`, nanoseconds for a simulated loop).
//! [`Timebase`] carries the rational factor from those ticks to nanoseconds,
//! and [`Duration`] is a tick delta that can be turned into the `f64` seconds
//! every loop timeline is expressed in.

use core::fmt;
use core::ops::{Add, Sub};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// A point in time expressed as platform-native monotonic ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostTime(pub u64);

impl HostTime {
    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Returns the duration between `self` and an earlier time, or zero if
    /// `earlier` is after `self`.
    ///
    /// Tick sources are monotonic, but a host that swaps tick sources (or a
    /// test that replays ticks) may hand in an older timestamp; playback must
    /// never run backwards because of that.
    #[inline]
    #[must_use]
    pub const fn saturating_duration_since(self, earlier: Self) -> Duration {
        Duration(self.0.saturating_sub(earlier.0))
    }

    /// Seconds elapsed since `earlier`, clamped at zero.
    #[inline]
    #[must_use]
    pub fn secs_since(self, earlier: Self, timebase: Timebase) -> f64 {
        self.saturating_duration_since(earlier).as_secs_f64(timebase)
    }
}

impl Add<Duration> for HostTime {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for HostTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: Self) -> Duration {
        Duration(self.0 - rhs.0)
    }
}

impl fmt::Debug for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostTime({})", self.0)
    }
}

/// Rational conversion factor from ticks to nanoseconds.
///
/// `nanoseconds = ticks * numer / denom`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timebase {
    /// Numerator of the ticks-to-nanoseconds ratio.
    pub numer: u32,
    /// Denominator of the ticks-to-nanoseconds ratio.
    pub denom: u32,
}

impl Timebase {
    /// Ticks are nanoseconds.
    pub const NANOS: Self = Self { numer: 1, denom: 1 };

    /// Ticks are microseconds (the web backend's `performance.now()` clock).
    pub const MICROS: Self = Self {
        numer: 1000,
        denom: 1,
    };

    /// Creates a new timebase with the given numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if `denom` is zero.
    #[inline]
    #[must_use]
    pub const fn new(numer: u32, denom: u32) -> Self {
        assert!(denom != 0, "timebase denominator must not be zero");
        Self { numer, denom }
    }

    /// Converts a tick count to nanoseconds.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "u128 intermediate avoids overflow; truncation back to u64 is intentional"
    )]
    pub const fn ticks_to_nanos(self, ticks: u64) -> u64 {
        let wide = ticks as u128 * self.numer as u128 / self.denom as u128;
        wide as u64
    }

    /// Converts a tick count to seconds.
    #[inline]
    #[must_use]
    pub fn ticks_to_secs(self, ticks: u64) -> f64 {
        self.ticks_to_nanos(ticks) as f64 / NANOS_PER_SEC
    }

    /// Converts seconds to the nearest lower tick count.
    ///
    /// Negative and non-finite inputs map to zero.
    #[inline]
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "seconds-scale values fit in u64 ticks; saturation on overflow is acceptable"
    )]
    pub fn secs_to_ticks(self, secs: f64) -> u64 {
        if !secs.is_finite() || secs <= 0.0 {
            return 0;
        }
        let nanos = secs * NANOS_PER_SEC;
        (nanos * f64::from(self.denom) / f64::from(self.numer)) as u64
    }
}

impl fmt::Debug for Timebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timebase({}/{})", self.numer, self.denom)
    }
}

/// A duration in platform-native ticks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Duration(pub u64);

impl Duration {
    /// A zero-length duration.
    pub const ZERO: Self = Self(0);

    /// Returns the raw tick value.
    #[inline]
    #[must_use]
    pub const fn ticks(self) -> u64 {
        self.0
    }

    /// Creates a duration from seconds in the given timebase.
    #[inline]
    #[must_use]
    pub fn from_secs_f64(secs: f64, timebase: Timebase) -> Self {
        Self(timebase.secs_to_ticks(secs))
    }

    /// Converts this duration to seconds.
    #[inline]
    #[must_use]
    pub fn as_secs_f64(self, timebase: Timebase) -> f64 {
        timebase.ticks_to_secs(self.0)
    }
}

impl fmt::Debug for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration({})", self.0)
    }
}
