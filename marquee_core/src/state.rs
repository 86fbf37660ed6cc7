// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mutable playback state.
//!
//! A [`LoopTimeline`](crate::timeline::LoopTimeline) never changes after it
//! is built. Everything that does change while it plays lives here, in
//! [`LoopState`]: which element navigation considers current, which way the
//! loop runs, and the [`Playhead`].
//!
//! The playhead keeps its time inside `[0, period)` by *re-homing*: whenever
//! playback crosses either end of the period, whole periods are added or
//! removed and counted as laps. Positions only depend on the phase, so a
//! re-home is invisible, and the loop can run in either direction forever.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Which way the loop plays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Time runs forward; elements move left.
    #[default]
    Forward,
    /// Time runs backward; elements move right.
    Reversed,
}

impl Direction {
    /// `1.0` for forward, `-1.0` for reversed.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Reversed => -1.0,
        }
    }

    /// The opposite direction.
    #[inline]
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reversed,
            Self::Reversed => Self::Forward,
        }
    }

    /// Returns `true` for [`Direction::Reversed`].
    #[inline]
    #[must_use]
    pub const fn is_reversed(self) -> bool {
        matches!(self, Self::Reversed)
    }
}

/// Cursor into a periodic timeline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playhead {
    time: f64,
    period: f64,
    laps: i64,
}

impl Playhead {
    /// Creates a playhead at time zero.
    ///
    /// # Panics
    ///
    /// Panics if `period` is not finite and positive.
    #[must_use]
    pub fn new(period: f64) -> Self {
        assert!(
            period.is_finite() && period > 0.0,
            "playhead period must be finite and positive"
        );
        Self {
            time: 0.0,
            period,
            laps: 0,
        }
    }

    /// Raw cursor time. Inside `[0, period)` except while a seek is moving
    /// it across a period boundary.
    #[inline]
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Cursor time mapped onto `[0, period)`.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> f64 {
        crate::timeline::wrap_phase(self.time, self.period)
    }

    /// Period length in seconds.
    #[inline]
    #[must_use]
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Signed count of whole periods removed by re-homing.
    #[inline]
    #[must_use]
    pub fn laps(&self) -> i64 {
        self.laps
    }

    /// Unwrapped playback time: laps plus the raw cursor.
    #[must_use]
    pub fn total_time(&self) -> f64 {
        self.laps as f64 * self.period + self.time
    }

    /// Moves the cursor without re-homing.
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    /// Moves the cursor by `dt` seconds and re-homes.
    ///
    /// Returns the number of period boundaries crossed (negative when
    /// running backward).
    pub fn advance(&mut self, dt: f64) -> i64 {
        self.time += dt;
        self.rehome()
    }

    /// Brings the cursor back into `[0, period)` by whole periods.
    ///
    /// Returns the number of periods removed, which is also added to
    /// [`laps`](Self::laps).
    #[expect(
        clippy::cast_possible_truncation,
        reason = "lap counts are small whole numbers"
    )]
    pub fn rehome(&mut self) -> i64 {
        if self.time >= 0.0 && self.time < self.period {
            return 0;
        }
        let mut laps = (self.time / self.period).floor() as i64;
        let mut time = self.time - laps as f64 * self.period;
        // Rounding can leave the folded time a hair outside the period.
        if time >= self.period {
            time -= self.period;
            laps += 1;
        } else if time < 0.0 {
            time += self.period;
            laps -= 1;
        }
        self.time = time;
        self.laps += laps;
        laps
    }
}

/// Navigation and playback state for one playing loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopState {
    pub(crate) current_index: usize,
    pub(crate) direction: Direction,
    pub(crate) playhead: Playhead,
    pub(crate) paused: bool,
}

impl LoopState {
    /// State at the start of a period, on element zero.
    #[must_use]
    pub fn new(period: f64, direction: Direction, paused: bool) -> Self {
        Self {
            current_index: 0,
            direction,
            playhead: Playhead::new(period),
            paused,
        }
    }

    /// The element navigation treats as current.
    #[inline]
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Playback direction.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The cursor.
    #[inline]
    #[must_use]
    pub fn playhead(&self) -> &Playhead {
        &self.playhead
    }

    /// Whether the loop's own advance is suspended.
    #[inline]
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Flips the playback direction without moving the rendered phase.
    ///
    /// The cursor is re-homed first so that the new direction starts from a
    /// canonical time inside the period.
    pub fn reverse(&mut self) -> Direction {
        self.playhead.rehome();
        self.direction = self.direction.flipped();
        self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn advance_rehomes_forward_and_backward() {
        let mut p = Playhead::new(4.0);
        assert_eq!(p.advance(3.5), 0);
        assert_eq!(p.advance(1.0), 1, "crossed the end of the period");
        assert!((p.time() - 0.5).abs() < EPS);
        assert_eq!(p.laps(), 1);

        assert_eq!(p.advance(-1.0), -1, "crossed the start running backward");
        assert!((p.time() - 3.5).abs() < EPS);
        assert_eq!(p.laps(), 0);
    }

    #[test]
    fn total_time_is_continuous_across_rehomes() {
        let mut p = Playhead::new(2.0);
        let mut expected = 0.0;
        for _ in 0..25 {
            p.advance(0.37);
            expected += 0.37;
            assert!(
                (p.total_time() - expected).abs() < 1e-6,
                "{} vs {expected}",
                p.total_time()
            );
            assert!(p.time() >= 0.0 && p.time() < 2.0, "time {}", p.time());
        }
    }

    #[test]
    fn rehome_after_seek_past_the_end() {
        let mut p = Playhead::new(4.0);
        p.set_time(4.0);
        assert_eq!(p.rehome(), 1);
        assert_eq!(p.time(), 0.0);
        p.set_time(-1.0);
        assert_eq!(p.rehome(), -1);
        assert_eq!(p.time(), 3.0);
        assert_eq!(p.laps(), 0);
    }

    #[test]
    fn reversing_twice_restores_direction_and_phase() {
        let mut state = LoopState::new(4.0, Direction::Forward, false);
        state.playhead.set_time(5.25);
        let phase = state.playhead().phase();

        assert_eq!(state.reverse(), Direction::Reversed);
        assert!((state.playhead().phase() - phase).abs() < EPS);
        assert_eq!(state.reverse(), Direction::Forward);
        assert!((state.playhead().phase() - phase).abs() < EPS);
        assert!((state.playhead().total_time() - 5.25).abs() < EPS);
    }

    #[test]
    fn direction_helpers() {
        assert_eq!(Direction::Forward.sign(), 1.0);
        assert_eq!(Direction::Reversed.sign(), -1.0);
        assert_eq!(Direction::Forward.flipped(), Direction::Reversed);
        assert!(Direction::Reversed.is_reversed());
    }
}
