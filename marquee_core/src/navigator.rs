// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Random-access navigation between elements.
//!
//! A [`Navigator`] answers "go to element K" with a [`ScheduledSeek`]: a
//! bounded move of the playhead from the current phase to K's marker time.
//! The target is shifted by one period when needed so the seek always
//! travels in the requested direction. Moving forward from the last element
//! to the first therefore continues past the end of the period instead of
//! rewinding across every element in between.
//!
//! Navigators only plan. The [`LoopPlayer`](crate::player::LoopPlayer) runs
//! the seek on its clock and commits the new current index when it lands.

use crate::state::LoopState;
use crate::timeline::LoopTimeline;

/// Easing curve applied to a seek's progress.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// Quadratic, accelerating.
    QuadIn,
    /// Quadratic, decelerating.
    #[default]
    QuadOut,
    /// Quadratic, accelerating then decelerating.
    QuadInOut,
    /// Cubic, accelerating.
    CubicIn,
    /// Cubic, decelerating.
    CubicOut,
    /// Cubic, accelerating then decelerating.
    CubicInOut,
}

impl Ease {
    /// Maps linear progress in `[0, 1]` onto eased progress in `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u / 2.0
                }
            }
            Self::CubicIn => t * t * t,
            Self::CubicOut => {
                let u = 1.0 - t;
                1.0 - u * u * u
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

/// How a seek should run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeekOptions {
    /// Wall-clock length of the seek in seconds. Zero lands on the next tick.
    pub duration: f64,
    /// Progress curve.
    pub ease: Ease,
    /// Resume the loop's own playback once the seek lands.
    pub resume: bool,
    /// Derive `duration` from the seek distance and the playback rate when
    /// the seek starts.
    pub paced: bool,
}

impl SeekOptions {
    /// Half a second, decelerating, staying paused on arrival.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            duration: 0.5,
            ease: Ease::QuadOut,
            resume: false,
            paced: false,
        }
    }

    /// Linear travel at the current playback rate, so the seek takes as long
    /// as playing the same stretch of timeline would.
    #[must_use]
    pub const fn paced() -> Self {
        Self {
            duration: 0.0,
            ease: Ease::Linear,
            resume: false,
            paced: true,
        }
    }

    /// Jump without animating.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            duration: 0.0,
            ..Self::new()
        }
    }

    /// Sets the duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the easing curve.
    #[must_use]
    pub const fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Sets whether playback resumes after the seek.
    #[must_use]
    pub const fn resuming(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }
}

impl Default for SeekOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Which way in time a seek moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Travel {
    /// Toward later times.
    Forward,
    /// Toward earlier times.
    Backward,
}

/// A planned move of the playhead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledSeek {
    from: f64,
    to: f64,
    target_index: usize,
    options: SeekOptions,
    elapsed: f64,
}

impl ScheduledSeek {
    /// Creates a seek that has not started yet.
    #[must_use]
    pub fn new(from: f64, to: f64, target_index: usize, options: SeekOptions) -> Self {
        Self {
            from,
            to,
            target_index,
            options,
            elapsed: 0.0,
        }
    }

    /// Fixes the duration of a [paced](SeekOptions::paced()) seek for travel
    /// at `rate` timeline seconds per second. Other seeks are unchanged.
    ///
    /// A zero or non-finite `rate` counts as unit speed.
    #[must_use]
    pub fn with_pace(mut self, rate: f64) -> Self {
        if self.options.paced {
            let rate = rate.abs();
            let rate = if rate.is_finite() && rate > 0.0 { rate } else { 1.0 };
            self.options.duration = self.distance().abs() / rate;
        }
        self
    }

    /// Start time (a phase inside the period).
    #[must_use]
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Target time. May lie up to one period outside `[0, period)`.
    #[must_use]
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Signed distance in seconds of timeline time.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.to - self.from
    }

    /// The element that becomes current when the seek lands.
    #[must_use]
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// The options the seek was planned with.
    #[must_use]
    pub fn options(&self) -> &SeekOptions {
        &self.options
    }

    /// Progress in `[0, 1]` before easing.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.options.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.options.duration).clamp(0.0, 1.0)
        }
    }

    /// Timeline time the playhead should show now.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.from + self.distance() * self.options.ease.apply(self.progress())
    }

    /// Whether the seek has reached its target.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Moves the seek forward by `dt` wall-clock seconds and returns the
    /// timeline time to show.
    pub fn advance(&mut self, dt: f64) -> f64 {
        self.elapsed += dt.max(0.0);
        self.time()
    }
}

/// Plans seeks over a timeline from a given state.
#[derive(Clone, Copy, Debug)]
pub struct Navigator<'a> {
    timeline: &'a LoopTimeline,
    state: &'a LoopState,
    base_index: usize,
}

impl<'a> Navigator<'a> {
    /// Navigates relative to the state's current index.
    #[must_use]
    pub fn new(timeline: &'a LoopTimeline, state: &'a LoopState) -> Self {
        Self {
            timeline,
            state,
            base_index: state.current_index(),
        }
    }

    /// Navigates relative to `base_index` instead, e.g. the target of a seek
    /// that is still in flight.
    #[must_use]
    pub fn with_base_index(mut self, base_index: usize) -> Self {
        self.base_index = base_index % self.timeline.len();
        self
    }

    /// The index relative requests are resolved against.
    #[must_use]
    pub fn base_index(&self) -> usize {
        self.base_index
    }

    /// Seeks to element `target`, wrapped modulo the element count.
    ///
    /// Travel is forward when the unwrapped `target` is past the base
    /// index and backward otherwise, so `to_index(base + 1)` from the last
    /// element moves forward onto element zero.
    #[must_use]
    pub fn to_index(&self, target: isize, options: SeekOptions) -> ScheduledSeek {
        let travel = if target > self.base_index as isize {
            Travel::Forward
        } else {
            Travel::Backward
        };
        self.to_index_toward(target, travel, options)
    }

    /// Seeks to element `target`, traveling in the given direction.
    #[must_use]
    pub fn to_index_toward(
        &self,
        target: isize,
        travel: Travel,
        options: SeekOptions,
    ) -> ScheduledSeek {
        let len = self.timeline.len() as isize;
        let index = target.rem_euclid(len) as usize;
        let from = self.state.playhead().phase();
        let to = resolve_target_time(self.timeline, from, index, travel);
        ScheduledSeek::new(from, to, index, options)
    }

    /// Seeks to the element after the base index in playback order.
    ///
    /// When the loop runs reversed the next element is the one with the
    /// lower index, reached by moving backward in time.
    #[must_use]
    pub fn next(&self, options: SeekOptions) -> ScheduledSeek {
        self.to_index(self.base_index as isize + self.step(), options)
    }

    /// Seeks to the element before the base index in playback order.
    #[must_use]
    pub fn previous(&self, options: SeekOptions) -> ScheduledSeek {
        self.to_index(self.base_index as isize - self.step(), options)
    }

    fn step(&self) -> isize {
        if self.state.direction().is_reversed() {
            -1
        } else {
            1
        }
    }
}

/// Marker time of `index`, moved by one period if needed so that reaching
/// it from `current` travels in the requested direction.
#[must_use]
pub fn resolve_target_time(
    timeline: &LoopTimeline,
    current: f64,
    index: usize,
    travel: Travel,
) -> f64 {
    let marker = timeline.marker_time(index);
    match travel {
        Travel::Forward if marker <= current => marker + timeline.period(),
        Travel::Backward if marker > current => marker - timeline.period(),
        _ => marker,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::packed_row;
    use crate::state::Direction;
    use crate::timeline::LoopConfig;

    const EPS: f64 = 1e-9;

    fn four_by_hundred() -> LoopTimeline {
        LoopTimeline::build(&packed_row(&[100.0; 4]), &LoopConfig::new()).unwrap()
    }

    fn state_at(tl: &LoopTimeline, index: usize, time: f64) -> LoopState {
        let mut state = LoopState::new(tl.period(), Direction::Forward, false);
        state.current_index = index;
        state.playhead.set_time(time);
        state
    }

    #[test]
    fn wrapped_target_needs_no_adjustment() {
        let tl = four_by_hundred();
        let state = state_at(&tl, 0, 0.0);
        let seek = Navigator::new(&tl, &state).to_index(5, SeekOptions::new());
        assert_eq!(seek.target_index(), 1);
        assert_eq!(seek.to(), 1.0);
    }

    #[test]
    fn forward_past_last_element_continues_into_next_period() {
        let tl = four_by_hundred();
        let state = state_at(&tl, 3, 3.0);
        let nav = Navigator::new(&tl, &state);

        let seek = nav.to_index_toward(0, Travel::Forward, SeekOptions::new());
        assert_eq!(seek.to(), 4.0);

        let seek = nav.next(SeekOptions::new());
        assert_eq!(seek.target_index(), 0);
        assert_eq!(seek.to(), 4.0);
    }

    #[test]
    fn backward_request_moves_back_in_time() {
        let tl = four_by_hundred();
        let state = state_at(&tl, 3, 3.0);
        let seek = Navigator::new(&tl, &state).to_index(0, SeekOptions::new());
        assert_eq!(seek.to(), 0.0, "lower index travels backward directly");

        let state = state_at(&tl, 0, 0.0);
        let seek = Navigator::new(&tl, &state).previous(SeekOptions::new());
        assert_eq!(seek.target_index(), 3);
        assert_eq!(seek.to(), -1.0, "wraps back into the previous period");
    }

    #[test]
    fn negative_index_wraps_to_last() {
        let tl = four_by_hundred();
        let state = state_at(&tl, 2, 2.0);
        let seek = Navigator::new(&tl, &state).to_index(-1, SeekOptions::new());
        assert_eq!(seek.target_index(), 3);
        assert!(seek.distance() <= 0.0, "backward travel");
    }

    #[test]
    fn same_index_twice_is_zero_distance() {
        let tl = four_by_hundred();
        let mut state = state_at(&tl, 0, 0.0);
        let first = Navigator::new(&tl, &state).to_index(2, SeekOptions::new());
        state.playhead.set_time(first.to());
        state.current_index = first.target_index();

        let second = Navigator::new(&tl, &state).to_index(2, SeekOptions::new());
        assert_eq!(second.distance(), 0.0);
        assert!(second.is_finished() || second.options().duration > 0.0);
    }

    #[test]
    fn repeated_next_is_monotonic_and_returns_home() {
        let tl = four_by_hundred();
        for start in 0..tl.len() {
            let mut state = state_at(&tl, start, tl.marker_time(start));
            let mut last_total = state.playhead().total_time();
            for step in 1..=tl.len() {
                let seek = Navigator::new(&tl, &state).next(SeekOptions::instant());
                state.playhead.set_time(seek.to());
                state.playhead.rehome();
                state.current_index = seek.target_index();
                let total = state.playhead().total_time();
                assert!(
                    total > last_total,
                    "step {step} from {start}: {total} <= {last_total}"
                );
                last_total = total;
                if step < tl.len() {
                    assert_ne!(state.current_index(), start);
                }
            }
            assert_eq!(state.current_index(), start, "back home after n steps");
            assert!(
                (state.playhead().total_time() - (tl.marker_time(start) + tl.period())).abs()
                    < EPS,
                "exactly one period later"
            );
        }
    }

    #[test]
    fn reversed_next_steps_down_and_back_in_time() {
        let tl = four_by_hundred();
        let mut state = state_at(&tl, 1, 1.0);
        state.direction = Direction::Reversed;
        let seek = Navigator::new(&tl, &state).next(SeekOptions::new());
        assert_eq!(seek.target_index(), 0);
        assert_eq!(seek.to(), 0.0);
        let seek = Navigator::new(&tl, &state).previous(SeekOptions::new());
        assert_eq!(seek.target_index(), 2);
        assert_eq!(seek.to(), 2.0);
    }

    #[test]
    fn base_index_override_chains_requests() {
        let tl = four_by_hundred();
        let state = state_at(&tl, 0, 0.0);
        let seek = Navigator::new(&tl, &state)
            .with_base_index(1)
            .next(SeekOptions::new());
        assert_eq!(seek.target_index(), 2);
        assert_eq!(seek.to(), 2.0);
    }

    #[test]
    fn seek_eases_from_start_to_target() {
        let mut seek = ScheduledSeek::new(
            1.0,
            3.0,
            2,
            SeekOptions::new().with_duration(1.0).with_ease(Ease::Linear),
        );
        assert_eq!(seek.time(), 1.0);
        assert!((seek.advance(0.25) - 1.5).abs() < EPS);
        assert!(!seek.is_finished());
        assert_eq!(seek.advance(5.0), 3.0);
        assert!(seek.is_finished());
    }

    #[test]
    fn paced_seek_takes_distance_over_rate() {
        let seek = ScheduledSeek::new(3.0, 1.0, 1, SeekOptions::paced()).with_pace(-4.0);
        assert_eq!(seek.options().duration, 0.5);
        assert_eq!(seek.options().ease, Ease::Linear);

        let mut unit = ScheduledSeek::new(0.0, 2.0, 2, SeekOptions::paced()).with_pace(0.0);
        assert_eq!(unit.options().duration, 2.0, "stalled rate counts as unit");
        assert_eq!(unit.advance(0.5), 0.5);

        let fixed = ScheduledSeek::new(0.0, 2.0, 2, SeekOptions::new()).with_pace(4.0);
        assert_eq!(fixed.options().duration, 0.5, "unpaced seeks keep their duration");
    }

    #[test]
    fn instant_seek_is_finished_immediately() {
        let seek = ScheduledSeek::new(0.0, 2.0, 2, SeekOptions::instant());
        assert!(seek.is_finished());
        assert_eq!(seek.time(), 2.0);
    }

    #[test]
    fn eases_hit_their_endpoints() {
        let eases = [
            Ease::Linear,
            Ease::QuadIn,
            Ease::QuadOut,
            Ease::QuadInOut,
            Ease::CubicIn,
            Ease::CubicOut,
            Ease::CubicInOut,
        ];
        for ease in eases {
            assert_eq!(ease.apply(0.0), 0.0, "{ease:?} at 0");
            assert_eq!(ease.apply(1.0), 1.0, "{ease:?} at 1");
            assert!((ease.apply(0.5) - 0.5).abs() <= 0.375, "{ease:?} midpoint");
        }
        assert!(Ease::QuadOut.apply(0.5) > 0.5, "decelerating curve leads");
    }
}
