// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The playback context.
//!
//! [`LoopPlayer`] owns one [`LoopTimeline`] together with everything that
//! changes while it plays: the [`LoopState`], the [`RateController`], the
//! seek in flight and the input queue. The host calls
//! [`tick`](LoopPlayer::tick) once per frame and hands the returned
//! [`LoopFrame`] to a [`Presenter`](crate::backend::Presenter).
//!
//! Each tick runs, in order:
//!
//! 1. Convert the host-time delta since the previous tick into seconds.
//! 2. Drain queued input into the rate controller.
//! 3. Advance the rate session.
//! 4. Advance the seek in flight, or else move the playhead by
//!    `dt * multiplier * direction` unless paused.
//! 5. Re-home the playhead into `[0, period)`.
//! 6. Evaluate every element at the new phase.
//!
//! Seeks run on wall-clock time and ignore the rate multiplier. Starting a
//! seek pauses the loop's own advance; it resumes on arrival only if the
//! seek's [`SeekOptions::resume`] is set.

use alloc::vec::Vec;

use crate::input::{DirectionalInput, InputQueue, InputSender};
use crate::navigator::{Navigator, ScheduledSeek, SeekOptions, Travel};
use crate::rate::{RateController, RatePolicy};
use crate::sample::ElementSample;
use crate::state::{Direction, LoopState};
use crate::tick::FrameTick;
use crate::time::HostTime;
use crate::timeline::{BuildError, ElementPosition, LoopConfig, LoopTimeline};
use crate::trace::{
    BuildEvent, FrameEvent, LapEvent, RateSessionEvent, ReverseEvent, SeekCompleteEvent,
    SeekEvent, Tracer,
};

/// Everything a presenter needs to render one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoopFrame {
    /// Frame counter of the tick that produced this frame.
    pub frame_index: u64,
    /// Host time of that tick.
    pub now: HostTime,
    /// Playhead phase in `[0, period)`.
    pub phase: f64,
    /// Effective signed rate of the loop's own advance.
    pub rate: f64,
    /// Element at the lead position.
    pub lead_index: usize,
    /// Element navigation treats as current.
    pub current_index: usize,
    /// Per-element translation, in element order.
    pub positions: Vec<ElementPosition>,
}

impl LoopFrame {
    /// Position of element `index`.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<&ElementPosition> {
        self.positions.get(index)
    }
}

/// Plays one loop.
#[derive(Debug)]
pub struct LoopPlayer {
    timeline: LoopTimeline,
    config: LoopConfig,
    state: LoopState,
    rate: RateController,
    seek: Option<ScheduledSeek>,
    input: InputQueue,
    last_tick: Option<HostTime>,
    now: HostTime,
    frame_index: u64,
    frame: LoopFrame,
}

impl LoopPlayer {
    /// Starts playing `timeline` with the playback settings from `config`.
    #[must_use]
    pub fn new(timeline: LoopTimeline, config: &LoopConfig) -> Self {
        let mut state = LoopState::new(timeline.period(), Direction::Forward, config.paused);
        if config.start_reversed {
            state.reverse();
        }
        let mut player = Self {
            timeline,
            config: *config,
            state,
            rate: RateController::default(),
            seek: None,
            input: InputQueue::new(),
            last_tick: None,
            now: HostTime(0),
            frame_index: 0,
            frame: LoopFrame::default(),
        };
        player.refresh_frame();
        player
    }

    /// Builds a timeline from `samples` and starts playing it.
    pub fn build(
        samples: &[ElementSample],
        config: &LoopConfig,
        tracer: &mut Tracer<'_>,
    ) -> Result<Self, BuildError> {
        let player = Self::new(LoopTimeline::build(samples, config)?, config);
        player.trace_build(tracer);
        Ok(player)
    }

    /// Replaces the rate policy, dropping any session in flight.
    #[must_use]
    pub fn with_rate_policy(mut self, policy: RatePolicy) -> Self {
        self.rate = RateController::new(policy);
        self
    }

    /// Rebuilds the timeline from fresh samples.
    ///
    /// Progress through the period, the current index, direction and paused
    /// state carry over. The seek in flight, the rate session and queued
    /// input are discarded, and the lap counter restarts. On error the
    /// previous timeline keeps playing untouched.
    pub fn rebuild(
        &mut self,
        samples: &[ElementSample],
        config: &LoopConfig,
        tracer: &mut Tracer<'_>,
    ) -> Result<(), BuildError> {
        let timeline = LoopTimeline::build(samples, config)?;
        let progress = self.state.playhead.phase() / self.timeline.period();

        let mut state = LoopState::new(
            timeline.period(),
            self.state.direction,
            self.state.paused,
        );
        state.playhead.set_time(progress * timeline.period());
        state.playhead.rehome();
        state.current_index = self.state.current_index % timeline.len();

        self.timeline = timeline;
        self.config = *config;
        self.state = state;
        self.seek = None;
        self.rate.cancel();
        self.input.clear();

        self.trace_build(tracer);
        self.refresh_frame();
        Ok(())
    }

    /// Advances playback to the time of `tick` and evaluates the frame.
    ///
    /// The first tick only establishes the clock and does not move the
    /// playhead.
    pub fn tick(&mut self, tick: &FrameTick, tracer: &mut Tracer<'_>) -> &LoopFrame {
        let dt = self.last_tick.map_or(0.0, |prev| tick.secs_since(prev));
        self.last_tick = Some(tick.now);
        self.now = tick.now;
        self.frame_index = tick.frame_index;
        self.step(dt, tracer);
        self.evaluate(tracer)
    }

    /// Advances playback by `dt` seconds without a host clock.
    ///
    /// Negative and non-finite deltas count as zero.
    pub fn advance(&mut self, dt: f64, tracer: &mut Tracer<'_>) -> &LoopFrame {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        self.frame_index = self.frame_index.wrapping_add(1);
        self.step(dt, tracer);
        self.evaluate(tracer)
    }

    /// Forgets the previous tick, so the next one does not move the
    /// playhead. Call after the tick source was suspended.
    pub fn reset_clock(&mut self) {
        self.last_tick = None;
    }

    /// Seeks to the next element in playback order. Returns its index.
    pub fn next(&mut self, options: SeekOptions, tracer: &mut Tracer<'_>) -> usize {
        let seek = self.navigator().next(options);
        self.start_seek(seek, tracer)
    }

    /// Seeks to the previous element in playback order. Returns its index.
    pub fn previous(&mut self, options: SeekOptions, tracer: &mut Tracer<'_>) -> usize {
        let seek = self.navigator().previous(options);
        self.start_seek(seek, tracer)
    }

    /// Seeks to element `index`, wrapped modulo the element count.
    ///
    /// Indices past the current one travel forward, others backward.
    /// Asking again for the element a running seek is headed to leaves
    /// that seek alone. Returns the wrapped index.
    pub fn to_index(
        &mut self,
        index: isize,
        options: SeekOptions,
        tracer: &mut Tracer<'_>,
    ) -> usize {
        if let Some(pending) = self.pending_target(index) {
            return pending;
        }
        let seek = self.navigator().to_index(index, options);
        self.start_seek(seek, tracer)
    }

    /// Seeks to element `index`, traveling in the given direction.
    pub fn to_index_toward(
        &mut self,
        index: isize,
        travel: Travel,
        options: SeekOptions,
        tracer: &mut Tracer<'_>,
    ) -> usize {
        if let Some(pending) = self.pending_target(index) {
            return pending;
        }
        let seek = self.navigator().to_index_toward(index, travel, options);
        self.start_seek(seek, tracer)
    }

    /// Flips the playback direction. The rendered phase does not move.
    pub fn reverse(&mut self, tracer: &mut Tracer<'_>) -> Direction {
        let direction = if self.seek.is_some() {
            // The seek owns the raw cursor until it lands.
            self.state.direction = self.state.direction.flipped();
            self.state.direction
        } else {
            let crossed = self.state.playhead.rehome();
            self.trace_lap(crossed, tracer);
            self.state.reverse()
        };
        tracer.reverse(&ReverseEvent {
            at: self.now,
            direction,
            phase: self.state.playhead.phase(),
        });
        direction
    }

    /// Resumes the loop's own advance. During a seek, takes effect when the
    /// seek lands.
    pub fn play(&mut self) {
        self.state.paused = false;
    }

    /// Suspends the loop's own advance. Seeks still run.
    pub fn pause(&mut self) {
        self.state.paused = true;
    }

    /// Feeds one directional input event straight to the rate controller.
    ///
    /// Returns `false` if the delta carried no direction.
    pub fn on_directional_input(&mut self, delta: f64, tracer: &mut Tracer<'_>) -> bool {
        let Some(session) = self.rate.on_directional_input(delta, self.state.direction) else {
            return false;
        };
        tracer.rate_session(&RateSessionEvent {
            at: self.now,
            delta,
            start: session.start,
            peak: session.peak,
            settle: session.settle,
        });
        true
    }

    /// A handle that queues input for the next tick.
    #[must_use]
    pub fn input_sender(&self) -> InputSender {
        self.input.sender()
    }

    /// Number of input events waiting for the next tick.
    #[must_use]
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// The element navigation treats as current.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.state.current_index()
    }

    /// The element at the lead position right now.
    #[must_use]
    pub fn lead_index(&self) -> usize {
        self.timeline.lead_index_at(self.phase())
    }

    /// Playhead phase in `[0, period)`.
    #[must_use]
    pub fn phase(&self) -> f64 {
        self.state.playhead.phase()
    }

    /// Effective signed rate of the loop's own advance, in timeline seconds
    /// per second. Zero while paused or seeking.
    #[must_use]
    pub fn rate(&self) -> f64 {
        if self.state.paused || self.seek.is_some() {
            0.0
        } else {
            self.rate.multiplier() * self.state.direction.sign()
        }
    }

    /// The rate multiplier, relative to the playback direction.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.rate.multiplier()
    }

    /// Every element's position at the current phase.
    pub fn positions(&self) -> impl Iterator<Item = ElementPosition> + '_ {
        self.timeline.positions_at(self.phase())
    }

    /// The most recently evaluated frame.
    #[must_use]
    pub fn frame(&self) -> &LoopFrame {
        &self.frame
    }

    /// Playback direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.state.direction()
    }

    /// Signed count of completed traversals.
    #[must_use]
    pub fn laps(&self) -> i64 {
        self.state.playhead.laps()
    }

    /// Unwrapped playback time in seconds.
    #[must_use]
    pub fn total_time(&self) -> f64 {
        self.state.playhead.total_time()
    }

    /// Whether the loop's own advance is suspended.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// The seek in flight, if any.
    #[must_use]
    pub fn seek(&self) -> Option<&ScheduledSeek> {
        self.seek.as_ref()
    }

    /// The timeline being played.
    #[must_use]
    pub fn timeline(&self) -> &LoopTimeline {
        &self.timeline
    }

    /// Navigation and playback state.
    #[must_use]
    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// The config the timeline was built with.
    #[must_use]
    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    fn navigator(&self) -> Navigator<'_> {
        let nav = Navigator::new(&self.timeline, &self.state);
        match &self.seek {
            Some(seek) => nav.with_base_index(seek.target_index()),
            None => nav,
        }
    }

    /// The wrapped `index` if a running seek is already headed there.
    fn pending_target(&self, index: isize) -> Option<usize> {
        let seek = self.seek.as_ref()?;
        let wrapped = index.rem_euclid(self.timeline.len() as isize) as usize;
        (wrapped == seek.target_index()).then_some(wrapped)
    }

    fn start_seek(&mut self, seek: ScheduledSeek, tracer: &mut Tracer<'_>) -> usize {
        let seek = seek.with_pace(self.rate.multiplier());
        let crossed = self.state.playhead.rehome();
        self.trace_lap(crossed, tracer);
        self.state.playhead.set_time(seek.from());
        self.state.paused = !seek.options().resume;
        tracer.seek(&SeekEvent {
            at: self.now,
            from: seek.from(),
            to: seek.to(),
            target_index: seek.target_index(),
            duration: seek.options().duration,
        });
        self.seek = Some(seek);
        seek.target_index()
    }

    fn step(&mut self, dt: f64, tracer: &mut Tracer<'_>) {
        while let Some(DirectionalInput { delta, .. }) = self.input.pop() {
            self.on_directional_input(delta, tracer);
        }
        let multiplier = self.rate.advance(dt);

        if let Some(mut seek) = self.seek {
            self.state.playhead.set_time(seek.advance(dt));
            if seek.is_finished() {
                self.seek = None;
                self.land(&seek, tracer);
            } else {
                self.seek = Some(seek);
            }
        } else if !self.state.paused {
            let crossed = self
                .state
                .playhead
                .advance(dt * multiplier * self.state.direction.sign());
            self.trace_lap(crossed, tracer);
        }
    }

    fn land(&mut self, seek: &ScheduledSeek, tracer: &mut Tracer<'_>) {
        self.state.current_index = seek.target_index();
        let crossed = self.state.playhead.rehome();
        self.trace_lap(crossed, tracer);
        tracer.seek_complete(&SeekCompleteEvent {
            at: self.now,
            target_index: seek.target_index(),
            phase: self.state.playhead.phase(),
        });
    }

    fn evaluate(&mut self, tracer: &mut Tracer<'_>) -> &LoopFrame {
        self.refresh_frame();
        tracer.frame(&FrameEvent {
            at: self.frame.now,
            frame_index: self.frame.frame_index,
            phase: self.frame.phase,
            rate: self.frame.rate,
            lead_index: self.frame.lead_index,
            current_index: self.frame.current_index,
        });
        &self.frame
    }

    fn refresh_frame(&mut self) {
        let phase = self.phase();
        let rate = self.rate();
        let lead_index = self.timeline.lead_index_at(phase);
        let current_index = self.state.current_index;

        let frame = &mut self.frame;
        frame.frame_index = self.frame_index;
        frame.now = self.now;
        frame.phase = phase;
        frame.rate = rate;
        frame.lead_index = lead_index;
        frame.current_index = current_index;
        frame.positions.clear();
        frame.positions.extend(self.timeline.positions_at(phase));
    }

    fn trace_build(&self, tracer: &mut Tracer<'_>) {
        tracer.build(&BuildEvent {
            at: self.now,
            elements: self.timeline.len(),
            total_span: self.timeline.total_span(),
            period: self.timeline.period(),
            pixels_per_second: self.timeline.pixels_per_second(),
        });
    }

    fn trace_lap(&self, crossed: i64, tracer: &mut Tracer<'_>) {
        if crossed != 0 {
            tracer.lap(&LapEvent {
                at: self.now,
                crossed,
                laps: self.state.playhead.laps(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::packed_row;

    const EPS: f64 = 1e-9;

    fn player() -> LoopPlayer {
        LoopPlayer::build(
            &packed_row(&[100.0; 4]),
            &LoopConfig::new(),
            &mut Tracer::none(),
        )
        .unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn starts_at_rest_on_element_zero() {
        let p = player();
        assert_eq!(p.phase(), 0.0);
        assert_eq!(p.current_index(), 0);
        assert_eq!(p.lead_index(), 0);
        assert!(p.frame().positions.iter().all(|pos| pos.x == 0.0));
        assert_eq!(p.frame().positions.len(), 4);
        assert_eq!(p.rate(), 1.0);
    }

    #[test]
    fn ticks_advance_by_host_time() {
        let mut p = player();
        let mut tracer = Tracer::none();
        let frame = p.tick(&FrameTick::from_nanos(1_000_000_000, 0), &mut tracer);
        assert_eq!(frame.phase, 0.0, "first tick only sets the clock");

        let frame = p.tick(&FrameTick::from_nanos(1_500_000_000, 1), &mut tracer);
        assert!(close(frame.phase, 0.5));
        assert_eq!(frame.frame_index, 1);
        for pos in &frame.positions {
            assert!(close(pos.x, -50.0), "element {} at {}", pos.index, pos.x);
        }
    }

    #[test]
    fn reset_clock_skips_the_gap() {
        let mut p = player();
        let mut tracer = Tracer::none();
        p.tick(&FrameTick::from_nanos(0, 0), &mut tracer);
        p.reset_clock();
        p.tick(&FrameTick::from_nanos(3_000_000_000, 1), &mut tracer);
        assert_eq!(p.phase(), 0.0);
        p.tick(&FrameTick::from_nanos(3_250_000_000, 2), &mut tracer);
        assert!(close(p.phase(), 0.25));
    }

    #[test]
    fn wraps_and_counts_laps() {
        let mut p = player();
        let mut tracer = Tracer::none();
        p.advance(4.5, &mut tracer);
        assert!(close(p.phase(), 0.5));
        assert_eq!(p.laps(), 1);
        assert!(close(p.total_time(), 4.5));
    }

    #[test]
    fn next_eases_to_marker_then_stays_paused() {
        let mut p = player();
        let mut tracer = Tracer::none();
        assert_eq!(p.next(SeekOptions::new(), &mut tracer), 1);
        assert_eq!(p.rate(), 0.0, "seeking suspends the loop's advance");

        p.advance(0.25, &mut tracer);
        assert!(p.phase() > 0.5 && p.phase() < 1.0, "eased: {}", p.phase());
        assert_eq!(p.current_index(), 0, "committed on arrival");

        p.advance(0.25, &mut tracer);
        assert!(p.seek().is_none());
        assert_eq!(p.current_index(), 1);
        assert!(close(p.phase(), 1.0));
        assert!(p.is_paused());

        p.advance(1.0, &mut tracer);
        assert!(close(p.phase(), 1.0), "paused after seek");
    }

    #[test]
    fn resuming_seek_continues_playback() {
        let mut p = player();
        let mut tracer = Tracer::none();
        p.to_index(2, SeekOptions::instant().resuming(true), &mut tracer);
        p.advance(0.0, &mut tracer);
        assert!(close(p.phase(), 2.0));
        p.advance(0.5, &mut tracer);
        assert!(close(p.phase(), 2.5));
    }

    #[test]
    fn repeated_next_chains_from_pending_target() {
        let mut p = player();
        let mut tracer = Tracer::none();
        assert_eq!(p.next(SeekOptions::new(), &mut tracer), 1);
        assert_eq!(p.next(SeekOptions::new(), &mut tracer), 2);
        assert_eq!(p.next(SeekOptions::new(), &mut tracer), 3);
        p.advance(1.0, &mut tracer);
        assert_eq!(p.current_index(), 3);
        assert!(close(p.phase(), 3.0));
    }

    #[test]
    fn next_from_last_element_moves_forward_across_the_seam() {
        let mut p = player();
        let mut tracer = Tracer::none();
        p.to_index(3, SeekOptions::instant(), &mut tracer);
        p.advance(0.0, &mut tracer);
        assert_eq!(p.current_index(), 3);

        p.next(SeekOptions::instant(), &mut tracer);
        assert_eq!(p.seek().map(ScheduledSeek::to), Some(4.0));
        p.advance(0.0, &mut tracer);
        assert_eq!(p.current_index(), 0);
        assert_eq!(p.phase(), 0.0);
        assert_eq!(p.laps(), 1, "crossed one seam forward");
    }

    #[test]
    fn same_index_twice_does_not_move() {
        let mut p = player();
        let mut tracer = Tracer::none();
        p.to_index(2, SeekOptions::instant(), &mut tracer);
        p.advance(0.0, &mut tracer);
        p.to_index(2, SeekOptions::new(), &mut tracer);
        assert_eq!(p.seek().map(ScheduledSeek::distance), Some(0.0));
    }

    #[test]
    fn same_index_while_seeking_keeps_the_running_seek() {
        let mut p = player();
        let mut tracer = Tracer::none();
        assert_eq!(p.to_index(2, SeekOptions::new(), &mut tracer), 2);
        p.advance(0.1, &mut tracer);
        let running = p.seek().copied();

        assert_eq!(p.to_index(2, SeekOptions::new(), &mut tracer), 2);
        assert_eq!(p.to_index(-2, SeekOptions::new(), &mut tracer), 2);
        assert_eq!(p.seek().copied(), running);
        assert_eq!(p.seek().map(ScheduledSeek::to), Some(2.0));

        p.advance(0.5, &mut tracer);
        assert_eq!(p.current_index(), 2);
        assert!(close(p.phase(), 2.0));
        assert_eq!(p.laps(), 0, "never went around the loop");
    }

    #[test]
    fn paced_seek_travels_at_playback_speed() {
        let mut p = player();
        let mut tracer = Tracer::none();
        p.to_index(2, SeekOptions::paced(), &mut tracer);
        assert_eq!(p.seek().map(|s| s.options().duration), Some(2.0));
        p.advance(1.0, &mut tracer);
        assert!(close(p.phase(), 1.0), "linear: {}", p.phase());
        p.advance(1.0, &mut tracer);
        assert_eq!(p.current_index(), 2);
        assert!(close(p.phase(), 2.0));
    }

    #[test]
    fn start_reversed_runs_backward() {
        let samples = packed_row(&[100.0; 4]);
        let config = LoopConfig::new().reversed(true);
        let mut p = LoopPlayer::build(&samples, &config, &mut Tracer::none()).unwrap();
        assert_eq!(p.direction(), Direction::Reversed);
        p.advance(0.5, &mut Tracer::none());
        assert!(close(p.phase(), 3.5));
        assert_eq!(p.laps(), -1);
    }

    #[test]
    fn reverse_keeps_the_rendered_phase() {
        let mut p = player();
        let mut tracer = Tracer::none();
        p.advance(1.25, &mut tracer);
        let before: Vec<f64> = p.positions().map(|pos| pos.x).collect();
        assert_eq!(p.reverse(&mut tracer), Direction::Reversed);
        let after: Vec<f64> = p.positions().map(|pos| pos.x).collect();
        assert_eq!(before, after);

        p.advance(0.25, &mut tracer);
        assert!(close(p.phase(), 1.0), "now running backward");
        assert_eq!(p.reverse(&mut tracer), Direction::Forward);
    }

    #[test]
    fn reversed_next_follows_playback_order() {
        let mut p = player();
        let mut tracer = Tracer::none();
        p.to_index(2, SeekOptions::instant(), &mut tracer);
        p.advance(0.0, &mut tracer);
        p.reverse(&mut tracer);
        assert_eq!(p.next(SeekOptions::instant(), &mut tracer), 1);
        assert_eq!(p.previous(SeekOptions::instant(), &mut tracer), 2);
    }

    #[test]
    fn queued_input_flips_the_loop_and_settles() {
        let mut p = player();
        let mut tracer = Tracer::none();
        let sender = p.input_sender();
        assert!(sender.send(DirectionalInput::new(-1.0, HostTime(0))));
        assert_eq!(p.pending_input(), 1);

        p.advance(0.0, &mut tracer);
        assert_eq!(p.pending_input(), 0);
        assert!(p.state().direction() == Direction::Forward);
        for _ in 0..20 {
            p.advance(0.1, &mut tracer);
        }
        assert!(close(p.multiplier(), -1.0), "settled at {}", p.multiplier());
        assert!(close(p.rate(), -1.0));
    }

    #[test]
    fn direct_input_ignores_zero_delta() {
        let mut p = player();
        assert!(!p.on_directional_input(0.0, &mut Tracer::none()));
        assert!(p.on_directional_input(3.0, &mut Tracer::none()));
    }

    #[test]
    fn pause_and_play() {
        let mut p = player();
        let mut tracer = Tracer::none();
        p.pause();
        p.advance(1.0, &mut tracer);
        assert_eq!(p.phase(), 0.0);
        assert_eq!(p.rate(), 0.0);
        p.play();
        p.advance(1.0, &mut tracer);
        assert!(close(p.phase(), 1.0));
    }

    #[test]
    fn rebuild_keeps_progress_and_drops_transients() {
        let mut p = player();
        let mut tracer = Tracer::none();
        p.advance(1.0, &mut tracer);
        p.next(SeekOptions::new(), &mut tracer);
        let sender = p.input_sender();
        sender.send(DirectionalInput::new(1.0, HostTime(0)));

        p.rebuild(&packed_row(&[200.0; 4]), &LoopConfig::new(), &mut tracer)
            .unwrap();
        assert_eq!(p.timeline().period(), 8.0);
        assert!(close(p.phase(), 2.0), "a quarter of the way through");
        assert!(p.seek().is_none());
        assert_eq!(p.pending_input(), 0);
        assert!(sender.is_connected(), "senders survive a rebuild");

        p.on_directional_input(-1.0, &mut tracer);
        p.advance(0.1, &mut tracer);
        assert!(p.rate.is_ramping());
        p.rebuild(&packed_row(&[200.0; 4]), &LoopConfig::new(), &mut tracer)
            .unwrap();
        assert!(!p.rate.is_ramping(), "rebuild cancels the rate session");
        assert_eq!(p.multiplier(), -1.0, "multiplier jumps to its settle value");
    }

    #[test]
    fn failed_rebuild_keeps_playing() {
        let mut p = player();
        let err = p
            .rebuild(&[], &LoopConfig::new(), &mut Tracer::none())
            .unwrap_err();
        assert_eq!(err, BuildError::EmptyInput);
        assert_eq!(p.timeline().period(), 4.0);
    }

    #[test]
    fn sender_outliving_player_reports_drop() {
        let p = player();
        let sender = p.input_sender();
        drop(p);
        assert!(!sender.send(DirectionalInput::new(1.0, HostTime(0))));
    }

    #[cfg(feature = "trace")]
    #[test]
    fn emits_events_in_order() {
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct Log(Vec<&'static str>);
        impl TraceSink for Log {
            fn on_build(&mut self, _: &BuildEvent) {
                self.0.push("build");
            }
            fn on_seek(&mut self, _: &SeekEvent) {
                self.0.push("seek");
            }
            fn on_seek_complete(&mut self, _: &SeekCompleteEvent) {
                self.0.push("landed");
            }
            fn on_lap(&mut self, _: &LapEvent) {
                self.0.push("lap");
            }
            fn on_frame(&mut self, _: &FrameEvent) {
                self.0.push("frame");
            }
        }

        let mut log = Log::default();
        let mut tracer = Tracer::new(&mut log);
        let mut p =
            LoopPlayer::build(&packed_row(&[100.0; 4]), &LoopConfig::new(), &mut tracer).unwrap();
        p.to_index(-1, SeekOptions::instant(), &mut tracer);
        p.advance(0.0, &mut tracer);
        drop(tracer);
        assert_eq!(log.0, ["build", "seek", "lap", "landed", "frame"]);
    }
}
