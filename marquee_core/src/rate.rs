// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input-reactive playback rate.
//!
//! Every directional input event (a wheel notch, a swipe) starts a
//! [`RateSession`]: the multiplier ramps to a peak, holds briefly, then
//! eases down to a settle value and the session ends. The sign of the
//! multiplier follows the input, so scrolling against the playback
//! direction makes the loop run backward and keep running that way at unit
//! speed once the burst has decayed.
//!
//! The multiplier is relative to the playback [`Direction`]: `1.0` means
//! "normal speed in the current direction".

use crate::navigator::Ease;
use crate::state::Direction;

/// How input deltas map onto playback direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InputMapping {
    /// Positive deltas (scrolling down) push the loop forward in time.
    #[default]
    Natural,
    /// Positive deltas push the loop backward in time.
    Inverted,
}

/// Shape of the rate burst triggered by one input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RatePolicy {
    /// Magnitude of the per-event factor.
    pub base_factor: f64,
    /// Peak multiplier is `factor * ramp_up_scale`.
    pub ramp_up_scale: f64,
    /// Seconds to reach the peak.
    pub ramp_up: f64,
    /// Seconds to hold the peak before ramping down.
    pub hold: f64,
    /// Settle multiplier is `factor / ramp_down_scale`.
    pub ramp_down_scale: f64,
    /// Seconds to go from the peak to the settle value.
    pub ramp_down: f64,
    /// Curve used by both ramps.
    pub ease: Ease,
    /// Sign convention for input deltas.
    pub mapping: InputMapping,
}

impl RatePolicy {
    /// A 6.25x burst over 0.2 s, held for 0.3 s, settling to unit speed
    /// over one second. Both ramps are linear.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            base_factor: 2.5,
            ramp_up_scale: 2.5,
            ramp_up: 0.2,
            hold: 0.3,
            ramp_down_scale: 2.5,
            ramp_down: 1.0,
            ease: Ease::Linear,
            mapping: InputMapping::Natural,
        }
    }

    /// Sets the input mapping.
    #[must_use]
    pub const fn with_mapping(mut self, mapping: InputMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Signed factor for an input `delta` while playing in `direction`.
    ///
    /// Returns `None` for deltas that carry no direction.
    #[must_use]
    pub fn factor_for(&self, delta: f64, direction: Direction) -> Option<f64> {
        if !delta.is_finite() || delta == 0.0 {
            return None;
        }
        let against = match direction {
            Direction::Forward => delta < 0.0,
            Direction::Reversed => delta > 0.0,
        };
        let negate = match self.mapping {
            InputMapping::Natural => against,
            InputMapping::Inverted => !against,
        };
        Some(if negate {
            -self.base_factor
        } else {
            self.base_factor
        })
    }

    /// Seconds from input to the end of the session.
    #[must_use]
    pub fn total_duration(&self) -> f64 {
        self.ramp_up + self.hold + self.ramp_down
    }
}

impl Default for RatePolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// One in-flight rate burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateSession {
    /// Multiplier when the session started.
    pub start: f64,
    /// Multiplier at the top of the ramp.
    pub peak: f64,
    /// Multiplier the session leaves behind.
    pub settle: f64,
    /// Seconds from `start` to `peak`.
    pub ramp_up: f64,
    /// Seconds spent at `peak`.
    pub hold: f64,
    /// Seconds from `peak` to `settle`.
    pub ramp_down: f64,
    /// Curve for both ramps.
    pub ease: Ease,
    elapsed: f64,
}

impl RateSession {
    /// Plans a session from the current multiplier for a signed `factor`.
    #[must_use]
    pub fn new(start: f64, factor: f64, policy: &RatePolicy) -> Self {
        Self {
            start,
            peak: factor * policy.ramp_up_scale,
            settle: factor / policy.ramp_down_scale,
            ramp_up: policy.ramp_up,
            hold: policy.hold,
            ramp_down: policy.ramp_down,
            ease: policy.ease,
            elapsed: 0.0,
        }
    }

    /// Seconds since the session started.
    #[must_use]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Whether the ramp down has completed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.ramp_up + self.hold + self.ramp_down
    }

    /// Multiplier at the current elapsed time.
    #[must_use]
    pub fn value(&self) -> f64 {
        let t = self.elapsed;
        if t < self.ramp_up {
            return lerp(self.start, self.peak, self.ease.apply(t / self.ramp_up));
        }
        let t = t - self.ramp_up;
        if t < self.hold {
            return self.peak;
        }
        let t = t - self.hold;
        if t < self.ramp_down {
            return lerp(self.peak, self.settle, self.ease.apply(t / self.ramp_down));
        }
        self.settle
    }

    /// Moves the session forward by `dt` seconds and returns the multiplier.
    pub fn advance(&mut self, dt: f64) -> f64 {
        self.elapsed += dt.max(0.0);
        self.value()
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Owns the playback rate multiplier and the session driving it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RateController {
    policy: RatePolicy,
    multiplier: f64,
    session: Option<RateSession>,
}

impl RateController {
    /// A controller resting at unit speed.
    #[must_use]
    pub fn new(policy: RatePolicy) -> Self {
        Self {
            policy,
            multiplier: 1.0,
            session: None,
        }
    }

    /// The policy in use.
    #[must_use]
    pub fn policy(&self) -> &RatePolicy {
        &self.policy
    }

    /// Current multiplier, relative to the playback direction.
    #[inline]
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// The session in flight, if any.
    #[must_use]
    pub fn session(&self) -> Option<&RateSession> {
        self.session.as_ref()
    }

    /// Whether a session is in flight.
    #[must_use]
    pub fn is_ramping(&self) -> bool {
        self.session.is_some()
    }

    /// Starts a session for one input event, replacing any session in
    /// flight. The new ramp begins at the current multiplier.
    ///
    /// Returns the new session, or `None` if the delta was ignored.
    pub fn on_directional_input(&mut self, delta: f64, base: Direction) -> Option<RateSession> {
        let factor = self.policy.factor_for(delta, base)?;
        let session = RateSession::new(self.multiplier, factor, &self.policy);
        self.session = Some(session);
        Some(session)
    }

    /// Moves the session forward by `dt` seconds and returns the multiplier.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if let Some(session) = &mut self.session {
            self.multiplier = session.advance(dt);
            if session.is_finished() {
                self.session = None;
            }
        }
        self.multiplier
    }

    /// Ends the session in flight, jumping to its settle value.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            self.multiplier = session.settle;
        }
    }
}

impl Default for RateController {
    fn default() -> Self {
        Self::new(RatePolicy::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn factor_sign_follows_input_and_direction() {
        let p = RatePolicy::new();
        assert_eq!(p.factor_for(3.0, Direction::Forward), Some(2.5));
        assert_eq!(p.factor_for(-3.0, Direction::Forward), Some(-2.5));
        assert_eq!(p.factor_for(3.0, Direction::Reversed), Some(-2.5));
        assert_eq!(p.factor_for(-3.0, Direction::Reversed), Some(2.5));

        let inv = p.with_mapping(InputMapping::Inverted);
        assert_eq!(inv.factor_for(3.0, Direction::Forward), Some(-2.5));
        assert_eq!(inv.factor_for(3.0, Direction::Reversed), Some(2.5));
    }

    #[test]
    fn directionless_deltas_are_ignored() {
        let mut rc = RateController::default();
        assert!(rc.on_directional_input(0.0, Direction::Forward).is_none());
        assert!(rc.on_directional_input(f64::NAN, Direction::Forward).is_none());
        assert!(
            rc.on_directional_input(f64::INFINITY, Direction::Forward)
                .is_none()
        );
        assert!(!rc.is_ramping());
        assert_eq!(rc.multiplier(), 1.0);
    }

    #[test]
    fn session_ramps_holds_and_settles() {
        let mut rc = RateController::default();
        let session = rc.on_directional_input(1.0, Direction::Forward).unwrap();
        assert_eq!(session.peak, 6.25);
        assert_eq!(session.settle, 1.0);

        let mid = rc.advance(0.1);
        assert!((mid - 3.625).abs() < EPS, "linear ramp up: {mid}");
        assert!((rc.advance(0.1) - 6.25).abs() < EPS, "at peak");
        assert!((rc.advance(0.2) - 6.25).abs() < EPS, "holding");
        let down = rc.advance(0.5);
        assert!((down - 4.15).abs() < EPS, "linear ramp down: {down}");
        assert!(rc.is_ramping());
        assert_eq!(rc.advance(1.0), 1.0);
        assert!(!rc.is_ramping(), "session ends after its ramp down");
    }

    #[test]
    fn rests_at_unit_magnitude_after_full_duration() {
        let policy = RatePolicy::new();
        for (delta, direction, rest) in [
            (1.0, Direction::Forward, 1.0),
            (-1.0, Direction::Forward, -1.0),
            (1.0, Direction::Reversed, -1.0),
        ] {
            let mut rc = RateController::new(policy);
            rc.on_directional_input(delta, direction);
            let mut t = 0.0;
            while t < policy.total_duration() {
                rc.advance(1.0 / 60.0);
                t += 1.0 / 60.0;
            }
            assert!(
                (rc.multiplier() - rest).abs() < EPS,
                "{delta} {direction:?}: {}",
                rc.multiplier()
            );
        }
    }

    #[test]
    fn new_input_replaces_session_from_current_value() {
        let mut rc = RateController::default();
        rc.on_directional_input(1.0, Direction::Forward);
        rc.advance(0.3);
        let current = rc.multiplier();
        let session = rc.on_directional_input(-1.0, Direction::Forward).unwrap();
        assert_eq!(session.start, current);
        assert_eq!(session.peak, -6.25);
        assert_eq!(rc.advance(0.0), current, "no jump when replacing");
    }

    #[test]
    fn ramp_curve_is_configurable() {
        let policy = RatePolicy {
            ease: Ease::QuadOut,
            ..RatePolicy::new()
        };
        let mut rc = RateController::new(policy);
        rc.on_directional_input(1.0, Direction::Forward);
        let mid = rc.advance(0.1);
        assert!(mid > 3.625 && mid < 6.25, "eased ramp leads linear: {mid}");
    }

    #[test]
    fn cancel_jumps_to_settle() {
        let mut rc = RateController::default();
        rc.on_directional_input(-2.0, Direction::Forward);
        rc.advance(0.2);
        rc.cancel();
        assert!(!rc.is_ramping());
        assert_eq!(rc.multiplier(), -1.0);
    }
}
