// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame ticks delivered by the hosting environment.
//!
//! The core never owns a clock. A tick source (`requestAnimationFrame` in the
//! web backend, a plain loop in tests and demos) produces one [`FrameTick`]
//! per frame and hands it to
//! [`LoopPlayer::tick`](crate::player::LoopPlayer::tick), which converts the
//! host-time delta into playback seconds with the tick's [`Timebase`].

use crate::time::{HostTime, Timebase};

/// A frame opportunity delivered by the tick source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTick {
    /// Host time when the tick was generated.
    pub now: HostTime,
    /// Timebase for interpreting `now`.
    pub timebase: Timebase,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}

impl FrameTick {
    /// Creates a tick at `now` in nanosecond ticks.
    #[must_use]
    pub const fn from_nanos(now: u64, frame_index: u64) -> Self {
        Self {
            now: HostTime(now),
            timebase: Timebase::NANOS,
            frame_index,
        }
    }

    /// Seconds between `earlier` and this tick, clamped at zero.
    #[must_use]
    pub fn secs_since(&self, earlier: HostTime) -> f64 {
        self.now.secs_since(earlier, self.timebase)
    }
}
