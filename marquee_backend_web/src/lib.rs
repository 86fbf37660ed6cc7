// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for marquee.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`RafLoop`]: `requestAnimationFrame` tick source
//! - [`DomSampler`]: measures elements from their layout boxes
//! - [`DomPresenter`]: writes each frame's translations to element styles
//! - [`WheelObserver`]: forwards wheel deltas to a player's input queue
//! - [`MarqueeHost`]: owns all of the above for one mounted loop

#![no_std]

extern crate alloc;

mod host;
mod presenter;
mod raf;
mod sampler;
mod wheel;

pub use host::MarqueeHost;
pub use marquee_core::backend::Presenter;
pub use presenter::{CssTransform, DomPresenter};
pub use raf::RafLoop;
pub use sampler::DomSampler;
pub use wheel::WheelObserver;

use marquee_core::time::{HostTime, Timebase};

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks. Use [`timebase`] to
/// convert to nanoseconds.
#[must_use]
pub fn now() -> HostTime {
    host_time_from_ms(raf::performance_now())
}

/// Returns the web [`Timebase`]: 1 tick = 1 µs = 1000 ns.
#[must_use]
pub fn timebase() -> Timebase {
    Timebase::MICROS
}

/// Converts a `DOMHighResTimeStamp` in milliseconds to microsecond ticks.
pub(crate) fn host_time_from_ms(ms: f64) -> HostTime {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "timestamps are small positive f64; µs fits in u64, negatives saturate to zero"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timebase_is_microsecond() {
        let tb = timebase();
        // 1 tick = 1 µs = 1000 ns
        assert_eq!(tb.ticks_to_nanos(1), 1000);
        assert_eq!(tb.ticks_to_nanos(1_000_000), 1_000_000_000);
    }

    #[test]
    fn timestamps_convert_to_microseconds() {
        assert_eq!(host_time_from_ms(16.5), HostTime(16_500));
        assert_eq!(host_time_from_ms(-3.0), HostTime(0), "negative saturates");
    }
}
