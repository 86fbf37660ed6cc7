// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! Marquee splits platform-specific work into *backend* crates. Each backend
//! provides the following pieces:
//!
//! - **Tick source**: produces [`FrameTick`] values from a platform frame
//!   callback (e.g. `requestAnimationFrame`). Setup and lifecycle differ too
//!   much across platforms for a trait, so this stays backend-specific.
//!
//! - **Time**: `now() -> HostTime` and `timebase() -> Timebase` free
//!   functions that read the platform's monotonic clock.
//!
//! - **Sampler**: implements [`GeometrySampler`] over native elements.
//!
//! - **Input**: forwards wheel or gesture deltas through an
//!   [`InputSender`].
//!
//! - **Presenter**: implements [`Presenter`] to write each [`LoopFrame`]
//!   onto native elements.
//!
//! # Crate boundaries
//!
//! `marquee_core` owns the data model, timeline building, playback and this
//! contract module. Backend crates depend on `marquee_core` and provide
//! platform glue.
//!
//! [`FrameTick`]: crate::tick::FrameTick
//! [`GeometrySampler`]: crate::sample::GeometrySampler
//! [`InputSender`]: crate::input::InputSender

use alloc::vec::Vec;

use crate::player::LoopFrame;

/// Applies an evaluated [`LoopFrame`] to a presentation tree.
///
/// # Frame loop pseudocode
///
/// ```rust,ignore
/// fn on_frame(tick: FrameTick) {
///     let frame = player.tick(&tick, &mut Tracer::none());
///     presenter.apply(frame);
/// }
/// ```
pub trait Presenter {
    /// Writes every element's position.
    fn apply(&mut self, frame: &LoopFrame);
}

/// A [`Presenter`] that keeps the last applied translations.
///
/// Useful for headless hosts and tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingPresenter {
    /// Translation per element from the last frame.
    pub translations: Vec<f64>,
    /// Number of frames applied.
    pub frames: u64,
}

impl Presenter for RecordingPresenter {
    fn apply(&mut self, frame: &LoopFrame) {
        self.translations.clear();
        self.translations
            .extend(frame.positions.iter().map(|pos| pos.x));
        self.frames += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::LoopPlayer;
    use crate::sample::packed_row;
    use crate::timeline::LoopConfig;
    use crate::trace::Tracer;

    #[test]
    fn presenter_receives_every_element() {
        let mut player = LoopPlayer::build(
            &packed_row(&[50.0, 150.0]),
            &LoopConfig::new(),
            &mut Tracer::none(),
        )
        .unwrap();
        let mut presenter = RecordingPresenter::default();
        presenter.apply(player.advance(0.25, &mut Tracer::none()));
        assert_eq!(presenter.frames, 1);
        assert_eq!(presenter.translations, [-25.0, -25.0]);
    }
}
