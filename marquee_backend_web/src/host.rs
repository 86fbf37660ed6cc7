// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One mounted loop.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use marquee_core::backend::Presenter;
use marquee_core::input::InputSender;
use marquee_core::navigator::SeekOptions;
use marquee_core::player::LoopPlayer;
use marquee_core::sample::GeometrySampler;
use marquee_core::state::Direction;
use marquee_core::timeline::{BuildError, LoopConfig};
use marquee_core::trace::Tracer;
use web_sys::{EventTarget, HtmlElement};

use crate::presenter::DomPresenter;
use crate::raf::RafLoop;
use crate::sampler::DomSampler;
use crate::wheel::WheelObserver;

struct Playback {
    player: LoopPlayer,
    presenter: DomPresenter,
    sampler: DomSampler,
}

/// Plays a loop over a row of DOM elements.
///
/// The host owns the player, the frame loop and the wheel listener.
/// Dropping it removes the listener and cancels the pending animation
/// frame; the elements keep their last transform.
pub struct MarqueeHost {
    playback: Rc<RefCell<Playback>>,
    seek: SeekOptions,
    wheel: Option<WheelObserver>,
    raf: RafLoop,
}

impl core::fmt::Debug for MarqueeHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MarqueeHost")
            .field("seek", &self.seek)
            .field("wheel", &self.wheel.is_some())
            .field("raf", &self.raf)
            .finish_non_exhaustive()
    }
}

impl MarqueeHost {
    /// Measures `elements`, builds the loop and starts playing it.
    ///
    /// With a `wheel_target`, wheel events on it modulate the playback rate.
    pub fn mount(
        elements: Vec<HtmlElement>,
        config: &LoopConfig,
        wheel_target: Option<EventTarget>,
    ) -> Result<Self, BuildError> {
        let sampler = DomSampler::new(elements.clone());
        let player = LoopPlayer::build(&sampler.sample(), config, &mut Tracer::none())?;
        let mut presenter = DomPresenter::new(elements);
        presenter.apply(player.frame());

        let wheel = wheel_target.map(|target| WheelObserver::new(target, player.input_sender()));
        let playback = Rc::new(RefCell::new(Playback {
            player,
            presenter,
            sampler,
        }));

        let raf = {
            let playback = Rc::clone(&playback);
            RafLoop::new(move |tick| {
                let mut guard = playback.borrow_mut();
                let pb = &mut *guard;
                pb.presenter.apply(pb.player.tick(&tick, &mut Tracer::none()));
            })
        };
        raf.start();

        Ok(Self {
            playback,
            seek: SeekOptions::new(),
            wheel,
            raf,
        })
    }

    /// Uses `options` for [`next`](Self::next), [`previous`](Self::previous)
    /// and [`to_index`](Self::to_index).
    #[must_use]
    pub fn with_seek_options(mut self, options: SeekOptions) -> Self {
        self.seek = options;
        self
    }

    /// Seeks to the next element. Returns its index.
    pub fn next(&self) -> usize {
        self.playback
            .borrow_mut()
            .player
            .next(self.seek, &mut Tracer::none())
    }

    /// Seeks to the previous element. Returns its index.
    pub fn previous(&self) -> usize {
        self.playback
            .borrow_mut()
            .player
            .previous(self.seek, &mut Tracer::none())
    }

    /// Seeks to element `index`, wrapped modulo the element count.
    pub fn to_index(&self, index: isize) -> usize {
        self.playback
            .borrow_mut()
            .player
            .to_index(index, self.seek, &mut Tracer::none())
    }

    /// The element navigation treats as current.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.playback.borrow().player.current_index()
    }

    /// Flips the playback direction.
    pub fn reverse(&self) -> Direction {
        self.playback
            .borrow_mut()
            .player
            .reverse(&mut Tracer::none())
    }

    /// Resumes playback.
    pub fn play(&self) {
        self.playback.borrow_mut().player.play();
    }

    /// Pauses playback.
    pub fn pause(&self) {
        self.playback.borrow_mut().player.pause();
    }

    /// A handle for feeding input from other sources.
    #[must_use]
    pub fn input_sender(&self) -> InputSender {
        self.playback.borrow().player.input_sender()
    }

    /// Measures the elements again and rebuilds the loop, e.g. after a
    /// resize. On error the previous loop keeps playing.
    pub fn remeasure(&self) -> Result<(), BuildError> {
        let mut guard = self.playback.borrow_mut();
        let pb = &mut *guard;
        let samples = pb.sampler.sample();
        let config = *pb.player.config();
        pb.player.rebuild(&samples, &config, &mut Tracer::none())?;
        pb.presenter.invalidate();
        pb.presenter.apply(pb.player.frame());
        Ok(())
    }

    /// Stops the frame loop without tearing anything down.
    pub fn stop(&self) {
        self.raf.stop();
    }

    /// Restarts a stopped frame loop. Time spent stopped is skipped.
    pub fn start(&self) {
        self.playback.borrow_mut().player.reset_clock();
        self.raf.start();
    }
}
