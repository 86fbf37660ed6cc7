// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seamless infinite horizontal loops.
//!
//! `marquee_core` schedules a row of elements so that it scrolls forever
//! without a visible seam: measure the elements once, build a periodic
//! timeline, and evaluate every element's translation from a single
//! playhead. It is `no_std` compatible (with `alloc`) and knows nothing
//! about any particular UI toolkit.
//!
//! # Architecture
//!
//! ```text
//!   GeometrySampler::sample() ──► Vec<ElementSample>
//!                                       │
//!                                       ▼
//!                     LoopTimeline::build(samples, config)
//!                                       │
//!            InputSender ──┐            ▼
//!                          ├──► LoopPlayer ◄── next / previous / to_index
//!   FrameTick (backend) ───┘       │
//!                                  ▼
//!                              LoopFrame ──► Presenter::apply()
//! ```
//!
//! **[`sample`]**: element geometry and the [`GeometrySampler`] trait.
//!
//! **[`timeline`]**: [`LoopTimeline`] construction: loop period, markers
//! and one piecewise-linear [`track`] per element.
//!
//! **[`state`]**: the mutable [`LoopState`](state::LoopState) and the
//! re-homing [`Playhead`](state::Playhead).
//!
//! **[`navigator`]**: plans seeks to arbitrary elements without running the
//! wrong way around the loop.
//!
//! **[`rate`]**: input-driven rate bursts.
//!
//! **[`player`]**: [`LoopPlayer`], the per-frame driver.
//!
//! **[`backend`]**: the [`Presenter`](backend::Presenter) trait backends
//! implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types,
//! with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Example
//!
//! ```
//! use marquee_core::player::LoopPlayer;
//! use marquee_core::sample::packed_row;
//! use marquee_core::timeline::LoopConfig;
//! use marquee_core::trace::Tracer;
//!
//! let samples = packed_row(&[100.0, 100.0, 100.0, 100.0]);
//! let mut player = LoopPlayer::build(&samples, &LoopConfig::new(), &mut Tracer::none())?;
//! let frame = player.advance(0.5, &mut Tracer::none());
//! assert_eq!(frame.positions[0].x, -50.0);
//! # Ok::<(), marquee_core::timeline::BuildError>(())
//! ```
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//!
//! [`GeometrySampler`]: sample::GeometrySampler
//! [`LoopTimeline`]: timeline::LoopTimeline
//! [`LoopPlayer`]: player::LoopPlayer

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod input;
pub mod navigator;
pub mod player;
pub mod rate;
pub mod sample;
pub mod state;
pub mod tick;
pub mod time;
pub mod timeline;
pub mod trace;
pub mod track;
