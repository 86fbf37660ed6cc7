// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser frame clock.
//!
//! [`RafLoop`] turns `requestAnimationFrame` callbacks into [`FrameTick`]s
//! for a [`LoopPlayer`](marquee_core::player::LoopPlayer). The callback's
//! timestamp is the frame's start time in milliseconds on the
//! `performance.now()` clock; it is carried as microsecond ticks.
//!
//! [`FrameTick`]: marquee_core::tick::FrameTick

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use marquee_core::tick::FrameTick;

// Bound as globals so a frame never has to look up `window`.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

type FrameClosure = Closure<dyn FnMut(f64)>;

/// Calls a handler once per browser frame until stopped or dropped.
///
/// The loop is created idle. [`start`](Self::start) requests the first
/// frame; each frame requests the next one while the loop stays armed.
pub struct RafLoop {
    shared: Rc<Shared>,
}

struct Shared {
    /// Created on the first `start` and reused across restarts.
    on_frame: RefCell<Option<FrameClosure>>,
    on_tick: RefCell<Box<dyn FnMut(FrameTick)>>,
    armed: Cell<bool>,
    /// Id of the outstanding frame request.
    pending: Cell<Option<i32>>,
    frames: Cell<u64>,
}

impl Shared {
    fn next_tick(&self, timestamp_ms: f64) -> FrameTick {
        let frame_index = self.frames.get();
        self.frames.set(frame_index.wrapping_add(1));
        FrameTick {
            now: crate::host_time_from_ms(timestamp_ms),
            timebase: crate::timebase(),
            frame_index,
        }
    }

    fn request_frame(&self) {
        if let Some(on_frame) = &*self.on_frame.borrow() {
            let id = request_animation_frame(on_frame.as_ref().unchecked_ref());
            self.pending.set(Some(id));
        }
    }
}

impl RafLoop {
    /// Creates an idle loop that will hand every frame's tick to `on_tick`.
    pub fn new(on_tick: impl FnMut(FrameTick) + 'static) -> Self {
        Self {
            shared: Rc::new(Shared {
                on_frame: RefCell::new(None),
                on_tick: RefCell::new(Box::new(on_tick)),
                armed: Cell::new(false),
                pending: Cell::new(None),
                frames: Cell::new(0),
            }),
        }
    }

    /// Requests frames until [`stop`](Self::stop). Does nothing if running.
    pub fn start(&self) {
        if self.shared.armed.replace(true) {
            return;
        }
        if self.shared.on_frame.borrow().is_none() {
            let shared = Rc::clone(&self.shared);
            let on_frame = Closure::wrap(Box::new(move |timestamp_ms: f64| {
                shared.pending.set(None);
                if !shared.armed.get() {
                    return;
                }
                let tick = shared.next_tick(timestamp_ms);
                shared.on_tick.borrow_mut()(tick);
                // The handler may have stopped the loop.
                if shared.armed.get() {
                    shared.request_frame();
                }
            }) as Box<dyn FnMut(f64)>);
            *self.shared.on_frame.borrow_mut() = Some(on_frame);
        }
        self.shared.request_frame();
    }

    /// Cancels the outstanding frame. The loop can be started again.
    pub fn stop(&self) {
        self.shared.armed.set(false);
        if let Some(id) = self.shared.pending.take() {
            cancel_animation_frame(id);
        }
    }

    /// Whether frames are being requested.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.shared.armed.get()
    }

    /// Number of frames delivered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.shared.frames.get()
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
        // The closure owns an `Rc<Shared>`.
        self.shared.on_frame.borrow_mut().take();
    }
}

impl core::fmt::Debug for RafLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafLoop")
            .field("running", &self.shared.armed.get())
            .field("pending", &self.shared.pending.get())
            .field("frames", &self.shared.frames.get())
            .finish_non_exhaustive()
    }
}
