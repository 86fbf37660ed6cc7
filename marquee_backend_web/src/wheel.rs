// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wheel input.

use alloc::boxed::Box;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, WheelEvent};

use marquee_core::input::{DirectionalInput, InputSender};

type WheelClosure = Closure<dyn FnMut(WheelEvent)>;

/// Forwards `wheel` events on a target to a player's input queue.
///
/// Each event's `deltaY` becomes one [`DirectionalInput`]. The listener is
/// removed when the observer is dropped.
pub struct WheelObserver {
    target: EventTarget,
    closure: WheelClosure,
}

impl core::fmt::Debug for WheelObserver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WheelObserver").finish_non_exhaustive()
    }
}

impl WheelObserver {
    /// Starts listening on `target`.
    pub fn new(target: EventTarget, sender: InputSender) -> Self {
        let closure = Closure::wrap(Box::new(move |event: WheelEvent| {
            let delta = event.delta_y();
            if delta != 0.0 {
                let _ = sender.send(DirectionalInput::new(delta, crate::now()));
            }
        }) as Box<dyn FnMut(WheelEvent)>);
        let _ = target.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
        Self { target, closure }
    }
}

impl Drop for WheelObserver {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback("wheel", self.closure.as_ref().unchecked_ref());
    }
}
