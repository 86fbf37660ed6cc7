// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directional input delivery.
//!
//! Input sources (wheel listeners, gesture recognizers) do not hold the
//! player. They hold an [`InputSender`], a weak handle onto the player's
//! queue, and the player drains the queue in arrival order at the start of
//! each tick. Once the player is dropped, sends fail quietly.

use alloc::collections::VecDeque;
use alloc::rc::{Rc, Weak};
use core::cell::RefCell;

use crate::time::HostTime;

/// One discrete directional input event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalInput {
    /// Signed vertical delta; positive is "down".
    pub delta: f64,
    /// When the event happened.
    pub timestamp: HostTime,
}

impl DirectionalInput {
    /// Creates an event.
    #[must_use]
    pub const fn new(delta: f64, timestamp: HostTime) -> Self {
        Self { delta, timestamp }
    }
}

type Shared = RefCell<VecDeque<DirectionalInput>>;

/// Player-owned FIFO of pending input.
#[derive(Debug, Default)]
pub(crate) struct InputQueue {
    events: Rc<Shared>,
}

impl InputQueue {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn sender(&self) -> InputSender {
        InputSender {
            queue: Rc::downgrade(&self.events),
        }
    }

    pub(crate) fn push(&self, input: DirectionalInput) {
        self.events.borrow_mut().push_back(input);
    }

    /// Takes the oldest event. The queue is only borrowed for the pop, so
    /// handlers may send more input while the player drains.
    pub(crate) fn pop(&self) -> Option<DirectionalInput> {
        self.events.borrow_mut().pop_front()
    }

    pub(crate) fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.events.borrow().len()
    }
}

/// Handle for feeding input to a [`LoopPlayer`](crate::player::LoopPlayer).
#[derive(Clone, Debug)]
pub struct InputSender {
    queue: Weak<Shared>,
}

impl InputSender {
    /// Enqueues an event for the next tick.
    ///
    /// Returns `false` if the player is gone; the event is dropped.
    pub fn send(&self, input: DirectionalInput) -> bool {
        match self.queue.upgrade() {
            Some(queue) => {
                queue.borrow_mut().push_back(input);
                true
            }
            None => false,
        }
    }

    /// Whether the player is still alive.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.queue.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_drain_in_arrival_order() {
        let queue = InputQueue::new();
        let sender = queue.sender();
        assert!(sender.send(DirectionalInput::new(1.0, HostTime(10))));
        queue.push(DirectionalInput::new(-2.0, HostTime(20)));
        assert!(sender.send(DirectionalInput::new(3.0, HostTime(30))));
        assert_eq!(queue.len(), 3);

        let deltas: [f64; 3] = core::array::from_fn(|_| queue.pop().unwrap().delta);
        assert_eq!(deltas, [1.0, -2.0, 3.0]);
        assert!(queue.pop().is_none());
    }

    #[test]
    fn sender_outliving_queue_drops_events() {
        let queue = InputQueue::new();
        let sender = queue.sender();
        assert!(sender.is_connected());
        drop(queue);
        assert!(!sender.is_connected());
        assert!(!sender.send(DirectionalInput::new(1.0, HostTime(0))));
    }

    #[test]
    fn clear_discards_pending_input() {
        let queue = InputQueue::new();
        queue.sender().send(DirectionalInput::new(1.0, HostTime(0)));
        queue.clear();
        assert_eq!(queue.len(), 0);
    }
}
