//! Event sources polled once per frame by the engine loop
//!
//! The loop drains the source at the start of every frame. A windowed backend
//! would translate its native events here; the sources in this module are
//! headless.

use std::collections::VecDeque;

use crate::application::AppEvent;

/// Per-frame event pump
pub trait EventSource {
    /// Next pending event for `frame`, or `None` once drained
    fn poll_event(&mut self, frame: u64) -> Option<AppEvent>;
}

/// Source that never produces events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl EventSource for NoEvents {
    fn poll_event(&mut self, _frame: u64) -> Option<AppEvent> {
        None
    }
}

/// Source replaying events at fixed frame numbers
#[derive(Debug, Default, Clone)]
pub struct ScriptedEvents {
    queue: VecDeque<(u64, AppEvent)>,
}

impl ScriptedEvents {
    /// Empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` at the start of `frame` (builder pattern)
    pub fn at(mut self, frame: u64, event: AppEvent) -> Self {
        let position = self
            .queue
            .iter()
            .position(|(at, _)| *at > frame)
            .unwrap_or(self.queue.len());
        self.queue.insert(position, (frame, event));
        self
    }

    /// Events not delivered yet
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl EventSource for ScriptedEvents {
    fn poll_event(&mut self, frame: u64) -> Option<AppEvent> {
        match self.queue.front() {
            Some((at, _)) if *at <= frame => self.queue.pop_front().map(|(_, event)| event),
            _ => None,
        }
    }
}
