//! Per-tick input sampling
//!
//! Hosts push logical events whenever the platform reports them (keyboard and
//! pointer both map to the same jump events). The simulation drains the queue
//! exactly once at the start of each tick, so input timing never interleaves
//! with a half-finished update.

use std::collections::VecDeque;

/// Logical input events the core understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    JumpPressed,
    JumpReleased,
    StartRequested,
    RestartRequested,
    MainMenuRequested,
}

/// Held-state plus the queue of edge events waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    jump_held: bool,
    queue: VecDeque<InputEvent>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event. Returns `false` if it was dropped as a repeat
    /// (e.g. keyboard auto-repeat while jump is already held).
    pub fn push(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::JumpPressed => {
                if self.jump_held {
                    return false;
                }
                self.jump_held = true;
            }
            InputEvent::JumpReleased => {
                if !self.jump_held {
                    return false;
                }
                self.jump_held = false;
            }
            _ => {}
        }
        self.queue.push_back(event);
        true
    }

    /// Whether the jump input is currently held down
    pub fn jump_held(&self) -> bool {
        self.jump_held
    }

    /// Take every event queued since the last tick, oldest first
    pub fn drain(&mut self) -> Vec<InputEvent> {
        self.queue.drain(..).collect()
    }

    /// Drop pending events and release held inputs (focus loss)
    pub fn clear(&mut self) {
        self.queue.clear();
        if self.jump_held {
            // Keep the release so the jump latch re-arms
            self.queue.push_back(InputEvent::JumpReleased);
        }
        self.jump_held = false;
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
