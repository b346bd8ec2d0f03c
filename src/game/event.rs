//! Event plumbing
//!
//! Cross-cutting policies (collision -> sound) go through typed event queues
//! instead of direct calls or callback globals. Entities push events during
//! update; the level manager drains them after the frame's update pass.

use super::types::Vec2;

/// A queue for events of a single type. Collected during the frame, drained
/// at a fixed point after updates.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// An enemy hit a field wall.
#[derive(Debug, Clone, Copy)]
pub struct CollisionEvent {
    /// Where the enemy was when it bounced.
    pub position: Vec2,
}

/// Container for the frame's event queues.
#[derive(Debug, Default)]
pub struct Events {
    pub collisions: EventQueue<CollisionEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop anything left unprocessed. Call at end of frame.
    pub fn clear_all(&mut self) {
        self.collisions.clear();
    }
}
