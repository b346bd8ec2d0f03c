//! Battle Message Queue
//!
//! A fixed-capacity circular buffer of display-pending text messages. Each
//! message either shows for a fixed number of seconds or waits for the
//! advance key; the queue itself is a [`GameObject`] so it rides the normal
//! update/draw dispatch.
//!
//! State machine:
//! - Empty: head == tail, inactive
//! - Displaying-Timed: head message has no wait flag, seconds timer running
//! - Displaying-WaitForInput: head message advances only on the input latch
//! - Full: advancing tail would catch head; enqueue reports `Dropped`
//!
//! The queue never advances more than one message per update call, no matter
//! how much time the caller reports.

use crate::render::{DrawTarget, UI_DRAW_DEPTH};

use super::object::{GameObject, ObjectCore, ObjectKind};
use super::types::{Bounds2D, Vec2};

/// Slot count of the ring buffer. One slot stays empty to tell full from
/// empty, so at most `MAX_BATTLE_MESSAGES - 1` messages are pending.
pub const MAX_BATTLE_MESSAGES: usize = 32;

/// Panel the active message is drawn into.
const UI_BOX: Bounds2D = Bounds2D::new(Vec2::new(112.0, 440.0), Vec2::new(912.0, 584.0));
const UI_BOX_COLOR: u32 = 0xff10102c;
const UI_TEXT_INSET: Vec2 = Vec2::new(24.0, 36.0);

/// Callback fired when a message finishes displaying. Stored but never
/// invoked yet; reserved for scripted battle sequences.
pub type FinishCallback = Box<dyn FnMut()>;

/// One pending message.
pub struct BattleMessage {
    pub text: String,
    /// Seconds to display. Ignored when `wait_for_input` is set.
    pub display_time: f32,
    pub wait_for_input: bool,
    pub on_finish: Option<FinishCallback>,
}

/// Outcome of an enqueue attempt. Dropping is defined behavior, not an
/// error, but callers and tests can observe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnqueueResult {
    Queued,
    Dropped,
}

pub struct BattleMessageQueue {
    core: ObjectCore,
    messages: [Option<BattleMessage>; MAX_BATTLE_MESSAGES],
    /// First pending message.
    head: usize,
    /// Next slot to insert into.
    tail: usize,
    /// Seconds accumulated against the head message's display time.
    timer: f32,
    active: bool,
    /// Input latch set by the frame driver; consumed each update.
    advance_requested: bool,
}

impl BattleMessageQueue {
    pub fn new() -> Self {
        Self {
            core: ObjectCore::new(ObjectKind::MessageQueue, Vec2::ZERO, Vec2::ZERO),
            messages: std::array::from_fn(|_| None),
            head: 0,
            tail: 0,
            timer: 0.0,
            active: false,
            advance_requested: false,
        }
    }

    /// Queue a message. When the buffer is full the message is dropped and
    /// the queue is untouched.
    pub fn enqueue(
        &mut self,
        text: impl Into<String>,
        display_time: f32,
        wait_for_input: bool,
    ) -> EnqueueResult {
        if (self.tail + 1) % MAX_BATTLE_MESSAGES == self.head {
            return EnqueueResult::Dropped;
        }

        self.messages[self.tail] = Some(BattleMessage {
            text: text.into(),
            display_time,
            wait_for_input,
            on_finish: None,
        });
        self.tail = (self.tail + 1) % MAX_BATTLE_MESSAGES;
        self.active = true;
        EnqueueResult::Queued
    }

    /// Signal that the advance key was pressed this frame. Consumed by the
    /// next update; ignored unless the head message is waiting for input.
    pub fn signal_advance(&mut self) {
        self.advance_requested = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Messages currently pending.
    pub fn pending(&self) -> usize {
        (self.tail + MAX_BATTLE_MESSAGES - self.head) % MAX_BATTLE_MESSAGES
    }

    /// Text of the message currently displayed, if any.
    pub fn current_text(&self) -> Option<&str> {
        self.messages[self.head].as_ref().map(|m| m.text.as_str())
    }

    /// Drop the head message and move on. The message (and its text) is
    /// released here, exactly once.
    fn advance_head(&mut self) {
        self.messages[self.head] = None;
        self.head = (self.head + 1) % MAX_BATTLE_MESSAGES;
    }
}

impl Default for BattleMessageQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl GameObject for BattleMessageQueue {
    fn core(&self) -> &ObjectCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ObjectCore {
        &mut self.core
    }

    fn draw(&self, target: &mut dyn DrawTarget) {
        if !self.active || self.head == self.tail {
            return;
        }
        let Some(msg) = &self.messages[self.head] else {
            return;
        };

        target.fill_rect(UI_BOX, UI_BOX_COLOR, UI_DRAW_DEPTH);
        target.text(&msg.text, UI_BOX.min + UI_TEXT_INSET, UI_DRAW_DEPTH);
    }

    fn update(&mut self, elapsed_ms: u32) {
        let advance_pressed = std::mem::take(&mut self.advance_requested);

        if !self.active {
            return;
        }
        if self.head == self.tail {
            // Defensive resync; an empty queue can't stay active
            self.active = false;
            return;
        }

        let Some(msg) = &self.messages[self.head] else {
            self.active = false;
            return;
        };

        if msg.wait_for_input {
            if advance_pressed {
                self.advance_head();
            }
        } else {
            // Seconds timer; real division so sub-second frames still add up
            self.timer += elapsed_ms as f32 / 1000.0;
            if self.timer >= msg.display_time {
                self.advance_head();
                self.timer = 0.0;
            }
        }

        if self.head == self.tail {
            self.active = false;
        }
    }

    fn fixed_update(&mut self, _elapsed_ms: u32) {
        // Reserved; the queue has no fixed-rate logic yet
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SpriteQuad;

    /// Records draw calls instead of submitting them.
    #[derive(Default)]
    struct Recorder {
        rects: Vec<(Bounds2D, u32)>,
        texts: Vec<String>,
    }

    impl DrawTarget for Recorder {
        fn sprite(&mut self, _quad: SpriteQuad) {}

        fn fill_rect(&mut self, bounds: Bounds2D, color: u32, _depth: f32) {
            self.rects.push((bounds, color));
        }

        fn text(&mut self, text: &str, _pos: Vec2, _depth: f32) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn test_enqueue_activates_queue() {
        let mut queue = BattleMessageQueue::new();
        assert!(!queue.is_active());

        assert_eq!(queue.enqueue("Hello", 1.0, false), EnqueueResult::Queued);
        assert!(queue.is_active());
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.current_text(), Some("Hello"));
    }

    #[test]
    fn test_queue_full_drops_message() {
        let mut queue = BattleMessageQueue::new();

        // Effective capacity is one less than the slot count
        for i in 0..MAX_BATTLE_MESSAGES - 1 {
            assert_eq!(
                queue.enqueue(format!("msg {i}"), 1.0, false),
                EnqueueResult::Queued
            );
        }
        assert_eq!(queue.pending(), MAX_BATTLE_MESSAGES - 1);

        assert_eq!(queue.enqueue("one too many", 1.0, false), EnqueueResult::Dropped);
        assert_eq!(queue.pending(), MAX_BATTLE_MESSAGES - 1);
        assert_eq!(queue.current_text(), Some("msg 0"));
    }

    #[test]
    fn test_timed_message_advances_at_display_time() {
        let mut queue = BattleMessageQueue::new();
        queue.enqueue("Hello", 2.0, false);

        // 1999 one-millisecond frames: still displaying
        for _ in 0..1999 {
            queue.update(1);
        }
        assert!(queue.is_active());
        assert_eq!(queue.current_text(), Some("Hello"));

        // The 2000th millisecond dequeues it and the queue goes inactive
        queue.update(1);
        assert!(!queue.is_active());
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_large_elapsed_advances_one_message_only() {
        let mut queue = BattleMessageQueue::new();
        queue.enqueue("first", 0.5, false);
        queue.enqueue("second", 0.5, false);

        // Way past both display times, but only one message may advance
        queue.update(10_000);
        assert_eq!(queue.current_text(), Some("second"));
        assert!(queue.is_active());

        queue.update(10_000);
        assert!(!queue.is_active());
    }

    #[test]
    fn test_wait_for_input_ignores_time() {
        let mut queue = BattleMessageQueue::new();
        queue.enqueue("press a key", 0.0, true);

        for _ in 0..100 {
            queue.update(10_000);
        }
        assert_eq!(queue.current_text(), Some("press a key"));

        queue.signal_advance();
        queue.update(16);
        assert!(!queue.is_active());
    }

    #[test]
    fn test_advance_latch_ignored_for_timed_head() {
        let mut queue = BattleMessageQueue::new();
        queue.enqueue("timed", 1.0, false);
        queue.enqueue("gated", 0.0, true);

        // Press during the timed message: latch is consumed and discarded
        queue.signal_advance();
        queue.update(100);
        assert_eq!(queue.current_text(), Some("timed"));

        for _ in 0..9 {
            queue.update(100);
        }
        assert_eq!(queue.current_text(), Some("gated"));

        // The stale press must not advance the gated message
        queue.update(16);
        assert_eq!(queue.current_text(), Some("gated"));

        queue.signal_advance();
        queue.update(16);
        assert!(!queue.is_active());
    }

    #[test]
    fn test_inactive_stays_inactive_until_next_enqueue() {
        let mut queue = BattleMessageQueue::new();
        queue.enqueue("once", 0.1, false);
        queue.update(200);
        assert!(!queue.is_active());

        for _ in 0..10 {
            queue.update(200);
        }
        assert!(!queue.is_active());

        queue.enqueue("again", 0.1, false);
        assert!(queue.is_active());
    }

    #[test]
    fn test_timer_resets_between_messages() {
        let mut queue = BattleMessageQueue::new();
        queue.enqueue("a", 1.0, false);
        queue.enqueue("b", 1.0, false);

        for _ in 0..10 {
            queue.update(100);
        }
        assert_eq!(queue.current_text(), Some("b"));

        // Second message must get its full second, not inherit leftovers
        for _ in 0..9 {
            queue.update(100);
        }
        assert_eq!(queue.current_text(), Some("b"));
        queue.update(100);
        assert!(!queue.is_active());
    }

    #[test]
    fn test_sub_second_frames_accumulate() {
        let mut queue = BattleMessageQueue::new();
        queue.enqueue("short frames", 0.1, false);

        // 8 ms frames; integer seconds math would never get there
        for _ in 0..12 {
            queue.update(8);
        }
        assert!(queue.is_active()); // 96 ms so far
        queue.update(8);
        assert!(!queue.is_active()); // 104 ms
    }

    #[test]
    fn test_draw_renders_panel_and_text() {
        let mut queue = BattleMessageQueue::new();
        let mut rec = Recorder::default();

        queue.draw(&mut rec);
        assert!(rec.rects.is_empty());

        queue.enqueue("Hello", 1.0, false);
        queue.draw(&mut rec);
        assert_eq!(rec.rects.len(), 1);
        assert_eq!(rec.texts, vec!["Hello".to_string()]);
    }

    #[test]
    fn test_ring_wraps_around() {
        let mut queue = BattleMessageQueue::new();

        // Cycle enough messages through to wrap the ring twice
        for i in 0..(MAX_BATTLE_MESSAGES * 2) {
            assert_eq!(
                queue.enqueue(format!("m{i}"), 0.0, true),
                EnqueueResult::Queued
            );
            queue.signal_advance();
            queue.update(16);
        }
        assert!(!queue.is_active());
        assert_eq!(queue.pending(), 0);
    }
}
