//! The key-matrix collaborator seam.
//!
//! Scanning the physical matrix is done elsewhere; this crate only consumes
//! a per-poll active set and the persistent caps-lock flag through
//! [`MatrixSource`]. [`QueuedMatrix`] is an in-memory source with the same
//! lossy, bounded event queue as the hardware side, for tests and host
//! simulation.

use std::collections::{BTreeSet, VecDeque};

use crate::keymap::KeyPosition;
use crate::error::Result;
use crate::options::{DEFAULT_QUEUE_DEPTH, Options};

/// Source of key-matrix state.
pub trait MatrixSource {
    /// Positions active this tick.
    fn poll(&mut self) -> Vec<KeyPosition>;

    /// Persistent caps-lock state.
    fn caps_locked(&self) -> bool;

    /// Update the caps-lock state.
    fn set_caps_locked(&mut self, locked: bool);

    /// Total events lost to queue overflow so far.
    fn dropped_events(&self) -> u64 {
        0
    }
}

/// A switch transition reported by the scanner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    Press(KeyPosition),
    Release(KeyPosition),
}

/// Bounded FIFO of key events. Events pushed while full are dropped and
/// counted.
#[derive(Clone, Debug)]
pub struct EventQueue {
    events: VecDeque<KeyEvent>,
    depth: usize,
    dropped: u64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::with_depth(DEFAULT_QUEUE_DEPTH)
    }
}

impl EventQueue {
    /// Create a queue holding at most `depth` events (minimum 1).
    #[must_use]
    pub fn with_depth(depth: usize) -> Self {
        let depth = depth.max(1);
        Self {
            events: VecDeque::with_capacity(depth),
            depth,
            dropped: 0,
        }
    }

    /// Enqueue an event. Returns `false` if it was dropped.
    pub fn push(&mut self, event: KeyEvent) -> bool {
        if self.events.len() >= self.depth {
            self.dropped += 1;
            return false;
        }
        self.events.push_back(event);
        true
    }

    pub fn pop(&mut self) -> Option<KeyEvent> {
        self.events.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// In-memory matrix fed with press/release events.
///
/// Each [`poll`](MatrixSource::poll) drains the queue into the held-key set
/// and reports it. Events that arrive faster than the queue depth between
/// polls are lost, exactly like on hardware.
#[derive(Clone, Debug, Default)]
pub struct QueuedMatrix {
    queue: EventQueue,
    held: BTreeSet<KeyPosition>,
    caps_locked: bool,
}

impl QueuedMatrix {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_queue_depth(depth: usize) -> Self {
        Self {
            queue: EventQueue::with_depth(depth),
            ..Self::default()
        }
    }

    /// Create a matrix whose queue depth comes from validated options.
    pub fn with_options(options: &Options) -> Result<Self> {
        options.validate()?;
        Ok(Self::with_queue_depth(options.queue_depth))
    }

    /// Queue a key press. Returns `false` if the event was dropped.
    pub fn press(&mut self, pos: KeyPosition) -> bool {
        self.queue.push(KeyEvent::Press(pos))
    }

    /// Queue a key release. Returns `false` if the event was dropped.
    pub fn release(&mut self, pos: KeyPosition) -> bool {
        self.queue.push(KeyEvent::Release(pos))
    }

    /// Queue releases for every key currently held or pending.
    pub fn release_all(&mut self) {
        let mut pending = self.held.clone();
        for event in &self.queue.events {
            if let KeyEvent::Press(pos) = event {
                pending.insert(*pos);
            }
        }
        for pos in pending {
            self.release(pos);
        }
    }

    /// Keys held as of the last poll.
    #[must_use]
    pub fn held(&self) -> &BTreeSet<KeyPosition> {
        &self.held
    }

    #[must_use]
    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }
}

impl MatrixSource for QueuedMatrix {
    fn poll(&mut self) -> Vec<KeyPosition> {
        while let Some(event) = self.queue.pop() {
            match event {
                KeyEvent::Press(pos) => {
                    self.held.insert(pos);
                }
                KeyEvent::Release(pos) => {
                    self.held.remove(&pos);
                }
            }
        }
        self.held.iter().copied().collect()
    }

    fn caps_locked(&self) -> bool {
        self.caps_locked
    }

    fn set_caps_locked(&mut self, locked: bool) {
        self.caps_locked = locked;
    }

    fn dropped_events(&self) -> u64 {
        self.queue.dropped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::position_of;

    fn key(c: char) -> KeyPosition {
        position_of(c).unwrap()
    }

    #[test]
    fn test_queue_drops_when_full() {
        let mut queue = EventQueue::with_depth(2);
        assert!(queue.push(KeyEvent::Press(key('a'))));
        assert!(queue.push(KeyEvent::Press(key('b'))));
        assert!(!queue.push(KeyEvent::Press(key('c'))));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dropped(), 1);
        assert_eq!(queue.pop(), Some(KeyEvent::Press(key('a'))));
        assert!(queue.push(KeyEvent::Press(key('c'))));
        assert_eq!(queue.dropped(), 1);
    }

    #[test]
    fn test_poll_drains_events() {
        let mut matrix = QueuedMatrix::new();
        matrix.press(key('a'));
        matrix.press(key('b'));
        assert_eq!(matrix.poll().len(), 2);
        assert_eq!(matrix.poll().len(), 2, "held keys stay active");

        matrix.release(key('a'));
        assert_eq!(matrix.poll(), vec![key('b')]);
        assert!(matrix.queue().is_empty());
    }

    #[test]
    fn test_slow_polling_loses_events() {
        let mut matrix = QueuedMatrix::with_queue_depth(10);
        for c in "abcdefghijkl".chars() {
            matrix.press(key(c));
        }
        assert_eq!(matrix.dropped_events(), 2);
        assert_eq!(matrix.poll().len(), 10);
    }

    #[test]
    fn test_with_options_uses_queue_depth() {
        let options = Options::default().with_queue_depth(3);
        let mut matrix = QueuedMatrix::with_options(&options).unwrap();
        assert_eq!(matrix.queue().depth(), 3);
        for c in "abcd".chars() {
            matrix.press(key(c));
        }
        assert_eq!(matrix.dropped_events(), 1);
        assert_eq!(matrix.poll().len(), 3);

        let default = QueuedMatrix::with_options(&Options::default()).unwrap();
        assert_eq!(default.queue().depth(), DEFAULT_QUEUE_DEPTH);
        assert!(QueuedMatrix::with_options(&Options::default().with_queue_depth(0)).is_err());
    }

    #[test]
    fn test_release_all() {
        let mut matrix = QueuedMatrix::new();
        matrix.press(key('a'));
        matrix.poll();
        matrix.press(key('b'));
        matrix.release_all();
        assert!(matrix.poll().is_empty());
    }

    #[test]
    fn test_caps_lock_round_trip() {
        let mut matrix = QueuedMatrix::new();
        assert!(!matrix.caps_locked());
        matrix.set_caps_locked(true);
        assert!(matrix.caps_locked());
    }
}
