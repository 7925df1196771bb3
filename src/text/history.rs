//! Bounded undo history.

/// Cursor position in the edit buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Line index (0-indexed).
    pub line: usize,
    /// Column in characters (0-indexed).
    pub col: usize,
}

impl Cursor {
    #[must_use]
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

/// Full copy of the buffer contents and cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub lines: Vec<String>,
    pub cursor: Cursor,
}

/// Fixed-capacity ring of snapshots.
///
/// Slots are allocated once. `head` is the slot the next push writes to and
/// `len` the number of live entries; pushing into a full ring overwrites the
/// oldest entry.
#[derive(Clone, Debug)]
pub struct History {
    slots: Vec<Option<Snapshot>>,
    head: usize,
    len: usize,
}

impl History {
    /// Create a history holding at most `capacity` snapshots (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity.max(1)],
            head: 0,
            len: 0,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Push a snapshot, silently dropping the oldest one when full.
    pub fn push(&mut self, snapshot: Snapshot) {
        let capacity = self.capacity();
        self.slots[self.head] = Some(snapshot);
        self.head = (self.head + 1) % capacity;
        self.len = (self.len + 1).min(capacity);
    }

    /// Pop the most recent snapshot.
    pub fn pop(&mut self) -> Option<Snapshot> {
        if self.len == 0 {
            return None;
        }
        let capacity = self.capacity();
        self.head = (self.head + capacity - 1) % capacity;
        self.len -= 1;
        self.slots[self.head].take()
    }

    /// The most recent snapshot, without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Snapshot> {
        if self.len == 0 {
            return None;
        }
        let capacity = self.capacity();
        self.slots[(self.head + capacity - 1) % capacity].as_ref()
    }

    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.head = 0;
        self.len = 0;
    }
}
