//! Bounded line buffer with cursor, scrolling and snapshot undo.
//!
//! This module provides [`EditBuffer`], an ordered list of lines with a
//! fixed line capacity, a character-based cursor and a ring of full-state
//! snapshots for undo.

use std::ops::Range;

use unicode_width::UnicodeWidthStr;

use super::history::{Cursor, History, Snapshot};
use super::notice::Notice;
use crate::error::Result;
use crate::event::{LogLevel, emit_log};
use crate::options::Options;

/// Cursor movement direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Scroll offsets of the viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Scroll {
    /// First visible line.
    pub top_line: usize,
    /// First visible display column.
    pub left_col: usize,
}

/// Editable line buffer.
///
/// Invariants: there is always at least one line, never more than the line
/// capacity, and the cursor is always inside `[0, line_count) x [0, len]`
/// where `len` is the character length of the cursor's line.
///
/// Every mutating operation pushes a snapshot of the state before the
/// mutation. Operations that cannot make progress (backspace at the origin,
/// forward delete at the very end, enter at capacity) push nothing.
#[derive(Clone, Debug)]
pub struct EditBuffer {
    lines: Vec<String>,
    line_capacity: usize,
    cursor: Cursor,
    scroll: Scroll,
    viewport_rows: usize,
    viewport_cols: usize,
    select_all: bool,
    line_numbers: bool,
    tab_width: usize,
    history: History,
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

impl EditBuffer {
    /// Create a new empty buffer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer from validated options.
    pub fn with_options(options: &Options) -> Result<Self> {
        options.validate()?;
        Ok(Self::from_options(options))
    }

    /// Create a buffer with initial text and default options.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        let mut buf = Self::new();
        buf.set_text(text);
        buf
    }

    fn from_options(options: &Options) -> Self {
        Self {
            lines: vec![String::new()],
            line_capacity: options.line_capacity.max(1),
            cursor: Cursor::default(),
            scroll: Scroll::default(),
            viewport_rows: options.viewport_rows.max(1),
            viewport_cols: options.viewport_cols.max(1),
            select_all: false,
            line_numbers: options.line_numbers,
            tab_width: options.tab_width,
            history: History::with_capacity(options.undo_depth),
        }
    }

    /// Replace the contents, resetting cursor, scroll, selection and history.
    ///
    /// Lines past the line capacity are dropped.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text
            .split('\n')
            .take(self.line_capacity)
            .map(|line| line.trim_end_matches('\r').to_string())
            .collect();
        self.cursor = Cursor::default();
        self.scroll = Scroll::default();
        self.select_all = false;
        self.history.clear();
    }

    /// Full text, lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn line_capacity(&self) -> usize {
        self.line_capacity
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Set the cursor, clamped into the buffer.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        let line = cursor.line.min(self.lines.len() - 1);
        self.cursor = Cursor::new(line, cursor.col.min(self.line_len(line)));
        self.follow_cursor();
    }

    #[must_use]
    pub fn scroll(&self) -> Scroll {
        self.scroll
    }

    #[must_use]
    pub fn is_select_all(&self) -> bool {
        self.select_all
    }

    #[must_use]
    pub fn line_numbers_visible(&self) -> bool {
        self.line_numbers
    }

    #[must_use]
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Number of snapshots available to [`undo`](Self::undo).
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Maximum number of snapshots kept.
    #[must_use]
    pub fn undo_capacity(&self) -> usize {
        self.history.capacity()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Resize the viewport (text rows and columns including the gutter).
    pub fn set_viewport(&mut self, rows: usize, cols: usize) {
        self.viewport_rows = rows.max(1);
        self.viewport_cols = cols.max(1);
        self.follow_cursor();
    }

    /// Width of the line-number gutter, zero when hidden.
    #[must_use]
    pub fn gutter_width(&self) -> usize {
        if self.line_numbers {
            digits(self.lines.len()) + 1
        } else {
            0
        }
    }

    /// Lines currently inside the viewport.
    #[must_use]
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.scroll.top_line + self.viewport_rows).min(self.lines.len());
        self.scroll.top_line..end
    }

    /// Insert a character at the cursor.
    ///
    /// With select-all active, the whole buffer is replaced by `c`; a single
    /// snapshot covers both the clear and the insert. `\n` is an
    /// [`enter`](Self::enter).
    pub fn insert_char(&mut self, c: char) -> Option<Notice> {
        if c == '\n' {
            return self.enter();
        }
        self.checkpoint_for_insert();
        self.insert_at_cursor(c.encode_utf8(&mut [0; 4]));
        None
    }

    /// Insert a run of characters as a single undoable edit.
    ///
    /// Line breaks are dropped; use [`enter`](Self::enter) to split lines.
    pub fn insert_str(&mut self, text: &str) -> Option<Notice> {
        let text: String = text.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
        if text.is_empty() {
            return None;
        }
        self.checkpoint_for_insert();
        self.insert_at_cursor(&text);
        None
    }

    /// Insert `tab_width` spaces.
    pub fn insert_tab(&mut self) -> Option<Notice> {
        self.insert_str(&" ".repeat(self.tab_width))
    }

    /// Delete the character left of the cursor, joining lines at column 0.
    pub fn backspace(&mut self) -> Option<Notice> {
        if self.select_all {
            self.delete_selection();
            return None;
        }

        let Cursor { line, col } = self.cursor;
        if col > 0 {
            self.checkpoint();
            let start = byte_offset(&self.lines[line], col - 1);
            self.lines[line].remove(start);
            self.cursor.col -= 1;
        } else if line > 0 {
            self.checkpoint();
            let current = self.lines.remove(line);
            let join = self.line_len(line - 1);
            self.lines[line - 1].push_str(&current);
            self.cursor = Cursor::new(line - 1, join);
        } else {
            return None;
        }
        self.follow_cursor();
        None
    }

    /// Delete the character at the cursor, joining the next line at the end
    /// of a line.
    pub fn forward_delete(&mut self) -> Option<Notice> {
        if self.select_all {
            self.delete_selection();
            return None;
        }

        let Cursor { line, col } = self.cursor;
        if col < self.line_len(line) {
            self.checkpoint();
            let start = byte_offset(&self.lines[line], col);
            self.lines[line].remove(start);
        } else if line + 1 < self.lines.len() {
            self.checkpoint();
            let next = self.lines.remove(line + 1);
            self.lines[line].push_str(&next);
        } else {
            return None;
        }
        self.follow_cursor();
        None
    }

    /// Split the current line at the cursor.
    pub fn enter(&mut self) -> Option<Notice> {
        if self.lines.len() >= self.line_capacity {
            emit_log(
                LogLevel::Debug,
                &format!("enter refused: buffer at {} lines", self.line_capacity),
            );
            return Some(Notice::BufferFull);
        }

        self.checkpoint();
        let Cursor { line, col } = self.cursor;
        let split = byte_offset(&self.lines[line], col);
        let rest = self.lines[line].split_off(split);
        self.lines.insert(line + 1, rest);
        self.cursor = Cursor::new(line + 1, 0);
        self.follow_cursor();
        None
    }

    /// Move the cursor. Left and Right wrap across line boundaries; Up and
    /// Down clamp the column to the destination line. Clears select-all.
    pub fn move_cursor(&mut self, direction: Direction) {
        self.select_all = false;
        let Cursor { line, col } = self.cursor;
        let last_line = self.lines.len() - 1;

        self.cursor = match direction {
            Direction::Left if col > 0 => Cursor::new(line, col - 1),
            Direction::Left if line > 0 => Cursor::new(line - 1, self.line_len(line - 1)),
            Direction::Right if col < self.line_len(line) => Cursor::new(line, col + 1),
            Direction::Right if line < last_line => Cursor::new(line + 1, 0),
            Direction::Up if line > 0 => Cursor::new(line - 1, col.min(self.line_len(line - 1))),
            Direction::Down if line < last_line => {
                Cursor::new(line + 1, col.min(self.line_len(line + 1)))
            }
            _ => self.cursor,
        };
        self.follow_cursor();
    }

    /// Arm select-all; the next insert or delete replaces the whole buffer.
    pub fn select_all(&mut self) -> Option<Notice> {
        self.select_all = true;
        Some(Notice::SelectedAll)
    }

    /// Disarm select-all. Reports only if a selection was active.
    pub fn clear_selection(&mut self) -> Option<Notice> {
        if self.select_all {
            self.select_all = false;
            Some(Notice::SelectionCleared)
        } else {
            None
        }
    }

    /// Restore the most recent snapshot.
    pub fn undo(&mut self) -> Option<Notice> {
        let Some(snapshot) = self.history.pop() else {
            emit_log(LogLevel::Debug, "undo requested with empty history");
            return Some(Notice::NothingToUndo);
        };

        self.select_all = false;
        self.lines = snapshot.lines;
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.set_cursor(snapshot.cursor);
        Some(Notice::Undone)
    }

    /// Show or hide line numbers.
    pub fn toggle_line_numbers(&mut self) -> Option<Notice> {
        self.line_numbers = !self.line_numbers;
        self.follow_cursor();
        Some(if self.line_numbers {
            Notice::LineNumbersShown
        } else {
            Notice::LineNumbersHidden
        })
    }

    fn checkpoint(&mut self) {
        self.history.push(Snapshot {
            lines: self.lines.clone(),
            cursor: self.cursor,
        });
    }

    fn checkpoint_for_insert(&mut self) {
        self.checkpoint();
        if self.select_all {
            self.clear_contents();
        }
    }

    fn delete_selection(&mut self) {
        self.checkpoint();
        self.clear_contents();
        self.follow_cursor();
    }

    fn clear_contents(&mut self) {
        self.lines.clear();
        self.lines.push(String::new());
        self.cursor = Cursor::default();
        self.select_all = false;
    }

    fn insert_at_cursor(&mut self, text: &str) {
        let Cursor { line, col } = self.cursor;
        let at = byte_offset(&self.lines[line], col);
        self.lines[line].insert_str(at, text);
        self.cursor.col += text.chars().count();
        self.follow_cursor();
    }

    fn line_len(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| l.chars().count())
    }

    fn text_cols(&self) -> usize {
        self.viewport_cols.saturating_sub(self.gutter_width()).max(1)
    }

    /// Adjust scroll offsets so the cursor is inside the viewport.
    fn follow_cursor(&mut self) {
        let line = self.cursor.line;
        if line < self.scroll.top_line {
            self.scroll.top_line = line;
        } else if line >= self.scroll.top_line + self.viewport_rows {
            self.scroll.top_line = line + 1 - self.viewport_rows;
        }

        let prefix = &self.lines[line][..byte_offset(&self.lines[line], self.cursor.col)];
        let x = prefix.width();
        let cols = self.text_cols();
        if x < self.scroll.left_col {
            self.scroll.left_col = x;
        } else if x >= self.scroll.left_col + cols {
            self.scroll.left_col = x + 1 - cols;
        }
    }
}

/// Byte offset of character `col` in `line`, or the line length past the end.
fn byte_offset(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
}

fn digits(mut n: usize) -> usize {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}
