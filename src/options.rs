//! Editor and session configuration.

use crate::error::{Error, Result};

/// Default number of lines the edit buffer can hold.
pub const DEFAULT_LINE_CAPACITY: usize = 100;
/// Default number of undo snapshots retained.
pub const DEFAULT_UNDO_DEPTH: usize = 20;
/// Default number of spaces inserted by Tab.
pub const DEFAULT_TAB_WIDTH: usize = 2;
/// Default depth of the matrix collaborator's event queue.
pub const DEFAULT_QUEUE_DEPTH: usize = 10;

/// Options for the edit buffer and session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Maximum number of lines; Enter is refused at capacity.
    pub line_capacity: usize,
    /// Undo ring capacity.
    pub undo_depth: usize,
    /// Spaces inserted per Tab.
    pub tab_width: usize,
    /// Visible text rows.
    pub viewport_rows: usize,
    /// Visible text columns, including the line-number gutter.
    pub viewport_cols: usize,
    /// Show line numbers on start.
    pub line_numbers: bool,
    /// Depth of the simulated matrix event queue.
    pub queue_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            line_capacity: DEFAULT_LINE_CAPACITY,
            undo_depth: DEFAULT_UNDO_DEPTH,
            tab_width: DEFAULT_TAB_WIDTH,
            viewport_rows: 6,
            viewport_cols: 40,
            line_numbers: false,
            queue_depth: DEFAULT_QUEUE_DEPTH,
        }
    }
}

impl Options {
    /// Check that the options describe a usable editor.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            (self.line_capacity, "line_capacity"),
            (self.undo_depth, "undo_depth"),
            (self.viewport_rows, "viewport_rows"),
            (self.viewport_cols, "viewport_cols"),
            (self.queue_depth, "queue_depth"),
        ];
        for (value, name) in checks {
            if value == 0 {
                return Err(Error::InvalidOptions(format!("{name} must be at least 1")));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn with_line_capacity(mut self, line_capacity: usize) -> Self {
        self.line_capacity = line_capacity;
        self
    }

    #[must_use]
    pub fn with_undo_depth(mut self, undo_depth: usize) -> Self {
        self.undo_depth = undo_depth;
        self
    }

    #[must_use]
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, rows: usize, cols: usize) -> Self {
        self.viewport_rows = rows;
        self.viewport_cols = cols;
        self
    }

    #[must_use]
    pub fn with_line_numbers(mut self, line_numbers: bool) -> Self {
        self.line_numbers = line_numbers;
        self
    }

    #[must_use]
    pub fn with_queue_depth(mut self, queue_depth: usize) -> Self {
        self.queue_depth = queue_depth;
        self
    }
}
