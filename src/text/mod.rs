//! Line-based text editing with bounded undo.
//!
//! Key types:
//!
//! - [`EditBuffer`]: bounded list of lines with cursor, scrolling,
//!   select-all and snapshot undo
//! - [`History`]: fixed-capacity ring of [`Snapshot`]s
//! - [`Notice`]: user-visible outcome of an operation
//!
//! # Examples
//!
//! ```
//! use matrixpad::text::{EditBuffer, Notice};
//!
//! let mut editor = EditBuffer::with_text("first\nsecond");
//! editor.move_cursor(matrixpad::text::Direction::Down);
//! editor.backspace();
//! assert_eq!(editor.text(), "firstsecond");
//! assert_eq!(editor.line_count(), 1);
//!
//! assert_eq!(editor.undo(), Some(Notice::Undone));
//! assert_eq!(editor.undo(), Some(Notice::NothingToUndo));
//! ```

mod edit;
mod history;
mod notice;

pub use edit::{Direction, EditBuffer, Scroll};
pub use history::{Cursor, History, Snapshot};
pub use notice::Notice;
