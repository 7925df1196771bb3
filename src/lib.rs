//! matrixpad - key-matrix input and a small undoable line editor
//!
//! Turns the per-poll active positions of a 4x14 key matrix into a semantic
//! key state (text, modifiers, HID codes), layers a virtual Fn layer on top
//! (arrows, escape, F1-F10, forward delete) and drives a bounded line
//! buffer with snapshot undo.
//!
//! # Examples
//!
//! ```
//! use matrixpad::keymap::position_of;
//! use matrixpad::matrix::QueuedMatrix;
//! use matrixpad::Session;
//!
//! let mut session = Session::new(QueuedMatrix::new());
//! for c in "hi".chars() {
//!     let pos = position_of(c).unwrap();
//!     session.source_mut().press(pos);
//!     session.tick();
//!     session.source_mut().release(pos);
//!     session.tick();
//! }
//! assert_eq!(session.buffer().text(), "hi");
//! ```

// Crate-level lint configuration
#![allow(clippy::module_name_repetitions)] // Allow input::InputState style names
#![allow(clippy::struct_excessive_bools)] // Editor state carries several flags
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::cast_possible_truncation)] // Matrix coordinates fit in u8
#![allow(clippy::must_use_candidate)] // Editing ops return optional notices
#![allow(clippy::unnecessary_wraps)] // Uniform Option<Notice> across editor ops
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine

pub mod dispatch;
pub mod error;
pub mod event;
pub mod input;
pub mod keymap;
pub mod matrix;
pub mod options;
pub mod session;
pub mod text;

// Re-export core types at crate root
pub use dispatch::{Action, Dispatch, Stage, dispatch};
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use options::Options;
pub use session::{Session, TickReport};

// Re-export input types
pub use input::{
    EdgeContext, FnAction, KeyFlags, KeyModifiers, SemanticState, detect_combo_edge,
    remap_fn_layer, resolve,
};
pub use keymap::{KeyPosition, KeyValue, SpecialKey};
pub use matrix::{MatrixSource, QueuedMatrix};

// Re-export editing types
pub use text::{Cursor, Direction, EditBuffer, Notice};
