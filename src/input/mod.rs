//! Key-matrix input resolution.
//!
//! A poll's active positions go through three stages:
//!
//! - [`resolve`] turns them into a [`SemanticState`] (flags, modifier
//!   bitmask, printable word, HID codes).
//! - [`detect_combo_edge`] spots the poll where a modifier combination
//!   (Fn+Shift by default) becomes held.
//! - [`remap_fn_layer`] reinterprets the poll through the virtual Fn layer.
//!
//! # Examples
//!
//! ```
//! use matrixpad::input::{FnAction, remap_fn_layer, resolve};
//! use matrixpad::keymap::{SpecialKey, position_of, position_of_special};
//!
//! let fn_key = position_of_special(SpecialKey::Fn).unwrap();
//! let semicolon = position_of(';').unwrap();
//!
//! let state = resolve(&[fn_key, semicolon], false);
//! assert_eq!(remap_fn_layer(&state), vec![FnAction::ArrowUp]);
//! ```

mod edge;
mod fn_layer;
mod resolver;
mod state;

pub use edge::{CAPS_LOCK_COMBO, EdgeContext, detect_combo_edge, detect_edge};
pub use fn_layer::{FnAction, fn_action_for, remap_fn_layer};
pub use resolver::{PollSummary, PollTracker, resolve, resolve_new_presses};
pub use state::{KeyFlags, KeyModifiers, SemanticState};
