//! Rising-edge detection for modifier combinations.
//!
//! A combo fires on the poll where all of its flags become held together,
//! not on every poll while they stay held. The context is threaded through
//! each call instead of living in globals, so every call is deterministic.

use super::state::{KeyFlags, SemanticState};

/// The Fn+Shift combo, used to toggle caps lock.
pub const CAPS_LOCK_COMBO: KeyFlags = KeyFlags::FN.union(KeyFlags::SHIFT);

/// Previous frame's flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeContext {
    previous: KeyFlags,
}

impl EdgeContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn previous(&self) -> KeyFlags {
        self.previous
    }

    #[must_use]
    pub fn previous_fn(&self) -> bool {
        self.previous.contains(KeyFlags::FN)
    }

    #[must_use]
    pub fn previous_shift(&self) -> bool {
        self.previous.contains(KeyFlags::SHIFT)
    }
}

/// Detect a rising edge of `combo`.
///
/// Returns whether the combo just activated and the context for the next
/// poll. A fully released poll resets the context to empty, so releasing
/// and pressing the combo again always fires exactly once.
#[must_use]
pub fn detect_edge(
    combo: KeyFlags,
    current: &SemanticState,
    context: EdgeContext,
) -> (bool, EdgeContext) {
    if current.is_released() {
        return (false, EdgeContext::default());
    }

    let fired = !combo.is_empty() && current.has(combo) && !context.previous.contains(combo);
    (
        fired,
        EdgeContext {
            previous: current.flags,
        },
    )
}

/// Detect the rising edge of Fn+Shift.
#[must_use]
pub fn detect_combo_edge(current: &SemanticState, context: EdgeContext) -> (bool, EdgeContext) {
    detect_edge(CAPS_LOCK_COMBO, current, context)
}
