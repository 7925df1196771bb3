//! Layer resolution: active matrix positions to [`SemanticState`].

use super::state::{KeyFlags, KeyModifiers, SemanticState};
use crate::event::{LogLevel, emit_log};
use crate::keymap::{KeyPosition, KeyValue, SpecialKey, hid, lookup};

/// Resolve the active positions of one poll.
///
/// Ctrl, Shift and caps lock are OR-combined: any of them selects the
/// shifted layer, and the layer is chosen once for the whole poll so the
/// result does not depend on the order positions are reported in. Word and
/// HID entries keep the report order.
///
/// There is no rollover limit here; every reported position is resolved.
#[must_use]
pub fn resolve(active: &[KeyPosition], caps_locked: bool) -> SemanticState {
    let mut state = SemanticState {
        press_count: active.len(),
        ..SemanticState::default()
    };

    let values: Vec<KeyValue> = active
        .iter()
        .filter_map(|&pos| {
            let value = lookup(pos);
            if value.is_none() {
                emit_log(
                    LogLevel::Warn,
                    &format!("ignoring key position ({}, {}) with no table entry", pos.row, pos.col),
                );
            }
            value
        })
        .collect();

    for key in values.iter().filter_map(KeyValue::special) {
        apply_special(&mut state, key);
    }

    let use_shifted = caps_locked || state.ctrl() || state.shift();

    for value in values {
        match value {
            KeyValue::Char { base, shifted, hid } => {
                state.word.push(if use_shifted { shifted } else { base });
                state.hid_codes.push(hid);
                if hid == hid::SPACE {
                    state.flags |= KeyFlags::SPACE;
                }
            }
            KeyValue::Special(key) => {
                if let Some(code) = key.hid_code() {
                    state.hid_codes.push(code);
                }
            }
        }
    }

    state
}

/// Flags that describe what is held, as opposed to what was just pressed.
const HELD_FLAGS: KeyFlags = KeyFlags::FN
    .union(KeyFlags::SHIFT)
    .union(KeyFlags::CTRL)
    .union(KeyFlags::OPT)
    .union(KeyFlags::ALT);

/// Resolve a poll for editing.
///
/// Layer keys and modifiers come from every active position, but the word,
/// the HID codes and the Tab/Enter/Backspace/space flags come only from
/// `pressed`, the keys that went down this poll. Holding `a` and then
/// pressing `b` therefore types `b` once instead of `ab` again.
#[must_use]
pub fn resolve_new_presses(
    active: &[KeyPosition],
    pressed: &[KeyPosition],
    caps_locked: bool,
) -> SemanticState {
    let held = resolve(active, caps_locked);
    let fresh = resolve(pressed, caps_locked || held.ctrl() || held.shift());

    SemanticState {
        flags: (held.flags & HELD_FLAGS) | (fresh.flags - HELD_FLAGS),
        modifiers: held.modifiers,
        word: fresh.word,
        hid_codes: fresh.hid_codes,
        modifier_codes: held.modifier_codes,
        press_count: held.press_count,
    }
}

fn apply_special(state: &mut SemanticState, key: SpecialKey) {
    let (flag, modifier) = match key {
        SpecialKey::Tab => (KeyFlags::TAB, None),
        SpecialKey::Enter => (KeyFlags::ENTER, None),
        SpecialKey::Backspace => (KeyFlags::DEL, None),
        SpecialKey::Fn => (KeyFlags::FN, None),
        SpecialKey::Opt => (KeyFlags::OPT, None),
        SpecialKey::Ctrl => (KeyFlags::CTRL, Some(KeyModifiers::CTRL)),
        SpecialKey::Shift => (KeyFlags::SHIFT, Some(KeyModifiers::SHIFT)),
        SpecialKey::Alt => (KeyFlags::ALT, Some(KeyModifiers::ALT)),
    };
    state.flags |= flag;
    if let Some(modifier) = modifier {
        state.modifiers |= modifier;
        if let Some(code) = key.modifier_code() {
            state.modifier_codes.push(code);
        }
    }
}

/// Result of comparing a poll against the previous one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PollSummary {
    /// The active set differs from the previous poll by membership.
    pub changed: bool,
    /// Size of the active set.
    pub press_count: usize,
    /// Positions active now that were not active in the previous poll.
    pub pressed: Vec<KeyPosition>,
}

impl PollSummary {
    /// At least one key is down.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press_count > 0
    }
}

/// Tracks the previous active set for change detection.
#[derive(Clone, Debug, Default)]
pub struct PollTracker {
    previous: Vec<KeyPosition>,
}

impl PollTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this poll's active set and report whether it changed.
    ///
    /// Comparison is by membership: a set that swaps one key for another
    /// is a change even though the count is the same.
    pub fn observe(&mut self, active: &[KeyPosition]) -> PollSummary {
        let mut current = active.to_vec();
        current.sort_unstable();
        current.dedup();

        let changed = current != self.previous;
        let press_count = current.len();
        let pressed = active
            .iter()
            .copied()
            .filter(|pos| self.previous.binary_search(pos).is_err())
            .fold(Vec::new(), |mut acc, pos| {
                if !acc.contains(&pos) {
                    acc.push(pos);
                }
                acc
            });
        self.previous = current;

        PollSummary {
            changed,
            press_count,
            pressed,
        }
    }

    /// The active set recorded by the last poll, sorted.
    #[must_use]
    pub fn previous(&self) -> &[KeyPosition] {
        &self.previous
    }

    /// Forget the previous set, so the next non-empty poll counts as changed.
    pub fn reset(&mut self) {
        self.previous.clear();
    }
}
