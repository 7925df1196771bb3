//! The virtual Fn layer.
//!
//! The base hardware has no arrow, escape, function or forward-delete keys.
//! While Fn is held, a handful of keys are reinterpreted as those actions.

use super::state::SemanticState;
use crate::keymap::hid;

/// Actions produced by the Fn layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FnAction {
    ArrowUp,
    ArrowLeft,
    ArrowDown,
    ArrowRight,
    Escape,
    /// Function key F1-F10.
    FunctionKey(u8),
    ForwardDelete,
}

impl FnAction {
    /// Check if this is an arrow action.
    #[must_use]
    pub fn is_arrow(&self) -> bool {
        matches!(
            self,
            Self::ArrowUp | Self::ArrowLeft | Self::ArrowDown | Self::ArrowRight
        )
    }
}

/// Map a key, by HID code, to its Fn-layer action.
///
/// Keys are matched by HID code rather than by the character in the word,
/// so Shift, Ctrl or caps lock held alongside Fn cannot change the result.
#[must_use]
pub fn fn_action_for(code: u8) -> Option<FnAction> {
    match code {
        hid::SEMICOLON => Some(FnAction::ArrowUp),
        hid::COMMA => Some(FnAction::ArrowLeft),
        hid::DOT => Some(FnAction::ArrowDown),
        hid::SLASH => Some(FnAction::ArrowRight),
        hid::GRAVE => Some(FnAction::Escape),
        hid::KEY_1..=hid::KEY_0 => Some(FnAction::FunctionKey(code - hid::KEY_1 + 1)),
        _ => None,
    }
}

/// Reinterpret a poll through the Fn layer.
///
/// Returns nothing unless Fn is held. Backspace becomes a single
/// [`FnAction::ForwardDelete`], never a backspace.
#[must_use]
pub fn remap_fn_layer(state: &SemanticState) -> Vec<FnAction> {
    if !state.fn_key() {
        return Vec::new();
    }

    let mut actions: Vec<FnAction> = state
        .hid_codes
        .iter()
        .filter_map(|&code| fn_action_for(code))
        .collect();
    if state.del() {
        actions.push(FnAction::ForwardDelete);
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::resolve;
    use crate::keymap::{KeyPosition, SpecialKey, position_of, position_of_special};

    fn with_fn(keys: &str, extra: &[SpecialKey]) -> SemanticState {
        let mut active: Vec<KeyPosition> = vec![position_of_special(SpecialKey::Fn).unwrap()];
        active.extend(extra.iter().map(|&k| position_of_special(k).unwrap()));
        active.extend(keys.chars().map(|c| position_of(c).unwrap()));
        resolve(&active, false)
    }

    #[test]
    fn test_semicolon_is_arrow_up() {
        let state = with_fn(";", &[]);
        assert!(state.fn_key());
        assert!(state.word.contains(&';'));
        assert_eq!(remap_fn_layer(&state), vec![FnAction::ArrowUp]);
    }

    #[test]
    fn test_arrow_cluster() {
        let state = with_fn(",./", &[]);
        let actions = remap_fn_layer(&state);
        assert_eq!(
            actions,
            vec![FnAction::ArrowLeft, FnAction::ArrowDown, FnAction::ArrowRight]
        );
        assert!(actions.iter().all(FnAction::is_arrow));
    }

    #[test]
    fn test_escape_and_function_keys() {
        assert_eq!(remap_fn_layer(&with_fn("`", &[])), vec![FnAction::Escape]);
        for (i, c) in "123456789".chars().enumerate() {
            let expected = FnAction::FunctionKey(u8::try_from(i + 1).unwrap());
            assert_eq!(remap_fn_layer(&with_fn(&c.to_string(), &[])), vec![expected]);
        }
        assert_eq!(
            remap_fn_layer(&with_fn("0", &[])),
            vec![FnAction::FunctionKey(10)]
        );
    }

    #[test]
    fn test_backspace_becomes_forward_delete() {
        let state = with_fn("", &[SpecialKey::Backspace]);
        assert_eq!(remap_fn_layer(&state), vec![FnAction::ForwardDelete]);
    }

    #[test]
    fn test_shift_does_not_disturb_fn_layer() {
        let state = with_fn(";", &[SpecialKey::Shift]);
        assert_eq!(state.word, vec![':']);
        assert_eq!(remap_fn_layer(&state), vec![FnAction::ArrowUp]);

        let state = with_fn("1", &[SpecialKey::Ctrl]);
        assert_eq!(remap_fn_layer(&state), vec![FnAction::FunctionKey(1)]);
    }

    #[test]
    fn test_unmapped_keys_produce_nothing() {
        assert!(remap_fn_layer(&with_fn("abc", &[])).is_empty());
        assert!(remap_fn_layer(&with_fn("", &[SpecialKey::Enter])).is_empty());
    }

    #[test]
    fn test_no_actions_without_fn() {
        let active: Vec<KeyPosition> = ";`1".chars().map(|c| position_of(c).unwrap()).collect();
        let state = resolve(&active, false);
        assert!(remap_fn_layer(&state).is_empty());
    }
}
