//! Priority dispatch from a resolved poll to editor actions.
//!
//! Stages run in order and the first one that claims the poll wins:
//!
//! 1. **Fn** claims every poll with Fn held, even when nothing on the Fn
//!    layer matches. Text and backspace are suppressed.
//! 2. **Ctrl** claims the poll when Ctrl is held together with a shortcut
//!    key (Z undo, A select all, S save, L line numbers).
//! 3. **Normal** handles Tab, text, Backspace and Enter, in that order.

use crate::input::{FnAction, SemanticState, remap_fn_layer};
use crate::keymap::hid;
use crate::text::Direction;

/// An editor-level action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    InsertChar(char),
    InsertTab,
    Backspace,
    ForwardDelete,
    Enter,
    MoveCursor(Direction),
    SelectAll,
    ClearSelection,
    Undo,
    Save,
    ToggleLineNumbers,
    /// F1-F10; no buffer effect, passed through to the application.
    FunctionKey(u8),
}

impl From<FnAction> for Action {
    fn from(action: FnAction) -> Self {
        match action {
            FnAction::ArrowUp => Self::MoveCursor(Direction::Up),
            FnAction::ArrowLeft => Self::MoveCursor(Direction::Left),
            FnAction::ArrowDown => Self::MoveCursor(Direction::Down),
            FnAction::ArrowRight => Self::MoveCursor(Direction::Right),
            FnAction::Escape => Self::ClearSelection,
            FnAction::FunctionKey(n) => Self::FunctionKey(n),
            FnAction::ForwardDelete => Self::ForwardDelete,
        }
    }
}

/// The stage that claimed a poll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Fn,
    Ctrl,
    Normal,
}

/// Actions for one poll, tagged with the stage that produced them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dispatch {
    pub stage: Stage,
    pub actions: Vec<Action>,
}

impl Dispatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Map a Ctrl shortcut key, by HID code, to its action.
#[must_use]
pub fn ctrl_shortcut(code: u8) -> Option<Action> {
    match code {
        hid::KEY_Z => Some(Action::Undo),
        hid::KEY_A => Some(Action::SelectAll),
        hid::KEY_S => Some(Action::Save),
        hid::KEY_L => Some(Action::ToggleLineNumbers),
        _ => None,
    }
}

/// Run the stages in priority order.
#[must_use]
pub fn dispatch(state: &SemanticState) -> Dispatch {
    fn_stage(state)
        .or_else(|| ctrl_stage(state))
        .unwrap_or_else(|| normal_stage(state))
}

fn fn_stage(state: &SemanticState) -> Option<Dispatch> {
    state.fn_key().then(|| Dispatch {
        stage: Stage::Fn,
        actions: remap_fn_layer(state).into_iter().map(Action::from).collect(),
    })
}

fn ctrl_stage(state: &SemanticState) -> Option<Dispatch> {
    if !state.ctrl() {
        return None;
    }
    let actions: Vec<Action> = state
        .hid_codes
        .iter()
        .filter_map(|&code| ctrl_shortcut(code))
        .collect();
    (!actions.is_empty()).then_some(Dispatch {
        stage: Stage::Ctrl,
        actions,
    })
}

fn normal_stage(state: &SemanticState) -> Dispatch {
    let mut actions = Vec::with_capacity(state.word.len() + 3);
    if state.tab() {
        actions.push(Action::InsertTab);
    }
    actions.extend(state.word.iter().map(|&c| Action::InsertChar(c)));
    if state.del() {
        actions.push(Action::Backspace);
    }
    if state.enter() {
        actions.push(Action::Enter);
    }
    Dispatch {
        stage: Stage::Normal,
        actions,
    }
}
