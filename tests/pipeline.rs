//! End-to-end tests: matrix events through resolution, dispatch and the
//! edit buffer.

mod common;

use common::{chord, key, session, special, type_text};
use matrixpad::input::{EdgeContext, detect_combo_edge, remap_fn_layer, resolve};
use matrixpad::keymap::SpecialKey;
use matrixpad::{Action, Cursor, EditBuffer, FnAction, KeyModifiers, Notice, Stage};

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn plain_key_resolves_to_base_layer() {
    let state = resolve(&[key('a')], false);
    assert_eq!(state.word, vec!['a']);
    assert_eq!(state.hid_codes, vec![0x04]);
    assert!(state.flags.is_empty());
}

#[test]
fn ctrl_forces_shifted_layer_but_not_hid() {
    let state = resolve(&[special(SpecialKey::Ctrl), key('a')], false);
    assert_eq!(state.word, vec!['A']);
    assert_eq!(state.modifiers, KeyModifiers::CTRL);
    assert_eq!(state.modifiers.bits(), 0x01);
    assert_eq!(state.hid_codes, vec![0x04]);
}

#[test]
fn fn_semicolon_is_one_arrow_up() {
    let state = resolve(&[special(SpecialKey::Fn), key(';')], false);
    assert!(state.fn_key());
    assert!(state.word.contains(&';'));
    assert_eq!(remap_fn_layer(&state), vec![FnAction::ArrowUp]);

    let result = matrixpad::dispatch(&state);
    assert_eq!(result.stage, Stage::Fn);
    assert!(
        !result
            .actions
            .iter()
            .any(|a| matches!(a, Action::InsertChar(_))),
        "Fn layer must not insert text"
    );
}

#[test]
fn fn_backspace_is_forward_delete() {
    let state = resolve(
        &[special(SpecialKey::Fn), special(SpecialKey::Backspace)],
        false,
    );
    assert_eq!(remap_fn_layer(&state), vec![FnAction::ForwardDelete]);
    assert_eq!(matrixpad::dispatch(&state).actions, vec![Action::ForwardDelete]);
}

#[test]
fn combo_fires_once_per_press_release_cycle() {
    let held = resolve(&[special(SpecialKey::Fn), special(SpecialKey::Shift)], false);
    let released = resolve(&[], false);
    let mut ctx = EdgeContext::new();
    let mut fires = 0;
    for _ in 0..10 {
        for state in [&held, &held, &held, &released] {
            let (fired, next) = detect_combo_edge(state, ctx);
            fires += usize::from(fired);
            ctx = next;
        }
    }
    assert_eq!(fires, 10);
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn undo_ring_keeps_twenty_snapshots() {
    let mut buf = EditBuffer::new();
    for c in "abcdefghijklmnopqrstu".chars() {
        buf.insert_char(c);
    }
    for _ in 0..20 {
        assert_eq!(buf.undo(), Some(Notice::Undone));
    }
    assert_eq!(buf.text(), "a");
    assert_eq!(buf.undo(), Some(Notice::NothingToUndo));
    assert_eq!(buf.undo().map(|n| n.to_string()).as_deref(), Some("nothing to undo"));
    assert_eq!(buf.text(), "a");
}

#[test]
fn backspace_at_line_start_joins() {
    let mut buf = EditBuffer::with_text("one\ntwo\nthree");
    buf.set_cursor(Cursor::new(2, 0));
    let before = buf.line_count();
    buf.backspace();
    assert_eq!(buf.line_count(), before - 1);
    assert_eq!(buf.text(), "one\ntwothree");
    assert_eq!(buf.cursor(), Cursor::new(1, 3));
}

// ============================================================================
// Full sessions
// ============================================================================

#[test]
fn typing_a_small_document() {
    let mut session = session();
    type_text(&mut session, "Hello, World!");
    chord(&mut session, &[special(SpecialKey::Enter)]);
    chord(&mut session, &[special(SpecialKey::Tab)]);
    type_text(&mut session, "x = 1;");
    assert_eq!(session.buffer().text(), "Hello, World!\n  x = 1;");
    assert_eq!(session.buffer().cursor(), Cursor::new(1, 8));
}

#[test]
fn navigating_and_editing_with_fn_layer() {
    let mut session = session();
    type_text(&mut session, "ac");
    chord(&mut session, &[special(SpecialKey::Enter)]);
    type_text(&mut session, "second");

    let fn_key = special(SpecialKey::Fn);
    chord(&mut session, &[fn_key, key(';')]); // up
    assert_eq!(session.buffer().cursor(), Cursor::new(0, 2));
    chord(&mut session, &[fn_key, key(',')]); // left
    type_text(&mut session, "b");
    assert_eq!(session.buffer().text(), "abc\nsecond");

    chord(&mut session, &[fn_key, key('/')]); // right, to end of line
    chord(&mut session, &[fn_key, special(SpecialKey::Backspace)]); // join
    assert_eq!(session.buffer().text(), "abcsecond");
}

#[test]
fn caps_lock_toggle_through_session() {
    let mut session = session();
    let combo = [special(SpecialKey::Fn), special(SpecialKey::Shift)];
    for round in 0..3 {
        let report = chord(&mut session, &combo);
        assert!(report.combo_fired, "round {round} should toggle");
    }
    assert!(matrixpad::MatrixSource::caps_locked(session.source()));
    type_text(&mut session, "q");
    assert_eq!(session.buffer().text(), "Q");
}

#[test]
fn ctrl_shortcuts_and_notices() {
    let mut session = session();
    type_text(&mut session, "keep");
    let ctrl = special(SpecialKey::Ctrl);

    let report = chord(&mut session, &[ctrl, key('l')]);
    assert_eq!(report.notices, vec![Notice::LineNumbersShown]);
    assert!(session.buffer().line_numbers_visible());

    let report = chord(&mut session, &[ctrl, key('a')]);
    assert_eq!(report.notices, vec![Notice::SelectedAll]);
    let report = chord(&mut session, &[special(SpecialKey::Fn), key('`')]);
    assert_eq!(report.notices, vec![Notice::SelectionCleared]);
    type_text(&mut session, "!");
    assert_eq!(session.buffer().text(), "keep!");

    let report = chord(&mut session, &[ctrl, key('z')]);
    assert_eq!(report.notices, vec![Notice::Undone]);
    assert_eq!(session.buffer().text(), "keep");
}

#[test]
fn enter_at_capacity_reports_buffer_full() {
    common::setup_test_logging();
    let options = matrixpad::Options::default().with_line_capacity(2);
    let mut session =
        matrixpad::Session::with_options(matrixpad::QueuedMatrix::new(), &options).unwrap();
    chord(&mut session, &[special(SpecialKey::Enter)]);
    let report = chord(&mut session, &[special(SpecialKey::Enter)]);
    assert_eq!(report.notices, vec![Notice::BufferFull]);
    assert_eq!(session.buffer().line_count(), 2);
}

#[test]
fn queue_overflow_is_observable() {
    common::setup_test_logging();
    let options = matrixpad::Options::default();
    let source = matrixpad::QueuedMatrix::with_options(&options).unwrap();
    let mut session = matrixpad::Session::with_options(source, &options).unwrap();
    for c in "qwertyuiopasdf".chars() {
        session.source_mut().press(key(c));
    }
    let report = session.tick();
    assert_eq!(report.dropped_events, 4);
    assert_eq!(session.buffer().line(0).map(str::len), Some(10));
}
