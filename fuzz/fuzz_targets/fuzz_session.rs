//! Fuzz target for the full input pipeline.
//!
//! Feeds arbitrary press/release/poll sequences into a session and checks
//! that the buffer stays consistent.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use matrixpad::keymap::{COLS, KeyPosition, ROWS};
use matrixpad::{QueuedMatrix, Session};

#[derive(Arbitrary, Debug)]
enum Step {
    Press(u8),
    Release(u8),
    ReleaseAll,
    Tick,
}

fn position(index: u8) -> Option<KeyPosition> {
    let index = usize::from(index) % (ROWS * COLS);
    KeyPosition::new((index / COLS) as u8, (index % COLS) as u8).ok()
}

fuzz_target!(|steps: Vec<Step>| {
    let mut session = Session::new(QueuedMatrix::new());
    for step in steps.iter().take(512) {
        match *step {
            Step::Press(i) => {
                if let Some(pos) = position(i) {
                    session.source_mut().press(pos);
                }
            }
            Step::Release(i) => {
                if let Some(pos) = position(i) {
                    session.source_mut().release(pos);
                }
            }
            Step::ReleaseAll => session.source_mut().release_all(),
            Step::Tick => {
                session.tick();
            }
        }

        let buffer = session.buffer();
        let cursor = buffer.cursor();
        assert!(buffer.line_count() <= buffer.line_capacity());
        assert!(cursor.line < buffer.line_count());
        let len = buffer.line(cursor.line).map_or(0, |l| l.chars().count());
        assert!(cursor.col <= len);
    }
});
