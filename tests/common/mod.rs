//! Shared helpers for integration tests.

#![allow(dead_code)] // Not every test binary uses every helper

use std::sync::Once;

use matrixpad::event::{LogLevel, set_log_callback};
use matrixpad::keymap::{KeyPosition, SpecialKey, position_of, position_of_special};
use matrixpad::{QueuedMatrix, Session, TickReport};

/// Route library logs into `tracing` once per test binary.
pub fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
        set_log_callback(|level, msg| match level {
            LogLevel::Debug => tracing::debug!("{msg}"),
            LogLevel::Info => tracing::info!("{msg}"),
            LogLevel::Warn => tracing::warn!("{msg}"),
            LogLevel::Error => tracing::error!("{msg}"),
        });
    });
}

pub fn key(c: char) -> KeyPosition {
    position_of(c).unwrap_or_else(|| panic!("{c:?} is not on the matrix"))
}

pub fn special(k: SpecialKey) -> KeyPosition {
    position_of_special(k).unwrap_or_else(|| panic!("{k:?} is not on the matrix"))
}

pub fn session() -> Session<QueuedMatrix> {
    setup_test_logging();
    Session::new(QueuedMatrix::new())
}

/// Press a chord, tick, release everything, tick. Returns the press tick.
pub fn chord(session: &mut Session<QueuedMatrix>, keys: &[KeyPosition]) -> TickReport {
    for &k in keys {
        session.source_mut().press(k);
    }
    let report = session.tick();
    session.source_mut().release_all();
    session.tick();
    report
}

/// Type each character as its own press/release.
pub fn type_text(session: &mut Session<QueuedMatrix>, text: &str) {
    for c in text.chars() {
        let mut keys = vec![key(c)];
        let shifted = c.is_ascii_uppercase() || "~!@#$%^&*()_+{}|:\"<>?".contains(c);
        if shifted {
            keys.insert(0, special(SpecialKey::Shift));
        }
        chord(session, &keys);
    }
}
