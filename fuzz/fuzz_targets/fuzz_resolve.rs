//! Fuzz target for matrix resolution.
//!
//! Arbitrary (including out-of-range) positions must never panic, and every
//! recognized printable key contributes exactly one character.

#![no_main]

use libfuzzer_sys::fuzz_target;
use matrixpad::input::{remap_fn_layer, resolve};
use matrixpad::keymap::{KeyPosition, lookup};

fuzz_target!(|data: &[u8]| {
    let Some((&caps, pairs)) = data.split_first() else {
        return;
    };
    let active: Vec<KeyPosition> = pairs
        .chunks_exact(2)
        .map(|pair| KeyPosition {
            row: pair[0],
            col: pair[1],
        })
        .collect();

    let state = resolve(&active, caps & 1 == 1);
    assert!(state.hid_codes.len() >= state.word.len());

    let printable = active
        .iter()
        .filter(|&&pos| lookup(pos).is_some_and(|v| v.is_char()))
        .count();
    assert_eq!(state.word.len(), printable);

    let _ = remap_fn_layer(&state);
    let _ = matrixpad::dispatch(&state);
});
