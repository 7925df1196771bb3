//! Static key-value table for the 4x14 key matrix.
//!
//! Every matrix position maps to either a printable key (base character,
//! shifted character and the HID usage code of the physical key) or a
//! special key. The table is exhaustive: all 56 positions have an entry.

use crate::error::{Error, Result};

/// Number of matrix rows.
pub const ROWS: usize = 4;
/// Number of matrix columns.
pub const COLS: usize = 14;

/// HID usage codes (keyboard page) for the non-printable keys and the
/// printable keys the Fn layer reinterprets.
pub mod hid {
    pub const ENTER: u8 = 0x28;
    pub const ESCAPE: u8 = 0x29;
    pub const BACKSPACE: u8 = 0x2A;
    pub const TAB: u8 = 0x2B;
    pub const SPACE: u8 = 0x2C;
    pub const SEMICOLON: u8 = 0x33;
    pub const GRAVE: u8 = 0x35;
    pub const COMMA: u8 = 0x36;
    pub const DOT: u8 = 0x37;
    pub const SLASH: u8 = 0x38;
    pub const KEY_1: u8 = 0x1E;
    pub const KEY_0: u8 = 0x27;
    pub const KEY_A: u8 = 0x04;
    pub const KEY_L: u8 = 0x0F;
    pub const KEY_S: u8 = 0x16;
    pub const KEY_Z: u8 = 0x1D;

    /// Left Ctrl modifier usage.
    pub const LEFT_CTRL: u8 = 0xE0;
    /// Left Shift modifier usage.
    pub const LEFT_SHIFT: u8 = 0xE1;
    /// Left Alt modifier usage.
    pub const LEFT_ALT: u8 = 0xE2;
}

/// One physical switch in the matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPosition {
    pub row: u8,
    pub col: u8,
}

impl KeyPosition {
    /// Create a position, rejecting coordinates outside the matrix.
    pub fn new(row: u8, col: u8) -> Result<Self> {
        if usize::from(row) < ROWS && usize::from(col) < COLS {
            Ok(Self { row, col })
        } else {
            Err(Error::OutOfBounds { row, col })
        }
    }

    /// Iterate over every position of the matrix, row-major.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ROWS as u8).flat_map(|row| (0..COLS as u8).map(move |col| Self { row, col }))
    }
}

/// Keys that do not produce a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpecialKey {
    Tab,
    Enter,
    Backspace,
    Fn,
    Shift,
    Ctrl,
    Alt,
    Opt,
}

impl SpecialKey {
    /// HID usage code for keys that report one in `hid_codes`.
    #[must_use]
    pub fn hid_code(self) -> Option<u8> {
        match self {
            Self::Tab => Some(hid::TAB),
            Self::Enter => Some(hid::ENTER),
            Self::Backspace => Some(hid::BACKSPACE),
            _ => None,
        }
    }

    /// Modifier usage code for Ctrl, Shift and Alt.
    #[must_use]
    pub fn modifier_code(self) -> Option<u8> {
        match self {
            Self::Ctrl => Some(hid::LEFT_CTRL),
            Self::Shift => Some(hid::LEFT_SHIFT),
            Self::Alt => Some(hid::LEFT_ALT),
            _ => None,
        }
    }
}

/// Value attached to a matrix position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyValue {
    /// A printable key (space included).
    Char { base: char, shifted: char, hid: u8 },
    /// A key without a character.
    Special(SpecialKey),
}

impl KeyValue {
    /// Check if this is a printable key.
    #[must_use]
    pub fn is_char(&self) -> bool {
        matches!(self, Self::Char { .. })
    }

    /// Get the special key tag, if any.
    #[must_use]
    pub fn special(&self) -> Option<SpecialKey> {
        match self {
            Self::Special(key) => Some(*key),
            Self::Char { .. } => None,
        }
    }
}

const fn ch(base: char, shifted: char, hid: u8) -> KeyValue {
    KeyValue::Char { base, shifted, hid }
}

const fn sp(key: SpecialKey) -> KeyValue {
    KeyValue::Special(key)
}

use SpecialKey as K;

/// The key-value table, indexed `[row][col]`.
pub static KEY_TABLE: [[KeyValue; COLS]; ROWS] = [
    [
        ch('`', '~', 0x35),
        ch('1', '!', 0x1E),
        ch('2', '@', 0x1F),
        ch('3', '#', 0x20),
        ch('4', '$', 0x21),
        ch('5', '%', 0x22),
        ch('6', '^', 0x23),
        ch('7', '&', 0x24),
        ch('8', '*', 0x25),
        ch('9', '(', 0x26),
        ch('0', ')', 0x27),
        ch('-', '_', 0x2D),
        ch('=', '+', 0x2E),
        sp(K::Backspace),
    ],
    [
        sp(K::Tab),
        ch('q', 'Q', 0x14),
        ch('w', 'W', 0x1A),
        ch('e', 'E', 0x08),
        ch('r', 'R', 0x15),
        ch('t', 'T', 0x17),
        ch('y', 'Y', 0x1C),
        ch('u', 'U', 0x18),
        ch('i', 'I', 0x0C),
        ch('o', 'O', 0x12),
        ch('p', 'P', 0x13),
        ch('[', '{', 0x2F),
        ch(']', '}', 0x30),
        ch('\\', '|', 0x31),
    ],
    [
        sp(K::Fn),
        sp(K::Shift),
        ch('a', 'A', 0x04),
        ch('s', 'S', 0x16),
        ch('d', 'D', 0x07),
        ch('f', 'F', 0x09),
        ch('g', 'G', 0x0A),
        ch('h', 'H', 0x0B),
        ch('j', 'J', 0x0D),
        ch('k', 'K', 0x0E),
        ch('l', 'L', 0x0F),
        ch(';', ':', 0x33),
        ch('\'', '"', 0x34),
        sp(K::Enter),
    ],
    [
        sp(K::Ctrl),
        sp(K::Opt),
        sp(K::Alt),
        ch('z', 'Z', 0x1D),
        ch('x', 'X', 0x1B),
        ch('c', 'C', 0x06),
        ch('v', 'V', 0x19),
        ch('b', 'B', 0x05),
        ch('n', 'N', 0x11),
        ch('m', 'M', 0x10),
        ch(',', '<', 0x36),
        ch('.', '>', 0x37),
        ch('/', '?', 0x38),
        ch(' ', ' ', 0x2C),
    ],
];

/// Look up the value at a position. `None` only for positions outside the
/// matrix, which [`KeyPosition::new`] already rejects.
#[must_use]
pub fn lookup(pos: KeyPosition) -> Option<KeyValue> {
    KEY_TABLE
        .get(usize::from(pos.row))
        .and_then(|row| row.get(usize::from(pos.col)))
        .copied()
}

/// Find the position of the key that types `c` on either layer.
///
/// Handy for tests and host-side simulation, where keys are easier to name
/// by character than by coordinates.
#[must_use]
pub fn position_of(c: char) -> Option<KeyPosition> {
    KeyPosition::all().find(|&pos| {
        matches!(lookup(pos), Some(KeyValue::Char { base, shifted, .. }) if base == c || shifted == c)
    })
}

/// Find the position of a special key.
#[must_use]
pub fn position_of_special(key: SpecialKey) -> Option<KeyPosition> {
    KeyPosition::all().find(|&pos| lookup(pos) == Some(KeyValue::Special(key)))
}
