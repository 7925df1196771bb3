//! Semantic key state for a single poll.

use bitflags::bitflags;

bitflags! {
    /// Modifier bitmask reported alongside a poll.
    ///
    /// Only Ctrl, Shift and Alt participate; Fn and Opt are layer keys and
    /// never show up here.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        /// Ctrl key.
        const CTRL = 0b0000_0001;
        /// Shift key.
        const SHIFT = 0b0000_0010;
        /// Alt key.
        const ALT = 0b0000_0100;
    }
}

bitflags! {
    /// Boolean key flags set by a poll.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyFlags: u16 {
        const TAB = 1 << 0;
        const FN = 1 << 1;
        const SHIFT = 1 << 2;
        const CTRL = 1 << 3;
        const OPT = 1 << 4;
        const ALT = 1 << 5;
        /// Backspace is held.
        const DEL = 1 << 6;
        const ENTER = 1 << 7;
        const SPACE = 1 << 8;
    }
}

/// Resolved state of the keyboard for one poll.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SemanticState {
    /// Flags for special keys and space.
    pub flags: KeyFlags,
    /// Ctrl/Shift/Alt bitmask.
    pub modifiers: KeyModifiers,
    /// Printable characters, one per printable key, in report order.
    pub word: Vec<char>,
    /// HID usage codes of printable keys plus Tab, Enter and Backspace.
    pub hid_codes: Vec<u8>,
    /// Usage codes of the held Ctrl/Shift/Alt keys.
    pub modifier_codes: Vec<u8>,
    /// Number of active positions this poll (zero means fully released).
    pub press_count: usize,
}

impl SemanticState {
    /// Check if a flag (or every flag of a combination) is set.
    #[must_use]
    pub fn has(&self, flags: KeyFlags) -> bool {
        self.flags.contains(flags)
    }

    #[must_use]
    pub fn tab(&self) -> bool {
        self.has(KeyFlags::TAB)
    }

    #[must_use]
    pub fn fn_key(&self) -> bool {
        self.has(KeyFlags::FN)
    }

    #[must_use]
    pub fn shift(&self) -> bool {
        self.has(KeyFlags::SHIFT)
    }

    #[must_use]
    pub fn ctrl(&self) -> bool {
        self.has(KeyFlags::CTRL)
    }

    #[must_use]
    pub fn opt(&self) -> bool {
        self.has(KeyFlags::OPT)
    }

    #[must_use]
    pub fn alt(&self) -> bool {
        self.has(KeyFlags::ALT)
    }

    /// Backspace is held.
    #[must_use]
    pub fn del(&self) -> bool {
        self.has(KeyFlags::DEL)
    }

    #[must_use]
    pub fn enter(&self) -> bool {
        self.has(KeyFlags::ENTER)
    }

    #[must_use]
    pub fn space(&self) -> bool {
        self.has(KeyFlags::SPACE)
    }

    /// True when no key is down.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.press_count == 0
    }

    /// Check if a HID usage code is active this poll.
    #[must_use]
    pub fn has_hid(&self, code: u8) -> bool {
        self.hid_codes.contains(&code)
    }

    /// The word as a string.
    #[must_use]
    pub fn text(&self) -> String {
        self.word.iter().collect()
    }
}
