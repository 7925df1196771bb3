//! User-visible outcomes of editing operations.

use std::fmt;

/// A short message for the display layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Undone,
    NothingToUndo,
    SelectedAll,
    SelectionCleared,
    /// Enter was refused because the buffer is at its line capacity.
    BufferFull,
    LineNumbersShown,
    LineNumbersHidden,
    CapsLockOn,
    CapsLockOff,
    Saved,
    /// The save handler failed; carries its error text.
    SaveFailed(String),
    /// Save was requested but no handler is registered.
    SaveUnavailable,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undone => f.write_str("undo"),
            Self::NothingToUndo => f.write_str("nothing to undo"),
            Self::SelectedAll => f.write_str("selected all"),
            Self::SelectionCleared => f.write_str("selection cleared"),
            Self::BufferFull => f.write_str("buffer full"),
            Self::LineNumbersShown => f.write_str("line numbers on"),
            Self::LineNumbersHidden => f.write_str("line numbers off"),
            Self::CapsLockOn => f.write_str("caps lock on"),
            Self::CapsLockOff => f.write_str("caps lock off"),
            Self::Saved => f.write_str("saved"),
            Self::SaveFailed(reason) => write!(f, "save failed: {reason}"),
            Self::SaveUnavailable => f.write_str("save unavailable"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_text() {
        assert_eq!(Notice::NothingToUndo.to_string(), "nothing to undo");
        assert_eq!(
            Notice::SaveFailed("disk full".to_string()).to_string(),
            "save failed: disk full"
        );
    }
}
