//! Error types for matrixpad.
//!
//! Runtime edge cases in the editing pipeline are not errors: boundary
//! operations are silent no-ops and user-visible outcomes are reported as
//! [`Notice`](crate::text::Notice)s. This type covers construction-time
//! validation and save handlers.

use std::fmt;
use std::io;

/// Result type alias for matrixpad operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for matrixpad operations.
#[derive(Debug)]
pub enum Error {
    /// I/O error, usually from a save handler.
    Io(io::Error),
    /// Key position outside the 4x14 matrix.
    OutOfBounds { row: u8, col: u8 },
    /// Options that cannot produce a working editor (e.g. zero capacity).
    InvalidOptions(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OutOfBounds { row, col } => {
                write!(f, "key position ({row}, {col}) outside the key matrix")
            }
            Self::InvalidOptions(s) => write!(f, "invalid options: {s}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}
