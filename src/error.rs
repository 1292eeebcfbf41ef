//! Error types for the solver library.
//!
//! Only boundary failures live here. A move that violates its preconditions
//! is a bug in the caller and panics inside `Board::apply_move` instead.

use thiserror::Error;

/// Main error type for the solver library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// An item code outside the known encoding
    #[error("Unknown item code: {0}")]
    UnknownItem(u8),

    /// A character that does not name any item
    #[error("Unrecognized item character '{0}'")]
    UnknownItemChar(char),

    /// A move token that could not be decoded
    #[error("Unrecognized move '{0}'")]
    UnknownMove(String),

    /// A board whose shape breaks the column/height rules
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    /// The input device rejected an action
    #[error("Input failed: {0}")]
    Input(String),
}

/// Result type alias for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;
