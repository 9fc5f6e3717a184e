//! Error type for caller faults detected by the core.
//!
//! Game-over and "no active piece" are ordinary states reported through return
//! values; only configuration and domain violations end up here.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A grid handed to `Board::set_state` does not match the board size.
    #[error(
        "invalid board state dimensions: expected {expected_height}x{expected_width}, \
         got {actual_height}x{actual_width}"
    )]
    DimensionMismatch {
        expected_height: usize,
        expected_width: usize,
        actual_height: usize,
        actual_width: usize,
    },

    /// Piece ordinal outside the 7-entry catalog.
    #[error("invalid piece type: {0} (expected 0..7)")]
    InvalidPieceType(u8),

    /// Empty or ragged shape/grid matrix.
    #[error("invalid shape: {0}")]
    InvalidShape(&'static str),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
