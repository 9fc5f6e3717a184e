//! Observation module - what an environment step hands back
//!
//! All types serialize with camelCase keys (`pieceType`, `clearedLines`,
//! `actionMask`, `actionMapping`).

use serde::Serialize;

use crate::core::{Game, PieceSource};
use crate::types::Grid;

/// Base-action observation: the locked board plus the active piece's ordinal
/// and origin. All three are zero when there is no active piece, which
/// includes the terminal state after a blocked spawn or an overflowing lock:
/// the piece that failed is dropped rather than reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub board: Grid,
    pub piece_type: u8,
    pub x: i32,
    pub y: i32,
}

impl Observation {
    pub fn from_game<S: PieceSource>(game: &Game<S>) -> Self {
        let (piece_type, x, y) = match game.active() {
            Some(piece) => (piece.type_id(), piece.x, piece.y),
            None => (0, 0, 0),
        };
        Self {
            board: game.board().state(),
            piece_type,
            x,
            y,
        }
    }
}

/// Macro-action observation: one hypothetical board per slot plus the
/// legality mask. `features` is present when the env was built to emit them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedObservation {
    pub boards: Vec<Grid>,
    pub action_mask: Vec<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<[f32; 4]>>,
}

/// Step side-channel. `score` and `clearedLines` are always present; the
/// grouped env also reports the live board and the legal action ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub score: i32,
    pub cleared_lines: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<Grid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_mapping: Option<Vec<usize>>,
}

impl Info {
    pub fn from_game<S: PieceSource>(game: &Game<S>) -> Self {
        Self {
            score: game.score(),
            cleared_lines: game.cleared_lines(),
            board: None,
            action_mapping: None,
        }
    }
}

/// Result of one `step`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step<O> {
    pub observation: O,
    pub reward: i32,
    pub terminated: bool,
    /// No time limit is imposed, so this is always false
    pub truncated: bool,
    pub info: Info,
}
