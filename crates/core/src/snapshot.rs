use crate::pieces::{Piece, Shape};
use crate::types::{Grid, PieceKind};

/// Owned copy of everything observable about a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: Grid,
    pub active: Option<Piece>,
    pub score: i32,
    pub cleared_lines: u32,
    pub game_over: bool,
    pub next_piece: PieceKind,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && self.active.is_some()
    }
}

/// What a render sink receives: the board with the falling piece drawn in,
/// the score, and the shape of the upcoming piece.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    pub board: Grid,
    pub score: i32,
    pub next_piece_shape: Shape,
}
