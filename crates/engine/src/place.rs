use std::fmt;

use log::{debug, warn};
use rl_tetris_core::{Game, LockResult, PieceSource};

use crate::placement::{action_count, decode_action, landing_row, rotation_table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    NoActive,
    NotPlayable,
    ActionOutOfRange,
    IllegalPlacement,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::ActionOutOfRange => "action_out_of_range",
            PlaceError::NoActive | PlaceError::NotPlayable | PlaceError::IllegalPlacement => {
                "invalid_place"
            }
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NoActive => "no active piece",
            PlaceError::NotPlayable => "game is not playable",
            PlaceError::ActionOutOfRange => "action id outside the macro-action space",
            PlaceError::IllegalPlacement => "piece cannot be placed at target column and rotation",
        }
    }
}

impl fmt::Display for PlaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for PlaceError {}

/// Execute one macro action on a live game: reorient the active piece to the
/// slot's rotation, move it to the slot's column at row 0, hard-drop, lock.
///
/// The slot is re-validated against the live board; a rejected action leaves
/// the game untouched.
pub fn apply_placement<S: PieceSource>(
    game: &mut Game<S>,
    action_id: usize,
) -> Result<LockResult, PlaceError> {
    if game.is_game_over() {
        return Err(PlaceError::NotPlayable);
    }

    let Some(active) = game.active() else {
        return Err(PlaceError::NoActive);
    };

    let count = action_count(game.board().width());
    if action_id >= count {
        warn!("macro action {} outside [0, {})", action_id, count);
        return Err(PlaceError::ActionOutOfRange);
    }

    let (x, rotation) = decode_action(action_id);
    let shape = rotation_table(active.kind())
        .into_iter()
        .nth(rotation)
        .ok_or(PlaceError::ActionOutOfRange)?;

    if landing_row(game.board(), &shape, x as i32).is_none() {
        debug!("macro action {} (x={}, r={}) blocked", action_id, x, rotation);
        return Err(PlaceError::IllegalPlacement);
    }

    if !game.reposition_active(shape, x as i32, 0) {
        return Err(PlaceError::IllegalPlacement);
    }
    game.hard_drop();
    Ok(game.lock_piece())
}
