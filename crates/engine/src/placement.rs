//! Placement enumeration - the macro-action space
//!
//! A macro action is a `(column, rotation)` pair: turn the active piece's
//! catalog shape clockwise `rotation` times, drop it straight down at `column`
//! from row 0, and lock it where it lands. A board `W` columns wide always has
//! `W * 4` slots, even for pieces with fewer distinct orientations; redundant
//! rotations alias an equivalent shape.
//!
//! Enumeration never touches the live board. Every slot is simulated against a
//! disposable copy, so slots are independent and may be evaluated in parallel
//! (cargo feature `parallel`) with output identical to the sequential order.

use rl_tetris_core::{Board, BoardFeatures, Piece, Shape};

use crate::types::{Grid, PieceKind, ROTATION_SLOTS};

/// `x * 4 + rotation`
#[inline]
pub const fn encode_action(x: usize, rotation: usize) -> usize {
    x * ROTATION_SLOTS + rotation
}

/// Inverse of [`encode_action`]: `(x, rotation)`
#[inline]
pub const fn decode_action(action_id: usize) -> (usize, usize) {
    (action_id / ROTATION_SLOTS, action_id % ROTATION_SLOTS)
}

/// Size of the macro-action space for a board `width` columns wide
#[inline]
pub const fn action_count(width: usize) -> usize {
    width * ROTATION_SLOTS
}

/// Clockwise orientations indexed by rotation slot, starting from the catalog shape
pub fn rotation_table(kind: PieceKind) -> [Shape; ROTATION_SLOTS] {
    let base = rl_tetris_core::shape_of(kind);
    std::array::from_fn(|r| base.rotated_cw_times(r))
}

/// Row at which `shape` comes to rest when dropped at column `x` from row 0.
///
/// `None` if the shape collides already at row 0.
pub fn landing_row(board: &Board, shape: &Shape, x: i32) -> Option<i32> {
    if board.check_collision(shape, x, 0) {
        return None;
    }
    let mut y = 0;
    while !board.check_collision(shape, x, y + 1) {
        y += 1;
    }
    Some(y)
}

/// Where one macro action would put the piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementSlot {
    pub action_id: usize,
    pub x: usize,
    pub rotation: usize,
    /// Resting row of the shape origin, `None` for an illegal slot
    pub landing_y: Option<i32>,
}

impl PlacementSlot {
    pub fn is_legal(&self) -> bool {
        self.landing_y.is_some()
    }
}

/// Outcome of enumerating every macro action for one piece.
///
/// All vectors are indexed by action id. Illegal slots carry a copy of the
/// live board and zeroed features so consumers can batch every slot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSet {
    pub slots: Vec<PlacementSlot>,
    /// Board with the piece overlaid at its landing spot, before row clearing
    pub boards: Vec<Grid>,
    pub mask: Vec<bool>,
    /// Action ids where `mask` is true, ascending
    pub legal: Vec<usize>,
    /// Post-clear features per slot, present when requested
    pub features: Option<Vec<BoardFeatures>>,
}

impl PlacementSet {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn has_legal(&self) -> bool {
        !self.legal.is_empty()
    }

    pub fn slot(&self, action_id: usize) -> Option<&PlacementSlot> {
        self.slots.get(action_id)
    }

    /// Features of one slot, if they were computed
    pub fn features_of(&self, action_id: usize) -> Option<&BoardFeatures> {
        self.features.as_ref()?.get(action_id)
    }
}

#[derive(Debug, PartialEq)]
struct SlotOutcome {
    slot: PlacementSlot,
    board: Grid,
    features: Option<BoardFeatures>,
}

/// Simulates every `(column, rotation)` drop for a piece
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacementEnumerator;

impl PlacementEnumerator {
    /// Boards, mask and legal ids for every slot
    pub fn enumerate(board: &Board, piece: &Piece) -> PlacementSet {
        Self::run(board, piece, false)
    }

    /// Same as [`PlacementEnumerator::enumerate`], plus the four-term summary of
    /// each slot's post-clear board
    pub fn enumerate_with_features(board: &Board, piece: &Piece) -> PlacementSet {
        Self::run(board, piece, true)
    }

    fn run(board: &Board, piece: &Piece, with_features: bool) -> PlacementSet {
        let rotations = rotation_table(piece.kind());
        let count = action_count(board.width());

        let outcomes = evaluate_all(count, |id| {
            evaluate_slot(board, &rotations, id, with_features)
        });
        assemble(outcomes, with_features)
    }

    /// Every slot illegal, each holding the live board; used when there is no
    /// piece to place
    pub fn all_masked(board: &Board, with_features: bool) -> PlacementSet {
        let outcomes = (0..action_count(board.width()))
            .map(|id| masked_outcome(board, id, with_features))
            .collect();
        assemble(outcomes, with_features)
    }
}

fn assemble(outcomes: Vec<SlotOutcome>, with_features: bool) -> PlacementSet {
    let count = outcomes.len();
    let mut slots = Vec::with_capacity(count);
    let mut boards = Vec::with_capacity(count);
    let mut mask = Vec::with_capacity(count);
    let mut features = with_features.then(|| Vec::with_capacity(count));

    for outcome in outcomes {
        mask.push(outcome.slot.is_legal());
        slots.push(outcome.slot);
        boards.push(outcome.board);
        if let (Some(all), Some(f)) = (features.as_mut(), outcome.features) {
            all.push(f);
        }
    }

    let legal = mask
        .iter()
        .enumerate()
        .filter(|(_, ok)| **ok)
        .map(|(id, _)| id)
        .collect();

    PlacementSet {
        slots,
        boards,
        mask,
        legal,
        features,
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all<F>(count: usize, eval: F) -> Vec<SlotOutcome>
where
    F: Fn(usize) -> SlotOutcome + Sync + Send,
{
    (0..count).map(eval).collect()
}

#[cfg(feature = "parallel")]
fn evaluate_all<F>(count: usize, eval: F) -> Vec<SlotOutcome>
where
    F: Fn(usize) -> SlotOutcome + Sync + Send,
{
    use rayon::prelude::*;

    // indexed collect keeps slot order
    (0..count).into_par_iter().map(eval).collect()
}

fn evaluate_slot(
    board: &Board,
    rotations: &[Shape; ROTATION_SLOTS],
    action_id: usize,
    with_features: bool,
) -> SlotOutcome {
    let (x, rotation) = decode_action(action_id);
    let shape = &rotations[rotation];
    let Some(y) = landing_row(board, shape, x as i32) else {
        return masked_outcome(board, action_id, with_features);
    };

    SlotOutcome {
        slot: PlacementSlot {
            action_id,
            x,
            rotation,
            landing_y: Some(y),
        },
        board: board.board_with_piece(shape, x as i32, y),
        features: with_features.then(|| post_clear_features(board, shape, x as i32, y)),
    }
}

/// Illegal slot: live board, zeroed features, no landing row
fn masked_outcome(board: &Board, action_id: usize, with_features: bool) -> SlotOutcome {
    let (x, rotation) = decode_action(action_id);
    SlotOutcome {
        slot: PlacementSlot {
            action_id,
            x,
            rotation,
            landing_y: None,
        },
        board: board.state(),
        features: with_features.then(BoardFeatures::default),
    }
}

/// Lock `shape` into a scratch copy, clear rows, and summarise the result
fn post_clear_features(board: &Board, shape: &Shape, x: i32, y: i32) -> BoardFeatures {
    let mut scratch = board.clone();
    scratch.place_piece(shape, x, y);
    let lines = scratch.clear_full_rows() as u32;
    BoardFeatures::extract(&scratch, lines)
}
