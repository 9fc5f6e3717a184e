//! Core types module - shared vocabulary and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the rule engine, the placement search and the environment adapter alike.
//!
//! # Board Dimensions
//!
//! The board size is configurable per game. The defaults match the classic
//! playfield:
//!
//! - **Width**: 10 columns (indexed 0-9, left to right)
//! - **Height**: 20 rows (indexed 0-19, top to bottom)
//!
//! # Piece Ordinals
//!
//! Piece kinds have fixed ordinals that are part of the observation contract:
//!
//! | Kind | Ordinal | Cell value |
//! |------|---------|------------|
//! | O | 0 | 1 |
//! | I | 1 | 2 |
//! | S | 2 | 3 |
//! | Z | 3 | 4 |
//! | T | 4 | 5 |
//! | L | 5 | 6 |
//! | J | 6 | 7 |
//!
//! # Examples
//!
//! ```
//! use rl_tetris_types::{BaseAction, PieceKind, SpawnPolicy, DEFAULT_BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_index(4), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.index(), 4);
//! assert_eq!(PieceKind::from_index(7), None);
//!
//! assert_eq!(BaseAction::from_index(4), Some(BaseAction::HardDrop));
//! assert_eq!(BaseAction::from_str("moveLeft"), Some(BaseAction::MoveLeft));
//!
//! assert_eq!(SpawnPolicy::from_str("left"), Some(SpawnPolicy::Left));
//! assert_eq!(DEFAULT_BOARD_WIDTH, 10);
//! ```

/// Default board width in cells (10 columns)
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in cells (20 rows)
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Number of piece kinds in the catalog
pub const PIECE_COUNT: usize = 7;

/// Rotation slots per column in the macro-action space
pub const ROTATION_SLOTS: usize = 4;

/// Base reward granted for every locked piece
pub const LOCK_REWARD: i32 = 1;

/// Penalty subtracted (once) when a lock ends the episode
pub const OVERFLOW_PENALTY: i32 = 5;

/// Smallest board edge that still fits every tetromino in every orientation
pub const MIN_BOARD_EDGE: usize = 4;

/// A row-major grid snapshot: `grid[y][x]`, `0` is empty, anything else is filled.
///
/// Every grid handed out by the engine is an owned copy.
pub type Grid = Vec<Vec<u8>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reward_constants() {
        assert_eq!(LOCK_REWARD, 1);
        assert_eq!(OVERFLOW_PENALTY, 5);
        assert_eq!(ROTATION_SLOTS, 4);
        assert_eq!(PIECE_COUNT, PieceKind::ALL.len());
    }

    #[test]
    fn piece_ordinals_roundtrip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index() as usize, i);
            assert_eq!(PieceKind::from_index(i as u8), Some(*kind));
            assert_eq!(kind.cell_value(), i as u8 + 1);
        }
        assert_eq!(PieceKind::from_index(PIECE_COUNT as u8), None);
        assert_eq!(PieceKind::from_index(u8::MAX), None);
    }

    #[test]
    fn base_action_ordinals_are_fixed() {
        assert_eq!(BaseAction::MoveLeft as u8, 0);
        assert_eq!(BaseAction::MoveRight as u8, 1);
        assert_eq!(BaseAction::MoveDown as u8, 2);
        assert_eq!(BaseAction::Rotate as u8, 3);
        assert_eq!(BaseAction::HardDrop as u8, 4);
        for a in BaseAction::ALL {
            assert_eq!(BaseAction::from_index(a.index()), Some(a));
            assert_eq!(BaseAction::from_str(a.as_str()), Some(a));
        }
        assert_eq!(BaseAction::from_index(5), None);
    }
}

/// The seven tetromino piece kinds
///
/// Declaration order is the ordinal order used by observations:
/// - **O**: 2x2 square
/// - **I**: 1x4 line
/// - **S**: S-shaped
/// - **Z**: Z-shaped (mirror of S)
/// - **T**: T-shaped
/// - **L**: L-shaped
/// - **J**: J-shaped (mirror of L)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    O,
    I,
    S,
    Z,
    T,
    L,
    J,
}

impl PieceKind {
    /// All kinds in ordinal order
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
    ];

    /// Look up a kind by ordinal. Returns `None` outside `[0, 7)`.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Ordinal of this kind (O=0 ... J=6)
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Value written into board cells by this kind (ordinal + 1, never 0)
    pub fn cell_value(self) -> u8 {
        self.index() + 1
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use rl_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "o" => Some(PieceKind::O),
            "i" => Some(PieceKind::I),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "t" => Some(PieceKind::T),
            "l" => Some(PieceKind::L),
            "j" => Some(PieceKind::J),
            _ => None,
        }
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "O",
            PieceKind::I => "I",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::T => "T",
            PieceKind::L => "L",
            PieceKind::J => "J",
        }
    }
}

/// Primitive actions of the base environment.
///
/// The discriminants are the action ordinals of the step contract and must
/// not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BaseAction {
    /// Move piece one cell left
    MoveLeft = 0,
    /// Move piece one cell right
    MoveRight = 1,
    /// Move piece one cell down
    MoveDown = 2,
    /// Rotate piece 90° clockwise in place (no kicks)
    Rotate = 3,
    /// Drop piece to the lowest reachable row (locking happens in the env step)
    HardDrop = 4,
}

impl BaseAction {
    /// All actions in ordinal order
    pub const ALL: [BaseAction; 5] = [
        BaseAction::MoveLeft,
        BaseAction::MoveRight,
        BaseAction::MoveDown,
        BaseAction::Rotate,
        BaseAction::HardDrop,
    ];

    /// Look up an action by ordinal
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    /// Parse action from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use rl_tetris_types::BaseAction;
    ///
    /// assert_eq!(BaseAction::from_str("hardDrop"), Some(BaseAction::HardDrop));
    /// assert_eq!(BaseAction::from_str("ROTATE"), Some(BaseAction::Rotate));
    /// assert_eq!(BaseAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(BaseAction::MoveLeft),
            "moveright" => Some(BaseAction::MoveRight),
            "movedown" => Some(BaseAction::MoveDown),
            "rotate" => Some(BaseAction::Rotate),
            "harddrop" => Some(BaseAction::HardDrop),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            BaseAction::MoveLeft => "moveLeft",
            BaseAction::MoveRight => "moveRight",
            BaseAction::MoveDown => "moveDown",
            BaseAction::Rotate => "rotate",
            BaseAction::HardDrop => "hardDrop",
        }
    }
}

/// Horizontal spawn placement policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpawnPolicy {
    /// `board_width / 2 - piece_width / 2` (floor division)
    #[default]
    Center,
    /// Leftmost column
    Left,
}

impl SpawnPolicy {
    /// Spawn column for a piece of `piece_width` on a board of `board_width`.
    ///
    /// ```
    /// use rl_tetris_types::SpawnPolicy;
    ///
    /// assert_eq!(SpawnPolicy::Center.spawn_x(10, 4), 3);
    /// assert_eq!(SpawnPolicy::Center.spawn_x(10, 3), 4);
    /// assert_eq!(SpawnPolicy::Left.spawn_x(10, 3), 0);
    /// ```
    pub fn spawn_x(self, board_width: usize, piece_width: usize) -> i32 {
        match self {
            SpawnPolicy::Center => (board_width / 2) as i32 - (piece_width / 2) as i32,
            SpawnPolicy::Left => 0,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "center" | "centre" => Some(SpawnPolicy::Center),
            "left" => Some(SpawnPolicy::Left),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnPolicy::Center => "center",
            SpawnPolicy::Left => "left",
        }
    }
}
