//! Game state module - the episode state machine
//!
//! Ties together the board, the active piece, the piece-type source and the
//! reward rule. States run `NoPiece -> ActivePiece -> (ActivePiece | Terminal)`:
//! a spawn either activates a piece or ends the episode, and a lock either
//! hands over to the next spawn or ends the episode through overflow.

use log::debug;

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::Result;
use crate::pieces::{shape_of, Piece, Shape};
use crate::rng::{BagSource, PieceSource};
use crate::scoring::calculate_reward;
use crate::snapshot::{GameSnapshot, RenderFrame};
use crate::types::{Grid, PieceKind};

/// Outcome of [`Game::lock_piece`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockResult {
    pub lines_cleared: u32,
    /// The episode ended, either through overflow or a blocked spawn
    pub game_over: bool,
    pub overflow: bool,
    /// Score delta applied by this lock
    pub reward: i32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game<S: PieceSource = BagSource> {
    config: GameConfig,
    board: Board,
    source: S,
    active: Option<Piece>,
    score: i32,
    cleared_lines: u32,
    game_over: bool,
}

impl<S: PieceSource> Game<S> {
    /// Create a game with an empty board and no active piece.
    ///
    /// Call [`Game::reset`] to start the first episode.
    pub fn new(config: GameConfig, source: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            board: Board::new(config.height, config.width),
            config,
            source,
            active: None,
            score: 0,
            cleared_lines: 0,
            game_over: false,
        })
    }

    /// Start a fresh episode: empty board, restarted source, zeroed counters,
    /// first piece spawned. Returns whether the spawn succeeded.
    pub fn reset(&mut self) -> bool {
        self.board.reset();
        self.source.reset();
        self.active = None;
        self.score = 0;
        self.cleared_lines = 0;
        self.game_over = false;
        self.spawn_piece()
    }

    /// Reseed the source, then [`Game::reset`]
    pub fn reset_with_seed(&mut self, seed: u64) -> bool {
        self.source.reseed(seed);
        self.reset()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Load a board position; dimensions must match
    pub fn set_board_state<R: AsRef<[u8]>>(&mut self, grid: &[R]) -> Result<()> {
        self.board.set_state(grid)
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn cleared_lines(&self) -> u32 {
        self.cleared_lines
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Pull the next kind from the source and place it at the spawn point.
    ///
    /// A spawn that collides immediately ends the episode and leaves no
    /// active piece.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.source.pop();
        let shape = shape_of(kind);
        let x = self.config.spawn.spawn_x(self.board.width(), shape.cols());

        if self.board.check_collision(&shape, x, 0) {
            debug!("spawn of {} blocked at ({}, 0); game over", kind.as_str(), x);
            self.active = None;
            self.game_over = true;
            return false;
        }

        self.active = Some(Piece::new(kind, x, 0));
        true
    }

    /// Check if the active piece could move by `(dx, dy)`
    pub fn can_move(&self, dx: i32, dy: i32) -> bool {
        let Some(piece) = &self.active else {
            return false;
        };
        !self
            .board
            .check_collision(piece.shape(), piece.x + dx, piece.y + dy)
    }

    /// Move the active piece if the target is free
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> bool {
        if !self.can_move(dx, dy) {
            return false;
        }
        if let Some(piece) = &mut self.active {
            piece.move_by(dx, dy);
        }
        true
    }

    /// Check if the clockwise rotation fits at the current origin
    pub fn can_rotate(&self) -> bool {
        let Some(piece) = &self.active else {
            return false;
        };
        !self
            .board
            .check_collision(&piece.shape().rotated_cw(), piece.x, piece.y)
    }

    /// Rotate clockwise in place; a blocked rotation leaves the piece as it was
    pub fn rotate_piece(&mut self) -> bool {
        if !self.can_rotate() {
            return false;
        }
        if let Some(piece) = &mut self.active {
            piece.rotate_clockwise();
        }
        true
    }

    /// Move down until blocked. Does not lock. Returns rows descended.
    pub fn hard_drop(&mut self) -> u32 {
        let mut distance = 0;
        while self.move_piece(0, 1) {
            distance += 1;
        }
        distance
    }

    /// Replace the active piece's orientation and origin if the target is
    /// collision-free.
    pub fn reposition_active(&mut self, shape: Shape, x: i32, y: i32) -> bool {
        if self.active.is_none() || self.board.check_collision(&shape, x, y) {
            return false;
        }
        if let Some(piece) = &mut self.active {
            piece.set_shape(shape);
            piece.set_position(x, y);
        }
        true
    }

    /// End the episode without locking anything
    pub fn forfeit(&mut self) {
        self.active = None;
        self.game_over = true;
    }

    /// Commit the active piece into the board.
    ///
    /// Overflow is evaluated before the write; the lock then clears rows,
    /// adds the reward to the score, and either ends the episode (overflow) or
    /// spawns the next piece. With no active piece nothing changes and the
    /// result reports `game_over`.
    pub fn lock_piece(&mut self) -> LockResult {
        let Some(piece) = self.active.take() else {
            return LockResult {
                game_over: true,
                ..LockResult::default()
            };
        };

        let overflow = self.is_overflowing(&piece);

        self.board.place_piece(piece.shape(), piece.x, piece.y);

        let lines_cleared = self.board.clear_full_rows() as u32;
        self.cleared_lines += lines_cleared;
        if lines_cleared > 0 {
            debug!("cleared {} line(s), total {}", lines_cleared, self.cleared_lines);
        }

        let reward = self.calculate_reward(lines_cleared, overflow);
        self.score += reward;

        if overflow {
            debug!(
                "{} overflowed at ({}, {}); game over",
                piece.kind().as_str(),
                piece.x,
                piece.y
            );
            self.game_over = true;
            return LockResult {
                lines_cleared,
                game_over: true,
                overflow: true,
                reward,
            };
        }

        let spawned = self.spawn_piece();
        LockResult {
            lines_cleared,
            game_over: !spawned,
            overflow: false,
            reward,
        }
    }

    /// A lock overflows if any filled cell sits above row 0, or if the piece
    /// origin is in the top two rows and a filled cell lands on an occupied
    /// board cell.
    fn is_overflowing(&self, piece: &Piece) -> bool {
        piece.shape().filled_cells().any(|(px, py, _)| {
            let bx = piece.x + px;
            let by = piece.y + py;
            by < 0 || (piece.y <= 1 && self.board.is_cell_occupied(bx, by))
        })
    }

    /// Reward rule applied to this board's width
    pub fn calculate_reward(&self, lines_cleared: u32, overflow: bool) -> i32 {
        calculate_reward(lines_cleared, self.board.width(), overflow)
    }

    /// Upcoming kind, without consuming it
    pub fn next_piece_type(&self) -> PieceKind {
        self.source.peek()
    }

    /// Owned snapshot of the whole game
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.state(),
            active: self.active.clone(),
            score: self.score,
            cleared_lines: self.cleared_lines,
            game_over: self.game_over,
            next_piece: self.next_piece_type(),
        }
    }

    /// Board copy with the active piece drawn in (plain board copy if none)
    pub fn board_with_current_piece(&self) -> Grid {
        match &self.active {
            Some(piece) => self.board.board_with_piece(piece.shape(), piece.x, piece.y),
            None => self.board.state(),
        }
    }

    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            board: self.board_with_current_piece(),
            score: self.score,
            next_piece_shape: shape_of(self.next_piece_type()),
        }
    }
}
