//! Core rule engine - pure, deterministic, and testable
//!
//! Everything an agent needs to play falling-block episodes headlessly: piece
//! geometry, the board, the per-episode state machine and the reward rule. No
//! I/O, no clocks, no gravity; the only source of variation is the injected
//! [`PieceSource`].
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven-shape catalog and clockwise matrix rotation
//! - [`board`]: occupancy grid, collision, placement, row clearing, surface metrics
//! - [`features`]: fixed-size feature vectors derived from a board
//! - [`game_state`]: spawn / move / rotate / drop / lock state machine
//! - [`rng`]: piece-type sources (7-bag, uniform, fixed sequence)
//! - [`scoring`]: per-lock reward rule
//! - [`config`]: board dimensions and spawn policy
//!
//! # Rules
//!
//! - Rotation happens in place. There is no kick table; a blocked rotation is rejected.
//! - Hard drop descends until blocked but does not lock.
//! - A lock whose piece sits above row 0, or overlaps the stack while its
//!   origin is in the top two rows, is an overflow and ends the episode.
//! - A spawn that collides immediately ends the episode.
//!
//! # Example
//!
//! ```
//! use rl_tetris_core::{Game, GameConfig, SequenceSource};
//! use rl_tetris_core::types::PieceKind;
//!
//! let mut game = Game::new(GameConfig::default(), SequenceSource::repeat(PieceKind::I)).unwrap();
//! assert!(game.reset());
//!
//! game.move_piece(-3, 0);
//! game.hard_drop();
//! let result = game.lock_piece();
//!
//! assert_eq!(result.reward, 1);
//! assert_eq!(game.score(), 1);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod features;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use rl_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::GameConfig;
pub use error::{CoreError, Result};
pub use features::{AdvancedFeatures, BoardFeatures, DEFAULT_FEATURE_MAX};
pub use game_state::{Game, LockResult};
pub use pieces::{shape_for_type, shape_of, Piece, Shape};
pub use rng::{BagSource, PieceSource, SequenceSource, SimpleRng, UniformSource};
pub use scoring::calculate_reward;
pub use snapshot::{GameSnapshot, RenderFrame};
