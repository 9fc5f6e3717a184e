//! Adapter module - in-process environment step contract for RL agents
//!
//! Two views over the same rule engine:
//!
//! - [`TetrisEnv`]: base actions (`0=moveLeft, 1=moveRight, 2=moveDown,
//!   3=rotate, 4=hardDrop`), one action per step, locking when the piece is
//!   grounded
//! - [`GroupedEnv`]: macro actions, one full placement per step
//!
//! Both follow `reset(seed?) -> (observation, info)` and
//! `step(action) -> Step { observation, reward, terminated, truncated, info }`.
//!
//! # Reward
//!
//! A step that locks a piece earns `1 + lines^2 * width`. A step that ends
//! the episode (overflow, blocked spawn, or a forfeited macro action) has 5
//! subtracted once. Steps that do not lock earn 0.
//!
//! # Rendering
//!
//! [`RenderSink`] receives `{board, score, nextPieceShape}` frames on demand
//! and is never queried back.

pub mod env;
pub mod grouped;
pub mod observation;
pub mod render;

pub use rl_tetris_core as core;
pub use rl_tetris_engine as engine;
pub use rl_tetris_types as types;

pub use env::TetrisEnv;
pub use grouped::{FeatureOutput, GroupedEnv};
pub use observation::{GroupedObservation, Info, Observation, Step};
pub use render::{RecordingSink, RenderSink};
