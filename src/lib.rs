//! RL Tetris (workspace facade crate).
//!
//! Re-exports the member crates as `rl_tetris::{types, core, engine, adapter, term}`;
//! the implementation lives in dedicated crates under `crates/`.

pub use rl_tetris_adapter as adapter;
pub use rl_tetris_core as core;
pub use rl_tetris_engine as engine;
pub use rl_tetris_term as term;
pub use rl_tetris_types as types;
