//! Placement-level engine
//!
//! Turns the core's per-step rules into a macro-action interface: every
//! `(column, rotation)` drop of the active piece is one action.
//!
//! - [`placement`]: action encoding and non-mutating enumeration of all slots
//! - [`place`]: executing one macro action on a live game
//! - [`policy`]: placement policies (greedy feature-weighted search)

pub mod place;
pub mod placement;
pub mod policy;

pub use rl_tetris_core as core;
pub use rl_tetris_types as types;

pub use place::{apply_placement, PlaceError};
pub use placement::{
    action_count, decode_action, encode_action, landing_row, rotation_table, PlacementEnumerator,
    PlacementSet, PlacementSlot,
};
pub use policy::{GreedyPolicy, Policy};
