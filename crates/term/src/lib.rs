//! Terminal render sinks.
//!
//! Write-only consumers of [`RenderFrame`](crate::core::RenderFrame)s: the
//! engine pushes frames and never reads anything back.
//!
//! - [`TextSink`]: lays the frame out as plain text (headless, testable)
//! - [`TerminalSink`]: draws to the terminal's alternate screen via crossterm

pub mod renderer;
pub mod view;

pub use rl_tetris_adapter as adapter;
pub use rl_tetris_core as core;
pub use rl_tetris_types as types;

pub use renderer::{encode_frame_into, TerminalSink};
pub use view::{frame_lines, TextSink};
