//! Plain-text layout of a render frame.
//!
//! Each board cell is two characters wide so the grid looks square in a
//! terminal. The score and a preview of the next piece sit to the right.

use anyhow::Result;

use crate::adapter::RenderSink;
use crate::core::{RenderFrame, Shape};

pub const FILLED: &str = "██";
pub const EMPTY: &str = " .";

const PANEL_GAP: &str = "  ";

/// Lay out a frame as text lines, board on the left, panel on the right
pub fn frame_lines(frame: &RenderFrame) -> Vec<String> {
    let width = frame.board.first().map(|r| r.len()).unwrap_or(0);
    let panel = panel_lines(frame.score, &frame.next_piece_shape);

    let mut lines = Vec::with_capacity(frame.board.len() + 1);
    for (y, row) in frame.board.iter().enumerate() {
        let mut line = String::with_capacity(width * 2 + 16);
        line.push('|');
        for &cell in row {
            line.push_str(if cell != 0 { FILLED } else { EMPTY });
        }
        line.push('|');
        if let Some(p) = panel.get(y) {
            line.push_str(PANEL_GAP);
            line.push_str(p);
        }
        lines.push(line);
    }
    // short boards: the panel continues below the last row
    for p in panel.iter().skip(frame.board.len()) {
        lines.push(format!("{}{}{}", " ".repeat(width * 2 + 2), PANEL_GAP, p));
    }
    lines.push(format!("+{}+", "-".repeat(width * 2)));
    lines
}

fn panel_lines(score: i32, next: &Shape) -> Vec<String> {
    let mut panel = vec![format!("Score: {}", score), String::new(), "Next:".to_string()];
    for row in next.to_rows() {
        panel.push(
            row.iter()
                .map(|&c| if c != 0 { FILLED } else { "  " })
                .collect::<String>()
                .trim_end()
                .to_string(),
        );
    }
    panel
}

/// Text sink that keeps the most recent frame as a string
#[derive(Debug, Default, Clone)]
pub struct TextSink {
    last: String,
    frames: usize,
}

impl TextSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> &str {
        &self.last
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl RenderSink for TextSink {
    fn render(&mut self, frame: &RenderFrame) -> Result<()> {
        self.last = frame_lines(frame).join("\n");
        self.frames += 1;
        Ok(())
    }
}
