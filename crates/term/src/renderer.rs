//! TerminalSink: draws frames to a real terminal.
//!
//! Full redraw every frame on the alternate screen. Filled cells are coloured
//! by the piece that placed them.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::adapter::RenderSink;
use crate::core::RenderFrame;
use crate::view::{frame_lines, EMPTY, FILLED};

pub struct TerminalSink {
    stdout: io::Stdout,
    buf: Vec<u8>,
    active: bool,
}

impl Default for TerminalSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSink {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(16 * 1024),
            active: false,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.flush_buf()?;
        self.active = true;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        self.active = false;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl RenderSink for TerminalSink {
    fn render(&mut self, frame: &RenderFrame) -> Result<()> {
        self.buf.clear();
        encode_frame_into(frame, &mut self.buf)?;
        self.flush_buf()
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

/// Encode a full-frame redraw into `out`.
///
/// This builds a sequence of crossterm commands without writing to stdout.
pub fn encode_frame_into(frame: &RenderFrame, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let lines = frame_lines(frame);
    for (y, line) in lines.iter().enumerate() {
        match frame.board.get(y) {
            Some(row) => encode_board_row(row, line, out)?,
            None => {
                out.queue(Print(line))?;
            }
        }
        out.queue(Print("\r\n"))?;
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

/// Board cells get per-piece colours; the panel suffix is printed as-is
fn encode_board_row(row: &[u8], line: &str, out: &mut Vec<u8>) -> Result<()> {
    out.queue(Print('|'))?;
    for &cell in row {
        if cell == 0 {
            out.queue(SetForegroundColor(Color::DarkGrey))?;
            out.queue(Print(EMPTY))?;
        } else {
            out.queue(SetForegroundColor(cell_color(cell)))?;
            out.queue(Print(FILLED))?;
        }
    }
    out.queue(ResetColor)?;
    out.queue(Print('|'))?;

    let board_chars = row.len() * 2 + 2;
    let panel: String = line.chars().skip(board_chars).collect();
    out.queue(Print(panel))?;
    Ok(())
}

/// Colour for a placed cell value (`ordinal + 1`)
fn cell_color(value: u8) -> Color {
    match value {
        1 => Color::Yellow,
        2 => Color::Cyan,
        3 => Color::Green,
        4 => Color::Red,
        5 => Color::Magenta,
        6 => Color::DarkYellow,
        7 => Color::Blue,
        _ => Color::White,
    }
}
