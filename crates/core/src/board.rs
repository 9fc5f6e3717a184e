//! Board module - manages the game grid
//!
//! The board is a `height x width` grid of small integers where `0` is empty and
//! any positive value is filled. Dimensions are fixed at construction.
//! Uses a flat row-major vector for cache locality.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.

use std::fmt;

use crate::error::{CoreError, Result};
use crate::pieces::Shape;
use crate::types::{Grid, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<u8>,
}

impl Board {
    /// Create a new empty board of `height` rows by `width` columns
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Build a board sized to fit `grid` and holding a copy of it
    pub fn from_grid<R: AsRef<[u8]>>(grid: &[R]) -> Result<Self> {
        let width = grid.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if grid.is_empty() || width == 0 {
            return Err(CoreError::InvalidShape("board grid must have at least one cell"));
        }
        let mut board = Self::new(grid.len(), width);
        board.set_state(grid)?;
        Ok(board)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if !self.is_valid_position(x, y) {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(0);
    }

    /// Owned copy of the grid
    pub fn state(&self) -> Grid {
        to_grid(&self.cells, self.width, self.height)
    }

    /// Cells of row `y`; empty for a zero-width board
    fn row(&self, y: usize) -> &[u8] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// Replace the grid with a copy of `grid`.
    ///
    /// Fails without touching the board if the row or column count differs.
    pub fn set_state<R: AsRef<[u8]>>(&mut self, grid: &[R]) -> Result<()> {
        let bad_row = grid.iter().find(|r| r.as_ref().len() != self.width);
        if grid.len() != self.height || bad_row.is_some() {
            return Err(CoreError::DimensionMismatch {
                expected_height: self.height,
                expected_width: self.width,
                actual_height: grid.len(),
                actual_width: bad_row
                    .or(grid.first())
                    .map(|r| r.as_ref().len())
                    .unwrap_or(0),
            });
        }
        for (y, src) in grid.iter().enumerate() {
            let start = y * self.width;
            self.cells[start..start + self.width].copy_from_slice(src.as_ref());
        }
        Ok(())
    }

    /// Check if (x, y) lies on the board
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Check if position is occupied; out of bounds is never occupied
    pub fn is_cell_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(v) if v > 0)
    }

    /// Would `shape` at origin `(x, y)` leave the board or overlap a filled cell?
    ///
    /// Only filled shape cells are tested; empty cells never collide.
    pub fn check_collision(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.filled_cells().any(|(px, py, _)| match self.get(x + px, y + py) {
            None => true,
            Some(v) => v > 0,
        })
    }

    /// Write the filled cells of `shape` at `(x, y)`.
    ///
    /// Cells off the board or already filled are left as they are; callers
    /// check collision first.
    pub fn place_piece(&mut self, shape: &Shape, x: i32, y: i32) {
        overlay(&mut self.cells, self.width, self.height, shape, x, y);
    }

    /// Copy of the grid with `shape` overlaid at `(x, y)`; the board is unchanged
    pub fn board_with_piece(&self, shape: &Shape, x: i32, y: i32) -> Grid {
        let mut cells = self.cells.clone();
        overlay(&mut cells, self.width, self.height, shape, x, y);
        to_grid(&cells, self.width, self.height)
    }

    /// Check if a row is completely filled; out of range or zero-width is never full
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height || self.width == 0 {
            return false;
        }
        self.row(y).iter().all(|&c| c != 0)
    }

    /// Remove every full row and shift the remaining rows down.
    ///
    /// Full rows are identified before anything moves, then survivors are
    /// compacted bottom-up in their original order and the vacated rows at
    /// the top are zeroed. Returns the number of rows removed.
    pub fn clear_full_rows(&mut self) -> usize {
        let full: Vec<bool> = (0..self.height).map(|y| self.is_row_full(y)).collect();
        let cleared = full.iter().filter(|&&f| f).count();
        if cleared == 0 {
            return 0;
        }

        let width = self.width;
        let mut write_y = self.height;
        for read_y in (0..self.height).rev() {
            if full[read_y] {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }
        self.cells[..write_y * width].fill(0);

        cleared
    }

    /// Row index of the topmost filled cell in column `x`
    fn first_filled_row(&self, x: usize) -> Option<usize> {
        (0..self.height).find(|&y| self.cells[y * self.width + x] != 0)
    }

    /// Per-column height: `height - first_filled_row`, or 0 for an empty column
    pub fn column_heights(&self) -> Vec<u32> {
        (0..self.width)
            .map(|x| {
                self.first_filled_row(x)
                    .map(|top| (self.height - top) as u32)
                    .unwrap_or(0)
            })
            .collect()
    }

    /// Empty cells lying below the topmost filled cell of their column
    pub fn holes(&self) -> u32 {
        let mut holes = 0u32;
        for x in 0..self.width {
            let Some(top) = self.first_filled_row(x) else {
                continue;
            };
            holes += (top + 1..self.height)
                .filter(|&y| self.cells[y * self.width + x] == 0)
                .count() as u32;
        }
        holes
    }

    /// `(bumpiness, total_height)` from the column heights
    pub fn bumpiness_and_height(&self) -> (u32, u32) {
        let heights = self.column_heights();
        let total: u32 = heights.iter().sum();
        let bumpiness = heights.windows(2).map(|w| w[0].abs_diff(w[1])).sum();
        (bumpiness, total)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == 0)
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }
}

fn to_grid(cells: &[u8], width: usize, height: usize) -> Grid {
    (0..height)
        .map(|y| cells[y * width..(y + 1) * width].to_vec())
        .collect()
}

fn overlay(cells: &mut [u8], width: usize, height: usize, shape: &Shape, x: i32, y: i32) {
    for (px, py, v) in shape.filled_cells() {
        let (bx, by) = (x + px, y + py);
        if bx < 0 || by < 0 || bx as usize >= width || by as usize >= height {
            continue;
        }
        let idx = by as usize * width + bx as usize;
        if cells[idx] == 0 {
            cells[idx] = v;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            let row = self.row(y);
            f.write_str("|")?;
            for &cell in row {
                f.write_str(if cell > 0 { "█" } else { "." })?;
            }
            f.write_str("|\n")?;
        }
        write!(f, "+{}+", "-".repeat(self.width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::shape_of;
    use crate::types::PieceKind;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(20, 10);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_clear_non_contiguous_rows_keeps_order() {
        let mut board = Board::new(5, 3);
        board
            .set_state(&[
                [0u8, 0, 1],
                [1, 1, 1],
                [2, 0, 0],
                [1, 1, 1],
                [0, 3, 0],
            ])
            .unwrap();

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(
            board.state(),
            vec![
                vec![0, 0, 0],
                vec![0, 0, 0],
                vec![0, 0, 1],
                vec![2, 0, 0],
                vec![0, 3, 0],
            ]
        );
    }

    #[test]
    fn test_place_piece_never_overwrites() {
        let mut board = Board::new(4, 4);
        board.set_state(&[[0u8, 0, 0, 0], [0, 9, 0, 0], [0; 4], [0; 4]]).unwrap();
        board.place_piece(&shape_of(PieceKind::O), 1, 0);
        assert_eq!(board.get(1, 1), Some(9));
        assert_eq!(board.get(1, 0), Some(1));
        assert_eq!(board.get(2, 1), Some(1));
    }

    #[test]
    fn test_place_piece_clips_off_board_cells() {
        let mut board = Board::new(4, 4);
        board.place_piece(&shape_of(PieceKind::I), 2, 0);
        assert_eq!(board.state()[0], vec![0, 0, 2, 2]);
        assert_eq!(board.filled_count(), 2);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new(2, 3);
        board.set_state(&[[0u8, 0, 0], [1, 0, 4]]).unwrap();
        assert_eq!(board.to_string(), "|...|\n|█.█|\n+---+");
    }

    #[test]
    fn test_from_grid() {
        let board = Board::from_grid(&[vec![0u8, 1], vec![1, 1]]).unwrap();
        assert_eq!((board.height(), board.width()), (2, 2));
        assert!(board.is_row_full(1));
        let empty: Vec<Vec<u8>> = Vec::new();
        assert!(Board::from_grid(&empty).is_err());
    }

    #[test]
    fn test_zero_width_board_is_total() {
        let mut board = Board::new(4, 0);
        assert_eq!(board.state(), vec![Vec::<u8>::new(); 4]);
        assert_eq!(board.board_with_piece(&shape_of(PieceKind::O), 0, 0).len(), 4);
        assert!(board.check_collision(&shape_of(PieceKind::T), 0, 0));
        assert!(!board.is_row_full(0));
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board.column_heights(), Vec::<u32>::new());
        assert_eq!(board.bumpiness_and_height(), (0, 0));
        assert_eq!(board.holes(), 0);
        assert_eq!(board.to_string(), "||\n||\n||\n||\n++");

        let rows = vec![Vec::<u8>::new(); 4];
        board.set_state(&rows).unwrap();
        assert!(board.set_state(&[[0u8]]).is_err());

        let flat = Board::new(0, 3);
        assert!(flat.state().is_empty());
        assert_eq!(flat.to_string(), "+---+");
    }
}
