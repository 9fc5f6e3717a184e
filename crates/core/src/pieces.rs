//! Pieces module - tetromino shape catalog and in-place rotation
//!
//! Shapes are small rectangular matrices (`0` = empty, anything else = filled)
//! whose top-left corner is the piece origin in board coordinates. Rotation is a
//! pure matrix transform: there is no kick table and no alternate-position
//! search, so a rotated shape is either accepted where it stands or rejected.

use std::fmt;

use arrayvec::ArrayVec;

use crate::error::{CoreError, Result};
use crate::types::{PieceKind, ROTATION_SLOTS};

/// Catalog rows, indexed by `PieceKind::index()`.
///
/// Cell values are `ordinal + 1` so a placed cell records which kind filled it.
const CATALOG: [&[&[u8]]; 7] = [
    // O
    &[&[1, 1], &[1, 1]],
    // I
    &[&[2, 2, 2, 2]],
    // S
    &[&[0, 3, 3], &[3, 3, 0]],
    // Z
    &[&[4, 4, 0], &[0, 4, 4]],
    // T
    &[&[0, 5, 0], &[5, 5, 5]],
    // L
    &[&[0, 0, 6], &[6, 6, 6]],
    // J
    &[&[7, 0, 0], &[7, 7, 7]],
];

/// An owned rectangular shape matrix, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Shape {
    /// Build a shape from row slices.
    ///
    /// Fails on an empty matrix or rows of differing length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if rows.is_empty() || cols == 0 {
            return Err(CoreError::InvalidShape("shape must have at least one cell"));
        }
        if rows.iter().any(|r| r.as_ref().len() != cols) {
            return Err(CoreError::InvalidShape("shape rows must have equal length"));
        }
        Ok(Self::from_rows_unchecked(rows))
    }

    fn from_rows_unchecked<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        let cols = rows[0].as_ref().len();
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            cells.extend_from_slice(row.as_ref());
        }
        Self {
            rows: rows.len(),
            cols,
            cells,
        }
    }

    /// Number of rows (the shape's height)
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (the shape's width)
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cell at local column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        Some(self.cells[y * self.cols + x])
    }

    /// Iterate filled cells as `(local_x, local_y, value)`.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(move |(i, v)| ((i % cols) as i32, (i / cols) as i32, *v))
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != 0).count()
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.cols).map(|r| r.to_vec()).collect()
    }

    /// Clockwise quarter turn.
    ///
    /// For an `R x C` source the result is `C x R` with
    /// `result[i][j] = source[R - 1 - j][i]`.
    pub fn rotated_cw(&self) -> Shape {
        let (r, c) = (self.rows, self.cols);
        let mut cells = vec![0u8; r * c];
        for i in 0..c {
            for j in 0..r {
                cells[i * r + j] = self.cells[(r - 1 - j) * c + i];
            }
        }
        Shape {
            rows: c,
            cols: r,
            cells,
        }
    }

    /// Counter-clockwise quarter turn, defined as three clockwise turns.
    pub fn rotated_ccw(&self) -> Shape {
        self.rotated_cw().rotated_cw().rotated_cw()
    }

    /// Apply `turns` clockwise quarter turns (taken modulo 4).
    pub fn rotated_cw_times(&self, turns: usize) -> Shape {
        let mut out = self.clone();
        for _ in 0..turns % ROTATION_SLOTS {
            out = out.rotated_cw();
        }
        out
    }

    /// Structurally distinct orientations in clockwise generation order.
    ///
    /// A rotation is kept only if it is not equal to any orientation already
    /// collected, so the O piece yields 1, the I piece 2 and the rest 4.
    pub fn distinct_rotations(&self) -> ArrayVec<Shape, 4> {
        let mut out: ArrayVec<Shape, 4> = ArrayVec::new();
        let mut current = self.clone();
        for _ in 0..ROTATION_SLOTS {
            if !out.contains(&current) {
                out.push(current.clone());
            }
            current = current.rotated_cw();
        }
        out
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.chunks(self.cols).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &cell in row {
                f.write_str(if cell > 0 { "█" } else { "." })?;
            }
        }
        Ok(())
    }
}

/// Fresh copy of the catalog shape for `kind`.
pub fn shape_of(kind: PieceKind) -> Shape {
    Shape::from_rows_unchecked(CATALOG[kind.index() as usize])
}

/// Catalog shape by ordinal; ordinals outside `[0, 7)` are a domain error.
pub fn shape_for_type(type_id: u8) -> Result<Shape> {
    PieceKind::from_index(type_id)
        .map(shape_of)
        .ok_or(CoreError::InvalidPieceType(type_id))
}

/// A piece instance: kind tag, its own shape matrix, and an origin.
///
/// The origin is the board coordinate of the shape's top-left corner. It is
/// never clamped here; bounds are the board's concern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// New piece in its catalog orientation at `(x, y)`
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            shape: shape_of(kind),
            x,
            y,
        }
    }

    /// New piece from an ordinal
    pub fn from_type_id(type_id: u8, x: i32, y: i32) -> Result<Self> {
        PieceKind::from_index(type_id)
            .map(|kind| Self::new(kind, x, y))
            .ok_or(CoreError::InvalidPieceType(type_id))
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn type_id(&self) -> u8 {
        self.kind.index()
    }

    /// Current orientation (read-only view)
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Owned copy of the current orientation
    pub fn shape_copy(&self) -> Shape {
        self.shape.clone()
    }

    /// Rotate the piece's own shape clockwise. The catalog is untouched.
    pub fn rotate_clockwise(&mut self) {
        self.shape = self.shape.rotated_cw();
    }

    /// Replace the orientation; used when a placement was validated elsewhere.
    pub(crate) fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    /// Distinct orientations reachable from the current one
    pub fn all_rotations(&self) -> ArrayVec<Shape, 4> {
        self.shape.distinct_rotations()
    }

    /// Column count of the current shape
    pub fn width(&self) -> usize {
        self.shape.cols()
    }

    /// Row count of the current shape
    pub fn height(&self) -> usize {
        self.shape.rows()
    }

    /// `(width, height)` of the current shape
    pub fn bounding_box(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.shape)
    }
}
