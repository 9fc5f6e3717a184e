//! Board feature extraction for learning agents and heuristic policies.
//!
//! All features are computed from a locked grid in O(height * width).

use crate::board::Board;

/// The classic four-term board summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct BoardFeatures {
    pub lines_cleared: u32,
    pub holes: u32,
    pub bumpiness: u32,
    pub total_height: u32,
}

impl BoardFeatures {
    pub const NAMES: [&'static str; 4] = ["lines_cleared", "holes", "bumpiness", "total_height"];
    pub const DIM: usize = 4;

    /// Summarise `board`, tagging the result with `lines_cleared` from the
    /// placement that produced it.
    pub fn extract(board: &Board, lines_cleared: u32) -> Self {
        let (bumpiness, total_height) = board.bumpiness_and_height();
        Self {
            lines_cleared,
            holes: board.holes(),
            bumpiness,
            total_height,
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [
            self.lines_cleared as f32,
            self.holes as f32,
            self.bumpiness as f32,
            self.total_height as f32,
        ]
    }

    /// Scale each term by its maximum and clamp into `[0, 1]`.
    ///
    /// A zero maximum is treated as 1.
    pub fn normalized(&self, max: [u32; 4]) -> [f32; 4] {
        let raw = self.to_array();
        let mut out = [0f32; 4];
        for i in 0..4 {
            let m = if max[i] == 0 { 1.0 } else { max[i] as f32 };
            out[i] = (raw[i] / m).clamp(0.0, 1.0);
        }
        out
    }
}

/// Default maxima for [`BoardFeatures::normalized`]
pub const DEFAULT_FEATURE_MAX: [u32; 4] = [4, 200, 200, 200];

/// Extended summary: the basic four terms plus shape statistics
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdvancedFeatures {
    pub basic: BoardFeatures,
    pub max_height: u32,
    pub min_height: u32,
    pub height_variance: f32,
    pub complete_rows: u32,
    pub weighted_holes: f32,
    pub wells: u32,
}

impl AdvancedFeatures {
    pub const NAMES: [&'static str; 10] = [
        "lines_cleared",
        "holes",
        "bumpiness",
        "total_height",
        "max_height",
        "min_height",
        "height_variance",
        "complete_rows",
        "weighted_holes",
        "wells",
    ];
    pub const DIM: usize = 10;

    pub fn extract(board: &Board, lines_cleared: u32) -> Self {
        let heights = board.column_heights();
        let max_height = heights.iter().copied().max().unwrap_or(0);
        let min_height = heights.iter().copied().min().unwrap_or(0);

        let height_variance = if heights.is_empty() {
            0.0
        } else {
            let n = heights.len() as f32;
            let mean = heights.iter().map(|&h| h as f32).sum::<f32>() / n;
            heights
                .iter()
                .map(|&h| (h as f32 - mean).powi(2))
                .sum::<f32>()
                / n
        };

        let complete_rows = (0..board.height())
            .filter(|&y| board.is_row_full(y))
            .count() as u32;

        Self {
            basic: BoardFeatures::extract(board, lines_cleared),
            max_height,
            min_height,
            height_variance,
            complete_rows,
            weighted_holes: weighted_holes(board),
            wells: count_wells(&heights),
        }
    }

    pub fn to_array(&self) -> [f32; 10] {
        let b = self.basic.to_array();
        [
            b[0],
            b[1],
            b[2],
            b[3],
            self.max_height as f32,
            self.min_height as f32,
            self.height_variance,
            self.complete_rows as f32,
            self.weighted_holes,
            self.wells as f32,
        ]
    }
}

// ---------------- internal helpers ----------------

/// Holes weighted by depth: a hole in row `y` counts `(y + 1) / height`.
fn weighted_holes(board: &Board) -> f32 {
    let height = board.height() as f32;
    let mut sum = 0.0f32;
    for x in 0..board.width() as i32 {
        let mut found = false;
        for y in 0..board.height() as i32 {
            if board.is_cell_occupied(x, y) {
                found = true;
            } else if found {
                sum += (y + 1) as f32 / height;
            }
        }
    }
    sum
}

/// Columns strictly lower than both neighbours; the edges count as higher.
fn count_wells(heights: &[u32]) -> u32 {
    if heights.len() < 2 {
        return 0;
    }
    let last = heights.len() - 1;
    (0..heights.len())
        .filter(|&i| {
            let h = heights[i];
            let left = i == 0 || heights[i - 1] > h;
            let right = i == last || heights[i + 1] > h;
            left && right
        })
        .count() as u32
}
