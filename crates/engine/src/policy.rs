//! Placement policies

use rl_tetris_core::{BoardFeatures, Game, PieceSource};

use crate::placement::{PlacementEnumerator, PlacementSet};

/// Policy chooses a placement for the current state.
///
/// Returns an action id in `[0, width * 4)`, or `None` if no legal action
/// exists (or the game has no active piece).
pub trait Policy<S: PieceSource> {
    fn choose_action(&mut self, game: &Game<S>) -> Option<usize>;
}

/// One-ply greedy search over the macro-action space.
///
/// Each legal slot is scored as the dot product of its post-clear features
/// `[lines_cleared, holes, bumpiness, total_height]` with `weights`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreedyPolicy {
    pub weights: [f32; BoardFeatures::DIM],
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self {
            weights: [0.76, -0.36, -0.18, -0.51],
        }
    }
}

impl GreedyPolicy {
    pub fn new(weights: [f32; BoardFeatures::DIM]) -> Self {
        Self { weights }
    }

    pub fn score(&self, features: &BoardFeatures) -> f32 {
        features
            .to_array()
            .iter()
            .zip(self.weights.iter())
            .map(|(f, w)| f * w)
            .sum()
    }

    /// Best legal slot of an already enumerated set; ties go to the lowest id
    pub fn best_in(&self, set: &PlacementSet) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for &id in &set.legal {
            let Some(features) = set.features_of(id) else {
                continue;
            };
            let s = self.score(features);
            if best.map_or(true, |(_, b)| s > b) {
                best = Some((id, s));
            }
        }
        best.map(|(id, _)| id)
    }
}

impl<S: PieceSource> Policy<S> for GreedyPolicy {
    fn choose_action(&mut self, game: &Game<S>) -> Option<usize> {
        if game.is_game_over() {
            return None;
        }
        let piece = game.active()?;
        let set = PlacementEnumerator::enumerate_with_features(game.board(), piece);
        self.best_in(&set)
    }
}
