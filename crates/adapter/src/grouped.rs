//! Grouped (macro-action) environment
//!
//! The action space is every `(column, rotation)` drop of the active piece,
//! `width * 4` ids in total, `id = x * 4 + rotation`. Each observation carries
//! the board each action would produce plus a legality mask; `info` carries the
//! live board and the legal ids.

use anyhow::{Context, Result};
use log::warn;

use crate::core::{BagSource, Game, GameConfig, PieceSource};
use crate::engine::{action_count, apply_placement, PlacementEnumerator, PlacementSet};
use crate::observation::{GroupedObservation, Info, Step};
use crate::render::RenderSink;

/// Which per-slot feature vectors the observation carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeatureOutput {
    #[default]
    Off,
    Raw,
    /// Each term divided by its maximum and clamped to `[0, 1]`
    Normalized([u32; 4]),
}

#[derive(Debug, Clone)]
pub struct GroupedEnv<S: PieceSource = BagSource> {
    game: Game<S>,
    features: FeatureOutput,
    current: PlacementSet,
}

impl<S: PieceSource> GroupedEnv<S> {
    pub fn new(config: GameConfig, source: S, features: FeatureOutput) -> Result<Self> {
        let game = Game::new(config, source).context("invalid environment configuration")?;
        let current = enumerate(&game, features);
        Ok(Self {
            game,
            features,
            current,
        })
    }

    pub fn game(&self) -> &Game<S> {
        &self.game
    }

    pub fn action_count(&self) -> usize {
        action_count(self.game.board().width())
    }

    /// Enumeration for the current piece
    pub fn placements(&self) -> &PlacementSet {
        &self.current
    }

    pub fn legal_actions(&self) -> &[usize] {
        &self.current.legal
    }

    pub fn reset(&mut self, seed: Option<u64>) -> (GroupedObservation, Info) {
        match seed {
            Some(seed) => self.game.reset_with_seed(seed),
            None => self.game.reset(),
        };
        self.refresh();
        (self.observation(), self.info())
    }

    /// Place the active piece at slot `action_id`.
    ///
    /// An illegal or out-of-range id ends the episode with the overflow
    /// penalty, since no placement can be carried out.
    pub fn step(&mut self, action_id: usize) -> Step<GroupedObservation> {
        if self.game.is_game_over() {
            warn!("step({}) on a finished episode; call reset", action_id);
            return self.finish(0, true);
        }

        let (lines, terminated) = match apply_placement(&mut self.game, action_id) {
            Ok(result) => (result.lines_cleared, result.game_over),
            Err(err) => {
                warn!("macro action {} rejected ({}); forfeiting episode", action_id, err);
                self.game.forfeit();
                (0, true)
            }
        };

        let reward = self.game.calculate_reward(lines, terminated);
        self.refresh();
        self.finish(reward, terminated)
    }

    pub fn render(&self, sink: &mut dyn RenderSink) -> Result<()> {
        sink.render(&self.game.render_frame())
    }

    fn refresh(&mut self) {
        self.current = enumerate(&self.game, self.features);
    }

    fn observation(&self) -> GroupedObservation {
        let features = self.current.features.as_ref().map(|all| {
            all.iter()
                .map(|f| match self.features {
                    FeatureOutput::Normalized(max) => f.normalized(max),
                    _ => f.to_array(),
                })
                .collect()
        });
        GroupedObservation {
            boards: self.current.boards.clone(),
            action_mask: self.current.mask.clone(),
            features,
        }
    }

    fn info(&self) -> Info {
        Info {
            board: Some(self.game.board().state()),
            action_mapping: Some(self.current.legal.clone()),
            ..Info::from_game(&self.game)
        }
    }

    fn finish(&self, reward: i32, terminated: bool) -> Step<GroupedObservation> {
        Step {
            observation: self.observation(),
            reward,
            terminated,
            truncated: false,
            info: self.info(),
        }
    }
}

/// Enumerate the active piece; with none, every slot is illegal and holds the
/// live board.
fn enumerate<S: PieceSource>(game: &Game<S>, features: FeatureOutput) -> PlacementSet {
    let board = game.board();
    let with_features = features != FeatureOutput::Off;

    if let Some(piece) = game.active() {
        return if with_features {
            PlacementEnumerator::enumerate_with_features(board, piece)
        } else {
            PlacementEnumerator::enumerate(board, piece)
        };
    }

    PlacementEnumerator::all_masked(board, with_features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SequenceSource, DEFAULT_FEATURE_MAX};
    use crate::engine::encode_action;
    use crate::types::PieceKind;

    fn env(kinds: &[PieceKind], features: FeatureOutput) -> GroupedEnv<SequenceSource> {
        GroupedEnv::new(
            GameConfig::default(),
            SequenceSource::new(kinds.iter().copied()),
            features,
        )
        .unwrap()
    }

    #[test]
    fn action_space_is_width_times_four() {
        let mut env = env(&[PieceKind::T], FeatureOutput::Off);
        assert_eq!(env.action_count(), 40);
        let (obs, info) = env.reset(None);
        assert_eq!(obs.boards.len(), 40);
        assert_eq!(obs.boards[0].len(), 20);
        assert_eq!(obs.boards[0][0].len(), 10);
        assert_eq!(obs.action_mask.len(), 40);
        assert!(obs.features.is_none());

        let mapping = info.action_mapping.unwrap();
        let expected: Vec<usize> = (0..40).filter(|&i| obs.action_mask[i]).collect();
        assert_eq!(mapping, expected);
        assert_eq!(info.board.unwrap(), vec![vec![0u8; 10]; 20]);
    }

    #[test]
    fn features_shape_and_masked_zeros() {
        let mut env = env(&[PieceKind::O], FeatureOutput::Raw);
        let (obs, _) = env.reset(None);
        let features = obs.features.unwrap();
        assert_eq!(features.len(), 40);
        for (id, f) in features.iter().enumerate() {
            if !obs.action_mask[id] {
                assert_eq!(*f, [0.0; 4]);
            }
        }
        // O at column 0: heights [2, 2, 0, ...]
        assert_eq!(features[0], [0.0, 0.0, 2.0, 4.0]);
    }

    #[test]
    fn normalized_features_in_unit_range() {
        let mut env = env(&[PieceKind::I], FeatureOutput::Normalized(DEFAULT_FEATURE_MAX));
        let (obs, _) = env.reset(None);
        for f in obs.features.unwrap() {
            assert!(f.iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn legal_step_rewards_and_advances() {
        let mut env = env(&[PieceKind::I, PieceKind::O], FeatureOutput::Off);
        env.reset(None);
        let step = env.step(encode_action(0, 0));
        assert_eq!(step.reward, 1);
        assert!(!step.terminated);
        assert_eq!(step.info.score, 1);
        assert_eq!(step.info.board.as_ref().unwrap()[19][0..4], [2, 2, 2, 2]);
        // next piece is O, which cannot sit in column 9
        assert!(!step.observation.action_mask[encode_action(9, 0)]);
    }

    #[test]
    fn illegal_action_forfeits_with_penalty() {
        let mut env = env(&[PieceKind::O], FeatureOutput::Off);
        env.reset(None);
        let step = env.step(encode_action(9, 0));
        assert!(step.terminated);
        assert_eq!(step.reward, -4);
        assert!(env.game().is_game_over());
        assert!(step.observation.action_mask.iter().all(|m| !m));
        assert!(step.info.action_mapping.unwrap().is_empty());

        let again = env.step(0);
        assert!(again.terminated);
        assert_eq!(again.reward, 0);
    }

    #[test]
    fn out_of_range_action_forfeits() {
        let mut env = env(&[PieceKind::T], FeatureOutput::Off);
        env.reset(None);
        let step = env.step(400);
        assert!(step.terminated);
        assert_eq!(step.reward, -4);
    }

    #[test]
    fn reset_after_terminal_restores_play() {
        let mut env = env(&[PieceKind::O], FeatureOutput::Off);
        env.reset(None);
        env.step(encode_action(9, 0));
        let (obs, info) = env.reset(Some(7));
        assert!(obs.action_mask.iter().any(|m| *m));
        assert_eq!(info.score, 0);
    }

    #[test]
    fn grouped_observation_serializes_camel_case() {
        let mut env = env(&[PieceKind::Z], FeatureOutput::Raw);
        let (obs, info) = env.reset(None);
        let obs = serde_json::to_value(&obs).unwrap();
        assert_eq!(obs["actionMask"].as_array().unwrap().len(), 40);
        assert_eq!(obs["features"].as_array().unwrap().len(), 40);
        let info = serde_json::to_value(&info).unwrap();
        assert!(info["actionMapping"].is_array());
        assert_eq!(info["board"].as_array().unwrap().len(), 20);
    }
}
