//! Base-action environment
//!
//! One step applies one of the five base actions to the active piece. If the
//! piece can no longer move down afterwards it is locked in the same step.

use anyhow::{Context, Result};
use log::warn;

use crate::core::{BagSource, Game, GameConfig, PieceSource};
use crate::observation::{Info, Observation, Step};
use crate::render::RenderSink;
use crate::types::BaseAction;

#[derive(Debug, Clone)]
pub struct TetrisEnv<S: PieceSource = BagSource> {
    game: Game<S>,
}

impl<S: PieceSource> TetrisEnv<S> {
    pub fn new(config: GameConfig, source: S) -> Result<Self> {
        let game = Game::new(config, source).context("invalid environment configuration")?;
        Ok(Self { game })
    }

    pub fn game(&self) -> &Game<S> {
        &self.game
    }

    /// Start a new episode, reseeding the piece source first if a seed is given
    pub fn reset(&mut self, seed: Option<u64>) -> (Observation, Info) {
        match seed {
            Some(seed) => self.game.reset_with_seed(seed),
            None => self.game.reset(),
        };
        (Observation::from_game(&self.game), Info::from_game(&self.game))
    }

    pub fn step(&mut self, action: BaseAction) -> Step<Observation> {
        if self.game.is_game_over() {
            warn!("step({}) on a finished episode; call reset", action.as_str());
            return self.finish(0, true);
        }

        match action {
            BaseAction::MoveLeft => {
                self.game.move_piece(-1, 0);
            }
            BaseAction::MoveRight => {
                self.game.move_piece(1, 0);
            }
            BaseAction::MoveDown => {
                self.game.move_piece(0, 1);
            }
            BaseAction::Rotate => {
                self.game.rotate_piece();
            }
            BaseAction::HardDrop => {
                self.game.hard_drop();
            }
        }

        if self.game.can_move(0, 1) {
            return self.finish(0, false);
        }

        let result = self.game.lock_piece();
        let reward = self
            .game
            .calculate_reward(result.lines_cleared, result.game_over);
        self.finish(reward, result.game_over)
    }

    /// Step with a raw action ordinal; unknown ordinals are rejected
    pub fn step_index(&mut self, action: u8) -> Result<Step<Observation>> {
        let action = BaseAction::from_index(action)
            .with_context(|| format!("unknown base action ordinal {}", action))?;
        Ok(self.step(action))
    }

    pub fn render(&self, sink: &mut dyn RenderSink) -> Result<()> {
        sink.render(&self.game.render_frame())
    }

    fn finish(&self, reward: i32, terminated: bool) -> Step<Observation> {
        Step {
            observation: Observation::from_game(&self.game),
            reward,
            terminated,
            truncated: false,
            info: Info::from_game(&self.game),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SequenceSource;
    use crate::render::RecordingSink;
    use crate::types::PieceKind;

    fn env(kinds: &[PieceKind]) -> TetrisEnv<SequenceSource> {
        TetrisEnv::new(GameConfig::default(), SequenceSource::new(kinds.iter().copied())).unwrap()
    }

    #[test]
    fn reset_observes_spawned_piece() {
        let mut env = env(&[PieceKind::T]);
        let (obs, info) = env.reset(None);
        assert_eq!(obs.piece_type, 4);
        assert_eq!((obs.x, obs.y), (4, 0));
        assert_eq!(obs.board.len(), 20);
        assert_eq!(info.score, 0);
        assert_eq!(info.cleared_lines, 0);
    }

    #[test]
    fn moves_do_not_reward() {
        let mut env = env(&[PieceKind::T]);
        env.reset(None);
        let step = env.step(BaseAction::MoveLeft);
        assert_eq!(step.reward, 0);
        assert!(!step.terminated);
        assert!(!step.truncated);
        assert_eq!(step.observation.x, 3);

        let step = env.step(BaseAction::MoveDown);
        assert_eq!(step.observation.y, 1);
    }

    #[test]
    fn hard_drop_locks_in_same_step() {
        let mut env = env(&[PieceKind::O, PieceKind::I]);
        env.reset(None);
        let step = env.step(BaseAction::HardDrop);
        assert_eq!(step.reward, 1);
        assert_eq!(step.info.score, 1);
        assert_eq!(step.observation.piece_type, 1);
        assert_eq!(step.observation.board[19][4], 1);
    }

    #[test]
    fn game_over_step_is_penalised_then_inert() {
        let mut env = env(&[PieceKind::O]);
        env.reset(None);

        let mut last = None;
        for _ in 0..20 {
            let step = env.step(BaseAction::HardDrop);
            let done = step.terminated;
            last = Some(step);
            if done {
                break;
            }
        }
        let last = last.unwrap();
        assert!(last.terminated);
        assert_eq!(last.reward, -4);
        assert_eq!(last.observation.piece_type, 0);

        let after = env.step(BaseAction::MoveLeft);
        assert!(after.terminated);
        assert_eq!(after.reward, 0);
        assert_eq!(after.info, last.info);
    }

    #[test]
    fn step_index_rejects_unknown() {
        let mut env = env(&[PieceKind::T]);
        env.reset(None);
        assert!(env.step_index(5).is_err());
        assert_eq!(env.step_index(1).unwrap().observation.x, 5);
    }

    #[test]
    fn render_pushes_frame() {
        let mut env = env(&[PieceKind::I, PieceKind::S]);
        env.reset(None);
        let mut sink = RecordingSink::default();
        env.render(&mut sink).unwrap();
        assert_eq!(sink.frames.len(), 1);
        assert_eq!(sink.frames[0].board[0][3..7], [2, 2, 2, 2]);
        assert_eq!(sink.frames[0].next_piece_shape, crate::core::shape_of(PieceKind::S));
    }

    #[test]
    fn observation_serializes_camel_case() {
        let mut env = env(&[PieceKind::L]);
        let (obs, info) = env.reset(None);
        let obs = serde_json::to_value(&obs).unwrap();
        assert_eq!(obs["pieceType"], 5);
        let info = serde_json::to_value(&info).unwrap();
        assert_eq!(info["clearedLines"], 0);
        assert!(info.get("actionMapping").is_none());
    }
}
