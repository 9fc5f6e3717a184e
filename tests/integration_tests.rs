//! Integration tests for full episodes across core, engine and adapter

use rl_tetris::adapter::{FeatureOutput, GroupedEnv, TetrisEnv};
use rl_tetris::core::{
    calculate_reward, BagSource, Game, GameConfig, PieceSource, SequenceSource, UniformSource,
};
use rl_tetris::engine::{apply_placement, encode_action, GreedyPolicy, Policy};
use rl_tetris::types::{BaseAction, PieceKind, SpawnPolicy};

#[test]
fn test_game_lifecycle() {
    let mut game = Game::new(GameConfig::default(), BagSource::new(12345)).unwrap();
    assert!(game.active().is_none());

    assert!(game.reset());
    assert!(game.active().is_some());
    assert!(!game.is_game_over());
    assert_eq!(game.score(), 0);
}

#[test]
fn test_same_seed_same_episode() {
    let play = |seed: u32| {
        let mut game = Game::new(GameConfig::default(), BagSource::new(seed)).unwrap();
        game.reset();
        let mut policy = GreedyPolicy::default();
        let mut kinds = Vec::new();
        for _ in 0..40 {
            let Some(action) = policy.choose_action(&game) else {
                break;
            };
            kinds.push(game.active().unwrap().kind());
            apply_placement(&mut game, action).unwrap();
        }
        (kinds, game.snapshot())
    };
    assert_eq!(play(7), play(7));
}

#[test]
fn test_next_piece_preview_matches_spawn() {
    let mut game = Game::new(GameConfig::default(), BagSource::new(3)).unwrap();
    game.reset();
    for _ in 0..20 {
        let next = game.next_piece_type();
        game.hard_drop();
        let result = game.lock_piece();
        if result.game_over {
            break;
        }
        assert_eq!(game.active().unwrap().kind(), next);
    }
}

#[test]
fn test_greedy_policy_clears_lines() {
    let mut game = Game::new(GameConfig::default(), BagSource::new(1)).unwrap();
    game.reset();
    let mut policy = GreedyPolicy::default();
    for _ in 0..200 {
        let Some(action) = policy.choose_action(&game) else {
            break;
        };
        if apply_placement(&mut game, action).unwrap().game_over {
            break;
        }
    }
    assert!(game.cleared_lines() > 0);
}

#[test]
fn test_left_spawn_policy() {
    let config = GameConfig::new(20, 10, SpawnPolicy::Left);
    let mut env = TetrisEnv::new(config, SequenceSource::repeat(PieceKind::Z)).unwrap();
    let (obs, _) = env.reset(None);
    assert_eq!((obs.x, obs.y), (0, 0));
    assert_eq!(obs.piece_type, 3);
}

#[test]
fn test_invalid_config_rejected() {
    let config = GameConfig::new(2, 10, SpawnPolicy::Center);
    assert!(Game::new(config, BagSource::default()).is_err());
    assert!(TetrisEnv::new(config, BagSource::default()).is_err());
}

#[test]
fn test_narrow_board_rewards_scale_with_width() {
    let config = GameConfig::new(8, 4, SpawnPolicy::Left);
    let mut env = GroupedEnv::new(config, SequenceSource::repeat(PieceKind::I), FeatureOutput::Off)
        .unwrap();
    let (obs, _) = env.reset(None);
    assert_eq!(obs.action_mask.len(), 16);

    let step = env.step(encode_action(0, 0));
    assert_eq!(step.info.cleared_lines, 1);
    assert_eq!(step.reward, calculate_reward(1, 4, false));
    assert_eq!(step.reward, 5);
}

#[test]
fn test_spawn_failure_penalised_once_in_step_reward() {
    let mut env = TetrisEnv::new(GameConfig::default(), SequenceSource::repeat(PieceKind::I)).unwrap();
    env.reset(None);

    let mut score_before = 0;
    loop {
        let step = env.step(BaseAction::HardDrop);
        if step.terminated {
            // lock earned +1 in the score; the step reward carries -5 once
            assert_eq!(step.info.score, score_before + 1);
            assert_eq!(step.reward, 1 - 5);
            break;
        }
        score_before = step.info.score;
    }
}

#[test]
fn test_base_env_random_rollout_invariants() {
    let mut env = TetrisEnv::new(GameConfig::default(), UniformSource::new(11)).unwrap();
    env.reset(Some(11));
    let mut seed = 0x2545_f491u32;
    for _ in 0..2_000 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let action = BaseAction::ALL[(seed >> 16) as usize % 5];
        let step = env.step(action);
        assert!(!step.truncated);
        assert_eq!(step.observation.board.len(), 20);
        assert!(step
            .observation
            .board
            .iter()
            .all(|row| row.iter().any(|&c| c == 0)));
        if step.terminated {
            env.reset(None);
        }
    }
}

#[test]
fn test_grouped_env_full_episode() {
    let mut env = GroupedEnv::new(GameConfig::default(), BagSource::new(5), FeatureOutput::Raw).unwrap();
    let (obs, info) = env.reset(None);
    assert_eq!(obs.features.as_ref().unwrap().len(), 40);

    let policy = GreedyPolicy::default();
    let mut legal = info.action_mapping.unwrap();
    let mut steps = 0;
    while steps < 100 {
        let action = policy.best_in(env.placements()).unwrap();
        assert!(legal.contains(&action));
        let step = env.step(action);
        steps += 1;
        if step.terminated {
            break;
        }
        legal = step.info.action_mapping.unwrap();
        assert!(step.reward >= 1);
    }
    assert_eq!(steps, 100);
}

#[test]
fn test_sources_share_contract() {
    fn check<S: PieceSource>(mut source: S) {
        let first: Vec<PieceKind> = (0..15)
            .map(|_| {
                let peeked = source.peek();
                let popped = source.pop();
                assert_eq!(peeked, popped);
                popped
            })
            .collect();
        source.reset();
        let again: Vec<PieceKind> = (0..15).map(|_| source.pop()).collect();
        assert_eq!(first, again);
    }
    check(BagSource::new(9));
    check(UniformSource::new(9));
    check(SequenceSource::new([PieceKind::J, PieceKind::L]));
}
