//! Episode runner: plays the grouped environment with the greedy policy.

use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result};
use log::{debug, info};
use serde::Serialize;

use rl_tetris::adapter::{FeatureOutput, GroupedEnv, RenderSink};
use rl_tetris::core::{BagSource, GameConfig, PieceSource, UniformSource};
use rl_tetris::engine::GreedyPolicy;

const RENDER_DELAY_MS: u64 = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub episodes: u32,
    pub seed: u64,
    /// Stop an episode after this many placements
    pub max_pieces: Option<u32>,
    pub render: bool,
    /// Uniform draws instead of the 7-bag
    pub uniform: bool,
    /// Print one JSON summary line per episode
    pub json: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            episodes: 1,
            seed: 1,
            max_pieces: None,
            render: false,
            uniform: false,
            json: false,
        }
    }
}

pub fn usage() -> &'static str {
    "usage: rl-tetris [--episodes N] [--seed N] [--max-pieces N] [--render] [--uniform] [--json]"
}

/// Parse flags (program name already stripped). `Ok(None)` means help was requested.
pub fn parse_args(args: &[String]) -> Result<Option<RunConfig>> {
    let mut config = RunConfig::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--episodes" => {
                i += 1;
                config.episodes = parse_value(args.get(i), "--episodes")?;
            }
            "--seed" => {
                i += 1;
                config.seed = parse_value(args.get(i), "--seed")?;
            }
            "--max-pieces" => {
                i += 1;
                config.max_pieces = Some(parse_value(args.get(i), "--max-pieces")?);
            }
            "--render" => config.render = true,
            "--uniform" => config.uniform = true,
            "--json" => config.json = true,
            "-h" | "--help" => return Ok(None),
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(Some(config))
}

fn parse_value<T: std::str::FromStr>(value: Option<&String>, flag: &str) -> Result<T> {
    let v = value.ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeSummary {
    pub episode: u32,
    pub seed: u64,
    pub pieces: u32,
    pub score: i32,
    pub cleared_lines: u32,
    /// Sum of step rewards (differs from `score` on a terminal step)
    pub total_reward: i32,
    pub terminated: bool,
}

pub fn run(
    config: &RunConfig,
    game: GameConfig,
    sink: Option<&mut dyn RenderSink>,
) -> Result<Vec<EpisodeSummary>> {
    // every episode reseeds on reset
    if config.uniform {
        run_episodes(GroupedEnv::new(game, UniformSource::new(0), FeatureOutput::Raw)?, config, sink)
    } else {
        run_episodes(GroupedEnv::new(game, BagSource::default(), FeatureOutput::Raw)?, config, sink)
    }
}

fn run_episodes<S: PieceSource>(
    mut env: GroupedEnv<S>,
    config: &RunConfig,
    mut sink: Option<&mut dyn RenderSink>,
) -> Result<Vec<EpisodeSummary>> {
    let policy = GreedyPolicy::default();
    let mut summaries = Vec::with_capacity(config.episodes as usize);

    for episode in 0..config.episodes {
        let seed = config.seed.wrapping_add(episode as u64);
        env.reset(Some(seed));

        let mut pieces = 0u32;
        let mut total_reward = 0i32;
        let mut terminated = env.game().is_game_over();

        while !terminated && config.max_pieces.map_or(true, |max| pieces < max) {
            let Some(action) = policy.best_in(env.placements()) else {
                debug!("episode {}: no legal placement", episode);
                // an illegal id forfeits, which is exactly the outcome here
                let step = env.step(env.action_count());
                total_reward += step.reward;
                break;
            };

            let step = env.step(action);
            pieces += 1;
            total_reward += step.reward;
            terminated = step.terminated;

            if let Some(sink) = sink.as_deref_mut() {
                env.render(sink)?;
                thread::sleep(Duration::from_millis(RENDER_DELAY_MS));
            }
        }

        let summary = EpisodeSummary {
            episode,
            seed,
            pieces,
            score: env.game().score(),
            cleared_lines: env.game().cleared_lines(),
            total_reward,
            terminated: env.game().is_game_over(),
        };
        info!(
            "episode {}: {} pieces, {} lines, score {}",
            summary.episode, summary.pieces, summary.cleared_lines, summary.score
        );
        summaries.push(summary);
    }

    Ok(summaries)
}
