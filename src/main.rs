//! Headless RL Tetris runner (default binary).
//!
//! Plays episodes with the greedy placement policy and reports per-episode
//! results. Board size and spawn policy come from `RL_TETRIS_*` environment
//! variables; `--render` draws each placement to the terminal.

mod runner;

use anyhow::Result;
use flexi_logger::Logger;

use rl_tetris::core::GameConfig;
use rl_tetris::term::TerminalSink;

use runner::{parse_args, run, usage};

fn main() -> Result<()> {
    Logger::try_with_env_or_str("info")?
        .format(flexi_logger::colored_default_format)
        .start()?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(config) = parse_args(&args)? else {
        println!("{}", usage());
        return Ok(());
    };

    let game = GameConfig::from_env();
    game.validate()?;
    log::debug!("board {}x{}, spawn {}", game.height, game.width, game.spawn.as_str());

    let summaries = if config.render {
        let mut term = TerminalSink::new();
        term.enter()?;
        let result = run(&config, game, Some(&mut term));
        // Always try to restore terminal state.
        let _ = term.exit();
        result?
    } else {
        run(&config, game, None)?
    };

    if config.json {
        for summary in &summaries {
            println!("{}", serde_json::to_string(summary)?);
        }
    } else {
        for s in &summaries {
            println!(
                "episode {:>3}  pieces {:>6}  lines {:>6}  score {:>8}  reward {:>8}",
                s.episode, s.pieces, s.cleared_lines, s.score, s.total_reward
            );
        }
    }

    Ok(())
}
