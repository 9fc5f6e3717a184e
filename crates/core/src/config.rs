//! Game configuration
//!
//! Defaults can be overridden from the environment:
//!
//! - `RL_TETRIS_HEIGHT`: board rows (default 20)
//! - `RL_TETRIS_WIDTH`: board columns (default 10)
//! - `RL_TETRIS_SPAWN`: `center` or `left` (default `center`)
//!
//! Unparseable values are ignored with a warning and the default is kept.

use std::env;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CoreError, Result};
use crate::types::{SpawnPolicy, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, MIN_BOARD_EDGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    #[serde(
        serialize_with = "serialize_spawn",
        deserialize_with = "deserialize_spawn"
    )]
    pub spawn: SpawnPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_BOARD_HEIGHT,
            width: DEFAULT_BOARD_WIDTH,
            spawn: SpawnPolicy::Center,
        }
    }
}

impl GameConfig {
    pub fn new(height: usize, width: usize, spawn: SpawnPolicy) -> Self {
        Self {
            height,
            width,
            spawn,
        }
    }

    /// Defaults overridden by `RL_TETRIS_*` environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(h) = env_parse("RL_TETRIS_HEIGHT") {
            config.height = h;
        }
        if let Some(w) = env_parse("RL_TETRIS_WIDTH") {
            config.width = w;
        }
        if let Ok(s) = env::var("RL_TETRIS_SPAWN") {
            match SpawnPolicy::from_str(&s) {
                Some(policy) => config.spawn = policy,
                None => log::warn!("ignoring RL_TETRIS_SPAWN={:?}: expected center|left", s),
            }
        }

        config
    }

    /// Every tetromino must fit the board in every orientation.
    pub fn validate(&self) -> Result<()> {
        if self.width < MIN_BOARD_EDGE || self.height < MIN_BOARD_EDGE {
            return Err(CoreError::InvalidConfig(format!(
                "board must be at least {m}x{m}, got {}x{}",
                self.height,
                self.width,
                m = MIN_BOARD_EDGE
            )));
        }
        Ok(())
    }
}

fn env_parse(key: &str) -> Option<usize> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {}={:?}: not a number", key, raw);
            None
        }
    }
}

fn serialize_spawn<S: Serializer>(spawn: &SpawnPolicy, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(spawn.as_str())
}

fn deserialize_spawn<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<SpawnPolicy, D::Error> {
    let s = String::deserialize(d)?;
    SpawnPolicy::from_str(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("unknown spawn policy: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert_eq!((config.height, config.width), (20, 10));
        assert_eq!(config.spawn, SpawnPolicy::Center);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn too_small_rejected() {
        let config = GameConfig::new(20, 3, SpawnPolicy::Left);
        assert!(matches!(config.validate(), Err(CoreError::InvalidConfig(_))));
    }
}
