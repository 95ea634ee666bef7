//! Configuration module - environment variable parsing

use std::env;
use std::str::FromStr;

use crate::util::time::{RENDER_FPS, SIMULATION_TPS};

/// Application configuration loaded from environment variables
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,

    /// Arena width in world units
    pub arena_width: f32,
    /// Arena height in world units
    pub arena_height: f32,
    /// Fighters on the stage
    pub fighter_count: usize,

    /// Fixed simulation ticks per second
    pub tick_rate: u32,
    /// Render samples per second
    pub render_rate: u32,
    /// Ticks before the match ends, 0 runs until interrupted
    pub match_ticks: u64,

    /// Seed for bot input
    pub bot_seed: u64,
    /// Snapshots kept per fighter, 0 keeps all of them
    pub snapshot_history: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_json: false,
            arena_width: 1280.0,
            arena_height: 720.0,
            fighter_count: 2,
            tick_rate: SIMULATION_TPS,
            render_rate: RENDER_FPS,
            match_ticks: 0,
            bot_seed: 42,
            snapshot_history: 2,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let defaults = Self::default();

        Ok(Self {
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: parse(&lookup, "LOG_JSON", defaults.log_json)?,

            arena_width: parse(&lookup, "ARENA_WIDTH", defaults.arena_width)?,
            arena_height: parse(&lookup, "ARENA_HEIGHT", defaults.arena_height)?,
            fighter_count: parse(&lookup, "FIGHTER_COUNT", defaults.fighter_count)?,

            tick_rate: parse(&lookup, "TICK_RATE", defaults.tick_rate)?,
            render_rate: parse(&lookup, "RENDER_RATE", defaults.render_rate)?,
            match_ticks: parse(&lookup, "MATCH_TICKS", defaults.match_ticks)?,

            bot_seed: parse(&lookup, "BOT_SEED", defaults.bot_seed)?,
            snapshot_history: parse(&lookup, "SNAPSHOT_HISTORY", defaults.snapshot_history)?,
        })
    }
}

fn parse<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
