//! File-based configuration for the command-line host.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use orb_maze_core::DEFAULT_MOVE_COOLDOWN_TICKS;
use serde::Deserialize;

const DEFAULT_LEVELS_DIRECTORY: &str = "levels";
const DEFAULT_TICK_MILLIS: u64 = 16;

/// Top-level configuration document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Where level documents live.
    pub(crate) levels: LevelsConfig,
    /// Simulation pacing.
    pub(crate) simulation: SimulationConfig,
}

/// Level discovery settings.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct LevelsConfig {
    /// Directory holding `level{n}.json` documents.
    pub(crate) directory: PathBuf,
    /// Number of levels; probed from the directory when absent.
    pub(crate) count: Option<u32>,
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_LEVELS_DIRECTORY),
            count: None,
        }
    }
}

/// Simulation pacing settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SimulationConfig {
    /// Ticks a player waits after each accepted move.
    pub(crate) move_cooldown_ticks: u32,
    /// Simulated milliseconds between ticks.
    pub(crate) tick_millis: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            move_cooldown_ticks: DEFAULT_MOVE_COOLDOWN_TICKS,
            tick_millis: DEFAULT_TICK_MILLIS,
        }
    }
}

impl Config {
    /// Reads the configuration file, or returns defaults when no path is given.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("invalid config file at {}", path.display()))
    }

    fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse config toml contents")
    }
}
