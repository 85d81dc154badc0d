//! Run configuration and fixed resource names.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{Result, WormholeError};

pub const STARTING_POSITION_FILE: &str = "starting_position.png";
pub const HORIZONTAL_TUNNEL_FILE: &str = "horizontal_tunnel.png";
pub const VERTICAL_TUNNEL_FILE: &str = "vertical_tunnel.png";

/// Pixel color of a live cell.
pub const ALIVE_RGB: [u8; 3] = [255, 255, 255];
/// Pixel color of a dead cell, and of "no portal" in tunnel maps.
pub const BACKGROUND_RGB: [u8; 3] = [0, 0, 0];

pub const DEFAULT_SAVE_AT: [u64; 4] = [1, 10, 100, 1000];
pub const DEFAULT_PROGRESS_EVERY: u64 = 50;

/// How long to run and which generations to hand to the output sink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Number of generations to compute.
    pub generations: u64,
    /// Generations after which the grid is persisted.
    pub save_at: BTreeSet<u64>,
    /// Log progress every this many generations.
    pub progress_every: u64,
    /// Worker threads; 1 steps sequentially.
    pub threads: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let save_at: BTreeSet<u64> = DEFAULT_SAVE_AT.into_iter().collect();
        SimulationConfig {
            generations: save_at.iter().copied().max().unwrap_or(1),
            save_at,
            progress_every: DEFAULT_PROGRESS_EVERY,
            threads: 1,
        }
    }
}

impl SimulationConfig {
    /// Use `save_at` as the persisted generations and run until the last one.
    pub fn saving(save_at: impl IntoIterator<Item = u64>) -> Self {
        let save_at: BTreeSet<u64> = save_at.into_iter().collect();
        SimulationConfig {
            generations: save_at.iter().copied().max().unwrap_or(0),
            save_at,
            ..SimulationConfig::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.generations == 0 {
            return Err(WormholeError::InvalidConfig(
                "generations must be at least 1".into(),
            ));
        }
        if self.progress_every == 0 {
            return Err(WormholeError::InvalidConfig(
                "progress interval must be at least 1".into(),
            ));
        }
        if self.threads == 0 {
            return Err(WormholeError::InvalidConfig(
                "thread count must be at least 1".into(),
            ));
        }
        if let Some(&generation) = self.save_at.iter().find(|&&g| g == 0 || g > self.generations) {
            return Err(WormholeError::InvalidConfig(format!(
                "save point {generation} is outside 1..={}",
                self.generations
            )));
        }
        Ok(())
    }
}

/// Input and output locations inside one run directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunPaths {
    pub dir: PathBuf,
}

impl RunPaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        RunPaths { dir: dir.into() }
    }

    pub fn starting_position(&self) -> PathBuf {
        self.dir.join(STARTING_POSITION_FILE)
    }

    pub fn horizontal_tunnel(&self) -> PathBuf {
        self.dir.join(HORIZONTAL_TUNNEL_FILE)
    }

    pub fn vertical_tunnel(&self) -> PathBuf {
        self.dir.join(VERTICAL_TUNNEL_FILE)
    }

    /// `<dir>/<generation>.png`
    pub fn output(&self, generation: u64) -> PathBuf {
        self.dir.join(format!("{generation}.png"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
