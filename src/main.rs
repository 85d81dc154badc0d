use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use wormhole_life::config::{DEFAULT_PROGRESS_EVERY, DEFAULT_SAVE_AT};
use wormhole_life::io::{load_board, load_tunnels, save_board};
use wormhole_life::{Orientation, RunPaths, Simulation, SimulationConfig};

#[derive(Parser, Debug)]
#[command(
    name = "wormhole-life",
    version,
    about = "Run Conway's Game of Life with wormholes"
)]
struct Cli {
    /// Directory containing starting_position.png, horizontal_tunnel.png and vertical_tunnel.png.
    /// Saved generations are written here as <N>.png.
    input_dir: PathBuf,

    /// Generations to save (comma-separated or repeated). Defaults to
    /// 1,10,100,1000, minus any point beyond --generations.
    #[arg(long = "save", value_delimiter = ',')]
    save: Vec<u64>,

    /// Total generations to run. Defaults to the last save point.
    #[arg(long)]
    generations: Option<u64>,

    /// Log progress every N generations.
    #[arg(long, default_value_t = DEFAULT_PROGRESS_EVERY)]
    progress_every: u64,

    /// Worker threads for stepping; 1 runs sequentially.
    #[arg(long, default_value_t = 1)]
    threads: usize,
}

impl Cli {
    fn config(&self) -> SimulationConfig {
        let mut config = if self.save.is_empty() {
            let limit = self.generations.unwrap_or(u64::MAX);
            SimulationConfig::saving(DEFAULT_SAVE_AT.into_iter().filter(|&g| g <= limit))
        } else {
            SimulationConfig::saving(self.save.iter().copied())
        };
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        config.progress_every = self.progress_every;
        config.threads = self.threads;
        config
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = cli.config();
    config.validate().context("invalid arguments")?;

    let paths = RunPaths::new(&cli.input_dir);

    let board = load_board(&paths.starting_position()).context("failed to load starting position")?;
    let horizontal = load_tunnels(&paths.horizontal_tunnel(), Orientation::Horizontal, &board)
        .context("failed to load horizontal tunnels")?;
    let vertical = load_tunnels(&paths.vertical_tunnel(), Orientation::Vertical, &board)
        .context("failed to load vertical tunnels")?;

    let mut simulation = Simulation::new(board, horizontal, vertical);
    let summary = simulation.run(&config, |generation, grid| {
        let path = paths.output(generation);
        info!(generation, path = %path.display(), "saving state");
        save_board(grid, &path)
    })?;

    if !summary.failed_saves.is_empty() {
        warn!(generations = ?summary.failed_saves, "some generations could not be saved");
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
