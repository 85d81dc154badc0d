//! Simulation state and the generation loop.

use std::time::{Duration, Instant};

use tracing::{debug, error, info};

use crate::automaton::{step, step_parallel, Grid, NeighborResolver, PortalIndex};
use crate::config::SimulationConfig;
use crate::error::Result;

/// A board and its wormholes, advanced one generation at a time.
///
/// Portal indices are fixed for the lifetime of the simulation; only the grid
/// and the generation counter change.
pub struct Simulation {
    grid: Grid,
    horizontal: PortalIndex,
    vertical: PortalIndex,
    generation: u64,
}

/// Outcome of [`Simulation::run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub generations_run: u64,
    pub saved: Vec<u64>,
    pub failed_saves: Vec<u64>,
    pub elapsed: Duration,
    pub final_population: usize,
}

impl Simulation {
    pub fn new(grid: Grid, horizontal: PortalIndex, vertical: PortalIndex) -> Self {
        Simulation {
            grid,
            horizontal,
            vertical,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn horizontal(&self) -> &PortalIndex {
        &self.horizontal
    }

    pub fn vertical(&self) -> &PortalIndex {
        &self.vertical
    }

    /// Resolver over this simulation's board and portals.
    pub fn resolver(&self) -> NeighborResolver<'_> {
        NeighborResolver::for_grid(&self.grid, &self.horizontal, &self.vertical)
    }

    /// Advance one generation sequentially.
    pub fn step(&mut self) {
        self.advance(None);
    }

    fn advance(&mut self, pool: Option<&rayon::ThreadPool>) {
        let resolver = self.resolver();
        let next = match pool {
            Some(pool) => step_parallel(&self.grid, &resolver, pool),
            None => step(&self.grid, &resolver),
        };
        self.grid = next;
        self.generation += 1;
    }

    /// Run `config.generations` steps. After each generation listed in
    /// `config.save_at`, `sink` receives the generation number and the grid.
    ///
    /// A failing sink is logged and recorded in the summary; the run continues.
    pub fn run<F>(&mut self, config: &SimulationConfig, mut sink: F) -> Result<RunSummary>
    where
        F: FnMut(u64, &Grid) -> Result<()>,
    {
        config.validate()?;

        let pool = if config.threads > 1 {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(config.threads)
                    .build()?,
            )
        } else {
            None
        };

        info!(
            generations = config.generations,
            threads = config.threads,
            width = self.grid.width,
            height = self.grid.height,
            "starting simulation"
        );

        let start = Instant::now();
        let mut saved = Vec::new();
        let mut failed_saves = Vec::new();

        for i in 1..=config.generations {
            self.advance(pool.as_ref());
            let generation = self.generation;

            if config.save_at.contains(&generation) {
                debug!(generation, population = self.grid.population(), "persisting grid");
                match sink(generation, &self.grid) {
                    Ok(()) => saved.push(generation),
                    Err(err) => {
                        error!(generation, error = %err, "failed to persist grid, continuing");
                        failed_saves.push(generation);
                    }
                }
            } else if i % config.progress_every == 0 {
                info!(
                    generation,
                    total = config.generations,
                    elapsed_secs = start.elapsed().as_secs_f64(),
                    "progress"
                );
            }
        }

        let elapsed = start.elapsed();
        info!(
            elapsed_secs = elapsed.as_secs_f64(),
            population = self.grid.population(),
            "simulation finished"
        );

        Ok(RunSummary {
            generations_run: config.generations,
            saved,
            failed_saves,
            elapsed,
            final_population: self.grid.population(),
        })
    }
}
