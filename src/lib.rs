//! Wormhole Life - Conway's Game of Life with wormhole adjacency
//!
//! Cells on a rectangular board follow the B3/S23 rules, except that pairs of
//! same-colored "portal" cells are treated as touching. Horizontal tunnels join
//! the left/right sides of their endpoints, vertical tunnels the top/bottom.
//!
//! The `automaton` module holds the core logic. The `io` module loads boards
//! and tunnel maps from PNG files and writes generations back out.

pub mod automaton;
pub mod config;
pub mod error;
pub mod io;
pub mod state;


pub use automaton::{
    Direction, Grid, Location, NeighborResolver, Orientation, Portal,
    PortalDiagnostic, PortalIndex, PortalKey,
};
pub use config::{RunPaths, SimulationConfig};
pub use error::{Result, WormholeError};
pub use state::{RunSummary, Simulation};
