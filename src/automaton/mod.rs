//! Core automaton logic: grid storage, wormhole indices, neighbor resolution,
//! and generation stepping.
//!
//! Image decoding and encoding live in `io/` and only hand finished grids and
//! portal indices to this module.

pub mod grid;
pub mod neighbor;
pub mod portal;
pub mod region;
pub mod stepping;

pub use grid::{Grid, Location};
pub use neighbor::{Direction, NeighborResolver};
pub use portal::{Orientation, Portal, PortalDiagnostic, PortalIndex, PortalKey};
pub use region::{extract_region, import_region};
pub use stepping::{count_live_neighbors, next_state, step, step_parallel};
