//! Generation stepping with Conway's B3/S23 rules over wormhole neighbors.

use rayon::prelude::*;

use super::grid::{Grid, Location};
use super::neighbor::{Direction, NeighborResolver};

/// B3/S23 rules:
/// - Survival: a live cell with 2 or 3 live neighbors stays alive
/// - Birth: a dead cell with exactly 3 live neighbors becomes alive
/// - Everything else is dead in the next generation
#[inline]
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Count live neighbors of `at`, asking `neighbor` where each of the eight
/// directions leads. Off-grid results count as dead. Two directions that land
/// on the same location are both counted.
pub fn count_live_neighbors<F>(grid: &Grid, at: Location, mut neighbor: F) -> u8
where
    F: FnMut(Location, Direction) -> Location,
{
    let mut count = 0;
    for dir in Direction::ALL {
        if grid.is_alive(neighbor(at, dir)) {
            count += 1;
        }
    }
    count
}

/// Compute the next generation.
///
/// Each (cell, direction) pair is resolved exactly once per generation, so
/// resolutions go straight to the resolver.
pub fn step(grid: &Grid, resolver: &NeighborResolver<'_>) -> Grid {
    if grid.is_empty() {
        return grid.clone();
    }

    let mut next = Grid::new(grid.width, grid.height);

    for at in grid.locations() {
        let neighbors = count_live_neighbors(grid, at, |loc, dir| resolver.resolve(loc, dir));
        let idx = grid.index_of(at);
        next.cells[idx] = u8::from(next_state(grid.cells[idx] != 0, neighbors));
    }

    next
}

/// Compute the next generation on `pool`, one row per task.
///
/// Rows read only the previous grid and write only their own slice of the
/// new one, so no locking is needed.
pub fn step_parallel(
    grid: &Grid,
    resolver: &NeighborResolver<'_>,
    pool: &rayon::ThreadPool,
) -> Grid {
    if grid.is_empty() {
        return grid.clone();
    }

    let mut next = Grid::new(grid.width, grid.height);
    let width = grid.width as usize;

    pool.install(|| {
        next.cells
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, out)| {
                for (col, cell) in out.iter_mut().enumerate() {
                    let at = Location::new(row as i32, col as i32);
                    let neighbors =
                        count_live_neighbors(grid, at, |loc, dir| resolver.resolve(loc, dir));
                    *cell = u8::from(next_state(grid.is_alive(at), neighbors));
                }
            });
    });

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::portal::{Orientation, PortalIndex, PortalKey};

    fn loc(row: i32, col: i32) -> Location {
        Location::new(row, col)
    }

    fn no_portals() -> (PortalIndex, PortalIndex) {
        (
            PortalIndex::empty(Orientation::Horizontal),
            PortalIndex::empty(Orientation::Vertical),
        )
    }

    #[test]
    fn test_next_state_rules() {
        assert!(!next_state(true, 1));
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        assert!(!next_state(true, 4));
        assert!(!next_state(false, 2));
        assert!(next_state(false, 3));
        assert!(!next_state(false, 4));
    }

    #[test]
    fn test_count_neighbors_plain() {
        let (h, v) = no_portals();
        let grid = Grid::with_alive(5, 5, &[loc(1, 2), loc(2, 1), loc(2, 3), loc(3, 2)]);
        let resolver = NeighborResolver::for_grid(&grid, &h, &v);
        let count = |at| count_live_neighbors(&grid, at, |l, d| resolver.resolve(l, d));

        // Center of the plus sees all four arms
        assert_eq!(count(loc(2, 2)), 4);
        // An arm sees its two diagonal neighbors
        assert_eq!(count(loc(1, 2)), 2);
        // Corner cell sees nothing; off-grid neighbors count as dead
        assert_eq!(count(loc(0, 0)), 0);
    }

    #[test]
    fn test_count_neighbors_counts_duplicates() {
        let grid = Grid::with_alive(3, 3, &[loc(0, 0)]);
        // Every direction resolves to the same live cell.
        let count = count_live_neighbors(&grid, loc(1, 1), |_, _| loc(0, 0));
        assert_eq!(count, 8);
    }

    #[test]
    fn test_each_direction_resolved_once_per_cell() {
        let key = PortalKey::new(0x00ff00);
        let h = PortalIndex::build(Orientation::Horizontal, [(loc(0, 0), key), (loc(4, 4), key)]);
        let v = PortalIndex::empty(Orientation::Vertical);
        let grid = Grid::with_alive(5, 5, &[loc(0, 1), loc(3, 4), loc(4, 3)]);
        let resolver = NeighborResolver::for_grid(&grid, &h, &v);

        let mut asked = std::collections::HashSet::new();
        let mut calls = 0;
        for at in grid.locations() {
            count_live_neighbors(&grid, at, |l, d| {
                calls += 1;
                asked.insert((l, d));
                resolver.resolve(l, d)
            });
        }
        // No pair repeats within a generation, so memoizing would never hit.
        assert_eq!(calls, 25 * 8);
        assert_eq!(asked.len(), calls);

        let by_hand = {
            let mut next = Grid::new(5, 5);
            for at in grid.locations() {
                let n = count_live_neighbors(&grid, at, |l, d| resolver.resolve(l, d));
                next.set(at, next_state(grid.is_alive(at), n));
            }
            next
        };
        assert_eq!(step(&grid, &resolver), by_hand);
    }

    #[test]
    fn test_step_single_cell_dies() {
        let (h, v) = no_portals();
        let grid = Grid::with_alive(3, 3, &[loc(1, 1)]);
        let resolver = NeighborResolver::for_grid(&grid, &h, &v);

        let next = step(&grid, &resolver);
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn test_step_block_is_stable() {
        let (h, v) = no_portals();
        let grid = Grid::with_alive(4, 4, &[loc(1, 1), loc(1, 2), loc(2, 1), loc(2, 2)]);
        let resolver = NeighborResolver::for_grid(&grid, &h, &v);

        let mut current = grid.clone();
        for _ in 0..5 {
            current = step(&current, &resolver);
            assert_eq!(current, grid);
        }
    }

    #[test]
    fn test_step_blinker_oscillates() {
        let (h, v) = no_portals();
        let horizontal = Grid::with_alive(5, 5, &[loc(2, 1), loc(2, 2), loc(2, 3)]);
        let vertical = Grid::with_alive(5, 5, &[loc(1, 2), loc(2, 2), loc(3, 2)]);
        let resolver = NeighborResolver::for_grid(&horizontal, &h, &v);

        let next = step(&horizontal, &resolver);
        assert_eq!(next, vertical);
        assert_eq!(step(&next, &resolver), horizontal);
    }

    #[test]
    fn test_step_empty_grid_stays_empty() {
        let (h, v) = no_portals();
        let grid = Grid::new(4, 4);
        let resolver = NeighborResolver::for_grid(&grid, &h, &v);

        let next = step(&grid, &resolver);
        assert!(next.cells.iter().all(|&c| c == 0));
        assert_eq!((next.width, next.height), (4, 4));

        let zero = Grid::new(0, 0);
        assert!(step(&zero, &resolver).is_empty());
    }

    #[test]
    fn test_step_birth_through_wormhole() {
        // Horizontal pair joins the left edge of row 1 to its right edge.
        let key = PortalKey::new(0x00ff00);
        let h = PortalIndex::build(Orientation::Horizontal, [(loc(1, 0), key), (loc(1, 4), key)]);
        let v = PortalIndex::empty(Orientation::Vertical);
        let grid = Grid::with_alive(5, 3, &[loc(0, 3), loc(1, 3), loc(2, 3)]);
        let resolver = NeighborResolver::for_grid(&grid, &h, &v);

        // (1,0) looks left through the tunnel onto column 3.
        let next = step(&grid, &resolver);
        assert!(next.is_alive(loc(1, 0)), "cell should be born via the wormhole");

        let (eh, ev) = no_portals();
        let plain = NeighborResolver::for_grid(&grid, &eh, &ev);
        assert!(!step(&grid, &plain).is_alive(loc(1, 0)));
    }

    #[test]
    fn test_step_parallel_matches_sequential() {
        let red = PortalKey::new(0xff0000);
        let blue = PortalKey::new(0x0000ff);
        let h = PortalIndex::build(Orientation::Horizontal, [(loc(1, 0), red), (loc(6, 7), red)]);
        let v = PortalIndex::build(Orientation::Vertical, [(loc(0, 3), blue), (loc(7, 4), blue)]);

        // Glider plus a few scattered cells near the portals.
        let grid = Grid::with_alive(
            8,
            8,
            &[
                loc(0, 1),
                loc(1, 2),
                loc(2, 0),
                loc(2, 1),
                loc(2, 2),
                loc(6, 6),
                loc(7, 3),
                loc(7, 5),
                loc(5, 7),
            ],
        );
        let resolver = NeighborResolver::for_grid(&grid, &h, &v);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(2)
            .build()
            .expect("thread pool");

        let mut sequential = grid.clone();
        let mut parallel = grid;
        for _ in 0..10 {
            sequential = step(&sequential, &resolver);
            parallel = step_parallel(&parallel, &resolver, &pool);
            assert_eq!(sequential, parallel);
        }
    }
}
