//! Wormhole-aware neighbor resolution.
//!
//! For a cell and one of its eight directions, the resolver answers which
//! location stands in as that neighbor. Rules are tested in a fixed order:
//!
//! 1. Departure checks on the querying cell, top > right > bottom > left:
//!    - vertical endpoint, looking up: one row above the partner
//!    - horizontal endpoint, looking right: one column right of the partner
//!    - vertical endpoint, looking down: one row below the partner
//!    - horizontal endpoint, looking left: one column left of the partner
//! 2. If no departure check fired, symmetric checks on the plain neighbor,
//!    so a cell next to a portal sees through it from the outside:
//!    - vertical endpoint approached from above
//!    - horizontal endpoint approached from its left
//!    - vertical endpoint approached from below
//!    - horizontal endpoint approached from its right
//! 3. Otherwise the plain arithmetic neighbor.
//!
//! The first rule that matches wins. Results may lie off the grid; callers
//! must bounds-check before reading cell state.

use super::grid::{Grid, Location};
use super::portal::PortalIndex;

/// One of the eight Moore-neighborhood offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Direction {
    dr: i8,
    dc: i8,
}

impl Direction {
    pub const UP_LEFT: Direction = Direction { dr: -1, dc: -1 };
    pub const UP: Direction = Direction { dr: -1, dc: 0 };
    pub const UP_RIGHT: Direction = Direction { dr: -1, dc: 1 };
    pub const LEFT: Direction = Direction { dr: 0, dc: -1 };
    pub const RIGHT: Direction = Direction { dr: 0, dc: 1 };
    pub const DOWN_LEFT: Direction = Direction { dr: 1, dc: -1 };
    pub const DOWN: Direction = Direction { dr: 1, dc: 0 };
    pub const DOWN_RIGHT: Direction = Direction { dr: 1, dc: 1 };

    /// All eight directions, row-major around the center.
    pub const ALL: [Direction; 8] = [
        Direction::UP_LEFT,
        Direction::UP,
        Direction::UP_RIGHT,
        Direction::LEFT,
        Direction::RIGHT,
        Direction::DOWN_LEFT,
        Direction::DOWN,
        Direction::DOWN_RIGHT,
    ];

    /// Returns `None` for `(0, 0)` or any component outside `-1..=1`.
    pub fn new(dr: i32, dc: i32) -> Option<Direction> {
        if (dr, dc) == (0, 0) || !(-1..=1).contains(&dr) || !(-1..=1).contains(&dc) {
            return None;
        }
        Some(Direction {
            dr: dr as i8,
            dc: dc as i8,
        })
    }

    #[inline]
    pub fn dr(self) -> i32 {
        self.dr as i32
    }

    #[inline]
    pub fn dc(self) -> i32 {
        self.dc as i32
    }
}

/// Resolves neighbors against the two tunnel indices of a board.
#[derive(Clone, Copy, Debug)]
pub struct NeighborResolver<'a> {
    width: i32,
    height: i32,
    horizontal: &'a PortalIndex,
    vertical: &'a PortalIndex,
}

impl<'a> NeighborResolver<'a> {
    pub fn new(
        width: i32,
        height: i32,
        horizontal: &'a PortalIndex,
        vertical: &'a PortalIndex,
    ) -> Self {
        NeighborResolver {
            width,
            height,
            horizontal,
            vertical,
        }
    }

    /// A resolver for a board of the same dimensions as `grid`.
    pub fn for_grid(grid: &Grid, horizontal: &'a PortalIndex, vertical: &'a PortalIndex) -> Self {
        NeighborResolver::new(grid.width, grid.height, horizontal, vertical)
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, loc: Location) -> bool {
        loc.row >= 0 && loc.row < self.height && loc.col >= 0 && loc.col < self.width
    }

    /// The location treated as the neighbor of `at` in direction `dir`.
    pub fn resolve(&self, at: Location, dir: Direction) -> Location {
        self.departure(at, dir)
            .or_else(|| self.arrival(at, dir))
            .unwrap_or_else(|| at.offset(dir.dr(), dir.dc()))
    }

    /// Rules where `at` itself is the portal endpoint.
    fn departure(&self, at: Location, dir: Direction) -> Option<Location> {
        let (dr, dc) = (dir.dr(), dir.dc());

        // top
        if dr == -1 {
            if let Some(other) = self.vertical.partner(at) {
                return Some(other.offset(-1, dc));
            }
        }
        // right
        if dc == 1 {
            if let Some(other) = self.horizontal.partner(at) {
                return Some(other.offset(dr, 1));
            }
        }
        // bottom
        if dr == 1 {
            if let Some(other) = self.vertical.partner(at) {
                return Some(other.offset(1, dc));
            }
        }
        // left
        if dc == -1 {
            if let Some(other) = self.horizontal.partner(at) {
                return Some(other.offset(dr, -1));
            }
        }

        None
    }

    /// Rules where the plain neighbor of `at` is the portal endpoint.
    fn arrival(&self, at: Location, dir: Direction) -> Option<Location> {
        let (dr, dc) = (dir.dr(), dir.dc());
        let near = at.offset(dr, dc);
        if !self.in_bounds(near) {
            return None;
        }
        let back_row = at.row - near.row;
        let back_col = at.col - near.col;

        if dr == 1 {
            if let Some(other) = self.vertical.partner(near) {
                return Some(Location::new(other.row - 1, other.col + back_col));
            }
        }
        if dc == -1 {
            if let Some(other) = self.horizontal.partner(near) {
                return Some(Location::new(other.row + back_row, other.col - 1));
            }
        }
        if dr == -1 {
            if let Some(other) = self.vertical.partner(near) {
                return Some(Location::new(other.row + 1, other.col + back_col));
            }
        }
        if dc == 1 {
            if let Some(other) = self.horizontal.partner(near) {
                return Some(Location::new(other.row + back_row, other.col + 1));
            }
        }

        None
    }
}
