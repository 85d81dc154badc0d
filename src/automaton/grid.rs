//! Grid storage, locations, and cell access helpers.

use std::fmt;

/// A (row, column) pair. Either component may be negative or past the edge:
/// such locations are off-grid and always read as dead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Location { row, col }
    }

    /// Shift by a row and column offset.
    #[inline]
    pub const fn offset(self, dr: i32, dc: i32) -> Self {
        Location {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A height x width board of binary cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub width: i32,
    pub height: i32,
    pub cells: Vec<u8>, // 0 = dead, 1 = alive
}

impl Grid {
    /// Create an all-dead grid.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Grid {
            width,
            height,
            cells: vec![0; width as usize * height as usize],
        }
    }

    /// Create a grid with the listed cells alive. Off-grid entries are ignored.
    pub fn with_alive(width: i32, height: i32, alive: &[Location]) -> Self {
        let mut grid = Grid::new(width, height);
        for &loc in alive {
            grid.set(loc, true);
        }
        grid
    }

    /// Linear index of an in-bounds location.
    #[inline]
    pub fn index_of(&self, loc: Location) -> usize {
        loc.row as usize * self.width as usize + loc.col as usize
    }

    /// Check if a location lies on the grid.
    #[inline]
    pub fn in_bounds(&self, loc: Location) -> bool {
        loc.row >= 0 && loc.row < self.height && loc.col >= 0 && loc.col < self.width
    }

    /// Read a cell. Off-grid locations are dead.
    #[inline]
    pub fn is_alive(&self, loc: Location) -> bool {
        self.in_bounds(loc) && self.cells[self.index_of(loc)] != 0
    }

    /// Write a cell. Off-grid locations are silently ignored.
    pub fn set(&mut self, loc: Location, alive: bool) {
        if self.in_bounds(loc) {
            let idx = self.index_of(loc);
            self.cells[idx] = u8::from(alive);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// All locations in row-major order.
    pub fn locations(&self) -> impl Iterator<Item = Location> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |row| (0..width).map(move |col| Location::new(row, col)))
    }
}
