//! Wormhole endpoint index for one tunnel orientation.
//!
//! A tunnel map is scanned row-major into `(Location, PortalKey)` entries.
//! Entries sharing a key form a wormhole when there are exactly two of them:
//! - a single entry cannot form a pair and its key is discarded
//! - more than two entries keep the first two in scan order and drop the rest
//!
//! Both cases are reported as [`PortalDiagnostic`]s and logged as warnings;
//! neither stops the simulation.

use std::collections::{HashMap, HashSet};
use std::fmt;

use tracing::warn;

use super::grid::Location;

/// Opaque identity of one wormhole pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortalKey(u32);

impl PortalKey {
    pub const fn new(raw: u32) -> Self {
        PortalKey(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PortalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.0)
    }
}

/// Which tunnel map a portal came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Connects a cell's left/right side to its partner.
    Horizontal,
    /// Connects a cell's top/bottom side to its partner.
    Vertical,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => f.write_str("horizontal"),
            Orientation::Vertical => f.write_str("vertical"),
        }
    }
}

/// One endpoint of a wormhole.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Portal {
    pub location: Location,
    pub key: PortalKey,
    pub orientation: Orientation,
}

/// A non-fatal problem found while pairing portals.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PortalDiagnostic {
    /// The key appeared fewer than two times and forms no portal.
    Unpaired {
        key: PortalKey,
        locations: Vec<Location>,
    },
    /// The key appeared `count` times; only `kept` form the pair.
    Excess {
        key: PortalKey,
        count: usize,
        kept: [Location; 2],
    },
    /// A location was listed more than once; later entries are ignored.
    DuplicateLocation { location: Location, key: PortalKey },
}

/// Validated mapping between portal locations and wormhole pairs.
///
/// Every key in `by_key` has exactly two locations, and both map back to that
/// key in `by_location`. Built once and never mutated.
#[derive(Clone, Debug)]
pub struct PortalIndex {
    orientation: Orientation,
    by_location: HashMap<Location, PortalKey>,
    by_key: HashMap<PortalKey, [Location; 2]>,
    order: Vec<PortalKey>,
    diagnostics: Vec<PortalDiagnostic>,
}

impl PortalIndex {
    /// An index with no portals.
    pub fn empty(orientation: Orientation) -> Self {
        PortalIndex {
            orientation,
            by_location: HashMap::new(),
            by_key: HashMap::new(),
            order: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Pair up scanned entries. `scan` must be in row-major order so that
    /// "first two occurrences" means first in scan order.
    pub fn build<I>(orientation: Orientation, scan: I) -> Self
    where
        I: IntoIterator<Item = (Location, PortalKey)>,
    {
        let mut index = PortalIndex::empty(orientation);

        // Group by key, preserving first-seen key order.
        let mut groups: Vec<(PortalKey, Vec<Location>)> = Vec::new();
        let mut group_of: HashMap<PortalKey, usize> = HashMap::new();
        let mut seen: HashSet<Location> = HashSet::new();

        for (location, key) in scan {
            if !seen.insert(location) {
                warn!(%orientation, %location, %key, "duplicate portal location ignored");
                index
                    .diagnostics
                    .push(PortalDiagnostic::DuplicateLocation { location, key });
                continue;
            }
            let slot = *group_of.entry(key).or_insert_with(|| {
                groups.push((key, Vec::new()));
                groups.len() - 1
            });
            groups[slot].1.push(location);
        }

        for (key, locations) in groups {
            let count = locations.len();
            if count < 2 {
                warn!(
                    %orientation,
                    %key,
                    count,
                    ?locations,
                    "portal key cannot form a pair, ignoring it"
                );
                index
                    .diagnostics
                    .push(PortalDiagnostic::Unpaired { key, locations });
                continue;
            }

            let kept = [locations[0], locations[1]];
            if count > 2 {
                warn!(
                    %orientation,
                    %key,
                    count,
                    first = %kept[0],
                    second = %kept[1],
                    "portal key found more than twice, using only the first two locations"
                );
                index
                    .diagnostics
                    .push(PortalDiagnostic::Excess { key, count, kept });
            }

            index.by_location.insert(kept[0], key);
            index.by_location.insert(kept[1], key);
            index.by_key.insert(key, kept);
            index.order.push(key);
        }

        index
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of valid wormhole pairs.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The wormhole key at `location`, if it is an endpoint.
    #[inline]
    pub fn key_at(&self, location: Location) -> Option<PortalKey> {
        self.by_location.get(&location).copied()
    }

    #[inline]
    pub fn contains(&self, location: Location) -> bool {
        self.by_location.contains_key(&location)
    }

    /// Both endpoints of a wormhole, in scan order.
    pub fn pair(&self, key: PortalKey) -> Option<[Location; 2]> {
        self.by_key.get(&key).copied()
    }

    /// The other endpoint of the wormhole at `location`, or `None` if
    /// `location` is not an endpoint.
    ///
    /// # Panics
    /// If the index is internally inconsistent (an endpoint whose pair does not
    /// contain it). Construction rules this out.
    pub fn partner(&self, location: Location) -> Option<Location> {
        let key = self.key_at(location)?;
        let [first, second] = match self.by_key.get(&key) {
            Some(pair) => *pair,
            None => panic!("portal {key} at {location} has no registered pair"),
        };
        if first == location {
            Some(second)
        } else if second == location {
            Some(first)
        } else {
            panic!("location {location} not found in pair for portal {key}");
        }
    }

    /// All endpoints, pair by pair in first-seen order.
    pub fn portals(&self) -> impl Iterator<Item = Portal> + '_ {
        self.order.iter().flat_map(move |key| {
            let pair = self.by_key[key];
            pair.into_iter().map(move |location| Portal {
                location,
                key: *key,
                orientation: self.orientation,
            })
        })
    }

    /// Problems recorded during construction, in the order encountered.
    pub fn diagnostics(&self) -> &[PortalDiagnostic] {
        &self.diagnostics
    }
}
