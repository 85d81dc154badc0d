//! Tunnel images: every non-black color marks one wormhole pair.

use std::path::Path;

use image::RgbImage;
use tracing::{info, warn};

use super::board::{grid_dimensions, open_rgb};
use crate::automaton::{Grid, Location, Orientation, PortalIndex, PortalKey};
use crate::config::BACKGROUND_RGB;
use crate::error::Result;

/// Pack a pixel color into a portal key.
pub fn portal_key(rgb: [u8; 3]) -> PortalKey {
    PortalKey::new(u32::from_be_bytes([0, rgb[0], rgb[1], rgb[2]]))
}

/// Row-major list of every non-background pixel that lies on `board`.
/// Pixels past the board's edges cannot be portals and are dropped.
pub fn scan_tunnels(image: &RgbImage, board: &Grid) -> Vec<(Location, PortalKey)> {
    let mut scan = Vec::new();
    let mut off_board = 0usize;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0 == BACKGROUND_RGB {
            continue;
        }
        let location = Location::new(y as i32, x as i32);
        if !board.in_bounds(location) {
            off_board += 1;
            continue;
        }
        scan.push((location, portal_key(pixel.0)));
    }

    if off_board > 0 {
        warn!(
            pixels = off_board,
            width = board.width,
            height = board.height,
            "tunnel pixels outside the board were ignored"
        );
    }

    scan
}

/// Load a tunnel map for `board`.
pub fn load_tunnels(path: &Path, orientation: Orientation, board: &Grid) -> Result<PortalIndex> {
    info!(path = %path.display(), %orientation, "loading tunnels");

    let image = open_rgb(path)?;
    grid_dimensions(path, image.width(), image.height())?;

    let index = PortalIndex::build(orientation, scan_tunnels(&image, board));
    info!(
        path = %path.display(),
        %orientation,
        pairs = index.len(),
        ignored = index.diagnostics().len(),
        "found valid wormhole pairs"
    );
    Ok(index)
}
