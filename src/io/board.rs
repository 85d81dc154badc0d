//! Board images: white pixels are live cells, everything else is dead.

use std::path::Path;

use image::{ImageFormat, Rgb, RgbImage};
use tracing::info;

use crate::automaton::{import_region, Grid, Location};
use crate::config::{ALIVE_RGB, BACKGROUND_RGB};
use crate::error::{Result, WormholeError};

/// Pixel dimensions as grid dimensions.
pub(crate) fn grid_dimensions(path: &Path, width: u32, height: u32) -> Result<(i32, i32)> {
    match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(WormholeError::ImageTooLarge {
            path: path.to_path_buf(),
            width,
            height,
        }),
    }
}

pub(crate) fn open_rgb(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).map_err(|source| WormholeError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    // Alpha, if any, is dropped.
    Ok(image.to_rgb8())
}

/// Build a grid from an RGB image. `path` is only used in errors.
pub fn decode_board(image: &RgbImage, path: &Path) -> Result<Grid> {
    let (width, height) = grid_dimensions(path, image.width(), image.height())?;
    if width == 0 || height == 0 {
        return Err(WormholeError::EmptyGrid {
            path: path.to_path_buf(),
        });
    }

    let mask: Vec<u8> = image
        .pixels()
        .map(|pixel| u8::from(pixel.0 == ALIVE_RGB))
        .collect();

    let mut grid = Grid::new(width, height);
    import_region(&mut grid, &mask, Location::new(0, 0), Location::new(height, width))?;
    Ok(grid)
}

/// Render a grid as white-on-black pixels.
pub fn encode_board(grid: &Grid) -> RgbImage {
    RgbImage::from_fn(grid.width as u32, grid.height as u32, |x, y| {
        if grid.is_alive(Location::new(y as i32, x as i32)) {
            Rgb(ALIVE_RGB)
        } else {
            Rgb(BACKGROUND_RGB)
        }
    })
}

/// Load the starting position.
pub fn load_board(path: &Path) -> Result<Grid> {
    let image = open_rgb(path)?;
    let grid = decode_board(&image, path)?;
    info!(
        path = %path.display(),
        width = grid.width,
        height = grid.height,
        population = grid.population(),
        "loaded board"
    );
    Ok(grid)
}

/// Write a grid as a PNG.
pub fn save_board(grid: &Grid, path: &Path) -> Result<()> {
    encode_board(grid)
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| WormholeError::ImageWrite {
            path: path.to_path_buf(),
            source,
        })
}
