//! Error types for loading, saving, and configuring a simulation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the library.
///
/// Malformed portal maps are not errors: they are recorded as
/// [`PortalDiagnostic`](crate::automaton::PortalDiagnostic)s and the run proceeds.
#[derive(Debug, Error)]
pub enum WormholeError {
    #[error("failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("grid image {path} has no cells")]
    EmptyGrid { path: PathBuf },
    #[error("image {path} is too large ({width}x{height})")]
    ImageTooLarge {
        path: PathBuf,
        width: u32,
        height: u32,
    },
    #[error("region buffer holds {actual} cells, {expected} required")]
    RegionBuffer { expected: usize, actual: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, WormholeError>;
