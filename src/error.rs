//! Error types for the simulation core
//!
//! Every error is local to the operation that produced it. A rejected stamp
//! event never touches the grid, and a rejected resize leaves the previous
//! buffers in place.

use thiserror::Error;

/// Errors raised by the simulation core
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    /// Requested grid width or height is not strictly positive
    #[error("invalid grid dimensions {width}x{height}: both must be greater than zero")]
    InvalidDimensions { width: i64, height: i64 },

    /// Stamp request names a blueprint the catalog does not contain
    #[error("unknown blueprint id {id} (catalog holds {count} patterns)")]
    UnknownPatternId { id: usize, count: usize },

    /// Stamp request carries a rotation other than 0, 90, 180 or 270 degrees
    #[error("invalid orientation {0}: expected one of 0, 90, 180, 270")]
    InvalidOrientation(i32),

    /// Tick interval bounds are non-positive or inverted
    #[error("invalid tick bounds: slow {slow}s must be >= fast {fast}s and both > 0")]
    InvalidTickBounds { slow: f32, fast: f32 },

    /// Speed ratio is not a finite value
    #[error("invalid speed ratio {0}")]
    InvalidSpeed(f32),

    /// The worker pool for the parallel transition could not be created
    #[error("failed to build transition thread pool: {0}")]
    ThreadPool(String),
}

impl From<rayon::ThreadPoolBuildError> for SimulationError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(err.to_string())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SimulationError>;
