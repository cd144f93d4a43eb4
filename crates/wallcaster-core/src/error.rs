//! Error types for the engine.

use std::collections::TryReserveError;

use thiserror::Error;

/// Engine-wide error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Growing a backing buffer failed.
    #[error("Allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// Out of bounds access
    #[error("Index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
