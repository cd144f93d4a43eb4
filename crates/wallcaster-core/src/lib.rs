//! Core types for the Wallcaster engine.
//!
//! This crate provides the level data fed to the renderer:
//! - [`Wall`] line segments
//! - [`LevelStore`], the growable wall sequence reset per level load
//! - Common error types

pub mod error;
pub mod level;

pub use error::{Error, Result};
pub use level::{LevelStore, Wall};

/// Engine-wide constants
pub mod constants {
    /// Number of walls the level store grows by when it runs out of room.
    pub const WALL_CHUNK_SIZE: usize = 21;
}
