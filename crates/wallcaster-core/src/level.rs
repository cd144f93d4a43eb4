//! Level geometry storage.
//!
//! A level is an ordered list of [`Wall`] segments. The renderer consumes
//! them in insertion order, so the store never reorders or removes walls;
//! it is only cleared wholesale by [`LevelStore::reset`] when a new level
//! is loaded.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::constants::WALL_CHUNK_SIZE;
use crate::error::{Error, Result};

/// A line-segment obstacle between two endpoints.
///
/// Zero-length walls are allowed.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Wall {
    /// First endpoint.
    pub start: Vec2,
    /// Second endpoint.
    pub end: Vec2,
}

impl Wall {
    /// Create a wall from raw endpoint coordinates.
    #[must_use]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            start: Vec2::new(x1, y1),
            end: Vec2::new(x2, y2),
        }
    }

    /// Endpoint coordinates as `(x1, y1, x2, y2)`.
    #[must_use]
    pub const fn coords(&self) -> (f32, f32, f32, f32) {
        (self.start.x, self.start.y, self.end.x, self.end.y)
    }

    /// Length of the segment.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Growable, append-only sequence of walls.
///
/// Capacity grows in fixed-size chunks. Allocation failures are returned as
/// [`Error::Allocation`] instead of aborting the process.
#[derive(Debug)]
pub struct LevelStore {
    walls: Vec<Wall>,
    chunk_size: usize,
}

impl Default for LevelStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LevelStore {
    /// Create an empty store with the default chunk size.
    ///
    /// No memory is reserved until the first [`reset`](Self::reset) or
    /// [`add_wall`](Self::add_wall).
    #[must_use]
    pub const fn new() -> Self {
        Self::with_chunk_size(WALL_CHUNK_SIZE)
    }

    /// Create an empty store that grows by `chunk_size` walls at a time.
    #[must_use]
    pub const fn with_chunk_size(chunk_size: usize) -> Self {
        Self {
            walls: Vec::new(),
            chunk_size: if chunk_size == 0 { 1 } else { chunk_size },
        }
    }

    /// Start a new level.
    ///
    /// Sets the wall count to zero. The first call reserves one chunk;
    /// later calls keep whatever capacity is already reserved.
    pub fn reset(&mut self) -> Result<()> {
        if self.walls.capacity() == 0 {
            self.walls.try_reserve_exact(self.chunk_size)?;
        }
        self.walls.clear();
        tracing::trace!(capacity = self.walls.capacity(), "Level store reset");
        Ok(())
    }

    /// Append a wall. No geometric validation is done.
    pub fn add_wall(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Result<()> {
        self.push(Wall::new(x1, y1, x2, y2))
    }

    /// Append an already constructed wall.
    pub fn push(&mut self, wall: Wall) -> Result<()> {
        let len = self.walls.len();
        let capacity = self.walls.capacity();
        if len >= capacity {
            // An overflowing target asks for usize::MAX more, which the
            // allocator rejects as a capacity overflow.
            let additional = len
                .checked_add(1)
                .map(|needed| capacity.max(needed))
                .and_then(|base| base.checked_add(self.chunk_size))
                .map_or(usize::MAX, |target| target - len);
            self.walls.try_reserve_exact(additional)?;
            tracing::trace!(
                from = capacity,
                to = self.walls.capacity(),
                "Level store grown"
            );
        }
        self.walls.push(wall);
        Ok(())
    }

    /// Number of walls added since the last reset.
    #[must_use]
    pub fn count(&self) -> usize {
        self.walls.len()
    }

    /// Returns `true` if no walls have been added since the last reset.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    /// Number of walls the store can hold without growing.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.walls.capacity()
    }

    /// The wall added by the `index`-th call since the last reset.
    pub fn wall_at(&self, index: usize) -> Result<Wall> {
        self.walls
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                index,
                len: self.walls.len(),
            })
    }

    /// Read-only view of all walls in insertion order.
    #[must_use]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Iterate over walls in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Wall> {
        self.walls.iter()
    }

    /// Raw bytes of the wall sequence, for GPU upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.walls)
    }

    /// Release the backing allocation.
    ///
    /// The store stays usable; the next reset reserves a fresh chunk.
    pub fn dispose(&mut self) {
        self.walls = Vec::new();
    }
}

impl<'a> IntoIterator for &'a LevelStore {
    type Item = &'a Wall;
    type IntoIter = std::slice::Iter<'a, Wall>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn two_walls_in_order() {
        let mut level = LevelStore::new();
        level.reset().unwrap();
        level.add_wall(-4.0, 4.0, 4.0, 4.0).unwrap();
        level.add_wall(-4.0, -4.0, 4.0, -4.0).unwrap();

        assert_eq!(level.count(), 2);
        assert_eq!(level.wall_at(0).unwrap(), Wall::new(-4.0, 4.0, 4.0, 4.0));
        assert_eq!(level.wall_at(1).unwrap().coords(), (-4.0, -4.0, 4.0, -4.0));
    }

    #[test]
    fn count_matches_calls_across_growth() {
        let mut level = LevelStore::with_chunk_size(4);
        level.reset().unwrap();

        for i in 0..50 {
            let f = i as f32;
            level.add_wall(f, -f, f * 2.0, 0.5).unwrap();
        }

        assert_eq!(level.count(), 50);
        for (i, wall) in level.iter().enumerate() {
            let f = i as f32;
            assert_eq!(*wall, Wall::new(f, -f, f * 2.0, 0.5));
        }
    }

    #[test]
    fn first_reset_reserves_one_chunk() {
        let mut level = LevelStore::with_chunk_size(21);
        assert_eq!(level.capacity(), 0);

        level.reset().unwrap();
        assert!(level.capacity() >= 21);
        assert!(level.is_empty());
    }

    #[test]
    fn reset_keeps_capacity() {
        let mut level = LevelStore::with_chunk_size(8);
        level.reset().unwrap();
        for _ in 0..30 {
            level.add_wall(0.0, 0.0, 1.0, 1.0).unwrap();
        }
        let capacity = level.capacity();

        level.reset().unwrap();
        assert_eq!(level.count(), 0);
        assert_eq!(level.capacity(), capacity);

        for _ in 0..30 {
            level.add_wall(1.0, 1.0, 2.0, 2.0).unwrap();
        }
        assert_eq!(level.capacity(), capacity);
    }

    #[test]
    fn growth_adds_a_chunk() {
        let mut level = LevelStore::with_chunk_size(3);
        level.add_wall(0.0, 0.0, 0.0, 0.0).unwrap();
        // max(0, 0 + 1) + 3
        assert!(level.capacity() >= 4);
    }

    #[test]
    fn add_without_reset_works() {
        let mut level = LevelStore::new();
        level.add_wall(1.0, 2.0, 3.0, 4.0).unwrap();
        assert_eq!(level.count(), 1);
    }

    #[test]
    fn wall_at_out_of_bounds() {
        let mut level = LevelStore::new();
        level.reset().unwrap();
        level.add_wall(0.0, 0.0, 1.0, 0.0).unwrap();

        match level.wall_at(1) {
            Err(Error::IndexOutOfBounds { index, len }) => {
                assert_eq!(index, 1);
                assert_eq!(len, 1);
            }
            other => panic!("expected IndexOutOfBounds, got {other:?}"),
        }
    }

    #[test]
    fn degenerate_wall_accepted() {
        let mut level = LevelStore::new();
        level.add_wall(2.0, 2.0, 2.0, 2.0).unwrap();
        assert_relative_eq!(level.wall_at(0).unwrap().length(), 0.0);
    }

    #[test]
    fn wall_length() {
        let wall = Wall::new(0.0, 0.0, 3.0, 4.0);
        assert_relative_eq!(wall.length(), 5.0);
    }

    #[test]
    fn dispose_releases_buffer() {
        let mut level = LevelStore::new();
        level.reset().unwrap();
        level.add_wall(0.0, 0.0, 1.0, 1.0).unwrap();

        level.dispose();
        assert_eq!(level.count(), 0);
        assert_eq!(level.capacity(), 0);

        level.reset().unwrap();
        assert!(level.capacity() > 0);
    }

    #[test]
    fn oversized_first_chunk_is_allocation_error() {
        let mut level = LevelStore::with_chunk_size(usize::MAX);

        assert!(matches!(level.reset(), Err(Error::Allocation(_))));
        assert_eq!(level.capacity(), 0);
    }

    #[test]
    fn growth_overflow_is_allocation_error() {
        let mut level = LevelStore::with_chunk_size(usize::MAX);

        assert!(matches!(
            level.add_wall(0.0, 0.0, 1.0, 1.0),
            Err(Error::Allocation(_))
        ));
        assert!(level.is_empty());
    }

    #[test]
    fn chunk_just_below_overflow_is_allocation_error() {
        // max(0, 1) + (usize::MAX - 1) does not overflow but cannot be
        // allocated either.
        let mut level = LevelStore::with_chunk_size(usize::MAX - 1);

        assert!(matches!(
            level.add_wall(1.0, 1.0, 2.0, 2.0),
            Err(Error::Allocation(_))
        ));
        assert_eq!(level.count(), 0);
    }

    #[test]
    fn bytes_cover_all_walls() {
        let mut level = LevelStore::new();
        level.add_wall(1.0, 2.0, 3.0, 4.0).unwrap();
        level.add_wall(5.0, 6.0, 7.0, 8.0).unwrap();

        let floats: &[f32] = bytemuck::cast_slice(level.as_bytes());
        assert_eq!(floats, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }
}
