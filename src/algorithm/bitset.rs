use bitvec::prelude::*;
use std::fmt;

/// Set of tile indices already placed in a partial layout
///
/// Uses 0-based indexing matching tile positions in a `TileSet`.
/// Sized at construction with no upper bound on the tile count,
/// and provides O(1) membership testing and insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsedTiles {
    bits: BitVec,
}

impl UsedTiles {
    /// Create a set with no tiles used
    pub fn new(tile_count: usize) -> Self {
        Self {
            bits: bitvec![0; tile_count],
        }
    }

    /// Mark a tile as used
    ///
    /// Indices outside the set's capacity are ignored
    pub fn insert(&mut self, tile: usize) {
        if tile < self.bits.len() {
            self.bits.set(tile, true);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Number of tiles the set can track
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Test if every tile has been used
    pub fn is_full(&self) -> bool {
        self.bits.all()
    }

    /// Iterate unused tile indices in ascending order
    pub fn unused(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_zeros()
    }

    /// Extract used tile indices in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for UsedTiles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UsedTiles({}/{} tiles: {:?})",
            self.count(),
            self.capacity(),
            self.to_vec()
        )
    }
}
