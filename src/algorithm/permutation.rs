//! Validated assignments of tiles to grid positions

use crate::io::error::{Result, invalid_mapping};
use rand::Rng;
use rand::seq::SliceRandom;

/// Bijection from grid position (row-major) to tile index
///
/// Every tile index in `0..len` appears exactly once; the constructor
/// rejects anything else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    tiles: Vec<usize>,
}

impl Permutation {
    /// Validate a flattened assignment against the expected tile count
    ///
    /// # Errors
    ///
    /// Returns `InvalidMapping` if:
    /// - The number of values differs from `tile_count`
    /// - Sorting the values does not give exactly `0, 1, ..., tile_count - 1`
    pub fn new(tiles: Vec<usize>, tile_count: usize) -> Result<Self> {
        if tiles.len() != tile_count {
            return Err(invalid_mapping(&format!(
                "expected {tile_count} values, found {}",
                tiles.len()
            )));
        }

        let mut sorted = tiles.clone();
        sorted.sort_unstable();
        if let Some((expected, &found)) = sorted
            .iter()
            .enumerate()
            .find(|&(expected, &found)| expected != found)
        {
            return Err(invalid_mapping(&format!(
                "not a permutation of 0..{tile_count} (tile {expected} missing, saw {found} instead)"
            )));
        }

        Ok(Self { tiles })
    }

    /// The assignment that leaves every tile where it is
    pub fn identity(tile_count: usize) -> Self {
        Self {
            tiles: (0..tile_count).collect(),
        }
    }

    /// Draw a uniformly random permutation
    pub fn random<R: Rng + ?Sized>(tile_count: usize, rng: &mut R) -> Self {
        let mut tiles: Vec<usize> = (0..tile_count).collect();
        tiles.shuffle(rng);
        Self { tiles }
    }

    /// Tile placed at a grid position
    pub fn tile_at(&self, position: usize) -> Option<usize> {
        self.tiles.get(position).copied()
    }

    /// Number of grid positions
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Test if the permutation covers no positions
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile indices in grid position order
    pub fn as_slice(&self) -> &[usize] {
        &self.tiles
    }

    /// Consume into the raw tile sequence
    pub fn into_vec(self) -> Vec<usize> {
        self.tiles
    }

    /// Assignment that undoes this one
    ///
    /// If this permutation places tile `t` at position `p`, the inverse
    /// places tile `p` at position `t`.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let mut inverse = vec![0; self.tiles.len()];
        for (position, &tile) in self.tiles.iter().enumerate() {
            if let Some(slot) = inverse.get_mut(tile) {
                *slot = position;
            }
        }
        Self { tiles: inverse }
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(permutation: Permutation) -> Self {
        permutation.into_vec()
    }
}
