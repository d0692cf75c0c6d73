//! Seeded shuffling of intact images into puzzles
//!
//! Produces a shuffled image together with the mapping that restores it,
//! which gives the solver a puzzle with a known answer.

use crate::algorithm::permutation::Permutation;
use crate::io::error::Result;
use crate::io::image::compose;
use crate::spatial::grid::GridLayout;
use crate::spatial::tiles::TileSet;
use image::RgbaImage;
use rand::{SeedableRng, rngs::StdRng};

/// A shuffled puzzle and its answer
pub struct Scrambled {
    /// Tiles composited in shuffled order
    pub image: RgbaImage,
    /// Original tile shown at each shuffled position
    pub shuffle: Permutation,
    /// Mapping that rebuilds the original from the shuffled image's tiles
    pub restoring: Permutation,
}

/// Shuffle the tiles of an intact image
///
/// The same seed always produces the same shuffle.
///
/// # Errors
///
/// Returns an error if the tile set does not match the grid
pub fn scramble(tiles: &TileSet, layout: GridLayout, seed: u64) -> Result<Scrambled> {
    let mut rng = StdRng::seed_from_u64(seed);
    let shuffle = Permutation::random(layout.tile_count(), &mut rng);
    let image = compose(tiles, &shuffle, layout)?;
    let restoring = shuffle.inverse();

    log::debug!("Shuffled {} tiles with seed {seed}", layout.tile_count());

    Ok(Scrambled {
        image,
        shuffle,
        restoring,
    })
}
