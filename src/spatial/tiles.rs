//! Tile storage and extraction from a source image
//!
//! Cuts each grid cell out of the source, trims its margins, and resamples
//! it to the common tile size so every tile can be compared pixel for pixel.

use crate::io::error::{PuzzleError, Result};
use crate::spatial::grid::CellGrid;
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// A single tile's pixels
pub type Tile = RgbaImage;

/// Immutable collection of equally sized tiles, addressed by index
#[derive(Clone, Debug)]
pub struct TileSet {
    tiles: Vec<Tile>,
    tile_width: u32,
    tile_height: u32,
}

impl TileSet {
    /// Wrap a list of tiles after checking they share one non-empty size
    ///
    /// # Errors
    ///
    /// Returns `InvalidTileSet` if:
    /// - No tiles are given
    /// - The first tile has zero width or height
    /// - Any tile's dimensions differ from the first tile's
    pub fn new(tiles: Vec<Tile>) -> Result<Self> {
        let (tile_width, tile_height) = tiles
            .first()
            .map(Tile::dimensions)
            .ok_or_else(|| PuzzleError::InvalidTileSet {
                reason: "no tiles supplied".to_string(),
            })?;

        if tile_width == 0 || tile_height == 0 {
            return Err(PuzzleError::InvalidTileSet {
                reason: format!("tiles have zero area ({tile_width}x{tile_height})"),
            });
        }

        if let Some((index, tile)) = tiles
            .iter()
            .enumerate()
            .find(|(_, tile)| tile.dimensions() != (tile_width, tile_height))
        {
            return Err(PuzzleError::InvalidTileSet {
                reason: format!(
                    "tile {index} is {}x{}, expected {tile_width}x{tile_height}",
                    tile.width(),
                    tile.height()
                ),
            });
        }

        Ok(Self {
            tiles,
            tile_width,
            tile_height,
        })
    }

    /// Cut every cell of the grid out of the source image, in row-major order
    ///
    /// Cells whose trimmed size differs from the common tile size are
    /// resampled with a triangle filter.
    ///
    /// # Errors
    ///
    /// Returns an error if a cell falls outside the image
    pub fn extract(source: &RgbaImage, cells: &CellGrid) -> Result<Self> {
        let (tile_width, tile_height) = (cells.tile_width(), cells.tile_height());
        let (image_width, image_height) = source.dimensions();
        let tile_count = cells.layout().tile_count();

        let mut tiles = Vec::with_capacity(tile_count);
        for position in 0..tile_count {
            let rect = cells.cell(position).ok_or_else(|| PuzzleError::InvalidTileSet {
                reason: format!("cell {position} is outside the grid"),
            })?;

            if rect.x >= image_width || rect.y >= image_height {
                return Err(PuzzleError::InvalidTileSet {
                    reason: format!(
                        "cell {position} starts at ({}, {}), outside the {image_width}x{image_height} image",
                        rect.x, rect.y
                    ),
                });
            }
            let width = rect.width.min(image_width - rect.x);
            let height = rect.height.min(image_height - rect.y);

            let cropped = imageops::crop_imm(source, rect.x, rect.y, width, height).to_image();
            let tile = if cropped.dimensions() == (tile_width, tile_height) {
                cropped
            } else {
                imageops::resize(&cropped, tile_width, tile_height, FilterType::Triangle)
            };
            tiles.push(tile);
        }

        Self::new(tiles)
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Test if the set holds no tiles
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile at an index
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Iterate tiles in index order
    pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    /// Width shared by every tile
    pub const fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Height shared by every tile
    pub const fn tile_height(&self) -> u32 {
        self.tile_height
    }
}
