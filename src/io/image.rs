//! Image loading, tile compositing and export

use crate::algorithm::permutation::Permutation;
use crate::io::error::{PuzzleError, Result, invalid_mapping};
use crate::spatial::grid::GridLayout;
use crate::spatial::tiles::TileSet;
use image::{DynamicImage, RgbaImage, imageops};
use std::path::Path;

/// Decode a PNG or JPEG into RGBA pixels
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| PuzzleError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgba8())
}

/// Place tiles on the grid according to a permutation
///
/// Position `p` (row-major) receives tile `permutation[p]`. The output is
/// `tile_width * cols` by `tile_height * rows` pixels.
///
/// # Errors
///
/// Returns `InvalidMapping` if the permutation does not cover the tile set
/// or the grid
pub fn compose(tiles: &TileSet, permutation: &Permutation, layout: GridLayout) -> Result<RgbaImage> {
    if permutation.len() != layout.tile_count() || permutation.len() != tiles.len() {
        return Err(invalid_mapping(&format!(
            "{} positions in mapping, {} in grid, {} tiles",
            permutation.len(),
            layout.tile_count(),
            tiles.len()
        )));
    }

    let (tile_width, tile_height) = (tiles.tile_width(), tiles.tile_height());
    let mut canvas = RgbaImage::new(
        tile_width * layout.cols() as u32,
        tile_height * layout.rows() as u32,
    );

    for (position, &tile_index) in permutation.as_slice().iter().enumerate() {
        let tile = tiles
            .get(tile_index)
            .ok_or_else(|| invalid_mapping(&format!("tile {tile_index} does not exist")))?;
        let (row, col) = layout.coordinates(position);
        imageops::replace(
            &mut canvas,
            tile,
            i64::from(tile_width) * col as i64,
            i64::from(tile_height) * row as i64,
        );
    }

    Ok(canvas)
}

/// Save an image, creating the parent directory if needed
///
/// The format follows the file extension.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| PuzzleError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    // JPEG has no alpha channel
    let is_jpeg = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg"));
    let saved = if is_jpeg {
        DynamicImage::ImageRgba8(image.clone()).to_rgb8().save(path)
    } else {
        image.save(path)
    };

    saved.map_err(|e| PuzzleError::ImageExport {
        path: path.to_path_buf(),
        source: e,
    })
}
