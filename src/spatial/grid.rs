//! Grid layout and cell boundary geometry
//!
//! A puzzle image is divided into `rows × cols` cells whose edges are placed
//! by rounding, so uneven image sizes never accumulate drift. Each cell is
//! trimmed by a margin to drop grid lines, and every tile shares the size of
//! the smallest trimmed cell.

use crate::io::error::{Result, invalid_parameter};

/// Shape of the tile grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    rows: usize,
    cols: usize,
}

impl GridLayout {
    /// Create a layout with the given number of rows and columns
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 {
            return Err(invalid_parameter("rows", &rows, &"must be at least 1"));
        }
        if cols == 0 {
            return Err(invalid_parameter("cols", &cols, &"must be at least 1"));
        }
        Ok(Self { rows, cols })
    }

    /// Number of tile rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of tile columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of grid positions
    pub const fn tile_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Row and column of a row-major position
    pub const fn coordinates(&self, position: usize) -> (usize, usize) {
        (position / self.cols, position % self.cols)
    }

    /// Position immediately to the left, if any
    pub const fn left_of(&self, position: usize) -> Option<usize> {
        if position % self.cols == 0 {
            None
        } else {
            Some(position - 1)
        }
    }

    /// Position immediately above, if any
    pub const fn above(&self, position: usize) -> Option<usize> {
        if position < self.cols {
            None
        } else {
            Some(position - self.cols)
        }
    }
}

/// Pixels trimmed from each cell before it becomes a tile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Margins {
    /// Pixels removed from the width, split between left and right
    pub width: u32,
    /// Pixels removed from the height, split between top and bottom
    pub height: u32,
}

/// Source rectangle of a single cell after trimming
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    /// Left edge in source pixels
    pub x: u32,
    /// Top edge in source pixels
    pub y: u32,
    /// Width in source pixels
    pub width: u32,
    /// Height in source pixels
    pub height: u32,
}

/// Cell boundaries of a source image and the common tile size
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellGrid {
    layout: GridLayout,
    margins: Margins,
    xs: Vec<u32>,
    ys: Vec<u32>,
    tile_width: u32,
    tile_height: u32,
}

impl CellGrid {
    /// Compute cell boundaries for an image of the given size
    ///
    /// # Errors
    ///
    /// Returns an error if the image has fewer pixels than grid cells along
    /// either axis
    pub fn new(width: u32, height: u32, layout: GridLayout, margins: Margins) -> Result<Self> {
        if (width as usize) < layout.cols() {
            return Err(invalid_parameter(
                "cols",
                &layout.cols(),
                &format!("image is only {width} pixels wide"),
            ));
        }
        if (height as usize) < layout.rows() {
            return Err(invalid_parameter(
                "rows",
                &layout.rows(),
                &format!("image is only {height} pixels tall"),
            ));
        }

        let xs = boundaries(width, layout.cols());
        let ys = boundaries(height, layout.rows());

        let min_width = min_extent(&xs);
        let min_height = min_extent(&ys);

        Ok(Self {
            layout,
            margins,
            tile_width: min_width.saturating_sub(margins.width).max(1),
            tile_height: min_height.saturating_sub(margins.height).max(1),
            xs,
            ys,
        })
    }

    /// Grid shape these boundaries were computed for
    pub const fn layout(&self) -> GridLayout {
        self.layout
    }

    /// Width shared by every extracted tile
    pub const fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Height shared by every extracted tile
    pub const fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Column boundaries, `cols + 1` entries
    pub fn column_boundaries(&self) -> &[u32] {
        &self.xs
    }

    /// Row boundaries, `rows + 1` entries
    pub fn row_boundaries(&self) -> &[u32] {
        &self.ys
    }

    /// Trimmed source rectangle of the cell at a row-major position
    pub fn cell(&self, position: usize) -> Option<CellRect> {
        let (row, col) = self.layout.coordinates(position);
        if row >= self.layout.rows() {
            return None;
        }

        let x0 = *self.xs.get(col)?;
        let x1 = *self.xs.get(col + 1)?;
        let y0 = *self.ys.get(row)?;
        let y1 = *self.ys.get(row + 1)?;

        Some(CellRect {
            x: x0 + self.margins.width / 2,
            y: y0 + self.margins.height / 2,
            width: (x1 - x0).saturating_sub(self.margins.width).max(1),
            height: (y1 - y0).saturating_sub(self.margins.height).max(1),
        })
    }
}

// Boundary `i` sits at round(i * extent / count), rounding halves up
fn boundaries(extent: u32, count: usize) -> Vec<u32> {
    let extent = extent as u64;
    let count = count as u64;
    (0..=count)
        .map(|i| ((2 * i * extent + count) / (2 * count)) as u32)
        .collect()
}

fn min_extent(bounds: &[u32]) -> u32 {
    bounds
        .windows(2)
        .map(|pair| match pair {
            [start, end] => end - start,
            _ => 0,
        })
        .min()
        .unwrap_or(0)
}
