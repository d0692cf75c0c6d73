//! Pairwise edge-compatibility scoring
//!
//! For every ordered pair of tiles the scorer measures how badly one tile's
//! right (or bottom) border continues into the other's left (or top) border.
//! Each tile's sampled border strips are read once up front, so a table entry
//! is a single pass over two short pixel lists.

use crate::io::configuration::{MAX_TILE_COUNT, SELF_ADJACENCY_COST};
use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::spatial::grid::GridLayout;
use crate::spatial::tiles::{Tile, TileSet};
use ndarray::Array2;

/// Border sampling parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScoringConfig {
    /// Depth of the strip compared on each side of a border
    pub band: usize,
    /// Stride between sampled lines along a border (1 samples every pixel)
    pub step: usize,
    /// Largest tile count the scorer will build tables for
    pub max_tiles: usize,
}

impl ScoringConfig {
    /// Sampling parameters with the default tile limit
    pub const fn new(band: usize, step: usize) -> Self {
        Self {
            band,
            step,
            max_tiles: MAX_TILE_COUNT,
        }
    }
}

/// Immutable right and down adjacency costs for one tile set
#[derive(Clone, Debug)]
pub struct CostTables {
    right: Array2<f64>,
    down: Array2<f64>,
}

impl CostTables {
    /// Build tables from precomputed matrices
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the matrices are not square or differ
    /// in size
    pub fn from_arrays(right: Array2<f64>, down: Array2<f64>) -> Result<Self> {
        let (rows, cols) = right.dim();
        if rows != cols || down.dim() != (rows, cols) {
            return Err(invalid_parameter(
                "cost_tables",
                &format!("right {:?}, down {:?}", right.dim(), down.dim()),
                &"tables must be square and of equal size",
            ));
        }
        Ok(Self { right, down })
    }

    /// Number of tiles the tables cover
    pub fn tile_count(&self) -> usize {
        self.right.nrows()
    }

    /// Cost of placing tile `j` directly right of tile `i`
    pub fn right(&self, i: usize, j: usize) -> f64 {
        self.right.get((i, j)).copied().unwrap_or(SELF_ADJACENCY_COST)
    }

    /// Cost of placing tile `j` directly below tile `i`
    pub fn down(&self, i: usize, j: usize) -> f64 {
        self.down.get((i, j)).copied().unwrap_or(SELF_ADJACENCY_COST)
    }

    /// Full right-adjacency matrix
    pub const fn right_table(&self) -> &Array2<f64> {
        &self.right
    }

    /// Full down-adjacency matrix
    pub const fn down_table(&self) -> &Array2<f64> {
        &self.down
    }

    /// Cost of placing `candidate` at `position` given the tiles already placed
    ///
    /// Sums the right cost from the left neighbour and the down cost from
    /// the neighbour above, when those positions exist.
    pub fn placement_cost(
        &self,
        layout: GridLayout,
        placed: &[usize],
        position: usize,
        candidate: usize,
    ) -> f64 {
        let mut cost = 0.0;
        if let Some(&left) = layout.left_of(position).and_then(|p| placed.get(p)) {
            cost += self.right(left, candidate);
        }
        if let Some(&up) = layout.above(position).and_then(|p| placed.get(p)) {
            cost += self.down(up, candidate);
        }
        cost
    }

    /// Total cost of a complete or partial arrangement
    ///
    /// Accumulates position by position in the same order as the search.
    pub fn arrangement_cost(&self, layout: GridLayout, arrangement: &[usize]) -> f64 {
        arrangement
            .iter()
            .enumerate()
            .map(|(position, &tile)| self.placement_cost(layout, arrangement, position, tile))
            .sum()
    }
}

/// Sampled pixels along the four borders of one tile
///
/// Each strip lists `band` pixels per sampled line, stepping inward from the
/// edge, so entry `m` of one tile's right strip is compared with entry `m`
/// of another tile's left strip.
struct BorderStrips {
    right: Vec<[u8; 3]>,
    left: Vec<[u8; 3]>,
    bottom: Vec<[u8; 3]>,
    top: Vec<[u8; 3]>,
}

impl BorderStrips {
    fn sample(tile: &Tile, band: usize, step: usize) -> Self {
        let (width, height) = tile.dimensions();
        let (width, height) = (width as usize, height as usize);
        let rgb = |x: usize, y: usize| {
            tile.get_pixel_checked(x as u32, y as u32)
                .map_or([0, 0, 0], |pixel| [pixel[0], pixel[1], pixel[2]])
        };

        let rows = height.div_ceil(step) * band;
        let cols = width.div_ceil(step) * band;
        let mut strips = Self {
            right: Vec::with_capacity(rows),
            left: Vec::with_capacity(rows),
            bottom: Vec::with_capacity(cols),
            top: Vec::with_capacity(cols),
        };

        for y in (0..height).step_by(step) {
            for k in 0..band {
                strips.right.push(rgb(width - 1 - k, y));
                strips.left.push(rgb(k, y));
            }
        }
        for x in (0..width).step_by(step) {
            for k in 0..band {
                strips.bottom.push(rgb(x, height - 1 - k));
                strips.top.push(rgb(x, k));
            }
        }

        strips
    }
}

fn strip_difference(a: &[[u8; 3]], b: &[[u8; 3]]) -> f64 {
    let total: u64 = a
        .iter()
        .zip(b)
        .map(|(pa, pb)| {
            pa.iter()
                .zip(pb)
                .map(|(&ca, &cb)| u64::from(ca.abs_diff(cb)))
                .sum::<u64>()
        })
        .sum();
    total as f64
}

/// Builds cost tables from tile pixels
#[derive(Clone, Copy, Debug)]
pub struct EdgeScorer {
    config: ScoringConfig,
}

impl EdgeScorer {
    /// Create a scorer with the given sampling parameters
    pub const fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Sampling parameters in use
    pub const fn config(&self) -> ScoringConfig {
        self.config
    }

    /// Check that every border comparison has at least one sample
    ///
    /// A `step` larger than the tile still samples line 0, so only a zero
    /// stride or a band that is empty or deeper than the tile is rejected.
    ///
    /// # Errors
    ///
    /// Returns `DegenerateGeometry` if the band or step leaves no pixels to
    /// compare along either border
    pub fn validate_geometry(&self, tile_width: u32, tile_height: u32) -> Result<()> {
        let ScoringConfig { band, step, .. } = self.config;
        let degenerate = |reason| PuzzleError::DegenerateGeometry {
            band,
            step,
            tile_width,
            tile_height,
            reason,
        };

        if step == 0 {
            return Err(degenerate("step must be at least 1"));
        }
        if band == 0 {
            return Err(degenerate("band must be at least 1"));
        }
        if band > tile_width as usize {
            return Err(degenerate("band is deeper than the tile width"));
        }
        if band > tile_height as usize {
            return Err(degenerate("band is deeper than the tile height"));
        }
        Ok(())
    }

    /// Compute right and down costs for every ordered pair of tiles
    ///
    /// Diagonal entries hold `SELF_ADJACENCY_COST`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile count exceeds the configured limit
    /// - The sampling geometry is degenerate for the tile size
    pub fn score(&self, tiles: &TileSet) -> Result<CostTables> {
        let tile_count = tiles.len();
        if tile_count > self.config.max_tiles {
            return Err(PuzzleError::CapacityExceeded {
                tiles: tile_count,
                limit: self.config.max_tiles,
            });
        }
        self.validate_geometry(tiles.tile_width(), tiles.tile_height())?;

        let strips: Vec<BorderStrips> = tiles
            .iter()
            .map(|tile| BorderStrips::sample(tile, self.config.band, self.config.step))
            .collect();

        let mut right = Array2::from_elem((tile_count, tile_count), SELF_ADJACENCY_COST);
        let mut down = Array2::from_elem((tile_count, tile_count), SELF_ADJACENCY_COST);

        for (i, from) in strips.iter().enumerate() {
            for (j, to) in strips.iter().enumerate() {
                if i == j {
                    continue;
                }
                if let Some(cell) = right.get_mut((i, j)) {
                    *cell = strip_difference(&from.right, &to.left);
                }
                if let Some(cell) = down.get_mut((i, j)) {
                    *cell = strip_difference(&from.bottom, &to.top);
                }
            }
        }

        log::debug!(
            "Scored {tile_count} tiles ({}x{}, band {}, step {})",
            tiles.tile_width(),
            tiles.tile_height(),
            self.config.band,
            self.config.step
        );

        Ok(CostTables { right, down })
    }
}
