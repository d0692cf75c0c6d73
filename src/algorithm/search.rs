//! Beam search over partial grid assignments
//!
//! Positions are filled in row-major order. At each step every retained
//! partial layout is extended by every unused tile, the successors are
//! stably sorted by accumulated cost, and only the cheapest `beam_width`
//! survive. Ties keep generation order (parent order, then ascending tile),
//! so identical inputs always give the identical permutation.

use crate::algorithm::bitset::UsedTiles;
use crate::algorithm::permutation::Permutation;
use crate::algorithm::scoring::{CostTables, EdgeScorer, ScoringConfig};
use crate::io::configuration::MAX_TILE_COUNT;
use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::spatial::grid::GridLayout;
use crate::spatial::tiles::TileSet;

/// Search parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Partial layouts kept after each pruning step
    pub beam_width: usize,
    /// When set, each layout only tries its `k` cheapest tiles at positions
    /// that already have a placed neighbour
    pub candidate_limit: Option<usize>,
    /// Largest tile count the search accepts
    pub max_tiles: usize,
}

impl SearchConfig {
    /// Unfiltered search with the given beam width and the default tile limit
    pub const fn new(beam_width: usize) -> Self {
        Self {
            beam_width,
            candidate_limit: None,
            max_tiles: MAX_TILE_COUNT,
        }
    }

    /// Restrict each expansion to the cheapest `limit` candidates
    #[must_use]
    pub const fn with_candidate_limit(mut self, limit: usize) -> Self {
        self.candidate_limit = Some(limit);
        self
    }

    /// Fail fast when a puzzle has more tiles than the search accepts
    ///
    /// # Errors
    ///
    /// Returns `CapacityExceeded` if `tile_count` is above `max_tiles`
    pub fn check_capacity(&self, tile_count: usize) -> Result<()> {
        if tile_count > self.max_tiles {
            Err(PuzzleError::CapacityExceeded {
                tiles: tile_count,
                limit: self.max_tiles,
            })
        } else {
            Ok(())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.beam_width == 0 {
            return Err(invalid_parameter(
                "beam_width",
                &self.beam_width,
                &"must keep at least one state",
            ));
        }
        if self.candidate_limit == Some(0) {
            return Err(invalid_parameter(
                "candidate_limit",
                &0,
                &"must allow at least one candidate",
            ));
        }
        Ok(())
    }
}

/// One partial layout in the beam
#[derive(Clone, Debug)]
pub struct SearchState {
    cost: f64,
    used: UsedTiles,
    placed: Vec<usize>,
}

impl SearchState {
    fn initial(tile_count: usize) -> Self {
        Self {
            cost: 0.0,
            used: UsedTiles::new(tile_count),
            placed: Vec::with_capacity(tile_count),
        }
    }

    fn extend(&self, tile: usize, cost: f64) -> Self {
        let mut next = self.clone();
        next.used.insert(tile);
        next.placed.push(tile);
        next.cost = cost;
        next
    }

    /// Accumulated border cost of the placed tiles
    pub const fn cost(&self) -> f64 {
        self.cost
    }

    /// Tiles placed so far, in position order
    pub fn placed(&self) -> &[usize] {
        &self.placed
    }

    /// Tiles consumed by this layout
    pub const fn used(&self) -> &UsedTiles {
        &self.used
    }
}

/// Finished assignment and its total cost
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    /// Tile placed at each grid position
    pub permutation: Permutation,
    /// Sum of all right and down adjacency costs
    pub cost: f64,
}

// Successors are ranked before any state is cloned
#[derive(Clone, Copy, Debug)]
struct Successor {
    parent: usize,
    tile: usize,
    cost: f64,
}

/// Step-by-step beam search over one set of cost tables
#[derive(Debug)]
pub struct BeamSearch<'a> {
    tables: &'a CostTables,
    layout: GridLayout,
    config: SearchConfig,
    states: Vec<SearchState>,
    position: usize,
}

impl<'a> BeamSearch<'a> {
    /// Prepare a search starting from the empty layout
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The grid has more tiles than `config.max_tiles`
    /// - The cost tables cover a different number of tiles than the grid
    /// - The beam width or candidate limit is zero
    pub fn new(tables: &'a CostTables, layout: GridLayout, config: SearchConfig) -> Result<Self> {
        let tile_count = layout.tile_count();
        config.check_capacity(tile_count)?;
        config.validate()?;

        if tables.tile_count() != tile_count {
            return Err(invalid_parameter(
                "cost_tables",
                &tables.tile_count(),
                &format!("grid has {tile_count} positions"),
            ));
        }

        Ok(Self {
            tables,
            layout,
            config,
            states: vec![SearchState::initial(tile_count)],
            position: 0,
        })
    }

    /// Number of positions filled so far
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Test if every position has been filled
    pub const fn is_complete(&self) -> bool {
        self.position >= self.layout.tile_count()
    }

    /// Retained states, cheapest first
    pub fn states(&self) -> &[SearchState] {
        &self.states
    }

    /// Cost of the cheapest retained state
    pub fn best_cost(&self) -> f64 {
        self.states.first().map_or(0.0, SearchState::cost)
    }

    /// Fill the next grid position
    ///
    /// Returns `false` once the layout is complete and nothing was done.
    pub fn step(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }

        let mut successors = self.expand();
        successors.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        let generated = successors.len();
        successors.truncate(self.config.beam_width);

        self.states = successors
            .iter()
            .filter_map(|successor| {
                self.states
                    .get(successor.parent)
                    .map(|parent| parent.extend(successor.tile, successor.cost))
            })
            .collect();
        self.position += 1;

        log::debug!(
            "Position {}/{}: kept {} of {generated} states, best cost {}",
            self.position,
            self.layout.tile_count(),
            self.states.len(),
            self.best_cost()
        );

        true
    }

    /// Fill all remaining positions
    pub fn run(&mut self) {
        while self.step() {}
    }

    /// Complete the search and return the cheapest layout
    ///
    /// # Errors
    ///
    /// Returns an error if the search ends without a complete layout, which
    /// only happens when the grid has no positions
    pub fn finish(mut self) -> Result<Solution> {
        self.run();
        let tile_count = self.layout.tile_count();
        let best = self
            .states
            .into_iter()
            .next()
            .ok_or_else(|| invalid_parameter("tiles", &tile_count, &"no layout was produced"))?;

        Ok(Solution {
            cost: best.cost,
            permutation: Permutation::new(best.placed, tile_count)?,
        })
    }

    fn expand(&self) -> Vec<Successor> {
        let position = self.position;
        let constrained =
            self.layout.left_of(position).is_some() || self.layout.above(position).is_some();
        let limit = self.config.candidate_limit.filter(|_| constrained);

        let remaining = self.layout.tile_count().saturating_sub(position);
        let mut successors = Vec::with_capacity(self.states.len() * remaining);
        let mut candidates: Vec<(usize, f64)> = Vec::with_capacity(remaining);

        for (parent, state) in self.states.iter().enumerate() {
            candidates.clear();
            candidates.extend(state.used.unused().map(|tile| {
                let increment =
                    self.tables
                        .placement_cost(self.layout, &state.placed, position, tile);
                (tile, increment)
            }));

            if let Some(limit) = limit {
                if candidates.len() > limit {
                    candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
                    candidates.truncate(limit);
                    candidates.sort_by_key(|&(tile, _)| tile);
                }
            }

            successors.extend(candidates.iter().map(|&(tile, increment)| Successor {
                parent,
                tile,
                cost: state.cost + increment,
            }));
        }

        successors
    }
}

/// Run a complete search over precomputed cost tables
///
/// # Errors
///
/// Returns an error if the search parameters are invalid for the grid
pub fn solve(tables: &CostTables, layout: GridLayout, config: SearchConfig) -> Result<Solution> {
    BeamSearch::new(tables, layout, config)?.finish()
}

/// Score a tile set and search it in one call
///
/// The tile count is checked against the search limit before any scoring.
///
/// # Errors
///
/// Returns an error if:
/// - The tile count does not match the grid
/// - The tile count exceeds the configured limit
/// - The scoring geometry is degenerate
/// - The search parameters are invalid
pub fn solve_tiles(
    tiles: &TileSet,
    layout: GridLayout,
    scoring: ScoringConfig,
    search: SearchConfig,
) -> Result<Solution> {
    if tiles.len() != layout.tile_count() {
        return Err(PuzzleError::InvalidTileSet {
            reason: format!(
                "{} tiles supplied for a {}x{} grid",
                tiles.len(),
                layout.rows(),
                layout.cols()
            ),
        });
    }
    search.check_capacity(tiles.len())?;

    let tables = EdgeScorer::new(scoring).score(tiles)?;
    solve(&tables, layout, search)
}
