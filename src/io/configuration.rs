//! Solver constants and runtime configuration defaults

// Grid geometry defaults
/// Default number of tile rows
pub const DEFAULT_ROWS: usize = 4;
/// Default number of tile columns
pub const DEFAULT_COLS: usize = 4;
/// Default pixels trimmed from each cell's width
pub const DEFAULT_WIDTH_MARGIN: u32 = 6;
/// Default pixels trimmed from each cell's height
pub const DEFAULT_HEIGHT_MARGIN: u32 = 4;

// Border sampling defaults
/// Default depth of the border strip compared between neighbours
pub const DEFAULT_BAND: usize = 3;
/// Default stride along a border
pub const DEFAULT_STEP: usize = 2;

// Search defaults
/// Beam width used for small puzzles
pub const DEFAULT_BEAM_WIDTH_SMALL: usize = 1200;
/// Beam width used once the puzzle exceeds `SMALL_PUZZLE_TILES`
pub const DEFAULT_BEAM_WIDTH_LARGE: usize = 5000;
/// Largest tile count that still uses the small beam width
pub const SMALL_PUZZLE_TILES: usize = 16;

// Cost tables grow with the square of the tile count
/// Maximum number of tiles accepted by the scorer and the search
pub const MAX_TILE_COUNT: usize = 1024;

/// Cost stored on the diagonal of the cost tables
///
/// Larger than any achievable border cost, so a tile never neighbours itself.
pub const SELF_ADJACENCY_COST: f64 = f64::INFINITY;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to solved image filenames
pub const OUTPUT_SUFFIX: &str = "_solved";
/// Suffix added to shuffled image filenames
pub const SCRAMBLE_SUFFIX: &str = "_shuffled";
/// Suffix added to solved mapping filenames
pub const MAPPING_SUFFIX: &str = "_mapping.txt";
/// Suffix added to the restoring mapping written next to a shuffled image
pub const ANSWER_SUFFIX: &str = "_answer.txt";

/// Beam width used when none is given explicitly
pub const fn default_beam_width(tile_count: usize) -> usize {
    if tile_count <= SMALL_PUZZLE_TILES {
        DEFAULT_BEAM_WIDTH_SMALL
    } else {
        DEFAULT_BEAM_WIDTH_LARGE
    }
}
