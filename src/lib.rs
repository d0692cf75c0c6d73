//! Reassembles an image that was cut into a grid of tiles and shuffled
//!
//! Every ordered pair of tiles is scored for how well their borders continue
//! into each other, then a beam search assigns tiles to grid positions in
//! row-major order, keeping only the cheapest partial layouts at each step.

#![forbid(unsafe_code)]

/// Edge scoring, the used-tile set, permutations and the beam search
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Grid geometry and tile extraction
pub mod spatial;

pub use io::error::{PuzzleError, Result};
