//! Spatial data structures for the tile grid
//!
//! This module contains:
//! - Grid layout and cell boundary geometry
//! - Tile storage and extraction from a source image

/// Grid layout, margins and cell boundaries
pub mod grid;
/// Tile set construction and extraction
pub mod tiles;

pub use grid::{CellGrid, GridLayout, Margins};
pub use tiles::TileSet;
