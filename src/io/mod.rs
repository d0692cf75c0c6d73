/// Command-line interface and batch file processing
pub mod cli;
/// Default parameters and limits
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Image loading, compositing and export
pub mod image;
/// Mapping text format
pub mod mapping;
/// Progress display for scoring and search
pub mod progress;
/// Seeded shuffling of intact images into puzzles
pub mod scramble;
