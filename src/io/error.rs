//! Error types and context management for solver operations

use std::fmt;
use std::path::{Path, PathBuf};

const UNKNOWN_PATH: &str = "<unknown>";

/// Main error type for all solver operations
#[derive(Debug)]
pub enum PuzzleError {
    /// Tile count exceeds what the solver is configured to handle
    CapacityExceeded {
        /// Number of tiles requested
        tiles: usize,
        /// Configured maximum
        limit: usize,
    },

    /// A supplied mapping is not a permutation of the grid's tiles
    InvalidMapping {
        /// Description of what's wrong with the mapping
        reason: String,
    },

    /// Border sampling parameters leave no pixels to compare
    DegenerateGeometry {
        /// Requested band depth
        band: usize,
        /// Requested sampling stride
        step: usize,
        /// Tile width in pixels
        tile_width: u32,
        /// Tile height in pixels
        tile_height: u32,
        /// Which border comparison is empty
        reason: &'static str,
    },

    /// Tiles are missing or disagree on their dimensions
    InvalidTileSet {
        /// Description of what's wrong with the tiles
        reason: String,
    },

    /// Solver parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { tiles, limit } => {
                write!(f, "Too many tiles ({tiles}); at most {limit} are supported")
            }
            Self::InvalidMapping { reason } => {
                write!(f, "Invalid mapping: {reason}")
            }
            Self::DegenerateGeometry {
                band,
                step,
                tile_width,
                tile_height,
                reason,
            } => {
                write!(
                    f,
                    "Degenerate border sampling (band {band}, step {step}, tile {tile_width}x{tile_height}): {reason}"
                )
            }
            Self::InvalidTileSet { reason } => {
                write!(f, "Invalid tile set: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// File the failing operation was working on
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Fills in file details that conversions from foreign errors leave blank
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the path context
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<PuzzleError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                PuzzleError::ImageLoad { path, .. } | PuzzleError::ImageExport { path, .. } => {
                    if let Some(known) = &context.path {
                        if path.as_os_str() == UNKNOWN_PATH {
                            path.clone_from(known);
                        }
                    }
                }
                PuzzleError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(known) = &context.path {
                        if path.as_os_str() == UNKNOWN_PATH {
                            path.clone_from(known);
                        }
                    }
                    if let Some(op) = context.operation {
                        *operation = op;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_path(self, path: &Path) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.to_path_buf()),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for PuzzleError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid mapping error
pub fn invalid_mapping(reason: &impl ToString) -> PuzzleError {
    PuzzleError::InvalidMapping {
        reason: reason.to_string(),
    }
}
