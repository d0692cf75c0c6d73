//! Mapping text format
//!
//! A mapping lists, for each grid row, the comma-separated tile indices
//! placed in that row. `#` starts a comment that runs to the end of the
//! line. When reading, commas and whitespace are interchangeable separators
//! and only the flattened sequence matters.

use crate::algorithm::permutation::Permutation;
use crate::io::error::{ErrorContext, Result, WithContext, invalid_mapping};
use crate::spatial::grid::GridLayout;
use std::path::Path;

/// Parse a mapping and validate it as a permutation of the grid's tiles
///
/// # Errors
///
/// Returns `InvalidMapping` if:
/// - A token is not a non-negative integer
/// - The number of values differs from the grid's tile count
/// - The values are not a permutation of `0..tile_count`
pub fn parse_mapping(text: &str, layout: GridLayout) -> Result<Permutation> {
    let mut values = Vec::with_capacity(layout.tile_count());

    for (line_number, line) in text.lines().enumerate() {
        let content = line.split_once('#').map_or(line, |(before, _)| before);
        for token in content
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
        {
            let value = token.parse::<usize>().map_err(|e| {
                invalid_mapping(&format!(
                    "line {}: '{token}' is not a tile index ({e})",
                    line_number + 1
                ))
            })?;
            values.push(value);
        }
    }

    Permutation::new(values, layout.tile_count())
}

/// Render a permutation as one comma-separated line per grid row
pub fn format_mapping(permutation: &Permutation, layout: GridLayout) -> String {
    let mut out = String::new();
    for row in permutation.as_slice().chunks(layout.cols()) {
        let line = row
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Read and validate a mapping file
///
/// # Errors
///
/// Returns an error if the file cannot be read or its contents are not a
/// valid mapping for the grid
pub fn read_mapping_file(path: &Path, layout: GridLayout) -> Result<Permutation> {
    let text = std::fs::read_to_string(path).with_context(ErrorContext {
        path: Some(path.to_path_buf()),
        operation: Some("read mapping"),
    })?;
    parse_mapping(&text, layout)
}

/// Write a permutation to a mapping file, creating parent directories
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written
pub fn write_mapping_file(
    path: &Path,
    permutation: &Permutation,
    layout: GridLayout,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(ErrorContext {
            path: Some(parent.to_path_buf()),
            operation: Some("create directory"),
        })?;
    }

    std::fs::write(path, format_mapping(permutation, layout)).with_context(ErrorContext {
        path: Some(path.to_path_buf()),
        operation: Some("write mapping"),
    })
}
