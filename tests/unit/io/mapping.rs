//! Tests for reading, writing and validating mapping files

#[cfg(test)]
mod tests {
    use unshuffle::PuzzleError;
    use unshuffle::algorithm::permutation::Permutation;
    use unshuffle::io::mapping::{
        format_mapping, parse_mapping, read_mapping_file, write_mapping_file,
    };
    use unshuffle::spatial::GridLayout;

    fn layout() -> GridLayout {
        GridLayout::new(2, 2).unwrap()
    }

    // Tests rows are written one per line, comma separated
    // Verified by joining rows with spaces
    #[test]
    fn test_format_mapping() {
        let permutation = Permutation::new(vec![1, 0, 3, 2], 4).unwrap();
        assert_eq!(format_mapping(&permutation, layout()), "1,0\n3,2\n");
    }

    // Tests single-column and single-row grids end every row with a newline
    // Verified by dropping the newline after the last row
    #[test]
    fn test_format_mapping_thin_grids() {
        let column = GridLayout::new(3, 1).unwrap();
        let permutation = Permutation::new(vec![2, 0, 1], 3).unwrap();
        assert_eq!(format_mapping(&permutation, column), "2\n0\n1\n");

        let row = GridLayout::new(1, 3).unwrap();
        assert_eq!(format_mapping(&permutation, row), "2,0,1\n");
    }

    // Tests formatted mappings parse back to the same permutation
    // Verified by reversing rows on output
    #[test]
    fn test_format_then_parse() {
        let layout = GridLayout::new(3, 4).unwrap();
        let permutation = Permutation::new(vec![11, 0, 5, 3, 2, 9, 1, 8, 4, 7, 10, 6], 12).unwrap();
        let text = format_mapping(&permutation, layout);
        assert_eq!(parse_mapping(&text, layout).unwrap(), permutation);
    }

    // Tests comments, blank lines and mixed separators are accepted
    // Verified by treating whitespace as a value
    #[test]
    fn test_parse_lenient_layout() {
        let text = "# solved by hand\n\n 2, 0 # top\n3 1\n";
        let permutation = parse_mapping(text, layout()).unwrap();
        assert_eq!(permutation.as_slice(), &[2, 0, 3, 1]);

        // Row breaks are not significant
        let flat = parse_mapping("2,0,3,1", layout()).unwrap();
        assert_eq!(flat, permutation);
    }

    // Tests short, duplicated and out-of-range mappings are rejected
    // Verified by skipping the permutation check
    #[test]
    fn test_parse_rejects_non_permutations() {
        for text in ["0,1,2", "0,1,2,2", "0,1,2,3,0", "0,1,2,4"] {
            assert!(
                matches!(
                    parse_mapping(text, layout()),
                    Err(PuzzleError::InvalidMapping { .. })
                ),
                "'{text}' should be rejected"
            );
        }
    }

    // Tests tokens that are not tile indices report their line
    // Verified by dropping the line number
    #[test]
    fn test_parse_rejects_bad_tokens() {
        let error = parse_mapping("0,1\n2,x\n", layout()).unwrap_err();
        assert!(error.to_string().contains("line 2"));

        assert!(parse_mapping("0,1,-2,3", layout()).is_err());
        assert!(parse_mapping("0,1,2.5,3", layout()).is_err());
    }

    // Tests mappings survive a write and read through the file system
    // Verified by writing to a different path
    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maps").join("puzzle_mapping.txt");
        let permutation = Permutation::new(vec![3, 1, 0, 2], 4).unwrap();

        write_mapping_file(&path, &permutation, layout()).unwrap();
        assert_eq!(read_mapping_file(&path, layout()).unwrap(), permutation);
    }

    // Tests a missing mapping file reports its path and operation
    // Verified by dropping the error context
    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");

        match read_mapping_file(&path, layout()) {
            Err(PuzzleError::FileSystem {
                path: reported,
                operation,
                ..
            }) => {
                assert_eq!(reported, path);
                assert_eq!(operation, "read mapping");
            }
            other => panic!("expected a file system error, got {other:?}"),
        }
    }
}
