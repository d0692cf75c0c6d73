//! Tests for image loading, tile compositing and export

#[cfg(test)]
mod tests {
    use crate::unit::{gradient_image, solid_tile};
    use image::Rgba;
    use unshuffle::PuzzleError;
    use unshuffle::algorithm::permutation::Permutation;
    use unshuffle::io::image::{compose, load_image, save_image};
    use unshuffle::spatial::{GridLayout, TileSet};

    fn coloured_tiles() -> TileSet {
        TileSet::new(vec![
            solid_tile(3, 2, [255, 0, 0]),
            solid_tile(3, 2, [0, 255, 0]),
            solid_tile(3, 2, [0, 0, 255]),
            solid_tile(3, 2, [9, 9, 9]),
        ])
        .unwrap()
    }

    // Tests each position receives the tile named by the permutation
    // Verified by swapping row and column offsets
    #[test]
    fn test_compose_places_tiles() {
        let layout = GridLayout::new(2, 2).unwrap();
        let permutation = Permutation::new(vec![3, 2, 1, 0], 4).unwrap();
        let image = compose(&coloured_tiles(), &permutation, layout).unwrap();

        assert_eq!(image.dimensions(), (6, 4));
        assert_eq!(*image.get_pixel(0, 0), Rgba([9, 9, 9, 255]));
        assert_eq!(*image.get_pixel(5, 1), Rgba([0, 0, 255, 255]));
        assert_eq!(*image.get_pixel(2, 2), Rgba([0, 255, 0, 255]));
        assert_eq!(*image.get_pixel(3, 3), Rgba([255, 0, 0, 255]));
    }

    // Tests compositing rejects a mapping sized for another grid
    // Verified by removing the length check
    #[test]
    fn test_compose_size_mismatch() {
        let layout = GridLayout::new(1, 3).unwrap();
        let permutation = Permutation::identity(3);
        let result = compose(&coloured_tiles(), &permutation, layout);
        assert!(matches!(result, Err(PuzzleError::InvalidMapping { .. })));
    }

    // Tests PNG output reloads pixel for pixel
    // Verified by saving a different image
    #[test]
    fn test_png_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("gradient.png");
        let image = gradient_image(10, 6);

        save_image(&image, &path).unwrap();
        assert_eq!(load_image(&path).unwrap(), image);
    }

    // Tests JPEG output drops alpha and keeps dimensions
    // Verified by saving RGBA data directly to JPEG
    #[test]
    fn test_jpeg_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.JPG");

        save_image(&gradient_image(10, 6), &path).unwrap();
        let reloaded = load_image(&path).unwrap();
        assert_eq!(reloaded.dimensions(), (10, 6));
        assert_eq!(reloaded.get_pixel(0, 0)[3], 255);
    }

    // Tests loading a missing file reports the path
    // Verified by dropping the path from the error
    #[test]
    fn test_load_missing_file() {
        let result = load_image(std::path::Path::new("/nonexistent/puzzle.png"));
        match result {
            Err(PuzzleError::ImageLoad { path, .. }) => {
                assert!(path.ends_with("puzzle.png"));
            }
            _ => panic!("expected an image load error"),
        }
    }
}
