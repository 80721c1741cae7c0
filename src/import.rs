//! Image sampling: decoded image -> binary cell matrix.
//!
//! The source is converted to 8-bit luma, shrunk with Lanczos resampling
//! so its longer side matches the target resolution, and thresholded
//! (darker than the threshold becomes ink). Aspect-preserving resize can
//! leave a rectangular matrix, so the shorter dimension is centre-padded
//! with empty cells up to the square the board model requires.

use std::path::Path;

use image::{imageops, imageops::FilterType, DynamicImage};
use log::debug;

use crate::board::{Board, Cell};
use crate::error::{Error, Result};

/// Decode an image file and sample it into a board.
pub fn from_path<P: AsRef<Path>>(path: P, resolution: u32, threshold: u8) -> Result<Board> {
    let image = image::open(path)?;
    Board::from_image(&image, resolution, threshold)
}

/// Decode raw image bytes (e.g. fetched elsewhere) and sample them into a board.
pub fn from_bytes(bytes: &[u8], resolution: u32, threshold: u8) -> Result<Board> {
    let image = image::load_from_memory(bytes)?;
    Board::from_image(&image, resolution, threshold)
}

/// Sample a decoded image down to a square cell matrix of the given side.
pub fn sample_cells(
    image: &DynamicImage,
    resolution: u32,
    threshold: u8,
) -> Result<Vec<Vec<Cell>>> {
    if resolution == 0 {
        return Err(Error::InvalidDimension("target resolution is 0".into()));
    }

    let luma = image.to_luma8();
    let (width, height) = luma.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension(format!(
            "source image is degenerate: {}x{}",
            width, height
        )));
    }

    let (new_width, new_height) = scaled_dimensions(width, height, resolution);
    debug!(
        "sampling {}x{} image down to {}x{} cells",
        width, height, new_width, new_height
    );

    let resized = imageops::resize(&luma, new_width, new_height, FilterType::Lanczos3);

    let cells: Vec<Vec<_>> = (0..new_height)
        .map(|y| {
            (0..new_width)
                .map(|x| {
                    if resized.get_pixel(x, y)[0] < threshold {
                        Cell::Filled
                    } else {
                        Cell::Empty
                    }
                })
                .collect()
        })
        .collect();

    Ok(pad_to_square(cells))
}

/// Shrink so the longer side equals `resolution`; the shorter side is
/// scaled proportionally, rounded to nearest and clamped to 1.
fn scaled_dimensions(width: u32, height: u32, resolution: u32) -> (u32, u32) {
    let scale = |long: u32, short: u32| {
        let scaled = f64::from(resolution) * f64::from(short) / f64::from(long);
        (scaled.round() as u32).max(1)
    };

    if width > height {
        (resolution, scale(width, height))
    } else {
        (scale(height, width), resolution)
    }
}

/// Centre-pad a rectangular matrix with empty cells up to a square
/// whose side is the longer dimension.
fn pad_to_square(cells: Vec<Vec<Cell>>) -> Vec<Vec<Cell>> {
    let height = cells.len();
    let width = cells.first().map_or(0, Vec::len);
    let side = height.max(width);

    let pad_left = (side - width) / 2;
    let pad_top = (side - height) / 2;

    let blank = vec![Cell::Empty; side];
    let mut padded = vec![blank.clone(); pad_top];

    for row in cells {
        let mut line = vec![Cell::Empty; pad_left];
        line.extend(row);
        line.resize(side, Cell::Empty);
        padded.push(line);
    }

    padded.resize(side, blank);
    padded
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};

    use super::*;

    fn flat_image(width: u32, height: u32, luma: u8) -> DynamicImage {
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([luma])))
    }

    fn clues(descriptions: &[crate::board::Description]) -> Vec<Vec<usize>> {
        descriptions
            .iter()
            .map(|desc| desc.vec.iter().map(|block| block.0).collect())
            .collect()
    }

    #[test]
    fn white_image_gives_empty_board() {
        let board = Board::from_image(&flat_image(6, 6, 255), 6, 128).unwrap();

        assert_eq!(board.size(), 6);
        assert_eq!(clues(board.desc_rows()), vec![vec![0]; 6]);
        assert_eq!(clues(board.desc_cols()), vec![vec![0]; 6]);
    }

    #[test]
    fn black_image_gives_full_board() {
        let board = Board::from_image(&flat_image(6, 6, 0), 6, 128).unwrap();

        assert_eq!(board.size(), 6);
        assert_eq!(clues(board.desc_rows()), vec![vec![6]; 6]);
        assert_eq!(clues(board.desc_cols()), vec![vec![6]; 6]);
    }

    #[test]
    fn threshold_is_strict() {
        // exactly at the threshold stays empty, one below becomes ink
        let at = Board::from_image(&flat_image(3, 3, 128), 3, 128).unwrap();
        assert_eq!(clues(at.desc_rows()), vec![vec![0]; 3]);

        let below = Board::from_image(&flat_image(3, 3, 127), 3, 128).unwrap();
        assert_eq!(clues(below.desc_rows()), vec![vec![3]; 3]);
    }

    #[test]
    fn wide_image_is_padded_to_square() {
        // 4x2 source at resolution 4 keeps its shape and gains one blank
        // row above and one below
        let board = Board::from_image(&flat_image(4, 2, 0), 4, 128).unwrap();

        assert_eq!(board.size(), 4);
        assert_eq!(
            clues(board.desc_rows()),
            vec![vec![0], vec![4], vec![4], vec![0]]
        );
        assert_eq!(clues(board.desc_cols()), vec![vec![2]; 4]);
    }

    #[test]
    fn tall_image_is_padded_to_square() {
        let board = Board::from_image(&flat_image(2, 4, 0), 4, 128).unwrap();

        assert_eq!(board.size(), 4);
        assert_eq!(clues(board.desc_cols()), vec![vec![0], vec![4], vec![4], vec![0]]);
    }

    #[test]
    fn shorter_side_never_collapses_to_zero() {
        assert_eq!(scaled_dimensions(100, 1, 10), (10, 1));
        assert_eq!(scaled_dimensions(1, 100, 10), (1, 10));
    }

    #[test]
    fn dimensions_round_to_nearest() {
        // 3:2 aspect at resolution 9 -> 9x6
        assert_eq!(scaled_dimensions(300, 200, 9), (9, 6));
        // 100:66 at resolution 10 -> 10x7 (6.6 rounds up)
        assert_eq!(scaled_dimensions(100, 66, 10), (10, 7));
    }

    #[test]
    fn reject_zero_resolution() {
        let err = Board::from_image(&flat_image(4, 4, 0), 0, 128).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension(_)));
    }
}
