//! End-to-end checks: in-memory image -> board -> rendered puzzle.

use image::{DynamicImage, GrayImage, Luma, Rgb};

use nonogen::{Board, ImageRenderer, Renderer, ShellRenderer};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

fn flat_image(width: u32, height: u32, luma: u8) -> DynamicImage {
    DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([luma])))
}

fn clues(descriptions: &[nonogen::Description]) -> Vec<Vec<usize>> {
    descriptions
        .iter()
        .map(|desc| desc.vec.iter().map(|block| block.0).collect())
        .collect()
}

#[test]
fn white_image_end_to_end() {
    let board = Board::from_image(&flat_image(8, 8, 255), 8, 128).unwrap();

    assert_eq!(board.size(), 8);
    assert_eq!(clues(board.desc_rows()), vec![vec![0]; 8]);
    assert_eq!(clues(board.desc_cols()), vec![vec![0]; 8]);

    // every clue-list has the canonical single zero, so both margins
    // are exactly one cell wide
    let image = ImageRenderer::with_board(&board).build_image(10, true).unwrap();
    assert_eq!(image.dimensions(), (90, 90));

    // nothing to fill: the centre of grid cell (0, 0) stays white
    assert_eq!(*image.get_pixel(15, 15), WHITE);
}

#[test]
fn black_image_end_to_end() {
    let board = Board::from_image(&flat_image(8, 8, 0), 8, 128).unwrap();

    assert_eq!(clues(board.desc_rows()), vec![vec![8]; 8]);
    assert_eq!(clues(board.desc_cols()), vec![vec![8]; 8]);

    let image = ImageRenderer::with_board(&board).build_image(10, true).unwrap();
    assert_eq!(image.dimensions(), (90, 90));
    assert_eq!(*image.get_pixel(15, 15), BLACK);
}

#[test]
fn cross_pattern_survives_the_pipeline() {
    // a 5x5 black cross on white, sampled at its own resolution
    let mut source = GrayImage::from_pixel(5, 5, Luma([255]));
    for i in 0..5 {
        source.put_pixel(i, 2, Luma([0]));
        source.put_pixel(2, i, Luma([0]));
    }
    let board = Board::from_image(&DynamicImage::ImageLuma8(source), 5, 128).unwrap();

    assert_eq!(
        clues(board.desc_rows()),
        vec![vec![1], vec![1], vec![5], vec![1], vec![1]]
    );
    assert_eq!(clues(board.desc_rows()), clues(board.desc_cols()));

    let shell = ShellRenderer::with_board(&board).render();
    assert!(shell.contains("# # # # #"));
}

#[test]
fn wide_image_is_squared_before_rendering() {
    // 10x5 source at resolution 10: the board gets padded to 10x10 and
    // the renderer only ever sees a square grid
    let board = Board::from_image(&flat_image(10, 5, 0), 10, 128).unwrap();
    assert_eq!(board.size(), 10);

    let renderer = ImageRenderer::with_board(&board);
    let layout = renderer.layout();
    assert_eq!(layout.side_width, 1);
    assert_eq!(layout.header_height, 1);

    let image = renderer.build_image(8, false).unwrap();
    assert_eq!(image.dimensions(), (88, 88));
}

#[test]
fn blank_and_solved_views_share_geometry() {
    let board = Board::from_image(&flat_image(4, 4, 0), 4, 128).unwrap();
    let renderer = ImageRenderer::with_board(&board);

    let blank = renderer.build_image(12, false).unwrap();
    let solved = renderer.build_image(12, true).unwrap();
    assert_eq!(blank.dimensions(), solved.dimensions());
}
