use std::path::Path;

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use log::debug;

use crate::board::{Board, Description};
use crate::error::{Error, Result};
use crate::utils::{pad, pad_with, transpose};

mod font;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const GREY: Rgb<u8> = Rgb([128, 128, 128]);

pub trait Renderer<'a> {
    fn with_board(board: &'a Board) -> Self;
    fn render(&self) -> String;
}

/// Text rendering of the solved puzzle with its clues,
/// for terminals and logs.
#[derive(Debug, Clone, Copy)]
pub struct ShellRenderer<'a> {
    board: &'a Board,
}

impl<'a> Renderer<'a> for ShellRenderer<'a> {
    fn with_board(board: &'a Board) -> Self {
        Self { board }
    }

    fn render(&self) -> String {
        let full_width = self.side_width() + self.board.size();

        let mut header = self.header_lines();
        for row in header.iter_mut() {
            pad_with(row, "#".to_string(), full_width, false);
        }

        let mut side = self.side_lines();
        let grid = self.grid_lines();
        let grid: Vec<Vec<String>> = side
            .iter_mut()
            .zip(grid)
            .map(|(s, g)| {
                s.extend(g);
                s.to_owned()
            })
            .collect();

        let lines = vec![header, grid];
        lines
            .concat()
            .iter()
            .map(|line| {
                line.iter()
                    .map(|symbol| pad(symbol, 2, true))
                    .collect::<Vec<_>>()
                    .join("")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl<'a> ShellRenderer<'a> {
    fn side_width(&self) -> usize {
        descriptions_width(self.board.descriptions(true))
    }

    fn desc_to_string(desc: &Description) -> Vec<String> {
        desc.vec.iter().map(ToString::to_string).collect()
    }

    fn descriptions_to_matrix(descriptions: &[Description]) -> Vec<Vec<String>> {
        let mut rows: Vec<Vec<String>> = descriptions.iter().map(Self::desc_to_string).collect();

        let width = descriptions_width(descriptions);

        for row in rows.iter_mut() {
            pad_with(row, " ".to_string(), width, false);
        }
        rows
    }

    fn side_lines(&self) -> Vec<Vec<String>> {
        Self::descriptions_to_matrix(self.board.descriptions(true))
    }

    fn header_lines(&self) -> Vec<Vec<String>> {
        transpose(&Self::descriptions_to_matrix(self.board.descriptions(false))).unwrap()
    }

    fn grid_lines(&self) -> Vec<Vec<String>> {
        self.board
            .cells()
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }
}

/// The length of the longest clue-list; at least 1,
/// since every line owns the canonical `[0]` at minimum.
fn descriptions_width(descriptions: &[Description]) -> usize {
    descriptions
        .iter()
        .map(|desc| desc.vec.len())
        .max()
        .unwrap_or(0)
}

/// Canvas geometry, in cell units.
///
/// The left margin is as wide as the longest row clue-list, the top
/// margin as tall as the longest column clue-list; the grid origin sits
/// right after both margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub side_width: usize,
    pub header_height: usize,
    pub width: usize,
    pub height: usize,
}

/// Raster rendering of the puzzle: clue numbers in the margins, the
/// grid with its closing border, and (for the solution view) the
/// filled cells painted under the grid lines.
#[derive(Debug, Clone, Copy)]
pub struct ImageRenderer<'a> {
    board: &'a Board,
}

impl<'a> ImageRenderer<'a> {
    pub fn with_board(board: &'a Board) -> Self {
        Self { board }
    }

    pub fn layout(&self) -> Layout {
        let side_width = descriptions_width(self.board.desc_rows());
        let header_height = descriptions_width(self.board.desc_cols());
        let size = self.board.size();

        Layout {
            side_width,
            header_height,
            width: size + side_width,
            height: size + header_height,
        }
    }

    pub fn build_image(&self, cell_size: u32, solution: bool) -> Result<RgbImage> {
        if cell_size < font::MIN_CELL_SIZE {
            return Err(Error::InvalidRenderConfig(format!(
                "cell size must be at least {} pixels, got {}",
                font::MIN_CELL_SIZE,
                cell_size
            )));
        }

        let layout = self.layout();
        let width = layout.width as u32 * cell_size;
        let height = layout.height as u32 * cell_size;
        debug!(
            "rendering {}x{} puzzle onto a {}x{} canvas (solution: {})",
            self.board.size(),
            self.board.size(),
            width,
            height,
            solution
        );

        let mut canvas = RgbImage::from_pixel(width, height, WHITE);

        self.draw_clues(&mut canvas, &layout, cell_size);
        self.draw_grid(&mut canvas, &layout, cell_size, solution);

        Ok(canvas)
    }

    /// Render and write a PNG in one go.
    pub fn save<P: AsRef<Path>>(&self, path: P, cell_size: u32, solution: bool) -> Result<()> {
        let image = self.build_image(cell_size, solution)?;
        image.save(path).map_err(|err| match err {
            image::ImageError::IoError(io) => Error::Io(io),
            other => Error::Decode(other),
        })
    }

    /// Clue numbers hug the grid: the last number of every list sits in
    /// the margin cell adjacent to the grid's first row/column.
    fn draw_clues(&self, canvas: &mut RgbImage, layout: &Layout, cell_size: u32) {
        for (i, desc) in self.board.desc_rows().iter().enumerate() {
            let len = desc.vec.len();
            for (j, block) in desc.vec.iter().enumerate() {
                let cell_x = layout.side_width - len + j;
                let cell_y = layout.header_height + i;
                font::draw_number(
                    canvas,
                    block.0,
                    (cell_x as u32 * cell_size) as i64,
                    (cell_y as u32 * cell_size) as i64,
                    cell_size,
                    BLACK,
                );
            }
        }

        for (i, desc) in self.board.desc_cols().iter().enumerate() {
            let len = desc.vec.len();
            for (j, block) in desc.vec.iter().enumerate() {
                let cell_x = layout.side_width + i;
                let cell_y = layout.header_height - len + j;
                font::draw_number(
                    canvas,
                    block.0,
                    (cell_x as u32 * cell_size) as i64,
                    (cell_y as u32 * cell_size) as i64,
                    cell_size,
                    BLACK,
                );
            }
        }
    }

    fn draw_grid(&self, canvas: &mut RgbImage, layout: &Layout, cell_size: u32, solution: bool) {
        let size = self.board.size() as u32;
        let origin_x = layout.side_width as u32 * cell_size;
        let origin_y = layout.header_height as u32 * cell_size;

        if solution {
            for (i, row) in self.board.cells().iter().enumerate() {
                for (j, cell) in row.iter().enumerate() {
                    if !cell.is_filled() {
                        continue;
                    }

                    let rect = Rect::at(
                        (origin_x + j as u32 * cell_size) as i32,
                        (origin_y + i as u32 * cell_size) as i32,
                    )
                    .of_size(cell_size, cell_size);
                    draw_filled_rect_mut(canvas, rect, BLACK);
                }
            }
        }

        // N+1 lines per direction close the outer border; each line is
        // drawn one pixel inside its cell boundary so the last one
        // stays on the canvas
        for i in 0..=size {
            let x = (origin_x + i * cell_size - 1) as f32;
            draw_line_segment_mut(
                canvas,
                (x, origin_y as f32),
                (x, (origin_y + size * cell_size) as f32),
                GREY,
            );

            let y = (origin_y + i * cell_size - 1) as f32;
            draw_line_segment_mut(
                canvas,
                (origin_x as f32, y),
                ((origin_x + size * cell_size) as f32, y),
                GREY,
            );
        }
    }
}
