use std::fmt;

use rand::Rng;

use crate::error::{Error, Result};
use crate::utils::transpose;

/// Binary state of a single grid cell
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Cell {
    Empty,
    Filled,
}

impl Cell {
    pub fn is_filled(self) -> bool {
        self == Cell::Filled
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Cell::Empty => '.',
            Cell::Filled => '#',
        };
        write!(f, "{}", symbol)
    }
}

/// A single clue: the length of one maximal run of filled cells
#[derive(Debug, PartialEq, Eq, Hash, Default, Clone, Copy)]
pub struct Block(pub usize);

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The clue-list for one row or column.
///
/// Blocks preserve the physical order of runs (left-to-right for rows,
/// top-to-bottom for columns). An all-empty line is represented by the
/// canonical single block `[0]`, never by an empty list.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct Description {
    pub vec: Vec<Block>,
}

impl Description {
    /// Run-length encode a line of cells into its clue-list.
    pub fn from_line(line: &[Cell]) -> Self {
        let mut vec = Vec::new();
        let mut count = 0;

        for cell in line {
            if cell.is_filled() {
                count += 1;
            } else if count > 0 {
                vec.push(Block(count));
                count = 0;
            }
        }

        if count > 0 {
            vec.push(Block(count));
        }

        if vec.is_empty() {
            vec.push(Block(0));
        }

        Self { vec }
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocks: Vec<_> = self.vec.iter().map(ToString::to_string).collect();
        write!(f, "{}", blocks.join(" "))
    }
}

/// A square nonogram puzzle: the filled-cell grid and the row/column
/// clues derived from it.
///
/// Clues are computed once inside every constructor and the board is
/// immutable afterwards, so the grid and its clues can never disagree.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Board {
    cells: Vec<Vec<Cell>>,
    desc_rows: Vec<Description>,
    desc_cols: Vec<Description>,
}

impl Board {
    /// Generate a `size`x`size` board where every cell is filled
    /// independently with probability `fill_prob`.
    pub fn randomized<R: Rng>(size: usize, fill_prob: f64, rng: &mut R) -> Result<Self> {
        if size == 0 {
            return Err(Error::InvalidDimension("cannot generate a 0x0 board".into()));
        }

        let cells = (0..size)
            .map(|_| {
                (0..size)
                    .map(|_| {
                        if rng.gen::<f64>() < fill_prob {
                            Cell::Filled
                        } else {
                            Cell::Empty
                        }
                    })
                    .collect()
            })
            .collect();

        Self::from_cells(cells)
    }

    /// Build a board from a pre-sampled cell matrix.
    /// The matrix must be square with at least one row.
    pub fn from_cells(cells: Vec<Vec<Cell>>) -> Result<Self> {
        let size = cells.len();
        if size == 0 {
            return Err(Error::InvalidDimension("empty cell matrix".into()));
        }

        if let Some(bad) = cells.iter().find(|row| row.len() != size) {
            return Err(Error::InvalidGrid(format!(
                "expected {0}x{0} matrix, found a row of {1} cells",
                size,
                bad.len()
            )));
        }

        let desc_rows = derive_clues(&cells);
        let transposed = transpose(&cells).map_err(Error::InvalidGrid)?;
        let desc_cols = derive_clues(&transposed);

        Ok(Self {
            cells,
            desc_rows,
            desc_cols,
        })
    }

    /// Sample a decoded image into a board: grayscale, Lanczos resize
    /// down to `resolution` cells along the longer side, then threshold
    /// (luma strictly below `threshold` becomes a filled cell).
    pub fn from_image(
        image: &image::DynamicImage,
        resolution: u32,
        threshold: u8,
    ) -> Result<Self> {
        let cells = crate::import::sample_cells(image, resolution, threshold)?;
        Self::from_cells(cells)
    }

    pub fn size(&self) -> usize {
        self.desc_rows.len()
    }

    pub fn cells(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn descriptions(&self, rows: bool) -> &[Description] {
        if rows {
            &self.desc_rows
        } else {
            &self.desc_cols
        }
    }

    pub fn desc_rows(&self) -> &[Description] {
        &self.desc_rows
    }

    pub fn desc_cols(&self) -> &[Description] {
        &self.desc_cols
    }

    pub fn get_row(&self, index: usize) -> &[Cell] {
        &self.cells[index]
    }

    pub fn get_column(&self, index: usize) -> Vec<Cell> {
        self.cells.iter().map(|row| row[index]).collect()
    }
}

#[cfg(feature = "threaded")]
fn derive_clues(lines: &[Vec<Cell>]) -> Vec<Description> {
    use rayon::prelude::*;

    // `collect` on an indexed parallel iterator keeps line order
    lines
        .par_iter()
        .map(|line| Description::from_line(line))
        .collect()
}

#[cfg(not(feature = "threaded"))]
fn derive_clues(lines: &[Vec<Cell>]) -> Vec<Description> {
    lines
        .iter()
        .map(|line| Description::from_line(line))
        .collect()
}
