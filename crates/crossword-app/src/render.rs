use std::fmt::{self, Display, Write as _};

use crossword_core::{Puzzle, Variable};
use crossword_solver::Solution;
use image::{Rgb, RgbImage};

use crate::font;

const BLOCKED: char = '█';

/// Side length in pixels of one cell in a grid image.
pub const CELL_SIZE: u32 = 100;
const CELL_BORDER: u32 = 2;
const GLYPH_SCALE: u32 = 10;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Blocked,
    Open(Option<char>),
}

/// A printable crossword grid.
///
/// Open cells show their letter, or a space when no word covers them yet.
/// Blocked cells are drawn as `█`.
///
/// # Examples
///
/// ```
/// use crossword_app::{Grid, parse_puzzle};
///
/// let puzzle = parse_puzzle("___\n_##\n", "car\nca\n")?;
/// let solution = crossword_solver::solve(&puzzle)?;
///
/// let grid = Grid::from_solution(&solution);
/// assert_eq!(grid.to_string(), "CAR\nA██\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an unfilled grid for `puzzle`.
    ///
    /// A cell is open if the puzzle's structure says so or if any slot covers
    /// it.
    #[must_use]
    pub fn new(puzzle: &Puzzle) -> Self {
        let width = puzzle.width();
        let height = puzzle.height();
        let mut grid = Self {
            width,
            height,
            cells: vec![Cell::Blocked; width * height],
        };

        if let Some(structure) = puzzle.structure() {
            for row in 0..height {
                for column in 0..width {
                    if structure.is_open(row, column) {
                        grid.cells[row * width + column] = Cell::Open(None);
                    }
                }
            }
        }
        for variable in puzzle.variables() {
            for (row, column) in variable.cells() {
                grid.cells[row * width + column] = Cell::Open(None);
            }
        }
        grid
    }

    /// Creates a grid filled with the words of `solution`.
    #[must_use]
    pub fn from_solution(solution: &Solution<'_>) -> Self {
        let mut grid = Self::new(solution.puzzle());
        for (variable, word) in solution.iter() {
            grid.place(variable, word);
        }
        grid
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Draws the grid as an image of [`CELL_SIZE`] pixel cells.
    ///
    /// Open cells are white with their letter in black, blocked cells and
    /// the borders between cells are black.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_image(&self) -> RgbImage {
        let width = self.width as u32;
        let height = self.height as u32;
        let mut image = RgbImage::from_pixel(width * CELL_SIZE, height * CELL_SIZE, BLACK);

        for (index, cell) in self.cells.iter().enumerate() {
            let Cell::Open(letter) = *cell else {
                continue;
            };
            let left = (index % self.width) as u32 * CELL_SIZE;
            let top = (index / self.width) as u32 * CELL_SIZE;

            for y in top + CELL_BORDER..top + CELL_SIZE - CELL_BORDER {
                for x in left + CELL_BORDER..left + CELL_SIZE - CELL_BORDER {
                    image.put_pixel(x, y, WHITE);
                }
            }

            let Some(letter) = letter else {
                continue;
            };
            let glyph_left = left + (CELL_SIZE - font::GLYPH_WIDTH * GLYPH_SCALE) / 2;
            let glyph_top = top + (CELL_SIZE - font::GLYPH_HEIGHT * GLYPH_SCALE) / 2;
            for (column, row) in font::pixels(letter) {
                let x0 = glyph_left + column * GLYPH_SCALE;
                let y0 = glyph_top + row * GLYPH_SCALE;
                for y in y0..y0 + GLYPH_SCALE {
                    for x in x0..x0 + GLYPH_SCALE {
                        image.put_pixel(x, y, BLACK);
                    }
                }
            }
        }
        image
    }

    /// Writes `word` into the cells of `variable`.
    pub fn place(&mut self, variable: &Variable, word: &str) {
        for ((row, column), letter) in variable.cells().zip(word.chars()) {
            if let Some(cell) = self.cells.get_mut(row * self.width + column) {
                *cell = Cell::Open(Some(letter));
            }
        }
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                let ch = match cell {
                    Cell::Blocked => BLOCKED,
                    Cell::Open(letter) => letter.unwrap_or(' '),
                };
                f.write_char(ch)?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossword_core::Direction;

    use super::*;
    use crate::parse_puzzle;

    #[test]
    fn test_unfilled_grid() {
        let puzzle = parse_puzzle("#__\n___\n", "").unwrap();
        let grid = Grid::new(&puzzle);
        assert_eq!(grid.to_string(), "█  \n   \n");
    }

    #[test]
    fn test_lone_open_cell_stays_open() {
        // the open cell at (0, 0) is not part of any slot
        let puzzle = parse_puzzle("_#\n#_\n", "").unwrap();
        assert!(puzzle.variables().is_empty());
        assert_eq!(Grid::new(&puzzle).to_string(), "_█\n█_\n".replace('_', " "));
    }

    #[test]
    fn test_place_word() {
        let puzzle = parse_puzzle("___\n_##\n_##\n", "").unwrap();
        let mut grid = Grid::new(&puzzle);
        grid.place(&Variable::new(0, 0, Direction::Down, 3), "DOG");
        assert_eq!(grid.to_string(), "D  \nO██\nG██\n");
    }

    #[test]
    fn test_solution_grid() {
        let puzzle = parse_puzzle(
            "
___
_#_
___
",
            "cat\ncow\ntoe\nwoe\n",
        )
        .unwrap();
        let solution = crossword_solver::solve(&puzzle).unwrap();
        let grid = Grid::from_solution(&solution);

        assert_eq!((grid.width(), grid.height()), (3, 3));
        let text = grid.to_string();
        assert!(text == "CAT\nO█O\nWOE\n" || text == "COW\nA█O\nTOE\n");
    }

    #[test]
    fn test_grid_without_structure() {
        let puzzle = crossword_core::Puzzle::new(
            vec![
                Variable::new(0, 0, Direction::Across, 3),
                Variable::new(0, 1, Direction::Down, 3),
            ],
            ["car", "ace"].into_iter().collect(),
        )
        .unwrap();
        let solution = crossword_solver::solve(&puzzle).unwrap();
        let grid = Grid::from_solution(&solution);
        assert_eq!(grid.to_string(), "car\n█c█\n█e█\n");
    }

    #[test]
    fn test_image_layout() {
        let puzzle = parse_puzzle("___\n_##\n", "").unwrap();
        let mut grid = Grid::new(&puzzle);
        grid.place(&Variable::new(0, 0, Direction::Across, 3), "TI");
        let image = grid.to_image();

        assert_eq!(image.dimensions(), (3 * CELL_SIZE, 2 * CELL_SIZE));
        // border, open interior, blocked cell
        assert_eq!(image.get_pixel(0, 0), &BLACK);
        assert_eq!(image.get_pixel(5, 5), &WHITE);
        assert_eq!(image.get_pixel(150, 150), &BLACK);
        // the stem of "T" and "I" runs down the middle of their cells
        assert_eq!(image.get_pixel(50, 50), &BLACK);
        assert_eq!(image.get_pixel(150, 50), &BLACK);
        // the third cell has no letter
        assert_eq!(image.get_pixel(250, 50), &WHITE);
        assert_eq!(image.get_pixel(50, 150), &WHITE);
    }
}
