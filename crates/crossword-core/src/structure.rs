//! The layout of open and blocked cells.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::{Direction, Variable};

/// Errors returned when parsing a [`Structure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum StructureError {
    /// The input has no rows.
    #[display("structure has no rows")]
    Empty,
}

/// A rectangular grid of open and blocked cells.
///
/// # Text format
///
/// Each line is a row. `_` marks an open cell; any other character marks a
/// blocked cell. Rows shorter than the widest row are padded with blocked
/// cells, and blank lines before the first row or after the last row are
/// ignored.
///
/// # Examples
///
/// ```
/// use crossword_core::{Direction, Structure};
///
/// let structure: Structure = "
/// ___
/// _#_
/// ___
/// "
/// .parse()?;
///
/// assert_eq!((structure.height(), structure.width()), (3, 3));
/// assert!(!structure.is_open(1, 1));
/// assert_eq!(structure.variables().len(), 4);
/// # Ok::<(), crossword_core::StructureError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Structure {
    width: usize,
    height: usize,
    open: Vec<bool>,
}

impl Structure {
    /// Creates a structure from rows of open (`true`) and blocked cells.
    ///
    /// Short rows are padded with blocked cells.
    #[must_use]
    pub fn from_rows<R>(rows: &[R]) -> Self
    where
        R: AsRef<[bool]>,
    {
        let width = rows.iter().map(|row| row.as_ref().len()).max().unwrap_or(0);
        let height = rows.len();
        let mut open = vec![false; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, &cell) in row.as_ref().iter().enumerate() {
                open[y * width + x] = cell;
            }
        }
        Self {
            width,
            height,
            open,
        }
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

    /// Returns `true` if the cell is inside the grid and open.
    #[must_use]
    pub fn is_open(&self, row: usize, column: usize) -> bool {
        row < self.height && column < self.width && self.open[row * self.width + column]
    }

    /// Extracts every slot of the grid.
    ///
    /// A slot is a maximal run of at least two open cells in one direction.
    /// The result is sorted by the variable order.
    #[must_use]
    pub fn variables(&self) -> Vec<Variable> {
        let mut variables = vec![];
        for row in 0..self.height {
            for column in 0..self.width {
                if !self.is_open(row, column) {
                    continue;
                }
                for direction in Direction::ALL {
                    let starts_run = match direction {
                        Direction::Across => column == 0 || !self.is_open(row, column - 1),
                        Direction::Down => row == 0 || !self.is_open(row - 1, column),
                    };
                    if !starts_run {
                        continue;
                    }
                    let (dr, dc) = direction.step();
                    let length = (0..)
                        .take_while(|&k| self.is_open(row + dr * k, column + dc * k))
                        .count();
                    if length > 1 {
                        variables.push(Variable::new(row, column, direction, length));
                    }
                }
            }
        }
        variables
    }
}

impl FromStr for Structure {
    type Err = StructureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s.lines().map(|line| line.trim_end_matches('\r')).collect();
        let first = lines.iter().position(|line| !line.trim().is_empty());
        let last = lines.iter().rposition(|line| !line.trim().is_empty());
        let (Some(first), Some(last)) = (first, last) else {
            return Err(StructureError::Empty);
        };

        let rows: Vec<Vec<bool>> = lines[first..=last]
            .iter()
            .map(|line| line.chars().map(|c| c == '_').collect())
            .collect();
        Ok(Self::from_rows(&rows))
    }
}

impl Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for column in 0..self.width {
                let c = if self.is_open(row, column) { '_' } else { '#' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
