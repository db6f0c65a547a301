//! Grid slots and their orientation.

use std::{
    cmp::Ordering,
    fmt::{self, Display},
    hash::{Hash, Hasher},
};

/// The orientation of a slot in the grid.
///
/// `Across` sorts before `Down`, which fixes the order of two slots sharing
/// the same starting cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum Direction {
    /// Left to right along a row.
    #[display("across")]
    Across,
    /// Top to bottom along a column.
    #[display("down")]
    Down,
}

impl Direction {
    /// Both directions, in sort order.
    pub const ALL: [Self; 2] = [Self::Across, Self::Down];

    /// Returns the `(row, column)` step taken from one letter to the next.
    #[must_use]
    pub const fn step(self) -> (usize, usize) {
        match self {
            Self::Across => (0, 1),
            Self::Down => (1, 0),
        }
    }
}

/// A slot in the grid that receives one word.
///
/// A variable is identified by its starting cell and direction. The length
/// does not take part in equality, hashing or ordering: within one puzzle
/// two slots never start at the same cell in the same direction.
///
/// Variables are totally ordered by `(row, column, direction)`. Every
/// tie-break over variables in the solver relies on this order.
///
/// # Examples
///
/// ```
/// use crossword_core::{Direction, Variable};
///
/// let across = Variable::new(0, 0, Direction::Across, 3);
/// let down = Variable::new(0, 1, Direction::Down, 3);
///
/// assert_eq!(across.cell(1), (0, 1));
/// assert_eq!(down.cell(2), (2, 1));
/// assert!(across < down);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Variable {
    row: usize,
    column: usize,
    direction: Direction,
    length: usize,
}

impl Variable {
    /// Creates a new variable starting at `(row, column)`.
    #[must_use]
    pub const fn new(row: usize, column: usize, direction: Direction, length: usize) -> Self {
        Self {
            row,
            column,
            direction,
            length,
        }
    }

    /// Returns the row of the first letter.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Returns the column of the first letter.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Returns the direction the word is written in.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the number of letters the slot holds.
    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    /// Returns the `(row, column)` of the letter at `index`.
    ///
    /// The index is not checked against the length.
    #[must_use]
    pub const fn cell(&self, index: usize) -> (usize, usize) {
        let (dr, dc) = self.direction.step();
        (self.row + dr * index, self.column + dc * index)
    }

    /// Returns an iterator over the cells of the slot, first letter first.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let this = *self;
        (0..this.length).map(move |index| this.cell(index))
    }

    fn key(&self) -> (usize, usize, Direction) {
        (self.row, self.column, self.direction)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {} : {}",
            self.row, self.column, self.direction, self.length
        )
    }
}
