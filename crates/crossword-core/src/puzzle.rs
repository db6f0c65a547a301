//! The immutable description of a crossword to fill.

use std::collections::HashMap;

use crate::{Structure, Variable, Word, WordList};

/// Index of a variable inside its [`Puzzle`].
///
/// Ids follow the variable order, so comparing ids compares variables.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
#[display("v{_0}")]
pub struct VariableId(usize);

impl VariableId {
    /// Creates an id from a raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Index of a word inside the word list of a [`Puzzle`].
///
/// Ids follow the insertion order of the word list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display,
)]
#[display("w{_0}")]
pub struct WordId(usize);

impl WordId {
    /// Creates an id from a raw index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The letter indices two crossing variables must agree on.
///
/// For `puzzle.overlap(x, y)`, `first` indexes into the word of `x` and
/// `second` into the word of `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Overlap {
    /// Index of the shared cell in the first variable.
    pub first: usize,
    /// Index of the shared cell in the second variable.
    pub second: usize,
}

impl Overlap {
    /// Creates a new overlap.
    #[must_use]
    pub const fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }

    /// Returns the same overlap seen from the other variable.
    #[must_use]
    pub const fn reversed(self) -> Self {
        Self {
            first: self.second,
            second: self.first,
        }
    }

    /// Returns `true` if the two words agree at the shared cell.
    ///
    /// A word too short to reach the cell never agrees.
    #[must_use]
    pub fn agrees(self, first: &Word, second: &Word) -> bool {
        match (first.letter(self.first), second.letter(self.second)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Errors that can occur when building a [`Puzzle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PuzzleError {
    /// A variable has no cells.
    #[display("variable {variable} has length 0")]
    EmptyVariable {
        /// The offending variable.
        variable: Variable,
    },
    /// Two variables start at the same cell in the same direction with different lengths.
    #[display("variables {first} and {second} occupy the same slot")]
    ConflictingVariables {
        /// The first variable.
        first: Variable,
        /// The second variable.
        second: Variable,
    },
    /// Two variables share more than one cell.
    #[display("variables {first} and {second} share more than one cell")]
    AmbiguousOverlap {
        /// The first variable.
        first: Variable,
        /// The second variable.
        second: Variable,
    },
}

/// A crossword to fill: its slots, how they cross, and the candidate words.
///
/// A `Puzzle` is immutable once built. Variables are stored sorted by the
/// variable order and words in insertion order, so iteration over either is
/// deterministic.
///
/// # Examples
///
/// ```
/// use crossword_core::{Direction, Overlap, Puzzle, Variable};
///
/// let puzzle = Puzzle::new(
///     vec![
///         Variable::new(0, 0, Direction::Across, 3),
///         Variable::new(0, 1, Direction::Down, 3),
///     ],
///     ["car", "ace", "dog"].into_iter().collect(),
/// )?;
///
/// let across = puzzle.id_of(&Variable::new(0, 0, Direction::Across, 3)).unwrap();
/// let down = puzzle.id_of(&Variable::new(0, 1, Direction::Down, 3)).unwrap();
/// assert_eq!(puzzle.overlap(across, down), Some(Overlap::new(1, 0)));
/// assert_eq!(puzzle.neighbors(across), [down]);
/// # Ok::<(), crossword_core::PuzzleError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Puzzle {
    variables: Vec<Variable>,
    words: Vec<Word>,
    overlaps: HashMap<(VariableId, VariableId), Overlap>,
    neighbors: Vec<Vec<VariableId>>,
    structure: Option<Structure>,
}

impl Puzzle {
    /// Builds a puzzle from its slots and candidate words.
    ///
    /// Overlaps and neighbors are derived from the cells each variable
    /// covers. Exact duplicate variables are merged.
    ///
    /// # Errors
    ///
    /// - [`PuzzleError::EmptyVariable`] if a variable has length 0.
    /// - [`PuzzleError::ConflictingVariables`] if two variables share a start
    ///   and direction but differ in length.
    /// - [`PuzzleError::AmbiguousOverlap`] if two variables share more than
    ///   one cell.
    pub fn new(mut variables: Vec<Variable>, words: WordList) -> Result<Self, PuzzleError> {
        if let Some(&variable) = variables.iter().find(|v| v.length() == 0) {
            return Err(PuzzleError::EmptyVariable { variable });
        }

        variables.sort();
        if let Some(pair) = variables
            .windows(2)
            .find(|pair| pair[0] == pair[1] && pair[0].length() != pair[1].length())
        {
            return Err(PuzzleError::ConflictingVariables {
                first: pair[0],
                second: pair[1],
            });
        }
        variables.dedup();

        let mut cells: HashMap<(usize, usize), Vec<(VariableId, usize)>> = HashMap::new();
        for (i, var) in variables.iter().enumerate() {
            for (k, cell) in var.cells().enumerate() {
                cells.entry(cell).or_default().push((VariableId(i), k));
            }
        }

        let mut overlaps = HashMap::new();
        for occupants in cells.values() {
            for (a, &(x, xi)) in occupants.iter().enumerate() {
                for &(y, yi) in &occupants[a + 1..] {
                    if overlaps.insert((x, y), Overlap::new(xi, yi)).is_some() {
                        let (first, second) = (variables[x.0], variables[y.0]);
                        return Err(PuzzleError::AmbiguousOverlap { first, second });
                    }
                    overlaps.insert((y, x), Overlap::new(yi, xi));
                }
            }
        }

        let mut neighbors = vec![vec![]; variables.len()];
        for &(x, y) in overlaps.keys() {
            neighbors[x.0].push(y);
        }
        for list in &mut neighbors {
            list.sort_unstable();
        }

        Ok(Self {
            variables,
            words: words.into_vec(),
            overlaps,
            neighbors,
            structure: None,
        })
    }

    /// Builds a puzzle from a grid layout and candidate words.
    ///
    /// # Errors
    ///
    /// Never fails for slots extracted from a [`Structure`]; the error type is
    /// shared with [`Puzzle::new`].
    pub fn from_structure(structure: &Structure, words: WordList) -> Result<Self, PuzzleError> {
        let mut puzzle = Self::new(structure.variables(), words)?;
        puzzle.structure = Some(structure.clone());
        Ok(puzzle)
    }

    /// Returns the layout this puzzle was built from, if any.
    #[must_use]
    pub fn structure(&self) -> Option<&Structure> {
        self.structure.as_ref()
    }

    /// Returns the number of rows spanned by the puzzle.
    #[must_use]
    pub fn height(&self) -> usize {
        let covered = self
            .variables
            .iter()
            .filter_map(|v| v.cells().last())
            .map(|(row, _)| row + 1)
            .max()
            .unwrap_or(0);
        self.structure.as_ref().map_or(covered, Structure::height)
    }

    /// Returns the number of columns spanned by the puzzle.
    #[must_use]
    pub fn width(&self) -> usize {
        let covered = self
            .variables
            .iter()
            .filter_map(|v| v.cells().last())
            .map(|(_, column)| column + 1)
            .max()
            .unwrap_or(0);
        self.structure.as_ref().map_or(covered, Structure::width)
    }

    /// Returns all variables in variable order.
    #[must_use]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Returns the ids of all variables in ascending order.
    pub fn variable_ids(&self) -> impl ExactSizeIterator<Item = VariableId> + use<> {
        (0..self.variables.len()).map(VariableId)
    }

    /// Returns the variable with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this puzzle.
    #[must_use]
    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.0]
    }

    /// Looks up the id of a variable.
    #[must_use]
    pub fn id_of(&self, variable: &Variable) -> Option<VariableId> {
        self.variables.binary_search(variable).ok().map(VariableId)
    }

    /// Returns all candidate words in insertion order.
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Returns the ids of all words in ascending order.
    pub fn word_ids(&self) -> impl ExactSizeIterator<Item = WordId> + use<> {
        (0..self.words.len()).map(WordId)
    }

    /// Returns the word with the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id does not belong to this puzzle.
    #[must_use]
    pub fn word(&self, id: WordId) -> &Word {
        &self.words[id.0]
    }

    /// Looks up the id of a word by its text.
    #[must_use]
    pub fn word_id(&self, text: &str) -> Option<WordId> {
        self.words.iter().position(|w| w.as_str() == text).map(WordId)
    }

    /// Returns the letter indices `x` and `y` must agree on, if they cross.
    ///
    /// A variable never overlaps itself.
    #[must_use]
    pub fn overlap(&self, x: VariableId, y: VariableId) -> Option<Overlap> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// Returns the variables sharing a cell with `x`, in ascending order.
    #[must_use]
    pub fn neighbors(&self, x: VariableId) -> &[VariableId] {
        &self.neighbors[x.0]
    }

    /// Returns the number of neighbors of `x`.
    #[must_use]
    pub fn degree(&self, x: VariableId) -> usize {
        self.neighbors[x.0].len()
    }

    /// Returns every ordered pair of crossing variables.
    ///
    /// Pairs are sorted, so the result is deterministic.
    #[must_use]
    pub fn arcs(&self) -> Vec<(VariableId, VariableId)> {
        self.variable_ids()
            .flat_map(|x| self.neighbors(x).iter().map(move |&y| (x, y)))
            .collect()
    }
}
