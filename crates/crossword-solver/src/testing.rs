//! Puzzle fixtures shared by the unit tests.

use crossword_core::{Direction, Puzzle, Structure, Variable, VariableId, WordList};

/// Builds the two-slot puzzle used throughout the tests.
///
/// An across slot at `(0, 0)` and a down slot at `(0, 1)`, both of length 3,
/// crossing at index 1 of the across word and index 0 of the down word.
#[track_caller]
pub(crate) fn two_slot_puzzle(words: &[&str]) -> Puzzle {
    Puzzle::new(
        vec![
            Variable::new(0, 0, Direction::Across, 3),
            Variable::new(0, 1, Direction::Down, 3),
        ],
        words.iter().copied().collect(),
    )
    .unwrap()
}

/// Returns the `(across, down)` ids of [`two_slot_puzzle`].
#[track_caller]
pub(crate) fn two_slot_ids(puzzle: &Puzzle) -> (VariableId, VariableId) {
    (
        id(puzzle, 0, 0, Direction::Across),
        id(puzzle, 0, 1, Direction::Down),
    )
}

/// Builds a puzzle from a structure string and a word list.
///
/// Words are kept as written; unlike a parsed [`WordList`] they are not
/// upper-cased.
#[track_caller]
pub(crate) fn puzzle(structure: &str, words: &[&str]) -> Puzzle {
    let structure: Structure = structure.parse().unwrap();
    let words: WordList = words.iter().copied().collect();
    Puzzle::from_structure(&structure, words).unwrap()
}

/// Looks up a variable id by its start and direction.
#[track_caller]
pub(crate) fn id(puzzle: &Puzzle, row: usize, column: usize, direction: Direction) -> VariableId {
    // length is not part of variable identity
    puzzle
        .id_of(&Variable::new(row, column, direction, 0))
        .unwrap()
}
