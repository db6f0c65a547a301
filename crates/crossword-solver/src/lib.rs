//! Constraint-satisfaction solver for crossword fills.
//!
//! Each slot of a [`Puzzle`](crossword_core::Puzzle) is a variable whose
//! domain is a set of words. [`Solver`] narrows the domains with node and arc
//! consistency, then runs a heuristic backtracking search.
//!
//! # Examples
//!
//! ```
//! use crossword_core::{Puzzle, Structure, WordList};
//!
//! let structure: Structure = "___\n_##\n_##\n".parse()?;
//! let words: WordList = "car\ncat\nace\n".parse()?;
//! let puzzle = Puzzle::from_structure(&structure, words)?;
//!
//! let solution = crossword_solver::solve(&puzzle)?;
//! let mut words: Vec<_> = solution.iter().map(|(_, word)| word).collect();
//! words.sort_unstable();
//! assert_eq!(words, ["CAR", "CAT"]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{domain::*, search::Assignment, solver::*};

pub mod consistency;
mod domain;
pub mod search;
mod solver;

#[cfg(test)]
mod testing;
