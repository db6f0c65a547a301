//! Core data structures for crossword filling.
//!
//! This crate describes a crossword as a constraint satisfaction problem
//! without solving it. It is the input side of `crossword-solver`.
//!
//! # Overview
//!
//! - [`Variable`] and [`Direction`]: a slot in the grid that receives one word.
//! - [`Word`] and [`WordList`]: candidate words in a fixed insertion order.
//! - [`Structure`]: the layout of open and blocked cells, parsed from text.
//! - [`Puzzle`]: the immutable problem: variables, words, [`Overlap`]s and
//!   neighbors, addressed through [`VariableId`] and [`WordId`].
//!
//! # Examples
//!
//! ```
//! use crossword_core::{Puzzle, Structure, WordList};
//!
//! let structure: Structure = "
//! ___
//! #_#
//! "
//! .parse()?;
//! let words: WordList = "cat\nat\n".parse().unwrap();
//!
//! let puzzle = Puzzle::from_structure(&structure, words)?;
//! assert_eq!(puzzle.variables().len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{puzzle::*, structure::*, variable::*, word_list::*};

mod puzzle;
mod structure;
mod variable;
mod word_list;
