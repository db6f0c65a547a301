use std::{io, path::PathBuf};

use crossword_core::{PuzzleError, StructureError};

/// Errors reported by the `crossword` binary.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum AppError {
    /// A file could not be read.
    #[display("failed to read {}", path.display())]
    #[from(skip)]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The output file could not be written.
    #[display("failed to write {}", path.display())]
    #[from(skip)]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The output image could not be encoded or written.
    #[display("failed to write image {}", path.display())]
    #[from(skip)]
    Image {
        /// The file being written.
        path: PathBuf,
        /// The underlying encoder error.
        source: image::ImageError,
    },
    /// The structure file is malformed.
    #[display("invalid structure: {_0}")]
    Structure(#[from] StructureError),
    /// The structure and word list do not form a valid puzzle.
    #[display("invalid puzzle: {_0}")]
    Puzzle(#[from] PuzzleError),
}
