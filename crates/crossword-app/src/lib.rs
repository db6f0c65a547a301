//! Loading and rendering for the `crossword` command-line tool.

use std::{fs, path::Path};

use crossword_core::{Puzzle, Structure, WordList};
use image::ImageFormat;

pub use self::{error::*, render::*};

mod error;
mod font;
mod render;

/// Builds a puzzle from the text of a structure file and a word list.
///
/// # Errors
///
/// Returns an error if the structure is empty or its slots do not form a
/// valid puzzle.
pub fn parse_puzzle(structure: &str, words: &str) -> Result<Puzzle, AppError> {
    let structure: Structure = structure.parse()?;
    let Ok(words) = words.parse::<WordList>();
    let puzzle = Puzzle::from_structure(&structure, words)?;
    Ok(puzzle)
}

/// Reads a structure file and a word list from disk.
///
/// # Errors
///
/// Returns an error if either file cannot be read or the puzzle is invalid.
pub fn load_puzzle(structure: &Path, words: &Path) -> Result<Puzzle, AppError> {
    let structure_text = read(structure)?;
    let words_text = read(words)?;
    let puzzle = parse_puzzle(&structure_text, &words_text)?;
    log::debug!(
        "loaded {}x{} grid with {} slots and {} words",
        puzzle.width(),
        puzzle.height(),
        puzzle.variables().len(),
        puzzle.words().len()
    );
    Ok(puzzle)
}

/// Writes a rendered grid to `path`.
///
/// A path with a PNG, JPEG or BMP extension gets an image from
/// [`Grid::to_image`]; any other path gets the text grid.
///
/// # Errors
///
/// Returns an error if the file cannot be encoded or written.
pub fn write_grid(path: &Path, grid: &Grid) -> Result<(), AppError> {
    match ImageFormat::from_path(path) {
        Ok(format) if format.writing_enabled() => grid
            .to_image()
            .save_with_format(path, format)
            .map_err(|source| AppError::Image {
                path: path.to_owned(),
                source,
            }),
        _ => fs::write(path, grid.to_string()).map_err(|source| AppError::Write {
            path: path.to_owned(),
            source,
        }),
    }
}

fn read(path: &Path) -> Result<String, AppError> {
    fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_owned(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::{env, path::PathBuf, process};

    use super::*;

    fn solved_grid() -> Grid {
        let puzzle = parse_puzzle("___\n_##\n", "car\nca\n").unwrap();
        let solution = crossword_solver::solve(&puzzle).unwrap();
        Grid::from_solution(&solution)
    }

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("crossword-{}-{name}", process::id()))
    }

    #[test]
    fn test_parse_puzzle() {
        let puzzle = parse_puzzle("___\n_##\n_##\n", "car\n\nCat\n  ace  \n").unwrap();
        assert_eq!(puzzle.variables().len(), 2);
        let words: Vec<_> = puzzle.words().iter().map(|word| word.as_str()).collect();
        assert_eq!(words, ["CAR", "CAT", "ACE"]);
    }

    #[test]
    fn test_parse_empty_structure() {
        let err = parse_puzzle("\n\n", "car\n").unwrap_err();
        assert!(matches!(err, AppError::Structure(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let missing = PathBuf::from("this/file/does/not/exist.txt");
        let err = load_puzzle(&missing, &missing).unwrap_err();
        assert!(matches!(&err, AppError::Read { path, .. } if *path == missing));
        assert_eq!(
            err.to_string(),
            "failed to read this/file/does/not/exist.txt"
        );
    }

    #[test]
    fn test_write_png() {
        let grid = solved_grid();
        let path = temp_path("grid.png");

        write_grid(&path, &grid).unwrap();
        let image = image::open(&path).unwrap().to_rgb8();
        fs::remove_file(&path).unwrap();

        assert_eq!(image.dimensions(), (3 * CELL_SIZE, 2 * CELL_SIZE));
        assert_eq!(image, grid.to_image());
    }

    #[test]
    fn test_write_text() {
        let grid = solved_grid();
        let path = temp_path("grid.txt");

        write_grid(&path, &grid).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(text, "CAR\nA██\n");
    }
}
