//! Fills a crossword grid from a word list.
//!
//! # Usage
//!
//! ```sh
//! cargo run --bin crossword -- data/structure0.txt data/words0.txt
//! ```
//!
//! Write the filled grid to a file and show search statistics:
//!
//! ```sh
//! cargo run --bin crossword -- data/structure1.txt data/words1.txt output.png --stats
//! ```
//!
//! Set `RUST_LOG=debug` to trace the solver.

use std::{error::Error as _, path::PathBuf, process::ExitCode, time::Instant};

use clap::Parser;
use crossword_app::{AppError, Grid};
use crossword_solver::{Solver, SolverOptions, SolverStats};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Grid structure: `_` marks an open cell, anything else a blocked one.
    #[arg(value_name = "STRUCTURE")]
    structure: PathBuf,

    /// Word list, one word per line.
    #[arg(value_name = "WORDS")]
    words: PathBuf,

    /// File the filled grid is written to: an image for `.png`, `.jpg` or
    /// `.bmp` paths, text otherwise.
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Skip arc consistency after each assignment.
    #[arg(long)]
    no_inference: bool,

    /// Print search statistics and the elapsed time.
    #[arg(long)]
    stats: bool,
}

fn main() -> ExitCode {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, AppError> {
    let puzzle = crossword_app::load_puzzle(&args.structure, &args.words)?;

    let options = SolverOptions::default().with_inference(!args.no_inference);
    let solver = Solver::new(options);
    let mut stats = SolverStats::default();

    let start = Instant::now();
    let result = solver.solve_with_stats(&puzzle, &mut stats);
    let elapsed = start.elapsed();
    log::info!("solved in {elapsed:.3?}");

    if args.stats {
        println!("{stats}");
        println!("elapsed: {elapsed:.3?}");
    }

    let solution = match result {
        Ok(solution) => solution,
        Err(err) => {
            log::debug!("{err}");
            println!("No solution.");
            return Ok(ExitCode::FAILURE);
        }
    };

    let grid = Grid::from_solution(&solution);
    print!("{grid}");
    if let Some(output) = &args.output {
        crossword_app::write_grid(output, &grid)?;
        log::info!("wrote {}", output.display());
    }

    Ok(ExitCode::SUCCESS)
}
