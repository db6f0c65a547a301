//! The solver entry point with its options, statistics and results.

use std::fmt::{self, Display};

use crossword_core::{Puzzle, Variable, VariableId};

use crate::{
    Assignment, DomainStore,
    consistency::{self, ConsistencyError},
    search,
};

/// Why a puzzle could not be filled.
///
/// Both variants are expected outcomes, not faults in the solver.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    derive_more::Display,
    derive_more::Error,
    derive_more::IsVariant,
)]
pub enum NoSolution {
    /// Node or arc consistency emptied a domain before any search took place.
    #[display("no solution: no word fits {variable}")]
    Unsatisfiable {
        /// The variable left without candidates.
        variable: VariableId,
    },
    /// Every branch of the search failed.
    #[display("no solution: search exhausted")]
    Exhausted,
}

impl From<ConsistencyError> for NoSolution {
    fn from(err: ConsistencyError) -> Self {
        match err {
            ConsistencyError::EmptyDomain { variable } => Self::Unsatisfiable { variable },
        }
    }
}

/// Settings for [`Solver`].
///
/// # Examples
///
/// ```
/// use crossword_solver::SolverOptions;
///
/// let options = SolverOptions::default();
/// assert!(options.inference());
///
/// let options = options.with_inference(false);
/// assert!(!options.inference());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOptions {
    inference: bool,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverOptions {
    /// Creates the default options: inference enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self { inference: true }
    }

    /// Enables or disables inference during search.
    ///
    /// Inference maintains arc consistency around each newly assigned
    /// variable. It prunes the search but never changes whether a solution
    /// exists.
    #[must_use]
    pub const fn with_inference(mut self, inference: bool) -> Self {
        self.inference = inference;
        self
    }

    /// Returns `true` if inference is enabled.
    #[must_use]
    pub const fn inference(&self) -> bool {
        self.inference
    }
}

/// Counters collected while solving.
///
/// # Examples
///
/// ```
/// use crossword_solver::{Solver, SolverStats};
/// # use crossword_core::{Direction, Puzzle, Variable};
/// # let puzzle = Puzzle::new(
/// #     vec![Variable::new(0, 0, Direction::Across, 3)],
/// #     ["car"].into_iter().collect(),
/// # )?;
///
/// let solver = Solver::default();
/// let mut stats = SolverStats::default();
/// let _ = solver.solve_with_stats(&puzzle, &mut stats);
/// assert_eq!(stats.assignments(), 1);
/// # Ok::<(), crossword_core::PuzzleError>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub(crate) assignments: usize,
    pub(crate) rejections: usize,
    pub(crate) inference_failures: usize,
    pub(crate) backtracks: usize,
}

impl SolverStats {
    /// Returns the number of words tentatively assigned.
    #[must_use]
    pub fn assignments(&self) -> usize {
        self.assignments
    }

    /// Returns the number of assignments rejected as inconsistent.
    #[must_use]
    pub fn rejections(&self) -> usize {
        self.rejections
    }

    /// Returns the number of assignments rejected by inference.
    #[must_use]
    pub fn inference_failures(&self) -> usize {
        self.inference_failures
    }

    /// Returns the number of times a variable ran out of candidates.
    #[must_use]
    pub fn backtracks(&self) -> usize {
        self.backtracks
    }
}

impl Display for SolverStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "assignments: {}, rejections: {}, inference failures: {}, backtracks: {}",
            self.assignments, self.rejections, self.inference_failures, self.backtracks
        )
    }
}

/// A complete, consistent fill of a puzzle.
#[derive(Debug, Clone)]
pub struct Solution<'p> {
    puzzle: &'p Puzzle,
    assignment: Assignment,
}

impl<'p> Solution<'p> {
    /// Returns the puzzle this solution fills.
    #[must_use]
    pub fn puzzle(&self) -> &'p Puzzle {
        self.puzzle
    }

    /// Returns the underlying assignment.
    #[must_use]
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Returns the word placed in `var`.
    #[must_use]
    pub fn word(&self, var: VariableId) -> Option<&'p str> {
        let word = self.assignment.get(var)?;
        Some(self.puzzle.word(word).as_str())
    }

    /// Returns the word placed in the slot equal to `variable`.
    #[must_use]
    pub fn word_for(&self, variable: &Variable) -> Option<&'p str> {
        self.word(self.puzzle.id_of(variable)?)
    }

    /// Iterates over `(variable, word)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (&'p Variable, &'p str)> + '_ {
        let puzzle = self.puzzle;
        self.assignment
            .iter()
            .map(move |(var, word)| (puzzle.variable(var), puzzle.word(word).as_str()))
    }
}

/// Fills crosswords by constraint satisfaction.
///
/// Solving runs in three stages on a fresh [`DomainStore`]: node consistency,
/// arc consistency over every crossing, then backtracking search.
///
/// # Examples
///
/// ```
/// use crossword_core::{Direction, Puzzle, Variable};
/// use crossword_solver::Solver;
///
/// let across = Variable::new(0, 0, Direction::Across, 3);
/// let down = Variable::new(0, 1, Direction::Down, 3);
/// let puzzle = Puzzle::new(vec![across, down], ["car", "ace", "dog"].into_iter().collect())?;
///
/// let solution = Solver::default().solve(&puzzle)?;
/// assert_eq!(solution.word_for(&across), Some("car"));
/// assert_eq!(solution.word_for(&down), Some("ace"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Solver {
    options: SolverOptions,
}

impl Solver {
    /// Creates a solver with the given options.
    #[must_use]
    pub fn new(options: SolverOptions) -> Self {
        Self { options }
    }

    /// Fills `puzzle`.
    ///
    /// # Errors
    ///
    /// Returns [`NoSolution`] if no complete, consistent fill exists.
    pub fn solve<'p>(&self, puzzle: &'p Puzzle) -> Result<Solution<'p>, NoSolution> {
        let mut stats = SolverStats::default();
        self.solve_with_stats(puzzle, &mut stats)
    }

    /// Fills `puzzle`, adding to `stats`.
    ///
    /// # Errors
    ///
    /// Returns [`NoSolution`] if no complete, consistent fill exists.
    pub fn solve_with_stats<'p>(
        &self,
        puzzle: &'p Puzzle,
        stats: &mut SolverStats,
    ) -> Result<Solution<'p>, NoSolution> {
        let mut domains = DomainStore::new(puzzle);
        let assignment = self.solve_with_domains(puzzle, &mut domains, stats)?;
        Ok(Solution { puzzle, assignment })
    }

    /// Fills `puzzle` starting from the candidates in `domains`.
    ///
    /// `domains` must belong to `puzzle`. On success it holds the domains as
    /// narrowed by the search.
    ///
    /// # Errors
    ///
    /// Returns [`NoSolution::Unsatisfiable`] if node or arc consistency
    /// empties a domain, or [`NoSolution::Exhausted`] if the search fails.
    pub fn solve_with_domains(
        &self,
        puzzle: &Puzzle,
        domains: &mut DomainStore,
        stats: &mut SolverStats,
    ) -> Result<Assignment, NoSolution> {
        debug_assert_eq!(domains.len(), puzzle.variables().len());

        consistency::enforce_node_consistency(domains, puzzle);
        if let Some(variable) = domains.first_empty() {
            log::debug!("node consistency: no word fits {variable}");
            return Err(NoSolution::Unsatisfiable { variable });
        }
        consistency::ac3(domains, puzzle)?;
        log::debug!(
            "arc consistency: {} candidates remain",
            domains.total_candidates()
        );

        let mut assignment = Assignment::new();
        let found = search::backtrack(&mut assignment, domains, puzzle, &self.options, stats);
        log::debug!("search finished: found={found}, {stats}");

        if found {
            Ok(assignment)
        } else {
            Err(NoSolution::Exhausted)
        }
    }
}

/// Fills `puzzle` with the default options.
///
/// # Errors
///
/// Returns [`NoSolution`] if no complete, consistent fill exists.
pub fn solve(puzzle: &Puzzle) -> Result<Solution<'_>, NoSolution> {
    Solver::default().solve(puzzle)
}
