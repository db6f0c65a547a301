//! Candidate words per variable, with checkpoints.

use std::collections::BTreeSet;

use crossword_core::{Puzzle, VariableId, WordId};

/// The candidate words of one variable, in word-id order.
pub type Domain = BTreeSet<WordId>;

/// A marker returned by [`DomainStore::checkpoint`].
///
/// Restoring a checkpoint undoes every removal made after it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Checkpoint(usize);

/// The working state of a solve: the remaining candidates of every variable.
///
/// Every removal is recorded on a trail. [`checkpoint`](Self::checkpoint)
/// marks the current trail position and [`restore`](Self::restore) re-inserts
/// everything removed since, so search can undo propagation without copying
/// the whole store.
///
/// # Examples
///
/// ```
/// use crossword_core::{Direction, Puzzle, Variable};
/// use crossword_solver::DomainStore;
///
/// let puzzle = Puzzle::new(
///     vec![Variable::new(0, 0, Direction::Across, 3)],
///     ["car", "ace"].into_iter().collect(),
/// )?;
/// let var = puzzle.variable_ids().next().unwrap();
/// let car = puzzle.word_id("car").unwrap();
///
/// let mut domains = DomainStore::new(&puzzle);
/// let checkpoint = domains.checkpoint();
/// domains.restrict_to(var, car);
/// assert_eq!(domains.size(var), 1);
///
/// domains.restore(checkpoint);
/// assert_eq!(domains.size(var), 2);
/// # Ok::<(), crossword_core::PuzzleError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainStore {
    domains: Vec<Domain>,
    trail: Vec<(VariableId, WordId)>,
}

impl DomainStore {
    /// Seeds every variable of `puzzle` with the full word list.
    #[must_use]
    pub fn new(puzzle: &Puzzle) -> Self {
        let all: Domain = puzzle.word_ids().collect();
        Self {
            domains: vec![all; puzzle.variables().len()],
            trail: vec![],
        }
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Returns `true` if the store tracks no variables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    /// Returns the remaining candidates of `var`.
    #[must_use]
    pub fn domain(&self, var: VariableId) -> &Domain {
        &self.domains[var.index()]
    }

    /// Returns the number of remaining candidates of `var`.
    #[must_use]
    pub fn size(&self, var: VariableId) -> usize {
        self.domains[var.index()].len()
    }

    /// Returns `true` if `word` is still a candidate for `var`.
    #[must_use]
    pub fn contains(&self, var: VariableId, word: WordId) -> bool {
        self.domains[var.index()].contains(&word)
    }

    /// Returns the sum of all domain sizes.
    #[must_use]
    pub fn total_candidates(&self) -> usize {
        self.domains.iter().map(BTreeSet::len).sum()
    }

    /// Returns the id of the first variable whose domain is empty.
    #[must_use]
    pub fn first_empty(&self) -> Option<VariableId> {
        self.domains
            .iter()
            .position(BTreeSet::is_empty)
            .map(VariableId::new)
    }

    /// Iterates over `(variable, domain)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &Domain)> {
        (0..self.domains.len()).map(VariableId::new).zip(&self.domains)
    }

    /// Removes `word` from the domain of `var`.
    ///
    /// Returns `true` if the word was present.
    pub fn remove(&mut self, var: VariableId, word: WordId) -> bool {
        let removed = self.domains[var.index()].remove(&word);
        if removed {
            self.trail.push((var, word));
        }
        removed
    }

    /// Keeps only the candidates of `var` for which `keep` returns `true`.
    ///
    /// Returns `true` if any candidate was removed.
    pub fn retain<F>(&mut self, var: VariableId, mut keep: F) -> bool
    where
        F: FnMut(WordId) -> bool,
    {
        let trail = &mut self.trail;
        let before = trail.len();
        self.domains[var.index()].retain(|&word| {
            let kept = keep(word);
            if !kept {
                trail.push((var, word));
            }
            kept
        });
        trail.len() != before
    }

    /// Reduces the domain of `var` to `word` alone.
    ///
    /// Returns `true` if anything was removed. The domain becomes empty if
    /// `word` was not a candidate.
    pub fn restrict_to(&mut self, var: VariableId, word: WordId) -> bool {
        self.retain(var, |candidate| candidate == word)
    }

    /// Marks the current state for a later [`restore`](Self::restore).
    #[must_use]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.trail.len())
    }

    /// Undoes every removal made since `checkpoint` was taken.
    ///
    /// Restoring an older checkpoint also undoes everything after newer
    /// ones. Restoring a checkpoint newer than the current state is a no-op.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        while self.trail.len() > checkpoint.0 {
            if let Some((var, word)) = self.trail.pop() {
                self.domains[var.index()].insert(word);
            }
        }
    }
}
