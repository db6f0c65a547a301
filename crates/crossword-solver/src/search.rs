//! Heuristic backtracking search.
//!
//! The search assigns one variable at a time, picking the most constrained
//! variable first ([`select_unassigned_variable`]) and trying its least
//! constraining words first ([`order_domain_values`]). After each consistent
//! assignment it can maintain arc consistency on the neighbors of the
//! assigned variable, rejecting the word early when propagation fails.
//!
//! Search depth is bounded by the number of variables. Frames live on a heap
//! stack rather than the call stack.

use std::{
    cmp::Reverse,
    collections::{BTreeMap, HashSet},
    vec,
};

use crossword_core::{Puzzle, VariableId, WordId};

use crate::{
    Checkpoint, DomainStore, SolverOptions, SolverStats,
    consistency::{self, Arc, ConsistencyError},
};

/// A partial mapping from variables to words.
///
/// Iteration follows variable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    words: BTreeMap<VariableId, WordId>,
}

impl Assignment {
    /// Creates an empty assignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the word assigned to `var`, if any.
    #[must_use]
    pub fn get(&self, var: VariableId) -> Option<WordId> {
        self.words.get(&var).copied()
    }

    /// Returns `true` if `var` has a word.
    #[must_use]
    pub fn contains(&self, var: VariableId) -> bool {
        self.words.contains_key(&var)
    }

    /// Assigns `word` to `var`, returning the previous word.
    pub fn insert(&mut self, var: VariableId, word: WordId) -> Option<WordId> {
        self.words.insert(var, word)
    }

    /// Unassigns `var`, returning its word.
    pub fn remove(&mut self, var: VariableId) -> Option<WordId> {
        self.words.remove(&var)
    }

    /// Returns the number of assigned variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if nothing is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterates over `(variable, word)` pairs in variable order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, WordId)> {
        self.words.iter().map(|(&var, &word)| (var, word))
    }
}

impl FromIterator<(VariableId, WordId)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (VariableId, WordId)>>(iter: T) -> Self {
        Self {
            words: iter.into_iter().collect(),
        }
    }
}

/// Returns `true` if every variable of `puzzle` has a word.
#[must_use]
pub fn is_complete(assignment: &Assignment, puzzle: &Puzzle) -> bool {
    puzzle.variable_ids().all(|var| assignment.contains(var))
}

/// Returns `true` if the assigned words fit together.
///
/// The words must be pairwise distinct, each must have the length of its
/// variable, and assigned neighbors must agree at their shared cell. Only
/// the assignment is checked; domains are not consulted.
#[must_use]
pub fn is_consistent(assignment: &Assignment, puzzle: &Puzzle) -> bool {
    let mut used = HashSet::with_capacity(assignment.len());
    for (var, word) in assignment.iter() {
        if !used.insert(word) {
            return false;
        }
        if puzzle.word(word).len() != puzzle.variable(var).length() {
            return false;
        }
        for &neighbor in puzzle.neighbors(var) {
            let (Some(other), Some(overlap)) =
                (assignment.get(neighbor), puzzle.overlap(var, neighbor))
            else {
                continue;
            };
            if !overlap.agrees(puzzle.word(word), puzzle.word(other)) {
                return false;
            }
        }
    }
    true
}

/// Chooses the next variable to assign.
///
/// Picks the unassigned variable with the fewest remaining candidates, then
/// the one with the most neighbors, then the lowest id. Returns `None` when
/// every variable is assigned.
#[must_use]
pub fn select_unassigned_variable(
    assignment: &Assignment,
    domains: &DomainStore,
    puzzle: &Puzzle,
) -> Option<VariableId> {
    puzzle
        .variable_ids()
        .filter(|&var| !assignment.contains(var))
        .min_by_key(|&var| (domains.size(var), Reverse(puzzle.degree(var)), var))
}

/// Orders the candidates of `var`, least constraining first.
///
/// A candidate's cost is the number of values it would rule out across the
/// domains of the unassigned neighbors of `var`. Equal costs keep word-id
/// order.
#[must_use]
pub fn order_domain_values(
    var: VariableId,
    assignment: &Assignment,
    domains: &DomainStore,
    puzzle: &Puzzle,
) -> Vec<WordId> {
    let crossings: Vec<_> = puzzle
        .neighbors(var)
        .iter()
        .filter(|&&neighbor| !assignment.contains(neighbor))
        .filter_map(|&neighbor| Some((neighbor, puzzle.overlap(var, neighbor)?)))
        .collect();

    let mut ranked: Vec<(usize, WordId)> = domains
        .domain(var)
        .iter()
        .map(|&candidate| {
            let word = puzzle.word(candidate);
            let ruled_out = crossings
                .iter()
                .map(|&(neighbor, overlap)| {
                    domains
                        .domain(neighbor)
                        .iter()
                        .filter(|&&other| !overlap.agrees(word, puzzle.word(other)))
                        .count()
                })
                .sum();
            (ruled_out, candidate)
        })
        .collect();

    ranked.sort_by_key(|&(ruled_out, _)| ruled_out);
    ranked.into_iter().map(|(_, candidate)| candidate).collect()
}

/// Maintains arc consistency after assigning `word` to `var`.
///
/// Narrows the domain of `var` to `word` and propagates to its unassigned
/// neighbors. The caller restores the domains when it moves past `word`.
fn infer(
    var: VariableId,
    word: WordId,
    assignment: &Assignment,
    domains: &mut DomainStore,
    puzzle: &Puzzle,
) -> Result<(), ConsistencyError> {
    domains.restrict_to(var, word);
    let arcs = puzzle
        .neighbors(var)
        .iter()
        .filter(|&&neighbor| !assignment.contains(neighbor))
        .map(|&neighbor| Arc::new(neighbor, var));
    consistency::ac3_with_arcs(domains, puzzle, arcs)
}

/// One decision point of the search.
#[derive(Debug)]
struct Frame {
    variable: VariableId,
    candidates: vec::IntoIter<WordId>,
    checkpoint: Checkpoint,
}

impl Frame {
    fn new(
        variable: VariableId,
        assignment: &Assignment,
        domains: &DomainStore,
        puzzle: &Puzzle,
    ) -> Self {
        let candidates = order_domain_values(variable, assignment, domains, puzzle);
        log::trace!(
            "search: branching on {variable} with {} candidates",
            candidates.len()
        );
        Self {
            variable,
            candidates: candidates.into_iter(),
            checkpoint: domains.checkpoint(),
        }
    }
}

/// Extends `assignment` to a complete, consistent assignment.
///
/// Returns `true` on success, leaving the solution in `assignment` and the
/// narrowed domains in `domains`. Returns `false` when no extension exists;
/// `assignment` and `domains` are then back in their initial state.
///
/// Every time the search moves past a candidate it unassigns the variable and
/// restores the domains to the checkpoint taken before that candidate was
/// tried, whether or not inference succeeded.
pub fn backtrack(
    assignment: &mut Assignment,
    domains: &mut DomainStore,
    puzzle: &Puzzle,
    options: &SolverOptions,
    stats: &mut SolverStats,
) -> bool {
    let Some(first) = select_unassigned_variable(assignment, domains, puzzle) else {
        return is_consistent(assignment, puzzle);
    };
    let mut stack = vec![Frame::new(first, assignment, domains, puzzle)];

    while let Some(frame) = stack.last_mut() {
        let var = frame.variable;
        assignment.remove(var);
        domains.restore(frame.checkpoint);

        let Some(word) = frame.candidates.next() else {
            log::trace!("search: {var} exhausted, backtracking");
            stack.pop();
            stats.backtracks += 1;
            continue;
        };

        stats.assignments += 1;
        assignment.insert(var, word);
        if !is_consistent(assignment, puzzle) {
            stats.rejections += 1;
            continue;
        }
        if options.inference() {
            if let Err(err) = infer(var, word, assignment, domains, puzzle) {
                log::trace!("search: {var} = {word} rejected: {err}");
                stats.inference_failures += 1;
                continue;
            }
        }

        match select_unassigned_variable(assignment, domains, puzzle) {
            Some(next) => stack.push(Frame::new(next, assignment, domains, puzzle)),
            None => return true,
        }
    }

    false
}
