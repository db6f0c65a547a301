//! Node and arc consistency.
//!
//! [`enforce_node_consistency`] applies the unary constraint (word length).
//! [`ac3`] and [`ac3_with_arcs`] propagate the binary constraints (letters
//! agree where slots cross) until every remaining candidate has support in
//! every crossing slot, or a domain runs dry.

use std::collections::{HashSet, VecDeque};

use crossword_core::{Puzzle, VariableId};

use crate::DomainStore;

/// Errors reported by arc consistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConsistencyError {
    /// Propagation removed the last candidate of a variable.
    #[display("domain of {variable} became empty")]
    EmptyDomain {
        /// The variable left without candidates.
        variable: VariableId,
    },
}

/// A directed constraint: every candidate of `x` needs support in `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arc {
    /// The variable whose domain is revised.
    pub x: VariableId,
    /// The variable providing support.
    pub y: VariableId,
}

impl Arc {
    /// Creates a new arc.
    #[must_use]
    pub const fn new(x: VariableId, y: VariableId) -> Self {
        Self { x, y }
    }
}

impl From<(VariableId, VariableId)> for Arc {
    fn from((x, y): (VariableId, VariableId)) -> Self {
        Self::new(x, y)
    }
}

/// FIFO worklist that never holds the same arc twice.
#[derive(Debug, Default)]
struct ArcQueue {
    queue: VecDeque<Arc>,
    queued: HashSet<Arc>,
}

impl ArcQueue {
    fn push(&mut self, arc: Arc) {
        if self.queued.insert(arc) {
            self.queue.push_back(arc);
        }
    }

    fn pop(&mut self) -> Option<Arc> {
        let arc = self.queue.pop_front()?;
        self.queued.remove(&arc);
        Some(arc)
    }
}

impl FromIterator<Arc> for ArcQueue {
    fn from_iter<T: IntoIterator<Item = Arc>>(iter: T) -> Self {
        let mut queue = Self::default();
        for arc in iter {
            queue.push(arc);
        }
        queue
    }
}

/// Removes every candidate whose length differs from its variable's length.
///
/// Never fails; an emptied domain is left for later stages to report.
pub fn enforce_node_consistency(domains: &mut DomainStore, puzzle: &Puzzle) {
    for var in puzzle.variable_ids() {
        let length = puzzle.variable(var).length();
        domains.retain(var, |word| puzzle.word(word).len() == length);
    }
    log::debug!(
        "node consistency: {} candidates remain",
        domains.total_candidates()
    );
}

/// Makes `x` arc consistent with `y`.
///
/// Removes from the domain of `x` every candidate whose letter at the shared
/// cell matches no candidate of `y`. Returns `true` if the domain of `x`
/// changed; variables that do not cross are left alone.
pub fn revise(domains: &mut DomainStore, puzzle: &Puzzle, x: VariableId, y: VariableId) -> bool {
    let Some(overlap) = puzzle.overlap(x, y) else {
        return false;
    };

    let supported: HashSet<char> = domains
        .domain(y)
        .iter()
        .filter_map(|&word| puzzle.word(word).letter(overlap.second))
        .collect();

    domains.retain(x, |word| {
        puzzle
            .word(word)
            .letter(overlap.first)
            .is_some_and(|c| supported.contains(&c))
    })
}

/// Enforces arc consistency over every pair of crossing variables.
///
/// # Errors
///
/// Returns [`ConsistencyError::EmptyDomain`] as soon as a domain becomes
/// empty. The store is left in its partially revised state.
pub fn ac3(domains: &mut DomainStore, puzzle: &Puzzle) -> Result<(), ConsistencyError> {
    ac3_with_arcs(domains, puzzle, puzzle.arcs().into_iter().map(Arc::from))
}

/// Enforces arc consistency starting from the given arcs.
///
/// Whenever revising `(x, y)` shrinks `x`, the arcs `(z, x)` for every other
/// neighbor `z` of `x` are queued again. Only the final domain contents are
/// guaranteed, not the order of eliminations.
///
/// # Errors
///
/// Returns [`ConsistencyError::EmptyDomain`] as soon as a domain becomes
/// empty. The store is left in its partially revised state.
pub fn ac3_with_arcs<I>(
    domains: &mut DomainStore,
    puzzle: &Puzzle,
    arcs: I,
) -> Result<(), ConsistencyError>
where
    I: IntoIterator<Item = Arc>,
{
    let mut queue: ArcQueue = arcs.into_iter().collect();

    while let Some(Arc { x, y }) = queue.pop() {
        if !revise(domains, puzzle, x, y) {
            continue;
        }
        if domains.domain(x).is_empty() {
            log::trace!("ac3: domain of {x} wiped out by {y}");
            return Err(ConsistencyError::EmptyDomain { variable: x });
        }
        for &z in puzzle.neighbors(x) {
            if z != y {
                queue.push(Arc::new(z, x));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crossword_core::{Direction, Structure, WordList};
    use proptest::prelude::*;

    use super::*;
    use crate::testing;

    fn texts(puzzle: &Puzzle, domains: &DomainStore, var: VariableId) -> Vec<String> {
        domains
            .domain(var)
            .iter()
            .map(|&w| puzzle.word(w).to_string())
            .collect()
    }

    #[test]
    fn test_node_consistency_filters_by_length() {
        let puzzle = testing::puzzle(
            "
____
_###
_###
",
            &["ab", "abc", "abcd", "xyz"],
        );
        let across = testing::id(&puzzle, 0, 0, Direction::Across);
        let down = testing::id(&puzzle, 0, 0, Direction::Down);

        let mut domains = DomainStore::new(&puzzle);
        enforce_node_consistency(&mut domains, &puzzle);

        assert_eq!(texts(&puzzle, &domains, across), ["abcd"]);
        assert_eq!(texts(&puzzle, &domains, down), ["abc", "xyz"]);
    }

    #[test]
    fn test_node_consistency_can_empty_a_domain() {
        let puzzle = testing::two_slot_puzzle(&["ab", "abcd"]);
        let mut domains = DomainStore::new(&puzzle);
        enforce_node_consistency(&mut domains, &puzzle);
        assert_eq!(domains.total_candidates(), 0);
    }

    #[test]
    fn test_revise_removes_unsupported() {
        let puzzle = testing::two_slot_puzzle(&["car", "ace", "dog"]);
        let (across, down) = testing::two_slot_ids(&puzzle);
        let mut domains = DomainStore::new(&puzzle);

        assert!(revise(&mut domains, &puzzle, across, down));
        // dog[1] = 'o' starts no word
        assert_eq!(texts(&puzzle, &domains, across), ["car", "ace"]);
        assert_eq!(domains.size(down), 3);

        assert!(!revise(&mut domains, &puzzle, across, down));
    }

    #[test]
    fn test_revise_without_overlap_is_noop() {
        let puzzle = testing::puzzle("___\n###\n___\n", &["abc", "xyz"]);
        let top = testing::id(&puzzle, 0, 0, Direction::Across);
        let bottom = testing::id(&puzzle, 2, 0, Direction::Across);
        let mut domains = DomainStore::new(&puzzle);

        assert!(!revise(&mut domains, &puzzle, top, bottom));
        assert_eq!(domains.total_candidates(), 4);
    }

    #[test]
    fn test_ac3_reaches_fixpoint() {
        let puzzle = testing::two_slot_puzzle(&["car", "ace", "dog"]);
        let (across, down) = testing::two_slot_ids(&puzzle);
        let mut domains = DomainStore::new(&puzzle);

        enforce_node_consistency(&mut domains, &puzzle);
        ac3(&mut domains, &puzzle).unwrap();

        assert_eq!(texts(&puzzle, &domains, across), ["car", "ace"]);
        assert_eq!(texts(&puzzle, &domains, down), ["car", "ace"]);
    }

    #[test]
    fn test_ac3_propagates_through_chain() {
        // top - middle - bottom: fixing `top` must reach `bottom` through `middle`
        let puzzle = testing::puzzle(
            "
___
#_#
#__
",
            &["abc", "xyz", "bcd", "yqe", "dq", "eq"],
        );
        let top = testing::id(&puzzle, 0, 0, Direction::Across);
        let middle = testing::id(&puzzle, 0, 1, Direction::Down);
        let bottom = testing::id(&puzzle, 2, 1, Direction::Across);

        let mut domains = DomainStore::new(&puzzle);
        enforce_node_consistency(&mut domains, &puzzle);
        let abc = puzzle.word_id("abc").unwrap();
        domains.restrict_to(top, abc);

        ac3(&mut domains, &puzzle).unwrap();
        assert_eq!(texts(&puzzle, &domains, top), ["abc"]);
        assert_eq!(texts(&puzzle, &domains, middle), ["bcd"]);
        assert_eq!(texts(&puzzle, &domains, bottom), ["dq"]);
    }

    #[test]
    fn test_ac3_fails_when_compatible_words_have_wrong_length() {
        // across (0, 0) length 3 meets down (0, 2) length 4 at index 2 / 0.
        // "tie" and "goose" start with the letters the down slot needs, but
        // node consistency keeps neither for it.
        let puzzle = testing::puzzle(
            "
___
##_
##_
##_
",
            &["cat", "dog", "tie", "goose", "bird", "fish"],
        );
        let across = testing::id(&puzzle, 0, 0, Direction::Across);
        let down = testing::id(&puzzle, 0, 2, Direction::Down);
        assert_eq!(puzzle.variable(down).length(), 4);

        let mut domains = DomainStore::new(&puzzle);
        enforce_node_consistency(&mut domains, &puzzle);
        assert_eq!(texts(&puzzle, &domains, across), ["cat", "dog", "tie"]);
        assert_eq!(texts(&puzzle, &domains, down), ["bird", "fish"]);

        let err = ac3(&mut domains, &puzzle).unwrap_err();
        let ConsistencyError::EmptyDomain { variable } = err;
        assert!(domains.domain(variable).is_empty());
        assert!(variable == across || variable == down);
    }

    #[test]
    fn test_ac3_with_arcs_only_revises_given_arcs() {
        let puzzle = testing::two_slot_puzzle(&["car", "ace", "dog"]);
        let (across, down) = testing::two_slot_ids(&puzzle);
        let mut domains = DomainStore::new(&puzzle);

        ac3_with_arcs(&mut domains, &puzzle, [Arc::new(down, across)]).unwrap();
        assert_eq!(texts(&puzzle, &domains, down), ["car", "ace"]);
        // `down` changed, but `across` has no other neighbor to requeue
        assert_eq!(domains.size(across), 3);
    }

    #[test]
    fn test_ac3_with_no_arcs_succeeds() {
        let puzzle = testing::two_slot_puzzle(&["car"]);
        let mut domains = DomainStore::new(&puzzle);
        ac3_with_arcs(&mut domains, &puzzle, []).unwrap();
        assert_eq!(domains.total_candidates(), 2);
    }

    #[test]
    fn test_arc_queue_dedupes() {
        let a = VariableId::new(0);
        let b = VariableId::new(1);
        let mut queue: ArcQueue = [Arc::new(a, b), Arc::new(a, b), Arc::new(b, a)]
            .into_iter()
            .collect();

        assert_eq!(queue.pop(), Some(Arc::new(a, b)));
        queue.push(Arc::new(b, a));
        assert_eq!(queue.pop(), Some(Arc::new(b, a)));
        assert_eq!(queue.pop(), None);
    }

    fn grid_and_words() -> impl Strategy<Value = (Vec<Vec<bool>>, Vec<String>)> {
        (
            prop::collection::vec(prop::collection::vec(any::<bool>(), 2..5), 2..5),
            prop::collection::vec("[abc]{2,4}", 0..24),
        )
    }

    proptest! {
        #[test]
        fn prop_node_consistency_matches_lengths((rows, words) in grid_and_words()) {
            let structure = Structure::from_rows(&rows);
            let words: WordList = words.iter().map(String::as_str).collect();
            let puzzle = Puzzle::from_structure(&structure, words).unwrap();

            let mut domains = DomainStore::new(&puzzle);
            enforce_node_consistency(&mut domains, &puzzle);

            for (var, domain) in domains.iter() {
                let length = puzzle.variable(var).length();
                for &word in domain {
                    prop_assert_eq!(puzzle.word(word).len(), length);
                }
            }
        }

        #[test]
        fn prop_ac3_leaves_every_candidate_supported((rows, words) in grid_and_words()) {
            let structure = Structure::from_rows(&rows);
            let words: WordList = words.iter().map(String::as_str).collect();
            let puzzle = Puzzle::from_structure(&structure, words).unwrap();

            let mut domains = DomainStore::new(&puzzle);
            enforce_node_consistency(&mut domains, &puzzle);
            let result = ac3(&mut domains, &puzzle);

            match result {
                Ok(()) => {
                    for (x, y) in puzzle.arcs() {
                        let overlap = puzzle.overlap(x, y).unwrap();
                        for &a in domains.domain(x) {
                            let supported = domains
                                .domain(y)
                                .iter()
                                .any(|&b| overlap.agrees(puzzle.word(a), puzzle.word(b)));
                            prop_assert!(supported);
                        }
                    }
                }
                Err(ConsistencyError::EmptyDomain { variable }) => {
                    prop_assert!(domains.domain(variable).is_empty());
                }
            }
        }
    }
}
