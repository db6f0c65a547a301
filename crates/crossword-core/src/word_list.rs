//! Candidate words.

use std::{
    collections::HashSet,
    convert::Infallible,
    fmt::{self, Display},
    str::FromStr,
};

/// A candidate word.
///
/// Lengths and letter indices count `char`s, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Word {
    text: Box<str>,
    letters: Box<[char]>,
}

impl Word {
    /// Creates a word from its text.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            text: text.into(),
            letters: text.chars().collect(),
        }
    }

    /// Returns the word as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the number of letters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Returns `true` if the word has no letters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Returns the letter at `index`, if any.
    #[must_use]
    pub fn letter(&self, index: usize) -> Option<char> {
        self.letters.get(index).copied()
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.text, f)
    }
}

/// An ordered list of distinct candidate words.
///
/// Words keep the order in which they were first inserted; later duplicates
/// are dropped. This order is the deterministic order the solver uses for
/// domains and for breaking ties between words.
///
/// Only parsing a word list file upper-cases its words. Collecting from
/// string slices keeps them exactly as given, so `"car"` and `"CAR"` are
/// distinct words there.
///
/// # Examples
///
/// ```
/// use crossword_core::WordList;
///
/// let words: WordList = "car\nace\n\ncar\n  dog \n".parse().unwrap();
/// let texts: Vec<_> = words.iter().map(|w| w.as_str()).collect();
/// assert_eq!(texts, ["CAR", "ACE", "DOG"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordList {
    words: Vec<Word>,
}

impl WordList {
    /// Creates an empty word list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the words in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Word> {
        self.words.iter()
    }

    pub(crate) fn into_vec(self) -> Vec<Word> {
        self.words
    }
}

impl<'a> FromIterator<&'a str> for WordList {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut seen = HashSet::new();
        let words = iter
            .into_iter()
            .filter(|text| seen.insert(*text))
            .map(Word::new)
            .collect();
        Self { words }
    }
}

impl<'a> IntoIterator for &'a WordList {
    type Item = &'a Word;
    type IntoIter = std::slice::Iter<'a, Word>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromStr for WordList {
    type Err = Infallible;

    /// Parses a word list file: one word per line.
    ///
    /// Lines are trimmed and upper-cased, blank lines are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper: Vec<String> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_uppercase)
            .collect();
        Ok(upper.iter().map(String::as_str).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_counts_chars() {
        let word = Word::new("ÉTÉ");
        assert_eq!(word.len(), 3);
        assert_eq!(word.letter(1), Some('T'));
        assert_eq!(word.letter(3), None);
    }

    #[test]
    fn test_collect_keeps_first_occurrence() {
        let words: WordList = ["dog", "car", "dog", "ace", "car"].into_iter().collect();
        let texts: Vec<_> = words.iter().map(Word::as_str).collect();
        assert_eq!(texts, ["dog", "car", "ace"]);
    }

    #[test]
    fn test_collect_is_case_sensitive() {
        let words: WordList = ["car", "CAR"].into_iter().collect();
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn test_only_parsing_upper_cases() {
        let collected: WordList = ["car", "Ace"].into_iter().collect();
        let parsed: WordList = "car\nAce\n".parse().unwrap();

        let collected: Vec<_> = collected.iter().map(Word::as_str).collect();
        let parsed: Vec<_> = parsed.iter().map(Word::as_str).collect();
        assert_eq!(collected, ["car", "Ace"]);
        assert_eq!(parsed, ["CAR", "ACE"]);
    }

    #[test]
    fn test_parse_normalizes_lines() {
        let words: WordList = "  one\r\ntwo\n\n One\nthree  \n".parse().unwrap();
        let texts: Vec<_> = words.iter().map(Word::as_str).collect();
        assert_eq!(texts, ["ONE", "TWO", "THREE"]);
    }

    #[test]
    fn test_parse_empty() {
        let words: WordList = "\n \n".parse().unwrap();
        assert!(words.is_empty());
    }
}
