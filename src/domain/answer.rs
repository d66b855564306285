/// The hidden answer of a session.
///
/// Holds the chosen word, its category and difficulty labels, and a
/// letter → positions index built once, so resolving a guess is a
/// single lookup.

use std::collections::HashMap;

use crate::domain::word::WordEntry;

#[derive(Clone, Debug)]
pub struct Answer {
    entry: WordEntry,
    category: String,
    difficulty: String,
    /// Zero-based character positions, ascending.
    positions: HashMap<char, Vec<usize>>,
}

impl Answer {
    pub fn new(entry: WordEntry, category: &str, difficulty: &str) -> Self {
        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (i, c) in entry.word().chars().enumerate() {
            positions.entry(c).or_default().push(i);
        }
        Answer {
            entry,
            category: category.to_string(),
            difficulty: difficulty.to_string(),
            positions,
        }
    }

    /// Positions of `letter` in the word; empty if absent.
    pub fn positions_of(&self, letter: char) -> &[usize] {
        self.positions.get(&letter).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn word(&self) -> &str {
        self.entry.word()
    }

    pub fn hint(&self) -> &str {
        self.entry.hint()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    pub fn len(&self) -> usize {
        self.entry.len()
    }
}
