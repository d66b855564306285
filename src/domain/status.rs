/// Guess progress: the partially revealed word.
///
/// Cells start hidden and are only changed by `reveal`. The word counts
/// as guessed once every cell has been revealed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuessStatus {
    cells: Vec<char>,
    revealed: usize,
}

/// Placeholder for a hidden cell.
pub const HIDDEN: char = '_';

impl GuessStatus {
    pub fn new(word: &str) -> Self {
        GuessStatus {
            cells: vec![HIDDEN; word.chars().count()],
            revealed: 0,
        }
    }

    /// Show `letter` at each of `positions`.
    ///
    /// Positions come from `Answer::positions_of`, so they are in range and
    /// not yet revealed. An out-of-range position is a caller bug and panics.
    pub fn reveal(&mut self, letter: char, positions: &[usize]) {
        for &p in positions {
            self.cells[p] = letter;
            self.revealed += 1;
        }
    }

    pub fn is_guessed(&self) -> bool {
        self.revealed == self.cells.len()
    }

    pub fn cells(&self) -> &[char] {
        &self.cells
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// The word as displayed, hidden cells included.
    pub fn display(&self) -> String {
        self.cells.iter().collect()
    }
}
