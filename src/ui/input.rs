/// Line-based input for the terminal console.
///
/// The game reads whole lines (the player presses Enter after each answer):
///   - Category/difficulty prompts take the trimmed, lowercased line.
///   - The letter prompt takes a line holding exactly one alphabetic
///     character or `?`. Anything else is rejected so the caller re-prompts.
///
/// End of input is reported as `UnexpectedEof`; the session treats it as a
/// failed read and stops.

use std::io::{self, BufRead};

use crate::domain::word::normalize_letter;
use crate::sim::port::{LetterInput, HINT_KEY};

pub struct LineInput<R> {
    reader: R,
    buf: String,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        LineInput {
            reader,
            buf: String::with_capacity(64),
        }
    }

    /// Next line without its line ending.
    pub fn read_line(&mut self) -> io::Result<&str> {
        self.buf.clear();
        if self.reader.read_line(&mut self.buf)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(self.buf.trim_end_matches(&['\n', '\r'][..]))
    }
}

/// Normalize a category/difficulty answer.
pub fn parse_condition(line: &str) -> String {
    line.trim().to_lowercase()
}

/// Parse a letter-prompt line. `None` means "ask again".
pub fn parse_letter(line: &str) -> Option<LetterInput> {
    let mut chars = line.trim().chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    if c == HINT_KEY {
        Some(LetterInput::Hint)
    } else if c.is_alphabetic() {
        Some(LetterInput::Letter(normalize_letter(c)))
    } else {
        None
    }
}
