/// Display port: everything the session engine needs from the player's
/// terminal.
///
/// The engine only calls these methods and never touches stdin/stdout
/// itself. `ui::console::TerminalConsole` is the real implementation;
/// tests drive the engine with a scripted double.

use std::collections::BTreeSet;
use std::io;
use std::time::Duration;

use crate::domain::conditions::{Categories, DifficultyTable};
use crate::domain::frames::Frame;

/// Typed input accepted at the letter prompt.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LetterInput {
    Letter(char),
    /// `?`, asks for the hint.
    Hint,
}

/// Character the player types to ask for the hint.
pub const HINT_KEY: char = '?';

/// Snapshot of a round shown before each guess.
#[derive(Clone, Copy, Debug)]
pub struct RoundStatus<'a> {
    pub category: &'a str,
    pub difficulty: &'a str,
    pub frame: &'a Frame,
    pub revealed: &'a [char],
    pub attempts_remaining: usize,
    pub used_letters: &'a BTreeSet<char>,
}

pub trait DisplayPort {
    /// Ask for category and difficulty. Each returned value is either a
    /// known name or `random_token`; re-prompting on anything else is the
    /// port's job.
    fn choose_conditions(
        &mut self,
        categories: &Categories,
        difficulties: &DifficultyTable,
        random_token: &str,
    ) -> io::Result<(String, String)>;

    /// Block until the player enters a letter or the hint key.
    fn read_letter(&mut self) -> io::Result<LetterInput>;

    fn show_hint(&mut self, hint: &str) -> io::Result<()>;

    fn show_round_status(&mut self, status: &RoundStatus<'_>) -> io::Result<()>;

    /// Show `frames` one after another, pausing `delay` after each.
    fn play_frames(&mut self, frames: &[Frame], delay: Duration) -> io::Result<()>;
}
