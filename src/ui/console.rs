/// Terminal console: the display port implementation used by the game.
///
/// Reads lines from any `BufRead` and writes through the `Renderer`, so the
/// binary wires it to stdin/stdout and tests wire it to in-memory buffers.
/// The re-prompt loops for unknown conditions and malformed letters live
/// here; the session only ever sees valid answers.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::domain::conditions::{Categories, DifficultyTable};
use crate::domain::frames::Frame;
use crate::sim::port::{DisplayPort, LetterInput, RoundStatus};
use crate::ui::input::{parse_condition, parse_letter, LineInput};
use crate::ui::renderer::Renderer;

const CATEGORY_TITLE: &str = "Choose a category";
const DIFFICULTY_TITLE: &str = "Choose a difficulty";
const UNKNOWN_CATEGORY: &str = "No such category. Please pick one from the list.";
const UNKNOWN_DIFFICULTY: &str = "No such difficulty. Please pick one from the list.";
const LETTER_PROMPT: &str = "Enter a letter (? for a hint): ";

pub struct TerminalConsole<R, W: Write> {
    input: LineInput<R>,
    renderer: Renderer<W>,
}

impl TerminalConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        TerminalConsole::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        TerminalConsole {
            input: LineInput::new(reader),
            renderer: Renderer::new(writer),
        }
    }

    /// Show the menu, then read until the answer is a listed name or the
    /// random token.
    fn choose(
        &mut self,
        title: &str,
        options: &[String],
        is_known: impl Fn(&str) -> bool,
        random_token: &str,
        unknown_msg: &str,
    ) -> io::Result<String> {
        let title = if random_token.is_empty() {
            format!("{title} (leave empty for a random one):")
        } else {
            format!("{title} (type '{random_token}' for a random one):")
        };
        self.renderer.menu(&title, options)?;
        loop {
            let answer = parse_condition(self.input.read_line()?);
            if answer == random_token || is_known(answer.as_str()) {
                return Ok(answer);
            }
            debug!(%answer, "rejected condition");
            self.renderer.warning(unknown_msg)?;
        }
    }
}

impl<R: BufRead, W: Write> DisplayPort for TerminalConsole<R, W> {
    fn choose_conditions(
        &mut self,
        categories: &Categories,
        difficulties: &DifficultyTable,
        random_token: &str,
    ) -> io::Result<(String, String)> {
        let category_names: Vec<String> = categories.iter().cloned().collect();
        let category = self.choose(
            CATEGORY_TITLE,
            &category_names,
            |name| categories.contains(name),
            random_token,
            UNKNOWN_CATEGORY,
        )?;

        let difficulty_lines: Vec<String> = difficulties
            .iter()
            .map(|(name, attempts)| format!("{name} ({attempts} attempts)"))
            .collect();
        let difficulty = self.choose(
            DIFFICULTY_TITLE,
            &difficulty_lines,
            |name| difficulties.contains_key(name),
            random_token,
            UNKNOWN_DIFFICULTY,
        )?;

        Ok((category, difficulty))
    }

    fn read_letter(&mut self) -> io::Result<LetterInput> {
        loop {
            self.renderer.prompt(LETTER_PROMPT)?;
            if let Some(input) = parse_letter(self.input.read_line()?) {
                return Ok(input);
            }
        }
    }

    fn show_hint(&mut self, hint: &str) -> io::Result<()> {
        self.renderer.hint(hint)
    }

    fn show_round_status(&mut self, status: &RoundStatus<'_>) -> io::Result<()> {
        self.renderer.round_status(status)
    }

    fn play_frames(&mut self, frames: &[Frame], delay: Duration) -> io::Result<()> {
        for frame in frames {
            self.renderer.animation_frame(frame)?;
            thread::sleep(delay);
        }
        Ok(())
    }
}
