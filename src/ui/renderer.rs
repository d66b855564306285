/// Presentation layer: styled line output for the terminal console.
///
/// All output is queued with crossterm's `queue!` and flushed once per
/// screen update, so a round status or an animation frame appears in one
/// piece. Works on any `Write`, which keeps it testable against a buffer.

use std::collections::BTreeSet;
use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::domain::frames::Frame;
use crate::sim::port::RoundStatus;

const BORDER: &str = "----------------------------------------------------------------";

const FRAME_COLOR: Color = Color::Cyan;
const LABEL_COLOR: Color = Color::DarkGrey;
const WORD_COLOR: Color = Color::White;
const HINT_COLOR: Color = Color::Yellow;
const WARN_COLOR: Color = Color::Red;

pub struct Renderer<W: Write> {
    writer: W,
}

impl<W: Write> Renderer<W> {
    pub fn new(writer: W) -> Self {
        Renderer { writer }
    }

    #[cfg(test)]
    pub fn writer(&self) -> &W {
        &self.writer
    }

    // ── Prompts ──

    /// Title line followed by one indented entry per option.
    pub fn menu(&mut self, title: &str, options: &[String]) -> io::Result<()> {
        queue!(
            self.writer,
            SetAttribute(Attribute::Bold),
            Print(title),
            SetAttribute(Attribute::Reset),
            Print("\n")
        )?;
        for option in options {
            queue!(self.writer, Print("  "), Print(option), Print("\n"))?;
        }
        self.writer.flush()
    }

    /// Prompt text with no trailing newline; the cursor waits after it.
    pub fn prompt(&mut self, text: &str) -> io::Result<()> {
        queue!(self.writer, Print(text))?;
        self.writer.flush()
    }

    pub fn warning(&mut self, text: &str) -> io::Result<()> {
        self.colored_line(WARN_COLOR, text)?;
        self.writer.flush()
    }

    pub fn hint(&mut self, hint: &str) -> io::Result<()> {
        self.colored_line(HINT_COLOR, &format!("Hint: {hint}"))?;
        self.writer.flush()
    }

    // ── Round status ──

    pub fn round_status(&mut self, status: &RoundStatus<'_>) -> io::Result<()> {
        queue!(self.writer, Print(BORDER), Print("\n\n"))?;
        self.labeled("Category", status.category)?;
        self.labeled("Difficulty", status.difficulty)?;
        queue!(self.writer, Print("\n"))?;
        self.queue_frame(status.frame)?;
        queue!(self.writer, Print("\n"))?;
        self.labeled("Used letters", &format_used(status.used_letters))?;
        self.labeled("Attempts left", &status.attempts_remaining.to_string())?;
        queue!(
            self.writer,
            Print("\n"),
            SetForegroundColor(WORD_COLOR),
            SetAttribute(Attribute::Bold),
            Print(format_revealed(status.revealed)),
            SetAttribute(Attribute::Reset),
            ResetColor,
            Print("\n\n")
        )?;
        self.writer.flush()
    }

    // ── Animation ──

    /// Clear the screen and draw one animation frame at the top.
    pub fn animation_frame(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.writer, Clear(ClearType::All), MoveTo(0, 0))?;
        self.queue_frame(frame)?;
        self.writer.flush()
    }

    // ── Internal ──

    fn queue_frame(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.writer, SetForegroundColor(FRAME_COLOR))?;
        for line in frame.lines() {
            queue!(self.writer, Print(line), Print("\n"))?;
        }
        queue!(self.writer, ResetColor)
    }

    fn labeled(&mut self, label: &str, value: &str) -> io::Result<()> {
        queue!(
            self.writer,
            SetForegroundColor(LABEL_COLOR),
            Print(format!("{label}: ")),
            ResetColor,
            Print(value),
            Print("\n")
        )
    }

    fn colored_line(&mut self, color: Color, text: &str) -> io::Result<()> {
        queue!(self.writer, SetForegroundColor(color), Print(text), ResetColor, Print("\n"))
    }
}

/// `c a _ _` style, one space between cells.
fn format_revealed(cells: &[char]) -> String {
    let mut out = String::with_capacity(cells.len() * 2);
    for (i, c) in cells.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(*c);
    }
    out
}

fn format_used(used: &BTreeSet<char>) -> String {
    if used.is_empty() {
        return "-".to_string();
    }
    used.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
}
