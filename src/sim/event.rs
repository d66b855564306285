/// Events emitted while a session runs.
/// Tests and the log consume these; the display only sees round status.

use crate::domain::frames::Stage;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuessEvent {
    HintShown,
    /// Letter was already used; input re-read, nothing changed.
    Repeated { letter: char },
    Hit { letter: char, revealed: usize },
    Miss { letter: char, attempts_remaining: usize },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Victory,
    Defeat,
}

impl Outcome {
    /// Frame stage played when the session ends this way.
    pub fn stage(self) -> Stage {
        match self {
            Outcome::Victory => Stage::Victory,
            Outcome::Defeat => Stage::Defeat,
        }
    }
}
