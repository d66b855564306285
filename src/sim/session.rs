/// Session engine: one game from condition selection to the final animation.
///
/// ## Phases
///
///   Unconfigured → Configuring → RoundLoop → Finished(Victory | Defeat)
///
///   - **Configuring**: ask the display port for category and difficulty,
///     resolve the random token, pick a word, build the answer, guess status
///     and storyboard.
///   - **RoundLoop**: show status, read a letter, resolve it. A miss costs one
///     attempt, a hit is free. Hint requests and repeated letters re-read
///     input without touching state.
///   - **Finished**: play the victory or defeat sequence, then return.
///
/// Any display port error aborts the session on the spot; there is no retry.

use std::collections::BTreeSet;
use std::io;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::answer::Answer;
use crate::domain::conditions::{available_categories, pick_random_key, DifficultyTable};
use crate::domain::frames::FrameLibrary;
use crate::domain::status::GuessStatus;
use crate::domain::word::{normalize_letter, random_word, Catalog};
use crate::sim::event::{GuessEvent, Outcome};
use crate::sim::port::{DisplayPort, LetterInput, RoundStatus};
use crate::sim::storyboard::Storyboard;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("display port failure: {0}")]
    Port(#[from] io::Error),
    #[error("nothing to choose from: no {0} available")]
    NoConditions(&'static str),
    #[error("unknown difficulty: {0:?}")]
    UnknownDifficulty(String),
    #[error("difficulty {0:?} has no attempts")]
    ZeroBudget(String),
    #[error("no words for category {category:?} at difficulty {difficulty:?}")]
    NoWords { category: String, difficulty: String },
    #[error("session has already been played")]
    AlreadyPlayed,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Unconfigured,
    Configuring,
    RoundLoop,
    Finished(Outcome),
}

/// State built during configuration and mutated by the round loop.
#[derive(Clone, Debug)]
pub struct RoundState {
    pub answer: Answer,
    pub status: GuessStatus,
    pub storyboard: Storyboard,
    pub max_attempts: usize,
    pub attempts: usize,
}

impl RoundState {
    fn attempts_used(&self) -> usize {
        self.max_attempts - self.attempts
    }

    fn is_over(&self) -> bool {
        self.status.is_guessed() || self.attempts == 0
    }
}

pub struct Session<C, R> {
    console: C,
    rng: R,
    phase: Phase,
    round: Option<RoundState>,
    used_letters: BTreeSet<char>,
    events: Vec<GuessEvent>,
    rounds_played: usize,
}

impl<C: DisplayPort, R: Rng> Session<C, R> {
    pub fn new(console: C, rng: R) -> Self {
        Session {
            console,
            rng,
            phase: Phase::Unconfigured,
            round: None,
            used_letters: BTreeSet::new(),
            events: Vec::new(),
            rounds_played: 0,
        }
    }

    /// Run the whole session. A session can only be played once.
    pub fn play(
        &mut self,
        catalog: &Catalog,
        difficulties: &DifficultyTable,
        random_token: &str,
        frame_delay: Duration,
        library: &FrameLibrary,
    ) -> Result<Outcome, SessionError> {
        if self.phase != Phase::Unconfigured {
            return Err(SessionError::AlreadyPlayed);
        }

        self.phase = Phase::Configuring;
        let mut round = self.configure(catalog, difficulties, random_token, library)?;

        self.phase = Phase::RoundLoop;
        let result = self
            .run_rounds(&mut round)
            .and_then(|()| self.finish(&round, frame_delay));
        self.round = Some(round);
        result
    }

    fn finish(
        &mut self,
        round: &RoundState,
        frame_delay: Duration,
    ) -> Result<Outcome, SessionError> {
        let outcome = if round.status.is_guessed() {
            Outcome::Victory
        } else {
            Outcome::Defeat
        };
        self.phase = Phase::Finished(outcome);
        info!(
            ?outcome,
            rounds = self.rounds_played,
            revealed = round.status.revealed(),
            word = round.answer.word(),
            "session finished"
        );

        self.console.play_frames(round.storyboard.stage(outcome.stage()), frame_delay)?;
        Ok(outcome)
    }

    fn configure(
        &mut self,
        catalog: &Catalog,
        difficulties: &DifficultyTable,
        random_token: &str,
        library: &FrameLibrary,
    ) -> Result<RoundState, SessionError> {
        let categories = available_categories(catalog);

        let (mut category, mut difficulty) =
            self.console.choose_conditions(&categories, difficulties, random_token)?;

        if category == random_token {
            category = pick_random_key(categories.iter(), &mut self.rng)
                .ok_or(SessionError::NoConditions("categories"))?
                .to_string();
            debug!(%category, "random category");
        }
        if difficulty == random_token {
            difficulty = pick_random_key(difficulties.keys(), &mut self.rng)
                .ok_or(SessionError::NoConditions("difficulties"))?
                .to_string();
            debug!(%difficulty, "random difficulty");
        }

        let max_attempts = *difficulties
            .get(&difficulty)
            .ok_or_else(|| SessionError::UnknownDifficulty(difficulty.clone()))?;
        if max_attempts == 0 {
            return Err(SessionError::ZeroBudget(difficulty));
        }

        let entry = random_word(catalog, &category, &difficulty, &mut self.rng)
            .ok_or_else(|| SessionError::NoWords {
                category: category.clone(),
                difficulty: difficulty.clone(),
            })?
            .clone();

        let answer = Answer::new(entry, &category, &difficulty);
        let status = GuessStatus::new(answer.word());
        let storyboard = Storyboard::generate(library, max_attempts, &mut self.rng);

        info!(
            %category,
            %difficulty,
            attempts = max_attempts,
            letters = answer.len(),
            "session configured"
        );

        Ok(RoundState {
            answer,
            status,
            storyboard,
            max_attempts,
            attempts: max_attempts,
        })
    }

    fn run_rounds(&mut self, round: &mut RoundState) -> Result<(), SessionError> {
        while !round.is_over() {
            self.play_round(round)?;
        }
        Ok(())
    }

    fn play_round(&mut self, round: &mut RoundState) -> Result<(), SessionError> {
        self.console.show_round_status(&RoundStatus {
            category: round.answer.category(),
            difficulty: round.answer.difficulty(),
            frame: round.storyboard.process_frame(round.attempts_used()),
            revealed: round.status.cells(),
            attempts_remaining: round.attempts,
            used_letters: &self.used_letters,
        })?;

        let letter = loop {
            match self.console.read_letter()? {
                LetterInput::Hint => {
                    self.console.show_hint(round.answer.hint())?;
                    self.events.push(GuessEvent::HintShown);
                }
                LetterInput::Letter(c) => {
                    let c = normalize_letter(c);
                    if !self.used_letters.contains(&c) {
                        break c;
                    }
                    self.events.push(GuessEvent::Repeated { letter: c });
                }
            }
        };

        let positions = round.answer.positions_of(letter);
        let event = if positions.is_empty() {
            round.attempts -= 1;
            GuessEvent::Miss { letter, attempts_remaining: round.attempts }
        } else {
            round.status.reveal(letter, positions);
            GuessEvent::Hit { letter, revealed: positions.len() }
        };
        debug!(?event, progress = %round.status.display(), "guess");

        self.used_letters.insert(letter);
        self.events.push(event);
        self.rounds_played += 1;
        Ok(())
    }

    // ── Accessors ──

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn attempts_remaining(&self) -> Option<usize> {
        self.round.as_ref().map(|r| r.attempts)
    }

    pub fn used_letters(&self) -> &BTreeSet<char> {
        &self.used_letters
    }

    pub fn events(&self) -> &[GuessEvent] {
        &self.events
    }

    pub fn rounds_played(&self) -> usize {
        self.rounds_played
    }

    #[cfg(test)]
    pub fn console(&self) -> &C {
        &self.console
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conditions::Categories;
    use crate::domain::frames::{Frame, Stage};
    use crate::domain::word::WordEntry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{BTreeMap, VecDeque};

    const TOKEN: &str = "";

    /// Display port double fed from a script; records everything shown.
    #[derive(Default)]
    struct ScriptedConsole {
        conditions: Option<(String, String)>,
        letters: VecDeque<LetterInput>,
        statuses: Vec<(usize, String, Frame, Vec<char>)>,
        hints: Vec<String>,
        played: Vec<Vec<Frame>>,
        offered_categories: Categories,
    }

    impl ScriptedConsole {
        fn new(category: &str, difficulty: &str, letters: &str) -> Self {
            ScriptedConsole {
                conditions: Some((category.to_string(), difficulty.to_string())),
                letters: letters
                    .chars()
                    .map(|c| if c == '?' { LetterInput::Hint } else { LetterInput::Letter(c) })
                    .collect(),
                ..Default::default()
            }
        }
    }

    impl DisplayPort for ScriptedConsole {
        fn choose_conditions(
            &mut self,
            categories: &Categories,
            _difficulties: &DifficultyTable,
            _random_token: &str,
        ) -> io::Result<(String, String)> {
            self.offered_categories = categories.clone();
            self.conditions.take().ok_or_else(|| {
                io::Error::new(io::ErrorKind::UnexpectedEof, "no conditions scripted")
            })
        }

        fn read_letter(&mut self) -> io::Result<LetterInput> {
            self.letters
                .pop_front()
                .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
        }

        fn show_hint(&mut self, hint: &str) -> io::Result<()> {
            self.hints.push(hint.to_string());
            Ok(())
        }

        fn show_round_status(&mut self, status: &RoundStatus<'_>) -> io::Result<()> {
            self.statuses.push((
                status.attempts_remaining,
                status.used_letters.iter().collect(),
                status.frame.clone(),
                status.revealed.to_vec(),
            ));
            Ok(())
        }

        fn play_frames(&mut self, frames: &[Frame], _delay: Duration) -> io::Result<()> {
            self.played.push(frames.to_vec());
            Ok(())
        }
    }

    fn catalog() -> Catalog {
        let mut animals = BTreeMap::new();
        for diff in ["easy", "hard", "single"] {
            animals.insert(diff.to_string(), vec![WordEntry::new("cat", "Says meow")]);
        }
        let mut food = BTreeMap::new();
        for diff in ["easy", "hard", "single"] {
            food.insert(diff.to_string(), vec![WordEntry::new("pie", "Sweet or savoury")]);
        }
        let mut catalog = Catalog::new();
        catalog.insert("animals".to_string(), animals);
        catalog.insert("food".to_string(), food);
        catalog
    }

    fn difficulties() -> DifficultyTable {
        let mut t = DifficultyTable::new();
        t.insert("easy".into(), 7);
        t.insert("hard".into(), 3);
        t.insert("single".into(), 1);
        t
    }

    fn library() -> FrameLibrary {
        FrameLibrary {
            process: (0..10).map(|i| Frame::new([format!("stage {i}")])).collect(),
            victory: vec![Frame::new(["\\o/"])],
            defeat: vec![Frame::new(["x_x"]), Frame::new(["R.I.P."])],
        }
    }

    type Played = (Session<ScriptedConsole, StdRng>, Result<Outcome, SessionError>);

    fn play(console: ScriptedConsole, seed: u64) -> Played {
        let mut session = Session::new(console, StdRng::seed_from_u64(seed));
        let result = session.play(&catalog(), &difficulties(), TOKEN, Duration::ZERO, &library());
        (session, result)
    }

    #[test]
    fn clean_victory_keeps_all_attempts() {
        let (s, result) = play(ScriptedConsole::new("animals", "easy", "cat"), 1);
        assert_eq!(result.unwrap(), Outcome::Victory);
        assert_eq!(s.phase(), Phase::Finished(Outcome::Victory));
        assert_eq!(s.rounds_played(), 3);
        assert_eq!(s.attempts_remaining(), Some(7));
        assert_eq!(s.round().unwrap().status.display(), "cat");
        assert_eq!(s.console().played, vec![library().victory]);
    }

    #[test]
    fn single_attempt_miss_is_immediate_defeat() {
        let (s, result) = play(ScriptedConsole::new("animals", "single", "x"), 1);
        assert_eq!(result.unwrap(), Outcome::Defeat);
        assert_eq!(s.phase(), Phase::Finished(Outcome::Defeat));
        assert_eq!(s.attempts_remaining(), Some(0));
        assert_eq!(s.rounds_played(), 1);
        assert_eq!(s.console().played, vec![library().defeat]);
        // One attempt: the only frame shown is the fully drawn one.
        assert_eq!(s.console().statuses[0].2, library().process[9]);
    }

    #[test]
    fn hint_is_free_and_not_recorded_as_letter() {
        let (s, result) = play(ScriptedConsole::new("animals", "easy", "c?at"), 1);
        assert_eq!(result.unwrap(), Outcome::Victory);
        assert_eq!(s.console().hints, vec!["Says meow".to_string()]);
        assert_eq!(s.attempts_remaining(), Some(7));
        assert_eq!(s.rounds_played(), 3);
        assert_eq!(s.used_letters().len(), 3);
        assert!(!s.used_letters().contains(&'?'));
        assert!(s.events().contains(&GuessEvent::HintShown));
    }

    #[test]
    fn repeated_letter_costs_nothing() {
        let (s, result) = play(ScriptedConsole::new("animals", "easy", "xxcXat"), 1);
        assert_eq!(result.unwrap(), Outcome::Victory);
        assert_eq!(s.attempts_remaining(), Some(6));
        assert_eq!(s.rounds_played(), 4);
        let repeats = s
            .events()
            .iter()
            .filter(|e| matches!(e, GuessEvent::Repeated { letter: 'x' }))
            .count();
        assert_eq!(repeats, 2);
    }

    #[test]
    fn misses_exhaust_budget() {
        let (s, result) = play(ScriptedConsole::new("food", "hard", "xyz"), 3);
        assert_eq!(result.unwrap(), Outcome::Defeat);
        assert_eq!(s.attempts_remaining(), Some(0));
        let attempts: Vec<usize> = s.console().statuses.iter().map(|st| st.0).collect();
        assert_eq!(attempts, vec![3, 2, 1]);
        assert_eq!(s.round().unwrap().status.display(), "___");
    }

    #[test]
    fn status_tracks_frames_and_letters() {
        let (s, _) = play(ScriptedConsole::new("food", "hard", "pxyz"), 3);
        let st = &s.console().statuses;
        let lib = library();
        assert_eq!(st.len(), 4);
        // A hit does not advance the animation, a miss does.
        assert_eq!(st[0].2, lib.process[0]);
        assert_eq!(st[1].2, lib.process[0]);
        assert_eq!(st[3].2, lib.process[9]);
        assert_eq!(st[1].3, vec!['p', '_', '_']);
        assert_eq!(st[3].1, "pxy");
    }

    #[test]
    fn random_token_resolves_to_known_conditions() {
        let categories = available_categories(&catalog());
        let difficulties = difficulties();
        for seed in 0..20 {
            let console = ScriptedConsole::new(TOKEN, TOKEN, "catpiexyzqwrsuvbdfg");
            let (s, result) = play(console, seed);
            assert!(result.is_ok(), "seed {seed}: {result:?}");
            let round = s.round().unwrap();
            assert_ne!(round.answer.category(), TOKEN);
            assert_ne!(round.answer.difficulty(), TOKEN);
            assert!(categories.contains(round.answer.category()));
            assert!(difficulties.contains_key(round.answer.difficulty()));
            assert_eq!(round.max_attempts, difficulties[round.answer.difficulty()]);
        }
    }

    #[test]
    fn port_receives_catalog_categories() {
        let (s, _) = play(ScriptedConsole::new("animals", "easy", "cat"), 1);
        assert_eq!(s.console().offered_categories, available_categories(&catalog()));
    }

    #[test]
    fn input_failure_aborts_round_loop() {
        let (s, result) = play(ScriptedConsole::new("animals", "easy", "c"), 1);
        assert!(matches!(result, Err(SessionError::Port(_))));
        assert_eq!(s.phase(), Phase::RoundLoop);
        assert_eq!(s.rounds_played(), 1);
        assert!(s.console().played.is_empty());
    }

    #[test]
    fn input_failure_aborts_configuration() {
        let mut console = ScriptedConsole::new("animals", "easy", "cat");
        console.conditions = None;
        let (s, result) = play(console, 1);
        assert!(matches!(result, Err(SessionError::Port(_))));
        assert_eq!(s.phase(), Phase::Configuring);
        assert!(s.round().is_none());
        assert!(s.console().statuses.is_empty());
    }

    #[test]
    fn session_plays_once() {
        let (mut s, result) = play(ScriptedConsole::new("animals", "easy", "cat"), 1);
        assert!(result.is_ok());
        let again = s.play(&catalog(), &difficulties(), TOKEN, Duration::ZERO, &library());
        assert!(matches!(again, Err(SessionError::AlreadyPlayed)));
    }

    #[test]
    fn zero_budget_is_rejected() {
        let mut table = difficulties();
        table.insert("easy".into(), 0);
        let console = ScriptedConsole::new("animals", "easy", "cat");
        let mut s = Session::new(console, StdRng::seed_from_u64(1));
        let result = s.play(&catalog(), &table, TOKEN, Duration::ZERO, &library());
        assert!(matches!(result, Err(SessionError::ZeroBudget(_))));
    }

    #[test]
    fn storyboard_sized_to_budget() {
        let (s, _) = play(ScriptedConsole::new("animals", "hard", "cat"), 4);
        let sb = &s.round().unwrap().storyboard;
        assert_eq!(sb.stage(Stage::Process).len(), 3);
    }
}
