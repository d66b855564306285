/// Word catalog: category → difficulty → candidate words with hints.
///
/// The catalog is read-only during a session. Selection is uniform and
/// always goes through the injected random source, so a seeded source
/// reproduces the same pick.

use std::collections::BTreeMap;

use rand::Rng;
use serde::Deserialize;

/// A guessable word and the hint shown on request.
/// The word is lowercased on construction.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "RawWordEntry")]
pub struct WordEntry {
    word: String,
    hint: String,
}

#[derive(Deserialize)]
struct RawWordEntry {
    word: String,
    #[serde(default)]
    hint: String,
}

impl From<RawWordEntry> for WordEntry {
    fn from(raw: RawWordEntry) -> Self {
        WordEntry::new(&raw.word, &raw.hint)
    }
}

impl WordEntry {
    pub fn new(word: &str, hint: &str) -> Self {
        WordEntry {
            word: word.trim().to_lowercase(),
            hint: hint.to_string(),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Length in characters (not bytes).
    pub fn len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// Lowercase a guessed letter the same way words are lowercased.
pub fn normalize_letter(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// category → difficulty → words.
pub type Catalog = BTreeMap<String, BTreeMap<String, Vec<WordEntry>>>;

/// Pick a word uniformly at random for the given pair.
///
/// Returns `None` when the pair is unknown or has no words. The session
/// only asks for pairs that passed load-time validation.
pub fn random_word<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    category: &str,
    difficulty: &str,
    rng: &mut R,
) -> Option<&'a WordEntry> {
    let entries = catalog.get(category)?.get(difficulty)?;
    if entries.is_empty() {
        return None;
    }
    Some(&entries[rng.gen_range(0..entries.len())])
}
