/// Game data loader: word catalog, difficulty table and frame library.
///
/// ## Sources (priority order):
///   1. `<data_dir>/words.toml`, `<data_dir>/frames.toml`
///   2. Built-in embedded copies of both files
///
/// ## words.toml
///   ```toml
///   [animals]
///   easy = [{ word = "cat", hint = "Purrs" }, ...]
///   ```
///
/// ## frames.toml
///   `process`, `victory`, `defeat`: arrays of multi-line strings, one per frame.
///
/// Everything is validated once here so the session never meets an empty
/// word list, a zero attempt budget, or a budget larger than the animation.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::config::GameConfig;
use crate::domain::conditions::DifficultyTable;
use crate::domain::frames::{FrameLibrary, Stage};
use crate::domain::word::Catalog;

pub const WORDS_FILE: &str = "words.toml";
pub const FRAMES_FILE: &str = "frames.toml";

const EMBEDDED_WORDS: &str = include_str!("../../data/words.toml");
const EMBEDDED_FRAMES: &str = include_str!("../../data/frames.toml");

#[derive(Debug, Error)]
pub enum DataError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid game data: {0}")]
    Invalid(String),
}

/// Everything a session needs, loaded and validated.
#[derive(Clone, Debug)]
pub struct GameData {
    pub catalog: Catalog,
    pub difficulties: DifficultyTable,
    pub library: FrameLibrary,
}

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

pub fn load_game_data(config: &GameConfig) -> Result<GameData, DataError> {
    let words = read_or_embedded(&config.data_dir, WORDS_FILE, EMBEDDED_WORDS)?;
    let frames = read_or_embedded(&config.data_dir, FRAMES_FILE, EMBEDDED_FRAMES)?;
    parse_game_data(&words, &frames, &config.difficulties)
}

/// Parse and validate game data from file contents.
pub fn parse_game_data(
    words: &str,
    frames: &str,
    difficulties: &BTreeMap<String, i64>,
) -> Result<GameData, DataError> {
    let catalog: Catalog = toml::from_str(words)
        .map_err(|source| DataError::Parse { file: WORDS_FILE, source })?;
    let catalog = normalize_catalog(catalog)?;
    let library: FrameLibrary = toml::from_str(frames)
        .map_err(|source| DataError::Parse { file: FRAMES_FILE, source })?;

    let difficulties = difficulty_table(difficulties)?;
    validate_library(&library, &difficulties)?;
    validate_catalog(&catalog, &difficulties)?;

    info!(
        categories = catalog.len(),
        difficulties = difficulties.len(),
        process_frames = library.process.len(),
        "game data loaded"
    );

    Ok(GameData { catalog, difficulties, library })
}

// ══════════════════════════════════════════════════════════════
// Validation
// ══════════════════════════════════════════════════════════════

fn difficulty_table(raw: &BTreeMap<String, i64>) -> Result<DifficultyTable, DataError> {
    if raw.is_empty() {
        return Err(DataError::Invalid("no difficulties configured".into()));
    }
    raw.iter()
        .map(|(name, &attempts)| match usize::try_from(attempts) {
            Ok(n) if n > 0 => Ok((name.clone(), n)),
            _ => Err(DataError::Invalid(format!(
                "difficulty {name:?} has attempt budget {attempts}, must be positive"
            ))),
        })
        .collect()
}

/// Prompt answers are trimmed and lowercased before lookup, so catalog keys
/// get the same treatment here. Keys that collide afterwards are rejected.
fn normalize_catalog(raw: Catalog) -> Result<Catalog, DataError> {
    let mut catalog = Catalog::new();
    for (category, by_difficulty) in raw {
        let category = condition_key(&category, "category")?;
        let mut normalized = BTreeMap::new();
        for (difficulty, entries) in by_difficulty {
            let difficulty = condition_key(&difficulty, "difficulty")?;
            if normalized.insert(difficulty.clone(), entries).is_some() {
                return Err(DataError::Invalid(format!(
                    "category {category:?} lists difficulty {difficulty:?} more than once"
                )));
            }
        }
        if catalog.insert(category.clone(), normalized).is_some() {
            return Err(DataError::Invalid(format!(
                "category {category:?} is defined more than once"
            )));
        }
    }
    Ok(catalog)
}

fn condition_key(name: &str, kind: &str) -> Result<String, DataError> {
    let key = name.trim().to_lowercase();
    if key.is_empty() {
        return Err(DataError::Invalid(format!("empty {kind} name in {WORDS_FILE}")));
    }
    Ok(key)
}

fn validate_library(
    library: &FrameLibrary,
    difficulties: &DifficultyTable,
) -> Result<(), DataError> {
    for stage in Stage::ALL {
        if library.stage(stage).is_empty() {
            return Err(DataError::Invalid(format!("no {} frames", stage.name())));
        }
    }

    // Each attempt needs its own process frame
    let frame_count = library.process.len();
    for (name, &attempts) in difficulties {
        if attempts > frame_count {
            return Err(DataError::Invalid(format!(
                "difficulty {name:?} allows {attempts} attempts but only {frame_count} process frames exist"
            )));
        }
    }
    Ok(())
}

fn validate_catalog(catalog: &Catalog, difficulties: &DifficultyTable) -> Result<(), DataError> {
    if catalog.is_empty() {
        return Err(DataError::Invalid("word catalog is empty".into()));
    }

    // Random category + chosen difficulty must always have words,
    // so every category covers every difficulty.
    for (category, by_difficulty) in catalog {
        for difficulty in difficulties.keys() {
            let entries = by_difficulty.get(difficulty).map(Vec::as_slice).unwrap_or(&[]);
            if entries.is_empty() {
                return Err(DataError::Invalid(format!(
                    "category {category:?} has no words for difficulty {difficulty:?}"
                )));
            }
            if entries.iter().any(|e| e.is_empty()) {
                return Err(DataError::Invalid(format!(
                    "category {category:?}, difficulty {difficulty:?} contains an empty word"
                )));
            }
            // Only letters can be guessed; anything else would stay hidden
            let unguessable = entries
                .iter()
                .find(|e| !e.word().chars().all(char::is_alphabetic));
            if let Some(entry) = unguessable {
                return Err(DataError::Invalid(format!(
                    "word {:?} in category {category:?} has characters that cannot be guessed",
                    entry.word()
                )));
            }
        }
        for difficulty in by_difficulty.keys() {
            if !difficulties.contains_key(difficulty) {
                warn!(%category, %difficulty, "words for unknown difficulty are ignored");
            }
        }
    }
    Ok(())
}

// ══════════════════════════════════════════════════════════════
// File access
// ══════════════════════════════════════════════════════════════

fn read_or_embedded(dir: &Path, file: &str, embedded: &'static str) -> Result<String, DataError> {
    let path = dir.join(file);
    if !path.is_file() {
        info!(path = %path.display(), "not found, using built-in data");
        return Ok(embedded.to_string());
    }
    info!(path = %path.display(), "loading");
    std::fs::read_to_string(&path).map_err(|source| DataError::Io { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conditions::available_categories;
    use crate::ui::input::parse_condition;

    const WORDS: &str = r#"
[animals]
easy = [{ word = "Cat", hint = "meow" }]
hard = [{ word = "platypus", hint = "odd" }]

[food]
easy = [{ word = "pie" }]
hard = [{ word = "croissant", hint = "flaky" }]
"#;

    const FRAMES: &str = r#"
process = ["0", "1", "2", "3"]
victory = ["win"]
defeat = ["lose"]
"#;

    fn budgets(pairs: &[(&str, i64)]) -> BTreeMap<String, i64> {
        pairs.iter().map(|(n, a)| (n.to_string(), *a)).collect()
    }

    #[test]
    fn parses_valid_data() {
        let data = parse_game_data(WORDS, FRAMES, &budgets(&[("easy", 4), ("hard", 2)])).unwrap();
        assert_eq!(data.catalog.len(), 2);
        assert_eq!(data.catalog["animals"]["easy"][0].word(), "cat");
        assert_eq!(data.difficulties["easy"], 4);
        assert_eq!(data.library.process.len(), 4);
    }

    #[test]
    fn rejects_non_positive_budget() {
        for bad in [0, -3] {
            let err = parse_game_data(WORDS, FRAMES, &budgets(&[("easy", bad), ("hard", 2)])).unwrap_err();
            assert!(matches!(err, DataError::Invalid(_)), "{err}");
        }
    }

    #[test]
    fn rejects_budget_above_frame_count() {
        let err = parse_game_data(WORDS, FRAMES, &budgets(&[("easy", 5), ("hard", 2)])).unwrap_err();
        assert!(err.to_string().contains("process frames"), "{err}");
    }

    #[test]
    fn rejects_missing_difficulty_in_category() {
        let err = parse_game_data(WORDS, FRAMES, &budgets(&[("easy", 2), ("medium", 2)])).unwrap_err();
        assert!(err.to_string().contains("medium"), "{err}");
    }

    #[test]
    fn rejects_empty_word() {
        let words = r#"animals = { easy = [{ word = "  " }] }"#;
        let err = parse_game_data(words, FRAMES, &budgets(&[("easy", 2)])).unwrap_err();
        assert!(err.to_string().contains("empty word"), "{err}");
    }

    #[test]
    fn catalog_keys_match_prompt_answers() {
        let words = r#"
[Animals]
" Easy " = [{ word = "cat" }]
"#;
        let data = parse_game_data(words, FRAMES, &budgets(&[("easy", 2)])).unwrap();
        let categories = available_categories(&data.catalog);
        assert!(categories.contains(parse_condition("ANIMALS").as_str()));
        assert!(!categories.contains("Animals"));
        assert_eq!(data.catalog["animals"]["easy"][0].word(), "cat");
    }

    #[test]
    fn rejects_keys_colliding_after_lowercasing() {
        let words = r#"
[Animals]
easy = [{ word = "cat" }]

[animals]
easy = [{ word = "dog" }]
"#;
        let err = parse_game_data(words, FRAMES, &budgets(&[("easy", 2)])).unwrap_err();
        assert!(err.to_string().contains("more than once"), "{err}");

        let words = r#"animals = { easy = [{ word = "cat" }], EASY = [{ word = "dog" }] }"#;
        let err = parse_game_data(words, FRAMES, &budgets(&[("easy", 2)])).unwrap_err();
        assert!(err.to_string().contains("more than once"), "{err}");
    }

    #[test]
    fn rejects_words_with_unguessable_characters() {
        for word in ["ice cream", "t-rex", "r2d2"] {
            let words = format!(r#"food = {{ easy = [{{ word = "pie" }}, {{ word = "{word}" }}] }}"#);
            let err = parse_game_data(&words, FRAMES, &budgets(&[("easy", 2)])).unwrap_err();
            assert!(err.to_string().contains("cannot be guessed"), "{word}: {err}");
        }
        // Non-ASCII letters are fine
        let words = r#"food = { easy = [{ word = "crème" }] }"#;
        assert!(parse_game_data(words, FRAMES, &budgets(&[("easy", 2)])).is_ok());
    }

    #[test]
    fn rejects_empty_catalog_and_stages() {
        assert!(parse_game_data("", FRAMES, &budgets(&[("easy", 2)])).is_err());
        let no_defeat = r#"
process = ["0", "1"]
victory = ["win"]
defeat = []
"#;
        let err = parse_game_data(WORDS, no_defeat, &budgets(&[("easy", 1), ("hard", 1)])).unwrap_err();
        assert!(err.to_string().contains("defeat"), "{err}");
    }

    #[test]
    fn rejects_no_difficulties() {
        assert!(parse_game_data(WORDS, FRAMES, &BTreeMap::new()).is_err());
    }

    #[test]
    fn parse_error_names_file() {
        let err = parse_game_data("[animals", FRAMES, &budgets(&[("easy", 2)])).unwrap_err();
        assert!(matches!(err, DataError::Parse { file: WORDS_FILE, .. }));
    }

    #[test]
    fn embedded_data_fits_default_config() {
        let config = GameConfig::default();
        let data = parse_game_data(EMBEDDED_WORDS, EMBEDDED_FRAMES, &config.difficulties).unwrap();
        assert!(data.catalog.len() >= 3);
        assert_eq!(data.difficulties.len(), 3);
        assert!(data.library.process.len() >= 7);
    }

    #[test]
    fn missing_data_dir_falls_back_to_embedded() {
        let config = GameConfig {
            data_dir: PathBuf::from("/nonexistent/hangman-data"),
            ..GameConfig::default()
        };
        let data = load_game_data(&config).unwrap();
        assert!(data.catalog.contains_key("animals"));
    }
}
