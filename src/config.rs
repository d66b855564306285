/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Input meaning "pick at random" at the category/difficulty prompts.
    pub random_token: String,
    pub frame_delay: Duration,
    /// Fixed seed for reproducible games; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Directory holding `words.toml` and `frames.toml`.
    pub data_dir: PathBuf,
    /// Log file directory; `None` disables logging.
    pub log_dir: Option<PathBuf>,
    /// difficulty name → attempt budget, as written (validated on data load).
    pub difficulties: BTreeMap<String, i64>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default = "default_difficulties")]
    difficulties: BTreeMap<String, i64>,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_random_token")]
    random_token: String,
    #[serde(default = "default_frame_delay")]
    frame_delay_ms: u64,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default = "default_data_dir")]
    data_dir: String,
    #[serde(default)]
    log_dir: Option<String>,
}

// ── Defaults ──

fn default_random_token() -> String { String::new() }  // empty line = random
fn default_frame_delay() -> u64 { 1250 }
fn default_data_dir() -> String { "data".into() }

fn default_difficulties() -> BTreeMap<String, i64> {
    [("easy", 7), ("medium", 5), ("hard", 3)]
        .into_iter()
        .map(|(name, attempts)| (name.to_string(), attempts))
        .collect()
}

impl Default for TomlConfig {
    fn default() -> Self {
        TomlConfig {
            general: TomlGeneral::default(),
            difficulties: default_difficulties(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            random_token: default_random_token(),
            frame_delay_ms: default_frame_delay(),
            seed: None,
            data_dir: default_data_dir(),
            log_dir: None,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default(), &[])
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// (3) ~/.local/share/hangman.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        GameConfig::from_toml(toml_cfg, &search_dirs)
    }

    /// Parse config text directly. Relative paths stay relative to CWD.
    #[cfg(test)]
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        let toml_cfg = toml::from_str::<TomlConfig>(text)?;
        Ok(GameConfig::from_toml(toml_cfg, &[]))
    }

    fn from_toml(toml_cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        let general = toml_cfg.general;

        GameConfig {
            random_token: general.random_token.trim().to_lowercase(),
            frame_delay: Duration::from_millis(general.frame_delay_ms),
            seed: general.seed,
            data_dir: resolve_dir(&general.data_dir, search_dirs),
            log_dir: general.log_dir.map(|d| resolve_dir(&d, search_dirs)),
            // Prompt input is lowercased, so names must be too
            difficulties: toml_cfg
                .difficulties
                .into_iter()
                .map(|(name, attempts)| (name.trim().to_lowercase(), attempts))
                .collect(),
        }
    }
}

/// Absolute paths are kept; relative ones resolve against the first
/// candidate directory that has them, else against CWD.
fn resolve_dir(dir: &str, search_dirs: &[PathBuf]) -> PathBuf {
    let path = Path::new(dir);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    search_dirs
        .iter()
        .map(|d| d.join(path))
        .find(|p| p.is_dir())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Candidate directories to search: exe dir + CWD + XDG data home (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG data home (~/.local/share/hangman)
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/hangman");
        if xdg.is_dir() && !dirs.iter().any(|d| d == &xdg) {
            dirs.push(xdg);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}
