/// Game conditions: the category set and the difficulty table.
///
/// Both are keyed by name. Random resolution of either goes through
/// `pick_random_key`, which only cares about the keys.

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::domain::word::Catalog;

/// Names of every category present in the catalog.
pub type Categories = BTreeSet<String>;

/// difficulty name → attempt budget (always ≥ 1 after validation).
pub type DifficultyTable = BTreeMap<String, usize>;

/// Derive the category set from the catalog keys.
pub fn available_categories(catalog: &Catalog) -> Categories {
    catalog.keys().cloned().collect()
}

/// Pick one key uniformly at random. `None` only for an empty collection.
///
/// Works for a `Categories` set (`set.iter()`) and for any name-keyed map
/// (`map.keys()`).
pub fn pick_random_key<'a, I, R>(keys: I, rng: &mut R) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a String>,
    R: Rng + ?Sized,
{
    keys.into_iter().choose(rng).map(String::as_str)
}
