use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Pattern text plus the definitions visible to it, as read from a pattern
/// file. Each definition carries its own visible definitions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    pub source: String,
    pub refs: BTreeMap<char, Pattern>,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            refs: BTreeMap::new(),
        }
    }

    pub fn with_refs(source: impl Into<String>, refs: BTreeMap<char, Pattern>) -> Self {
        Self {
            source: source.into(),
            refs,
        }
    }
}

/// How many syllables make up one word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Syllables {
    Fixed(u32),
    /// Drawn uniformly per word, bounds inclusive.
    Range { min: u32, max: u32 },
}

impl Default for Syllables {
    fn default() -> Self {
        Syllables::Fixed(1)
    }
}

/// Options for one generation run. Every field may be left out of a config
/// file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateOptions {
    pub words: usize,
    pub syllables: Syllables,
    pub syllable_separator: String,
    /// Keep repeated words instead of dropping them.
    pub duplicates: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            words: 100,
            syllables: Syllables::default(),
            syllable_separator: String::new(),
            duplicates: false,
        }
    }
}
