//! Dictionary store: the three key→URL maps consulted by the resolver.
//!
//! Each dictionary is a flat JSON object on disk (`{"hello": "https://..."}`).
//! Dictionaries are loaded once at startup and never mutated afterwards; the
//! server shares a single [`Dictionaries`] value behind an `Arc`.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::errors::DictionaryError;

/// Which of the three dictionaries a map represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DictionaryKind {
    /// Whole words.
    Words,
    /// Single characters, used by the spelling fallback.
    Alphabet,
    /// Numbers, keyed by digit strings or number words.
    Numbers,
}

impl DictionaryKind {
    /// Conventional file name for this dictionary.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Words => "words.json",
            Self::Alphabet => "alphabet.json",
            Self::Numbers => "numbers.json",
        }
    }
}

impl fmt::Display for DictionaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Words => "words",
            Self::Alphabet => "alphabet",
            Self::Numbers => "numbers",
        };
        f.write_str(name)
    }
}

/// An immutable key→URL map.
///
/// Backed by a `BTreeMap` so key iteration order is stable, which keeps
/// seeded quiz generation reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: BTreeMap<String, String>,
}

impl Dictionary {
    /// An empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dictionary from a JSON file.
    ///
    /// A missing file yields an empty dictionary and a warning. A file that
    /// exists but is unreadable or malformed is an error.
    pub fn load(kind: DictionaryKind, path: &Path) -> Result<Self, DictionaryError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(
                    dictionary = %kind,
                    path = %path.display(),
                    "dictionary file not found, lookups will be empty"
                );
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(DictionaryError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        let dict = Self::from_json(&content).map_err(|source| DictionaryError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(dictionary = %kind, entries = dict.len(), "dictionary loaded");
        Ok(dict)
    }

    /// Parse a dictionary from a JSON object string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: BTreeMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { entries })
    }

    /// URL for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for Dictionary
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Locations of the three dictionary files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataPaths {
    /// Word dictionary file.
    pub words: PathBuf,
    /// Alphabet dictionary file.
    pub alphabet: PathBuf,
    /// Number dictionary file.
    pub numbers: PathBuf,
}

impl DataPaths {
    /// Conventional file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            words: dir.join(DictionaryKind::Words.file_name()),
            alphabet: dir.join(DictionaryKind::Alphabet.file_name()),
            numbers: dir.join(DictionaryKind::Numbers.file_name()),
        }
    }
}

/// The full dictionary store.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionaries {
    /// Word → URL.
    pub words: Dictionary,
    /// Character → URL.
    pub alphabet: Dictionary,
    /// Number → URL.
    pub numbers: Dictionary,
}

impl Dictionaries {
    /// Build from already-constructed maps.
    pub fn new(words: Dictionary, alphabet: Dictionary, numbers: Dictionary) -> Self {
        Self {
            words,
            alphabet,
            numbers,
        }
    }

    /// Load all three dictionaries from disk.
    pub fn load(paths: &DataPaths) -> Result<Self, DictionaryError> {
        Ok(Self {
            words: Dictionary::load(DictionaryKind::Words, &paths.words)?,
            alphabet: Dictionary::load(DictionaryKind::Alphabet, &paths.alphabet)?,
            numbers: Dictionary::load(DictionaryKind::Numbers, &paths.numbers)?,
        })
    }

    /// Access one dictionary by kind.
    pub fn get(&self, kind: DictionaryKind) -> &Dictionary {
        match kind {
            DictionaryKind::Words => &self.words,
            DictionaryKind::Alphabet => &self.alphabet,
            DictionaryKind::Numbers => &self.numbers,
        }
    }
}
