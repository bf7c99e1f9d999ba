//! Vocabulary list loading.
//!
//! A list file is a JSON document with a `wordList` array. Parsing is split
//! from the store so it can run on a background task; the store itself only
//! ever swaps in a fully parsed list.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_LIST_TITLE: &str = "Word List";

/// One vocabulary item. Its identity is its position in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub text: String,
    pub translation_lines: Vec<String>,
    pub phonetic_us: Option<String>,
    pub phonetic_uk: Option<String>,
    pub frequency_rank: Option<String>,
    pub corpus_rank: Option<String>,
}

/// A parsed list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    pub title: String,
    pub entries: Vec<VocabularyEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("failed to read list file: {0}")]
    Io(String),
    #[error("file is not valid JSON: {0}")]
    Format(String),
    #[error("list document is missing {0}")]
    Schema(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("entry index {index} out of range (count {count})")]
pub struct IndexError {
    pub index: usize,
    pub count: usize,
}

#[derive(Deserialize)]
struct RawList {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    size: Option<usize>,
    #[serde(rename = "wordList")]
    word_list: Option<Vec<RawWord>>,
}

#[derive(Deserialize)]
struct RawWord {
    value: Option<String>,
    #[serde(default)]
    translation: Option<String>,
    #[serde(default)]
    usphone: Option<String>,
    #[serde(default)]
    ukphone: Option<String>,
    #[serde(default)]
    bnc: Option<Value>,
    #[serde(default)]
    frq: Option<Value>,
}

impl WordList {
    pub fn parse(raw: &str) -> Result<Self, LoadError> {
        let document: Value =
            serde_json::from_str(raw).map_err(|err| LoadError::Format(err.to_string()))?;
        let parsed: RawList = serde_json::from_value(document)
            .map_err(|err| LoadError::Schema(format!("a well-formed list: {err}")))?;
        let Some(words) = parsed.word_list else {
            return Err(LoadError::Schema("the \"wordList\" field".to_string()));
        };

        if let Some(declared) = parsed.size {
            if declared != words.len() {
                warn!(
                    declared,
                    actual = words.len(),
                    "List header size does not match its entries"
                );
            }
        }

        let entries = words
            .into_iter()
            .enumerate()
            .map(|(idx, word)| word.into_entry(idx))
            .collect::<Result<Vec<_>, _>>()?;

        let title = parsed
            .name
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_LIST_TITLE.to_string());

        debug!(entries = entries.len(), %title, "Parsed word list");
        Ok(WordList { title, entries })
    }
}

impl RawWord {
    fn into_entry(self, idx: usize) -> Result<VocabularyEntry, LoadError> {
        let text = self
            .value
            .ok_or_else(|| LoadError::Schema(format!("\"value\" for entry {}", idx + 1)))?;
        Ok(VocabularyEntry {
            text,
            translation_lines: self
                .translation
                .as_deref()
                .map(split_translation)
                .unwrap_or_default(),
            phonetic_us: non_empty(self.usphone),
            phonetic_uk: non_empty(self.ukphone),
            frequency_rank: self.bnc.and_then(rank_text),
            corpus_rank: self.frq.and_then(rank_text),
        })
    }
}

/// Each non-blank line of a translation becomes one paragraph.
pub fn split_translation(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn rank_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        // Zero is how the source lists mark an unknown rank.
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

/// Ordered, replace-only store of entries.
#[derive(Debug, Default)]
pub struct EntryStore {
    title: Option<String>,
    entries: Vec<VocabularyEntry>,
}

impl EntryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `raw` and replace the whole store. On error nothing changes.
    pub fn load(&mut self, raw: &str) -> Result<(), LoadError> {
        let list = WordList::parse(raw)?;
        self.replace(list);
        Ok(())
    }

    pub fn replace(&mut self, list: WordList) {
        self.title = Some(list.title);
        self.entries = list.entries;
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn at(&self, index: usize) -> Result<&VocabularyEntry, IndexError> {
        self.entries.get(index).ok_or(IndexError {
            index,
            count: self.entries.len(),
        })
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}
