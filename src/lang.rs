// Localization tables produced by extraction, and their JSON persistence

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;
use tracing::{info, warn};

use crate::processor::write_atomic;

/// Key -> original source text, in first-seen order
pub type LangTable = IndexMap<String, String>;

/// Key -> character length of the source text (reporting only)
pub type CharCountTable = IndexMap<String, usize>;

/// The pair of tables built up while extracting text
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Tables {
    pub lang: LangTable,
    pub char_counts: CharCountTable,
}

impl Tables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `text` under `key` in both tables.
    ///
    /// Inserting an existing key again overwrites it in place and keeps its
    /// original position. Keys are derived from the text, so the value is the
    /// same unless two distinct texts collide; in that case the later text wins.
    pub fn insert(&mut self, key: String, text: &str) {
        if let Some(previous) = self.lang.get(&key) {
            if previous != text {
                warn!("Key collision on {}: {:?} replaced by {:?}", key, previous, text);
            }
        }
        self.char_counts.insert(key.clone(), text.chars().count());
        self.lang.insert(key, text.to_string());
    }

    /// Key-wise union of `other` into `self`; entries from `other` win
    pub fn merge(&mut self, other: Tables) {
        let Tables { lang, char_counts } = other;
        for (key, text) in lang {
            if let Some(previous) = self.lang.get(&key) {
                if *previous != text {
                    warn!("Key collision on {} while merging: {:?} replaced by {:?}", key, previous, text);
                }
            }
            self.lang.insert(key, text);
        }
        self.char_counts.extend(char_counts);
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.lang.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lang.is_empty()
    }

    /// Sum of all recorded character counts
    pub fn total_chars(&self) -> usize {
        self.char_counts.values().sum()
    }
}

/// Render a table as 4-space indented JSON with non-ASCII kept literal
pub fn render_lang_json(table: &LangTable) -> Result<String> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    table.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(String::from_utf8(buffer)?)
}

/// Persist the merged table to `path`, replacing any previous file atomically
pub fn write_lang_file(path: &Path, table: &LangTable) -> Result<()> {
    let json = render_lang_json(table)?;
    write_atomic(path, json.as_bytes())
        .with_context(|| format!("Failed to write localization table {}", path.display()))?;
    info!("Wrote {} entries to {}", table.len(), path.display());
    Ok(())
}
