//! Custom word-list import.
//!
//! An imported document must be a JSON array of strings. Anything else is
//! rejected before any state changes; the caller shows the error message
//! and moves on. Blank entries are dropped and duplicates keep their first
//! occurrence.

use crate::error::ImportError;
use crate::types::Word;
use std::collections::HashSet;

/// Parse an uploaded word-list document.
pub fn parse_word_list(content: &str) -> Result<Vec<Word>, ImportError> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    let items = value.as_array().ok_or(ImportError::NotAnArray)?;

    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let raw = item.as_str().ok_or(ImportError::NotAString { index })?;
        let word = raw.trim();
        if word.is_empty() {
            continue;
        }
        if seen.insert(word.to_string()) {
            words.push(word.to_string());
        }
    }

    if words.is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(words)
}
