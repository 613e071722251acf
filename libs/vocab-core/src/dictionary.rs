//! Dictionary provider: read-only word data, per level or merged.
//!
//! A [`Level`] maps words to their [`DictionaryEntry`]. Words imported from
//! a custom list have no entries; lookups return `None` and the render
//! layer substitutes placeholders. A [`Dictionary`] holds every level and
//! answers scope-wide queries for the session.

use crate::error::DictionaryError;
use crate::types::{ActiveCard, DictionaryEntry, LevelId, Scope, Word};
use std::collections::BTreeMap;

/// One vocabulary level: an ordered word list plus entry data.
#[derive(Debug, Clone)]
pub struct Level {
    id: LevelId,
    name: String,
    words: Vec<Word>,
    entries: BTreeMap<Word, DictionaryEntry>,
}

impl Level {
    /// Parse a level from bundled JSON: an object keyed by word.
    ///
    /// Words are enumerated in sorted order so that session seeding is
    /// deterministic regardless of the data file's key order.
    pub fn from_json(id: &str, name: &str, data: &str) -> Result<Self, DictionaryError> {
        let entries: BTreeMap<Word, DictionaryEntry> =
            serde_json::from_str(data).map_err(|source| DictionaryError::InvalidData {
                level: id.to_string(),
                source,
            })?;
        let words = entries.keys().cloned().collect();
        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            words,
            entries,
        })
    }

    /// Build a level from a bare word list (custom import). No entries;
    /// every lookup falls back to placeholders.
    pub fn from_words(id: &str, name: &str, mut words: Vec<Word>) -> Self {
        words.sort();
        words.dedup();
        Self {
            id: id.to_string(),
            name: name.to_string(),
            words,
            entries: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&DictionaryEntry> {
        self.entries.get(word)
    }
}

/// All levels known to the app.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    levels: Vec<Level>,
}

impl Dictionary {
    pub fn new(levels: Vec<Level>) -> Result<Self, DictionaryError> {
        for (i, level) in levels.iter().enumerate() {
            if levels[..i].iter().any(|l| l.id == level.id) {
                return Err(DictionaryError::DuplicateLevel(level.id.clone()));
            }
        }
        Ok(Self { levels })
    }

    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    pub fn level(&self, id: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.id == id)
    }

    /// Add a level (e.g. a custom import) after construction.
    pub fn add_level(&mut self, level: Level) -> Result<(), DictionaryError> {
        if self.level(level.id()).is_some() {
            return Err(DictionaryError::DuplicateLevel(level.id.clone()));
        }
        self.levels.push(level);
        Ok(())
    }

    /// Level ids participating in a scope, in level order.
    pub fn scope_levels(&self, scope: &Scope) -> Vec<LevelId> {
        match scope {
            Scope::Level(id) => self
                .level(id)
                .into_iter()
                .map(|l| l.id.clone())
                .collect(),
            Scope::Global => self.levels.iter().map(|l| l.id.clone()).collect(),
        }
    }

    /// Every word in a scope as `(word, level)` pairs, level by level.
    pub fn scope_cards(&self, scope: &Scope) -> Vec<ActiveCard> {
        let mut cards = Vec::new();
        for level in &self.levels {
            let in_scope = match scope {
                Scope::Level(id) => &level.id == id,
                Scope::Global => true,
            };
            if !in_scope {
                continue;
            }
            for word in &level.words {
                cards.push(ActiveCard {
                    word: word.clone(),
                    level: level.id.clone(),
                });
            }
        }
        cards
    }

    /// Entry lookup for display. The level is known from the active card,
    /// so there is no cross-level ambiguity.
    pub fn entry(&self, level: &str, word: &str) -> Option<&DictionaryEntry> {
        self.level(level).and_then(|l| l.get(word))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> Dictionary {
        let l1 = Level::from_json(
            "level1",
            "Level 1",
            r#"{"cat":{"translation":"猫"},"dog":{"translation":"狗"}}"#,
        )
        .unwrap();
        let l2 = Level::from_json("level2", "Level 2", r#"{"owl":{"translation":"猫头鹰"}}"#)
            .unwrap();
        Dictionary::new(vec![l1, l2]).unwrap()
    }

    #[test]
    fn words_enumerate_sorted() {
        // Key order in the data file must not matter.
        let level = Level::from_json(
            "l",
            "L",
            r#"{"zebra":{"translation":"b"},"apple":{"translation":"a"}}"#,
        )
        .unwrap();
        assert_eq!(level.words(), ["apple".to_string(), "zebra".to_string()]);
    }

    #[test]
    fn scope_cards_single_level() {
        let dict = sample();
        let cards = dict.scope_cards(&Scope::Level("level1".into()));
        assert_eq!(cards.len(), 2);
        assert!(cards.iter().all(|c| c.level == "level1"));
    }

    #[test]
    fn scope_cards_global_spans_levels() {
        let dict = sample();
        let cards = dict.scope_cards(&Scope::Global);
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[2].level, "level2");
        assert_eq!(cards[2].word, "owl");
    }

    #[test]
    fn entry_lookup_is_level_scoped() {
        let dict = sample();
        assert_eq!(dict.entry("level1", "cat").unwrap().translation, "猫");
        assert!(dict.entry("level2", "cat").is_none());
    }

    #[test]
    fn imported_level_has_no_entries() {
        let level = Level::from_words("custom", "My list", vec!["b".into(), "a".into(), "b".into()]);
        assert_eq!(level.words(), ["a".to_string(), "b".to_string()]);
        assert!(level.get("a").is_none());
    }

    #[test]
    fn duplicate_level_ids_rejected() {
        let a = Level::from_words("x", "A", vec![]);
        let b = Level::from_words("x", "B", vec![]);
        assert!(matches!(
            Dictionary::new(vec![a, b]),
            Err(DictionaryError::DuplicateLevel(_))
        ));
    }

    #[test]
    fn invalid_level_json_reports_level() {
        let err = Level::from_json("level9", "L9", "[1,2,3]").unwrap_err();
        assert!(err.to_string().contains("level9"));
    }
}
