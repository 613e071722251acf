//! Core types for the vocabulary trainer.

use serde::{Deserialize, Serialize};

/// A vocabulary item. Equality is exact string match.
pub type Word = String;

/// Identifier of a vocabulary level (e.g. "level1").
pub type LevelId = String;

/// Learner's verdict on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Known,
    Unknown,
}

/// Session mode: a normal pass over unclassified words, or a review pass
/// restricted to the unknown pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Learning,
    Reviewing,
}

/// The universe of words a session runs over.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// A single level's dictionary.
    Level(LevelId),
    /// All levels merged. Has no persisted pools of its own; decisions
    /// write through to the originating level.
    Global,
}

/// Dictionary payload for a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// A queue entry: the word plus the level it came from, so a decision made
/// in a merged scope can be written back to the right level without
/// re-deriving membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveCard {
    pub word: Word,
    pub level: LevelId,
}

/// Persisted classification pools for one level.
///
/// Invariant: `known` and `unknown` never share a member. Order is
/// insertion order and survives the JSON round trip.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pools {
    pub known: Vec<Word>,
    pub unknown: Vec<Word>,
}

impl Pools {
    /// Whether the word has already been classified either way.
    pub fn is_classified(&self, word: &str) -> bool {
        self.known.iter().any(|w| w == word) || self.unknown.iter().any(|w| w == word)
    }

    /// Move a word from `unknown` to `known`. Idempotent: promoting a word
    /// already in `known` is a no-op, and the word is never duplicated.
    pub fn promote(&mut self, word: &str) {
        if let Some(pos) = self.unknown.iter().position(|w| w == word) {
            self.unknown.remove(pos);
        }
        if !self.known.iter().any(|w| w == word) {
            self.known.push(word.to_string());
        }
    }
}

/// Position within the current pass, for the `current/total` indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// 1-based position of the card being shown.
    pub position: usize,
    pub total: usize,
    pub mode: Mode,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pools_classification() {
        let pools = Pools {
            known: vec!["cat".into()],
            unknown: vec!["dog".into()],
        };
        assert!(pools.is_classified("cat"));
        assert!(pools.is_classified("dog"));
        assert!(!pools.is_classified("owl"));
    }

    #[test]
    fn promote_moves_word_between_pools() {
        let mut pools = Pools {
            known: vec![],
            unknown: vec!["dog".into(), "owl".into()],
        };
        pools.promote("dog");
        assert_eq!(pools.known, vec!["dog".to_string()]);
        assert_eq!(pools.unknown, vec!["owl".to_string()]);
    }

    #[test]
    fn promote_is_idempotent() {
        let mut pools = Pools {
            known: vec!["dog".into()],
            unknown: vec![],
        };
        pools.promote("dog");
        assert_eq!(pools.known, vec!["dog".to_string()]);
    }

    #[test]
    fn pools_round_trip_as_json_arrays() {
        let pools = Pools {
            known: vec!["cat".into(), "owl".into()],
            unknown: vec!["dog".into()],
        };
        let json = serde_json::to_string(&pools.known).unwrap();
        let back: Vec<Word> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pools.known);
    }
}
