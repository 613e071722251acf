//! Error types for vocab-core.

use thiserror::Error;

/// Errors from the progress state machine.
///
/// Every variant indicates a frontend contract violation: the presentation
/// layer only ever offers the card at the cursor, so neither error is
/// reachable through normal use.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("'{word}' is not the current card")]
    NotCurrentWord { word: String },

    #[error("no active card to decide on")]
    NoActiveCard,
}

/// Errors from loading bundled dictionary data.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("level '{level}': invalid dictionary data: {source}")]
    InvalidData {
        level: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate level id '{0}'")]
    DuplicateLevel(String),
}

/// Errors from parsing an imported word list.
///
/// All of these surface to the user as a rejection message; none of them
/// mutate any state.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("word list must be a JSON array of strings")]
    NotAnArray,

    #[error("item {index} is not a string")]
    NotAString { index: usize },

    #[error("word list contains no usable words")]
    Empty,
}
