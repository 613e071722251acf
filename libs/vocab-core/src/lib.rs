//! Core vocabulary-trainer library shared by the terminal app.
//!
//! Provides:
//! - The progress state machine (`Session`): active/known/unknown pools,
//!   learning passes, review sub-sessions, completion detection
//! - Dictionary provider types (levels, entries, merged lookup)
//! - Pure render models for cards, stats and completion screens
//! - Word-list import parser for custom levels
//! - Shared types (Outcome, Scope, Pools, etc.)

pub mod dictionary;
pub mod error;
pub mod import;
pub mod render;
pub mod session;
pub mod types;

pub use dictionary::{Dictionary, Level};
pub use error::{DictionaryError, ImportError, SessionError};
pub use import::parse_word_list;
pub use render::{
    card_view, completion_view, progress_label, stats_view, CardView, CompletionView, StatsView,
    UnknownLine,
};
pub use session::{Advance, Decision, Session};
pub use types::{ActiveCard, DictionaryEntry, LevelId, Mode, Outcome, Pools, Progress, Scope, Word};
