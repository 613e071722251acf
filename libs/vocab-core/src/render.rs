//! Pure render models for the presentation layer.
//!
//! Everything here is a function of core state: the frontend turns these
//! structs into whatever markup or terminal output it wants, and none of
//! them can mutate the session. Missing dictionary data renders as
//! placeholders; illustration fetch failures are handled by the frontend
//! falling back to [`CardView::fallback_image_url`].

use crate::types::{DictionaryEntry, Mode, Progress};
use urlencoding::encode;

pub const TRANSLATION_PLACEHOLDER: &str = "...";
pub const PRONUNCIATION_PLACEHOLDER: &str = "/.../";
pub const EXAMPLE_PLACEHOLDER: &str = "The meaning of this word is ancient and powerful.";

const ILLUSTRATION_STYLE: &str = "fantasy art illustration magic the gathering style";

/// Everything the frontend needs to draw one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub word: String,
    pub translation: String,
    pub pronunciation: String,
    pub example: String,
    pub image_url: String,
    pub fallback_image_url: String,
    pub progress_label: String,
}

/// Build the render model for a card.
pub fn card_view(word: &str, entry: Option<&DictionaryEntry>, progress: Progress) -> CardView {
    let translation = entry
        .map(|e| e.translation.as_str())
        .filter(|t| !t.is_empty())
        .unwrap_or(TRANSLATION_PLACEHOLDER)
        .to_string();
    let pronunciation = entry
        .and_then(|e| e.pronunciation.as_deref())
        .filter(|p| !p.is_empty())
        .unwrap_or(PRONUNCIATION_PLACEHOLDER)
        .to_string();
    let example = entry
        .and_then(|e| e.example.as_deref())
        .filter(|x| !x.is_empty())
        .unwrap_or(EXAMPLE_PLACEHOLDER)
        .to_string();

    // The example sentence sharpens the illustration prompt when we have one.
    let prompt = match entry.and_then(|e| e.example.as_deref()) {
        Some(example) => format!("{word} {example} {ILLUSTRATION_STYLE}"),
        None => format!("{word} {ILLUSTRATION_STYLE}"),
    };
    let image_url = format!(
        "https://image.pollinations.ai/prompt/{}?width=400&height=300&nologo=true",
        encode(&prompt)
    );
    let fallback_image_url = format!("https://placehold.co/400x300?text={}", encode(word));

    CardView {
        word: word.to_string(),
        translation,
        pronunciation,
        example,
        image_url,
        fallback_image_url,
        progress_label: progress_label(progress),
    }
}

/// `current/total`, prefixed in review mode.
pub fn progress_label(progress: Progress) -> String {
    match progress.mode {
        Mode::Learning => format!("{}/{}", progress.position, progress.total),
        Mode::Reviewing => format!("Review {}/{}", progress.position, progress.total),
    }
}

/// One row of the unknown-word list in the stats view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLine {
    pub word: String,
    pub translation: Option<String>,
}

/// Render model for the stats view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub known_count: usize,
    pub unknown_count: usize,
    pub unknown: Vec<UnknownLine>,
}

/// Build the stats view from the unknown words and their entries.
pub fn stats_view(known_count: usize, unknown: &[(&str, Option<&DictionaryEntry>)]) -> StatsView {
    StatsView {
        known_count,
        unknown_count: unknown.len(),
        unknown: unknown
            .iter()
            .map(|(word, entry)| UnknownLine {
                word: word.to_string(),
                translation: entry.map(|e| e.translation.clone()),
            })
            .collect(),
    }
}

/// Render model for the end-of-pass screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionView {
    pub message: String,
    pub offer_review: bool,
}

/// Completion message; offers a review pass when unknown words remain.
pub fn completion_view(unknown_count: usize) -> CompletionView {
    if unknown_count > 0 {
        CompletionView {
            message: format!("You have {unknown_count} words to review."),
            offer_review: true,
        }
    } else {
        CompletionView {
            message: "You've mastered all the words!".to_string(),
            offer_review: false,
        }
    }
}
