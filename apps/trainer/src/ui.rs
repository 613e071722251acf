//! Terminal rendering of the core render models.
//!
//! Pure string formatting: the app loop prints whatever these return. The
//! card frame is a nod to the collectible-card styling of the original UI.

use vocab_core::{CardView, CompletionView, StatsView};

const FRAME_WIDTH: usize = 46;

fn frame_line(content: &str) -> String {
    format!("| {:<width$} |", content, width = FRAME_WIDTH - 4)
}

fn frame_rule() -> String {
    format!("+{}+", "-".repeat(FRAME_WIDTH - 2))
}

/// Draw one card.
pub fn format_card(view: &CardView) -> String {
    let mut lines = vec![
        frame_rule(),
        frame_line(&format!("{}  [{}]", view.word, view.progress_label)),
        frame_rule(),
        frame_line(&format!("Artifact * {}", view.pronunciation)),
        frame_rule(),
        frame_line(&view.translation),
        frame_line(""),
        frame_line(&format!("\"{}\"", view.example)),
        frame_rule(),
    ];
    lines.push(format!("art: {}", view.image_url));
    lines.join("\n")
}

/// Draw the stats view.
pub fn format_stats(view: &StatsView) -> String {
    let mut lines = vec![
        format!("Known: {}   Unknown: {}", view.known_count, view.unknown_count),
        String::new(),
        "Words to review:".to_string(),
    ];
    if view.unknown.is_empty() {
        lines.push("  (no words yet)".to_string());
    } else {
        for line in &view.unknown {
            match &line.translation {
                Some(translation) => lines.push(format!("  {} - {}", line.word, translation)),
                None => lines.push(format!("  {}", line.word)),
            }
        }
    }
    lines.join("\n")
}

/// Draw the end-of-pass screen.
pub fn format_completion(view: &CompletionView) -> String {
    let mut lines = vec!["Completed!".to_string(), view.message.clone()];
    if view.offer_review {
        lines.push("Press [r] to review your unknown words.".to_string());
    }
    lines.join("\n")
}
