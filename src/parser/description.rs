use std::sync::LazyLock;

use regex::Regex;

/// Hard cut applied to paragraph-derived descriptions, in characters.
pub const MAX_PARAGRAPH_CHARS: usize = 200;

static GOAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)\*\*Goal:\*\*\s*(.+?)(?:\n|$)").unwrap());
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[A-Z][^\n]+(?:\n[^\n]+)*").unwrap());

/// Summary from a `**Goal:**` line, else the first capitalised paragraph.
pub fn extract(markdown: &str) -> Option<String> {
    if let Some(caps) = GOAL_RE.captures(markdown) {
        return Some(caps[1].trim().to_string());
    }

    PARAGRAPH_RE
        .find(markdown)
        .map(|m| m.as_str().trim().chars().take(MAX_PARAGRAPH_CHARS).collect())
}

/// Used when neither heuristic produced any text.
pub fn fallback(title: &str) -> String {
    format!("Read the full article: {}", title)
}

// ── Tests ──
