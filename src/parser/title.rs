use std::sync::LazyLock;

use regex::Regex;

static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

/// Text of the first top-level `# heading`, trimmed.
pub fn extract(markdown: &str) -> Option<String> {
    H1_RE
        .captures(markdown)
        .map(|caps| caps[1].trim().to_string())
}

// ── Tests ──
