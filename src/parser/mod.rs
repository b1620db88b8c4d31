pub mod description;
pub mod title;

use std::path::Path;

use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub description: String,
}

/// Derive title and summary from markdown text. `stem` names the document
/// when it has no top-level heading.
pub fn extract(markdown: &str, stem: &str) -> Metadata {
    let title = title::extract(markdown).unwrap_or_else(|| stem.to_string());
    let description = description::extract(markdown)
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| description::fallback(&title));
    Metadata { title, description }
}

/// Read and extract a document. Unreadable files degrade to the file stem
/// with an empty description.
pub fn extract_file(path: &Path) -> Metadata {
    let stem = file_stem(path);
    match std::fs::read_to_string(path) {
        Ok(markdown) => extract(&normalize_newlines(&markdown), &stem),
        Err(e) => {
            warn!("Error reading {}: {}", path.display(), e);
            Metadata {
                title: stem,
                description: String::new(),
            }
        }
    }
}

/// Fold `\r\n` and lone `\r` into `\n`, as text-mode reads do.
fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ── Tests ──
