use std::cmp::Reverse;
use std::path::{Component, Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::history::HistoryResolver;
use crate::parser;

const MARKDOWN_EXTENSION: &str = "md";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub path: PathBuf,
    /// Repository-relative, `/`-separated; the tail of the public URL.
    pub rel_path: String,
    pub title: String,
    pub description: String,
    pub date: Option<DateTime<FixedOffset>>,
}

pub struct Collector {
    repo_root: PathBuf,
    docs_dir: PathBuf,
    progress: bool,
}

impl Collector {
    pub fn new(repo_root: impl Into<PathBuf>, docs_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            docs_dir: docs_dir.into(),
            progress: false,
        }
    }

    /// Show a progress bar on stderr while history dates are resolved.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Every markdown document under the docs directory, newest first.
    /// A missing docs directory yields an empty list.
    pub fn collect(&self, history: &dyn HistoryResolver) -> Result<Vec<DocumentRecord>> {
        let files = self.find_documents();
        info!("Found {} markdown files", files.len());

        let pb = if self.progress {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40} {pos}/{len} {msg}")?
                    .progress_chars("=> "),
            );
            pb
        } else {
            ProgressBar::hidden()
        };

        let mut records = Vec::with_capacity(files.len());
        for path in files {
            let rel = path.strip_prefix(&self.repo_root).unwrap_or(path.as_path());
            let rel_path = url_path(rel);
            pb.set_message(rel_path.clone());

            let date = history.first_change_date(rel);
            let meta = parser::extract_file(&path);
            records.push(DocumentRecord {
                path,
                rel_path,
                title: meta.title,
                description: meta.description,
                date,
            });
            pb.inc(1);
        }
        pb.finish_and_clear();

        sort_newest_first(&mut records);
        Ok(records)
    }

    /// Missing or unreadable docs directories yield no documents.
    fn find_documents(&self) -> Vec<PathBuf> {
        let root = self.repo_root.join(&self.docs_dir);
        if !root.is_dir() {
            info!("Documents directory {} does not exist", root.display());
            return Vec::new();
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&root).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                    continue;
                }
            };
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == MARKDOWN_EXTENSION)
            {
                files.push(entry.into_path());
            }
        }
        files
    }
}

/// Descending by date; undated records go last. Stable for equal dates.
pub fn sort_newest_first(records: &mut [DocumentRecord]) {
    records.sort_by_key(|r| Reverse(r.date));
}

fn url_path(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::history::parse_git_date;

    /// In-memory history keyed by repo-relative path.
    #[derive(Default)]
    struct FakeHistory(HashMap<PathBuf, DateTime<FixedOffset>>);

    impl FakeHistory {
        fn with(mut self, path: &str, date: &str) -> Self {
            self.0.insert(PathBuf::from(path), parse_git_date(date).unwrap());
            self
        }
    }

    impl HistoryResolver for FakeHistory {
        fn first_change_date(&self, path: &Path) -> Option<DateTime<FixedOffset>> {
            self.0.get(path).copied()
        }
    }

    fn write(root: &Path, rel: &str, body: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn missing_docs_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let records = Collector::new(dir.path(), "blogs")
            .collect(&FakeHistory::default())
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn walks_recursively_and_filters_extension() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "blogs/a.md", "# A\n");
        write(dir.path(), "blogs/2024/deep/b.md", "# B\n");
        write(dir.path(), "blogs/notes.txt", "# Not markdown\n");
        write(dir.path(), "blogs/c.markdown", "# Other extension\n");
        write(dir.path(), "other/d.md", "# Outside\n");

        let records = Collector::new(dir.path(), "blogs")
            .collect(&FakeHistory::default())
            .unwrap();
        let mut rels: Vec<_> = records.iter().map(|r| r.rel_path.as_str()).collect();
        rels.sort();
        assert_eq!(rels, vec!["blogs/2024/deep/b.md", "blogs/a.md"]);
    }

    #[test]
    fn sorted_newest_first_with_undated_last() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "blogs/old.md", "# Old\n");
        write(dir.path(), "blogs/new.md", "# New\n");
        write(dir.path(), "blogs/draft.md", "# Draft\n");
        write(dir.path(), "blogs/mid.md", "# Mid\n");
        let history = FakeHistory::default()
            .with("blogs/old.md", "2023-05-01 09:00:00 +0000")
            .with("blogs/new.md", "2025-02-01 09:00:00 +0000")
            .with("blogs/mid.md", "2024-07-15 18:30:00 +0200");

        let records = Collector::new(dir.path(), "blogs").collect(&history).unwrap();
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Mid", "Old", "Draft"]);
        assert!(records[3].date.is_none());
    }

    #[test]
    fn record_carries_extracted_metadata() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "blogs/a.md",
            "# Hello World\n\n**Goal:** Learn things.\n",
        );
        let history = FakeHistory::default().with("blogs/a.md", "2025-01-02 10:00:00 +0000");

        let records = Collector::new(dir.path(), "blogs").collect(&history).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.title, "Hello World");
        assert_eq!(r.description, "Learn things.");
        assert_eq!(r.rel_path, "blogs/a.md");
        assert_eq!(r.path, dir.path().join("blogs/a.md"));
        assert!(r.date.is_some());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_posts_are_collected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "drafts/linked.md", "# Linked\n");
        write(dir.path(), "blogs/plain.md", "# Plain\n");
        std::os::unix::fs::symlink(
            dir.path().join("drafts/linked.md"),
            dir.path().join("blogs/linked.md"),
        )
        .unwrap();

        let records = Collector::new(dir.path(), "blogs")
            .collect(&FakeHistory::default())
            .unwrap();
        let mut rels: Vec<_> = records.iter().map(|r| r.rel_path.as_str()).collect();
        rels.sort();
        assert_eq!(rels, vec!["blogs/linked.md", "blogs/plain.md"]);
        assert!(records.iter().any(|r| r.title == "Linked"));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_docs_dir_is_empty() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "blogs/a.md", "# A\n");
        let blogs = dir.path().join("blogs");
        std::fs::set_permissions(&blogs, std::fs::Permissions::from_mode(0o000)).unwrap();
        if std::fs::read_dir(&blogs).is_ok() {
            // Running as root: permissions are not enforced.
            std::fs::set_permissions(&blogs, std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let records = Collector::new(dir.path(), "blogs").collect(&FakeHistory::default());
        std::fs::set_permissions(&blogs, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert!(records.unwrap().is_empty());
    }

    #[test]
    fn dot_root_gives_clean_relative_paths() {
        assert_eq!(url_path(Path::new("./blogs/x/y.md")), "blogs/x/y.md");
    }

    #[test]
    fn sort_compares_instants_across_offsets() {
        let rec = |title: &str, date: &str| DocumentRecord {
            path: PathBuf::from(title),
            rel_path: title.into(),
            title: title.into(),
            description: String::new(),
            date: parse_git_date(date),
        };
        // 10:00 -0500 is 15:00 UTC, later than 12:00 +0000.
        let mut records = vec![
            rec("utc", "2025-03-01 12:00:00 +0000"),
            rec("est", "2025-03-01 10:00:00 -0500"),
        ];
        sort_newest_first(&mut records);
        assert_eq!(records[0].title, "est");
    }
}
