use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, FixedOffset};
use tracing::debug;

/// Author-date layout produced by `git log --format=%ai`.
const GIT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %z";
const RFC822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Looks up when a document first entered version history.
pub trait HistoryResolver {
    /// `None` when the path has no history or the lookup failed.
    fn first_change_date(&self, path: &Path) -> Option<DateTime<FixedOffset>>;
}

/// Resolves dates by shelling out to `git log` inside `repo_root`.
pub struct GitHistory {
    repo_root: PathBuf,
}

impl GitHistory {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }
}

impl HistoryResolver for GitHistory {
    fn first_change_date(&self, path: &Path) -> Option<DateTime<FixedOffset>> {
        let output = match Command::new("git")
            .current_dir(&self.repo_root)
            .args(["log", "--format=%ai", "--reverse", "--"])
            .arg(path)
            .output()
        {
            Ok(o) => o,
            Err(e) => {
                debug!("git unavailable for {}: {}", path.display(), e);
                return None;
            }
        };

        if !output.status.success() {
            debug!(
                "git log failed for {} ({}): {}",
                path.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let oldest = stdout.lines().next().map(str::trim).filter(|l| !l.is_empty())?;
        let date = parse_git_date(oldest);
        if date.is_none() {
            debug!("unparseable git date for {}: {:?}", path.display(), oldest);
        }
        date
    }
}

/// Parse `2025-10-30 12:45:48 +0000`, keeping the commit's own offset.
pub fn parse_git_date(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(s.trim(), GIT_DATE_FORMAT).ok()
}

/// Format as the feed wire date, e.g. `Wed, 30 Oct 2025 12:45:48 +0000`.
pub fn format_rfc822(date: &DateTime<FixedOffset>) -> String {
    date.format(RFC822_FORMAT).to_string()
}

// ── Tests ──
