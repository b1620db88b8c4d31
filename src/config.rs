pub const DEFAULT_DOCS_DIR: &str = "blogs";
pub const DEFAULT_OUTPUT_PATH: &str = "feed.xml";

/// Path segment between the channel link and a document's repo-relative path.
const SOURCE_BROWSE_SEGMENT: &str = "blob/main";

/// Channel-level values for the generated feed. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
    pub email: String,
    pub author: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: "Nipuna Perera - Blog".into(),
            link: "https://github.com/nipunap/nipunap".into(),
            description: "Senior Staff Database Reliability Engineer specializing in managing \
                          complex database environments, ensuring high availability and \
                          performance at scale."
                .into(),
            language: "en-us".into(),
            email: "nipunap@gmail.com".into(),
            author: "Nipuna Perera".into(),
        }
    }
}

impl FeedConfig {
    /// `email (Name)`, shared by item authors, managingEditor and webMaster.
    pub fn contact(&self) -> String {
        format!("{} ({})", self.email, self.author)
    }

    pub fn item_url(&self, rel_path: &str) -> String {
        format!("{}/{}/{}", self.link, SOURCE_BROWSE_SEGMENT, rel_path)
    }

    pub fn self_link(&self) -> String {
        format!("{}/feed.xml", self.link)
    }
}

// ── Tests ──
