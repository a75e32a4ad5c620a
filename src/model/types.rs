use serde::{Deserialize, Serialize};

/// A tagged release, or the unreleased changes when `tag` is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub tag: Option<String>,
    /// ISO-8601 timestamp, e.g. `2020-05-01T12:00:00Z`
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub merges: Vec<Merge>,
    #[serde(default)]
    pub fixes: Vec<FixGroup>,
    #[serde(default)]
    pub commits: Vec<Commit>,
}

impl Release {
    /// Tag name, treating an empty tag as no tag.
    pub fn tag_name(&self) -> Option<&str> {
        self.tag.as_deref().filter(|tag| !tag.is_empty())
    }

    /// Release date, treating an empty date as no date.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref().filter(|date| !date.is_empty())
    }

    pub fn is_unreleased(&self) -> bool {
        self.tag_name().is_none()
    }
}

/// A merged pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merge {
    /// PR reference such as `#123`
    pub pr: String,
    pub message: String,
}

/// Issue references closed by a single commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixGroup {
    /// `#45` or a full issue URL
    pub fixes: Vec<String>,
    pub commit: Commit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub hash: String,
    pub subject: String,
    #[serde(default)]
    pub insertions: u64,
    #[serde(default)]
    pub deletions: u64,
}

impl Commit {
    /// Number of changed lines.
    pub fn size(&self) -> u64 {
        self.insertions.saturating_add(self.deletions)
    }
}
