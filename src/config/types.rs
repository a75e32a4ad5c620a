use serde::{Deserialize, Serialize};

const DEFAULT_LOG_HEADER: &str = "# Change Log\nAll notable changes to this project will be documented in this file. This project adheres to [Semantic Versioning](http://semver.org/).\n\nGenerated by [auto-changelog](https://github.com/CookPete/auto-changelog)";

/// How the fallback commit list is ordered before truncation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitOrder {
    /// `b.insertions + b.deletions - a.insertions + a.deletions`, exactly as
    /// older changelogs were generated. Not a true "largest first" order.
    #[default]
    Legacy,
    /// Largest change first, ties kept in original order.
    Size,
}

impl std::str::FromStr for CommitOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(CommitOrder::Legacy),
            "size" => Ok(CommitOrder::Size),
            _ => Err(format!("Unknown commit order: {}", s)),
        }
    }
}

/// Text and layout settings for a [`Renderer`](crate::Renderer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    pub log_header: String,
    pub unreleased_title: String,
    pub merges_title: String,
    pub fixes_title: String,
    pub commits_title: String,
    pub fix_prefix: String,
    pub merge_prefix: String,
    /// Max commits listed for a release without merges or fixes
    pub commit_list_limit: usize,
    /// Characters of the hash shown for a commit
    pub commit_hash_length: usize,
    /// Between the header and each release
    pub section_spacing: String,
    /// Between the blocks inside a release
    pub list_spacing: String,
    pub commit_order: CommitOrder,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            log_header: DEFAULT_LOG_HEADER.to_string(),
            unreleased_title: "Unreleased".to_string(),
            merges_title: "Merged".to_string(),
            fixes_title: "Fixed".to_string(),
            commits_title: "Commits".to_string(),
            fix_prefix: String::new(),
            merge_prefix: String::new(),
            commit_list_limit: 3,
            commit_hash_length: 7,
            section_spacing: "\n\n\n".to_string(),
            list_spacing: "\n\n".to_string(),
            commit_order: CommitOrder::Legacy,
        }
    }
}
