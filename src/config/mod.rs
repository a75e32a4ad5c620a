//! Render options

mod types;

pub use types::{CommitOrder, RenderOptions};

use crate::error::Result;

impl RenderOptions {
    /// Parse options from a TOML table. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn with_commit_list_limit(mut self, limit: usize) -> Self {
        self.commit_list_limit = limit;
        self
    }

    pub fn with_commit_order(mut self, order: CommitOrder) -> Self {
        self.commit_order = order;
        self
    }

    pub fn with_unreleased_title(mut self, title: impl Into<String>) -> Self {
        self.unreleased_title = title.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChangelogError;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();

        assert!(options.log_header.starts_with("# Change Log\n"));
        assert_eq!(options.unreleased_title, "Unreleased");
        assert_eq!(options.commit_list_limit, 3);
        assert_eq!(options.commit_hash_length, 7);
        assert_eq!(options.section_spacing, "\n\n\n");
        assert_eq!(options.list_spacing, "\n\n");
        assert_eq!(options.commit_order, CommitOrder::Legacy);
    }

    #[test]
    fn test_from_toml_partial() {
        let options = RenderOptions::from_toml_str(
            r##"
            log_header = "# Changelog"
            merge_prefix = "PR "
            commit_list_limit = 5
            commit_order = "size"
            "##,
        )
        .unwrap();

        assert_eq!(options.log_header, "# Changelog");
        assert_eq!(options.merge_prefix, "PR ");
        assert_eq!(options.commit_list_limit, 5);
        assert_eq!(options.commit_order, CommitOrder::Size);
        assert_eq!(options.fixes_title, "Fixed");
        assert_eq!(options.list_spacing, "\n\n");
    }

    #[test]
    fn test_from_toml_empty() {
        let options = RenderOptions::from_toml_str("").unwrap();
        assert_eq!(options, RenderOptions::default());
    }

    #[test]
    fn test_from_toml_rejects_unknown_key() {
        let result = RenderOptions::from_toml_str("commit_limit = 4");
        assert!(matches!(result, Err(ChangelogError::Config(_))));
    }

    #[test]
    fn test_builders() {
        let options = RenderOptions::default()
            .with_commit_list_limit(10)
            .with_commit_order(CommitOrder::Size)
            .with_unreleased_title("Upcoming");

        assert_eq!(options.commit_list_limit, 10);
        assert_eq!(options.commit_order, CommitOrder::Size);
        assert_eq!(options.unreleased_title, "Upcoming");
    }

    #[test]
    fn test_commit_order_from_str() {
        assert_eq!("legacy".parse::<CommitOrder>(), Ok(CommitOrder::Legacy));
        assert_eq!("SIZE".parse::<CommitOrder>(), Ok(CommitOrder::Size));
        assert!("newest".parse::<CommitOrder>().is_err());
    }
}
