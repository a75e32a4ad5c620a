//! Release records supplied by the history collector

mod types;

pub use types::{Commit, FixGroup, Merge, Release};

use crate::error::Result;

/// Parse a JSON array of releases, newest first. Order is kept as given.
pub fn parse_releases(json: &str) -> Result<Vec<Release>> {
    let releases: Vec<Release> = serde_json::from_str(json)?;
    tracing::debug!(release_count = releases.len(), "parsed release list");
    Ok(releases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChangelogError;

    #[test]
    fn test_parse_full_release() {
        let json = r##"[
            {
                "tag": "v1.1.0",
                "date": "2020-05-01T12:00:00Z",
                "merges": [{"pr": "#12", "message": "Add feature"}],
                "fixes": [{
                    "fixes": ["#4", "#5"],
                    "commit": {"hash": "abc1234def", "subject": "Fix crash", "insertions": 3, "deletions": 1}
                }],
                "commits": [{"hash": "abc1234def", "subject": "Fix crash", "insertions": 3, "deletions": 1}]
            }
        ]"##;

        let releases = parse_releases(json).unwrap();

        assert_eq!(releases.len(), 1);
        let release = &releases[0];
        assert_eq!(release.tag.as_deref(), Some("v1.1.0"));
        assert_eq!(release.date.as_deref(), Some("2020-05-01T12:00:00Z"));
        assert_eq!(release.merges[0].pr, "#12");
        assert_eq!(release.fixes[0].fixes, vec!["#4", "#5"]);
        assert_eq!(release.commits[0].size(), 4);
    }

    #[test]
    fn test_parse_defaults_missing_fields() {
        let json = r#"[{"commits": [{"hash": "ff00", "subject": "Initial commit"}]}]"#;

        let releases = parse_releases(json).unwrap();

        let release = &releases[0];
        assert!(release.is_unreleased());
        assert!(release.date.is_none());
        assert!(release.merges.is_empty());
        assert!(release.fixes.is_empty());
        assert_eq!(release.commits[0].insertions, 0);
        assert_eq!(release.commits[0].deletions, 0);
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let json = r#"[{"tag": "v1.0.0", "href": "https://example.com", "commits": [
            {"hash": "ff00", "subject": "Initial", "author": "someone", "date": "2020-01-01"}
        ]}]"#;

        let releases = parse_releases(json).unwrap();

        assert_eq!(releases[0].commits[0].subject, "Initial");
    }

    #[test]
    fn test_parse_keeps_order() {
        let json = r#"[{"tag": "v1.0.0"}, {"tag": "v2.0.0"}, {}]"#;

        let tags: Vec<_> = parse_releases(json)
            .unwrap()
            .into_iter()
            .map(|r| r.tag)
            .collect();

        assert_eq!(
            tags,
            vec![Some("v1.0.0".to_string()), Some("v2.0.0".to_string()), None]
        );
    }

    #[test]
    fn test_empty_tag_and_date_count_as_missing() {
        let json = r#"[{"tag": "", "date": ""}, {"tag": "v1.0.0", "date": "2020-01-02"}]"#;

        let releases = parse_releases(json).unwrap();

        assert!(releases[0].is_unreleased());
        assert_eq!(releases[0].tag_name(), None);
        assert_eq!(releases[0].date(), None);
        assert_eq!(releases[1].tag_name(), Some("v1.0.0"));
        assert_eq!(releases[1].date(), Some("2020-01-02"));
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_releases("{not json");
        assert!(matches!(result, Err(ChangelogError::InvalidInput(_))));
    }

    #[test]
    fn test_commit_size_saturates() {
        let commit = Commit {
            hash: "a".to_string(),
            subject: "big".to_string(),
            insertions: u64::MAX,
            deletions: 1,
        };
        assert_eq!(commit.size(), u64::MAX);
    }
}
