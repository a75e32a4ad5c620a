//! Keep-a-Changelog Markdown renderer

use tracing::{debug, instrument};

use super::ordering::sort_commits;
use crate::config::RenderOptions;
use crate::model::{Commit, FixGroup, Merge, Release};

/// Renders release lists into a changelog for one repository.
///
/// Links are built by plain concatenation onto `origin`, which is expected to
/// be a base URL without a trailing slash (`https://github.com/owner/repo`).
#[derive(Debug, Clone)]
pub struct Renderer {
    origin: String,
    options: RenderOptions,
}

impl Renderer {
    pub fn new(origin: impl Into<String>, options: RenderOptions) -> Self {
        Self {
            origin: origin.into(),
            options,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the whole changelog. `releases` must be ordered newest first.
    #[instrument(skip(self, releases), fields(origin = %self.origin, release_count = releases.len()))]
    pub fn render(&self, releases: &[Release]) -> String {
        let mut sections = Vec::with_capacity(releases.len() + 1);
        sections.push(self.options.log_header.clone());
        for (index, release) in releases.iter().enumerate() {
            sections.push(self.render_release(release, releases.get(index + 1)));
        }

        let mut output = sections.join(&self.options.section_spacing);
        output.push('\n');

        debug!(output_len = output.len(), "changelog rendered");
        output
    }

    /// Render one release block. `previous` is the next older release.
    pub fn render_release(&self, release: &Release, previous: Option<&Release>) -> String {
        let mut blocks = vec![self.render_release_heading(release, previous)];
        let merges = self.render_merges(&release.merges);
        let fixes = self.render_fixes(&release.fixes);
        let fallback = merges.is_none() && fixes.is_none();

        blocks.extend(merges);
        blocks.extend(fixes);
        if fallback {
            blocks.extend(self.render_commits(&release.commits));
        }

        debug!(
            tag = release.tag_name().unwrap_or_default(),
            unreleased = release.is_unreleased(),
            merges = release.merges.len(),
            fixes = release.fixes.len(),
            commit_fallback = fallback,
            "release rendered"
        );
        blocks.join(&self.options.list_spacing)
    }

    fn render_release_heading(&self, release: &Release, previous: Option<&Release>) -> String {
        let title = self.render_release_title(release, previous);
        match release.date() {
            Some(date) => format!("## {} - {}", title, format_date(date)),
            None => format!("## {}", title),
        }
    }

    fn render_release_title(&self, release: &Release, previous: Option<&Release>) -> String {
        let (title, head) = match release.tag_name() {
            Some(tag) => (tag, tag),
            None => (self.options.unreleased_title.as_str(), "HEAD"),
        };
        match previous {
            Some(previous) => format!(
                "[{}]({}/compare/{}...{})",
                title,
                self.origin,
                previous.tag_name().unwrap_or_default(),
                head
            ),
            None => title.to_string(),
        }
    }

    fn render_list(&self, title: &str, list: &str) -> String {
        if title.is_empty() {
            list.to_string()
        } else {
            format!("### {}\n{}", title, list)
        }
    }

    fn render_merges(&self, merges: &[Merge]) -> Option<String> {
        if merges.is_empty() {
            return None;
        }
        let list = merges
            .iter()
            .map(|merge| self.render_merge(merge))
            .collect::<Vec<_>>()
            .join("\n");
        Some(self.render_list(&self.options.merges_title, &list))
    }

    fn render_merge(&self, merge: &Merge) -> String {
        let href = merge.pr.replacen('#', &format!("{}/pull/", self.origin), 1);
        format!(
            "* {}[{}]({}): {}",
            self.options.merge_prefix, merge.pr, href, merge.message
        )
    }

    fn render_fixes(&self, fixes: &[FixGroup]) -> Option<String> {
        if fixes.is_empty() {
            return None;
        }
        let list = fixes
            .iter()
            .map(|fix| self.render_fix(fix))
            .collect::<Vec<_>>()
            .join("\n");
        Some(self.render_list(&self.options.fixes_title, &list))
    }

    fn render_fix(&self, fix: &FixGroup) -> String {
        let numbers = fix
            .fixes
            .iter()
            .map(|reference| self.render_fix_number(reference))
            .collect::<Vec<_>>()
            .join(", ");
        format!("* {}{}: {}", self.options.fix_prefix, numbers, fix.commit.subject)
    }

    /// `#45` and `<origin>/issues/45` both render as `[#45](<origin>/issues/45)`.
    fn render_fix_number(&self, reference: &str) -> String {
        let issues = format!("{}/issues/", self.origin);
        let href = reference.replacen('#', &issues, 1);
        let number = reference.replacen(&issues, "#", 1);
        format!("[{}]({})", number, href)
    }

    fn render_commits(&self, commits: &[Commit]) -> Option<String> {
        if commits.is_empty() {
            return None;
        }
        let mut sorted: Vec<&Commit> = commits.iter().collect();
        sort_commits(&mut sorted, self.options.commit_order);
        let list = sorted
            .into_iter()
            .take(self.options.commit_list_limit)
            .map(|commit| self.render_commit(commit))
            .collect::<Vec<_>>()
            .join("\n");
        Some(self.render_list(&self.options.commits_title, &list))
    }

    fn render_commit(&self, commit: &Commit) -> String {
        let short_hash = leading(&commit.hash, self.options.commit_hash_length);
        format!(
            "* [`{}`]({}/commit/{}): {}",
            short_hash, self.origin, commit.hash, commit.subject
        )
    }
}

/// `YYYY-MM-DD` part of an ISO-8601 timestamp.
fn format_date(date: &str) -> &str {
    leading(date, 10)
}

/// First `count` characters of `s`, or all of it when shorter.
fn leading(s: &str, count: usize) -> &str {
    s.char_indices().nth(count).map_or(s, |(end, _)| &s[..end])
}
