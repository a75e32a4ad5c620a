//! Keep-a-Changelog renderer
//!
//! Turns an ordered list of releases (newest first) into a Markdown changelog.
//! Collecting the releases from a repository is left to the caller.

pub mod config;
pub mod error;
pub mod model;
pub mod render;

pub use config::{CommitOrder, RenderOptions};
pub use error::{ChangelogError, Result};
pub use model::{parse_releases, Commit, FixGroup, Merge, Release};
pub use render::Renderer;
