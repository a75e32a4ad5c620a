//! Markdown changelog rendering

mod ordering;
mod renderer;
mod timsort;

pub use ordering::{legacy_compare, sort_commits};
pub use renderer::Renderer;
