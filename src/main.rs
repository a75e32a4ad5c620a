use anyhow::{Context, Result};
use clap::Parser;
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::info;

use changelog_render::{parse_releases, CommitOrder, RenderOptions, Renderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Markdown,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

#[derive(Parser)]
#[command(name = "changelog-render")]
#[command(about = "Render a Keep-a-Changelog document from a JSON release list")]
struct Cli {
    /// Repository base URL used for links (e.g. https://github.com/owner/repo)
    #[arg(long, env = "CHANGELOG_ORIGIN")]
    origin: String,

    /// JSON release list, newest first (stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with render options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, default_value = "markdown")]
    format: OutputFormat,

    /// Max commits listed for releases without merges or fixes
    #[arg(long)]
    commit_limit: Option<usize>,

    /// Ordering of listed commits (legacy or size)
    #[arg(long)]
    commit_order: Option<CommitOrder>,

    /// Title used for changes not yet tagged
    #[arg(long)]
    unreleased_title: Option<String>,
}

impl Cli {
    fn render_options(&self) -> Result<RenderOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                RenderOptions::from_toml_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => RenderOptions::default(),
        };

        if let Some(limit) = self.commit_limit {
            options = options.with_commit_list_limit(limit);
        }
        if let Some(order) = self.commit_order {
            options = options.with_commit_order(order);
        }
        if let Some(title) = &self.unreleased_title {
            options = options.with_unreleased_title(title.clone());
        }
        Ok(options)
    }

    fn read_input(&self) -> Result<String> {
        match &self.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("reading releases {}", path.display())),
            None => {
                let mut buffer = String::new();
                std::io::stdin()
                    .read_to_string(&mut buffer)
                    .context("reading releases from stdin")?;
                Ok(buffer)
            }
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only the changelog
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let options = cli.render_options()?;
    let releases = parse_releases(&cli.read_input()?)?;
    info!(release_count = releases.len(), "loaded releases");

    let content = match cli.format {
        OutputFormat::Markdown => {
            let origin = cli.origin.trim_end_matches('/');
            Renderer::new(origin, options).render(&releases)
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&releases)?;
            json.push('\n');
            json
        }
    };

    if let Some(output_path) = &cli.output {
        std::fs::write(output_path, &content)
            .with_context(|| format!("writing {}", output_path.display()))?;
        info!(path = %output_path.display(), "changelog written");
    } else {
        std::io::stdout().write_all(content.as_bytes())?;
    }

    Ok(())
}
