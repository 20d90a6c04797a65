//! `marknext-md`: convert markdown to editor markup and rendered trees back to
//! markdown from the command line.

use std::{
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use marknext_markdown::{BulletMarker, ConverterBuilder, RenderedNode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "marknext-md", version, about = "Markdown <-> editor document converter")]
#[command(after_help = "\
EXAMPLES:

    # Markdown to editor markup
    marknext-md to-html notes.md

    # Check what a round trip through the editor does to a file
    cat notes.md | marknext-md normalize --bullet '*'

    # Inspect the rendered tree, then write it back
    marknext-md tree notes.md > tree.json
    marknext-md to-markdown tree.json")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Rewrap paragraphs at this column when writing markdown
    #[arg(long, global = true)]
    max_width: Option<usize>,

    /// Only accept `[ ]`, `[x]` and `[X]` as task markers
    #[arg(long, global = true)]
    strict_tasks: bool,

    /// Bullet list marker to write, `-` or `*`
    #[arg(long, global = true, default_value = "-")]
    bullet: BulletMarker,
}

#[derive(Subcommand)]
enum Command {
    /// Convert markdown to editor markup
    ToHtml {
        /// Markdown file, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Convert a JSON rendered tree to markdown
    ToMarkdown {
        /// JSON file, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Parse markdown and write it back out
    Normalize {
        /// Markdown file, stdin when omitted
        file: Option<PathBuf>,
    },
    /// Print the rendered tree of a markdown file as JSON
    Tree {
        /// Markdown file, stdin when omitted
        file: Option<PathBuf>,
    },
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display())),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut builder = ConverterBuilder::default();
    builder
        .max_width(cli.max_width)
        .strict_task_markers(cli.strict_tasks)
        .bullet_marker(cli.bullet);
    let converter = builder.build();
    tracing::debug!(config = ?converter.config(), "starting");

    let output = match &cli.command {
        Command::ToHtml { file } => converter.to_html(&read_input(file.as_deref())?),
        Command::ToMarkdown { file } => {
            let input = read_input(file.as_deref())?;
            let nodes: Vec<RenderedNode> =
                serde_json::from_str(&input).context("failed to decode the rendered tree")?;
            converter.to_markdown(&nodes)
        }
        Command::Normalize { file } => {
            let document = converter.parse(&read_input(file.as_deref())?);
            converter.to_markdown(&document.to_rendered())
        }
        Command::Tree { file } => {
            let document = converter.parse(&read_input(file.as_deref())?);
            serde_json::to_string_pretty(&document.to_rendered())
                .context("failed to encode the rendered tree")?
        }
    };

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}").context("failed to write output")?;
    Ok(())
}
