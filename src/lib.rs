//! Convert between markdown and the document tree of a rich text editor.
//!
//! [marknext_markdown] parses a practical subset of [GitHub Flavored Markdown]
//! (headings, paragraphs, bold, italic, inline code, links, fenced code
//! blocks, blockquotes, thematic breaks, nested bullet and task lists, ordered
//! lists and pipe tables) into a [`Document`], renders it as the markup the
//! editor loads, and writes the editor's rendered tree back out as markdown.
//!
//! [marknext_markdown]: index.html
//! [GitHub Flavored Markdown]: https://github.github.com/gfm/
//!
//! # Getting Started
//!
//! ```rust
//! use marknext_markdown::markdown_to_html;
//!
//! let markdown = r##"# Getting Started
//! Some **bold** text.
//! "##;
//!
//! let html = markdown_to_html(markdown);
//! assert_eq!(html, "<h1>Getting Started</h1>\n<p>Some <strong>bold</strong> text.</p>");
//! ```
//!
//! # Back to markdown
//!
//! ```rust
//! use marknext_markdown::{parse_markdown, rendered_to_markdown};
//!
//! let markdown = r##"3. one
//! 7. two
//!
//! - [ ] todo
//!   - nested
//! "##;
//!
//! let rendered = parse_markdown(markdown).to_rendered();
//! let output = rendered_to_markdown(&rendered);
//! assert_eq!(output, "1. one\n2. two\n\n- [ ] todo\n  - nested");
//! ```
//!
//! # Using the [Builder](ConverterBuilder)
//!
//! ```rust
//! use marknext_markdown::{parse_markdown, rendered_to_markdown_with_builder, BulletMarker, ConverterBuilder};
//!
//! let mut builder = ConverterBuilder::default();
//! builder.bullet_marker(BulletMarker::Asterisk);
//!
//! let rendered = parse_markdown("- a\n- b").to_rendered();
//! let output = rendered_to_markdown_with_builder(&rendered, builder);
//! assert_eq!(output, "* a\n* b");
//! ```

use std::{borrow::Cow, ops::Range};

use itertools::Itertools;

use inline::parse_inline;
use list::ListBuilder;
use parser::BlockParser;
use walker::MARKDOWN_HARD_BREAK;

mod builder;
mod config;
mod detect;
mod document;
mod escape;
mod html;
mod inline;
mod lexer;
mod list;
mod parser;
mod rendered;
mod table;
#[cfg(test)]
mod test;
mod walker;

pub use builder::{Converter, ConverterBuilder};
pub use config::{Config, TaskMarkers};
pub use detect::is_likely_markdown;
pub use document::{Alignment, Block, Cell, Document, Inline, List, ListItem, Table};
pub use list::{BulletMarker, InvalidMarker};
pub use rendered::{ElementKind, RenderedNode};

/// Parse markdown with all the default settings.
///
/// ```rust
/// # use marknext_markdown::{parse_markdown, Block, Inline};
/// let document = parse_markdown("> quote line");
/// assert_eq!(
///     document.blocks,
///     [Block::Blockquote(vec![Inline::Text("quote line".to_owned())])]
/// );
/// ```
pub fn parse_markdown(input: &str) -> Document {
    parse_markdown_with_builder(input, ConverterBuilder::default())
}

/// Parse markdown with user specified settings.
///
/// ```rust
/// # use marknext_markdown::{parse_markdown_with_builder, Block, ConverterBuilder};
/// let mut builder = ConverterBuilder::default();
/// builder.strict_task_markers(true);
/// let document = parse_markdown_with_builder("- [] not a task", builder);
/// let Block::List(list) = &document.blocks[0] else { unreachable!() };
/// assert!(!list.items[0].is_task);
/// ```
pub fn parse_markdown_with_builder(input: &str, builder: ConverterBuilder) -> Document {
    tracing::trace!(?builder);
    builder.build().parse(input)
}

/// Convert markdown to editor markup with all the default settings.
///
/// ```rust
/// # use marknext_markdown::markdown_to_html;
/// assert_eq!(markdown_to_html("---"), "<hr/>");
/// ```
pub fn markdown_to_html(input: &str) -> String {
    markdown_to_html_with_builder(input, ConverterBuilder::default())
}

/// Convert markdown to editor markup with user specified settings.
pub fn markdown_to_html_with_builder(input: &str, builder: ConverterBuilder) -> String {
    tracing::trace!(?builder);
    builder.build().to_html(input)
}

/// Write a rendered tree back out as markdown with all the default settings.
///
/// ```rust
/// # use marknext_markdown::{rendered_to_markdown, ElementKind, RenderedNode};
/// let nodes = [RenderedNode::element(
///     ElementKind::Paragraph,
///     vec![RenderedNode::element(ElementKind::Strong, vec![RenderedNode::text("X")])],
/// )];
/// assert_eq!(rendered_to_markdown(&nodes), "**X**");
/// ```
pub fn rendered_to_markdown(nodes: &[RenderedNode]) -> String {
    rendered_to_markdown_with_builder(nodes, ConverterBuilder::default())
}

/// Write a rendered tree back out as markdown with user specified settings.
pub fn rendered_to_markdown_with_builder(nodes: &[RenderedNode], builder: ConverterBuilder) -> String {
    tracing::trace!(?builder);
    builder.build().to_markdown(nodes)
}
