use super::*;

use textwrap::Options as TextWrapOptions;
use unicode_width::UnicodeWidthStr;

/// Two trailing spaces and a newline.
pub(crate) const MARKDOWN_HARD_BREAK: &str = "  \n";

/// Minimum column width of a written table, the length of `---`.
const MIN_COLUMN_WIDTH: usize = 3;

/// Writes a rendered tree back out as markdown.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Walker<'c> {
    config: &'c Config,
    /// Paragraph width, `None` inside quotes.
    max_width: Option<usize>,
}

impl<'c> Walker<'c> {
    pub(crate) fn new(config: &'c Config) -> Self {
        Self {
            config,
            max_width: config.max_width,
        }
    }

    /// Convert top level nodes. Blocks that produce no text are skipped, the
    /// rest are separated by a blank line.
    pub(crate) fn walk(&self, nodes: &[RenderedNode]) -> String {
        nodes
            .iter()
            .map(|node| self.block(node))
            .filter(|block| !block.is_empty())
            .join("\n\n")
    }

    fn block(&self, node: &RenderedNode) -> String {
        let (kind, children) = match node {
            RenderedNode::Text(text) => return text.split_whitespace().join(" "),
            RenderedNode::Element { kind, children } => (kind, children),
        };
        tracing::trace!(?kind, children = children.len(), "walking block");
        match kind {
            ElementKind::Heading(level) => {
                let level = usize::from((*level).clamp(1, 6));
                format!("{} {}", "#".repeat(level), inline_text(children))
            }
            ElementKind::Paragraph => self.paragraph(children),
            ElementKind::BulletList | ElementKind::OrderedList => self.list(node, 0),
            ElementKind::CodeBlock { language } => format!(
                "```{}\n{}\n```",
                language.as_deref().unwrap_or_default(),
                node.text_content().trim_end_matches('\n')
            ),
            ElementKind::Blockquote => self
                .unwrapped()
                .walk(children)
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| format!("> {line}"))
                .join("\n"),
            ElementKind::ThematicBreak => "---".to_owned(),
            ElementKind::Table => self.table(node),
            _ if children.iter().any(RenderedNode::is_block) => self.walk(children),
            _ => inline::to_markdown(std::iter::once(node)).trim().to_owned(),
        }
    }

    /// Each quoted line is its own quote, so quotes are never rewrapped.
    fn unwrapped(&self) -> Self {
        Self {
            max_width: None,
            ..*self
        }
    }

    fn paragraph(&self, children: &[RenderedNode]) -> String {
        let text = inline::to_markdown(children);
        let text = text.trim();
        let Some(max_width) = self.max_width else {
            return text.to_owned();
        };
        if text.lines().all(|line| line.width() <= max_width) {
            return text.to_owned();
        }

        let wrap_options = TextWrapOptions::new(max_width)
            .break_words(false)
            .word_separator(textwrap::WordSeparator::AsciiSpace)
            .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);
        text.split(MARKDOWN_HARD_BREAK)
            .map(|text| {
                let wrapped = textwrap::fill(text, wrap_options.clone());
                keep_block_markers_inline(&wrapped)
            })
            .join(MARKDOWN_HARD_BREAK)
    }

    /// Write a list and its nested lists, two spaces of indentation per level.
    fn list(&self, node: &RenderedNode, depth: usize) -> String {
        let ordered = matches!(node.kind(), Some(ElementKind::OrderedList));
        let indent = "  ".repeat(depth);
        let bullet = char::from(&self.config.bullet);
        let mut lines = vec![];
        let mut number = 0;

        for item in node.children() {
            if is_list(item) {
                lines.push(self.list(item, depth + 1));
                continue;
            }
            number += 1;
            let marker = if ordered {
                format!("{number}.")
            } else {
                bullet.to_string()
            };
            let checked = match item.kind() {
                Some(ElementKind::ListItem { checked }) => *checked,
                _ => None,
            };

            let (nested, content): (Vec<_>, Vec<_>) = match item {
                RenderedNode::Element { children, .. } => {
                    children.iter().partition(|child| is_list(child))
                }
                RenderedNode::Text(_) => (vec![], vec![item]),
            };
            let text = single_line(content);
            let line = match checked {
                Some(checked) => {
                    // The checkbox state wins over any marker still in the text.
                    let text = strip_literal_task_marker(&text);
                    let checkbox = if checked { "[x]" } else { "[ ]" };
                    format!("{indent}{marker} {checkbox} {text}")
                }
                None => format!("{indent}{marker} {text}"),
            };
            lines.push(line.trim_end().to_owned());
            lines.extend(nested.into_iter().map(|list| self.list(list, depth + 1)));
        }
        tracing::trace!(depth, items = number, "walked list");
        lines.join("\n")
    }

    fn table(&self, table: &RenderedNode) -> String {
        let mut rows = vec![];
        collect_rows(table, &mut rows);
        let Some(header) = rows.first() else {
            return String::new();
        };

        let alignments = header
            .children()
            .iter()
            .map(|cell| match cell.kind() {
                Some(ElementKind::TableCell { alignment, .. }) => *alignment,
                _ => Alignment::default(),
            })
            .collect_vec();
        let cells = rows
            .iter()
            .map(|row| {
                row.children()
                    .iter()
                    .map(|cell| single_line(cell.children()))
                    .collect_vec()
            })
            .collect_vec();
        let columns = cells.iter().map(Vec::len).max().unwrap_or_default();
        if columns == 0 {
            return String::new();
        }

        let mut widths = vec![MIN_COLUMN_WIDTH; columns];
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }

        let write_row = |row: &[String]| {
            let cells = widths
                .iter()
                .enumerate()
                .map(|(column, width)| {
                    let cell = row.get(column).map(String::as_str).unwrap_or_default();
                    let padding = width.saturating_sub(cell.width());
                    format!("{cell}{}", " ".repeat(padding))
                })
                .collect_vec();
            format!("| {} |", cells.join(" | "))
        };
        let separator = widths
            .iter()
            .enumerate()
            .map(
                |(column, width)| match alignments.get(column).copied().unwrap_or_default() {
                    Alignment::Left => "-".repeat(*width),
                    Alignment::Center => format!(":{}:", "-".repeat(width - 2)),
                    Alignment::Right => format!("{}:", "-".repeat(width - 1)),
                },
            )
            .collect_vec();

        let mut lines = vec![
            write_row(cells[0].as_slice()),
            format!("| {} |", separator.join(" | ")),
        ];
        lines.extend(cells[1..].iter().map(|row| write_row(row.as_slice())));
        lines.join("\n")
    }
}

fn is_list(node: &RenderedNode) -> bool {
    matches!(
        node.kind(),
        Some(ElementKind::BulletList | ElementKind::OrderedList)
    )
}

/// Move words that would start another block at the beginning of a wrapped
/// line back onto the line before it.
fn keep_block_markers_inline(wrapped: &str) -> String {
    let mut lines: Vec<String> = vec![];
    for line in wrapped.lines() {
        let mut line = line;
        if let Some(previous) = lines.last_mut() {
            while !line.is_empty() && !lexer::is_text(line) {
                let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
                tracing::trace!(word, "keeping block marker on the previous line");
                previous.push(' ');
                previous.push_str(word);
                line = rest.trim_start();
            }
        }
        if !line.is_empty() {
            lines.push(line.to_owned());
        }
    }
    lines.join("\n")
}

fn strip_literal_task_marker(text: &str) -> &str {
    ["[ ]", "[x]", "[X]", "[]"]
        .iter()
        .find_map(|marker| text.strip_prefix(marker))
        .map_or(text, str::trim_start)
}

/// Inline markdown for a single line: whitespace runs in text collapse to one
/// space and hard breaks become a space, code spans are kept as written.
fn single_line<'a>(nodes: impl IntoIterator<Item = &'a RenderedNode>) -> String {
    let nodes = nodes.into_iter().map(flatten_whitespace).collect_vec();
    inline::to_markdown(&nodes).trim().to_owned()
}

fn flatten_whitespace(node: &RenderedNode) -> RenderedNode {
    match node {
        RenderedNode::Text(text) => RenderedNode::Text(collapse_whitespace(text)),
        RenderedNode::Element {
            kind: ElementKind::LineBreak,
            ..
        } => RenderedNode::text(" "),
        RenderedNode::Element {
            kind: ElementKind::Code,
            ..
        } => node.clone(),
        RenderedNode::Element { kind, children } => RenderedNode::element(
            kind.clone(),
            children.iter().map(flatten_whitespace).collect(),
        ),
    }
}

fn collapse_whitespace(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                output.push(' ');
            }
            in_space = true;
        } else {
            output.push(c);
            in_space = false;
        }
    }
    output
}

fn inline_text(children: &[RenderedNode]) -> String {
    inline::to_markdown(children).trim().to_owned()
}

/// Rows of a table, in order, looking through any container between the
/// table and its rows.
fn collect_rows<'a>(node: &'a RenderedNode, rows: &mut Vec<&'a RenderedNode>) {
    for child in node.children() {
        match child.kind() {
            Some(ElementKind::TableRow) => rows.push(child),
            Some(_) => collect_rows(child, rows),
            None => {}
        }
    }
}
