use super::*;

use crate::lexer::{tokenize, Line, LineKind};

/// Recursive descent parser over line tokens.
///
/// Each block method consumes the lines it recognizes and leaves the cursor on
/// the first line it didn't, so no block can be matched twice and paragraphs
/// never swallow another block.
pub(crate) struct BlockParser<'i> {
    lines: Vec<Line<'i>>,
    position: usize,
    config: &'i Config,
}

/// Normalize `\r\n` and lone `\r` line endings to `\n`.
pub(crate) fn normalize(input: &str) -> Cow<'_, str> {
    if input.contains('\r') {
        Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(input)
    }
}

impl<'i> BlockParser<'i> {
    pub(crate) fn new(input: &'i str, config: &'i Config) -> Self {
        Self {
            lines: tokenize(input.trim()),
            position: 0,
            config,
        }
    }

    /// The main entry point for block parsing.
    pub(crate) fn parse(mut self) -> Document {
        let mut blocks = vec![];
        while let Some(line) = self.peek() {
            tracing::trace!(position = self.position, kind = ?line.kind);
            match line.kind {
                LineKind::Blank => self.position += 1,
                LineKind::Fence { language } if self.closing_fence().is_some() => {
                    blocks.push(self.fenced_code(language));
                }
                LineKind::Heading { level, text } => {
                    self.position += 1;
                    blocks.push(Block::Heading {
                        level,
                        children: parse_inline(text),
                    });
                }
                LineKind::Ordered { .. } => blocks.push(self.ordered_list()),
                LineKind::TableRow if self.table_starts_at(self.position) => {
                    let block = self.table().unwrap_or_else(|| self.paragraph());
                    blocks.push(block);
                }
                LineKind::Bullet { .. } => {
                    blocks.extend(self.bullet_lists().into_iter().map(Block::List));
                }
                LineKind::ThematicBreak => {
                    self.position += 1;
                    blocks.push(Block::ThematicBreak);
                }
                LineKind::Quote { text } => {
                    self.position += 1;
                    blocks.push(Block::Blockquote(parse_inline(text)));
                }
                _ => blocks.push(self.paragraph()),
            }
        }
        Document { blocks }
    }

    fn peek(&self) -> Option<Line<'i>> {
        self.lines.get(self.position).copied()
    }

    /// Index of the fence closing the one at the cursor.
    fn closing_fence(&self) -> Option<usize> {
        self.lines[self.position + 1..]
            .iter()
            .position(|line| matches!(line.kind, LineKind::Fence { language: None }))
            .map(|offset| self.position + 1 + offset)
    }

    fn table_starts_at(&self, index: usize) -> bool {
        match (self.lines.get(index), self.lines.get(index + 1)) {
            (Some(header), Some(separator)) => {
                header.kind == LineKind::TableRow
                    && separator.kind == LineKind::TableRow
                    && table::is_table_start(header.raw, separator.raw)
            }
            _ => false,
        }
    }

    /// Whether the line at `index` would be parsed as something other than
    /// paragraph text.
    fn starts_block(&self, index: usize) -> bool {
        let Some(line) = self.lines.get(index) else {
            return false;
        };
        match line.kind {
            LineKind::Blank | LineKind::Text => false,
            LineKind::TableRow => self.table_starts_at(index),
            LineKind::Fence { .. } => self.lines[index + 1..]
                .iter()
                .any(|line| matches!(line.kind, LineKind::Fence { language: None })),
            _ => true,
        }
    }

    fn fenced_code(&mut self, language: Option<&str>) -> Block {
        let start = self.position + 1;
        let end = self.closing_fence().unwrap_or(self.lines.len());
        let text = self.lines[start..end].iter().map(|line| line.raw).join("\n");
        self.position = end + 1;
        Block::CodeBlock {
            language: language.map(str::to_owned),
            text,
        }
    }

    fn ordered_list(&mut self) -> Block {
        let mut items = vec![];
        while let Some(Line {
            kind: LineKind::Ordered { text },
            ..
        }) = self.peek()
        {
            self.position += 1;
            items.push(ListItem {
                children: parse_inline(text),
                ..Default::default()
            });
        }
        Block::List(List {
            ordered: true,
            items,
        })
    }

    fn table(&mut self) -> Option<Block> {
        let header = self.lines[self.position].raw;
        let separator = self.lines[self.position + 1].raw;
        let body_start = self.position + 2;
        let body_len = self.lines[body_start..]
            .iter()
            .take_while(|line| line.kind == LineKind::TableRow)
            .count();
        let rows = self.lines[body_start..body_start + body_len]
            .iter()
            .map(|line| line.raw);
        let table = table::parse_table(header, separator, rows)?;
        self.position = body_start + body_len;
        Some(Block::Table(table))
    }

    fn bullet_lists(&mut self) -> Vec<List> {
        let mut builder = ListBuilder::new(self.config.task_markers);
        while let Some(Line {
            kind: LineKind::Bullet { indent, content },
            ..
        }) = self.peek()
        {
            self.position += 1;
            builder.push_line(indent, content);
        }
        builder.finish()
    }

    /// Consume the line at the cursor and every following line that neither is
    /// blank nor starts another block.
    fn paragraph(&mut self) -> Block {
        let start = self.position;
        self.position += 1;
        while self
            .peek()
            .is_some_and(|line| line.kind != LineKind::Blank && !self.starts_block(self.position))
        {
            self.position += 1;
        }
        let text = self.lines[start..self.position]
            .iter()
            .map(|line| line.raw.trim())
            .filter(|line| !line.is_empty())
            .join(" ");
        Block::Paragraph(parse_inline(&text))
    }
}
