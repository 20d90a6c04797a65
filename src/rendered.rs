use super::*;

/// A node of the document tree as the host editor renders it.
///
/// The host builds this from its own representation, possibly after the user
/// edited it. Node kinds outside [`ElementKind`]'s vocabulary can be passed as
/// [`ElementKind::Other`] and are treated as transparent containers.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RenderedNode {
    /// Text content.
    Text(String),
    /// An element and its children.
    Element {
        /// What the element represents.
        kind: ElementKind,
        /// Child nodes in display order.
        #[cfg_attr(feature = "serde", serde(default))]
        children: Vec<RenderedNode>,
    },
}

/// Element vocabulary understood by the reverse conversion.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ElementKind {
    /// `h1` to `h6`.
    Heading(u8),
    /// Paragraph.
    Paragraph,
    /// Unordered list.
    BulletList,
    /// Ordered list.
    OrderedList,
    /// List item. `checked` is the state of the item's checkbox, if it has one.
    ListItem {
        /// Checkbox state of a task item.
        checked: Option<bool>,
    },
    /// Fenced code block.
    CodeBlock {
        /// Language attribute.
        language: Option<String>,
    },
    /// Block quote.
    Blockquote,
    /// Horizontal rule.
    ThematicBreak,
    /// Table. Children are rows, possibly inside other containers.
    Table,
    /// Table row.
    TableRow,
    /// Header or body cell.
    TableCell {
        /// `th` rather than `td`.
        header: bool,
        /// Column alignment.
        alignment: Alignment,
    },
    /// Bold.
    Strong,
    /// Italic.
    Emphasis,
    /// Inline code.
    Code,
    /// Link.
    Link {
        /// Link destination.
        href: String,
    },
    /// Hard line break.
    LineBreak,
    /// Anything else, named by the host.
    Other(String),
}

impl ElementKind {
    /// Block level kinds occupy their own line(s) in markdown.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Self::Heading(_)
                | Self::Paragraph
                | Self::BulletList
                | Self::OrderedList
                | Self::CodeBlock { .. }
                | Self::Blockquote
                | Self::ThematicBreak
                | Self::Table
        )
    }
}

impl RenderedNode {
    /// A text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// An element node.
    pub fn element(kind: ElementKind, children: Vec<RenderedNode>) -> Self {
        Self::Element { kind, children }
    }

    /// The element kind, `None` for text.
    pub fn kind(&self) -> Option<&ElementKind> {
        match self {
            Self::Text(_) => None,
            Self::Element { kind, .. } => Some(kind),
        }
    }

    /// Child nodes. Text has none.
    pub fn children(&self) -> &[RenderedNode] {
        match self {
            Self::Text(_) => &[],
            Self::Element { children, .. } => children,
        }
    }

    /// Whether this is a block level element.
    pub fn is_block(&self) -> bool {
        self.kind().is_some_and(ElementKind::is_block)
    }

    /// Concatenation of all descendant text.
    pub fn text_content(&self) -> String {
        let mut output = String::new();
        self.push_text_content(&mut output);
        output
    }

    fn push_text_content(&self, output: &mut String) {
        match self {
            Self::Text(text) => output.push_str(text),
            Self::Element { children, .. } => {
                for child in children {
                    child.push_text_content(output);
                }
            }
        }
    }
}

/// Build the rendered tree for a parsed document.
pub(crate) fn from_document(document: &Document) -> Vec<RenderedNode> {
    document.blocks.iter().map(from_block).collect()
}

fn from_block(block: &Block) -> RenderedNode {
    match block {
        Block::Heading { level, children } => {
            RenderedNode::element(ElementKind::Heading(*level), from_inline(children))
        }
        Block::Paragraph(children) => {
            RenderedNode::element(ElementKind::Paragraph, from_inline(children))
        }
        Block::CodeBlock { language, text } => RenderedNode::element(
            ElementKind::CodeBlock {
                language: language.clone(),
            },
            vec![RenderedNode::text(text.as_str())],
        ),
        Block::ThematicBreak => RenderedNode::element(ElementKind::ThematicBreak, vec![]),
        Block::Blockquote(children) => RenderedNode::element(
            ElementKind::Blockquote,
            vec![RenderedNode::element(
                ElementKind::Paragraph,
                from_inline(children),
            )],
        ),
        Block::List(list) => from_list(list),
        Block::Table(table) => from_table(table),
    }
}

fn from_list(list: &List) -> RenderedNode {
    let kind = if list.ordered {
        ElementKind::OrderedList
    } else {
        ElementKind::BulletList
    };
    let items = list
        .items
        .iter()
        .map(|item| {
            let mut children = from_inline(&item.children);
            children.extend(item.nested.as_ref().map(from_list));
            RenderedNode::element(
                ElementKind::ListItem {
                    checked: item.is_task.then_some(item.checked),
                },
                children,
            )
        })
        .collect();
    RenderedNode::element(kind, items)
}

fn from_table(table: &Table) -> RenderedNode {
    let row = |cells: &[Cell], header: bool| {
        let cells = cells
            .iter()
            .zip(&table.alignments)
            .map(|(cell, alignment)| {
                RenderedNode::element(
                    ElementKind::TableCell {
                        header,
                        alignment: *alignment,
                    },
                    from_inline(cell),
                )
            })
            .collect();
        RenderedNode::element(ElementKind::TableRow, cells)
    };
    let rows = std::iter::once(row(&table.header, true))
        .chain(table.rows.iter().map(|cells| row(cells, false)))
        .collect();
    RenderedNode::element(ElementKind::Table, rows)
}

fn from_inline(nodes: &[Inline]) -> Vec<RenderedNode> {
    nodes
        .iter()
        .map(|node| match node {
            Inline::Text(text) => RenderedNode::text(text.as_str()),
            Inline::Strong(children) => {
                RenderedNode::element(ElementKind::Strong, from_inline(children))
            }
            Inline::Emphasis(children) => {
                RenderedNode::element(ElementKind::Emphasis, from_inline(children))
            }
            Inline::Code(code) => {
                RenderedNode::element(ElementKind::Code, vec![RenderedNode::text(code.as_str())])
            }
            Inline::Link { href, children } => RenderedNode::element(
                ElementKind::Link { href: href.clone() },
                from_inline(children),
            ),
            Inline::LineBreak => RenderedNode::element(ElementKind::LineBreak, vec![]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_items_carry_checkbox_state() {
        let rendered = parse_markdown("- [x] done\n- plain").to_rendered();
        let [list] = &rendered[..] else {
            panic!("expected one node, got {rendered:?}");
        };
        let states = list
            .children()
            .iter()
            .map(|item| match item.kind() {
                Some(ElementKind::ListItem { checked }) => *checked,
                kind => panic!("unexpected {kind:?}"),
            })
            .collect_vec();
        assert_eq!(states, [Some(true), None]);
    }

    #[test]
    fn text_content_ignores_markup() {
        let rendered = parse_markdown("**a** [b](c) `d`").to_rendered();
        assert_eq!(rendered[0].text_content(), "a b d");
        assert!(rendered[0].is_block());
        assert!(!rendered[0].children()[0].is_block());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_shape() {
        let node = RenderedNode::element(ElementKind::Heading(2), vec![RenderedNode::text("Hi")]);
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(
            json,
            r#"{"element":{"kind":{"heading":2},"children":[{"text":"Hi"}]}}"#
        );
        let back: RenderedNode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, node);
    }
}
