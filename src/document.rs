use super::*;

/// A parsed markdown document: blocks in the order they are displayed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Top level blocks.
    pub blocks: Vec<Block>,
}

impl Document {
    /// Render the document as markup for the host editor.
    ///
    /// ```rust
    /// # use marknext_markdown::parse_markdown;
    /// let html = parse_markdown("# Title").to_html();
    /// assert_eq!(html, "<h1>Title</h1>");
    /// ```
    pub fn to_html(&self) -> String {
        html::render_document(self)
    }

    /// Build the tree the host's rendering layer hands back for reverse conversion.
    pub fn to_rendered(&self) -> Vec<RenderedNode> {
        rendered::from_document(self)
    }
}

/// A structural document unit occupying its own line(s).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Block {
    /// `#` to `######` heading.
    Heading {
        /// Heading level in `1..=6`.
        level: u8,
        /// Formatted heading text.
        children: Vec<Inline>,
    },
    /// Text that matched no other block rule.
    Paragraph(Vec<Inline>),
    /// Fenced code block.
    CodeBlock {
        /// Language tag from the opening fence.
        language: Option<String>,
        /// Raw, unformatted contents.
        text: String,
    },
    /// `---`, `***` or `___`.
    ThematicBreak,
    /// Single paragraph quote.
    Blockquote(Vec<Inline>),
    /// Ordered or bullet list.
    List(List),
    /// GFM pipe table.
    Table(Table),
}

/// A list of items. Ordered and bullet items are never mixed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct List {
    /// `true` for `1.` style lists.
    pub ordered: bool,
    /// Items in source order.
    pub items: Vec<ListItem>,
}

impl List {
    /// Whether any item carries a checkbox.
    pub fn has_tasks(&self) -> bool {
        self.items.iter().any(|item| item.is_task)
    }

    /// Number of list levels, counting this one.
    pub fn depth(&self) -> usize {
        1 + self
            .items
            .iter()
            .filter_map(|item| item.nested.as_ref())
            .map(List::depth)
            .max()
            .unwrap_or(0)
    }
}

/// One entry of a [`List`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListItem {
    /// The item carries a checkbox.
    pub is_task: bool,
    /// Checkbox state. Only meaningful when `is_task` is set.
    pub checked: bool,
    /// Formatted item text.
    pub children: Vec<Inline>,
    /// Deeper indented items.
    pub nested: Option<List>,
}

/// Column alignment from a table's separator row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// `---` or `:---`.
    #[default]
    Left,
    /// `:---:`.
    Center,
    /// `---:`.
    Right,
}

impl Alignment {
    /// CSS `text-align` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        }
    }
}

/// Table cell contents.
pub type Cell = Vec<Inline>;

/// GFM pipe table. Every row has exactly `header.len()` cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// Header cells.
    pub header: Vec<Cell>,
    /// One alignment per header cell.
    pub alignments: Vec<Alignment>,
    /// Body rows.
    pub rows: Vec<Vec<Cell>>,
}

/// A span-level unit within a block's text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Inline {
    /// Plain text.
    Text(String),
    /// `**strong**`.
    Strong(Vec<Inline>),
    /// `*emphasis*`.
    Emphasis(Vec<Inline>),
    /// `` `code` ``, kept raw.
    Code(String),
    /// `[text](href)`.
    Link {
        /// Link destination.
        href: String,
        /// Link text.
        children: Vec<Inline>,
    },
    /// Hard line break.
    LineBreak,
}

impl Inline {
    /// Concatenated text content, ignoring formatting.
    pub fn plain_text(&self) -> String {
        match self {
            Self::Text(text) | Self::Code(text) => text.clone(),
            Self::Strong(children) | Self::Emphasis(children) | Self::Link { children, .. } => {
                children.iter().map(Inline::plain_text).collect()
            }
            Self::LineBreak => "\n".to_owned(),
        }
    }
}
