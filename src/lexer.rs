//! Split normalized markdown into lines tagged with the block construct they
//! could start. Each line is classified exactly once; the parser decides what
//! to do with runs of lines.

/// What a single line looks like on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// Three backticks, optionally followed by a language tag.
    Fence { language: Option<&'a str> },
    /// `#` to `######` followed by whitespace and text.
    Heading { level: u8, text: &'a str },
    /// `<number>. text` at the start of the line.
    Ordered { text: &'a str },
    /// Starts and ends with `|`. Only a table if the next line is a separator.
    TableRow,
    /// `-` or `*` bullet, possibly indented. A bare marker is an empty item.
    Bullet { indent: usize, content: &'a str },
    /// Three or more of the same `-`, `*` or `_`.
    ThematicBreak,
    /// `>` followed by text.
    Quote { text: &'a str },
    Blank,
    Text,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    pub(crate) raw: &'a str,
    pub(crate) kind: LineKind<'a>,
}

/// Width of one list nesting level, in spaces.
pub(crate) const INDENT_WIDTH: usize = 2;

pub(crate) fn tokenize(input: &str) -> Vec<Line<'_>> {
    input
        .split('\n')
        .map(|raw| Line {
            raw,
            kind: classify(raw),
        })
        .collect()
}

/// Whether `line` would be read as plain paragraph text.
pub(crate) fn is_text(line: &str) -> bool {
    classify(line) == LineKind::Text
}

fn classify(raw: &str) -> LineKind<'_> {
    let line = raw.trim_end();
    if line.is_empty() {
        return LineKind::Blank;
    }

    if let Some(kind) = fence(line)
        .or_else(|| heading(line))
        .or_else(|| ordered(line))
        .or_else(|| table_row(line))
        .or_else(|| bullet(line))
        .or_else(|| thematic_break(line))
        .or_else(|| quote(line))
    {
        return kind;
    }
    LineKind::Text
}

fn fence(line: &str) -> Option<LineKind<'_>> {
    let rest = line.trim_start().strip_prefix("```")?.trim();
    if rest.is_empty() {
        return Some(LineKind::Fence { language: None });
    }
    rest.chars()
        .all(|c| c.is_alphanumeric() || c == '_')
        .then_some(LineKind::Fence {
            language: Some(rest),
        })
}

fn heading(line: &str) -> Option<LineKind<'_>> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then_some(LineKind::Heading {
        level: level as u8,
        text,
    })
}

fn ordered(line: &str) -> Option<LineKind<'_>> {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then_some(LineKind::Ordered { text })
}

fn table_row(line: &str) -> Option<LineKind<'_>> {
    (line.len() >= 2 && line.starts_with('|') && line.ends_with('|')).then_some(LineKind::TableRow)
}

fn bullet(line: &str) -> Option<LineKind<'_>> {
    let content_start = line.trim_start_matches([' ', '\t']);
    let leading = &line[..line.len() - content_start.len()];
    let rest = content_start.strip_prefix(['-', '*'])?;
    if !(rest.is_empty() || rest.starts_with(char::is_whitespace)) {
        return None;
    }
    Some(LineKind::Bullet {
        indent: indent_level(leading),
        content: rest.trim(),
    })
}

/// Nesting level of a run of leading whitespace. Tabs count as one level.
pub(crate) fn indent_level(leading: &str) -> usize {
    let width: usize = leading
        .chars()
        .map(|c| if c == '\t' { INDENT_WIDTH } else { 1 })
        .sum();
    width / INDENT_WIDTH
}

fn thematic_break(line: &str) -> Option<LineKind<'_>> {
    let first = line.chars().next()?;
    (matches!(first, '-' | '*' | '_') && line.len() >= 3 && line.chars().all(|c| c == first))
        .then_some(LineKind::ThematicBreak)
}

fn quote(line: &str) -> Option<LineKind<'_>> {
    let rest = line.strip_prefix('>')?;
    let rest = rest.strip_prefix(char::is_whitespace).unwrap_or(rest);
    if rest.is_empty() {
        return None;
    }
    Some(LineKind::Quote { text: rest.trim() })
}
