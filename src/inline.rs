use super::*;

/// Either a single unmatched character or a node an earlier rule produced.
///
/// Produced nodes are opaque to later rules: they never contain delimiters the
/// later rules look for, so `*a `b*` c*` can't match inside the code span.
#[derive(Debug)]
enum Atom {
    Char(char),
    Node(Inline),
}

fn is_char(atom: Option<&Atom>, expected: char) -> bool {
    matches!(atom, Some(Atom::Char(c)) if *c == expected)
}

/// Convert a line of raw text into inline nodes.
///
/// Rules run in a fixed order: code spans, `**strong**`, `*emphasis*`, then
/// `[links](url)`. Links are also recognized inside strong and emphasis text.
pub(crate) fn parse_inline(text: &str) -> Vec<Inline> {
    let atoms = code_spans(text);
    let atoms = delimited(atoms, 2);
    let atoms = delimited(atoms, 1);
    collect(links(atoms))
}

fn code_spans(text: &str) -> Vec<Atom> {
    let chars = text.chars().collect_vec();
    let mut atoms = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '`' {
            let close = chars[i + 1..].iter().position(|c| *c == '`');
            if let Some(len @ 1..) = close {
                let code = chars[i + 1..i + 1 + len].iter().collect();
                atoms.push(Atom::Node(Inline::Code(code)));
                i += len + 2;
                continue;
            }
        }
        atoms.push(Atom::Char(chars[i]));
        i += 1;
    }
    atoms
}

/// Match `width` asterisks, one or more non-asterisks, then `width` asterisks.
fn delimited(atoms: Vec<Atom>, width: usize) -> Vec<Atom> {
    let mut matches = vec![];
    let mut i = 0;
    while i + width <= atoms.len() {
        let opens = (i..i + width).all(|j| is_char(atoms.get(j), '*'));
        if opens {
            let start = i + width;
            let close = atoms[start..]
                .iter()
                .position(|atom| is_char(Some(atom), '*'))
                .map(|len| (len, start + len));
            if let Some((1.., close)) = close {
                if (close..close + width).all(|j| is_char(atoms.get(j), '*')) {
                    matches.push((i..close + width, ()));
                    i = close + width;
                    continue;
                }
            }
        }
        i += 1;
    }

    replace_matches(atoms, matches, |matched, ()| {
        let inner_len = matched.len() - 2 * width;
        let inner = collect(matched.into_iter().skip(width).take(inner_len));
        if width == 2 {
            Inline::Strong(inner)
        } else {
            Inline::Emphasis(inner)
        }
    })
}

/// Lengths of a link's text and destination, in atoms.
#[derive(Debug, Clone, Copy)]
struct LinkParts {
    text: usize,
    href: usize,
}

fn links(atoms: Vec<Atom>) -> Vec<Atom> {
    // Strong and emphasis text was already settled; look for links inside it too.
    let atoms = atoms
        .into_iter()
        .map(|atom| match atom {
            Atom::Node(Inline::Strong(children)) => Atom::Node(Inline::Strong(relink(children))),
            Atom::Node(Inline::Emphasis(children)) => {
                Atom::Node(Inline::Emphasis(relink(children)))
            }
            atom => atom,
        })
        .collect_vec();

    let mut matches = vec![];
    let mut i = 0;
    while i < atoms.len() {
        if let Some(parts) = link_at(&atoms, i) {
            // `[` text `]` `(` href `)`
            let len = parts.text + parts.href + 4;
            matches.push((i..i + len, parts));
            i += len;
        } else {
            i += 1;
        }
    }

    replace_matches(atoms, matches, |matched, parts| {
        let mut matched = matched.into_iter().skip(1);
        let children = collect(matched.by_ref().take(parts.text));
        let href = matched
            .skip(2)
            .take(parts.href)
            .filter_map(|atom| match atom {
                Atom::Char(c) => Some(c),
                Atom::Node(_) => None,
            })
            .collect();
        Inline::Link { href, children }
    })
}

fn link_at(atoms: &[Atom], start: usize) -> Option<LinkParts> {
    if !is_char(atoms.get(start), '[') {
        return None;
    }
    let text = atoms[start + 1..]
        .iter()
        .position(|atom| is_char(Some(atom), ']'))?;
    let open_paren = start + text + 2;
    if text == 0 || !is_char(atoms.get(open_paren), '(') {
        return None;
    }
    // The destination is plain text up to the first `)`.
    let href = atoms[open_paren + 1..]
        .iter()
        .position(|atom| !matches!(atom, Atom::Char(c) if *c != ')'))?;
    if href == 0 || !is_char(atoms.get(open_paren + 1 + href), ')') {
        return None;
    }
    Some(LinkParts { text, href })
}

fn relink(children: Vec<Inline>) -> Vec<Inline> {
    let atoms = children
        .into_iter()
        .flat_map(|child| match child {
            Inline::Text(text) => text.chars().map(Atom::Char).collect_vec(),
            node => vec![Atom::Node(node)],
        })
        .collect_vec();
    collect(links(atoms))
}

/// Replace each matched range of atoms with the node built from it.
/// `matches` must be sorted and non-overlapping.
fn replace_matches<T, F>(
    atoms: Vec<Atom>,
    matches: Vec<(Range<usize>, T)>,
    mut build: F,
) -> Vec<Atom>
where
    F: FnMut(Vec<Atom>, T) -> Inline,
{
    if matches.is_empty() {
        return atoms;
    }
    let mut output = Vec::with_capacity(atoms.len());
    let mut atoms = atoms.into_iter();
    let mut position = 0;
    for (range, data) in matches {
        output.extend(atoms.by_ref().take(range.start - position));
        let matched = atoms.by_ref().take(range.len()).collect_vec();
        output.push(Atom::Node(build(matched, data)));
        position = range.end;
    }
    output.extend(atoms);
    output
}

/// Merge runs of unmatched characters into text nodes.
fn collect(atoms: impl IntoIterator<Item = Atom>) -> Vec<Inline> {
    let mut nodes = vec![];
    let mut text = String::new();
    for atom in atoms {
        match atom {
            Atom::Char(c) => text.push(c),
            Atom::Node(node) => {
                if !text.is_empty() {
                    nodes.push(Inline::Text(std::mem::take(&mut text)));
                }
                nodes.push(node);
            }
        }
    }
    if !text.is_empty() {
        nodes.push(Inline::Text(text));
    }
    nodes
}

/// Write inline rendered nodes back out as markdown.
///
/// Unrecognized node kinds contribute their children's text, so nothing the
/// host renders is ever dropped.
pub(crate) fn write_markdown<'a>(
    nodes: impl IntoIterator<Item = &'a RenderedNode>,
    output: &mut String,
) {
    for node in nodes {
        let (kind, children) = match node {
            RenderedNode::Text(text) => {
                output.push_str(text);
                continue;
            }
            RenderedNode::Element { kind, children } => (kind, children),
        };
        match kind {
            ElementKind::Strong => {
                output.push_str("**");
                write_markdown(children, output);
                output.push_str("**");
            }
            ElementKind::Emphasis => {
                output.push('*');
                write_markdown(children, output);
                output.push('*');
            }
            ElementKind::Code => {
                output.push('`');
                output.push_str(&node.text_content());
                output.push('`');
            }
            ElementKind::Link { href } => {
                output.push('[');
                write_markdown(children, output);
                output.push_str("](");
                output.push_str(href);
                output.push(')');
            }
            ElementKind::LineBreak => output.push_str(MARKDOWN_HARD_BREAK),
            _ => write_markdown(children, output),
        }
    }
}

pub(crate) fn to_markdown<'a>(nodes: impl IntoIterator<Item = &'a RenderedNode>) -> String {
    let mut output = String::new();
    write_markdown(nodes, &mut output);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_owned())
    }

    #[test]
    fn strong_and_emphasis() {
        assert_eq!(
            parse_inline("**bold** and *em*"),
            vec![
                Inline::Strong(vec![text("bold")]),
                text(" and "),
                Inline::Emphasis(vec![text("em")]),
            ]
        );
    }

    #[test]
    fn code_span_contents_are_not_formatted() {
        assert_eq!(
            parse_inline("use `**raw**` here"),
            vec![text("use "), Inline::Code("**raw**".to_owned()), text(" here")]
        );
    }

    #[test]
    fn empty_backticks_stay_text() {
        assert_eq!(parse_inline("a `` b"), vec![text("a `` b")]);
    }

    #[test]
    fn emphasis_can_wrap_strong_and_code() {
        assert_eq!(
            parse_inline("*a **b** `c`*"),
            vec![Inline::Emphasis(vec![
                text("a "),
                Inline::Strong(vec![text("b")]),
                text(" "),
                Inline::Code("c".to_owned()),
            ])]
        );
    }

    #[test]
    fn strong_never_spans_inner_asterisks() {
        // The strong pair can't close over `*b*`, so single asterisks pair up instead.
        assert_eq!(
            parse_inline("**a *b* c**"),
            vec![
                text("*"),
                Inline::Emphasis(vec![text("a ")]),
                text("b"),
                Inline::Emphasis(vec![text(" c")]),
                text("*"),
            ]
        );
    }

    #[test]
    fn unresolved_double_asterisk_yields_single_emphasis() {
        assert_eq!(
            parse_inline("**a*"),
            vec![text("*"), Inline::Emphasis(vec![text("a")])]
        );
    }

    #[test]
    fn links_with_formatted_text() {
        assert_eq!(
            parse_inline("see [**docs**](https://example.com) now"),
            vec![
                text("see "),
                Inline::Link {
                    href: "https://example.com".to_owned(),
                    children: vec![Inline::Strong(vec![text("docs")])],
                },
                text(" now"),
            ]
        );
    }

    #[test]
    fn links_inside_strong() {
        assert_eq!(
            parse_inline("**[a](b)**"),
            vec![Inline::Strong(vec![Inline::Link {
                href: "b".to_owned(),
                children: vec![text("a")],
            }])]
        );
    }

    #[test]
    fn incomplete_links_stay_text() {
        assert_eq!(parse_inline("[a]() [](b) [c] (d)"), vec![text("[a]() [](b) [c] (d)")]);
    }

    #[test]
    fn reverse_wraps_each_kind() {
        let nodes = vec![
            RenderedNode::element(ElementKind::Strong, vec![RenderedNode::text("b")]),
            RenderedNode::text(" "),
            RenderedNode::element(ElementKind::Emphasis, vec![RenderedNode::text("i")]),
            RenderedNode::text(" "),
            RenderedNode::element(ElementKind::Code, vec![RenderedNode::text("c<d")]),
            RenderedNode::element(ElementKind::LineBreak, vec![]),
            RenderedNode::element(
                ElementKind::Link {
                    href: "u".to_owned(),
                },
                vec![RenderedNode::text("l")],
            ),
            RenderedNode::element(
                ElementKind::Other("span".to_owned()),
                vec![RenderedNode::text(" tail")],
            ),
        ];
        assert_eq!(to_markdown(&nodes), "**b** *i* `c<d`  \n[l](u) tail");
    }
}
