use super::*;

use crate::escape::{escape_text, escape_url};

/// Render a document as markup for the host editor. Blocks are separated by
/// a newline.
pub(crate) fn render_document(document: &Document) -> String {
    document
        .blocks
        .iter()
        .map(|block| {
            let mut output = String::new();
            render_block(block, &mut output);
            output
        })
        .join("\n")
}

fn render_block(block: &Block, output: &mut String) {
    match block {
        Block::Heading { level, children } => {
            let level = (*level).clamp(1, 6);
            output.push_str(&format!("<h{level}>"));
            render_inline(children, output);
            output.push_str(&format!("</h{level}>"));
        }
        Block::Paragraph(children) => {
            output.push_str("<p>");
            render_inline(children, output);
            output.push_str("</p>");
        }
        Block::CodeBlock { language, text } => {
            match language {
                Some(language) => {
                    output.push_str(&format!(
                        r#"<pre><code data-lang="{}">"#,
                        escape_text(language)
                    ));
                }
                None => output.push_str("<pre><code>"),
            }
            output.push_str(&escape_text(text));
            output.push_str("</code></pre>");
        }
        Block::ThematicBreak => output.push_str("<hr/>"),
        Block::Blockquote(children) => {
            output.push_str("<blockquote><p>");
            render_inline(children, output);
            output.push_str("</p></blockquote>");
        }
        Block::List(list) => render_list(list, output),
        Block::Table(table) => render_table(table, output),
    }
}

fn render_list(list: &List, output: &mut String) {
    let (open, close) = match (list.ordered, list.has_tasks()) {
        (true, _) => ("<ol>", "</ol>"),
        (false, true) => (r#"<ul class="task-list">"#, "</ul>"),
        (false, false) => ("<ul>", "</ul>"),
    };
    output.push_str(open);
    for item in &list.items {
        if item.is_task {
            let checked = if item.checked { " checked" } else { "" };
            output.push_str(&format!(
                r#"<li data-type="taskItem"><label><input type="checkbox"{checked}/></label><div>"#
            ));
            render_inline(&item.children, output);
            output.push_str("</div>");
        } else {
            output.push_str("<li>");
            render_inline(&item.children, output);
        }
        if let Some(nested) = &item.nested {
            render_list(nested, output);
        }
        output.push_str("</li>");
    }
    output.push_str(close);
}

fn render_table(table: &Table, output: &mut String) {
    let row = |cells: &[Cell], tag: &str, output: &mut String| {
        output.push_str("<tr>");
        for (cell, alignment) in cells.iter().zip(&table.alignments) {
            output.push_str(&format!(
                r#"<{tag} style="text-align:{}">"#,
                alignment.as_str()
            ));
            render_inline(cell, output);
            output.push_str(&format!("</{tag}>"));
        }
        output.push_str("</tr>");
    };

    output.push_str("<table><thead>");
    row(&table.header, "th", output);
    output.push_str("</thead><tbody>");
    for cells in &table.rows {
        row(cells, "td", output);
    }
    output.push_str("</tbody></table>");
}

pub(crate) fn render_inline(nodes: &[Inline], output: &mut String) {
    for node in nodes {
        match node {
            Inline::Text(text) => output.push_str(&escape_text(text)),
            Inline::Strong(children) => {
                output.push_str("<strong>");
                render_inline(children, output);
                output.push_str("</strong>");
            }
            Inline::Emphasis(children) => {
                output.push_str("<em>");
                render_inline(children, output);
                output.push_str("</em>");
            }
            Inline::Code(code) => {
                output.push_str("<code>");
                output.push_str(&escape_text(code));
                output.push_str("</code>");
            }
            Inline::Link { href, children } => {
                output.push_str(&format!(r#"<a href="{}">"#, escape_url(href)));
                render_inline(children, output);
                output.push_str("</a>");
            }
            Inline::LineBreak => output.push_str("<br/>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn html(markdown: &str) -> String {
        crate::parse_markdown(markdown).to_html()
    }

    #[test]
    fn code_block_contents_are_escaped() {
        assert_eq!(
            html("```html\n<b>&</b>\n```"),
            r#"<pre><code data-lang="html">&lt;b&gt;&amp;&lt;/b&gt;</code></pre>"#
        );
    }

    #[test]
    fn nested_lists_render_inside_their_parent_item() {
        assert_eq!(
            html("- a\n  - b\n- c"),
            "<ul><li>a<ul><li>b</li></ul></li><li>c</li></ul>"
        );
    }

    #[test]
    fn task_items() {
        assert_eq!(
            html("- [ ] todo\n- [x] done"),
            concat!(
                r#"<ul class="task-list">"#,
                r#"<li data-type="taskItem"><label><input type="checkbox"/></label><div>todo</div></li>"#,
                r#"<li data-type="taskItem"><label><input type="checkbox" checked/></label><div>done</div></li>"#,
                "</ul>"
            )
        );
    }

    #[test]
    fn table_cells_carry_alignment() {
        assert_eq!(
            html("| a | b |\n|:-:|--:|\n| 1 | 2 |"),
            concat!(
                "<table><thead><tr>",
                r#"<th style="text-align:center">a</th><th style="text-align:right">b</th>"#,
                "</tr></thead><tbody><tr>",
                r#"<td style="text-align:center">1</td><td style="text-align:right">2</td>"#,
                "</tr></tbody></table>"
            )
        );
    }

    #[test]
    fn inline_markup() {
        assert_eq!(
            html("a `<b>` **c** *d* [e](https://example.com)"),
            r#"<p>a <code>&lt;b&gt;</code> <strong>c</strong> <em>d</em> <a href="https://example.com">e</a></p>"#
        );
    }

    #[test]
    fn blocks_are_newline_separated() {
        assert_eq!(
            html("# T\n\n> q\n\n---\n\n1. x"),
            "<h1>T</h1>\n<blockquote><p>q</p></blockquote>\n<hr/>\n<ol><li>x</li></ol>"
        );
    }
}
