use insta::assert_snapshot;

use super::*;

impl Converter {
    /// Build a converter from `<!-- :option: value -->` lines at the top of
    /// `input`, returning it with the rest of the input.
    pub fn from_leading_config_comments(input: &str) -> (Self, &str) {
        let mut config = Config::default();

        let opener = "<!-- :";
        let closer = "-->";
        let mut rest = input;
        while let Some((l, remainder)) = rest.split_once('\n') {
            if !(l.starts_with(opener) && l.ends_with(closer)) {
                break;
            }
            rest = remainder;
            let Some((config_option, value)) = l[opener.len()..l.len() - closer.len()]
                .trim()
                .split_once(':')
            else {
                continue;
            };
            config.set(config_option, value.trim());
        }

        (Converter::with_config(config), rest)
    }

    fn normalize(&self, input: &str) -> String {
        self.to_markdown(&self.parse(input).to_rendered())
    }
}

fn init_tracing() {
    _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(true)
        .try_init();
}

const KITCHEN_SINK: &str = r##"<!-- :bullet: * -->
#  Title
Some **bold** and *italic* with `code` and [a link](https://example.com).
A second line.

- [ ] todo
- [x] done
  - nested *child*
    - deeper

3. three
9. nine

| Name | Qty |
|:-----|----:|
| apple | 2 |

> quoted

```rust
let x = 1;
```

***
"##;

#[test]
fn normalize_kitchen_sink() {
    init_tracing();
    let (converter, input) = Converter::from_leading_config_comments(KITCHEN_SINK);
    let output = converter.normalize(input);
    assert_snapshot!(output, @r###"
# Title

Some **bold** and *italic* with `code` and [a link](https://example.com). A second line.

* [ ] todo
* [x] done
  * nested *child*
    * deeper

1. three
2. nine

| Name  | Qty |
| ----- | --: |
| apple | 2   |

> quoted

```rust
let x = 1;
```

---
"###);
}

#[test]
fn normalize_is_idempotent() {
    init_tracing();
    let inputs = [
        KITCHEN_SINK,
        "<!-- :max_width: 20 -->\nA paragraph long enough that it has to be wrapped twice.",
        "<!-- :task_markers: lenient -->\n- [] bare\n- [x]\n\t- tabbed",
        "plain\n\n```\nunclosed",
        "| not | a table |\n| x |",
    ];
    for input in inputs {
        let (converter, input) = Converter::from_leading_config_comments(input);
        let once = converter.normalize(input);
        let twice = converter.normalize(&once);
        assert_eq!(once, twice, "normalizing {input:?} is not idempotent");
    }
}

#[test]
fn strong_round_trips() {
    init_tracing();
    let document = parse_markdown("**X**");
    assert_eq!(
        document.blocks,
        [Block::Paragraph(vec![Inline::Strong(vec![Inline::Text(
            "X".to_owned()
        )])])]
    );
    assert_eq!(rendered_to_markdown(&document.to_rendered()), "**X**");
}

#[test]
fn adjacent_bullets_form_one_list() {
    init_tracing();
    let document = parse_markdown("- a\n- b");
    let [Block::List(list)] = &document.blocks[..] else {
        panic!("expected one list, got {:?}", document.blocks);
    };
    assert!(!list.ordered);
    let texts = list
        .items
        .iter()
        .map(|item| item.children.iter().map(Inline::plain_text).join(""))
        .collect_vec();
    assert_eq!(texts, ["a", "b"]);
}

#[test]
fn task_list() {
    init_tracing();
    let document = parse_markdown("- [ ] todo\n- [x] done");
    let [Block::List(list)] = &document.blocks[..] else {
        panic!("expected one list, got {:?}", document.blocks);
    };
    assert!(list.has_tasks());
    assert!(list.items[0].is_task && !list.items[0].checked);
    assert!(list.items[1].is_task && list.items[1].checked);
    assert_eq!(list.items[0].children, [Inline::Text("todo".to_owned())]);
    assert_eq!(list.items[1].children, [Inline::Text("done".to_owned())]);
}

#[test]
fn thematic_break_is_a_single_block() {
    init_tracing();
    assert_eq!(parse_markdown("---").blocks, [Block::ThematicBreak]);
}

#[test]
fn nesting_depth_counts_indent_levels() {
    init_tracing();
    let document = parse_markdown("- a\n  - b\n    - c\n  - d\n- e");
    let [Block::List(list)] = &document.blocks[..] else {
        panic!("expected one list, got {:?}", document.blocks);
    };
    assert_eq!(list.depth(), 3);
    assert_eq!(list.items.len(), 2);
}

#[test]
fn crlf_input() {
    init_tracing();
    assert_eq!(
        markdown_to_html("# A\r\n\r\n- b\r\n- c\r\n"),
        "<h1>A</h1>\n<ul><li>b</li><li>c</li></ul>"
    );
}

#[test]
fn html_for_mixed_document() {
    init_tracing();
    let html = markdown_to_html(
        "intro with <tags> & [link](/a?b=1&c=2)\n- [x] done\n  - sub\n\n> *quote*",
    );
    assert_snapshot!(html, @r###"
<p>intro with &lt;tags&gt; &amp; <a href="/a?b=1&amp;c=2">link</a></p>
<ul class="task-list"><li data-type="taskItem"><label><input type="checkbox" checked/></label><div>done</div><ul><li>sub</li></ul></li></ul>
<blockquote><p><em>quote</em></p></blockquote>
"###);
}

#[test]
fn builder_settings_reach_the_walker() {
    init_tracing();
    let mut builder = ConverterBuilder::default();
    builder.max_width(Some(12)).bullet_marker(BulletMarker::Asterisk);
    let converter = builder.build();
    let rendered = converter.parse("- one\n\nwrap these words please").to_rendered();
    assert_eq!(
        converter.to_markdown(&rendered),
        "* one\n\nwrap these\nwords please"
    );
}

#[cfg(feature = "serde")]
mod json {
    use super::*;

    #[test]
    fn tree_from_json() {
        init_tracing();
        let json = r#"[
            {"element": {"kind": {"heading": 1}, "children": [{"text": "Hi"}]}},
            {"element": {"kind": "bullet_list", "children": [
                {"element": {"kind": {"list_item": {"checked": false}}, "children": [{"text": "todo"}]}},
                {"element": {"kind": {"list_item": {}}, "children": [{"text": "plain"}]}}
            ]}},
            {"element": {"kind": {"other": "div"}, "children": [
                {"element": {"kind": "paragraph", "children": [{"text": "x"}]}}
            ]}},
            {"element": {"kind": "thematic_break"}}
        ]"#;
        let nodes: Vec<RenderedNode> = serde_json::from_str(json).unwrap();
        assert_eq!(
            rendered_to_markdown(&nodes),
            "# Hi\n\n- [ ] todo\n- plain\n\nx\n\n---"
        );
    }

    #[test]
    fn tree_survives_json() {
        init_tracing();
        let rendered = parse_markdown("| a |\n|:-:|\n| *b* |\n\n- [x] c").to_rendered();
        let json = serde_json::to_string(&rendered).unwrap();
        let decoded: Vec<RenderedNode> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, rendered);
        assert_eq!(
            rendered_to_markdown(&decoded),
            "| a   |\n| :-: |\n| *b* |\n\n- [x] c"
        );
    }
}
