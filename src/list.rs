use super::*;

/// Marker written in front of bullet list items when converting back to markdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BulletMarker {
    /// `-`
    #[default]
    Hyphen,
    /// `*`
    Asterisk,
}

impl From<&BulletMarker> for char {
    fn from(value: &BulletMarker) -> Self {
        match value {
            BulletMarker::Hyphen => '-',
            BulletMarker::Asterisk => '*',
        }
    }
}

/// A character that isn't a supported bullet marker.
#[repr(transparent)]
#[derive(Debug, PartialEq, Eq)]
pub struct InvalidMarker(pub char);

impl std::fmt::Display for InvalidMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}` is not a bullet marker, expected `-` or `*`", self.0)
    }
}

impl std::error::Error for InvalidMarker {}

impl TryFrom<char> for BulletMarker {
    type Error = InvalidMarker;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '-' => Ok(BulletMarker::Hyphen),
            '*' => Ok(BulletMarker::Asterisk),
            _ => Err(InvalidMarker(value)),
        }
    }
}

impl std::str::FromStr for BulletMarker {
    type Err = InvalidMarker;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => BulletMarker::try_from(c),
            (Some(c), Some(_)) => Err(InvalidMarker(c)),
            (None, _) => Err(InvalidMarker(' ')),
        }
    }
}

/// Split a leading task marker off a bullet item's content.
///
/// Returns the checkbox state for task items, and the remaining text.
pub(crate) fn split_task_marker(content: &str, markers: TaskMarkers) -> (Option<bool>, &str) {
    let lenient = markers == TaskMarkers::Lenient;
    let (checked, rest) = match content.get(..3) {
        Some("[ ]") => (false, &content[3..]),
        Some("[x]" | "[X]") => (true, &content[3..]),
        _ => match content.strip_prefix("[]") {
            Some(rest) if lenient => (false, rest),
            _ => return (None, content),
        },
    };
    if rest.starts_with(char::is_whitespace) || (lenient && rest.is_empty()) {
        (Some(checked), rest.trim())
    } else {
        (None, content)
    }
}

/// Index of a [`Frame`] in the builder's arena.
type FrameId = usize;

/// One indentation level of a bullet list region.
#[derive(Debug, Default)]
struct Frame {
    indent: usize,
    items: Vec<Item>,
}

#[derive(Debug)]
struct Item {
    is_task: bool,
    checked: bool,
    children: Vec<Inline>,
    /// Deeper frame this item owns.
    nested: Option<FrameId>,
}

/// Builds list trees for a run of bullet lines from their indentation.
///
/// Frames live in a flat arena and are referenced by index, so attaching a
/// closed frame to its parent item only writes an index.
#[derive(Debug)]
pub(crate) struct ListBuilder {
    arena: Vec<Frame>,
    /// Open frames, innermost last.
    stack: Vec<FrameId>,
    /// Frames closed while no parent was open. They become top level lists.
    roots: Vec<FrameId>,
    task_markers: TaskMarkers,
}

impl ListBuilder {
    pub(crate) fn new(task_markers: TaskMarkers) -> Self {
        Self {
            arena: vec![],
            stack: vec![],
            roots: vec![],
            task_markers,
        }
    }

    pub(crate) fn push_line(&mut self, indent: usize, content: &str) {
        let (task, text) = split_task_marker(content, self.task_markers);

        while let Some(&top) = self.stack.last() {
            if self.arena[top].indent <= indent {
                break;
            }
            self.stack.pop();
            self.close(top);
        }

        let top = match self.stack.last() {
            Some(&top) if self.arena[top].indent >= indent => top,
            _ => {
                let id = self.arena.len();
                tracing::trace!(indent, id, "opening list frame");
                self.arena.push(Frame {
                    indent,
                    items: vec![],
                });
                self.stack.push(id);
                id
            }
        };

        self.arena[top].items.push(Item {
            is_task: task.is_some(),
            checked: task.unwrap_or(false),
            children: parse_inline(text),
            nested: None,
        });
    }

    /// Attach a closed frame under the last item of the frame now on top of
    /// the stack, or keep it as a top level list when the stack is empty.
    fn close(&mut self, frame: FrameId) {
        let Some(&parent) = self.stack.last() else {
            tracing::trace!(frame, "closing top level list frame");
            self.roots.push(frame);
            return;
        };
        tracing::trace!(frame, parent, "closing nested list frame");
        let Some(item) = self.arena[parent].items.last_mut() else {
            self.roots.push(frame);
            return;
        };
        match item.nested {
            None => item.nested = Some(frame),
            Some(existing) => {
                // A shallower but still nested line already gave this item a
                // sublist. Keep one sublist per item by merging.
                let items = std::mem::take(&mut self.arena[frame].items);
                self.arena[existing].items.extend(items);
            }
        }
    }

    /// Close every open frame and return the top level lists in source order.
    pub(crate) fn finish(mut self) -> Vec<List> {
        while let Some(frame) = self.stack.pop() {
            self.close(frame);
        }
        let roots = std::mem::take(&mut self.roots);
        roots.into_iter().map(|id| self.build(id)).collect()
    }

    fn build(&mut self, id: FrameId) -> List {
        let items = std::mem::take(&mut self.arena[id].items);
        let items = items
            .into_iter()
            .map(|item| ListItem {
                is_task: item.is_task,
                checked: item.checked,
                children: item.children,
                nested: item.nested.map(|nested| self.build(nested)),
            })
            .collect();
        List {
            ordered: false,
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(lines: &[(usize, &str)]) -> Vec<List> {
        let mut builder = ListBuilder::new(TaskMarkers::Lenient);
        for (indent, content) in lines {
            builder.push_line(*indent, content);
        }
        builder.finish()
    }

    fn texts(list: &List) -> Vec<String> {
        list.items
            .iter()
            .map(|item| item.children.iter().map(Inline::plain_text).collect())
            .collect()
    }

    #[test]
    fn task_markers() {
        let lenient = TaskMarkers::Lenient;
        let strict = TaskMarkers::Strict;
        assert_eq!(split_task_marker("[ ] todo", strict), (Some(false), "todo"));
        assert_eq!(split_task_marker("[X] done", strict), (Some(true), "done"));
        assert_eq!(split_task_marker("[] bare", strict), (None, "[] bare"));
        assert_eq!(split_task_marker("[] bare", lenient), (Some(false), "bare"));
        assert_eq!(split_task_marker("[x]", lenient), (Some(true), ""));
        assert_eq!(split_task_marker("[x]", strict), (None, "[x]"));
        assert_eq!(split_task_marker("[link](u)", lenient), (None, "[link](u)"));
    }

    #[test]
    fn flat_list_keeps_order() {
        let lists = build(&[(0, "a"), (0, "b"), (0, "c")]);
        assert_eq!(lists.len(), 1);
        assert_eq!(texts(&lists[0]), ["a", "b", "c"]);
        assert!(!lists[0].ordered);
    }

    #[test]
    fn deeper_frames_reparent_under_preceding_item() {
        let lists = build(&[(0, "a"), (1, "b"), (2, "c"), (1, "d"), (0, "e")]);
        assert_eq!(lists.len(), 1);
        let outer = &lists[0];
        assert_eq!(outer.depth(), 3);
        assert_eq!(texts(outer), ["a", "e"]);
        let middle = outer.items[0].nested.as_ref().unwrap();
        assert_eq!(texts(middle), ["b", "d"]);
        let inner = middle.items[0].nested.as_ref().unwrap();
        assert_eq!(texts(inner), ["c"]);
        assert!(outer.items[1].nested.is_none());
    }

    #[test]
    fn frames_closed_with_empty_stack_become_top_level() {
        let lists = build(&[(1, "indented"), (0, "flush")]);
        assert_eq!(lists.len(), 2);
        assert_eq!(texts(&lists[0]), ["indented"]);
        assert_eq!(texts(&lists[1]), ["flush"]);
    }

    #[test]
    fn second_sublist_merges_into_the_first() {
        let lists = build(&[(0, "a"), (2, "deep"), (1, "shallow"), (0, "b")]);
        let nested = lists[0].items[0].nested.as_ref().unwrap();
        assert_eq!(texts(nested), ["deep", "shallow"]);
    }

    #[test]
    fn task_state_is_kept_per_item() {
        let lists = build(&[(0, "[ ] todo"), (0, "[x] done"), (0, "plain")]);
        let items = &lists[0].items;
        assert!(items[0].is_task && !items[0].checked);
        assert!(items[1].is_task && items[1].checked);
        assert!(!items[2].is_task);
    }

    #[test]
    fn bullet_marker_parsing() {
        assert_eq!("*".parse::<BulletMarker>(), Ok(BulletMarker::Asterisk));
        assert_eq!("-".parse::<BulletMarker>(), Ok(BulletMarker::Hyphen));
        assert_eq!("+".parse::<BulletMarker>(), Err(InvalidMarker('+')));
        assert_eq!(char::from(&BulletMarker::default()), '-');
    }
}
