use super::*;

/// Cells of a `| a | b |` row, trimmed, without the outer pipes.
///
/// A `|` between a pair of backticks belongs to the code span, not a cell
/// boundary.
pub(crate) fn split_row(line: &str) -> Vec<&str> {
    let line = line.trim();
    let line = line.strip_prefix('|').unwrap_or(line);
    let line = line.strip_suffix('|').unwrap_or(line);

    let mut cells = vec![];
    let mut start = 0;
    let mut in_code = false;
    for (i, c) in line.char_indices() {
        match c {
            '`' if in_code || line[i + 1..].contains('`') => in_code = !in_code,
            '|' if !in_code => {
                cells.push(line[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    cells.push(line[start..].trim());
    cells
}

/// Parse a separator cell such as `:---:`. Cells need at least one `-` and
/// nothing but `-`, `:` and whitespace.
fn parse_alignment(cell: &str) -> Option<Alignment> {
    let valid = cell.contains('-')
        && cell
            .chars()
            .all(|c| c == '-' || c == ':' || c.is_whitespace());
    if !valid {
        return None;
    }
    Some(match (cell.starts_with(':'), cell.ends_with(':')) {
        (true, true) => Alignment::Center,
        (false, true) => Alignment::Right,
        _ => Alignment::Left,
    })
}

/// Whether `header` and `separator` open a table.
pub(crate) fn is_table_start(header: &str, separator: &str) -> bool {
    alignments(header, separator).is_some()
}

fn alignments(header: &str, separator: &str) -> Option<Vec<Alignment>> {
    let columns = split_row(header).len();
    let alignments = split_row(separator)
        .into_iter()
        .map(parse_alignment)
        .collect::<Option<Vec<_>>>()?;
    if alignments.len() != columns {
        tracing::debug!(
            columns,
            separators = alignments.len(),
            "separator row doesn't match header"
        );
        return None;
    }
    Some(alignments)
}

/// Build a table from its header, separator and body rows.
///
/// Returns `None` when the separator row isn't valid, in which case no part of
/// the table is produced.
pub(crate) fn parse_table<'a>(
    header: &str,
    separator: &str,
    rows: impl IntoIterator<Item = &'a str>,
) -> Option<Table> {
    let alignments = alignments(header, separator)?;
    let columns = alignments.len();
    let parse_cells = |line: &str| -> Vec<Cell> {
        let mut cells = split_row(line).into_iter().map(parse_inline).collect_vec();
        cells.resize_with(columns, Vec::new);
        cells
    };
    Some(Table {
        header: parse_cells(header),
        alignments,
        rows: rows.into_iter().map(parse_cells).collect(),
    })
}
