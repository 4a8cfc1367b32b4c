//! Tab-width column correction.
//!
//! The linter reports columns assuming its own tab width while the editor
//! expands tabs to a possibly different width. Each tab in front of the
//! reported column shifts it by the difference between the two widths.

/// Maps a column reported by the linter into the editor's tab width.
///
/// `line` is the linter's 1-based line number and `character` its column,
/// both as reported. Returns `character` unchanged when the widths agree.
pub fn correct_column(
    source: &str,
    line: i64,
    character: i64,
    linter_tab_width: u32,
    editor_tab_width: u32,
) -> i64 {
    if linter_tab_width == editor_tab_width {
        return character;
    }

    let tabs = i64::try_from(count_tabs(source, line, character)).unwrap_or(i64::MAX);
    let diff = i64::from(editor_tab_width) - i64::from(linter_tab_width);
    character.saturating_add(tabs.saturating_mul(diff))
}

/// Counts the tabs among the first `character` characters of `line`.
///
/// Lines past the end of `source` start at end-of-text, so they contain no
/// tabs. The walk does not stop at the end of the line.
pub fn count_tabs(source: &str, line: i64, character: i64) -> usize {
    let start = line_start(source, line);
    let budget = usize::try_from(character).unwrap_or(0);

    source[start..]
        .chars()
        .take(budget)
        .filter(|&c| c == '\t')
        .count()
}

/// Byte offset where 1-based `line` begins, saturating at end-of-text.
fn line_start(source: &str, line: i64) -> usize {
    let skip = match usize::try_from(line.saturating_sub(1)) {
        Ok(0) | Err(_) => return 0,
        Ok(n) => n,
    };

    source
        .match_indices('\n')
        .nth(skip - 1)
        .map_or(source.len(), |(at, _)| at + 1)
}
