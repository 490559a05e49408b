//! Table component renderer.
//!
//! Renders the results table: a mismatch marker column, four truncated text
//! columns and two colored score columns. Supports selection highlighting
//! and keyword match highlighting on the input column.

use crate::ui::helpers::{self, pad, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ColumnLayout, DisplayRow};

/// Marker printed in the first column of rows whose scores disagree.
const MISMATCH_MARKER: &str = "≠";

/// Renders the column headings at the specified row. Returns the next row.
pub fn render_table_headers(row: usize, columns: &ColumnLayout, theme: &Theme, cols: usize) -> usize {
    let line = [
        pad("", columns.marker),
        pad(&helpers::truncate("INPUT", columns.input), columns.input),
        pad(&helpers::truncate("OUTPUT", columns.output), columns.output),
        pad(&helpers::truncate("CRITERIA", columns.criteria), columns.criteria),
        pad("AUTO", columns.auto_eval),
        pad("HUMAN", columns.human_eval),
        pad(&helpers::truncate("AUTO FEEDBACK", columns.feedback), columns.feedback),
    ]
    .join(" ");

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!("{}", pad(&line, cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all table rows starting at the specified row.
///
/// Returns the next available row position (row + number of rows).
pub fn render_table_rows(
    row: usize,
    rows: &[DisplayRow],
    columns: &ColumnLayout,
    theme: &Theme,
    cols: usize,
) -> usize {
    let mut current_row = row;
    for display in rows {
        current_row = render_table_row(current_row, display, columns, theme, cols);
    }
    current_row
}

/// Renders one result.
///
/// # Styling Precedence
///
/// 1. Selection background over the whole line (if `is_selected`)
/// 2. Pass/fail colors on the score cells, mismatch color on the marker
/// 3. Keyword highlights on the input cell (unless selected)
/// 4. Normal text color
fn render_table_row(
    row: usize,
    display: &DisplayRow,
    columns: &ColumnLayout,
    theme: &Theme,
    cols: usize,
) -> usize {
    let base = if display.is_selected {
        format!(
            "{}{}",
            Theme::fg(&theme.colors.selection_fg),
            Theme::bg(&theme.colors.selection_bg)
        )
    } else {
        Theme::fg(&theme.colors.text_normal)
    };

    position_cursor(row, 1);
    print!("{base}");

    if display.mismatched {
        print!("{}", Theme::fg(&theme.colors.mismatch_fg));
        print!("{}", pad(MISMATCH_MARKER, columns.marker));
        print!("{base}");
    } else {
        print!("{}", " ".repeat(columns.marker));
    }
    print!(" ");

    helpers::render_highlighted_text(
        &display.input,
        &display.highlight_ranges,
        theme,
        display.is_selected,
    );
    print!("{}", " ".repeat(columns.input.saturating_sub(display.input.chars().count())));
    print!(" ");

    print!("{} ", pad(&display.output, columns.output));
    print!("{} ", pad(&display.criteria, columns.criteria));

    print!("{}", theme.score_fg(display.auto_passed));
    print!("{}", pad(&display.auto_eval, columns.auto_eval));
    print!("{base} ");

    if let Some(passed) = display.human_passed {
        print!("{}", theme.score_fg(passed));
    }
    print!("{}", pad(&display.human_eval, columns.human_eval));
    print!("{base} ");

    print!("{}", pad(&display.auto_feedback, columns.feedback));
    print!("{}", " ".repeat(cols.saturating_sub(columns.total())));

    print!("{}", Theme::reset());
    row + 1
}
