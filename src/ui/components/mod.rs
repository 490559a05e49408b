//! Composable UI component renderers.
//!
//! Each component draws one part of the interface at an explicit row and
//! returns the next free row, so the layout function below reads top to
//! bottom like the screen.
//!
//! # Components
//!
//! - [`header`]: Title bar with the result count and status
//! - [`search`]: Keyword input box
//! - [`summary`]: Summary of common errors, framed or expanded
//! - [`table`]: Results table with score colors and mismatch markers
//! - [`charts`]: Output-length histogram and pass-rate bars
//! - [`empty`]: Message shown in place of an empty table
//! - [`pagination`]: Load error notice and page line
//! - [`dialog`]: Feedback form drawn over everything else
//! - [`footer`]: Keybinding hints
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search Bar - 3 lines, optional]
//! [Summary - 6 lines, optional]
//! [Table headings + rows | Full summary | Charts | Empty state]
//! [Notice]
//! [Pagination]
//! [Border]
//! [Footer]
//! ```

mod charts;
mod dialog;
mod empty;
mod footer;
mod header;
mod pagination;
mod search;
mod summary;
mod table;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use charts::render_charts;
use dialog::render_dialog;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use pagination::{render_notice, render_pagination};
use search::render_search_bar;
use summary::{render_summary, render_summary_view};
use table::{render_table_headers, render_table_rows};

/// Rows reserved under the body: notice, pagination, border, footer and the
/// blank last line.
const BOTTOM_ROWS: usize = 5;

/// Renders a horizontal border line at the specified row.
///
/// Returns the next available row position (row + 1).
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the whole screen for a view model.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    if let Some(search) = &vm.search_bar {
        current_row = render_search_bar(current_row, search, theme, cols);
    }
    if let Some(summary) = &vm.summary {
        current_row = render_summary(current_row, summary, theme, cols);
    }

    let notice_row = rows.saturating_sub(BOTTOM_ROWS - 1);

    if let Some(view) = &vm.summary_view {
        render_summary_view(current_row, notice_row, view, theme, cols);
    } else if let Some(charts) = &vm.charts {
        render_charts(current_row, notice_row, charts, theme, cols);
    } else if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row, empty, theme, cols);
    } else {
        current_row = render_table_headers(current_row, &vm.columns, theme, cols);
        render_table_rows(current_row, &vm.rows, &vm.columns, theme, cols);
    }

    let mut bottom_row = render_notice(notice_row, vm.notice.as_deref(), theme, cols);
    bottom_row = render_pagination(bottom_row, &vm.pagination, theme, cols);
    bottom_row = render_border(bottom_row, &theme.colors.border, cols);
    render_footer(bottom_row, &vm.footer, theme, cols);

    if let Some(dialog) = &vm.dialog {
        render_dialog(dialog, theme, rows, cols);
    }
}
