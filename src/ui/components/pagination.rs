//! Status lines under the table: the load error notice and the pagination
//! line.

use crate::ui::helpers::{pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

/// Renders the load error shown above stale rows, or a blank line.
pub fn render_notice(row: usize, notice: Option<&str>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    match notice {
        Some(text) => {
            let text = truncate(&format!(" ! {text}  (r: retry)"), cols);
            print!("{}", Theme::fg(&theme.colors.error_fg));
            print!("{}", pad(&text, cols));
        }
        None => print!("{}", " ".repeat(cols)),
    }
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the right-aligned pagination line.
pub fn render_pagination(row: usize, pagination: &PaginationInfo, theme: &Theme, cols: usize) -> usize {
    let text = truncate(&format!("{} ", pagination.text()), cols);
    let padding = cols.saturating_sub(text.chars().count());

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{text}");
    print!("{}", Theme::reset());
    row + 1
}
