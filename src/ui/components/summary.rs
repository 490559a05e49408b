//! Summary renderers.
//!
//! The panel is a frame between the search bar and the table: the status line
//! sits in the top border, followed by the first lines of the summary. The
//! expanded view takes over the body and shows a scrolled window onto the
//! whole text.

use crate::ui::helpers::{pad, position_cursor, truncate, wrap};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{SummaryInfo, SummaryViewInfo};

/// Text lines shown inside the panel; longer summaries are cut.
pub const SUMMARY_TEXT_LINES: usize = 4;

/// Renders the summary panel at `row` and returns the next free row.
///
/// Always takes `SUMMARY_TEXT_LINES + 2` rows so the table below does not
/// jump while the summary loads.
pub fn render_summary(row: usize, summary: &SummaryInfo, theme: &Theme, cols: usize) -> usize {
    let inner_width = cols.saturating_sub(4);
    let status_color = if summary.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.header_fg
    };

    let status = truncate(&format!(" {} ", summary.status), inner_width);
    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.border));
    print!("┌─");
    print!("{}", Theme::fg(status_color));
    print!("{status}");
    print!("{}", Theme::fg(&theme.colors.border));
    print!("{}┐", "─".repeat(cols.saturating_sub(status.chars().count() + 3)));
    print!("{}", Theme::reset());

    let lines = summary
        .text
        .as_deref()
        .map(|text| wrap(text, inner_width, SUMMARY_TEXT_LINES))
        .unwrap_or_default();

    for offset in 0..SUMMARY_TEXT_LINES {
        let line = lines.get(offset).map_or("", String::as_str);
        position_cursor(row + 1 + offset, 1);
        print!("{}", Theme::fg(&theme.colors.border));
        print!("│ ");
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("{}", pad(line, inner_width));
        print!("{}", Theme::fg(&theme.colors.border));
        print!(" │");
        print!("{}", Theme::reset());
    }

    position_cursor(row + 1 + SUMMARY_TEXT_LINES, 1);
    print!("{}", Theme::fg(&theme.colors.border));
    print!("└{}┘", "─".repeat(cols.saturating_sub(2)));
    print!("{}", Theme::reset());

    row + SUMMARY_TEXT_LINES + 2
}

/// Renders the expanded summary from `row`, stopping before `last_row`.
///
/// Returns the next free row.
pub fn render_summary_view(
    row: usize,
    last_row: usize,
    view: &SummaryViewInfo,
    theme: &Theme,
    cols: usize,
) -> usize {
    let status_color = if view.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.header_fg
    };

    position_cursor(row, 1);
    print!("{}", Theme::fg(status_color));
    print!("{}", pad(&format!(" {}", view.status), cols.saturating_sub(16)));
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{:>15} ", scroll_position(view));
    print!("{}", Theme::reset());

    let mut current_row = row + 1;
    for line in &view.lines {
        if current_row >= last_row {
            break;
        }
        position_cursor(current_row, 1);
        print!("{}", Theme::fg(&theme.colors.text_normal));
        print!("  {}", pad(line, cols.saturating_sub(2)));
        print!("{}", Theme::reset());
        current_row += 1;
    }
    current_row
}

/// `lines 5-12/40`, or empty when the whole text fits.
fn scroll_position(view: &SummaryViewInfo) -> String {
    if view.lines.len() >= view.total_lines {
        return String::new();
    }
    format!(
        "lines {}-{}/{}",
        view.first_line + 1,
        view.first_line + view.lines.len(),
        view.total_lines
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(first_line: usize, shown: usize, total_lines: usize) -> SummaryViewInfo {
        SummaryViewInfo {
            status: "Summary".to_string(),
            is_error: false,
            lines: vec!["x".to_string(); shown],
            first_line,
            total_lines,
        }
    }

    #[test]
    fn test_scroll_position() {
        assert_eq!(scroll_position(&view(4, 8, 40)), "lines 5-12/40");
        assert_eq!(scroll_position(&view(0, 3, 3)), "");
    }
}
