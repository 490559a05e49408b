//! Feedback dialog renderer.
//!
//! Draws a framed box over the middle of the pane: the details of the result
//! under review, then the two editable fields. The focused field shows a
//! cursor and uses the selection colors.

use crate::ui::helpers::wrap;
use crate::app::DialogField;
use crate::ui::helpers::{pad, position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DialogInfo;

/// Widest the dialog grows on large panes.
const MAX_DIALOG_WIDTH: usize = 100;

/// Lines each detail value may wrap to.
const DETAIL_LINES: usize = 2;

/// Width of the label column inside the dialog.
const LABEL_WIDTH: usize = 18;

/// Renders the dialog. Rows beyond `rows` are not drawn.
pub fn render_dialog(dialog: &DialogInfo, theme: &Theme, rows: usize, cols: usize) {
    let width = cols.saturating_sub(4).min(MAX_DIALOG_WIDTH);
    let inner_width = width.saturating_sub(4);
    let value_width = inner_width.saturating_sub(LABEL_WIDTH);
    let left = cols.saturating_sub(width) / 2 + 1;

    let mut body: Vec<(String, String, bool)> = Vec::new();
    for (label, value) in &dialog.details {
        let lines = wrap(value, value_width, DETAIL_LINES);
        if lines.is_empty() {
            body.push((label.clone(), String::new(), false));
        }
        for (idx, line) in lines.into_iter().enumerate() {
            let label = if idx == 0 { label.clone() } else { String::new() };
            body.push((label, line, false));
        }
    }
    body.push((String::new(), String::new(), false));
    body.push(field_line("Human Score", &dialog.score_input, dialog.focus == DialogField::Score, value_width));
    body.push(field_line("Human Comment", &dialog.comment_input, dialog.focus == DialogField::Comment, value_width));

    let height = body.len() + 4;
    let top = rows.saturating_sub(height) / 2 + 1;
    let max_row = rows.max(1);

    let title = truncate(" Review result ", inner_width);
    draw_row(top, left, max_row, || {
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
        print!("┌─{title}{}┐", "─".repeat(width.saturating_sub(title.chars().count() + 3)));
    });

    for (offset, (label, value, focused)) in body.iter().enumerate() {
        draw_row(top + 1 + offset, left, max_row, || {
            print!("{}", Theme::fg(&theme.colors.search_bar_border));
            print!("│ ");
            print!("{}", Theme::fg(&theme.colors.text_dim));
            print!("{}", pad(label, LABEL_WIDTH));
            if *focused {
                print!("{}", Theme::fg(&theme.colors.selection_fg));
                print!("{}", Theme::bg(&theme.colors.selection_bg));
            } else {
                print!("{}", Theme::fg(&theme.colors.text_normal));
            }
            print!("{}", pad(value, value_width));
            print!("{}", Theme::reset());
            print!("{}", Theme::fg(&theme.colors.search_bar_border));
            print!(" │");
        });
    }

    let status_row = top + 1 + body.len();
    draw_row(status_row, left, max_row, || {
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
        print!("│ ");
        let (color, text) = match (&dialog.error, dialog.submitting) {
            (Some(error), _) => (&theme.colors.error_fg, error.clone()),
            (None, true) => (&theme.colors.text_dim, "Saving…".to_string()),
            (None, false) => (&theme.colors.text_dim, String::new()),
        };
        print!("{}", Theme::fg(color));
        print!("{}", pad(&truncate(&text, inner_width), inner_width));
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
        print!(" │");
    });

    draw_row(status_row + 1, left, max_row, || {
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
        print!("│ ");
        print!("{}", Theme::fg(&theme.colors.text_dim));
        let hint = truncate("Tab: switch field  Enter: submit  Esc: cancel", inner_width);
        print!("{}", pad(&hint, inner_width));
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
        print!(" │");
    });

    draw_row(status_row + 2, left, max_row, || {
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
        print!("└{}┘", "─".repeat(width.saturating_sub(2)));
    });
}

fn field_line(label: &str, input: &str, focused: bool, width: usize) -> (String, String, bool) {
    let cursor = if focused { "▏" } else { "" };
    let value = format!("{input}{cursor}");
    // Keep the end of long input visible while typing.
    let len = value.chars().count();
    let visible: String = value.chars().skip(len.saturating_sub(width)).collect();
    (label.to_string(), visible, focused)
}

fn draw_row(row: usize, left: usize, max_row: usize, draw: impl FnOnce()) {
    if row > max_row {
        return;
    }
    position_cursor(row, left);
    draw();
    print!("{}", Theme::reset());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_line_keeps_tail_of_long_input() {
        let (_, visible, focused) = field_line("Score", "abcdefgh", true, 4);
        assert!(focused);
        assert_eq!(visible, "fgh▏");

        let (_, visible, _) = field_line("Score", "4", false, 4);
        assert_eq!(visible, "4");
    }
}
