//! Empty state component renderer.
//!
//! Shown in place of the table body while the first page loads, when a
//! load failed before any rows arrived, when a search matches nothing, or
//! when the mismatch filter hides every row of the page.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Blank lines between the top of the body and the message.
const EMPTY_STATE_OFFSET: usize = 2;

/// Renders the two-line centered empty state message below `row`.
///
/// ```text
/// [2 blank lines]
/// [padding] MESSAGE [padding]
/// [padding] subtitle [padding]
/// ```
///
/// The message uses `empty_state_fg`; the subtitle is dimmed.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    let message_row = row + EMPTY_STATE_OFFSET;

    let message = truncate(&empty.message, cols);
    let msg_len = message.chars().count();
    let msg_padding = cols.saturating_sub(msg_len) / 2;

    position_cursor(message_row, 1);
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    print!("{}", " ".repeat(msg_padding));
    print!("{message}");
    print!("{}", " ".repeat(cols.saturating_sub(msg_padding + msg_len)));
    print!("{}", Theme::reset());

    let subtitle = truncate(&empty.subtitle, cols);
    let sub_len = subtitle.chars().count();
    let sub_padding = cols.saturating_sub(sub_len) / 2;

    position_cursor(message_row + 1, 1);
    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(sub_padding));
    print!("{subtitle}");
    print!("{}", " ".repeat(cols.saturating_sub(sub_padding + sub_len)));
    print!("{}", Theme::reset());
}
