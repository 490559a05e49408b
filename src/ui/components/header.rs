//! Header component renderer.
//!
//! Renders the title bar: centered title, with an optional dimmed status
//! right-aligned on the same line.

use crate::ui::helpers::{position_cursor, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header title bar at the specified row.
///
/// Returns the next available row position (row + 1).
///
/// ```text
/// [padding] Test Results (42) [padding] refreshing…  ·  mismatches only
/// ```
///
/// The status is dropped when it would overlap the title.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let title = truncate(&header.title, cols);
    let title_len = title.chars().count();
    let padding = cols.saturating_sub(title_len) / 2;

    let status = header
        .status
        .as_ref()
        .map(|s| format!("{s} "))
        .filter(|s| padding + title_len + s.chars().count() < cols);
    let status_len = status.as_ref().map_or(0, |s| s.chars().count());

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", " ".repeat(padding));
    print!("{title}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + title_len + status_len)));

    if let Some(status) = status {
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_dim));
        if let Some(bg) = &theme.colors.header_bg {
            print!("{}", Theme::bg(bg));
        }
        print!("{status}");
    }

    print!("{}", Theme::reset());
    row + 1
}
