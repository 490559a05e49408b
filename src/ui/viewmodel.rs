//! View model types representing renderable UI state.
//!
//! View models are computed from [`AppState`](crate::app::AppState) by
//! `compute_viewmodel` and consumed by the renderer. They hold display-ready
//! strings (already truncated to their columns) and flags, and no business
//! logic, which keeps them easy to assert on in tests.

use crate::app::DialogField;
use crate::domain::{HistogramBucket, PassRates};

/// Width of each score column.
const SCORE_COLUMN_WIDTH: usize = 6;

/// Width of the leading marker column (mismatch indicator).
const MARKER_COLUMN_WIDTH: usize = 2;

/// Single space between columns.
const COLUMN_GAP: usize = 1;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Present while typing a search or while a search is applied.
    pub search_bar: Option<SearchBarInfo>,

    /// Column widths used to truncate `rows`.
    pub columns: ColumnLayout,

    /// Rows of the current window of the table.
    pub rows: Vec<DisplayRow>,

    /// Index of the selected row within `rows`.
    pub selected_index: usize,

    pub pagination: PaginationInfo,

    /// Load error shown above stale rows.
    pub notice: Option<String>,

    /// Replaces the table body when there is nothing to list.
    pub empty_state: Option<EmptyState>,

    pub summary: Option<SummaryInfo>,

    /// Present in the expanded summary view, which replaces the panel.
    pub summary_view: Option<SummaryViewInfo>,

    /// Present in the charts view.
    pub charts: Option<ChartsInfo>,

    /// Present while the feedback dialog is open.
    pub dialog: Option<DialogInfo>,

    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,

    /// Short right-aligned status such as "refreshing" or "mismatches only".
    pub status: Option<String>,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,

    /// Whether keystrokes currently go to the search bar.
    pub is_editing: bool,
}

/// One table row, with cells already truncated to [`ColumnLayout`] widths.
#[derive(Debug, Clone)]
pub struct DisplayRow {
    pub id: String,
    pub input: String,
    pub output: String,
    pub criteria: String,
    pub auto_eval: String,
    pub human_eval: String,
    pub auto_feedback: String,

    /// `auto_eval` is at or above the pass threshold.
    pub auto_passed: bool,

    /// `human_eval` is set and at or above the pass threshold.
    pub human_passed: Option<bool>,

    /// Human and automatic scores disagree (or no human score yet).
    pub mismatched: bool,

    pub is_selected: bool,

    /// Character ranges of `input` matching the search keyword.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Pagination line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: usize,
    pub page_count: usize,
    pub total_count: usize,

    /// Rows visible after the mismatch filter.
    pub shown: usize,

    /// Rows loaded for this page before filtering.
    pub loaded: usize,
}

impl PaginationInfo {
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = format!(
            "Page {}/{}  ·  {} results",
            self.page,
            self.page_count.max(1),
            self.total_count
        );
        if self.shown != self.loaded {
            text.push_str(&format!("  ·  showing {} of {} on this page", self.shown, self.loaded));
        }
        text
    }
}

/// Summary panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryInfo {
    pub text: Option<String>,
    pub status: String,
    pub is_error: bool,
}

/// Expanded summary view: a window onto the wrapped summary text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryViewInfo {
    pub status: String,
    pub is_error: bool,
    pub lines: Vec<String>,

    /// Index of the first shown line within the whole text.
    pub first_line: usize,
    pub total_lines: usize,
}

/// Charts view.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartsInfo {
    pub histogram: Vec<HistogramBucket>,
    pub pass_rates: PassRates,
}

/// Feedback dialog.
#[derive(Debug, Clone)]
pub struct DialogInfo {
    /// `(label, value)` pairs describing the result under review.
    pub details: Vec<(String, String)>,
    pub score_input: String,
    pub comment_input: String,
    pub focus: DialogField,
    pub submitting: bool,
    pub error: Option<String>,
}

/// Column widths of the results table for a given terminal width.
///
/// The two score columns and the marker column are fixed; the four text
/// columns share what is left (input 30%, output 30%, criteria 15%,
/// feedback the remainder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub marker: usize,
    pub input: usize,
    pub output: usize,
    pub criteria: usize,
    pub auto_eval: usize,
    pub human_eval: usize,
    pub feedback: usize,
}

impl ColumnLayout {
    #[must_use]
    pub const fn for_width(cols: usize) -> Self {
        let fixed = MARKER_COLUMN_WIDTH + 2 * SCORE_COLUMN_WIDTH + 6 * COLUMN_GAP;
        let flexible = cols.saturating_sub(fixed);
        let input = flexible * 30 / 100;
        let output = flexible * 30 / 100;
        let criteria = flexible * 15 / 100;
        let feedback = flexible - input - output - criteria;

        Self {
            marker: MARKER_COLUMN_WIDTH,
            input,
            output,
            criteria,
            auto_eval: SCORE_COLUMN_WIDTH,
            human_eval: SCORE_COLUMN_WIDTH,
            feedback,
        }
    }

    /// Total width including gaps.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.marker
            + self.input
            + self.output
            + self.criteria
            + self.auto_eval
            + self.human_eval
            + self.feedback
            + 6 * COLUMN_GAP
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fills_the_terminal() {
        for cols in [40, 80, 120, 237] {
            assert_eq!(ColumnLayout::for_width(cols).total(), cols);
        }
    }

    #[test]
    fn test_layout_on_tiny_terminal_keeps_fixed_columns() {
        let layout = ColumnLayout::for_width(5);
        assert_eq!(layout.input, 0);
        assert_eq!(layout.auto_eval, SCORE_COLUMN_WIDTH);
    }

    #[test]
    fn test_pagination_text_mentions_filtering_only_when_rows_hidden() {
        let mut info = PaginationInfo { page: 2, page_count: 5, total_count: 42, shown: 10, loaded: 10 };
        assert_eq!(info.text(), "Page 2/5  ·  42 results");
        info.shown = 3;
        assert!(info.text().ends_with("showing 3 of 10 on this page"));
    }
}
