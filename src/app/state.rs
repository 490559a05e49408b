//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the single source of truth for the
//! dashboard: the loaded page, pagination cursor, search text, mismatch
//! filter, summary, feedback dialog, and the query client whose sequence
//! numbers decide which responses may touch that state.
//!
//! # Derived State
//!
//! Nothing derived is stored. The visible rows are recomputed from `results`
//! and `filter_enabled` on demand, and page count from `total_count`, so the
//! two can never drift apart.
//!
//! # View Model Computation
//!
//! [`AppState::compute_viewmodel`] turns the state into a renderable
//! [`UIViewModel`](crate::ui::viewmodel::UIViewModel), handling windowing,
//! cell truncation, keyword highlighting and empty states.

use super::modes::{DialogField, InputMode, LoadState, ViewMode};
use crate::domain::error::{EvalboardError, Result};
use crate::domain::stats::{HISTOGRAM_BUCKETS, PASS_THRESHOLD};
use crate::domain::{
    format_score, output_length_histogram, page_count, page_offset, pass_rates, ResultSet,
    TestResult, PAGE_SIZE,
};
use crate::query::{HttpRequest, QueryClient, ResponseTag};
use crate::ui::helpers::{clip_ranges, coalesce_ranges, truncate, wrap_paragraphs};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ChartsInfo, ColumnLayout, DialogInfo, DisplayRow, EmptyState, FooterInfo, HeaderInfo,
    PaginationInfo, SearchBarInfo, SummaryInfo, SummaryViewInfo, UIViewModel,
};
use chrono::{DateTime, Utc};
use fuzzy_matcher::skim::SkimMatcherV2;

/// Shown when a result page cannot be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Failed to load test results.";

/// Shown when the summary cannot be fetched.
pub const SUMMARY_ERROR_MESSAGE: &str = "Failed to fetch summary.";

/// Rows taken by the blank top line, header, borders, column headings,
/// notice, pagination, footer and the blank bottom line.
const TABLE_CHROME_ROWS: usize = 9;

/// Extra rows taken by the search bar.
const SEARCH_BAR_ROWS: usize = 3;

/// Rows taken by the summary panel (border, status, up to four text lines).
const SUMMARY_PANEL_ROWS: usize = 6;

/// Columns the expanded summary keeps free around its text.
const SUMMARY_VIEW_MARGIN: usize = 4;

/// The feedback dialog for one result.
///
/// Holds its own copy of the result so a refetch behind the dialog cannot
/// change what is being reviewed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackDialog {
    pub result: TestResult,
    pub score_input: String,
    pub comment_input: String,
    pub focus: DialogField,

    /// Tag of this dialog's in-flight submission. Only the response carrying
    /// it may close the dialog or report an error in it.
    pub pending: Option<ResponseTag>,

    /// Validation or submission error shown inside the dialog.
    pub error: Option<String>,
}

impl FeedbackDialog {
    /// Opens the dialog pre-filled with the result's current human review.
    #[must_use]
    pub fn open(result: TestResult) -> Self {
        Self {
            score_input: format_score(result.human_eval),
            comment_input: result.human_feedback.clone().unwrap_or_default(),
            result,
            focus: DialogField::Score,
            pending: None,
            error: None,
        }
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.pending.is_some()
    }

    /// The text buffer of the focused field.
    pub fn focused_input_mut(&mut self) -> &mut String {
        match self.focus {
            DialogField::Score => &mut self.score_input,
            DialogField::Comment => &mut self.comment_input,
        }
    }
}

/// A fetched error summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub text: String,
    pub received_at: DateTime<Utc>,
}

/// Central application state container.
///
/// Mutated only by the event handler; rendered through
/// [`compute_viewmodel`](Self::compute_viewmodel).
#[derive(Debug, Clone)]
pub struct AppState {
    /// 1-based page number.
    pub page: usize,

    /// Keyword sent to the backend; empty means no filter.
    pub search_query: String,

    /// Show only rows whose human score differs from the automatic one.
    pub filter_enabled: bool,

    /// Rows of the current page as last loaded. Kept on failed refetches.
    pub results: Vec<TestResult>,

    /// Keyword-filtered count across all pages.
    pub total_count: usize,

    pub load_state: LoadState,

    /// User-facing load error.
    pub error: Option<String>,

    /// Index into the visible (filtered) rows.
    pub selected_index: usize,

    pub dialog: Option<FeedbackDialog>,

    pub summary: Option<Summary>,
    pub summary_loading: bool,
    pub summary_error: Option<String>,

    /// First shown line of the expanded summary.
    pub summary_scroll: usize,

    pub input_mode: InputMode,
    pub view_mode: ViewMode,

    /// Set once the plugin may issue requests (permissions granted).
    pub mounted: bool,

    pub theme: Theme,

    pub query: QueryClient,
}

impl AppState {
    /// Creates an empty state on page 1 that has not fetched anything yet.
    #[must_use]
    pub fn new(query: QueryClient, theme: Theme) -> Self {
        Self {
            page: 1,
            search_query: String::new(),
            filter_enabled: false,
            results: vec![],
            total_count: 0,
            load_state: LoadState::Idle,
            error: None,
            selected_index: 0,
            dialog: None,
            summary: None,
            summary_loading: false,
            summary_error: None,
            summary_scroll: 0,
            input_mode: InputMode::Normal,
            view_mode: ViewMode::Table,
            mounted: false,
            theme,
            query,
        }
    }

    /// Rows that pass the mismatch filter, in page order.
    ///
    /// The filter only looks at the loaded page; it never changes
    /// `total_count` or the page count.
    #[must_use]
    pub fn visible_results(&self) -> Vec<&TestResult> {
        self.results
            .iter()
            .filter(|result| !self.filter_enabled || result.is_mismatched())
            .collect()
    }

    #[must_use]
    pub fn selected_result(&self) -> Option<&TestResult> {
        self.visible_results().get(self.selected_index).copied()
    }

    /// Moves selection down by one, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_results().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves selection up by one, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_results().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Keeps the selection inside the visible rows.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_results().len();
        self.selected_index = if len == 0 { 0 } else { self.selected_index.min(len - 1) };
    }

    #[must_use]
    pub const fn page_count(&self) -> usize {
        page_count(self.total_count, PAGE_SIZE)
    }

    /// Highest reachable page; page 1 always exists even with no results.
    #[must_use]
    pub const fn last_page(&self) -> usize {
        let count = self.page_count();
        if count == 0 {
            1
        } else {
            count
        }
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        page_offset(self.page, PAGE_SIZE)
    }

    /// Issues a fetch for the current page and search text.
    ///
    /// # Errors
    ///
    /// Propagates URL construction failures from the query client.
    pub fn request_page(&mut self) -> Result<HttpRequest> {
        let request = self.query.fetch_results(self.offset(), PAGE_SIZE, &self.search_query)?;
        self.load_state = LoadState::Loading;
        Ok(request)
    }

    /// Replaces the loaded page with a freshly decoded one.
    pub fn apply_result_set(&mut self, set: ResultSet) {
        self.results = set.results;
        self.total_count = set.total_count;
        self.error = None;
        self.load_state = LoadState::Loaded;
        self.clamp_selection();
    }

    /// Records a failed page fetch, keeping whatever rows are displayed.
    pub fn apply_load_error(&mut self, error: &EvalboardError) {
        tracing::warn!(error = %error, page = self.page, "failed to load test results");
        self.error = Some(LOAD_ERROR_MESSAGE.to_string());
        self.load_state = LoadState::Errored;
    }

    /// Issues a summary fetch.
    ///
    /// # Errors
    ///
    /// Propagates URL construction failures from the query client.
    pub fn request_summary(&mut self) -> Result<HttpRequest> {
        let request = self.query.fetch_summary()?;
        self.summary_loading = true;
        self.summary_error = None;
        Ok(request)
    }

    pub fn apply_summary(&mut self, text: String) {
        self.summary = Some(Summary {
            text,
            received_at: Utc::now(),
        });
        self.summary_error = None;
        self.summary_loading = false;
        self.summary_scroll = 0;
    }

    pub fn apply_summary_error(&mut self, error: &EvalboardError) {
        tracing::warn!(error = %error, "failed to fetch summary");
        self.summary_error = Some(SUMMARY_ERROR_MESSAGE.to_string());
        self.summary_loading = false;
    }

    /// Opens the feedback dialog on the selected row.
    ///
    /// Returns `false` if no row is selected.
    pub fn open_dialog(&mut self) -> bool {
        let Some(result) = self.selected_result().cloned() else {
            return false;
        };
        tracing::debug!(id = %result.id, "opening feedback dialog");
        self.dialog = Some(FeedbackDialog::open(result));
        self.input_mode = InputMode::Feedback;
        true
    }

    pub fn close_dialog(&mut self) {
        self.dialog = None;
        if self.input_mode == InputMode::Feedback {
            self.input_mode = InputMode::Normal;
        }
    }

    /// Called when the view goes away: every in-flight response becomes
    /// stale, and flags that would wait on them are cleared.
    pub fn detach(&mut self) {
        self.query.invalidate();
        if self.load_state == LoadState::Loading {
            self.load_state = if self.results.is_empty() { LoadState::Idle } else { LoadState::Loaded };
        }
        self.summary_loading = false;
        if let Some(dialog) = self.dialog.as_mut() {
            dialog.pending = None;
        }
    }

    /// Computes a renderable view model for a terminal of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let columns = ColumnLayout::for_width(cols);
        let visible = self.visible_results();

        let available_rows = self.calculate_available_rows(rows);
        let mut visible_start = self
            .selected_index
            .saturating_sub(available_rows / 2)
            .min(visible.len());
        let visible_end = (visible_start + available_rows).min(visible.len());
        if visible_end - visible_start < available_rows && visible.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = (!self.search_query.is_empty()).then(SkimMatcherV2::default);

        let display_rows = visible[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, result)| {
                let is_selected = visible_start + relative_idx == self.selected_index;
                self.compute_display_row(result, is_selected, &columns, matcher.as_ref())
            })
            .collect();

        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            columns,
            rows: display_rows,
            selected_index: self.selected_index.saturating_sub(visible_start),
            pagination: PaginationInfo {
                page: self.page,
                page_count: self.page_count(),
                total_count: self.total_count,
                shown: visible.len(),
                loaded: self.results.len(),
            },
            notice: self.error.clone().filter(|_| !self.results.is_empty()),
            empty_state: self.compute_empty_state(visible.len()),
            summary: self.compute_summary(),
            summary_view: self.compute_summary_view(rows, cols),
            charts: self.compute_charts(),
            dialog: self.compute_dialog(),
            footer: self.compute_footer(),
        }
    }

    fn compute_display_row(
        &self,
        result: &TestResult,
        is_selected: bool,
        columns: &ColumnLayout,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayRow {
        let input = truncate(&result.input_under_test, columns.input);
        // The ellipsis of a cut cell is never highlighted.
        let highlightable = if result.input_under_test.chars().count() > columns.input {
            columns.input.saturating_sub(1)
        } else {
            columns.input
        };
        let highlight_ranges = matcher.map_or_else(Vec::new, |m| {
            let ranges = self.compute_highlight_ranges(&result.input_under_test, m);
            clip_ranges(&ranges, highlightable)
        });

        DisplayRow {
            id: result.id.clone(),
            input,
            output: truncate(&result.llm_output, columns.output),
            criteria: truncate(&result.criteria, columns.criteria),
            auto_eval: truncate(&format_score(Some(result.auto_eval)), columns.auto_eval),
            human_eval: truncate(&format_score(result.human_eval), columns.human_eval),
            auto_feedback: truncate(&result.auto_feedback, columns.feedback),
            auto_passed: result.auto_eval >= PASS_THRESHOLD,
            human_passed: result.human_eval.map(|score| score >= PASS_THRESHOLD),
            mismatched: result.is_mismatched(),
            is_selected,
            highlight_ranges,
        }
    }

    /// Character ranges of `text` matched by the search keyword.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        matcher
            .fuzzy_indices(text, &self.search_query)
            .map_or_else(Vec::new, |(_score, indices)| coalesce_ranges(&indices))
    }

    fn compute_header(&self) -> HeaderInfo {
        let mut status = Vec::new();
        if self.load_state == LoadState::Loading && !self.results.is_empty() {
            status.push("refreshing…");
        }
        if self.filter_enabled {
            status.push("mismatches only");
        }

        HeaderInfo {
            title: format!(" Test Results ({}) ", self.total_count),
            status: (!status.is_empty()).then(|| status.join("  ·  ")),
        }
    }

    fn compute_search_bar(&self) -> Option<SearchBarInfo> {
        let is_editing = self.input_mode == InputMode::Search;
        (is_editing || !self.search_query.is_empty()).then(|| SearchBarInfo {
            query: self.search_query.clone(),
            is_editing,
        })
    }

    fn compute_empty_state(&self, visible_len: usize) -> Option<EmptyState> {
        if visible_len > 0 || self.view_mode != ViewMode::Table {
            return None;
        }

        let (message, subtitle) = if !self.results.is_empty() {
            (
                "No mismatches on this page".to_string(),
                "Press 'f' to show all rows, 'l' for the next page".to_string(),
            )
        } else {
            match self.load_state {
                LoadState::Idle | LoadState::Loading => {
                    ("Loading test results…".to_string(), String::new())
                }
                LoadState::Errored => (
                    self.error.clone().unwrap_or_else(|| LOAD_ERROR_MESSAGE.to_string()),
                    "Press 'r' to retry".to_string(),
                ),
                LoadState::Loaded if self.search_query.is_empty() => (
                    "No test results yet".to_string(),
                    "Results appear here once the evaluator has run".to_string(),
                ),
                LoadState::Loaded => (
                    format!("No results match \"{}\"", self.search_query),
                    "Press Esc to clear the search".to_string(),
                ),
            }
        };

        Some(EmptyState { message, subtitle })
    }

    /// Status line and error flag of the summary, if there is one to show.
    fn summary_status(&self) -> Option<(String, bool)> {
        if self.summary_loading {
            return Some(("Summarizing common errors…".to_string(), false));
        }
        if let Some(error) = &self.summary_error {
            return Some((error.clone(), true));
        }
        self.summary.as_ref().map(|summary| {
            let status = format!(
                "Summary of common errors (generated at {} UTC)",
                summary.received_at.format("%H:%M:%S")
            );
            (status, false)
        })
    }

    /// Whether there is a summary, pending summary or summary error to show.
    #[must_use]
    pub fn has_summary(&self) -> bool {
        self.summary_status().is_some()
    }

    fn compute_summary(&self) -> Option<SummaryInfo> {
        if self.view_mode == ViewMode::Summary {
            return None;
        }
        let (status, is_error) = self.summary_status()?;
        Some(SummaryInfo {
            text: self.summary.as_ref().map(|s| s.text.clone()),
            status,
            is_error,
        })
    }

    fn compute_summary_view(&self, rows: usize, cols: usize) -> Option<SummaryViewInfo> {
        if self.view_mode != ViewMode::Summary {
            return None;
        }
        let (status, is_error) = self.summary_status()?;
        let lines = self.summary_lines(cols);
        let height = self.calculate_available_rows(rows);
        let first_line = self.summary_scroll.min(lines.len().saturating_sub(height));

        Some(SummaryViewInfo {
            status,
            is_error,
            lines: lines.iter().skip(first_line).take(height).cloned().collect(),
            first_line,
            total_lines: lines.len(),
        })
    }

    fn summary_lines(&self, cols: usize) -> Vec<String> {
        self.summary
            .as_ref()
            .map(|summary| wrap_paragraphs(&summary.text, cols.saturating_sub(SUMMARY_VIEW_MARGIN)))
            .unwrap_or_default()
    }

    /// Clamps the expanded summary's scroll offset so the last page of text
    /// stays in view on a `rows` x `cols` pane.
    pub fn fit_summary_scroll(&mut self, rows: usize, cols: usize) {
        let max_start = self
            .summary_lines(cols)
            .len()
            .saturating_sub(self.calculate_available_rows(rows));
        self.summary_scroll = self.summary_scroll.min(max_start);
    }

    fn compute_charts(&self) -> Option<ChartsInfo> {
        (self.view_mode == ViewMode::Charts).then(|| ChartsInfo {
            histogram: output_length_histogram(&self.results, HISTOGRAM_BUCKETS),
            pass_rates: pass_rates(&self.results),
        })
    }

    fn compute_dialog(&self) -> Option<DialogInfo> {
        self.dialog.as_ref().map(|dialog| {
            let result = &dialog.result;
            DialogInfo {
                details: vec![
                    ("Input Under Test".to_string(), result.input_under_test.clone()),
                    ("LLM Output".to_string(), result.llm_output.clone()),
                    ("Criteria".to_string(), result.criteria.clone()),
                    ("Auto Eval".to_string(), format_score(Some(result.auto_eval))),
                    ("Auto Feedback".to_string(), result.auto_feedback.clone()),
                ],
                score_input: dialog.score_input.clone(),
                comment_input: dialog.comment_input.clone(),
                focus: dialog.focus,
                submitting: dialog.is_submitting(),
                error: dialog.error.clone(),
            }
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.view_mode) {
            (InputMode::Search, _) => "Type to search  Enter: keep  Esc: clear".to_string(),
            (InputMode::Feedback, _) => {
                "Tab: switch field  Enter: submit  Esc: cancel".to_string()
            }
            (InputMode::Normal, ViewMode::Table) => {
                "j/k: move  h/l: page  /: search  f: mismatches  Enter: review  s: summary  e: expand  c: charts  r: refresh  q: quit".to_string()
            }
            (InputMode::Normal, ViewMode::Charts) => {
                "h/l: page  f: mismatches  s: summary  c/Esc: table  r: refresh  q: quit".to_string()
            }
            (InputMode::Normal, ViewMode::Summary) => {
                "j/k: scroll  s: summarize again  e/Esc: table  c: charts  q: quit".to_string()
            }
        };

        FooterInfo { keybindings }
    }

    /// Rows left for table rows after chrome, search bar and summary panel.
    fn calculate_available_rows(&self, total_rows: usize) -> usize {
        let mut chrome = TABLE_CHROME_ROWS;
        if self.compute_search_bar().is_some() {
            chrome += SEARCH_BAR_ROWS;
        }
        if self.view_mode != ViewMode::Summary && self.has_summary() {
            chrome += SUMMARY_PANEL_ROWS;
        }
        total_rows.saturating_sub(chrome).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::RequestKind;

    fn row(id: &str, auto_eval: f64, human_eval: Option<f64>) -> TestResult {
        TestResult {
            id: id.to_string(),
            input_under_test: format!("input {id}"),
            llm_output: format!("output {id}"),
            criteria: "be correct".to_string(),
            auto_eval,
            auto_feedback: "auto".to_string(),
            human_eval,
            human_feedback: human_eval.map(|_| "checked".to_string()),
        }
    }

    fn state_with(rows: Vec<TestResult>, total_count: usize) -> AppState {
        let mut state = AppState::new(QueryClient::default(), Theme::default());
        state.apply_result_set(ResultSet { results: rows, total_count });
        state
    }

    #[test]
    fn test_mismatch_filter_keeps_only_disagreeing_rows() {
        let mut state = state_with(vec![row("a", 1.0, Some(1.0)), row("b", 1.0, Some(0.0))], 2);
        assert_eq!(state.visible_results().len(), 2);

        state.filter_enabled = true;
        let visible: Vec<&str> = state.visible_results().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(visible, vec!["b"]);
        assert_eq!(state.page_count(), 1);
        assert_eq!(state.total_count, 2);
    }

    #[test]
    fn test_selection_wraps_over_visible_rows() {
        let mut state = state_with(vec![row("a", 1.0, None), row("b", 1.0, None)], 2);
        state.move_selection_up();
        assert_eq!(state.selected_result().unwrap().id, "b");
        state.move_selection_down();
        assert_eq!(state.selected_result().unwrap().id, "a");
    }

    #[test]
    fn test_clamp_selection_after_filter() {
        let mut state = state_with(vec![row("a", 1.0, None), row("b", 1.0, Some(1.0))], 2);
        state.selected_index = 1;
        state.filter_enabled = true;
        state.clamp_selection();
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.selected_result().unwrap().id, "a");
    }

    #[test]
    fn test_last_page_is_at_least_one() {
        let state = state_with(vec![], 0);
        assert_eq!(state.page_count(), 0);
        assert_eq!(state.last_page(), 1);
        assert_eq!(state_with(vec![], 31).last_page(), 4);
    }

    #[test]
    fn test_load_error_keeps_rows() {
        let mut state = state_with(vec![row("a", 1.0, None)], 1);
        state.apply_load_error(&EvalboardError::Request { status: 500, body: "down".to_string() });
        assert_eq!(state.results.len(), 1);
        assert_eq!(state.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
        assert_eq!(state.load_state, LoadState::Errored);

        let vm = state.compute_viewmodel(24, 120);
        assert_eq!(vm.notice.as_deref(), Some(LOAD_ERROR_MESSAGE));
        assert!(vm.empty_state.is_none());
    }

    #[test]
    fn test_dialog_prefills_from_row() {
        let mut state = state_with(vec![row("a", 1.0, Some(4.0)), row("b", 0.0, None)], 2);
        assert!(state.open_dialog());
        let dialog = state.dialog.clone().unwrap();
        assert_eq!(dialog.score_input, "4");
        assert_eq!(dialog.comment_input, "checked");

        state.close_dialog();
        state.move_selection_down();
        assert!(state.open_dialog());
        let dialog = state.dialog.clone().unwrap();
        assert_eq!(dialog.score_input, "");
        assert_eq!(dialog.comment_input, "");
        assert_eq!(state.input_mode, InputMode::Feedback);
    }

    #[test]
    fn test_open_dialog_without_rows() {
        let mut state = state_with(vec![], 0);
        assert!(!state.open_dialog());
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_viewmodel_rows_fit_columns() {
        let long = "x".repeat(500);
        let mut result = row("a", 0.2, Some(0.9));
        result.llm_output = long;
        let state = state_with(vec![result], 1);

        let vm = state.compute_viewmodel(30, 100);
        let display = &vm.rows[0];
        assert_eq!(display.output.chars().count(), vm.columns.output);
        assert!(display.output.ends_with('…'));
        assert!(!display.auto_passed);
        assert_eq!(display.human_passed, Some(true));
        assert!(display.mismatched);
        assert!(display.is_selected);
    }

    #[test]
    fn test_viewmodel_highlights_keyword_in_input() {
        let mut state = state_with(vec![row("a", 1.0, None)], 1);
        state.search_query = "input".to_string();
        let vm = state.compute_viewmodel(30, 120);
        assert_eq!(vm.rows[0].highlight_ranges, vec![(0, 5)]);
        assert!(vm.search_bar.is_some());
    }

    #[test]
    fn test_viewmodel_windows_rows_on_short_terminal() {
        let rows: Vec<TestResult> = (0..10).map(|i| row(&i.to_string(), 1.0, None)).collect();
        let mut state = state_with(rows, 10);
        state.selected_index = 9;

        let vm = state.compute_viewmodel(TABLE_CHROME_ROWS + 4, 120);
        assert_eq!(vm.rows.len(), 4);
        assert_eq!(vm.rows[vm.selected_index].id, "9");
    }

    #[test]
    fn test_empty_states() {
        let mut state = AppState::new(QueryClient::default(), Theme::default());
        state.load_state = LoadState::Loading;
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "Loading test results…");

        let mut state = state_with(vec![], 0);
        state.search_query = "zzz".to_string();
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "No results match \"zzz\"");

        let mut state = state_with(vec![row("a", 1.0, Some(1.0))], 1);
        state.filter_enabled = true;
        let vm = state.compute_viewmodel(24, 80);
        assert_eq!(vm.empty_state.unwrap().message, "No mismatches on this page");
    }

    #[test]
    fn test_charts_only_in_charts_view() {
        let mut state = state_with(vec![row("a", 1.0, None)], 1);
        assert!(state.compute_viewmodel(24, 80).charts.is_none());
        state.view_mode = ViewMode::Charts;
        let charts = state.compute_viewmodel(24, 80).charts.unwrap();
        assert_eq!(charts.pass_rates.auto_rate, Some(1.0));
        assert_eq!(charts.pass_rates.human_rate, None);
    }

    #[test]
    fn test_expanded_summary_windows_whole_text() {
        let mut state = state_with(vec![row("a", 1.0, None)], 1);
        let points: Vec<String> = (1..=50).map(|i| format!("point {i}")).collect();
        state.apply_summary(points.join("\n"));

        let vm = state.compute_viewmodel(30, 80);
        assert!(vm.summary.is_some());
        assert!(vm.summary_view.is_none());

        state.view_mode = ViewMode::Summary;
        state.summary_scroll = 100;
        let vm = state.compute_viewmodel(30, 80);
        assert!(vm.summary.is_none());
        assert!(vm.empty_state.is_none());

        let view = vm.summary_view.unwrap();
        assert_eq!(view.total_lines, 50);
        assert_eq!(view.lines.len(), 21);
        assert_eq!(view.first_line, 29);
        assert_eq!(view.lines.last().map(String::as_str), Some("point 50"));

        state.fit_summary_scroll(30, 80);
        assert_eq!(state.summary_scroll, 29);
    }

    #[test]
    fn test_new_summary_scrolls_to_top() {
        let mut state = state_with(vec![], 0);
        state.summary_scroll = 7;
        state.apply_summary("fresh".to_string());
        assert_eq!(state.summary_scroll, 0);
    }

    #[test]
    fn test_detach_resets_waiting_flags() {
        let mut state = state_with(vec![row("a", 1.0, None)], 1);
        let _ = state.request_page().unwrap();
        let _ = state.request_summary().unwrap();
        assert!(state.query.is_pending(RequestKind::Summary));

        state.detach();
        assert_eq!(state.load_state, LoadState::Loaded);
        assert!(!state.summary_loading);
        assert!(!state.query.is_pending(RequestKind::Summary));
    }
}
