//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user input, host
//! visibility changes and backend responses, translating them into state
//! changes and action sequences.
//!
//! # Architecture
//!
//! 1. Events arrive from the plugin runtime (keys, visibility, responses)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! Every page or search change issues a fresh results request. Responses are
//! filtered through the query client first, so a response that is not the
//! latest of its kind never reaches the state.
//!
//! # Example
//!
//! ```
//! use evalboard::app::{handle_event, Action, AppState, Event};
//! use evalboard::query::QueryClient;
//! use evalboard::ui::theme::Theme;
//!
//! let mut state = AppState::new(QueryClient::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Mounted)?;
//! assert!(render);
//! assert!(matches!(actions.as_slice(), [Action::Http(_)]));
//! # Ok::<(), evalboard::EvalboardError>(())
//! ```

use super::modes::{InputMode, LoadState, ViewMode};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::FeedbackSubmission;
use crate::query::{decode_feedback_ack, decode_result_set, decode_summary, HttpResponse, RequestKind};

/// Events triggered by user input, host changes, or backend responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Permissions granted; the first page can be requested.
    Mounted,
    /// The plugin pane was shown or hidden.
    Visible(bool),

    /// Moves selection down by one row (wraps to top).
    KeyDown,
    /// Moves selection up by one row (wraps to bottom).
    KeyUp,
    NextPage,
    PrevPage,

    /// Starts editing the search text.
    SearchMode,
    /// Leaves the search bar keeping the current text.
    ConfirmSearch,
    /// Leaves the search bar and clears the text.
    ExitSearch,
    /// Appends a character to the search text or the focused dialog field.
    Char(char),
    /// Removes the last character of the search text or focused dialog field.
    Backspace,

    ToggleMismatchFilter,

    /// Opens the feedback dialog on the selected row.
    OpenFeedback,
    SwitchDialogField,
    SubmitFeedback,
    CancelFeedback,

    RequestSummary,
    ToggleCharts,
    /// Switches between the table and the full, scrollable summary.
    ToggleSummaryView,
    /// Re-requests the current page.
    Refresh,
    /// Backs out of whatever is in front: dialog, search, charts, summary.
    Escape,
    /// Hides the plugin pane.
    CloseFocus,

    /// A response delivered by the host.
    Response(HttpResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the UI should re-render, and the actions to execute in
/// order.
///
/// # Errors
///
/// Returns errors from request construction. Backend failures are not
/// errors here: they become user-visible state.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Mounted => {
            tracing::debug!("plugin mounted, requesting first page");
            state.mounted = true;
            fetch_page(state)
        }
        Event::Visible(true) => {
            if !state.mounted {
                return Ok((false, vec![]));
            }
            fetch_page(state)
        }
        Event::Visible(false) => {
            state.detach();
            Ok((false, vec![]))
        }
        Event::KeyDown if state.view_mode == ViewMode::Summary => {
            state.summary_scroll = state.summary_scroll.saturating_add(1);
            Ok((true, vec![]))
        }
        Event::KeyUp if state.view_mode == ViewMode::Summary => {
            if state.summary_scroll == 0 {
                return Ok((false, vec![]));
            }
            state.summary_scroll -= 1;
            Ok((true, vec![]))
        }
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::NextPage => {
            if state.page >= state.last_page() {
                return Ok((false, vec![]));
            }
            state.page += 1;
            state.selected_index = 0;
            fetch_page(state)
        }
        Event::PrevPage => {
            if state.page <= 1 {
                return Ok((false, vec![]));
            }
            state.page -= 1;
            state.selected_index = 0;
            fetch_page(state)
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search;
            Ok((true, vec![]))
        }
        Event::ConfirmSearch => {
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search_query, "exiting search mode");
            state.input_mode = InputMode::Normal;
            if state.search_query.is_empty() {
                return Ok((true, vec![]));
            }
            state.search_query.clear();
            search_changed(state)
        }
        Event::Char(c) => match state.input_mode {
            InputMode::Search => {
                state.search_query.push(*c);
                tracing::trace!(query = %state.search_query, char = %c, "search query updated");
                search_changed(state)
            }
            InputMode::Feedback => {
                let Some(dialog) = state.dialog.as_mut() else {
                    return Ok((false, vec![]));
                };
                dialog.focused_input_mut().push(*c);
                dialog.error = None;
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::Backspace => match state.input_mode {
            InputMode::Search => {
                if state.search_query.pop().is_none() {
                    return Ok((false, vec![]));
                }
                search_changed(state)
            }
            InputMode::Feedback => {
                let Some(dialog) = state.dialog.as_mut() else {
                    return Ok((false, vec![]));
                };
                dialog.focused_input_mut().pop();
                dialog.error = None;
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::ToggleMismatchFilter => {
            state.filter_enabled = !state.filter_enabled;
            tracing::debug!(enabled = state.filter_enabled, "mismatch filter toggled");
            state.clamp_selection();
            Ok((true, vec![]))
        }
        Event::OpenFeedback => Ok((state.open_dialog(), vec![])),
        Event::SwitchDialogField => {
            let Some(dialog) = state.dialog.as_mut() else {
                return Ok((false, vec![]));
            };
            dialog.focus = dialog.focus.next();
            Ok((true, vec![]))
        }
        Event::SubmitFeedback => submit_feedback(state),
        Event::CancelFeedback => {
            if state.dialog.is_none() {
                return Ok((false, vec![]));
            }
            state.close_dialog();
            Ok((true, vec![]))
        }
        Event::RequestSummary => {
            tracing::debug!("requesting summary");
            let request = state.request_summary()?;
            Ok((true, vec![Action::Http(request)]))
        }
        Event::ToggleCharts => {
            state.view_mode = match state.view_mode {
                ViewMode::Charts => ViewMode::Table,
                ViewMode::Table | ViewMode::Summary => ViewMode::Charts,
            };
            Ok((true, vec![]))
        }
        Event::ToggleSummaryView => {
            if state.view_mode == ViewMode::Summary {
                state.view_mode = ViewMode::Table;
                return Ok((true, vec![]));
            }
            if !state.has_summary() {
                return Ok((false, vec![]));
            }
            state.view_mode = ViewMode::Summary;
            Ok((true, vec![]))
        }
        Event::Refresh => fetch_page(state),
        Event::Escape => match state.input_mode {
            InputMode::Feedback => handle_event(state, &Event::CancelFeedback),
            InputMode::Search => handle_event(state, &Event::ExitSearch),
            InputMode::Normal if state.view_mode != ViewMode::Table => {
                state.view_mode = ViewMode::Table;
                Ok((true, vec![]))
            }
            InputMode::Normal if state.summary.is_some() || state.summary_error.is_some() => {
                state.summary = None;
                state.summary_error = None;
                Ok((true, vec![]))
            }
            InputMode::Normal => Ok((false, vec![])),
        },
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Response(response) => handle_response(state, response),
    }
}

/// Issues a request for the current page and search text.
fn fetch_page(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let request = state.request_page()?;
    Ok((true, vec![Action::Http(request)]))
}

/// The search text changed: back to page 1 and re-fetch.
fn search_changed(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    state.page = 1;
    state.selected_index = 0;
    fetch_page(state)
}

fn submit_feedback(state: &mut AppState) -> Result<(bool, Vec<Action>)> {
    let Some(dialog) = state.dialog.as_mut() else {
        return Ok((false, vec![]));
    };
    if dialog.is_submitting() {
        tracing::debug!("feedback submission already in flight");
        return Ok((false, vec![]));
    }

    let submission = match FeedbackSubmission::from_input(
        dialog.result.id.clone(),
        &dialog.score_input,
        &dialog.comment_input,
    ) {
        Ok(submission) => submission,
        Err(e) => {
            tracing::debug!(error = %e, "rejecting feedback input");
            dialog.error = Some(e.to_string());
            return Ok((true, vec![]));
        }
    };

    let request = state.query.submit_feedback(&submission)?;
    if let Some(dialog) = state.dialog.as_mut() {
        dialog.pending = Some(request.tag);
        dialog.error = None;
    }
    Ok((true, vec![Action::Http(request)]))
}

fn handle_response(state: &mut AppState, response: &HttpResponse) -> Result<(bool, Vec<Action>)> {
    let Some(tag) = state.query.accept(response) else {
        return Ok((false, vec![]));
    };
    tracing::debug!(kind = tag.kind.as_str(), seq = tag.seq, status = response.status, "response accepted");

    match tag.kind {
        RequestKind::Results => match decode_result_set(response) {
            Ok(set) => {
                state.apply_result_set(set);
                if state.results.is_empty() && state.page > state.last_page() {
                    tracing::debug!(page = state.page, last_page = state.last_page(), "page out of range, moving to last page");
                    state.page = state.last_page();
                    return fetch_page(state);
                }
                Ok((true, vec![]))
            }
            Err(e) => {
                state.apply_load_error(&e);
                Ok((true, vec![]))
            }
        },
        RequestKind::Summary => {
            match decode_summary(response) {
                Ok(text) => state.apply_summary(text),
                Err(e) => state.apply_summary_error(&e),
            }
            Ok((true, vec![]))
        }
        RequestKind::Feedback => {
            // A dialog cancelled mid-save may have been replaced by another one.
            let owned = state.dialog.as_ref().is_some_and(|dialog| dialog.pending == Some(tag));
            match decode_feedback_ack(response) {
                Ok(()) => {
                    tracing::info!(owned, "feedback saved");
                    if owned {
                        state.close_dialog();
                    }
                    fetch_page(state)
                }
                Err(e) => {
                    tracing::warn!(error = %e, owned, "feedback submission failed");
                    let Some(dialog) = state.dialog.as_mut().filter(|_| owned) else {
                        return Ok((false, vec![]));
                    };
                    dialog.pending = None;
                    dialog.error = Some(format!("Failed to save feedback: {e}"));
                    Ok((true, vec![]))
                }
            }
        }
    }
}
