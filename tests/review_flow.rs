//! End-to-end review flows: events go through `handle_event`, requests are
//! answered by an in-memory backend that behaves like the evaluation
//! service, and responses are fed back as events.

use evalboard::app::{LoadState, LOAD_ERROR_MESSAGE};
use evalboard::query::{HttpRequest, HttpResponse, HttpVerb, QueryClient};
use evalboard::{handle_event, Action, AppState, Event, Theme};
use serde_json::{json, Value};
use std::collections::VecDeque;
use url::Url;

/// In-memory stand-in for the evaluation backend.
struct Backend {
    rows: Vec<Value>,
    summary: String,
    /// Statuses to answer the next requests with instead of serving them.
    failures: VecDeque<(u16, &'static str)>,
}

impl Backend {
    fn with_rows(count: usize) -> Self {
        let rows = (1..=count)
            .map(|i| {
                json!({
                    "id": format!("t{i}"),
                    "input_under_test": format!("question {i}"),
                    "llm_output": "x".repeat(i * 10),
                    // Older servers sent scores as strings.
                    "auto_eval": if i % 2 == 0 { json!("1") } else { json!(0.0) },
                    "auto_feedback": "auto",
                    "criteria": "correctness",
                    "human_eval": null,
                    "human_feedback": null,
                })
            })
            .collect();
        Self {
            rows,
            summary: "Most failures are off-topic answers.".to_string(),
            failures: VecDeque::new(),
        }
    }

    fn serve(&mut self, request: &HttpRequest) -> HttpResponse {
        let (status, body) = match self.failures.pop_front() {
            Some((status, body)) => (status, body.to_string()),
            None => self.route(request),
        };
        HttpResponse {
            status,
            body: body.into_bytes(),
            context: request.context(),
        }
    }

    fn route(&mut self, request: &HttpRequest) -> (u16, String) {
        let url = Url::parse(&request.url).unwrap();
        match (request.verb, url.path()) {
            (HttpVerb::Get, "/test_results/") => self.list(&url),
            (HttpVerb::Get, "/summarize/") => (200, json!({ "summary": self.summary }).to_string()),
            (HttpVerb::Post, "/add_feedback/") => self.add_feedback(&request.body),
            _ => (404, "not found".to_string()),
        }
    }

    fn list(&self, url: &Url) -> (u16, String) {
        let param = |name: &str| url.query_pairs().find(|(k, _)| k == name).map(|(_, v)| v.into_owned());
        let offset: usize = param("offset").unwrap().parse().unwrap();
        let limit: usize = param("limit").unwrap().parse().unwrap();
        let keyword = param("keyword").unwrap_or_default();

        let matching: Vec<&Value> = self
            .rows
            .iter()
            .filter(|row| row["input_under_test"].as_str().unwrap().contains(&keyword))
            .collect();
        let page: Vec<&Value> = matching.iter().skip(offset).take(limit).copied().collect();

        (200, json!({ "results": page, "total_count": matching.len() }).to_string())
    }

    fn add_feedback(&mut self, body: &[u8]) -> (u16, String) {
        let payload: Value = serde_json::from_slice(body).unwrap();
        let Some(row) = self.rows.iter_mut().find(|row| row["id"] == payload["id"]) else {
            return (404, "unknown id".to_string());
        };
        row["human_eval"] = payload["human_eval"].clone();
        row["human_feedback"] = payload["human_feedback"].clone();
        (200, json!({ "status": "success" }).to_string())
    }
}

/// Drives a state against a backend. Requests are queued until delivered so
/// tests can reorder or drop them.
struct Harness {
    state: AppState,
    backend: Backend,
    pending: Vec<HttpRequest>,
}

impl Harness {
    fn mounted(backend: Backend) -> Self {
        let mut harness = Self {
            state: AppState::new(QueryClient::default(), Theme::default()),
            backend,
            pending: vec![],
        };
        harness.send(Event::Mounted);
        harness.deliver_all();
        harness
    }

    fn send(&mut self, event: Event) {
        let (_, actions) = handle_event(&mut self.state, &event).unwrap();
        for action in actions {
            if let Action::Http(request) = action {
                self.pending.push(request);
            }
        }
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(Event::Char(c));
        }
    }

    /// Answers the pending request at `index`.
    fn deliver(&mut self, index: usize) {
        let request = self.pending.remove(index);
        let response = self.backend.serve(&request);
        self.send(Event::Response(response));
    }

    /// Answers every pending request in issue order, including follow-ups.
    fn deliver_all(&mut self) {
        while !self.pending.is_empty() {
            self.deliver(0);
        }
    }

    fn ids(&self) -> Vec<&str> {
        self.state.results.iter().map(|r| r.id.as_str()).collect()
    }
}

#[test]
fn test_first_page_and_page_count() {
    let mut harness = Harness::mounted(Backend::with_rows(23));

    assert_eq!(harness.state.load_state, LoadState::Loaded);
    assert_eq!(harness.state.results.len(), 10);
    assert_eq!(harness.state.total_count, 23);
    assert_eq!(harness.state.page_count(), 3);

    harness.send(Event::NextPage);
    harness.send(Event::NextPage);
    harness.deliver_all();
    assert_eq!(harness.state.page, 3);
    assert_eq!(harness.ids(), vec!["t21", "t22", "t23"]);
    assert_eq!(harness.state.offset(), (harness.state.page_count() - 1) * 10);
}

#[test]
fn test_exact_multiple_fills_last_page() {
    let mut harness = Harness::mounted(Backend::with_rows(20));
    harness.send(Event::NextPage);
    harness.deliver_all();

    assert_eq!(harness.state.page_count(), 2);
    assert_eq!(harness.state.results.len(), 10);
}

#[test]
fn test_scores_are_canonicalized() {
    let harness = Harness::mounted(Backend::with_rows(2));
    let scores: Vec<f64> = harness.state.results.iter().map(|r| r.auto_eval).collect();
    assert_eq!(scores, vec![0.0, 1.0]);
}

#[test]
fn test_mismatch_filter_is_local() {
    let mut backend = Backend::with_rows(2);
    backend.rows[0]["auto_eval"] = json!(1);
    backend.rows[0]["human_eval"] = json!(1);
    backend.rows[1]["auto_eval"] = json!(1);
    backend.rows[1]["human_eval"] = json!(0);
    let mut harness = Harness::mounted(backend);

    harness.send(Event::ToggleMismatchFilter);
    assert!(harness.pending.is_empty());

    let visible: Vec<&str> = harness.state.visible_results().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(visible, vec!["t2"]);
    assert_eq!(harness.state.total_count, 2);
}

#[test]
fn test_feedback_round_trip_updates_row() {
    let mut harness = Harness::mounted(Backend::with_rows(3));

    harness.send(Event::OpenFeedback);
    harness.type_text("4");
    harness.send(Event::SwitchDialogField);
    harness.type_text("good");
    harness.send(Event::SubmitFeedback);
    harness.deliver_all();

    assert!(harness.state.dialog.is_none());
    let row = &harness.state.results[0];
    assert_eq!(row.id, "t1");
    assert_eq!(row.human_eval, Some(4.0));
    assert_eq!(row.human_feedback.as_deref(), Some("good"));
}

#[test]
fn test_clearing_the_score_sends_empty_string() {
    let mut backend = Backend::with_rows(1);
    backend.rows[0]["human_eval"] = json!(3);
    backend.rows[0]["human_feedback"] = json!("meh");
    let mut harness = Harness::mounted(backend);

    harness.send(Event::OpenFeedback);
    harness.send(Event::Backspace);
    harness.send(Event::SubmitFeedback);

    let body: Value = serde_json::from_slice(&harness.pending[0].body).unwrap();
    assert_eq!(body, json!({ "id": "t1", "human_eval": "", "human_feedback": "meh" }));

    harness.deliver_all();
    assert_eq!(harness.state.results[0].human_eval, None);
}

#[test]
fn test_failed_feedback_keeps_dialog() {
    let mut harness = Harness::mounted(Backend::with_rows(1));
    harness.send(Event::OpenFeedback);
    harness.type_text("1");

    harness.backend.failures.push_back((500, "database is locked"));
    harness.send(Event::SubmitFeedback);
    harness.deliver_all();

    let dialog = harness.state.dialog.as_ref().unwrap();
    assert!(dialog.error.as_deref().unwrap().contains("database is locked"));
    assert_eq!(dialog.score_input, "1");
    assert_eq!(harness.state.results[0].human_eval, None);

    harness.send(Event::SubmitFeedback);
    harness.deliver_all();
    assert!(harness.state.dialog.is_none());
    assert_eq!(harness.state.results[0].human_eval, Some(1.0));
}

#[test]
fn test_failed_refetch_keeps_rows() {
    let mut harness = Harness::mounted(Backend::with_rows(5));
    let before = harness.state.results.clone();

    harness.backend.failures.push_back((502, "bad gateway"));
    harness.send(Event::Refresh);
    harness.deliver_all();

    assert_eq!(harness.state.results, before);
    assert_eq!(harness.state.error.as_deref(), Some(LOAD_ERROR_MESSAGE));

    let vm = harness.state.compute_viewmodel(30, 120);
    assert_eq!(vm.rows.len(), 5);
    assert_eq!(vm.notice.as_deref(), Some(LOAD_ERROR_MESSAGE));
}

#[test]
fn test_newer_search_wins_regardless_of_arrival_order() {
    let mut backend = Backend::with_rows(0);
    for (id, input) in [("a1", "apple"), ("a2", "avocado"), ("ab", "abacus")] {
        backend.rows.push(json!({
            "id": id,
            "input_under_test": input,
            "llm_output": "",
            "criteria": "",
            "auto_eval": 1,
            "auto_feedback": "",
        }));
    }
    let mut harness = Harness::mounted(backend);

    harness.send(Event::SearchMode);
    harness.type_text("a");
    harness.type_text("b");
    assert_eq!(harness.pending.len(), 2);

    // "ab" answered first, then the stale "a" response arrives.
    harness.deliver(1);
    harness.deliver(0);

    assert_eq!(harness.ids(), vec!["ab"]);
    assert_eq!(harness.state.total_count, 1);
    assert_eq!(harness.state.search_query, "ab");
}

#[test]
fn test_summary_is_independent_of_paging() {
    let mut harness = Harness::mounted(Backend::with_rows(15));
    harness.send(Event::RequestSummary);
    harness.send(Event::NextPage);
    harness.deliver_all();

    assert_eq!(harness.state.page, 2);
    assert_eq!(
        harness.state.summary.as_ref().map(|s| s.text.as_str()),
        Some("Most failures are off-topic answers.")
    );

    harness.backend.failures.push_back((500, "model offline"));
    harness.send(Event::RequestSummary);
    harness.deliver_all();
    assert_eq!(harness.state.summary_error.as_deref(), Some("Failed to fetch summary."));
    assert!(!harness.state.summary_loading);
}

#[test]
fn test_charts_reflect_loaded_page() {
    let mut backend = Backend::with_rows(4);
    backend.rows[1]["human_eval"] = json!(0.2);
    let mut harness = Harness::mounted(backend);

    harness.send(Event::ToggleCharts);
    let charts = harness.state.compute_viewmodel(40, 120).charts.unwrap();

    assert_eq!(charts.histogram.iter().map(|b| b.count).sum::<usize>(), 4);
    assert_eq!(charts.pass_rates.auto_rate, Some(0.5));
    assert_eq!(charts.pass_rates.human_rate, Some(0.0));
    assert_eq!(charts.pass_rates.human_count, 1);
}

#[test]
fn test_cancelled_save_lands_without_touching_next_dialog() {
    let mut harness = Harness::mounted(Backend::with_rows(2));

    harness.send(Event::OpenFeedback);
    harness.type_text("1");
    harness.send(Event::SubmitFeedback);
    harness.send(Event::Escape);
    harness.send(Event::KeyDown);
    harness.send(Event::OpenFeedback);
    harness.type_text("7");
    harness.deliver_all();

    let dialog = harness.state.dialog.as_ref().unwrap();
    assert_eq!(dialog.result.id, "t2");
    assert_eq!(dialog.score_input, "7");
    assert!(dialog.error.is_none());
    assert_eq!(harness.state.results[0].human_eval, Some(1.0));
}
