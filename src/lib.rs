//! Evalboard: a Zellij plugin for reviewing automatically evaluated LLM test
//! results.
//!
//! Evalboard lists test results served by an evaluation backend and lets a
//! human reviewer:
//! - Page through results and filter them by keyword on the server
//! - Show only rows where the human and automatic scores disagree
//! - Attach a human score and comment to a result
//! - Fetch a textual summary of common errors
//! - Chart output lengths and pass rates for the page on screen

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────┐                     ┌───────────────┐
//! │ UI Layer      │                     │ Query Layer   │
//! │ (ui/)         │                     │ (query/)      │
//! │ - Rendering   │                     │ - URLs        │
//! │ - Theming     │                     │ - Sequencing  │
//! │ - Components  │                     │ - Decoding    │
//! └───────────────┘                     └───────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Sandbox paths (infrastructure/)                  │
//! │  - Errors, results, feedback, chart data (domain/)  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (test results, feedback, errors)
//! - [`query`]: Request building, response sequencing and decoding
//! - [`infrastructure`]: Sandbox paths
//! - [`ui`]: Terminal rendering with theme support
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/evalboard.wasm" {
//!         endpoint "http://127.0.0.1:8000"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Request Flow
//!
//! The host performs HTTP on the plugin's behalf, so a remote call is two
//! events apart:
//!
//! 1. An event (mount, page change, keystroke in the search bar) makes the
//!    handler return [`Action::Http`] with a tagged request
//! 2. `main.rs` hands it to Zellij's `web_request`
//! 3. The result comes back as [`Event::Response`]; the query client drops it
//!    unless it answers the latest request of its kind
//! 4. The decoded value is applied to the state and the UI re-renders
//!
//! # Example
//!
//! ```
//! use evalboard::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Mounted)?;
//!
//! let Action::Http(request) = &actions[0] else { unreachable!() };
//! assert_eq!(request.url, "http://127.0.0.1:8000/test_results/?offset=0&limit=10");
//! # Ok::<(), evalboard::EvalboardError>(())
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod query;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode, LoadState, ViewMode};
pub use domain::{EvalboardError, Result, TestResult};
pub use ui::Theme;

use query::{Endpoint, QueryClient, DEFAULT_ENDPOINT};
use std::collections::BTreeMap;

/// Plugin configuration parsed from Zellij's configuration map.
///
/// All fields are optional in the map; missing values fall back to
/// [`Config::default`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the evaluation backend. Default: `http://127.0.0.1:8000`
    pub endpoint: String,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` refers to the host home.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing level: `trace`, `debug`, `info`, `warn`, `error`.
    /// Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values count as missing.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use evalboard::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("endpoint".to_string(), "https://evals.example.com".to_string());
    /// map.insert("theme".to_string(), "catppuccin-latte".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.endpoint, "https://evals.example.com");
    /// assert_eq!(config.theme_name.as_deref(), Some("catppuccin-latte"));
    /// assert!(config.trace_level.is_none());
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            endpoint: get("endpoint").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
        }
    }

    /// Parses the configured endpoint, falling back to the default.
    #[must_use]
    pub fn resolve_endpoint(&self) -> Endpoint {
        Endpoint::parse(&self.endpoint).unwrap_or_else(|e| {
            tracing::warn!(endpoint = %self.endpoint, error = %e, "invalid endpoint, using default");
            Endpoint::default()
        })
    }

    /// Loads the configured theme: file first, then built-in name, then the
    /// default. Failures are logged and fall through to the default.
    #[must_use]
    pub fn resolve_theme(&self) -> Theme {
        self.theme_file.as_ref().map_or_else(
            || {
                self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                    Theme::from_name(theme_name).unwrap_or_else(|| {
                        tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                        Theme::default()
                    })
                })
            },
            |theme_file| {
                let path = infrastructure::expand_tilde(theme_file);
                Theme::from_file(&path).unwrap_or_else(|e| {
                    tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                    Theme::default()
                })
            },
        )
    }
}

/// Initializes the plugin state from configuration.
///
/// The returned state has fetched nothing yet; the first page is requested
/// on [`Event::Mounted`].
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing evalboard plugin");

    let query = QueryClient::new(config.resolve_endpoint());
    tracing::debug!(endpoint = %query.endpoint().as_str(), "backend endpoint");

    AppState::new(query, config.resolve_theme())
}
