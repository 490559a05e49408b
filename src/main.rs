//! Zellij plugin wrapper and entry point.
//!
//! This module is the thin integration layer between the Evalboard library
//! and the Zellij plugin system: it implements `ZellijPlugin`, translates
//! Zellij events into library events and executes the returned actions.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, `WebRequestResult`, `Visible` events
//! 3. **Permission**: Once `WebAccess` is granted the first page is requested
//! 4. **Update**: Handle events, delegate to library layer
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key` → per-mode key events (see below)
//! - `WebRequestResult` → `Event::Response`
//! - `Visible(bool)` → `Event::Visible`
//! - `PermissionRequestResult(Granted)` → `Event::Mounted`
//!
//! # Keybindings
//!
//! In normal mode:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `l`/`Right`, `h`/`Left`: Next / previous page
//! - `/`: Edit search keyword
//! - `f`: Toggle mismatch filter
//! - `Enter`: Review selected result
//! - `s`: Fetch error summary
//! - `e`: Expand summary (`j`/`k` scroll it)
//! - `c`: Toggle charts
//! - `r`: Refresh page
//! - `Esc`: Close charts or summary
//!
//! Keys held with Ctrl, Alt or Super are ignored (see `evalboard::app::keys`).
//! - `q`: Hide plugin
//!
//! In search mode:
//! - characters: Type keyword (every keystroke re-queries)
//! - `Enter`: Keep keyword
//! - `Esc`: Clear keyword
//!
//! In the feedback dialog:
//! - characters: Type into focused field
//! - `Tab`: Switch field
//! - `Enter`: Submit
//! - `Esc`: Cancel

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
use plugin::State;

#[cfg(target_family = "wasm")]
register_plugin!(State);

#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("evalboard is a Zellij plugin; build it for wasm32-wasip1 and load it from Zellij");
}

#[cfg(target_family = "wasm")]
mod plugin {
    use std::collections::BTreeMap;
    use zellij_tile::prelude::*;

    use evalboard::query::{self, HttpResponse};
    use evalboard::app::map_key;
    use evalboard::{handle_event, Action, Config, Event};

    /// Plugin state wrapper around the library's `AppState`.
    pub struct State {
        app: evalboard::AppState,
    }

    impl Default for State {
        fn default() -> Self {
            Self {
                app: evalboard::initialize(&Config::default()),
            }
        }
    }

    impl ZellijPlugin for State {
        /// Initializes the plugin on load.
        ///
        /// Requests `WebAccess` (needed by `web_request`) and subscribes to
        /// key input, request results, visibility and the permission answer.
        fn load(&mut self, configuration: BTreeMap<String, String>) {
            let config = Config::from_zellij(&configuration);
            evalboard::observability::init_tracing(&config);

            let span = tracing::debug_span!("plugin_load");
            let _guard = span.entered();

            tracing::debug!(endpoint = %config.endpoint, "parsed configuration");
            self.app = evalboard::initialize(&config);

            request_permission(&[PermissionType::WebAccess]);
            subscribe(&[
                EventType::Key,
                EventType::WebRequestResult,
                EventType::PermissionRequestResult,
                EventType::Visible,
            ]);

            tracing::debug!("plugin load complete - waiting for permissions");
        }

        /// Translates a Zellij event, delegates to `handle_event` and executes
        /// the resulting actions. Returns `true` if the UI should re-render.
        fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
            let event_name = Self::get_event_name(&event);
            let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
            let _guard = span.entered();

            let our_event = match event {
                zellij_tile::prelude::Event::Key(ref key) => match map_key(self.app.input_mode, key) {
                    Some(event) => event,
                    None => return false,
                },
                zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                    tracing::debug!(status, bytes = body.len(), "web request result");
                    Event::Response(HttpResponse { status, body, context })
                }
                zellij_tile::prelude::Event::Visible(visible) => Event::Visible(visible),
                zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                    PermissionStatus::Granted => {
                        tracing::debug!("web access granted");
                        Event::Mounted
                    }
                    PermissionStatus::Denied => {
                        tracing::warn!("web access denied - results cannot be fetched");
                        return false;
                    }
                },
                _ => return false,
            };

            match handle_event(&mut self.app, &our_event) {
                Ok((should_render, actions)) => {
                    tracing::debug!(action_count = actions.len(), should_render, "event handled");
                    for action in &actions {
                        Self::execute_action(action);
                    }
                    should_render
                }
                Err(e) => {
                    tracing::warn!(error = %e, "error handling event");
                    false
                }
            }
        }

        fn render(&mut self, rows: usize, cols: usize) {
            self.app.fit_summary_scroll(rows, cols);
            evalboard::ui::render(&self.app, rows, cols);
        }
    }

    impl State {
        fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
            match event {
                zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
                zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                    format!("WebRequestResult({status})")
                }
                zellij_tile::prelude::Event::Visible(visible) => format!("Visible({visible})"),
                zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                    "PermissionRequestResult".to_string()
                }
                _ => "Other".to_string(),
            }
        }

        /// Translates library actions to Zellij API calls.
        #[tracing::instrument(level = "debug")]
        fn execute_action(action: &Action) {
            match action {
                Action::CloseFocus => {
                    tracing::debug!("hiding plugin");
                    hide_self();
                }
                Action::Http(request) => {
                    let verb = match request.verb {
                        query::HttpVerb::Get => HttpVerb::Get,
                        query::HttpVerb::Post => HttpVerb::Post,
                    };
                    tracing::debug!(url = %request.url, kind = request.tag.kind.as_str(), seq = request.tag.seq, "sending web request");
                    web_request(
                        &request.url,
                        verb,
                        request.headers.clone(),
                        request.body.clone(),
                        request.context(),
                    );
                }
            }
        }
    }
}
