//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to the component layout
//!
//! # Example
//!
//! ```no_run
//! use evalboard::app::AppState;
//! use evalboard::query::QueryClient;
//! use evalboard::ui::{render, Theme};
//!
//! let state = AppState::new(QueryClient::default(), Theme::default());
//! render(&state, 24, 80); // Renders to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
///
/// Prints ANSI-styled output positioned with cursor escapes; does not clear
/// the screen.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols).entered();
    let viewmodel = state.compute_viewmodel(rows, cols);

    components::render_screen(&viewmodel, &state.theme, cols, rows);
}
