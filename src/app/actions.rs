//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! plugin runtime executes them in order: hiding the pane or handing an HTTP
//! request to the Zellij host. Keeping them as values lets tests inspect
//! exactly which requests a state transition produced.
//!
//! # Example
//!
//! ```
//! use evalboard::app::Action;
//! use evalboard::query::QueryClient;
//!
//! let mut client = QueryClient::default();
//! let request = client.fetch_summary()?;
//! let actions = vec![Action::Http(request)];
//! assert_eq!(actions.len(), 1);
//! # Ok::<(), evalboard::EvalboardError>(())
//! ```

use crate::query::HttpRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    ///
    /// Sent when the user explicitly requests to exit the plugin (pressing 'q').
    CloseFocus,

    /// Sends a request to the backend through the host.
    ///
    /// The response comes back later as [`Event::Response`](crate::app::Event::Response).
    Http(HttpRequest),
}
