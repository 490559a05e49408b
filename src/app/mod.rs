//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the plugin runtime (main.rs) and the domain and
//! query layers. It implements the event-driven architecture that powers the
//! interactive UI.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └───────── Backend Responses ──────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`keys`]: Per-mode keyboard mapping
//! - [`modes`]: Input, view and fetch state machine types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod keys;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use keys::map_key;
pub use modes::{DialogField, InputMode, LoadState, ViewMode};
pub use state::{AppState, FeedbackDialog, Summary, LOAD_ERROR_MESSAGE, SUMMARY_ERROR_MESSAGE};
