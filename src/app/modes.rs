//! Input, view, and fetch state types for the application.
//!
//! These enums are the state machine of the plugin: [`InputMode`] decides how
//! keys are interpreted, [`ViewMode`] decides what the body of the screen
//! shows, and [`LoadState`] tracks the result-page fetch.
//!
//! # Fetch State Machine
//!
//! ```text
//! Idle ──request──▶ Loading ──response──▶ Loaded
//!                      ▲          └──────▶ Errored
//!                      └── page / search change, refresh
//! ```

/// Which field of the feedback dialog receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogField {
    /// Numeric human score.
    Score,
    /// Free-text human comment.
    Comment,
}

impl DialogField {
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Score => Self::Comment,
            Self::Comment => Self::Score,
        }
    }
}

/// Current input handling mode.
///
/// Controls which keybindings are active and how user input is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and commands: j/k, h/l, /, f, Enter, s, e, c, r, q.
    Normal,

    /// Typing into the search bar. Every keystroke re-fetches page 1.
    Search,

    /// Editing the feedback dialog.
    Feedback,
}

/// What the body of the screen shows below the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// The results table.
    Table,

    /// Histogram and pass-rate charts for the loaded page.
    Charts,

    /// The whole error summary, scrolled with j/k.
    Summary,
}

/// Progress of the result-page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The latest request succeeded.
    Loaded,
    /// The latest request failed; stale rows may still be displayed.
    Errored,
}
