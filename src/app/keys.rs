//! Keyboard mapping from Zellij keys to application events.
//!
//! Which event a key produces depends on the [`InputMode`]. Keys held with
//! Ctrl, Alt or Super are left to Zellij, so `Ctrl+c` does not toggle charts
//! and `Alt+r` does not refresh. Shift is accepted because terminals may
//! report it on upper-case characters and `Shift+Tab`.

use super::handler::Event;
use super::modes::InputMode;
use zellij_tile::prelude::{BareKey, KeyModifier, KeyWithModifier};

/// Maps a key to the event it triggers in `mode`, or `None` if unbound.
#[must_use]
pub fn map_key(mode: InputMode, key: &KeyWithModifier) -> Option<Event> {
    if has_command_modifier(key) {
        tracing::trace!(bare_key = ?key.bare_key, "ignoring key with modifiers");
        return None;
    }

    let event = match mode {
        InputMode::Normal => match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Right | BareKey::Char('l') => Event::NextPage,
            BareKey::Left | BareKey::Char('h') => Event::PrevPage,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('f') => Event::ToggleMismatchFilter,
            BareKey::Enter => Event::OpenFeedback,
            BareKey::Char('s') => Event::RequestSummary,
            BareKey::Char('e') => Event::ToggleSummaryView,
            BareKey::Char('c') => Event::ToggleCharts,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc => Event::Escape,
            _ => return None,
        },
        InputMode::Search => match key.bare_key {
            BareKey::Enter => Event::ConfirmSearch,
            BareKey::Esc => Event::ExitSearch,
            BareKey::Down => Event::KeyDown,
            BareKey::Up => Event::KeyUp,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        },
        InputMode::Feedback => match key.bare_key {
            BareKey::Tab => Event::SwitchDialogField,
            BareKey::Enter => Event::SubmitFeedback,
            BareKey::Esc => Event::CancelFeedback,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        },
    };
    Some(event)
}

fn has_command_modifier(key: &KeyWithModifier) -> bool {
    [KeyModifier::Ctrl, KeyModifier::Alt, KeyModifier::Super]
        .iter()
        .any(|modifier| key.has_modifiers(&[*modifier]))
}
