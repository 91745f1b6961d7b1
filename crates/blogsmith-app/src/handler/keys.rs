//! Key event handlers for each focus area

use crate::form::FieldEdit;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, FocusArea};
use crate::view::{BodyState, ResultTab};

/// Convert key events to messages based on focus and body state
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if key.is_force_quit() {
        return Some(Message::Quit);
    }

    // No cancellation: only quit works while an operation runs
    if state.view.is_loading() {
        return None;
    }

    if let Some(msg) = handle_key_global(state, &key) {
        return Some(msg);
    }

    match state.focus {
        FocusArea::Topic | FocusArea::AsOf => handle_key_form(key),
        FocusArea::PastBlogs => handle_key_past_blogs(key),
        FocusArea::Content => handle_key_content(state, key),
    }
}

/// Keys that work whatever has focus
fn handle_key_global(state: &AppState, key: &InputKey) -> Option<Message> {
    match key {
        InputKey::Tab => Some(Message::FocusNext),
        InputKey::BackTab => Some(Message::FocusPrev),

        InputKey::CharCtrl('s') => Some(Message::DownloadMarkdown),
        InputKey::CharCtrl('y') => Some(Message::CopyMarkdown),
        InputKey::CharCtrl('r') => Some(Message::RefreshPastBlogs),

        InputKey::Esc if state.view.body() == BodyState::Error => Some(Message::DismissError),

        _ => None,
    }
}

/// Handle key events while a form field has focus
fn handle_key_form(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::Submit),

        // Leave the form
        InputKey::Esc => Some(Message::FocusNext),

        InputKey::Char(c) => Some(Message::FormEdit(FieldEdit::Insert(c))),
        InputKey::Backspace => Some(Message::FormEdit(FieldEdit::Backspace)),
        InputKey::Delete => Some(Message::FormEdit(FieldEdit::Delete)),
        InputKey::Left => Some(Message::FormEdit(FieldEdit::Left)),
        InputKey::Right => Some(Message::FormEdit(FieldEdit::Right)),
        InputKey::Home | InputKey::CharCtrl('a') => Some(Message::FormEdit(FieldEdit::Home)),
        InputKey::End | InputKey::CharCtrl('e') => Some(Message::FormEdit(FieldEdit::End)),
        InputKey::CharCtrl('u') => Some(Message::FormEdit(FieldEdit::Clear)),

        InputKey::Up => Some(Message::FocusPrev),
        InputKey::Down => Some(Message::FocusNext),

        _ => None,
    }
}

/// Handle key events while the saved-blog list has focus
fn handle_key_past_blogs(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') => Some(Message::Quit),

        InputKey::Up | InputKey::Char('k') => Some(Message::SelectPrevBlog),
        InputKey::Down | InputKey::Char('j') => Some(Message::SelectNextBlog),

        InputKey::Enter => Some(Message::LoadSelectedBlog),
        InputKey::Char('r') => Some(Message::RefreshPastBlogs),

        _ => None,
    }
}

/// Handle key events while the main pane has focus
fn handle_key_content(state: &AppState, key: InputKey) -> Option<Message> {
    let has_result = state.view.body() == BodyState::Result;

    match key {
        InputKey::Char('q') => Some(Message::Quit),

        InputKey::Char('d') => Some(Message::DownloadMarkdown),
        InputKey::Char('y') => Some(Message::CopyMarkdown),

        // ─────────────────────────────────────────────────────────
        // Tabs
        // ─────────────────────────────────────────────────────────
        InputKey::Char(c @ '1'..='3') if has_result => c
            .to_digit(10)
            .and_then(ResultTab::from_number)
            .map(Message::SelectTab),
        InputKey::Right | InputKey::Char('l') if has_result => Some(Message::NextTab),
        InputKey::Left | InputKey::Char('h') if has_result => Some(Message::PrevTab),

        // ─────────────────────────────────────────────────────────
        // Scrolling
        // ─────────────────────────────────────────────────────────
        InputKey::Up | InputKey::Char('k') if has_result => Some(Message::ScrollUp),
        InputKey::Down | InputKey::Char('j') if has_result => Some(Message::ScrollDown),
        InputKey::PageUp if has_result => Some(Message::PageUp),
        InputKey::PageDown | InputKey::Char(' ') if has_result => Some(Message::PageDown),
        InputKey::Home | InputKey::Char('g') if has_result => Some(Message::ScrollToTop),
        InputKey::End | InputKey::Char('G') if has_result => Some(Message::ScrollToBottom),

        _ => None,
    }
}
