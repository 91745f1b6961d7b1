//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use blogsmith_core::prelude::*;

use crate::export::MarkdownExport;
use crate::message::Message;
use crate::state::{AppPhase, AppState};

use super::{generation, keys::handle_key, past_blogs, UpdateAction, UpdateResult};

/// Shown when download/copy is requested before anything was generated
pub const NOTHING_TO_EXPORT: &str = "Nothing to export yet";

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => {
            state.expire_transients(Instant::now());
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Form
        // ─────────────────────────────────────────────────────────
        Message::FocusNext => {
            state.focus = state.focus.next();
            UpdateResult::none()
        }

        Message::FocusPrev => {
            state.focus = state.focus.prev();
            UpdateResult::none()
        }

        Message::FormEdit(edit) => {
            if let Some(field) = state.focused_field_mut() {
                field.apply(edit);
            }
            UpdateResult::none()
        }

        Message::Submit => generation::handle_submit(state),

        // ─────────────────────────────────────────────────────────
        // Generation
        // ─────────────────────────────────────────────────────────
        Message::GenerationProgress { op } => generation::handle_progress(state, op),
        Message::GenerationCompleted { op, result } => {
            generation::handle_completed(state, op, *result)
        }
        Message::GenerationFailed { op, message } => {
            generation::handle_failed(state, op, message)
        }
        Message::OperationAborted { op, kind } => generation::handle_aborted(state, op, kind),

        // ─────────────────────────────────────────────────────────
        // Result view
        // ─────────────────────────────────────────────────────────
        Message::SelectTab(tab) => {
            state.view.select_tab(tab);
            UpdateResult::none()
        }

        Message::NextTab => {
            state.view.next_tab();
            UpdateResult::none()
        }

        Message::PrevTab => {
            state.view.prev_tab();
            UpdateResult::none()
        }

        Message::ScrollUp => {
            state.active_scroll_mut().scroll_up(1);
            UpdateResult::none()
        }

        Message::ScrollDown => {
            state.active_scroll_mut().scroll_down(1);
            UpdateResult::none()
        }

        Message::PageUp => {
            state.active_scroll_mut().page_up();
            UpdateResult::none()
        }

        Message::PageDown => {
            state.active_scroll_mut().page_down();
            UpdateResult::none()
        }

        Message::ScrollToTop => {
            state.active_scroll_mut().to_top();
            UpdateResult::none()
        }

        Message::ScrollToBottom => {
            state.active_scroll_mut().to_bottom();
            UpdateResult::none()
        }

        Message::DismissError => {
            if let Err(e) = state.view.dismiss() {
                debug!("{}", e);
            }
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Past blogs
        // ─────────────────────────────────────────────────────────
        Message::RefreshPastBlogs => past_blogs::handle_refresh(state),
        Message::PastBlogsLoaded(items) => past_blogs::handle_list_loaded(state, items),

        Message::SelectNextBlog => {
            state.past_blogs.select_next();
            UpdateResult::none()
        }

        Message::SelectPrevBlog => {
            state.past_blogs.select_prev();
            UpdateResult::none()
        }

        Message::LoadSelectedBlog => past_blogs::handle_load_selected(state),
        Message::LoadPastBlog { filename } => past_blogs::handle_load(state, filename),
        Message::PastBlogLoaded {
            op,
            filename,
            content,
        } => past_blogs::handle_loaded(state, op, filename, content),
        Message::PastBlogLoadFailed {
            op,
            filename,
            message,
        } => past_blogs::handle_load_failed(state, op, filename, message),

        // ─────────────────────────────────────────────────────────
        // Export
        // ─────────────────────────────────────────────────────────
        Message::DownloadMarkdown => {
            let Some(result) = state.current_result.as_ref() else {
                state.notify_info(NOTHING_TO_EXPORT);
                return UpdateResult::none();
            };
            let export = MarkdownExport::from_result(result);
            let directory = state.settings.export.resolve_directory();
            UpdateResult::action(UpdateAction::SaveMarkdown { export, directory })
        }

        Message::MarkdownSaved { path } => {
            state.notify_info(format!("Saved {}", path.display()));
            state.last_export = Some(path);
            UpdateResult::none()
        }

        Message::ExportFailed { message } => {
            state.notify_error(format!("Download failed: {}", message));
            UpdateResult::none()
        }

        Message::CopyMarkdown => {
            let Some(result) = state.current_result.as_ref() else {
                state.notify_info(NOTHING_TO_EXPORT);
                return UpdateResult::none();
            };
            UpdateResult::action(UpdateAction::CopyToClipboard {
                text: result.final_markdown.clone(),
            })
        }

        Message::Copied => {
            state.show_copied();
            UpdateResult::none()
        }

        Message::CopyFailed { message } => {
            state.notify_error(message);
            UpdateResult::none()
        }
    }
}
