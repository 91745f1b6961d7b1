//! Past-blog list and loader handlers

use blogsmith_core::prelude::*;
use blogsmith_core::{GenerationResult, PastBlogSummary};

use crate::message::Message;
use crate::state::{AppState, FocusArea, LoadingOverlay};

use super::{Task, UpdateAction, UpdateResult};

pub fn handle_refresh(state: &mut AppState) -> UpdateResult {
    if state.past_blogs.refreshing {
        return UpdateResult::none();
    }
    state.past_blogs.refreshing = true;
    UpdateResult::action(UpdateAction::RefreshPastBlogs)
}

pub fn handle_list_loaded(state: &mut AppState, items: Vec<PastBlogSummary>) -> UpdateResult {
    debug!("Past blog list has {} entries", items.len());
    state.past_blogs.replace(items);
    UpdateResult::none()
}

pub fn handle_load_selected(state: &mut AppState) -> UpdateResult {
    match state.past_blogs.selected_item() {
        Some(blog) => UpdateResult::message(Message::LoadPastBlog {
            filename: blog.filename.clone(),
        }),
        None => UpdateResult::none(),
    }
}

/// Enter `Loading` and fetch one saved blog
pub fn handle_load(state: &mut AppState, filename: String) -> UpdateResult {
    if let Err(e) = state.view.begin_load() {
        debug!("{}", e);
        return UpdateResult::none();
    }

    let op = state.begin_operation();
    state.overlay = Some(LoadingOverlay::past_blog(&filename));
    info!(op, %filename, "Loading saved blog");

    UpdateResult::action(UpdateAction::SpawnTask(Task::LoadPastBlog { op, filename }))
}

/// Replace the current result with the saved blog and show its preview
pub fn handle_loaded(
    state: &mut AppState,
    op: u64,
    filename: String,
    content: String,
) -> UpdateResult {
    if !state.is_current_operation(op) {
        debug!(op, "Ignoring stale blog content");
        return UpdateResult::none();
    }

    state.end_operation();
    if let Err(e) = state.view.finish_load() {
        warn!("{}", e);
        return UpdateResult::none();
    }

    state.set_result(GenerationResult::from_saved_blog(content));
    state.focus = FocusArea::Content;
    state.notify_info(format!("Loaded {}", filename));
    UpdateResult::none()
}

/// Notify and return to whatever was showing before the load
pub fn handle_load_failed(
    state: &mut AppState,
    op: u64,
    filename: String,
    message: String,
) -> UpdateResult {
    if !state.is_current_operation(op) {
        debug!(op, "Ignoring stale load failure");
        return UpdateResult::none();
    }

    state.end_operation();
    warn!(%filename, "Failed to load blog: {}", message);

    match state.view.abort_load() {
        Ok(previous) => debug!("Restored {} view", previous.name()),
        Err(e) => warn!("{}", e),
    }
    state.notify_error(Error::past_blog_load(message).to_string());
    UpdateResult::none()
}
