//! Submit and generation lifecycle handlers

use blogsmith_core::prelude::*;
use blogsmith_core::GenerationResult;

use crate::message::{Message, OperationKind};
use crate::state::{AppState, FocusArea, LoadingOverlay};

use super::{Task, UpdateAction, UpdateResult};

/// Shown in the error body when the generation task dies without reporting
pub const INTERRUPTED_MESSAGE: &str = "Generation was interrupted";

/// Validate the form and start a generation
pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    if state.view.is_loading() {
        debug!("Ignoring submit while loading");
        return UpdateResult::none();
    }

    let params = match state.form.validate() {
        Ok(params) => params,
        Err(e) => {
            state.notify_error(e.to_string());
            return UpdateResult::none();
        }
    };

    if let Err(e) = state.view.submit() {
        warn!("{}", e);
        return UpdateResult::none();
    }

    let op = state.begin_operation();
    state.overlay = Some(LoadingOverlay::generation(&params.topic));
    state.notification = None;
    info!(op, topic = %params.topic, as_of = %params.as_of, "Starting generation");

    UpdateResult::action(UpdateAction::SpawnTask(Task::Generate {
        op,
        topic: params.topic,
        as_of: params.as_of,
    }))
}

/// Advance the progress animation of the pending generation
pub fn handle_progress(state: &mut AppState, op: u64) -> UpdateResult {
    if !state.is_current_operation(op) {
        trace!(op, "Ignoring stale progress tick");
        return UpdateResult::none();
    }
    if let Some(progress) = state.overlay.as_mut().and_then(|o| o.progress.as_mut()) {
        progress.tick();
    }
    UpdateResult::none()
}

/// Show the new result and refresh the saved-blog list
pub fn handle_completed(state: &mut AppState, op: u64, result: GenerationResult) -> UpdateResult {
    if !state.is_current_operation(op) {
        debug!(op, "Ignoring stale generation result");
        return UpdateResult::none();
    }

    finish_progress(state);
    state.end_operation();

    if let Err(e) = state.view.succeed() {
        warn!("{}", e);
        return UpdateResult::none();
    }

    info!(
        op,
        title = result.title().unwrap_or_default(),
        evidence = result.evidence.len(),
        "Generation completed"
    );
    state.set_result(result);
    state.focus = FocusArea::Content;

    UpdateResult::message(Message::RefreshPastBlogs)
}

/// Enter the error body with the failure message
pub fn handle_failed(state: &mut AppState, op: u64, message: String) -> UpdateResult {
    if !state.is_current_operation(op) {
        debug!(op, "Ignoring stale generation failure");
        return UpdateResult::none();
    }

    finish_progress(state);
    state.end_operation();
    warn!(op, "Generation failed: {}", message);

    if let Err(e) = state.view.fail(message) {
        warn!("{}", e);
    }
    UpdateResult::none()
}

/// A background task ended without sending its result
pub fn handle_aborted(state: &mut AppState, op: u64, kind: OperationKind) -> UpdateResult {
    if !state.is_current_operation(op) {
        return UpdateResult::none();
    }

    error!(op, ?kind, "Background operation ended without a result");
    match kind {
        OperationKind::Generation => handle_failed(state, op, INTERRUPTED_MESSAGE.to_string()),
        OperationKind::PastBlogLoad => {
            state.end_operation();
            if let Err(e) = state.view.abort_load() {
                warn!("{}", e);
            }
            state.notify_error(Error::past_blog_load("interrupted").to_string());
            UpdateResult::none()
        }
    }
}

fn finish_progress(state: &mut AppState) {
    if let Some(progress) = state.overlay.as_mut().and_then(|o| o.progress.as_mut()) {
        progress.finish();
    }
}
