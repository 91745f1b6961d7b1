//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Background tasks never touch [`AppState`](crate::state::AppState); they
//! report back by sending [`Message`]s on the engine channel.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use blogsmith_client::BlogApi;
use blogsmith_core::prelude::*;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::export::{Clipboard, MarkdownExport};
use crate::handler::Task;
use crate::message::{Message, OperationKind};
use crate::UpdateAction;

/// Execute an action, spawning a background task where it has to wait
pub fn handle_action<A>(
    action: UpdateAction,
    msg_tx: mpsc::Sender<Message>,
    api: &Arc<A>,
    clipboard: &mut dyn Clipboard,
    tick_interval: Duration,
) where
    A: BlogApi + Send + Sync + 'static,
{
    match action {
        UpdateAction::SpawnTask(task) => {
            let api = Arc::clone(api);
            tokio::spawn(async move {
                execute_task(task, api, msg_tx, tick_interval).await;
            });
        }

        UpdateAction::RefreshPastBlogs => {
            let api = Arc::clone(api);
            tokio::spawn(async move {
                let blogs = api.list_past_blogs().await;
                let _ = msg_tx.send(Message::PastBlogsLoaded(blogs)).await;
            });
        }

        UpdateAction::SaveMarkdown { export, directory } => {
            tokio::spawn(async move {
                let msg = save_markdown(export, directory).await;
                let _ = msg_tx.send(msg).await;
            });
        }

        UpdateAction::CopyToClipboard { text } => {
            // The clipboard writes to the terminal, so it stays on this thread
            let msg = match clipboard.set_text(&text) {
                Ok(()) => {
                    debug!("Copied {} bytes of markdown", text.len());
                    Message::Copied
                }
                Err(e) => {
                    warn!("Clipboard write failed: {}", e);
                    Message::CopyFailed {
                        message: e.to_string(),
                    }
                }
            };
            if msg_tx.try_send(msg).is_err() {
                warn!("Message channel full, dropping clipboard result");
            }
        }
    }
}

/// Execute a background task
pub async fn execute_task<A>(
    task: Task,
    api: Arc<A>,
    msg_tx: mpsc::Sender<Message>,
    tick_interval: Duration,
) where
    A: BlogApi + Send + Sync + 'static,
{
    match task {
        Task::Generate { op, topic, as_of } => {
            run_generation(api.as_ref(), op, &topic, &as_of, tick_interval, msg_tx).await;
        }
        Task::LoadPastBlog { op, filename } => {
            run_past_blog_load(api.as_ref(), op, filename, msg_tx).await;
        }
    }
}

/// Run one generation, sending a progress tick every `tick_interval` until
/// the request resolves.
///
/// The interval lives only inside the select loop; it is dropped before the
/// completion message is sent, so no tick for `op` can follow completion.
pub async fn run_generation<A: BlogApi>(
    api: &A,
    op: u64,
    topic: &str,
    as_of: &str,
    tick_interval: Duration,
    msg_tx: mpsc::Sender<Message>,
) {
    let guard = CompletionGuard::new(msg_tx.clone(), op, OperationKind::Generation);

    let outcome = {
        let request = api.generate(topic, as_of);
        tokio::pin!(request);

        let mut ticker = tokio::time::interval(tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                biased;
                outcome = &mut request => break outcome,
                _ = ticker.tick() => {
                    if msg_tx.send(Message::GenerationProgress { op }).await.is_err() {
                        debug!(op, "Engine gone, abandoning generation");
                        return;
                    }
                }
            }
        }
    };

    let msg = match outcome {
        Ok(result) => Message::GenerationCompleted {
            op,
            result: Box::new(result),
        },
        Err(e) => Message::GenerationFailed {
            op,
            message: e.to_string(),
        },
    };

    if msg_tx.send(msg).await.is_ok() {
        guard.disarm();
    }
}

/// Fetch one saved blog and report its content
pub async fn run_past_blog_load<A: BlogApi>(
    api: &A,
    op: u64,
    filename: String,
    msg_tx: mpsc::Sender<Message>,
) {
    let guard = CompletionGuard::new(msg_tx.clone(), op, OperationKind::PastBlogLoad);

    let msg = match api.fetch_blog_content(&filename).await {
        Ok(blog) => Message::PastBlogLoaded {
            op,
            filename,
            content: blog.content,
        },
        Err(e) => Message::PastBlogLoadFailed {
            op,
            filename,
            message: e.to_string(),
        },
    };

    if msg_tx.send(msg).await.is_ok() {
        guard.disarm();
    }
}

async fn save_markdown(export: MarkdownExport, directory: PathBuf) -> Message {
    let written = tokio::task::spawn_blocking(move || export.write_to(&directory)).await;
    match written {
        Ok(Ok(path)) => Message::MarkdownSaved { path },
        Ok(Err(e)) => {
            error!("Markdown export failed: {}", e);
            Message::ExportFailed {
                message: e.to_string(),
            }
        }
        Err(e) => {
            error!("Markdown export task failed: {}", e);
            Message::ExportFailed {
                message: e.to_string(),
            }
        }
    }
}

/// Reports [`Message::OperationAborted`] if a task ends without sending its
/// result (panic or cancellation), so the loading overlay is always released.
struct CompletionGuard {
    msg_tx: mpsc::Sender<Message>,
    op: u64,
    kind: OperationKind,
    armed: bool,
}

impl CompletionGuard {
    fn new(msg_tx: mpsc::Sender<Message>, op: u64, kind: OperationKind) -> Self {
        Self {
            msg_tx,
            op,
            kind,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if self.armed {
            let _ = self.msg_tx.try_send(Message::OperationAborted {
                op: self.op,
                kind: self.kind,
            });
        }
    }
}
