//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the TEA state, the message channel, the backend client
//! and the clipboard. Both runners feed it messages and read state back.

use std::path::PathBuf;
use std::sync::Arc;

use blogsmith_client::BlogApi;
use blogsmith_core::prelude::*;
use tokio::sync::{broadcast, mpsc};

use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::export::{Clipboard, Osc52Clipboard};
use crate::message::Message;
use crate::process;
use crate::signals;
use crate::state::{AppState, NotificationLevel};
use crate::view::{BodyState, LoadingKind};

/// Message channel capacity
const CHANNEL_CAPACITY: usize = 256;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone)]
struct StateSnapshot {
    body: BodyState,
    loading: Option<LoadingKind>,
    result_revision: u64,
    refreshing: bool,
    last_export: Option<PathBuf>,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            body: state.view.body(),
            loading: state.view.loading_kind(),
            result_revision: state.result_revision(),
            refreshing: state.past_blogs.refreshing,
            last_export: state.last_export.clone(),
        }
    }
}

/// Orchestration engine for Blogsmith.
///
/// Generic over the backend so tests can drive it with a fake.
pub struct Engine<A>
where
    A: BlogApi + Send + Sync + 'static,
{
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, event poller).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    api: Arc<A>,

    clipboard: Box<dyn Clipboard + Send>,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl<A> Engine<A>
where
    A: BlogApi + Send + Sync + 'static,
{
    /// Create an Engine that copies through the terminal (OSC 52)
    pub fn new(api: A, settings: Settings) -> Self {
        Self::with_clipboard(api, settings, Box::new(Osc52Clipboard::stdout()))
    }

    /// Create an Engine with an explicit clipboard.
    ///
    /// Spawns the signal handler, so a tokio runtime must be running.
    pub fn with_clipboard(
        api: A,
        settings: Settings,
        clipboard: Box<dyn Clipboard + Send>,
    ) -> Self {
        Self::with_state(api, AppState::with_settings(settings), clipboard)
    }

    pub fn with_state(api: A, state: AppState, clipboard: Box<dyn Clipboard + Send>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(CHANNEL_CAPACITY);
        signals::spawn_signal_handler(msg_tx.clone());
        let (event_tx, _) = broadcast::channel(CHANNEL_CAPACITY);

        Self {
            state,
            msg_tx,
            msg_rx,
            api: Arc::new(api),
            clipboard,
            event_tx,
        }
    }

    /// Kick off startup work (the initial saved-blog list)
    pub fn start(&mut self) {
        self.process_message(Message::RefreshPastBlogs);
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle and emit
    /// events for whatever it changed.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(
            &mut self.state,
            msg,
            &self.msg_tx,
            &self.api,
            self.clipboard.as_mut(),
        );

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed. Used by the TUI runner
    /// which needs to drain all pending messages before rendering.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Announce shutdown to subscribers.
    ///
    /// In-flight requests are left to finish in the background; their
    /// results go nowhere once the channel is dropped.
    pub fn shutdown(&mut self) {
        if self.state.active_operation.is_some() {
            info!("Shutting down with a request still in flight");
        }
        self.emit(EngineEvent::Shutdown);
    }

    /// Compare pre/post snapshots and emit events for what changed.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        let result_replaced = pre.result_revision != post.result_revision;

        // Operation started
        if pre.body != BodyState::Loading && post.loading == Some(LoadingKind::Generation) {
            if let Ok(params) = self.state.form.validate() {
                self.emit(EngineEvent::GenerationStarted {
                    topic: params.topic,
                    as_of: params.as_of,
                });
            }
        }

        // Operation finished
        if pre.loading.is_some() && post.loading.is_none() {
            match (pre.loading, result_replaced) {
                (Some(LoadingKind::Generation), true) => {
                    self.emit(self.completed_event());
                }
                (Some(LoadingKind::Generation), false) => {
                    let message = self.state.view.error_message().unwrap_or_default();
                    self.emit(EngineEvent::GenerationFailed {
                        message: message.to_string(),
                    });
                }
                (Some(LoadingKind::PastBlog), true) => {
                    self.emit(EngineEvent::PastBlogLoaded {
                        title: self.current_title(),
                    });
                }
                (Some(LoadingKind::PastBlog), false) => {
                    let message = self
                        .state
                        .notification
                        .as_ref()
                        .filter(|n| n.level == NotificationLevel::Error)
                        .map(|n| n.message.clone())
                        .unwrap_or_default();
                    self.emit(EngineEvent::PastBlogLoadFailed { message });
                }
                (None, _) => {}
            }
        }

        if pre.refreshing && !post.refreshing {
            self.emit(EngineEvent::PastBlogsRefreshed {
                count: self.state.past_blogs.items.len(),
            });
        }

        if pre.last_export != post.last_export {
            if let Some(path) = &post.last_export {
                self.emit(EngineEvent::MarkdownExported { path: path.clone() });
            }
        }
    }

    fn completed_event(&self) -> EngineEvent {
        let result = self.state.current_result.as_ref();
        EngineEvent::GenerationCompleted {
            title: self.current_title(),
            evidence_count: result.map_or(0, |r| r.evidence.len()),
            task_count: result.map_or(0, |r| r.task_count()),
        }
    }

    fn current_title(&self) -> Option<String> {
        self.state
            .current_result
            .as_ref()
            .and_then(|r| r.title())
            .map(str::to_string)
    }

    /// Emit a single EngineEvent to all subscribers.
    ///
    /// send() returns Err only if there are no receivers, which is fine.
    fn emit(&self, event: EngineEvent) {
        trace!("Engine event: {}", event.event_type());
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::TextField;
    use crate::input_key::InputKey;
    use blogsmith_client::test_utils::{sample_generation_result, sample_past_blog, FakeBlogApi};
    use std::time::Duration;
    use tokio::sync::broadcast::error::TryRecvError;

    struct NoopClipboard;

    impl Clipboard for NoopClipboard {
        fn set_text(&mut self, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    fn fast_settings() -> Settings {
        let mut settings = Settings::default();
        settings.progress.tick_ms = 10;
        settings
    }

    fn engine(api: FakeBlogApi) -> Engine<FakeBlogApi> {
        Engine::with_clipboard(api, fast_settings(), Box::new(NoopClipboard))
    }

    /// Process channel messages until `done` holds or a second passes
    async fn run_until(engine: &mut Engine<FakeBlogApi>, done: impl Fn(&AppState) -> bool) {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
        while !done(&engine.state) {
            let msg = tokio::time::timeout_at(deadline, engine.msg_rx.recv())
                .await
                .expect("timed out waiting for engine")
                .expect("channel closed");
            engine.process_message(msg);
        }
    }

    fn collect(rx: &mut broadcast::Receiver<EngineEvent>) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
                Err(TryRecvError::Lagged(_)) => continue,
            }
        }
        events
    }

    #[tokio::test]
    async fn test_generation_round_trip() {
        let api = FakeBlogApi::new()
            .with_result(sample_generation_result("Engine Post", 3))
            .with_generate_delay(Duration::from_millis(40));
        let mut engine = engine(api);
        let mut events = engine.subscribe();

        engine.state.form.topic = TextField::new("Engine Post");
        engine.process_message(Message::Submit);
        assert_eq!(engine.state.view.body(), BodyState::Loading);
        assert!(engine.state.overlay.is_some());

        run_until(&mut engine, |s| s.view.body() == BodyState::Result).await;

        assert!(engine.state.overlay.is_none());
        assert_eq!(engine.state.active_operation, None);

        let events = collect(&mut events);
        assert!(matches!(
            events.first(),
            Some(EngineEvent::GenerationStarted { topic, .. }) if topic == "Engine Post"
        ));
        assert!(events.contains(&EngineEvent::GenerationCompleted {
            title: Some("Engine Post".to_string()),
            evidence_count: 3,
            task_count: 3,
        }));
    }

    #[tokio::test]
    async fn test_empty_topic_never_reaches_backend() {
        let api = FakeBlogApi::new();
        let mut engine = engine(api.clone());
        let mut events = engine.subscribe();

        engine.process_message(Message::Submit);
        tokio::time::sleep(Duration::from_millis(20)).await;
        engine.drain_pending_messages();

        assert_eq!(api.generate_calls(), 0);
        assert_eq!(engine.state.view.body(), BodyState::Welcome);
        assert!(collect(&mut events).is_empty());
    }

    #[tokio::test]
    async fn test_generation_failure_emits_event() {
        let api = FakeBlogApi::new().failing_generation("Backend exploded");
        let mut engine = engine(api);
        let mut events = engine.subscribe();

        engine.state.form.topic = TextField::new("x");
        engine.process_message(Message::Submit);
        run_until(&mut engine, |s| s.view.body() == BodyState::Error).await;

        assert!(engine.state.overlay.is_none());
        assert!(collect(&mut events).contains(&EngineEvent::GenerationFailed {
            message: "Backend exploded".to_string()
        }));
    }

    #[tokio::test]
    async fn test_start_refreshes_past_blogs() {
        let api = FakeBlogApi::new().with_past_blogs(vec![sample_past_blog("a.md", "A")]);
        let mut engine = engine(api);
        let mut events = engine.subscribe();

        engine.start();
        run_until(&mut engine, |s| !s.past_blogs.refreshing).await;

        assert_eq!(engine.state.past_blogs.items.len(), 1);
        assert!(collect(&mut events).contains(&EngineEvent::PastBlogsRefreshed { count: 1 }));
    }

    #[tokio::test]
    async fn test_past_blog_load_failure_restores_body() {
        let api = FakeBlogApi::new().with_past_blogs(vec![sample_past_blog("gone.md", "Gone")]);
        let mut engine = engine(api);
        let mut events = engine.subscribe();

        engine.start();
        run_until(&mut engine, |s| !s.past_blogs.items.is_empty()).await;

        engine.state.focus = crate::state::FocusArea::PastBlogs;
        engine.process_message(Message::Key(InputKey::Enter));
        assert_eq!(engine.state.view.body(), BodyState::Loading);

        run_until(&mut engine, |s| !s.view.is_loading()).await;

        assert_eq!(engine.state.view.body(), BodyState::Welcome);
        assert!(engine.state.overlay.is_none());
        assert!(collect(&mut events).contains(&EngineEvent::PastBlogLoadFailed {
            message: "Failed to load blog: Blog not found: gone.md".to_string()
        }));
    }

    #[tokio::test]
    async fn test_quit_key() {
        let mut engine = engine(FakeBlogApi::new());
        engine.process_message(Message::Key(InputKey::CharCtrl('c')));
        assert!(engine.should_quit());
    }
}
