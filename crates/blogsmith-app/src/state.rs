//! Application state (Model in TEA pattern)

use std::path::PathBuf;
use std::time::{Duration, Instant};

use blogsmith_core::{GenerationResult, PastBlogSummary};

use crate::config::Settings;
use crate::form::{FormState, TextField};
use crate::progress::ProgressSimulator;
use crate::view::{ResultTab, ViewMachine};

/// Lines moved by PageUp/PageDown when the viewport height is unknown
const DEFAULT_PAGE_LINES: u16 = 10;

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Which part of the screen receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusArea {
    #[default]
    Topic,
    AsOf,
    PastBlogs,
    Content,
}

impl FocusArea {
    const ORDER: [FocusArea; 4] = [
        FocusArea::Topic,
        FocusArea::AsOf,
        FocusArea::PastBlogs,
        FocusArea::Content,
    ];

    fn position(&self) -> usize {
        Self::ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(&self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Whether typed characters go into a form field
    pub fn is_text_input(&self) -> bool {
        matches!(self, FocusArea::Topic | FocusArea::AsOf)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Notifications
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Transient status-bar message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
    pub expires_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading overlay
// ─────────────────────────────────────────────────────────────────────────────

/// Modal shown while a backend operation runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingOverlay {
    /// Heading of the overlay
    pub title: String,
    /// Simulated progress; `None` shows a static label only
    pub progress: Option<ProgressSimulator>,
}

impl LoadingOverlay {
    pub fn generation(topic: &str) -> Self {
        Self {
            title: format!("Writing about {}", topic),
            progress: Some(ProgressSimulator::new()),
        }
    }

    pub fn past_blog(filename: &str) -> Self {
        Self {
            title: format!("Loading {}", filename),
            progress: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Past blogs
// ─────────────────────────────────────────────────────────────────────────────

/// Saved-blog list with a selection cursor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PastBlogsState {
    pub items: Vec<PastBlogSummary>,
    pub selected: usize,
    /// A refresh is in flight
    pub refreshing: bool,
}

impl PastBlogsState {
    /// Replace the list, keeping the selection on the same file when possible
    pub fn replace(&mut self, items: Vec<PastBlogSummary>) {
        let previous = self.selected_item().map(|b| b.filename.clone());
        self.items = items;
        self.selected = previous
            .and_then(|name| self.items.iter().position(|b| b.filename == name))
            .unwrap_or(0);
        self.refreshing = false;
    }

    pub fn selected_item(&self) -> Option<&PastBlogSummary> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1) % self.items.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + self.items.len() - 1) % self.items.len();
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scrolling
// ─────────────────────────────────────────────────────────────────────────────

/// Scroll position of one result tab.
///
/// `content_height` and `viewport_height` are written by the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    pub offset: u16,
    pub content_height: u16,
    pub viewport_height: u16,
}

impl ScrollState {
    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    fn page(&self) -> u16 {
        if self.viewport_height > 1 {
            self.viewport_height - 1
        } else {
            DEFAULT_PAGE_LINES
        }
    }

    pub fn scroll_up(&mut self, n: u16) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: u16) {
        self.offset = self.offset.saturating_add(n).min(self.max_offset());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.page());
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.page());
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    pub fn to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Record rendered sizes and pull the offset back into range
    pub fn update_bounds(&mut self, content_height: u16, viewport_height: u16) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        self.offset = self.offset.min(self.max_offset());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AppState
// ─────────────────────────────────────────────────────────────────────────────

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,

    /// Application settings from config file and CLI
    pub settings: Settings,

    /// Body state machine and active tab
    pub view: ViewMachine,

    pub form: FormState,

    pub focus: FocusArea,

    /// The one displayed result, replaced wholesale
    pub current_result: Option<GenerationResult>,

    /// Loading overlay, independent of the body state
    pub overlay: Option<LoadingOverlay>,

    pub past_blogs: PastBlogsState,

    /// Per-tab scroll, indexed by `ResultTab::index()`
    pub scroll: [ScrollState; 3],

    pub notification: Option<Notification>,

    /// "Copied!" label is shown until this instant
    pub copied_until: Option<Instant>,

    /// Path of the most recent markdown download
    pub last_export: Option<PathBuf>,

    /// Operation id of the pending generate/load, if any
    pub active_operation: Option<u64>,

    next_operation_id: u64,

    /// Bumped every time `current_result` is replaced
    result_revision: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self::with_form(settings, FormState::default())
    }

    /// Build with an explicit form (tests pin the default date this way)
    pub fn with_form(settings: Settings, form: FormState) -> Self {
        Self {
            phase: AppPhase::Running,
            settings,
            view: ViewMachine::new(),
            form,
            focus: FocusArea::Topic,
            current_result: None,
            overlay: None,
            past_blogs: PastBlogsState::default(),
            scroll: [ScrollState::default(); 3],
            notification: None,
            copied_until: None,
            last_export: None,
            active_operation: None,
            next_operation_id: 1,
            result_revision: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// The form field receiving typed characters, if any
    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            FocusArea::Topic => Some(&mut self.form.topic),
            FocusArea::AsOf => Some(&mut self.form.as_of),
            FocusArea::PastBlogs | FocusArea::Content => None,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────

    /// Allocate a new operation id and mark it active
    pub fn begin_operation(&mut self) -> u64 {
        let id = self.next_operation_id;
        self.next_operation_id += 1;
        self.active_operation = Some(id);
        id
    }

    /// Whether `op` is the pending operation (not stale)
    pub fn is_current_operation(&self, op: u64) -> bool {
        self.active_operation == Some(op)
    }

    /// Clear the pending operation and hide the overlay
    pub fn end_operation(&mut self) {
        self.active_operation = None;
        self.overlay = None;
    }

    // ─────────────────────────────────────────────────────────
    // Result
    // ─────────────────────────────────────────────────────────

    /// Replace the current result and reset tab scroll positions
    pub fn set_result(&mut self, result: GenerationResult) {
        self.current_result = Some(result);
        self.result_revision += 1;
        for scroll in &mut self.scroll {
            scroll.to_top();
        }
    }

    pub fn result_revision(&self) -> u64 {
        self.result_revision
    }

    pub fn active_scroll(&self) -> &ScrollState {
        &self.scroll[self.view.active_tab().index()]
    }

    pub fn active_scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll[self.view.active_tab().index()]
    }

    pub fn scroll_for(&mut self, tab: ResultTab) -> &mut ScrollState {
        &mut self.scroll[tab.index()]
    }

    // ─────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────

    fn notify(&mut self, message: impl Into<String>, level: NotificationLevel) {
        let expires_at = Instant::now() + self.settings.ui.notification_duration();
        self.notification = Some(Notification {
            message: message.into(),
            level,
            expires_at,
        });
    }

    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationLevel::Info);
    }

    pub fn notify_error(&mut self, message: impl Into<String>) {
        self.notify(message, NotificationLevel::Error);
    }

    /// Show the "Copied!" label for the configured duration
    pub fn show_copied(&mut self) {
        self.copied_until = Some(Instant::now() + self.settings.ui.copied_label_duration());
    }

    pub fn is_copied_visible(&self) -> bool {
        self.copied_until.is_some_and(|until| Instant::now() < until)
    }

    /// Drop notifications and labels whose time is up
    pub fn expire_transients(&mut self, now: Instant) {
        if self.notification.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notification = None;
        }
        if self.copied_until.is_some_and(|until| now >= until) {
            self.copied_until = None;
        }
    }

    /// Remaining lifetime of the current notification
    pub fn notification_remaining(&self, now: Instant) -> Option<Duration> {
        self.notification
            .as_ref()
            .map(|n| n.expires_at.saturating_duration_since(now))
    }
}
