//! Message types for the application (TEA pattern)

use std::path::PathBuf;

use blogsmith_core::{GenerationResult, PastBlogSummary};

use crate::form::FieldEdit;
use crate::input_key::InputKey;
use crate::view::ResultTab;

/// Background operation kinds, tagged onto abort notices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Generation,
    PastBlogLoad,
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates (notification expiry)
    Tick,

    /// Quit immediately (Ctrl+C, `q`, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Form
    // ─────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,

    /// Edit the focused form field
    FormEdit(FieldEdit),

    /// Validate the form and start a generation
    Submit,

    // ─────────────────────────────────────────────────────────
    // Generation
    // ─────────────────────────────────────────────────────────
    /// One progress-animation tick for operation `op`
    GenerationProgress { op: u64 },

    GenerationCompleted {
        op: u64,
        result: Box<GenerationResult>,
    },

    GenerationFailed { op: u64, message: String },

    /// A background task ended without reporting (panic or cancellation)
    OperationAborted { op: u64, kind: OperationKind },

    // ─────────────────────────────────────────────────────────
    // Result view
    // ─────────────────────────────────────────────────────────
    SelectTab(ResultTab),
    NextTab,
    PrevTab,

    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollToTop,
    ScrollToBottom,

    /// Leave the error body
    DismissError,

    // ─────────────────────────────────────────────────────────
    // Past blogs
    // ─────────────────────────────────────────────────────────
    RefreshPastBlogs,

    /// Result of a list refresh (empty on failure)
    PastBlogsLoaded(Vec<PastBlogSummary>),

    SelectNextBlog,
    SelectPrevBlog,

    /// Load whichever blog is selected in the sidebar
    LoadSelectedBlog,

    LoadPastBlog { filename: String },

    PastBlogLoaded {
        op: u64,
        filename: String,
        content: String,
    },

    PastBlogLoadFailed {
        op: u64,
        filename: String,
        message: String,
    },

    // ─────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────
    DownloadMarkdown,
    MarkdownSaved { path: PathBuf },
    ExportFailed { message: String },

    CopyMarkdown,
    Copied,
    CopyFailed { message: String },
}
