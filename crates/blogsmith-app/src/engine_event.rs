//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON.

use std::path::PathBuf;

/// Domain events emitted by the Engine.
///
/// Derived from before/after state snapshots, so subscribers see a
/// consistent view of what each message changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Generation
    // ─────────────────────────────────────────────────────────
    /// The form was accepted and a request is on its way
    GenerationStarted { topic: String, as_of: String },

    /// A new result is displayed
    GenerationCompleted {
        title: Option<String>,
        evidence_count: usize,
        task_count: usize,
    },

    /// The error body is showing `message`
    GenerationFailed { message: String },

    // ─────────────────────────────────────────────────────────
    // Past blogs
    // ─────────────────────────────────────────────────────────
    PastBlogsRefreshed { count: usize },

    PastBlogLoaded { title: Option<String> },

    PastBlogLoadFailed { message: String },

    // ─────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────
    MarkdownExported { path: PathBuf },

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::GenerationStarted { .. } => "generation_started",
            Self::GenerationCompleted { .. } => "generation_completed",
            Self::GenerationFailed { .. } => "generation_failed",
            Self::PastBlogsRefreshed { .. } => "past_blogs_refreshed",
            Self::PastBlogLoaded { .. } => "past_blog_loaded",
            Self::PastBlogLoadFailed { .. } => "past_blog_load_failed",
            Self::MarkdownExported { .. } => "markdown_exported",
            Self::Shutdown => "shutdown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_event_type_labels() {
        assert_eq!(EngineEvent::Shutdown.event_type(), "shutdown");
        assert_eq!(
            EngineEvent::GenerationCompleted {
                title: None,
                evidence_count: 0,
                task_count: 0
            }
            .event_type(),
            "generation_completed"
        );
        assert_eq!(
            EngineEvent::MarkdownExported {
                path: PathBuf::from("a.md")
            }
            .event_type(),
            "markdown_exported"
        );
    }
}
