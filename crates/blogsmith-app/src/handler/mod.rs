//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `generation`: Submit and generation lifecycle handlers
//! - `past_blogs`: Past-blog list and loader handlers
//! - `keys`: Key event handlers per focus area

pub(crate) mod generation;
pub(crate) mod keys;
pub(crate) mod past_blogs;
pub(crate) mod update;


use std::path::PathBuf;

use crate::export::MarkdownExport;
use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// Spawn a background task
    SpawnTask(Task),

    /// Fetch the saved-blog list in the background
    RefreshPastBlogs,

    /// Write a markdown export to disk
    SaveMarkdown {
        export: MarkdownExport,
        directory: PathBuf,
    },

    /// Put text on the system clipboard
    CopyToClipboard { text: String },
}

/// Background tasks to spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Generate a blog, ticking the progress animation until it resolves
    Generate {
        op: u64,
        topic: String,
        as_of: String,
    },
    /// Fetch one saved blog
    LoadPastBlog { op: u64, filename: String },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
