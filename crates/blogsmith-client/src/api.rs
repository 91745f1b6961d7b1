//! Backend operations used by the app

use blogsmith_core::prelude::*;
use blogsmith_core::{BlogContent, GenerationResult, PastBlogSummary};
use serde::Serialize;

/// Body of `POST /api/generate`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest<'a> {
    pub topic: &'a str,
    pub as_of: &'a str,
}

/// Blog backend operations
///
/// The TUI, headless mode and tests all go through this trait.
#[trait_variant::make(BlogApi: Send)]
pub trait LocalBlogApi {
    /// Generate a blog for `topic` as of the `YYYY-MM-DD` date `as_of`.
    ///
    /// Transport failures, non-2xx statuses and undecodable bodies are
    /// [`Error::Network`]. A decoded body with `success == false` is
    /// [`Error::Generation`] carrying the backend message.
    async fn generate(&self, topic: &str, as_of: &str) -> Result<GenerationResult>;

    /// List saved blogs, newest first.
    ///
    /// Never fails: any problem is logged and yields an empty list.
    async fn list_past_blogs(&self) -> Vec<PastBlogSummary>;

    /// Fetch the raw markdown of one saved blog.
    async fn fetch_blog_content(&self, filename: &str) -> Result<BlogContent>;
}
