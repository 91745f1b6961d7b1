//! # Blog Domain Types
//!
//! Data model shared by the API client, the app state and the renderers.
//! Every type deserializes straight from the backend JSON; missing optional
//! collections default to empty so partial responses still decode.

use chrono::{DateTime, Local, TimeZone};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Message shown when the backend reports failure without an explanation
pub const DEFAULT_GENERATION_ERROR: &str = "Generation failed";

/// Placeholder used for plan fields that a saved blog file cannot supply
const UNKNOWN_FIELD: &str = "N/A";

/// Blog kind assigned to plans reconstructed from saved files
pub const LOADED_BLOG_KIND: &str = "loaded";

/// First top-level heading of a markdown document
static TITLE_HEADING_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").expect("title heading regex pattern is valid"));

// ── GenerationResult ──────────────────────────────────────────────────────────

/// Outcome of one blog generation, or a saved blog reconstructed for display.
///
/// Exactly one of these is current at a time. A new generation or past-blog
/// load replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub success: bool,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub evidence: Vec<EvidenceItem>,
    #[serde(default)]
    pub final_markdown: String,
    /// Image generation specs produced alongside the post. Not rendered.
    #[serde(default)]
    pub image_specs: Vec<serde_json::Value>,
    /// Research mode used by the backend (`closed_book`, `hybrid`, `open_book`)
    #[serde(default)]
    pub mode: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerationResult {
    /// Build a displayable result from the raw content of a saved blog.
    ///
    /// Saved files only carry markdown. When the content has a `# Title`
    /// line a minimal plan is synthesized from it so the plan tab shows the
    /// title; otherwise `plan` stays `None`.
    pub fn from_saved_blog(content: impl Into<String>) -> Self {
        let content = content.into();
        let plan = extract_title(&content).map(Plan::loaded);

        Self {
            success: true,
            plan,
            evidence: Vec::new(),
            final_markdown: content,
            image_specs: Vec::new(),
            mode: String::new(),
            error: None,
        }
    }

    /// Backend error message, or the generic fallback
    pub fn error_message(&self) -> &str {
        self.error
            .as_deref()
            .filter(|e| !e.trim().is_empty())
            .unwrap_or(DEFAULT_GENERATION_ERROR)
    }

    /// Title of the post if a plan is present
    pub fn title(&self) -> Option<&str> {
        self.plan.as_ref().map(|p| p.blog_title.as_str())
    }

    pub fn task_count(&self) -> usize {
        self.plan.as_ref().map_or(0, |p| p.tasks.len())
    }
}

/// Extract the first top-level heading (`# Title`) of a markdown document.
///
/// ```
/// use blogsmith_core::extract_title;
///
/// assert_eq!(extract_title("intro\n# My Title\n## Sub").as_deref(), Some("My Title"));
/// assert_eq!(extract_title("## Only a subheading"), None);
/// ```
pub fn extract_title(markdown: &str) -> Option<String> {
    TITLE_HEADING_PATTERN
        .captures(markdown)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('\r').to_string())
}

// ── Plan / Task ───────────────────────────────────────────────────────────────

/// Backend outline of a blog post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub blog_title: String,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub blog_kind: String,
    #[serde(default)]
    pub constraints: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Plan {
    /// Minimal plan for a blog loaded from a saved file
    pub fn loaded(blog_title: impl Into<String>) -> Self {
        Self {
            blog_title: blog_title.into(),
            audience: UNKNOWN_FIELD.to_string(),
            tone: UNKNOWN_FIELD.to_string(),
            blog_kind: LOADED_BLOG_KIND.to_string(),
            constraints: Vec::new(),
            tasks: Vec::new(),
        }
    }

    /// Sum of all task word targets
    pub fn total_target_words(&self) -> u32 {
        self.tasks.iter().map(|t| t.target_words).sum()
    }
}

/// One planned writing unit (usually one section of the post).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub title: String,
    #[serde(default)]
    pub goal: String,
    #[serde(default)]
    pub target_words: u32,
    #[serde(default)]
    pub requires_research: bool,
    #[serde(default)]
    pub requires_citations: bool,
    #[serde(default)]
    pub requires_code: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

// ── Evidence ──────────────────────────────────────────────────────────────────

/// A retrieved source citation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceItem {
    #[serde(default)]
    pub title: Option<String>,
    pub url: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

impl EvidenceItem {
    /// Title to display, falling back to the URL when the title is missing or blank
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.url)
    }
}

// ── Saved blogs ───────────────────────────────────────────────────────────────

/// Entry of the saved-blog listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PastBlogSummary {
    pub filename: String,
    pub title: String,
    /// File modification time as decimal epoch seconds (`"1717171717.123"`)
    #[serde(default)]
    pub modified_at: Option<String>,
}

impl PastBlogSummary {
    /// Parsed modification time in the local timezone
    pub fn modified_local(&self) -> Option<DateTime<Local>> {
        let secs: f64 = self.modified_at.as_deref()?.trim().parse().ok()?;
        if !secs.is_finite() {
            return None;
        }
        let whole = secs.trunc() as i64;
        let nanos = ((secs.fract() * 1e9) as u32).min(999_999_999);
        Local.timestamp_opt(whole, nanos).single()
    }

    /// Modification time formatted for the list, empty when unknown
    pub fn modified_display(&self) -> String {
        self.modified_local()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Content of one saved blog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlogContent {
    #[serde(default)]
    pub filename: Option<String>,
    pub content: String,
}
