//! Test utilities for backend-dependent code
//!
//! Provides an in-memory [`FakeBlogApi`] plus builders for sample results.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use blogsmith_core::prelude::*;
use blogsmith_core::{BlogContent, EvidenceItem, GenerationResult, PastBlogSummary, Plan, Task};

use crate::api::BlogApi;

/// Request observed by a [`FakeBlogApi`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
    Generate { topic: String, as_of: String },
    ListPastBlogs,
    FetchBlogContent(String),
}

#[derive(Debug, Clone)]
enum FakeGenerate {
    Success(GenerationResult),
    Network(String),
    Generation(String),
}

/// Scripted in-memory backend
#[derive(Debug, Clone)]
pub struct FakeBlogApi {
    generate: FakeGenerate,
    generate_delay: Option<Duration>,
    past_blogs: Vec<PastBlogSummary>,
    blogs: HashMap<String, String>,
    calls: Arc<Mutex<Vec<FakeCall>>>,
}

impl Default for FakeBlogApi {
    fn default() -> Self {
        Self {
            generate: FakeGenerate::Success(sample_generation_result("Test Blog", 2)),
            generate_delay: None,
            past_blogs: Vec::new(),
            blogs: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeBlogApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `generate` with `result`
    pub fn with_result(mut self, result: GenerationResult) -> Self {
        self.generate = FakeGenerate::Success(result);
        self
    }

    /// Fail `generate` with a network error
    pub fn failing_network(mut self, message: &str) -> Self {
        self.generate = FakeGenerate::Network(message.to_string());
        self
    }

    /// Fail `generate` as if the backend reported `success: false`
    pub fn failing_generation(mut self, message: &str) -> Self {
        self.generate = FakeGenerate::Generation(message.to_string());
        self
    }

    /// Sleep this long before answering `generate`
    pub fn with_generate_delay(mut self, delay: Duration) -> Self {
        self.generate_delay = Some(delay);
        self
    }

    pub fn with_past_blogs(mut self, blogs: Vec<PastBlogSummary>) -> Self {
        self.past_blogs = blogs;
        self
    }

    /// Make `filename` fetchable with `content`
    pub fn with_blog(mut self, filename: &str, content: &str) -> Self {
        self.blogs.insert(filename.to_string(), content.to_string());
        self
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn generate_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, FakeCall::Generate { .. }))
            .count()
    }

    fn record(&self, call: FakeCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl BlogApi for FakeBlogApi {
    async fn generate(&self, topic: &str, as_of: &str) -> Result<GenerationResult> {
        self.record(FakeCall::Generate {
            topic: topic.to_string(),
            as_of: as_of.to_string(),
        });

        if let Some(delay) = self.generate_delay {
            tokio::time::sleep(delay).await;
        }

        match &self.generate {
            FakeGenerate::Success(result) => Ok(result.clone()),
            FakeGenerate::Network(message) => Err(Error::network(message.clone())),
            FakeGenerate::Generation(message) => Err(Error::generation(message.clone())),
        }
    }

    async fn list_past_blogs(&self) -> Vec<PastBlogSummary> {
        self.record(FakeCall::ListPastBlogs);
        self.past_blogs.clone()
    }

    async fn fetch_blog_content(&self, filename: &str) -> Result<BlogContent> {
        self.record(FakeCall::FetchBlogContent(filename.to_string()));
        self.blogs
            .get(filename)
            .map(|content| BlogContent {
                filename: Some(filename.to_string()),
                content: content.clone(),
            })
            .ok_or_else(|| Error::not_found(filename))
    }
}

// ─────────────────────────────────────────────────────────────────
// Sample data
// ─────────────────────────────────────────────────────────────────

/// Creates a task with the given id and title.
pub fn sample_task(id: u32, title: &str) -> Task {
    Task {
        id,
        title: title.to_string(),
        goal: format!("Explain {}", title.to_lowercase()),
        target_words: 250,
        requires_research: id % 2 == 1,
        requires_citations: id % 2 == 1,
        requires_code: id % 3 == 0,
        tags: vec!["core".to_string()],
        bullets: vec![format!("{} basics", title), format!("{} pitfalls", title)],
    }
}

/// Creates a plan titled `title` with `task_count` tasks.
pub fn sample_plan(title: &str, task_count: u32) -> Plan {
    Plan {
        blog_title: title.to_string(),
        audience: "Rust developers".to_string(),
        tone: "practical".to_string(),
        blog_kind: "explainer".to_string(),
        constraints: vec!["Keep examples short".to_string()],
        tasks: (1..=task_count)
            .map(|id| sample_task(id, &format!("Section {}", id)))
            .collect(),
    }
}

/// Creates `count` evidence items with distinct titles.
pub fn sample_evidence(count: usize) -> Vec<EvidenceItem> {
    (1..=count)
        .map(|i| EvidenceItem {
            title: Some(format!("Source {}", i)),
            url: format!("https://example.com/{}", i),
            published_at: Some(format!("2024-01-{:02}", i.min(28))),
            snippet: None,
            source: Some("example.com".to_string()),
        })
        .collect()
}

/// Creates a successful result whose markdown starts with `# {title}`.
pub fn sample_generation_result(title: &str, evidence_count: usize) -> GenerationResult {
    GenerationResult {
        success: true,
        plan: Some(sample_plan(title, 3)),
        evidence: sample_evidence(evidence_count),
        final_markdown: format!("# {}\n\nIntro paragraph.\n\n## Section 1\n\nBody.\n", title),
        image_specs: Vec::new(),
        mode: "hybrid".to_string(),
        error: None,
    }
}

/// Creates a saved-blog summary.
pub fn sample_past_blog(filename: &str, title: &str) -> PastBlogSummary {
    PastBlogSummary {
        filename: filename.to_string(),
        title: title.to_string(),
        modified_at: Some("1717171717.0".to_string()),
    }
}
