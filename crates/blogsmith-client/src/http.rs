//! reqwest-backed implementation of [`BlogApi`]

use std::time::Duration;

use blogsmith_core::prelude::*;
use blogsmith_core::{BlogContent, GenerationResult, PastBlogSummary};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::api::{BlogApi, GenerateRequest};

/// Address the backend binds to when started locally
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Characters escaped when a filename is placed in a URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Longest slice of an error body kept in an error message
const MAX_ERROR_BODY: usize = 200;

/// HTTP client for the blog backend
///
/// Requests carry no overall timeout: generation runs as long as the backend
/// needs. Only connecting can time out, when configured.
#[derive(Debug, Clone)]
pub struct HttpBlogClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBlogClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8000`)
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_connect_timeout(base_url, None)
    }

    /// Create a client that gives up connecting after `connect_timeout`
    pub fn with_connect_timeout(base_url: &str, connect_timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("blogsmith/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        debug!("HTTP client created for {}", base_url);
        Ok(Self { http, base_url })
    }

    /// Base URL with any trailing `/` removed
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn blog_url(&self, filename: &str) -> String {
        let encoded = utf8_percent_encode(filename, PATH_SEGMENT);
        format!("{}/api/blogs/{}", self.base_url, encoded)
    }

    async fn try_list_past_blogs(&self) -> Result<Vec<PastBlogSummary>> {
        let url = self.endpoint("/api/blogs");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::network(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::network(format!(
                "HTTP {}: {}",
                status,
                error_detail(&body)
            )));
        }

        response
            .json::<Vec<PastBlogSummary>>()
            .await
            .map_err(|e| Error::network(format!("Invalid blog list: {}", e)))
    }
}

impl BlogApi for HttpBlogClient {
    async fn generate(&self, topic: &str, as_of: &str) -> Result<GenerationResult> {
        let url = self.endpoint("/api/generate");
        info!("Generating blog for topic {:?} as of {}", topic, as_of);

        let response = self
            .http
            .post(&url)
            .json(&GenerateRequest { topic, as_of })
            .send()
            .await
            .map_err(|e| Error::network(format!("POST {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Generation request returned {}", status);
            return Err(Error::network(format!(
                "HTTP {}: {}",
                status,
                error_detail(&body)
            )));
        }

        let result: GenerationResult = response
            .json()
            .await
            .map_err(|e| Error::network(format!("Invalid generation response: {}", e)))?;

        if !result.success {
            warn!("Backend reported generation failure: {:?}", result.error);
            return Err(Error::generation(result.error_message()));
        }

        info!(
            "Generation complete: {} tasks, {} evidence items, mode {:?}",
            result.task_count(),
            result.evidence.len(),
            result.mode
        );
        Ok(result)
    }

    async fn list_past_blogs(&self) -> Vec<PastBlogSummary> {
        match self.try_list_past_blogs().await {
            Ok(blogs) => {
                debug!("Listed {} past blogs", blogs.len());
                blogs
            }
            Err(e) => {
                warn!("Failed to list past blogs: {}", e);
                Vec::new()
            }
        }
    }

    async fn fetch_blog_content(&self, filename: &str) -> Result<BlogContent> {
        let url = self.blog_url(filename);
        debug!("Fetching blog content from {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::network(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Blog {:?} unavailable: HTTP {}", filename, status);
            return Err(Error::not_found(filename));
        }

        response
            .json::<BlogContent>()
            .await
            .map_err(|e| Error::network(format!("Invalid blog content: {}", e)))
    }
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed = url::Url::parse(trimmed)
        .map_err(|e| Error::config(format!("Invalid API URL '{}': {}", raw, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "API URL must use http or https, got '{}'",
            parsed.scheme()
        )));
    }

    Ok(trimmed.to_string())
}

/// Pull a readable message out of an error response body.
///
/// The backend reports errors as `{"detail": "..."}`; anything else is
/// returned as (truncated) text.
fn error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|d| d.as_str()) {
            return detail.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "no response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn sample_result() -> Value {
        json!({
            "success": true,
            "plan": {
                "blog_title": "Understanding Tokio",
                "audience": "Rust developers",
                "tone": "friendly",
                "blog_kind": "explainer",
                "constraints": [],
                "tasks": [{
                    "id": 1, "title": "Runtime", "goal": "Explain the runtime",
                    "target_words": 300, "requires_research": true,
                    "requires_citations": true, "requires_code": false,
                    "tags": [], "bullets": ["schedulers"]
                }]
            },
            "evidence": [
                {"title": "Tokio docs", "url": "https://tokio.rs", "published_at": "2024-01-01", "snippet": null, "source": "tokio.rs"}
            ],
            "final_markdown": "# Understanding Tokio\n\nBody",
            "image_specs": [],
            "mode": "open_book"
        })
    }

    #[derive(Clone, Default)]
    struct Recorded {
        bodies: Arc<Mutex<Vec<Value>>>,
        filenames: Arc<Mutex<Vec<String>>>,
    }

    async fn record_generate(State(rec): State<Recorded>, Json(body): Json<Value>) -> Json<Value> {
        rec.bodies.lock().unwrap().push(body);
        Json(sample_result())
    }

    async fn record_blog(
        State(rec): State<Recorded>,
        Path(filename): Path<String>,
    ) -> Json<Value> {
        rec.filenames.lock().unwrap().push(filename.clone());
        Json(json!({"filename": filename, "content": "# Saved\n\ntext"}))
    }

    #[tokio::test]
    async fn test_generate_success_sends_topic_and_date() {
        let rec = Recorded::default();
        let router = Router::new()
            .route("/api/generate", post(record_generate))
            .with_state(rec.clone());
        let client = HttpBlogClient::new(&spawn_backend(router).await).unwrap();

        let result = client.generate("tokio", "2024-06-01").await.unwrap();

        assert_eq!(result.title(), Some("Understanding Tokio"));
        assert_eq!(result.evidence.len(), 1);
        let bodies = rec.bodies.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0], json!({"topic": "tokio", "as_of": "2024-06-01"}));
    }

    #[tokio::test]
    async fn test_generate_reported_failure_uses_backend_message() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async { Json(json!({"success": false, "error": "LLM unavailable"})) }),
        );
        let client = HttpBlogClient::new(&spawn_backend(router).await).unwrap();

        let err = client.generate("x", "2024-06-01").await.unwrap_err();
        assert!(matches!(err, Error::Generation { ref message } if message == "LLM unavailable"));
    }

    #[tokio::test]
    async fn test_generate_reported_failure_default_message() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async { Json(json!({"success": false})) }),
        );
        let client = HttpBlogClient::new(&spawn_backend(router).await).unwrap();

        let err = client.generate("x", "2024-06-01").await.unwrap_err();
        assert_eq!(err.to_string(), "Generation failed");
    }

    #[tokio::test]
    async fn test_generate_http_error_is_network_error() {
        let router = Router::new().route(
            "/api/generate",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "graph crashed"})),
                )
            }),
        );
        let client = HttpBlogClient::new(&spawn_backend(router).await).unwrap();

        let err = client.generate("x", "2024-06-01").await.unwrap_err();
        assert!(matches!(err, Error::Network { .. }));
        assert!(err.to_string().contains("graph crashed"));
    }

    #[tokio::test]
    async fn test_generate_undecodable_body_is_network_error() {
        let router = Router::new().route("/api/generate", post(|| async { "not json" }));
        let client = HttpBlogClient::new(&spawn_backend(router).await).unwrap();

        let err = client.generate("x", "2024-06-01").await.unwrap_err();
        assert!(matches!(err, Error::Network { .. }));
    }

    #[tokio::test]
    async fn test_generate_unreachable_backend_is_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = HttpBlogClient::with_connect_timeout(
            &format!("http://{}", addr),
            Some(Duration::from_secs(2)),
        )
        .unwrap();

        let err = client.generate("x", "2024-06-01").await.unwrap_err();
        assert!(matches!(err, Error::Network { .. }));
    }

    #[tokio::test]
    async fn test_list_past_blogs_preserves_order() {
        let router = Router::new().route(
            "/api/blogs",
            get(|| async {
                Json(json!([
                    {"filename": "newest.md", "title": "Newest", "modified_at": "1717000000.0"},
                    {"filename": "older.md", "title": "Older", "modified_at": "1716000000.0"}
                ]))
            }),
        );
        let client = HttpBlogClient::new(&spawn_backend(router).await).unwrap();

        let blogs = client.list_past_blogs().await;
        let names: Vec<_> = blogs.iter().map(|b| b.filename.as_str()).collect();
        assert_eq!(names, vec!["newest.md", "older.md"]);
    }

    #[tokio::test]
    async fn test_list_past_blogs_http_error_yields_empty() {
        let router = Router::new().route(
            "/api/blogs",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down") }),
        );
        let client = HttpBlogClient::new(&spawn_backend(router).await).unwrap();

        assert!(client.list_past_blogs().await.is_empty());
    }

    #[tokio::test]
    async fn test_list_past_blogs_bad_json_yields_empty() {
        let router = Router::new().route("/api/blogs", get(|| async { "{oops" }));
        let client = HttpBlogClient::new(&spawn_backend(router).await).unwrap();

        assert!(client.list_past_blogs().await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_blog_content_percent_encodes_filename() {
        let rec = Recorded::default();
        let router = Router::new()
            .route("/api/blogs/:filename", get(record_blog))
            .with_state(rec.clone());
        let client = HttpBlogClient::new(&spawn_backend(router).await).unwrap();

        let content = client
            .fetch_blog_content("rust tips #1 100%.md")
            .await
            .unwrap();

        assert_eq!(content.content, "# Saved\n\ntext");
        assert_eq!(
            rec.filenames.lock().unwrap().as_slice(),
            ["rust tips #1 100%.md".to_string()]
        );
    }

    #[tokio::test]
    async fn test_fetch_blog_content_missing_is_not_found() {
        let router = Router::new().route(
            "/api/blogs/:filename",
            get(|| async { (StatusCode::NOT_FOUND, Json(json!({"detail": "Blog not found"}))) }),
        );
        let client = HttpBlogClient::new(&spawn_backend(router).await).unwrap();

        let err = client.fetch_blog_content("gone.md").await.unwrap_err();
        assert!(matches!(err, Error::NotFound { ref filename } if filename == "gone.md"));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = HttpBlogClient::new("http://localhost:8000///").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.endpoint("/api/blogs"),
            "http://localhost:8000/api/blogs"
        );
    }

    #[test]
    fn test_blog_url_encoding() {
        let client = HttpBlogClient::new("http://localhost:8000").unwrap();
        assert_eq!(
            client.blog_url("a b/c?.md"),
            "http://localhost:8000/api/blogs/a%20b%2Fc%3F.md"
        );
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        assert!(matches!(
            HttpBlogClient::new("not a url"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            HttpBlogClient::new("ftp://example.com"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_error_detail_extraction() {
        assert_eq!(error_detail(r#"{"detail": "Invalid filename"}"#), "Invalid filename");
        assert_eq!(error_detail("plain failure"), "plain failure");
        assert_eq!(error_detail(""), "no response body");
    }
}
