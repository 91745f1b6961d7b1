//! # blogsmith-client - Backend API Client
//!
//! Talks to the blog writing agent backend over its JSON HTTP API.
//!
//! Depends on [`blogsmith_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! - [`BlogApi`] - Async operations the app needs from the backend
//! - [`HttpBlogClient`] - reqwest implementation of [`BlogApi`]
//! - [`DEFAULT_API_URL`] - Where the backend listens when run locally
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |---|---|
//! | [`BlogApi::generate`] | `POST /api/generate` `{topic, as_of}` |
//! | [`BlogApi::list_past_blogs`] | `GET /api/blogs` |
//! | [`BlogApi::fetch_blog_content`] | `GET /api/blogs/{filename}` |

pub mod api;
pub mod http;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

pub use api::{BlogApi, GenerateRequest};
pub use http::{HttpBlogClient, DEFAULT_API_URL};
