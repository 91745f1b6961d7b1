//! # blogsmith-core - Core Domain Types
//!
//! Foundation crate for Blogsmith. Provides the backend data model, error
//! handling, logging setup, and the text utilities every other crate relies on.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, chrono, thiserror, regex, tracing).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`GenerationResult`] - Response of a blog generation (or a reconstructed saved blog)
//! - [`Plan`], [`Task`] - Backend outline of a post and its writing units
//! - [`EvidenceItem`] - A retrieved source citation
//! - [`PastBlogSummary`], [`BlogContent`] - Saved blog listing and content
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ### Text (`sanitize`, `slug`)
//! - [`sanitize_inline()`] / [`sanitize_block()`] - Neutralize terminal control sequences in untrusted text
//! - [`slugify()`] - File-name slug for markdown exports
//!
//! ## Prelude
//!
//! ```rust
//! use blogsmith_core::prelude::*;
//! ```

pub mod error;
pub mod logging;
pub mod sanitize;
pub mod slug;
pub mod types;

/// Prelude for common imports used throughout all Blogsmith crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use sanitize::{contains_control_sequences, sanitize_block, sanitize_inline};
pub use slug::{slugify, SLUG_MAX_LEN};
pub use types::{
    extract_title, BlogContent, EvidenceItem, GenerationResult, PastBlogSummary, Plan, Task,
    DEFAULT_GENERATION_ERROR,
};
