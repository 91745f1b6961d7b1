//! File-name slugs for markdown exports

/// Maximum slug length in characters (before the `.md` extension)
pub const SLUG_MAX_LEN: usize = 50;

/// Fallback used when a title produces an empty slug
const FALLBACK_SLUG: &str = "blog";

/// Turn a blog title into a file-name stem.
///
/// Lowercases the title, replaces each run of characters outside
/// `[a-z0-9]` with a single `_`, then truncates to [`SLUG_MAX_LEN`].
/// Leading and trailing underscores are kept.
///
/// ```
/// use blogsmith_core::slugify;
///
/// assert_eq!(slugify("Hello, World! Rust"), "hello_world_rust");
/// assert_eq!(slugify(""), "blog");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut in_separator = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
            in_separator = false;
        } else if !in_separator {
            slug.push('_');
            in_separator = true;
        }
    }

    // Only ASCII was pushed, so byte and char counts agree
    slug.truncate(SLUG_MAX_LEN);

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}
