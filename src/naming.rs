//! Title and slug derivation shared by every content entry.
//!
//! Two pure transforms drive all naming in a built site:
//!
//! - [`format_title`] turns a raw filesystem name into a display title when no
//!   frontmatter `title` is present: `getting_started` → "Getting Started".
//! - [`slugify`] turns a resolved title into a URL path segment:
//!   "Getting Started!" → `getting-started`.
//!
//! URLs are built from titles, not filenames, so renaming a file without
//! touching its title keeps its URL stable.

/// Reserved filename of a section's index page.
pub const INDEX_FILE: &str = "_index.md";

/// Convert a filename stem or directory name into a display title.
///
/// `-` and `_` become spaces and the first letter of every word is
/// uppercased. Everything else is left as written:
///
/// - `"my_page"` → `"My Page"`
/// - `"getting-started"` → `"Getting Started"`
/// - `"API-docs"` → `"API Docs"`
pub fn format_title(name: &str) -> String {
    let mut title = String::with_capacity(name.len());
    let mut prev_is_word = false;
    for c in name.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        if c.is_alphanumeric() {
            if prev_is_word {
                title.push(c);
            } else {
                title.extend(c.to_uppercase());
            }
            prev_is_word = true;
        } else {
            title.push(c);
            prev_is_word = false;
        }
    }
    title
}

/// Convert a title into a URL path segment.
///
/// Lowercases, drops everything outside `[a-z0-9]`, whitespace and `-`,
/// turns whitespace runs into a single `-`, collapses repeated dashes and
/// trims dashes from both ends. Idempotent. Returns an empty string when
/// the title has no ASCII alphanumerics.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else if c == '-' || c.is_whitespace() {
            pending_dash = true;
        }
    }
    slug
}
