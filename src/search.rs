//! Search-index text extraction.
//!
//! Each page contributes a [`SearchEntry`] whose `content` is its rendered
//! HTML reduced to plain text. The reduction is a fixed sequence of regex
//! substitutions, not an HTML parser: common tags, entities and leftover
//! markdown markers are removed, and anything unmatched stays in as literal
//! text. It cannot fail.

use crate::types::SearchEntry;
use regex::Regex;
use std::sync::LazyLock;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Entity decodes, applied in order. `&amp;` comes after the others so
/// `&amp;lt;` decodes to the literal text `&lt;`.
const ENTITIES: &[(&str, &str)] = &[
    ("&quot;", "\""),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&#39;", "'"),
    ("&nbsp;", " "),
    ("&amp;", "&"),
];

/// Markdown syntax that survives rendering (e.g. inside raw HTML blocks).
static MARKDOWN: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"#{1,6}\s*", ""),
        (r"\*\*([^*]+)\*\*", "$1"),
        (r"\*([^*]+)\*", "$1"),
        (r"__([^_]+)__", "$1"),
        (r"_([^_]+)_", "$1"),
        (r"`([^`]+)`", "$1"),
        (r"!\[([^\]]*)\]\([^)]+\)", ""),
        (r"\[([^\]]+)\]\([^)]+\)", "$1"),
        (r"(?m)^\s*[-*+]\s+", ""),
        (r"(?m)^\s*\d+\.\s+", ""),
        (r"(?m)^>", ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).unwrap(), replacement))
    .collect()
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Reduce rendered HTML to searchable plain text.
pub fn plain_text(html: &str) -> String {
    let mut text = TAG.replace_all(html, " ").into_owned();
    for (entity, decoded) in ENTITIES {
        text = text.replace(entity, decoded);
    }
    for (pattern, replacement) in MARKDOWN.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Build the index entry for a rendered page.
pub fn entry(title: &str, url: &str, description: &str, html: &str) -> SearchEntry {
    SearchEntry {
        title: title.to_string(),
        url: url.to_string(),
        description: description.to_string(),
        content: plain_text(html),
    }
}
