//! Shared types emitted into generated output.
//!
//! Both are serialized: breadcrumbs into every document, search entries into
//! `search-index.json`.

use serde::{Deserialize, Serialize};

/// One link in a breadcrumb chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    pub title: String,
    pub url: String,
}

impl Breadcrumb {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }

    /// The synthetic first entry of every chain.
    pub fn home() -> Self {
        Self::new("Home", "/")
    }
}

/// One page in the client-side search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchEntry {
    pub title: String,
    pub url: String,
    pub description: String,
    /// Rendered body reduced to plain text.
    pub content: String,
}
