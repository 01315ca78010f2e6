//! Canonical URL assignment.
//!
//! Phase 1, step 2 of the build. Every node of the scanned tree gets a URL
//! path built from slugified titles:
//!
//! ```text
//! content/                     → /
//! content/_index.md            → /            (shares its section's URL)
//! content/guide/               → /guide/
//! content/guide/_index.md      → /guide/
//! content/guide/start.md       → /guide/getting-started   (title "Getting Started")
//! ```
//!
//! Sections always end in `/`, pages never do. The table is built once per
//! build by [`UrlTable::build`] and is read-only afterwards; navigation for
//! any page needs the complete table, so no page is rendered before it
//! exists.
//!
//! ## Validation
//!
//! Building fails when two nodes would be written to the same location (for
//! example sibling titles "Getting Started!" and "Getting-Started") or when a
//! title has no sluggable characters at all.

use crate::naming::{INDEX_FILE, slugify};
use crate::scan::{ContentNode, ContentTree, NodeKind};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UrlError {
    #[error("URL collision at {url}: {first} and {second}")]
    Collision {
        url: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("Title {title:?} of {path} produces an empty URL slug")]
    EmptySlug { path: PathBuf, title: String },
}

/// Immutable mapping from source path to URL path.
#[derive(Debug, Clone)]
pub struct UrlTable {
    root: PathBuf,
    urls: HashMap<PathBuf, String>,
}

impl UrlTable {
    /// Assign URLs to every node of the tree in a single pre-order pass.
    pub fn build(tree: &ContentTree) -> Result<Self, UrlError> {
        let mut builder = Builder {
            urls: HashMap::new(),
            owners: HashMap::new(),
        };
        builder.assign_section(&tree.root, "/".to_string())?;
        tracing::debug!(entries = builder.urls.len(), "Built URL table");
        Ok(Self {
            root: tree.root_path().to_path_buf(),
            urls: builder.urls,
        })
    }

    /// Exact lookup, no fallback.
    pub fn get(&self, path: &Path) -> Option<&str> {
        self.urls.get(path).map(String::as_str)
    }

    /// URL of a source path.
    ///
    /// A path missing from the table means the table and the tree disagree;
    /// the result then falls back to a URL derived mechanically from the
    /// relative filesystem path, and a warning is logged.
    pub fn resolve(&self, path: &Path) -> String {
        if let Some(url) = self.get(path) {
            return url.to_string();
        }
        let url = fallback_url(&self.root, path);
        tracing::warn!(
            path = %path.display(),
            url = %url,
            "Path missing from URL table, using path-derived URL"
        );
        url
    }

    /// Number of source paths in the table. A section and its `_index.md`
    /// count twice.
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// Number of distinct URLs, one per output location.
    pub fn distinct_urls(&self) -> usize {
        self.urls.values().collect::<HashSet<_>>().len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

struct Builder {
    urls: HashMap<PathBuf, String>,
    /// Output location (URL without trailing `/`) → owning source path.
    /// A section and its index page share one owner: the section directory.
    owners: HashMap<String, PathBuf>,
}

impl Builder {
    fn assign_section(&mut self, section: &ContentNode, url: String) -> Result<(), UrlError> {
        self.claim(&url, &section.source_path)?;
        if let Some(index) = &section.index_path {
            self.urls.insert(index.clone(), url.clone());
        }

        for child in &section.children {
            let slug = slugify(&child.title);
            if slug.is_empty() {
                return Err(UrlError::EmptySlug {
                    path: child.source_path.clone(),
                    title: child.title.clone(),
                });
            }
            match child.kind {
                NodeKind::Section => self.assign_section(child, format!("{url}{slug}/"))?,
                NodeKind::Page => self.claim(&format!("{url}{slug}"), &child.source_path)?,
            }
        }
        Ok(())
    }

    fn claim(&mut self, url: &str, owner: &Path) -> Result<(), UrlError> {
        let location = url.trim_end_matches('/').to_string();
        if let Some(first) = self.owners.get(&location) {
            return Err(UrlError::Collision {
                url: url.to_string(),
                first: first.clone(),
                second: owner.to_path_buf(),
            });
        }
        self.owners.insert(location, owner.to_path_buf());
        self.urls.insert(owner.to_path_buf(), url.to_string());
        Ok(())
    }
}

/// Best-effort URL from a path relative to the content root.
///
/// `.md` and a trailing `_index` are stripped; index files and directories get
/// a trailing `/`.
fn fallback_url(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let is_index = rel.file_name().is_some_and(|n| n == INDEX_FILE);
    let is_section = is_index || path.is_dir();

    let mut segments: Vec<String> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .filter(|s| !s.is_empty() && s != "/")
        .collect();
    if is_index {
        segments.pop();
    } else if let Some(last) = segments.last_mut()
        && let Some(stem) = last.strip_suffix(".md")
    {
        *last = stem.to_string();
    }

    let joined = segments.join("/");
    match (joined.is_empty(), is_section) {
        (true, _) => "/".to_string(),
        (false, true) => format!("/{joined}/"),
        (false, false) => format!("/{joined}"),
    }
}
