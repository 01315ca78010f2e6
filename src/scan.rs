//! Content tree scanning.
//!
//! Phase 1, step 1 of the build. Walks the content root and produces an
//! in-memory tree of [`ContentNode`]s that every later stage reads.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── config.toml              # Site configuration (optional, not content)
//! ├── _index.md                # Root index page → homepage body
//! ├── guide/                   # Section
//! │   ├── _index.md            # Section title/description/body (optional)
//! │   ├── start.md             # Page
//! │   └── advanced/            # Nested section
//! │       └── tuning.md
//! └── faq.md                   # Page
//! ```
//!
//! ## Titles
//!
//! - **Section**: `title` from its `_index.md` frontmatter, else the title-cased
//!   directory name.
//! - **Page**: `title` from its own frontmatter, else the title-cased file stem.
//!
//! ## Ordering
//!
//! Children are always sections first, then pages, each group sorted by
//! resolved title, ignoring case and accents ("Éclair" sorts with "E").
//! Ordering is display-only; URL
//! assignment never depends on it.
//!
//! ## Failures
//!
//! A missing root or an unreadable directory aborts the scan. There is no
//! partial result.

use crate::frontmatter::{self, Frontmatter};
use crate::naming::{INDEX_FILE, format_title};
use serde::Serialize;
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Content root not found: {0}")]
    MissingRoot(PathBuf),
    #[error("Content root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Section,
    Page,
}

/// One filesystem entry under the content root.
#[derive(Debug, Clone, Serialize)]
pub struct ContentNode {
    pub kind: NodeKind,
    /// Raw filesystem entry name (`guide`, `start.md`).
    pub name: String,
    /// Resolved display title.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absolute path of the file or directory. Unique per node; used as the
    /// lookup key everywhere.
    pub source_path: PathBuf,
    /// The section's `_index.md`, when it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    pub fn is_section(&self) -> bool {
        self.kind == NodeKind::Section
    }

    /// Find the direct child with the given filesystem name.
    pub fn child(&self, name: &str) -> Option<&ContentNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Visit this node and all descendants, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ContentNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }
}

/// The scanned content tree, rooted at the content directory.
#[derive(Debug, Clone, Serialize)]
pub struct ContentTree {
    pub root: ContentNode,
}

impl ContentTree {
    /// Absolute path of the content root.
    pub fn root_path(&self) -> &Path {
        &self.root.source_path
    }

    /// Count of sections and pages, excluding the root.
    pub fn counts(&self) -> (usize, usize) {
        let (mut sections, mut pages) = (0, 0);
        for child in &self.root.children {
            child.walk(&mut |node| match node.kind {
                NodeKind::Section => sections += 1,
                NodeKind::Page => pages += 1,
            });
        }
        (sections, pages)
    }
}

/// Scan a content directory into a [`ContentTree`].
pub fn scan(root: &Path) -> Result<ContentTree, ScanError> {
    if !root.exists() {
        return Err(ScanError::MissingRoot(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    let root = fs::canonicalize(root).map_err(|source| ScanError::Read {
        path: root.to_path_buf(),
        source,
    })?;

    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let node = scan_section(&root, name)?;
    tracing::debug!(root = %root.display(), "Scanned content tree");
    Ok(ContentTree { root: node })
}

fn scan_section(path: &Path, name: String) -> Result<ContentNode, ScanError> {
    let index_path = path.join(INDEX_FILE);
    let (index_path, meta) = if index_path.is_file() {
        let meta = read_frontmatter(&index_path)?;
        (Some(index_path), meta)
    } else {
        (None, Frontmatter::default())
    };

    let mut children = Vec::new();
    for entry in read_entries(path)? {
        let entry_path = path.join(&entry.name);
        if entry.is_dir {
            children.push(scan_section(&entry_path, entry.name)?);
        } else if is_markdown(&entry.name) && entry.name != INDEX_FILE {
            children.push(scan_page(entry_path, entry.name)?);
        }
    }
    children.sort_by(display_order);

    Ok(ContentNode {
        kind: NodeKind::Section,
        title: meta.title.unwrap_or_else(|| format_title(&name)),
        description: meta.description,
        name,
        source_path: path.to_path_buf(),
        index_path,
        children,
    })
}

fn scan_page(path: PathBuf, name: String) -> Result<ContentNode, ScanError> {
    let meta = read_frontmatter(&path)?;
    let stem = Path::new(&name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    tracing::debug!(path = %path.display(), "Scanned page");
    Ok(ContentNode {
        kind: NodeKind::Page,
        title: meta.title.unwrap_or_else(|| format_title(&stem)),
        description: meta.description,
        name,
        source_path: path,
        index_path: None,
        children: Vec::new(),
    })
}

struct Entry {
    name: String,
    is_dir: bool,
}

/// List visible entries of a directory. Hidden (`.`-prefixed) names are skipped.
fn read_entries(dir: &Path) -> Result<Vec<Entry>, ScanError> {
    let read_err = |source| ScanError::Read {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        // Follows symlinks, so a linked directory is scanned as a section.
        let is_dir = entry.path().is_dir();
        entries.push(Entry { name, is_dir });
    }
    Ok(entries)
}

fn read_frontmatter(path: &Path) -> Result<Frontmatter, ScanError> {
    frontmatter::read_document(path)
        .map(|doc| doc.frontmatter)
        .map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })
}

pub fn is_markdown(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

/// Title folded for comparison: decomposed, combining marks dropped, lowercased.
fn sort_key(title: &str) -> String {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Sections before pages; within a group, by folded title. Ties fall back
/// to the lowercased title, the exact title, then the filesystem name, so
/// the order is total.
fn display_order(a: &ContentNode, b: &ContentNode) -> Ordering {
    let group = |n: &ContentNode| if n.is_section() { 0 } else { 1 };
    group(a)
        .cmp(&group(b))
        .then_with(|| sort_key(&a.title).cmp(&sort_key(&b.title)))
        .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn section_title_from_index_frontmatter() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "guide/_index.md", "---\ntitle: The Guide\n---\n");
        write(tmp.path(), "guide/start.md", "# Start");

        let tree = scan(tmp.path()).unwrap();
        let guide = find_node(&tree, "The Guide");
        assert!(guide.is_section());
        assert_eq!(guide.name, "guide");
        assert!(guide.index_path.is_some());
    }

    #[test]
    fn section_title_from_directory_name() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "release_notes/v1.md", "");

        let tree = scan(tmp.path()).unwrap();
        let section = find_node(&tree, "Release Notes");
        assert!(section.index_path.is_none());
    }

    #[test]
    fn page_title_fallback_from_filename() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "my_page.md", "Just text, no frontmatter.");

        let tree = scan(tmp.path()).unwrap();
        let page = &tree.root.children[0];
        assert_eq!(page.kind, NodeKind::Page);
        assert_eq!(page.title, "My Page");
    }

    #[test]
    fn page_title_and_description_from_frontmatter() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            "start.md",
            "---\ntitle: Getting Started\ndescription: First steps\n---\nBody",
        );

        let tree = scan(tmp.path()).unwrap();
        let page = find_node(&tree, "Getting Started");
        assert_eq!(page.description.as_deref(), Some("First steps"));
    }

    #[test]
    fn sections_first_then_pages_by_title() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "z.md", "---\ntitle: Zeta\n---\n");
        write(tmp.path(), "a.md", "---\ntitle: Alpha\n---\n");
        write(tmp.path(), "folder/_index.md", "---\ntitle: Beta\n---\n");

        let tree = scan(tmp.path()).unwrap();
        assert_child_titles(&tree.root, &["Beta", "Alpha", "Zeta"]);
        assert!(tree.root.children[0].is_section());
    }

    #[test]
    fn ordering_uses_title_not_filename() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "aaa.md", "---\ntitle: Zulu\n---\n");
        write(tmp.path(), "zzz.md", "---\ntitle: alpha\n---\n");

        let tree = scan(tmp.path()).unwrap();
        assert_child_titles(&tree.root, &["alpha", "Zulu"]);
    }

    #[test]
    fn ordering_ignores_accents() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.md", "---\ntitle: Zeta\n---\n");
        write(tmp.path(), "b.md", "---\ntitle: Éclair\n---\n");
        write(tmp.path(), "c.md", "---\ntitle: Alpha\n---\n");
        write(tmp.path(), "d.md", "---\ntitle: eclair\n---\n");

        let tree = scan(tmp.path()).unwrap();
        assert_child_titles(&tree.root, &["Alpha", "eclair", "Éclair", "Zeta"]);
    }

    #[test]
    fn sort_key_folds_case_and_marks() {
        assert_eq!(sort_key("Éclair"), "eclair");
        assert_eq!(sort_key("Über Ångström"), "uber angstrom");
        assert_eq!(sort_key("Zeta"), "zeta");
    }

    #[test]
    fn hidden_entries_and_non_markdown_skipped() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".drafts/secret.md", "");
        write(tmp.path(), ".hidden.md", "");
        write(tmp.path(), "config.toml", "");
        write(tmp.path(), "image.png", "");
        write(tmp.path(), "visible.md", "");

        let tree = scan(tmp.path()).unwrap();
        assert_child_titles(&tree.root, &["Visible"]);
    }

    #[test]
    fn index_page_is_not_a_child() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "_index.md", "---\ntitle: Docs\n---\n");
        write(tmp.path(), "guide/_index.md", "");

        let tree = scan(tmp.path()).unwrap();
        assert_eq!(tree.root.title, "Docs");
        assert_child_titles(&tree.root, &["Guide"]);
        assert!(tree.root.children[0].children.is_empty());
    }

    #[test]
    fn empty_directory_is_a_section() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("empty")).unwrap();

        let tree = scan(tmp.path()).unwrap();
        assert_child_titles(&tree.root, &["Empty"]);
        assert_eq!(tree.counts(), (1, 0));
    }

    #[test]
    fn source_paths_are_absolute() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "guide/start.md", "");

        let tree = scan(tmp.path()).unwrap();
        tree.root.walk(&mut |node| assert!(node.source_path.is_absolute()));
        let start = find_node(&tree, "Start");
        assert!(start.source_path.ends_with("guide/start.md"));
    }

    #[test]
    fn malformed_frontmatter_falls_back_to_filename() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "broken_page.md", "---\ntitle: [oops\n---\nBody");

        let tree = scan(tmp.path()).unwrap();
        assert_child_titles(&tree.root, &["Broken Page"]);
    }

    #[test]
    fn missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        let result = scan(&tmp.path().join("nope"));
        assert!(matches!(result, Err(ScanError::MissingRoot(_))));
    }

    #[test]
    fn file_root_is_error() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "file.md", "");
        let result = scan(&tmp.path().join("file.md"));
        assert!(matches!(result, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn fixture_tree_shape() {
        let tmp = setup_fixtures();
        let tree = scan(tmp.path()).unwrap();

        assert_eq!(tree.root.title, "Docs");
        assert_child_titles(&tree.root, &["Guide", "Reference", "FAQ", "My Page"]);
        let guide = find_node(&tree, "Guide");
        assert_child_titles(guide, &["Advanced Topics", "Getting Started", "Installation"]);
    }
}
