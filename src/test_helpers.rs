//! Shared test utilities for the markstack test suite.
//!
//! Provides fixture setup, content-file writers and lookup/assert helpers
//! over scanned trees.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let tree = scan(tmp.path()).unwrap();
//!
//! let guide = find_node(&tree, "Guide");
//! assert_child_titles(guide, &["Advanced Topics", "Getting Started", "Installation"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::scan::{ContentNode, ContentTree};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Write `content` to `root/rel`, creating parent directories.
pub fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

// =========================================================================
// Tree lookups: panic with a clear message on miss
// =========================================================================

/// Find a node anywhere in the tree by resolved title. Panics if not found.
pub fn find_node<'a>(tree: &'a ContentTree, title: &str) -> &'a ContentNode {
    let mut found = None;
    let mut titles = Vec::new();
    tree.root.walk(&mut |node| {
        if found.is_none() && node.title == title {
            found = Some(node);
        }
        titles.push(node.title.as_str());
    });
    found.unwrap_or_else(|| panic!("node '{title}' not found. Available: {titles:?}"))
}

// =========================================================================
// Assertions
// =========================================================================

/// Assert a node's children titles, in display order.
pub fn assert_child_titles(node: &ContentNode, expected: &[&str]) {
    let actual: Vec<&str> = node.children.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(
        actual, expected,
        "children of '{}' don't match expected order",
        node.title
    );
}
