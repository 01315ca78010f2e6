//! CLI output formatting for the scan, check and build commands.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. The primary display
//! for every node is its semantic identity (positional index, title and URL)
//! with filesystem paths shown as secondary context via indented `Source:`
//! lines. The output reads as a content inventory while still letting users
//! trace every URL back to a file.
//!
//! # Output Format
//!
//! ## Scan / Check
//!
//! ```text
//! Content
//! 001 Guide → /guide/
//!     Source: guide/_index.md
//!     001 Advanced Topics → /guide/advanced-topics/
//!         Source: guide/advanced/_index.md
//!     002 Getting Started → /guide/getting-started
//!         Source: guide/start.md
//!         Description: Install and run your first widget
//! 002 Reference → /reference/
//!     Source: reference/
//!
//! Found 3 sections, 6 pages
//! ```
//!
//! ## Build
//!
//! ```text
//! Pages
//! 001 /guide/ → guide/index.html
//! 002 /guide/getting-started → guide/getting-started/index.html
//!
//! Home → index.html
//! Not found → 404.html
//! Search index → search-index.json (9 entries)
//!
//! Generated 2 pages
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::generate::{BuildSummary, SEARCH_INDEX_FILE, output_path};
use crate::scan::{ContentNode, ContentTree};
use crate::urls::UrlTable;
use std::path::Path;

const DESCRIPTION_WIDTH: usize = 60;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

/// Path relative to the content root, sections with a trailing `/`.
fn display_source(node: &ContentNode, root: &Path) -> String {
    let path = node.index_path.as_ref().unwrap_or(&node.source_path);
    let rel = path.strip_prefix(root).unwrap_or(path).display().to_string();
    if node.is_section() && node.index_path.is_none() {
        format!("{}/", rel)
    } else {
        rel
    }
}

fn push_nodes(
    lines: &mut Vec<String>,
    nodes: &[ContentNode],
    urls: &UrlTable,
    root: &Path,
    depth: usize,
) {
    for (i, node) in nodes.iter().enumerate() {
        let url = urls.get(&node.source_path).unwrap_or("?");
        lines.push(format!(
            "{}{} {} → {}",
            indent(depth),
            format_index(i + 1),
            node.title,
            url
        ));
        lines.push(format!(
            "{}Source: {}",
            indent(depth + 1),
            display_source(node, root)
        ));
        if let Some(desc) = &node.description {
            lines.push(format!(
                "{}Description: {}",
                indent(depth + 1),
                truncate_desc(desc, DESCRIPTION_WIDTH)
            ));
        }
        push_nodes(lines, &node.children, urls, root, depth + 1);
    }
}

/// `1 page`, `2 pages`.
fn plural(n: usize, one: &str, many: &str) -> String {
    format!("{} {}", n, if n == 1 { one } else { many })
}

/// Content inventory: every node with its URL and source.
pub fn format_scan_output(tree: &ContentTree, urls: &UrlTable) -> Vec<String> {
    let mut lines = vec!["Content".to_string()];
    push_nodes(&mut lines, &tree.root.children, urls, tree.root_path(), 0);

    let (sections, pages) = tree.counts();
    lines.push(String::new());
    lines.push(format!(
        "Found {}, {}",
        plural(sections, "section", "sections"),
        plural(pages, "page", "pages")
    ));
    lines
}

pub fn print_scan_output(tree: &ContentTree, urls: &UrlTable) {
    for line in format_scan_output(tree, urls) {
        println!("{}", line);
    }
}

/// Inventory followed by the validation verdict.
pub fn format_check_output(tree: &ContentTree, urls: &UrlTable) -> Vec<String> {
    let mut lines = format_scan_output(tree, urls);
    lines.push(format!(
        "{} assigned, no collisions",
        plural(urls.distinct_urls(), "URL", "URLs")
    ));
    lines
}

pub fn print_check_output(tree: &ContentTree, urls: &UrlTable) {
    for line in format_check_output(tree, urls) {
        println!("{}", line);
    }
}

/// Generated documents, special pages and totals.
pub fn format_build_output(summary: &BuildSummary) -> Vec<String> {
    let mut lines = Vec::new();
    if !summary.pages.is_empty() {
        lines.push("Pages".to_string());
        for (i, url) in summary.pages.iter().enumerate() {
            lines.push(format!(
                "{} {} → {}",
                format_index(i + 1),
                url,
                output_path(Path::new(""), url).display()
            ));
        }
        lines.push(String::new());
    }

    lines.push("Home → index.html".to_string());
    lines.push("Not found → 404.html".to_string());
    lines.push(format!(
        "Search index → {} ({})",
        SEARCH_INDEX_FILE,
        plural(summary.search_entries, "entry", "entries")
    ));
    if summary.static_files > 0 {
        lines.push(format!(
            "Static → {} copied",
            plural(summary.static_files, "file", "files")
        ));
    }

    lines.push(String::new());
    lines.push(format!("Generated {}", plural(summary.pages.len(), "page", "pages")));
    lines
}

pub fn print_build_output(summary: &BuildSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
