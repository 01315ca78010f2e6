//! Per-page navigation: breadcrumbs and the annotated sidebar.
//!
//! Both views read the finished [`UrlTable`], never the filesystem, so they
//! agree with the URLs pages are actually written to.
//!
//! The sidebar is the whole content tree, not only the current page's
//! ancestors. Its unannotated shape is computed once per build
//! ([`SidebarTree::build`]); each page then gets a fresh annotated copy
//! ([`SidebarTree::annotate`]) where:
//!
//! - a section is `expanded` when the current URL starts with the section's URL,
//! - a page is `current` when its URL equals the current URL.

use crate::naming::INDEX_FILE;
use crate::scan::{ContentNode, ContentTree, NodeKind};
use crate::types::Breadcrumb;
use crate::urls::UrlTable;
use serde::Serialize;
use std::path::Path;

/// One entry of the sidebar tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarItem {
    pub kind: NodeKind,
    pub title: String,
    pub url: String,
    pub expanded: bool,
    pub current: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SidebarItem>,
}

/// The sidebar shape shared by every page of a build.
#[derive(Debug, Clone)]
pub struct SidebarTree {
    items: Vec<SidebarItem>,
}

impl SidebarTree {
    /// Mirror the children of the content root, with URLs from the table.
    pub fn build(tree: &ContentTree, urls: &UrlTable) -> Self {
        Self {
            items: tree
                .root
                .children
                .iter()
                .map(|node| sidebar_item(node, urls))
                .collect(),
        }
    }

    /// A copy annotated for the page at `current_url`. `None` marks nothing.
    pub fn annotate(&self, current_url: Option<&str>) -> Vec<SidebarItem> {
        let mut items = self.items.clone();
        if let Some(current) = current_url {
            mark(&mut items, current);
        }
        items
    }
}

fn sidebar_item(node: &ContentNode, urls: &UrlTable) -> SidebarItem {
    SidebarItem {
        kind: node.kind,
        title: node.title.clone(),
        url: urls.resolve(&node.source_path),
        expanded: false,
        current: false,
        children: node
            .children
            .iter()
            .map(|child| sidebar_item(child, urls))
            .collect(),
    }
}

fn mark(items: &mut [SidebarItem], current: &str) {
    for item in items {
        match item.kind {
            NodeKind::Section => {
                item.expanded = current.starts_with(&item.url);
                if item.expanded {
                    mark(&mut item.children, current);
                }
            }
            NodeKind::Page => item.current = item.url == current,
        }
    }
}

/// Breadcrumb chain from `Home` down to the page at `page`.
///
/// Walks the page's path components through the tree. `_index.md` adds no
/// entry of its own (its section already did), and any node without a table
/// entry is left out rather than linked to nowhere.
pub fn breadcrumbs(tree: &ContentTree, urls: &UrlTable, page: &Path) -> Vec<Breadcrumb> {
    let mut crumbs = vec![Breadcrumb::home()];
    let Ok(rel) = page.strip_prefix(tree.root_path()) else {
        tracing::warn!(path = %page.display(), "Page outside content root, no breadcrumbs");
        return crumbs;
    };

    let mut node = &tree.root;
    for component in rel.components() {
        let name = component.as_os_str().to_string_lossy();
        if name == INDEX_FILE {
            continue;
        }
        let Some(child) = node.child(&name) else {
            tracing::warn!(path = %page.display(), segment = %name, "Path segment not in content tree");
            break;
        };
        if let Some(url) = urls.get(&child.source_path) {
            crumbs.push(Breadcrumb::new(child.title.as_str(), url));
        }
        node = child;
    }
    crumbs
}

/// Everything a document needs to render its navigation.
#[derive(Debug, Clone, Serialize)]
pub struct NavigationContext {
    pub breadcrumbs: Vec<Breadcrumb>,
    pub sidebar: Vec<SidebarItem>,
}

impl NavigationContext {
    /// Navigation for a content page already resolved to `url`.
    pub fn for_page(
        tree: &ContentTree,
        urls: &UrlTable,
        sidebar: &SidebarTree,
        page: &Path,
        url: &str,
    ) -> Self {
        Self {
            breadcrumbs: breadcrumbs(tree, urls, page),
            sidebar: sidebar.annotate(Some(url)),
        }
    }

    /// Homepage: full sidebar, nothing current.
    pub fn homepage(sidebar: &SidebarTree) -> Self {
        Self {
            breadcrumbs: vec![Breadcrumb::home()],
            sidebar: sidebar.annotate(None),
        }
    }

    /// Not-found page: fixed breadcrumbs, empty sidebar.
    pub fn not_found(url: &str) -> Self {
        Self {
            breadcrumbs: vec![Breadcrumb::home(), Breadcrumb::new("404", url)],
            sidebar: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scan;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn fixture_site() -> (TempDir, ContentTree, UrlTable) {
        let tmp = setup_fixtures();
        let tree = scan(tmp.path()).unwrap();
        let urls = UrlTable::build(&tree).unwrap();
        (tmp, tree, urls)
    }

    fn find_item<'a>(items: &'a [SidebarItem], title: &str) -> &'a SidebarItem {
        fn walk<'a>(items: &'a [SidebarItem], title: &str) -> Option<&'a SidebarItem> {
            items.iter().find_map(|item| {
                if item.title == title {
                    Some(item)
                } else {
                    walk(&item.children, title)
                }
            })
        }
        walk(items, title).unwrap_or_else(|| panic!("sidebar item '{title}' not found"))
    }

    fn pairs(crumbs: &[Breadcrumb]) -> Vec<(&str, &str)> {
        crumbs
            .iter()
            .map(|c| (c.title.as_str(), c.url.as_str()))
            .collect()
    }

    #[test]
    fn breadcrumbs_docs_guide_scenario() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "_index.md", "---\ntitle: Docs\n---\n");
        write(tmp.path(), "guide/_index.md", "---\ntitle: Guide\n---\n");
        write(tmp.path(), "guide/start.md", "---\ntitle: Getting Started\n---\n");
        let tree = scan(tmp.path()).unwrap();
        let urls = UrlTable::build(&tree).unwrap();

        let crumbs = breadcrumbs(&tree, &urls, &tree.root_path().join("guide/start.md"));
        assert_eq!(
            pairs(&crumbs),
            vec![
                ("Home", "/"),
                ("Guide", "/guide/"),
                ("Getting Started", "/guide/getting-started"),
            ]
        );
    }

    #[test]
    fn breadcrumbs_for_index_page_end_at_section() {
        let (_tmp, tree, urls) = fixture_site();
        let crumbs = breadcrumbs(
            &tree,
            &urls,
            &tree.root_path().join("guide/advanced/_index.md"),
        );
        assert_eq!(
            pairs(&crumbs),
            vec![
                ("Home", "/"),
                ("Guide", "/guide/"),
                ("Advanced Topics", "/guide/advanced-topics/"),
            ]
        );
    }

    #[test]
    fn breadcrumbs_end_with_page_title_for_every_page() {
        let (_tmp, tree, urls) = fixture_site();
        tree.root.walk(&mut |node| {
            if node.kind != NodeKind::Page {
                return;
            }
            let crumbs = breadcrumbs(&tree, &urls, &node.source_path);
            assert_eq!(crumbs[0], Breadcrumb::home());
            assert_eq!(crumbs.last().unwrap().title, node.title);
            assert!(crumbs[1..].iter().all(|c| !c.url.is_empty()));
        });
    }

    #[test]
    fn breadcrumbs_for_path_outside_root() {
        let (_tmp, tree, urls) = fixture_site();
        let crumbs = breadcrumbs(&tree, &urls, Path::new("/elsewhere/page.md"));
        assert_eq!(crumbs, vec![Breadcrumb::home()]);
    }

    #[test]
    fn breadcrumbs_stop_at_unknown_segment() {
        let (_tmp, tree, urls) = fixture_site();
        let crumbs = breadcrumbs(&tree, &urls, &tree.root_path().join("guide/missing.md"));
        assert_eq!(pairs(&crumbs), vec![("Home", "/"), ("Guide", "/guide/")]);
    }

    #[test]
    fn sidebar_mirrors_whole_tree() {
        let (_tmp, tree, urls) = fixture_site();
        let sidebar = SidebarTree::build(&tree, &urls).annotate(None);

        let titles: Vec<&str> = sidebar.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Guide", "Reference", "FAQ", "My Page"]);
        let tuning = find_item(&sidebar, "Tuning");
        assert_eq!(tuning.url, "/guide/advanced-topics/tuning");
    }

    #[test]
    fn sidebar_expands_ancestors_only() {
        let (_tmp, tree, urls) = fixture_site();
        let sidebar = SidebarTree::build(&tree, &urls).annotate(Some("/guide/getting-started"));

        assert!(find_item(&sidebar, "Guide").expanded);
        assert!(!find_item(&sidebar, "Advanced Topics").expanded);
        assert!(!find_item(&sidebar, "Reference").expanded);
        assert!(find_item(&sidebar, "Getting Started").current);
        assert!(!find_item(&sidebar, "Installation").current);
    }

    #[test]
    fn sidebar_deep_page() {
        let (_tmp, tree, urls) = fixture_site();
        let sidebar =
            SidebarTree::build(&tree, &urls).annotate(Some("/guide/advanced-topics/tuning"));

        assert!(find_item(&sidebar, "Guide").expanded);
        assert!(find_item(&sidebar, "Advanced Topics").expanded);
        assert!(find_item(&sidebar, "Tuning").current);
        let current: usize = count(&sidebar, &|i| i.current);
        assert_eq!(current, 1);
    }

    #[test]
    fn sidebar_section_index_expands_its_section() {
        let (_tmp, tree, urls) = fixture_site();
        let sidebar = SidebarTree::build(&tree, &urls).annotate(Some("/guide/"));

        assert!(find_item(&sidebar, "Guide").expanded);
        assert_eq!(count(&sidebar, &|i| i.current), 0);
    }

    #[test]
    fn sidebar_no_current_marks_nothing() {
        let (_tmp, tree, urls) = fixture_site();
        let sidebar = SidebarTree::build(&tree, &urls).annotate(None);
        assert_eq!(count(&sidebar, &|i| i.expanded || i.current), 0);
    }

    #[test]
    fn annotations_do_not_leak_between_pages() {
        let (_tmp, tree, urls) = fixture_site();
        let shared = SidebarTree::build(&tree, &urls);

        let first = shared.annotate(Some("/guide/getting-started"));
        let second = shared.annotate(Some("/faq"));
        assert!(find_item(&first, "Guide").expanded);
        assert!(!find_item(&second, "Guide").expanded);
        assert!(!find_item(&second, "Getting Started").current);
        assert!(find_item(&second, "FAQ").current);
    }

    #[test]
    fn prefix_match_respects_segment_boundary() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "guide/a.md", "");
        write(tmp.path(), "guide_extra/b.md", "");
        let tree = scan(tmp.path()).unwrap();
        let urls = UrlTable::build(&tree).unwrap();

        let sidebar = SidebarTree::build(&tree, &urls).annotate(Some("/guide-extra/b"));
        assert!(!find_item(&sidebar, "Guide").expanded);
        assert!(find_item(&sidebar, "Guide Extra").expanded);
    }

    #[test]
    fn special_page_contexts() {
        let (_tmp, tree, urls) = fixture_site();
        let shared = SidebarTree::build(&tree, &urls);

        let home = NavigationContext::homepage(&shared);
        assert_eq!(home.breadcrumbs, vec![Breadcrumb::home()]);
        assert_eq!(home.sidebar.len(), 4);

        let missing = NavigationContext::not_found("/404/");
        assert_eq!(pairs(&missing.breadcrumbs), vec![("Home", "/"), ("404", "/404/")]);
        assert!(missing.sidebar.is_empty());
    }

    fn count(items: &[SidebarItem], pred: &dyn Fn(&SidebarItem) -> bool) -> usize {
        items
            .iter()
            .map(|i| usize::from(pred(i)) + count(&i.children, pred))
            .sum()
    }
}
