//! HTML site generation.
//!
//! The build runs in two phases:
//!
//! 1. [`Site::load`] reads `config.toml`, scans the content tree and builds
//!    the complete [`UrlTable`]. Nothing is written; this is all `check` runs.
//! 2. [`generate`] walks the tree in pre-order and writes one document per
//!    markdown file, then the homepage, the 404 page and the search index.
//!    Phase 2 only reads the phase 1 state.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                        # Homepage (hero + root _index.md body)
//! ├── 404.html                          # Not-found page
//! ├── search-index.json                 # Client-side search entries
//! ├── guide/
//! │   ├── index.html                    # guide/_index.md
//! │   ├── getting-started/index.html    # guide/start.md
//! │   └── advanced-topics/
//! │       └── tuning/index.html
//! └── ...                               # Files copied from the static dir
//! ```
//!
//! A page's output path is its URL plus `index.html`, so `/guide/getting-started`
//! is served from `guide/getting-started/index.html`.
//!
//! ## CSS and JavaScript
//!
//! Embedded at compile time and inlined into every document:
//! - `static/style.css`: layout, sidebar and search styles
//! - `static/app.js`: sidebar toggles and search over `search-index.json`
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Titles and descriptions are escaped; rendered markdown is inserted as-is.

use crate::config::{self, ConfigError, SiteConfig};
use crate::frontmatter;
use crate::nav::{NavigationContext, SidebarItem, SidebarTree};
use crate::render::MarkdownRenderer;
use crate::scan::{self, ContentNode, ContentTree, NodeKind, ScanError};
use crate::search;
use crate::types::{Breadcrumb, SearchEntry};
use crate::urls::{UrlError, UrlTable};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Static dir error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("URL error: {0}")]
    Url(#[from] UrlError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Output directory {0} contains the content root")]
    OutputContainsContent(PathBuf),
    #[error("Output directory {0} contains the static dir")]
    OutputContainsStatic(PathBuf),
}

/// URL of the not-found page.
pub const NOT_FOUND_URL: &str = "/404/";
/// Search index file name, relative to the output root.
pub const SEARCH_INDEX_FILE: &str = "search-index.json";

const CSS: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/app.js");

/// Phase 1 result: everything page generation reads, complete and immutable.
#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    pub tree: ContentTree,
    pub urls: UrlTable,
}

impl Site {
    /// Load config, scan the content root and assign every URL.
    pub fn load(root: &Path) -> Result<Self, GenerateError> {
        let config = config::load_config(root)?;
        let tree = scan::scan(root)?;
        let urls = UrlTable::build(&tree)?;
        Ok(Self { config, tree, urls })
    }
}

/// What a build wrote.
#[derive(Debug, Default)]
pub struct BuildSummary {
    /// URLs of generated content documents, in traversal order.
    pub pages: Vec<String>,
    /// Files copied from the static dir.
    pub static_files: usize,
    /// Entries written to the search index.
    pub search_entries: usize,
}

/// Phase 2: write the site into `output_dir`.
///
/// The output directory is cleared first. `static_dir` is copied verbatim
/// when it exists.
pub fn generate(
    site: &Site,
    output_dir: &Path,
    static_dir: Option<&Path>,
    renderer: &dyn MarkdownRenderer,
) -> Result<BuildSummary, GenerateError> {
    let static_dir = static_dir.filter(|d| d.is_dir());
    prepare_output(site.tree.root_path(), static_dir, output_dir)?;

    let mut summary = BuildSummary::default();
    if let Some(dir) = static_dir {
        summary.static_files = copy_static(dir, output_dir)?;
    }

    let mut build = Build {
        site,
        renderer,
        output_dir,
        sidebar: SidebarTree::build(&site.tree, &site.urls),
        search: Vec::new(),
        homepage_body: None,
        summary,
    };
    build.emit_section(&site.tree.root)?;
    build.write_homepage()?;
    build.write_not_found()?;
    build.write_search_index()?;

    tracing::info!(
        pages = build.summary.pages.len(),
        output = %output_dir.display(),
        "Site generated"
    );
    Ok(build.summary)
}

/// Remove any previous build and recreate the directory.
///
/// Refuses when clearing would delete the content root or the static dir.
fn prepare_output(
    content_root: &Path,
    static_dir: Option<&Path>,
    output_dir: &Path,
) -> Result<(), GenerateError> {
    if output_dir.exists() {
        let output = fs::canonicalize(output_dir)?;
        if content_root.starts_with(&output) {
            return Err(GenerateError::OutputContainsContent(output));
        }
        if let Some(dir) = static_dir
            && fs::canonicalize(dir)?.starts_with(&output)
        {
            return Err(GenerateError::OutputContainsStatic(output));
        }
        fs::remove_dir_all(&output)?;
    }
    fs::create_dir_all(output_dir)?;
    Ok(())
}

/// Copy the static dir into the output root, returning the file count.
fn copy_static(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    tracing::debug!(files = copied, src = %src.display(), "Copied static files");
    Ok(copied)
}

/// Output file for a URL: `/` → `index.html`, `/a/b` and `/a/b/` → `a/b/index.html`.
pub fn output_path(output_dir: &Path, url: &str) -> PathBuf {
    let trimmed = url.trim_matches('/');
    if trimmed.is_empty() {
        output_dir.join("index.html")
    } else {
        output_dir.join(trimmed).join("index.html")
    }
}

/// Per-build state for phase 2.
struct Build<'a> {
    site: &'a Site,
    renderer: &'a dyn MarkdownRenderer,
    output_dir: &'a Path,
    sidebar: SidebarTree,
    search: Vec<SearchEntry>,
    /// Rendered body of the root `_index.md`, shown on the homepage.
    homepage_body: Option<String>,
    summary: BuildSummary,
}

impl Build<'_> {
    /// Index page first, then children in display order.
    fn emit_section(&mut self, section: &ContentNode) -> Result<(), GenerateError> {
        if let Some(index) = &section.index_path {
            if section.source_path.as_path() == self.site.tree.root_path() {
                self.emit_root_index(section, index)?;
            } else {
                self.emit_page(section, index)?;
            }
        }
        for child in &section.children {
            match child.kind {
                NodeKind::Section => self.emit_section(child)?,
                NodeKind::Page => self.emit_page(child, &child.source_path)?,
            }
        }
        Ok(())
    }

    /// Write one content document. `node` supplies title and description;
    /// `source` is the markdown file (the node itself, or a section's index).
    fn emit_page(&mut self, node: &ContentNode, source: &Path) -> Result<(), GenerateError> {
        let config = &self.site.config;
        let body = self.render_body(source)?;
        let url = self.site.urls.resolve(source);
        let description = node
            .description
            .as_deref()
            .unwrap_or(&config.default_description);
        let nav =
            NavigationContext::for_page(&self.site.tree, &self.site.urls, &self.sidebar, source, &url);

        let doc = render_document(
            config,
            &Document {
                title: &node.title,
                description,
                url: &url,
                nav: &nav,
                homepage: false,
                content: PreEscaped(body.clone()),
            },
        );
        let path = output_path(self.output_dir, &url);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, doc.into_string())?;
        tracing::debug!(url = %url, source = %source.display(), "Generated page");

        self.search
            .push(search::entry(&node.title, &url, description, &body));
        self.summary.pages.push(url);
        Ok(())
    }

    /// The root index belongs to the homepage; it only contributes a search
    /// entry here.
    fn emit_root_index(&mut self, root: &ContentNode, source: &Path) -> Result<(), GenerateError> {
        let body = self.render_body(source)?;
        let description = root
            .description
            .as_deref()
            .unwrap_or(&self.site.config.default_description);
        self.search
            .push(search::entry(&root.title, "/", description, &body));
        self.homepage_body = Some(body);
        Ok(())
    }

    fn render_body(&self, source: &Path) -> Result<String, GenerateError> {
        let doc = frontmatter::read_document(source).map_err(|source_err| GenerateError::Read {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        Ok(self.renderer.render(&doc.body))
    }

    fn write_homepage(&self) -> Result<(), GenerateError> {
        let config = &self.site.config;
        let description = self
            .site
            .tree
            .root
            .description
            .as_deref()
            .unwrap_or(&config.default_description);
        let nav = NavigationContext::homepage(&self.sidebar);
        let body = self
            .homepage_body
            .as_deref()
            .filter(|b| !b.trim().is_empty());

        let doc = render_document(
            config,
            &Document {
                title: "Home",
                description,
                url: "/",
                nav: &nav,
                homepage: true,
                content: render_homepage_content(config, body),
            },
        );
        fs::write(output_path(self.output_dir, "/"), doc.into_string())?;
        tracing::debug!("Generated homepage");
        Ok(())
    }

    fn write_not_found(&self) -> Result<(), GenerateError> {
        let config = &self.site.config;
        let nav = NavigationContext::not_found(NOT_FOUND_URL);
        let doc = render_document(
            config,
            &Document {
                title: "Page Not Found",
                description: "The requested page could not be found.",
                url: NOT_FOUND_URL,
                nav: &nav,
                homepage: false,
                content: html! {
                    div.error-page {
                        h1 { "404" }
                        p { "Page not found" }
                        a.btn href=(config.link("/")) { "Return Home" }
                    }
                },
            },
        );
        fs::write(self.output_dir.join("404.html"), doc.into_string())?;
        tracing::debug!("Generated 404 page");
        Ok(())
    }

    fn write_search_index(&mut self) -> Result<(), GenerateError> {
        let json = serde_json::to_string_pretty(&self.search)?;
        fs::write(self.output_dir.join(SEARCH_INDEX_FILE), json)?;
        self.summary.search_entries = self.search.len();
        Ok(())
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Fields every generated document is rendered from.
struct Document<'a> {
    title: &'a str,
    description: &'a str,
    /// Root-relative URL of the document.
    url: &'a str,
    nav: &'a NavigationContext,
    homepage: bool,
    content: Markup,
}

/// Renders a complete document: head, header, sidebar, article, footer.
fn render_document(config: &SiteConfig, doc: &Document) -> Markup {
    let page_title = if doc.title == config.site_title {
        doc.title.to_string()
    } else {
        format!("{} | {}", doc.title, config.site_title)
    };
    let content = html! {
        (site_header(config))
        div.layout {
            aside.sidebar id="sidebar" {
                nav.sidebar-nav aria-label="Site" {
                    (render_sidebar(&doc.nav.sidebar, config, 0))
                }
            }
            main.content {
                (render_breadcrumbs(&doc.nav.breadcrumbs, config))
                article.page-content {
                    (doc.content)
                }
            }
        }
        footer.site-footer {
            @if !config.copyright_text.is_empty() {
                p { (config.copyright_text) }
            }
        }
    };
    base_document(
        &page_title,
        doc.description,
        config.canonical(doc.url).as_deref(),
        config,
        doc.homepage.then_some("is-homepage"),
        content,
    )
}

/// Renders the base HTML document structure
fn base_document(
    title: &str,
    description: &str,
    canonical: Option<&str>,
    config: &SiteConfig,
    body_class: Option<&str>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                meta name="description" content=(description);
                @if let Some(href) = canonical {
                    link rel="canonical" href=(href);
                }
                style { (PreEscaped(CSS)) }
            }
            body class=[body_class] data-base-url=(config.base_url) {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders the site header with title link, search box and sidebar toggle
fn site_header(config: &SiteConfig) -> Markup {
    html! {
        header.site-header {
            button.sidebar-open type="button" aria-controls="sidebar" aria-label="Toggle navigation" {
                span.hamburger-line {}
                span.hamburger-line {}
                span.hamburger-line {}
            }
            a.site-title href=(config.link("/")) { (config.header()) }
            div.search {
                input.search-input id="search-input" type="search" placeholder="Search..." autocomplete="off" aria-label="Search";
                div.search-results id="search-results" hidden {}
            }
        }
    }
}

/// Home first and linked, the current page last and unlinked.
fn render_breadcrumbs(crumbs: &[Breadcrumb], config: &SiteConfig) -> Markup {
    let last = crumbs.len().saturating_sub(1);
    html! {
        nav.breadcrumbs aria-label="Breadcrumb" {
            @for (i, crumb) in crumbs.iter().enumerate() {
                @if i > 0 {
                    span.breadcrumb-separator { "/" }
                }
                @if i == 0 {
                    a.breadcrumb-home href=(config.link(&crumb.url)) { (crumb.title) }
                } @else if i == last {
                    span.breadcrumb-current aria-current="page" { (crumb.title) }
                } @else {
                    a href=(config.link(&crumb.url)) { (crumb.title) }
                }
            }
        }
    }
}

/// Renders one level of the sidebar tree. Empty input renders nothing.
fn render_sidebar(items: &[SidebarItem], config: &SiteConfig, level: usize) -> Markup {
    html! {
        @if !items.is_empty() {
            ul class={ "sidebar-list sidebar-level-" (level) } {
                @for item in items {
                    (render_sidebar_item(item, config, level))
                }
            }
        }
    }
}

fn render_sidebar_item(item: &SidebarItem, config: &SiteConfig, level: usize) -> Markup {
    let href = config.link(&item.url);
    let state = if item.expanded { "expanded" } else { "collapsed" };
    let has_children = !item.children.is_empty();
    html! {
        @if item.kind == NodeKind::Section {
            li.sidebar-item.sidebar-section.sidebar-expanded[item.expanded] data-state=(state) {
                div.sidebar-folder-header {
                    @if has_children {
                        button.sidebar-toggle type="button" aria-label="Toggle section"
                            aria-expanded=(if item.expanded { "true" } else { "false" }) {}
                    }
                    a href=(href) { (item.title) }
                }
                @if has_children {
                    div class={ "sidebar-children " (state) } {
                        (render_sidebar(&item.children, config, level + 1))
                    }
                }
            }
        } @else {
            li.sidebar-item.sidebar-page.sidebar-current[item.current] {
                a href=(href) aria-current=[item.current.then_some("page")] { (item.title) }
            }
        }
    }
}

/// Optional hero, then the root index body.
fn render_homepage_content(config: &SiteConfig, body: Option<&str>) -> Markup {
    let hero = config.show_hero && !(config.site_title.is_empty() && config.site_subtitle.is_empty());
    html! {
        @if hero {
            div.homepage-hero {
                @if !config.site_title.is_empty() {
                    h1 { (config.site_title) }
                }
                @if !config.site_subtitle.is_empty() {
                    p { (config.site_subtitle) }
                }
            }
        }
        @if let Some(body) = body {
            div.homepage-content {
                (PreEscaped(body))
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
