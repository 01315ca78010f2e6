//! # MarkStack
//!
//! A static site generator for markdown knowledge bases. Your filesystem is
//! the data source: directories become sections, markdown files become
//! pages, and frontmatter titles become URLs.
//!
//! # Architecture: Two-Phase Pipeline
//!
//! ```text
//! 1. Load      content/  →  Site        (config + content tree + URL table)
//! 2. Generate  Site      →  dist/       (HTML documents + search index)
//! ```
//!
//! Every page's breadcrumbs and sidebar link to pages that have not been
//! rendered yet, so phase 2 needs the complete URL table before it writes
//! anything. [`generate::Site::load`] builds that table once; [`generate::generate`]
//! only reads it.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | Title-casing of file names and title slugification |
//! | [`frontmatter`] | YAML frontmatter splitting and `title`/`description` extraction |
//! | [`scan`] | Phase 1: walks the content directory into a [`scan::ContentTree`] |
//! | [`urls`] | Phase 1: assigns every node its URL, rejecting collisions |
//! | [`nav`] | Breadcrumb chains and the per-page annotated sidebar |
//! | [`render`] | Markdown → HTML behind the [`render::MarkdownRenderer`] trait |
//! | [`search`] | Search-index entries and plain-text extraction |
//! | [`generate`] | Phase 2: HTML documents via Maud, homepage, 404, `search-index.json` |
//! | [`config`] | `config.toml` loading and validation |
//! | [`types`] | Shared serialized types (`Breadcrumb`, `SearchEntry`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Titles, Not File Names, Make URLs
//!
//! `guide/start.md` with `title: Getting Started` is served at
//! `/guide/getting-started`. Renaming a file changes nothing visible;
//! retitling a page moves it. Sections end in `/`, pages never do.
//!
//! ## Collisions Fail the Build
//!
//! Two siblings titled "Getting Started!" and "Getting-Started" would both be
//! written to `getting-started/index.html`. Rather than let one silently
//! overwrite the other, [`urls::UrlTable::build`] reports both source files.
//!
//! ## Display Order Is Not URL Order
//!
//! Sections sort before pages, each group by title. Sorting only affects the
//! sidebar; URL assignment never depends on it.
//!
//! ## Full Rebuilds
//!
//! Every build clears the output directory and rescans from scratch. There is
//! no cache to invalidate and no state shared between builds.

pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod nav;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod search;
pub mod types;
pub mod urls;

#[cfg(test)]
pub(crate) mod test_helpers;
